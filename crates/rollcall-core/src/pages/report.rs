//! One student's attended events, department work and total hours.

use anyhow::Result;
use tracing::warn;

use super::Outcome;
use crate::models::StudentReport;
use crate::notify::Notice;
use crate::page::PageStatus;

#[derive(Debug)]
pub struct StudentReportPage {
    student_id: String,
    status: PageStatus,
    report: Option<StudentReport>,
}

impl StudentReportPage {
    pub fn new(student_id: &str) -> Self {
        Self {
            student_id: student_id.trim().to_string(),
            status: PageStatus::for_route_id(student_id),
            report: None,
        }
    }

    pub fn student_id(&self) -> &str {
        &self.student_id
    }

    pub fn status(&self) -> PageStatus {
        self.status
    }

    pub fn report(&self) -> Option<&StudentReport> {
        self.report.as_ref()
    }

    pub fn total_working_hours(&self) -> f64 {
        self.report.as_ref().map(|r| r.total_working_hours()).unwrap_or(0.0)
    }

    /// Mark the page for a fresh load, keeping the current report on screen
    /// until the new one arrives.
    pub fn reload(&mut self) {
        if self.status != PageStatus::NotFound {
            self.status = PageStatus::Loading;
        }
    }

    pub fn on_loaded(&mut self, result: Result<StudentReport>) -> Outcome {
        if self.status != PageStatus::Loading {
            return Outcome::none();
        }
        match result {
            Ok(report) => {
                self.report = Some(report);
                self.status = PageStatus::Ready;
                Outcome::none()
            }
            Err(e) => {
                warn!(student_id = %self.student_id, error = %e, "Failed to load student report");
                Outcome::notice(Notice::error("Error", "Could not fetch student data."))
            }
        }
    }

    /// A successful delete asks for the report to be fetched again.
    pub fn on_deleted(&mut self, description: &str, result: Result<()>) -> Outcome {
        match result {
            Ok(()) => {
                self.reload();
                Outcome::notice(Notice::info("Deleted", format!("\"{}\" has been removed.", description)))
                    .then_reload()
            }
            Err(e) => {
                warn!(error = %e, "Failed to delete department work");
                Outcome::notice(Notice::error("Error", "Failed to delete department work."))
            }
        }
    }
}
