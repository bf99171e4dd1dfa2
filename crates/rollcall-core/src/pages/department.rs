//! Record department work for a batch of students, and manage the history.

use anyhow::Result;
use chrono::{DateTime, Utc};
use tracing::{info, warn};

use super::Outcome;
use crate::aggregate::{self, BranchCount};
use crate::loader::DepartmentData;
use crate::models::{Branch, DepartmentWorkEntry, NewDepartmentWork, Student};
use crate::notify::{describe_error, Notice};
use crate::page::PageStatus;
use crate::selection::{BranchToggle, SelectionState};
use crate::submit::{self, WorkForm};

/// How many history entries the page shows.
pub const HISTORY_LIMIT: usize = 10;

#[derive(Debug)]
pub struct DepartmentWorkPage {
    status: PageStatus,
    roster: Vec<Student>,
    history: Vec<DepartmentWorkEntry>,
    selection: SelectionState,
    pending: usize,
    pub form: WorkForm,
    pub branch: Option<Branch>,
    pub query: String,
}

impl Default for DepartmentWorkPage {
    fn default() -> Self {
        Self::new()
    }
}

impl DepartmentWorkPage {
    pub fn new() -> Self {
        Self {
            status: PageStatus::Loading,
            roster: Vec::new(),
            history: Vec::new(),
            selection: SelectionState::default(),
            pending: 0,
            form: WorkForm::default(),
            branch: None,
            query: String::new(),
        }
    }

    pub fn status(&self) -> PageStatus {
        self.status
    }

    pub fn roster(&self) -> &[Student] {
        &self.roster
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn on_loaded(&mut self, result: Result<DepartmentData>) -> Outcome {
        if self.status != PageStatus::Loading {
            return Outcome::none();
        }
        match result {
            Ok(data) => {
                self.selection = SelectionState::new(&data.roster);
                self.roster = data.roster;
                self.history = data.history;
                self.status = PageStatus::Ready;
                Outcome::none()
            }
            Err(e) => {
                warn!(error = %e, "Department page failed to load");
                Outcome::notice(Notice::error("Error", describe_error(&e, "Failed to load students or work")))
            }
        }
    }

    pub fn select_branch(&mut self, branch: Branch) {
        self.branch = Some(branch);
    }

    pub fn visible_students(&self) -> Vec<&Student> {
        match self.branch {
            Some(branch) => aggregate::filter_students(&self.roster, branch, &self.query),
            None => Vec::new(),
        }
    }

    pub fn toggle(&mut self, student_id: &str) -> Option<bool> {
        if !self.status.is_ready() {
            return None;
        }
        self.selection.toggle(student_id)
    }

    pub fn toggle_branch(&mut self) -> BranchToggle {
        match self.branch {
            Some(branch) if self.status.is_ready() => self.selection.toggle_branch(&self.roster, branch),
            _ => BranchToggle::Empty,
        }
    }

    pub fn branch_count(&self, branch: Branch) -> BranchCount {
        aggregate::branch_count(&self.roster, &self.selection, branch)
    }

    pub fn total_selected(&self) -> usize {
        aggregate::total_selected(&self.selection)
    }

    /// The newest entries first, at most `HISTORY_LIMIT` of them. The server
    /// returns history oldest first.
    pub fn recent_history(&self) -> Vec<&DepartmentWorkEntry> {
        self.history.iter().rev().take(HISTORY_LIMIT).collect()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Validate the form against the selection and move to `Submitting`.
    /// Validation failures come back as an error notice and leave the page
    /// untouched.
    pub fn begin_submit(&mut self, now: DateTime<Utc>) -> Result<Vec<NewDepartmentWork>, Notice> {
        if !self.status.is_ready() {
            return Err(Notice::error("Please Wait", "The page is still busy"));
        }
        let entries = submit::department_batch(&self.form, &self.roster, &self.selection, now)
            .map_err(|e| Notice::error("Missing Information", e.to_string()))?;
        self.pending = entries.len();
        self.status = PageStatus::Submitting;
        Ok(entries)
    }

    /// Takes the re-fetched history on success.
    pub fn on_submitted(&mut self, result: Result<Vec<DepartmentWorkEntry>>) -> Outcome {
        if self.status != PageStatus::Submitting {
            return Outcome::none();
        }
        self.status = PageStatus::Ready;
        let count = std::mem::take(&mut self.pending);
        match result {
            Ok(history) => {
                info!(count, "Department work recorded");
                self.history = history;
                self.form.clear();
                self.selection.clear();
                Outcome::notice(Notice::info("Work Recorded", format!("Recorded for {} students", count)))
            }
            Err(e) => {
                warn!(error = %e, "Department work submission failed");
                Outcome::notice(Notice::error("Submit Failed", describe_error(&e, "Could not save work")))
            }
        }
    }

    /// Removes the entry locally once the server has deleted it.
    pub fn on_deleted(&mut self, work_id: &str, result: Result<()>) -> Outcome {
        match result {
            Ok(()) => {
                self.history.retain(|w| w.id != work_id);
                Outcome::notice(Notice::info("Department Work Deleted", "The work record has been removed"))
            }
            Err(e) => {
                warn!(work_id, error = %e, "Failed to delete department work");
                Outcome::notice(Notice::error("Failed to Delete", "Could not delete work"))
            }
        }
    }
}
