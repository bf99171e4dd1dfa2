//! Turning page state into batch requests, and sending them.
//!
//! Batches are built synchronously from the roster and the selection so
//! validation happens before any request is issued. A batch is sent as one
//! request; the client never splits or retries it.

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use thiserror::Error;
use tracing::info;

use crate::api::Backend;
use crate::models::{
    AttendanceBatch, AttendanceRecord, Department, DepartmentWorkEntry, Event, NewDepartmentWork,
    NewEvent, Student,
};
use crate::selection::SelectionState;

/// Client-side validation failures. Nothing is sent while any of these hold.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("Work description is required")]
    MissingDescription,

    #[error("Select a department")]
    MissingDepartment,

    #[error("Working hours must be a number greater than zero")]
    InvalidHours,

    #[error("Select at least one student")]
    NoStudents,

    #[error("Event name is required")]
    MissingName,

    #[error("Location is required")]
    MissingLocation,

    #[error("Date must be in YYYY-MM-DD format")]
    InvalidDate,

    #[error("Working hours must be zero or more")]
    NegativeHours,
}

/// Timestamp format used on every submitted record.
pub fn timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// One presence record per selected student, in roster order.
pub fn attendance_batch(
    event: &Event,
    roster: &[Student],
    selection: &SelectionState,
    now: DateTime<Utc>,
) -> AttendanceBatch {
    let date = timestamp(now);
    let records = selection
        .selected_students(roster)
        .into_iter()
        .map(|s| AttendanceRecord {
            student_id: s.id.clone(),
            event_id: event.id.clone(),
            date: date.clone(),
        })
        .collect();

    AttendanceBatch {
        event_id: event.id.clone(),
        records,
    }
}

/// The department-work form as typed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkForm {
    pub description: String,
    pub department: Option<Department>,
    /// Raw text from the hours field.
    pub hours: String,
}

impl WorkForm {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn parsed_hours(&self) -> Result<f64, FormError> {
        match self.hours.trim().parse::<f64>() {
            Ok(h) if h.is_finite() && h > 0.0 => Ok(h),
            _ => Err(FormError::InvalidHours),
        }
    }
}

/// Validate the form and build one entry per selected student.
pub fn department_batch(
    form: &WorkForm,
    roster: &[Student],
    selection: &SelectionState,
    now: DateTime<Utc>,
) -> Result<Vec<NewDepartmentWork>, FormError> {
    let description = form.description.trim();
    if description.is_empty() {
        return Err(FormError::MissingDescription);
    }
    let department = form.department.ok_or(FormError::MissingDepartment)?;
    let hours = form.parsed_hours()?;

    let students = selection.selected_students(roster);
    if students.is_empty() {
        return Err(FormError::NoStudents);
    }

    let date = timestamp(now);
    Ok(students
        .into_iter()
        .map(|s| NewDepartmentWork {
            date: date.clone(),
            department,
            work_description: description.to_string(),
            working_hours: hours,
            student_id: s.id.clone(),
            student_name: s.name.clone(),
        })
        .collect())
}

/// The create-event form as typed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventForm {
    pub name: String,
    pub location: String,
    pub date: String,
    pub hours: String,
}

impl EventForm {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Validate and build the create-event request body.
    pub fn to_new_event(&self, now: DateTime<Utc>) -> Result<NewEvent, FormError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(FormError::MissingName);
        }
        let location = self.location.trim();
        if location.is_empty() {
            return Err(FormError::MissingLocation);
        }
        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d")
            .map_err(|_| FormError::InvalidDate)?;
        let working_hours = match self.hours.trim().parse::<f64>() {
            Ok(h) if h.is_finite() && h >= 0.0 => h,
            Ok(h) if h.is_finite() => return Err(FormError::NegativeHours),
            _ => return Err(FormError::InvalidHours),
        };

        Ok(NewEvent {
            name: name.to_string(),
            location: location.to_string(),
            date: date.format("%Y-%m-%d").to_string(),
            working_hours,
            created_at: timestamp(now),
        })
    }
}

pub async fn submit_attendance<B: Backend + ?Sized>(backend: &B, batch: &AttendanceBatch) -> Result<usize> {
    backend
        .submit_attendance(batch)
        .await
        .context("Failed to save attendance")?;
    info!(event_id = %batch.event_id, count = batch.records.len(), "Attendance saved");
    Ok(batch.records.len())
}

/// Send the batch, then re-fetch the history so the page shows the server's
/// view including the new entries.
pub async fn submit_department_work<B: Backend + ?Sized>(
    backend: &B,
    entries: &[NewDepartmentWork],
) -> Result<Vec<DepartmentWorkEntry>> {
    backend
        .submit_department_work(entries)
        .await
        .context("Failed to save department work")?;
    info!(count = entries.len(), "Department work saved");

    backend
        .fetch_department_work()
        .await
        .context("Failed to reload department work")
}
