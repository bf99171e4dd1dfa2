//! Concurrent fetches that populate a page on mount.
//!
//! Each loader joins its requests with `try_join!`: the page becomes ready
//! only when every request succeeds, and a single failure fails the load.
//! Loaders keyed by a route identifier refuse an empty one without issuing
//! any request.

use anyhow::{bail, Context, Result};
use tracing::debug;

use crate::api::Backend;
use crate::auth::Role;
use crate::models::{
    AttendanceRecord, DepartmentWorkEntry, Event, SessionStudent, Student, StudentRecord,
    StudentReport,
};

/// Everything the mark-attendance page needs.
#[derive(Debug, Clone)]
pub struct AttendanceData {
    pub event: Event,
    pub roster: Vec<Student>,
    pub records: Vec<AttendanceRecord>,
}

/// Everything the department-work page needs.
#[derive(Debug, Clone)]
pub struct DepartmentData {
    pub roster: Vec<Student>,
    pub history: Vec<DepartmentWorkEntry>,
}

/// The student dashboard: own record plus whether hours may be shown.
#[derive(Debug, Clone)]
pub struct StudentDashboardData {
    pub record: StudentRecord,
    pub hours_visible: bool,
}

fn require_id<'a>(id: &'a str, what: &str) -> Result<&'a str> {
    let id = id.trim();
    if id.is_empty() {
        bail!("Missing {} id", what);
    }
    Ok(id)
}

pub async fn load_attendance<B: Backend + ?Sized>(backend: &B, event_id: &str) -> Result<AttendanceData> {
    let event_id = require_id(event_id, "event")?;
    debug!(event_id, "Loading attendance page");

    let (event, roster, records) = futures::try_join!(
        backend.fetch_event(event_id),
        backend.fetch_students(),
        backend.fetch_attendance(event_id),
    )
    .context("Failed to load attendance data")?;

    debug!(students = roster.len(), records = records.len(), "Attendance page loaded");
    Ok(AttendanceData { event, roster, records })
}

pub async fn load_department<B: Backend + ?Sized>(backend: &B) -> Result<DepartmentData> {
    let (roster, history) = futures::try_join!(backend.fetch_students(), backend.fetch_department_work())
        .context("Failed to load students or work")?;

    debug!(students = roster.len(), entries = history.len(), "Department page loaded");
    Ok(DepartmentData { roster, history })
}

pub async fn load_roster<B: Backend + ?Sized>(backend: &B) -> Result<Vec<Student>> {
    backend.fetch_students().await.context("Failed to load students")
}

pub async fn load_events<B: Backend + ?Sized>(backend: &B) -> Result<Vec<Event>> {
    backend.fetch_events().await.context("Failed to load events")
}

pub async fn load_report<B: Backend + ?Sized>(backend: &B, student_id: &str) -> Result<StudentReport> {
    let student_id = require_id(student_id, "student")?;
    backend
        .fetch_student_report(student_id)
        .await
        .context("Failed to load student report")
}

pub async fn load_visibility<B: Backend + ?Sized>(backend: &B) -> Result<bool> {
    backend
        .working_hours_visibility(Role::Admin)
        .await
        .context("Failed to load visibility setting")
}

pub async fn load_student_dashboard<B: Backend + ?Sized>(
    backend: &B,
    student: &SessionStudent,
) -> Result<StudentDashboardData> {
    let student_id = require_id(&student.id, "student")?;
    let (record, hours_visible) = futures::try_join!(
        backend.fetch_own_record(student_id),
        backend.working_hours_visibility(Role::Student),
    )
    .context("Failed to load dashboard")?;

    Ok(StudentDashboardData { record, hours_visible })
}
