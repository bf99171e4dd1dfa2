//! The remote operations the pages depend on.
//!
//! Pages, loaders and the submission pipeline talk to a `Backend` rather than
//! to `ApiClient` directly, so they can be exercised against an in-memory
//! implementation.

use anyhow::Result;
use async_trait::async_trait;

use crate::auth::{Role, SessionCheck};
use crate::models::{
    AttendanceBatch, AttendanceRecord, DepartmentWorkEntry, Event, NewDepartmentWork, NewEvent,
    Student, StudentRecord, StudentReport,
};

#[async_trait]
pub trait Backend: Send + Sync {
    /// Ask the server whether the session cookie for `role` is valid.
    async fn verify_session(&self, role: Role) -> Result<SessionCheck>;

    async fn fetch_students(&self) -> Result<Vec<Student>>;

    async fn fetch_events(&self) -> Result<Vec<Event>>;

    async fn fetch_event(&self, event_id: &str) -> Result<Event>;

    async fn create_event(&self, event: &NewEvent) -> Result<()>;

    async fn delete_event(&self, event_id: &str) -> Result<()>;

    /// Existing presence records for one event.
    async fn fetch_attendance(&self, event_id: &str) -> Result<Vec<AttendanceRecord>>;

    async fn submit_attendance(&self, batch: &AttendanceBatch) -> Result<()>;

    async fn fetch_department_work(&self) -> Result<Vec<DepartmentWorkEntry>>;

    async fn submit_department_work(&self, entries: &[NewDepartmentWork]) -> Result<()>;

    async fn delete_department_work(&self, work_id: &str) -> Result<()>;

    async fn fetch_student_report(&self, student_id: &str) -> Result<StudentReport>;

    /// The logged-in student's own events and work.
    async fn fetch_own_record(&self, student_id: &str) -> Result<StudentRecord>;

    /// Whether students may see their accrued working hours. Each role reads
    /// the flag through its own endpoint.
    async fn working_hours_visibility(&self, role: Role) -> Result<bool>;

    async fn set_working_hours_visibility(&self, visible: bool) -> Result<()>;
}
