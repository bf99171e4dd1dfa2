//! Admin and student dashboards.

use anyhow::Result;
use tracing::{info, warn};

use super::Outcome;
use crate::loader::StudentDashboardData;
use crate::models::{SessionStudent, StudentRecord};
use crate::notify::Notice;
use crate::page::PageStatus;
use crate::route::Route;

/// Entries of the admin menu, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminMenuItem {
    CreateEvent,
    ManageEvents,
    DepartmentWork,
    Students,
}

impl AdminMenuItem {
    pub const ALL: [AdminMenuItem; 4] = [
        AdminMenuItem::CreateEvent,
        AdminMenuItem::ManageEvents,
        AdminMenuItem::DepartmentWork,
        AdminMenuItem::Students,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            AdminMenuItem::CreateEvent => "Create Event",
            AdminMenuItem::ManageEvents => "Manage Attendance",
            AdminMenuItem::DepartmentWork => "Department Work",
            AdminMenuItem::Students => "View Attendance",
        }
    }

    pub fn route(&self) -> Route {
        match self {
            AdminMenuItem::CreateEvent => Route::CreateEvent,
            AdminMenuItem::ManageEvents => Route::ManageEvents,
            AdminMenuItem::DepartmentWork => Route::DepartmentWork,
            AdminMenuItem::Students => Route::Students,
        }
    }
}

/// Admin menu plus the working-hours visibility switch.
#[derive(Debug, Default)]
pub struct AdminDashboardPage {
    visible: Option<bool>,
    /// Value to restore if the pending update fails.
    previous: Option<bool>,
}

impl AdminDashboardPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// `None` until the flag has been loaded.
    pub fn hours_visible(&self) -> Option<bool> {
        self.visible
    }

    pub fn is_saving(&self) -> bool {
        self.previous.is_some()
    }

    pub fn on_visibility_loaded(&mut self, result: Result<bool>) -> Outcome {
        match result {
            Ok(visible) => {
                self.visible = Some(visible);
                Outcome::none()
            }
            Err(e) => {
                warn!(error = %e, "Failed to load visibility setting");
                Outcome::none()
            }
        }
    }

    /// Flip the flag immediately and return the value to send. `None` while
    /// the flag is unknown or an update is already in flight.
    pub fn toggle_visibility(&mut self) -> Option<bool> {
        if self.is_saving() {
            return None;
        }
        let current = self.visible?;
        self.previous = Some(current);
        self.visible = Some(!current);
        self.visible
    }

    /// Reverts the optimistic flip if the server refused it.
    pub fn on_visibility_saved(&mut self, result: Result<()>) -> Outcome {
        let Some(previous) = self.previous.take() else {
            return Outcome::none();
        };
        match result {
            Ok(()) => {
                let state = if self.visible == Some(true) { "visible" } else { "hidden" };
                info!(state, "Working hours visibility updated");
                Outcome::notice(Notice::info(
                    "Working Hours Visibility Updated",
                    format!("Working hours are now {} to users", state),
                ))
            }
            Err(e) => {
                warn!(error = %e, "Failed to update visibility");
                self.visible = Some(previous);
                Outcome::notice(Notice::error("Update Failed", "Could not update visibility"))
            }
        }
    }
}

/// The logged-in student's own attendance.
#[derive(Debug)]
pub struct StudentDashboardPage {
    student: SessionStudent,
    status: PageStatus,
    record: StudentRecord,
    hours_visible: bool,
}

impl StudentDashboardPage {
    pub fn new(student: SessionStudent) -> Self {
        Self {
            status: PageStatus::for_route_id(&student.id),
            student,
            record: StudentRecord::default(),
            hours_visible: false,
        }
    }

    pub fn student(&self) -> &SessionStudent {
        &self.student
    }

    pub fn status(&self) -> PageStatus {
        self.status
    }

    pub fn record(&self) -> &StudentRecord {
        &self.record
    }

    /// Total hours, only while the admin has made them visible.
    pub fn visible_total_hours(&self) -> Option<f64> {
        self.hours_visible.then(|| self.record.total_working_hours())
    }

    /// Any failure sends the student back to the login screen.
    pub fn on_loaded(&mut self, result: Result<StudentDashboardData>) -> Outcome {
        match result {
            Ok(data) => {
                self.record = data.record;
                self.hours_visible = data.hours_visible;
                self.status = PageStatus::Ready;
                Outcome::none()
            }
            Err(e) => {
                warn!(error = %e, "Student dashboard failed to load");
                Outcome::navigate(Route::StudentLogin)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Backend;
    use crate::loader::load_student_dashboard;
    use crate::testing::{event, mark, sample_roster, work, FakeBackend};

    fn session_student() -> SessionStudent {
        SessionStudent {
            id: "s1".to_string(),
            name: "Asha".to_string(),
            student_id: None,
            branch: None,
        }
    }

    #[test]
    fn test_menu_routes() {
        let routes: Vec<Route> = AdminMenuItem::ALL.iter().map(|m| m.route()).collect();
        assert_eq!(
            routes,
            vec![Route::CreateEvent, Route::ManageEvents, Route::DepartmentWork, Route::Students]
        );
    }

    #[tokio::test]
    async fn test_visibility_toggle_succeeds() {
        let backend = FakeBackend::default();
        let mut page = AdminDashboardPage::new();
        assert_eq!(page.toggle_visibility(), None);

        page.on_visibility_loaded(backend.working_hours_visibility(crate::auth::Role::Admin).await);
        assert_eq!(page.hours_visible(), Some(false));

        let next = page.toggle_visibility().unwrap();
        assert!(next);
        assert_eq!(page.toggle_visibility(), None);

        let outcome = page.on_visibility_saved(backend.set_working_hours_visibility(next).await);
        assert_eq!(outcome.notice.unwrap().message, "Working hours are now visible to users");
        assert_eq!(page.hours_visible(), Some(true));
        assert!(backend.state().visible);
    }

    #[tokio::test]
    async fn test_visibility_toggle_reverts_on_failure() {
        let backend = FakeBackend::default();
        let mut page = AdminDashboardPage::new();
        page.on_visibility_loaded(Ok(true));

        backend.state().fail_visibility = true;
        let next = page.toggle_visibility().unwrap();
        assert_eq!(page.hours_visible(), Some(false));

        let outcome = page.on_visibility_saved(backend.set_working_hours_visibility(next).await);
        assert!(outcome.notice.unwrap().is_error());
        assert_eq!(page.hours_visible(), Some(true));
        assert!(!page.is_saving());
    }

    #[tokio::test]
    async fn test_student_dashboard_hides_hours() {
        let backend = FakeBackend::with_roster(sample_roster());
        {
            let mut state = backend.state();
            state.events.push(event("e1", "Orientation", 2.0));
            state.attendance.push(mark("s1", "e1"));
            state.work.push(work("w1", "s1", 1.0));
        }

        let mut page = StudentDashboardPage::new(session_student());
        page.on_loaded(load_student_dashboard(&backend, &session_student()).await);
        assert_eq!(page.status(), PageStatus::Ready);
        assert_eq!(page.record().events.len(), 1);
        assert_eq!(page.visible_total_hours(), None);

        backend.state().visible = true;
        page.on_loaded(load_student_dashboard(&backend, &session_student()).await);
        assert_eq!(page.visible_total_hours(), Some(3.0));
    }

    #[tokio::test]
    async fn test_student_dashboard_failure_redirects() {
        let backend = FakeBackend::with_roster(sample_roster());
        backend.state().fail_visibility = true;

        let mut page = StudentDashboardPage::new(session_student());
        let outcome = page.on_loaded(load_student_dashboard(&backend, &session_student()).await);
        assert_eq!(outcome.navigate, Some(Route::StudentLogin));
    }
}
