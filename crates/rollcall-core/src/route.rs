//! Navigation targets.

use crate::auth::Role;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    AdminLogin,
    StudentLogin,
    AdminDashboard,
    StudentDashboard,
    CreateEvent,
    ManageEvents,
    /// Mark attendance for the event with this id.
    MarkAttendance(String),
    DepartmentWork,
    Students,
    /// Report for the student with this record id.
    StudentReport(String),
}

impl Route {
    /// Role whose session must be valid before the route is shown.
    pub fn required_role(&self) -> Option<Role> {
        match self {
            Route::Home | Route::AdminLogin | Route::StudentLogin => None,
            Route::StudentDashboard => Some(Role::Student),
            Route::AdminDashboard
            | Route::CreateEvent
            | Route::ManageEvents
            | Route::MarkAttendance(_)
            | Route::DepartmentWork
            | Route::Students
            | Route::StudentReport(_) => Some(Role::Admin),
        }
    }

    pub fn login_for(role: Role) -> Self {
        match role {
            Role::Admin => Route::AdminLogin,
            Role::Student => Route::StudentLogin,
        }
    }

    pub fn dashboard_for(role: Role) -> Self {
        match role {
            Role::Admin => Route::AdminDashboard,
            Role::Student => Route::StudentDashboard,
        }
    }

    /// Where "back" goes from this route.
    pub fn parent(&self) -> Route {
        match self {
            Route::Home | Route::AdminLogin | Route::StudentLogin => Route::Home,
            Route::AdminDashboard | Route::StudentDashboard => Route::Home,
            Route::MarkAttendance(_) => Route::ManageEvents,
            Route::StudentReport(_) => Route::Students,
            Route::CreateEvent | Route::ManageEvents | Route::DepartmentWork | Route::Students => {
                Route::AdminDashboard
            }
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Home => "Rollcall",
            Route::AdminLogin => "Admin Login",
            Route::StudentLogin => "Student Login",
            Route::AdminDashboard => "Admin Dashboard",
            Route::StudentDashboard => "My Attendance",
            Route::CreateEvent => "Create Event",
            Route::ManageEvents => "Manage Events",
            Route::MarkAttendance(_) => "Mark Attendance",
            Route::DepartmentWork => "Department Work",
            Route::Students => "Students",
            Route::StudentReport(_) => "Student Report",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_roles() {
        assert_eq!(Route::Home.required_role(), None);
        assert_eq!(Route::AdminLogin.required_role(), None);
        assert_eq!(Route::StudentDashboard.required_role(), Some(Role::Student));
        assert_eq!(Route::MarkAttendance("e1".into()).required_role(), Some(Role::Admin));
        assert_eq!(Route::StudentReport("s1".into()).required_role(), Some(Role::Admin));
    }

    #[test]
    fn test_parent_routes() {
        assert_eq!(Route::MarkAttendance("e1".into()).parent(), Route::ManageEvents);
        assert_eq!(Route::StudentReport("s1".into()).parent(), Route::Students);
        assert_eq!(Route::DepartmentWork.parent(), Route::AdminDashboard);
        assert_eq!(Route::AdminDashboard.parent(), Route::Home);
    }

    #[test]
    fn test_login_and_dashboard_for_role() {
        assert_eq!(Route::login_for(Role::Student), Route::StudentLogin);
        assert_eq!(Route::dashboard_for(Role::Admin), Route::AdminDashboard);
    }
}
