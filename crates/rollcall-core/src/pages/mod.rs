//! Page state containers.
//!
//! Each page owns the data it fetched on mount plus its local UI state
//! (selection, filters, form fields). Pages never perform I/O themselves:
//! the front-end spawns the loaders and submissions, then feeds their
//! results back through the `on_*` methods, which return an `Outcome`
//! describing what to show and where to go next.

pub mod attendance;
pub mod dashboard;
pub mod department;
pub mod events;
pub mod login;
pub mod report;
pub mod students;

pub use attendance::MarkAttendancePage;
pub use dashboard::{AdminDashboardPage, AdminMenuItem, StudentDashboardPage};
pub use department::{DepartmentWorkPage, HISTORY_LIMIT};
pub use events::{CreateEventPage, EventsPage};
pub use login::{LoginField, LoginForm};
pub use report::StudentReportPage;
pub use students::StudentsPage;

use crate::notify::Notice;
use crate::route::Route;

/// What the front-end should do after a page handled a result.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outcome {
    pub notice: Option<Notice>,
    pub navigate: Option<Route>,
    /// The page wants its data loaded again.
    pub reload: bool,
}

impl Outcome {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn notice(notice: Notice) -> Self {
        Self {
            notice: Some(notice),
            ..Self::default()
        }
    }

    pub fn navigate(route: Route) -> Self {
        Self {
            navigate: Some(route),
            ..Self::default()
        }
    }

    pub fn then_navigate(mut self, route: Route) -> Self {
        self.navigate = Some(route);
        self
    }

    pub fn then_reload(mut self) -> Self {
        self.reload = true;
        self
    }
}
