//! Authentication: roles and the session guard.
//!
//! Sessions are cookies held by the API client's cookie store. The client
//! never inspects them; it asks the server whether the session is valid and
//! redirects to the login screen when it is not.

pub mod guard;

pub use guard::{check_session, GuardOutcome, SessionCheck};

/// Who is using the client. Each role has its own login, logout and
/// session-check endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    Student,
}

impl Role {
    pub fn title(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Student => "Student",
        }
    }
}
