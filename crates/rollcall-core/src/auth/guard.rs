use tracing::{debug, info};

use super::Role;
use crate::api::Backend;
use crate::models::SessionStudent;

/// Result of a session check as returned by the server.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionCheck {
    pub success: bool,
    /// Present for student sessions.
    pub student: Option<SessionStudent>,
}

/// What a page should do after checking the session on mount.
#[derive(Debug, Clone, PartialEq)]
pub enum GuardOutcome {
    /// The session is valid. Student sessions carry the student's identity.
    Allowed(Option<SessionStudent>),
    /// Invalid, missing, or unverifiable session: go to the role's login.
    RedirectToLogin(Role),
}

/// Check the session for `role`. Fails closed: a transport error is treated
/// the same as an invalid session, and there are no retries.
pub async fn check_session<B: Backend + ?Sized>(backend: &B, role: Role) -> GuardOutcome {
    match backend.verify_session(role).await {
        Ok(check) if check.success => {
            debug!(role = role.title(), "Session valid");
            GuardOutcome::Allowed(check.student)
        }
        Ok(_) => {
            info!(role = role.title(), "Session rejected, redirecting to login");
            GuardOutcome::RedirectToLogin(role)
        }
        Err(e) => {
            info!(role = role.title(), error = %e, "Session check failed, redirecting to login");
            GuardOutcome::RedirectToLogin(role)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeBackend;

    #[tokio::test]
    async fn test_valid_admin_session_is_allowed() {
        let backend = FakeBackend::default();
        backend.state().admin_session = true;
        assert_eq!(check_session(&backend, Role::Admin).await, GuardOutcome::Allowed(None));
    }

    #[tokio::test]
    async fn test_invalid_session_redirects() {
        let backend = FakeBackend::default();
        assert_eq!(
            check_session(&backend, Role::Admin).await,
            GuardOutcome::RedirectToLogin(Role::Admin)
        );
    }

    #[tokio::test]
    async fn test_network_failure_fails_closed() {
        let backend = FakeBackend::default();
        {
            let mut state = backend.state();
            state.student_session = true;
            state.fail_session_check = true;
        }
        assert_eq!(
            check_session(&backend, Role::Student).await,
            GuardOutcome::RedirectToLogin(Role::Student)
        );
    }

    #[tokio::test]
    async fn test_student_session_carries_identity() {
        let backend = FakeBackend::default();
        backend.state().student_session = true;
        match check_session(&backend, Role::Student).await {
            GuardOutcome::Allowed(Some(student)) => assert_eq!(student.id, "s1"),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }
}
