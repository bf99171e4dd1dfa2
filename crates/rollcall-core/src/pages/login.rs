//! Login form state for both roles.

use anyhow::Result;
use tracing::{info, warn};

use super::Outcome;
use crate::api::{api_error, ApiError, LoginResponse};
use crate::auth::Role;
use crate::route::Route;

/// Maximum length for the id field.
const MAX_ID_LENGTH: usize = 50;

/// Maximum length for the password field.
const MAX_PASSWORD_LENGTH: usize = 128;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Id,
    Password,
}

#[derive(Debug)]
pub struct LoginForm {
    pub role: Role,
    pub id: String,
    pub password: String,
    pub focus: LoginField,
    pub error: Option<String>,
    submitting: bool,
}

impl LoginForm {
    pub fn new(role: Role, prefill_id: Option<String>) -> Self {
        let id = prefill_id.unwrap_or_default();
        let focus = if id.is_empty() { LoginField::Id } else { LoginField::Password };
        Self {
            role,
            id,
            password: String::new(),
            focus,
            error: None,
            submitting: false,
        }
    }

    /// Label for the id field.
    pub fn id_label(&self) -> &'static str {
        match self.role {
            Role::Admin => "Admin ID",
            Role::Student => "Student ID",
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn next_field(&mut self) {
        self.focus = match self.focus {
            LoginField::Id => LoginField::Password,
            LoginField::Password => LoginField::Id,
        };
    }

    pub fn push_char(&mut self, c: char) {
        let accepted = match self.focus {
            LoginField::Id => can_add_id_char(self.id.len(), c),
            LoginField::Password => can_add_password_char(self.password.len(), c),
        };
        if !accepted {
            return;
        }
        match self.focus {
            LoginField::Id => self.id.push(c),
            LoginField::Password => self.password.push(c),
        }
        self.error = None;
    }

    pub fn pop_char(&mut self) {
        match self.focus {
            LoginField::Id => self.id.pop(),
            LoginField::Password => self.password.pop(),
        };
        self.error = None;
    }

    /// Trimmed credentials to send, or `None` with an error set when a field
    /// is empty.
    pub fn begin_submit(&mut self) -> Option<(String, String)> {
        if self.submitting {
            return None;
        }
        let id = self.id.trim();
        if id.is_empty() || self.password.is_empty() {
            self.error = Some(format!("{} and password are required", self.id_label()));
            return None;
        }
        self.error = None;
        self.submitting = true;
        Some((id.to_string(), self.password.clone()))
    }

    /// Success goes to the role's dashboard. Anything else stays on the form
    /// with a message.
    pub fn on_response(&mut self, result: Result<LoginResponse>) -> Outcome {
        self.submitting = false;
        match result {
            Ok(response) if response.success => {
                info!(role = self.role.title(), "Login successful");
                self.password.clear();
                Outcome::navigate(Route::dashboard_for(self.role))
            }
            Ok(response) => {
                self.error = Some(
                    response
                        .message
                        .filter(|m| !m.is_empty())
                        .unwrap_or_else(|| "Login failed - invalid response".to_string()),
                );
                Outcome::none()
            }
            Err(e) => {
                warn!(role = self.role.title(), error = %e, "Login failed");
                self.error = Some(describe_login_error(&e));
                Outcome::none()
            }
        }
    }
}

/// User-facing wording for a failed login request.
pub fn describe_login_error(err: &anyhow::Error) -> String {
    match api_error(err) {
        Some(e) if e.is_timeout() => "Request timeout - please try again".to_string(),
        Some(ApiError::NetworkError(_)) => "Network error - please check your connection".to_string(),
        Some(ApiError::Unauthorized) => "Invalid credentials".to_string(),
        Some(e) => e
            .server_message()
            .map(str::to_string)
            .unwrap_or_else(|| e.to_string()),
        None => "An unexpected error occurred".to_string(),
    }
}

fn is_valid_input_char(c: char) -> bool {
    !c.is_control()
}

pub fn can_add_id_char(current_len: usize, c: char) -> bool {
    current_len < MAX_ID_LENGTH && is_valid_input_char(c)
}

pub fn can_add_password_char(current_len: usize, c: char) -> bool {
    current_len < MAX_PASSWORD_LENGTH && is_valid_input_char(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefill_moves_focus_to_password() {
        assert_eq!(LoginForm::new(Role::Admin, None).focus, LoginField::Id);
        assert_eq!(LoginForm::new(Role::Admin, Some("admin1".into())).focus, LoginField::Password);
    }

    #[test]
    fn test_empty_fields_are_blocked() {
        let mut form = LoginForm::new(Role::Student, Some("  ".into()));
        form.password = "secret".to_string();
        assert_eq!(form.begin_submit(), None);
        assert_eq!(form.error.as_deref(), Some("Student ID and password are required"));
        assert!(!form.is_submitting());
    }

    #[test]
    fn test_success_navigates_to_dashboard() {
        let mut form = LoginForm::new(Role::Admin, Some("admin1".into()));
        form.password = "secret".to_string();
        assert_eq!(form.begin_submit(), Some(("admin1".to_string(), "secret".to_string())));

        let outcome = form.on_response(Ok(LoginResponse { success: true, message: None }));
        assert_eq!(outcome.navigate, Some(Route::AdminDashboard));
        assert!(form.password.is_empty());
    }

    #[test]
    fn test_rejected_login_shows_server_message() {
        let mut form = LoginForm::new(Role::Student, Some("22CSE01".into()));
        form.password = "wrong".to_string();
        form.begin_submit();

        let outcome = form.on_response(Ok(LoginResponse {
            success: false,
            message: Some("Invalid password".to_string()),
        }));
        assert_eq!(outcome.navigate, None);
        assert_eq!(form.error.as_deref(), Some("Invalid password"));

        form.on_response(Err(ApiError::Rejected("User not found".into()).into()));
        assert_eq!(form.error.as_deref(), Some("User not found"));

        form.on_response(Err(ApiError::Unauthorized.into()));
        assert_eq!(form.error.as_deref(), Some("Invalid credentials"));
    }

    #[test]
    fn test_input_limits() {
        assert!(can_add_id_char(0, 'a'));
        assert!(!can_add_id_char(50, 'a'));
        assert!(!can_add_id_char(0, '\n'));
        assert!(can_add_password_char(127, '!'));
        assert!(!can_add_password_char(128, 'a'));
    }

    #[test]
    fn test_typing_clears_error() {
        let mut form = LoginForm::new(Role::Admin, None);
        form.error = Some("bad".to_string());
        form.push_char('a');
        assert_eq!(form.id, "a");
        assert!(form.error.is_none());
        form.next_field();
        form.push_char('p');
        form.pop_char();
        assert!(form.password.is_empty());
    }
}
