//! Authentication request and response bodies

use serde::{Deserialize, Serialize};

use super::user::User;

/// Body of `POST /api/auth/token/`
#[derive(Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Body of `POST /api/users/register/`
///
/// The server requires `confirm_password`; the client always sends the
/// password twice.
#[derive(Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterRequest {
    pub fn new(username: &str, email: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            confirm_password: password.to_string(),
        }
    }
}

impl std::fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// `{ "token": "..." }`
#[derive(Clone, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

impl std::fmt::Debug for TokenResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenResponse").field("token", &"[REDACTED]").finish()
    }
}

/// `{ "user": {...}, "token": "..." }`
#[derive(Clone, Deserialize)]
pub struct RegisterResponse {
    pub user: User,
    pub token: String,
}

impl std::fmt::Debug for RegisterResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterResponse")
            .field("user", &self.user)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_request_repeats_password() {
        let body = serde_json::to_value(RegisterRequest::new("ada", "ada@example.com", "s3cret"))
            .unwrap();
        assert_eq!(body["confirm_password"], "s3cret");
        assert_eq!(body["password"], "s3cret");
    }

    #[test]
    fn debug_output_hides_secrets() {
        let login = LoginRequest { username: "ada".into(), password: "s3cret".into() };
        let token: TokenResponse = serde_json::from_str(r#"{"token": "abc123"}"#).unwrap();

        assert!(!format!("{login:?}").contains("s3cret"));
        assert!(!format!("{token:?}").contains("abc123"));
    }
}
