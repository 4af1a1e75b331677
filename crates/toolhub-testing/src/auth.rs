//! Mock session helpers for integration tests.
//!
//! Handlers authenticate through the `toolhub_session` cookie. `MockSession` signs a
//! token with the test secret so requests can be made without going through `/login`.

use std::time::{SystemTime, UNIX_EPOCH};

use axum::http::{HeaderName, HeaderValue, header};
use uuid::Uuid;

use toolhub_auth_types::cookie::TOOLHUB_SESSION;
use toolhub_auth_types::token::issue_session_token;
use toolhub_domain::role::Role;

/// Secret shared by test app state and `MockSession`.
pub const TEST_SESSION_SECRET: &str = "test-session-secret-for-unit-tests-only";

/// Configurable identity injected into test requests.
pub struct MockSession {
    pub user_id: Uuid,
    pub role: Role,
}

impl MockSession {
    pub fn new(user_id: Uuid, role: Role) -> Self {
        Self { user_id, role }
    }

    /// Signed session token valid for one hour.
    pub fn token(&self) -> String {
        let exp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs()
            + 3600;
        issue_session_token(self.user_id, self.role, exp, TEST_SESSION_SECRET).unwrap()
    }

    /// `Cookie` header carrying the session, as a browser would send it.
    pub fn cookie_header(&self) -> (HeaderName, HeaderValue) {
        let value = format!("{TOOLHUB_SESSION}={}", self.token());
        (header::COOKIE, HeaderValue::from_str(&value).unwrap())
    }
}
