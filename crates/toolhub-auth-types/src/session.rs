//! Session-cookie extractor.

use axum::extract::FromRequestParts;
use axum_extra::extract::cookie::CookieJar;
use http::StatusCode;
use http::request::Parts;
use uuid::Uuid;

use toolhub_domain::role::Role;

use crate::cookie::TOOLHUB_SESSION;
use crate::token::{TokenError, validate_session_token};

/// Application state that knows the session signing secret.
pub trait SessionSecret {
    fn session_secret(&self) -> &str;
}

/// Authenticated caller, taken from the `toolhub_session` cookie.
///
/// Returns 401 if the cookie is absent or the token does not validate.
/// Role enforcement (403) is done by handlers after extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    pub user_id: Uuid,
    pub role: Role,
}

impl Session {
    /// `true` if the caller holds `role`.
    pub fn has_role(&self, role: Role) -> bool {
        self.role == role
    }
}

impl<S> FromRequestParts<S> for Session
where
    S: SessionSecret + Send + Sync,
{
    type Rejection = StatusCode;

    // Resolve synchronously and hand back a 'static future; see axum-core 0.5 `FromRequestParts`.
    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let jar = CookieJar::from_headers(&parts.headers);
        let result = match jar.get(TOOLHUB_SESSION) {
            None => Err(StatusCode::UNAUTHORIZED),
            Some(cookie) => validate_session_token(cookie.value(), state.session_secret())
                .map(|info| Self {
                    user_id: info.user_id,
                    role: info.role,
                })
                .map_err(|e| {
                    if !matches!(e, TokenError::Expired) {
                        tracing::debug!(error = %e, "rejected session cookie");
                    }
                    StatusCode::UNAUTHORIZED
                }),
        };

        async move { result }
    }
}
