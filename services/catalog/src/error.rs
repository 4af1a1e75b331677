use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Catalog service error variants.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("forbidden")]
    Forbidden,
    #[error("tool not found")]
    ToolNotFound,
    #[error("user not found")]
    UserNotFound,
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("no active confirmation code, request a new one")]
    NoActiveChallenge,
    #[error("confirmation code expired, request a new one")]
    ChallengeExpired,
    #[error("invalid confirmation code")]
    InvalidCode,
    #[error("too many attempts, request a new code")]
    TooManyAttempts,
    #[error("failed to deliver confirmation code")]
    DeliveryFailed(#[source] anyhow::Error),
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl CatalogError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::Forbidden => "FORBIDDEN",
            Self::ToolNotFound => "TOOL_NOT_FOUND",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::NoActiveChallenge => "NO_ACTIVE_CHALLENGE",
            Self::ChallengeExpired => "CHALLENGE_EXPIRED",
            Self::InvalidCode => "INVALID_CODE",
            Self::TooManyAttempts => "TOO_MANY_ATTEMPTS",
            Self::DeliveryFailed(_) => "DELIVERY_FAILED",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::ToolNotFound | Self::UserNotFound => StatusCode::NOT_FOUND,
            Self::InvalidInput(_)
            | Self::NoActiveChallenge
            | Self::ChallengeExpired
            | Self::InvalidCode => StatusCode::UNPROCESSABLE_ENTITY,
            Self::TooManyAttempts => StatusCode::TOO_MANY_REQUESTS,
            Self::DeliveryFailed(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Only server-side failures are logged here; TraceLayer records the rest.
        match &self {
            Self::Internal(e) => {
                tracing::error!(error = ?e, kind = "INTERNAL", "internal error");
            }
            Self::DeliveryFailed(e) => {
                tracing::error!(error = ?e, kind = "DELIVERY_FAILED", "code delivery failed");
            }
            _ => {}
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
