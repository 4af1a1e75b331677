use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};

use toolhub_auth_types::cookie::{clear_session_cookie, set_session_cookie};
use toolhub_auth_types::session::Session;
use toolhub_domain::role::Role;

use crate::domain::types::User;
use crate::error::CatalogError;
use crate::state::AppState;
use crate::usecase::session::{GetCurrentUserUseCase, LoginInput, LoginUseCase};

#[derive(Serialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(serialize_with = "toolhub_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "toolhub_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name,
            email: user.email,
            role: user.role,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

// ── POST /login ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<LoginRequest>,
) -> Result<impl IntoResponse, CatalogError> {
    let usecase = LoginUseCase {
        users: state.user_repo(),
        hasher: state.hasher.clone(),
        session_secret: state.session_secret.clone(),
    };
    let output = usecase
        .execute(LoginInput {
            email: body.email,
            password: body.password,
        })
        .await?;

    let jar = set_session_cookie(jar, output.token, state.cookie_domain.clone());
    Ok((jar, Json(UserResponse::from(output.user))))
}

// ── POST /logout ─────────────────────────────────────────────────────────────

pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    let jar = clear_session_cookie(jar, state.cookie_domain.clone());
    (jar, StatusCode::NO_CONTENT)
}

// ── GET /user ────────────────────────────────────────────────────────────────

pub async fn current_user(
    session: Session,
    State(state): State<AppState>,
) -> Result<Json<UserResponse>, CatalogError> {
    let usecase = GetCurrentUserUseCase {
        users: state.user_repo(),
    };
    let user = usecase.execute(session.user_id).await?;
    Ok(Json(user.into()))
}
