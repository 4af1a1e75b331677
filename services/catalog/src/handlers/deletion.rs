use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use toolhub_auth_types::session::Session;

use crate::error::CatalogError;
use crate::state::AppState;
use crate::usecase::challenge::{IssueChallengeUseCase, VerifyChallengeUseCase};
use crate::usecase::tool_deletion::{
    ConfirmToolDeletionInput, ConfirmToolDeletionUseCase, RequestToolDeletionInput,
    RequestToolDeletionUseCase,
};

#[derive(Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

// ── POST /tools/{id}/delete-request ──────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct DeletionRequestBody {
    /// Send the code here instead of the account email.
    #[serde(default)]
    pub email: Option<String>,
}

pub async fn request_deletion(
    session: Session,
    State(state): State<AppState>,
    Path(tool_id): Path<Uuid>,
    body: Option<Json<DeletionRequestBody>>,
) -> Result<Json<StatusResponse>, CatalogError> {
    // The body is optional; without one the code goes to the account email.
    let email = body.and_then(|Json(body)| body.email);
    let usecase = RequestToolDeletionUseCase {
        tools: state.tool_repo(),
        users: state.user_repo(),
        issuer: IssueChallengeUseCase {
            challenges: state.challenge_repo(),
            notifier: state.code_notifier(),
            hasher: state.hasher.clone(),
        },
    };
    usecase
        .execute(RequestToolDeletionInput {
            tool_id,
            user_id: session.user_id,
            email,
        })
        .await?;
    Ok(Json(StatusResponse { status: "sent" }))
}

// ── POST /tools/{id}/delete-confirm ──────────────────────────────────────────

#[derive(Deserialize)]
pub struct DeletionConfirmBody {
    #[serde(default)]
    pub code: String,
}

pub async fn confirm_deletion(
    session: Session,
    State(state): State<AppState>,
    Path(tool_id): Path<Uuid>,
    Json(body): Json<DeletionConfirmBody>,
) -> Result<Json<StatusResponse>, CatalogError> {
    let usecase = ConfirmToolDeletionUseCase {
        tools: state.tool_repo(),
        verifier: VerifyChallengeUseCase {
            challenges: state.challenge_repo(),
            hasher: state.hasher.clone(),
        },
        cache: state.catalog_cache(),
    };
    usecase
        .execute(ConfirmToolDeletionInput {
            tool_id,
            user_id: session.user_id,
            code: body.code,
        })
        .await?;
    Ok(Json(StatusResponse { status: "deleted" }))
}
