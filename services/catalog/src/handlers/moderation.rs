use axum::{
    Json,
    extract::{Path, RawQuery, State},
};
use uuid::Uuid;

use toolhub_auth_types::session::Session;
use toolhub_domain::role::Role;
use toolhub_domain::tool::ToolStatus;

use crate::error::CatalogError;
use crate::handlers::tool::{ToolListQuery, ToolResponse};
use crate::state::AppState;
use crate::usecase::moderation::{ListSubmissionsUseCase, ModerateToolUseCase};

// ── GET /admin/tools ─────────────────────────────────────────────────────────

pub async fn list_submissions(
    session: Session,
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<Vec<ToolResponse>>, CatalogError> {
    if !session.has_role(Role::Owner) {
        return Err(CatalogError::Forbidden);
    }
    let filter = ToolListQuery::parse(raw_query.as_deref())?.into_filter()?;
    let usecase = ListSubmissionsUseCase {
        repo: state.tool_repo(),
    };
    let tools = usecase.execute(session.role, &filter).await?;
    Ok(Json(tools.into_iter().map(Into::into).collect()))
}

// ── POST /admin/tools/{id}/approve | reject ──────────────────────────────────

async fn moderate(
    session: Session,
    state: AppState,
    tool_id: Uuid,
    status: ToolStatus,
) -> Result<Json<ToolResponse>, CatalogError> {
    let usecase = ModerateToolUseCase {
        repo: state.tool_repo(),
    };
    let tool = usecase.execute(session.role, tool_id, status).await?;
    Ok(Json(tool.into()))
}

pub async fn approve_tool(
    session: Session,
    State(state): State<AppState>,
    Path(tool_id): Path<Uuid>,
) -> Result<Json<ToolResponse>, CatalogError> {
    moderate(session, state, tool_id, ToolStatus::Approved).await
}

pub async fn reject_tool(
    session: Session,
    State(state): State<AppState>,
    Path(tool_id): Path<Uuid>,
) -> Result<Json<ToolResponse>, CatalogError> {
    moderate(session, state, tool_id, ToolStatus::Rejected).await
}
