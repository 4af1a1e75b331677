use axum::{
    Json,
    extract::{Path, RawQuery, State},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use toolhub_auth_types::session::Session;
use toolhub_domain::role::Role;
use toolhub_domain::tool::{Difficulty, ToolStatus};

use crate::domain::types::{Category, Creator, Tag, TaxonRef, Tool, ToolFilter, Viewer};
use crate::error::CatalogError;
use crate::state::AppState;
use crate::usecase::tool::{CountToolsUseCase, GetToolUseCase, ListToolsUseCase};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct CreatorResponse {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl From<Creator> for CreatorResponse {
    fn from(creator: Creator) -> Self {
        Self {
            id: creator.id.to_string(),
            name: creator.name,
            email: creator.email,
        }
    }
}

#[derive(Serialize)]
pub struct ToolResponse {
    pub id: String,
    pub name: String,
    pub link: Option<String>,
    pub documentation_url: Option<String>,
    pub video_url: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub documentation: Option<String>,
    pub description: Option<String>,
    pub how_to_use: Option<String>,
    pub examples: Vec<String>,
    pub resource_links: Vec<String>,
    pub status: ToolStatus,
    pub created_by: String,
    pub creator: Option<CreatorResponse>,
    pub roles: Vec<Role>,
    pub categories: Vec<Category>,
    pub tags: Vec<Tag>,
    #[serde(serialize_with = "toolhub_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "toolhub_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Tool> for ToolResponse {
    fn from(tool: Tool) -> Self {
        Self {
            id: tool.id.to_string(),
            name: tool.name,
            link: tool.link,
            documentation_url: tool.documentation_url,
            video_url: tool.video_url,
            difficulty: tool.difficulty,
            documentation: tool.documentation,
            description: tool.description,
            how_to_use: tool.how_to_use,
            examples: tool.examples,
            resource_links: tool.resource_links,
            status: tool.status,
            created_by: tool.created_by.to_string(),
            creator: tool.creator.map(Into::into),
            roles: tool.roles,
            categories: tool.categories,
            tags: tool.tags,
            created_at: tool.created_at,
            updated_at: tool.updated_at,
        }
    }
}

#[derive(Serialize)]
pub struct CountResponse {
    pub count: u64,
}

// ── Query params ─────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct ToolListQuery {
    pub name: Option<String>,
    pub role: Option<String>,
    pub status: Option<String>,
    /// Category id or slug.
    pub category: Option<String>,
    /// Comma-separated tag ids or slugs.
    pub tags: Option<String>,
}

impl ToolListQuery {
    pub fn parse(raw_query: Option<&str>) -> Result<Self, CatalogError> {
        raw_query
            .map(serde_qs::from_str)
            .transpose()
            .map_err(|_| CatalogError::InvalidInput("malformed query string".to_owned()))
            .map(Option::unwrap_or_default)
    }

    /// Convert to a storage filter. Empty parameters are ignored.
    pub fn into_filter(self) -> Result<ToolFilter, CatalogError> {
        fn present(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.trim().is_empty())
        }

        let role = present(self.role)
            .map(|r| r.trim().parse::<Role>())
            .transpose()
            .map_err(|e| CatalogError::InvalidInput(e.to_string()))?;
        let status = present(self.status)
            .map(|s| s.trim().parse::<ToolStatus>())
            .transpose()
            .map_err(|e| CatalogError::InvalidInput(e.to_string()))?;
        Ok(ToolFilter {
            name: present(self.name),
            role,
            status,
            category: self.category.as_deref().and_then(TaxonRef::parse),
            tags: self
                .tags
                .as_deref()
                .map(TaxonRef::parse_list)
                .unwrap_or_default(),
        })
    }
}

// ── GET /tools ───────────────────────────────────────────────────────────────

pub async fn list_tools(
    session: Session,
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<Vec<ToolResponse>>, CatalogError> {
    let filter = ToolListQuery::parse(raw_query.as_deref())?.into_filter()?;
    let usecase = ListToolsUseCase {
        repo: state.tool_repo(),
    };
    let viewer = Viewer {
        user_id: session.user_id,
        role: session.role,
    };
    let tools = usecase.execute(viewer, &filter).await?;
    Ok(Json(tools.into_iter().map(Into::into).collect()))
}

// ── GET /tools/count ─────────────────────────────────────────────────────────

pub async fn count_tools(
    _session: Session,
    State(state): State<AppState>,
) -> Result<Json<CountResponse>, CatalogError> {
    let usecase = CountToolsUseCase {
        repo: state.tool_repo(),
        cache: state.catalog_cache(),
    };
    let count = usecase.execute().await?;
    Ok(Json(CountResponse { count }))
}

// ── GET /tools/{id} ──────────────────────────────────────────────────────────

pub async fn get_tool(
    session: Session,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ToolResponse>, CatalogError> {
    let usecase = GetToolUseCase {
        repo: state.tool_repo(),
    };
    let viewer = Viewer {
        user_id: session.user_id,
        role: session.role,
    };
    let tool = usecase.execute(viewer, id).await?;
    Ok(Json(tool.into()))
}
