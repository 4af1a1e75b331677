use axum::{Json, extract::State};

use toolhub_domain::role::Role;

use crate::domain::types::{Category, Tag};
use crate::error::CatalogError;
use crate::state::AppState;
use crate::usecase::taxonomy::{ListCategoriesUseCase, ListTagsUseCase};

// ── GET /roles ───────────────────────────────────────────────────────────────

pub async fn list_roles() -> Json<Vec<Role>> {
    Json(Role::ALL.to_vec())
}

// ── GET /categories ──────────────────────────────────────────────────────────

pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<Category>>, CatalogError> {
    let usecase = ListCategoriesUseCase {
        repo: state.taxonomy_repo(),
        cache: state.catalog_cache(),
    };
    Ok(Json(usecase.execute().await?))
}

// ── GET /tags ────────────────────────────────────────────────────────────────

pub async fn list_tags(State(state): State<AppState>) -> Result<Json<Vec<Tag>>, CatalogError> {
    let usecase = ListTagsUseCase {
        repo: state.taxonomy_repo(),
    };
    Ok(Json(usecase.execute().await?))
}
