use uuid::Uuid;

use crate::domain::repository::{CatalogCache, ToolRepository};
use crate::domain::types::{Tool, ToolFilter, Viewer, can_view};
use crate::error::CatalogError;

// ── ListTools ────────────────────────────────────────────────────────────────

pub struct ListToolsUseCase<R: ToolRepository> {
    pub repo: R,
}

impl<R: ToolRepository> ListToolsUseCase<R> {
    pub async fn execute(
        &self,
        viewer: Viewer,
        filter: &ToolFilter,
    ) -> Result<Vec<Tool>, CatalogError> {
        let tools = self.repo.list(filter).await?;
        Ok(tools
            .into_iter()
            .filter(|tool| can_view(viewer, tool))
            .collect())
    }
}

// ── GetTool ──────────────────────────────────────────────────────────────────

pub struct GetToolUseCase<R: ToolRepository> {
    pub repo: R,
}

impl<R: ToolRepository> GetToolUseCase<R> {
    pub async fn execute(&self, viewer: Viewer, id: Uuid) -> Result<Tool, CatalogError> {
        let tool = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(CatalogError::ToolNotFound)?;
        if !can_view(viewer, &tool) {
            return Err(CatalogError::Forbidden);
        }
        Ok(tool)
    }
}

// ── CountTools ───────────────────────────────────────────────────────────────

pub struct CountToolsUseCase<R: ToolRepository, K: CatalogCache> {
    pub repo: R,
    pub cache: K,
}

impl<R: ToolRepository, K: CatalogCache> CountToolsUseCase<R, K> {
    /// Total number of tools regardless of visibility, memoized for a few minutes.
    pub async fn execute(&self) -> Result<u64, CatalogError> {
        match self.cache.tool_count().await {
            Ok(Some(count)) => return Ok(count),
            Ok(None) => {}
            Err(e) => tracing::warn!(error = %e, "tool count cache read failed"),
        }

        let count = self.repo.count().await?;
        if let Err(e) = self.cache.set_tool_count(count).await {
            tracing::warn!(error = %e, "tool count cache write failed");
        }
        Ok(count)
    }
}
