use uuid::Uuid;

use toolhub_domain::role::Role;
use toolhub_domain::tool::ToolStatus;

use crate::domain::repository::ToolRepository;
use crate::domain::types::{Tool, ToolFilter};
use crate::error::CatalogError;

fn require_owner(role: Role) -> Result<(), CatalogError> {
    if role.is_owner() {
        Ok(())
    } else {
        Err(CatalogError::Forbidden)
    }
}

// ── ListSubmissions ──────────────────────────────────────────────────────────

pub struct ListSubmissionsUseCase<R: ToolRepository> {
    pub repo: R,
}

impl<R: ToolRepository> ListSubmissionsUseCase<R> {
    /// Every tool matching `filter`, regardless of status or audience.
    pub async fn execute(&self, role: Role, filter: &ToolFilter) -> Result<Vec<Tool>, CatalogError> {
        require_owner(role)?;
        self.repo.list(filter).await
    }
}

// ── Approve / Reject ─────────────────────────────────────────────────────────

pub struct ModerateToolUseCase<R: ToolRepository> {
    pub repo: R,
}

impl<R: ToolRepository> ModerateToolUseCase<R> {
    pub async fn execute(
        &self,
        role: Role,
        tool_id: Uuid,
        status: ToolStatus,
    ) -> Result<Tool, CatalogError> {
        require_owner(role)?;
        let tool = self
            .repo
            .set_status(tool_id, status)
            .await?
            .ok_or(CatalogError::ToolNotFound)?;
        tracing::info!(tool_id = %tool.id, status = %status, "tool moderated");
        Ok(tool)
    }
}
