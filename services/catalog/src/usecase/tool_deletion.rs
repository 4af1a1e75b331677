use uuid::Uuid;

use crate::domain::challenge::ChallengeKey;
use crate::domain::repository::{
    CatalogCache, ChallengeRepository, CodeNotifier, ToolRepository, UserRepository,
};
use crate::domain::types::Tool;
use crate::error::CatalogError;
use crate::usecase::challenge::{IssueChallengeInput, IssueChallengeUseCase, VerifyChallengeUseCase};

/// Load a tool and make sure `user_id` created it.
async fn owned_tool<T: ToolRepository>(
    tools: &T,
    tool_id: Uuid,
    user_id: Uuid,
) -> Result<Tool, CatalogError> {
    let tool = tools
        .find_by_id(tool_id)
        .await?
        .ok_or(CatalogError::ToolNotFound)?;
    if tool.created_by != user_id {
        return Err(CatalogError::Forbidden);
    }
    Ok(tool)
}

fn parse_email(raw: &str) -> Result<String, CatalogError> {
    let raw = raw.trim();
    raw.parse::<lettre::Address>()
        .map(|_| raw.to_owned())
        .map_err(|_| CatalogError::InvalidInput("email must be a valid address".to_owned()))
}

// ── RequestToolDeletion ──────────────────────────────────────────────────────

pub struct RequestToolDeletionInput {
    pub tool_id: Uuid,
    pub user_id: Uuid,
    /// Deliver the code here instead of the account email.
    pub email: Option<String>,
}

pub struct RequestToolDeletionUseCase<T, U, C, N>
where
    T: ToolRepository,
    U: UserRepository,
    C: ChallengeRepository,
    N: CodeNotifier,
{
    pub tools: T,
    pub users: U,
    pub issuer: IssueChallengeUseCase<C, N>,
}

impl<T, U, C, N> RequestToolDeletionUseCase<T, U, C, N>
where
    T: ToolRepository,
    U: UserRepository,
    C: ChallengeRepository,
    N: CodeNotifier,
{
    pub async fn execute(&self, input: RequestToolDeletionInput) -> Result<(), CatalogError> {
        let tool = owned_tool(&self.tools, input.tool_id, input.user_id).await?;

        let deliver_to = match input.email.as_deref().filter(|e| !e.trim().is_empty()) {
            Some(email) => parse_email(email)?,
            None => {
                self.users
                    .find_by_id(input.user_id)
                    .await?
                    .ok_or(CatalogError::UserNotFound)?
                    .email
            }
        };

        self.issuer
            .execute(IssueChallengeInput {
                key: ChallengeKey::delete_tool(input.user_id, tool.id),
                deliver_to,
                tool_name: tool.name,
            })
            .await
    }
}

// ── ConfirmToolDeletion ──────────────────────────────────────────────────────

pub struct ConfirmToolDeletionInput {
    pub tool_id: Uuid,
    pub user_id: Uuid,
    pub code: String,
}

pub struct ConfirmToolDeletionUseCase<T, C, K>
where
    T: ToolRepository,
    C: ChallengeRepository,
    K: CatalogCache,
{
    pub tools: T,
    pub verifier: VerifyChallengeUseCase<C>,
    pub cache: K,
}

impl<T, C, K> ConfirmToolDeletionUseCase<T, C, K>
where
    T: ToolRepository,
    C: ChallengeRepository,
    K: CatalogCache,
{
    pub async fn execute(&self, input: ConfirmToolDeletionInput) -> Result<(), CatalogError> {
        let tool = owned_tool(&self.tools, input.tool_id, input.user_id).await?;

        let code = input.code.trim();
        if code.is_empty() {
            return Err(CatalogError::InvalidInput("code is required".to_owned()));
        }

        self.verifier
            .execute(ChallengeKey::delete_tool(input.user_id, tool.id), code)
            .await?;

        if !self.tools.delete(tool.id).await? {
            return Err(CatalogError::ToolNotFound);
        }
        tracing::info!(tool_id = %tool.id, user_id = %input.user_id, "tool deleted");

        if let Err(e) = self.cache.invalidate_tool_count().await {
            tracing::warn!(error = %e, "failed to invalidate tool count");
        }
        Ok(())
    }
}
