#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};
use uuid::Uuid;

use toolhub_domain::tool::ToolStatus;

use crate::domain::challenge::{Challenge, ChallengeKey, Verdict};
use crate::domain::secret::SecretHasher;
use crate::domain::types::{Category, CodeNotice, Tag, Tool, ToolFilter, User};
use crate::error::CatalogError;

pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, CatalogError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, CatalogError>;
}

/// Repository for catalog tools, loaded with their roles, taxonomy and creator.
pub trait ToolRepository: Send + Sync {
    /// Tools matching `filter`, newest first.
    async fn list(&self, filter: &ToolFilter) -> Result<Vec<Tool>, CatalogError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Tool>, CatalogError>;

    /// Delete a tool with its role assignments, taxonomy links and challenges.
    /// Returns `true` if deleted, `false` if not found.
    async fn delete(&self, id: Uuid) -> Result<bool, CatalogError>;

    /// Set the moderation status. Returns the updated tool, `None` if not found.
    async fn set_status(&self, id: Uuid, status: ToolStatus)
    -> Result<Option<Tool>, CatalogError>;

    async fn count(&self) -> Result<u64, CatalogError>;
}

/// Repository for confirmation challenges.
///
/// Both operations run under a lock on the challenge tuple so that concurrent
/// issue/redeem calls for the same `(user, tool, action)` are serialized.
pub trait ChallengeRepository: Send + Sync {
    /// Delete every unconsumed challenge for `challenge.key` and insert `challenge`,
    /// atomically.
    async fn replace_active(&self, challenge: &Challenge) -> Result<(), CatalogError>;

    /// Load the newest unconsumed challenge for `key`, run [`Challenge::redeem`]
    /// on it and persist the outcome. Returns `None` if no unconsumed challenge exists.
    async fn redeem(
        &self,
        key: &ChallengeKey,
        submitted: &str,
        now: DateTime<Utc>,
        hasher: &SecretHasher,
    ) -> Result<Option<Verdict>, CatalogError>;
}

/// Read-only categories and tags, ordered by name.
pub trait TaxonomyRepository: Send + Sync {
    async fn categories(&self) -> Result<Vec<Category>, CatalogError>;
    async fn tags(&self) -> Result<Vec<Tag>, CatalogError>;
}

/// Short-lived memoization of hot catalog reads (Redis, TTL).
pub trait CatalogCache: Send + Sync {
    async fn tool_count(&self) -> Result<Option<u64>, CatalogError>;
    async fn set_tool_count(&self, count: u64) -> Result<(), CatalogError>;
    async fn invalidate_tool_count(&self) -> Result<(), CatalogError>;

    async fn categories(&self) -> Result<Option<Vec<Category>>, CatalogError>;
    async fn set_categories(&self, categories: &[Category]) -> Result<(), CatalogError>;
}

/// Out-of-band delivery of confirmation codes.
pub trait CodeNotifier: Send + Sync {
    async fn send_code(&self, notice: &CodeNotice) -> Result<(), CatalogError>;
}
