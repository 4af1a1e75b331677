use chrono::{DateTime, Utc};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use toolhub_domain::role::Role;
use toolhub_domain::tool::{Difficulty, ToolStatus};

/// TTL of memoized catalog reads (tool count, categories) in seconds.
pub const CATALOG_CACHE_TTL_SECS: u64 = 300;

/// Account that can sign in to the catalog.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    /// Argon2id PHC string.
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: i32,
    pub name: String,
    pub slug: String,
}

/// Creator summary embedded in a tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Creator {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

/// Catalog entry with its role audience and taxonomy.
#[derive(Debug, Clone)]
pub struct Tool {
    pub id: Uuid,
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
    pub created_by: Uuid,
    pub creator: Option<Creator>,
    pub roles: Vec<Role>,
    pub categories: Vec<Category>,
    pub tags: Vec<Tag>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Tool {
    pub fn is_assigned_to(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}

/// Who is looking at a tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewer {
    pub user_id: Uuid,
    pub role: Role,
}

/// The visibility rule for every tool read.
///
/// Owners see everything. Anyone else sees approved tools assigned to their
/// role, plus their own submissions that are still pending or were rejected.
pub fn can_view(viewer: Viewer, tool: &Tool) -> bool {
    if viewer.role.is_owner() {
        return true;
    }
    match tool.status {
        ToolStatus::Approved => tool.is_assigned_to(viewer.role),
        ToolStatus::Pending | ToolStatus::Rejected => tool.created_by == viewer.user_id,
    }
}

/// Category or tag reference as given in a query string: numeric id or slug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaxonRef {
    Id(i32),
    Slug(String),
}

impl TaxonRef {
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        Some(match raw.parse::<i32>() {
            Ok(id) => Self::Id(id),
            Err(_) => Self::Slug(raw.to_owned()),
        })
    }

    /// Parse a comma-separated list, dropping empty entries.
    pub fn parse_list(raw: &str) -> Vec<Self> {
        raw.split(',').filter_map(Self::parse).collect()
    }
}

/// Storage-level filters for tool listings. Visibility is applied separately.
#[derive(Debug, Clone, Default)]
pub struct ToolFilter {
    /// Case-insensitive substring of the name.
    pub name: Option<String>,
    pub role: Option<Role>,
    pub status: Option<ToolStatus>,
    pub category: Option<TaxonRef>,
    /// Matches tools carrying any of these tags.
    pub tags: Vec<TaxonRef>,
}

/// Out-of-band message carrying a freshly issued confirmation code.
#[derive(Debug)]
pub struct CodeNotice {
    pub to: String,
    pub tool_name: String,
    pub code: SecretString,
}
