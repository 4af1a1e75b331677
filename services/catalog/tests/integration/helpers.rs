use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use secrecy::ExposeSecret;
use uuid::Uuid;

use toolhub_catalog::domain::challenge::{Challenge, ChallengeKey, Verdict};
use toolhub_catalog::domain::repository::{
    CatalogCache, ChallengeRepository, CodeNotifier, TaxonomyRepository, ToolRepository,
    UserRepository,
};
use toolhub_catalog::domain::secret::SecretHasher;
use toolhub_catalog::domain::types::{
    Category, CodeNotice, Tag, TaxonRef, Tool, ToolFilter, User,
};
use toolhub_catalog::error::CatalogError;
use toolhub_domain::role::Role;
use toolhub_domain::tool::ToolStatus;

// ── Fixtures ─────────────────────────────────────────────────────────────────

/// Argon2id with minimal cost so tests stay fast.
pub fn cheap_hasher() -> SecretHasher {
    SecretHasher::new(8, 1, 1).unwrap()
}

pub fn test_user(role: Role) -> User {
    let now = Utc::now();
    let id = Uuid::new_v4();
    User {
        id,
        name: format!("{role} user"),
        email: format!("{role}-{id}@toolhub.test"),
        role,
        password_hash: cheap_hasher().hash("correct horse").unwrap(),
        created_at: now,
        updated_at: now,
    }
}

pub fn test_tool(created_by: Uuid, status: ToolStatus, roles: Vec<Role>) -> Tool {
    let now = Utc::now();
    Tool {
        id: Uuid::new_v4(),
        name: "Schema Diff Watcher".to_owned(),
        link: Some("https://tools.toolhub.test/schema-diff".to_owned()),
        documentation_url: None,
        video_url: None,
        difficulty: None,
        documentation: None,
        description: Some("Flags breaking schema changes.".to_owned()),
        how_to_use: None,
        examples: vec![],
        resource_links: vec![],
        status,
        created_by,
        creator: None,
        roles,
        categories: vec![],
        tags: vec![],
        created_at: now,
        updated_at: now,
    }
}

// ── MockUserRepo ─────────────────────────────────────────────────────────────

pub struct MockUserRepo {
    pub users: Vec<User>,
}

impl MockUserRepo {
    pub fn new(users: Vec<User>) -> Self {
        Self { users }
    }

    pub fn empty() -> Self {
        Self { users: vec![] }
    }
}

impl UserRepository for MockUserRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, CatalogError> {
        Ok(self.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, CatalogError> {
        Ok(self.users.iter().find(|u| u.email == email).cloned())
    }
}

// ── MockToolRepo ─────────────────────────────────────────────────────────────

pub struct MockToolRepo {
    pub tools: Arc<Mutex<Vec<Tool>>>,
}

impl MockToolRepo {
    pub fn new(tools: Vec<Tool>) -> Self {
        Self {
            tools: Arc::new(Mutex::new(tools)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    /// Returns a shared handle to the internal tool list for post-execution inspection.
    pub fn tools_handle(&self) -> Arc<Mutex<Vec<Tool>>> {
        Arc::clone(&self.tools)
    }
}

fn taxon_matches(r: &TaxonRef, id: i32, slug: &str) -> bool {
    match r {
        TaxonRef::Id(want) => *want == id,
        TaxonRef::Slug(want) => want == slug,
    }
}

fn filter_matches(filter: &ToolFilter, tool: &Tool) -> bool {
    if let Some(name) = &filter.name {
        if !tool.name.to_lowercase().contains(&name.to_lowercase()) {
            return false;
        }
    }
    if filter.role.is_some_and(|r| !tool.roles.contains(&r)) {
        return false;
    }
    if filter.status.is_some_and(|s| tool.status != s) {
        return false;
    }
    if let Some(category) = &filter.category {
        if !tool
            .categories
            .iter()
            .any(|c| taxon_matches(category, c.id, &c.slug))
        {
            return false;
        }
    }
    if !filter.tags.is_empty()
        && !tool
            .tags
            .iter()
            .any(|t| filter.tags.iter().any(|r| taxon_matches(r, t.id, &t.slug)))
    {
        return false;
    }
    true
}

impl ToolRepository for MockToolRepo {
    async fn list(&self, filter: &ToolFilter) -> Result<Vec<Tool>, CatalogError> {
        let mut tools: Vec<Tool> = self
            .tools
            .lock()
            .unwrap()
            .iter()
            .filter(|t| filter_matches(filter, t))
            .cloned()
            .collect();
        tools.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(tools)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Tool>, CatalogError> {
        Ok(self.tools.lock().unwrap().iter().find(|t| t.id == id).cloned())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, CatalogError> {
        let mut tools = self.tools.lock().unwrap();
        let before = tools.len();
        tools.retain(|t| t.id != id);
        Ok(tools.len() < before)
    }

    async fn set_status(
        &self,
        id: Uuid,
        status: ToolStatus,
    ) -> Result<Option<Tool>, CatalogError> {
        let mut tools = self.tools.lock().unwrap();
        Ok(tools.iter_mut().find(|t| t.id == id).map(|t| {
            t.status = status;
            t.updated_at = Utc::now();
            t.clone()
        }))
    }

    async fn count(&self) -> Result<u64, CatalogError> {
        Ok(self.tools.lock().unwrap().len() as u64)
    }
}

// ── MockChallengeRepo ────────────────────────────────────────────────────────

/// In-memory challenge store. The mutex stands in for the per-tuple database lock.
#[derive(Clone, Default)]
pub struct MockChallengeRepo {
    pub challenges: Arc<Mutex<Vec<Challenge>>>,
}

impl MockChallengeRepo {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn challenges_handle(&self) -> Arc<Mutex<Vec<Challenge>>> {
        Arc::clone(&self.challenges)
    }
}

impl ChallengeRepository for MockChallengeRepo {
    async fn replace_active(&self, challenge: &Challenge) -> Result<(), CatalogError> {
        let mut challenges = self.challenges.lock().unwrap();
        challenges.retain(|c| c.key != challenge.key || c.is_consumed());
        challenges.push(challenge.clone());
        Ok(())
    }

    async fn redeem(
        &self,
        key: &ChallengeKey,
        submitted: &str,
        now: DateTime<Utc>,
        hasher: &SecretHasher,
    ) -> Result<Option<Verdict>, CatalogError> {
        let mut challenges = self.challenges.lock().unwrap();
        let newest = challenges
            .iter_mut()
            .filter(|c| c.key == *key && !c.is_consumed())
            .max_by_key(|c| c.created_at);
        Ok(newest.map(|c| c.redeem(submitted, now, hasher)))
    }
}

// ── MockNotifier ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct SentCode {
    pub to: String,
    pub tool_name: String,
    pub code: String,
}

#[derive(Clone, Default)]
pub struct MockNotifier {
    pub sent: Arc<Mutex<Vec<SentCode>>>,
    pub fail: bool,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn sent_handle(&self) -> Arc<Mutex<Vec<SentCode>>> {
        Arc::clone(&self.sent)
    }
}

impl CodeNotifier for MockNotifier {
    async fn send_code(&self, notice: &CodeNotice) -> Result<(), CatalogError> {
        if self.fail {
            return Err(CatalogError::DeliveryFailed(anyhow::anyhow!(
                "smtp unavailable"
            )));
        }
        self.sent.lock().unwrap().push(SentCode {
            to: notice.to.clone(),
            tool_name: notice.tool_name.clone(),
            code: notice.code.expose_secret().to_owned(),
        });
        Ok(())
    }
}

// ── MockCache ────────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockCache {
    pub tool_count: Arc<Mutex<Option<u64>>>,
    pub categories: Arc<Mutex<Option<Vec<Category>>>>,
}

impl MockCache {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_tool_count(count: u64) -> Self {
        let cache = Self::default();
        *cache.tool_count.lock().unwrap() = Some(count);
        cache
    }
}

impl CatalogCache for MockCache {
    async fn tool_count(&self) -> Result<Option<u64>, CatalogError> {
        Ok(*self.tool_count.lock().unwrap())
    }

    async fn set_tool_count(&self, count: u64) -> Result<(), CatalogError> {
        *self.tool_count.lock().unwrap() = Some(count);
        Ok(())
    }

    async fn invalidate_tool_count(&self) -> Result<(), CatalogError> {
        *self.tool_count.lock().unwrap() = None;
        Ok(())
    }

    async fn categories(&self) -> Result<Option<Vec<Category>>, CatalogError> {
        Ok(self.categories.lock().unwrap().clone())
    }

    async fn set_categories(&self, categories: &[Category]) -> Result<(), CatalogError> {
        *self.categories.lock().unwrap() = Some(categories.to_vec());
        Ok(())
    }
}

// ── MockTaxonomyRepo ─────────────────────────────────────────────────────────

pub struct MockTaxonomyRepo {
    pub categories: Vec<Category>,
    pub tags: Vec<Tag>,
}

impl TaxonomyRepository for MockTaxonomyRepo {
    async fn categories(&self) -> Result<Vec<Category>, CatalogError> {
        Ok(self.categories.clone())
    }

    async fn tags(&self) -> Result<Vec<Tag>, CatalogError> {
        Ok(self.tags.clone())
    }
}
