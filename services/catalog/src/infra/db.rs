use std::collections::HashMap;

use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::{Condition, Expr, Func, Query, SelectStatement};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection,
    DbBackend, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
    Statement, TransactionTrait,
};
use uuid::Uuid;

use toolhub_catalog_schema::{
    categories, category_tool, tag_tool, tags, tool_action_challenges, tool_roles, tools, users,
};
use toolhub_domain::role::Role;
use toolhub_domain::tool::{Difficulty, ToolStatus};

use crate::domain::challenge::{Challenge, ChallengeKey, Verdict};
use crate::domain::repository::{
    ChallengeRepository, TaxonomyRepository, ToolRepository, UserRepository,
};
use crate::domain::secret::SecretHasher;
use crate::domain::types::{Category, Creator, Tag, TaxonRef, Tool, ToolFilter, User};
use crate::error::CatalogError;

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, CatalogError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model).transpose()?)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, CatalogError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        Ok(model.map(user_from_model).transpose()?)
    }
}

fn user_from_model(model: users::Model) -> anyhow::Result<User> {
    let role = model
        .role
        .parse::<Role>()
        .with_context(|| format!("user {} has invalid role", model.id))?;
    Ok(User {
        id: model.id,
        name: model.name,
        email: model.email,
        role,
        password_hash: model.password_hash,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

// ── Tool repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbToolRepository {
    pub db: DatabaseConnection,
}

impl ToolRepository for DbToolRepository {
    async fn list(&self, filter: &ToolFilter) -> Result<Vec<Tool>, CatalogError> {
        let mut query = tools::Entity::find()
            .order_by_desc(tools::Column::CreatedAt)
            .order_by_desc(tools::Column::Id);

        if let Some(name) = filter.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
            let pattern = format!("%{}%", name.to_lowercase());
            query = query.filter(
                Expr::expr(Func::lower(Expr::col((tools::Entity, tools::Column::Name))))
                    .like(pattern),
            );
        }
        if let Some(status) = filter.status {
            query = query.filter(tools::Column::Status.eq(status.as_str()));
        }
        if let Some(role) = filter.role {
            query = query.filter(tools::Column::Id.in_subquery(tools_with_role(role)));
        }
        if let Some(category) = &filter.category {
            query = query.filter(tools::Column::Id.in_subquery(tools_in_category(category)));
        }
        if !filter.tags.is_empty() {
            query = query.filter(tools::Column::Id.in_subquery(tools_with_any_tag(&filter.tags)));
        }

        let models = query.all(&self.db).await.context("list tools")?;
        Ok(self.load_relations(models).await?)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Tool>, CatalogError> {
        let Some(model) = tools::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find tool by id")?
        else {
            return Ok(None);
        };
        Ok(self.load_relations(vec![model]).await?.pop())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, CatalogError> {
        // Role assignments, taxonomy links and challenges go with it (ON DELETE CASCADE).
        let result = tools::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete tool")?;
        Ok(result.rows_affected > 0)
    }

    async fn set_status(
        &self,
        id: Uuid,
        status: ToolStatus,
    ) -> Result<Option<Tool>, CatalogError> {
        let result = tools::Entity::update_many()
            .col_expr(tools::Column::Status, Expr::value(status.as_str()))
            .col_expr(tools::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(tools::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .context("set tool status")?;
        if result.rows_affected == 0 {
            return Ok(None);
        }
        self.find_by_id(id).await
    }

    async fn count(&self) -> Result<u64, CatalogError> {
        let count = tools::Entity::find()
            .count(&self.db)
            .await
            .context("count tools")?;
        Ok(count)
    }
}

impl DbToolRepository {
    /// Attach roles, categories, tags and creator to a page of tool rows,
    /// preserving the row order.
    async fn load_relations(&self, models: Vec<tools::Model>) -> anyhow::Result<Vec<Tool>> {
        if models.is_empty() {
            return Ok(vec![]);
        }
        let ids: Vec<Uuid> = models.iter().map(|m| m.id).collect();
        let creator_ids: Vec<Uuid> = models.iter().map(|m| m.created_by).collect();

        let mut role_map: HashMap<Uuid, Vec<Role>> = HashMap::new();
        for row in tool_roles::Entity::find()
            .filter(tool_roles::Column::ToolId.is_in(ids.clone()))
            .all(&self.db)
            .await
            .context("load tool roles")?
        {
            let role = row
                .role
                .parse::<Role>()
                .with_context(|| format!("tool {} has invalid role", row.tool_id))?;
            role_map.entry(row.tool_id).or_default().push(role);
        }

        let mut category_map: HashMap<Uuid, Vec<Category>> = HashMap::new();
        for (link, category) in category_tool::Entity::find()
            .filter(category_tool::Column::ToolId.is_in(ids.clone()))
            .find_also_related(categories::Entity)
            .all(&self.db)
            .await
            .context("load tool categories")?
        {
            if let Some(category) = category {
                category_map
                    .entry(link.tool_id)
                    .or_default()
                    .push(category_from_model(category));
            }
        }

        let mut tag_map: HashMap<Uuid, Vec<Tag>> = HashMap::new();
        for (link, tag) in tag_tool::Entity::find()
            .filter(tag_tool::Column::ToolId.is_in(ids))
            .find_also_related(tags::Entity)
            .all(&self.db)
            .await
            .context("load tool tags")?
        {
            if let Some(tag) = tag {
                tag_map.entry(link.tool_id).or_default().push(tag_from_model(tag));
            }
        }

        let creators: HashMap<Uuid, Creator> = users::Entity::find()
            .filter(users::Column::Id.is_in(creator_ids))
            .all(&self.db)
            .await
            .context("load tool creators")?
            .into_iter()
            .map(|u| {
                (
                    u.id,
                    Creator {
                        id: u.id,
                        name: u.name,
                        email: u.email,
                    },
                )
            })
            .collect();

        models
            .into_iter()
            .map(|model| {
                let id = model.id;
                let mut assigned = role_map.remove(&id).unwrap_or_default();
                assigned.sort_by_key(|r| Role::ALL.iter().position(|x| x == r));
                let mut in_categories = category_map.remove(&id).unwrap_or_default();
                in_categories.sort_by(|a, b| a.name.cmp(&b.name));
                let mut tagged = tag_map.remove(&id).unwrap_or_default();
                tagged.sort_by(|a, b| a.name.cmp(&b.name));
                let creator = creators.get(&model.created_by).cloned();
                tool_from_model(model, creator, assigned, in_categories, tagged)
            })
            .collect()
    }
}

fn tools_with_role(role: Role) -> SelectStatement {
    Query::select()
        .column(tool_roles::Column::ToolId)
        .from(tool_roles::Entity)
        .and_where(Expr::col(tool_roles::Column::Role).eq(role.as_str()))
        .to_owned()
}

fn tools_in_category(category: &TaxonRef) -> SelectStatement {
    let mut query = Query::select();
    query
        .column((category_tool::Entity, category_tool::Column::ToolId))
        .from(category_tool::Entity)
        .inner_join(
            categories::Entity,
            Expr::col((categories::Entity, categories::Column::Id))
                .equals((category_tool::Entity, category_tool::Column::CategoryId)),
        );
    match category {
        TaxonRef::Id(id) => {
            query.and_where(Expr::col((categories::Entity, categories::Column::Id)).eq(*id));
        }
        TaxonRef::Slug(slug) => {
            query.and_where(
                Expr::col((categories::Entity, categories::Column::Slug)).eq(slug.as_str()),
            );
        }
    }
    query
}

fn tools_with_any_tag(refs: &[TaxonRef]) -> SelectStatement {
    let ids: Vec<i32> = refs
        .iter()
        .filter_map(|r| match r {
            TaxonRef::Id(id) => Some(*id),
            TaxonRef::Slug(_) => None,
        })
        .collect();
    let slugs: Vec<String> = refs
        .iter()
        .filter_map(|r| match r {
            TaxonRef::Slug(slug) => Some(slug.clone()),
            TaxonRef::Id(_) => None,
        })
        .collect();

    let mut any = Condition::any();
    if !ids.is_empty() {
        any = any.add(Expr::col((tags::Entity, tags::Column::Id)).is_in(ids));
    }
    if !slugs.is_empty() {
        any = any.add(Expr::col((tags::Entity, tags::Column::Slug)).is_in(slugs));
    }

    Query::select()
        .column((tag_tool::Entity, tag_tool::Column::ToolId))
        .from(tag_tool::Entity)
        .inner_join(
            tags::Entity,
            Expr::col((tags::Entity, tags::Column::Id))
                .equals((tag_tool::Entity, tag_tool::Column::TagId)),
        )
        .cond_where(any)
        .to_owned()
}

/// String entries of a JSON array column; anything else is ignored.
fn json_strings(value: Option<serde_json::Value>) -> Vec<String> {
    match value {
        Some(serde_json::Value::Array(items)) => items
            .into_iter()
            .filter_map(|v| match v {
                serde_json::Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => vec![],
    }
}

fn tool_from_model(
    model: tools::Model,
    creator: Option<Creator>,
    roles: Vec<Role>,
    categories: Vec<Category>,
    tags: Vec<Tag>,
) -> anyhow::Result<Tool> {
    let status = model
        .status
        .parse::<ToolStatus>()
        .with_context(|| format!("tool {} has invalid status", model.id))?;
    let difficulty = model
        .difficulty
        .as_deref()
        .map(str::parse::<Difficulty>)
        .transpose()
        .with_context(|| format!("tool {} has invalid difficulty", model.id))?;
    Ok(Tool {
        id: model.id,
        name: model.name,
        link: model.link,
        documentation_url: model.documentation_url,
        video_url: model.video_url,
        difficulty,
        documentation: model.documentation,
        description: model.description,
        how_to_use: model.how_to_use,
        examples: json_strings(model.examples),
        resource_links: json_strings(model.resource_links),
        status,
        created_by: model.created_by,
        creator,
        roles,
        categories,
        tags,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

// ── Taxonomy repository ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbTaxonomyRepository {
    pub db: DatabaseConnection,
}

impl TaxonomyRepository for DbTaxonomyRepository {
    async fn categories(&self) -> Result<Vec<Category>, CatalogError> {
        let models = categories::Entity::find()
            .order_by_asc(categories::Column::Name)
            .all(&self.db)
            .await
            .context("list categories")?;
        Ok(models.into_iter().map(category_from_model).collect())
    }

    async fn tags(&self) -> Result<Vec<Tag>, CatalogError> {
        let models = tags::Entity::find()
            .order_by_asc(tags::Column::Name)
            .all(&self.db)
            .await
            .context("list tags")?;
        Ok(models.into_iter().map(tag_from_model).collect())
    }
}

fn category_from_model(model: categories::Model) -> Category {
    Category {
        id: model.id,
        name: model.name,
        slug: model.slug,
    }
}

fn tag_from_model(model: tags::Model) -> Tag {
    Tag {
        id: model.id,
        name: model.name,
        slug: model.slug,
    }
}

// ── Challenge repository ─────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbChallengeRepository {
    pub db: DatabaseConnection,
}

impl ChallengeRepository for DbChallengeRepository {
    async fn replace_active(&self, challenge: &Challenge) -> Result<(), CatalogError> {
        let challenge = challenge.clone();
        self.db
            .transaction::<_, (), DbErr>(|txn| {
                Box::pin(async move {
                    lock_tuple(txn, &challenge.key).await?;
                    unconsumed(&challenge.key).exec(txn).await?;
                    insert_challenge(txn, &challenge).await?;
                    Ok(())
                })
            })
            .await
            .context("replace active challenge")?;
        Ok(())
    }

    async fn redeem(
        &self,
        key: &ChallengeKey,
        submitted: &str,
        now: DateTime<Utc>,
        hasher: &SecretHasher,
    ) -> Result<Option<Verdict>, CatalogError> {
        let key = *key;
        let submitted = submitted.to_owned();
        let hasher = hasher.clone();
        let verdict = self
            .db
            .transaction::<_, Option<Verdict>, DbErr>(|txn| {
                Box::pin(async move {
                    lock_tuple(txn, &key).await?;
                    let Some(model) = tool_action_challenges::Entity::find()
                        .filter(tool_action_challenges::Column::UserId.eq(key.user_id))
                        .filter(tool_action_challenges::Column::ToolId.eq(key.tool_id))
                        .filter(tool_action_challenges::Column::Action.eq(key.action.as_str()))
                        .filter(tool_action_challenges::Column::ConsumedAt.is_null())
                        .order_by_desc(tool_action_challenges::Column::CreatedAt)
                        .order_by_desc(tool_action_challenges::Column::Id)
                        .lock_exclusive()
                        .one(txn)
                        .await?
                    else {
                        return Ok(None);
                    };

                    let mut challenge = challenge_from_model(model, key);
                    let before = challenge.clone();
                    // Argon2 runs on the blocking pool; the row and tuple locks stay held.
                    let (challenge, verdict) = tokio::task::spawn_blocking(move || {
                        let verdict = challenge.redeem(&submitted, now, &hasher);
                        (challenge, verdict)
                    })
                    .await
                    .map_err(|e| DbErr::Custom(format!("redeem task failed: {e}")))?;
                    if challenge != before {
                        tool_action_challenges::ActiveModel {
                            id: Set(challenge.id),
                            attempts: Set(i16::from(challenge.attempts)),
                            consumed_at: Set(challenge.consumed_at),
                            ..Default::default()
                        }
                        .update(txn)
                        .await?;
                    }
                    Ok(Some(verdict))
                })
            })
            .await
            .context("redeem challenge")?;
        Ok(verdict)
    }
}

/// Serialize issue/redeem for one `(user, tool, action)` until the transaction ends.
async fn lock_tuple<C: ConnectionTrait>(conn: &C, key: &ChallengeKey) -> Result<(), DbErr> {
    conn.execute(Statement::from_sql_and_values(
        DbBackend::Postgres,
        "SELECT pg_advisory_xact_lock(hashtext($1))",
        [key.lock_key().into()],
    ))
    .await?;
    Ok(())
}

fn unconsumed(key: &ChallengeKey) -> sea_orm::DeleteMany<tool_action_challenges::Entity> {
    tool_action_challenges::Entity::delete_many()
        .filter(tool_action_challenges::Column::UserId.eq(key.user_id))
        .filter(tool_action_challenges::Column::ToolId.eq(key.tool_id))
        .filter(tool_action_challenges::Column::Action.eq(key.action.as_str()))
        .filter(tool_action_challenges::Column::ConsumedAt.is_null())
}

async fn insert_challenge<C: ConnectionTrait>(
    conn: &C,
    challenge: &Challenge,
) -> Result<(), DbErr> {
    tool_action_challenges::ActiveModel {
        id: Set(challenge.id),
        user_id: Set(challenge.key.user_id),
        tool_id: Set(challenge.key.tool_id),
        action: Set(challenge.key.action.as_str().to_owned()),
        code_hash: Set(challenge.code_hash.clone()),
        attempts: Set(i16::from(challenge.attempts)),
        max_attempts: Set(i16::from(challenge.max_attempts)),
        expires_at: Set(challenge.expires_at),
        consumed_at: Set(challenge.consumed_at),
        created_at: Set(challenge.created_at),
    }
    .insert(conn)
    .await?;
    Ok(())
}

fn clamp_counter(value: i16) -> u8 {
    u8::try_from(value.max(0)).unwrap_or(u8::MAX)
}

/// `key` is the tuple the row was selected by.
fn challenge_from_model(model: tool_action_challenges::Model, key: ChallengeKey) -> Challenge {
    Challenge {
        id: model.id,
        key,
        code_hash: model.code_hash,
        attempts: clamp_counter(model.attempts),
        max_attempts: clamp_counter(model.max_attempts),
        expires_at: model.expires_at,
        consumed_at: model.consumed_at,
        created_at: model.created_at,
    }
}
