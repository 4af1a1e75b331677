//! Seed a catalog database with demo users, taxonomy and tools.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p toolhub-catalog --bin seed -- --database-url postgres://localhost/catalog
//! ```
//!
//! Safe to re-run: users are upserted by email, categories and tags by slug,
//! and tools are only inserted when no tool with the same name exists.

use anyhow::{Context as _, Result};
use chrono::Utc;
use clap::Parser;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Database, DatabaseConnection, EntityTrait,
    QueryFilter, TransactionTrait,
};
use uuid::Uuid;

use toolhub_catalog::domain::secret::SecretHasher;
use toolhub_catalog_schema::{categories, category_tool, tag_tool, tags, tool_roles, tools, users};
use toolhub_core::tracing::init_tracing;
use toolhub_domain::role::Role;
use toolhub_domain::tool::{Difficulty, ToolStatus};

#[derive(Parser)]
#[command(about = "Populate the catalog database with demo data")]
struct Args {
    /// PostgreSQL connection URL.
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    /// Password given to every demo account.
    #[arg(long, env = "SEED_PASSWORD", default_value = "password")]
    password: String,
}

const USERS: &[(&str, &str, Role)] = &[
    ("Ivan Ivanov", "ivan@admin.local", Role::Owner),
    ("Elena Petrova", "elena@frontend.local", Role::Frontend),
    ("Petar Georgiev", "petar@backend.local", Role::Backend),
    ("Maria Stoyanova", "maria@pm.local", Role::Pm),
    ("Georgi Nikolov", "georgi@qa.local", Role::Qa),
    ("Anna Dimitrova", "anna@design.local", Role::Designer),
];

const CATEGORIES: &[&str] = &[
    "Productivity",
    "Research",
    "Design",
    "Development",
    "Testing",
    "Management",
    "Security",
];

const TAGS: &[&str] = &[
    "planning",
    "automation",
    "ui",
    "backend",
    "frontend",
    "qa",
    "docs",
    "security",
    "analytics",
    "collaboration",
];

struct SeedTool {
    name: &'static str,
    description: &'static str,
    how_to_use: &'static str,
    difficulty: Difficulty,
    status: ToolStatus,
    roles: &'static [Role],
    category: &'static str,
    tags: &'static [&'static str],
    created_by: Role,
}

const TOOLS: &[SeedTool] = &[
    SeedTool {
        name: "Sprint Planner",
        description: "Plan sprints with goals, risks and dependencies.",
        how_to_use: "Create a sprint, then add goals and the team.",
        difficulty: Difficulty::Beginner,
        status: ToolStatus::Approved,
        roles: &[Role::Pm, Role::Owner],
        category: "Management",
        tags: &["planning", "collaboration"],
        created_by: Role::Pm,
    },
    SeedTool {
        name: "QA Checklist Builder",
        description: "Generates test checklists per module.",
        how_to_use: "Pick a module and start.",
        difficulty: Difficulty::Beginner,
        status: ToolStatus::Approved,
        roles: &[Role::Qa, Role::Owner],
        category: "Testing",
        tags: &["qa", "automation"],
        created_by: Role::Qa,
    },
    SeedTool {
        name: "API Contract Mapper",
        description: "Keeps API contracts in sync between teams.",
        how_to_use: "Upload an OpenAPI document and compare.",
        difficulty: Difficulty::Intermediate,
        status: ToolStatus::Approved,
        roles: &[Role::Backend, Role::Frontend, Role::Owner],
        category: "Development",
        tags: &["backend", "frontend", "docs"],
        created_by: Role::Backend,
    },
    SeedTool {
        name: "UX Flow Visualizer",
        description: "Turns user flows into navigable diagrams.",
        how_to_use: "Import screens and connect them.",
        difficulty: Difficulty::Beginner,
        status: ToolStatus::Approved,
        roles: &[Role::Designer, Role::Pm, Role::Owner],
        category: "Design",
        tags: &["ui", "planning"],
        created_by: Role::Designer,
    },
    SeedTool {
        name: "Perf Budget Tracker",
        description: "Tracks bundle size and page timing budgets.",
        how_to_use: "Connect the CI pipeline and set budgets.",
        difficulty: Difficulty::Intermediate,
        status: ToolStatus::Approved,
        roles: &[Role::Frontend, Role::Qa, Role::Owner],
        category: "Testing",
        tags: &["frontend", "analytics"],
        created_by: Role::Frontend,
    },
    SeedTool {
        name: "Schema Diff Watcher",
        description: "Flags breaking database schema changes.",
        how_to_use: "Point it at two migration heads.",
        difficulty: Difficulty::Intermediate,
        status: ToolStatus::Pending,
        roles: &[Role::Backend, Role::Owner],
        category: "Development",
        tags: &["backend", "automation"],
        created_by: Role::Backend,
    },
    SeedTool {
        name: "Security Checklist",
        description: "Pre-release security review checklist.",
        how_to_use: "Walk through each section before a release.",
        difficulty: Difficulty::Advanced,
        status: ToolStatus::Rejected,
        roles: &[Role::Backend, Role::Qa, Role::Owner],
        category: "Security",
        tags: &["security", "qa"],
        created_by: Role::Qa,
    },
];

fn slugify(name: &str) -> String {
    name.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("info");
    let args = Args::parse();

    let db = Database::connect(&args.database_url)
        .await
        .context("connect to database")?;
    let hasher = SecretHasher::default();

    seed_users(&db, &hasher, &args.password).await?;
    seed_taxonomy(&db).await?;
    let inserted = seed_tools(&db).await?;

    tracing::info!(
        users = USERS.len(),
        categories = CATEGORIES.len(),
        tags = TAGS.len(),
        tools_inserted = inserted,
        "seed complete"
    );
    Ok(())
}

async fn seed_users(db: &DatabaseConnection, hasher: &SecretHasher, password: &str) -> Result<()> {
    let now = Utc::now();
    for (name, email, role) in USERS {
        let model = users::ActiveModel {
            id: Set(Uuid::now_v7()),
            name: Set((*name).to_owned()),
            email: Set((*email).to_owned()),
            role: Set(role.as_str().to_owned()),
            password_hash: Set(hasher.hash(password)?),
            created_at: Set(now),
            updated_at: Set(now),
        };
        users::Entity::insert(model)
            .on_conflict(
                OnConflict::column(users::Column::Email)
                    .update_columns([
                        users::Column::Name,
                        users::Column::Role,
                        users::Column::PasswordHash,
                        users::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await
            .with_context(|| format!("upsert user {email}"))?;
    }
    Ok(())
}

async fn seed_taxonomy(db: &DatabaseConnection) -> Result<()> {
    for name in CATEGORIES {
        categories::Entity::insert(categories::ActiveModel {
            name: Set((*name).to_owned()),
            slug: Set(slugify(name)),
            ..Default::default()
        })
        .on_conflict(
            OnConflict::column(categories::Column::Slug)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(db)
        .await
        .with_context(|| format!("insert category {name}"))?;
    }
    for name in TAGS {
        tags::Entity::insert(tags::ActiveModel {
            name: Set((*name).to_owned()),
            slug: Set(slugify(name)),
            ..Default::default()
        })
        .on_conflict(OnConflict::column(tags::Column::Slug).do_nothing().to_owned())
        .exec_without_returning(db)
        .await
        .with_context(|| format!("insert tag {name}"))?;
    }
    Ok(())
}

async fn seed_tools(db: &DatabaseConnection) -> Result<usize> {
    let mut inserted = 0;
    for seed in TOOLS {
        let exists = tools::Entity::find()
            .filter(tools::Column::Name.eq(seed.name))
            .one(db)
            .await
            .context("look up tool by name")?
            .is_some();
        if exists {
            continue;
        }

        let creator = users::Entity::find()
            .filter(users::Column::Role.eq(seed.created_by.as_str()))
            .one(db)
            .await
            .context("look up creator")?
            .with_context(|| format!("no user with role {}", seed.created_by))?;
        let category = categories::Entity::find()
            .filter(categories::Column::Slug.eq(slugify(seed.category)))
            .one(db)
            .await
            .context("look up category")?
            .with_context(|| format!("missing category {}", seed.category))?;
        let tag_models = tags::Entity::find()
            .filter(tags::Column::Slug.is_in(seed.tags.iter().map(|t| slugify(t))))
            .all(db)
            .await
            .context("look up tags")?;

        let txn = db.begin().await.context("begin tool transaction")?;
        let now = Utc::now();
        let tool_id = Uuid::now_v7();
        tools::ActiveModel {
            id: Set(tool_id),
            name: Set(seed.name.to_owned()),
            link: Set(None),
            documentation_url: Set(None),
            video_url: Set(None),
            difficulty: Set(Some(seed.difficulty.as_str().to_owned())),
            documentation: Set(None),
            description: Set(Some(seed.description.to_owned())),
            how_to_use: Set(Some(seed.how_to_use.to_owned())),
            examples: Set(None),
            resource_links: Set(None),
            created_by: Set(creator.id),
            status: Set(seed.status.as_str().to_owned()),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await
        .with_context(|| format!("insert tool {}", seed.name))?;

        for role in seed.roles {
            tool_roles::ActiveModel {
                tool_id: Set(tool_id),
                role: Set(role.as_str().to_owned()),
            }
            .insert(&txn)
            .await
            .context("insert tool role")?;
        }
        category_tool::ActiveModel {
            category_id: Set(category.id),
            tool_id: Set(tool_id),
        }
        .insert(&txn)
        .await
        .context("link tool category")?;
        for tag in tag_models {
            tag_tool::ActiveModel {
                tag_id: Set(tag.id),
                tool_id: Set(tool_id),
            }
            .insert(&txn)
            .await
            .context("link tool tag")?;
        }

        txn.commit().await.context("commit tool")?;
        inserted += 1;
    }
    Ok(inserted)
}
