use deadpool_redis::Pool as RedisPool;
use sea_orm::DatabaseConnection;

use toolhub_auth_types::session::SessionSecret;

use crate::domain::secret::SecretHasher;
use crate::infra::cache::RedisCatalogCache;
use crate::infra::db::{
    DbChallengeRepository, DbTaxonomyRepository, DbToolRepository, DbUserRepository,
};
use crate::infra::mail::SmtpCodeNotifier;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub redis: RedisPool,
    pub notifier: SmtpCodeNotifier,
    pub hasher: SecretHasher,
    pub session_secret: String,
    pub cookie_domain: String,
}

impl SessionSecret for AppState {
    fn session_secret(&self) -> &str {
        &self.session_secret
    }
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn tool_repo(&self) -> DbToolRepository {
        DbToolRepository {
            db: self.db.clone(),
        }
    }

    pub fn challenge_repo(&self) -> DbChallengeRepository {
        DbChallengeRepository {
            db: self.db.clone(),
        }
    }

    pub fn taxonomy_repo(&self) -> DbTaxonomyRepository {
        DbTaxonomyRepository {
            db: self.db.clone(),
        }
    }

    pub fn catalog_cache(&self) -> RedisCatalogCache {
        RedisCatalogCache {
            pool: self.redis.clone(),
        }
    }

    pub fn code_notifier(&self) -> SmtpCodeNotifier {
        self.notifier.clone()
    }
}
