use deadpool_redis::Pool;
use deadpool_redis::redis::{AsyncCommands, RedisError};

use crate::domain::repository::CatalogCache;
use crate::domain::types::{CATALOG_CACHE_TTL_SECS, Category};
use crate::error::CatalogError;

const TOOL_COUNT_KEY: &str = "catalog:tools:count";
const CATEGORIES_KEY: &str = "catalog:categories";

#[derive(Clone)]
pub struct RedisCatalogCache {
    pub pool: Pool,
}

impl RedisCatalogCache {
    async fn conn(&self) -> Result<deadpool_redis::Connection, CatalogError> {
        self.pool
            .get()
            .await
            .map_err(|e| CatalogError::Internal(e.into()))
    }
}

impl CatalogCache for RedisCatalogCache {
    async fn tool_count(&self) -> Result<Option<u64>, CatalogError> {
        let mut conn = self.conn().await?;
        let value: Option<u64> = conn
            .get(TOOL_COUNT_KEY)
            .await
            .map_err(|e: RedisError| CatalogError::Internal(e.into()))?;
        Ok(value)
    }

    async fn set_tool_count(&self, count: u64) -> Result<(), CatalogError> {
        let mut conn = self.conn().await?;
        let (): () = conn
            .set_ex(TOOL_COUNT_KEY, count, CATALOG_CACHE_TTL_SECS)
            .await
            .map_err(|e: RedisError| CatalogError::Internal(e.into()))?;
        Ok(())
    }

    async fn invalidate_tool_count(&self) -> Result<(), CatalogError> {
        let mut conn = self.conn().await?;
        let (): () = conn
            .del(TOOL_COUNT_KEY)
            .await
            .map_err(|e: RedisError| CatalogError::Internal(e.into()))?;
        Ok(())
    }

    async fn categories(&self) -> Result<Option<Vec<Category>>, CatalogError> {
        let mut conn = self.conn().await?;
        let raw: Option<Vec<u8>> = conn
            .get(CATEGORIES_KEY)
            .await
            .map_err(|e: RedisError| CatalogError::Internal(e.into()))?;
        let Some(raw) = raw else {
            return Ok(None);
        };
        let categories =
            serde_json::from_slice(&raw).map_err(|e| CatalogError::Internal(e.into()))?;
        Ok(Some(categories))
    }

    async fn set_categories(&self, categories: &[Category]) -> Result<(), CatalogError> {
        let payload = serde_json::to_vec(categories).map_err(|e| CatalogError::Internal(e.into()))?;
        let mut conn = self.conn().await?;
        let (): () = conn
            .set_ex(CATEGORIES_KEY, payload, CATALOG_CACHE_TTL_SECS)
            .await
            .map_err(|e: RedisError| CatalogError::Internal(e.into()))?;
        Ok(())
    }
}
