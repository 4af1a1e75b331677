use crate::domain::repository::{CatalogCache, TaxonomyRepository};
use crate::domain::types::{Category, Tag};
use crate::error::CatalogError;

pub struct ListCategoriesUseCase<R: TaxonomyRepository, K: CatalogCache> {
    pub repo: R,
    pub cache: K,
}

impl<R: TaxonomyRepository, K: CatalogCache> ListCategoriesUseCase<R, K> {
    pub async fn execute(&self) -> Result<Vec<Category>, CatalogError> {
        match self.cache.categories().await {
            Ok(Some(categories)) => return Ok(categories),
            Ok(None) => {}
            Err(e) => tracing::warn!(error = %e, "categories cache read failed"),
        }

        let categories = self.repo.categories().await?;
        if let Err(e) = self.cache.set_categories(&categories).await {
            tracing::warn!(error = %e, "categories cache write failed");
        }
        Ok(categories)
    }
}

pub struct ListTagsUseCase<R: TaxonomyRepository> {
    pub repo: R,
}

impl<R: TaxonomyRepository> ListTagsUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<Tag>, CatalogError> {
        self.repo.tags().await
    }
}
