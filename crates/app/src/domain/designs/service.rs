//! Designs service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use sqlx::PgPool;
use tracing::error;

use crate::{
    domain::{
        designs::{
            errors::DesignsServiceError,
            models::{DesignFilter, DesignPage, DesignRecord, DesignUuid, NewDesign},
            repository::PgDesignsRepository,
        },
        paging::{Page, page_count},
    },
    media::{MediaStore, ResourceClass, StoredAsset},
};

#[derive(Clone)]
pub struct PgDesignsService {
    repository: PgDesignsRepository,
    media: Arc<dyn MediaStore>,
}

impl PgDesignsService {
    #[must_use]
    pub fn new(pool: PgPool, media: Arc<dyn MediaStore>) -> Self {
        Self {
            repository: PgDesignsRepository::new(pool),
            media,
        }
    }

    /// Remove a stored object, logging instead of failing: the row delete is
    /// the primary operation.
    async fn destroy_asset(&self, asset: &StoredAsset, class: ResourceClass) {
        if let Err(err) = self.media.destroy(&asset.public_id, class).await {
            error!("failed to destroy stored object {}: {err}", asset.public_id);
        }
    }
}

#[async_trait]
impl DesignsService for PgDesignsService {
    async fn list_designs(
        &self,
        filter: DesignFilter,
        page: Page,
    ) -> Result<DesignPage, DesignsServiceError> {
        let (designs, total) = self.repository.list(&filter, page).await?;

        Ok(DesignPage {
            designs,
            total,
            page: page.number(),
            pages: page_count(total, page.limit()),
        })
    }

    async fn get_design(&self, design: DesignUuid) -> Result<DesignRecord, DesignsServiceError> {
        Ok(self.repository.get(design).await?)
    }

    async fn create_design(&self, design: NewDesign) -> Result<DesignRecord, DesignsServiceError> {
        Ok(self.repository.create(&design).await?)
    }

    async fn delete_design(&self, design: DesignUuid) -> Result<(), DesignsServiceError> {
        let record = self.repository.get(design).await?;

        self.destroy_asset(&record.image, ResourceClass::Image).await;

        if let Some(public_doc) = &record.public_doc {
            self.destroy_asset(public_doc, ResourceClass::Raw).await;
        }

        if let Some(private_doc) = &record.private_doc {
            self.destroy_asset(private_doc, ResourceClass::Raw).await;
        }

        let rows_affected = self.repository.delete(design).await?;
        if rows_affected == 0 {
            return Err(DesignsServiceError::NotFound);
        }

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait DesignsService: Send + Sync {
    /// One page of the catalogue matching `filter`, newest first.
    async fn list_designs(
        &self,
        filter: DesignFilter,
        page: Page,
    ) -> Result<DesignPage, DesignsServiceError>;

    /// Retrieve a single design.
    async fn get_design(&self, design: DesignUuid) -> Result<DesignRecord, DesignsServiceError>;

    /// Insert a design whose assets are already stored.
    async fn create_design(&self, design: NewDesign)
    -> Result<DesignRecord, DesignsServiceError>;

    /// Delete a design and its stored objects.
    async fn delete_design(&self, design: DesignUuid) -> Result<(), DesignsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::designs::models::DesignCategory,
        media::MockMediaStore,
        test::{TestContext, new_design, new_design_with_docs},
    };

    use super::*;

    fn service(ctx: &TestContext, media: MockMediaStore) -> PgDesignsService {
        PgDesignsService::new(ctx.pool().clone(), Arc::new(media))
    }

    #[tokio::test]
    async fn create_then_get_round_trip() -> TestResult {
        let ctx = TestContext::new().await;
        let designs = service(&ctx, MockMediaStore::new());

        let new = new_design("Hillside Villa", 50_000);
        let uuid = new.uuid;

        let created = designs.create_design(new).await?;
        assert_eq!(created.uuid, uuid);
        assert_eq!(created.price, 50_000);

        let fetched = designs.get_design(uuid).await?;
        assert_eq!(fetched.title, "Hillside Villa");
        assert!(fetched.private_doc.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn get_unknown_design_returns_not_found() {
        let ctx = TestContext::new().await;
        let designs = service(&ctx, MockMediaStore::new());

        let result = designs.get_design(DesignUuid::new()).await;

        assert!(
            matches!(result, Err(DesignsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn second_page_holds_the_remainder() -> TestResult {
        let ctx = TestContext::new().await;
        let designs = service(&ctx, MockMediaStore::new());

        for index in 0..15 {
            designs
                .create_design(new_design(&format!("Design {index}"), 1_000))
                .await?;
        }

        let first = designs
            .list_designs(DesignFilter::default(), Page::new(1, 12))
            .await?;
        let second = designs
            .list_designs(DesignFilter::default(), Page::new(2, 12))
            .await?;

        assert_eq!(first.designs.len(), 12);
        assert_eq!(second.designs.len(), 3);
        assert_eq!(first.total, 15);
        assert_eq!(first.pages, 2, "pages should be ceil(15/12)");
        assert_eq!(second.page, 2);

        // The slices must not overlap.
        for design in &second.designs {
            assert!(
                !first.designs.iter().any(|d| d.uuid == design.uuid),
                "design {} appeared on both pages",
                design.uuid
            );
        }

        Ok(())
    }

    #[tokio::test]
    async fn search_matches_title_and_description() -> TestResult {
        let ctx = TestContext::new().await;
        let designs = service(&ctx, MockMediaStore::new());

        designs.create_design(new_design("Lakeside Pavilion", 1_000)).await?;
        designs.create_design(new_design("City Office", 1_000)).await?;

        let by_title = designs
            .list_designs(
                DesignFilter {
                    search: Some("lakeside".to_string()),
                    ..DesignFilter::default()
                },
                Page::new(1, 12),
            )
            .await?;
        assert_eq!(by_title.designs.len(), 1);
        assert_eq!(by_title.designs[0].title, "Lakeside Pavilion");

        // Descriptions are generated as "<title> description".
        let by_description = designs
            .list_designs(
                DesignFilter {
                    search: Some("office description".to_string()),
                    ..DesignFilter::default()
                },
                Page::new(1, 12),
            )
            .await?;
        assert_eq!(by_description.designs.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn price_range_and_category_filters_combine() -> TestResult {
        let ctx = TestContext::new().await;
        let designs = service(&ctx, MockMediaStore::new());

        designs.create_design(new_design("Cheap", 100)).await?;
        designs.create_design(new_design("Mid", 5_000)).await?;
        designs
            .create_design(NewDesign {
                category: DesignCategory::Commercial,
                ..new_design("Pricey", 90_000)
            })
            .await?;

        let in_range = designs
            .list_designs(
                DesignFilter {
                    min_price: Some(1_000),
                    max_price: Some(10_000),
                    ..DesignFilter::default()
                },
                Page::new(1, 12),
            )
            .await?;
        assert_eq!(in_range.designs.len(), 1);
        assert_eq!(in_range.designs[0].title, "Mid");

        let commercial = designs
            .list_designs(
                DesignFilter {
                    category: Some(DesignCategory::Commercial),
                    ..DesignFilter::default()
                },
                Page::new(1, 12),
            )
            .await?;
        assert_eq!(commercial.designs.len(), 1);
        assert_eq!(commercial.designs[0].title, "Pricey");

        Ok(())
    }

    #[tokio::test]
    async fn delete_destroys_stored_objects_and_row() -> TestResult {
        let ctx = TestContext::new().await;

        let mut media = MockMediaStore::new();
        media
            .expect_destroy()
            .times(3)
            .returning(|_public_id, _class| Ok(()));

        let designs = service(&ctx, media);

        let new = new_design_with_docs("Hillside Villa", 50_000);
        let uuid = new.uuid;
        designs.create_design(new).await?;

        designs.delete_design(uuid).await?;

        let result = designs.get_design(uuid).await;
        assert!(
            matches!(result, Err(DesignsServiceError::NotFound)),
            "expected NotFound after deletion, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn delete_survives_media_failures() -> TestResult {
        let ctx = TestContext::new().await;

        let mut media = MockMediaStore::new();
        media.expect_destroy().times(1).returning(|_public_id, _class| {
            Err(crate::media::MediaStoreError::ObjectUnavailable)
        });

        let designs = service(&ctx, media);

        let new = new_design("Hillside Villa", 50_000);
        let uuid = new.uuid;
        designs.create_design(new).await?;

        // The row still goes away even though the provider refused.
        designs.delete_design(uuid).await?;

        let result = designs.get_design(uuid).await;
        assert!(matches!(result, Err(DesignsServiceError::NotFound)));

        Ok(())
    }

    #[tokio::test]
    async fn delete_unknown_design_returns_not_found() {
        let ctx = TestContext::new().await;
        let designs = service(&ctx, MockMediaStore::new());

        let result = designs.delete_design(DesignUuid::new()).await;

        assert!(
            matches!(result, Err(DesignsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }
}
