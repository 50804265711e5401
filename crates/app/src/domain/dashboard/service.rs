//! Dashboard service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::PgPool;

use crate::domain::dashboard::{
    errors::DashboardServiceError,
    models::{ActivityItem, ActivityKind, PlatformStats},
    repository::PgDashboardRepository,
};

/// How many of each kind feed into the merged activity list.
pub const RECENT_PER_KIND: i64 = 5;

/// Upper bound on the merged activity list.
pub const FEED_LIMIT: usize = 10;

#[derive(Debug, Clone)]
pub struct PgDashboardService {
    repository: PgDashboardRepository,
}

impl PgDashboardService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PgDashboardRepository::new(pool),
        }
    }
}

#[async_trait]
impl DashboardService for PgDashboardService {
    async fn stats(&self) -> Result<PlatformStats, DashboardServiceError> {
        Ok(self.repository.totals().await?)
    }

    async fn updates(&self) -> Result<Vec<ActivityItem>, DashboardServiceError> {
        let designs = self.repository.recent_designs(RECENT_PER_KIND).await?;
        let projects = self.repository.recent_projects(RECENT_PER_KIND).await?;

        let mut feed: Vec<ActivityItem> = designs
            .into_iter()
            .map(|design| ActivityItem {
                kind: ActivityKind::Design,
                uuid: design.uuid,
                message: format!("New design \"{}\" is available in the catalogue", design.title),
                title: design.title,
                image_url: Some(design.image_url),
                created_at: design.created_at,
            })
            .chain(projects.into_iter().map(|project| ActivityItem {
                kind: ActivityKind::Project,
                uuid: project.uuid,
                message: format!(
                    "Project \"{}\" is now listed as {}",
                    project.title, project.status
                ),
                title: project.title,
                image_url: None,
                created_at: project.created_at,
            }))
            .collect();

        feed.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        feed.truncate(FEED_LIMIT);

        Ok(feed)
    }
}

#[automock]
#[async_trait]
pub trait DashboardService: Send + Sync {
    /// Platform-wide counts and completed-sale revenue.
    async fn stats(&self) -> Result<PlatformStats, DashboardServiceError>;

    /// The most recent designs and projects merged into one feed, newest
    /// first. Clients poll this endpoint.
    async fn updates(&self) -> Result<Vec<ActivityItem>, DashboardServiceError>;
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use testresult::TestResult;

    use crate::{
        domain::{
            projects::{PgProjectsService, ProjectsService},
            transactions::{
                PaymentCallback, PgTransactionsService, TransactionsService,
            },
        },
        gateway::{GatewayOrder, MockPaymentGateway},
        mailer::MockMailer,
        media::MockMediaStore,
        test::{TestContext, new_design, new_project},
    };

    use super::*;

    fn service(ctx: &TestContext) -> PgDashboardService {
        PgDashboardService::new(ctx.pool().clone())
    }

    fn projects_service(ctx: &TestContext) -> PgProjectsService {
        PgProjectsService::new(ctx.pool().clone(), Arc::new(MockMediaStore::new()))
    }

    #[tokio::test]
    async fn stats_start_at_zero() -> TestResult {
        let ctx = TestContext::new().await;

        let stats = service(&ctx).stats().await?;

        assert_eq!(
            stats,
            PlatformStats {
                projects: 0,
                designs: 0,
                users: 0,
                sales: 0,
                revenue: 0,
            }
        );

        Ok(())
    }

    #[tokio::test]
    async fn stats_count_entities_and_completed_revenue() -> TestResult {
        let ctx = TestContext::new().await;
        let buyer = ctx.create_user("buyer@example.com").await;
        let design = ctx.seed_design(new_design("Hillside Villa", 50_000)).await;

        projects_service(&ctx)
            .create_project(new_project("Riverside Complex"))
            .await?;

        let mut gateway = MockPaymentGateway::new();
        gateway.expect_create_order().returning(|order| {
            Ok(GatewayOrder {
                id: "order_stats_1".to_string(),
                amount: order.amount,
                currency: order.currency,
            })
        });
        gateway
            .expect_verify_signature()
            .returning(|_order_id, _payment_id, _signature| true);

        let mut mailer = MockMailer::new();
        mailer.expect_send().returning(|_message| Ok(()));

        let transactions = PgTransactionsService::new(
            ctx.pool().clone(),
            Arc::new(gateway),
            Arc::new(mailer),
            None,
        );

        transactions.create_order(&buyer, design.uuid).await?;
        transactions
            .verify_payment(
                &buyer,
                PaymentCallback {
                    order_id: "order_stats_1".to_string(),
                    payment_id: "pay_stats_1".to_string(),
                    signature: "cafe".to_string(),
                },
            )
            .await?;

        let stats = service(&ctx).stats().await?;

        assert_eq!(stats.projects, 1);
        assert_eq!(stats.designs, 1);
        assert_eq!(stats.users, 1);
        assert_eq!(stats.sales, 1);
        assert_eq!(stats.revenue, 50_000);

        Ok(())
    }

    #[tokio::test]
    async fn pending_orders_do_not_count_as_sales() -> TestResult {
        let ctx = TestContext::new().await;
        let buyer = ctx.create_user("buyer@example.com").await;
        let design = ctx.seed_design(new_design("Hillside Villa", 50_000)).await;

        let mut gateway = MockPaymentGateway::new();
        gateway.expect_create_order().returning(|order| {
            Ok(GatewayOrder {
                id: "order_stats_2".to_string(),
                amount: order.amount,
                currency: order.currency,
            })
        });

        let transactions = PgTransactionsService::new(
            ctx.pool().clone(),
            Arc::new(gateway),
            Arc::new(MockMailer::new()),
            None,
        );

        transactions.create_order(&buyer, design.uuid).await?;

        let stats = service(&ctx).stats().await?;

        assert_eq!(stats.sales, 0);
        assert_eq!(stats.revenue, 0);

        Ok(())
    }

    #[tokio::test]
    async fn updates_merge_newest_first_and_cap_the_feed() -> TestResult {
        let ctx = TestContext::new().await;
        let projects = projects_service(&ctx);

        for index in 0..7 {
            ctx.seed_design(new_design(&format!("Design {index}"), 1_000)).await;
        }

        for index in 0..7 {
            projects
                .create_project(new_project(&format!("Project {index}")))
                .await?;
        }

        let feed = service(&ctx).updates().await?;

        // Five of each kind, capped at ten entries overall.
        assert_eq!(feed.len(), FEED_LIMIT);
        assert_eq!(
            feed.iter().filter(|item| item.kind == ActivityKind::Design).count(),
            5
        );
        assert_eq!(
            feed.iter().filter(|item| item.kind == ActivityKind::Project).count(),
            5
        );

        for window in feed.windows(2) {
            assert!(
                window[0].created_at >= window[1].created_at,
                "feed must be reverse-chronological"
            );
        }

        Ok(())
    }

    #[tokio::test]
    async fn updates_carry_display_messages() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.seed_design(new_design("Hillside Villa", 50_000)).await;
        projects_service(&ctx)
            .create_project(new_project("Riverside Complex"))
            .await?;

        let feed = service(&ctx).updates().await?;

        assert_eq!(feed.len(), 2);

        let design = feed
            .iter()
            .find(|item| item.kind == ActivityKind::Design)
            .expect("feed should contain the design entry");
        assert!(design.message.contains("Hillside Villa"));
        assert!(design.image_url.is_some());

        let project = feed
            .iter()
            .find(|item| item.kind == ActivityKind::Project)
            .expect("feed should contain the project entry");
        assert!(project.message.contains("Riverside Complex"));
        assert!(project.message.contains("Ongoing"));

        Ok(())
    }
}
