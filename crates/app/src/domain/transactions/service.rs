//! Transactions service: order creation, payment verification, entitlement.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use sqlx::PgPool;
use tracing::error;
use uuid::Uuid;

use crate::{
    auth::{CurrentUser, UserUuid},
    domain::{
        designs::DesignUuid,
        paging::{Page, page_count},
        transactions::{
            errors::TransactionsServiceError,
            models::{
                DesignSales, NewTransaction, PaymentCallback, PlacedOrder, SalesPage,
                TransactionRecord, TransactionStatus, TransactionUuid,
            },
            repository::PgTransactionsRepository,
        },
    },
    gateway::{NewGatewayOrder, PaymentGateway},
    mailer::{Mailer, messages},
};

/// Currency orders are denominated in.
pub const ORDER_CURRENCY: &str = "INR";

#[derive(Clone)]
pub struct PgTransactionsService {
    repository: PgTransactionsRepository,
    gateway: Arc<dyn PaymentGateway>,
    mailer: Arc<dyn Mailer>,

    /// Address alerted on every sale, when configured.
    admin_email: Option<String>,
}

impl PgTransactionsService {
    #[must_use]
    pub fn new(
        pool: PgPool,
        gateway: Arc<dyn PaymentGateway>,
        mailer: Arc<dyn Mailer>,
        admin_email: Option<String>,
    ) -> Self {
        Self {
            repository: PgTransactionsRepository::new(pool),
            gateway,
            mailer,
            admin_email,
        }
    }

    /// Buyer receipt and studio alert. Failures are logged and swallowed so
    /// they can never undo a verified payment.
    async fn send_sale_emails(&self, transaction: &TransactionRecord, buyer: &CurrentUser) {
        let payment_id = transaction.payment_id.as_deref().unwrap_or_default();

        let receipt = messages::payment_receipt(
            &buyer.email,
            &buyer.name,
            &transaction.design_title,
            transaction.amount,
            &transaction.currency,
            payment_id,
        );
        if let Err(err) = self.mailer.send(receipt).await {
            error!("failed to send payment receipt for {}: {err}", transaction.order_id);
        }

        if let Some(admin_email) = &self.admin_email {
            let alert = messages::sale_alert(
                admin_email,
                &transaction.design_title,
                transaction.amount,
                &transaction.currency,
                &buyer.name,
                &buyer.email,
                payment_id,
            );
            if let Err(err) = self.mailer.send(alert).await {
                error!("failed to send sale alert for {}: {err}", transaction.order_id);
            }
        }
    }
}

#[async_trait]
impl TransactionsService for PgTransactionsService {
    async fn create_order(
        &self,
        user: &CurrentUser,
        design: DesignUuid,
    ) -> Result<PlacedOrder, TransactionsServiceError> {
        let (title, price) = self
            .repository
            .design_for_order(design)
            .await?
            .ok_or(TransactionsServiceError::NotFound)?;

        let order = self
            .gateway
            .create_order(NewGatewayOrder {
                amount: price,
                currency: ORDER_CURRENCY.to_string(),
                receipt: format!("rcpt_{}", Uuid::now_v7().simple()),
            })
            .await?;

        let transaction = self
            .repository
            .create(&NewTransaction {
                uuid: TransactionUuid::new(),
                user_uuid: user.uuid,
                design_uuid: Some(design),
                design_title: title,
                amount: price,
                currency: order.currency,
                order_id: order.id,
            })
            .await?;

        Ok(PlacedOrder {
            order_id: transaction.order_id,
            amount: transaction.amount,
            currency: transaction.currency,
        })
    }

    async fn verify_payment(
        &self,
        user: &CurrentUser,
        callback: PaymentCallback,
    ) -> Result<(), TransactionsServiceError> {
        if !self.gateway.verify_signature(
            &callback.order_id,
            &callback.payment_id,
            &callback.signature,
        ) {
            return Err(TransactionsServiceError::InvalidSignature);
        }

        let completed = self
            .repository
            .complete(&callback.order_id, &callback.payment_id, &callback.signature)
            .await?;

        match completed {
            Some(transaction) => {
                self.send_sale_emails(&transaction, user).await;

                Ok(())
            }
            None => match self.repository.find_by_order_id(&callback.order_id).await? {
                // Replay of an already-verified payload: nothing to do.
                Some(transaction) if transaction.status == TransactionStatus::Completed => Ok(()),
                Some(_) | None => {
                    error!(
                        "verified payment {} has no pending transaction for order {}",
                        callback.payment_id, callback.order_id
                    );

                    Err(TransactionsServiceError::NotFound)
                }
            },
        }
    }

    async fn is_purchased(
        &self,
        user: &CurrentUser,
        design: DesignUuid,
    ) -> Result<bool, TransactionsServiceError> {
        if user.role.is_admin() {
            return Ok(true);
        }

        Ok(self.repository.exists_completed(user.uuid, design).await?)
    }

    async fn user_transactions(
        &self,
        user: UserUuid,
    ) -> Result<Vec<TransactionRecord>, TransactionsServiceError> {
        Ok(self.repository.list_for_user(user).await?)
    }

    async fn sales_history(
        &self,
        search: Option<String>,
        page: Page,
    ) -> Result<SalesPage, TransactionsServiceError> {
        let (sales, total) = self.repository.sales(search.as_deref(), page).await?;

        Ok(SalesPage {
            sales,
            total,
            page: page.number(),
            pages: page_count(total, page.limit()),
        })
    }

    async fn design_stats(
        &self,
        design: DesignUuid,
    ) -> Result<DesignSales, TransactionsServiceError> {
        let (total_sales, total_revenue) = self.repository.design_totals(design).await?;
        let recent_buyers = self.repository.recent_buyers(design).await?;

        Ok(DesignSales {
            total_sales,
            total_revenue,
            recent_buyers,
        })
    }
}

#[automock]
#[async_trait]
pub trait TransactionsService: Send + Sync {
    /// Create a gateway order for a design and record it as `pending`.
    async fn create_order(
        &self,
        user: &CurrentUser,
        design: DesignUuid,
    ) -> Result<PlacedOrder, TransactionsServiceError>;

    /// Verify a settlement callback and complete the matching transaction.
    ///
    /// Replaying an already-verified payload succeeds without side effects.
    async fn verify_payment(
        &self,
        user: &CurrentUser,
        callback: PaymentCallback,
    ) -> Result<(), TransactionsServiceError>;

    /// Entitlement check: admins always pass, everyone else needs a
    /// completed transaction for the design.
    async fn is_purchased(
        &self,
        user: &CurrentUser,
        design: DesignUuid,
    ) -> Result<bool, TransactionsServiceError>;

    /// The caller's own purchase history, newest first.
    async fn user_transactions(
        &self,
        user: UserUuid,
    ) -> Result<Vec<TransactionRecord>, TransactionsServiceError>;

    /// Paginated completed-sales ledger, searchable by design title or
    /// payment id.
    async fn sales_history(
        &self,
        search: Option<String>,
        page: Page,
    ) -> Result<SalesPage, TransactionsServiceError>;

    /// Aggregates and recent buyers for one design.
    async fn design_stats(
        &self,
        design: DesignUuid,
    ) -> Result<DesignSales, TransactionsServiceError>;
}
