//! Transaction models.

use jiff::Timestamp;

use crate::{auth::UserUuid, domain::designs::DesignUuid, uuids::TypedUuid};

/// Transaction UUID
pub type TransactionUuid = TypedUuid<TransactionRecord>;

/// Purchase lifecycle. A transaction never leaves `completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionStatus {
    Pending,
    Completed,
    Failed,
}

impl TransactionStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "completed" => Some(Self::Completed),
            "failed" => Some(Self::Failed),
            _ => None,
        }
    }
}

/// Transaction as persisted.
///
/// `design_title` and `amount` are snapshots taken at order time; they
/// survive deletion of the design itself.
#[derive(Debug, Clone)]
pub struct TransactionRecord {
    pub uuid: TransactionUuid,
    pub user_uuid: UserUuid,
    pub design_uuid: Option<DesignUuid>,
    pub design_title: String,
    pub amount: u64,
    pub currency: String,
    pub order_id: String,
    pub payment_id: Option<String>,
    pub signature: Option<String>,
    pub status: TransactionStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Transaction insertion payload.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub uuid: TransactionUuid,
    pub user_uuid: UserUuid,
    pub design_uuid: Option<DesignUuid>,
    pub design_title: String,
    pub amount: u64,
    pub currency: String,
    pub order_id: String,
}

/// Order handed back to the client for checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedOrder {
    pub order_id: String,
    pub amount: u64,
    pub currency: String,
}

/// Gateway settlement callback payload.
#[derive(Debug, Clone)]
pub struct PaymentCallback {
    pub order_id: String,
    pub payment_id: String,
    pub signature: String,
}

/// One completed sale joined with its buyer.
#[derive(Debug, Clone)]
pub struct SaleRecord {
    pub transaction: TransactionRecord,
    pub buyer_name: String,
    pub buyer_email: String,
}

/// One page of the sales ledger.
#[derive(Debug, Clone)]
pub struct SalesPage {
    pub sales: Vec<SaleRecord>,
    pub total: u64,
    pub page: u32,
    pub pages: u32,
}

/// A recent buyer of a design.
#[derive(Debug, Clone)]
pub struct BuyerRecord {
    pub name: String,
    pub email: String,
    pub purchased_at: Timestamp,
}

/// Aggregated sales for one design.
#[derive(Debug, Clone)]
pub struct DesignSales {
    pub total_sales: u64,
    pub total_revenue: u64,
    pub recent_buyers: Vec<BuyerRecord>,
}
