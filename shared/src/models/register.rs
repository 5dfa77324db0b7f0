//! Register Session Model
//!
//! A register session is a cash-drawer shift. Closing it writes a
//! [`RegisterClosing`] ledger row whose totals are computed by the same
//! aggregation that powers the statistics dashboard.

use serde::{Deserialize, Serialize};

/// Register session record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct RegisterSession {
    pub id: i64,
    /// Unix millis
    pub opened_at: i64,
    pub opened_by: String,
    /// Unix millis, null while the session is open
    pub closed_at: Option<i64>,
    pub closed_by_name: Option<String>,
    pub notes: Option<String>,
    pub created_at: i64,
}

impl RegisterSession {
    pub fn is_open(&self) -> bool {
        self.closed_at.is_none()
    }
}

/// Totals frozen into a register closing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionTotals {
    pub total_before_discounts: f64,
    /// Card discount amount in currency
    pub discount: f64,
    /// Number of card discounts applied
    pub card_discounts: i64,
    /// Number of treat items
    pub treats: i64,
    /// Value of treat items
    pub treats_amount: f64,
    pub cash_revenue: f64,
    pub card_revenue: f64,
    pub total_revenue: f64,
}

/// Register closing ledger row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct RegisterClosing {
    pub id: i64,
    pub register_session_id: i64,
    pub closed_by_name: String,
    pub treats_count: i64,
    pub card_count: i64,
    #[cfg_attr(feature = "db", sqlx(json))]
    pub notes: TransactionTotals,
    pub created_at: i64,
}

/// Session with its closing (if closed)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterSessionWithClosing {
    #[serde(flatten)]
    pub session: RegisterSession,
    pub closing: Option<RegisterClosing>,
}

/// Open register payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterOpen {
    pub opened_by: String,
    pub notes: Option<String>,
}

/// Close register payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterClose {
    pub closed_by_name: String,
    pub notes: Option<String>,
}
