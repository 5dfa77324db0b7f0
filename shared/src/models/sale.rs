//! Sale Model

use serde::{Deserialize, Serialize};

/// One line item of an order
///
/// `total_price` is the authoritative line total. Treats are stored with
/// `total_price = 0` but keep their `unit_price` so their value can be
/// reported separately.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Sale {
    pub id: i64,
    pub order_id: Option<i64>,
    pub product_id: i64,
    pub quantity: i64,
    pub unit_price: f64,
    pub total_price: f64,
    pub is_treat: bool,
    pub is_deleted: bool,
    pub is_edited: bool,
    /// Quantity before the first edit
    pub original_quantity: Option<i64>,
    /// Unix millis
    pub created_at: i64,
}

/// Category reference embedded in a sale's product snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRef {
    pub id: i64,
    pub name: String,
}

/// Product snapshot joined onto a sale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleProduct {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub category: Option<CategoryRef>,
}

/// Read-only copy of the order a sale belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRef {
    pub id: i64,
    pub card_discount_count: i64,
}

/// Sale with its product and order references resolved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleWithDetails {
    #[serde(flatten)]
    pub sale: Sale,
    pub product: Option<SaleProduct>,
    pub order: Option<OrderRef>,
}

impl SaleWithDetails {
    /// Product display name, if the product still resolves
    pub fn product_name(&self) -> Option<&str> {
        self.product
            .as_ref()
            .map(|p| p.name.as_str())
            .filter(|name| !name.is_empty())
    }

    /// Category display name, if any
    pub fn category_name(&self) -> Option<&str> {
        self.product
            .as_ref()
            .and_then(|p| p.category.as_ref())
            .map(|c| c.name.as_str())
    }

    /// Paid with card when the order carries at least one card discount
    pub fn is_card(&self) -> bool {
        self.order.is_some_and(|o| o.card_discount_count > 0)
    }
}

/// Edit sale payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleUpdate {
    pub quantity: i64,
}
