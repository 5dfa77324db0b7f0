//! Order Model

use serde::{Deserialize, Serialize};

use super::sale::Sale;

/// A group of sales rung up together
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Order {
    pub id: i64,
    pub register_session_id: i64,
    /// Number of card payments, each reduces the total by the card discount
    pub card_discount_count: i64,
    /// Sum of non-treat line totals
    pub total_amount: f64,
    /// `max(0, total_amount - card_discount_count * card_discount)`
    pub final_amount: f64,
    pub created_by: Option<String>,
    pub created_at: i64,
}

/// One line of an order being created
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemInput {
    pub product_id: i64,
    pub quantity: i64,
    #[serde(default)]
    pub is_treat: bool,
}

/// Create order payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    pub items: Vec<OrderItemInput>,
    #[serde(default)]
    pub card_discount_count: i64,
    pub created_by: Option<String>,
}

/// Order together with the sales written for it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderWithSales {
    #[serde(flatten)]
    pub order: Order,
    pub sales: Vec<Sale>,
}
