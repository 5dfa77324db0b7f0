use std::collections::{HashMap, HashSet};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::models::{OrderRef, SaleWithDetails, TransactionTotals};

use super::StatsConfig;
use super::money::{add_rounded, line_value, round2, to_decimal, to_f64};

/// Consolidated sales statistics
///
/// Quantities count items, amounts are currency rounded to 2 dp.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesStats {
    /// Items sold, treats excluded
    pub total_sales: i64,
    pub cash_sales_count: i64,
    pub card_sales_count: i64,
    pub treat_count: i64,

    pub total_before_discounts: f64,
    pub card_discount_count: i64,
    pub card_discount_amount: f64,
    /// Value of treated items at their unit price
    pub treats_amount: f64,

    pub total_revenue: f64,
    pub cash_revenue: f64,
    pub card_revenue: f64,

    /// Distinct products across all sales, treats included
    pub unique_products: usize,
    /// Denominator of `average_order_value`
    pub total_orders: usize,
    pub average_order_value: f64,
}

impl SalesStats {
    /// Totals frozen into a register closing
    pub fn transaction_totals(&self) -> TransactionTotals {
        TransactionTotals {
            total_before_discounts: self.total_before_discounts,
            discount: self.card_discount_amount,
            card_discounts: self.card_discount_count,
            treats: self.treat_count,
            treats_amount: self.treats_amount,
            cash_revenue: self.cash_revenue,
            card_revenue: self.card_revenue,
            total_revenue: self.total_revenue,
        }
    }
}

struct CardOrder {
    order: OrderRef,
    total: Decimal,
}

/// Compute the statistics summary
///
/// A sale is "card" when its order carries at least one card discount,
/// otherwise (including sales without an order) it is "cash". Card
/// discounts are attributed once per order and an order's card revenue
/// never goes below zero.
pub fn calculate_sales_stats<'a, I>(sales: I, config: &StatsConfig) -> SalesStats
where
    I: IntoIterator<Item = &'a SaleWithDetails>,
{
    let card_discount = to_decimal(config.card_discount);

    let mut stats = SalesStats::default();
    let mut before_discounts = Decimal::ZERO;
    let mut cash_revenue = Decimal::ZERO;
    let mut treats_amount = Decimal::ZERO;

    // order id → card order, insertion order kept for deterministic rounding
    let mut card_orders: Vec<CardOrder> = Vec::new();
    let mut card_index: HashMap<i64, usize> = HashMap::new();
    let mut all_orders: HashSet<i64> = HashSet::new();
    let mut products: HashSet<i64> = HashSet::new();

    for s in sales {
        let sale = &s.sale;
        if sale.is_deleted {
            continue;
        }
        products.insert(sale.product_id);
        if let Some(order) = s.order {
            all_orders.insert(order.id);
        }

        if sale.is_treat {
            stats.treat_count += sale.quantity;
            treats_amount = round2(treats_amount + line_value(sale.unit_price, sale.quantity));
            continue;
        }

        stats.total_sales += sale.quantity;
        before_discounts = add_rounded(before_discounts, sale.total_price);

        match s.order.filter(|o| o.card_discount_count > 0) {
            Some(order) => {
                stats.card_sales_count += sale.quantity;
                let idx = *card_index.entry(order.id).or_insert_with(|| {
                    card_orders.push(CardOrder {
                        order,
                        total: Decimal::ZERO,
                    });
                    card_orders.len() - 1
                });
                let entry = &mut card_orders[idx];
                entry.total = add_rounded(entry.total, sale.total_price);
            }
            None => {
                stats.cash_sales_count += sale.quantity;
                cash_revenue = add_rounded(cash_revenue, sale.total_price);
            }
        }
    }

    let mut card_revenue = Decimal::ZERO;
    for card in &card_orders {
        stats.card_discount_count += card.order.card_discount_count;
        let order_discount = round2(Decimal::from(card.order.card_discount_count) * card_discount);
        let order_revenue = round2((card.total - order_discount).max(Decimal::ZERO));
        card_revenue = round2(card_revenue + order_revenue);
    }

    let total_revenue = round2(cash_revenue + card_revenue);

    stats.total_before_discounts = to_f64(before_discounts);
    stats.card_discount_amount =
        to_f64(Decimal::from(stats.card_discount_count) * card_discount);
    stats.treats_amount = to_f64(treats_amount);
    stats.cash_revenue = to_f64(cash_revenue);
    stats.card_revenue = to_f64(card_revenue);
    stats.total_revenue = to_f64(total_revenue);
    stats.unique_products = products.len();
    stats.total_orders = if config.average_over_all_orders {
        all_orders.len()
    } else {
        card_orders.len()
    };
    stats.average_order_value = if stats.total_orders == 0 {
        0.0
    } else {
        stats.total_revenue / stats.total_orders as f64
    };

    stats
}

/// Non-deleted sales without treats
pub fn calculate_net_sales<'a, I>(sales: I) -> Vec<&'a SaleWithDetails>
where
    I: IntoIterator<Item = &'a SaleWithDetails>,
{
    sales
        .into_iter()
        .filter(|s| !s.sale.is_deleted && !s.sale.is_treat)
        .collect()
}

/// Items sold, treats and deleted sales excluded
pub fn get_total_items<'a, I>(sales: I) -> i64
where
    I: IntoIterator<Item = &'a SaleWithDetails>,
{
    calculate_net_sales(sales)
        .into_iter()
        .map(|s| s.sale.quantity)
        .sum()
}
