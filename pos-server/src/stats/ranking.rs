use std::cmp::Ordering;
use std::collections::HashMap;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use shared::models::SaleWithDetails;

use super::StatsConfig;
use super::money::{add_rounded, to_f64};

/// Ranked chart entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDataItem {
    pub name: String,
    /// Quantity sold
    pub value: i64,
    /// Revenue
    pub total: f64,
    /// Share of `value` within the returned list, 1 dp
    pub percentage: f64,
}

#[derive(Default)]
struct Bucket {
    quantity: i64,
    total: Decimal,
}

/// Products ranked by quantity sold (treats excluded)
///
/// Keeps the top `top_products_count` unless `show_all` is set.
pub fn aggregate_sales_by_product<'a, I>(
    sales: I,
    show_all: bool,
    config: &StatsConfig,
) -> Vec<ChartDataItem>
where
    I: IntoIterator<Item = &'a SaleWithDetails>,
{
    let limit = (!show_all).then_some(config.top_products_count);
    rank(sales.into_iter(), |_| true, limit)
}

/// Products of one category ranked by quantity sold (treats excluded)
///
/// An empty category name yields an empty list.
pub fn aggregate_sales_by_category<'a, I>(
    sales: I,
    category_name: &str,
    config: &StatsConfig,
) -> Vec<ChartDataItem>
where
    I: IntoIterator<Item = &'a SaleWithDetails>,
{
    if category_name.is_empty() {
        return Vec::new();
    }
    rank(
        sales.into_iter(),
        |s| s.category_name() == Some(category_name),
        Some(config.top_products_count),
    )
}

fn rank<'a, I, F>(sales: I, include: F, limit: Option<usize>) -> Vec<ChartDataItem>
where
    I: Iterator<Item = &'a SaleWithDetails>,
    F: Fn(&SaleWithDetails) -> bool,
{
    let mut buckets: HashMap<&'a str, Bucket> = HashMap::new();

    for s in sales {
        if s.sale.is_deleted || s.sale.is_treat || !include(s) {
            continue;
        }
        let Some(name) = s.product_name() else {
            continue;
        };
        let bucket = buckets.entry(name).or_default();
        bucket.quantity += s.sale.quantity;
        bucket.total = add_rounded(bucket.total, s.sale.total_price);
    }

    let mut ranked: Vec<(&str, Bucket)> = buckets.into_iter().collect();
    ranked.sort_by(|(a_name, a), (b_name, b)| match b.quantity.cmp(&a.quantity) {
        Ordering::Equal => a_name.cmp(b_name),
        other => other,
    });
    if let Some(limit) = limit {
        ranked.truncate(limit);
    }

    let shown_quantity: i64 = ranked.iter().map(|(_, b)| b.quantity).sum();

    ranked
        .into_iter()
        .map(|(name, bucket)| ChartDataItem {
            name: name.to_string(),
            value: bucket.quantity,
            total: to_f64(bucket.total),
            percentage: percentage(bucket.quantity, shown_quantity),
        })
        .collect()
}

fn percentage(part: i64, whole: i64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    (Decimal::from(part) * Decimal::ONE_HUNDRED / Decimal::from(whole))
        .round_dp_with_strategy(1, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}
