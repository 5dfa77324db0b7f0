use chrono_tz::Tz;
use serde::Serialize;

use crate::core::config::env_parse;

/// Aggregator tunables
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | CARD_DISCOUNT | 2.00 | 每次刷卡的固定折扣 |
/// | STATS_DAYS_TO_SHOW | 7 | 日序列保留天数 |
/// | STATS_TOP_PRODUCTS | 5 | 排行榜数量 |
/// | TIMEZONE | Europe/Athens | 业务时区 |
/// | STATS_AVERAGE_ALL_ORDERS | false | 平均单价按全部订单计算 |
#[derive(Debug, Clone, Serialize)]
pub struct StatsConfig {
    /// Currency amount deducted per card discount on an order
    pub card_discount: f64,
    /// Number of most recent days kept in per-day series
    pub days_to_show: usize,
    /// Number of items kept in rankings
    pub top_products_count: usize,
    /// Business timezone used for calendar-day grouping
    #[serde(serialize_with = "serialize_tz")]
    pub timezone: Tz,
    /// Divide the average order value by every distinct order instead of
    /// only the orders that carried a card discount
    pub average_over_all_orders: bool,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            card_discount: 2.0,
            days_to_show: 7,
            top_products_count: 5,
            timezone: chrono_tz::Europe::Athens,
            average_over_all_orders: false,
        }
    }
}

impl StatsConfig {
    /// Load from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            card_discount: env_parse::<f64>("CARD_DISCOUNT")
                .filter(|v| v.is_finite() && *v >= 0.0)
                .unwrap_or(defaults.card_discount),
            days_to_show: env_parse("STATS_DAYS_TO_SHOW").unwrap_or(defaults.days_to_show),
            top_products_count: env_parse("STATS_TOP_PRODUCTS")
                .unwrap_or(defaults.top_products_count),
            timezone: env_parse("TIMEZONE").unwrap_or(defaults.timezone),
            average_over_all_orders: env_parse("STATS_AVERAGE_ALL_ORDERS")
                .unwrap_or(defaults.average_over_all_orders),
        }
    }
}

fn serialize_tz<S: serde::Serializer>(tz: &Tz, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(tz.name())
}
