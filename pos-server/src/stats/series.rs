use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::models::SaleWithDetails;

use super::StatsConfig;
use super::money::{add_rounded, to_f64};
use crate::utils::time;

/// Which value a per-day series sums
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesMetric {
    Quantity,
    Revenue,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesValue {
    Quantity(i64),
    Revenue(f64),
}

/// One day of a chart series: `{ "date": "5/6/2024", "revenue": 12.5 }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatePoint {
    /// `d/m/yyyy` in the business timezone
    pub date: String,
    #[serde(flatten)]
    pub value: SeriesValue,
}

/// Per-day totals of non-treat sales, oldest first, limited to the most
/// recent `days_to_show` days
pub fn aggregate_sales_by_date<'a, I>(
    sales: I,
    metric: SeriesMetric,
    config: &StatsConfig,
) -> Vec<DatePoint>
where
    I: IntoIterator<Item = &'a SaleWithDetails>,
{
    let tz = config.timezone;
    let mut quantities: BTreeMap<NaiveDate, i64> = BTreeMap::new();
    let mut revenues: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();

    for s in sales {
        if s.sale.is_deleted || s.sale.is_treat {
            continue;
        }
        let Some(day) = time::millis_to_local_date(s.sale.created_at, tz) else {
            tracing::warn!(sale_id = s.sale.id, created_at = s.sale.created_at, "Sale has invalid timestamp, skipped");
            continue;
        };
        match metric {
            SeriesMetric::Quantity => *quantities.entry(day).or_default() += s.sale.quantity,
            SeriesMetric::Revenue => {
                let acc = revenues.entry(day).or_default();
                *acc = add_rounded(*acc, s.sale.total_price);
            }
        }
    }

    let points: Vec<(NaiveDate, SeriesValue)> = match metric {
        SeriesMetric::Quantity => quantities
            .into_iter()
            .map(|(d, q)| (d, SeriesValue::Quantity(q)))
            .collect(),
        SeriesMetric::Revenue => revenues
            .into_iter()
            .map(|(d, r)| (d, SeriesValue::Revenue(to_f64(r))))
            .collect(),
    };

    let skip = points.len().saturating_sub(config.days_to_show);
    points
        .into_iter()
        .skip(skip)
        .map(|(date, value)| DatePoint {
            date: time::format_chart_date(date),
            value,
        })
        .collect()
}
