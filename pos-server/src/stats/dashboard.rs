use serde::{Deserialize, Serialize};
use shared::models::SaleWithDetails;

use super::{
    ChartDataItem, DatePoint, DateRange, SalesStats, SeriesMetric, StatsConfig, TimeRange,
    aggregate_sales_by_category, aggregate_sales_by_date, aggregate_sales_by_product,
    calculate_sales_stats, filter_sales_by_date_range, get_total_items,
};

/// Query of `GET /api/statistics`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    /// Category whose products are ranked separately
    pub category: Option<String>,
    /// Rank every product instead of the top N
    #[serde(default)]
    pub show_all: bool,
}

impl DashboardQuery {
    pub fn date_range(&self) -> DateRange {
        DateRange {
            start_date: self.start_date.clone(),
            end_date: self.end_date.clone(),
        }
    }
}

/// Everything the statistics page renders for one range
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dashboard {
    pub stats: SalesStats,
    pub total_items: i64,
    pub revenue_by_date: Vec<DatePoint>,
    pub quantity_by_date: Vec<DatePoint>,
    pub top_products: Vec<ChartDataItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_products: Option<Vec<ChartDataItem>>,
}

pub fn build_dashboard(
    sales: &[SaleWithDetails],
    range: Option<TimeRange>,
    category: Option<&str>,
    show_all: bool,
    config: &StatsConfig,
) -> Dashboard {
    let active = filter_sales_by_date_range(sales, range);
    let scoped = || active.iter().copied();

    Dashboard {
        stats: calculate_sales_stats(scoped(), config),
        total_items: get_total_items(scoped()),
        revenue_by_date: aggregate_sales_by_date(scoped(), SeriesMetric::Revenue, config),
        quantity_by_date: aggregate_sales_by_date(scoped(), SeriesMetric::Quantity, config),
        top_products: aggregate_sales_by_product(scoped(), show_all, config),
        category_products: category
            .map(|name| aggregate_sales_by_category(scoped(), name, config)),
    }
}
