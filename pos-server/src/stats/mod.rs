//! Sales Aggregator (销售统计)
//!
//! Pure, synchronous transformations over already-loaded sales:
//! date-range filtering, per-day series, product/category rankings and the
//! cash/card/treat summary that register closings are written from.
//!
//! Every function takes its tunables from [`StatsConfig`] and allocates a
//! fresh result; inputs are never mutated. Deleted sales are ignored by all
//! of them.

mod config;
mod dashboard;
mod filter;
pub mod money;
mod ranking;
mod series;
mod summary;

pub use config::StatsConfig;
pub use dashboard::{Dashboard, DashboardQuery, build_dashboard};
pub use filter::{DateRange, TimeRange, filter_sales_by_date_range};
pub use ranking::{ChartDataItem, aggregate_sales_by_category, aggregate_sales_by_product};
pub use series::{DatePoint, SeriesMetric, SeriesValue, aggregate_sales_by_date};
pub use summary::{SalesStats, calculate_net_sales, calculate_sales_stats, get_total_items};
