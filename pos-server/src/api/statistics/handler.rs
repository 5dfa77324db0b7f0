//! Statistics API Handlers

use axum::{
    Json,
    extract::{Query, State},
};

use crate::api::sales::load_sales;
use crate::core::ServerState;
use crate::stats::{
    Dashboard, DashboardQuery, DateRange, SalesStats, StatsConfig, build_dashboard,
    calculate_sales_stats, filter_sales_by_date_range,
};
use crate::utils::AppResult;

/// GET /api/statistics - 看板数据 (汇总、日序列、排行)
///
/// Query: `startDate`, `endDate` (inclusive days), `category`, `showAll`
pub async fn get_dashboard(
    State(state): State<ServerState>,
    Query(query): Query<DashboardQuery>,
) -> AppResult<Json<Dashboard>> {
    let config = &state.config.stats;
    let range = query.date_range().parse(config.timezone)?;
    let sales = load_sales(&state.pool, range).await?;

    let category = query
        .category
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty());

    let dashboard = build_dashboard(&sales, range, category, query.show_all, config);

    tracing::debug!(
        sales = sales.len(),
        total_revenue = dashboard.stats.total_revenue,
        "Dashboard built"
    );
    Ok(Json(dashboard))
}

/// GET /api/statistics/summary - 仅汇总数据
pub async fn get_summary(
    State(state): State<ServerState>,
    Query(query): Query<DateRange>,
) -> AppResult<Json<SalesStats>> {
    let config = &state.config.stats;
    let range = query.parse(config.timezone)?;
    let sales = load_sales(&state.pool, range).await?;

    let active = filter_sales_by_date_range(&sales, range);
    Ok(Json(calculate_sales_stats(active, config)))
}

/// GET /api/statistics/config - 当前统计参数
pub async fn get_config(State(state): State<ServerState>) -> Json<StatsConfig> {
    Json(state.config.stats.clone())
}
