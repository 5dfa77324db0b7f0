//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`statistics`] - 销售统计看板
//! - [`sales`] - 销售记录 (查询/修改/删除)
//! - [`orders`] - 下单
//! - [`products`] - 商品
//! - [`categories`] - 分类
//! - [`register`] - 收银会话 (开/关)
//! - [`bookings`] - 足球场预订
//! - [`maintenance`] - 数据库重置 (非生产环境)

pub mod health;

pub mod categories;
pub mod products;

pub mod orders;
pub mod sales;
pub mod statistics;

pub mod register;

pub mod bookings;

pub mod maintenance;

use std::time::Duration;

use axum::Router;
use axum::middleware as axum_middleware;
use http::{HeaderName, StatusCode};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;
use crate::middleware::{REQUEST_ID_HEADER, logging_middleware};

// Re-export common types for handlers
pub use crate::utils::{AppError, AppResult};

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(statistics::router())
        .merge(sales::router())
        .merge(orders::router())
        .merge(products::router())
        .merge(categories::router())
        .merge(register::router())
        .merge(bookings::router())
        .merge(maintenance::router())
}

/// Build the fully configured application with all middleware and state
///
/// Used by both the HTTP server and the oneshot integration tests.
pub fn build_app(state: ServerState) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);
    let timeout = Duration::from_millis(state.config.request_timeout_ms);

    build_router()
        // ========== Tower HTTP Middleware ==========
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, timeout))
        // Request logging sees the id set below
        .layer(axum_middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
        // ========== Request ID ==========
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
        .with_state(state)
}
