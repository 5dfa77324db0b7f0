//! 访问日志
//!
//! 每个请求一个 span (request_id / method / route), 结束时按状态码分级输出一行.

use axum::extract::{MatchedPath, Request};
use axum::middleware::Next;
use axum::response::Response;
use http::StatusCode;
use std::time::Instant;
use tracing::{Instrument, Level};

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// 路由模板优先 (`/api/sales/{id}`), 未匹配时退回原始路径
fn route_of(req: &Request) -> String {
    match req.extensions().get::<MatchedPath>() {
        Some(matched) => matched.as_str().to_owned(),
        None => req.uri().path().to_owned(),
    }
}

/// `SetRequestIdLayer` 在外层写入请求 ID; 直接挂载本中间件时现场生成一个
fn request_id_of(req: &Request) -> String {
    req.headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map_or_else(|| uuid::Uuid::new_v4().to_string(), str::to_owned)
}

fn level_for(status: StatusCode) -> Level {
    if status.is_client_error() || status.is_server_error() {
        Level::WARN
    } else {
        Level::INFO
    }
}

pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let span = tracing::info_span!(
        "http",
        request_id = %request_id_of(&req),
        method = %req.method(),
        route = %route_of(&req),
    );

    async move {
        let started = Instant::now();
        tracing::debug!("request received");

        let response = next.run(req).await;

        let status = response.status().as_u16();
        let elapsed_ms = started.elapsed().as_millis() as u64;
        if level_for(response.status()) == Level::WARN {
            tracing::warn!(status, elapsed_ms, "request finished");
        } else {
            tracing::info!(status, elapsed_ms, "request finished");
        }
        response
    }
    .instrument(span)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_are_logged_as_warnings() {
        assert_eq!(level_for(StatusCode::OK), Level::INFO);
        assert_eq!(level_for(StatusCode::CREATED), Level::INFO);
        assert_eq!(level_for(StatusCode::NOT_FOUND), Level::WARN);
        assert_eq!(level_for(StatusCode::INTERNAL_SERVER_ERROR), Level::WARN);
    }

    #[test]
    fn request_id_falls_back_to_fresh_uuid() {
        let req = http::Request::builder()
            .uri("/api/sales")
            .body(axum::body::Body::empty())
            .unwrap();
        let id = request_id_of(&req);
        assert!(uuid::Uuid::parse_str(&id).is_ok());
        assert_eq!(route_of(&req), "/api/sales");

        let req = http::Request::builder()
            .uri("/health")
            .header(REQUEST_ID_HEADER, "abc-123")
            .body(axum::body::Body::empty())
            .unwrap();
        assert_eq!(request_id_of(&req), "abc-123");
    }
}
