//! 错误体系
//!
//! 错误码 ([`ErrorCode`]) 按千位段归类 ([`ErrorCategory`]), 决定 HTTP 状态码;
//! 处理器和 repository 统一返回 [`AppError`], 响应体为 [`ApiResponse`].
//!
//! ```
//! use shared::error::{ApiResponse, AppError, ErrorCode};
//!
//! let err = AppError::validation("startDate is not a valid date").with_detail("field", "startDate");
//! assert_eq!(ApiResponse::from(err).code, 2);
//! assert_eq!(AppError::new(ErrorCode::RegisterNotOpen).http_status().as_u16(), 422);
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiResponse, AppError, AppResult, ErrorDetails};
