//! 错误码 -> HTTP 状态码

use super::category::ErrorCategory;
use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// 资源缺失 404, 状态冲突 409, 业务前置条件不满足 422,
    /// 系统类 500, 其余按参数错误 400
    pub fn http_status(&self) -> StatusCode {
        use ErrorCode::*;

        match self {
            NotFound | OrderNotFound | SaleNotFound | ProductNotFound | CategoryNotFound
            | RegisterSessionNotFound | BookingNotFound => StatusCode::NOT_FOUND,
            AlreadyExists | SaleAlreadyDeleted | CategoryNameExists | RegisterAlreadyOpen => {
                StatusCode::CONFLICT
            }
            RegisterNotOpen | OrderEmpty => StatusCode::UNPROCESSABLE_ENTITY,
            other if other.category() == ErrorCategory::System => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_table() {
        let cases = [
            (ErrorCode::SaleNotFound, StatusCode::NOT_FOUND),
            (ErrorCode::RegisterSessionNotFound, StatusCode::NOT_FOUND),
            (ErrorCode::RegisterAlreadyOpen, StatusCode::CONFLICT),
            (ErrorCode::SaleAlreadyDeleted, StatusCode::CONFLICT),
            (ErrorCode::CategoryNameExists, StatusCode::CONFLICT),
            (ErrorCode::RegisterNotOpen, StatusCode::UNPROCESSABLE_ENTITY),
            (ErrorCode::ValidationFailed, StatusCode::BAD_REQUEST),
            (ErrorCode::BookingPlayerCount, StatusCode::BAD_REQUEST),
            (ErrorCode::InvalidQuantity, StatusCode::BAD_REQUEST),
            (ErrorCode::DatabaseError, StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (code, status) in cases {
            assert_eq!(code.http_status(), status, "{code:?}");
        }
    }

    #[test]
    fn every_code_has_a_status() {
        for code in ErrorCode::ALL {
            let status = code.http_status();
            assert!(status.is_client_error() || status.is_server_error(), "{code:?}");
        }
    }
}
