//! 错误码表
//!
//! 千位段决定归属 (见 [`super::ErrorCategory`]):
//! 0 通用 / 4 订单与销售 / 6 商品 / 7 收银班次 / 8 预订 / 9 系统

use serde::{Deserialize, Serialize};
use std::fmt;

/// 声明错误码: 变体、数值和默认消息写在一处，
/// `TryFrom<u16>` 和 `message()` 由表生成，不会漏改。
macro_rules! error_codes {
    ($( $(#[$meta:meta])* $name:ident = $value:literal => $msg:literal, )+) => {
        /// 接口层错误码, 序列化为纯数字
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(into = "u16", try_from = "u16")]
        #[repr(u16)]
        pub enum ErrorCode {
            $( $(#[$meta])* $name = $value, )+
        }

        impl ErrorCode {
            /// 全部错误码, 按声明顺序
            #[cfg(test)]
            pub(crate) const ALL: &'static [ErrorCode] = &[$( ErrorCode::$name, )+];

            /// 默认 (英文) 提示文案
            pub const fn message(&self) -> &'static str {
                match self {
                    $( ErrorCode::$name => $msg, )+
                }
            }
        }

        impl TryFrom<u16> for ErrorCode {
            type Error = InvalidErrorCode;

            fn try_from(raw: u16) -> Result<Self, Self::Error> {
                match raw {
                    $( $value => Ok(ErrorCode::$name), )+
                    other => Err(InvalidErrorCode(other)),
                }
            }
        }
    };
}

error_codes! {
    /// 请求参数不合法 (日期、区间、长度等)
    ValidationFailed = 2 => "Validation failed",
    NotFound = 3 => "Resource not found",
    AlreadyExists = 4 => "Resource already exists",
    InvalidFormat = 6 => "Invalid format",
    ValueOutOfRange = 8 => "Value is out of range",

    OrderNotFound = 4001 => "Order not found",
    OrderEmpty = 4002 => "Order must contain at least one item",
    SaleNotFound = 4003 => "Sale not found",
    SaleAlreadyDeleted = 4004 => "Sale has already been deleted",
    InvalidQuantity = 4005 => "Quantity must be a positive integer",

    ProductNotFound = 6001 => "Product not found",
    ProductInvalidPrice = 6002 => "Product price must be a non-negative number",
    CategoryNotFound = 6101 => "Category not found",
    CategoryNameExists = 6103 => "A category with this name already exists",

    /// 没有打开的收银班次时不能录入销售
    RegisterNotOpen = 7001 => "No register session is open",
    RegisterAlreadyOpen = 7002 => "A register session is already open",
    RegisterSessionNotFound = 7003 => "Register session not found",

    BookingNotFound = 8001 => "Booking not found",
    BookingRequiredFields = 8002 => "Please fill in all required fields",
    BookingPlayerCount = 8003 => "Number of players must be between 2 and 12",
    BookingInvalidField = 8004 => "Field number must be between 1 and 5",

    DatabaseError = 9002 => "Database error",
}

impl ErrorCode {
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> u16 {
        code as u16
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.code(), f)
    }
}

/// 未登记的错误码数值
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unknown error code {0}")]
pub struct InvalidErrorCode(pub u16);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_values_follow_ranges() {
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);
        assert_eq!(ErrorCode::InvalidFormat.code(), 6);
        assert_eq!(ErrorCode::SaleNotFound.code(), 4003);
        assert_eq!(ErrorCode::RegisterAlreadyOpen.code(), 7002);
        assert_eq!(ErrorCode::BookingPlayerCount.code(), 8003);
        assert_eq!(u16::from(ErrorCode::DatabaseError), 9002);
    }

    #[test]
    fn every_declared_code_parses_back() {
        for &code in ErrorCode::ALL {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
        assert_eq!(ErrorCode::try_from(4242), Err(InvalidErrorCode(4242)));
    }

    #[test]
    fn booking_messages_are_user_facing() {
        assert_eq!(
            ErrorCode::BookingPlayerCount.message(),
            "Number of players must be between 2 and 12"
        );
        assert_eq!(
            ErrorCode::BookingInvalidField.message(),
            "Field number must be between 1 and 5"
        );
        assert_eq!(
            ErrorCode::BookingRequiredFields.message(),
            "Please fill in all required fields"
        );
    }

    #[test]
    fn json_form_is_plain_number() {
        assert_eq!(serde_json::to_string(&ErrorCode::RegisterNotOpen).unwrap(), "7001");
        let parsed: ErrorCode = serde_json::from_str("8001").unwrap();
        assert_eq!(parsed, ErrorCode::BookingNotFound);
        assert!(serde_json::from_str::<ErrorCode>("31337").is_err());
    }
}
