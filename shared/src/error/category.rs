//! 错误归类: 按错误码千位段划分

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// 0..3999
    General,
    /// 订单和销售行, 4000..5999
    Order,
    /// 商品和分类, 6xxx
    Product,
    /// 收银班次, 7xxx
    Register,
    /// 足球场预订, 8xxx
    Booking,
    /// 数据库、配置等, 9xxx 及以上
    System,
}

impl ErrorCategory {
    pub fn from_code(code: u16) -> Self {
        match code / 1000 {
            0..=3 => Self::General,
            4 | 5 => Self::Order,
            6 => Self::Product,
            7 => Self::Register,
            8 => Self::Booking,
            _ => Self::System,
        }
    }

    /// 系统类错误需要落日志, 其余属于调用方问题
    pub fn is_system(&self) -> bool {
        matches!(self, Self::System)
    }
}

impl ErrorCode {
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}
