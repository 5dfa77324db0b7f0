//! 入参校验
//!
//! SQLite TEXT 不限制长度, 文本上限统一在这里卡住.

use shared::error::ErrorCode;

use crate::utils::AppError;

/// 商品、分类、操作员名称
pub const MAX_NAME_LEN: usize = 200;
/// 班次备注、预订备注
pub const MAX_NOTE_LEN: usize = 500;
/// 电话、邮箱
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// 单行销售数量上限
pub const MAX_QUANTITY: i64 = 9999;
/// 单价上限
pub const MAX_PRICE: f64 = 1_000_000.0;

fn check_len(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    let len = value.chars().count();
    if len > max_len {
        return Err(AppError::validation(format!(
            "{field} exceeds {max_len} characters (got {len})"
        ))
        .with_detail("field", field));
    }
    Ok(())
}

/// 非空 (去掉空白后) 且不超长
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} is required")).with_detail("field", field));
    }
    check_len(value, field, max_len)
}

pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    match value {
        Some(text) => check_len(text, field, max_len),
        None => Ok(()),
    }
}

pub fn validate_quantity(quantity: i64) -> Result<(), AppError> {
    if (1..=MAX_QUANTITY).contains(&quantity) {
        Ok(())
    } else {
        Err(AppError::with_message(
            ErrorCode::InvalidQuantity,
            format!("Quantity {quantity} is outside 1..={MAX_QUANTITY}"),
        ))
    }
}

/// 有限、非负、不超过 [`MAX_PRICE`]
pub fn validate_price(value: f64, field: &str) -> Result<(), AppError> {
    if value.is_finite() && (0.0..=MAX_PRICE).contains(&value) {
        Ok(())
    } else {
        Err(AppError::with_message(
            ErrorCode::ProductInvalidPrice,
            format!("{field} must be within 0..={MAX_PRICE}, got {value}"),
        ))
    }
}
