//! Order API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{OrderCreate, OrderWithSales};

use crate::core::ServerState;
use crate::db::repository::order;
use crate::utils::validation::{MAX_NAME_LEN, validate_optional_text, validate_quantity};
use crate::utils::{AppError, AppResult, ErrorCode};

/// Card discounts per order; one per card payment, so a handful at most
const MAX_CARD_DISCOUNTS: i64 = 99;

fn validate_order(payload: &OrderCreate) -> AppResult<()> {
    if payload.items.is_empty() {
        return Err(AppError::new(ErrorCode::OrderEmpty));
    }
    for item in &payload.items {
        validate_quantity(item.quantity)?;
    }
    if !(0..=MAX_CARD_DISCOUNTS).contains(&payload.card_discount_count) {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            format!(
                "card_discount_count must be between 0 and {MAX_CARD_DISCOUNTS}, got {}",
                payload.card_discount_count
            ),
        ));
    }
    validate_optional_text(&payload.created_by, "created_by", MAX_NAME_LEN)?;
    Ok(())
}

/// POST /api/orders - 下单 (需要已开启的收银会话)
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<OrderCreate>,
) -> AppResult<Json<OrderWithSales>> {
    validate_order(&payload)?;
    let created = order::create(&state.pool, payload, state.card_discount()).await?;
    Ok(Json(created))
}

/// GET /api/orders/:id - 订单及其销售行
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<OrderWithSales>> {
    let found = order::find_with_sales(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::with_message(ErrorCode::OrderNotFound, format!("Order {id} not found")))?;
    Ok(Json(found))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::OrderItemInput;

    fn payload(quantity: i64, card_discount_count: i64) -> OrderCreate {
        OrderCreate {
            items: vec![OrderItemInput {
                product_id: 1,
                quantity,
                is_treat: false,
            }],
            card_discount_count,
            created_by: None,
        }
    }

    #[test]
    fn test_validate_order() {
        assert!(validate_order(&payload(1, 0)).is_ok());
        assert!(validate_order(&payload(9999, 3)).is_ok());

        let err = validate_order(&payload(0, 0)).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidQuantity);

        let err = validate_order(&payload(1, -1)).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValueOutOfRange);

        let empty = OrderCreate {
            items: vec![],
            card_discount_count: 0,
            created_by: None,
        };
        assert_eq!(validate_order(&empty).unwrap_err().code, ErrorCode::OrderEmpty);
    }
}
