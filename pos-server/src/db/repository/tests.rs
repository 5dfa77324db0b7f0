use super::*;
use crate::db::DbService;
use crate::stats::StatsConfig;
use shared::models::{
    BookingCreate, CategoryCreate, OrderCreate, OrderItemInput, ProductCreate, RegisterClose,
    RegisterOpen,
};
use sqlx::SqlitePool;

const CARD_DISCOUNT: f64 = 2.0;

async fn pool() -> SqlitePool {
    DbService::in_memory().await.unwrap().pool
}

async fn create_product(pool: &SqlitePool, name: &str, price: f64, category_id: Option<i64>) -> i64 {
    product::create(
        pool,
        ProductCreate {
            name: name.to_string(),
            price,
            category_id,
        },
    )
    .await
    .unwrap()
    .id
}

async fn open_register(pool: &SqlitePool) -> i64 {
    register::open(
        pool,
        RegisterOpen {
            opened_by: "Maria".to_string(),
            notes: None,
        },
    )
    .await
    .unwrap()
    .id
}

fn item(product_id: i64, quantity: i64, is_treat: bool) -> OrderItemInput {
    OrderItemInput {
        product_id,
        quantity,
        is_treat,
    }
}

fn order(items: Vec<OrderItemInput>, card_discount_count: i64) -> OrderCreate {
    OrderCreate {
        items,
        card_discount_count,
        created_by: Some("Maria".to_string()),
    }
}

fn rejected_code(err: RepoError) -> ErrorCode {
    match err {
        RepoError::Rejected(code, _) => code,
        other => panic!("expected a rejection, got {other:?}"),
    }
}

// ============================================================================
// Catalog
// ============================================================================

#[tokio::test]
async fn test_category_duplicate_name_rejected() {
    let pool = pool().await;
    category::create(&pool, CategoryCreate { name: "Coffee".into() })
        .await
        .unwrap();

    let err = category::create(&pool, CategoryCreate { name: " coffee ".into() })
        .await
        .unwrap_err();
    assert_eq!(rejected_code(err), ErrorCode::CategoryNameExists);
}

#[tokio::test]
async fn test_product_requires_existing_category() {
    let pool = pool().await;
    let err = product::create(
        &pool,
        ProductCreate {
            name: "Frappe".into(),
            price: 3.0,
            category_id: Some(42),
        },
    )
    .await
    .unwrap_err();
    assert_eq!(rejected_code(err), ErrorCode::CategoryNotFound);

    let coffee = category::create(&pool, CategoryCreate { name: "Coffee".into() })
        .await
        .unwrap();
    let id = create_product(&pool, "Frappe", 3.0, Some(coffee.id)).await;
    let products = product::find_by_category(&pool, coffee.id).await.unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].id, id);
}

// ============================================================================
// Orders and sales
// ============================================================================

#[tokio::test]
async fn test_order_requires_open_register() {
    let pool = pool().await;
    let tea = create_product(&pool, "Tea", 2.0, None).await;

    let err = order::create(&pool, order(vec![item(tea, 1, false)], 0), CARD_DISCOUNT)
        .await
        .unwrap_err();
    assert_eq!(rejected_code(err), ErrorCode::RegisterNotOpen);
}

#[tokio::test]
async fn test_order_rejects_empty_and_unknown_product() {
    let pool = pool().await;
    open_register(&pool).await;

    let err = order::create(&pool, order(vec![], 0), CARD_DISCOUNT)
        .await
        .unwrap_err();
    assert_eq!(rejected_code(err), ErrorCode::OrderEmpty);

    let err = order::create(&pool, order(vec![item(999, 1, false)], 0), CARD_DISCOUNT)
        .await
        .unwrap_err();
    assert_eq!(rejected_code(err), ErrorCode::ProductNotFound);
}

#[tokio::test]
async fn test_order_totals_with_treat_and_card_discount() {
    let pool = pool().await;
    let session_id = open_register(&pool).await;
    let frappe = create_product(&pool, "Frappe", 3.0, None).await;
    let cake = create_product(&pool, "Cake", 4.5, None).await;

    let created = order::create(
        &pool,
        order(vec![item(frappe, 3, false), item(cake, 1, true)], 1),
        CARD_DISCOUNT,
    )
    .await
    .unwrap();

    assert_eq!(created.order.register_session_id, session_id);
    assert_eq!(created.order.total_amount, 9.0);
    assert_eq!(created.order.final_amount, 7.0);
    assert_eq!(created.sales.len(), 2);

    let treat = created.sales.iter().find(|s| s.is_treat).unwrap();
    assert_eq!(treat.unit_price, 4.5);
    assert_eq!(treat.total_price, 0.0);
}

#[tokio::test]
async fn test_order_final_amount_floors_at_zero() {
    let pool = pool().await;
    open_register(&pool).await;
    let water = create_product(&pool, "Water", 0.5, None).await;

    let created = order::create(&pool, order(vec![item(water, 1, false)], 1), CARD_DISCOUNT)
        .await
        .unwrap();
    assert_eq!(created.order.final_amount, 0.0);
}

#[tokio::test]
async fn test_sales_with_details_join() {
    let pool = pool().await;
    open_register(&pool).await;
    let coffee = category::create(&pool, CategoryCreate { name: "Coffee".into() })
        .await
        .unwrap();
    let freddo = create_product(&pool, "Freddo", 3.5, Some(coffee.id)).await;

    let created = order::create(&pool, order(vec![item(freddo, 2, false)], 1), CARD_DISCOUNT)
        .await
        .unwrap();

    let sales = sale::find_all_with_details(&pool).await.unwrap();
    assert_eq!(sales.len(), 1);
    let s = &sales[0];
    assert_eq!(s.product_name(), Some("Freddo"));
    assert_eq!(s.category_name(), Some("Coffee"));
    assert_eq!(s.order.unwrap().id, created.order.id);
    assert!(s.is_card());

    let now = shared::util::now_millis();
    let in_range = sale::find_with_details_by_range(&pool, now - 60_000, now + 60_000)
        .await
        .unwrap();
    assert_eq!(in_range.len(), 1);
    let out_of_range = sale::find_with_details_by_range(&pool, 0, 1_000).await.unwrap();
    assert!(out_of_range.is_empty());
}

#[tokio::test]
async fn test_update_quantity_keeps_original_and_refreshes_order() {
    let pool = pool().await;
    open_register(&pool).await;
    let beer = create_product(&pool, "Beer", 4.0, None).await;

    let created = order::create(&pool, order(vec![item(beer, 2, false)], 1), CARD_DISCOUNT)
        .await
        .unwrap();
    let sale_id = created.sales[0].id;

    let edited = sale::update_quantity(&pool, sale_id, 5, CARD_DISCOUNT).await.unwrap();
    assert!(edited.is_edited);
    assert_eq!(edited.quantity, 5);
    assert_eq!(edited.original_quantity, Some(2));
    assert_eq!(edited.total_price, 20.0);

    let edited = sale::update_quantity(&pool, sale_id, 1, CARD_DISCOUNT).await.unwrap();
    assert_eq!(edited.original_quantity, Some(2));

    let refreshed = order::find_by_id(&pool, created.order.id).await.unwrap().unwrap();
    assert_eq!(refreshed.total_amount, 4.0);
    assert_eq!(refreshed.final_amount, 2.0);
}

#[tokio::test]
async fn test_soft_delete() {
    let pool = pool().await;
    open_register(&pool).await;
    let tea = create_product(&pool, "Tea", 2.0, None).await;
    let juice = create_product(&pool, "Juice", 3.5, None).await;

    let created = order::create(
        &pool,
        order(vec![item(tea, 1, false), item(juice, 1, false)], 0),
        CARD_DISCOUNT,
    )
    .await
    .unwrap();
    let tea_sale = created.sales.iter().find(|s| s.product_id == tea).unwrap().id;

    let deleted = sale::soft_delete(&pool, tea_sale, CARD_DISCOUNT).await.unwrap();
    assert!(deleted.is_deleted);

    let err = sale::soft_delete(&pool, tea_sale, CARD_DISCOUNT).await.unwrap_err();
    assert_eq!(rejected_code(err), ErrorCode::SaleAlreadyDeleted);

    let err = sale::update_quantity(&pool, tea_sale, 3, CARD_DISCOUNT).await.unwrap_err();
    assert_eq!(rejected_code(err), ErrorCode::SaleAlreadyDeleted);

    let err = sale::soft_delete(&pool, 12345, CARD_DISCOUNT).await.unwrap_err();
    assert_eq!(rejected_code(err), ErrorCode::SaleNotFound);

    let refreshed = order::find_by_id(&pool, created.order.id).await.unwrap().unwrap();
    assert_eq!(refreshed.total_amount, 3.5);

    // Still listed, flagged
    let sales = sale::find_all_with_details(&pool).await.unwrap();
    assert_eq!(sales.len(), 2);
    assert_eq!(sales.iter().filter(|s| s.sale.is_deleted).count(), 1);
}

// ============================================================================
// Register sessions
// ============================================================================

#[tokio::test]
async fn test_register_single_open_session() {
    let pool = pool().await;
    let first = open_register(&pool).await;

    let err = register::open(
        &pool,
        RegisterOpen {
            opened_by: "Nikos".into(),
            notes: None,
        },
    )
    .await
    .unwrap_err();
    assert_eq!(rejected_code(err), ErrorCode::RegisterAlreadyOpen);

    let current = register::find_current(&pool).await.unwrap().unwrap();
    assert_eq!(current.id, first);
    assert!(current.is_open());
}

#[tokio::test]
async fn test_register_close_writes_closing() {
    let pool = pool().await;
    let session_id = open_register(&pool).await;
    let frappe = create_product(&pool, "Frappe", 10.0, None).await;
    let cake = create_product(&pool, "Cake", 5.0, None).await;
    let tea = create_product(&pool, "Tea", 2.0, None).await;

    // Card order 10.00 with one discount plus a treat worth 5.00
    order::create(
        &pool,
        order(vec![item(frappe, 1, false), item(cake, 1, true)], 1),
        CARD_DISCOUNT,
    )
    .await
    .unwrap();
    // Cash order, later deleted
    let cash = order::create(&pool, order(vec![item(tea, 1, false)], 0), CARD_DISCOUNT)
        .await
        .unwrap();
    sale::soft_delete(&pool, cash.sales[0].id, CARD_DISCOUNT)
        .await
        .unwrap();

    let closed = register::close(
        &pool,
        session_id,
        RegisterClose {
            closed_by_name: " Nikos ".into(),
            notes: Some("Quiet evening".into()),
        },
        &StatsConfig::default(),
    )
    .await
    .unwrap();

    assert!(!closed.session.is_open());
    assert_eq!(closed.session.closed_by_name.as_deref(), Some("Nikos"));
    assert_eq!(closed.session.notes.as_deref(), Some("Quiet evening"));

    let closing = closed.closing.unwrap();
    assert_eq!(closing.register_session_id, session_id);
    assert_eq!(closing.treats_count, 1);
    assert_eq!(closing.card_count, 1);
    assert_eq!(closing.notes.card_revenue, 8.0);
    assert_eq!(closing.notes.treats_amount, 5.0);
    assert_eq!(closing.notes.total_revenue, 8.0);
    assert_eq!(closing.notes.cash_revenue, 0.0);
    assert_eq!(closing.notes.discount, 2.0);

    assert!(register::find_current(&pool).await.unwrap().is_none());

    let err = register::close(
        &pool,
        session_id,
        RegisterClose {
            closed_by_name: "Nikos".into(),
            notes: None,
        },
        &StatsConfig::default(),
    )
    .await
    .unwrap_err();
    assert_eq!(rejected_code(err), ErrorCode::RegisterSessionNotFound);
}

#[tokio::test]
async fn test_register_list_newest_first_with_closings() {
    let pool = pool().await;
    let first = open_register(&pool).await;
    register::close(
        &pool,
        first,
        RegisterClose {
            closed_by_name: "Maria".into(),
            notes: None,
        },
        &StatsConfig::default(),
    )
    .await
    .unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let second = open_register(&pool).await;

    let sessions = register::find_all(&pool, 50, 0).await.unwrap();
    assert_eq!(sessions.len(), 2);
    assert_eq!(sessions[0].session.id, second);
    assert!(sessions[0].closing.is_none());
    assert_eq!(sessions[1].session.id, first);
    assert!(sessions[1].closing.is_some());

    let page = register::find_all(&pool, 1, 1).await.unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].session.id, first);
}

// ============================================================================
// Bookings
// ============================================================================

fn booking_at(millis: i64, field_number: i64) -> BookingCreate {
    BookingCreate {
        who_booked: "Giorgos".into(),
        booking_datetime: millis,
        contact_details: "6912345678".into(),
        field_number,
        num_players: 10,
        notes: None,
    }
}

#[tokio::test]
async fn test_booking_crud() {
    let pool = pool().await;
    let a = booking::create(&pool, booking_at(1_000, 1)).await.unwrap();
    booking::create(&pool, booking_at(5_000, 2)).await.unwrap();

    assert_eq!(booking::find_all(&pool).await.unwrap().len(), 2);
    let early = booking::find_by_date_range(&pool, 0, 2_000).await.unwrap();
    assert_eq!(early.len(), 1);
    assert_eq!(early[0].id, a.id);

    booking::delete(&pool, a.id).await.unwrap();
    let err = booking::delete(&pool, a.id).await.unwrap_err();
    assert_eq!(rejected_code(err), ErrorCode::BookingNotFound);
}

#[tokio::test]
async fn test_booking_check_constraint() {
    let pool = pool().await;
    let err = booking::create(&pool, booking_at(1_000, 9)).await.unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
}

// ============================================================================
// Maintenance
// ============================================================================

#[tokio::test]
async fn test_reset_replaces_all_data() {
    let pool = pool().await;
    open_register(&pool).await;
    create_product(&pool, "Old Product", 1.0, None).await;
    booking::create(&pool, booking_at(1_000, 1)).await.unwrap();

    let summary = seed::reset(&pool).await.unwrap();
    assert!(summary.categories > 0);
    assert!(summary.products > 0);

    assert!(register::find_current(&pool).await.unwrap().is_none());
    assert!(booking::find_all(&pool).await.unwrap().is_empty());
    let products = product::find_all(&pool).await.unwrap();
    assert_eq!(products.len(), summary.products);
    assert!(products.iter().all(|p| p.name != "Old Product"));
    assert_eq!(category::find_all(&pool).await.unwrap().len(), summary.categories);

    // Idempotent
    let again = seed::reset(&pool).await.unwrap();
    assert_eq!(again.products, summary.products);
}

#[test]
fn test_repo_error_to_app_error() {
    let err: AppError = RepoError::Rejected(ErrorCode::RegisterNotOpen, "closed".into()).into();
    assert_eq!(err.code, ErrorCode::RegisterNotOpen);
    assert_eq!(err.message, "closed");

    let err: AppError = RepoError::Duplicate("x".into()).into();
    assert_eq!(err.code, ErrorCode::AlreadyExists);

    let err: AppError = RepoError::Validation("bad".into()).into();
    assert_eq!(err.code, ErrorCode::ValidationFailed);

    let err: AppError = RepoError::Database("boom".into()).into();
    assert_eq!(err.code, ErrorCode::DatabaseError);
}
