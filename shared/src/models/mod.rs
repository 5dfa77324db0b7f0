//! Data models
//!
//! Shared between pos-server and the dashboard frontend (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` snowflake ids, all timestamps are Unix millis.

pub mod booking;
pub mod category;
pub mod order;
pub mod product;
pub mod register;
pub mod sale;

// Re-exports
pub use booking::*;
pub use category::*;
pub use order::*;
pub use product::*;
pub use register::*;
pub use sale::*;
