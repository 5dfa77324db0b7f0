//! Shared types for the POS backend
//!
//! Data models exchanged with the dashboard, the unified error system and
//! small utilities used by the server crate.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};
