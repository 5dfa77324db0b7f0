//! 启动相关: 配置 ([`Config`])、共享状态 ([`ServerState`])、
//! 监听与优雅退出 ([`Server`]) 以及启动期错误 ([`ServerError`])

pub mod config;
pub mod error;
pub mod server;
pub mod state;

pub use config::Config;
pub use error::{Result, ServerError};
pub use server::Server;
pub use state::ServerState;
