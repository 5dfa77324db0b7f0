//! Kafeneio POS Server - 咖啡馆收银、销售统计与足球场预订后端
//!
//! # 架构概述
//!
//! - **销售统计** (`stats`): 纯函数聚合 (日序列、排行、现金/刷卡/招待汇总)
//! - **数据库** (`db`): SQLite (sqlx) 连接池与 repository
//! - **HTTP API** (`api`): axum 路由和处理器
//! - **核心** (`core`): 配置、状态、服务器
//!
//! # 模块结构
//!
//! ```text
//! pos-server/src/
//! ├── core/          # 配置、状态、错误、服务器
//! ├── api/           # HTTP 路由和处理器
//! ├── middleware/    # 请求日志
//! ├── stats/         # 销售统计聚合
//! ├── db/            # 数据库层
//! └── utils/         # 日志、时间、校验
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod middleware;
pub mod stats;
pub mod utils;

// Re-export 公共类型
pub use crate::core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

// Re-export unified error types from shared
pub use utils::ErrorCode;

pub use utils::logger::init_logger_with_file;

/// 按配置初始化日志 (调用前先加载 `.env`)
pub fn setup_environment(config: &Config) -> anyhow::Result<()> {
    init_logger_with_file(&config.log_level, config.log_json, config.log_dir.as_deref())
}

pub fn print_banner() {
    println!(
        r#"
  _  __       __                _
 | |/ /__ _  / _| ___ _ __   ___(_) ___
 | ' // _` || |_ / _ \ '_ \ / _ \ |/ _ \
 | . \ (_| ||  _|  __/ | | |  __/ | (_) |
 |_|\_\__,_||_|  \___|_| |_|\___|_|\___/
                          POS v{}
"#,
        env!("CARGO_PKG_VERSION")
    );
}
