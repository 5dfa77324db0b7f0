use sqlx::SqlitePool;

use crate::core::Config;
use crate::db::DbService;
use crate::utils::AppResult;

/// 服务器状态 - 所有 handler 共享
///
/// `Clone` 成本很低: 配置按值复制, 连接池内部是 `Arc`。
#[derive(Clone, Debug)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// SQLite 连接池
    pub pool: SqlitePool,
}

impl ServerState {
    pub fn new(config: Config, pool: SqlitePool) -> Self {
        Self { config, pool }
    }

    /// 初始化服务器状态
    ///
    /// 打开数据库并执行迁移; `DATABASE_PATH=:memory:` 使用内存库。
    pub async fn initialize(config: &Config) -> AppResult<Self> {
        let db = if config.uses_memory_db() {
            DbService::in_memory().await?
        } else {
            DbService::new(&config.database_path).await?
        };
        Ok(Self::new(config.clone(), db.pool))
    }

    /// 每张卡的固定折扣
    pub fn card_discount(&self) -> f64 {
        self.config.stats.card_discount
    }
}
