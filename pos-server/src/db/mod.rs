//! SQLite 连接池与迁移

pub mod repository;

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};

use crate::utils::AppError;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);
const FILE_POOL_SIZE: u32 = 5;

fn db_error(context: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| AppError::database(format!("{context}: {e}"))
}

#[derive(Clone)]
pub struct DbService {
    pub pool: SqlitePool,
}

impl DbService {
    /// 打开 (必要时创建) 数据库文件, WAL 模式, 然后执行迁移
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        let parent = Path::new(db_path).parent();
        if let Some(dir) = parent
            && !dir.as_os_str().is_empty()
        {
            std::fs::create_dir_all(dir).map_err(|e| {
                AppError::database(format!("Cannot create database directory {}: {e}", dir.display()))
            })?;
        }

        let options = SqliteConnectOptions::from_str(&format!("sqlite:{db_path}"))
            .map_err(db_error("Invalid database path"))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .foreign_keys(true)
            .busy_timeout(BUSY_TIMEOUT)
            .optimize_on_close(true, None);

        let pool = SqlitePoolOptions::new()
            .max_connections(FILE_POOL_SIZE)
            .connect_with(options)
            .await
            .map_err(db_error("Cannot open database"))?;
        tracing::info!(path = %db_path, pool = FILE_POOL_SIZE, "SQLite opened (WAL)");

        Self::with_migrations(pool).await
    }

    /// 私有内存库; 只有一个连接, 所有查询落在同一个库上
    pub async fn in_memory() -> Result<Self, AppError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(db_error("Invalid database path"))?
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(db_error("Cannot open in-memory database"))?;

        Self::with_migrations(pool).await
    }

    async fn with_migrations(pool: SqlitePool) -> Result<Self, AppError> {
        sqlx::migrate!("./migrations")
            .set_ignore_missing(true)
            .run(&pool)
            .await
            .map_err(|e| AppError::database(format!("Migration failed: {e}")))?;
        tracing::debug!("migrations up to date");

        Ok(DbService { pool })
    }
}
