use std::str::FromStr;

use chrono_tz::Tz;

use crate::stats::StatsConfig;

/// 读取并解析环境变量; 缺失或解析失败时返回 `None`
pub(crate) fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok()?.trim().parse().ok()
}

/// 服务器配置, 启动时由 `.env` + 环境变量组装
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | DATABASE_PATH | ./data/pos.db | SQLite 文件, `:memory:` 为内存库 |
/// | HTTP_PORT | 3000 | 监听端口 |
/// | ENVIRONMENT | development | development / staging / production |
/// | LOG_LEVEL | info | RUST_LOG 存在时以其为准 |
/// | LOG_JSON | false | 控制台 JSON 日志 |
/// | LOG_DIR | - | 按天滚动的日志目录 |
/// | REQUEST_TIMEOUT_MS | 30000 | 单请求超时 |
///
/// 统计参数见 [`StatsConfig`].
#[derive(Debug, Clone)]
pub struct Config {
    pub database_path: String,
    pub http_port: u16,
    pub environment: String,
    pub log_level: String,
    pub log_json: bool,
    pub log_dir: Option<String>,
    pub request_timeout_ms: u64,
    pub stats: StatsConfig,
}

const MEMORY_DB: &str = ":memory:";

impl Config {
    pub fn from_env() -> Self {
        Config {
            database_path: env_parse("DATABASE_PATH").unwrap_or_else(|| "./data/pos.db".to_owned()),
            http_port: env_parse("HTTP_PORT").unwrap_or(3000),
            environment: env_parse("ENVIRONMENT").unwrap_or_else(|| "development".to_owned()),
            log_level: env_parse("LOG_LEVEL").unwrap_or_else(|| "info".to_owned()),
            log_json: env_parse("LOG_JSON").unwrap_or(false),
            log_dir: env_parse::<String>("LOG_DIR").filter(|dir| !dir.is_empty()),
            request_timeout_ms: env_parse("REQUEST_TIMEOUT_MS").unwrap_or(30_000),
            stats: StatsConfig::from_env(),
        }
    }

    /// 内存库 + 默认统计参数, 不读环境变量
    pub fn for_tests(environment: impl Into<String>) -> Self {
        Config {
            database_path: MEMORY_DB.to_owned(),
            http_port: 0,
            environment: environment.into(),
            log_level: "debug".to_owned(),
            log_json: false,
            log_dir: None,
            request_timeout_ms: 30_000,
            stats: StatsConfig::default(),
        }
    }

    pub fn uses_memory_db(&self) -> bool {
        self.database_path == MEMORY_DB
    }

    pub fn timezone(&self) -> Tz {
        self.stats.timezone
    }

    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_flags() {
        let prod = Config::for_tests("production");
        assert!(prod.is_production());
        assert!(Config::for_tests("PRODUCTION").is_production());
        assert!(!Config::for_tests("development").is_production());
        assert!(!Config::for_tests("staging").is_production());
    }

    #[test]
    fn test_config_is_in_memory_athens() {
        let config = Config::for_tests("development");
        assert!(config.uses_memory_db());
        assert_eq!(config.timezone(), chrono_tz::Europe::Athens);
    }

    #[test]
    fn env_parse_ignores_garbage() {
        assert_eq!(env_parse::<u16>("POS_TEST_SURELY_UNSET_VAR"), None);
    }
}
