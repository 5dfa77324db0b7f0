//! 时间工具: 业务时区下的日期解析与换算
//!
//! 所有日期→时间戳转换统一在 handler / stats 层完成，
//! repository 层只接收 `i64` Unix millis。

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;

use super::{AppError, AppResult};

/// 解析日期字符串 (YYYY-MM-DD 或 RFC 3339)
///
/// RFC 3339 时间先换算到业务时区，再取其日期。
pub fn parse_date(date: &str, tz: Tz) -> AppResult<NaiveDate> {
    let date = date.trim();
    if let Ok(d) = NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        return Ok(d);
    }
    DateTime::parse_from_rfc3339(date)
        .map(|dt| dt.with_timezone(&tz).date_naive())
        .map_err(|_| {
            AppError::validation(format!("Invalid date format: {}", date)).with_detail("value", date)
        })
}

/// 日期开始 (00:00:00) → Unix millis (业务时区)
///
/// DST gap fallback: 本地时间不存在时按 UTC 计算。
pub fn day_start_millis(date: NaiveDate, tz: Tz) -> i64 {
    let naive = date.and_time(chrono::NaiveTime::MIN);
    naive
        .and_local_timezone(tz)
        .earliest()
        .map(|dt| dt.timestamp_millis())
        .unwrap_or_else(|| naive.and_utc().timestamp_millis())
}

/// 日期结束 → 次日 00:00:00 的 Unix millis (业务时区)
///
/// 返回次日零点时间戳，调用方使用 `< end` (不含) 语义。
pub fn day_end_millis(date: NaiveDate, tz: Tz) -> i64 {
    let next_day = date.succ_opt().unwrap_or(date);
    day_start_millis(next_day, tz)
}

/// Unix millis → 业务时区的日历日
pub fn millis_to_local_date(millis: i64, tz: Tz) -> Option<NaiveDate> {
    Utc.timestamp_millis_opt(millis)
        .single()
        .map(|dt| dt.with_timezone(&tz).date_naive())
}

/// Display format used by the dashboard charts (`d/m/yyyy`)
pub fn format_chart_date(date: NaiveDate) -> String {
    date.format("%-d/%-m/%Y").to_string()
}
