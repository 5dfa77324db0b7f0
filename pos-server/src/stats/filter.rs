use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use shared::models::SaleWithDetails;

use crate::utils::time;
use crate::utils::{AppError, AppResult};

/// Date range as received from the dashboard (`?startDate=&endDate=`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Resolved half-open interval `[start_millis, end_millis)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start_millis: i64,
    pub end_millis: i64,
}

impl TimeRange {
    #[inline]
    pub fn contains(&self, millis: i64) -> bool {
        millis >= self.start_millis && millis < self.end_millis
    }
}

impl DateRange {
    pub fn new(start_date: impl Into<String>, end_date: impl Into<String>) -> Self {
        Self {
            start_date: Some(start_date.into()),
            end_date: Some(end_date.into()),
        }
    }

    /// Resolve to a time interval in the business timezone
    ///
    /// Both bounds are whole days: the start day from midnight, the end day
    /// through its last millisecond. Returns `None` unless both bounds are
    /// given. Any bound that is given must parse.
    pub fn parse(&self, tz: Tz) -> AppResult<Option<TimeRange>> {
        let start = non_empty(&self.start_date)
            .map(|s| time::parse_date(s, tz))
            .transpose()?;
        let end = non_empty(&self.end_date)
            .map(|s| time::parse_date(s, tz))
            .transpose()?;

        let (Some(start), Some(end)) = (start, end) else {
            return Ok(None);
        };

        if start > end {
            return Err(AppError::validation(format!(
                "startDate {} is after endDate {}",
                start, end
            )));
        }

        Ok(Some(TimeRange {
            start_millis: time::day_start_millis(start, tz),
            end_millis: time::day_end_millis(end, tz),
        }))
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Non-deleted sales created within `range` (all non-deleted sales when `None`)
pub fn filter_sales_by_date_range<'a, I>(sales: I, range: Option<TimeRange>) -> Vec<&'a SaleWithDetails>
where
    I: IntoIterator<Item = &'a SaleWithDetails>,
{
    sales
        .into_iter()
        .filter(|s| !s.sale.is_deleted)
        .filter(|s| range.is_none_or(|r| r.contains(s.sale.created_at)))
        .collect()
}
