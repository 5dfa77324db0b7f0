//! Football Field Booking Model

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::error::{AppError, ErrorCode};

pub const MIN_PLAYERS: i64 = 2;
pub const MAX_PLAYERS: i64 = 12;
pub const MIN_FIELD_NUMBER: i64 = 1;
pub const MAX_FIELD_NUMBER: i64 = 5;

/// Booking record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct FootballFieldBooking {
    pub id: i64,
    pub who_booked: String,
    /// Unix millis
    pub booking_datetime: i64,
    pub contact_details: String,
    pub field_number: i64,
    pub num_players: i64,
    pub notes: Option<String>,
    pub created_at: i64,
}

/// Validated booking ready to be stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingCreate {
    pub who_booked: String,
    pub booking_datetime: i64,
    pub contact_details: String,
    pub field_number: i64,
    pub num_players: i64,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingError {
    #[error("Please fill in all required fields")]
    RequiredFields,
    #[error("Number of players must be between {} and {}", MIN_PLAYERS, MAX_PLAYERS)]
    PlayerCount,
    #[error("Field number must be between {} and {}", MIN_FIELD_NUMBER, MAX_FIELD_NUMBER)]
    InvalidField,
    #[error("Invalid booking date or time")]
    InvalidDateTime,
}

impl BookingError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::RequiredFields => ErrorCode::BookingRequiredFields,
            Self::PlayerCount => ErrorCode::BookingPlayerCount,
            Self::InvalidField => ErrorCode::BookingInvalidField,
            Self::InvalidDateTime => ErrorCode::InvalidFormat,
        }
    }
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        AppError::with_message(err.code(), err.to_string())
    }
}

/// Raw booking form as submitted by the dashboard
///
/// Numeric inputs arrive either as JSON numbers or as the strings an HTML
/// select produces, so they are kept as text until validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookingForm {
    #[serde(default)]
    pub who_booked: String,
    /// `YYYY-MM-DD`
    #[serde(default)]
    pub date: String,
    /// `HH:MM`
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub contact_details: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub field_number: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub num_players: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl BookingForm {
    /// Validate the form and build the record to store
    ///
    /// Date and time are interpreted as wall-clock time in `tz`.
    pub fn validate(&self, tz: Tz) -> Result<BookingCreate, BookingError> {
        let who_booked = self.who_booked.trim();
        let contact_details = self.contact_details.trim();
        let date = self.date.trim();
        let time = self.time.trim();

        if who_booked.is_empty() || date.is_empty() || time.is_empty() || contact_details.is_empty()
        {
            return Err(BookingError::RequiredFields);
        }

        let field_number = parse_number(self.field_number.as_deref())?;
        let num_players = parse_number(self.num_players.as_deref())?;

        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&num_players) {
            return Err(BookingError::PlayerCount);
        }
        if !(MIN_FIELD_NUMBER..=MAX_FIELD_NUMBER).contains(&field_number) {
            return Err(BookingError::InvalidField);
        }

        let booking_datetime = combine_date_time(date, time, tz)?;

        let notes = self
            .notes
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string);

        Ok(BookingCreate {
            who_booked: who_booked.to_string(),
            booking_datetime,
            contact_details: contact_details.to_string(),
            field_number,
            num_players,
            notes,
        })
    }
}

fn parse_number(raw: Option<&str>) -> Result<i64, BookingError> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<i64>().ok())
        .ok_or(BookingError::RequiredFields)
}

fn combine_date_time(date: &str, time: &str, tz: Tz) -> Result<i64, BookingError> {
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| BookingError::InvalidDateTime)?;
    let time = NaiveTime::parse_from_str(time, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(time, "%H:%M:%S"))
        .map_err(|_| BookingError::InvalidDateTime)?;

    tz.from_local_datetime(&NaiveDateTime::new(date, time))
        .earliest()
        .map(|dt| dt.timestamp_millis())
        .ok_or(BookingError::InvalidDateTime)
}

fn text_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(s) => s,
        Raw::Int(n) => n.to_string(),
        Raw::Float(f) => f.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> BookingForm {
        BookingForm {
            who_booked: "  Nikos  ".to_string(),
            date: "2024-06-15".to_string(),
            time: "19:30".to_string(),
            contact_details: " 6900000000 ".to_string(),
            field_number: Some("2".to_string()),
            num_players: Some("10".to_string()),
            notes: Some("   ".to_string()),
        }
    }

    #[test]
    fn test_valid_form_is_trimmed() {
        let booking = form().validate(chrono_tz::Europe::Athens).unwrap();
        assert_eq!(booking.who_booked, "Nikos");
        assert_eq!(booking.contact_details, "6900000000");
        assert_eq!(booking.field_number, 2);
        assert_eq!(booking.num_players, 10);
        assert_eq!(booking.notes, None);
    }

    #[test]
    fn test_datetime_uses_business_timezone() {
        let booking = form().validate(chrono_tz::Europe::Athens).unwrap();
        // 19:30 in Athens during summer time is 16:30 UTC
        let expected = chrono::Utc
            .with_ymd_and_hms(2024, 6, 15, 16, 30, 0)
            .unwrap()
            .timestamp_millis();
        assert_eq!(booking.booking_datetime, expected);
    }

    #[test]
    fn test_missing_fields() {
        let mut f = form();
        f.who_booked = "   ".to_string();
        assert_eq!(f.validate(chrono_tz::UTC), Err(BookingError::RequiredFields));

        let mut f = form();
        f.time.clear();
        assert_eq!(f.validate(chrono_tz::UTC), Err(BookingError::RequiredFields));

        let mut f = form();
        f.num_players = None;
        assert_eq!(f.validate(chrono_tz::UTC), Err(BookingError::RequiredFields));

        let mut f = form();
        f.field_number = Some(String::new());
        assert_eq!(f.validate(chrono_tz::UTC), Err(BookingError::RequiredFields));
    }

    #[test]
    fn test_player_count_bounds() {
        for (players, ok) in [("1", false), ("2", true), ("12", true), ("13", false)] {
            let mut f = form();
            f.num_players = Some(players.to_string());
            let result = f.validate(chrono_tz::UTC);
            if ok {
                assert!(result.is_ok(), "{players} players should be accepted");
            } else {
                assert_eq!(result, Err(BookingError::PlayerCount));
            }
        }
    }

    #[test]
    fn test_field_number_bounds() {
        for (field, ok) in [("0", false), ("1", true), ("5", true), ("6", false)] {
            let mut f = form();
            f.field_number = Some(field.to_string());
            let result = f.validate(chrono_tz::UTC);
            if ok {
                assert!(result.is_ok(), "field {field} should be accepted");
            } else {
                assert_eq!(result, Err(BookingError::InvalidField));
            }
        }
    }

    #[test]
    fn test_player_count_checked_before_field() {
        let mut f = form();
        f.num_players = Some("20".to_string());
        f.field_number = Some("9".to_string());
        assert_eq!(f.validate(chrono_tz::UTC), Err(BookingError::PlayerCount));
    }

    #[test]
    fn test_invalid_date() {
        let mut f = form();
        f.date = "15/06/2024".to_string();
        assert_eq!(f.validate(chrono_tz::UTC), Err(BookingError::InvalidDateTime));
    }

    #[test]
    fn test_deserialize_numbers_and_strings() {
        let f: BookingForm = serde_json::from_str(
            r#"{"who_booked":"A","date":"2024-01-01","time":"10:00",
                "contact_details":"x","field_number":3,"num_players":"8"}"#,
        )
        .unwrap();
        assert_eq!(f.field_number.as_deref(), Some("3"));
        assert_eq!(f.num_players.as_deref(), Some("8"));
        assert!(f.notes.is_none());
    }

    #[test]
    fn test_error_messages_and_codes() {
        assert_eq!(
            BookingError::PlayerCount.to_string(),
            "Number of players must be between 2 and 12"
        );
        assert_eq!(
            BookingError::InvalidField.to_string(),
            "Field number must be between 1 and 5"
        );
        let err: AppError = BookingError::RequiredFields.into();
        assert_eq!(err.code, ErrorCode::BookingRequiredFields);
    }
}
