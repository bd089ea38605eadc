//! Field-level validation shared by tools and changelog entries.

use chrono::{DateTime, Datelike, SubsecRound, Timelike, Utc};

use crate::error::ServiceError;

/// Maximum length of `nameKurz`, in characters.
pub const NAME_KURZ_MAX_LEN: usize = 50;

/// Maximum length of `nameLang`, in characters.
pub const NAME_LANG_MAX_LEN: usize = 255;

/// Maximum length of `version`, in characters.
pub const VERSION_MAX_LEN: usize = 50;

/// Earliest year a `timestamptz` column accepts (4713 BC).
pub const DATUM_MIN_YEAR: i32 = -4712;

/// Checks that a required text field is non-blank and, when `max_len` is
/// given, no longer than `max_len` characters.
///
/// # Errors
///
/// Returns [`ServiceError::Validation`] naming the offending field.
pub fn require_text(field: &str, value: &str, max_len: Option<usize>) -> Result<(), ServiceError> {
    if value.trim().is_empty() {
        return Err(ServiceError::Validation(format!(
            "{field} must not be empty"
        )));
    }
    if let Some(max) = max_len {
        let len = value.chars().count();
        if len > max {
            return Err(ServiceError::Validation(format!(
                "{field} must be at most {max} characters (got {len})"
            )));
        }
    }
    Ok(())
}

/// Checks that a timestamp fits the backing store: no precision finer than
/// microseconds and a year no earlier than the `timestamptz` minimum. The
/// upper `timestamptz` bound lies beyond what `DateTime<Utc>` can hold.
///
/// # Errors
///
/// Returns [`ServiceError::Validation`] if the nanosecond part is not a
/// whole number of microseconds or the year is before 4713 BC.
pub fn require_storable_timestamp(field: &str, value: &DateTime<Utc>) -> Result<(), ServiceError> {
    if value.year() < DATUM_MIN_YEAR {
        return Err(ServiceError::Validation(format!(
            "{field} must not be earlier than 4713 BC"
        )));
    }
    if value.nanosecond() % 1_000 != 0 {
        return Err(ServiceError::Validation(format!(
            "{field} must not be more precise than microseconds"
        )));
    }
    Ok(())
}

/// Current time truncated to microsecond precision.
#[must_use]
pub fn now_micros() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}
