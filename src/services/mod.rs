//! Booking, payment, reservation and favorites logic.
//!
//! Every operation takes the caller's username explicitly; handlers are the
//! only place that reads authentication state.

pub mod bookings;
pub mod destinations;
pub mod favorites;
pub mod payments;
pub mod pricing;
pub mod reservations;

use chrono::{DateTime, NaiveDate};

use crate::error::{AppError, AppResult};

/// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp; the date part is kept.
pub fn parse_visit_date(raw: &str) -> AppResult<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(raw).map(|dt| dt.date_naive()))
        .map_err(|_| AppError::Validation(format!("Invalid visit date: {}", raw)))
}

/// Treats a missing or blank string as absent.
pub(crate) fn required<'a>(value: &'a Option<String>, field: &str) -> AppResult<&'a str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::Validation(format!("Missing required field: {}", field)))
}
