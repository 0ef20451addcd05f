//! Fiscal-calendar helpers
//!
//! Months are 1-based. Out-of-range months are not rejected: they wrap
//! forward (or backward) into adjacent years, reproducing the wrap-around
//! the script's original date constructor applied, so month 13 of 2025 is
//! January 2026 and month 0 is December 2024.

use chrono::{DateTime, TimeZone, Utc};

/// Normalize a possibly out-of-range 1-based month into `(year, month)` with
/// month in `1..=12`.
pub(crate) fn wrap_month(year: i32, month: u32) -> (i32, u32) {
    let months = i64::from(year) * 12 + i64::from(month) - 1;
    (
        months.div_euclid(12) as i32,
        (months.rem_euclid(12) + 1) as u32,
    )
}

/// Midnight UTC on day 1 of the (wrapped) month.
pub(crate) fn month_start(year: i32, month: u32) -> DateTime<Utc> {
    let (y, m) = wrap_month(year, month);
    Utc.with_ymd_and_hms(y, m, 1, 0, 0, 0)
        .single()
        .expect("day 1 of a wrapped month is a valid date")
}

/// Purchase timestamp used by the create procedure: day 15 of the (wrapped)
/// month.
pub(crate) fn purchase_date(year: i32, month: u32) -> DateTime<Utc> {
    let (y, m) = wrap_month(year, month);
    Utc.with_ymd_and_hms(y, m, 15, 0, 0, 0)
        .single()
        .expect("day 15 of a wrapped month is a valid date")
}
