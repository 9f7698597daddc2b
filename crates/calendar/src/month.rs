//! Hydrological month index and month distance.

use crate::error::CalendarError;
use crate::start_month::StartMonth;

/// Remaps calendar `month` to its 1-based position in the hydrological year.
///
/// With a September start: September = 1, ..., August = 12, which equals
/// `month - 8` for `month >= 9` and `month + 4` otherwise.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidMonth`] if `month` is outside 1..=12.
pub fn hydro_month(month: u8, start: StartMonth) -> Result<u8, CalendarError> {
    if !(1..=12).contains(&month) {
        return Err(CalendarError::InvalidMonth { month });
    }
    Ok((month + 12 - start.get()) % 12 + 1)
}

/// Absolute difference between the hydrological-month indices of `a` and `b`.
///
/// Captures seasonal lag without calendar wraparound: with a September
/// start, August and September are 11 apart, not 1.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidMonth`] if either month is outside 1..=12.
pub fn month_distance(a: u8, b: u8, start: StartMonth) -> Result<u8, CalendarError> {
    let ha = hydro_month(a, start)?;
    let hb = hydro_month(b, start)?;
    Ok(ha.abs_diff(hb))
}
