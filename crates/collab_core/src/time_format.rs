//! Display formatting for timestamps and durations, plus the clock source.
//!
//! # Responsibility
//! - Render epoch-millisecond instants as `DD/MM/YYYY HH:MM` in a time zone.
//! - Render millisecond durations as `HHhMMmin`.
//! - Provide an injectable "now" so callers and tests control time.
//!
//! # Invariants
//! - Instants are stored as UTC epoch milliseconds; zones only affect output.
//! - Formatting never panics, including for out-of-range instants.

use chrono::{DateTime, Local, TimeZone, Utc};
use std::fmt::Display;

const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M";
const OUT_OF_RANGE_TIMESTAMP: &str = "--/--/---- --:--";
const MILLIS_PER_MINUTE: u64 = 60_000;
const MILLIS_PER_HOUR: u64 = 3_600_000;

/// Source of the current instant in UTC epoch milliseconds.
pub trait Clock {
    fn now_ms(&self) -> i64;
}

/// Wall clock backed by the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Clock frozen at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_ms(&self) -> i64 {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> i64 {
        (**self).now_ms()
    }
}

/// Current instant from the process-wide system clock.
pub fn now() -> i64 {
    SystemClock.now_ms()
}

/// Formats `epoch_ms` in the system local zone as `DD/MM/YYYY HH:MM`.
pub fn format_timestamp(epoch_ms: i64) -> String {
    format_timestamp_in(epoch_ms, &Local)
}

/// Formats `epoch_ms` in `zone` as `DD/MM/YYYY HH:MM` (24-hour clock).
///
/// Instants outside chrono's representable range render as
/// `--/--/---- --:--`.
pub fn format_timestamp_in<Tz>(epoch_ms: i64, zone: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match DateTime::<Utc>::from_timestamp_millis(epoch_ms) {
        Some(instant) => instant
            .with_timezone(zone)
            .format(TIMESTAMP_FORMAT)
            .to_string(),
        None => OUT_OF_RANGE_TIMESTAMP.to_string(),
    }
}

/// Formats a duration as `HHhMMmin`.
///
/// Hours are not capped at 24 and widen past two digits when needed.
/// Negative durations render as `-` followed by the absolute value.
pub fn format_duration(duration_ms: i64) -> String {
    let magnitude = duration_ms.unsigned_abs();
    let hours = magnitude / MILLIS_PER_HOUR;
    let minutes = (magnitude / MILLIS_PER_MINUTE) % 60;
    let sign = if duration_ms < 0 { "-" } else { "" };
    format!("{sign}{hours:02}h{minutes:02}min")
}

#[cfg(test)]
mod tests {
    use super::{format_duration, format_timestamp_in, Clock, FixedClock};
    use chrono::{FixedOffset, Utc};

    #[test]
    fn timestamp_renders_in_requested_zone() {
        let paris_winter = FixedOffset::east_opt(3600).expect("valid offset");
        assert_eq!(
            format_timestamp_in(1_616_186_446_919, &paris_winter),
            "19/03/2021 21:40"
        );
        assert_eq!(format_timestamp_in(1_616_186_446_919, &Utc), "19/03/2021 20:40");
    }

    #[test]
    fn timestamp_zero_pads_all_fields() {
        assert_eq!(format_timestamp_in(0, &Utc), "01/01/1970 00:00");
    }

    #[test]
    fn timestamp_out_of_range_does_not_panic() {
        assert_eq!(format_timestamp_in(i64::MAX, &Utc), "--/--/---- --:--");
    }

    #[test]
    fn duration_uses_hours_and_minutes() {
        assert_eq!(format_duration(2_760_000), "00h46min");
        assert_eq!(format_duration(0), "00h00min");
        assert_eq!(format_duration(59_999), "00h00min");
        assert_eq!(format_duration(3_600_000 * 26 + 60_000 * 5), "26h05min");
        assert_eq!(format_duration(3_600_000 * 123), "123h00min");
    }

    #[test]
    fn negative_duration_is_prefixed() {
        assert_eq!(format_duration(-2_760_000), "-00h46min");
    }

    #[test]
    fn fixed_clock_is_frozen() {
        let clock = FixedClock(42);
        assert_eq!(clock.now_ms(), 42);
        assert_eq!(clock.now_ms(), clock.now_ms());
    }
}
