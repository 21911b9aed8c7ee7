//! Clock arithmetic: minutes since midnight, half-hour rounding, hour shifts.

use crate::classify::start_time;

/// Minutes since midnight for the time part of `text`.
///
/// Text without a colon counts as midnight (`Some(0)`). Unparseable parts or
/// overflowing values yield `None`.
pub fn minutes_since_midnight(text: &str) -> Option<i64> {
    let time = start_time(text);
    let mut parts = time.split(':');

    let (Some(hour), Some(minute)) = (parts.next(), parts.next()) else {
        return Some(0);
    };

    let hour: i64 = hour.trim().parse().ok()?;
    let minute: i64 = minute.trim().parse().ok()?;
    hour.checked_mul(60)?.checked_add(minute)
}

/// Rounds a minute delta to half-hour granularity and renders it as hours.
///
/// The remainder after whole hours decides the rounding: more than 30
/// minutes adds an hour, 10 to 30 minutes adds half an hour, less than 10
/// is dropped. Division floors, so negative deltas stay negative.
#[allow(clippy::cast_precision_loss)]
pub fn round_to_hours(delta_minutes: i64) -> String {
    let hours = delta_minutes.div_euclid(60);
    let remainder = delta_minutes.rem_euclid(60);

    if remainder > 30 {
        (hours + 1).to_string()
    } else if remainder >= 10 {
        (hours as f64 + 0.5).to_string()
    } else {
        hours.to_string()
    }
}

/// Rounded duration between two lines' start times, `None` if either fails.
pub fn span_hours(start: &str, end: &str) -> Option<String> {
    let start = minutes_since_midnight(start)?;
    let end = minutes_since_midnight(end)?;
    Some(round_to_hours(end.checked_sub(start)?))
}

/// Shifts the hour of an `HH:MM[...]` string by `offset` hours.
///
/// The hour wraps into `0..24` and is zero padded; whatever follows the
/// first colon is kept verbatim.
pub fn shift_clock(time: &str, offset: i64) -> Option<String> {
    let (hour, rest) = time.split_once(':')?;
    let hour: i64 = hour.trim().parse().ok()?;
    let shifted = hour.checked_add(offset)?.rem_euclid(24);
    Some(format!("{shifted:02}:{rest}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minutes_from_start_line() {
        assert_eq!(minutes_since_midnight("9:30"), Some(570));
        assert_eq!(minutes_since_midnight("10:05 / ProjB, call"), Some(605));
    }

    #[test]
    fn minutes_without_colon_is_midnight() {
        assert_eq!(minutes_since_midnight("1.5"), Some(0));
        assert_eq!(minutes_since_midnight("lunch"), Some(0));
    }

    #[test]
    fn minutes_fail_on_garbage() {
        assert_eq!(minutes_since_midnight("ab:cd"), None);
        assert_eq!(minutes_since_midnight("99999999999999999999:00"), None);
    }

    #[test]
    fn rounding_table() {
        let cases = [
            (0, "0"),
            (9, "0"),
            (10, "0.5"),
            (20, "0.5"),
            (30, "0.5"),
            (31, "1"),
            (60, "1"),
            (69, "1"),
            (70, "1.5"),
            (90, "1.5"),
            (91, "2"),
            (150, "2.5"),
        ];
        for (minutes, expected) in cases {
            assert_eq!(round_to_hours(minutes), expected, "delta {minutes}");
        }
    }

    #[test]
    fn negative_delta_floors() {
        // No day rollover handling: 23:00 -> 01:00 comes out negative.
        assert_eq!(round_to_hours(-1320), "-22");
        assert_eq!(round_to_hours(-30), "-0.5");
        assert_eq!(round_to_hours(-1), "0");
        assert_eq!(round_to_hours(-50), "-0.5");
        assert_eq!(round_to_hours(-55), "-1");
    }

    #[test]
    fn span_between_lines() {
        assert_eq!(span_hours("9:00", "10:00 / B").as_deref(), Some("1"));
        assert_eq!(span_hours("9:00", "9:20").as_deref(), Some("0.5"));
        assert_eq!(span_hours("9:00", "ab:cd"), None);
    }

    #[test]
    fn shift_wraps_and_pads() {
        assert_eq!(shift_clock("9:30", -1).as_deref(), Some("08:30"));
        assert_eq!(shift_clock("23:15:00", 2).as_deref(), Some("01:15:00"));
        assert_eq!(shift_clock("00:10", -1).as_deref(), Some("23:10"));
        assert_eq!(shift_clock("noon", 1), None);
    }
}
