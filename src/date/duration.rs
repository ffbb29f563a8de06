/// A millisecond duration split into calendar-style units.
///
/// The wrapped fields (`seconds`, `minutes`, `hours`) are floored and then
/// reduced modulo their unit; `days` is never wrapped. The `total_*` fields
/// keep the unrounded value expressed in each unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DurationBreakdown {
    pub seconds: u64,
    pub minutes: u64,
    pub hours: u64,
    pub days: u64,
    pub total_seconds: f64,
    pub total_minutes: f64,
    pub total_hours: f64,
    pub total_days: f64,
}

/// Splits a millisecond duration into its unit breakdown.
///
/// Negative durations are clamped to zero, e.g. a timestamp slightly in the
/// future due to clock skew between the CI server and this machine.
///
/// ```text
/// 3_222_111_444 ms -> 37 days, 7 hours, 1 minute, 51 seconds
/// ```
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn split_duration(duration_ms: i64) -> DurationBreakdown {
    let duration_ms = duration_ms.max(0);

    let total_seconds = duration_ms as f64 / 1000.0;
    let total_minutes = total_seconds / 60.0;
    let total_hours = total_minutes / 60.0;
    let total_days = total_hours / 24.0;

    DurationBreakdown {
        seconds: (total_seconds.floor() as u64) % 60,
        minutes: (total_minutes.floor() as u64) % 60,
        hours: (total_hours.floor() as u64) % 24,
        days: total_days.floor() as u64,
        total_seconds,
        total_minutes,
        total_hours,
        total_days,
    }
}

/// Renders a duration as a clock: `HH:MM:SS`, or `MM:SS` below one hour.
///
/// Uses the wrapped `hours` field, so a span of 25 hours renders as `01:..`.
pub fn duration_as_number(duration_ms: i64) -> String {
    let DurationBreakdown {
        seconds,
        minutes,
        hours,
        ..
    } = split_duration(duration_ms);

    let minutes_seconds = format!("{minutes:02}:{seconds:02}");

    if hours > 0 {
        format!("{hours:02}:{minutes_seconds}")
    } else {
        minutes_seconds
    }
}
