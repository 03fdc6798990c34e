//! Retry interval formatting for rate-limit messages

const SECONDS_PER_MINUTE: u64 = 60;
const SECONDS_PER_HOUR: u64 = 60 * SECONDS_PER_MINUTE;
const SECONDS_PER_DAY: u64 = 24 * SECONDS_PER_HOUR;

/// Format a number of seconds as `"1d 2h 3m 4s"`.
///
/// Units are rendered from the largest non-zero one downward; once a unit
/// has been rendered every smaller unit follows it, even when zero. Seconds
/// are always rendered, so `0` formats as `"0s"` and `3600` as `"1h 0m 0s"`.
pub fn format_duration(total_seconds: u64) -> String {
    let days = total_seconds / SECONDS_PER_DAY;
    let hours = (total_seconds % SECONDS_PER_DAY) / SECONDS_PER_HOUR;
    let minutes = (total_seconds % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;
    let seconds = total_seconds % SECONDS_PER_MINUTE;

    let mut parts = Vec::with_capacity(4);
    let mut started = false;

    for (value, unit) in [(days, 'd'), (hours, 'h'), (minutes, 'm')] {
        started |= value > 0;
        if started {
            parts.push(format!("{}{}", value, unit));
        }
    }
    parts.push(format!("{}s", seconds));

    parts.join(" ")
}
