use super::Track;

const MILLIS_PER_MINUTE: u64 = 60_000;
const MILLIS_PER_SECOND: u64 = 1_000;

pub fn total_millis(tracks: &[Track]) -> u64 {
    tracks
        .iter()
        .fold(0u64, |acc, t| acc.saturating_add(t.duration_ms))
}

/// Formats milliseconds as `minutes:seconds`, flooring to whole seconds.
///
/// Minutes are not wrapped into hours, so 75 minutes reads `75:00`.
pub fn format_millis(ms: u64) -> String {
    let minutes = ms / MILLIS_PER_MINUTE;
    let seconds = (ms % MILLIS_PER_MINUTE) / MILLIS_PER_SECOND;
    format!("{}:{:02}", minutes, seconds)
}

/// Total playing time of `tracks` as `m:ss`; `"0:00"` for an empty list.
pub fn total_duration(tracks: &[Track]) -> String {
    format_millis(total_millis(tracks))
}
