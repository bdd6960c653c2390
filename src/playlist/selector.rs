use super::{TargetDuration, Track};

/// Share of the target at which the fill counts as good enough and the scan stops.
pub const GOOD_ENOUGH_FILL_RATIO: f64 = 0.9;

/// Picks tracks whose combined duration fills `target` without exceeding it.
///
/// Candidates are visited longest first (ties keep their input order) and each
/// one is accepted if it still fits in the remaining budget. The scan stops as
/// soon as the accepted tracks reach [`GOOD_ENOUGH_FILL_RATIO`] of the target.
///
/// This is a greedy heuristic, not a subset-sum solver: another subset may
/// land closer to the target. Tracks with a zero duration never get selected.
///
/// Returns an empty list when there are no candidates or none of them fits on
/// its own. The same input always produces the same output.
pub fn select(candidates: &[Track], target: TargetDuration) -> Vec<Track> {
    let target_ms = target.as_millis();
    let good_enough = target_ms as f64 * GOOD_ENOUGH_FILL_RATIO;

    let mut ordered: Vec<&Track> = candidates.iter().filter(|t| t.duration_ms > 0).collect();
    // sort_by is stable
    ordered.sort_by(|a, b| b.duration_ms.cmp(&a.duration_ms));

    let mut accumulated: u64 = 0;
    let mut selected = Vec::new();

    for track in ordered {
        let Some(next) = accumulated.checked_add(track.duration_ms) else {
            continue;
        };
        if next > target_ms {
            continue;
        }

        accumulated = next;
        selected.push(track.clone());

        if accumulated as f64 >= good_enough {
            break;
        }
    }

    selected
}
