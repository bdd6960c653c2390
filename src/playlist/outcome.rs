use super::{TargetDuration, Track, select};

#[derive(Debug, Clone, PartialEq)]
pub enum PlaylistOutcome {
    Selected(Vec<Track>),
    /// The catalog returned no usable tracks.
    NoCandidates,
    /// Every candidate is longer than the target.
    NothingFits,
}

impl PlaylistOutcome {
    pub fn classify(candidates: &[Track], target: TargetDuration) -> Self {
        if candidates.is_empty() {
            return Self::NoCandidates;
        }

        let selected = select(candidates, target);
        if selected.is_empty() {
            Self::NothingFits
        } else {
            Self::Selected(selected)
        }
    }
}
