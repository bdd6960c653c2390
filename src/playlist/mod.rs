//! # Playlist Module
//!
//! Pure, synchronous building blocks for time-boxed playlists. Nothing in this
//! module performs I/O, touches the session, or knows about playback; callers
//! hand it validated input and get plain values back.
//!
//! ## Pipeline
//!
//! ```text
//! user text ──► request::PlaylistRequest ──┐
//!                                          ├─► selector::select ──► duration::total_duration
//! catalog records ──► Track::from_record ──┘
//! ```
//!
//! - [`request`] - parse-and-validate boundary for the search term and target duration
//! - [`track`] - the `Track` value used by the selector and the filter for malformed records
//! - [`selector`] - greedy, descending-duration fill of the target duration
//! - [`duration`] - millisecond totals and their `m:ss` rendering
//! - [`outcome`] - tells "nothing came back" apart from "nothing fits"

pub mod duration;
pub mod outcome;
pub mod request;
pub mod selector;
pub mod track;

pub use duration::{format_millis, total_duration, total_millis};
pub use outcome::PlaylistOutcome;
pub use request::{PlaylistRequest, SearchTerm, TargetDuration, ValidationError};
pub use selector::{GOOD_ENOUGH_FILL_RATIO, select};
pub use track::{Track, candidates_from_records};
