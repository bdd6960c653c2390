use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Search term must not be empty")]
    EmptySearchTerm,

    #[error("Total time is required")]
    MissingDuration,

    #[error("Total time must be a number of minutes, got '{0}'")]
    NonNumericDuration(String),

    #[error("Total time must be greater than zero")]
    NonPositiveDuration,
}

/// A strictly positive playlist length in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TargetDuration(u64);

impl TargetDuration {
    pub fn from_millis(ms: u64) -> Result<Self, ValidationError> {
        if ms == 0 {
            return Err(ValidationError::NonPositiveDuration);
        }
        Ok(Self(ms))
    }

    /// Parses the minutes a user typed, e.g. `"30"` or `"12.5"`.
    ///
    /// Fractions below a millisecond are dropped; a value that drops to zero
    /// is rejected like any other non-positive one.
    pub fn from_minutes_str(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::MissingDuration);
        }

        let minutes: f64 = trimmed
            .parse()
            .ok()
            .filter(|m: &f64| m.is_finite())
            .ok_or_else(|| ValidationError::NonNumericDuration(trimmed.to_string()))?;

        if minutes <= 0.0 {
            return Err(ValidationError::NonPositiveDuration);
        }

        Self::from_millis((minutes * 60_000.0).floor() as u64)
    }

    pub fn as_millis(&self) -> u64 {
        self.0
    }
}

/// A non-empty, trimmed free-text catalog query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm(String);

impl SearchTerm {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptySearchTerm);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Everything a user supplies for one playlist build, already validated.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaylistRequest {
    pub term: SearchTerm,
    pub target: TargetDuration,
    pub genres: Vec<String>,
}

impl PlaylistRequest {
    /// Validates the search term first, then the duration. Blank genre hints are dropped.
    pub fn new(term: &str, minutes: &str, genres: &[String]) -> Result<Self, ValidationError> {
        let term = SearchTerm::parse(term)?;
        let target = TargetDuration::from_minutes_str(minutes)?;
        let genres = genres
            .iter()
            .map(|g| g.trim())
            .filter(|g| !g.is_empty())
            .map(str::to_string)
            .collect();

        Ok(Self {
            term,
            target,
            genres,
        })
    }
}
