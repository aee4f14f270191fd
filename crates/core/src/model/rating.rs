use thiserror::Error;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

/// Errors raised when validating a final star rating.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RatingError {
    #[error("a rating is required")]
    Missing,

    #[error("rating must be between 1 and 5, got {0}")]
    OutOfRange(u8),
}

//
// ─── RATING ───────────────────────────────────────────────────────────────────
//

/// Star rating given when the journey is completed.
///
/// `0` is the "nothing picked yet" value of the survey form and is never a
/// valid rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Validates a raw star count.
    ///
    /// # Errors
    ///
    /// Returns `RatingError::Missing` for `0` and `RatingError::OutOfRange`
    /// for anything above 5.
    pub fn new(value: u8) -> Result<Self, RatingError> {
        match value {
            0 => Err(RatingError::Missing),
            Self::MIN..=Self::MAX => Ok(Self(value)),
            _ => Err(RatingError::OutOfRange(value)),
        }
    }

    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = RatingError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
