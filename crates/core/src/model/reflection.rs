use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ReflectionError {
    #[error("reflection is empty")]
    Empty,
}

/// A section reflection that contains more than whitespace.
///
/// The text is kept exactly as typed; only the emptiness check trims.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reflection(String);

impl Reflection {
    /// # Errors
    ///
    /// Returns `ReflectionError::Empty` when the text is blank.
    pub fn new(text: impl Into<String>) -> Result<Self, ReflectionError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(ReflectionError::Empty);
        }
        Ok(Self(text))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}
