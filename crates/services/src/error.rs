//! Shared error types for the services crate.

use thiserror::Error;

use journey_core::model::{RatingError, ReflectionError};
use storage::StorageError;
use storage::http::HttpInitError;

/// Errors emitted by `JourneyService`.
///
/// Validation failures are caught before any request is made; `Storage`
/// wraps a failed remote call. Nothing is retried automatically.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum JourneyError {
    #[error("a reflection is required before completing the section")]
    EmptyReflection,
    #[error(transparent)]
    Rating(#[from] RatingError),
    #[error("no active session")]
    NoActiveSession,
    #[error("section has not been started")]
    SectionNotStarted,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl JourneyError {
    /// True for errors raised locally, before any network call.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        !matches!(self, JourneyError::Storage(_))
    }
}

impl From<ReflectionError> for JourneyError {
    fn from(_: ReflectionError) -> Self {
        JourneyError::EmptyReflection
    }
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Http(#[from] HttpInitError),
}
