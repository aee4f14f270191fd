use dioxus::prelude::*;
use services::{JourneyError, StorageError};

/// Why a page could not load its data from the journey API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    /// The API could not be reached at all.
    Offline,
    /// The API rejected the token.
    Unauthorized,
    /// The API answered, but not with a usable response.
    Server,
    Unknown,
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            ViewError::Offline => {
                "Something went wrong. The journey server could not be reached."
            }
            ViewError::Unauthorized => {
                "Something went wrong. The journey server refused the access token."
            }
            ViewError::Server => "Something went wrong on the journey server. Please try again.",
            ViewError::Unknown => "Something went wrong. Please try again.",
        }
    }
}

impl From<&JourneyError> for ViewError {
    fn from(err: &JourneyError) -> Self {
        match err {
            JourneyError::Storage(StorageError::Connection(_)) => ViewError::Offline,
            JourneyError::Storage(StorageError::Status(401 | 403)) => ViewError::Unauthorized,
            JourneyError::Storage(
                StorageError::Status(_) | StorageError::Serialization(_) | StorageError::Conflict,
            ) => ViewError::Server,
            _ => ViewError::Unknown,
        }
    }
}

/// Load state of a page backed by a `use_resource` fetch.
#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

/// A finished resource without a value counts as `Unknown`.
#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: &Resource<Result<T, ViewError>>,
) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Ready => match resource.value().read().as_ref() {
            Some(Ok(data)) => ViewState::Ready(data.clone()),
            Some(Err(err)) => ViewState::Error(*err),
            None => ViewState::Error(ViewError::Unknown),
        },
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
    }
}
