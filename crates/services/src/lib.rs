#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod journey;

pub use journey_core::Clock;
pub use storage::StorageError;

pub use app_services::AppServices;
pub use error::{AppServicesError, JourneyError};
pub use journey::{
    JourneyProgress, JourneyService, JourneySnapshot, JourneyState, JourneyView, SectionOutcome,
    matching_progress, select_view,
};
