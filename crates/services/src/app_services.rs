use std::sync::Arc;

use storage::Storage;
use storage::http::ApiConfig;

use crate::Clock;
use crate::error::AppServicesError;
use crate::journey::JourneyService;

/// Assembles app-facing services over a storage backend.
#[derive(Clone)]
pub struct AppServices {
    journey: Arc<JourneyService>,
}

impl AppServices {
    #[must_use]
    pub fn new(clock: Clock, storage: &Storage) -> Self {
        Self {
            journey: Arc::new(JourneyService::from_storage(clock, storage)),
        }
    }

    /// Build services backed by the remote HTTP API.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::Http` if the API configuration is invalid.
    pub fn new_http(config: &ApiConfig, clock: Clock) -> Result<Self, AppServicesError> {
        let storage = Storage::http(config)?;
        Ok(Self::new(clock, &storage))
    }

    /// Build services backed by the in-memory stand-in, for offline use.
    #[must_use]
    pub fn new_in_memory(clock: Clock) -> Self {
        Self::new(clock, &Storage::in_memory())
    }

    #[must_use]
    pub fn journey(&self) -> Arc<JourneyService> {
        Arc::clone(&self.journey)
    }
}
