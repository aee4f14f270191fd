use std::sync::Arc;

use services::JourneyService;

pub trait UiApp: Send + Sync {
    fn journey(&self) -> Arc<JourneyService>;

    /// Where the journey API lives, shown in the navigation footer.
    fn api_label(&self) -> String;
}

#[derive(Clone)]
pub struct AppContext {
    journey: Arc<JourneyService>,
    api_label: String,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            journey: app.journey(),
            api_label: app.api_label(),
        }
    }

    #[must_use]
    pub fn journey(&self) -> Arc<JourneyService> {
        Arc::clone(&self.journey)
    }

    #[must_use]
    pub fn api_label(&self) -> &str {
        &self.api_label
    }
}

// This context is provided by the application composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
