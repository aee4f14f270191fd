mod progress;
mod service;
mod snapshot;
mod state;
mod view;

// Public API of the journey subsystem.
pub use crate::error::JourneyError;
pub use progress::{JourneyProgress, matching_progress};
pub use service::{JourneyService, SectionOutcome};
pub use snapshot::JourneySnapshot;
pub use state::JourneyState;
pub use view::{JourneyView, select_view};
