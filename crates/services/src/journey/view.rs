use journey_core::model::{SectionProgress, Session, last_section_index};
use serde::Serialize;

use super::progress::JourneyProgress;

/// Which screen the journey should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum JourneyView {
    /// No active session: pick a session type and start.
    Setup,
    /// Every section is done but the session is still open.
    CompletionSurvey,
    /// Reading the section at `section_index`.
    Reading { section_index: usize },
}

/// Pick the view from fetched state, in priority order:
/// no session, then all-sections-done, then reading.
#[must_use]
pub fn select_view(
    active_session: Option<&Session>,
    progress: &[SectionProgress],
    current_index: usize,
) -> JourneyView {
    let Some(session) = active_session else {
        return JourneyView::Setup;
    };

    if JourneyProgress::from_records(progress).is_complete() && !session.is_completed {
        return JourneyView::CompletionSurvey;
    }

    JourneyView::Reading {
        section_index: current_index.min(last_section_index()),
    }
}
