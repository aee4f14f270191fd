use journey_core::model::{Badge, SectionProgress, Session, section_at};
use serde::Serialize;

use super::progress::{JourneyProgress, matching_progress};
use super::state::JourneyState;
use super::view::{JourneyView, select_view};

/// Server state as last fetched: the three read queries of the journey.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct JourneySnapshot {
    pub active_session: Option<Session>,
    pub progress: Vec<SectionProgress>,
    pub badges: Vec<Badge>,
}

impl JourneySnapshot {
    #[must_use]
    pub fn progress_summary(&self) -> JourneyProgress {
        JourneyProgress::from_records(&self.progress)
    }

    #[must_use]
    pub fn view(&self, state: &JourneyState) -> JourneyView {
        select_view(
            self.active_session.as_ref(),
            &self.progress,
            state.current_section_index(),
        )
    }

    /// Insert `record`, or replace the entry with the same id.
    ///
    /// Used when a write succeeded but the re-fetch that should have brought
    /// the record back did not.
    pub fn upsert_progress(&mut self, record: SectionProgress) {
        match self.progress.iter_mut().find(|existing| existing.id == record.id) {
            Some(existing) => *existing = record,
            None => self.progress.push(record),
        }
    }

    /// Open record for the section at `index`, looked up by name.
    #[must_use]
    pub fn open_record_for(&self, index: usize) -> Option<&SectionProgress> {
        section_at(index).and_then(|section| matching_progress(&self.progress, section))
    }
}
