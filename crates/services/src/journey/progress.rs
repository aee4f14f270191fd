use journey_core::model::{SECTION_COUNT, Section, SectionProgress};
use serde::Serialize;

/// Aggregated view of journey progress, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct JourneyProgress {
    pub completed: usize,
    pub total: usize,
}

impl JourneyProgress {
    /// Count completed records against the fixed catalog size.
    #[must_use]
    pub fn from_records(records: &[SectionProgress]) -> Self {
        Self {
            completed: records.iter().filter(|record| record.is_completed).count(),
            total: SECTION_COUNT,
        }
    }

    /// Exact completion ratio in percent, capped at 100.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let ratio = self.completed as f64 / self.total as f64 * 100.0;
        ratio.min(100.0)
    }

    /// Percentage rounded half-up for display (5 of 6 shows as 83).
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn percent_rounded(&self) -> u8 {
        (self.percent() + 0.5).floor() as u8
    }

    /// Exactly one completed record per section. Surplus records (a section
    /// completed twice) do not count as a finished journey.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.completed == self.total
    }
}

/// First record for `section` that is not complete yet.
///
/// Several open records for the same section are not disambiguated; the
/// first one in server order wins.
#[must_use]
pub fn matching_progress<'a>(
    records: &'a [SectionProgress],
    section: &Section,
) -> Option<&'a SectionProgress> {
    records
        .iter()
        .find(|record| record.is_for(section) && !record.is_completed)
}
