use chrono::{DateTime, Utc};
use journey_core::model::{
    ProgressId, Rating, RatingError, Reflection, ReflectionError, SECTION_COUNT, Section,
    SectionProgress, SessionType, last_section_index, sections,
};

/// Local, never-persisted state of the journey screen.
///
/// Holds what the user is doing right now (selected type, section pointer,
/// draft texts). Everything durable lives on the server and reaches the UI
/// through `JourneySnapshot`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JourneyState {
    selected_session_type: SessionType,
    current_section_index: usize,
    is_reading: bool,
    session_started_at: Option<DateTime<Utc>>,
    section_started_at: Option<DateTime<Utc>>,
    reflection_answer: String,
    final_rating: u8,
    final_reflection: String,
    active_progress_id: Option<ProgressId>,
}

impl JourneyState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn selected_session_type(&self) -> SessionType {
        self.selected_session_type
    }

    #[must_use]
    pub fn current_section_index(&self) -> usize {
        self.current_section_index
    }

    /// Section under the pointer. The pointer never leaves the catalog.
    #[must_use]
    pub fn current_section(&self) -> &'static Section {
        let index = self.current_section_index.min(last_section_index());
        &sections()[index]
    }

    #[must_use]
    pub fn is_reading(&self) -> bool {
        self.is_reading
    }

    #[must_use]
    pub fn session_started_at(&self) -> Option<DateTime<Utc>> {
        self.session_started_at
    }

    #[must_use]
    pub fn section_started_at(&self) -> Option<DateTime<Utc>> {
        self.section_started_at
    }

    #[must_use]
    pub fn reflection_answer(&self) -> &str {
        &self.reflection_answer
    }

    #[must_use]
    pub fn final_rating(&self) -> u8 {
        self.final_rating
    }

    #[must_use]
    pub fn final_reflection(&self) -> &str {
        &self.final_reflection
    }

    #[must_use]
    pub fn active_progress_id(&self) -> Option<ProgressId> {
        self.active_progress_id
    }

    /// True when the section form would accept the current reflection.
    #[must_use]
    pub fn can_complete_section(&self) -> bool {
        !self.reflection_answer.trim().is_empty()
    }

    /// True when the survey form would accept the current rating.
    #[must_use]
    pub fn can_complete_session(&self) -> bool {
        self.final_rating != 0
    }

    pub fn select_session_type(&mut self, session_type: SessionType) {
        self.selected_session_type = session_type;
    }

    pub fn set_reflection_answer(&mut self, text: impl Into<String>) {
        self.reflection_answer = text.into();
    }

    pub fn set_final_rating(&mut self, stars: u8) {
        self.final_rating = stars.min(Rating::MAX);
    }

    pub fn set_final_reflection(&mut self, text: impl Into<String>) {
        self.final_reflection = text.into();
    }

    /// Local toggle only; the pause itself is not persisted.
    pub fn pause(&mut self) {
        self.is_reading = false;
    }

    /// Validated copy of the section reflection.
    ///
    /// # Errors
    ///
    /// Returns `ReflectionError::Empty` for a blank draft.
    pub fn reflection(&self) -> Result<Reflection, ReflectionError> {
        Reflection::new(self.reflection_answer.clone())
    }

    /// Validated final rating.
    ///
    /// # Errors
    ///
    /// Returns `RatingError::Missing` while no star is picked.
    pub fn rating(&self) -> Result<Rating, RatingError> {
        Rating::new(self.final_rating)
    }

    /// Point at the first section without a completed record.
    ///
    /// Used when the screen is opened on a session that already has progress,
    /// so reading resumes where it stopped instead of at the first section.
    pub fn resume_from(&mut self, records: &[SectionProgress]) {
        let next = sections()
            .iter()
            .position(|section| {
                !records
                    .iter()
                    .any(|record| record.is_for(section) && record.is_completed)
            })
            .unwrap_or(last_section_index());
        self.current_section_index = next;
        self.active_progress_id = None;
        self.is_reading = false;
        self.section_started_at = None;
    }

    pub(crate) fn begin_session(&mut self, at: DateTime<Utc>) {
        self.session_started_at = Some(at);
        self.current_section_index = 0;
        self.is_reading = false;
        self.section_started_at = None;
        self.reflection_answer.clear();
        self.final_rating = 0;
        self.final_reflection.clear();
        self.active_progress_id = None;
    }

    pub(crate) fn begin_section(&mut self, progress_id: ProgressId, at: DateTime<Utc>) {
        self.is_reading = true;
        self.section_started_at = Some(at);
        self.active_progress_id = Some(progress_id);
    }

    /// Clear the reading state and move to the next section, if there is one.
    pub(crate) fn finish_section(&mut self) {
        self.reflection_answer.clear();
        self.is_reading = false;
        self.section_started_at = None;
        self.active_progress_id = None;
        if self.current_section_index + 1 < SECTION_COUNT {
            self.current_section_index += 1;
        }
    }

    pub(crate) fn finish_session(&mut self) {
        self.final_rating = 0;
        self.final_reflection.clear();
        self.session_started_at = None;
    }
}
