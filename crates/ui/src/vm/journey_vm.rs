use journey_core::model::SessionType;
use services::{JourneyError, JourneyService, JourneySnapshot, JourneyState, JourneyView};
use tracing::debug;

use super::notice::Notice;
use super::screen_vm::{
    ReadingVm, SetupVm, SurveyVm, build_reading_vm, build_setup_vm, build_survey_vm,
};

/// Everything the user can do on the journey screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum JourneyIntent {
    SelectSessionType(SessionType),
    EditReflection(String),
    Pause,
    SetRating(u8),
    EditFinalReflection(String),
    StartSession,
    StartSection,
    CompleteSection,
    CompleteSession,
}

/// Intents that talk to the server.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JourneyAction {
    StartSession,
    StartSection,
    CompleteSection,
    CompleteSession,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct JourneyVm {
    state: JourneyState,
    snapshot: JourneySnapshot,
}

impl JourneyVm {
    #[must_use]
    pub fn new(state: JourneyState, snapshot: JourneySnapshot) -> Self {
        Self { state, snapshot }
    }

    /// Fetch the server state and point the reader at the first unfinished
    /// section of an existing session.
    ///
    /// # Errors
    ///
    /// Returns `JourneyError::Storage` if any read fails.
    pub async fn load(journey: &JourneyService) -> Result<Self, JourneyError> {
        let snapshot = journey.load_snapshot().await?;
        let mut state = JourneyState::new();
        state.resume_from(&snapshot.progress);
        Ok(Self::new(state, snapshot))
    }

    #[must_use]
    pub fn state(&self) -> &JourneyState {
        &self.state
    }

    #[must_use]
    pub fn snapshot(&self) -> &JourneySnapshot {
        &self.snapshot
    }

    #[must_use]
    pub fn view(&self) -> JourneyView {
        self.snapshot.view(&self.state)
    }

    /// Apply a local intent. Remote intents are handed back as the action
    /// to run through `perform`.
    pub fn apply(&mut self, intent: JourneyIntent) -> Option<JourneyAction> {
        match intent {
            JourneyIntent::SelectSessionType(session_type) => {
                self.state.select_session_type(session_type);
            }
            JourneyIntent::EditReflection(text) => self.state.set_reflection_answer(text),
            JourneyIntent::Pause => self.state.pause(),
            JourneyIntent::SetRating(stars) => self.state.set_final_rating(stars),
            JourneyIntent::EditFinalReflection(text) => self.state.set_final_reflection(text),
            JourneyIntent::StartSession => return Some(JourneyAction::StartSession),
            JourneyIntent::StartSection => return Some(JourneyAction::StartSection),
            JourneyIntent::CompleteSection => return Some(JourneyAction::CompleteSection),
            JourneyIntent::CompleteSession => return Some(JourneyAction::CompleteSession),
        }
        None
    }

    /// Run a remote action and describe its outcome.
    ///
    /// Starting a section has no success notice; every failure has one.
    pub async fn perform(&mut self, journey: &JourneyService, action: JourneyAction) -> Option<Notice> {
        let result = match action {
            JourneyAction::StartSession => journey
                .start_session(&mut self.state)
                .await
                .map(|(_, snapshot)| {
                    self.snapshot = snapshot;
                    Some(Notice::session_started())
                }),
            JourneyAction::StartSection => journey
                .start_section(&mut self.state, &mut self.snapshot)
                .await
                .map(|_| None),
            JourneyAction::CompleteSection => journey
                .complete_section(&mut self.state, &mut self.snapshot)
                .await
                .map(|_| Some(Notice::section_complete())),
            JourneyAction::CompleteSession => journey
                .complete_session(&mut self.state, &mut self.snapshot)
                .await
                .map(|_| Some(Notice::journey_complete())),
        };

        match result {
            Ok(notice) => notice,
            Err(err) => {
                debug!(?action, error = %err, "journey action rejected");
                Some(Notice::for_error(action, &err))
            }
        }
    }

    #[must_use]
    pub fn setup(&self, starting: bool) -> SetupVm {
        build_setup_vm(&self.state, &self.snapshot, starting)
    }

    #[must_use]
    pub fn survey(&self, submitting: bool) -> SurveyVm {
        build_survey_vm(&self.state, submitting)
    }

    #[must_use]
    pub fn reading(&self, busy: bool) -> ReadingVm {
        build_reading_vm(&self.state, &self.snapshot, busy)
    }
}
