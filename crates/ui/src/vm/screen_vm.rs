use journey_core::model::{Badge, SECTION_COUNT, Section, SectionProgress, SessionType};
use services::{JourneySnapshot, JourneyState};

use crate::vm::time_fmt::{format_clock_time, format_date};

//
// ─── SETUP ────────────────────────────────────────────────────────────────────
//

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionTypeOptionVm {
    pub session_type: SessionType,
    pub title: &'static str,
    pub description: &'static str,
    pub highlights: &'static [&'static str],
    pub selected: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BadgeVm {
    pub id: u64,
    pub label: String,
    pub earned_on: Option<String>,
}

impl From<&Badge> for BadgeVm {
    fn from(badge: &Badge) -> Self {
        Self {
            id: badge.id.value(),
            label: badge.display_label(),
            earned_on: badge.earned_at.map(format_date),
        }
    }
}

#[must_use]
pub fn map_badges(badges: &[Badge]) -> Vec<BadgeVm> {
    badges.iter().map(BadgeVm::from).collect()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SetupVm {
    pub options: Vec<SessionTypeOptionVm>,
    pub badges: Vec<BadgeVm>,
    pub starting: bool,
}

fn option_for(session_type: SessionType, selected: SessionType) -> SessionTypeOptionVm {
    let (title, description, highlights): (&'static str, &'static str, &'static [&'static str]) =
        match session_type {
            SessionType::FastTrack => (
                "Fast Track (6 Hours)",
                "Essential Bible narrative in focused sections",
                &[
                    "4 core sections",
                    "Key biblical themes",
                    "Perfect for busy schedules",
                    "Guided reflections",
                ],
            ),
            SessionType::FullImmersion | SessionType::DeepDive | SessionType::AudioOnly => (
                "Full Immersion (10 Hours)",
                "Complete biblical story with deep exploration",
                &[
                    "All 8 major sections",
                    "Comprehensive coverage",
                    "In-depth reflections",
                    "Ultimate spiritual challenge",
                ],
            ),
        };
    SessionTypeOptionVm {
        session_type,
        title,
        description,
        highlights,
        selected: session_type == selected,
    }
}

#[must_use]
pub fn build_setup_vm(state: &JourneyState, snapshot: &JourneySnapshot, starting: bool) -> SetupVm {
    SetupVm {
        options: SessionType::OFFERED
            .iter()
            .map(|ty| option_for(*ty, state.selected_session_type()))
            .collect(),
        badges: map_badges(&snapshot.badges),
        starting,
    }
}

//
// ─── COMPLETION SURVEY ────────────────────────────────────────────────────────
//

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SurveyVm {
    pub rating: u8,
    pub reflection: String,
    pub can_submit: bool,
    pub submitting: bool,
}

#[must_use]
pub fn build_survey_vm(state: &JourneyState, submitting: bool) -> SurveyVm {
    SurveyVm {
        rating: state.final_rating(),
        reflection: state.final_reflection().to_string(),
        can_submit: state.can_complete_session() && !submitting,
        submitting,
    }
}

//
// ─── READING ──────────────────────────────────────────────────────────────────
//

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SectionCardVm {
    pub title: &'static str,
    pub description: &'static str,
    pub content: &'static str,
    pub reflection_question: &'static str,
    pub minutes_label: String,
    pub verses_label: String,
}

impl From<&Section> for SectionCardVm {
    fn from(section: &Section) -> Self {
        Self {
            title: section.title,
            description: section.description,
            content: section.content,
            reflection_question: section.reflection_question,
            minutes_label: format!("{} min", section.estimated_minutes),
            verses_label: format!("Key verses: {}", section.key_verses_joined()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgressItemVm {
    pub id: u64,
    pub section_name: String,
    pub is_completed: bool,
}

impl From<&SectionProgress> for ProgressItemVm {
    fn from(record: &SectionProgress) -> Self {
        Self {
            id: record.id.value(),
            section_name: record.section_name.clone(),
            is_completed: record.is_completed,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReadingVm {
    pub session_label: &'static str,
    pub progress_label: String,
    pub percent_label: String,
    pub percent: u8,
    pub started_label: Option<String>,
    /// Set only while the current section is open.
    pub reading_since_label: Option<String>,
    pub section: SectionCardVm,
    pub is_reading: bool,
    pub reflection: String,
    pub can_complete: bool,
    pub busy: bool,
    pub records: Vec<ProgressItemVm>,
}

#[must_use]
pub fn build_reading_vm(state: &JourneyState, snapshot: &JourneySnapshot, busy: bool) -> ReadingVm {
    let summary = snapshot.progress_summary();
    let session_label = snapshot
        .active_session
        .as_ref()
        .map_or(SessionType::FastTrack, |session| session.session_type)
        .badge_label();
    ReadingVm {
        session_label,
        progress_label: format!(
            "Progress: {} of {} sections",
            summary.completed, SECTION_COUNT
        ),
        percent_label: format!("{}% complete", summary.percent_rounded()),
        percent: summary.percent_rounded(),
        started_label: state
            .session_started_at()
            .map(|at| format!("Started at {}", format_clock_time(at))),
        reading_since_label: state
            .section_started_at()
            .filter(|_| state.is_reading())
            .map(|at| format!("Reading since {}", format_clock_time(at))),
        section: SectionCardVm::from(state.current_section()),
        is_reading: state.is_reading(),
        reflection: state.reflection_answer().to_string(),
        can_complete: state.can_complete_section() && !busy,
        busy,
        records: snapshot.progress.iter().map(ProgressItemVm::from).collect(),
    }
}
