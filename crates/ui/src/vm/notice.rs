use services::JourneyError;

use super::journey_vm::JourneyAction;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeTone {
    Info,
    Destructive,
}

/// Transient message shown after an action, success or failure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub title: &'static str,
    pub description: &'static str,
    pub tone: NoticeTone,
}

impl Notice {
    const fn info(title: &'static str, description: &'static str) -> Self {
        Self {
            title,
            description,
            tone: NoticeTone::Info,
        }
    }

    const fn destructive(title: &'static str, description: &'static str) -> Self {
        Self {
            title,
            description,
            tone: NoticeTone::Destructive,
        }
    }

    #[must_use]
    pub fn session_started() -> Self {
        Self::info("Session Started!", "Your Bible in a Day journey has begun.")
    }

    #[must_use]
    pub fn section_complete() -> Self {
        Self::info("Section Complete!", "Great progress on your journey.")
    }

    #[must_use]
    pub fn journey_complete() -> Self {
        Self::info(
            "🎉 Journey Complete!",
            "You've completed the Bible in a Day! Check your new badge.",
        )
    }

    #[must_use]
    pub fn reflection_required() -> Self {
        Self::destructive(
            "Reflection Required",
            "Please share your reflection before continuing.",
        )
    }

    #[must_use]
    pub fn rating_required() -> Self {
        Self::destructive("Rating Required", "Please rate your journey before completing it.")
    }

    #[must_use]
    pub fn section_not_started() -> Self {
        Self::destructive("Section Not Started", "Start reading this section before completing it.")
    }

    /// Notice for a failed action. Remote failures all read the same; the
    /// user retries by repeating the action.
    #[must_use]
    pub fn for_error(action: JourneyAction, err: &JourneyError) -> Self {
        match err {
            JourneyError::EmptyReflection => Self::reflection_required(),
            JourneyError::Rating(_) => Self::rating_required(),
            JourneyError::SectionNotStarted => Self::section_not_started(),
            _ => match action {
                JourneyAction::StartSession => {
                    Self::destructive("Error", "Failed to start session. Please try again.")
                }
                JourneyAction::StartSection | JourneyAction::CompleteSection => {
                    Self::destructive("Error", "Failed to save your progress. Please try again.")
                }
                JourneyAction::CompleteSession => {
                    Self::destructive("Error", "Failed to complete your journey. Please try again.")
                }
            },
        }
    }

    #[must_use]
    pub fn is_destructive(&self) -> bool {
        self.tone == NoticeTone::Destructive
    }
}
