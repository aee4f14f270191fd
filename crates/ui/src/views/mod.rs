mod achievements;
mod journey;
mod state;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use achievements::AchievementsView;
pub use journey::{BadgeShelf, JourneyPage, NoticeBanner, ReadingScreen, SetupScreen, SurveyScreen};
pub use state::{ViewError, ViewState, view_state_from_resource};
