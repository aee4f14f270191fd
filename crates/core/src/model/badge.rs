use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::BadgeId;

/// Achievement awarded by the server when a session is completed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
    pub id: BadgeId,
    pub badge_type: String,
    #[serde(default)]
    pub earned_at: Option<DateTime<Utc>>,
}

impl Badge {
    #[must_use]
    pub fn new(id: BadgeId, badge_type: impl Into<String>) -> Self {
        Self {
            id,
            badge_type: badge_type.into(),
            earned_at: None,
        }
    }

    /// Upper-cased label with the first underscore turned into a space.
    ///
    /// Only the first underscore is replaced: `fast_track_complete` becomes
    /// `FAST TRACK_COMPLETE`.
    #[must_use]
    pub fn display_label(&self) -> String {
        self.badge_type.replacen('_', " ", 1).to_uppercase()
    }
}
