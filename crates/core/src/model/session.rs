use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::SessionId;

//
// ─── SESSION TYPE ─────────────────────────────────────────────────────────────
//

/// Kind of journey the user picked on the setup screen.
///
/// The setup screen only offers `FastTrack` and `FullImmersion`, while the
/// duration table only knows `FastTrack`, `DeepDive` and `AudioOnly`. Both
/// sets are kept as they are; see `target_duration_minutes` and `badge_label`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionType {
    #[default]
    FastTrack,
    DeepDive,
    AudioOnly,
    FullImmersion,
}

impl SessionType {
    /// Types offered on the setup screen, in display order.
    pub const OFFERED: [SessionType; 2] = [SessionType::FastTrack, SessionType::FullImmersion];

    /// Wire name of the session type.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SessionType::FastTrack => "fast_track",
            SessionType::DeepDive => "deep_dive",
            SessionType::AudioOnly => "audio_only",
            SessionType::FullImmersion => "full_immersion",
        }
    }

    /// Target duration sent when a session is created.
    ///
    /// `FullImmersion` has no entry of its own and falls through to 45.
    #[must_use]
    pub fn target_duration_minutes(self) -> u32 {
        match self {
            SessionType::FastTrack => 60,
            SessionType::DeepDive => 300,
            SessionType::AudioOnly | SessionType::FullImmersion => 45,
        }
    }

    /// Label shown in the reading header: anything that is not fast track
    /// is labelled "Full Immersion".
    #[must_use]
    pub fn badge_label(self) -> &'static str {
        match self {
            SessionType::FastTrack => "Fast Track",
            SessionType::DeepDive | SessionType::AudioOnly | SessionType::FullImmersion => {
                "Full Immersion"
            }
        }
    }
}

impl fmt::Display for SessionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//
// ─── SESSION ──────────────────────────────────────────────────────────────────
//

/// A user's attempt at the journey, as reported by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: SessionId,
    pub session_type: SessionType,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub target_duration: Option<u32>,
    #[serde(default)]
    pub final_rating: Option<u8>,
    #[serde(default)]
    pub reflection_notes: Option<String>,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Minimal session record, as a freshly created one looks.
    #[must_use]
    pub fn new(id: SessionId, session_type: SessionType) -> Self {
        Self {
            id,
            session_type,
            is_completed: false,
            target_duration: Some(session_type.target_duration_minutes()),
            final_rating: None,
            reflection_notes: None,
            started_at: None,
            completed_at: None,
        }
    }
}
