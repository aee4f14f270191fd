use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{ProgressId, Section, SessionId};

/// Server-side marker of a user's interaction with one section.
///
/// Created when a section is started, flagged complete once the reflection
/// for that section is submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionProgress {
    pub id: ProgressId,
    pub session_id: SessionId,
    pub section_name: String,
    /// 1-based position of the section in the catalog.
    pub section_order: u32,
    #[serde(default)]
    pub estimated_duration: Option<u32>,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub reflection_answer: Option<String>,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

impl SectionProgress {
    /// True when this record tracks the given catalog section.
    #[must_use]
    pub fn is_for(&self, section: &Section) -> bool {
        self.section_name == section.title
    }
}
