use std::sync::Arc;

use journey_core::Clock;
use journey_core::model::{Badge, ProgressId, SectionProgress, Session};
use storage::repository::{
    BadgeRepository, CompleteProgressRecord, CompleteSessionRecord, NewProgressRecord,
    NewSessionRecord, ProgressRepository, SessionRepository, Storage,
};
use tracing::{info, warn};

use super::snapshot::JourneySnapshot;
use super::state::JourneyState;
use crate::error::JourneyError;

/// Result of completing a section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionOutcome {
    pub completed: SectionProgress,
    /// Every section now has a completed record.
    pub journey_finished: bool,
}

/// Orchestrates the journey's reads and writes against the remote API.
///
/// Guards run before any request. Local state in `JourneyState` only changes
/// after the corresponding write succeeded, and each write is followed by a
/// re-fetch of the reads that depend on it. The re-fetch is best-effort: if it
/// fails, the snapshot is patched from the write's response and the call
/// still succeeds, so a retry never repeats a write that already landed.
#[derive(Clone)]
pub struct JourneyService {
    clock: Clock,
    sessions: Arc<dyn SessionRepository>,
    progress: Arc<dyn ProgressRepository>,
    badges: Arc<dyn BadgeRepository>,
}

impl JourneyService {
    #[must_use]
    pub fn new(
        clock: Clock,
        sessions: Arc<dyn SessionRepository>,
        progress: Arc<dyn ProgressRepository>,
        badges: Arc<dyn BadgeRepository>,
    ) -> Self {
        Self {
            clock,
            sessions,
            progress,
            badges,
        }
    }

    #[must_use]
    pub fn from_storage(clock: Clock, storage: &Storage) -> Self {
        Self::new(
            clock,
            Arc::clone(&storage.sessions),
            Arc::clone(&storage.progress),
            Arc::clone(&storage.badges),
        )
    }

    #[must_use]
    pub fn in_memory(clock: Clock) -> Self {
        Self::from_storage(clock, &Storage::in_memory())
    }

    /// Fetch the active session, its progress (only when a session exists)
    /// and the badge list.
    ///
    /// # Errors
    ///
    /// Returns `JourneyError::Storage` if any read fails.
    pub async fn load_snapshot(&self) -> Result<JourneySnapshot, JourneyError> {
        let active_session = self.sessions.active_session().await?;
        let progress = match &active_session {
            Some(session) => self.progress.list_progress(session.id).await?,
            None => Vec::new(),
        };
        let badges = self.badges.list_badges().await?;
        Ok(JourneySnapshot {
            active_session,
            progress,
            badges,
        })
    }

    /// Re-fetch the progress list for the snapshot's active session.
    ///
    /// # Errors
    ///
    /// Returns `JourneyError::Storage` if the read fails.
    pub async fn refresh_progress(&self, snapshot: &mut JourneySnapshot) -> Result<(), JourneyError> {
        snapshot.progress = match &snapshot.active_session {
            Some(session) => self.progress.list_progress(session.id).await?,
            None => Vec::new(),
        };
        Ok(())
    }

    /// Re-fetch the badge list into the snapshot.
    ///
    /// # Errors
    ///
    /// Returns `JourneyError::Storage` if the read fails.
    pub async fn refresh_badges(&self, snapshot: &mut JourneySnapshot) -> Result<(), JourneyError> {
        snapshot.badges = self.badges.list_badges().await?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `JourneyError::Storage` if the read fails.
    pub async fn list_badges(&self) -> Result<Vec<Badge>, JourneyError> {
        Ok(self.badges.list_badges().await?)
    }

    /// Start a session of the selected type.
    ///
    /// # Errors
    ///
    /// Returns `JourneyError::Storage` if creating the session fails.
    pub async fn start_session(
        &self,
        state: &mut JourneyState,
    ) -> Result<(Session, JourneySnapshot), JourneyError> {
        let record = NewSessionRecord::for_type(state.selected_session_type());
        let session = self.sessions.create_session(&record).await.map_err(|err| {
            warn!(session_type = %record.session_type, error = %err, "failed to start session");
            err
        })?;
        info!(
            session_id = %session.id,
            session_type = %session.session_type,
            target_duration = record.target_duration,
            "session started"
        );

        state.begin_session(self.clock.now());
        let snapshot = match self.load_snapshot().await {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!(session_id = %session.id, error = %err, "re-fetch after session start failed");
                JourneySnapshot {
                    active_session: Some(session.clone()),
                    ..JourneySnapshot::default()
                }
            }
        };
        Ok((session, snapshot))
    }

    /// Start reading the current section.
    ///
    /// Resuming a paused section reuses the tracked record; otherwise a new
    /// progress record is created on the server.
    ///
    /// # Errors
    ///
    /// Returns `JourneyError::NoActiveSession` without a session, or
    /// `JourneyError::Storage` if the write fails.
    pub async fn start_section(
        &self,
        state: &mut JourneyState,
        snapshot: &mut JourneySnapshot,
    ) -> Result<ProgressId, JourneyError> {
        let session_id = snapshot
            .active_session
            .as_ref()
            .map(|session| session.id)
            .ok_or(JourneyError::NoActiveSession)?;

        if let Some(id) = tracked_open_record(state, snapshot) {
            state.begin_section(id, self.clock.now());
            return Ok(id);
        }

        let index = state.current_section_index();
        let section = state.current_section();
        let record = NewProgressRecord {
            session_id,
            section_name: section.title.to_string(),
            section_order: u32::try_from(index + 1).unwrap_or(u32::MAX),
            estimated_duration: section.estimated_minutes,
        };
        let created = self.progress.create_progress(&record).await.map_err(|err| {
            warn!(section = section.title, error = %err, "failed to record section start");
            err
        })?;
        info!(progress_id = %created.id, section = section.title, "section started");

        let id = created.id;
        state.begin_section(id, self.clock.now());
        self.refresh_progress_or_keep(snapshot, created).await;
        Ok(id)
    }

    /// Complete the current section with the drafted reflection.
    ///
    /// The targeted record is the one tracked since `start_section`; when
    /// nothing is tracked (the section was started in an earlier run) the
    /// first open record with the section's name is used.
    ///
    /// # Errors
    ///
    /// Returns `JourneyError::EmptyReflection` for a blank draft and
    /// `JourneyError::SectionNotStarted` when no open record exists, both
    /// without any request. Returns `JourneyError::Storage` on write failure.
    pub async fn complete_section(
        &self,
        state: &mut JourneyState,
        snapshot: &mut JourneySnapshot,
    ) -> Result<SectionOutcome, JourneyError> {
        let reflection = state.reflection()?;
        if snapshot.active_session.is_none() {
            return Err(JourneyError::NoActiveSession);
        }

        let target = tracked_open_record(state, snapshot)
            .or_else(|| {
                snapshot
                    .open_record_for(state.current_section_index())
                    .map(|record| record.id)
            })
            .ok_or(JourneyError::SectionNotStarted)?;

        let record = CompleteProgressRecord::from_reflection(reflection);
        let completed = self
            .progress
            .complete_progress(target, &record)
            .await
            .map_err(|err| {
                warn!(progress_id = %target, error = %err, "failed to complete section");
                err
            })?;
        info!(progress_id = %completed.id, section = %completed.section_name, "section completed");

        state.finish_section();
        self.refresh_progress_or_keep(snapshot, completed.clone()).await;
        Ok(SectionOutcome {
            completed,
            journey_finished: snapshot.progress_summary().is_complete(),
        })
    }

    /// Close the session with the survey answers and refresh the badges.
    ///
    /// # Errors
    ///
    /// Returns `JourneyError::NoActiveSession` or `JourneyError::Rating`
    /// without any request. Returns `JourneyError::Storage` on write failure.
    pub async fn complete_session(
        &self,
        state: &mut JourneyState,
        snapshot: &mut JourneySnapshot,
    ) -> Result<Session, JourneyError> {
        let session_id = snapshot
            .active_session
            .as_ref()
            .map(|session| session.id)
            .ok_or(JourneyError::NoActiveSession)?;
        let rating = state.rating()?;

        let record = CompleteSessionRecord::new(rating, state.final_reflection());
        let session = self
            .sessions
            .complete_session(session_id, &record)
            .await
            .map_err(|err| {
                warn!(session_id = %session_id, error = %err, "failed to complete session");
                err
            })?;
        info!(session_id = %session.id, rating = rating.value(), "journey completed");

        state.finish_session();
        match self.load_snapshot().await {
            Ok(fresh) => *snapshot = fresh,
            Err(err) => {
                warn!(session_id = %session.id, error = %err, "re-fetch after journey completion failed");
                snapshot.active_session = None;
                snapshot.progress.clear();
                if let Err(err) = self.refresh_badges(snapshot).await {
                    warn!(error = %err, "badge list left stale");
                }
            }
        }
        Ok(session)
    }

    /// Re-fetch progress after a successful write. When the read fails the
    /// written record is merged into the snapshot instead, so the write is
    /// never reported as failed.
    async fn refresh_progress_or_keep(&self, snapshot: &mut JourneySnapshot, written: SectionProgress) {
        if let Err(err) = self.refresh_progress(snapshot).await {
            warn!(progress_id = %written.id, error = %err, "re-fetch after progress write failed");
            snapshot.upsert_progress(written);
        }
    }
}

/// The tracked record id, as long as the server still lists it as open.
fn tracked_open_record(state: &JourneyState, snapshot: &JourneySnapshot) -> Option<ProgressId> {
    let id = state.active_progress_id()?;
    snapshot
        .progress
        .iter()
        .any(|record| record.id == id && !record.is_completed)
        .then_some(id)
}
