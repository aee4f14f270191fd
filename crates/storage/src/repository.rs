use async_trait::async_trait;
use chrono::{DateTime, Utc};
use journey_core::model::{
    Badge, BadgeId, ProgressId, Rating, Reflection, SectionProgress, Session, SessionId,
    SessionType,
};
use journey_core::Clock;
use serde::Serialize;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("remote returned status {0}")]
    Status(u16),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

//
// ─── WRITE RECORDS ────────────────────────────────────────────────────────────
//

/// Body of a create-session request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSessionRecord {
    pub session_type: SessionType,
    pub target_duration: u32,
}

impl NewSessionRecord {
    #[must_use]
    pub fn for_type(session_type: SessionType) -> Self {
        Self {
            session_type,
            target_duration: session_type.target_duration_minutes(),
        }
    }
}

/// Body of a create-progress request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProgressRecord {
    pub session_id: SessionId,
    pub section_name: String,
    pub section_order: u32,
    pub estimated_duration: u32,
}

/// Body of a complete-progress request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteProgressRecord {
    pub reflection_answer: String,
}

impl CompleteProgressRecord {
    #[must_use]
    pub fn from_reflection(reflection: Reflection) -> Self {
        Self {
            reflection_answer: reflection.into_inner(),
        }
    }
}

/// Body of a complete-session request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteSessionRecord {
    pub final_rating: u8,
    pub reflection_notes: String,
}

impl CompleteSessionRecord {
    #[must_use]
    pub fn new(rating: Rating, reflection_notes: impl Into<String>) -> Self {
        Self {
            final_rating: rating.value(),
            reflection_notes: reflection_notes.into(),
        }
    }
}

//
// ─── CONTRACTS ────────────────────────────────────────────────────────────────
//

/// Session endpoints of the remote API.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Fetch the current user's active session, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on transport or decode failures.
    async fn active_session(&self) -> Result<Option<Session>, StorageError>;

    /// Start a new session.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the session cannot be created.
    async fn create_session(&self, record: &NewSessionRecord) -> Result<Session, StorageError>;

    /// Close a session with the final survey answers.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the session is unknown, or other storage errors.
    async fn complete_session(
        &self,
        id: SessionId,
        record: &CompleteSessionRecord,
    ) -> Result<Session, StorageError>;
}

/// Section progress endpoints of the remote API.
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// List progress records for a session.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on transport or decode failures.
    async fn list_progress(&self, session_id: SessionId)
    -> Result<Vec<SectionProgress>, StorageError>;

    /// Record that a section was started.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be created.
    async fn create_progress(
        &self,
        record: &NewProgressRecord,
    ) -> Result<SectionProgress, StorageError>;

    /// Flag a progress record complete with the user's reflection.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the record is unknown, or other storage errors.
    async fn complete_progress(
        &self,
        id: ProgressId,
        record: &CompleteProgressRecord,
    ) -> Result<SectionProgress, StorageError>;
}

/// Badge endpoint of the remote API.
#[async_trait]
pub trait BadgeRepository: Send + Sync {
    /// List the current user's earned badges.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on transport or decode failures.
    async fn list_badges(&self) -> Result<Vec<Badge>, StorageError>;
}

//
// ─── IN-MEMORY ────────────────────────────────────────────────────────────────
//

#[derive(Default)]
struct MemoryState {
    sessions: Vec<Session>,
    progress: Vec<SectionProgress>,
    badges: Vec<Badge>,
    next_id: u64,
}

impl MemoryState {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

/// In-memory stand-in for the remote API, for tests and offline use.
///
/// Mimics the server: one active session (the latest incomplete one) and a
/// `<session_type>_complete` badge awarded whenever a session is completed.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    clock: Clock,
    state: Arc<Mutex<MemoryState>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_clock(clock: Clock) -> Self {
        Self {
            clock,
            state: Arc::new(Mutex::new(MemoryState::default())),
        }
    }

    fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, MemoryState>, StorageError> {
        self.state
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))
    }
}

#[async_trait]
impl SessionRepository for InMemoryRepository {
    async fn active_session(&self) -> Result<Option<Session>, StorageError> {
        let guard = self.lock()?;
        Ok(guard
            .sessions
            .iter()
            .rev()
            .find(|session| !session.is_completed)
            .cloned())
    }

    async fn create_session(&self, record: &NewSessionRecord) -> Result<Session, StorageError> {
        let now = self.now();
        let mut guard = self.lock()?;
        let id = SessionId::new(guard.next_id());
        let mut session = Session::new(id, record.session_type);
        session.target_duration = Some(record.target_duration);
        session.started_at = Some(now);
        guard.sessions.push(session.clone());
        Ok(session)
    }

    async fn complete_session(
        &self,
        id: SessionId,
        record: &CompleteSessionRecord,
    ) -> Result<Session, StorageError> {
        let now = self.now();
        let mut guard = self.lock()?;
        let badge_id = BadgeId::new(guard.next_id());
        let session = guard
            .sessions
            .iter_mut()
            .find(|session| session.id == id)
            .ok_or(StorageError::NotFound)?;
        if session.is_completed {
            return Err(StorageError::Conflict);
        }
        session.is_completed = true;
        session.final_rating = Some(record.final_rating);
        session.reflection_notes = Some(record.reflection_notes.clone());
        session.completed_at = Some(now);
        let updated = session.clone();

        let mut badge = Badge::new(badge_id, format!("{}_complete", updated.session_type));
        badge.earned_at = Some(now);
        guard.badges.push(badge);
        Ok(updated)
    }
}

#[async_trait]
impl ProgressRepository for InMemoryRepository {
    async fn list_progress(
        &self,
        session_id: SessionId,
    ) -> Result<Vec<SectionProgress>, StorageError> {
        let guard = self.lock()?;
        Ok(guard
            .progress
            .iter()
            .filter(|record| record.session_id == session_id)
            .cloned()
            .collect())
    }

    async fn create_progress(
        &self,
        record: &NewProgressRecord,
    ) -> Result<SectionProgress, StorageError> {
        let now = self.now();
        let mut guard = self.lock()?;
        if !guard.sessions.iter().any(|s| s.id == record.session_id) {
            return Err(StorageError::NotFound);
        }
        let id = ProgressId::new(guard.next_id());
        let progress = SectionProgress {
            id,
            session_id: record.session_id,
            section_name: record.section_name.clone(),
            section_order: record.section_order,
            estimated_duration: Some(record.estimated_duration),
            is_completed: false,
            reflection_answer: None,
            started_at: Some(now),
            completed_at: None,
        };
        guard.progress.push(progress.clone());
        Ok(progress)
    }

    async fn complete_progress(
        &self,
        id: ProgressId,
        record: &CompleteProgressRecord,
    ) -> Result<SectionProgress, StorageError> {
        let now = self.now();
        let mut guard = self.lock()?;
        let progress = guard
            .progress
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(StorageError::NotFound)?;
        progress.is_completed = true;
        progress.reflection_answer = Some(record.reflection_answer.clone());
        progress.completed_at = Some(now);
        Ok(progress.clone())
    }
}

#[async_trait]
impl BadgeRepository for InMemoryRepository {
    async fn list_badges(&self) -> Result<Vec<Badge>, StorageError> {
        Ok(self.lock()?.badges.clone())
    }
}

/// Aggregates the remote repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub sessions: Arc<dyn SessionRepository>,
    pub progress: Arc<dyn ProgressRepository>,
    pub badges: Arc<dyn BadgeRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        Self::from_in_memory(InMemoryRepository::new())
    }

    #[must_use]
    pub fn from_in_memory(repo: InMemoryRepository) -> Self {
        let sessions: Arc<dyn SessionRepository> = Arc::new(repo.clone());
        let progress: Arc<dyn ProgressRepository> = Arc::new(repo.clone());
        let badges: Arc<dyn BadgeRepository> = Arc::new(repo);
        Self {
            sessions,
            progress,
            badges,
        }
    }
}
