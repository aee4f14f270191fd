use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use journey_core::model::{
    Badge, ProgressId, SECTION_COUNT, SectionProgress, SessionId, SessionType, sections,
};
use journey_core::time::fixed_clock;
use services::{JourneyError, JourneyService, JourneySnapshot, JourneyState, JourneyView};
use storage::repository::{
    BadgeRepository, CompleteProgressRecord, InMemoryRepository, NewProgressRecord,
    ProgressRepository, SessionRepository, Storage, StorageError,
};

/// Progress repository that counts writes and can be told to fail them.
struct CountingProgress {
    inner: InMemoryRepository,
    writes: AtomicUsize,
    fail_writes: bool,
}

impl CountingProgress {
    fn new(inner: InMemoryRepository, fail_writes: bool) -> Self {
        Self {
            inner,
            writes: AtomicUsize::new(0),
            fail_writes,
        }
    }

    fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl ProgressRepository for CountingProgress {
    async fn list_progress(&self, session_id: SessionId) -> Result<Vec<SectionProgress>, StorageError> {
        self.inner.list_progress(session_id).await
    }

    async fn create_progress(
        &self,
        record: &NewProgressRecord,
    ) -> Result<SectionProgress, StorageError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes {
            return Err(StorageError::Status(500));
        }
        self.inner.create_progress(record).await
    }

    async fn complete_progress(
        &self,
        id: ProgressId,
        record: &CompleteProgressRecord,
    ) -> Result<SectionProgress, StorageError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes {
            return Err(StorageError::Status(500));
        }
        self.inner.complete_progress(id, record).await
    }
}

fn service_with(repo: &InMemoryRepository, progress: Arc<CountingProgress>) -> JourneyService {
    JourneyService::new(
        fixed_clock(),
        Arc::new(repo.clone()),
        progress,
        Arc::new(repo.clone()),
    )
}

async fn read_section(
    svc: &JourneyService,
    state: &mut JourneyState,
    snapshot: &mut JourneySnapshot,
    reflection: &str,
) {
    svc.start_section(state, snapshot).await.expect("start section");
    state.set_reflection_answer(reflection);
    svc.complete_section(state, snapshot)
        .await
        .expect("complete section");
}

#[tokio::test]
async fn starting_a_session_moves_from_setup_to_reading() {
    let svc = JourneyService::from_storage(fixed_clock(), &Storage::in_memory());
    let mut state = JourneyState::new();

    let snapshot = svc.load_snapshot().await.unwrap();
    assert_eq!(snapshot.view(&state), JourneyView::Setup);

    let (session, snapshot) = svc.start_session(&mut state).await.unwrap();
    assert_eq!(session.session_type, SessionType::FastTrack);
    assert_eq!(session.target_duration, Some(60));
    assert!(state.session_started_at().is_some());
    assert_eq!(
        snapshot.view(&state),
        JourneyView::Reading { section_index: 0 }
    );
}

#[tokio::test]
async fn blank_reflection_is_rejected_without_a_write() {
    let repo = InMemoryRepository::with_clock(fixed_clock());
    let progress = Arc::new(CountingProgress::new(repo.clone(), false));
    let svc = service_with(&repo, Arc::clone(&progress));
    let mut state = JourneyState::new();
    let (_, mut snapshot) = svc.start_session(&mut state).await.unwrap();

    svc.start_section(&mut state, &mut snapshot).await.unwrap();
    assert_eq!(progress.writes(), 1);

    for blank in ["", "   ", "\n\t"] {
        state.set_reflection_answer(blank);
        let err = svc
            .complete_section(&mut state, &mut snapshot)
            .await
            .unwrap_err();
        assert!(matches!(err, JourneyError::EmptyReflection));
        assert!(err.is_validation());
    }

    assert_eq!(progress.writes(), 1);
    assert!(state.is_reading());
    assert_eq!(state.current_section_index(), 0);
}

#[tokio::test]
async fn failed_write_leaves_local_state_unchanged() {
    let repo = InMemoryRepository::new();
    let progress = Arc::new(CountingProgress::new(repo.clone(), true));
    let svc = service_with(&repo, Arc::clone(&progress));
    let mut state = JourneyState::new();
    let (_, mut snapshot) = svc.start_session(&mut state).await.unwrap();

    let err = svc
        .start_section(&mut state, &mut snapshot)
        .await
        .unwrap_err();
    assert!(!err.is_validation());
    assert!(!state.is_reading());
    assert!(state.active_progress_id().is_none());
    assert_eq!(progress.writes(), 1);
}

#[tokio::test]
async fn five_sections_show_83_percent_and_the_sixth_opens_the_survey() {
    let repo = InMemoryRepository::new();
    let progress = Arc::new(CountingProgress::new(repo.clone(), false));
    let svc = service_with(&repo, progress);
    let mut state = JourneyState::new();
    let (_, mut snapshot) = svc.start_session(&mut state).await.unwrap();

    let mut last_percent = 0;
    for (i, section) in sections().iter().take(5).enumerate() {
        read_section(&svc, &mut state, &mut snapshot, section.title).await;
        let percent = snapshot.progress_summary().percent_rounded();
        assert!(percent >= last_percent);
        last_percent = percent;
        assert_eq!(state.current_section_index(), i + 1);
    }
    assert_eq!(snapshot.progress_summary().completed, 5);
    assert_eq!(snapshot.progress_summary().percent_rounded(), 83);
    assert_eq!(
        snapshot.view(&state),
        JourneyView::Reading { section_index: 5 }
    );

    svc.start_section(&mut state, &mut snapshot).await.unwrap();
    state.set_reflection_answer("Come, Lord Jesus");
    let outcome = svc
        .complete_section(&mut state, &mut snapshot)
        .await
        .unwrap();
    assert!(outcome.journey_finished);
    assert_eq!(outcome.completed.section_name, "Future Hope");
    assert_eq!(snapshot.progress_summary().completed, SECTION_COUNT);
    assert_eq!(snapshot.progress_summary().percent_rounded(), 100);
    assert_eq!(state.current_section_index(), SECTION_COUNT - 1);
    assert_eq!(snapshot.view(&state), JourneyView::CompletionSurvey);
}

#[tokio::test]
async fn zero_rating_is_rejected_and_a_real_rating_closes_the_journey() {
    let repo = InMemoryRepository::new();
    let progress = Arc::new(CountingProgress::new(repo.clone(), false));
    let svc = service_with(&repo, progress);
    let mut state = JourneyState::new();
    state.select_session_type(SessionType::FastTrack);
    let (_, mut snapshot) = svc.start_session(&mut state).await.unwrap();
    for section in sections() {
        read_section(&svc, &mut state, &mut snapshot, section.reflection_question).await;
    }
    assert_eq!(snapshot.view(&state), JourneyView::CompletionSurvey);

    let err = svc
        .complete_session(&mut state, &mut snapshot)
        .await
        .unwrap_err();
    assert!(matches!(err, JourneyError::Rating(_)));
    assert!(snapshot.active_session.is_some());
    assert!(snapshot.badges.is_empty());

    state.set_final_rating(4);
    state.set_final_reflection("Loved it");
    let session = svc
        .complete_session(&mut state, &mut snapshot)
        .await
        .unwrap();

    assert!(session.is_completed);
    assert_eq!(session.final_rating, Some(4));
    assert_eq!(session.reflection_notes.as_deref(), Some("Loved it"));
    assert!(snapshot.active_session.is_none());
    assert_eq!(snapshot.badges.len(), 1);
    assert_eq!(snapshot.badges[0].badge_type, "fast_track_complete");
    assert_eq!(snapshot.view(&state), JourneyView::Setup);
    assert_eq!(state.final_rating(), 0);
}

#[tokio::test]
async fn empty_final_reflection_is_accepted() {
    let svc = JourneyService::in_memory(fixed_clock());
    let mut state = JourneyState::new();
    let (_, mut snapshot) = svc.start_session(&mut state).await.unwrap();
    for section in sections() {
        read_section(&svc, &mut state, &mut snapshot, section.title).await;
    }
    state.set_final_rating(1);
    let session = svc
        .complete_session(&mut state, &mut snapshot)
        .await
        .unwrap();
    assert_eq!(session.reflection_notes.as_deref(), Some(""));
}

#[tokio::test]
async fn completing_falls_back_to_name_lookup_after_a_restart() {
    let repo = InMemoryRepository::new();
    let progress = Arc::new(CountingProgress::new(repo.clone(), false));
    let svc = service_with(&repo, progress);
    let mut state = JourneyState::new();
    let (_, mut snapshot) = svc.start_session(&mut state).await.unwrap();
    let started = svc.start_section(&mut state, &mut snapshot).await.unwrap();

    // A fresh screen knows nothing about the record it started earlier.
    let mut fresh = JourneyState::new();
    let mut snapshot = svc.load_snapshot().await.unwrap();
    fresh.resume_from(&snapshot.progress);
    fresh.set_reflection_answer("picked up where I left off");
    let outcome = svc
        .complete_section(&mut fresh, &mut snapshot)
        .await
        .unwrap();
    assert_eq!(outcome.completed.id, started);
    assert_eq!(fresh.current_section_index(), 1);
}

#[tokio::test]
async fn completing_an_unstarted_section_is_rejected() {
    let repo = InMemoryRepository::new();
    let progress = Arc::new(CountingProgress::new(repo.clone(), false));
    let svc = service_with(&repo, Arc::clone(&progress));
    let mut state = JourneyState::new();
    let (_, mut snapshot) = svc.start_session(&mut state).await.unwrap();

    state.set_reflection_answer("skipped ahead");
    let err = svc
        .complete_section(&mut state, &mut snapshot)
        .await
        .unwrap_err();
    assert!(matches!(err, JourneyError::SectionNotStarted));
    assert_eq!(progress.writes(), 0);
}

/// Read side that can be told to fail: the next `n` progress listings, and
/// badge listings while the flag is set. Writes always reach the store.
struct FlakyReads {
    inner: InMemoryRepository,
    failing_progress_reads: AtomicUsize,
    fail_badges: AtomicBool,
}

impl FlakyReads {
    fn new(inner: InMemoryRepository) -> Self {
        Self {
            inner,
            failing_progress_reads: AtomicUsize::new(0),
            fail_badges: AtomicBool::new(false),
        }
    }

    fn fail_next_progress_reads(&self, n: usize) {
        self.failing_progress_reads.store(n, Ordering::SeqCst);
    }

    fn fail_badges(&self, fail: bool) {
        self.fail_badges.store(fail, Ordering::SeqCst);
    }
}

#[async_trait::async_trait]
impl ProgressRepository for FlakyReads {
    async fn list_progress(&self, session_id: SessionId) -> Result<Vec<SectionProgress>, StorageError> {
        let remaining = self.failing_progress_reads.load(Ordering::SeqCst);
        if remaining > 0 {
            self.failing_progress_reads.store(remaining - 1, Ordering::SeqCst);
            return Err(StorageError::Status(503));
        }
        self.inner.list_progress(session_id).await
    }

    async fn create_progress(
        &self,
        record: &NewProgressRecord,
    ) -> Result<SectionProgress, StorageError> {
        self.inner.create_progress(record).await
    }

    async fn complete_progress(
        &self,
        id: ProgressId,
        record: &CompleteProgressRecord,
    ) -> Result<SectionProgress, StorageError> {
        self.inner.complete_progress(id, record).await
    }
}

#[async_trait::async_trait]
impl BadgeRepository for FlakyReads {
    async fn list_badges(&self) -> Result<Vec<Badge>, StorageError> {
        if self.fail_badges.load(Ordering::SeqCst) {
            return Err(StorageError::Status(503));
        }
        self.inner.list_badges().await
    }
}

fn flaky_service(repo: &InMemoryRepository) -> (JourneyService, Arc<FlakyReads>) {
    let reads = Arc::new(FlakyReads::new(repo.clone()));
    let svc = JourneyService::new(
        fixed_clock(),
        Arc::new(repo.clone()),
        Arc::clone(&reads) as Arc<dyn ProgressRepository>,
        Arc::clone(&reads) as Arc<dyn BadgeRepository>,
    );
    (svc, reads)
}

async fn open_records_named(repo: &InMemoryRepository, session_id: SessionId, name: &str) -> usize {
    repo.list_progress(session_id)
        .await
        .unwrap()
        .iter()
        .filter(|record| record.section_name == name && !record.is_completed)
        .count()
}

#[tokio::test]
async fn session_start_succeeds_when_the_follow_up_read_fails() {
    let repo = InMemoryRepository::new();
    let (svc, reads) = flaky_service(&repo);
    reads.fail_badges(true);
    let mut state = JourneyState::new();

    let (session, snapshot) = svc.start_session(&mut state).await.unwrap();

    assert_eq!(snapshot.active_session.as_ref().map(|s| s.id), Some(session.id));
    assert_eq!(snapshot.view(&state), JourneyView::Reading { section_index: 0 });
    let active = repo.active_session().await.unwrap().map(|s| s.id);
    assert_eq!(active, Some(session.id));
}

#[tokio::test]
async fn section_start_keeps_the_created_record_when_the_refresh_fails() {
    let repo = InMemoryRepository::new();
    let (svc, reads) = flaky_service(&repo);
    let mut state = JourneyState::new();
    let (session, mut snapshot) = svc.start_session(&mut state).await.unwrap();

    reads.fail_next_progress_reads(1);
    let started = svc.start_section(&mut state, &mut snapshot).await.unwrap();
    assert!(state.is_reading());
    assert_eq!(snapshot.open_record_for(0).map(|r| r.id), Some(started));

    // Pausing and resuming targets the same record instead of opening another.
    state.pause();
    let resumed = svc.start_section(&mut state, &mut snapshot).await.unwrap();
    assert_eq!(resumed, started);
    assert_eq!(open_records_named(&repo, session.id, "Creation").await, 1);

    state.set_reflection_answer("In the beginning");
    let outcome = svc.complete_section(&mut state, &mut snapshot).await.unwrap();
    assert_eq!(outcome.completed.id, started);
    assert_eq!(open_records_named(&repo, session.id, "Creation").await, 0);
}

#[tokio::test]
async fn section_completion_is_reported_when_the_refresh_fails() {
    let repo = InMemoryRepository::new();
    let (svc, reads) = flaky_service(&repo);
    let mut state = JourneyState::new();
    let (_, mut snapshot) = svc.start_session(&mut state).await.unwrap();
    svc.start_section(&mut state, &mut snapshot).await.unwrap();

    reads.fail_next_progress_reads(1);
    state.set_reflection_answer("He made us");
    let outcome = svc.complete_section(&mut state, &mut snapshot).await.unwrap();

    assert!(!outcome.journey_finished);
    assert_eq!(state.current_section_index(), 1);
    assert_eq!(snapshot.progress.len(), 1);
    assert!(snapshot.progress[0].is_completed);
    assert_eq!(snapshot.progress_summary().completed, 1);
}

#[tokio::test]
async fn journey_completion_is_reported_when_the_refresh_fails() {
    let repo = InMemoryRepository::new();
    let (svc, reads) = flaky_service(&repo);
    let mut state = JourneyState::new();
    let (_, mut snapshot) = svc.start_session(&mut state).await.unwrap();
    for section in sections() {
        read_section(&svc, &mut state, &mut snapshot, section.title).await;
    }
    assert_eq!(snapshot.view(&state), JourneyView::CompletionSurvey);

    reads.fail_badges(true);
    state.set_final_rating(4);
    let session = svc
        .complete_session(&mut state, &mut snapshot)
        .await
        .unwrap();

    assert!(session.is_completed);
    assert!(snapshot.active_session.is_none());
    assert_eq!(snapshot.view(&state), JourneyView::Setup);
    assert!(repo.active_session().await.unwrap().is_none());

    reads.fail_badges(false);
    svc.refresh_badges(&mut snapshot).await.unwrap();
    assert_eq!(snapshot.badges.len(), 1);
}
