use std::sync::Arc;

use journey_core::model::{Session, SessionId, SessionType, sections};
use storage::repository::{
    CompleteProgressRecord, CompleteSessionRecord, InMemoryRepository, NewProgressRecord,
    NewSessionRecord, ProgressRepository, SessionRepository, Storage, StorageError,
};

use super::test_harness::{ViewKind, setup_view_harness, setup_view_harness_with_storage};
use crate::vm::JourneyIntent;
use journey_core::model::{Rating, Reflection};
use services::JourneyView;

async fn seed_session(repo: &InMemoryRepository, session_type: SessionType) -> Session {
    repo.create_session(&NewSessionRecord::for_type(session_type))
        .await
        .expect("create session")
}

async fn seed_completed_sections(repo: &InMemoryRepository, session_id: SessionId, count: usize) {
    for (index, section) in sections().iter().take(count).enumerate() {
        let created = repo
            .create_progress(&NewProgressRecord {
                session_id,
                section_name: section.title.to_string(),
                section_order: u32::try_from(index + 1).expect("order fits"),
                estimated_duration: section.estimated_minutes,
            })
            .await
            .expect("create progress");
        let reflection = Reflection::new(format!("notes on {}", section.title)).expect("reflection");
        repo.complete_progress(created.id, &CompleteProgressRecord::from_reflection(reflection))
            .await
            .expect("complete progress");
    }
}

#[tokio::test(flavor = "current_thread")]
async fn journey_view_smoke_renders_setup_without_session() {
    let mut harness = setup_view_harness(ViewKind::Journey);
    harness.rebuild();
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("Experience the complete story"), "missing subtitle in {html}");
    assert!(html.contains("Fast Track (6 Hours)"), "missing fast track in {html}");
    assert!(html.contains("Full Immersion (10 Hours)"), "missing immersion in {html}");
    assert!(html.contains("Begin Your Journey"), "missing start button in {html}");
    assert!(!html.contains("Your Achievements"), "unexpected badges in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn journey_view_smoke_lists_earned_badges_on_setup() {
    let mut harness = setup_view_harness(ViewKind::Journey);
    let session = seed_session(&harness.repo, SessionType::FastTrack).await;
    let rating = Rating::new(5).expect("rating");
    harness
        .repo
        .complete_session(session.id, &CompleteSessionRecord::new(rating, ""))
        .await
        .expect("complete session");

    harness.rebuild();
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Your Achievements"), "missing badges in {html}");
    assert!(html.contains("FAST TRACK_COMPLETE"), "missing badge label in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn journey_view_smoke_resumes_reading_at_next_section() {
    let mut harness = setup_view_harness(ViewKind::Journey);
    let session = seed_session(&harness.repo, SessionType::FastTrack).await;
    seed_completed_sections(&harness.repo, session.id, 5).await;

    harness.rebuild();
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Progress: 5 of 6 sections"), "missing progress in {html}");
    assert!(html.contains("83% complete"), "missing percent in {html}");
    assert!(html.contains("Future Hope"), "missing sixth section in {html}");
    assert!(html.contains("Start Reading"), "missing start reading in {html}");
    assert!(html.contains("Your Progress"), "missing progress list in {html}");
    assert!(html.contains("Fast Track"), "missing session label in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn journey_view_smoke_shows_survey_when_all_sections_are_done() {
    let mut harness = setup_view_harness(ViewKind::Journey);
    let session = seed_session(&harness.repo, SessionType::FullImmersion).await;
    seed_completed_sections(&harness.repo, session.id, sections().len()).await;

    harness.rebuild();
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Rate Your Experience (1-5 stars)"), "missing survey in {html}");
    assert!(html.contains("Complete Journey"), "missing submit in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn journey_view_smoke_starts_a_session_and_reads_a_section() {
    let mut harness = setup_view_harness(ViewKind::Journey);
    harness.rebuild();
    harness.settle().await;

    harness.dispatch(JourneyIntent::StartSession);
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Session Started!"), "missing notice in {html}");
    assert!(html.contains("Progress: 0 of 6 sections"), "missing progress in {html}");
    assert!(html.contains("Creation"), "missing first section in {html}");

    harness.dispatch(JourneyIntent::StartSection);
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Reflection Question:"), "missing reflection prompt in {html}");
    assert!(html.contains("created in God"), "missing question in {html}");

    harness.dispatch(JourneyIntent::CompleteSection);
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Reflection Required"), "missing validation notice in {html}");

    harness.dispatch(JourneyIntent::EditReflection("In His image".to_string()));
    harness.dispatch(JourneyIntent::CompleteSection);
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Section Complete!"), "missing success notice in {html}");
    assert!(html.contains("Progress: 1 of 6 sections"), "missing progress in {html}");
    assert!(html.contains("Fall &amp; Promise") || html.contains("Fall & Promise"), "missing second section in {html}");

    let vm = harness.vm().expect("vm loaded");
    assert_eq!(vm.view(), JourneyView::Reading { section_index: 1 });
    let stored = harness
        .journey
        .load_snapshot()
        .await
        .expect("snapshot");
    assert_eq!(stored.progress.len(), 1);
    assert!(stored.progress[0].is_completed);
}

struct FailingSessions;

#[async_trait::async_trait]
impl SessionRepository for FailingSessions {
    async fn active_session(&self) -> Result<Option<Session>, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn create_session(&self, _record: &NewSessionRecord) -> Result<Session, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn complete_session(
        &self,
        _id: SessionId,
        _record: &CompleteSessionRecord,
    ) -> Result<Session, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }
}

#[tokio::test(flavor = "current_thread")]
async fn journey_view_smoke_renders_error_state() {
    let repo = InMemoryRepository::new();
    let mut storage = Storage::from_in_memory(repo.clone());
    storage.sessions = Arc::new(FailingSessions);

    let mut harness = setup_view_harness_with_storage(ViewKind::Journey, repo, &storage);
    harness.rebuild();
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Something went wrong"), "missing error in {html}");
    assert!(html.contains("Retry"), "missing retry in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn achievements_view_smoke_renders_empty_and_earned() {
    let mut harness = setup_view_harness(ViewKind::Achievements);
    harness.rebuild();
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("No badges yet"), "missing empty state in {html}");

    let mut harness = setup_view_harness(ViewKind::Achievements);
    let session = seed_session(&harness.repo, SessionType::DeepDive).await;
    let rating = Rating::new(3).expect("rating");
    harness
        .repo
        .complete_session(session.id, &CompleteSessionRecord::new(rating, "ok"))
        .await
        .expect("complete session");
    harness.rebuild();
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("DEEP DIVE_COMPLETE"), "missing badge in {html}");
    assert!(html.contains("Earned 2023-11-14"), "missing date in {html}");
}
