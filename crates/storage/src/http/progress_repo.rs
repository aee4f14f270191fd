use journey_core::model::{ProgressId, SectionProgress, SessionId};

use super::HttpRepository;
use crate::repository::{
    CompleteProgressRecord, NewProgressRecord, ProgressRepository, StorageError,
};

#[async_trait::async_trait]
impl ProgressRepository for HttpRepository {
    async fn list_progress(
        &self,
        session_id: SessionId,
    ) -> Result<Vec<SectionProgress>, StorageError> {
        self.get_json(&format!("sessions/{session_id}/progress"))
            .await
    }

    async fn create_progress(
        &self,
        record: &NewProgressRecord,
    ) -> Result<SectionProgress, StorageError> {
        tracing::debug!(
            session_id = %record.session_id,
            section = %record.section_name,
            order = record.section_order,
            "creating section progress"
        );
        self.post_json("progress", record).await
    }

    async fn complete_progress(
        &self,
        id: ProgressId,
        record: &CompleteProgressRecord,
    ) -> Result<SectionProgress, StorageError> {
        tracing::debug!(progress_id = %id, "completing section progress");
        self.post_json(&format!("progress/{id}/complete"), record)
            .await
    }
}
