use journey_core::model::{Session, SessionId};

use super::HttpRepository;
use crate::repository::{CompleteSessionRecord, NewSessionRecord, SessionRepository, StorageError};

#[async_trait::async_trait]
impl SessionRepository for HttpRepository {
    async fn active_session(&self) -> Result<Option<Session>, StorageError> {
        // The server answers `null` or 404 when the user has nothing in flight.
        match self.get_json::<Option<Session>>("sessions/active").await {
            Ok(session) => Ok(session),
            Err(StorageError::NotFound) => Ok(None),
            Err(err) => Err(err),
        }
    }

    async fn create_session(&self, record: &NewSessionRecord) -> Result<Session, StorageError> {
        tracing::debug!(session_type = %record.session_type, "creating session");
        self.post_json("sessions", record).await
    }

    async fn complete_session(
        &self,
        id: SessionId,
        record: &CompleteSessionRecord,
    ) -> Result<Session, StorageError> {
        tracing::debug!(session_id = %id, rating = record.final_rating, "completing session");
        self.post_json(&format!("sessions/{id}/complete"), record)
            .await
    }
}
