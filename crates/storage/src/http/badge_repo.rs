use journey_core::model::Badge;

use super::HttpRepository;
use crate::repository::{BadgeRepository, StorageError};

#[async_trait::async_trait]
impl BadgeRepository for HttpRepository {
    async fn list_badges(&self) -> Result<Vec<Badge>, StorageError> {
        self.get_json("badges").await
    }
}
