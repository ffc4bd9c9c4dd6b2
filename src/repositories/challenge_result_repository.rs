use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{db::Database, errors::AppResult, models::domain::ChallengeResultRecord};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChallengeResultRepository: Send + Sync {
    async fn append(&self, record: ChallengeResultRecord) -> AppResult<()>;
    async fn find_by_submission_key(
        &self,
        user_id: &str,
        submission_key: &str,
    ) -> AppResult<Option<ChallengeResultRecord>>;
    /// Newest first.
    async fn list_for_user(
        &self,
        user_id: &str,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<ChallengeResultRecord>, i64)>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoChallengeResultRepository {
    collection: Collection<ChallengeResultRecord>,
}

impl MongoChallengeResultRepository {
    pub fn new(db: &Database, collection_name: &str) -> Self {
        let collection = db.get_collection(collection_name);
        Self { collection }
    }
}

#[async_trait]
impl ChallengeResultRepository for MongoChallengeResultRepository {
    async fn append(&self, record: ChallengeResultRecord) -> AppResult<()> {
        self.collection.insert_one(&record).await?;
        Ok(())
    }

    async fn find_by_submission_key(
        &self,
        user_id: &str,
        submission_key: &str,
    ) -> AppResult<Option<ChallengeResultRecord>> {
        let record = self
            .collection
            .find_one(doc! { "user_id": user_id, "submission_key": submission_key })
            .await?;
        Ok(record)
    }

    async fn list_for_user(
        &self,
        user_id: &str,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<ChallengeResultRecord>, i64)> {
        let filter = doc! { "user_id": user_id };

        let total = self.collection.count_documents(filter.clone()).await?;

        let records = self
            .collection
            .find(filter)
            .sort(doc! { "submitted_at_ms": -1 })
            .skip(offset.max(0) as u64)
            .limit(limit)
            .await?
            .try_collect()
            .await?;

        Ok((records, total as i64))
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for challenge_results collection");

        let submission_index = IndexModel::builder()
            .keys(doc! { "user_id": 1, "submission_key": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("user_submission_unique".to_string())
                    .build(),
            )
            .build();

        let history_index = IndexModel::builder()
            .keys(doc! { "user_id": 1, "submitted_at_ms": -1 })
            .options(
                IndexOptions::builder()
                    .name("user_history".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(submission_index).await?;
        self.collection.create_index(history_index).await?;

        log::info!("Successfully created indexes for challenge_results collection");
        Ok(())
    }
}
