use async_trait::async_trait;
use mongodb::{
    bson::doc,
    error::{ErrorKind, WriteFailure},
    options::IndexOptions,
    Collection, IndexModel,
};

use crate::{db::Database, errors::AppResult, models::domain::PlayerRating};

const DUPLICATE_KEY_ERROR: i32 = 11000;

/// Outcome of a conditional rating write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingWrite {
    Applied,
    /// The stored version moved since it was read; nothing was written.
    Conflict,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RatingRepository: Send + Sync {
    async fn find_by_user_id(&self, user_id: &str) -> AppResult<Option<PlayerRating>>;
    /// Stores `rating` only if the persisted version still equals `expected_version`.
    /// `None` means no document existed when the rating was read.
    async fn save_if_version(
        &self,
        rating: &PlayerRating,
        expected_version: Option<i64>,
    ) -> AppResult<RatingWrite>;
    async fn count_players(&self) -> AppResult<u64>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoRatingRepository {
    collection: Collection<PlayerRating>,
}

impl MongoRatingRepository {
    pub fn new(db: &Database, collection_name: &str) -> Self {
        let collection = db.get_collection(collection_name);
        Self { collection }
    }
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        *err.kind,
        ErrorKind::Write(WriteFailure::WriteError(ref write_error))
            if write_error.code == DUPLICATE_KEY_ERROR
    )
}

#[async_trait]
impl RatingRepository for MongoRatingRepository {
    async fn find_by_user_id(&self, user_id: &str) -> AppResult<Option<PlayerRating>> {
        let rating = self
            .collection
            .find_one(doc! { "user_id": user_id })
            .await?;
        Ok(rating)
    }

    async fn save_if_version(
        &self,
        rating: &PlayerRating,
        expected_version: Option<i64>,
    ) -> AppResult<RatingWrite> {
        match expected_version {
            None => match self.collection.insert_one(rating).await {
                Ok(_) => Ok(RatingWrite::Applied),
                Err(err) if is_duplicate_key(&err) => Ok(RatingWrite::Conflict),
                Err(err) => Err(err.into()),
            },
            Some(version) => {
                let result = self
                    .collection
                    .replace_one(
                        doc! { "user_id": &rating.user_id, "version": version },
                        rating,
                    )
                    .await?;

                if result.matched_count == 0 {
                    Ok(RatingWrite::Conflict)
                } else {
                    Ok(RatingWrite::Applied)
                }
            }
        }
    }

    async fn count_players(&self) -> AppResult<u64> {
        let count = self.collection.estimated_document_count().await?;
        Ok(count)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        let model = IndexModel::builder()
            .keys(doc! { "user_id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("user_id_unique".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(model).await?;
        log::info!("Created unique index on player_ratings.user_id");

        Ok(())
    }
}
