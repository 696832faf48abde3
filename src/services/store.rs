use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Decision, DecisionStatus, Dog, DogPatch, NewDog, Preferences, User, UserPreference};

/// Errors that can occur when reading or writing the data store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Corrupt record: {0}")]
    Corrupt(String),
}

/// Persistence contract for users, preferences, dogs and decisions
///
/// Lookups return `Ok(None)` for missing rows; `StoreError::NotFound` is
/// reserved for writes that reference a row that does not exist.
#[async_trait]
pub trait Store: Send + Sync {
    /// Insert a user together with its preference record, atomically
    async fn create_user(
        &self,
        username: &str,
        password_hash: &str,
        preferences: &Preferences,
    ) -> Result<User, StoreError>;

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    async fn get_preference(&self, user_id: i64) -> Result<Option<UserPreference>, StoreError>;

    /// Overwrite age, gender and size. Sterilized is left as stored.
    async fn update_preference(
        &self,
        user_id: i64,
        preferences: &Preferences,
    ) -> Result<Option<UserPreference>, StoreError>;

    /// All dogs ordered by id
    async fn list_dogs(&self) -> Result<Vec<Dog>, StoreError>;

    /// Dogs that may satisfy `preferences`
    ///
    /// Backends are free to return a superset; callers apply the
    /// preference filter themselves.
    async fn candidate_dogs(&self, preferences: &Preferences) -> Result<Vec<Dog>, StoreError>;

    async fn get_dog(&self, id: i64) -> Result<Option<Dog>, StoreError>;

    async fn create_dog(&self, dog: NewDog) -> Result<Dog, StoreError>;

    async fn update_dog(&self, id: i64, patch: DogPatch) -> Result<Option<Dog>, StoreError>;

    /// Returns false if no dog had this id
    async fn delete_dog(&self, id: i64) -> Result<bool, StoreError>;

    async fn decisions_for_user(&self, user_id: i64) -> Result<Vec<Decision>, StoreError>;

    /// Create or overwrite the (user, dog) decision in one atomic step
    async fn upsert_decision(
        &self,
        user_id: i64,
        dog_id: i64,
        status: DecisionStatus,
    ) -> Result<Decision, StoreError>;

    async fn health_check(&self) -> Result<bool, StoreError>;
}
