use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;

use crate::models::{Decision, DecisionStatus, Dog, DogPatch, NewDog, Preferences, User, UserPreference};
use crate::services::store::{Store, StoreError};

#[derive(Default)]
struct MemoryState {
    users: BTreeMap<i64, User>,
    preferences: HashMap<i64, UserPreference>,
    dogs: BTreeMap<i64, Dog>,
    decisions: HashMap<(i64, i64), Decision>,
    next_user_id: i64,
    next_dog_id: i64,
}

/// In-process store used for tests and single-node local runs
///
/// All writes take the state lock, so compound writes (user plus
/// preference, decision upsert) are atomic.
#[derive(Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn create_user(
        &self,
        username: &str,
        password_hash: &str,
        preferences: &Preferences,
    ) -> Result<User, StoreError> {
        let mut state = self.state.write().await;

        if state.users.values().any(|user| user.username == username) {
            return Err(StoreError::Conflict(format!(
                "username {} is already taken",
                username
            )));
        }

        state.next_user_id += 1;
        let user = User {
            id: state.next_user_id,
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            created_at: chrono::Utc::now(),
        };
        state.users.insert(user.id, user.clone());
        state.preferences.insert(
            user.id,
            UserPreference {
                user_id: user.id,
                preferences: preferences.clone(),
            },
        );

        Ok(user)
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let state = self.state.read().await;
        Ok(state
            .users
            .values()
            .find(|user| user.username == username)
            .cloned())
    }

    async fn get_preference(&self, user_id: i64) -> Result<Option<UserPreference>, StoreError> {
        let state = self.state.read().await;
        Ok(state.preferences.get(&user_id).cloned())
    }

    async fn update_preference(
        &self,
        user_id: i64,
        preferences: &Preferences,
    ) -> Result<Option<UserPreference>, StoreError> {
        let mut state = self.state.write().await;
        let Some(record) = state.preferences.get_mut(&user_id) else {
            return Ok(None);
        };

        record.preferences.age = preferences.age.clone();
        record.preferences.gender = preferences.gender.clone();
        record.preferences.size = preferences.size.clone();

        Ok(Some(record.clone()))
    }

    async fn list_dogs(&self) -> Result<Vec<Dog>, StoreError> {
        let state = self.state.read().await;
        Ok(state.dogs.values().cloned().collect())
    }

    async fn candidate_dogs(&self, preferences: &Preferences) -> Result<Vec<Dog>, StoreError> {
        let state = self.state.read().await;
        Ok(state
            .dogs
            .values()
            .filter(|dog| preferences.gender.contains(&dog.gender))
            .filter(|dog| preferences.size.contains(&dog.size))
            .cloned()
            .collect())
    }

    async fn get_dog(&self, id: i64) -> Result<Option<Dog>, StoreError> {
        let state = self.state.read().await;
        Ok(state.dogs.get(&id).cloned())
    }

    async fn create_dog(&self, dog: NewDog) -> Result<Dog, StoreError> {
        let mut state = self.state.write().await;
        state.next_dog_id += 1;

        let dog = Dog {
            id: state.next_dog_id,
            name: dog.name,
            image_filename: dog.image_filename,
            breed: dog.breed,
            age: dog.age,
            gender: dog.gender,
            size: dog.size,
            sterilized: dog.sterilized,
        };
        state.dogs.insert(dog.id, dog.clone());

        Ok(dog)
    }

    async fn update_dog(&self, id: i64, patch: DogPatch) -> Result<Option<Dog>, StoreError> {
        let mut state = self.state.write().await;
        let Some(dog) = state.dogs.get_mut(&id) else {
            return Ok(None);
        };

        patch.apply_to(dog);
        Ok(Some(dog.clone()))
    }

    async fn delete_dog(&self, id: i64) -> Result<bool, StoreError> {
        let mut state = self.state.write().await;
        if state.dogs.remove(&id).is_none() {
            return Ok(false);
        }

        // Mirror ON DELETE CASCADE
        state.decisions.retain(|(_, dog_id), _| *dog_id != id);
        Ok(true)
    }

    async fn decisions_for_user(&self, user_id: i64) -> Result<Vec<Decision>, StoreError> {
        let state = self.state.read().await;
        Ok(state
            .decisions
            .values()
            .filter(|decision| decision.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn upsert_decision(
        &self,
        user_id: i64,
        dog_id: i64,
        status: DecisionStatus,
    ) -> Result<Decision, StoreError> {
        let mut state = self.state.write().await;
        if !state.dogs.contains_key(&dog_id) {
            return Err(StoreError::NotFound(format!("dog {}", dog_id)));
        }

        let decision = state
            .decisions
            .entry((user_id, dog_id))
            .or_insert(Decision {
                user_id,
                dog_id,
                status,
            });
        decision.status = status;

        Ok(decision.clone())
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Gender, Size, Sterilized};

    fn new_dog(name: &str, age: i32, gender: Gender, size: Size) -> NewDog {
        NewDog {
            name: name.to_string(),
            image_filename: String::new(),
            breed: "Mixed".to_string(),
            age,
            gender,
            size,
            sterilized: Sterilized::Unknown,
        }
    }

    #[tokio::test]
    async fn test_create_user_stores_preferences() {
        let store = MemoryStore::new();
        let user = store
            .create_user("alice", "hash", &Preferences::default())
            .await
            .unwrap();

        let pref = store.get_preference(user.id).await.unwrap().unwrap();
        assert_eq!(pref.preferences, Preferences::default());
    }

    #[tokio::test]
    async fn test_duplicate_username_conflicts() {
        let store = MemoryStore::new();
        store.create_user("alice", "hash", &Preferences::default()).await.unwrap();

        let result = store.create_user("alice", "other", &Preferences::default()).await;
        assert!(matches!(result, Err(StoreError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_upsert_decision_is_idempotent() {
        let store = MemoryStore::new();
        let dog = store.create_dog(new_dog("Rex", 10, Gender::Male, Size::Small)).await.unwrap();

        store.upsert_decision(1, dog.id, DecisionStatus::Liked).await.unwrap();
        store.upsert_decision(1, dog.id, DecisionStatus::Liked).await.unwrap();
        let decision = store.upsert_decision(1, dog.id, DecisionStatus::Disliked).await.unwrap();

        assert_eq!(decision.status, DecisionStatus::Disliked);
        let decisions = store.decisions_for_user(1).await.unwrap();
        assert_eq!(decisions.len(), 1);
        assert_eq!(decisions[0].status, DecisionStatus::Disliked);
    }

    #[tokio::test]
    async fn test_upsert_decision_for_missing_dog() {
        let store = MemoryStore::new();
        let result = store.upsert_decision(1, 42, DecisionStatus::Liked).await;
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_dog_cascades_decisions() {
        let store = MemoryStore::new();
        let dog = store.create_dog(new_dog("Rex", 10, Gender::Male, Size::Small)).await.unwrap();
        store.upsert_decision(1, dog.id, DecisionStatus::Liked).await.unwrap();

        assert!(store.delete_dog(dog.id).await.unwrap());
        assert!(!store.delete_dog(dog.id).await.unwrap());
        assert!(store.decisions_for_user(1).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_preference_leaves_sterilized() {
        let store = MemoryStore::new();
        let user = store.create_user("bob", "hash", &Preferences::default()).await.unwrap();

        let mut changed = Preferences::default();
        changed.gender = crate::models::ChoiceSet::new([Gender::Female]);
        changed.sterilized = crate::models::ChoiceSet::new([Sterilized::Yes]);

        let updated = store.update_preference(user.id, &changed).await.unwrap().unwrap();
        assert_eq!(updated.preferences.gender.to_string(), "f");
        assert_eq!(updated.preferences.sterilized.to_string(), "y,n");
        assert!(store.update_preference(999, &changed).await.unwrap().is_none());
    }
}
