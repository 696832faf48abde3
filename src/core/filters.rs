use std::collections::HashSet;

use crate::core::age::AgeRanges;
use crate::models::{Decision, Dog, DogCategory, Preferences};

/// Check if a dog matches the user's age, gender and size preferences
///
/// The sterilized preference is stored but deliberately not applied here.
#[inline]
pub fn matches_preferences(dog: &Dog, preferences: &Preferences, ages: &AgeRanges) -> bool {
    ages.contains(dog.age)
        && preferences.gender.contains(&dog.gender)
        && preferences.size.contains(&dog.size)
}

/// Dogs the user may be shown in `category`, sorted by id ascending
///
/// `decisions` must all belong to the browsing user. For `Liked` and
/// `Disliked` only dogs carrying that status are kept; for `Undecided` any
/// dog with a decision record is dropped, whatever its status.
pub fn filter_dogs(
    dogs: Vec<Dog>,
    preferences: &Preferences,
    decisions: &[Decision],
    category: DogCategory,
) -> Vec<Dog> {
    let ages = AgeRanges::from_buckets(&preferences.age);

    let mut eligible: Vec<Dog> = match category.required_status() {
        Some(status) => {
            let wanted: HashSet<i64> = decisions
                .iter()
                .filter(|decision| decision.status == status)
                .map(|decision| decision.dog_id)
                .collect();
            dogs.into_iter()
                .filter(|dog| wanted.contains(&dog.id))
                .filter(|dog| matches_preferences(dog, preferences, &ages))
                .collect()
        }
        None => {
            let seen: HashSet<i64> = decisions.iter().map(|decision| decision.dog_id).collect();
            dogs.into_iter()
                .filter(|dog| !seen.contains(&dog.id))
                .filter(|dog| matches_preferences(dog, preferences, &ages))
                .collect()
        }
    };

    eligible.sort_by_key(|dog| dog.id);
    eligible.dedup_by_key(|dog| dog.id);
    eligible
}
