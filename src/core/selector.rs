use crate::core::filters::filter_dogs;
use crate::models::{Decision, Dog, DogCategory, Preferences};

/// Result of a "next dog" lookup
#[derive(Debug)]
pub struct NextDog {
    /// First eligible dog after the cursor, if any
    pub dog: Option<Dog>,
    /// Number of dogs eligible in the category, before the cursor is applied
    pub total_candidates: usize,
}

/// First dog in an id-sorted sequence whose id is strictly greater than `cursor`
///
/// The cursor does not need to be part of the sequence.
pub fn next_after(sorted: &[Dog], cursor: i64) -> Option<&Dog> {
    let start = sorted.partition_point(|dog| dog.id <= cursor);
    sorted.get(start)
}

/// Filter `candidates` for the user, then step past `cursor`
///
/// # Pipeline
/// 1. Preference filter (age buckets, gender, size)
/// 2. Category filter against the user's decisions
/// 3. Sort by id
/// 4. Cursor
pub fn select_next(
    candidates: Vec<Dog>,
    preferences: &Preferences,
    decisions: &[Decision],
    category: DogCategory,
    cursor: i64,
) -> NextDog {
    let eligible = filter_dogs(candidates, preferences, decisions, category);
    let total_candidates = eligible.len();
    let dog = next_after(&eligible, cursor).cloned();

    NextDog {
        dog,
        total_candidates,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DecisionStatus, Gender, Size, Sterilized};

    fn create_test_dog(id: i64) -> Dog {
        Dog {
            id,
            name: format!("Dog {}", id),
            image_filename: String::new(),
            breed: "Mixed".to_string(),
            age: 24,
            gender: Gender::Female,
            size: Size::Medium,
            sterilized: Sterilized::Yes,
        }
    }

    #[test]
    fn test_next_after_skips_cursor() {
        let dogs: Vec<Dog> = [2, 5, 9].into_iter().map(create_test_dog).collect();

        assert_eq!(next_after(&dogs, -1).map(|d| d.id), Some(2));
        assert_eq!(next_after(&dogs, 0).map(|d| d.id), Some(2));
        assert_eq!(next_after(&dogs, 2).map(|d| d.id), Some(5));
        assert_eq!(next_after(&dogs, 3).map(|d| d.id), Some(5));
        assert_eq!(next_after(&dogs, 9).map(|d| d.id), None);
        assert_eq!(next_after(&[], 0).map(|d| d.id), None);
    }

    #[test]
    fn test_next_never_returns_id_at_or_below_cursor() {
        let dogs: Vec<Dog> = (1..=20).map(create_test_dog).collect();
        for cursor in -2..=22 {
            if let Some(dog) = next_after(&dogs, cursor) {
                assert!(dog.id > cursor);
                assert_eq!(dog.id, cursor.max(0) + 1);
            } else {
                assert!(cursor >= 20);
            }
        }
    }

    #[test]
    fn test_select_next_walks_unseen_dogs() {
        let dogs: Vec<Dog> = [4, 1, 3, 2].into_iter().map(create_test_dog).collect();
        let decisions = vec![Decision {
            user_id: 1,
            dog_id: 2,
            status: DecisionStatus::Liked,
        }];
        let prefs = Preferences::default();

        let first = select_next(dogs.clone(), &prefs, &decisions, DogCategory::Undecided, 0);
        assert_eq!(first.total_candidates, 3);
        assert_eq!(first.dog.map(|d| d.id), Some(1));

        let second = select_next(dogs.clone(), &prefs, &decisions, DogCategory::Undecided, 1);
        assert_eq!(second.dog.map(|d| d.id), Some(3));

        let liked = select_next(dogs, &prefs, &decisions, DogCategory::Liked, 0);
        assert_eq!(liked.total_candidates, 1);
        assert_eq!(liked.dog.map(|d| d.id), Some(2));
    }
}
