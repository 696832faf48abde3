// Unit tests for Pugorugh

use pugorugh::core::{
    age::{bucket_for, months, AgeRanges},
    filters::{filter_dogs, matches_preferences},
    selector::{next_after, select_next},
};
use pugorugh::models::{
    AgeBucket, ChoiceSet, Decision, DecisionStatus, Dog, DogCategory, Gender, Preferences, Size,
    Sterilized,
};

fn dog(id: i64, age: i32, gender: Gender, size: Size) -> Dog {
    Dog {
        id,
        name: format!("Dog {}", id),
        image_filename: format!("{}.jpg", id),
        breed: "unknown breed".to_string(),
        age,
        gender,
        size,
        sterilized: Sterilized::Unknown,
    }
}

fn decision(dog_id: i64, status: DecisionStatus) -> Decision {
    Decision {
        user_id: 1,
        dog_id,
        status,
    }
}

fn ids(dogs: &[Dog]) -> Vec<i64> {
    dogs.iter().map(|d| d.id).collect()
}

#[test]
fn test_age_buckets_are_half_open() {
    assert_eq!(bucket_for(0), Some(AgeBucket::Baby));
    assert_eq!(bucket_for(11), Some(AgeBucket::Baby));
    assert_eq!(bucket_for(12), Some(AgeBucket::Young));
    assert_eq!(bucket_for(35), Some(AgeBucket::Young));
    assert_eq!(bucket_for(36), Some(AgeBucket::Adult));
    assert_eq!(bucket_for(107), Some(AgeBucket::Adult));
    assert_eq!(bucket_for(108), Some(AgeBucket::Senior));
    assert_eq!(bucket_for(199), Some(AgeBucket::Senior));
    assert_eq!(bucket_for(200), None);
    assert_eq!(bucket_for(-1), None);

    assert_eq!(months(AgeBucket::Adult), 36..108);
}

#[test]
fn test_age_ranges_union() {
    let buckets: ChoiceSet<AgeBucket> = "b,s".parse().unwrap();
    let ranges = AgeRanges::from_buckets(&buckets);

    assert!(ranges.contains(5));
    assert!(ranges.contains(150));
    assert!(!ranges.contains(24));
    assert!(!ranges.contains(250));
}

#[test]
fn test_sterilized_is_not_a_filter() {
    let mut prefs = Preferences::default();
    prefs.sterilized = "y".parse().unwrap();
    let ages = AgeRanges::from_buckets(&prefs.age);

    let mut candidate = dog(1, 10, Gender::Male, Size::Small);
    candidate.sterilized = Sterilized::No;

    assert!(matches_preferences(&candidate, &prefs, &ages));
}

#[test]
fn test_unknown_gender_and_size_never_match_defaults() {
    let prefs = Preferences::default();
    let ages = AgeRanges::from_buckets(&prefs.age);

    assert!(!matches_preferences(&dog(1, 10, Gender::Unknown, Size::Small), &prefs, &ages));
    assert!(!matches_preferences(&dog(2, 10, Gender::Male, Size::Unknown), &prefs, &ages));
}

#[test]
fn test_categories_partition_by_decision() {
    let dogs = vec![
        dog(4, 10, Gender::Male, Size::Small),
        dog(1, 20, Gender::Female, Size::Medium),
        dog(3, 40, Gender::Female, Size::Large),
        dog(2, 120, Gender::Male, Size::ExtraLarge),
    ];
    let decisions = vec![
        decision(1, DecisionStatus::Liked),
        decision(2, DecisionStatus::Disliked),
        decision(3, DecisionStatus::Undecided),
    ];
    let prefs = Preferences::default();

    let liked = filter_dogs(dogs.clone(), &prefs, &decisions, DogCategory::Liked);
    let disliked = filter_dogs(dogs.clone(), &prefs, &decisions, DogCategory::Disliked);
    let unseen = filter_dogs(dogs, &prefs, &decisions, DogCategory::Undecided);

    assert_eq!(ids(&liked), vec![1]);
    assert_eq!(ids(&disliked), vec![2]);
    // Dog 3 carries an explicit undecided record and is left out of the unseen pile
    assert_eq!(ids(&unseen), vec![4]);
}

#[test]
fn test_filter_output_is_sorted_and_unique() {
    let dogs = vec![
        dog(9, 10, Gender::Male, Size::Small),
        dog(2, 10, Gender::Male, Size::Small),
        dog(9, 10, Gender::Male, Size::Small),
        dog(5, 10, Gender::Male, Size::Small),
    ];

    let result = filter_dogs(dogs, &Preferences::default(), &[], DogCategory::Undecided);

    assert_eq!(ids(&result), vec![2, 5, 9]);
}

#[test]
fn test_next_after_cursor_outside_sequence() {
    let sorted = vec![
        dog(3, 10, Gender::Male, Size::Small),
        dog(7, 10, Gender::Male, Size::Small),
    ];

    assert_eq!(next_after(&sorted, -1).map(|d| d.id), Some(3));
    assert_eq!(next_after(&sorted, 4).map(|d| d.id), Some(7));
    assert_eq!(next_after(&sorted, 7).map(|d| d.id), None);
    assert!(next_after(&[], 0).is_none());
}

#[test]
fn test_select_next_walks_the_whole_category() {
    let dogs: Vec<Dog> = (1..=5)
        .rev()
        .map(|id| dog(id, 10, Gender::Female, Size::Medium))
        .collect();
    let prefs = Preferences::default();

    let mut cursor = 0;
    let mut seen = Vec::new();
    loop {
        let next = select_next(dogs.clone(), &prefs, &[], DogCategory::Undecided, cursor);
        assert_eq!(next.total_candidates, 5);
        match next.dog {
            Some(d) => {
                cursor = d.id;
                seen.push(d.id);
            }
            None => break,
        }
    }

    assert_eq!(seen, vec![1, 2, 3, 4, 5]);
}

#[test]
fn test_select_next_respects_narrowed_preferences() {
    let dogs = vec![
        dog(1, 10, Gender::Male, Size::Small),
        dog(2, 20, Gender::Female, Size::Medium),
    ];
    let mut prefs = Preferences::default();
    prefs.gender = "f".parse().unwrap();
    prefs.size = ChoiceSet::from_codes(&["s", "m"]).unwrap();

    let next = select_next(dogs, &prefs, &[], DogCategory::Undecided, 0);

    assert_eq!(next.dog.map(|d| d.id), Some(2));
    assert_eq!(next.total_candidates, 1);
}
