use serde::{Deserialize, Serialize};

use super::choices::{AgeBucket, ChoiceSet, DecisionStatus, Gender, Size, Sterilized};

/// A dog available for adoption
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dog {
    pub id: i64,
    pub name: String,
    pub image_filename: String,
    pub breed: String,
    /// Age in months
    pub age: i32,
    pub gender: Gender,
    pub size: Size,
    pub sterilized: Sterilized,
}

/// Registered user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Filter criteria used to pick candidate dogs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub age: ChoiceSet<AgeBucket>,
    pub gender: ChoiceSet<Gender>,
    pub size: ChoiceSet<Size>,
    pub sterilized: ChoiceSet<Sterilized>,
}

impl Default for Preferences {
    /// Every age, female and male dogs of any known size, sterilized or not
    fn default() -> Self {
        Self {
            age: ChoiceSet::new([
                AgeBucket::Baby,
                AgeBucket::Young,
                AgeBucket::Adult,
                AgeBucket::Senior,
            ]),
            gender: ChoiceSet::new([Gender::Female, Gender::Male]),
            size: ChoiceSet::new([Size::Small, Size::Medium, Size::Large, Size::ExtraLarge]),
            sterilized: ChoiceSet::new([Sterilized::Yes, Sterilized::No]),
        }
    }
}

/// The preference record owned by one user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserPreference {
    #[serde(skip_serializing)]
    pub user_id: i64,
    #[serde(flatten)]
    pub preferences: Preferences,
}

/// A user's recorded status for one dog
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decision {
    #[serde(skip_serializing)]
    pub user_id: i64,
    #[serde(rename = "dog")]
    pub dog_id: i64,
    pub status: DecisionStatus,
}

/// Which slice of the dog table a user is browsing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DogCategory {
    Liked,
    Disliked,
    Undecided,
}

impl DogCategory {
    /// Anything other than `liked` or `disliked` browses unseen dogs
    pub fn from_path(segment: &str) -> Self {
        match segment {
            "liked" => DogCategory::Liked,
            "disliked" => DogCategory::Disliked,
            _ => DogCategory::Undecided,
        }
    }

    /// Decision status a dog must carry to appear in this category, if any
    pub fn required_status(self) -> Option<DecisionStatus> {
        match self {
            DogCategory::Liked => Some(DecisionStatus::Liked),
            DogCategory::Disliked => Some(DecisionStatus::Disliked),
            DogCategory::Undecided => None,
        }
    }
}
