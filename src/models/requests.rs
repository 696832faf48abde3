use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::choices::{AgeBucket, ChoiceSet, Gender, Size, Sterilized};
use super::domain::{Dog, Preferences};

/// Request to register a new user
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 150), custom(function = "validate_username"))]
    pub username: String,
    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

fn validate_username(username: &str) -> Result<(), ValidationError> {
    if username.chars().any(char::is_whitespace) {
        return Err(ValidationError::new("username_whitespace"));
    }
    Ok(())
}

/// Request to obtain an auth token
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Dog creation payload; omitted fields take the model defaults
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewDog {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 30))]
    pub image_filename: String,
    #[serde(default = "default_breed")]
    #[validate(length(max = 255))]
    pub breed: String,
    #[serde(default = "default_age")]
    #[validate(range(min = 0))]
    pub age: i32,
    #[serde(default)]
    pub gender: Gender,
    #[serde(default)]
    pub size: Size,
    #[serde(default)]
    pub sterilized: Sterilized,
}

fn default_breed() -> String {
    "unknown breed".to_string()
}

fn default_age() -> i32 {
    1
}

/// Partial dog update, used by both PUT and PATCH
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct DogPatch {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(max = 30))]
    pub image_filename: Option<String>,
    #[validate(length(max = 255))]
    pub breed: Option<String>,
    #[validate(range(min = 0))]
    pub age: Option<i32>,
    pub gender: Option<Gender>,
    pub size: Option<Size>,
    pub sterilized: Option<Sterilized>,
}

impl DogPatch {
    /// Overwrite the fields present in this patch
    pub fn apply_to(self, dog: &mut Dog) {
        if let Some(name) = self.name {
            dog.name = name;
        }
        if let Some(image_filename) = self.image_filename {
            dog.image_filename = image_filename;
        }
        if let Some(breed) = self.breed {
            dog.breed = breed;
        }
        if let Some(age) = self.age {
            dog.age = age;
        }
        if let Some(gender) = self.gender {
            dog.gender = gender;
        }
        if let Some(size) = self.size {
            dog.size = size;
        }
        if let Some(sterilized) = self.sterilized {
            dog.sterilized = sterilized;
        }
    }
}

/// Preference update payload
///
/// Each field takes either `"b,a"` or `["b", "a"]`. Codes outside the
/// enumeration fail deserialization. `sterilized` is not updatable and is
/// ignored if sent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PreferenceUpdate {
    pub age: Option<ChoiceSet<AgeBucket>>,
    pub gender: Option<ChoiceSet<Gender>>,
    pub size: Option<ChoiceSet<Size>>,
}

impl PreferenceUpdate {
    /// Merge into `current`, leaving absent fields untouched
    pub fn apply_to(self, current: &mut Preferences) -> Result<(), String> {
        if let Some(age) = self.age {
            if age.is_empty() {
                return Err("age must select at least one bucket".to_string());
            }
            current.age = age;
        }
        if let Some(gender) = self.gender {
            if gender.is_empty() {
                return Err("gender must select at least one choice".to_string());
            }
            current.gender = gender;
        }
        if let Some(size) = self.size {
            if size.is_empty() {
                return Err("size must select at least one choice".to_string());
            }
            current.size = size;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_dog_defaults() {
        let dog: NewDog = serde_json::from_str(r#"{"name": "Rex"}"#).unwrap();
        assert_eq!(dog.breed, "unknown breed");
        assert_eq!(dog.age, 1);
        assert_eq!(dog.gender, Gender::Unknown);
        assert_eq!(dog.size, Size::Unknown);
        assert_eq!(dog.sterilized, Sterilized::Unknown);
        assert!(dog.validate().is_ok());
    }

    #[test]
    fn test_new_dog_rejects_negative_age() {
        let dog: NewDog = serde_json::from_str(r#"{"name": "Rex", "age": -3}"#).unwrap();
        assert!(dog.validate().is_err());
    }

    #[test]
    fn test_username_with_space_is_invalid() {
        let req = RegisterRequest {
            username: "two words".to_string(),
            password: "secret".to_string(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_preference_update_keeps_missing_fields() {
        let mut prefs = Preferences::default();
        let update: PreferenceUpdate =
            serde_json::from_str(r#"{"age": ["b", "a"], "sterilized": "y"}"#).unwrap();
        update.apply_to(&mut prefs).unwrap();
        assert_eq!(prefs.age.to_string(), "b,a");
        assert_eq!(prefs.gender.to_string(), "f,m");
        assert_eq!(prefs.sterilized.to_string(), "y,n");
    }

    #[test]
    fn test_preference_update_rejects_empty_set() {
        let mut prefs = Preferences::default();
        let update: PreferenceUpdate = serde_json::from_str(r#"{"size": ""}"#).unwrap();
        assert!(update.apply_to(&mut prefs).is_err());
        assert_eq!(prefs, Preferences::default());
    }
}
