// Model exports
pub mod choices;
pub mod domain;
pub mod requests;
pub mod responses;

pub use choices::{AgeBucket, Choice, ChoiceError, ChoiceSet, DecisionStatus, Gender, Size, Sterilized};
pub use domain::{Decision, Dog, DogCategory, Preferences, User, UserPreference};
pub use requests::{DogPatch, LoginRequest, NewDog, PreferenceUpdate, RegisterRequest};
pub use responses::{ErrorResponse, HealthResponse, TokenResponse, UserResponse};
