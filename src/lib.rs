//! Pugorugh - dog adoption matching service
//!
//! Users register, choose which dogs they want to see (age bucket, gender,
//! size) and walk through matching dogs one at a time, marking each as
//! liked, disliked or undecided.

pub mod config;
pub mod core;
pub mod errors;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{filter_dogs, next_after, select_next, NextDog};
pub use errors::ApiError;
pub use models::{Decision, DecisionStatus, Dog, DogCategory, Preferences, UserPreference};
pub use routes::{configure_routes, AppState};
pub use services::{AuthService, MemoryStore, PostgresClient, Store, StoreError};
