// Core algorithm exports
pub mod age;
pub mod filters;
pub mod selector;

pub use age::{bucket_for, AgeRanges, AGE_BUCKETS};
pub use filters::{filter_dogs, matches_preferences};
pub use selector::{next_after, select_next, NextDog};
