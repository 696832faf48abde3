use std::ops::Range;

use crate::models::{AgeBucket, ChoiceSet};

/// Month range covered by each age bucket (start inclusive, end exclusive)
///
/// Ranges are contiguous and together cover `[0, 200)`.
pub const AGE_BUCKETS: [(AgeBucket, Range<i32>); 4] = [
    (AgeBucket::Baby, 0..12),
    (AgeBucket::Young, 12..36),
    (AgeBucket::Adult, 36..108),
    (AgeBucket::Senior, 108..200),
];

/// Upper bound (exclusive) of the oldest bucket
pub const MAX_AGE_MONTHS: i32 = 200;

/// Months covered by a single bucket
pub fn months(bucket: AgeBucket) -> Range<i32> {
    match bucket {
        AgeBucket::Baby => AGE_BUCKETS[0].1.clone(),
        AgeBucket::Young => AGE_BUCKETS[1].1.clone(),
        AgeBucket::Adult => AGE_BUCKETS[2].1.clone(),
        AgeBucket::Senior => AGE_BUCKETS[3].1.clone(),
    }
}

/// Bucket a dog of the given age falls into, if any
pub fn bucket_for(age_months: i32) -> Option<AgeBucket> {
    AGE_BUCKETS
        .iter()
        .find(|(_, range)| range.contains(&age_months))
        .map(|(bucket, _)| *bucket)
}

/// Union of the month ranges selected by a set of buckets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgeRanges(Vec<Range<i32>>);

impl AgeRanges {
    pub fn from_buckets(buckets: &ChoiceSet<AgeBucket>) -> Self {
        Self(buckets.iter().map(|bucket| months(*bucket)).collect())
    }

    pub fn contains(&self, age_months: i32) -> bool {
        self.0.iter().any(|range| range.contains(&age_months))
    }

    pub fn ranges(&self) -> &[Range<i32>] {
        &self.0
    }
}
