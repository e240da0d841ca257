// Relevance ranking: scores profile entries against a target job and prunes
// the profile to what fits on one page.
// All embedding and similarity work goes through the traits in `embeddings`.

pub mod combiner;
pub mod handlers;
pub mod ranker;
pub mod skills;
pub mod truncation;

/// An item paired with its relevance score. Lives only for the duration of a rank call.
#[derive(Debug, Clone, PartialEq)]
pub struct Scored<T> {
    pub item: T,
    pub score: f64,
}

impl<T> Scored<T> {
    pub fn new(item: T, score: f64) -> Self {
        Self { item, score }
    }
}

/// Sort key for descending rankings. NaN ranks below every real score.
pub(crate) fn rank_key(score: f64) -> f64 {
    if score.is_nan() {
        f64::NEG_INFINITY
    } else {
        score
    }
}

/// Zips items with their scores. Callers check the lengths match first.
pub(crate) fn zip_scores<T>(items: Vec<T>, scores: &[f64]) -> Vec<Scored<T>> {
    items
        .into_iter()
        .zip(scores.iter().copied())
        .map(|(item, score)| Scored::new(item, score))
        .collect()
}
