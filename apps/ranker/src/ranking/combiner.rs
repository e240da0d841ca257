/// Weight of the title-vs-title similarity in a work item's score.
pub const TITLE_WEIGHT: f64 = 0.3;
/// Weight of the description-vs-description similarity in a work item's score.
pub const DESCRIPTION_WEIGHT: f64 = 0.7;

/// Combined work-item score: `0.3 * title + 0.7 * description`.
///
/// Descriptions carry most of the signal; the title term still lifts exact-role
/// matches whose bullets are sparse. Not clamped, so it stays on the same scale as
/// the raw project scores it is later pooled with.
pub fn combine_work_score(title_similarity: f64, description_similarity: f64) -> f64 {
    TITLE_WEIGHT * title_similarity + DESCRIPTION_WEIGHT * description_similarity
}

/// Pairs title and description scores index by index. Both slices must have one
/// score per work item.
pub fn combine_work_scores(title_scores: &[f64], description_scores: &[f64]) -> Vec<f64> {
    debug_assert_eq!(title_scores.len(), description_scores.len());
    title_scores
        .iter()
        .zip(description_scores)
        .map(|(t, d)| combine_work_score(*t, *d))
        .collect()
}
