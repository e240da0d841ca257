use super::{rank_key, Scored};

/// Maximum number of skills kept on the pruned profile.
pub const SKILL_LIMIT: usize = 10;

/// Keeps the `SKILL_LIMIT` most relevant skills, most relevant first.
///
/// Unlike work and projects, the returned list is in score order, not input
/// order. The sort is stable, so equal scores keep their submitted order.
/// NaN scores sort last.
pub fn select_skills(mut scored: Vec<Scored<String>>) -> Vec<String> {
    scored.sort_by(|a, b| rank_key(b.score).total_cmp(&rank_key(a.score)));
    scored
        .into_iter()
        .take(SKILL_LIMIT)
        .map(|s| s.item)
        .collect()
}
