//! Joint work/project truncation.
//!
//! Work and project scores share one scale. Both sections are pooled into a
//! single tagged ranking, the 5th-highest pooled score becomes the cutoff, and
//! each section is filtered against it in its submitted order.

use super::{rank_key, Scored};

/// Combined number of work + project entries the cutoff is derived from.
pub const COMBINED_ENTRY_LIMIT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Work,
    Project,
}

/// One entry of the pooled ranking: which section, where in it, and its score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PooledScore {
    pub section: Section,
    pub index: usize,
    pub score: f64,
}

/// Result of joint truncation.
#[derive(Debug, Clone, PartialEq)]
pub struct JointSelection<W, P> {
    pub work: Vec<W>,
    pub projects: Vec<P>,
    /// `None` when the pool was small enough to skip truncation.
    pub threshold: Option<f64>,
}

/// Merges both sections into one ranking, highest score first.
///
/// Ties keep work before projects and then submitted order. NaN scores sort last.
pub fn pool_scores<W, P>(work: &[Scored<W>], projects: &[Scored<P>]) -> Vec<PooledScore> {
    let mut pool: Vec<PooledScore> = work
        .iter()
        .enumerate()
        .map(|(index, s)| PooledScore {
            section: Section::Work,
            index,
            score: s.score,
        })
        .chain(projects.iter().enumerate().map(|(index, s)| PooledScore {
            section: Section::Project,
            index,
            score: s.score,
        }))
        .collect();

    pool.sort_by(|a, b| rank_key(b.score).total_cmp(&rank_key(a.score)));
    pool
}

/// The lowest score still kept: the `COMBINED_ENTRY_LIMIT`-th entry of the pooled
/// ranking. `None` when the pool does not exceed the limit.
pub fn cutoff_score(pool: &[PooledScore]) -> Option<f64> {
    if pool.len() <= COMBINED_ENTRY_LIMIT {
        return None;
    }
    Some(rank_key(pool[COMBINED_ENTRY_LIMIT - 1].score))
}

/// Keeps every work and project entry scoring at or above the pooled cutoff.
///
/// The cutoff is inclusive, so ties at the cutoff score can leave more than
/// `COMBINED_ENTRY_LIMIT` entries in total. Each section keeps its submitted order.
/// A NaN score never passes the cutoff.
pub fn truncate_jointly<W, P>(
    work: Vec<Scored<W>>,
    projects: Vec<Scored<P>>,
) -> JointSelection<W, P> {
    let pool = pool_scores(&work, &projects);
    let threshold = cutoff_score(&pool);

    let mut keep_work = vec![threshold.is_none(); work.len()];
    let mut keep_projects = vec![threshold.is_none(); projects.len()];

    if let Some(cutoff) = threshold {
        for entry in pool.iter().filter(|e| e.score >= cutoff) {
            match entry.section {
                Section::Work => keep_work[entry.index] = true,
                Section::Project => keep_projects[entry.index] = true,
            }
        }
    }

    JointSelection {
        work: retain_marked(work, &keep_work),
        projects: retain_marked(projects, &keep_projects),
        threshold,
    }
}

fn retain_marked<T>(items: Vec<Scored<T>>, marks: &[bool]) -> Vec<T> {
    items
        .into_iter()
        .zip(marks)
        .filter(|(_, keep)| **keep)
        .map(|(s, _)| s.item)
        .collect()
}
