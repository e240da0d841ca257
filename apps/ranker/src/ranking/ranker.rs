//! Relevance Ranker — orchestrates one pruning pass over a profile.
//!
//! Flow: encode target job → encode each section as one batch → similarity →
//!       combine work scores → select skills → joint work/project truncation →
//!       build the pruned profile.
//!
//! Any encoder or similarity failure aborts the pass; no partial profile is returned.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};

use crate::embeddings::{Embedding, Encoder, EncoderError, Similarity, SimilarityError};
use crate::models::profile::{ProjectItem, TargetJob, UserProfile, WorkItem};
use crate::ranking::combiner::combine_work_scores;
use crate::ranking::skills::select_skills;
use crate::ranking::truncation::{truncate_jointly, JointSelection};
use crate::ranking::{zip_scores, Scored};

#[derive(Debug, Error)]
pub enum RankError {
    #[error("Encoder error: {0}")]
    Encoder(#[from] EncoderError),

    #[error("Similarity error: {0}")]
    Similarity(#[from] SimilarityError),

    #[error("{stage} returned {actual} results for {expected} {category}")]
    CountMismatch {
        stage: &'static str,
        category: &'static str,
        expected: usize,
        actual: usize,
    },
}

/// Scores and prunes profiles against a target job.
///
/// Holds no per-request state; one instance is shared by all requests.
#[derive(Clone)]
pub struct RelevanceRanker {
    encoder: Arc<dyn Encoder>,
    similarity: Arc<dyn Similarity>,
}

impl RelevanceRanker {
    pub fn new(encoder: Arc<dyn Encoder>, similarity: Arc<dyn Similarity>) -> Self {
        Self {
            encoder,
            similarity,
        }
    }

    /// Returns a new profile holding the 10 most relevant skills (by score) and the
    /// work/project entries at or above the pooled top-5 cutoff (in submitted order).
    /// Everything else is copied from `profile` untouched.
    ///
    /// Encoder calls: one for the job title (only with work entries), one for the job
    /// description (only with anything to score), then one per non-empty section.
    pub async fn rank(
        &self,
        profile: UserProfile,
        job: &TargetJob,
    ) -> Result<UserProfile, RankError> {
        if profile.work.is_empty() && profile.projects.is_empty() && profile.skills.is_empty() {
            debug!("Nothing to rank, returning profile unchanged");
            return Ok(profile);
        }

        let (work_in, projects_in, skills_in) = (
            profile.work.len(),
            profile.projects.len(),
            profile.skills.len(),
        );

        let job_description = self.encoder.encode(&job.description).await?;

        let work_scores = if profile.work.is_empty() {
            Vec::new()
        } else {
            let job_title = self.encoder.encode(&job.title).await?;
            let titles: Vec<String> = profile.work.iter().map(|w| w.title.clone()).collect();
            let descriptions: Vec<String> =
                profile.work.iter().map(WorkItem::description_text).collect();

            let title_scores = self.score_batch("work titles", &job_title, titles).await?;
            let description_scores = self
                .score_batch("work descriptions", &job_description, descriptions)
                .await?;
            combine_work_scores(&title_scores, &description_scores)
        };

        let project_texts: Vec<String> = profile
            .projects
            .iter()
            .map(ProjectItem::description_text)
            .collect();
        let project_scores = self
            .score_batch("project descriptions", &job_description, project_texts)
            .await?;

        let skill_scores = self
            .score_batch("skills", &job_description, profile.skills.clone())
            .await?;

        let UserProfile {
            personal,
            work,
            projects,
            education,
            skills,
            websites,
        } = profile;

        let skills: Vec<Scored<String>> = zip_scores(skills, &skill_scores);
        let skills = select_skills(skills);

        let JointSelection {
            work,
            projects,
            threshold,
        } = truncate_jointly(
            zip_scores(work, &work_scores),
            zip_scores(projects, &project_scores),
        );

        debug!("Pooled work/project cutoff: {:?}", threshold);
        info!(
            "Ranked profile: work {}→{}, projects {}→{}, skills {}→{}",
            work_in,
            work.len(),
            projects_in,
            projects.len(),
            skills_in,
            skills.len()
        );

        Ok(UserProfile {
            personal,
            work,
            projects,
            education,
            skills,
            websites,
        })
    }

    /// Encodes `texts` as one batch and scores them against `query`.
    ///
    /// An empty batch short-circuits without touching either collaborator.
    async fn score_batch(
        &self,
        category: &'static str,
        query: &Embedding,
        texts: Vec<String>,
    ) -> Result<Vec<f64>, RankError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let vectors = self.encoder.encode_batch(&texts).await?;
        ensure_count("encode", category, texts.len(), vectors.len())?;

        let scores = self.similarity.similarity(query, &vectors)?;
        ensure_count("similarity", category, texts.len(), scores.len())?;

        Ok(scores)
    }
}

fn ensure_count(
    stage: &'static str,
    category: &'static str,
    expected: usize,
    actual: usize,
) -> Result<(), RankError> {
    if expected != actual {
        return Err(RankError::CountMismatch {
            stage,
            category,
            expected,
            actual,
        });
    }
    Ok(())
}
