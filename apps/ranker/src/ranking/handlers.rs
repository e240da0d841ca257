//! Axum route handlers for the Ranking API.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::profile::{TargetJob, UserProfile};
use crate::state::AppState;

/// Request body: the profile to prune and the job to prune it for.
#[derive(Debug, Deserialize)]
pub struct RankRequest {
    pub user_profile: UserProfile,
    pub new_job: TargetJob,
}

/// POST /  and  POST /api/v1/rank
///
/// Returns the profile pruned to the 10 most relevant skills and the work/project
/// entries at or above the pooled top-5 cutoff. Education, websites and personal
/// info come back unchanged.
pub async fn handle_rank(
    State(state): State<AppState>,
    payload: Result<Json<RankRequest>, JsonRejection>,
) -> Result<Json<UserProfile>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::Validation(e.body_text()))?;
    let request_id = Uuid::new_v4();
    info!(
        "Rank request {request_id}: {} work, {} projects, {} skills",
        request.user_profile.work.len(),
        request.user_profile.projects.len(),
        request.user_profile.skills.len()
    );

    let profile = state
        .ranker
        .rank(request.user_profile, &request.new_job)
        .await?;

    info!("Rank request {request_id} complete");
    Ok(Json(profile))
}
