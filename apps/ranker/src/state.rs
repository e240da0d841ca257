use crate::config::Config;
use crate::ranking::ranker::RelevanceRanker;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Holds the encoder (default: HttpEncoder) and similarity (default: cosine).
    pub ranker: RelevanceRanker,
}
