//! HTTP encoder for OpenAI-compatible `/v1/embeddings` endpoints
//! (text-embeddings-inference, vLLM, OpenAI and similar gateways).
//!
//! Retry and timeout policy for the embedding service lives here; the ranker
//! treats any error from this client as fatal for the request.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{Embedding, Encoder, EncoderError};

const MAX_ATTEMPTS: u32 = 3;
const BASE_BACKOFF: Duration = Duration::from_secs(1);

#[derive(Debug, Clone)]
pub struct EncoderConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub model: String,
    pub timeout: Duration,
}

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
    #[serde(default)]
    index: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

#[derive(Clone)]
pub struct HttpEncoder {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
    model: String,
    /// First retry delay; doubles on each further attempt.
    backoff: Duration,
}

impl HttpEncoder {
    pub fn new(config: EncoderConfig) -> Result<Self, EncoderError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            endpoint: format!("{}/v1/embeddings", config.base_url.trim_end_matches('/')),
            api_key: config.api_key,
            model: config.model,
            backoff: BASE_BACKOFF,
        })
    }

    /// Sends one batch, retrying on 429, 5xx and transport errors with
    /// exponential backoff (1s, 2s). The last attempt's error is returned as is.
    async fn post_batch(&self, texts: &[String]) -> Result<EmbeddingResponse, EncoderError> {
        let body = EmbeddingRequest {
            model: &self.model,
            input: texts,
        };

        let mut attempt = 1;
        loop {
            match self.send_once(&body).await {
                Err(e) if is_retryable(&e) && attempt < MAX_ATTEMPTS => {
                    let delay = self.backoff * (1 << (attempt - 1));
                    warn!(
                        "Embedding call attempt {} failed ({}), retrying after {}ms...",
                        attempt,
                        e,
                        delay.as_millis()
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                result => return result,
            }
        }
    }

    async fn send_once(
        &self,
        body: &EmbeddingRequest<'_>,
    ) -> Result<EmbeddingResponse, EncoderError> {
        let mut request = self.client.post(&self.endpoint).json(body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(EncoderError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// Transport failures, rate limiting and server errors are worth another attempt.
fn is_retryable(err: &EncoderError) -> bool {
    match err {
        EncoderError::Http(_) => true,
        EncoderError::Api { status, .. } => *status == 429 || *status >= 500,
        _ => false,
    }
}

#[async_trait]
impl Encoder for HttpEncoder {
    async fn encode_batch(&self, texts: &[String]) -> Result<Vec<Embedding>, EncoderError> {
        let response = self.post_batch(texts).await?;
        let vectors = into_ordered_vectors(response, texts.len())?;
        debug!(
            "Encoded {} texts (dims={})",
            vectors.len(),
            vectors.first().map(Vec::len).unwrap_or(0)
        );
        Ok(vectors)
    }

    fn model(&self) -> &str {
        &self.model
    }
}

/// Restores input order from the `index` field (servers may answer out of order)
/// and checks one vector came back per input. When indices are present they must
/// be exactly `0..expected`; without them the response order is taken as is.
fn into_ordered_vectors(
    response: EmbeddingResponse,
    expected: usize,
) -> Result<Vec<Embedding>, EncoderError> {
    let mut data = response.data;
    if data.len() != expected {
        return Err(EncoderError::CountMismatch {
            expected,
            actual: data.len(),
        });
    }
    if data.iter().any(|d| d.index.is_some()) {
        data.sort_by_key(|d| d.index);
        if let Some((position, d)) = data
            .iter()
            .enumerate()
            .find(|(position, d)| d.index != Some(*position))
        {
            return Err(EncoderError::BadIndex {
                position,
                index: d.index,
            });
        }
    }
    Ok(data.into_iter().map(|d| d.embedding).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn encoder_for(server: &MockServer) -> HttpEncoder {
        let mut encoder = HttpEncoder::new(EncoderConfig {
            base_url: server.base_url(),
            api_key: Some("test-key".to_string()),
            model: "all-MiniLM-L6-v2".to_string(),
            timeout: Duration::from_secs(5),
        })
        .unwrap();
        encoder.backoff = Duration::from_millis(10);
        encoder
    }

    #[test]
    fn test_out_of_order_data_sorted_by_index() {
        let response: EmbeddingResponse = serde_json::from_value(json!({
            "data": [
                {"embedding": [0.0, 1.0], "index": 1},
                {"embedding": [1.0, 0.0], "index": 0}
            ]
        }))
        .unwrap();

        let vectors = into_ordered_vectors(response, 2).unwrap();
        assert_eq!(vectors, vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
    }

    #[test]
    fn test_missing_vectors_is_count_mismatch() {
        let response: EmbeddingResponse = serde_json::from_value(json!({
            "data": [{"embedding": [1.0, 0.0]}]
        }))
        .unwrap();

        let err = into_ordered_vectors(response, 3).unwrap_err();
        assert!(matches!(
            err,
            EncoderError::CountMismatch {
                expected: 3,
                actual: 1
            }
        ));
    }

    #[test]
    fn test_duplicate_indices_rejected() {
        let response: EmbeddingResponse = serde_json::from_value(json!({
            "data": [
                {"embedding": [1.0, 0.0], "index": 0},
                {"embedding": [0.0, 1.0], "index": 0}
            ]
        }))
        .unwrap();

        let err = into_ordered_vectors(response, 2).unwrap_err();
        assert!(matches!(
            err,
            EncoderError::BadIndex {
                position: 1,
                index: Some(0)
            }
        ));
    }

    #[test]
    fn test_out_of_range_index_rejected() {
        let response: EmbeddingResponse = serde_json::from_value(json!({
            "data": [
                {"embedding": [1.0, 0.0], "index": 0},
                {"embedding": [0.0, 1.0], "index": 5}
            ]
        }))
        .unwrap();

        let err = into_ordered_vectors(response, 2).unwrap_err();
        assert!(matches!(
            err,
            EncoderError::BadIndex {
                position: 1,
                index: Some(5)
            }
        ));
    }

    #[test]
    fn test_partial_indices_rejected() {
        let response: EmbeddingResponse = serde_json::from_value(json!({
            "data": [
                {"embedding": [1.0, 0.0]},
                {"embedding": [0.0, 1.0], "index": 1}
            ]
        }))
        .unwrap();

        // The missing index sorts first and does not match position 0.
        let err = into_ordered_vectors(response, 2).unwrap_err();
        assert!(matches!(
            err,
            EncoderError::BadIndex {
                position: 0,
                index: None
            }
        ));
    }

    #[test]
    fn test_missing_indices_keep_response_order() {
        let response: EmbeddingResponse = serde_json::from_value(json!({
            "data": [{"embedding": [0.0, 1.0]}, {"embedding": [1.0, 0.0]}]
        }))
        .unwrap();

        let vectors = into_ordered_vectors(response, 2).unwrap();
        assert_eq!(vectors, vec![vec![0.0, 1.0], vec![1.0, 0.0]]);
    }

    #[test]
    fn test_retryable_errors() {
        let api = |status| EncoderError::Api {
            status,
            message: String::new(),
        };
        assert!(is_retryable(&api(429)));
        assert!(is_retryable(&api(503)));
        assert!(!is_retryable(&api(400)));
        assert!(!is_retryable(&EncoderError::CountMismatch {
            expected: 1,
            actual: 0
        }));
    }

    #[test]
    fn test_trailing_slash_trimmed_from_base_url() {
        let encoder = HttpEncoder::new(EncoderConfig {
            base_url: "http://localhost:8080/".to_string(),
            api_key: None,
            model: "m".to_string(),
            timeout: Duration::from_secs(1),
        })
        .unwrap();
        assert_eq!(encoder.endpoint, "http://localhost:8080/v1/embeddings");
    }

    #[tokio::test]
    async fn test_encode_batch_posts_model_and_input() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/v1/embeddings")
                    .json_body(json!({
                        "model": "all-MiniLM-L6-v2",
                        "input": ["Rust", "Go"]
                    }));
                then.status(200).json_body(json!({
                    "data": [
                        {"embedding": [1.0, 0.0], "index": 0},
                        {"embedding": [0.5, 0.5], "index": 1}
                    ]
                }));
            })
            .await;

        let encoder = encoder_for(&server);
        let vectors = encoder
            .encode_batch(&["Rust".to_string(), "Go".to_string()])
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(vectors.len(), 2);
        assert_eq!(vectors[1], vec![0.5, 0.5]);
    }

    #[tokio::test]
    async fn test_client_error_not_retried() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/embeddings");
                then.status(400)
                    .json_body(json!({"error": {"message": "model not found"}}));
            })
            .await;

        let encoder = encoder_for(&server);
        let err = encoder
            .encode_batch(&["Rust".to_string()])
            .await
            .unwrap_err();

        mock.assert_hits_async(1).await;
        match err {
            EncoderError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "model not found");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_server_error_retried_until_attempts_run_out() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/embeddings");
                then.status(503).body("busy");
            })
            .await;

        let encoder = encoder_for(&server);
        let err = encoder
            .encode_batch(&["Rust".to_string()])
            .await
            .unwrap_err();

        mock.assert_hits_async(3).await;
        match err {
            EncoderError::Api { status, message } => {
                assert_eq!(status, 503);
                assert_eq!(message, "busy");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_rate_limit_retried() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/embeddings");
                then.status(429);
            })
            .await;

        let encoder = encoder_for(&server);
        let err = encoder
            .encode_batch(&["Rust".to_string()])
            .await
            .unwrap_err();

        mock.assert_hits_async(3).await;
        assert!(matches!(err, EncoderError::Api { status: 429, .. }));
    }
}
