use thiserror::Error;

use super::Embedding;

#[derive(Debug, Error, PartialEq)]
pub enum SimilarityError {
    #[error("Candidate {index} has {actual} dimensions, query has {expected}")]
    DimensionMismatch {
        index: usize,
        expected: usize,
        actual: usize,
    },
}

/// Scores a query vector against a batch of candidates.
///
/// Returns one score per candidate, in candidate order. Higher means more similar;
/// callers must not assume anything about the range beyond that.
pub trait Similarity: Send + Sync {
    fn similarity(
        &self,
        query: &[f32],
        candidates: &[Embedding],
    ) -> Result<Vec<f64>, SimilarityError>;
}

/// Cosine similarity in [-1.0, 1.0]. A zero vector scores 0.0 against anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct CosineSimilarity;

impl Similarity for CosineSimilarity {
    fn similarity(
        &self,
        query: &[f32],
        candidates: &[Embedding],
    ) -> Result<Vec<f64>, SimilarityError> {
        let query_norm = norm(query);
        candidates
            .iter()
            .enumerate()
            .map(|(index, candidate)| {
                if candidate.len() != query.len() {
                    return Err(SimilarityError::DimensionMismatch {
                        index,
                        expected: query.len(),
                        actual: candidate.len(),
                    });
                }
                let denom = query_norm * norm(candidate);
                if denom == 0.0 {
                    return Ok(0.0);
                }
                let dot: f64 = query
                    .iter()
                    .zip(candidate)
                    .map(|(a, b)| *a as f64 * *b as f64)
                    .sum();
                Ok(dot / denom)
            })
            .collect()
    }
}

fn norm(v: &[f32]) -> f64 {
    v.iter().map(|x| (*x as f64) * (*x as f64)).sum::<f64>().sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_vectors_score_one() {
        let scores = CosineSimilarity
            .similarity(&[0.3, 0.4], &[vec![0.3, 0.4]])
            .unwrap();
        assert!((scores[0] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_scale_invariant_and_ordered() {
        let scores = CosineSimilarity
            .similarity(
                &[1.0, 0.0],
                &[vec![10.0, 0.0], vec![0.0, 2.0], vec![-1.0, 0.0]],
            )
            .unwrap();
        assert!((scores[0] - 1.0).abs() < 1e-9);
        assert!(scores[1].abs() < 1e-9);
        assert!((scores[2] + 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_vector_scores_zero() {
        let scores = CosineSimilarity
            .similarity(&[0.0, 0.0], &[vec![1.0, 1.0]])
            .unwrap();
        assert_eq!(scores, vec![0.0]);
    }

    #[test]
    fn test_dimension_mismatch_names_candidate() {
        let err = CosineSimilarity
            .similarity(&[1.0, 0.0], &[vec![1.0, 0.0], vec![1.0, 0.0, 0.0]])
            .unwrap_err();
        assert_eq!(
            err,
            SimilarityError::DimensionMismatch {
                index: 1,
                expected: 2,
                actual: 3
            }
        );
    }

    #[test]
    fn test_empty_candidates_yield_empty_scores() {
        let scores = CosineSimilarity.similarity(&[1.0], &[]).unwrap();
        assert!(scores.is_empty());
    }
}
