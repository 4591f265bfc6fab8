// Aggregation Logic
// Folds per-chunk verdicts into a single document verdict

use crate::models::{AggregateResult, DetectionResult};

/// Aggregate chunk results into the document result.
///
/// Phrases keep chunk order. The percentage is a plain mean: every chunk
/// counts once regardless of its length. No chunks means nothing flagged.
pub fn aggregate_results(results: &[DetectionResult]) -> AggregateResult {
    if results.is_empty() {
        return AggregateResult::default();
    }

    let phrases: Vec<String> = results
        .iter()
        .flat_map(|r| r.phrases.iter().cloned())
        .collect();

    let ai_percentage =
        results.iter().map(|r| r.ai_percentage).sum::<f64>() / results.len() as f64;

    AggregateResult {
        phrases,
        ai_percentage,
        chunk_count: results.len(),
    }
}
