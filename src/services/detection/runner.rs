// Detection Runner
// Sends chunks to a detector one at a time and aggregates the verdicts

use tracing::{debug, info};

use crate::models::AggregateResult;
use crate::services::providers::{DetectionError, TextDetector};
use super::aggregation::aggregate_results;

/// Run `detector` over `chunks` in order.
///
/// `on_progress` is called with the 1-based chunk index and the total before
/// each request. The first failure aborts the run.
pub async fn detect_chunks<D, F>(
    detector: &D,
    chunks: &[String],
    mut on_progress: F,
) -> Result<AggregateResult, DetectionError>
where
    D: TextDetector,
    F: FnMut(usize, usize),
{
    let total = chunks.len();
    let mut results = Vec::with_capacity(total);

    for (i, chunk) in chunks.iter().enumerate() {
        on_progress(i + 1, total);
        debug!(chunk = i + 1, total, chars = chunk.chars().count(), "detection.chunk_sent");

        let result = detector.detect(chunk).await?;
        info!(
            chunk = i + 1,
            total,
            flagged = result.phrases.len(),
            ai_percentage = result.ai_percentage,
            "detection.chunk_done"
        );
        results.push(result);
    }

    Ok(aggregate_results(&results))
}
