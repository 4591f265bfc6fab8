// Detection Module
// - aggregation: folds chunk verdicts into the document verdict
// - runner: drives a detector over the chunks, strictly in order

pub mod aggregation;
pub mod runner;

pub use aggregation::aggregate_results;
pub use runner::detect_chunks;
