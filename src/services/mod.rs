// recycleme Core Services

pub mod config_store;
pub mod detection;
pub mod file_loader;
pub mod providers;
pub mod rewriter;
pub mod session;
pub mod text_processor;
pub mod workspace;

pub use config_store::*;
pub use file_loader::*;
pub use providers::*;
pub use rewriter::*;
pub use session::*;
pub use text_processor::*;
pub use workspace::*;

pub use detection::{aggregate_results, detect_chunks};
