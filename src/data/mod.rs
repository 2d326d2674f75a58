//! Data module - review loading, category mapping and filtering

mod loader;
pub mod mapping;
mod processor;

pub use loader::{ReviewLoader, ReviewTable};
pub use processor::{CommentDisplay, FilterEngine, FilterQuery, FilterResult, RevealState};
