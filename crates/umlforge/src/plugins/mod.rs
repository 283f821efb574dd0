//! Plugin implementations
//!
//! Input formats and output languages each live in their own plugin and
//! implement the core traits for their side of the pipeline.

pub mod drawio;
pub mod java;
pub mod orchestrator;

pub use drawio::*;
pub use java::*;
pub use orchestrator::*;
