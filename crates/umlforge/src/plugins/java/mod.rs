//! Java output plugin
//!
//! Renders the class model as skeletal Java sources.

mod generator;
mod renderer;

pub use generator::{GenerationReport, JavaGenerator};
pub use renderer::{capitalize, default_return_literal, JavaConfig, JavaRenderer, RenderedUnit};
