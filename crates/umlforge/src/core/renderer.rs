//! Core renderer trait for diagram output

use anyhow::Result;

use super::Database;

/// Renders a populated database into some output form
pub trait Renderer<D: Database>: Send + Sync {
    type Output;

    /// Render the whole database
    fn render(&self, database: &D) -> Result<Self::Output>;

    /// Get the name of this renderer
    fn name(&self) -> &'static str;

    /// Get the version of this renderer
    fn version(&self) -> &'static str;

    /// Output format produced (e.g. the file extension)
    fn format(&self) -> &str;
}
