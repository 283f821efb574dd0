//! Core parser trait for diagram input

use anyhow::Result;

use super::Database;

/// Parses raw diagram input into a database
///
/// Parsing replaces nothing already stored: implementations append to the
/// database they are given, so callers wanting a fresh model pass a fresh
/// database.
pub trait Parser<D: Database>: Send + Sync {
    /// Parse `input` and append its entities to `database`
    fn parse(&self, input: &str, database: &mut D) -> Result<()>;

    /// Get the name of this parser
    fn name(&self) -> &'static str;

    /// Get the version of this parser
    fn version(&self) -> &'static str;

    /// Cheap check whether `input` is worth handing to [`Parser::parse`]
    fn can_parse(&self, input: &str) -> bool;
}
