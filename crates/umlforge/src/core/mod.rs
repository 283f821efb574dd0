//! Core abstractions for diagram conversion
//!
//! This module defines the traits every diagram format and output language
//! plugs into, plus the shared error, logging and file-writing pieces.

mod database;
mod detector;
mod error;
pub mod logging;
mod parser;
mod renderer;
mod writer;

pub use database::*;
pub use detector::*;
pub use error::*;
pub use logging::*;
pub use parser::*;
pub use renderer::*;
pub use writer::*;
