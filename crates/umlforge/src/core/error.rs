//! Core error types for diagram conversion
//!
//! This module defines the error taxonomy used throughout the conversion
//! pipeline. Fatal errors (`MalformedDiagram`, `Semantic`) abort a whole
//! conversion; `MemberWrite` is reported per class and never aborts a batch.

use thiserror::Error;

/// Boxed underlying cause carried by semantic errors
pub type BoxedCause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Core error types for diagram conversion
#[derive(Error, Debug)]
pub enum DiagramError {
    #[error("Malformed diagram: {message} at line {line}, column {column}")]
    MalformedDiagram {
        message: String,
        line: u32,
        column: u32,
    },

    #[error("Diagram semantic error: {message}")]
    Semantic {
        message: String,
        #[source]
        source: Option<BoxedCause>,
    },

    #[error("Failed to write class '{class_name}': {reason}")]
    MemberWrite { class_name: String, reason: String },

    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl DiagramError {
    /// Create a new malformed-diagram error
    pub fn malformed(message: impl Into<String>, line: u32, column: u32) -> Self {
        Self::MalformedDiagram {
            message: message.into(),
            line,
            column,
        }
    }

    /// Create a new semantic error without an underlying cause
    pub fn semantic(message: impl Into<String>) -> Self {
        Self::Semantic {
            message: message.into(),
            source: None,
        }
    }

    /// Create a new semantic error wrapping an underlying cause
    pub fn semantic_with_source(message: impl Into<String>, source: impl Into<BoxedCause>) -> Self {
        Self::Semantic {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Create a new per-class write error
    pub fn member_write(class_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MemberWrite {
            class_name: class_name.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error aborts a whole conversion
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::MemberWrite { .. })
    }
}

impl From<roxmltree::Error> for DiagramError {
    fn from(err: roxmltree::Error) -> Self {
        let pos = err.pos();
        Self::malformed(err.to_string(), pos.row, pos.col)
    }
}
