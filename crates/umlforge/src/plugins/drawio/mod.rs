//! draw.io class diagram plugin
//!
//! Reads draw.io (mxGraph) XML and builds the class model.

mod cell;
mod database;
mod detector;
pub mod member;
mod parser;
mod style;

pub use cell::{Cell, CellDocument};
pub use database::{
    Attribute, ClassDatabase, Method, Parameter, Relation, RelationKind, UmlClass, Visibility,
};
pub use detector::DrawioDetector;
pub use member::{clean_value, sanitize_identifier, ParsedMember};
pub use parser::{ClassIndex, DrawioParser};
pub use style::{Style, StyleEntry};
