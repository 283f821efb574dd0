//! umlforge - Turn draw.io class diagrams into Java skeletons
//!
//! A library for reading draw.io (mxGraph) class diagrams and emitting one
//! skeletal Java source per class box, with fields, accessors, stub methods
//! and inheritance/association relations.
//!
//! # Quick Start
//!
//! ```rust
//! use umlforge::render;
//!
//! let diagram = r#"<mxGraphModel><root>
//!   <mxCell id="0"/><mxCell id="1" parent="0"/>
//!   <mxCell id="2" value="Person" style="swimlane;" vertex="1" parent="1"/>
//!   <mxCell id="3" value="- name: String" style="text;" vertex="1" parent="2"/>
//! </root></mxGraphModel>"#;
//!
//! let units = render(diagram).unwrap();
//! assert_eq!(units[0].file_name, "Person.java");
//! assert!(units[0].content.contains("public String getName()"));
//! ```
//!
//! # Advanced Usage
//!
//! For more control, use the individual components:
//!
//! ```rust
//! use umlforge::prelude::*;
//!
//! let diagram = r#"<mxGraphModel><root>
//!   <mxCell id="2" value="Shape" style="swimlane;" vertex="1" parent="1"/>
//!   <mxCell id="3" value="+ area(): double" style="text;" vertex="1" parent="2"/>
//! </root></mxGraphModel>"#;
//!
//! // Parse into a database
//! let parser = DrawioParser::new();
//! let mut database = ClassDatabase::new();
//! parser.parse(diagram, &mut database).unwrap();
//! assert_eq!(database.node_count(), 1);
//!
//! // Write every class through a file writer
//! let mut writer = MemoryWriter::new();
//! let report = JavaGenerator::new().generate(database.classes(), &mut writer);
//! assert!(report.is_success());
//! assert!(writer.get("Shape.java").unwrap().contains("return 0.0;"));
//! ```

pub mod core;
pub mod plugins;

use std::path::Path;

pub use crate::core::*;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{
        Database, Detector, DiagramError, DirectoryWriter, FileWriter, MemoryWriter, Parser,
        Renderer,
    };
    pub use crate::plugins::drawio::{
        Attribute, ClassDatabase, DrawioDetector, DrawioParser, Method, Parameter, Relation,
        RelationKind, UmlClass, Visibility,
    };
    pub use crate::plugins::java::{
        GenerationReport, JavaConfig, JavaGenerator, JavaRenderer, RenderedUnit,
    };
    pub use crate::plugins::orchestrator::Orchestrator;
}

/// Parse a draw.io document into a class database without rendering
///
/// # Example
/// ```rust
/// use umlforge::parse;
/// use umlforge::prelude::Database;
///
/// let db = parse(r#"<mxGraphModel><root>
///   <mxCell id="2" value="A" style="swimlane;" vertex="1" parent="1"/>
/// </root></mxGraphModel>"#).unwrap();
/// assert_eq!(db.node_count(), 1);
/// ```
pub fn parse(input: &str) -> anyhow::Result<plugins::drawio::ClassDatabase> {
    use crate::core::Parser as _;
    use crate::plugins::drawio::{ClassDatabase, DrawioParser};

    let parser = DrawioParser::new();
    let mut database = ClassDatabase::new();
    parser.parse(input, &mut database)?;
    Ok(database)
}

/// Parse a draw.io document and render every class in memory
pub fn render(input: &str) -> anyhow::Result<Vec<plugins::java::RenderedUnit>> {
    use crate::core::Renderer as _;
    use crate::plugins::java::JavaRenderer;

    let database = parse(input)?;
    JavaRenderer::new().render(&database)
}

/// Convert a draw.io document into Java files inside `output_dir`
///
/// The directory is created if missing. Classes that fail to write are
/// listed in the returned report; the others are still written.
pub fn convert(
    input: &str,
    output_dir: impl AsRef<Path>,
) -> anyhow::Result<plugins::java::GenerationReport> {
    use crate::plugins::orchestrator::Orchestrator;

    let mut writer = DirectoryWriter::new(output_dir.as_ref())?;
    let report = Orchestrator::new().convert(input, &mut writer)?;
    Ok(report)
}
