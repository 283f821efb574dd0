//! Generic draw.io cell tree
//!
//! A draw.io file is XML whose graph is a flat list of `mxCell` elements.
//! Each cell points at its container through `parent`; connectors point at
//! their endpoints through `source` and `target`.

use tracing::{debug, trace, warn};

use super::style::Style;
use crate::core::DiagramError;

/// Wrapper elements that carry the id and label of the `mxCell` they enclose
const WRAPPER_TAGS: [&str; 2] = ["UserObject", "object"];

/// One graphical cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub id: String,
    pub parent: Option<String>,
    pub value: String,
    pub style: Style,
    pub vertex: bool,
    pub edge: bool,
    pub source: Option<String>,
    pub target: Option<String>,
}

impl Cell {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            parent: None,
            value: String::new(),
            style: Style::default(),
            vertex: false,
            edge: false,
            source: None,
            target: None,
        }
    }

    /// A vertex styled as a swimlane: the box of a class
    pub fn is_class_container(&self) -> bool {
        self.vertex && self.style.is_swimlane()
    }

    pub fn is_relation(&self) -> bool {
        self.edge
    }
}

/// All cells of a document, in document order
#[derive(Debug, Clone, Default)]
pub struct CellDocument {
    cells: Vec<Cell>,
}

impl CellDocument {
    /// Read every `mxCell` in `input`, across all diagram pages
    pub fn parse(input: &str) -> Result<Self, DiagramError> {
        let doc = roxmltree::Document::parse(input)?;

        let mut cells = Vec::new();
        for node in doc.descendants().filter(|n| n.has_tag_name("mxCell")) {
            cells.push(read_cell(node)?);
        }

        let compressed = compressed_page_count(&doc);
        if compressed > 0 {
            if cells.is_empty() {
                return Err(DiagramError::semantic_with_source(
                    "diagram pages are stored compressed",
                    "re-save the file with File > Properties > Compressed unchecked",
                ));
            }
            warn!(
                compressed_pages = compressed,
                "Skipping compressed diagram pages; only inline pages are read"
            );
        }

        debug!(cell_count = cells.len(), "Read diagram cells");
        Ok(Self { cells })
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl From<Vec<Cell>> for CellDocument {
    fn from(cells: Vec<Cell>) -> Self {
        Self { cells }
    }
}

fn read_cell(node: roxmltree::Node<'_, '_>) -> Result<Cell, DiagramError> {
    let wrapper = node
        .parent_element()
        .filter(|p| WRAPPER_TAGS.iter().any(|tag| p.has_tag_name(*tag)));

    let id = node
        .attribute("id")
        .or_else(|| wrapper.and_then(|w| w.attribute("id")))
        .ok_or_else(|| {
            let pos = node.document().text_pos_at(node.range().start);
            DiagramError::semantic(format!(
                "mxCell at line {}, column {} has no id",
                pos.row, pos.col
            ))
        })?;

    let value = node
        .attribute("value")
        .or_else(|| wrapper.and_then(|w| w.attribute("label")))
        .unwrap_or_default();

    let cell = Cell {
        id: id.to_string(),
        parent: node.attribute("parent").map(str::to_string),
        value: value.to_string(),
        style: Style::parse(node.attribute("style").unwrap_or_default()),
        vertex: node.attribute("vertex") == Some("1"),
        edge: node.attribute("edge") == Some("1"),
        source: node.attribute("source").map(str::to_string),
        target: node.attribute("target").map(str::to_string),
    };
    trace!(id = %cell.id, vertex = cell.vertex, edge = cell.edge, "Read cell");
    Ok(cell)
}

/// Pages saved in compressed form hold their graph as encoded text instead
/// of an inline `mxGraphModel`
fn compressed_page_count(doc: &roxmltree::Document<'_>) -> usize {
    doc.descendants()
        .filter(|n| {
            n.has_tag_name("diagram")
                && !n.children().any(|c| c.is_element())
                && n.text().is_some_and(|t| !t.trim().is_empty())
        })
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<mxfile><diagram id="p1" name="Page-1"><mxGraphModel><root>
        <mxCell id="0"/>
        <mxCell id="1" parent="0"/>
        <mxCell id="2" value="Person" style="swimlane;fontStyle=1;" vertex="1" parent="1"/>
        <mxCell id="3" value="+ name: String" style="text;html=1;" vertex="1" parent="2"/>
        <mxCell id="4" style="endArrow=block;" edge="1" parent="1" source="2" target="9"/>
    </root></mxGraphModel></diagram></mxfile>"#;

    #[test]
    fn test_reads_cells_in_document_order() {
        let doc = CellDocument::parse(SAMPLE).unwrap();
        let ids: Vec<_> = doc.cells().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["0", "1", "2", "3", "4"]);
    }

    #[test]
    fn test_cell_attributes() {
        let doc = CellDocument::parse(SAMPLE).unwrap();
        let class = &doc.cells()[2];
        assert!(class.is_class_container());
        assert_eq!(class.parent.as_deref(), Some("1"));
        assert_eq!(class.value, "Person");

        let edge = &doc.cells()[4];
        assert!(edge.is_relation());
        assert!(!edge.vertex);
        assert_eq!(edge.source.as_deref(), Some("2"));
        assert_eq!(edge.target.as_deref(), Some("9"));
        assert_eq!(edge.value, "");
    }

    #[test]
    fn test_user_object_wrapper_supplies_id_and_label() {
        let input = r#"<mxGraphModel><root>
            <UserObject label="Order" id="7"><mxCell style="swimlane;" vertex="1" parent="1"/></UserObject>
        </root></mxGraphModel>"#;
        let doc = CellDocument::parse(input).unwrap();
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.cells()[0].id, "7");
        assert_eq!(doc.cells()[0].value, "Order");
    }

    #[test]
    fn test_missing_id_is_semantic_error() {
        let input = r#"<mxGraphModel><root><mxCell vertex="1"/></root></mxGraphModel>"#;
        let err = CellDocument::parse(input).unwrap_err();
        assert!(matches!(err, DiagramError::Semantic { .. }));
    }

    #[test]
    fn test_malformed_xml() {
        let err = CellDocument::parse("<mxfile><diagram>").unwrap_err();
        assert!(matches!(err, DiagramError::MalformedDiagram { .. }));
    }

    #[test]
    fn test_compressed_page_is_rejected() {
        let input = r#"<mxfile><diagram id="x" name="Page-1">7VlNc5swEP01HJMBBBgfY8dpD+1MZnJoc1RAxmoEYoRs7P76rkACA3bjTpK6H/HBI+3TSqv3VsLCQst8+0nRqlpLS5hK/GmbxKiG6PRX7GTRZ0xwEcSgTE2DZdJyCk2o7O4hcLsaiBAjVXJ3HUtVYg2Fo4tbtbqz1k5sLXo2nFW54Fdxs+IUa3FZPH5ZrfSa</diagram></mxfile>"#;
        let err = CellDocument::parse(input).unwrap_err();
        assert!(matches!(err, DiagramError::Semantic { .. }));
    }

    #[test]
    fn test_mixed_pages_keep_inline_cells() {
        let input = r#"<mxfile>
            <diagram id="a" name="Inline"><mxGraphModel><root><mxCell id="0"/><mxCell id="1" parent="0"/></root></mxGraphModel></diagram>
            <diagram id="b" name="Packed">7VlNc5swEP01HJMBBBgfY8dpD</diagram>
        </mxfile>"#;
        let doc = CellDocument::parse(input).unwrap();
        assert_eq!(doc.len(), 2);

        let xml = roxmltree::Document::parse(input).unwrap();
        assert_eq!(compressed_page_count(&xml), 1);
    }

    #[test]
    fn test_empty_model_is_not_an_error() {
        let doc = CellDocument::parse("<mxGraphModel><root/></mxGraphModel>").unwrap();
        assert!(doc.is_empty());
    }
}
