//! draw.io class diagram parser
//!
//! Turns the flat cell list of a draw.io document into classes.
//!
//! Building happens in two passes. [`ClassIndex::build`] classifies cells,
//! creates one class per container and attaches members; it yields an
//! id-keyed index that is never mutated afterwards. [`ClassIndex::resolve`]
//! consumes that index together with the pending connectors, turning
//! inheritance into superclass names and every other connector into a
//! relation on its source class.

use std::collections::HashMap;

use anyhow::Result;
use tracing::{debug, info, span, trace, Level};

use super::cell::{Cell, CellDocument};
use super::database::{ClassDatabase, Relation, RelationKind, UmlClass};
use super::member::{clean_value, parse_member, ParsedMember};
use crate::core::{DiagramError, Parser};

/// Classes indexed by the id of their container cell
///
/// Output of the first pass. `order` keeps container ids in the order the
/// containers were seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassIndex {
    order: Vec<String>,
    classes: HashMap<String, UmlClass>,
    pending: Vec<Relation>,
}

impl ClassIndex {
    /// First pass: classify cells, create classes and attach members
    pub fn build(document: &CellDocument) -> Self {
        let mut index = Self::default();

        let classify_span = span!(Level::DEBUG, "classify_cells");
        let classify_enter = classify_span.enter();
        for cell in document.cells() {
            if cell.is_class_container() {
                index.insert_class(cell);
            } else if cell.is_relation() {
                index.defer_relation(cell);
            }
        }
        debug!(
            class_count = index.order.len(),
            relation_count = index.pending.len(),
            "Classified cells"
        );
        drop(classify_enter);

        let member_span = span!(Level::DEBUG, "attach_members");
        let _member_enter = member_span.enter();
        for cell in document.cells() {
            index.attach_member(cell);
        }

        index
    }

    fn insert_class(&mut self, cell: &Cell) {
        let first_line = cell.value.split('\n').next().unwrap_or_default();
        let name = clean_value(first_line);
        let class = UmlClass::new(name).with_abstract(cell.style.is_italic());
        trace!(id = %cell.id, name = %class.name, "Found class container");

        // A repeated container id replaces the earlier class, keeping its slot
        if self.classes.insert(cell.id.clone(), class).is_none() {
            self.order.push(cell.id.clone());
        }
    }

    fn defer_relation(&mut self, cell: &Cell) {
        let kind = cell.style.relation_kind();
        match (&cell.source, &cell.target) {
            (Some(source), Some(target)) => {
                self.pending.push(Relation::pending(source, target, kind));
            }
            _ => trace!(id = %cell.id, "Dropping connector without both endpoints"),
        }
    }

    fn attach_member(&mut self, cell: &Cell) {
        if !cell.vertex || cell.is_class_container() {
            return;
        }
        let Some(owner) = cell
            .parent
            .as_ref()
            .and_then(|parent| self.classes.get_mut(parent))
        else {
            return;
        };

        let text = clean_value(&cell.value);
        if text.is_empty() {
            return;
        }

        match parse_member(&text) {
            Some(ParsedMember::Method(method)) => {
                trace!(class = %owner.name, method = %method.name, "Attached method");
                owner.add_method(method);
            }
            Some(ParsedMember::Attribute(attribute)) => {
                trace!(class = %owner.name, attribute = %attribute.name, "Attached attribute");
                owner.add_attribute(attribute);
            }
            None => {}
        }
    }

    pub fn class_count(&self) -> usize {
        self.order.len()
    }

    pub fn pending_relations(&self) -> &[Relation] {
        &self.pending
    }

    /// Class built for the container cell `id`
    pub fn get(&self, id: &str) -> Option<&UmlClass> {
        self.classes.get(id)
    }

    /// Second pass: resolve connectors and return classes in container order
    ///
    /// Connectors whose endpoints are not both known classes are dropped.
    pub fn resolve(self) -> Vec<UmlClass> {
        let resolve_span = span!(Level::DEBUG, "resolve_relations");
        let _enter = resolve_span.enter();

        let Self {
            order,
            mut classes,
            pending,
        } = self;

        // Target names are looked up before any class is touched so the
        // result does not depend on connector order
        let names: HashMap<&str, String> = classes
            .iter()
            .map(|(id, class)| (id.as_str(), class.name.clone()))
            .collect();

        let mut additions: HashMap<String, Vec<(RelationKind, String)>> = HashMap::new();
        let mut dropped = 0usize;
        for relation in &pending {
            let target_name = match (
                names.contains_key(relation.source_id.as_str()),
                names.get(relation.target.as_str()),
            ) {
                (true, Some(name)) => name.clone(),
                _ => {
                    trace!(
                        source = %relation.source_id,
                        target = %relation.target,
                        "Dropping relation with unknown endpoint"
                    );
                    dropped += 1;
                    continue;
                }
            };
            additions
                .entry(relation.source_id.clone())
                .or_default()
                .push((relation.kind, target_name));
        }
        drop(names);
        debug!(
            resolved = pending.len() - dropped,
            dropped, "Resolved relations"
        );

        order
            .into_iter()
            .filter_map(|id| {
                let mut class = classes.remove(&id)?;
                for (kind, target_name) in additions.remove(&id).unwrap_or_default() {
                    match kind {
                        RelationKind::Inheritance => class.add_superclass(target_name),
                        _ => class.add_relation(kind, target_name),
                    }
                }
                Some(class)
            })
            .collect()
    }
}

/// draw.io class diagram parser
#[derive(Debug, Clone, Copy, Default)]
pub struct DrawioParser;

impl DrawioParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse raw file bytes; non-UTF-8 input is malformed
    pub fn parse_bytes(&self, input: &[u8]) -> Result<Vec<UmlClass>, DiagramError> {
        let text = std::str::from_utf8(input).map_err(|e| {
            DiagramError::malformed(format!("input is not valid UTF-8: {}", e), 0, 0)
        })?;
        self.parse_classes(text)
    }

    /// Parse a draw.io document into classes, in container order
    pub fn parse_classes(&self, input: &str) -> Result<Vec<UmlClass>, DiagramError> {
        let parse_span = span!(Level::INFO, "parse_drawio", input_len = input.len());
        let _enter = parse_span.enter();

        let document = CellDocument::parse(input)?;
        let classes = ClassIndex::build(&document).resolve();

        info!(class_count = classes.len(), "Parsed diagram");
        Ok(classes)
    }
}

impl Parser<ClassDatabase> for DrawioParser {
    fn parse(&self, input: &str, database: &mut ClassDatabase) -> Result<()> {
        for class in self.parse_classes(input)? {
            database.add_class(class);
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "drawio"
    }

    fn version(&self) -> &'static str {
        "0.1.0"
    }

    fn can_parse(&self, input: &str) -> bool {
        input.contains("mxCell")
    }
}
