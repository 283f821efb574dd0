//! Class model database
//!
//! Stores the classes recovered from a diagram together with their members
//! and resolved relations.

use std::fmt;

use anyhow::Result;
use serde::Serialize;

use crate::core::Database;

/// Visibility modifier for class members
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,    // +
    Private,   // -
    Protected, // #
}

impl Visibility {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Visibility::Public),
            '-' => Some(Visibility::Private),
            '#' => Some(Visibility::Protected),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Visibility::Public => '+',
            Visibility::Private => '-',
            Visibility::Protected => '#',
        }
    }

    /// Java keyword for this visibility
    pub fn keyword(self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Private => "private",
            Visibility::Protected => "protected",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A class attribute (field)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attribute {
    pub name: String,
    #[serde(rename = "type")]
    pub attr_type: String,
    pub visibility: Visibility,
    /// No diagram convention sets this yet
    pub is_static: bool,
    /// No diagram convention sets this yet
    pub is_final: bool,
}

impl Attribute {
    pub fn new(name: impl Into<String>, attr_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attr_type: attr_type.into(),
            visibility: Visibility::Private,
            is_static: false,
            is_final: false,
        }
    }

    pub fn with_visibility(mut self, v: Visibility) -> Self {
        self.visibility = v;
        self
    }
}

/// A method parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub param_type: String,
}

impl Parameter {
    pub fn new(name: impl Into<String>, param_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            param_type: param_type.into(),
        }
    }
}

/// A class method
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Method {
    pub name: String,
    pub return_type: String,
    pub parameters: Vec<Parameter>,
    pub visibility: Visibility,
    pub is_static: bool,
    pub is_abstract: bool,
}

impl Method {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            return_type: "void".to_string(),
            parameters: Vec::new(),
            visibility: Visibility::Public,
            is_static: false,
            is_abstract: false,
        }
    }

    pub fn with_visibility(mut self, v: Visibility) -> Self {
        self.visibility = v;
        self
    }

    pub fn with_return_type(mut self, t: impl Into<String>) -> Self {
        self.return_type = t.into();
        self
    }

    pub fn with_parameter(mut self, param: Parameter) -> Self {
        self.parameters.push(param);
        self
    }
}

/// Relation kind between classes, taken from the connector's arrowhead
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationKind {
    Inheritance, // endArrow=block
    Composition, // endArrow=diamond
    Aggregation, // endArrow=diamondThin
    Association, // anything else
}

impl RelationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RelationKind::Inheritance => "inheritance",
            RelationKind::Composition => "composition",
            RelationKind::Aggregation => "aggregation",
            RelationKind::Association => "association",
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A relation between two classes
///
/// Before resolution `source_id` and `target` hold diagram cell ids. Once
/// attached to its owning class, `source_id` is empty and `target` holds
/// the target class name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Relation {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub source_id: String,
    pub target: String,
    pub kind: RelationKind,
}

impl Relation {
    /// An unresolved relation between two cell ids
    pub fn pending(
        source_id: impl Into<String>,
        target_id: impl Into<String>,
        kind: RelationKind,
    ) -> Self {
        Self {
            source_id: source_id.into(),
            target: target_id.into(),
            kind,
        }
    }

    /// A resolved relation owned by its source class
    pub fn resolved(target_name: impl Into<String>, kind: RelationKind) -> Self {
        Self {
            source_id: String::new(),
            target: target_name.into(),
            kind,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.source_id.is_empty()
    }
}

/// A class in the diagram
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UmlClass {
    pub name: String,
    pub attributes: Vec<Attribute>,
    pub methods: Vec<Method>,
    pub superclasses: Vec<String>,
    pub interfaces: Vec<String>,
    pub relations: Vec<Relation>,
    pub is_abstract: bool,
    pub is_interface: bool,
    /// Kept on the model but not projected into generated code
    pub package: String,
}

impl UmlClass {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            methods: Vec::new(),
            superclasses: Vec::new(),
            interfaces: Vec::new(),
            relations: Vec::new(),
            is_abstract: false,
            is_interface: false,
            package: String::new(),
        }
    }

    pub fn with_abstract(mut self, is_abstract: bool) -> Self {
        self.is_abstract = is_abstract;
        self
    }

    pub fn add_attribute(&mut self, attribute: Attribute) {
        self.attributes.push(attribute);
    }

    pub fn add_method(&mut self, method: Method) {
        self.methods.push(method);
    }

    pub fn add_superclass(&mut self, name: impl Into<String>) {
        self.superclasses.push(name.into());
    }

    pub fn add_interface(&mut self, name: impl Into<String>) {
        self.interfaces.push(name.into());
    }

    /// Attach a non-inheritance relation to `target_name`
    pub fn add_relation(&mut self, kind: RelationKind, target_name: impl Into<String>) {
        self.relations.push(Relation::resolved(target_name, kind));
    }

    pub fn member_count(&self) -> usize {
        self.attributes.len() + self.methods.len()
    }
}

/// Class model database
///
/// Classes keep the order their container cells appeared in the diagram.
/// Duplicate names are allowed; lookups by name return the first match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClassDatabase {
    classes: Vec<UmlClass>,
}

impl ClassDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_class(&mut self, class: UmlClass) {
        self.classes.push(class);
    }

    pub fn classes(&self) -> &[UmlClass] {
        &self.classes
    }

    pub fn into_classes(self) -> Vec<UmlClass> {
        self.classes
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    pub fn get_class(&self, name: &str) -> Option<&UmlClass> {
        self.classes.iter().find(|c| c.name == name)
    }
}

impl From<Vec<UmlClass>> for ClassDatabase {
    fn from(classes: Vec<UmlClass>) -> Self {
        Self { classes }
    }
}

impl Database for ClassDatabase {
    type Node = UmlClass;
    type Edge = Relation;

    fn add_node(&mut self, node: Self::Node) -> Result<()> {
        self.add_class(node);
        Ok(())
    }

    fn get_node(&self, name: &str) -> Option<&Self::Node> {
        self.get_class(name)
    }

    fn nodes(&self) -> impl Iterator<Item = &Self::Node> {
        self.classes.iter()
    }

    fn edges(&self) -> impl Iterator<Item = &Self::Edge> {
        self.classes.iter().flat_map(|c| c.relations.iter())
    }

    fn clear(&mut self) {
        self.classes.clear();
    }

    fn node_count(&self) -> usize {
        self.classes.len()
    }

    fn edge_count(&self) -> usize {
        self.classes.iter().map(|c| c.relations.len()).sum()
    }
}
