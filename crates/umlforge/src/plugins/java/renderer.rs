//! Java source renderer
//!
//! Renders each class of the model as one skeletal Java compilation unit:
//! fields, a no-argument constructor, accessors, stub methods and comments
//! naming the remaining relations.

use anyhow::Result;
use tracing::{debug, span, trace, Level};

use crate::core::Renderer;
use crate::plugins::drawio::{Attribute, ClassDatabase, Method, UmlClass};

const INDENT: &str = "    ";
const BODY_INDENT: &str = "        ";

/// Java renderer configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JavaConfig {
    /// File extension of each generated unit, without the dot
    pub extension: String,
}

impl Default for JavaConfig {
    fn default() -> Self {
        Self {
            extension: "java".to_string(),
        }
    }
}

/// One rendered class, ready to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedUnit {
    pub class_name: String,
    pub file_name: String,
    pub content: String,
}

/// Java source renderer
#[derive(Debug, Clone, Default)]
pub struct JavaRenderer {
    config: JavaConfig,
}

impl JavaRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: JavaConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &JavaConfig {
        &self.config
    }

    /// File name for a class: its name plus the configured extension
    pub fn file_name(&self, class: &UmlClass) -> String {
        format!("{}.{}", class.name, self.config.extension)
    }

    /// Render one class as a full unit
    pub fn render_unit(&self, class: &UmlClass) -> RenderedUnit {
        RenderedUnit {
            class_name: class.name.clone(),
            file_name: self.file_name(class),
            content: self.render_class(class),
        }
    }

    /// Render the source text of one class
    pub fn render_class(&self, class: &UmlClass) -> String {
        trace!(class = %class.name, "Rendering class");
        let mut lines: Vec<String> = vec![
            "//package com.example.myproject;".to_string(),
            String::new(),
            "//import java.util.*;".to_string(),
            String::new(),
            declaration(class),
            "{".to_string(),
        ];

        // Recorded visibility is not projected onto fields
        for attr in &class.attributes {
            lines.push(format!("{INDENT}private {} {};", attr.attr_type, attr.name));
        }
        lines.push(String::new());

        lines.push(format!("{INDENT}public {}() {{", class.name));
        lines.push(format!("{INDENT}}}"));
        lines.push(String::new());

        for attr in &class.attributes {
            lines.push(getter(attr));
            lines.push(String::new());
            lines.push(setter(attr));
            lines.push(String::new());
        }

        for method in &class.methods {
            lines.push(method_stub(method));
            lines.push(String::new());
        }

        for relation in &class.relations {
            lines.push(format!(
                "{INDENT}// Relation: {} with {}",
                relation.kind, relation.target
            ));
        }
        lines.push(String::new());

        lines.push("}".to_string());
        lines.join("\n")
    }
}

impl Renderer<ClassDatabase> for JavaRenderer {
    type Output = Vec<RenderedUnit>;

    fn render(&self, database: &ClassDatabase) -> Result<Self::Output> {
        let render_span = span!(
            Level::INFO,
            "render_java",
            class_count = database.class_count()
        );
        let _enter = render_span.enter();

        let units: Vec<_> = database
            .classes()
            .iter()
            .map(|class| self.render_unit(class))
            .collect();
        debug!(unit_count = units.len(), "Rendered units");
        Ok(units)
    }

    fn name(&self) -> &'static str {
        "java"
    }

    fn version(&self) -> &'static str {
        "0.1.0"
    }

    fn format(&self) -> &str {
        &self.config.extension
    }
}

/// `public [abstract] class Name [extends ...] [implements ...]`
fn declaration(class: &UmlClass) -> String {
    let mut parts = vec!["public"];
    if class.is_abstract {
        parts.push("abstract");
    }
    parts.push("class");
    parts.push(&class.name);

    let mut decl = parts.join(" ");
    if !class.superclasses.is_empty() {
        decl.push_str(" extends ");
        decl.push_str(&class.superclasses.join(", "));
    }
    if !class.interfaces.is_empty() {
        decl.push_str(" implements ");
        decl.push_str(&class.interfaces.join(", "));
    }
    decl
}

/// Upper-case the first character, leave the rest untouched
///
/// The tail keeps its case so camelCase names survive: `firstName` gives
/// `FirstName`, not `Firstname`.
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn getter(attr: &Attribute) -> String {
    format!(
        "{INDENT}public {ty} get{cap}() {{\n{BODY_INDENT}return {name};\n{INDENT}}}",
        ty = attr.attr_type,
        cap = capitalize(&attr.name),
        name = attr.name,
    )
}

fn setter(attr: &Attribute) -> String {
    format!(
        "{INDENT}public void set{cap}({ty} {name}) {{\n{BODY_INDENT}this.{name} = {name};\n{INDENT}}}",
        ty = attr.attr_type,
        cap = capitalize(&attr.name),
        name = attr.name,
    )
}

/// Literal returned by a stub body, or `None` for `void`
pub fn default_return_literal(return_type: &str) -> Option<&'static str> {
    match return_type {
        "void" => None,
        "int" | "long" | "short" | "byte" => Some("0"),
        "float" | "double" => Some("0.0"),
        "boolean" => Some("false"),
        _ => Some("null"),
    }
}

fn method_stub(method: &Method) -> String {
    let params = method
        .parameters
        .iter()
        .map(|p| format!("{} {}", p.param_type, p.name))
        .collect::<Vec<_>>()
        .join(", ");

    let mut stub = format!(
        "{INDENT}{} {} {}({}) {{",
        method.visibility, method.return_type, method.name, params
    );
    if let Some(literal) = default_return_literal(&method.return_type) {
        stub.push_str(&format!("\n{BODY_INDENT}return {literal};"));
    }
    stub.push_str(&format!("\n{INDENT}}}"));
    stub
}
