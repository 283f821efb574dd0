//! Java generation driver
//!
//! Renders every class and hands each unit to a [`FileWriter`]. A failed
//! write is recorded against its class and the batch carries on.

use tracing::{info, span, warn, Level};

use super::renderer::{JavaRenderer, RenderedUnit};
use crate::core::{DiagramError, FileWriter};
use crate::plugins::drawio::UmlClass;

/// Outcome of one generation batch
#[derive(Debug, Default)]
pub struct GenerationReport {
    /// File names written, in class order
    pub written: Vec<String>,
    /// One `MemberWrite` error per class that could not be written
    pub failures: Vec<DiagramError>,
}

impl GenerationReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Names of the classes that failed
    pub fn failed_classes(&self) -> Vec<&str> {
        self.failures
            .iter()
            .filter_map(|err| match err {
                DiagramError::MemberWrite { class_name, .. } => Some(class_name.as_str()),
                _ => None,
            })
            .collect()
    }
}

/// Writes one Java unit per class
#[derive(Debug, Clone, Default)]
pub struct JavaGenerator {
    renderer: JavaRenderer,
}

impl JavaGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_renderer(renderer: JavaRenderer) -> Self {
        Self { renderer }
    }

    pub fn renderer(&self) -> &JavaRenderer {
        &self.renderer
    }

    /// Render and write every class
    pub fn generate<W: FileWriter + ?Sized>(
        &self,
        classes: &[UmlClass],
        writer: &mut W,
    ) -> GenerationReport {
        let generate_span = span!(Level::INFO, "generate_java", class_count = classes.len());
        let _enter = generate_span.enter();

        let mut report = GenerationReport::default();
        for class in classes {
            let unit = self.renderer.render_unit(class);
            match write_unit(writer, &unit) {
                Ok(()) => report.written.push(unit.file_name),
                Err(err) => {
                    warn!(class = %unit.class_name, error = %err, "Failed to write class");
                    report.failures.push(err);
                }
            }
        }

        info!(
            written = report.written.len(),
            failed = report.failures.len(),
            "Generation completed"
        );
        report
    }
}

fn write_unit<W: FileWriter + ?Sized>(
    writer: &mut W,
    unit: &RenderedUnit,
) -> Result<(), DiagramError> {
    writer
        .write(&unit.file_name, &unit.content)
        .map_err(|e| DiagramError::member_write(&unit.class_name, e.to_string()))
}
