//! Plugin orchestrator for coordinating the conversion pipeline
//!
//! The orchestrator runs the flow of data through the plugins:
//! Detector → Parser → Database → Renderer → FileWriter

use std::collections::HashMap;

use anyhow::Result;
use tracing::{debug, info, span, trace, warn, Level};

use crate::core::{DiagramError, Detector, FileWriter};
use crate::plugins::drawio::{ClassDatabase, DrawioDetector, DrawioParser};
use crate::plugins::java::{GenerationReport, JavaConfig, JavaGenerator, JavaRenderer, RenderedUnit};

/// Plugin orchestrator that coordinates the entire pipeline
///
/// Holds no per-conversion state: one instance can serve any number of
/// conversions, each given its own writer.
pub struct Orchestrator {
    detectors: HashMap<String, Box<dyn Detector>>,
    parser: DrawioParser,
    generator: JavaGenerator,
}

impl Orchestrator {
    /// Create an orchestrator with default Java output and no detectors
    pub fn new() -> Self {
        Self::with_config(JavaConfig::default())
    }

    /// Create an orchestrator with a specific Java configuration
    pub fn with_config(config: JavaConfig) -> Self {
        Self {
            detectors: HashMap::new(),
            parser: DrawioParser::new(),
            generator: JavaGenerator::with_renderer(JavaRenderer::with_config(config)),
        }
    }

    /// Register a detector plugin
    pub fn register_detector(&mut self, name: String, detector: Box<dyn Detector>) {
        self.detectors.insert(name, detector);
    }

    /// Register the built-in detectors
    pub fn register_default_detectors(&mut self) {
        self.register_detector("drawio".to_string(), Box::new(DrawioDetector::new()));
    }

    /// Get available detector names
    pub fn get_detectors(&self) -> Vec<String> {
        self.detectors.keys().cloned().collect()
    }

    /// Detect the diagram format of input text
    pub fn detect_diagram_type(&self, input: &str) -> Result<String> {
        let detect_span = span!(Level::INFO, "detect_diagram_type", input_len = input.len());
        let _enter = detect_span.enter();

        for (name, detector) in &self.detectors {
            let confidence = detector.confidence(input);
            trace!(detector = name, confidence, "Checking detector");
            if detector.detect(input) {
                info!(detector = name, confidence, "Detected diagram type");
                return Ok(name.clone());
            }
        }

        warn!("No suitable detector found for input");
        Err(anyhow::anyhow!("No suitable detector found for input"))
    }

    /// Parse input into a fresh class database
    pub fn parse(&self, input: &str) -> Result<ClassDatabase, DiagramError> {
        self.parser.parse_classes(input).map(ClassDatabase::from)
    }

    /// Parse raw file bytes; non-UTF-8 input is a malformed diagram
    pub fn parse_bytes(&self, input: &[u8]) -> Result<ClassDatabase, DiagramError> {
        self.parser.parse_bytes(input).map(ClassDatabase::from)
    }

    /// Parse and render every class in memory
    pub fn render(&self, input: &str) -> Result<Vec<RenderedUnit>, DiagramError> {
        let database = self.parse(input)?;
        let renderer = self.generator.renderer();
        Ok(database
            .classes()
            .iter()
            .map(|class| renderer.render_unit(class))
            .collect())
    }

    /// Run the full pipeline, writing one unit per class
    ///
    /// A parse failure is returned before anything is written. Write
    /// failures are collected in the report.
    pub fn convert<W: FileWriter + ?Sized>(
        &self,
        input: &str,
        writer: &mut W,
    ) -> Result<GenerationReport, DiagramError> {
        self.convert_bytes(input.as_bytes(), writer)
    }

    /// [`Orchestrator::convert`] over raw file bytes
    pub fn convert_bytes<W: FileWriter + ?Sized>(
        &self,
        input: &[u8],
        writer: &mut W,
    ) -> Result<GenerationReport, DiagramError> {
        let convert_span = span!(Level::INFO, "convert_diagram", input_len = input.len());
        let _enter = convert_span.enter();

        info!("Starting conversion pipeline");

        let database = self.parse_bytes(input)?;
        debug!(class_count = database.class_count(), "Parsing completed");

        let report = self.generator.generate(database.classes(), writer);
        if report.is_success() {
            info!(written = report.written.len(), "Pipeline completed successfully");
        } else {
            warn!(
                written = report.written.len(),
                failed = report.failures.len(),
                "Pipeline completed with failures"
            );
        }
        Ok(report)
    }
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self::new()
    }
}
