//! Command-line interface for the umlforge utility
//!
//! Provides a CLI to convert draw.io class diagrams into Java source files.

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use tracing::debug;

use umlforge::core::logging::init_logging;
use umlforge::core::{Database, DirectoryWriter};
use umlforge::plugins::drawio::{ClassDatabase, UmlClass};
use umlforge::plugins::java::{GenerationReport, JavaConfig};
use umlforge::plugins::Orchestrator;

/// umlforge - Convert draw.io class diagrams to Java skeletons
#[derive(Parser)]
#[command(name = "umlforge")]
#[command(about = "Generate Java class skeletons from draw.io UML class diagrams")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Set log level (trace|debug|info|warn|error)
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Set log format (compact|pretty|json)
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Log level options
#[derive(Copy, Clone, Debug, clap::ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Log format options
#[derive(Copy, Clone, Debug, clap::ValueEnum, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a draw.io diagram into one Java file per class
    Convert {
        /// Input draw.io file (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Directory receiving the generated files
        #[arg(short, long)]
        output_dir: PathBuf,

        /// Empty the output directory before writing
        #[arg(long)]
        clean: bool,

        /// Extension of the generated files
        #[arg(long, default_value = "java")]
        extension: String,
    },

    /// Print the class model parsed from a diagram
    Inspect {
        /// Input draw.io file (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Show in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Detect whether input is a draw.io document
    Detect {
        /// Input file to analyze (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Validate that a diagram parses
    Validate {
        /// Input file to validate (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
}

/// Main CLI application
pub struct UmlforgeApp {
    orchestrator: Orchestrator,
}

impl UmlforgeApp {
    /// Create a new application instance with default settings
    pub fn new() -> Self {
        Self::with_config(JavaConfig::default())
    }

    /// Create a new application instance with a Java config
    pub fn with_config(config: JavaConfig) -> Self {
        let mut orchestrator = Orchestrator::with_config(config);
        orchestrator.register_default_detectors();
        Self { orchestrator }
    }

    /// Run the application with the given CLI arguments
    pub fn run(&mut self, cli: Cli) -> Result<()> {
        // Environment variables take precedence over flags
        let log_level_str = std::env::var("UMLFORGE_LOG_LEVEL")
            .ok()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .or_else(|| Some(cli.log_level.as_str().to_string()));

        let log_format_str = std::env::var("UMLFORGE_LOG_FORMAT")
            .ok()
            .or_else(|| Some(cli.log_format.as_str().to_string()));

        if let Err(e) = init_logging(log_level_str.as_deref(), log_format_str.as_deref()) {
            eprintln!("Warning: Failed to initialize logging: {}", e);
        }

        if cli.verbose {
            eprintln!("umlforge v{}", env!("CARGO_PKG_VERSION"));
        }

        match cli.command {
            Commands::Convert {
                input,
                output_dir,
                clean,
                extension,
            } => self.convert_command(input, output_dir, clean, extension, cli.verbose),
            Commands::Inspect { input, json } => self.inspect_command(input, json, cli.verbose),
            Commands::Detect { input } => self.detect_command(input, cli.verbose),
            Commands::Validate { input } => self.validate_command(input, cli.verbose),
        }
    }

    /// Handle the convert command
    fn convert_command(
        &mut self,
        input: Option<PathBuf>,
        output_dir: PathBuf,
        clean: bool,
        extension: String,
        verbose: bool,
    ) -> Result<()> {
        let content = self.read_input(input)?;

        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        let mut orchestrator = Orchestrator::with_config(JavaConfig { extension });
        orchestrator.register_default_detectors();
        self.orchestrator = orchestrator;

        let mut writer = if clean {
            DirectoryWriter::purge(&output_dir)
        } else {
            DirectoryWriter::new(&output_dir)
        }
        .map_err(|e| {
            anyhow!(
                "Failed to prepare output directory '{}': {}",
                output_dir.display(),
                e
            )
        })?;

        let report = self.orchestrator.convert_bytes(&content, &mut writer)?;

        if verbose {
            for name in &report.written {
                eprintln!("Wrote {}", output_dir.join(name).display());
            }
        }

        check_report(&report)
    }

    /// Handle the inspect command
    fn inspect_command(&self, input: Option<PathBuf>, json: bool, verbose: bool) -> Result<()> {
        let content = self.read_input(input)?;

        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        let database = self.orchestrator.parse_bytes(&content)?;
        let output = if json {
            serde_json::to_string_pretty(&database)?
        } else {
            summarize(&database)
        };
        self.write_output(None, &output)
    }

    /// Handle the detect command
    fn detect_command(&self, input: Option<PathBuf>, verbose: bool) -> Result<()> {
        let content = self.read_input(input)?;

        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        match self
            .orchestrator
            .detect_diagram_type(&String::from_utf8_lossy(&content))
        {
            Ok(diagram_type) => {
                println!("{}", diagram_type);
                Ok(())
            }
            Err(e) => {
                eprintln!("Could not detect diagram type: {}", e);
                Err(e)
            }
        }
    }

    /// Handle the validate command
    fn validate_command(&self, input: Option<PathBuf>, verbose: bool) -> Result<()> {
        let content = self.read_input(input)?;

        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        match self.orchestrator.parse_bytes(&content) {
            Ok(database) => {
                println!(
                    "✓ Valid draw.io diagram ({} classes, {} relations)",
                    database.node_count(),
                    database.edge_count()
                );
                Ok(())
            }
            Err(e) => {
                println!("✗ Invalid draw.io diagram: {}", e);
                Err(e.into())
            }
        }
    }

    /// Read raw input bytes from file or stdin
    ///
    /// Decoding is left to the parser so invalid UTF-8 surfaces as a
    /// malformed diagram rather than an I/O failure.
    pub fn read_input(&self, input: Option<PathBuf>) -> Result<Vec<u8>> {
        let content = match input {
            Some(path) if path.to_string_lossy() != "-" => fs::read(&path)
                .map_err(|e| anyhow!("Failed to read input file '{}': {}", path.display(), e))?,
            _ => {
                let mut content = Vec::new();
                io::stdin().read_to_end(&mut content)?;
                content
            }
        };
        debug!(bytes = content.len(), "Read input");
        Ok(content)
    }

    /// Write output to file or stdout
    pub fn write_output(&self, output: Option<PathBuf>, content: &str) -> Result<()> {
        let stdout_content = if content.is_empty() || content.ends_with('\n') {
            content.to_string()
        } else {
            format!("{}\n", content)
        };

        match output {
            Some(path) if path.to_string_lossy() != "-" => {
                fs::write(&path, content).map_err(|e| {
                    anyhow!("Failed to write output file '{}': {}", path.display(), e)
                })?;
            }
            _ => {
                print!("{}", stdout_content);
                io::stdout().flush()?;
            }
        }
        Ok(())
    }

    /// Get a reference to the orchestrator (for testing)
    #[cfg(test)]
    pub fn orchestrator(&self) -> &Orchestrator {
        &self.orchestrator
    }
}

impl Default for UmlforgeApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Print one line per failed class and fail if there were any
fn check_report(report: &GenerationReport) -> Result<()> {
    if report.is_success() {
        return Ok(());
    }
    for failure in &report.failures {
        eprintln!("✗ {}", failure);
    }
    Err(anyhow!(
        "{} of {} classes could not be written",
        report.failures.len(),
        report.failures.len() + report.written.len()
    ))
}

/// Human-readable outline of a parsed model
fn summarize(database: &ClassDatabase) -> String {
    let mut lines = Vec::new();
    for class in database.classes() {
        lines.push(class_heading(class));
        for attr in &class.attributes {
            lines.push(format!(
                "  {} {}: {}",
                attr.visibility.to_char(),
                attr.name,
                attr.attr_type
            ));
        }
        for method in &class.methods {
            let params = method
                .parameters
                .iter()
                .map(|p| format!("{}: {}", p.name, p.param_type))
                .collect::<Vec<_>>()
                .join(", ");
            lines.push(format!(
                "  {} {}({}): {}",
                method.visibility.to_char(),
                method.name,
                params,
                method.return_type
            ));
        }
        for relation in &class.relations {
            lines.push(format!("  {} -> {}", relation.kind, relation.target));
        }
    }
    lines.push(format!("Total: {} classes", database.class_count()));
    lines.join("\n")
}

fn class_heading(class: &UmlClass) -> String {
    let mut heading = if class.is_abstract {
        format!("abstract class {}", class.name)
    } else {
        format!("class {}", class.name)
    };
    if !class.superclasses.is_empty() {
        heading.push_str(" extends ");
        heading.push_str(&class.superclasses.join(", "));
    }
    heading
}
