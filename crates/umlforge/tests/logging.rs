//! Tests for logging functionality
//!
//! These tests verify that logging initialization works correctly
//! with different configurations.

use std::str::FromStr;
use umlforge::core::logging::{init_logging, LogFormat};

#[test]
fn test_log_format_parsing() {
    assert_eq!(LogFormat::from_str("compact").unwrap(), LogFormat::Compact);
    assert_eq!(LogFormat::from_str("Pretty").unwrap(), LogFormat::Pretty);
    assert_eq!(LogFormat::from_str("json").unwrap(), LogFormat::Json);
    assert!(LogFormat::from_str("yaml").is_err());
}

#[test]
fn test_init_logging_invalid_format() {
    let result = init_logging(Some("info"), Some("invalid_format"));
    assert!(result.is_err());
}

#[test]
fn test_conversion_with_logging_enabled() {
    // May fail if another test already installed a subscriber
    let _ = init_logging(Some("trace"), Some("compact"));

    let units = umlforge::render(
        r#"<mxGraphModel><root>
            <mxCell id="2" value="Logged" style="swimlane;" vertex="1" parent="1"/>
            <mxCell id="3" value="+ run(): void" style="text;" vertex="1" parent="2"/>
        </root></mxGraphModel>"#,
    )
    .unwrap();
    assert_eq!(units.len(), 1);
}
