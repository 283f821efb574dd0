//! Core detector trait for identifying diagram formats

/// Identifies whether raw input belongs to a given diagram format
pub trait Detector: Send + Sync {
    /// Whether the input is recognized
    fn detect(&self, input: &str) -> bool;

    /// Confidence in the range `0.0..=1.0`
    fn confidence(&self, input: &str) -> f64;
}
