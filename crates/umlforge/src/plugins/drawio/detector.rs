//! draw.io format detector
//!
//! Identifies draw.io / mxGraph XML from input text.

use crate::core::Detector;

/// Detector for draw.io documents
#[derive(Debug, Clone, Copy, Default)]
pub struct DrawioDetector;

impl DrawioDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Detector for DrawioDetector {
    fn detect(&self, input: &str) -> bool {
        self.confidence(input) > 0.5
    }

    fn confidence(&self, input: &str) -> f64 {
        let trimmed = input.trim_start();
        if !trimmed.starts_with('<') {
            return 0.0;
        }

        let has_file = input.contains("<mxfile");
        let has_model = input.contains("<mxGraphModel");
        let has_cells = input.contains("<mxCell");

        if (has_file || has_model) && has_cells {
            return 1.0;
        }

        // Compressed pages: an mxfile with no inline cells
        if has_file {
            return 0.8;
        }

        if has_cells {
            return 0.6;
        }

        0.1
    }
}
