//! Palette analysis
//!
//! Scores harmony, contrast and accessibility for any palette and turns the
//! numbers into short human-readable observations.

pub mod analyzer;
mod observations;
pub mod report;

pub use analyzer::{accessibility_issues, max_contrast_ratio, PaletteAnalyzer};
pub use report::{AccessibilityIssue, IssueSeverity, PaletteAnalysis};
