//! Analysis result types

use serde::{Deserialize, Serialize};

/// How badly a color pair fails WCAG AA for body text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    /// Below 4.5:1 but at least 3:1, readable only as large text
    Moderate,
    /// Below 3:1, unreadable as text at any size
    Severe,
}

/// One WCAG finding for a pair of palette colors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessibilityIssue {
    pub message: String,
    pub suggestion: String,
    pub severity: IssueSeverity,
    /// 0-based palette positions of the pair
    pub colors: (usize, usize),
    pub contrast_ratio: f32,
}

/// Everything the analyzer derives from a palette
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaletteAnalysis {
    /// Share of hue pairs on a harmonious angle, 0-100
    pub harmony_score: f32,
    /// Highest contrast over all color pairs, at least 1
    pub max_contrast_ratio: f32,
    /// Pairs under 4.5:1, in pair order
    pub accessibility_issues: Vec<AccessibilityIssue>,
    pub harmony_strengths: Vec<String>,
    pub harmony_suggestions: Vec<String>,
    /// Mean HSL lightness, 0-1
    pub average_brightness: f32,
    /// Mean HSL saturation, 0-1
    pub average_saturation: f32,
}

impl PaletteAnalysis {
    /// Whether any pair fails even the large-text threshold
    pub fn has_severe_issues(&self) -> bool {
        self.accessibility_issues
            .iter()
            .any(|issue| issue.severity == IssueSeverity::Severe)
    }
}
