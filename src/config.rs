//! Analyzer configuration.
//!
//! Parse ceilings come from [`ParseLimits`]; the [`ExecutionStyle`] decides whether the submission is checked against
//! its template.

use std::fmt;
use std::str::FromStr;

use javelin_syntax::limits::ParseLimits;

/// Analyzer configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AnalyzerConfig {
    /// Resource ceilings applied to both the submission and the template
    pub limits: ParseLimits,
    /// What the analysis result is used for
    pub style: ExecutionStyle,
}

/// What an analysis is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionStyle {
    /// Run the code as written. Template validation is skipped and always reported as passed.
    #[default]
    Execution,
    /// Grade a submission. The code must match the template's declarations.
    Submission,
}

impl AnalyzerConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the parse ceilings
    pub fn with_limits(mut self, limits: ParseLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Set the execution style
    pub fn with_style(mut self, style: ExecutionStyle) -> Self {
        self.style = style;
        self
    }
}

impl fmt::Display for ExecutionStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionStyle::Execution => write!(f, "execution"),
            ExecutionStyle::Submission => write!(f, "submission"),
        }
    }
}

impl FromStr for ExecutionStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "execution" => Ok(ExecutionStyle::Execution),
            "submission" => Ok(ExecutionStyle::Submission),
            other => Err(format!("unknown execution style `{}` (expected `execution` or `submission`)", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================
    // Default config tests
    // ========================================

    #[test]
    fn test_default_config_uses_default_limits() {
        let config = AnalyzerConfig::default();
        assert_eq!(config.limits, ParseLimits::default());
        assert_eq!(config.limits.max_depth, 100);
    }

    #[test]
    fn test_default_style_is_execution() {
        assert_eq!(AnalyzerConfig::new().style, ExecutionStyle::Execution);
    }

    // ========================================
    // Builder tests
    // ========================================

    #[test]
    fn test_builder_chaining() {
        let config = AnalyzerConfig::new()
            .with_limits(ParseLimits::new().with_max_depth(10))
            .with_style(ExecutionStyle::Submission);
        assert_eq!(config.limits.max_depth, 10);
        assert_eq!(config.style, ExecutionStyle::Submission);
    }

    // ========================================
    // Style parsing tests
    // ========================================

    #[test]
    fn test_style_round_trips_through_display() {
        for style in [ExecutionStyle::Execution, ExecutionStyle::Submission] {
            assert_eq!(style.to_string().parse::<ExecutionStyle>(), Ok(style));
        }
    }

    #[test]
    fn test_style_parse_is_case_insensitive() {
        assert_eq!("Submission".parse::<ExecutionStyle>(), Ok(ExecutionStyle::Submission));
    }

    #[test]
    fn test_unknown_style_is_rejected() {
        let err = "grading".parse::<ExecutionStyle>().unwrap_err();
        assert!(err.contains("grading"));
    }
}
