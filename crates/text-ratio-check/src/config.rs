//! Check configuration

use serde::{Deserialize, Serialize};

use crate::check::{CheckKind, COMPRESSION_RATIO, LENGTH_BOUND};
use crate::error::{CheckError, Result};
use crate::length::{LengthBound, DEFAULT_LENGTH_TOLERANCE};
use crate::report::ReportThresholds;

/// Which checks to run, how to tune them, and what a passing report looks like.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChecksConfig {
    /// Tolerance for the length bound check
    pub length_tolerance: f64,

    /// Check names to run, in order
    pub checks: Vec<String>,

    /// Report thresholds
    pub thresholds: ReportThresholds,
}

impl Default for ChecksConfig {
    fn default() -> Self {
        Self {
            length_tolerance: DEFAULT_LENGTH_TOLERANCE,
            checks: vec![LENGTH_BOUND.to_string(), COMPRESSION_RATIO.to_string()],
            thresholds: ReportThresholds::default(),
        }
    }
}

impl ChecksConfig {
    /// Parse configuration from TOML.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Build the configured checks, applying the length tolerance.
    ///
    /// Each check may be named only once.
    pub fn build_checks(&self) -> Result<Vec<CheckKind>> {
        let mut built: Vec<CheckKind> = Vec::with_capacity(self.checks.len());
        for name in &self.checks {
            let kind = match CheckKind::from_name(name)? {
                CheckKind::LengthBound(_) => {
                    CheckKind::LengthBound(LengthBound::new(self.length_tolerance)?)
                }
                kind => kind,
            };
            if built.iter().any(|existing| existing.name() == kind.name()) {
                return Err(CheckError::DuplicateCheck(name.clone()));
            }
            built.push(kind);
        }
        Ok(built)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::ScenarioRow;
    use crate::report::EvaluationReport;

    #[test]
    fn test_default_config() {
        let config = ChecksConfig::default();
        assert_eq!(config.length_tolerance, 1.1);
        assert_eq!(
            config.build_checks().unwrap(),
            vec![
                CheckKind::LengthBound(LengthBound::default()),
                CheckKind::WhitespaceRatio
            ]
        );
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(ChecksConfig::from_toml_str("").unwrap(), ChecksConfig::default());
    }

    #[test]
    fn test_parse_full_config() {
        let config = ChecksConfig::from_toml_str(
            r#"
            length_tolerance = 1.25
            checks = ["length_bound"]

            [thresholds.metrics_min]
            length_bound = 0.8

            [thresholds.pass_rate]
            length_bound = 0.9
            "#,
        )
        .unwrap();

        assert_eq!(config.length_tolerance, 1.25);
        assert_eq!(
            config.build_checks().unwrap(),
            vec![CheckKind::LengthBound(LengthBound { max_ratio: 1.25 })]
        );
        assert_eq!(config.thresholds.metrics_min["length_bound"], 0.8);
        assert_eq!(config.thresholds.pass_rate["length_bound"], 0.9);
        assert!(config.thresholds.metrics_max.is_empty());
    }

    #[test]
    fn test_unknown_check_rejected() {
        let config = ChecksConfig::from_toml_str(r#"checks = ["compression_ratio", "tone"]"#)
            .unwrap();
        assert_eq!(
            config.build_checks(),
            Err(CheckError::UnknownCheck("tone".into()))
        );
    }

    #[test]
    fn test_duplicate_check_rejected() {
        let config =
            ChecksConfig::from_toml_str(r#"checks = ["length_bound", "length_bound"]"#).unwrap();
        assert_eq!(
            config.build_checks(),
            Err(CheckError::DuplicateCheck(LENGTH_BOUND.into()))
        );
    }

    #[test]
    fn test_built_checks_report_unit_means() {
        let checks = ChecksConfig::from_toml_str(r#"checks = ["length_bound"]"#)
            .unwrap()
            .build_checks()
            .unwrap();
        let rows = vec![ScenarioRow::new("Billing").with_result("Billing")];
        let report = EvaluationReport::run(&checks, &rows).unwrap();
        assert_eq!(report.mean_scores[LENGTH_BOUND], 1.0);
        assert_eq!(report.pass_rates[LENGTH_BOUND], 1.0);
    }

    #[test]
    fn test_invalid_tolerance_rejected() {
        let config = ChecksConfig::from_toml_str("length_tolerance = -2.0").unwrap();
        assert_eq!(
            config.build_checks(),
            Err(CheckError::InvalidTolerance(-2.0))
        );
    }

    #[test]
    fn test_malformed_toml() {
        let err = ChecksConfig::from_toml_str("checks = [").unwrap_err();
        assert!(matches!(err, CheckError::Config(_)));
    }
}
