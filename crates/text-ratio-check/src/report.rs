//! Aggregate scoring over a batch of scenario rows, and threshold assessment.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::check::{evaluate_row, ScenarioRow, TextCheck};
use crate::error::{CheckError, Result};

/// Scores of every check for one row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RowScores {
    pub row_index: usize,
    pub scores: BTreeMap<String, f64>,
}

/// Outcome of running a set of checks over a set of rows.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub id: String,
    pub evaluated_at: DateTime<Utc>,
    pub row_count: usize,
    pub scores_by_row: Vec<RowScores>,
    /// Mean score per check name
    pub mean_scores: BTreeMap<String, f64>,
    /// Fraction of rows each check passed
    pub pass_rates: BTreeMap<String, f64>,
}

impl EvaluationReport {
    /// Evaluate every check against every row.
    ///
    /// Fails when two checks share a name, or on the first row missing a
    /// field some check requires.
    pub fn run<C: TextCheck>(checks: &[C], rows: &[ScenarioRow]) -> Result<Self> {
        let mut names = Vec::with_capacity(checks.len());
        for check in checks {
            let name = check.descriptor().name;
            if names.contains(&name) {
                return Err(CheckError::DuplicateCheck(name));
            }
            names.push(name);
        }

        let mut scores_by_row = Vec::with_capacity(rows.len());
        let mut totals: BTreeMap<String, (f64, usize)> = BTreeMap::new();

        for (row_index, row) in rows.iter().enumerate() {
            let mut scores = BTreeMap::new();
            for (check, name) in checks.iter().zip(&names) {
                let name = name.clone();
                let value = evaluate_row(check, row)?;
                let entry = totals.entry(name.clone()).or_insert((0.0, 0));
                entry.0 += value.as_score();
                if value.passed() {
                    entry.1 += 1;
                }
                scores.insert(name, value.as_score());
            }
            scores_by_row.push(RowScores { row_index, scores });
        }

        let row_count = rows.len();
        let mut mean_scores = BTreeMap::new();
        let mut pass_rates = BTreeMap::new();
        if row_count > 0 {
            for (name, (sum, passed)) in totals {
                mean_scores.insert(name.clone(), sum / row_count as f64);
                pass_rates.insert(name, passed as f64 / row_count as f64);
            }
        }

        debug!(row_count, checks = checks.len(), "evaluation report built");

        Ok(Self {
            id: uuid::Uuid::new_v4().to_string(),
            evaluated_at: Utc::now(),
            row_count,
            scores_by_row,
            mean_scores,
            pass_rates,
        })
    }

    /// Compare aggregate scores against thresholds.
    ///
    /// Thresholds naming checks absent from the report are ignored.
    pub fn assess(&self, thresholds: &ReportThresholds) -> Assessment {
        let mut failures = Vec::new();

        for (metric, &min) in &thresholds.metrics_min {
            if let Some(&value) = self.mean_scores.get(metric) {
                if value < min {
                    failures.push(ThresholdFailure::new(metric, ThresholdKind::Min, value, min));
                }
            }
        }

        for (metric, &max) in &thresholds.metrics_max {
            if let Some(&value) = self.mean_scores.get(metric) {
                if value >= max {
                    failures.push(ThresholdFailure::new(metric, ThresholdKind::Max, value, max));
                }
            }
        }

        for (metric, &required) in &thresholds.pass_rate {
            if let Some(&value) = self.pass_rates.get(metric) {
                if value < required {
                    failures.push(ThresholdFailure::new(
                        metric,
                        ThresholdKind::PassRate,
                        value,
                        required,
                    ));
                }
            }
        }

        for failure in &failures {
            warn!(
                report = %self.id,
                metric = %failure.metric,
                kind = ?failure.kind,
                value = failure.value,
                threshold = failure.threshold,
                "threshold not met"
            );
        }

        Assessment { failures }
    }
}

/// Per-check thresholds, keyed by check name.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportThresholds {
    /// Mean score must be at least this value
    pub metrics_min: BTreeMap<String, f64>,
    /// Mean score must stay below this value
    pub metrics_max: BTreeMap<String, f64>,
    /// Fraction of passing rows must be at least this value
    pub pass_rate: BTreeMap<String, f64>,
}

impl ReportThresholds {
    pub fn with_min(mut self, metric: impl Into<String>, min: f64) -> Self {
        self.metrics_min.insert(metric.into(), min);
        self
    }

    pub fn with_max(mut self, metric: impl Into<String>, max: f64) -> Self {
        self.metrics_max.insert(metric.into(), max);
        self
    }

    pub fn with_pass_rate(mut self, metric: impl Into<String>, rate: f64) -> Self {
        self.pass_rate.insert(metric.into(), rate);
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdKind {
    Min,
    Max,
    PassRate,
}

/// A threshold the report did not meet.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ThresholdFailure {
    pub metric: String,
    pub kind: ThresholdKind,
    pub value: f64,
    pub threshold: f64,
}

impl ThresholdFailure {
    fn new(metric: &str, kind: ThresholdKind, value: f64, threshold: f64) -> Self {
        Self {
            metric: metric.to_string(),
            kind,
            value,
            threshold,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub failures: Vec<ThresholdFailure>,
}

impl Assessment {
    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }
}
