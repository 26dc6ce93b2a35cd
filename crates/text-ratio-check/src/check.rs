//! Check capability trait and the closed set of check kinds.
//!
//! A check compares a model's output against one reference text taken from a
//! scenario row: either the scenario's expected result or its input. Which one
//! is declared by the check's [`CheckDescriptor`].

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CheckError, Result};
use crate::length::LengthBound;
use crate::ratio::evaluate_ratio;

pub const LENGTH_BOUND: &str = "length_bound";
pub const COMPRESSION_RATIO: &str = "compression_ratio";

/// Value produced by a check.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CheckValue {
    Bool(bool),
    Float(f64),
}

impl CheckValue {
    /// Numeric score: booleans map to 1.0 / 0.0.
    pub fn as_score(&self) -> f64 {
        match self {
            CheckValue::Bool(true) => 1.0,
            CheckValue::Bool(false) => 0.0,
            CheckValue::Float(v) => *v,
        }
    }

    /// A boolean passes when true; a float passes when positive.
    pub fn passed(&self) -> bool {
        match self {
            CheckValue::Bool(b) => *b,
            CheckValue::Float(v) => *v > 0.0,
        }
    }
}

/// Output type a check declares.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputDataType {
    Bool,
    Int,
    Float,
}

/// Metadata describing a check and which scenario fields it needs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckDescriptor {
    pub name: String,
    pub description: String,
    pub requires_scenario_input: bool,
    pub requires_scenario_result: bool,
    pub output_data_type: OutputDataType,
}

/// Capability shared by every check.
pub trait TextCheck: Send + Sync + std::fmt::Debug {
    fn descriptor(&self) -> CheckDescriptor;

    /// Evaluate `candidate` against `reference`.
    fn evaluate(&self, candidate: &str, reference: &str) -> Result<CheckValue>;
}

/// The available checks, selected by value.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CheckKind {
    /// Output length within a tolerance of the expected result's length.
    LengthBound(LengthBound),
    /// Non-whitespace character ratio of output over scenario input.
    #[serde(rename = "compression_ratio")]
    WhitespaceRatio,
}

impl CheckKind {
    /// Resolve a check by its stable name, with default settings.
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            LENGTH_BOUND => Ok(CheckKind::LengthBound(LengthBound::default())),
            COMPRESSION_RATIO => Ok(CheckKind::WhitespaceRatio),
            other => Err(CheckError::UnknownCheck(other.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CheckKind::LengthBound(_) => LENGTH_BOUND,
            CheckKind::WhitespaceRatio => COMPRESSION_RATIO,
        }
    }
}

impl TextCheck for CheckKind {
    fn descriptor(&self) -> CheckDescriptor {
        match self {
            CheckKind::LengthBound(bound) => CheckDescriptor {
                name: LENGTH_BOUND.into(),
                description: format!(
                    "Pass if the model output is at most {} times as long as the scenario result",
                    bound.max_ratio
                ),
                requires_scenario_input: false,
                requires_scenario_result: true,
                output_data_type: OutputDataType::Bool,
            },
            CheckKind::WhitespaceRatio => CheckDescriptor {
                name: COMPRESSION_RATIO.into(),
                description: "Non-whitespace characters in the model output divided by \
                              non-whitespace characters of the scenario input"
                    .into(),
                requires_scenario_input: true,
                requires_scenario_result: false,
                output_data_type: OutputDataType::Float,
            },
        }
    }

    fn evaluate(&self, candidate: &str, reference: &str) -> Result<CheckValue> {
        Ok(match self {
            CheckKind::LengthBound(bound) => CheckValue::Bool(bound.check(candidate, reference)),
            CheckKind::WhitespaceRatio => CheckValue::Float(evaluate_ratio(candidate, reference)),
        })
    }
}

/// One scenario row: the scenario's input, its expected result, and the
/// output the model produced for it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioRow {
    #[serde(default)]
    pub input: Option<String>,
    #[serde(default)]
    pub result: Option<String>,
    pub model_output: String,
}

impl ScenarioRow {
    pub fn new(model_output: impl Into<String>) -> Self {
        Self {
            model_output: model_output.into(),
            ..Self::default()
        }
    }

    pub fn with_input(mut self, input: impl Into<String>) -> Self {
        self.input = Some(input.into());
        self
    }

    pub fn with_result(mut self, result: impl Into<String>) -> Self {
        self.result = Some(result.into());
        self
    }
}

/// Evaluate a check against a scenario row, using the reference field the
/// check declares. The expected result takes precedence when both are required.
pub fn evaluate_row(check: &dyn TextCheck, row: &ScenarioRow) -> Result<CheckValue> {
    let descriptor = check.descriptor();

    let reference = if descriptor.requires_scenario_result {
        row.result
            .as_deref()
            .ok_or_else(|| CheckError::MissingScenarioField {
                check: descriptor.name.clone(),
                field: "result",
            })?
    } else if descriptor.requires_scenario_input {
        row.input
            .as_deref()
            .ok_or_else(|| CheckError::MissingScenarioField {
                check: descriptor.name.clone(),
                field: "input",
            })?
    } else {
        ""
    };

    let value = check.evaluate(&row.model_output, reference)?;
    debug!(check = %descriptor.name, ?value, "row evaluated");
    Ok(value)
}
