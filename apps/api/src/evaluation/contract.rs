//! The CV/job evaluation contract: request shape, result schema and the
//! validation that turns untrusted scorer output into an `EvaluationResult`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

pub const SCORE_MIN: f64 = 0.0;
pub const SCORE_MAX: f64 = 100.0;

#[derive(Debug, Error)]
pub enum EvaluationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Upstream failure: {0}")]
    UpstreamFailure(String),

    #[error("Schema violation: {0}")]
    SchemaViolation(String),
}

/// A job description paired with a CV. Constructed per call and discarded after.
///
/// Missing fields deserialize as empty strings so that they are rejected by
/// `validate` with the same error as blank ones.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationRequest {
    #[serde(default)]
    pub job_description: String,
    #[serde(default)]
    pub cv: String,
}

impl EvaluationRequest {
    #[cfg(test)]
    pub fn new(job_description: impl Into<String>, cv: impl Into<String>) -> Self {
        Self {
            job_description: job_description.into(),
            cv: cv.into(),
        }
    }

    pub fn validate(&self) -> Result<(), EvaluationError> {
        if self.job_description.trim().is_empty() {
            return Err(EvaluationError::InvalidInput(
                "job_description cannot be empty".to_string(),
            ));
        }
        if self.cv.trim().is_empty() {
            return Err(EvaluationError::InvalidInput(
                "cv cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Outcome of a CV/job evaluation. All scores are on a 0–100 scale.
///
/// `overall_score` comes from the scorer as-is; it is never recomputed from
/// the four category scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub score_skills: f64,
    pub score_experience: f64,
    pub score_qualifications: f64,
    pub score_cultural_fit: f64,
    pub overall_score: f64,
    pub feedback: String,
    pub matching_skills: Vec<String>,
    pub missing_skills: Vec<String>,
}

impl EvaluationResult {
    /// Validates raw scorer output field by field.
    ///
    /// Every field is required. Scores must be JSON numbers within
    /// [`SCORE_MIN`, `SCORE_MAX`]; numeric strings are rejected. Skill lists
    /// must be arrays of strings; blank entries are dropped and the rest trimmed.
    pub fn from_untrusted(value: &Value) -> Result<Self, EvaluationError> {
        let object = value.as_object().ok_or_else(|| {
            EvaluationError::SchemaViolation(format!(
                "expected a JSON object, got {}",
                type_name(value)
            ))
        })?;

        Ok(Self {
            score_skills: read_score(object, "score_skills")?,
            score_experience: read_score(object, "score_experience")?,
            score_qualifications: read_score(object, "score_qualifications")?,
            score_cultural_fit: read_score(object, "score_cultural_fit")?,
            overall_score: read_score(object, "overall_score")?,
            feedback: read_feedback(object)?,
            matching_skills: read_skills(object, "matching_skills")?,
            missing_skills: read_skills(object, "missing_skills")?,
        })
    }
}

fn require<'a>(
    object: &'a Map<String, Value>,
    field: &str,
) -> Result<&'a Value, EvaluationError> {
    object
        .get(field)
        .filter(|v| !v.is_null())
        .ok_or_else(|| {
            EvaluationError::SchemaViolation(format!("missing required field '{field}'"))
        })
}

fn read_score(object: &Map<String, Value>, field: &str) -> Result<f64, EvaluationError> {
    let value = require(object, field)?;
    let score = value.as_f64().ok_or_else(|| {
        EvaluationError::SchemaViolation(format!(
            "'{field}' must be a number, got {}",
            type_name(value)
        ))
    })?;

    if !(SCORE_MIN..=SCORE_MAX).contains(&score) {
        return Err(EvaluationError::SchemaViolation(format!(
            "'{field}' = {score} is outside [{SCORE_MIN}, {SCORE_MAX}]"
        )));
    }
    Ok(score)
}

fn read_feedback(object: &Map<String, Value>) -> Result<String, EvaluationError> {
    let value = require(object, "feedback")?;
    let feedback = value.as_str().ok_or_else(|| {
        EvaluationError::SchemaViolation(format!(
            "'feedback' must be a string, got {}",
            type_name(value)
        ))
    })?;

    let feedback = feedback.trim();
    if feedback.is_empty() {
        return Err(EvaluationError::SchemaViolation(
            "'feedback' cannot be empty".to_string(),
        ));
    }
    Ok(feedback.to_string())
}

fn read_skills(object: &Map<String, Value>, field: &str) -> Result<Vec<String>, EvaluationError> {
    let value = require(object, field)?;
    let items = value.as_array().ok_or_else(|| {
        EvaluationError::SchemaViolation(format!(
            "'{field}' must be an array, got {}",
            type_name(value)
        ))
    })?;

    let mut skills = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let skill = item.as_str().ok_or_else(|| {
            EvaluationError::SchemaViolation(format!(
                "'{field}[{i}]' must be a string, got {}",
                type_name(item)
            ))
        })?;
        let skill = skill.trim();
        if !skill.is_empty() {
            skills.push(skill.to_string());
        }
    }
    Ok(skills)
}

pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
