//! Free-form job/CV summaries and top-skill extraction.
//!
//! Summaries are passed through as JSON objects without a fixed schema; skill
//! extraction has a small contract (`{"skills": [string]}`) that is enforced.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::analysis::prompts::{
    cv_prompt, job_summary_prompt, CV_SUMMARY_ROLE, JOB_SUMMARY_ROLE, SKILLS_ROLE,
};
use crate::errors::AppError;
use crate::evaluation::contract::type_name;
use crate::llm_client::prompts::json_system;
use crate::llm_client::ChatModel;

pub mod handlers;
pub mod prompts;

pub const TOP_SKILLS: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillSet {
    pub skills: Vec<String>,
}

pub async fn summarize_job(model: &dyn ChatModel, description: &str) -> Result<Value, AppError> {
    require_text("description", description)?;
    let summary = model
        .chat_json(&json_system(JOB_SUMMARY_ROLE), &job_summary_prompt(description))
        .await
        .map_err(|e| AppError::Upstream(format!("Job summary failed: {e}")))?;
    require_object("job summary", summary)
}

pub async fn summarize_cv(model: &dyn ChatModel, cv: &str) -> Result<Value, AppError> {
    require_text("cv", cv)?;
    let summary = model
        .chat_json(&json_system(CV_SUMMARY_ROLE), &cv_prompt(cv))
        .await
        .map_err(|e| AppError::Upstream(format!("CV summary failed: {e}")))?;
    require_object("CV summary", summary)
}

/// Asks the model for the CV's top skills. At most `TOP_SKILLS` are kept.
pub async fn extract_top_skills(model: &dyn ChatModel, cv: &str) -> Result<SkillSet, AppError> {
    require_text("cv", cv)?;
    let raw = model
        .chat_json(&json_system(SKILLS_ROLE), &cv_prompt(cv))
        .await
        .map_err(|e| AppError::Upstream(format!("Skill extraction failed: {e}")))?;
    parse_skill_set(&raw)
}

fn parse_skill_set(raw: &Value) -> Result<SkillSet, AppError> {
    let items = raw
        .get("skills")
        .and_then(Value::as_array)
        .ok_or_else(|| {
            AppError::SchemaViolation(
                "expected an object with a 'skills' array".to_string(),
            )
        })?;

    let mut skills = Vec::with_capacity(TOP_SKILLS);
    for item in items {
        let skill = item.as_str().ok_or_else(|| {
            AppError::SchemaViolation(format!("skills must be strings, got {}", type_name(item)))
        })?;
        let skill = skill.trim();
        if !skill.is_empty() && skills.len() < TOP_SKILLS {
            skills.push(skill.to_string());
        }
    }
    Ok(SkillSet { skills })
}

fn require_text(field: &str, text: &str) -> Result<(), AppError> {
    if text.trim().is_empty() {
        return Err(AppError::InvalidInput(format!("{field} cannot be empty")));
    }
    Ok(())
}

fn require_object(what: &str, value: Value) -> Result<Value, AppError> {
    if value.is_object() {
        Ok(value)
    } else {
        Err(AppError::SchemaViolation(format!(
            "{what} must be a JSON object, got {}",
            type_name(&value)
        )))
    }
}
