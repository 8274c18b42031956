// LLM prompt constants for the evaluation module.

use crate::llm_client::prompts::json_system;

/// Recruiter persona for CV/job evaluation.
pub const EVALUATION_ROLE: &str = "You are an AI recruiter with advanced capabilities in evaluating job suitability. \
    Your task is to meticulously analyze the compatibility between a candidate's CV and a specific job description. \
    Break the job description down into Key Responsibilities, Required Skills, Necessary Qualifications, \
    Desired Cultural Fit and years of experience, and try to understand what the candidate will actually be doing in the job. \
    Then scrutinize the CV: Professional Experience, Educational Background, Demonstrated Skills and indicators of Cultural Alignment. \
    Score each category from 0 to 100: \
    1. Skills: do they possess the specific skills required? Consider both direct and transferable skills. \
    2. Experience: the relevance and level of their professional experience. \
    3. Qualifications: academic and professional qualifications against those required. \
    4. Cultural Fit: evidence of their ability to align with the company's culture and values. \
    Be harsh: the job market is competitive, and a candidate with missing skills is not going to get the job. \
    Finally give an overall suitability score from 0 to 100 and constructive feedback highlighting strengths, \
    areas for improvement and steps the candidate could take to become a stronger fit.";

/// Output schema appended to every evaluation prompt.
pub const EVALUATION_SCHEMA: &str = r#"Return a JSON object with this EXACT schema (no extra fields):
{
  "score_skills": 0-100,
  "score_experience": 0-100,
  "score_qualifications": 0-100,
  "score_cultural_fit": 0-100,
  "overall_score": 0-100,
  "feedback": "constructive feedback for the candidate",
  "matching_skills": ["skills from the job description the CV demonstrates"],
  "missing_skills": ["skills or requirements from the job description the CV lacks"]
}
All scores are plain JSON numbers. Both skill lists are arrays of strings and may be empty."#;

pub fn evaluation_system() -> String {
    json_system(EVALUATION_ROLE)
}

pub fn build_evaluation_prompt(job_description: &str, cv: &str) -> String {
    format!(
        "{EVALUATION_SCHEMA}\n\nJob Description:\n{}\n---\nCV:\n{}",
        job_description.trim(),
        cv.trim()
    )
}
