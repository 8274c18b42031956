// LLM prompt constants for job/CV summaries and skill extraction.

pub const JOB_SUMMARY_ROLE: &str = "You are a helpful assistant. \
    Summarize the following job description as a JSON object. \
    Break down the real-world requirements of the job in a structured way.";

pub const CV_SUMMARY_ROLE: &str = "You are a helpful assistant. \
    Summarize the following CV as a JSON object. \
    Break down the candidate's real-world experience, skills and qualifications in a structured way.";

pub const SKILLS_ROLE: &str = "You are a helpful assistant. \
    Extract and list the top 5 skills from the following CV. \
    You MUST return a JSON object in the following format: {\"skills\": [\"Python\", \"Flask\", \"Docker\"]}";

pub fn job_summary_prompt(description: &str) -> String {
    format!("Here is the job description: {}", description.trim())
}

pub fn cv_prompt(cv: &str) -> String {
    format!("Here is the CV: {}", cv.trim())
}
