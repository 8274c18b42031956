//! KeywordCvScorer: pure-Rust scorer. Fast, deterministic, no LLM call.
//!
//! Algorithm:
//! 1. Split the job description into requirement phrases (`,` `;` `|` bullets, newlines).
//! 2. A phrase containing "N years" / "N+ years" sets the experience requirement.
//!    Remaining words, minus role titles and filler, become skill keywords;
//!    degree/certification words become qualification keywords.
//! 3. A keyword matches when it appears as a word in the CV.
//! 4. score_skills = matched / total × 100
//!    score_experience = min(cv_years / required_years, 1) × 100 (100 when no years are required)
//!    score_qualifications = matched qualification terms / total × 100 (mirrors skills when none are named)
//!    score_cultural_fit = 50 (not observable from keywords)
//!    overall_score = 0.4·skills + 0.3·experience + 0.2·qualifications + 0.1·cultural_fit

use std::collections::HashSet;

use async_trait::async_trait;
use serde_json::Value;

use crate::evaluation::contract::{EvaluationError, EvaluationRequest, EvaluationResult};
use crate::evaluation::scorer::CvScorer;

const NEUTRAL_CULTURAL_FIT: f64 = 50.0;

const WEIGHT_SKILLS: f64 = 0.4;
const WEIGHT_EXPERIENCE: f64 = 0.3;
const WEIGHT_QUALIFICATIONS: f64 = 0.2;
const WEIGHT_CULTURAL_FIT: f64 = 0.1;

const PHRASE_SEPARATORS: &[char] = &[',', ';', '|', '\n', '•', '·'];

const YEAR_WORDS: &[&str] = &["years", "year", "yrs", "yr"];

const QUALIFICATION_WORDS: &[&str] = &[
    "degree",
    "bachelor",
    "bachelors",
    "bsc",
    "master",
    "masters",
    "msc",
    "mba",
    "phd",
    "doctorate",
    "certification",
    "certified",
    "certificate",
];

const FILLER_WORDS: &[&str] = &[
    "a", "an", "and", "or", "the", "of", "in", "on", "for", "with", "to", "at", "as", "is", "are",
    "be", "by", "our", "we", "you", "your", "will", "must", "have", "has", "plus", "strong",
    "solid", "good", "excellent", "knowledge", "skills", "skill", "ability", "required",
    "preferred", "nice", "bonus", "experience", "experienced", "expertise", "proficiency",
    "proficient", "familiarity", "familiar", "understanding", "background", "using", "including",
    "etc", "e.g", "i.e", "no", "not", "senior", "junior", "mid", "level", "lead", "principal",
    "staff", "engineer", "engineers", "engineering", "developer", "developers", "role", "team",
    "work", "working", "years", "year", "yrs", "yr", "looking", "seeking", "hiring", "join",
    "joining", "help", "helping", "build", "building", "who", "what", "which", "that", "this",
    "these", "those", "about", "it", "its", "us", "they", "their", "can", "should", "would", "from",
    "into", "within", "across", "new", "great", "ideal", "candidate", "someone", "like", "also",
    "more", "all", "any", "other", "opportunity", "company", "passionate",
];

/// A JD keyword with its original spelling and its comparison form.
#[derive(Debug, Clone)]
struct Keyword {
    display: String,
    normalized: String,
}

#[derive(Debug, Default)]
struct JdRequirements {
    skills: Vec<Keyword>,
    qualifications: Vec<Keyword>,
    required_years: Option<u32>,
}

pub struct KeywordCvScorer;

#[async_trait]
impl CvScorer for KeywordCvScorer {
    async fn score(&self, request: &EvaluationRequest) -> Result<Value, EvaluationError> {
        let result = compute_keyword_evaluation(&request.job_description, &request.cv);
        serde_json::to_value(result)
            .map_err(|e| EvaluationError::UpstreamFailure(format!("keyword scorer output: {e}")))
    }

    fn backend(&self) -> &'static str {
        "keyword"
    }
}

fn compute_keyword_evaluation(job_description: &str, cv: &str) -> EvaluationResult {
    let requirements = parse_requirements(job_description);
    let cv_tokens = tokenize(cv);
    let cv_words: HashSet<&str> = cv_tokens.iter().map(String::as_str).collect();
    let cv_years = max_years(&cv_tokens);

    let (matching_skills, mut missing_skills) = partition(&requirements.skills, &cv_words);

    let score_skills = ratio_score(matching_skills.len(), requirements.skills.len());

    let score_experience = match requirements.required_years {
        Some(required) if required > 0 => {
            let have = cv_years.unwrap_or(0);
            if have < required {
                missing_skills.push(format!("{required}+ years experience"));
            }
            (f64::from(have) / f64::from(required)).min(1.0) * 100.0
        }
        _ => 100.0,
    };

    let score_qualifications = if requirements.qualifications.is_empty() {
        score_skills
    } else {
        let (matched, missing) = partition(&requirements.qualifications, &cv_words);
        missing_skills.extend(missing);
        ratio_score(matched.len(), requirements.qualifications.len())
    };

    let overall_score = round1(
        WEIGHT_SKILLS * score_skills
            + WEIGHT_EXPERIENCE * score_experience
            + WEIGHT_QUALIFICATIONS * score_qualifications
            + WEIGHT_CULTURAL_FIT * NEUTRAL_CULTURAL_FIT,
    );

    let feedback = build_feedback(&requirements, overall_score, &missing_skills);

    EvaluationResult {
        score_skills: round1(score_skills),
        score_experience: round1(score_experience),
        score_qualifications: round1(score_qualifications),
        score_cultural_fit: NEUTRAL_CULTURAL_FIT,
        overall_score,
        feedback,
        matching_skills,
        missing_skills,
    }
}

fn parse_requirements(job_description: &str) -> JdRequirements {
    let mut requirements = JdRequirements::default();
    let mut seen = HashSet::new();

    for phrase in job_description.split(PHRASE_SEPARATORS) {
        let words = split_words(phrase);
        let normalized: Vec<String> = words.iter().map(|w| w.to_lowercase()).collect();

        if let Some(years) = max_years(&normalized) {
            requirements.required_years = requirements.required_years.max(Some(years));
        }

        for (display, norm) in words.iter().zip(&normalized) {
            if is_numeric(norm) || FILLER_WORDS.contains(&norm.as_str()) || norm.len() < 2 {
                continue;
            }
            if !seen.insert(norm.clone()) {
                continue;
            }
            let keyword = Keyword {
                display: display.to_string(),
                normalized: norm.clone(),
            };
            if QUALIFICATION_WORDS.contains(&norm.as_str()) {
                requirements.qualifications.push(keyword);
            } else {
                requirements.skills.push(keyword);
            }
        }
    }

    requirements
}

/// Splits into (matched, missing) display names, preserving JD order.
fn partition(keywords: &[Keyword], cv_words: &HashSet<&str>) -> (Vec<String>, Vec<String>) {
    let mut matched = Vec::new();
    let mut missing = Vec::new();
    for keyword in keywords {
        if cv_words.contains(keyword.normalized.as_str()) {
            matched.push(keyword.display.clone());
        } else {
            missing.push(keyword.display.clone());
        }
    }
    (matched, missing)
}

/// Word split that keeps `+`, `#` and inner dots so "C++", "C#" and "Node.js" survive.
fn split_words(text: &str) -> Vec<&str> {
    text.split(|c: char| !(c.is_alphanumeric() || matches!(c, '+' | '#' | '.')))
        .map(|w| w.trim_end_matches('.'))
        .filter(|w| !w.is_empty())
        .collect()
}

fn tokenize(text: &str) -> Vec<String> {
    split_words(text).into_iter().map(str::to_lowercase).collect()
}

fn is_numeric(token: &str) -> bool {
    token.chars().all(|c| c.is_ascii_digit() || c == '+')
}

/// Largest N in "N years" / "N+ years" / "N yrs" among lowercase tokens.
fn max_years(tokens: &[String]) -> Option<u32> {
    tokens
        .windows(2)
        .filter(|pair| YEAR_WORDS.contains(&pair[1].as_str()))
        .filter_map(|pair| pair[0].trim_end_matches('+').parse::<u32>().ok())
        .max()
}

fn ratio_score(matched: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    matched as f64 / total as f64 * 100.0
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn build_feedback(requirements: &JdRequirements, score: f64, missing: &[String]) -> String {
    if requirements.skills.is_empty() && requirements.required_years.is_none() {
        return "No recognizable requirements in the job description; keyword scoring is not meaningful."
            .to_string();
    }

    let top_gaps: Vec<&str> = missing.iter().take(3).map(String::as_str).collect();

    if missing.is_empty() {
        format!("Strong fit ({score}/100). The CV covers every listed requirement.")
    } else if score >= 60.0 {
        format!(
            "Moderate fit ({score}/100). Consider adding evidence for: {}.",
            top_gaps.join(", ")
        )
    } else {
        format!(
            "Low fit ({score}/100). Significant gaps: {}.",
            top_gaps.join(", ")
        )
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
