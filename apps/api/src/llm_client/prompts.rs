// Shared prompt fragments. Each service that needs LLM calls defines its own
// prompts.rs alongside it; cross-cutting pieces live here.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Joins a role-specific system prompt with the JSON-only fragment.
pub fn json_system(role_prompt: &str) -> String {
    format!("{} {}", role_prompt.trim_end(), JSON_ONLY_SYSTEM)
}
