// Shared prompt fragments used by every flow.
// Each flow keeps its own template in flows/prompts.rs.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Builds a complete system instruction from a role description.
pub fn system_prompt(role: &str) -> String {
    format!("{role} {JSON_ONLY_SYSTEM}")
}
