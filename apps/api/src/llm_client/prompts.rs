// Shared prompt fragments.
// Each service that needs LLM calls defines its own prompts.rs alongside it.

/// Closing instruction for prompts whose answer is parsed as JSON.
/// Gemini's v1 endpoint takes a single prompt, so this rides in the prompt itself.
pub const JSON_ONLY_INSTRUCTION: &str =
    "Return only JSON (no explanation, no markdown code fences, no surrounding text).";
