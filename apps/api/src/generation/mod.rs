// MCQ generation: prompt building, the single Gemini call, and parsing of the
// model's text into questions. All LLM calls go through llm_client.

pub mod generator;
pub mod handlers;
pub mod models;
pub mod prompts;
