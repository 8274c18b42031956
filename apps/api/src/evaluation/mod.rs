// CV / job evaluation: contract, scorer backends and the HTTP handler.
// All LLM calls go through llm_client via the ChatModel trait.

pub mod contract;
pub mod handlers;
pub mod keyword;
pub mod prompts;
pub mod scorer;
