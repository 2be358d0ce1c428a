/// OpenAI-compatible provider
pub mod openai;
