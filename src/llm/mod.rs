//! LLM 层：客户端抽象与实现（OpenAI 兼容 / Mock）

pub mod mock;
pub mod openai;
pub mod traits;

pub use mock::{ErroringLlmClient, MockLlmClient};
pub use openai::{OpenAiClient, TokenUsage, GEMINI_OPENAI_BASE_URL};
pub use traits::LlmClient;
