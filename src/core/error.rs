//! Agent 错误类型
//!
//! 工具层的失败不进入这里：每个工具把自身错误吞掉并转为 ToolOutcome（见 tools::outcome），
//! 执行器的超时与未注册工具名同样转为 Failure 结果。AgentError 只覆盖工具边界之外的失败
//! （LLM、解析、取消、凭证），在 Turn Runner 内被转为用户可见的失败文案，
//! 仅 MissingApiKey 会让启动失败。

use thiserror::Error;

/// 调度与启动过程中可能出现的错误
#[derive(Error, Debug)]
pub enum AgentError {
    /// 致命：凭证缺失，进程不应继续服务
    #[error("GEMINI_API_KEY is not set; define it in the environment or .env")]
    MissingApiKey,

    #[error("LLM error: {0}")]
    LlmError(String),

    #[error("JSON parse error: {0}")]
    JsonParseError(String),

    #[error("Cancelled")]
    Cancelled,
}
