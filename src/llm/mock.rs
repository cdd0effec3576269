//! Mock LLM 客户端（用于测试，无需 API）
//!
//! 按脚本顺序返回预设输出，便于驱动「工具调用 -> 最终回复」的调度测试；
//! 脚本耗尽后返回固定文本。ErroringLlmClient 恒返回错误，测试失败路径。

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::llm::LlmClient;
use crate::session::Message;

/// Mock 客户端：按脚本顺序吐出输出
#[derive(Debug, Default)]
pub struct MockLlmClient {
    script: Mutex<VecDeque<String>>,
}

impl MockLlmClient {
    pub fn scripted(outputs: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            script: Mutex::new(outputs.into_iter().map(Into::into).collect()),
        }
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(&self, _messages: &[Message]) -> Result<String, String> {
        Ok(self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| "(mock: script exhausted)".to_string()))
    }
}

/// 恒失败的客户端：模拟远端不可达
#[derive(Debug, Default)]
pub struct ErroringLlmClient;

#[async_trait]
impl LlmClient for ErroringLlmClient {
    async fn complete(&self, _messages: &[Message]) -> Result<String, String> {
        Err("connection refused".to_string())
    }
}
