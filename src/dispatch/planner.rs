//! Planner：意图规划与 Tool Call 解析
//!
//! 调用 LLM 得到回复或 JSON Tool Call；parse_llm_output 从文本中提取 JSON 并解析为
//! 结构化的 ToolCall 或直接回复——边界是结构化的，没有任何「剥离内部痕迹文本」的启发式。

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::AgentError;
use crate::llm::LlmClient;
use crate::session::Message;
use crate::tools::{tool_call_schema_json, ToolExecutor};

/// LLM 返回的 Tool Call（简化 JSON：{"tool": "create_folder", "args": {"name": "..."}}）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    pub tool: String,
    #[serde(default)]
    pub args: serde_json::Value,
}

/// Planner 输出：结构化的「最终回复」或「工具调用」
#[derive(Debug, Clone)]
pub enum PlannerOutput {
    /// 直接回复用户
    Response(String),
    /// 需要执行工具
    ToolCall(ToolCall),
}

/// 解析 LLM 输出：若含有效 JSON 且 tool 非空则为 ToolCall，否则为 Response
pub fn parse_llm_output(output: &str) -> Result<PlannerOutput, AgentError> {
    let trimmed = output.trim();

    // 尝试提取 JSON 块（```json ... ``` 或纯 JSON）
    let json_str = if let Some(start) = trimmed.find("```json") {
        let rest = &trimmed[start + 7..];
        rest.find("```")
            .map(|end| rest[..end].trim())
            .unwrap_or(rest.trim())
    } else if trimmed.starts_with('{') {
        match trimmed.rfind('}') {
            Some(end) => &trimmed[..=end],
            None => trimmed,
        }
    } else {
        return Ok(PlannerOutput::Response(trimmed.to_string()));
    };

    let parsed: ToolCall = serde_json::from_str(json_str)
        .map_err(|e| AgentError::JsonParseError(format!("{}: {}", e, json_str)))?;

    if parsed.tool.is_empty() {
        Ok(PlannerOutput::Response(trimmed.to_string()))
    } else {
        Ok(PlannerOutput::ToolCall(parsed))
    }
}

/// 基础 system prompt：助手身份与工具使用规则
const BASE_SYSTEM_PROMPT: &str = "\
You are Deskmate, a file and folder manager with web browsing capabilities.

FILE OPERATIONS: create, delete, list, read and write files and folders on the desktop.
WEB OPERATIONS: search Google or YouTube, open any website by URL, open popular websites by name.

To use a tool, reply with exactly one JSON object and nothing else:
{\"tool\": \"tool_name\", \"args\": {...}}
When you have the final answer for the user, reply with plain text (no JSON).
Always explain what you did in the final answer.";

/// Planner：持有 LLM，system prompt 由基础身份 + 工具目录 + tool call Schema 拼成
pub struct Planner {
    llm: Arc<dyn LlmClient>,
    system_prompt: String,
}

impl Planner {
    /// 根据执行器中注册的工具组装 system prompt
    pub fn new(llm: Arc<dyn LlmClient>, executor: &ToolExecutor) -> Self {
        let system_prompt = format!(
            "{}\n\nAvailable tools:\n{}\n\nTool call JSON Schema:\n{}",
            BASE_SYSTEM_PROMPT,
            executor.schema_json(),
            tool_call_schema_json()
        );
        Self { llm, system_prompt }
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    /// 获取 LLM 累计 token 使用统计
    pub fn token_usage(&self) -> (u64, u64, u64) {
        self.llm.token_usage()
    }

    /// 拼 system + 对话消息后调用 LLM
    pub async fn plan(&self, messages: &[Message]) -> Result<String, AgentError> {
        let mut full_messages = vec![Message::system(self.system_prompt.clone())];
        full_messages.extend(messages.to_vec());
        self.llm
            .complete(&full_messages)
            .await
            .map_err(AgentError::LlmError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_response() {
        match parse_llm_output("Done, I created the folder.").unwrap() {
            PlannerOutput::Response(text) => assert_eq!(text, "Done, I created the folder."),
            other => panic!("expected response, got {:?}", other),
        }
    }

    #[test]
    fn bare_json_is_tool_call() {
        let out = parse_llm_output(r#"{"tool": "create_folder", "args": {"name": "Projects"}}"#)
            .unwrap();
        match out {
            PlannerOutput::ToolCall(tc) => {
                assert_eq!(tc.tool, "create_folder");
                assert_eq!(tc.args["name"], "Projects");
            }
            other => panic!("expected tool call, got {:?}", other),
        }
    }

    #[test]
    fn fenced_json_is_tool_call() {
        let raw = "```json\n{\"tool\": \"list_files\", \"args\": {}}\n```";
        match parse_llm_output(raw).unwrap() {
            PlannerOutput::ToolCall(tc) => assert_eq!(tc.tool, "list_files"),
            other => panic!("expected tool call, got {:?}", other),
        }
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let err = parse_llm_output(r#"{"tool": "oops"#).unwrap_err();
        assert!(matches!(err, AgentError::JsonParseError(_)));
    }

    #[test]
    fn empty_tool_field_falls_back_to_response() {
        match parse_llm_output(r#"{"tool": "", "args": {}}"#).unwrap() {
            PlannerOutput::Response(_) => {}
            other => panic!("expected response, got {:?}", other),
        }
    }

    #[test]
    fn token_usage_delegates_to_llm() {
        let llm = Arc::new(crate::llm::MockLlmClient::scripted(Vec::<String>::new()));
        let executor = ToolExecutor::new(crate::tools::ToolRegistry::new(), 5);
        let planner = Planner::new(llm, &executor);
        // Mock 客户端无计费统计，走 trait 默认值
        assert_eq!(planner.token_usage(), (0, 0, 0));
    }
}
