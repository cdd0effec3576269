//! Turn Runner：单轮「推理 + 调度」循环
//!
//! 一次用户输入对应一次 run_turn 调用：Plan -> 解析 -> 若 ToolCall 则执行并把观察写回 ->
//! 再 Plan，直到拿到最终回复；有最大步数限制。调用方永远拿到一个展示字符串，
//! 链路中的任何失败（LLM、解析、步数耗尽、取消）都被转为失败文案，不向上抛错。

use tokio_util::sync::CancellationToken;

use crate::core::AgentError;
use crate::dispatch::{parse_llm_output, Planner, PlannerOutput};
use crate::session::Message;
use crate::tools::ToolExecutor;

/// 单轮内最大调度步数，防止死循环
const MAX_DISPATCH_STEPS: usize = 10;
/// 连续 JSON 格式错误的纠正重试次数（成功解析一次即清零）
const MAX_PARSE_RETRIES: usize = 2;

/// 执行一轮对话：history 为会话上下文（不被修改），input 为本轮用户输入。
/// 返回值始终是一条可直接展示的回复文案。
pub async fn run_turn(
    planner: &Planner,
    executor: &ToolExecutor,
    history: &[Message],
    input: &str,
    cancel_token: CancellationToken,
) -> String {
    match run_turn_inner(planner, executor, history, input, cancel_token).await {
        Ok(reply) => reply,
        Err(AgentError::Cancelled) => "⚠️ Cancelled by user".to_string(),
        Err(e) => format!("❌ Error running agent: {}", e),
    }
}

async fn run_turn_inner(
    planner: &Planner,
    executor: &ToolExecutor,
    history: &[Message],
    input: &str,
    cancel_token: CancellationToken,
) -> Result<String, AgentError> {
    // 本轮工作消息：会话上下文 + 用户输入 + 工具往返（轮末即弃，只留最终回复进会话）
    let mut messages: Vec<Message> = history.to_vec();
    messages.push(Message::user(input));

    let mut parse_retries = 0;

    for step in 0..MAX_DISPATCH_STEPS {
        if cancel_token.is_cancelled() {
            return Err(AgentError::Cancelled);
        }

        let output = planner.plan(&messages).await?;
        tracing::debug!(step, output_len = output.len(), "planner output");

        match parse_llm_output(&output) {
            Ok(PlannerOutput::Response(reply)) => return Ok(reply),
            Ok(PlannerOutput::ToolCall(tc)) => {
                // 重试预算只约束连续的格式错误，解析成功即恢复
                parse_retries = 0;
                tracing::info!(tool = %tc.tool, "dispatching tool");
                let outcome = executor.execute(&tc.tool, tc.args).await;
                let observation = outcome.to_string();
                // 工具调用与观察写回工作消息，供下一步规划
                messages.push(Message::assistant(format!("Tool call: {}", tc.tool)));
                messages.push(Message::user(format!(
                    "Observation from {}: {}",
                    tc.tool, observation
                )));
            }
            Err(AgentError::JsonParseError(raw)) => {
                parse_retries += 1;
                if parse_retries > MAX_PARSE_RETRIES {
                    return Err(AgentError::JsonParseError(raw));
                }
                // 纠正提示后重试
                messages.push(Message::user(format!(
                    "Your last output was not valid JSON ({}). To call a tool, reply with \
                     exactly one JSON object: {{\"tool\": \"name\", \"args\": {{...}}}}. \
                     To answer the user, reply with plain text only.",
                    raw
                )));
            }
            Err(e) => return Err(e),
        }
    }

    Err(AgentError::LlmError(format!(
        "No final reply after {} dispatch steps",
        MAX_DISPATCH_STEPS
    )))
}
