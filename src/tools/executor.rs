//! 工具执行器
//!
//! 持有 ToolRegistry 与全局超时，execute(tool_name, args) 在超时内调用工具并返回 ToolOutcome；
//! 未注册的工具名与超时都转为 Failure 结果（附可用工具列表 / 超时说明），
//! 保证 LLM 总能拿到格式良好的观察。每次调用输出结构化审计日志（JSON）。

use std::time::{Duration, Instant};

use tokio::time::timeout;

use crate::tools::{ToolOutcome, ToolRegistry};

/// 工具执行器：对每次调用施加超时，结果一律为 ToolOutcome
pub struct ToolExecutor {
    registry: ToolRegistry,
    timeout: Duration,
}

impl ToolExecutor {
    pub fn new(registry: ToolRegistry, timeout_secs: u64) -> Self {
        Self {
            registry,
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    /// 执行指定工具；未注册 -> Failure（列出可用工具名），超时 -> Failure；输出 JSON 审计日志
    pub async fn execute(&self, tool_name: &str, args: serde_json::Value) -> ToolOutcome {
        let Some(tool) = self.registry.get(tool_name) else {
            let names = self.registry.tool_names().join(", ");
            return ToolOutcome::failure(format!(
                "Unknown tool '{}'. Available tools: {}",
                tool_name, names
            ));
        };

        let start = Instant::now();
        let args_preview = args_preview(&args);
        let result = timeout(self.timeout, tool.execute(args)).await;

        let outcome = match result {
            Ok(outcome) => outcome,
            Err(_) => ToolOutcome::failure(format!(
                "Tool '{}' timed out after {}s",
                tool_name,
                self.timeout.as_secs()
            )),
        };

        let duration_ms = start.elapsed().as_millis() as u64;
        let audit = serde_json::json!({
            "event": "tool_audit",
            "tool": tool_name,
            "status": outcome.status,
            "duration_ms": duration_ms,
            "args_preview": args_preview,
        });
        tracing::info!(audit = %audit.to_string(), "tool");

        outcome
    }

    pub fn tool_names(&self) -> Vec<String> {
        self.registry.tool_names()
    }

    pub fn schema_json(&self) -> String {
        self.registry.to_schema_json()
    }
}

fn args_preview(args: &serde_json::Value) -> String {
    let s = args.to_string();
    if s.len() > 200 {
        format!("{}...", s.chars().take(200).collect::<String>())
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use serde_json::Value;

    use super::*;
    use crate::tools::Tool;

    struct SlowTool;

    #[async_trait]
    impl Tool for SlowTool {
        fn name(&self) -> &str {
            "slow"
        }

        fn description(&self) -> &str {
            "Sleeps longer than the executor timeout"
        }

        async fn execute(&self, _args: Value) -> ToolOutcome {
            tokio::time::sleep(Duration::from_secs(5)).await;
            ToolOutcome::success("woke up")
        }
    }

    #[tokio::test]
    async fn unknown_tool_is_failure_listing_names() {
        let mut reg = ToolRegistry::new();
        reg.register(SlowTool);
        let exec = ToolExecutor::new(reg, 1);
        let out = exec.execute("nope", serde_json::json!({})).await;
        assert!(out.is_failure());
        assert!(out.message.contains("slow"));
    }

    #[tokio::test(start_paused = true)]
    async fn timeout_becomes_failure_outcome() {
        let mut reg = ToolRegistry::new();
        reg.register(SlowTool);
        let exec = ToolExecutor::new(reg, 1);
        let out = exec.execute("slow", serde_json::json!({})).await;
        assert!(out.is_failure());
        assert!(out.message.contains("timed out"));
    }
}
