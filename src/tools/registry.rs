//! 工具注册表
//!
//! 所有工具实现 Tool trait（name / description / parameters_schema / execute），
//! 由 ToolRegistry 按名注册与查找；名称在注册表内唯一（后注册同名工具会替换前者，
//! 注册阶段由启动代码保证不重名）。

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::tools::ToolOutcome;

/// 工具 trait：名称、描述（供 LLM 理解）、参数 schema、异步执行（args 为 JSON）
///
/// execute 无条件返回 ToolOutcome：工具内部的任何失败都转为 Failure 结果，不向外抛错。
#[async_trait]
pub trait Tool: Send + Sync {
    /// 工具名称（用于 JSON 中的 "tool" 字段）
    fn name(&self) -> &str;

    /// 工具描述（供 LLM 理解功能）
    fn description(&self) -> &str;

    /// 参数 JSON Schema（供 LLM 生成正确的参数格式）
    /// 默认返回空对象，表示无参数或参数格式不限
    fn parameters_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {},
            "required": []
        })
    }

    /// 执行工具
    async fn execute(&self, args: Value) -> ToolOutcome;
}

/// 工具注册表：按名称存储 Arc<dyn Tool>
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, tool: impl Tool + 'static) {
        let name = tool.name().to_string();
        self.tools.insert(name, Arc::new(tool));
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// 已注册的工具名（排序后返回，便于稳定展示）
    pub fn tool_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tools.keys().cloned().collect();
        names.sort();
        names
    }

    /// 动态生成工具 schema JSON，注入 system prompt
    pub fn to_schema_json(&self) -> String {
        let mut entries: Vec<(&String, &Arc<dyn Tool>)> = self.tools.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        let tools: Vec<serde_json::Value> = entries
            .into_iter()
            .map(|(name, tool)| {
                serde_json::json!({
                    "name": name,
                    "description": tool.description(),
                    "parameters": tool.parameters_schema()
                })
            })
            .collect();
        serde_json::to_string_pretty(&tools).unwrap_or_else(|_| "[]".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct UpperTool;

    #[async_trait]
    impl Tool for UpperTool {
        fn name(&self) -> &str {
            "upper"
        }

        fn description(&self) -> &str {
            "Uppercase text. Args: {\"text\": \"...\"}"
        }

        async fn execute(&self, args: Value) -> ToolOutcome {
            let text = args.get("text").and_then(|v| v.as_str()).unwrap_or("");
            ToolOutcome::success(text.to_uppercase())
        }
    }

    #[tokio::test]
    async fn register_get_and_execute() {
        let mut reg = ToolRegistry::new();
        reg.register(UpperTool);
        assert_eq!(reg.tool_names(), vec!["upper".to_string()]);

        let tool = reg.get("upper").expect("registered");
        let out = tool.execute(serde_json::json!({"text": "hi"})).await;
        assert_eq!(out.message, "HI");
        assert!(reg.get("missing").is_none());
    }

    #[test]
    fn schema_json_lists_registered_tools() {
        let mut reg = ToolRegistry::new();
        reg.register(UpperTool);
        let schema = reg.to_schema_json();
        assert!(schema.contains("\"upper\""));
        assert!(schema.contains("Uppercase text"));
    }
}
