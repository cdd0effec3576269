//! 工具调用结果
//!
//! 每次工具调用产出一个 ToolOutcome（状态 + 非空文案），工具边界内不向外抛错：
//! 任何 I/O 失败都在工具内部捕获并转为 Failure 结果，保证 LLM 总能拿到格式良好的观察。

use std::fmt;

use serde::Serialize;

/// 调用状态：成功 / 警告（未执行变更）/ 失败
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ToolStatus {
    Success,
    Warning,
    Failure,
}

/// 单次工具调用的结果：状态 + 人类可读文案（非空）
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToolOutcome {
    pub status: ToolStatus,
    pub message: String,
}

impl ToolOutcome {
    fn new(status: ToolStatus, message: impl Into<String>) -> Self {
        let mut message = message.into();
        // 文案非空是观察格式的硬约束，空串替换为占位文案
        if message.is_empty() {
            message = "(no output)".to_string();
        }
        Self { status, message }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(ToolStatus::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(ToolStatus::Warning, message)
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(ToolStatus::Failure, message)
    }

    pub fn is_failure(&self) -> bool {
        self.status == ToolStatus::Failure
    }
}

impl fmt::Display for ToolOutcome {
    /// 渲染为「状态符号 + 文案」，直接作为观察喂回 LLM / 显示在转写中
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = match self.status {
            ToolStatus::Success => "✅",
            ToolStatus::Warning => "⚠️",
            ToolStatus::Failure => "❌",
        };
        write!(f, "{} {}", mark, self.message)
    }
}
