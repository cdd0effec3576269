//! 状态定义：UiState 投影
//!
//! UI 只持有轻量的 UiState（阶段、转写、锁）；完整状态由 Orchestrator 维护并投影到 UiState。
//! 轮内的失败以回复文案（❌ 前缀）进入转写，不单独占投影字段。

use serde::Serialize;

use crate::session::Message;

/// UI 看到的「投影」状态，轻量且易于渲染
#[derive(Clone, Debug, Serialize)]
pub struct UiState {
    pub phase: AgentPhase,
    pub history: Vec<Message>,
    pub input_locked: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            phase: AgentPhase::Idle,
            history: Vec::new(),
            input_locked: false,
        }
    }
}

/// Agent 阶段（UI 投影用）：空闲，或一轮推理与调度进行中
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum AgentPhase {
    Idle,
    Thinking,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_is_idle_and_unlocked() {
        let state = UiState::default();
        assert_eq!(state.phase, AgentPhase::Idle);
        assert!(state.history.is_empty());
        assert!(!state.input_locked);
    }
}
