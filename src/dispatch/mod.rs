//! 调度层：Planner（意图解析）与 Turn Runner（单轮推理 + 工具调度循环）

pub mod planner;
pub mod runner;

pub use planner::{parse_llm_output, Planner, PlannerOutput, ToolCall};
pub use runner::run_turn;
