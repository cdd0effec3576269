//! Deskmate - 自然语言驱动的桌面文件管理与网页浏览助手
//!
//! 模块划分：
//! - **config**: 应用配置加载（TOML + 环境变量）
//! - **core**: 错误、状态投影、编排主循环
//! - **dispatch**: Planner（意图解析）与 Turn Runner（单轮推理 + 工具调度）
//! - **llm**: LLM 客户端抽象与实现（OpenAI 兼容 / Mock）
//! - **session**: 只追加的会话转写
//! - **tools**: 动作目录（文件/文件夹/浏览器工具）与执行器
//! - **ui**: Ratatui TUI 界面

pub mod config;
pub mod core;
pub mod dispatch;
pub mod llm;
pub mod session;
pub mod tools;
pub mod ui;
