//! Agent 编排器：主控循环
//!
//! 负责：加载配置、校验凭证、创建 LLM/工具/Planner，建立 cmd/state 双通道，
//! 并在后台任务中消费用户命令（Submit/Cancel/Clear/Quit）。一次只跑一轮：
//! Submit 在当前轮完成前不会被并发处理，期间输入上锁。

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;

use crate::config::{load_config, AppConfig};
use crate::core::{AgentError, AgentPhase, UiState};
use crate::dispatch::{run_turn, Planner};
use crate::llm::{LlmClient, OpenAiClient};
use crate::session::{Message, Session};
use crate::tools::{
    CreateFolderTool, DeleteFileTool, DeleteFolderTool, DesktopRoot, GoogleSearchTool,
    ListFilesTool, OpenWebsiteTool, PopularSitesTool, ReadFileTool, SystemLauncher, ToolExecutor,
    ToolRegistry, WriteFileTool, YoutubeSearchTool,
};

/// 从 UI 发往编排器的用户命令
#[derive(Debug, Clone)]
pub enum Command {
    /// 提交用户输入，触发一轮推理与调度
    Submit(String),
    /// 取消当前轮（在调度步之间生效）
    Cancel,
    /// 清空会话转写
    Clear,
    /// 退出应用
    Quit,
}

/// 注册全部工具：文件/文件夹操作绑定固定根，浏览器操作共享一个 Launcher
pub fn build_registry(root: DesktopRoot) -> ToolRegistry {
    let launcher = Arc::new(SystemLauncher);
    let mut tools = ToolRegistry::new();
    tools.register(CreateFolderTool::new(root.clone()));
    tools.register(DeleteFolderTool::new(root.clone()));
    tools.register(ListFilesTool::new(root.clone()));
    tools.register(ReadFileTool::new(root.clone()));
    tools.register(WriteFileTool::new(root.clone()));
    tools.register(DeleteFileTool::new(root));
    tools.register(OpenWebsiteTool::new(launcher.clone()));
    tools.register(GoogleSearchTool::new(launcher.clone()));
    tools.register(YoutubeSearchTool::new(launcher.clone()));
    tools.register(PopularSitesTool::new(launcher));
    tools
}

/// 凭证与客户端：GEMINI_API_KEY 缺失是致命错误，进程不应继续
fn create_llm_from_config(cfg: &AppConfig) -> Result<Arc<dyn LlmClient>, AgentError> {
    let api_key = std::env::var("GEMINI_API_KEY").map_err(|_| AgentError::MissingApiKey)?;
    tracing::info!(model = %cfg.llm.model, "Using OpenAI-compatible LLM endpoint");
    Ok(Arc::new(OpenAiClient::new(
        cfg.llm.base_url.as_deref(),
        &cfg.llm.model,
        &api_key,
    )))
}

/// 创建 Agent 运行时：返回命令发送端与状态接收端；后台任务消费命令并更新状态。
pub async fn create_agent(
    config_path: Option<PathBuf>,
) -> anyhow::Result<(mpsc::UnboundedSender<Command>, watch::Receiver<UiState>)> {
    let cfg = load_config(config_path).unwrap_or_else(|e| {
        tracing::warn!("Config load failed ({}), using defaults", e);
        AppConfig::default()
    });

    // 固定根：配置 > 系统桌面目录
    let root = match cfg.app.desktop_root.clone() {
        Some(path) => DesktopRoot::new(path),
        None => DesktopRoot::detect(),
    };
    std::fs::create_dir_all(root.path()).ok();
    tracing::info!(root = %root.path().display(), "Desktop root");

    let llm = create_llm_from_config(&cfg)?;
    let executor = ToolExecutor::new(build_registry(root), cfg.tools.tool_timeout_secs);
    let planner = Planner::new(llm, &executor);
    let max_context_turns = cfg.app.max_context_turns;

    // 双通道：UI -> Core 命令；Core -> UI 状态快照
    let (cmd_tx, mut cmd_rx) = mpsc::unbounded_channel::<Command>();
    let (state_tx, state_rx) = watch::channel(UiState::default());

    let mut session = Session::new();
    let mut cancel_token = CancellationToken::new();

    tokio::spawn(async move {
        while let Some(cmd) = cmd_rx.recv().await {
            match cmd {
                Command::Submit(input) => {
                    // 本轮的用户消息先进入转写并上锁
                    session.append(Message::user(input.clone()));
                    let _ = state_tx.send(UiState {
                        phase: AgentPhase::Thinking,
                        history: session.snapshot(),
                        input_locked: true,
                    });

                    // 每轮一个新的取消令牌，不在轮与轮之间泄漏取消状态
                    cancel_token = CancellationToken::new();
                    let usage_before = planner.token_usage();
                    let history = session.context_window(max_context_turns);
                    // context_window 已含刚追加的用户消息，去掉以免重复
                    let context = &history[..history.len().saturating_sub(1)];

                    // 轮内仍监听命令通道，Cancel/Quit 能触发取消；
                    // 输入已上锁，轮内到达的 Submit/Clear 直接丢弃
                    let mut quit_after = false;
                    let reply = {
                        let turn =
                            run_turn(&planner, &executor, context, &input, cancel_token.clone());
                        tokio::pin!(turn);
                        loop {
                            tokio::select! {
                                reply = &mut turn => break reply,
                                cmd = cmd_rx.recv() => match cmd {
                                    Some(Command::Cancel) => cancel_token.cancel(),
                                    Some(Command::Quit) | None => {
                                        cancel_token.cancel();
                                        quit_after = true;
                                    }
                                    Some(_) => {}
                                },
                            }
                        }
                    };

                    let (prompt, completion, total) = planner.token_usage();
                    tracing::info!(
                        prompt_tokens = prompt.saturating_sub(usage_before.0),
                        completion_tokens = completion.saturating_sub(usage_before.1),
                        cumulative_tokens = total,
                        "Turn finished"
                    );

                    session.append(Message::assistant(reply));
                    let _ = state_tx.send(UiState {
                        phase: AgentPhase::Idle,
                        history: session.snapshot(),
                        input_locked: false,
                    });
                    if quit_after {
                        break;
                    }
                }
                Command::Cancel => {
                    cancel_token.cancel();
                }
                Command::Clear => {
                    session.clear();
                    let _ = state_tx.send(UiState {
                        phase: AgentPhase::Idle,
                        history: vec![],
                        input_locked: false,
                    });
                }
                Command::Quit => break,
            }
        }
    });

    Ok((cmd_tx, state_rx))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_carries_the_full_action_set() {
        let dir = tempfile::tempdir().unwrap();
        let reg = build_registry(DesktopRoot::new(dir.path()));
        let names = reg.tool_names();
        for expected in [
            "create_folder",
            "delete_folder",
            "list_files",
            "read_file",
            "write_file",
            "delete_file",
            "open_website",
            "google_search",
            "youtube_search",
            "open_popular_websites",
        ] {
            assert!(names.iter().any(|n| n == expected), "missing {}", expected);
        }
        assert_eq!(names.len(), 10);
    }

    #[test]
    fn missing_api_key_is_fatal() {
        // 确保环境中无凭证（测试进程内）
        std::env::remove_var("GEMINI_API_KEY");
        let err = create_llm_from_config(&AppConfig::default()).err().unwrap();
        assert!(matches!(err, AgentError::MissingApiKey));
    }
}
