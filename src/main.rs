//! Deskmate 入口：初始化日志、校验凭证、创建编排器与 TUI，并运行主循环。

use anyhow::Context;
use deskmate::{core::create_agent, ui::run_app};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 日志：默认 info，可通过 RUST_LOG 覆盖
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive("info".parse().unwrap()))
        .with(fmt::layer())
        .init();

    // 创建 Agent：凭证缺失在这里直接失败，带可见诊断
    let (cmd_tx, state_rx) = create_agent(None).await.context("Failed to start agent")?;

    // 启动 TUI 主循环（消费 state_rx，向 cmd_tx 发送用户命令）
    run_app(state_rx, cmd_tx).await.context("App run failed")?;

    Ok(())
}
