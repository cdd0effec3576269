//! 工具箱：文件/文件夹操作、浏览器操作与执行器
//!
//! 每个工具是独立、无共享状态的一次性操作；结果一律为 ToolOutcome，
//! 错误从不越过工具边界。

pub mod browser;
pub mod executor;
pub mod files;
pub mod folders;
pub mod outcome;
pub mod registry;
pub mod schema;

pub use browser::{
    GoogleSearchTool, Launcher, OpenWebsiteTool, PopularSitesTool, SystemLauncher,
    YoutubeSearchTool, POPULAR_SITES,
};
pub use executor::ToolExecutor;
pub use files::{DeleteFileTool, ListFilesTool, ReadFileTool, WriteFileTool};
pub use folders::{CreateFolderTool, DeleteFolderTool, DesktopRoot};
pub use outcome::{ToolOutcome, ToolStatus};
pub use registry::{Tool, ToolRegistry};
pub use schema::tool_call_schema_json;
