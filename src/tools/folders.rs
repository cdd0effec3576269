//! 文件夹工具：固定根目录下创建 / 删除
//!
//! DesktopRoot 绑定固定根目录（默认系统桌面），相对路径一律解析到根下；
//! CreateFolderTool / DeleteFolderTool 基于它提供 create_folder / delete_folder。
//! 删除不可撤销且无确认步骤，这是既定行为。

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;

use crate::tools::{Tool, ToolOutcome};

/// 固定根目录：文件操作的默认基准（「桌面」语义）
#[derive(Debug, Clone)]
pub struct DesktopRoot {
    root: PathBuf,
}

impl DesktopRoot {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// 系统桌面目录；取不到时退回 $HOME/Desktop
    pub fn detect() -> Self {
        let root = dirs::desktop_dir()
            .or_else(|| dirs::home_dir().map(|h| h.join("Desktop")))
            .unwrap_or_else(|| PathBuf::from("Desktop"));
        Self::new(root)
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// 相对路径解析到根下；绝对路径原样返回（read/write/delete_file 允许绝对路径）
    pub fn resolve(&self, path: &str) -> PathBuf {
        let p = Path::new(path);
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            self.root.join(p)
        }
    }
}

/// create_folder 工具：在固定根下创建目录
pub struct CreateFolderTool {
    root: DesktopRoot,
}

impl CreateFolderTool {
    pub fn new(root: DesktopRoot) -> Self {
        Self { root }
    }
}

#[async_trait]
impl Tool for CreateFolderTool {
    fn name(&self) -> &str {
        "create_folder"
    }

    fn description(&self) -> &str {
        "Create a folder with the given name on the desktop. Args: {\"name\": \"folder name\"}"
    }

    fn parameters_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "name": { "type": "string", "description": "Folder name" }
            },
            "required": ["name"]
        })
    }

    async fn execute(&self, args: Value) -> ToolOutcome {
        let name = args.get("name").and_then(|v| v.as_str()).unwrap_or("");
        if name.is_empty() {
            return ToolOutcome::failure("create_folder requires a non-empty 'name'");
        }
        let path = self.root.resolve(name);
        if path.exists() {
            return ToolOutcome::warning(format!("Folder '{}' already exists on desktop", name));
        }
        match std::fs::create_dir_all(&path) {
            Ok(()) => ToolOutcome::success(format!("Folder '{}' created on desktop", name)),
            Err(e) => ToolOutcome::failure(format!("Error creating folder '{}': {}", name, e)),
        }
    }
}

/// delete_folder 工具：递归删除固定根下的目录
pub struct DeleteFolderTool {
    root: DesktopRoot,
}

impl DeleteFolderTool {
    pub fn new(root: DesktopRoot) -> Self {
        Self { root }
    }
}

#[async_trait]
impl Tool for DeleteFolderTool {
    fn name(&self) -> &str {
        "delete_folder"
    }

    fn description(&self) -> &str {
        "Delete a folder with the given name from the desktop (recursive, no undo). Args: {\"name\": \"folder name\"}"
    }

    fn parameters_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "name": { "type": "string", "description": "Folder name" }
            },
            "required": ["name"]
        })
    }

    async fn execute(&self, args: Value) -> ToolOutcome {
        let name = args.get("name").and_then(|v| v.as_str()).unwrap_or("");
        if name.is_empty() {
            return ToolOutcome::failure("delete_folder requires a non-empty 'name'");
        }
        let path = self.root.resolve(name);
        if !path.is_dir() {
            return ToolOutcome::warning(format!("'{}' is not a valid folder on desktop", name));
        }
        match std::fs::remove_dir_all(&path) {
            Ok(()) => ToolOutcome::success(format!("Folder '{}' deleted from desktop", name)),
            Err(e) => ToolOutcome::failure(format!("Failed to delete folder '{}': {}", name, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::ToolStatus;

    fn root() -> (tempfile::TempDir, DesktopRoot) {
        let dir = tempfile::tempdir().unwrap();
        let root = DesktopRoot::new(dir.path());
        (dir, root)
    }

    #[tokio::test]
    async fn create_twice_is_success_then_warning() {
        let (_dir, root) = root();
        let tool = CreateFolderTool::new(root.clone());
        let args = serde_json::json!({"name": "Projects"});

        let first = tool.execute(args.clone()).await;
        assert_eq!(first.status, ToolStatus::Success);
        assert!(root.resolve("Projects").is_dir());

        let second = tool.execute(args).await;
        assert_eq!(second.status, ToolStatus::Warning);
        // 第二次调用不改变文件树
        assert!(root.resolve("Projects").is_dir());
    }

    #[tokio::test]
    async fn delete_missing_folder_is_warning_without_mutation() {
        let (dir, root) = root();
        let tool = DeleteFolderTool::new(root);
        let before: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();

        let out = tool.execute(serde_json::json!({"name": "ghost"})).await;
        assert_eq!(out.status, ToolStatus::Warning);

        let after: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(before.len(), after.len());
    }

    #[tokio::test]
    async fn delete_existing_folder_succeeds() {
        let (_dir, root) = root();
        CreateFolderTool::new(root.clone())
            .execute(serde_json::json!({"name": "tmp"}))
            .await;
        let out = DeleteFolderTool::new(root.clone())
            .execute(serde_json::json!({"name": "tmp"}))
            .await;
        assert_eq!(out.status, ToolStatus::Success);
        assert!(!root.resolve("tmp").exists());
    }

    #[tokio::test]
    async fn missing_name_is_failure() {
        let (_dir, root) = root();
        let out = CreateFolderTool::new(root)
            .execute(serde_json::json!({}))
            .await;
        assert_eq!(out.status, ToolStatus::Failure);
        assert!(!out.message.is_empty());
    }
}
