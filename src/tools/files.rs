//! 文件工具：列目录 / 读 / 写 / 删
//!
//! list_files 默认列固定根；read_file 限读前 1000 字符（有界读取，超出加截断标记）；
//! write_file 的相对路径解析到固定根而非进程工作目录，父目录自动创建，无条件覆盖；
//! delete_file 不可撤销。所有失败都转为 Failure 结果，不向外抛错。

use std::io::Read;

use async_trait::async_trait;
use serde_json::Value;

use crate::tools::folders::DesktopRoot;
use crate::tools::{Tool, ToolOutcome};

/// read_file 返回的最大字符数
pub const MAX_READ_CHARS: usize = 1000;
/// 截断标记（附在被截断内容之后）
pub const TRUNCATION_MARKER: &str = "... [file is longer, showing first 1000 characters]";
/// 有界读取的字节上限：UTF-8 下 1000 字符最多 4000 字节，多读 1 字节用于判断是否截断
const MAX_READ_BYTES: u64 = (MAX_READ_CHARS as u64) * 4 + 1;

/// list_files 工具：列出目录内容，按文件/文件夹分组并计数
pub struct ListFilesTool {
    root: DesktopRoot,
}

impl ListFilesTool {
    pub fn new(root: DesktopRoot) -> Self {
        Self { root }
    }
}

#[async_trait]
impl Tool for ListFilesTool {
    fn name(&self) -> &str {
        "list_files"
    }

    fn description(&self) -> &str {
        "List files and folders in a directory (defaults to the desktop). Args: {\"directory\": \"optional path\"}"
    }

    fn parameters_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "directory": { "type": "string", "description": "Directory path, defaults to the desktop" }
            },
            "required": []
        })
    }

    async fn execute(&self, args: Value) -> ToolOutcome {
        let dir = match args.get("directory").and_then(|v| v.as_str()) {
            Some(d) if !d.is_empty() => self.root.resolve(d),
            _ => self.root.path().to_path_buf(),
        };
        let display = dir.display().to_string();

        if !dir.exists() {
            return ToolOutcome::warning(format!("Directory '{}' does not exist", display));
        }

        let entries = match std::fs::read_dir(&dir) {
            Ok(rd) => rd,
            Err(e) => {
                return ToolOutcome::failure(format!("Error listing '{}': {}", display, e));
            }
        };

        let mut files = Vec::new();
        let mut folders = Vec::new();
        for entry in entries.flatten() {
            let name = entry.file_name().to_string_lossy().to_string();
            if entry.file_type().map(|t| t.is_dir()).unwrap_or(false) {
                folders.push(name);
            } else {
                files.push(name);
            }
        }
        files.sort();
        folders.sort();

        if files.is_empty() && folders.is_empty() {
            return ToolOutcome::success(format!("Directory '{}' is empty", display));
        }

        let mut result = format!("Contents of '{}':\n", display);
        if !folders.is_empty() {
            result.push_str(&format!(
                "\nFolders ({}): {}",
                folders.len(),
                folders.join(", ")
            ));
        }
        if !files.is_empty() {
            result.push_str(&format!("\nFiles ({}): {}", files.len(), files.join(", ")));
        }
        ToolOutcome::success(result)
    }
}

/// read_file 工具：有界读取文件前 1000 字符
pub struct ReadFileTool {
    root: DesktopRoot,
}

impl ReadFileTool {
    pub fn new(root: DesktopRoot) -> Self {
        Self { root }
    }
}

#[async_trait]
impl Tool for ReadFileTool {
    fn name(&self) -> &str {
        "read_file"
    }

    fn description(&self) -> &str {
        "Read the content of a file (first 1000 characters). Args: {\"path\": \"file path, absolute or relative to the desktop\"}"
    }

    fn parameters_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "path": { "type": "string", "description": "File path" }
            },
            "required": ["path"]
        })
    }

    async fn execute(&self, args: Value) -> ToolOutcome {
        let raw = args.get("path").and_then(|v| v.as_str()).unwrap_or("");
        if raw.is_empty() {
            return ToolOutcome::failure("read_file requires a non-empty 'path'");
        }
        let path = self.root.resolve(raw);
        if !path.is_file() {
            return ToolOutcome::warning(format!("'{}' is not a valid file", raw));
        }

        // 有界读取：最多 4*1000+1 字节，绝不把整个大文件读进内存
        let file = match std::fs::File::open(&path) {
            Ok(f) => f,
            Err(e) => return ToolOutcome::failure(format!("Error reading '{}': {}", raw, e)),
        };
        let mut buf = Vec::new();
        if let Err(e) = file.take(MAX_READ_BYTES).read_to_end(&mut buf) {
            return ToolOutcome::failure(format!("Error reading '{}': {}", raw, e));
        }
        let text = String::from_utf8_lossy(&buf);
        let mut content: String = text.chars().take(MAX_READ_CHARS).collect();
        let truncated = text.chars().count() > MAX_READ_CHARS;

        if truncated {
            content.push_str(TRUNCATION_MARKER);
        }
        ToolOutcome::success(content)
    }
}

/// write_file 工具：写入（覆盖）文件，相对路径落在固定根下
pub struct WriteFileTool {
    root: DesktopRoot,
}

impl WriteFileTool {
    pub fn new(root: DesktopRoot) -> Self {
        Self { root }
    }
}

#[async_trait]
impl Tool for WriteFileTool {
    fn name(&self) -> &str {
        "write_file"
    }

    fn description(&self) -> &str {
        "Write content to a file, overwriting it (relative paths land on the desktop). Args: {\"path\": \"file path\", \"content\": \"text\"}"
    }

    fn parameters_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "path": { "type": "string", "description": "File path" },
                "content": { "type": "string", "description": "Content to write" }
            },
            "required": ["path", "content"]
        })
    }

    async fn execute(&self, args: Value) -> ToolOutcome {
        let raw = args.get("path").and_then(|v| v.as_str()).unwrap_or("");
        if raw.is_empty() {
            return ToolOutcome::failure("write_file requires a non-empty 'path'");
        }
        let content = args.get("content").and_then(|v| v.as_str()).unwrap_or("");
        let path = self.root.resolve(raw);

        if let Some(parent) = path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                return ToolOutcome::failure(format!(
                    "Error creating parent directories for '{}': {}",
                    raw, e
                ));
            }
        }
        match std::fs::write(&path, content) {
            Ok(()) => ToolOutcome::success(format!("Content written to {}", path.display())),
            Err(e) => ToolOutcome::failure(format!("Error writing '{}': {}", raw, e)),
        }
    }
}

/// delete_file 工具：删除普通文件
pub struct DeleteFileTool {
    root: DesktopRoot,
}

impl DeleteFileTool {
    pub fn new(root: DesktopRoot) -> Self {
        Self { root }
    }
}

#[async_trait]
impl Tool for DeleteFileTool {
    fn name(&self) -> &str {
        "delete_file"
    }

    fn description(&self) -> &str {
        "Delete a file (no undo). Args: {\"path\": \"file path, absolute or relative to the desktop\"}"
    }

    fn parameters_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "path": { "type": "string", "description": "File path" }
            },
            "required": ["path"]
        })
    }

    async fn execute(&self, args: Value) -> ToolOutcome {
        let raw = args.get("path").and_then(|v| v.as_str()).unwrap_or("");
        if raw.is_empty() {
            return ToolOutcome::failure("delete_file requires a non-empty 'path'");
        }
        let path = self.root.resolve(raw);
        if !path.is_file() {
            return ToolOutcome::warning(format!("'{}' does not exist or is not a file", raw));
        }
        match std::fs::remove_file(&path) {
            Ok(()) => ToolOutcome::success(format!("File '{}' deleted successfully", raw)),
            Err(e) => ToolOutcome::failure(format!("Error deleting '{}': {}", raw, e)),
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
    async fn write_then_read_roundtrip() {
        let (_dir, root) = root();
        let write = WriteFileTool::new(root.clone());
        let read = ReadFileTool::new(root.clone());

        let out = write
            .execute(serde_json::json!({"path": "t.txt", "content": "hello"}))
            .await;
        assert_eq!(out.status, ToolStatus::Success);
        // 相对路径落在固定根下，而非进程工作目录
        assert!(root.resolve("t.txt").is_file());

        let out = read.execute(serde_json::json!({"path": "t.txt"})).await;
        assert_eq!(out.status, ToolStatus::Success);
        assert_eq!(out.message, "hello");
    }

    #[tokio::test]
    async fn read_truncates_to_first_1000_chars() {
        let (_dir, root) = root();
        let long: String = "x".repeat(2000);
        WriteFileTool::new(root.clone())
            .execute(serde_json::json!({"path": "long.txt", "content": long}))
            .await;

        let out = ReadFileTool::new(root.clone())
            .execute(serde_json::json!({"path": "long.txt"}))
            .await;
        assert_eq!(out.status, ToolStatus::Success);
        let expected = format!("{}{}", "x".repeat(1000), TRUNCATION_MARKER);
        assert_eq!(out.message, expected);
    }

    #[tokio::test]
    async fn read_missing_file_is_warning() {
        let (_dir, root) = root();
        let out = ReadFileTool::new(root)
            .execute(serde_json::json!({"path": "nope.txt"}))
            .await;
        assert_eq!(out.status, ToolStatus::Warning);
    }

    #[tokio::test]
    async fn write_creates_parent_directories() {
        let (_dir, root) = root();
        let out = WriteFileTool::new(root.clone())
            .execute(serde_json::json!({"path": "a/b/c.txt", "content": "deep"}))
            .await;
        assert_eq!(out.status, ToolStatus::Success);
        assert!(root.resolve("a/b/c.txt").is_file());
    }

    #[tokio::test]
    async fn list_missing_directory_is_warning() {
        let (_dir, root) = root();
        let out = ListFilesTool::new(root)
            .execute(serde_json::json!({"directory": "ghost"}))
            .await;
        assert_eq!(out.status, ToolStatus::Warning);
    }

    #[tokio::test]
    async fn list_partitions_files_and_folders_with_counts() {
        let (_dir, root) = root();
        WriteFileTool::new(root.clone())
            .execute(serde_json::json!({"path": "a.txt", "content": ""}))
            .await;
        WriteFileTool::new(root.clone())
            .execute(serde_json::json!({"path": "b.txt", "content": ""}))
            .await;
        std::fs::create_dir(root.resolve("sub")).unwrap();

        let out = ListFilesTool::new(root).execute(serde_json::json!({})).await;
        assert_eq!(out.status, ToolStatus::Success);
        assert!(out.message.contains("Folders (1): sub"));
        assert!(out.message.contains("Files (2): a.txt, b.txt"));
    }

    #[tokio::test]
    async fn list_empty_directory_has_own_message() {
        let (_dir, root) = root();
        let out = ListFilesTool::new(root).execute(serde_json::json!({})).await;
        assert_eq!(out.status, ToolStatus::Success);
        assert!(out.message.contains("is empty"));
    }

    #[tokio::test]
    async fn delete_file_warns_on_missing_and_removes_existing() {
        let (_dir, root) = root();
        let del = DeleteFileTool::new(root.clone());

        let out = del.execute(serde_json::json!({"path": "nope.txt"})).await;
        assert_eq!(out.status, ToolStatus::Warning);

        WriteFileTool::new(root.clone())
            .execute(serde_json::json!({"path": "gone.txt", "content": "x"}))
            .await;
        let out = del.execute(serde_json::json!({"path": "gone.txt"})).await;
        assert_eq!(out.status, ToolStatus::Success);
        assert!(!root.resolve("gone.txt").exists());
    }
}
