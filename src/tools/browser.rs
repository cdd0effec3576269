//! 浏览器工具：打开网址 / Google 搜索 / YouTube 搜索 / 常用站点
//!
//! 统一经 Launcher 打开默认浏览器（生产用 webbrowser::open，测试用记录器）；
//! 打开是 fire-and-forget，不等待也不验证浏览器结果。
//! open_popular_websites 未命中时列出全部可用站点名（可发现性约定）。

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::tools::{Tool, ToolOutcome};

/// 常用站点表：名称（小写）-> URL
pub const POPULAR_SITES: &[(&str, &str)] = &[
    ("facebook", "https://www.facebook.com"),
    ("twitter", "https://www.twitter.com"),
    ("instagram", "https://www.instagram.com"),
    ("linkedin", "https://www.linkedin.com"),
    ("github", "https://www.github.com"),
    ("stackoverflow", "https://stackoverflow.com"),
    ("reddit", "https://www.reddit.com"),
    ("wikipedia", "https://www.wikipedia.org"),
    ("amazon", "https://www.amazon.com"),
    ("netflix", "https://www.netflix.com"),
    ("spotify", "https://www.spotify.com"),
    ("gmail", "https://mail.google.com"),
    ("drive", "https://drive.google.com"),
    ("docs", "https://docs.google.com"),
    ("sheets", "https://sheets.google.com"),
    ("maps", "https://maps.google.com"),
    ("translate", "https://translate.google.com"),
    ("news", "https://news.google.com"),
    ("weather", "https://weather.com"),
];

/// 浏览器启动边界：传出一个 URL，不等待结果
pub trait Launcher: Send + Sync {
    fn open(&self, url: &str) -> Result<(), String>;
}

/// 生产实现：系统默认浏览器
pub struct SystemLauncher;

impl Launcher for SystemLauncher {
    fn open(&self, url: &str) -> Result<(), String> {
        webbrowser::open(url).map_err(|e| e.to_string())
    }
}

/// 无 scheme 的输入补 https:// 前缀
fn normalize_url(url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{}", url)
    }
}

/// open_website 工具：打开任意 URL
pub struct OpenWebsiteTool {
    launcher: Arc<dyn Launcher>,
}

impl OpenWebsiteTool {
    pub fn new(launcher: Arc<dyn Launcher>) -> Self {
        Self { launcher }
    }
}

#[async_trait]
impl Tool for OpenWebsiteTool {
    fn name(&self) -> &str {
        "open_website"
    }

    fn description(&self) -> &str {
        "Open a website in the default browser. Args: {\"url\": \"https://... or bare domain\"}"
    }

    fn parameters_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "url": { "type": "string", "description": "Website URL" }
            },
            "required": ["url"]
        })
    }

    async fn execute(&self, args: Value) -> ToolOutcome {
        let url = args.get("url").and_then(|v| v.as_str()).unwrap_or("");
        if url.is_empty() {
            return ToolOutcome::failure("open_website requires a non-empty 'url'");
        }
        let url = normalize_url(url);
        match self.launcher.open(&url) {
            Ok(()) => ToolOutcome::success(format!("Opened website: {}", url)),
            Err(e) => ToolOutcome::failure(format!("Error opening website: {}", e)),
        }
    }
}

/// google_search 工具：打开 Google 搜索结果页
pub struct GoogleSearchTool {
    launcher: Arc<dyn Launcher>,
}

impl GoogleSearchTool {
    pub fn new(launcher: Arc<dyn Launcher>) -> Self {
        Self { launcher }
    }
}

#[async_trait]
impl Tool for GoogleSearchTool {
    fn name(&self) -> &str {
        "google_search"
    }

    fn description(&self) -> &str {
        "Search Google and open the results page. Args: {\"query\": \"search terms\"}"
    }

    fn parameters_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "query": { "type": "string", "description": "Search query" }
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, args: Value) -> ToolOutcome {
        let query = args.get("query").and_then(|v| v.as_str()).unwrap_or("");
        if query.is_empty() {
            return ToolOutcome::failure("google_search requires a non-empty 'query'");
        }
        let url = format!(
            "https://www.google.com/search?q={}",
            urlencoding::encode(query)
        );
        match self.launcher.open(&url) {
            Ok(()) => ToolOutcome::success(format!("Opened Google search for: '{}'", query)),
            Err(e) => ToolOutcome::failure(format!("Error performing Google search: {}", e)),
        }
    }
}

/// youtube_search 工具：打开 YouTube 搜索结果页
pub struct YoutubeSearchTool {
    launcher: Arc<dyn Launcher>,
}

impl YoutubeSearchTool {
    pub fn new(launcher: Arc<dyn Launcher>) -> Self {
        Self { launcher }
    }
}

#[async_trait]
impl Tool for YoutubeSearchTool {
    fn name(&self) -> &str {
        "youtube_search"
    }

    fn description(&self) -> &str {
        "Search YouTube and open the results page. Args: {\"query\": \"search terms\"}"
    }

    fn parameters_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "query": { "type": "string", "description": "Search query" }
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, args: Value) -> ToolOutcome {
        let query = args.get("query").and_then(|v| v.as_str()).unwrap_or("");
        if query.is_empty() {
            return ToolOutcome::failure("youtube_search requires a non-empty 'query'");
        }
        let url = format!(
            "https://www.youtube.com/results?search_query={}",
            urlencoding::encode(query)
        );
        match self.launcher.open(&url) {
            Ok(()) => ToolOutcome::success(format!("Opened YouTube search for: '{}'", query)),
            Err(e) => ToolOutcome::failure(format!("Error performing YouTube search: {}", e)),
        }
    }
}

/// open_popular_websites 工具：按名字打开常用站点
pub struct PopularSitesTool {
    launcher: Arc<dyn Launcher>,
}

impl PopularSitesTool {
    pub fn new(launcher: Arc<dyn Launcher>) -> Self {
        Self { launcher }
    }

    /// 全部可用站点名（表序）
    pub fn site_names() -> Vec<&'static str> {
        POPULAR_SITES.iter().map(|(name, _)| *name).collect()
    }
}

#[async_trait]
impl Tool for PopularSitesTool {
    fn name(&self) -> &str {
        "open_popular_websites"
    }

    fn description(&self) -> &str {
        "Open a popular website by name (facebook, twitter, github, ...). Args: {\"site_name\": \"name\"}"
    }

    fn parameters_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "site_name": { "type": "string", "description": "Popular site name, case-insensitive" }
            },
            "required": ["site_name"]
        })
    }

    async fn execute(&self, args: Value) -> ToolOutcome {
        let site_name = args.get("site_name").and_then(|v| v.as_str()).unwrap_or("");
        if site_name.is_empty() {
            return ToolOutcome::failure("open_popular_websites requires a non-empty 'site_name'");
        }
        let lookup = site_name.to_lowercase();
        match POPULAR_SITES.iter().find(|(name, _)| *name == lookup) {
            Some((_, url)) => match self.launcher.open(url) {
                Ok(()) => ToolOutcome::success(format!("Opened {}: {}", site_name, url)),
                Err(e) => ToolOutcome::failure(format!("Error opening {}: {}", site_name, e)),
            },
            None => ToolOutcome::warning(format!(
                "'{}' not found. Available sites: {}",
                site_name,
                Self::site_names().join(", ")
            )),
        }
    }
}
