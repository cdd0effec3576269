//! 对话会话：消息与只追加的转写记录
//!
//! Session 保存完整的 user/assistant 对话，只追加或整体清空，供 UI 渲染；
//! context_window 返回最近 N 轮的副本供 LLM 上下文使用，不修改转写本身。

use serde::{Deserialize, Serialize};

/// 消息角色（与 LLM API 一致）
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    User,
    Assistant,
    System,
}

/// 单条消息
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }
}

/// 会话转写：只追加的消息序列，顺序即渲染顺序
///
/// 不做持久化，进程结束即消失；清空是唯一的删除方式。
#[derive(Clone, Debug, Default)]
pub struct Session {
    messages: Vec<Message>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, msg: Message) {
        self.messages.push(msg);
    }

    /// 完整转写快照（渲染用）
    pub fn snapshot(&self) -> Vec<Message> {
        self.messages.clone()
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    /// 最近 max_turns 轮（每轮约 user + assistant 两条）的副本，供 LLM 上下文；
    /// 转写本身不被剪枝
    pub fn context_window(&self, max_turns: usize) -> Vec<Message> {
        let keep = max_turns * 2;
        if self.messages.len() <= keep {
            self.messages.clone()
        } else {
            self.messages[self.messages.len() - keep..].to_vec()
        }
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_preserves_order_and_clear_empties() {
        let mut s = Session::new();
        s.append(Message::user("a"));
        s.append(Message::assistant("b"));
        let snap = s.snapshot();
        assert_eq!(snap.len(), 2);
        assert_eq!(snap[0], Message::user("a"));
        assert_eq!(snap[1], Message::assistant("b"));

        s.clear();
        assert!(s.snapshot().is_empty());
        assert!(s.is_empty());
    }

    #[test]
    fn context_window_limits_without_mutating() {
        let mut s = Session::new();
        for i in 0..10 {
            s.append(Message::user(format!("u{}", i)));
            s.append(Message::assistant(format!("a{}", i)));
        }
        let window = s.context_window(3);
        assert_eq!(window.len(), 6);
        assert_eq!(window[0].content, "u7");
        // 转写完整保留
        assert_eq!(s.len(), 20);
        assert_eq!(s.snapshot()[0].content, "u0");
    }

    #[test]
    fn context_window_returns_all_when_short() {
        let mut s = Session::new();
        s.append(Message::user("hi"));
        assert_eq!(s.context_window(5).len(), 1);
    }
}
