//! 用户通知 trait 定义

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// 通知级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Success,
    Error,
}

/// 面向用户的通知消息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.level == NotificationLevel::Success
    }
}

/// 通知发送者 trait
///
/// 通知是尽力而为的，发送失败不影响调用方
#[async_trait]
pub trait Notifier: Send + Sync {
    /// 发送通知
    async fn notify(&self, notification: Notification);

    /// 成功提示
    async fn success(&self, message: &str) {
        self.notify(Notification::success(message)).await;
    }

    /// 错误提示
    async fn error(&self, message: &str) {
        self.notify(Notification::error(message)).await;
    }
}
