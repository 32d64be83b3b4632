//! 将通知写入日志

use async_trait::async_trait;
use ports::{Notification, NotificationLevel, Notifier};
use tracing::{info, warn};

/// 日志通知器，无界面时使用
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

#[async_trait]
impl Notifier for TracingNotifier {
    async fn notify(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Success => info!(text = %notification.message, "User notification"),
            NotificationLevel::Error => warn!(text = %notification.message, "User notification"),
        }
    }
}
