//! # Notify 模块
//!
//! 浮动提示消息，显示后按配置时长自动关闭。

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

use crate::command::Command;
use crate::timer::{TimerId, TimerOwner, TimerRegistry};

/// 提示消息 ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NotificationId(pub u64);

/// 提示类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationKind {
    /// 成功
    Success,
}

impl NotificationKind {
    /// 背景色
    pub fn background(&self) -> &'static str {
        match self {
            NotificationKind::Success => "#27ae60",
        }
    }
}

/// 提示消息管理器
#[derive(Debug)]
pub struct NotificationCenter {
    duration: Duration,
    next_id: u64,
    /// 活跃的提示消息及其自动关闭定时器
    active: HashMap<NotificationId, TimerId>,
}

impl NotificationCenter {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            next_id: 0,
            active: HashMap::new(),
        }
    }

    /// 显示消息，并登记自动关闭
    pub fn show(
        &mut self,
        message: impl Into<String>,
        kind: NotificationKind,
        timers: &mut TimerRegistry,
        out: &mut Vec<Command>,
    ) -> NotificationId {
        let id = NotificationId(self.next_id);
        self.next_id += 1;

        let timer = timers.allocate(TimerOwner::Notification(id));
        self.active.insert(id, timer);

        out.push(Command::ShowNotification {
            id,
            kind,
            message: message.into(),
        });
        out.push(Command::StartTimeout {
            timer,
            delay: self.duration,
        });
        id
    }

    /// 自动关闭定时器触发
    pub fn on_timer(
        &mut self,
        id: NotificationId,
        timer: TimerId,
        timers: &mut TimerRegistry,
        out: &mut Vec<Command>,
    ) {
        timers.release(timer);
        if self.active.remove(&id).is_some() {
            out.push(Command::RemoveNotification { id });
        }
    }

    /// 活跃消息数量
    pub fn active_count(&self) -> usize {
        self.active.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_then_dismiss() {
        let mut center = NotificationCenter::new(Duration::from_millis(5000));
        let mut timers = TimerRegistry::new();
        let mut out = Vec::new();

        let id = center.show("Saved", NotificationKind::Success, &mut timers, &mut out);
        assert_eq!(center.active_count(), 1);

        let timer = match out[1] {
            Command::StartTimeout { timer, delay } => {
                assert_eq!(delay, Duration::from_millis(5000));
                timer
            }
            ref other => panic!("unexpected command: {other:?}"),
        };

        out.clear();
        center.on_timer(id, timer, &mut timers, &mut out);
        assert_eq!(out, vec![Command::RemoveNotification { id }]);
        assert_eq!(center.active_count(), 0);
        assert_eq!(timers.live_count(), 0);

        // 重复触发不会再次移除
        out.clear();
        center.on_timer(id, timer, &mut timers, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn test_ids_are_distinct() {
        let mut center = NotificationCenter::new(Duration::from_millis(10));
        let mut timers = TimerRegistry::new();
        let mut out = Vec::new();
        let a = center.show("a", NotificationKind::Success, &mut timers, &mut out);
        let b = center.show("b", NotificationKind::Success, &mut timers, &mut out);
        assert_ne!(a, b);
        assert_eq!(center.active_count(), 2);
    }
}
