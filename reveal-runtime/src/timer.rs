//! # Timer 模块
//!
//! 定时器标识与归属登记。
//!
//! Runtime 不持有真实定时器，只分配 [`TimerId`] 并通过
//! `Command::StartInterval` / `Command::StartTimeout` 请求宿主创建。
//! 宿主在定时器触发时回传 `PageInput::TimerFired`，Runtime 依据登记的
//! [`TimerOwner`] 把它分派给对应的组件。

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::element::ElementId;
use crate::page::notify::NotificationId;

/// 定时器 ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimerId(pub u64);

/// 定时器归属
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerOwner {
    /// 计数动画（计时器驱动的数字插值），值为数字展示元素
    Counter(ElementId),
    /// 提示消息的自动关闭
    Notification(NotificationId),
}

/// 定时器登记表
///
/// 只记录仍然存活的定时器。释放后的 ID 不会被复用。
#[derive(Debug, Default)]
pub struct TimerRegistry {
    next_id: u64,
    owners: HashMap<TimerId, TimerOwner>,
}

impl TimerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 分配新的定时器 ID 并登记归属
    pub fn allocate(&mut self, owner: TimerOwner) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.owners.insert(id, owner);
        id
    }

    /// 查询归属
    pub fn owner(&self, id: TimerId) -> Option<TimerOwner> {
        self.owners.get(&id).copied()
    }

    /// 释放定时器，返回原归属
    pub fn release(&mut self, id: TimerId) -> Option<TimerOwner> {
        self.owners.remove(&id)
    }

    pub fn is_live(&self, id: TimerId) -> bool {
        self.owners.contains_key(&id)
    }

    /// 存活的定时器数量
    pub fn live_count(&self) -> usize {
        self.owners.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_and_release() {
        let mut timers = TimerRegistry::new();
        let a = timers.allocate(TimerOwner::Counter(ElementId(1)));
        let b = timers.allocate(TimerOwner::Notification(NotificationId(0)));
        assert_ne!(a, b);
        assert_eq!(timers.live_count(), 2);
        assert_eq!(timers.owner(a), Some(TimerOwner::Counter(ElementId(1))));

        assert_eq!(
            timers.release(b),
            Some(TimerOwner::Notification(NotificationId(0)))
        );
        assert!(!timers.is_live(b));
        assert_eq!(timers.release(b), None);
    }

    #[test]
    fn test_ids_are_not_reused() {
        let mut timers = TimerRegistry::new();
        let a = timers.allocate(TimerOwner::Counter(ElementId(1)));
        timers.release(a);
        let b = timers.allocate(TimerOwner::Counter(ElementId(1)));
        assert!(b > a);
    }
}
