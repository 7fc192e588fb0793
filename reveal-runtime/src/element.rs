//! # Element 模块
//!
//! 定义页面元素的不透明标识，以及被引擎跟踪元素的单调触发状态。

use serde::{Deserialize, Serialize};

/// 元素标识
///
/// 由宿主在发现元素时分配，整个页面生命周期内保持稳定。
/// Runtime 不关心标识背后是什么 DOM 节点。
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct ElementId(pub u32);

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// 被跟踪元素的种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    /// 区块（淡入动画）
    Section,
    /// 数字展示块（计数动画）
    Counter,
}

/// 触发状态
///
/// # 状态转换
///
/// ```text
/// Pending ──trigger()──► Triggered
/// ```
///
/// 只允许单向转换，`Triggered` 之后不会回到 `Pending`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TriggerState {
    /// 尚未进入可见区域
    #[default]
    Pending,
    /// 已触发动画
    Triggered,
}

/// 被引擎跟踪的元素
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedElement {
    /// 元素标识
    pub id: ElementId,
    /// 元素种类
    pub kind: ElementKind,
    state: TriggerState,
}

impl TrackedElement {
    /// 创建处于 `Pending` 状态的元素
    pub fn new(id: ElementId, kind: ElementKind) -> Self {
        Self {
            id,
            kind,
            state: TriggerState::Pending,
        }
    }

    /// 当前触发状态
    pub fn state(&self) -> TriggerState {
        self.state
    }

    pub fn is_triggered(&self) -> bool {
        self.state == TriggerState::Triggered
    }

    /// 标记为已触发
    ///
    /// 返回 `true` 表示这是第一次触发；已经触发过则返回 `false`，状态不变。
    pub fn trigger(&mut self) -> bool {
        match self.state {
            TriggerState::Pending => {
                self.state = TriggerState::Triggered;
                true
            }
            TriggerState::Triggered => false,
        }
    }
}
