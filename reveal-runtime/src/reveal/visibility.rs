//! # Visibility 模块
//!
//! 一次性可见性监听。
//!
//! 真正的交叉检测由宿主的 `IntersectionObserver` 完成，宿主把每条交叉记录作为
//! [`IntersectionSample`] 转交给对应的 [`VisibilityWatcher`]。
//! 监听器判断元素是否越过阈值，越过时产出唯一一个 [`VisibilityEvent`]，
//! 并立即取消该元素的订阅（发出 `Command::Unobserve`）。

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::command::Command;
use crate::element::ElementId;

/// 监听器标识
///
/// 每个被跟踪的元素集合对应一个监听器，宿主为每个监听器创建一个观察器。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WatcherId {
    /// 区块
    Sections,
    /// 数字展示块
    Counters,
    /// 懒加载图片
    LazyImages,
}

/// 视口边距（像素），正值扩大视口，负值收缩视口
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RootMargin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl RootMargin {
    /// 无边距
    pub fn none() -> Self {
        Self::default()
    }

    /// 仅收缩视口底部
    pub fn shrink_bottom(px: f64) -> Self {
        Self {
            bottom: -px,
            ..Self::default()
        }
    }

    /// `rootMargin` 字符串，例如 `0px 0px -100px 0px`
    pub fn css(&self) -> String {
        format!(
            "{}px {}px {}px {}px",
            self.top, self.right, self.bottom, self.left
        )
    }
}

/// 阈值配置
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdConfig {
    /// 触发所需的可见比例 (0.0 - 1.0)
    pub threshold: f64,
    /// 视口边距
    #[serde(default)]
    pub root_margin: RootMargin,
}

impl ThresholdConfig {
    pub fn new(threshold: f64, root_margin: RootMargin) -> Self {
        Self {
            threshold,
            root_margin,
        }
    }

    /// 区块默认值：可见 10%，视口底部收缩 100px
    pub fn section() -> Self {
        Self::new(0.1, RootMargin::shrink_bottom(100.0))
    }

    /// 数字块默认值：可见 50%
    pub fn counter() -> Self {
        Self::new(0.5, RootMargin::none())
    }

    /// 懒加载图片默认值：任意交叉
    pub fn lazy_image() -> Self {
        Self::new(0.0, RootMargin::none())
    }
}

/// 交叉记录
///
/// 宿主从 `IntersectionObserverEntry` 转换而来。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntersectionSample {
    pub element: ElementId,
    /// 交叉比例 (0.0 - 1.0)
    pub ratio: f64,
    /// `isIntersecting`
    pub is_intersecting: bool,
}

impl IntersectionSample {
    pub fn new(element: ElementId, ratio: f64, is_intersecting: bool) -> Self {
        Self {
            element,
            ratio,
            is_intersecting,
        }
    }
}

/// "变为可见"事件
///
/// 不可变值，由监听器产出，绑定的动画器消费一次后丢弃。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VisibilityEvent {
    pub element: ElementId,
    /// 检测时的交叉比例
    pub ratio: f64,
}

/// 订阅句柄
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription {
    pub watcher: WatcherId,
    pub element: ElementId,
}

/// 运行环境的可见性检测能力
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Capability {
    /// `IntersectionObserver` 可用
    #[default]
    Available,
    /// 不可用，监听器退化为空操作
    Unavailable,
}

/// 一次性可见性监听器
#[derive(Debug)]
pub struct VisibilityWatcher {
    id: WatcherId,
    config: ThresholdConfig,
    capability: Capability,
    subscriptions: HashSet<ElementId>,
}

impl VisibilityWatcher {
    /// 创建监听器
    pub fn new(id: WatcherId, config: ThresholdConfig, capability: Capability) -> Self {
        Self {
            id,
            config,
            capability,
            subscriptions: HashSet::new(),
        }
    }

    pub fn id(&self) -> WatcherId {
        self.id
    }

    pub fn config(&self) -> &ThresholdConfig {
        &self.config
    }

    /// 是否因能力缺失而退化为空操作
    pub fn is_inert(&self) -> bool {
        self.capability == Capability::Unavailable
    }

    /// 注册元素
    ///
    /// 能力不可用时不注册，返回 `None`，也不产生任何指令。
    pub fn register(
        &mut self,
        element: ElementId,
        out: &mut Vec<Command>,
    ) -> Option<Subscription> {
        if self.is_inert() {
            return None;
        }

        if self.subscriptions.insert(element) {
            out.push(Command::Observe {
                watcher: self.id,
                element,
                config: self.config,
            });
        }

        Some(Subscription {
            watcher: self.id,
            element,
        })
    }

    /// 处理一条交叉记录
    ///
    /// 元素首次以不低于阈值的比例进入视口时返回事件，并取消该元素的订阅。
    /// 未订阅（包括已经触发过）的元素永远返回 `None`。
    pub fn observe(
        &mut self,
        sample: IntersectionSample,
        out: &mut Vec<Command>,
    ) -> Option<VisibilityEvent> {
        if !self.subscriptions.contains(&sample.element) {
            return None;
        }

        if !self.crosses_threshold(&sample) {
            return None;
        }

        self.cancel(sample.element, out);
        Some(VisibilityEvent {
            element: sample.element,
            ratio: sample.ratio,
        })
    }

    /// 取消订阅
    pub fn cancel(&mut self, element: ElementId, out: &mut Vec<Command>) {
        if self.subscriptions.remove(&element) {
            out.push(Command::Unobserve {
                watcher: self.id,
                element,
            });
        }
    }

    pub fn is_subscribed(&self, element: ElementId) -> bool {
        self.subscriptions.contains(&element)
    }

    /// 仍在订阅中的元素数量
    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }

    // 订阅期间元素一直低于阈值，首个达标的记录就是一次上升穿越
    fn crosses_threshold(&self, sample: &IntersectionSample) -> bool {
        sample.is_intersecting && sample.ratio >= self.config.threshold
    }
}
