//! # Engine 模块
//!
//! 淡入与计数引擎的组合根。
//!
//! 初始化时枚举所有区块与数字块，为每个元素按种类注册订阅，并把两个监听器的
//! 事件分别接到 [`RevealAnimator`] 与 [`CounterAnimator`]。
//!
//! "每个元素最多动画一次"由两道相互独立的机制保证：
//! 监听器在首次触发后取消订阅，引擎在分派前检查元素的 [`TriggerState`]。
//!
//! [`TriggerState`]: crate::element::TriggerState

use std::collections::HashMap;

use crate::command::Command;
use crate::config::PageConfig;
use crate::element::{ElementId, ElementKind, TrackedElement};
use crate::layout::{PageLayout, PageQuery};
use crate::reveal::animator::{RevealAnimator, RevealStyle};
use crate::reveal::counter::CounterAnimator;
use crate::reveal::visibility::{Capability, IntersectionSample, VisibilityWatcher, WatcherId};
use crate::timer::{TimerId, TimerRegistry};

/// 被跟踪的数字块
#[derive(Debug)]
struct TrackedCounter {
    element: TrackedElement,
    display: Option<ElementId>,
}

/// 淡入与计数引擎
#[derive(Debug)]
pub struct RevealEngine {
    /// 文档顺序的区块
    section_order: Vec<ElementId>,
    sections: HashMap<ElementId, TrackedElement>,
    counter_order: Vec<ElementId>,
    counters: HashMap<ElementId, TrackedCounter>,
    section_watcher: VisibilityWatcher,
    counter_watcher: VisibilityWatcher,
    reveal: RevealAnimator,
    counter: CounterAnimator,
}

impl RevealEngine {
    /// 从布局创建引擎
    pub fn new(config: &PageConfig, layout: &PageLayout, capability: Capability) -> Self {
        let mut section_order = Vec::new();
        let mut sections = HashMap::new();
        for node in &layout.sections {
            if sections
                .insert(
                    node.element,
                    TrackedElement::new(node.element, ElementKind::Section),
                )
                .is_none()
            {
                section_order.push(node.element);
            }
        }

        let mut counter_order = Vec::new();
        let mut counters = HashMap::new();
        for node in &layout.counters {
            let tracked = TrackedCounter {
                element: TrackedElement::new(node.fact, ElementKind::Counter),
                display: node.display,
            };
            if counters.insert(node.fact, tracked).is_none() {
                counter_order.push(node.fact);
            }
        }

        Self {
            section_order,
            sections,
            counter_order,
            counters,
            section_watcher: VisibilityWatcher::new(
                WatcherId::Sections,
                config.reveal.section,
                capability,
            ),
            counter_watcher: VisibilityWatcher::new(
                WatcherId::Counters,
                config.reveal.counter,
                capability,
            ),
            reveal: RevealAnimator::new(RevealStyle::fade_in()),
            counter: CounterAnimator::new(&config.counter),
        }
    }

    /// 建立初始状态并开始观察
    ///
    /// 区块先隐藏再注册。检测能力不可用时区块不隐藏，以免内容永远不可见。
    pub fn start(&mut self, out: &mut Vec<Command>) {
        if !self.section_watcher.is_inert() {
            for &element in &self.section_order {
                self.reveal.prepare(element, out);
                self.section_watcher.register(element, out);
            }
        }

        for &element in &self.counter_order {
            self.counter_watcher.register(element, out);
        }
    }

    /// 处理一条交叉记录
    ///
    /// 返回 `false` 表示该监听器不归引擎管理。
    pub fn on_visibility(
        &mut self,
        watcher: WatcherId,
        sample: IntersectionSample,
        query: &dyn PageQuery,
        timers: &mut TimerRegistry,
        out: &mut Vec<Command>,
    ) -> bool {
        match watcher {
            WatcherId::Sections => {
                let Some(event) = self.section_watcher.observe(sample, out) else {
                    return true;
                };
                let Some(tracked) = self.sections.get_mut(&event.element) else {
                    return true;
                };
                if tracked.trigger() {
                    self.reveal.on_visible(event, out);
                }
                true
            }
            WatcherId::Counters => {
                let Some(event) = self.counter_watcher.observe(sample, out) else {
                    return true;
                };
                let Some(tracked) = self.counters.get_mut(&event.element) else {
                    return true;
                };
                if !tracked.element.trigger() {
                    return true;
                }
                if let Some(display) = tracked.display {
                    let text = query.text_content(display).unwrap_or_default();
                    self.counter.on_visible(display, &text, timers, out);
                }
                true
            }
            WatcherId::LazyImages => false,
        }
    }

    /// 处理定时器
    ///
    /// 返回 `false` 表示该定时器不属于任何计数。
    pub fn on_timer(
        &mut self,
        timer: TimerId,
        timers: &mut TimerRegistry,
        out: &mut Vec<Command>,
    ) -> bool {
        self.counter.on_tick(timer, timers, out)
    }

    /// 查询被跟踪的元素
    pub fn tracked(&self, element: ElementId) -> Option<&TrackedElement> {
        self.sections
            .get(&element)
            .or_else(|| self.counters.get(&element).map(|c| &c.element))
    }

    /// 尚未触发的元素数量
    pub fn pending_count(&self) -> usize {
        let sections = self.sections.values().filter(|e| !e.is_triggered()).count();
        let counters = self
            .counters
            .values()
            .filter(|c| !c.element.is_triggered())
            .count();
        sections + counters
    }

    /// 计数动画器
    pub fn counter(&self) -> &CounterAnimator {
        &self.counter
    }

    /// 淡入效果
    pub fn reveal_style(&self) -> &RevealStyle {
        self.reveal.style()
    }
}
