//! # Lazy Image 模块
//!
//! 图片懒加载：图片首次进入视口时，把 `data-src` 写入 `src`。
//!
//! 使用独立的 [`VisibilityWatcher`]，与淡入引擎没有共享状态。
//! 运行环境没有 `IntersectionObserver` 时整个功能静默跳过。

use std::collections::HashMap;

use crate::command::{Command, LogLevel};
use crate::element::ElementId;
use crate::layout::LazyImageNode;
use crate::reveal::visibility::{
    Capability, IntersectionSample, ThresholdConfig, VisibilityWatcher, WatcherId,
};

/// 图片懒加载
#[derive(Debug)]
pub struct LazyImageLoader {
    watcher: VisibilityWatcher,
    order: Vec<ElementId>,
    sources: HashMap<ElementId, Option<String>>,
}

impl LazyImageLoader {
    pub fn new(images: &[LazyImageNode], config: ThresholdConfig, capability: Capability) -> Self {
        let mut order = Vec::new();
        let mut sources = HashMap::new();
        for image in images {
            if sources
                .insert(image.element, image.data_src.clone())
                .is_none()
            {
                order.push(image.element);
            }
        }

        Self {
            watcher: VisibilityWatcher::new(WatcherId::LazyImages, config, capability),
            order,
            sources,
        }
    }

    /// 开始观察所有图片
    pub fn start(&mut self, out: &mut Vec<Command>) {
        if self.watcher.is_inert() {
            if !self.order.is_empty() {
                out.push(Command::log(
                    LogLevel::Debug,
                    "IntersectionObserver 不可用，跳过图片懒加载",
                ));
            }
            return;
        }

        for &element in &self.order {
            self.watcher.register(element, out);
        }
    }

    /// 处理一条交叉记录
    pub fn on_visibility(&mut self, sample: IntersectionSample, out: &mut Vec<Command>) {
        let Some(event) = self.watcher.observe(sample, out) else {
            return;
        };
        if let Some(Some(src)) = self.sources.remove(&event.element) {
            out.push(Command::SetAttribute {
                element: event.element,
                name: "src".to_string(),
                value: src,
            });
        }
    }

    /// 尚未加载的图片数量
    pub fn pending_count(&self) -> usize {
        self.watcher.subscription_count()
    }
}
