//! # Observer 模块
//!
//! 每个 [`WatcherId`] 对应一个 `IntersectionObserver`，首次 `Observe` 时按其阈值配置创建。
//! 观察器回调把每条交叉记录转换成 [`PageInput::Visibility`] 交给页面。

use std::collections::HashMap;
use std::rc::Weak;

use js_sys::Array;
use reveal_runtime::{IntersectionSample, PageInput, ThresholdConfig, WatcherId};
use tracing::{debug, trace};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit, Window,
};

use crate::app::WebHost;
use crate::error::HostResult;

/// 运行环境是否提供 `IntersectionObserver`
pub fn is_supported(window: &Window) -> bool {
    js_sys::Reflect::has(window, &JsValue::from_str("IntersectionObserver")).unwrap_or(false)
}

/// 已创建的观察器及其回调
struct ObserverHandle {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

/// 观察器集合
#[derive(Default)]
pub struct ObserverSet {
    observers: HashMap<WatcherId, ObserverHandle>,
}

impl ObserverSet {
    /// 开始观察元素
    pub fn observe(
        &mut self,
        host: &Weak<WebHost>,
        watcher: WatcherId,
        element: &Element,
        config: &ThresholdConfig,
    ) -> HostResult<()> {
        if !self.observers.contains_key(&watcher) {
            let handle = create_observer(host.clone(), watcher, config)?;
            self.observers.insert(watcher, handle);
        }

        if let Some(handle) = self.observers.get(&watcher) {
            handle.observer.observe(element);
        }
        Ok(())
    }

    /// 停止观察元素
    pub fn unobserve(&mut self, watcher: WatcherId, element: &Element) {
        if let Some(handle) = self.observers.get(&watcher) {
            handle.observer.unobserve(element);
        }
    }
}

impl Drop for ObserverSet {
    fn drop(&mut self) {
        for handle in self.observers.values() {
            handle.observer.disconnect();
        }
    }
}

fn create_observer(
    host: Weak<WebHost>,
    watcher: WatcherId,
    config: &ThresholdConfig,
) -> HostResult<ObserverHandle> {
    let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
        move |entries: Array, _observer: IntersectionObserver| {
            let Some(host) = host.upgrade() else {
                return;
            };
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                let Some(element) = host.element_id(&entry.target()) else {
                    continue;
                };
                let sample = IntersectionSample::new(
                    element,
                    entry.intersection_ratio(),
                    entry.is_intersecting(),
                );
                trace!(?watcher, ?sample, "交叉记录");
                host.dispatch(PageInput::visibility(watcher, sample));
            }
        },
    );

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(config.threshold));
    options.set_root_margin(&config.root_margin.css());

    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
    debug!(
        ?watcher,
        threshold = config.threshold,
        root_margin = %config.root_margin.css(),
        "创建观察器"
    );

    Ok(ObserverHandle {
        observer,
        _callback: callback,
    })
}
