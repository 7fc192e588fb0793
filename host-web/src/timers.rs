//! # Timers 模块
//!
//! 用 `gloo-timers` 实现 Runtime 请求的周期与一次性定时器。
//!
//! 定时器回调不直接调用页面，而是把输入交给一个微任务。
//! 页面处理这条输入时可能取消同一个定时器，此时回调已经返回，
//! 定时器可以被安全地销毁。

use std::collections::HashMap;
use std::rc::Weak;
use std::time::Duration;

use gloo_timers::callback::{Interval, Timeout};
use reveal_runtime::{PageInput, TimerId};
use tracing::trace;

use crate::app::WebHost;

/// 浏览器定时器以毫秒为单位，超出 `u32` 的时长按最大值处理
pub fn millis(duration: Duration) -> u32 {
    u32::try_from(duration.as_millis()).unwrap_or(u32::MAX)
}

fn schedule(host: &Weak<WebHost>, timer: TimerId) {
    let host = host.clone();
    wasm_bindgen_futures::spawn_local(async move {
        if let Some(host) = host.upgrade() {
            host.timer_fired(timer);
        }
    });
}

/// 活跃的定时器
#[derive(Default)]
pub struct TimerSet {
    intervals: HashMap<TimerId, Interval>,
    timeouts: HashMap<TimerId, Timeout>,
}

impl TimerSet {
    /// 启动周期定时器
    pub fn start_interval(&mut self, host: &Weak<WebHost>, timer: TimerId, period: Duration) {
        let host = host.clone();
        let interval = Interval::new(millis(period), move || schedule(&host, timer));
        self.intervals.insert(timer, interval);
    }

    /// 启动一次性定时器
    pub fn start_timeout(&mut self, host: &Weak<WebHost>, timer: TimerId, delay: Duration) {
        let host = host.clone();
        let timeout = Timeout::new(millis(delay), move || schedule(&host, timer));
        self.timeouts.insert(timer, timeout);
    }

    /// 取消定时器，未知 id 忽略
    pub fn cancel(&mut self, timer: TimerId) {
        // gloo 的定时器在 drop 时清除
        let removed =
            self.intervals.remove(&timer).is_some() || self.timeouts.remove(&timer).is_some();
        trace!(?timer, removed, "取消定时器");
    }

    /// 一次性定时器触发后不再需要保留句柄
    pub fn forget_fired(&mut self, timer: TimerId) {
        self.timeouts.remove(&timer);
    }
}
