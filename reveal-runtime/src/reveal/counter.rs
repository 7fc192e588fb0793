//! # Counter 模块
//!
//! 数字计数动画：把展示元素中的整数从 0 插值到目标值。
//!
//! ## 插值规则
//!
//! ```text
//! step = target / ticks
//! 每次 tick: current += step
//!   current <  target  ─► 显示 floor(current) + "+"
//!   current >= target  ─► 显示 target + "+"，停止定时器
//! ```
//!
//! 最后一步可能越过目标值，此时显示的必须是精确的目标值，而不是插值结果。

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use crate::command::Command;
use crate::config::CounterConfig;
use crate::element::ElementId;
use crate::timer::{TimerId, TimerOwner, TimerRegistry};

/// 展示元素计数完成后带上的 class
pub const COUNTED_CLASS: &str = "counted";

/// 从展示文本中提取目标整数
///
/// 去掉所有非数字字符后解析。没有任何数字时返回 `None`；
/// 数字超出 `u64` 范围时无法解析，目标按 0 处理。
///
/// ```text
/// "500+ Students" -> Some(500)
/// "1,200"         -> Some(1200)
/// "Many"          -> None
/// ```
pub fn parse_counter_target(text: &str) -> Option<u64> {
    let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    Some(digits.parse().unwrap_or(0))
}

/// 计数文本
pub fn render_count(value: u64) -> String {
    format!("{value}+")
}

/// 单步插值结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterFrame {
    /// 插值中，值为向下取整后的显示值
    Progress(u64),
    /// 已到达目标
    Done(u64),
}

impl CounterFrame {
    pub fn value(&self) -> u64 {
        match self {
            CounterFrame::Progress(v) | CounterFrame::Done(v) => *v,
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self, CounterFrame::Done(_))
    }

    /// 显示文本
    pub fn text(&self) -> String {
        render_count(self.value())
    }
}

/// 一次计数动画的状态
///
/// 首次触发时创建，到达目标后销毁。
#[derive(Debug, Clone, PartialEq)]
pub struct CounterSpec {
    pub target: u64,
    pub current: f64,
    pub step: f64,
    pub interval: Duration,
}

impl CounterSpec {
    pub fn new(target: u64, ticks: u32, interval: Duration) -> Self {
        Self {
            target,
            current: 0.0,
            step: target as f64 / f64::from(ticks.max(1)),
            interval,
        }
    }

    /// 前进一步
    pub fn advance(&mut self) -> CounterFrame {
        self.current += self.step;
        if self.current >= self.target as f64 {
            CounterFrame::Done(self.target)
        } else {
            CounterFrame::Progress(self.current.floor() as u64)
        }
    }
}

/// 计数动画器
#[derive(Debug)]
pub struct CounterAnimator {
    ticks: u32,
    interval: Duration,
    /// 已计数的展示元素（与订阅取消相互独立的第二道防线）
    counted: HashSet<ElementId>,
    /// 运行中的计数，按定时器索引
    running: HashMap<TimerId, (ElementId, CounterSpec)>,
}

impl CounterAnimator {
    pub fn new(config: &CounterConfig) -> Self {
        Self {
            ticks: config.ticks,
            interval: config.interval(),
            counted: HashSet::new(),
            running: HashMap::new(),
        }
    }

    /// 展示元素变为可见
    ///
    /// 1. 已计数则忽略
    /// 2. 文本中没有数字则直接返回，不做标记
    /// 3. 先标记已计数，再决定是否启动定时器
    /// 4. 目标为 0 时不启动定时器，文本保持原样
    pub fn on_visible(
        &mut self,
        display: ElementId,
        text: &str,
        timers: &mut TimerRegistry,
        out: &mut Vec<Command>,
    ) {
        if self.counted.contains(&display) {
            return;
        }

        let Some(target) = parse_counter_target(text) else {
            return;
        };

        self.counted.insert(display);
        out.push(Command::SetAttribute {
            element: display,
            name: "data-target".to_string(),
            value: target.to_string(),
        });
        out.push(Command::class(display, COUNTED_CLASS, true));

        if target == 0 {
            return;
        }

        let timer = timers.allocate(TimerOwner::Counter(display));
        self.running.insert(
            timer,
            (display, CounterSpec::new(target, self.ticks, self.interval)),
        );
        out.push(Command::StartInterval {
            timer,
            period: self.interval,
        });
    }

    /// 定时器触发
    ///
    /// 返回 `false` 表示该定时器不属于任何运行中的计数。
    pub fn on_tick(
        &mut self,
        timer: TimerId,
        timers: &mut TimerRegistry,
        out: &mut Vec<Command>,
    ) -> bool {
        let Some((display, spec)) = self.running.get_mut(&timer) else {
            return false;
        };

        let frame = spec.advance();
        out.push(Command::SetText {
            element: *display,
            text: frame.text(),
        });

        if frame.is_done() {
            out.push(Command::CancelTimer { timer });
            timers.release(timer);
            self.running.remove(&timer);
        }
        true
    }

    pub fn is_counted(&self, display: ElementId) -> bool {
        self.counted.contains(&display)
    }

    /// 运行中的计数数量
    pub fn running_count(&self) -> usize {
        self.running.len()
    }
}
