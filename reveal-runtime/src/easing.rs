//! # Easing 模块
//!
//! CSS 缓动函数，用于动画的时间插值。
//!
//! 宿主直接把 [`Easing::css_name`] 写进 `animation` 属性；
//! [`Easing::apply`] 给出同一条曲线在 Rust 侧的采样，用于测试与非 CSS 渲染。

use serde::{Deserialize, Serialize};

/// CSS 缓动函数类型
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum Easing {
    /// 线性（匀速）
    Linear,
    /// `ease`，等价于 `cubic-bezier(0.25, 0.1, 0.25, 1)`
    #[default]
    Ease,
    /// `ease-in`
    EaseIn,
    /// `ease-out`
    EaseOut,
    /// `ease-in-out`
    EaseInOut,
}

impl Easing {
    /// CSS 关键字
    pub fn css_name(&self) -> &'static str {
        match self {
            Easing::Linear => "linear",
            Easing::Ease => "ease",
            Easing::EaseIn => "ease-in",
            Easing::EaseOut => "ease-out",
            Easing::EaseInOut => "ease-in-out",
        }
    }

    /// 计算缓动值
    ///
    /// # 参数
    /// - `t`: 时间进度 (0.0 - 1.0)
    ///
    /// # 返回
    /// - 缓动后的进度值 (0.0 - 1.0)
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            Easing::Linear => t,
            Easing::Ease => cubic_bezier(0.25, 0.1, 0.25, 1.0, t),
            Easing::EaseIn => cubic_bezier(0.42, 0.0, 1.0, 1.0, t),
            Easing::EaseOut => cubic_bezier(0.0, 0.0, 0.58, 1.0, t),
            Easing::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, t),
        }
    }
}

/// 求解 CSS `cubic-bezier(x1, y1, x2, y2)` 在横坐标 `x` 处的纵坐标
///
/// 先用牛顿迭代求参数 `s`，导数过小时退回二分。
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, x: f32) -> f32 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }

    let bezier = |a: f32, b: f32, s: f32| {
        let inv = 1.0 - s;
        3.0 * inv * inv * s * a + 3.0 * inv * s * s * b + s * s * s
    };
    let slope = |a: f32, b: f32, s: f32| {
        let inv = 1.0 - s;
        3.0 * inv * inv * a + 6.0 * inv * s * (b - a) + 3.0 * s * s * (1.0 - b)
    };

    let mut s = x;
    for _ in 0..8 {
        let dx = bezier(x1, x2, s) - x;
        if dx.abs() < 1e-6 {
            return bezier(y1, y2, s);
        }
        let d = slope(x1, x2, s);
        if d.abs() < 1e-6 {
            break;
        }
        s -= dx / d;
    }

    // 二分兜底
    let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
    s = x;
    for _ in 0..32 {
        let value = bezier(x1, x2, s);
        if (value - x).abs() < 1e-6 {
            break;
        }
        if value < x {
            lo = s;
        } else {
            hi = s;
        }
        s = (lo + hi) / 2.0;
    }
    bezier(y1, y2, s)
}
