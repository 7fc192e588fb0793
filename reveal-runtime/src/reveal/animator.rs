//! # Animator 模块
//!
//! 区块淡入动画。
//!
//! 淡入效果是一个静态的 [`RevealStyle`]：只被应用，从不被修改。
//! 宿主用 CSS 关键帧播放它；[`RevealStyle::frame_at`] 给出同一动画在任意时刻的采样。

use serde::{Deserialize, Serialize};

use crate::command::{Command, StyleProperty};
use crate::easing::Easing;
use crate::element::ElementId;
use crate::reveal::visibility::VisibilityEvent;

/// 关键帧
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Keyframes {
    /// 透明度 0→1，自下方 20px 上移到原位
    FadeIn,
    /// 透明度 0→1，自上方 30px 下移到原位
    SlideInDown,
}

impl Keyframes {
    /// `@keyframes` 名称
    pub fn name(&self) -> &'static str {
        match self {
            Keyframes::FadeIn => "fadeIn",
            Keyframes::SlideInDown => "slideInDown",
        }
    }

    /// 起始纵向偏移（像素，正值向下）
    pub fn from_offset(&self) -> f32 {
        match self {
            Keyframes::FadeIn => 20.0,
            Keyframes::SlideInDown => -30.0,
        }
    }

    /// `@keyframes` 规则文本
    pub fn css_rule(&self) -> String {
        format!(
            "@keyframes {name} {{\n    from {{\n        opacity: 0;\n        transform: translateY({from}px);\n    }}\n    to {{\n        opacity: 1;\n        transform: translateY(0);\n    }}\n}}",
            name = self.name(),
            from = self.from_offset(),
        )
    }
}

/// `animation-fill-mode`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FillMode {
    #[default]
    None,
    /// 结束后保持最后一帧
    Forwards,
}

/// 一次性过渡效果描述
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RevealStyle {
    pub keyframes: Keyframes,
    /// 时长（秒）
    pub duration: f32,
    pub easing: Easing,
    pub fill: FillMode,
}

/// 某一时刻的动画采样
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealFrame {
    pub opacity: f32,
    /// 纵向偏移（像素）
    pub offset_px: f32,
}

impl RevealStyle {
    /// 区块淡入：`fadeIn 0.6s ease forwards`
    pub fn fade_in() -> Self {
        Self {
            keyframes: Keyframes::FadeIn,
            duration: 0.6,
            easing: Easing::Ease,
            fill: FillMode::Forwards,
        }
    }

    /// 提示消息滑入：`slideInDown 0.3s ease`
    pub fn slide_in_down() -> Self {
        Self {
            keyframes: Keyframes::SlideInDown,
            duration: 0.3,
            easing: Easing::Ease,
            fill: FillMode::None,
        }
    }

    /// `animation` 属性值
    pub fn css_animation(&self) -> String {
        let mut css = format!(
            "{} {}s {}",
            self.keyframes.name(),
            self.duration,
            self.easing.css_name()
        );
        if self.fill == FillMode::Forwards {
            css.push_str(" forwards");
        }
        css
    }

    /// 动画开始 `elapsed` 秒后的采样
    ///
    /// 页面运行时与浏览器宿主都不调用它，浏览器自己播放 [`Self::css_animation`]。
    /// 它是同一条曲线的 Rust 侧模型，供没有 CSS 动画的宿主与测试使用。
    pub fn frame_at(&self, elapsed: f32) -> RevealFrame {
        let progress = if self.duration <= 0.0 {
            1.0
        } else {
            self.easing.apply(elapsed / self.duration)
        };

        RevealFrame {
            opacity: progress,
            offset_px: self.keyframes.from_offset() * (1.0 - progress),
        }
    }
}

impl Default for RevealStyle {
    fn default() -> Self {
        Self::fade_in()
    }
}

/// 区块淡入动画器
#[derive(Debug, Clone, Default)]
pub struct RevealAnimator {
    style: RevealStyle,
}

impl RevealAnimator {
    pub fn new(style: RevealStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> &RevealStyle {
        &self.style
    }

    /// 注册时隐藏元素
    ///
    /// 必须在观察开始之前完成，否则内容会在监听器生效前闪现。
    pub fn prepare(&self, element: ElementId, out: &mut Vec<Command>) {
        out.push(Command::style(element, StyleProperty::Opacity, "0"));
    }

    /// 播放淡入
    ///
    /// 不检查重复调用，一次性由监听器与引擎保证。
    pub fn on_visible(&self, event: VisibilityEvent, out: &mut Vec<Command>) {
        out.push(Command::style(
            event.element,
            StyleProperty::Animation,
            self.style.css_animation(),
        ));
    }
}
