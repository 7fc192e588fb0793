//! # Command 模块
//!
//! 定义 Runtime 向 Host 发出的所有指令。
//! Command 是 Runtime 与 Host 之间的**唯一通信方式**。
//!
//! ## 设计原则
//!
//! - **声明式**：Command 描述"做什么"，不描述"怎么做"
//! - **无副作用**：Command 本身不执行任何操作
//! - **单元素作用域**：每条改动 DOM 的 Command 只作用于一个元素

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::element::ElementId;
use crate::page::notify::{NotificationId, NotificationKind};
use crate::reveal::visibility::{ThresholdConfig, WatcherId};
use crate::timer::TimerId;

/// 可由 Runtime 修改的内联样式属性
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StyleProperty {
    /// `opacity`
    Opacity,
    /// `animation`
    Animation,
    /// `transform`
    Transform,
    /// `background-position`
    BackgroundPosition,
}

impl StyleProperty {
    /// CSS 属性名
    pub fn css_name(&self) -> &'static str {
        match self {
            StyleProperty::Opacity => "opacity",
            StyleProperty::Animation => "animation",
            StyleProperty::Transform => "transform",
            StyleProperty::BackgroundPosition => "background-position",
        }
    }
}

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
}

/// Runtime 向 Host 发出的指令
///
/// Host 接收 Command 后，将其转换为实际的 DOM、定时器与观察器操作。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// 设置内联样式
    SetStyle {
        element: ElementId,
        property: StyleProperty,
        value: String,
    },

    /// 添加或移除 class
    SetClass {
        element: ElementId,
        class: String,
        enabled: bool,
    },

    /// 替换文本内容
    SetText { element: ElementId, text: String },

    /// 设置属性
    SetAttribute {
        element: ElementId,
        name: String,
        value: String,
    },

    /// 开始观察元素的可见性
    ///
    /// 同一个 `watcher` 的所有 `Observe` 携带相同的 `config`，
    /// 宿主可以据此为每个 watcher 只创建一个观察器。
    Observe {
        watcher: WatcherId,
        element: ElementId,
        config: ThresholdConfig,
    },

    /// 停止观察元素
    Unobserve {
        watcher: WatcherId,
        element: ElementId,
    },

    /// 启动周期定时器
    StartInterval { timer: TimerId, period: Duration },

    /// 启动一次性定时器
    StartTimeout { timer: TimerId, delay: Duration },

    /// 取消定时器
    CancelTimer { timer: TimerId },

    /// 平滑滚动到 id 对应的元素（顶部对齐）
    ///
    /// 目标不存在时宿主什么都不做。
    ScrollIntoView { target_id: String },

    /// 阻塞式提示（`alert`）
    Alert { message: String },

    /// 显示浮动提示消息
    ShowNotification {
        id: NotificationId,
        kind: NotificationKind,
        message: String,
    },

    /// 移除浮动提示消息
    RemoveNotification { id: NotificationId },

    /// 重置表单
    ResetForm { element: ElementId },

    /// 向 `<head>` 追加样式表
    InjectStylesheet { css: String },

    /// 输出日志
    Log { level: LogLevel, message: String },
}

impl Command {
    /// 创建设置样式的指令
    pub fn style(element: ElementId, property: StyleProperty, value: impl Into<String>) -> Self {
        Self::SetStyle {
            element,
            property,
            value: value.into(),
        }
    }

    /// 创建切换 class 的指令
    pub fn class(element: ElementId, class: impl Into<String>, enabled: bool) -> Self {
        Self::SetClass {
            element,
            class: class.into(),
            enabled,
        }
    }

    /// 创建日志指令
    pub fn log(level: LogLevel, message: impl Into<String>) -> Self {
        Self::Log {
            level,
            message: message.into(),
        }
    }

    /// 指令作用的元素（非 DOM 指令返回 `None`）
    pub fn target(&self) -> Option<ElementId> {
        match self {
            Command::SetStyle { element, .. }
            | Command::SetClass { element, .. }
            | Command::SetText { element, .. }
            | Command::SetAttribute { element, .. }
            | Command::Observe { element, .. }
            | Command::Unobserve { element, .. }
            | Command::ResetForm { element } => Some(*element),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_property_names() {
        assert_eq!(StyleProperty::Opacity.css_name(), "opacity");
        assert_eq!(
            StyleProperty::BackgroundPosition.css_name(),
            "background-position"
        );
    }

    #[test]
    fn test_command_target() {
        let cmd = Command::style(ElementId(2), StyleProperty::Opacity, "0");
        assert_eq!(cmd.target(), Some(ElementId(2)));

        let cmd = Command::Alert {
            message: "hi".to_string(),
        };
        assert_eq!(cmd.target(), None);
    }

    #[test]
    fn test_command_serialization() {
        let cmd = Command::StartInterval {
            timer: TimerId(3),
            period: Duration::from_millis(30),
        };
        let json = serde_json::to_string(&cmd).unwrap();
        let deserialized: Command = serde_json::from_str(&json).unwrap();
        assert_eq!(cmd, deserialized);
    }
}
