//! # Input 模块
//!
//! 定义 Host 向 Runtime 传递的输入事件。
//!
//! ## 设计说明
//!
//! - `PageInput` 是宿主采集浏览器事件后，传递给 Runtime 的抽象输入
//! - Runtime 不直接处理 DOM 事件对象，只处理语义化的输入
//! - 默认行为（锚点跳转、表单提交）由宿主在转发前阻止

use serde::{Deserialize, Serialize};

use crate::element::ElementId;
use crate::page::form::FormValues;
use crate::reveal::visibility::{IntersectionSample, WatcherId};
use crate::timer::TimerId;

/// Host 向 Runtime 传递的输入
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PageInput {
    /// 观察器回报的一条交叉记录
    Visibility {
        watcher: WatcherId,
        sample: IntersectionSample,
    },

    /// 定时器触发
    TimerFired { timer: TimerId },

    /// 页面滚动，`scroll_y` 为当前纵向滚动距离
    Scroll { scroll_y: f64 },

    /// 点击汉堡菜单按钮
    HamburgerClicked,

    /// 点击导航链接
    NavLinkClicked { element: ElementId },

    /// 点击页内锚点
    AnchorClicked { element: ElementId },

    /// 提交联系表单
    FormSubmitted { values: FormValues },

    /// 指针进入元素
    PointerEntered { element: ElementId },

    /// 指针离开元素
    PointerLeft { element: ElementId },

    /// 浏览器前进/后退，`hash` 为当前 `location.hash`
    HistoryPopped { hash: String },

    /// 外部调用：切换深色模式
    ToggleDarkMode,

    /// 外部调用：下载简历
    DownloadResume,

    /// `DOMContentLoaded`
    DocumentReady,
}

impl PageInput {
    /// 创建可见性输入
    pub fn visibility(watcher: WatcherId, sample: IntersectionSample) -> Self {
        Self::Visibility { watcher, sample }
    }

    /// 创建定时器输入
    pub fn timer(timer: TimerId) -> Self {
        Self::TimerFired { timer }
    }

    /// 创建滚动输入
    pub fn scroll(scroll_y: f64) -> Self {
        Self::Scroll { scroll_y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_creation() {
        let scroll = PageInput::scroll(300.0);
        assert_eq!(scroll, PageInput::Scroll { scroll_y: 300.0 });

        let timer = PageInput::timer(TimerId(7));
        assert_eq!(timer, PageInput::TimerFired { timer: TimerId(7) });
    }

    #[test]
    fn test_input_serialization() {
        let input = PageInput::visibility(
            WatcherId::Counters,
            IntersectionSample::new(ElementId(4), 0.6, true),
        );
        let json = serde_json::to_string(&input).unwrap();
        let deserialized: PageInput = serde_json::from_str(&json).unwrap();
        assert_eq!(input, deserialized);
    }
}
