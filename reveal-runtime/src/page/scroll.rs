//! # Scroll 模块
//!
//! 页内锚点的平滑滚动，以及首屏背景的视差效果。

use std::collections::HashMap;

use crate::command::{Command, StyleProperty};
use crate::element::ElementId;
use crate::layout::AnchorNode;

/// 从 `#fragment` 形式的 href 中取出目标 id
///
/// 单独的 `#` 或不以 `#` 开头的 href 没有目标。
pub fn anchor_target(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// 平滑滚动
#[derive(Debug, Clone, Default)]
pub struct SmoothScroll {
    anchors: HashMap<ElementId, String>,
}

impl SmoothScroll {
    pub fn new(anchors: &[AnchorNode]) -> Self {
        Self {
            anchors: anchors
                .iter()
                .map(|a| (a.element, a.href.clone()))
                .collect(),
        }
    }

    /// 点击锚点
    ///
    /// 默认跳转已由宿主阻止；有目标时请求平滑滚动。
    pub fn on_click(&self, element: ElementId, out: &mut Vec<Command>) {
        let Some(target) = self.anchors.get(&element).and_then(|h| anchor_target(h)) else {
            return;
        };
        out.push(Command::ScrollIntoView {
            target_id: target.to_string(),
        });
    }
}

/// 首屏视差
#[derive(Debug, Clone)]
pub struct Parallax {
    hero: Option<ElementId>,
    factor: f64,
}

impl Parallax {
    pub fn new(hero: Option<ElementId>, factor: f64) -> Self {
        Self { hero, factor }
    }

    /// 背景纵向位置
    pub fn background_offset(&self, scroll_y: f64) -> f64 {
        scroll_y * self.factor
    }

    /// 页面滚动
    pub fn on_scroll(&self, scroll_y: f64, out: &mut Vec<Command>) {
        let Some(hero) = self.hero else {
            return;
        };
        out.push(Command::style(
            hero,
            StyleProperty::BackgroundPosition,
            format!("center {}px", self.background_offset(scroll_y)),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_target() {
        assert_eq!(anchor_target("#about"), Some("about"));
        assert_eq!(anchor_target("#"), None);
        assert_eq!(anchor_target("about.html"), None);
    }

    #[test]
    fn test_smooth_scroll() {
        let scroll = SmoothScroll::new(&[
            AnchorNode {
                element: ElementId(1),
                href: "#projects".to_string(),
            },
            AnchorNode {
                element: ElementId(2),
                href: "#".to_string(),
            },
        ]);
        let mut out = Vec::new();

        scroll.on_click(ElementId(1), &mut out);
        assert_eq!(
            out,
            vec![Command::ScrollIntoView {
                target_id: "projects".to_string()
            }]
        );

        out.clear();
        scroll.on_click(ElementId(2), &mut out);
        scroll.on_click(ElementId(3), &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn test_parallax() {
        let parallax = Parallax::new(Some(ElementId(4)), 0.5);
        let mut out = Vec::new();
        parallax.on_scroll(300.0, &mut out);
        assert_eq!(
            out,
            vec![Command::style(
                ElementId(4),
                StyleProperty::BackgroundPosition,
                "center 150px"
            )]
        );

        out.clear();
        parallax.on_scroll(25.0, &mut out);
        assert_eq!(
            out,
            vec![Command::style(
                ElementId(4),
                StyleProperty::BackgroundPosition,
                "center 12.5px"
            )]
        );

        out.clear();
        Parallax::new(None, 0.5).on_scroll(300.0, &mut out);
        assert!(out.is_empty());
    }
}
