//! # Style 模块
//!
//! 启动时注入的样式表，以及提示消息的内联样式。

use crate::page::notify::NotificationKind;
use crate::reveal::animator::{Keyframes, RevealStyle};

/// 导航链接高亮规则
const NAV_ACTIVE_RULE: &str = ".nav-link.active {
    color: #3498db;
    border-bottom: 2px solid #3498db;
    padding-bottom: 0.5rem;
}";

/// 启动时追加到 `<head>` 的样式表
pub fn page_stylesheet() -> String {
    [
        Keyframes::FadeIn.css_rule(),
        Keyframes::SlideInDown.css_rule(),
        NAV_ACTIVE_RULE.to_string(),
    ]
    .join("\n\n")
}

/// 提示消息的内联样式
pub fn notification_style(kind: NotificationKind) -> String {
    format!(
        "position: fixed; top: 20px; right: 20px; background-color: {}; color: white; \
         padding: 15px 20px; border-radius: 5px; box-shadow: 0 4px 6px rgba(0, 0, 0, 0.1); \
         z-index: 10000; animation: {};",
        kind.background(),
        RevealStyle::slide_in_down().css_animation()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stylesheet_contains_all_rules() {
        let css = page_stylesheet();
        assert!(css.contains("@keyframes fadeIn"));
        assert!(css.contains("@keyframes slideInDown"));
        assert!(css.contains(".nav-link.active"));
    }

    #[test]
    fn test_notification_style() {
        let css = notification_style(NotificationKind::Success);
        assert!(css.contains("background-color: #27ae60"));
        assert!(css.contains("animation: slideInDown 0.3s ease;"));
    }
}
