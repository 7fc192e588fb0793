//! # Scroll Spy 模块
//!
//! 按滚动位置高亮当前区块对应的导航链接。
//!
//! 当前区块 = 文档顺序中最后一个满足 `scroll_y >= offset_top - offset` 的区块。
//! 区块列表与淡入引擎共用 [`PageLayout::sections`]。
//!
//! [`PageLayout::sections`]: crate::layout::PageLayout

use crate::command::Command;
use crate::element::ElementId;
use crate::layout::{NavLinkNode, PageQuery, SectionNode};
use crate::page::nav::ACTIVE_CLASS;

/// 导航链接指向的区块 id：去掉 href 的首字符
fn link_target(href: &str) -> String {
    href.chars().skip(1).collect()
}

#[derive(Debug, Clone)]
struct SpyLink {
    element: ElementId,
    target: Option<String>,
}

/// 滚动高亮
#[derive(Debug, Clone)]
pub struct ScrollSpy {
    sections: Vec<SectionNode>,
    links: Vec<SpyLink>,
    offset: f64,
    /// 上一次高亮的区块；外层 `None` 表示还没有计算过
    highlighted: Option<Option<String>>,
}

impl ScrollSpy {
    pub fn new(sections: &[SectionNode], links: &[NavLinkNode], offset: f64) -> Self {
        Self {
            sections: sections.to_vec(),
            links: links
                .iter()
                .map(|l| SpyLink {
                    element: l.element,
                    target: l.href.as_deref().map(link_target),
                })
                .collect(),
            offset,
            highlighted: None,
        }
    }

    /// 计算当前区块 id
    ///
    /// 没有区块越过提前线时为空字符串；越过的区块没有 `id` 时为 `None`。
    pub fn current_section(&self, scroll_y: f64, query: &dyn PageQuery) -> Option<String> {
        let mut current = Some(String::new());
        for section in &self.sections {
            if scroll_y >= query.offset_top(section.element) - self.offset {
                current = section.id.clone();
            }
        }
        current
    }

    /// 页面滚动
    pub fn on_scroll(&mut self, scroll_y: f64, query: &dyn PageQuery, out: &mut Vec<Command>) {
        let current = self.current_section(scroll_y, query);
        self.highlight(current, out);
    }

    /// 浏览器前进/后退：以 `location.hash` 为准
    pub fn on_history(&mut self, hash: &str, out: &mut Vec<Command>) {
        let current = hash.strip_prefix('#').unwrap_or(hash).to_string();
        self.highlight(Some(current), out);
    }

    /// 当前高亮的区块 id
    pub fn highlighted(&self) -> Option<&str> {
        self.highlighted.as_ref().and_then(|h| h.as_deref())
    }

    /// 更新链接高亮，结果不变时不产生指令
    fn highlight(&mut self, current: Option<String>, out: &mut Vec<Command>) {
        if self.highlighted.as_ref() == Some(&current) {
            return;
        }

        for link in &self.links {
            let active = match (&link.target, &current) {
                (Some(target), Some(current)) => target == current,
                _ => false,
            };
            out.push(Command::class(link.element, ACTIVE_CLASS, active));
        }
        self.highlighted = Some(current);
    }
}
