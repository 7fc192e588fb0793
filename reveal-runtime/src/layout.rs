//! # Layout 模块
//!
//! 宿主在启动时发现的页面元素。
//!
//! 元素只在初始化时枚举一次，之后不会增加或删除。
//! 与布局有关、会随时间变化的值（文本内容、纵向偏移）通过 [`PageQuery`] 现场读取。

use serde::{Deserialize, Serialize};

use crate::element::ElementId;

/// 区块元素（`section`）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionNode {
    pub element: ElementId,
    /// `id` 属性，可能缺失
    pub id: Option<String>,
}

/// 数字展示块（`.fact`）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterNode {
    /// 被观察的外层块
    pub fact: ElementId,
    /// 块内显示数字的元素（`h3`），可能缺失
    pub display: Option<ElementId>,
}

/// 延迟加载的图片（`img[data-src]`）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LazyImageNode {
    pub element: ElementId,
    /// `data-src` 属性
    pub data_src: Option<String>,
}

/// 导航菜单
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavNodes {
    /// 汉堡按钮
    pub hamburger: ElementId,
    /// 菜单容器
    pub menu: ElementId,
}

/// 导航链接（`.nav-link`）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavLinkNode {
    pub element: ElementId,
    pub href: Option<String>,
}

/// 页内锚点（`a[href^="#"]`）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnchorNode {
    pub element: ElementId,
    pub href: String,
}

/// 项目卡片（`.project-card`）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectCardNode {
    pub card: ElementId,
    /// 卡片内的 `.project-image img`
    pub image: Option<ElementId>,
}

/// 页面布局
///
/// 区块列表是唯一的规范枚举：淡入动画与滚动高亮共用同一份。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageLayout {
    /// `<body>`
    pub body: ElementId,
    /// 文档顺序的区块
    pub sections: Vec<SectionNode>,
    pub counters: Vec<CounterNode>,
    pub lazy_images: Vec<LazyImageNode>,
    pub nav: Option<NavNodes>,
    pub nav_links: Vec<NavLinkNode>,
    pub anchors: Vec<AnchorNode>,
    pub contact_form: Option<ElementId>,
    pub hero: Option<ElementId>,
    pub skill_cards: Vec<ElementId>,
    pub project_cards: Vec<ProjectCardNode>,
}

/// 布局查询
///
/// 由宿主实现，Runtime 在需要最新布局值时调用。
pub trait PageQuery {
    /// 元素当前的文本内容
    fn text_content(&self, element: ElementId) -> Option<String>;

    /// 元素相对文档顶部的纵向偏移（`offsetTop`）
    fn offset_top(&self, element: ElementId) -> f64;
}
