//! # DOM 模块
//!
//! 启动时发现页面元素，为每个元素分配 [`ElementId`]，并提供 [`PageQuery`] 实现。
//!
//! 元素只在这里枚举一次；之后 Runtime 只通过 id 引用元素。

use reveal_runtime::{
    AnchorNode, CounterNode, ElementId, FormValues, LazyImageNode, NavLinkNode, NavNodes,
    PageConfig, PageLayout, PageQuery, ProjectCardNode, SectionNode, Selectors,
};
use tracing::{debug, warn};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlFormElement, NodeList};

use crate::error::{HostError, HostResult};

/// 内嵌配置块的元素 id
pub const CONFIG_ELEMENT_ID: &str = "portfolio-config";

/// 元素注册表
#[derive(Debug, Default)]
pub struct DomRegistry {
    elements: Vec<Element>,
}

impl DomRegistry {
    /// 注册元素，同一个元素总是得到同一个 id
    pub fn register(&mut self, element: Element) -> ElementId {
        if let Some(id) = self.id_of(&element) {
            return id;
        }
        self.elements.push(element);
        ElementId((self.elements.len() - 1) as u32)
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.0 as usize)
    }

    /// 要求元素存在
    pub fn require(&self, id: ElementId) -> HostResult<&Element> {
        self.element(id)
            .ok_or_else(|| HostError::MissingElement(id.to_string()))
    }

    /// 反查元素 id
    pub fn id_of(&self, element: &Element) -> Option<ElementId> {
        self.elements
            .iter()
            .position(|e| e == element)
            .map(|i| ElementId(i as u32))
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl PageQuery for DomRegistry {
    fn text_content(&self, element: ElementId) -> Option<String> {
        self.element(element).and_then(|e| e.text_content())
    }

    fn offset_top(&self, element: ElementId) -> f64 {
        self.element(element)
            .and_then(|e| e.dyn_ref::<HtmlElement>())
            .map(|e| f64::from(e.offset_top()))
            .unwrap_or(0.0)
    }
}

/// 把 `NodeList` 转换成元素列表
fn elements_of(list: NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

fn query_all(document: &Document, selector: &str) -> HostResult<Vec<Element>> {
    Ok(elements_of(document.query_selector_all(selector)?))
}

/// 发现页面元素
pub fn discover(
    document: &Document,
    selectors: &Selectors,
) -> HostResult<(DomRegistry, PageLayout)> {
    let mut registry = DomRegistry::default();
    let body: Element = document
        .body()
        .ok_or_else(|| HostError::MissingElement("body".to_string()))?
        .into();

    let mut layout = PageLayout {
        body: registry.register(body),
        ..Default::default()
    };

    for section in query_all(document, &selectors.sections)? {
        let id = Some(section.id()).filter(|id| !id.is_empty());
        layout.sections.push(SectionNode {
            element: registry.register(section),
            id,
        });
    }

    for fact in query_all(document, &selectors.facts)? {
        let display = fact.query_selector(&selectors.fact_display)?;
        layout.counters.push(CounterNode {
            fact: registry.register(fact),
            display: display.map(|d| registry.register(d)),
        });
    }

    for image in query_all(document, &selectors.lazy_images)? {
        let data_src = image.get_attribute("data-src");
        layout.lazy_images.push(LazyImageNode {
            element: registry.register(image),
            data_src,
        });
    }

    let hamburger = document.get_element_by_id(&selectors.hamburger);
    let menu = document.get_element_by_id(&selectors.nav_menu);
    if let (Some(hamburger), Some(menu)) = (hamburger, menu) {
        layout.nav = Some(NavNodes {
            hamburger: registry.register(hamburger),
            menu: registry.register(menu),
        });
    }

    for link in query_all(document, &selectors.nav_links)? {
        let href = link.get_attribute("href");
        layout.nav_links.push(NavLinkNode {
            element: registry.register(link),
            href,
        });
    }

    for anchor in query_all(document, &selectors.anchors)? {
        let href = anchor.get_attribute("href").unwrap_or_default();
        layout.anchors.push(AnchorNode {
            element: registry.register(anchor),
            href,
        });
    }

    layout.contact_form = document
        .get_element_by_id(&selectors.contact_form)
        .map(|form| registry.register(form));
    layout.hero = document
        .query_selector(&selectors.hero)?
        .map(|hero| registry.register(hero));

    for card in query_all(document, &selectors.skill_cards)? {
        layout.skill_cards.push(registry.register(card));
    }

    for card in query_all(document, &selectors.project_cards)? {
        let image = card.query_selector(&selectors.project_image)?;
        layout.project_cards.push(ProjectCardNode {
            card: registry.register(card),
            image: image.map(|i| registry.register(i)),
        });
    }

    debug!(
        elements = registry.len(),
        sections = layout.sections.len(),
        counters = layout.counters.len(),
        lazy_images = layout.lazy_images.len(),
        "页面元素发现完成"
    );

    Ok((registry, layout))
}

/// 读取内嵌配置块
///
/// 配置块缺失时使用默认值；解析或校验失败时记录警告并使用默认值。
pub fn read_config(document: &Document) -> PageConfig {
    let Some(text) = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|e| e.text_content())
    else {
        return PageConfig::default();
    };

    match PageConfig::from_json(&text) {
        Ok(config) => {
            debug!("已加载页面配置");
            config
        }
        Err(e) => {
            warn!(error = %e, "页面配置无效，使用默认值");
            PageConfig::default()
        }
    }
}

/// 按表单控件顺序读取前四个值：姓名、邮箱、主题、正文
pub fn form_values(form: &Element) -> HostResult<FormValues> {
    let form = form
        .dyn_ref::<HtmlFormElement>()
        .ok_or_else(|| HostError::UnexpectedElement {
            element: form.tag_name(),
            expected: "HtmlFormElement",
        })?;
    let controls = form.elements();

    let value_at = |index: u32| -> String {
        controls
            .item(index)
            .and_then(|control| js_sys::Reflect::get(&control, &"value".into()).ok())
            .and_then(|value| value.as_string())
            .unwrap_or_default()
    };

    Ok(FormValues::new(value_at(0), value_at(1), value_at(2), value_at(3)))
}
