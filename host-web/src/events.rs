//! # Events 模块
//!
//! 绑定浏览器事件监听，并向页面外部导出可调用的函数。
//!
//! 监听器在页面生命周期内一直存在，闭包在注册后交给 JS 管理。

use std::rc::Rc;

use js_sys::{Object, Reflect};
use reveal_runtime::{ElementId, PageInput};
use tracing::warn;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Event, EventTarget};

use crate::app::WebHost;
use crate::dom;
use crate::error::{HostError, HostResult};

/// 导出到 `window` 上的函数集合名
pub const EXPORT_NAMESPACE: &str = "portfolioFunctions";

/// 注册监听器
///
/// `to_input` 返回 `None` 时不打扰页面。
fn listen<F>(
    host: &Rc<WebHost>,
    target: &EventTarget,
    event: &str,
    to_input: F,
) -> HostResult<()>
where
    F: Fn(&WebHost, &Event) -> Option<PageInput> + 'static,
{
    let host = Rc::clone(host);
    let callback = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        if let Some(input) = to_input(&host, &event) {
            host.dispatch(input);
        }
    });
    target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
    callback.forget();
    Ok(())
}

/// 在元素上注册监听器
fn listen_element<F>(
    host: &Rc<WebHost>,
    element: ElementId,
    event: &str,
    to_input: F,
) -> HostResult<()>
where
    F: Fn(&WebHost, &Event) -> Option<PageInput> + 'static,
{
    let target = host
        .element(element)
        .ok_or_else(|| HostError::MissingElement(element.to_string()))?
        .clone();
    listen(host, &target, event, to_input)
}

/// 绑定全部事件
pub fn bind(host: &Rc<WebHost>) -> HostResult<()> {
    let layout = host.layout();

    if let Some(nav) = layout.nav {
        listen_element(host, nav.hamburger, "click", |_, _| {
            Some(PageInput::HamburgerClicked)
        })?;
    }

    for link in &layout.nav_links {
        let element = link.element;
        listen_element(host, element, "click", move |_, _| {
            Some(PageInput::NavLinkClicked { element })
        })?;
    }

    for anchor in &layout.anchors {
        let element = anchor.element;
        listen_element(host, element, "click", move |_, event| {
            event.prevent_default();
            Some(PageInput::AnchorClicked { element })
        })?;
    }

    if let Some(form) = layout.contact_form {
        listen_element(host, form, "submit", move |host, event| {
            event.prevent_default();
            let element = host.element(form)?;
            match dom::form_values(element) {
                Ok(values) => Some(PageInput::FormSubmitted { values }),
                Err(e) => {
                    warn!(error = %e, "读取表单失败");
                    None
                }
            }
        })?;
    }

    let hover_targets = layout
        .skill_cards
        .iter()
        .copied()
        .chain(layout.project_cards.iter().map(|p| p.card));
    for element in hover_targets {
        listen_element(host, element, "mouseenter", move |_, _| {
            Some(PageInput::PointerEntered { element })
        })?;
        listen_element(host, element, "mouseleave", move |_, _| {
            Some(PageInput::PointerLeft { element })
        })?;
    }

    let window = host.context().window.clone();
    listen(host, &window, "scroll", |host, _| {
        let scroll_y = host.context().window.scroll_y().unwrap_or(0.0);
        Some(PageInput::scroll(scroll_y))
    })?;
    listen(host, &window, "popstate", |host, _| {
        let hash = host.context().window.location().hash().unwrap_or_default();
        Some(PageInput::HistoryPopped { hash })
    })?;

    // wasm 模块加载完成时 DOMContentLoaded 可能已经触发
    let document = host.context().document.clone();
    if document.ready_state() == "loading" {
        listen(host, &document, "DOMContentLoaded", |_, _| {
            Some(PageInput::DocumentReady)
        })?;
    } else {
        host.dispatch(PageInput::DocumentReady);
    }

    export_functions(host)
}

/// 导出 `toggleDarkMode` 与 `downloadResume`
///
/// 同时挂在 `window` 与 `window.portfolioFunctions` 上，供内联脚本调用。
fn export_functions(host: &Rc<WebHost>) -> HostResult<()> {
    let window = &host.context().window;
    let functions = Object::new();

    let exports = [
        ("toggleDarkMode", PageInput::ToggleDarkMode),
        ("downloadResume", PageInput::DownloadResume),
    ];
    for (name, input) in exports {
        let host = Rc::clone(host);
        let callback = Closure::<dyn Fn()>::new(move || host.dispatch(input.clone()));
        Reflect::set(window, &JsValue::from_str(name), callback.as_ref())?;
        Reflect::set(&functions, &JsValue::from_str(name), callback.as_ref())?;
        callback.forget();
    }

    Reflect::set(window, &JsValue::from_str(EXPORT_NAMESPACE), &functions)?;
    Ok(())
}
