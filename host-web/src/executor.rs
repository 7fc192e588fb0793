//! # Command Executor 模块
//!
//! Command 执行器，负责将 Runtime 发出的 Command 转换为实际的 DOM 操作。
//!
//! ## 设计说明
//!
//! - 每条指令独立执行，失败只记录警告，不影响后续指令
//! - 观察器与定时器的句柄由执行器持有，回调通过弱引用回到宿主
//! - 执行器不做任何判断，动画是否触发、计数是否结束都由 Runtime 决定

use std::collections::HashMap;

use reveal_runtime::page::style::notification_style;
use reveal_runtime::{Command, LogLevel, NotificationId, NotificationKind, TimerId};
use tracing::{debug, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{
    Element, HtmlElement, HtmlFormElement, ScrollBehavior, ScrollIntoViewOptions,
    ScrollLogicalPosition,
};

use crate::app::HostContext;
use crate::error::{HostError, HostResult};
use crate::observer::ObserverSet;
use crate::timers::TimerSet;

/// Command 执行器
#[derive(Default)]
pub struct CommandExecutor {
    observers: ObserverSet,
    timers: TimerSet,
    /// 正在显示的提示消息
    notifications: HashMap<NotificationId, Element>,
}

impl CommandExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// 依次执行指令
    pub fn execute_all(&mut self, commands: &[Command], ctx: &HostContext) {
        for command in commands {
            if let Err(e) = self.execute(command, ctx) {
                warn!(error = %e, ?command, "指令执行失败");
            }
        }
    }

    /// 执行单条指令
    pub fn execute(&mut self, command: &Command, ctx: &HostContext) -> HostResult<()> {
        match command {
            Command::SetStyle {
                element,
                property,
                value,
            } => {
                let element = html_element(ctx.dom.require(*element)?)?;
                element.style().set_property(property.css_name(), value)?;
            }
            Command::SetClass {
                element,
                class,
                enabled,
            } => {
                let element = ctx.dom.require(*element)?;
                element.class_list().toggle_with_force(class, *enabled)?;
            }
            Command::SetText { element, text } => {
                ctx.dom.require(*element)?.set_text_content(Some(text));
            }
            Command::SetAttribute {
                element,
                name,
                value,
            } => {
                ctx.dom.require(*element)?.set_attribute(name, value)?;
            }
            Command::Observe {
                watcher,
                element,
                config,
            } => {
                let element = ctx.dom.require(*element)?;
                self.observers.observe(&ctx.host, *watcher, element, config)?;
            }
            Command::Unobserve { watcher, element } => {
                let element = ctx.dom.require(*element)?;
                self.observers.unobserve(*watcher, element);
            }
            Command::StartInterval { timer, period } => {
                self.timers.start_interval(&ctx.host, *timer, *period);
            }
            Command::StartTimeout { timer, delay } => {
                self.timers.start_timeout(&ctx.host, *timer, *delay);
            }
            Command::CancelTimer { timer } => self.timers.cancel(*timer),
            Command::ScrollIntoView { target_id } => self.scroll_into_view(target_id, ctx),
            Command::Alert { message } => ctx.window.alert_with_message(message)?,
            Command::ShowNotification { id, kind, message } => {
                self.show_notification(*id, *kind, message, ctx)?;
            }
            Command::RemoveNotification { id } => {
                if let Some(element) = self.notifications.remove(id) {
                    element.remove();
                }
            }
            Command::ResetForm { element } => {
                let element = ctx.dom.require(*element)?;
                let form = element.dyn_ref::<HtmlFormElement>().ok_or_else(|| {
                    HostError::UnexpectedElement {
                        element: element.tag_name(),
                        expected: "HtmlFormElement",
                    }
                })?;
                form.reset();
            }
            Command::InjectStylesheet { css } => {
                let style = ctx.document.create_element("style")?;
                style.set_text_content(Some(css));
                let head = ctx
                    .document
                    .head()
                    .ok_or_else(|| HostError::MissingElement("head".to_string()))?;
                head.append_child(&style)?;
            }
            Command::Log { level, message } => match level {
                LogLevel::Debug => debug!("{}", message),
                LogLevel::Info => info!("{}", message),
                LogLevel::Warn => warn!("{}", message),
            },
        }
        Ok(())
    }

    /// 一次性定时器已经触发
    pub fn timer_fired(&mut self, timer: TimerId) {
        self.timers.forget_fired(timer);
    }

    fn scroll_into_view(&self, target_id: &str, ctx: &HostContext) {
        let Some(target) = ctx.document.get_element_by_id(target_id) else {
            debug!(target_id, "滚动目标不存在");
            return;
        };

        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        options.set_block(ScrollLogicalPosition::Start);
        target.scroll_into_view_with_scroll_into_view_options(&options);
    }

    fn show_notification(
        &mut self,
        id: NotificationId,
        kind: NotificationKind,
        message: &str,
        ctx: &HostContext,
    ) -> HostResult<()> {
        let element = ctx.document.create_element("div")?;
        element.set_class_name("notification");
        element.set_attribute("style", &notification_style(kind))?;
        element.set_text_content(Some(message));

        let body = ctx
            .document
            .body()
            .ok_or_else(|| HostError::MissingElement("body".to_string()))?;
        body.append_child(&element)?;

        self.notifications.insert(id, element);
        Ok(())
    }
}

fn html_element(element: &Element) -> HostResult<&HtmlElement> {
    element
        .dyn_ref::<HtmlElement>()
        .ok_or_else(|| HostError::UnexpectedElement {
            element: element.tag_name(),
            expected: "HtmlElement",
        })
}
