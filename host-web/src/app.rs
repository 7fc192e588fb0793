//! # App 模块
//!
//! 浏览器宿主：持有页面运行时与指令执行器，把浏览器事件翻译为 [`PageInput`]。
//!
//! ```text
//! 浏览器事件 ──► dispatch(PageInput) ──► PortfolioPage::handle
//!                                             │
//!                  CommandExecutor ◄── Vec<Command>
//! ```
//!
//! 所有回调都在浏览器事件循环中异步到达，页面与执行器的借用不会嵌套。

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use reveal_runtime::{
    Capability, Command, ElementId, PageInput, PageLayout, PortfolioPage, TimerId,
};
use tracing::{debug, info, warn};
use web_sys::{Document, Element, Window};

use crate::dom::{self, DomRegistry};
use crate::error::{HostError, HostResult};
use crate::events;
use crate::executor::CommandExecutor;
use crate::observer;
use crate::storage::BrowserStore;

/// 执行指令所需的浏览器对象
pub struct HostContext {
    pub window: Window,
    pub document: Document,
    pub dom: DomRegistry,
    /// 回到宿主的弱引用，供定时器与观察器回调使用
    pub host: Weak<WebHost>,
}

/// 浏览器宿主
pub struct WebHost {
    context: HostContext,
    page: RefCell<PortfolioPage<BrowserStore>>,
    executor: RefCell<CommandExecutor>,
}

impl WebHost {
    /// 发现页面元素、启动运行时并绑定事件
    pub fn boot() -> HostResult<Rc<Self>> {
        let window = web_sys::window().ok_or(HostError::NoWindow)?;
        let document = window.document().ok_or(HostError::NoDocument)?;

        let config = dom::read_config(&document);
        let (registry, layout) = dom::discover(&document, &config.selectors)?;

        let capability = if observer::is_supported(&window) {
            Capability::Available
        } else {
            debug!("IntersectionObserver 不可用，滚动动画与图片懒加载将被跳过");
            Capability::Unavailable
        };

        let store = BrowserStore::local(&window);
        if !store.is_available() {
            warn!("localStorage 不可用，深色模式不会被保存");
        }
        let page = PortfolioPage::new(config, layout, capability, store);

        let host = Rc::new_cyclic(|weak| WebHost {
            context: HostContext {
                window,
                document,
                dom: registry,
                host: weak.clone(),
            },
            page: RefCell::new(page),
            executor: RefCell::new(CommandExecutor::new()),
        });

        let commands = host.page.borrow_mut().start();
        host.execute(commands);
        events::bind(&host)?;

        info!(elements = host.context.dom.len(), "作品集页面已启动");
        Ok(host)
    }

    /// 把一条输入交给页面，并执行返回的指令
    pub fn dispatch(&self, input: PageInput) {
        let commands = match self.page.try_borrow_mut() {
            Ok(mut page) => page.handle(input, &self.context.dom),
            Err(_) => {
                warn!(?input, "页面正在处理其他输入，丢弃本次输入");
                return;
            }
        };
        self.execute(commands);
    }

    /// 定时器触发
    pub fn timer_fired(&self, timer: TimerId) {
        if let Ok(mut executor) = self.executor.try_borrow_mut() {
            executor.timer_fired(timer);
        }
        self.dispatch(PageInput::timer(timer));
    }

    fn execute(&self, commands: Vec<Command>) {
        match self.executor.try_borrow_mut() {
            Ok(mut executor) => executor.execute_all(&commands, &self.context),
            Err(_) => warn!(count = commands.len(), "执行器正忙，丢弃指令"),
        }
    }

    pub fn context(&self) -> &HostContext {
        &self.context
    }

    /// 当前页面布局
    pub fn layout(&self) -> PageLayout {
        self.page.borrow().layout().clone()
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.context.dom.element(id)
    }

    pub fn element_id(&self, element: &Element) -> Option<ElementId> {
        self.context.dom.id_of(element)
    }
}
