//! # Page 模块
//!
//! 页面运行时：把所有交互协作者组合在一起。
//!
//! ## 执行模型
//!
//! ```text
//! start() ──► 注入样式 / 恢复深色模式 / 开始观察
//!
//! handle(input) ──► 分派给对应协作者 ──► Vec<Command>
//! ```
//!
//! `PortfolioPage` 持有全部可变状态，宿主只保存它的一个实例。

pub mod form;
pub mod hover;
pub mod lazy_image;
pub mod nav;
pub mod notify;
pub mod scroll;
pub mod scroll_spy;
pub mod style;
pub mod theme;

use crate::command::{Command, LogLevel};
use crate::config::PageConfig;
use crate::input::PageInput;
use crate::layout::{PageLayout, PageQuery};
use crate::reveal::engine::RevealEngine;
use crate::reveal::visibility::{Capability, WatcherId};
use crate::timer::{TimerId, TimerOwner, TimerRegistry};

use form::{ContactForm, FormValues};
use hover::HoverEffects;
use lazy_image::LazyImageLoader;
use nav::NavToggle;
use notify::{NotificationCenter, NotificationKind};
use scroll::{Parallax, SmoothScroll};
use scroll_spy::ScrollSpy;
use theme::{DARK_MODE_CLASS, DarkMode, KeyValueStore};

/// 提交成功后的提示
pub const SUBMIT_SUCCESS_MESSAGE: &str = "Message sent successfully! Thank you for reaching out.";

/// 下载简历占位提示
pub const RESUME_PLACEHOLDER_MESSAGE: &str =
    "Resume download functionality can be integrated with your resume file";

/// 页面加载完成日志
pub const READY_MESSAGE: &str = "Professor Portfolio loaded successfully";

/// 页面运行时
pub struct PortfolioPage<S: KeyValueStore> {
    layout: PageLayout,
    timers: TimerRegistry,
    reveal: RevealEngine,
    nav: NavToggle,
    spy: ScrollSpy,
    smooth_scroll: SmoothScroll,
    parallax: Parallax,
    hover: HoverEffects,
    lazy_images: LazyImageLoader,
    form: ContactForm,
    notifications: NotificationCenter,
    dark_mode: DarkMode,
    store: S,
    /// 构造期间产生、等待 `start` 一并输出的日志
    pending_logs: Vec<Command>,
}

impl<S: KeyValueStore> PortfolioPage<S> {
    /// 创建页面运行时
    ///
    /// 深色模式标记只在这里读取一次；读取失败按关闭处理。
    pub fn new(config: PageConfig, layout: PageLayout, capability: Capability, store: S) -> Self {
        let mut pending_logs = Vec::new();
        let key = config.storage.dark_mode_key.clone();
        let dark_mode = match DarkMode::load(key.clone(), &store) {
            Ok(mode) => mode,
            Err(e) => {
                pending_logs.push(Command::log(
                    LogLevel::Warn,
                    format!("读取深色模式失败，使用默认值: {}", e),
                ));
                DarkMode::disabled(key)
            }
        };

        Self {
            timers: TimerRegistry::new(),
            reveal: RevealEngine::new(&config, &layout, capability),
            nav: NavToggle::new(layout.nav),
            spy: ScrollSpy::new(&layout.sections, &layout.nav_links, config.scroll.spy_offset),
            smooth_scroll: SmoothScroll::new(&layout.anchors),
            parallax: Parallax::new(layout.hero, config.scroll.parallax_factor),
            hover: HoverEffects::new(&layout.skill_cards, &layout.project_cards),
            lazy_images: LazyImageLoader::new(
                &layout.lazy_images,
                config.reveal.lazy_image,
                capability,
            ),
            form: ContactForm::new(layout.contact_form),
            notifications: NotificationCenter::new(config.notification.duration()),
            dark_mode,
            store,
            pending_logs,
            layout,
        }
    }

    /// 初始化页面
    ///
    /// 顺序：注入样式、恢复深色模式、开始观察区块与数字块、开始观察懒加载图片。
    pub fn start(&mut self) -> Vec<Command> {
        let mut out = std::mem::take(&mut self.pending_logs);

        out.push(Command::InjectStylesheet {
            css: style::page_stylesheet(),
        });

        if self.dark_mode.is_enabled() {
            out.push(Command::class(self.layout.body, DARK_MODE_CLASS, true));
        }

        self.reveal.start(&mut out);
        self.lazy_images.start(&mut out);
        out
    }

    /// 处理一条输入
    pub fn handle(&mut self, input: PageInput, query: &dyn PageQuery) -> Vec<Command> {
        let mut out = Vec::new();

        match input {
            PageInput::Visibility { watcher, sample } => match watcher {
                WatcherId::LazyImages => self.lazy_images.on_visibility(sample, &mut out),
                _ => {
                    self.reveal
                        .on_visibility(watcher, sample, query, &mut self.timers, &mut out);
                }
            },
            PageInput::TimerFired { timer } => self.on_timer(timer, &mut out),
            PageInput::Scroll { scroll_y } => {
                self.spy.on_scroll(scroll_y, query, &mut out);
                self.parallax.on_scroll(scroll_y, &mut out);
            }
            PageInput::HamburgerClicked => self.nav.toggle(&mut out),
            PageInput::NavLinkClicked { .. } => self.nav.close(&mut out),
            PageInput::AnchorClicked { element } => self.smooth_scroll.on_click(element, &mut out),
            PageInput::FormSubmitted { values } => self.submit_form(values, &mut out),
            PageInput::PointerEntered { element } => self.hover.on_enter(element, &mut out),
            PageInput::PointerLeft { element } => self.hover.on_leave(element, &mut out),
            PageInput::HistoryPopped { hash } => self.spy.on_history(&hash, &mut out),
            PageInput::ToggleDarkMode => out.extend(self.toggle_dark_mode()),
            PageInput::DownloadResume => out.extend(self.download_resume()),
            PageInput::DocumentReady => out.push(Command::log(LogLevel::Info, READY_MESSAGE)),
        }

        out
    }

    /// 切换深色模式
    ///
    /// 写入失败只记录警告，页面状态照常切换。
    pub fn toggle_dark_mode(&mut self) -> Vec<Command> {
        let mut out = Vec::new();
        if let Err(e) = self.dark_mode.toggle(&mut self.store) {
            out.push(Command::log(LogLevel::Warn, format!("保存深色模式失败: {}", e)));
        }
        out.push(Command::class(
            self.layout.body,
            DARK_MODE_CLASS,
            self.dark_mode.is_enabled(),
        ));
        out
    }

    /// 下载简历（占位）
    pub fn download_resume(&mut self) -> Vec<Command> {
        vec![
            Command::log(LogLevel::Info, "Download resume functionality can be implemented here"),
            Command::Alert {
                message: RESUME_PLACEHOLDER_MESSAGE.to_string(),
            },
        ]
    }

    fn on_timer(&mut self, timer: TimerId, out: &mut Vec<Command>) {
        match self.timers.owner(timer) {
            Some(TimerOwner::Counter(_)) => {
                self.reveal.on_timer(timer, &mut self.timers, out);
            }
            Some(TimerOwner::Notification(id)) => {
                self.notifications.on_timer(id, timer, &mut self.timers, out);
            }
            // 已释放的定时器可能还有一次在途回调
            None => {}
        }
    }

    fn submit_form(&mut self, values: FormValues, out: &mut Vec<Command>) {
        match self.form.submit(values) {
            Ok(submission) => {
                out.push(Command::log(
                    LogLevel::Info,
                    format!("Form Data: {}", submission.to_log_json()),
                ));
                self.notifications.show(
                    SUBMIT_SUCCESS_MESSAGE,
                    NotificationKind::Success,
                    &mut self.timers,
                    out,
                );
                if let Some(element) = self.form.element() {
                    out.push(Command::ResetForm { element });
                }
            }
            Err(e) => out.push(Command::Alert {
                message: e.notice().to_string(),
            }),
        }
    }

    // =========================================================================
    // 状态查询
    // =========================================================================

    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    pub fn reveal(&self) -> &RevealEngine {
        &self.reveal
    }

    pub fn timers(&self) -> &TimerRegistry {
        &self.timers
    }

    pub fn nav(&self) -> &NavToggle {
        &self.nav
    }

    pub fn scroll_spy(&self) -> &ScrollSpy {
        &self.spy
    }

    pub fn lazy_images(&self) -> &LazyImageLoader {
        &self.lazy_images
    }

    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    pub fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }

    pub fn is_dark_mode(&self) -> bool {
        self.dark_mode.is_enabled()
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
