//! # Reveal Runtime
//!
//! 作品集页面的核心运行时库。
//!
//! ## 架构概述
//!
//! `reveal-runtime` 是纯逻辑核心，不依赖 DOM、定时器或存储实现。
//! 它通过 **命令驱动模式** 与宿主层（Host）通信：
//!
//! ```text
//! Host (浏览器)                   Runtime
//!   │                              │
//!   │──── PageInput ─────────────►│
//!   │                              │ handle()
//!   │◄─── Vec<Command> ───────────│
//!   │                              │
//! ```
//!
//! 宿主负责发现元素、维护 `IntersectionObserver` 与定时器、把浏览器事件翻译为
//! [`PageInput`]，再把 Runtime 返回的 [`Command`] 应用到 DOM 上。
//!
//! ## 核心类型
//!
//! - [`PortfolioPage`]：页面运行时（组合根）
//! - [`RevealEngine`]：滚动触发的淡入与计数动画引擎
//! - [`Command`]：Runtime 向 Host 发出的指令
//! - [`PageInput`]：Host 向 Runtime 传递的输入
//! - [`PageLayout`]：宿主在启动时发现的元素布局
//!
//! ## 使用示例
//!
//! ```ignore
//! use reveal_runtime::{PageConfig, PortfolioPage, Capability, MemoryStore};
//!
//! let layout = discover_layout();
//! let mut page = PortfolioPage::new(PageConfig::default(), layout, Capability::Available, MemoryStore::new());
//!
//! host.apply(page.start());
//!
//! // 事件循环中
//! let commands = page.handle(input, &host);
//! host.apply(commands);
//! ```
//!
//! ## 模块结构
//!
//! - [`command`]：Command 定义
//! - [`input`]：PageInput 定义
//! - [`element`]：元素标识与触发状态
//! - [`layout`]：页面布局与布局查询
//! - [`timer`]：定时器标识与归属
//! - [`easing`]：CSS 缓动函数
//! - [`config`]：页面配置
//! - [`error`]：错误类型定义
//! - [`reveal`]：可见性监听、淡入动画、计数动画与引擎
//! - [`page`]：页面运行时与各交互协作者

pub mod command;
pub mod config;
pub mod easing;
pub mod element;
pub mod error;
pub mod input;
pub mod layout;
pub mod page;
pub mod reveal;
pub mod timer;

// 重导出核心类型
pub use command::{Command, LogLevel, StyleProperty};
pub use config::{
    CounterConfig, NotificationConfig, PageConfig, RevealConfig, ScrollConfig, Selectors,
    StorageConfig,
};
pub use easing::Easing;
pub use element::{ElementId, ElementKind, TrackedElement, TriggerState};
pub use error::{ConfigError, FormError, PageError, PageResult, StorageError};
pub use input::PageInput;
pub use layout::{
    AnchorNode, CounterNode, LazyImageNode, NavLinkNode, NavNodes, PageLayout, PageQuery,
    ProjectCardNode, SectionNode,
};
pub use page::form::{ContactForm, FormValues, Submission};
pub use page::notify::{NotificationCenter, NotificationId, NotificationKind};
pub use page::theme::{DarkMode, KeyValueStore, MemoryStore};
pub use page::PortfolioPage;
pub use reveal::animator::{FillMode, Keyframes, RevealAnimator, RevealFrame, RevealStyle};
pub use reveal::counter::{CounterAnimator, CounterFrame, CounterSpec, parse_counter_target};
pub use reveal::engine::RevealEngine;
pub use reveal::visibility::{
    Capability, IntersectionSample, RootMargin, Subscription, ThresholdConfig, VisibilityEvent,
    VisibilityWatcher, WatcherId,
};
pub use timer::{TimerId, TimerOwner, TimerRegistry};
