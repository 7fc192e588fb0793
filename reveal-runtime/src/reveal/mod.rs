//! # Reveal 模块
//!
//! 滚动触发的淡入与计数动画引擎。
//!
//! ## 数据流
//!
//! ```text
//! 布局 ─► VisibilityWatcher ─► RevealAnimator / CounterAnimator ─► Command
//! ```
//!
//! ## 模块结构
//!
//! - [`visibility`]：一次性可见性监听
//! - [`animator`]：区块淡入
//! - [`counter`]：数字计数插值
//! - [`engine`]：组合根，连接监听器与动画器

pub mod animator;
pub mod counter;
pub mod engine;
pub mod visibility;

pub use engine::RevealEngine;
