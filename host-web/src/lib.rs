//! # Host Web
//!
//! 作品集页面的浏览器宿主，编译为 wasm 后由页面以 ES 模块加载。
//!
//! ## 模块结构
//!
//! - `app`：宿主主体，连接页面运行时与执行器
//! - `dom`：元素发现、配置读取、表单取值
//! - `events`：事件监听与导出函数
//! - `executor`：Command 执行
//! - `observer`：`IntersectionObserver` 管理
//! - `timers`：周期与一次性定时器
//! - `storage`：`localStorage` 键值存储
//! - `logging`：tracing → 浏览器控制台

pub mod app;
pub mod dom;
pub mod error;
pub mod events;
pub mod executor;
pub mod logging;
pub mod observer;
pub mod storage;
pub mod timers;

pub use app::WebHost;
pub use error::{HostError, HostResult};

use wasm_bindgen::prelude::*;

/// wasm 模块入口
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    logging::init(tracing::Level::INFO);

    WebHost::boot()?;
    Ok(())
}
