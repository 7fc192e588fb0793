//! # Logging 模块
//!
//! 把 `tracing` 输出转发到浏览器控制台。
//!
//! 每条日志先写入缓冲区，写入器销毁时按级别调用 `console.error/warn/info/log`。
//! wasm 环境没有系统时钟，因此关闭时间戳。

use std::io;

use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;
use wasm_bindgen::JsValue;

/// 控制台输出方法
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleMethod {
    Error,
    Warn,
    Info,
    Log,
}

impl ConsoleMethod {
    pub fn for_level(level: &Level) -> Self {
        match *level {
            Level::ERROR => ConsoleMethod::Error,
            Level::WARN => ConsoleMethod::Warn,
            Level::INFO => ConsoleMethod::Info,
            _ => ConsoleMethod::Log,
        }
    }

    fn emit(self, line: &str) {
        let line = JsValue::from_str(line);
        match self {
            ConsoleMethod::Error => web_sys::console::error_1(&line),
            ConsoleMethod::Warn => web_sys::console::warn_1(&line),
            ConsoleMethod::Info => web_sys::console::info_1(&line),
            ConsoleMethod::Log => web_sys::console::log_1(&line),
        }
    }
}

/// 单条日志的写入器
pub struct ConsoleWriter {
    method: ConsoleMethod,
    buffer: Vec<u8>,
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let text = String::from_utf8_lossy(&self.buffer);
        let line = text.trim_end();
        if !line.is_empty() {
            self.method.emit(line);
        }
    }
}

/// 控制台写入器工厂
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleMakeWriter;

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter {
            method: ConsoleMethod::Log,
            buffer: Vec::new(),
        }
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter {
            method: ConsoleMethod::for_level(meta.level()),
            buffer: Vec::new(),
        }
    }
}

/// 安装全局日志订阅器，重复调用时保留第一次的设置
pub fn init(max_level: Level) {
    let _ = tracing_subscriber::fmt()
        .with_writer(ConsoleMakeWriter)
        .with_max_level(max_level)
        .with_ansi(false)
        .with_target(false)
        .without_time()
        .try_init();
}
