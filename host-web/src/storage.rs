//! `localStorage` 实现的键值存储

use reveal_runtime::{KeyValueStore, StorageError};
use tracing::debug;
use web_sys::{Storage, Window};

use crate::error::describe_js_value;

/// 浏览器本地存储
///
/// 隐私模式或沙箱 iframe 中 `localStorage` 可能不可用，此时所有操作返回
/// [`StorageError::Unavailable`]。
pub struct BrowserStore {
    storage: Option<Storage>,
}

impl BrowserStore {
    /// 打开 `window.localStorage`
    pub fn local(window: &Window) -> Self {
        let storage = match window.local_storage() {
            Ok(storage) => storage,
            Err(e) => {
                debug!(error = %describe_js_value(&e), "读取 localStorage 失败");
                None
            }
        };
        Self { storage }
    }

    pub fn is_available(&self) -> bool {
        self.storage.is_some()
    }
}

impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let storage = self.storage.as_ref().ok_or(StorageError::Unavailable)?;
        storage
            .get_item(key)
            .map_err(|e| StorageError::ReadRejected {
                key: key.to_string(),
                message: describe_js_value(&e),
            })
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let storage = self.storage.as_ref().ok_or(StorageError::Unavailable)?;
        storage
            .set_item(key, value)
            .map_err(|e| StorageError::WriteRejected {
                key: key.to_string(),
                message: describe_js_value(&e),
            })
    }
}
