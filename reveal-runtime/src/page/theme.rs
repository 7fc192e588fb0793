//! # Theme 模块
//!
//! 深色模式开关，持久化为单个布尔标记。
//!
//! 存储通过窄接口 [`KeyValueStore`] 访问：宿主用 `localStorage` 实现，
//! 测试与无存储环境用 [`MemoryStore`]。

use std::collections::HashMap;

use crate::error::StorageError;

/// 深色模式在 `<body>` 上的 class
pub const DARK_MODE_CLASS: &str = "dark-mode";

/// 键值存储
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// 内存存储
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 预置一条记录
    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// 深色模式状态
#[derive(Debug, Clone)]
pub struct DarkMode {
    key: String,
    enabled: bool,
}

impl DarkMode {
    /// 读取持久化标记
    ///
    /// 只有存储值恰好为 `"true"` 时开启；读取失败视为关闭。
    pub fn load(key: impl Into<String>, store: &dyn KeyValueStore) -> Result<Self, StorageError> {
        let key = key.into();
        let enabled = store.get(&key)?.as_deref() == Some("true");
        Ok(Self { key, enabled })
    }

    /// 默认关闭
    pub fn disabled(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            enabled: false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// 切换并写回存储
    ///
    /// 内存中的状态总会切换；写入失败时返回错误，由调用方记录。
    pub fn toggle(&mut self, store: &mut dyn KeyValueStore) -> Result<bool, StorageError> {
        self.enabled = !self.enabled;
        let value = if self.enabled { "true" } else { "false" };
        store.set(&self.key, value)?;
        Ok(self.enabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }

        fn set(&mut self, key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::WriteRejected {
                key: key.to_string(),
                message: "quota".to_string(),
            })
        }
    }

    #[test]
    fn test_load_true_flag() {
        let store = MemoryStore::new().with_entry("darkMode", "true");
        let mode = DarkMode::load("darkMode", &store).unwrap();
        assert!(mode.is_enabled());
    }

    #[test]
    fn test_load_other_values_disable() {
        for value in ["false", "TRUE", "1", ""] {
            let store = MemoryStore::new().with_entry("darkMode", value);
            let mode = DarkMode::load("darkMode", &store).unwrap();
            assert!(!mode.is_enabled(), "value {value:?}");
        }
        let mode = DarkMode::load("darkMode", &MemoryStore::new()).unwrap();
        assert!(!mode.is_enabled());
    }

    #[test]
    fn test_toggle_twice_restores_flag() {
        let mut store = MemoryStore::new().with_entry("darkMode", "false");
        let mut mode = DarkMode::load("darkMode", &store).unwrap();

        assert_eq!(mode.toggle(&mut store), Ok(true));
        assert_eq!(store.get("darkMode").unwrap().as_deref(), Some("true"));

        assert_eq!(mode.toggle(&mut store), Ok(false));
        assert_eq!(store.get("darkMode").unwrap().as_deref(), Some("false"));
    }

    #[test]
    fn test_toggle_write_failure_still_flips() {
        let mut store = ReadOnlyStore;
        let mut mode = DarkMode::disabled("darkMode");
        assert!(mode.toggle(&mut store).is_err());
        assert!(mode.is_enabled());
    }
}
