//! # Error 模块
//!
//! 定义 reveal-runtime 中使用的错误类型。
//!
//! 所有错误都只影响单个增强功能，不会中断页面上的其他功能。

use thiserror::Error;

/// 联系表单校验错误
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormError {
    /// 存在未填写的字段
    #[error("表单存在未填写的字段")]
    MissingField,

    /// 邮箱格式无效
    #[error("邮箱地址格式无效")]
    InvalidEmailFormat,
}

impl FormError {
    /// 面向访客的阻塞提示文本
    pub fn notice(&self) -> &'static str {
        match self {
            FormError::MissingField => "Please fill in all fields",
            FormError::InvalidEmailFormat => "Please enter a valid email address",
        }
    }
}

/// 配置错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// JSON 解析失败
    #[error("配置解析失败: {0}")]
    Parse(String),

    /// 配置项取值无效
    #[error("配置项 '{field}' 无效: {message}")]
    Invalid { field: String, message: String },
}

impl ConfigError {
    pub(crate) fn invalid(field: &str, message: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// 键值存储错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// 当前环境没有可用的存储
    #[error("存储不可用")]
    Unavailable,

    /// 读取被拒绝
    #[error("读取 '{key}' 失败: {message}")]
    ReadRejected { key: String, message: String },

    /// 写入被拒绝（例如配额已满或隐私模式）
    #[error("写入 '{key}' 失败: {message}")]
    WriteRejected { key: String, message: String },
}

/// reveal-runtime 统一错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PageError {
    /// 表单错误
    #[error("表单错误: {0}")]
    Form(#[from] FormError),

    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),

    /// 存储错误
    #[error("存储错误: {0}")]
    Storage(#[from] StorageError),
}

/// Result 类型别名
pub type PageResult<T> = Result<T, PageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_error_notice() {
        assert_eq!(FormError::MissingField.notice(), "Please fill in all fields");
        assert_eq!(
            FormError::InvalidEmailFormat.notice(),
            "Please enter a valid email address"
        );
    }

    #[test]
    fn test_page_error_from() {
        let err: PageError = FormError::MissingField.into();
        assert_eq!(err, PageError::Form(FormError::MissingField));

        let err: PageError = StorageError::Unavailable.into();
        assert!(err.to_string().contains("存储不可用"));
    }
}
