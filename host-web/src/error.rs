//! 宿主层错误类型

use thiserror::Error;
use wasm_bindgen::JsValue;

/// 宿主层错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HostError {
    /// 当前环境没有 `window`（例如运行在 Worker 中）
    #[error("window 不可用")]
    NoWindow,

    /// 没有 `document`
    #[error("document 不可用")]
    NoDocument,

    /// 元素缺失
    #[error("找不到元素: {0}")]
    MissingElement(String),

    /// 元素类型与预期不符
    #[error("元素 {element} 不是 {expected}")]
    UnexpectedElement {
        element: String,
        expected: &'static str,
    },

    /// JS 调用抛出异常
    #[error("JS 异常: {0}")]
    Js(String),
}

impl From<JsValue> for HostError {
    fn from(value: JsValue) -> Self {
        HostError::Js(describe_js_value(&value))
    }
}

impl From<HostError> for JsValue {
    fn from(error: HostError) -> Self {
        JsValue::from_str(&error.to_string())
    }
}

/// 把 JS 异常转换成可读文本
pub fn describe_js_value(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

/// 宿主层 Result
pub type HostResult<T> = Result<T, HostError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            HostError::MissingElement("#contactForm".to_string()).to_string(),
            "找不到元素: #contactForm"
        );
        assert_eq!(
            HostError::UnexpectedElement {
                element: "#3".to_string(),
                expected: "HtmlFormElement",
            }
            .to_string(),
            "元素 #3 不是 HtmlFormElement"
        );
    }
}
