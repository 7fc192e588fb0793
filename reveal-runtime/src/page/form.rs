//! # Form 模块
//!
//! 联系表单校验与模拟提交。
//!
//! 提交完全在本地模拟，不发起任何网络请求。

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::element::ElementId;
use crate::error::FormError;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("邮箱正则必须合法")
});

/// 表单字段值（按表单控件顺序）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormValues {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl FormValues {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            subject: subject.into(),
            message: message.into(),
        }
    }

    /// 校验字段
    ///
    /// 先检查空字段，再检查邮箱格式。只有空字符串算作未填写。
    pub fn validate(&self) -> Result<(), FormError> {
        let fields = [&self.name, &self.email, &self.subject, &self.message];
        if fields.iter().any(|f| f.is_empty()) {
            return Err(FormError::MissingField);
        }

        if !is_valid_email(&self.email) {
            return Err(FormError::InvalidEmailFormat);
        }

        Ok(())
    }
}

/// 邮箱格式检查：`local@domain.tld`，各段不含空白与 `@`
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// 通过校验的提交
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Submission {
    pub values: FormValues,
}

impl Submission {
    /// 日志中使用的 JSON 表示
    pub fn to_log_json(&self) -> String {
        serde_json::to_string(&self.values).unwrap_or_default()
    }
}

/// 联系表单
#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    element: Option<ElementId>,
    submitted: usize,
}

impl ContactForm {
    pub fn new(element: Option<ElementId>) -> Self {
        Self {
            element,
            submitted: 0,
        }
    }

    /// 表单元素，页面上没有表单时为 `None`
    pub fn element(&self) -> Option<ElementId> {
        self.element
    }

    /// 提交表单
    pub fn submit(&mut self, values: FormValues) -> Result<Submission, FormError> {
        values.validate()?;
        self.submitted += 1;
        Ok(Submission { values })
    }

    /// 成功提交次数
    pub fn submitted_count(&self) -> usize {
        self.submitted
    }
}
