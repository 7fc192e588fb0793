//! # Config 模块
//!
//! 页面配置管理，集中管理所有选择器、阈值与时长。
//!
//! ## 配置优先级
//!
//! 1. 页面内嵌的 JSON 配置块（`#portfolio-config`）
//! 2. 默认值
//!
//! 每个字段都有独立的默认值，配置块只需写出要覆盖的部分。

use serde::{Deserialize, Deserializer, Serialize};
use std::time::Duration;

use crate::error::ConfigError;
use crate::reveal::visibility::{RootMargin, ThresholdConfig};

/// 页面配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageConfig {
    /// 元素选择器
    #[serde(default)]
    pub selectors: Selectors,

    /// 可见性阈值
    #[serde(default)]
    pub reveal: RevealConfig,

    /// 计数动画
    #[serde(default)]
    pub counter: CounterConfig,

    /// 滚动相关
    #[serde(default)]
    pub scroll: ScrollConfig,

    /// 提示消息
    #[serde(default)]
    pub notification: NotificationConfig,

    /// 本地存储
    #[serde(default)]
    pub storage: StorageConfig,
}

/// 元素选择器
///
/// `hamburger`、`nav_menu`、`contact_form` 是元素 id，其余是 CSS 选择器。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selectors {
    #[serde(default = "default_sections")]
    pub sections: String,
    #[serde(default = "default_facts")]
    pub facts: String,
    /// 在 `.fact` 内查找数字展示元素
    #[serde(default = "default_fact_display")]
    pub fact_display: String,
    #[serde(default = "default_lazy_images")]
    pub lazy_images: String,
    #[serde(default = "default_hamburger")]
    pub hamburger: String,
    #[serde(default = "default_nav_menu")]
    pub nav_menu: String,
    #[serde(default = "default_nav_links")]
    pub nav_links: String,
    #[serde(default = "default_anchors")]
    pub anchors: String,
    #[serde(default = "default_contact_form")]
    pub contact_form: String,
    #[serde(default = "default_hero")]
    pub hero: String,
    #[serde(default = "default_skill_cards")]
    pub skill_cards: String,
    #[serde(default = "default_project_cards")]
    pub project_cards: String,
    /// 在 `.project-card` 内查找图片
    #[serde(default = "default_project_image")]
    pub project_image: String,
}

/// 可见性阈值配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevealConfig {
    /// 区块：可见 10%，视口底部收缩 100px
    #[serde(
        default = "ThresholdConfig::section",
        deserialize_with = "section_threshold"
    )]
    pub section: ThresholdConfig,

    /// 数字块：可见 50%
    #[serde(
        default = "ThresholdConfig::counter",
        deserialize_with = "counter_threshold"
    )]
    pub counter: ThresholdConfig,

    /// 懒加载图片：任意可见
    #[serde(
        default = "ThresholdConfig::lazy_image",
        deserialize_with = "lazy_image_threshold"
    )]
    pub lazy_image: ThresholdConfig,
}

/// 阈值配置的部分覆盖
///
/// 未写出的字段沿用该监听器自己的默认值，而不是统一的零值。
#[derive(Debug, Default, Deserialize)]
struct ThresholdOverride {
    threshold: Option<f64>,
    #[serde(default)]
    root_margin: MarginOverride,
}

#[derive(Debug, Default, Deserialize)]
struct MarginOverride {
    top: Option<f64>,
    right: Option<f64>,
    bottom: Option<f64>,
    left: Option<f64>,
}

impl ThresholdOverride {
    fn apply(self, base: ThresholdConfig) -> ThresholdConfig {
        let margin = self.root_margin;
        ThresholdConfig::new(
            self.threshold.unwrap_or(base.threshold),
            RootMargin {
                top: margin.top.unwrap_or(base.root_margin.top),
                right: margin.right.unwrap_or(base.root_margin.right),
                bottom: margin.bottom.unwrap_or(base.root_margin.bottom),
                left: margin.left.unwrap_or(base.root_margin.left),
            },
        )
    }
}

fn section_threshold<'de, D: Deserializer<'de>>(d: D) -> Result<ThresholdConfig, D::Error> {
    Ok(ThresholdOverride::deserialize(d)?.apply(ThresholdConfig::section()))
}

fn counter_threshold<'de, D: Deserializer<'de>>(d: D) -> Result<ThresholdConfig, D::Error> {
    Ok(ThresholdOverride::deserialize(d)?.apply(ThresholdConfig::counter()))
}

fn lazy_image_threshold<'de, D: Deserializer<'de>>(d: D) -> Result<ThresholdConfig, D::Error> {
    Ok(ThresholdOverride::deserialize(d)?.apply(ThresholdConfig::lazy_image()))
}

/// 计数动画配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CounterConfig {
    /// 从 0 到目标值的步数
    #[serde(default = "default_counter_ticks")]
    pub ticks: u32,

    /// 每步间隔（毫秒）
    #[serde(default = "default_counter_interval_ms")]
    pub interval_ms: u64,
}

/// 滚动配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// 滚动高亮的提前量（像素）
    #[serde(default = "default_spy_offset")]
    pub spy_offset: f64,

    /// 视差系数
    #[serde(default = "default_parallax_factor")]
    pub parallax_factor: f64,
}

/// 提示消息配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// 自动关闭时间（毫秒）
    #[serde(default = "default_notification_duration_ms")]
    pub duration_ms: u64,
}

/// 本地存储配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// 深色模式标记的存储键
    #[serde(default = "default_dark_mode_key")]
    pub dark_mode_key: String,
}

// 默认值函数
fn default_sections() -> String {
    "section".to_string()
}

fn default_facts() -> String {
    ".fact".to_string()
}

fn default_fact_display() -> String {
    "h3".to_string()
}

fn default_lazy_images() -> String {
    "img[data-src]".to_string()
}

fn default_hamburger() -> String {
    "hamburger".to_string()
}

fn default_nav_menu() -> String {
    "navMenu".to_string()
}

fn default_nav_links() -> String {
    ".nav-link".to_string()
}

fn default_anchors() -> String {
    "a[href^=\"#\"]".to_string()
}

fn default_contact_form() -> String {
    "contactForm".to_string()
}

fn default_hero() -> String {
    ".hero".to_string()
}

fn default_skill_cards() -> String {
    ".skill-category".to_string()
}

fn default_project_cards() -> String {
    ".project-card".to_string()
}

fn default_project_image() -> String {
    ".project-image img".to_string()
}

fn default_counter_ticks() -> u32 {
    50
}

fn default_counter_interval_ms() -> u64 {
    30
}

fn default_spy_offset() -> f64 {
    200.0
}

fn default_parallax_factor() -> f64 {
    0.5
}

fn default_notification_duration_ms() -> u64 {
    5000
}

fn default_dark_mode_key() -> String {
    "darkMode".to_string()
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            selectors: Selectors::default(),
            reveal: RevealConfig::default(),
            counter: CounterConfig::default(),
            scroll: ScrollConfig::default(),
            notification: NotificationConfig::default(),
            storage: StorageConfig::default(),
        }
    }
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            sections: default_sections(),
            facts: default_facts(),
            fact_display: default_fact_display(),
            lazy_images: default_lazy_images(),
            hamburger: default_hamburger(),
            nav_menu: default_nav_menu(),
            nav_links: default_nav_links(),
            anchors: default_anchors(),
            contact_form: default_contact_form(),
            hero: default_hero(),
            skill_cards: default_skill_cards(),
            project_cards: default_project_cards(),
            project_image: default_project_image(),
        }
    }
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            section: ThresholdConfig::section(),
            counter: ThresholdConfig::counter(),
            lazy_image: ThresholdConfig::lazy_image(),
        }
    }
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            ticks: default_counter_ticks(),
            interval_ms: default_counter_interval_ms(),
        }
    }
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            spy_offset: default_spy_offset(),
            parallax_factor: default_parallax_factor(),
        }
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            duration_ms: default_notification_duration_ms(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dark_mode_key: default_dark_mode_key(),
        }
    }
}

impl CounterConfig {
    /// 每步间隔
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl NotificationConfig {
    /// 自动关闭时间
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

impl PageConfig {
    /// 从 JSON 文本解析并验证配置
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// 序列化为格式化的 JSON
    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_threshold("reveal.section", &self.reveal.section)?;
        validate_threshold("reveal.counter", &self.reveal.counter)?;
        validate_threshold("reveal.lazy_image", &self.reveal.lazy_image)?;

        if self.counter.ticks == 0 {
            return Err(ConfigError::invalid("counter.ticks", "步数必须大于 0"));
        }
        if self.counter.interval_ms == 0 {
            return Err(ConfigError::invalid(
                "counter.interval_ms",
                "间隔必须大于 0",
            ));
        }
        if !self.scroll.spy_offset.is_finite() {
            return Err(ConfigError::invalid("scroll.spy_offset", "必须是有限数值"));
        }
        if !self.scroll.parallax_factor.is_finite() {
            return Err(ConfigError::invalid(
                "scroll.parallax_factor",
                "必须是有限数值",
            ));
        }
        if self.storage.dark_mode_key.is_empty() {
            return Err(ConfigError::invalid(
                "storage.dark_mode_key",
                "存储键不能为空",
            ));
        }

        let selectors = [
            ("selectors.sections", &self.selectors.sections),
            ("selectors.facts", &self.selectors.facts),
            ("selectors.fact_display", &self.selectors.fact_display),
            ("selectors.lazy_images", &self.selectors.lazy_images),
            ("selectors.nav_links", &self.selectors.nav_links),
            ("selectors.anchors", &self.selectors.anchors),
        ];
        for (field, value) in selectors {
            if value.trim().is_empty() {
                return Err(ConfigError::invalid(field, "选择器不能为空"));
            }
        }

        Ok(())
    }
}

fn validate_threshold(field: &str, config: &ThresholdConfig) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&config.threshold) {
        return Err(ConfigError::invalid(field, "阈值必须在 0.0 - 1.0 之间"));
    }
    let RootMargin {
        top,
        right,
        bottom,
        left,
    } = config.root_margin;
    if ![top, right, bottom, left].iter().all(|v| v.is_finite()) {
        return Err(ConfigError::invalid(field, "边距必须是有限数值"));
    }
    Ok(())
}
