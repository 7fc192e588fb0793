//! # 淡入与计数集成测试
//!
//! 通过假宿主驱动 PortfolioPage，验证 Runtime → Command → 页面状态 的链路。

mod common;

use common::*;
use reveal_runtime::{
    Capability, Command, IntersectionSample, MemoryStore, PageConfig, PageInput, PortfolioPage,
    RevealStyle, StyleProperty, TriggerState, WatcherId,
};

fn harness() -> Harness<MemoryStore> {
    harness_with(Capability::Available)
}

fn harness_with(capability: Capability) -> Harness<MemoryStore> {
    let page = PortfolioPage::new(
        PageConfig::default(),
        portfolio_layout(),
        capability,
        MemoryStore::new(),
    );
    Harness::started(page, FakeDom::portfolio())
}

fn visible(watcher: WatcherId, element: reveal_runtime::ElementId, ratio: f64) -> PageInput {
    PageInput::visibility(watcher, IntersectionSample::new(element, ratio, ratio > 0.0))
}

#[test]
fn test_sections_hidden_before_observation() {
    let h = harness();

    for section in [HOME, ABOUT, STATS, CONTACT] {
        assert_eq!(h.dom.style(section, StyleProperty::Opacity), Some("0"));
        assert!(h.dom.observed.contains(&(WatcherId::Sections, section)));
    }

    // 每个区块先隐藏，再开始观察
    let hide = h
        .dom
        .applied
        .iter()
        .position(|c| matches!(c, Command::SetStyle { element, .. } if *element == ABOUT))
        .unwrap();
    let observe = h
        .dom
        .applied
        .iter()
        .position(|c| matches!(c, Command::Observe { element, .. } if *element == ABOUT))
        .unwrap();
    assert!(hide < observe);
}

#[test]
fn test_section_reveals_once() {
    let mut h = harness();

    // 低于阈值不触发
    let out = h.send(visible(WatcherId::Sections, ABOUT, 0.05));
    assert!(out.is_empty());
    assert_eq!(h.dom.style(ABOUT, StyleProperty::Animation), None);

    h.send(visible(WatcherId::Sections, ABOUT, 0.3));
    assert_eq!(
        h.dom.style(ABOUT, StyleProperty::Animation),
        Some("fadeIn 0.6s ease forwards")
    );
    assert!(!h.dom.observed.contains(&(WatcherId::Sections, ABOUT)));
    assert_eq!(
        h.page.reveal().tracked(ABOUT).map(|e| e.state()),
        Some(TriggerState::Triggered)
    );

    // 再次进入视口不会重复动画
    let out = h.send(visible(WatcherId::Sections, ABOUT, 1.0));
    assert!(out.is_empty());

    // 其他区块不受影响
    assert!(h.dom.observed.contains(&(WatcherId::Sections, HOME)));
    assert_eq!(
        h.page.reveal().tracked(HOME).map(|e| e.state()),
        Some(TriggerState::Pending)
    );
}

#[test]
fn test_reveal_frame_endpoints() {
    let mut h = harness();
    let style = RevealStyle::fade_in();

    // 宿主播放的是注入的关键帧与 animation 属性，采样需与之一致
    h.send(visible(WatcherId::Sections, ABOUT, 0.5));
    assert_eq!(
        h.dom.style(ABOUT, StyleProperty::Animation),
        Some(style.css_animation().as_str())
    );
    assert!(h.dom.stylesheets[0].contains(&style.keyframes.css_rule()));

    let start = style.frame_at(0.0);
    assert_eq!(start.opacity, 0.0);
    assert_eq!(start.offset_px, 20.0);

    let end = style.frame_at(style.duration);
    assert_eq!(end.opacity, 1.0);
    assert_eq!(end.offset_px, 0.0);

    // forwards：结束后停在最后一帧
    assert_eq!(style.frame_at(style.duration * 10.0), end);
}

#[test]
fn test_counter_500_students() {
    let mut h = harness();

    h.send(visible(WatcherId::Counters, STUDENTS_FACT, 0.6));
    assert!(h.dom.has_class(STUDENTS_H3, "counted"));
    assert_eq!(h.dom.attribute(STUDENTS_H3, "data-target"), Some("500"));
    assert_eq!(h.dom.intervals.len(), 1);

    let ticks = h.run_intervals();
    assert_eq!(ticks, 50);

    let renders = h.dom.renders_of(STUDENTS_H3);
    assert_eq!(renders.len(), 50);
    assert_eq!(renders.first().map(String::as_str), Some("10+"));
    assert_eq!(renders[1], "20+");
    assert_eq!(renders[48], "490+");
    assert_eq!(h.dom.text(STUDENTS_H3), Some("500+"));

    // 定时器已永久停止
    assert!(h.dom.intervals.is_empty());
    assert_eq!(h.page.timers().live_count(), 0);
    assert_eq!(h.page.reveal().counter().running_count(), 0);
}

#[test]
fn test_counter_renders_are_monotonic() {
    let mut h = harness();
    h.dom.texts.insert(STUDENTS_H3, "37".to_string());

    h.send(visible(WatcherId::Counters, STUDENTS_FACT, 0.9));
    h.run_intervals();

    let values: Vec<u64> = h
        .dom
        .renders_of(STUDENTS_H3)
        .iter()
        .map(|t| t.trim_end_matches('+').parse().unwrap())
        .collect();
    assert!(values.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(values.last(), Some(&37));
}

#[test]
fn test_counter_zero_target_starts_no_timer() {
    let mut h = harness();

    h.send(visible(WatcherId::Counters, ZERO_FACT, 0.6));
    assert!(h.dom.has_class(ZERO_H3, "counted"));
    assert!(h.dom.intervals.is_empty());
    assert_eq!(h.dom.text(ZERO_H3), Some("0"));
    assert!(h.dom.renders_of(ZERO_H3).is_empty());
}

#[test]
fn test_counter_without_digits_left_untouched() {
    let mut h = harness();

    h.send(visible(WatcherId::Counters, WORDS_FACT, 0.6));
    assert!(!h.dom.has_class(WORDS_H3, "counted"));
    assert_eq!(h.dom.attribute(WORDS_H3, "data-target"), None);
    assert!(h.dom.intervals.is_empty());
    assert_eq!(h.dom.text(WORDS_H3), Some("Many"));
}

#[test]
fn test_counter_starts_once() {
    let mut h = harness();

    h.send(visible(WatcherId::Counters, STUDENTS_FACT, 0.6));
    h.send(visible(WatcherId::Counters, STUDENTS_FACT, 0.8));
    h.send(visible(WatcherId::Counters, STUDENTS_FACT, 1.0));

    let starts = h
        .dom
        .applied
        .iter()
        .filter(|c| matches!(c, Command::StartInterval { .. }))
        .count();
    assert_eq!(starts, 1);
}

#[test]
fn test_counter_below_threshold_waits() {
    let mut h = harness();

    h.send(visible(WatcherId::Counters, STUDENTS_FACT, 0.4));
    assert!(!h.dom.has_class(STUDENTS_H3, "counted"));
    assert!(h.dom.observed.contains(&(WatcherId::Counters, STUDENTS_FACT)));
}

#[test]
fn test_lazy_image_loaded_on_first_visibility() {
    let mut h = harness();
    assert!(h.dom.observed.contains(&(WatcherId::LazyImages, PORTRAIT)));
    assert_eq!(h.dom.attribute(PORTRAIT, "src"), None);

    h.send(visible(WatcherId::LazyImages, PORTRAIT, 0.01));
    assert_eq!(h.dom.attribute(PORTRAIT, "src"), Some("images/portrait.jpg"));
    assert!(!h.dom.observed.contains(&(WatcherId::LazyImages, PORTRAIT)));
    assert_eq!(h.page.lazy_images().pending_count(), 0);
}

#[test]
fn test_without_intersection_observer_content_stays_visible() {
    let mut h = harness_with(Capability::Unavailable);

    assert!(h.dom.observed.is_empty());
    for section in [HOME, ABOUT, STATS, CONTACT] {
        assert_eq!(h.dom.style(section, StyleProperty::Opacity), None);
    }

    // 即使收到记录也不做任何事
    let out = h.send(visible(WatcherId::Sections, ABOUT, 1.0));
    assert!(out.is_empty());
    let out = h.send(visible(WatcherId::LazyImages, PORTRAIT, 1.0));
    assert!(out.is_empty());
}
