//! 测试用的假宿主
//!
//! 在内存中模拟 DOM、观察器与定时器，把 Runtime 发出的指令应用到这里，
//! 测试再从这里读取页面状态。

#![allow(dead_code)]

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use reveal_runtime::{
    AnchorNode, Command, CounterNode, ElementId, KeyValueStore, LazyImageNode, LogLevel,
    NavLinkNode, NavNodes, NotificationId, PageInput, PageLayout, PageQuery, PortfolioPage,
    ProjectCardNode, SectionNode, StyleProperty, TimerId, WatcherId,
};

pub const BODY: ElementId = ElementId(0);
pub const HOME: ElementId = ElementId(1);
pub const ABOUT: ElementId = ElementId(2);
pub const STATS: ElementId = ElementId(3);
pub const CONTACT: ElementId = ElementId(4);

pub const STUDENTS_FACT: ElementId = ElementId(10);
pub const STUDENTS_H3: ElementId = ElementId(11);
pub const ZERO_FACT: ElementId = ElementId(12);
pub const ZERO_H3: ElementId = ElementId(13);
pub const WORDS_FACT: ElementId = ElementId(14);
pub const WORDS_H3: ElementId = ElementId(15);

pub const PORTRAIT: ElementId = ElementId(20);
pub const HAMBURGER: ElementId = ElementId(30);
pub const MENU: ElementId = ElementId(31);
pub const LINK_HOME: ElementId = ElementId(32);
pub const LINK_ABOUT: ElementId = ElementId(33);
pub const LINK_STATS: ElementId = ElementId(34);
pub const LINK_CONTACT: ElementId = ElementId(35);
pub const BARE_ANCHOR: ElementId = ElementId(36);
pub const CONTACT_FORM: ElementId = ElementId(40);
pub const HERO: ElementId = ElementId(41);
pub const SKILL_CARD: ElementId = ElementId(50);
pub const PROJECT_CARD: ElementId = ElementId(51);
pub const PROJECT_IMAGE: ElementId = ElementId(52);

/// 标准作品集页面布局
pub fn portfolio_layout() -> PageLayout {
    let section = |element, id: &str| SectionNode {
        element,
        id: Some(id.to_string()),
    };
    let nav_link = |element, href: &str| NavLinkNode {
        element,
        href: Some(href.to_string()),
    };
    let anchor = |element, href: &str| AnchorNode {
        element,
        href: href.to_string(),
    };

    PageLayout {
        body: BODY,
        sections: vec![
            section(HOME, "home"),
            section(ABOUT, "about"),
            section(STATS, "stats"),
            section(CONTACT, "contact"),
        ],
        counters: vec![
            CounterNode {
                fact: STUDENTS_FACT,
                display: Some(STUDENTS_H3),
            },
            CounterNode {
                fact: ZERO_FACT,
                display: Some(ZERO_H3),
            },
            CounterNode {
                fact: WORDS_FACT,
                display: Some(WORDS_H3),
            },
        ],
        lazy_images: vec![LazyImageNode {
            element: PORTRAIT,
            data_src: Some("images/portrait.jpg".to_string()),
        }],
        nav: Some(NavNodes {
            hamburger: HAMBURGER,
            menu: MENU,
        }),
        nav_links: vec![
            nav_link(LINK_HOME, "#home"),
            nav_link(LINK_ABOUT, "#about"),
            nav_link(LINK_STATS, "#stats"),
            nav_link(LINK_CONTACT, "#contact"),
        ],
        anchors: vec![
            anchor(LINK_HOME, "#home"),
            anchor(LINK_ABOUT, "#about"),
            anchor(LINK_STATS, "#stats"),
            anchor(LINK_CONTACT, "#contact"),
            anchor(BARE_ANCHOR, "#"),
        ],
        contact_form: Some(CONTACT_FORM),
        hero: Some(HERO),
        skill_cards: vec![SKILL_CARD],
        project_cards: vec![ProjectCardNode {
            card: PROJECT_CARD,
            image: Some(PROJECT_IMAGE),
        }],
    }
}

/// 内存中的页面
#[derive(Debug, Default)]
pub struct FakeDom {
    pub texts: HashMap<ElementId, String>,
    pub offsets: HashMap<ElementId, f64>,
    pub classes: HashMap<ElementId, HashSet<String>>,
    pub styles: HashMap<(ElementId, StyleProperty), String>,
    pub attributes: HashMap<(ElementId, String), String>,
    pub observed: HashSet<(WatcherId, ElementId)>,
    pub intervals: BTreeSet<TimerId>,
    pub timeouts: BTreeSet<TimerId>,
    pub alerts: Vec<String>,
    pub notifications: BTreeMap<NotificationId, String>,
    pub resets: Vec<ElementId>,
    pub stylesheets: Vec<String>,
    pub scrolled_to: Vec<String>,
    pub logs: Vec<(LogLevel, String)>,
    /// 每次 `SetText` 写入的文本，按顺序
    pub text_history: Vec<(ElementId, String)>,
    /// 应用过的全部指令
    pub applied: Vec<Command>,
}

impl FakeDom {
    /// 与 [`portfolio_layout`] 对应的页面内容
    pub fn portfolio() -> Self {
        let mut dom = Self::default();
        dom.texts.insert(STUDENTS_H3, "500+ Students".to_string());
        dom.texts.insert(ZERO_H3, "0".to_string());
        dom.texts.insert(WORDS_H3, "Many".to_string());
        dom.offsets.insert(HOME, 0.0);
        dom.offsets.insert(ABOUT, 800.0);
        dom.offsets.insert(STATS, 1600.0);
        dom.offsets.insert(CONTACT, 2400.0);
        dom
    }

    pub fn apply(&mut self, commands: Vec<Command>) {
        for command in commands {
            self.apply_one(&command);
            self.applied.push(command);
        }
    }

    fn apply_one(&mut self, command: &Command) {
        match command {
            Command::SetStyle {
                element,
                property,
                value,
            } => {
                self.styles.insert((*element, *property), value.clone());
            }
            Command::SetClass {
                element,
                class,
                enabled,
            } => {
                let classes = self.classes.entry(*element).or_default();
                if *enabled {
                    classes.insert(class.clone());
                } else {
                    classes.remove(class);
                }
            }
            Command::SetText { element, text } => {
                self.texts.insert(*element, text.clone());
                self.text_history.push((*element, text.clone()));
            }
            Command::SetAttribute {
                element,
                name,
                value,
            } => {
                self.attributes
                    .insert((*element, name.clone()), value.clone());
            }
            Command::Observe {
                watcher, element, ..
            } => {
                self.observed.insert((*watcher, *element));
            }
            Command::Unobserve { watcher, element } => {
                self.observed.remove(&(*watcher, *element));
            }
            Command::StartInterval { timer, .. } => {
                self.intervals.insert(*timer);
            }
            Command::StartTimeout { timer, .. } => {
                self.timeouts.insert(*timer);
            }
            Command::CancelTimer { timer } => {
                self.intervals.remove(timer);
                self.timeouts.remove(timer);
            }
            Command::ScrollIntoView { target_id } => {
                self.scrolled_to.push(target_id.clone());
            }
            Command::Alert { message } => self.alerts.push(message.clone()),
            Command::ShowNotification { id, message, .. } => {
                self.notifications.insert(*id, message.clone());
            }
            Command::RemoveNotification { id } => {
                self.notifications.remove(id);
            }
            Command::ResetForm { element } => self.resets.push(*element),
            Command::InjectStylesheet { css } => self.stylesheets.push(css.clone()),
            Command::Log { level, message } => self.logs.push((*level, message.clone())),
        }
    }

    pub fn has_class(&self, element: ElementId, class: &str) -> bool {
        self.classes
            .get(&element)
            .is_some_and(|classes| classes.contains(class))
    }

    pub fn style(&self, element: ElementId, property: StyleProperty) -> Option<&str> {
        self.styles.get(&(element, property)).map(String::as_str)
    }

    pub fn attribute(&self, element: ElementId, name: &str) -> Option<&str> {
        self.attributes
            .get(&(element, name.to_string()))
            .map(String::as_str)
    }

    pub fn text(&self, element: ElementId) -> Option<&str> {
        self.texts.get(&element).map(String::as_str)
    }

    /// 某个元素经历过的全部 `SetText`
    pub fn renders_of(&self, element: ElementId) -> Vec<String> {
        self.text_history
            .iter()
            .filter(|(e, _)| *e == element)
            .map(|(_, text)| text.clone())
            .collect()
    }
}

impl PageQuery for FakeDom {
    fn text_content(&self, element: ElementId) -> Option<String> {
        self.texts.get(&element).cloned()
    }

    fn offset_top(&self, element: ElementId) -> f64 {
        self.offsets.get(&element).copied().unwrap_or(0.0)
    }
}

/// 页面与假宿主
pub struct Harness<S: KeyValueStore> {
    pub page: PortfolioPage<S>,
    pub dom: FakeDom,
}

impl<S: KeyValueStore> Harness<S> {
    /// 创建并执行启动指令
    pub fn started(mut page: PortfolioPage<S>, mut dom: FakeDom) -> Self {
        dom.apply(page.start());
        Self { page, dom }
    }

    /// 发送一条输入并应用结果，返回这次产生的指令
    pub fn send(&mut self, input: PageInput) -> Vec<Command> {
        let commands = self.page.handle(input, &self.dom);
        self.dom.apply(commands.clone());
        commands
    }

    /// 推进所有周期定时器直到全部停止，返回触发次数
    pub fn run_intervals(&mut self) -> usize {
        let mut fired = 0;
        loop {
            let Some(timer) = self.dom.intervals.first().copied() else {
                break;
            };
            self.send(PageInput::timer(timer));
            fired += 1;
            assert!(fired < 10_000, "周期定时器没有停止");
        }
        fired
    }

    /// 触发所有一次性定时器
    pub fn fire_timeouts(&mut self) {
        let pending: Vec<TimerId> = std::mem::take(&mut self.dom.timeouts)
            .into_iter()
            .collect();
        for timer in pending {
            self.send(PageInput::timer(timer));
        }
    }
}
