//! # Nav 模块
//!
//! 移动端导航菜单的展开/收起。

use crate::command::Command;
use crate::layout::NavNodes;

/// 菜单展开时汉堡按钮与菜单容器上的 class
pub const ACTIVE_CLASS: &str = "active";

/// 导航菜单开关
#[derive(Debug, Clone, Default)]
pub struct NavToggle {
    nodes: Option<NavNodes>,
    open: bool,
}

impl NavToggle {
    pub fn new(nodes: Option<NavNodes>) -> Self {
        Self { nodes, open: false }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// 点击汉堡按钮：切换展开状态
    pub fn toggle(&mut self, out: &mut Vec<Command>) {
        let open = !self.open;
        self.set_open(open, out);
    }

    /// 点击任意导航链接：收起菜单
    pub fn close(&mut self, out: &mut Vec<Command>) {
        self.set_open(false, out);
    }

    fn set_open(&mut self, open: bool, out: &mut Vec<Command>) {
        let Some(nodes) = self.nodes else {
            return;
        };
        self.open = open;
        out.push(Command::class(nodes.hamburger, ACTIVE_CLASS, open));
        out.push(Command::class(nodes.menu, ACTIVE_CLASS, open));
    }
}
