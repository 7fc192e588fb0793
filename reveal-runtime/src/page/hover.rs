//! # Hover 模块
//!
//! 技能卡片与项目卡片的悬停微交互。

use std::collections::{HashMap, HashSet};

use crate::command::{Command, StyleProperty};
use crate::element::ElementId;
use crate::layout::ProjectCardNode;

const SKILL_RAISED: &str = "translateY(-5px) scale(1.02)";
const SKILL_RESTING: &str = "translateY(0) scale(1)";
const IMAGE_ZOOMED: &str = "scale(1.15)";
const IMAGE_RESTING: &str = "scale(1)";

/// 悬停效果
#[derive(Debug, Clone, Default)]
pub struct HoverEffects {
    skill_cards: HashSet<ElementId>,
    /// 项目卡片 → 卡片内图片（可能缺失）
    project_cards: HashMap<ElementId, Option<ElementId>>,
}

impl HoverEffects {
    pub fn new(skill_cards: &[ElementId], project_cards: &[ProjectCardNode]) -> Self {
        Self {
            skill_cards: skill_cards.iter().copied().collect(),
            project_cards: project_cards.iter().map(|p| (p.card, p.image)).collect(),
        }
    }

    /// 指针进入
    pub fn on_enter(&self, element: ElementId, out: &mut Vec<Command>) {
        self.apply(element, true, out);
    }

    /// 指针离开
    pub fn on_leave(&self, element: ElementId, out: &mut Vec<Command>) {
        self.apply(element, false, out);
    }

    fn apply(&self, element: ElementId, hovered: bool, out: &mut Vec<Command>) {
        if self.skill_cards.contains(&element) {
            let value = if hovered { SKILL_RAISED } else { SKILL_RESTING };
            out.push(Command::style(element, StyleProperty::Transform, value));
        }

        if let Some(Some(image)) = self.project_cards.get(&element) {
            let value = if hovered { IMAGE_ZOOMED } else { IMAGE_RESTING };
            out.push(Command::style(*image, StyleProperty::Transform, value));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn effects() -> HoverEffects {
        HoverEffects::new(
            &[ElementId(1)],
            &[
                ProjectCardNode {
                    card: ElementId(2),
                    image: Some(ElementId(3)),
                },
                ProjectCardNode {
                    card: ElementId(4),
                    image: None,
                },
            ],
        )
    }

    #[test]
    fn test_skill_card() {
        let mut out = Vec::new();
        effects().on_enter(ElementId(1), &mut out);
        effects().on_leave(ElementId(1), &mut out);
        assert_eq!(
            out,
            vec![
                Command::style(
                    ElementId(1),
                    StyleProperty::Transform,
                    "translateY(-5px) scale(1.02)"
                ),
                Command::style(ElementId(1), StyleProperty::Transform, "translateY(0) scale(1)"),
            ]
        );
    }

    #[test]
    fn test_project_card_scales_image() {
        let mut out = Vec::new();
        effects().on_enter(ElementId(2), &mut out);
        assert_eq!(
            out,
            vec![Command::style(ElementId(3), StyleProperty::Transform, "scale(1.15)")]
        );
    }

    #[test]
    fn test_project_card_without_image() {
        let mut out = Vec::new();
        effects().on_enter(ElementId(4), &mut out);
        effects().on_enter(ElementId(99), &mut out);
        assert!(out.is_empty());
    }
}
