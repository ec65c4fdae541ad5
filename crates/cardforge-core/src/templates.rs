//! Built-in card background templates.
//!
//! Each template names a background asset and carries the default layout
//! copied into new cards.

use crate::types::{CardLayout, Placement};

/// One background template
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardTemplate {
    pub id: &'static str,
    pub label: &'static str,
    /// Public asset path of the background art
    pub background: &'static str,
    /// Default accent colour for new cards
    pub accent: &'static str,
    pub layout: CardLayout,
}

const BASE_LAYOUT: CardLayout = CardLayout {
    title: Placement::new(4.0, 18.0, 64.0).with_font(2.6),
    description: Placement::new(62.0, 10.0, 80.0).with_height(22.0).with_font(1.4),
    icon: Placement::new(2.5, 4.0, 13.0).with_height(9.3),
    secondary_icon: Placement::new(2.5, 83.0, 13.0).with_height(9.3),
    skills: Placement::new(86.0, 10.0, 70.0).with_height(5.0),
    number: Placement::new(91.0, 80.0, 14.0).with_font(2.0),
    art: Placement::new(12.0, 8.0, 84.0).with_height(46.0),
};

pub const TEMPLATES: &[CardTemplate] = &[
    CardTemplate {
        id: "fire",
        label: "Fire",
        background: "/models/cards/fire.png",
        accent: "#e25822",
        layout: BASE_LAYOUT,
    },
    CardTemplate {
        id: "water",
        label: "Water",
        background: "/models/cards/water.png",
        accent: "#1f7ae0",
        layout: CardLayout {
            title: Placement::new(56.0, 10.0, 80.0).with_font(2.4),
            description: Placement::new(64.0, 10.0, 80.0).with_height(20.0).with_font(1.3),
            art: Placement::new(6.0, 6.0, 88.0).with_height(48.0),
            ..BASE_LAYOUT
        },
    },
    CardTemplate {
        id: "earth",
        label: "Earth",
        background: "/models/cards/earth.png",
        accent: "#7a5a2f",
        layout: CardLayout {
            skills: Placement::new(84.0, 6.0, 60.0).with_height(6.0),
            number: Placement::new(90.0, 74.0, 20.0).with_font(2.4),
            ..BASE_LAYOUT
        },
    },
    CardTemplate {
        id: "air",
        label: "Air",
        background: "/models/cards/air.png",
        accent: "#8fd3e8",
        layout: CardLayout {
            title: Placement::new(5.0, 10.0, 80.0).with_font(2.2),
            icon: Placement::new(88.0, 4.0, 10.0).with_height(7.0),
            ..BASE_LAYOUT
        },
    },
    CardTemplate {
        id: "shadow",
        label: "Shadow",
        background: "/models/cards/shadow.png",
        accent: "#6b3fa0",
        layout: CardLayout {
            art: Placement::new(0.0, 0.0, 100.0).with_height(60.0),
            description: Placement::new(66.0, 8.0, 84.0).with_height(18.0).with_font(1.3),
            ..BASE_LAYOUT
        },
    },
];

/// Look up a template by id.
pub fn find(id: &str) -> Option<&'static CardTemplate> {
    TEMPLATES.iter().find(|t| t.id == id)
}

pub fn default_template() -> &'static CardTemplate {
    &TEMPLATES[0]
}

/// Template for `id`, or the default one when the id is unknown.
pub fn find_or_default(id: &str) -> &'static CardTemplate {
    find(id).unwrap_or_else(default_template)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let mut ids: Vec<_> = TEMPLATES.iter().map(|t| t.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), TEMPLATES.len());
    }

    #[test]
    fn test_find_or_default() {
        assert_eq!(find_or_default("air").id, "air");
        assert_eq!(find_or_default("").id, "fire");
        assert_eq!(find_or_default("nope").id, "fire");
    }

    #[test]
    fn test_backgrounds_live_under_models() {
        for t in TEMPLATES {
            assert!(t.background.starts_with("/models/cards/"), "{}", t.id);
        }
    }
}
