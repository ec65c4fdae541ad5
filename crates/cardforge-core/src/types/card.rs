//! Card Design - one user-authored card
//!
//! A card binds exactly one background template and carries its own copy of
//! the template's layout, so positions can be tweaked per card without
//! touching the template. The overlay artwork is NOT part of the record; it
//! lives in the overlay partition keyed by the card id.

use serde::{Deserialize, Serialize};

use super::CardId;
use crate::templates::{self, CardTemplate};

fn default_font_size() -> f32 {
    1.0
}

/// Position of one element on the card, in percent of the card box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub top: f32,
    pub left: f32,
    pub width: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
    /// Font size in units (1 unit = 16px on the 750x1050 canvas)
    #[serde(default = "default_font_size")]
    pub font_size: f32,
}

impl Placement {
    pub const fn new(top: f32, left: f32, width: f32) -> Self {
        Self {
            top,
            left,
            width,
            height: None,
            font_size: 1.0,
        }
    }

    pub const fn with_height(mut self, height: f32) -> Self {
        self.height = Some(height);
        self
    }

    pub const fn with_font(mut self, font_size: f32) -> Self {
        self.font_size = font_size;
        self
    }
}

/// Fully populated layout: one placement per card element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CardLayout {
    pub title: Placement,
    pub description: Placement,
    pub icon: Placement,
    pub secondary_icon: Placement,
    pub skills: Placement,
    pub number: Placement,
    pub art: Placement,
}

/// Layout as found in stored or imported records; any element may be missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartialCardLayout {
    pub title: Option<Placement>,
    pub description: Option<Placement>,
    pub icon: Option<Placement>,
    pub secondary_icon: Option<Placement>,
    pub skills: Option<Placement>,
    pub number: Option<Placement>,
    pub art: Option<Placement>,
}

impl PartialCardLayout {
    /// Fill every missing element from `defaults`.
    pub fn resolve(self, defaults: &CardLayout) -> CardLayout {
        CardLayout {
            title: self.title.unwrap_or(defaults.title),
            description: self.description.unwrap_or(defaults.description),
            icon: self.icon.unwrap_or(defaults.icon),
            secondary_icon: self.secondary_icon.unwrap_or(defaults.secondary_icon),
            skills: self.skills.unwrap_or(defaults.skills),
            number: self.number.unwrap_or(defaults.number),
            art: self.art.unwrap_or(defaults.art),
        }
    }
}

impl From<CardLayout> for PartialCardLayout {
    fn from(layout: CardLayout) -> Self {
        Self {
            title: Some(layout.title),
            description: Some(layout.description),
            icon: Some(layout.icon),
            secondary_icon: Some(layout.secondary_icon),
            skills: Some(layout.skills),
            number: Some(layout.number),
            art: Some(layout.art),
        }
    }
}

/// Optional second icon, picked from the icon catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecondaryIcon {
    pub src: String,
    pub catalog_id: String,
}

/// A saved or in-progress card design
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardDesign {
    pub id: CardId,
    pub title: String,
    pub description: String,
    /// Background template id (see [`crate::templates`])
    pub template: String,
    /// Primary icon `src`
    pub icon: String,
    pub secondary_icon: Option<SecondaryIcon>,
    pub accent_color: String,
    pub skills: Vec<String>,
    pub number_label: String,
    pub layout: CardLayout,
    pub created_at: i64,
    pub updated_at: i64,
}

impl CardDesign {
    /// Blank card bound to `template`, with the template's layout copied in.
    pub fn new(template: &CardTemplate) -> Self {
        let now = chrono::Utc::now().timestamp();
        Self {
            id: CardId::new(),
            title: String::new(),
            description: String::new(),
            template: template.id.to_string(),
            icon: String::new(),
            secondary_icon: None,
            accent_color: template.accent.to_string(),
            skills: Vec::new(),
            number_label: String::new(),
            layout: template.layout,
            created_at: now,
            updated_at: now,
        }
    }

    /// Rebind to another template, re-copying its layout.
    pub fn apply_template(&mut self, template: &CardTemplate) {
        self.template = template.id.to_string();
        self.layout = template.layout;
    }

    /// The template this card is bound to.
    pub fn bound_template(&self) -> &'static CardTemplate {
        templates::find_or_default(&self.template)
    }

    pub fn touch(&mut self) {
        self.updated_at = chrono::Utc::now().timestamp();
    }

    /// Copy of this card under a freshly generated id.
    pub fn with_fresh_id(mut self) -> Self {
        self.id = CardId::new();
        let now = chrono::Utc::now().timestamp();
        self.created_at = now;
        self.updated_at = now;
        self
    }

    /// Slug used for exported file names.
    pub fn file_stem(&self) -> String {
        let slug: String = self
            .title
            .trim()
            .chars()
            .map(|c| {
                if c.is_alphanumeric() {
                    c.to_ascii_lowercase()
                } else {
                    '-'
                }
            })
            .collect();
        let slug = slug
            .split('-')
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join("-");
        if slug.is_empty() {
            format!("card-{}", self.id)
        } else {
            slug
        }
    }
}

/// Card record as read back from storage.
///
/// Older records may lack fields or carry a partial layout; [`StoredCard::resolve`]
/// turns them into a fully populated [`CardDesign`].
#[derive(Debug, Clone, Deserialize)]
pub struct StoredCard {
    pub id: CardId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub template: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub secondary_icon: Option<SecondaryIcon>,
    #[serde(default)]
    pub accent_color: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub number_label: String,
    #[serde(default)]
    pub layout: PartialCardLayout,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

impl StoredCard {
    pub fn resolve(self) -> CardDesign {
        let template = templates::find_or_default(&self.template);
        CardDesign {
            id: self.id,
            title: self.title,
            description: self.description,
            template: template.id.to_string(),
            icon: self.icon,
            secondary_icon: self.secondary_icon,
            accent_color: self
                .accent_color
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| template.accent.to_string()),
            skills: self.skills,
            number_label: self.number_label,
            layout: self.layout.resolve(&template.layout),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_card_copies_template_layout() {
        let template = templates::find("water").unwrap();
        let card = CardDesign::new(template);
        assert_eq!(card.template, "water");
        assert_eq!(card.layout, template.layout);
        assert_eq!(card.accent_color, template.accent);
    }

    #[test]
    fn test_layout_is_independent_of_template() {
        let template = templates::default_template();
        let mut card = CardDesign::new(template);
        card.layout.title.top = 50.0;
        assert_ne!(card.layout.title.top, template.layout.title.top);
    }

    #[test]
    fn test_apply_template_recopies_layout() {
        let mut card = CardDesign::new(templates::default_template());
        card.layout.title.top = 99.0;
        let air = templates::find("air").unwrap();
        card.apply_template(air);
        assert_eq!(card.template, "air");
        assert_eq!(card.layout, air.layout);
    }

    #[test]
    fn test_partial_layout_falls_back_to_template() {
        let template = templates::find("earth").unwrap();
        let json = r#"{
            "id": "01HZX3Q4W9T8N6M5K2J1H0G9F8",
            "title": "Golem",
            "template": "earth",
            "layout": { "title": { "top": 1.0, "left": 2.0, "width": 3.0 } }
        }"#;
        let stored: StoredCard = serde_json::from_str(json).unwrap();
        let card = stored.resolve();
        assert_eq!(card.layout.title, Placement::new(1.0, 2.0, 3.0));
        assert_eq!(card.layout.description, template.layout.description);
        assert_eq!(card.layout.art, template.layout.art);
        assert_eq!(card.accent_color, template.accent);
    }

    #[test]
    fn test_unknown_template_binds_default() {
        let json = r#"{ "id": "01HZX3Q4W9T8N6M5K2J1H0G9F8", "template": "lava" }"#;
        let card = serde_json::from_str::<StoredCard>(json).unwrap().resolve();
        assert_eq!(card.template, templates::default_template().id);
        assert_eq!(card.layout, templates::default_template().layout);
    }

    #[test]
    fn test_full_card_survives_storage_shape() {
        let mut card = CardDesign::new(templates::default_template());
        card.title = "Ember".to_string();
        card.skills = vec!["burn".to_string()];
        card.secondary_icon = Some(SecondaryIcon {
            src: "/models/icons/elements/fire.png".to_string(),
            catalog_id: "fire".to_string(),
        });
        let json = serde_json::to_string(&card).unwrap();
        let back = serde_json::from_str::<StoredCard>(&json).unwrap().resolve();
        assert_eq!(back, card);
    }

    #[test]
    fn test_file_stem() {
        let mut card = CardDesign::new(templates::default_template());
        card.title = "  Fire Bolt!! ".to_string();
        assert_eq!(card.file_stem(), "fire-bolt");
        card.title = String::new();
        assert!(card.file_stem().starts_with("card-"));
    }
}
