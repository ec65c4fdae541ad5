//! Layout composition - cards and tutorial pages as SVG documents.
//!
//! Composition is a pure function of editor state. The desktop preview embeds
//! the SVG directly and export rasterizes the very same document, so what the
//! user sees is what gets exported.
//!
//! Positions are percentages of the canvas. Font sizes are in units of
//! [`CARD_UNIT_PX`] / [`PAGE_UNIT_PX`]. Text width is estimated from character
//! counts; wrapping is approximate by nature.

use std::collections::HashMap;

use simple_xml_builder::XMLElement;

use crate::inline::{self, Inline};
use crate::templates::CardTemplate;
use crate::types::{CardDesign, Placement, TextAlign, TextBlock, TutorialPage};

pub const CARD_WIDTH: f32 = 750.0;
pub const CARD_HEIGHT: f32 = 1050.0;
pub const CARD_UNIT_PX: f32 = 16.0;

pub const PAGE_WIDTH: f32 = 1920.0;
pub const PAGE_HEIGHT: f32 = 1080.0;
pub const PAGE_UNIT_PX: f32 = 24.0;

const CHAR_ADVANCE: f32 = 0.55;
const BOLD_ADVANCE: f32 = 0.6;
const SPACE_ADVANCE: f32 = 0.3;
const ICON_SCALE: f32 = 1.1;
const DEFAULT_LINE_HEIGHT: f32 = 1.3;
const FONT_FAMILY: &str = "sans-serif";
const SHADOW_FILTER_ID: &str = "text-shadow";

/// How `src` values become `href`s
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hrefs {
    /// Public paths as served to the webview (`/models/...`)
    Preview,
    /// Paths relative to the assets directory, for the rasterizer
    Raster,
}

impl Hrefs {
    pub fn resolve(&self, src: &str) -> String {
        match self {
            Hrefs::Preview => src.to_string(),
            Hrefs::Raster if src.starts_with("data:") => src.to_string(),
            Hrefs::Raster => src.trim_start_matches('/').to_string(),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Cards
// ═══════════════════════════════════════════════════════════════════════════

/// Compose a card into an SVG document.
///
/// `icons` maps inline icon ids to their `src`, for `[id]` tokens in the
/// description.
pub fn compose_card_svg(
    card: &CardDesign,
    overlay: Option<&str>,
    template: &CardTemplate,
    icons: &HashMap<String, String>,
    hrefs: Hrefs,
) -> String {
    let canvas = Canvas {
        width: CARD_WIDTH,
        height: CARD_HEIGHT,
        unit: CARD_UNIT_PX,
    };
    let layout = &card.layout;
    let mut root = canvas.root();

    let mut base = XMLElement::new("rect");
    base.add_attribute("width", CARD_WIDTH);
    base.add_attribute("height", CARD_HEIGHT);
    base.add_attribute("fill", "#1b1b1f");
    root.add_child(base);

    root.add_child(full_bleed_image(
        &hrefs.resolve(template.background),
        CARD_WIDTH,
        CARD_HEIGHT,
    ));

    if let Some(art) = overlay.filter(|o| !o.is_empty()) {
        root.add_child(canvas.image_at(&hrefs.resolve(art), &layout.art, "xMidYMid slice"));
    }

    let mut frame = XMLElement::new("rect");
    frame.add_attribute("x", 6);
    frame.add_attribute("y", 6);
    frame.add_attribute("width", CARD_WIDTH - 12.0);
    frame.add_attribute("height", CARD_HEIGHT - 12.0);
    frame.add_attribute("rx", 28);
    frame.add_attribute("fill", "none");
    frame.add_attribute("stroke", &card.accent_color);
    frame.add_attribute("stroke-width", 12);
    root.add_child(frame);

    if !card.icon.is_empty() {
        root.add_child(canvas.image_at(&hrefs.resolve(&card.icon), &layout.icon, "xMidYMid meet"));
    }
    if let Some(secondary) = card.secondary_icon.as_ref().filter(|s| !s.src.is_empty()) {
        root.add_child(canvas.image_at(
            &hrefs.resolve(&secondary.src),
            &layout.secondary_icon,
            "xMidYMid meet",
        ));
    }

    if !card.title.trim().is_empty() {
        let style = TextStyle {
            font_px: layout.title.font_size * CARD_UNIT_PX,
            line_height: 1.1,
            fill: "#ffffff".to_string(),
            align: TextAlign::Center,
            bold: true,
            shadow: true,
        };
        let tokens = tokenize(&[Inline::Text(card.title.clone())]);
        canvas.text_box(&mut root, &tokens, &layout.title, &style, hrefs);
    }

    if !card.description.trim().is_empty() {
        let resolved: HashMap<String, String> = icons
            .iter()
            .map(|(id, src)| (id.clone(), hrefs.resolve(src)))
            .collect();
        let tokens = tokenize(&inline::parse(&card.description, &resolved));
        let style = TextStyle {
            font_px: layout.description.font_size * CARD_UNIT_PX,
            line_height: DEFAULT_LINE_HEIGHT,
            fill: "#f4f1ea".to_string(),
            align: TextAlign::Left,
            bold: false,
            shadow: true,
        };
        canvas.text_box(&mut root, &tokens, &layout.description, &style, hrefs);
    }

    compose_skills(&mut root, &canvas, &card.skills, &layout.skills, &card.accent_color);

    if !card.number_label.trim().is_empty() {
        let style = TextStyle {
            font_px: layout.number.font_size * CARD_UNIT_PX,
            line_height: 1.0,
            fill: "#ffffff".to_string(),
            align: TextAlign::Center,
            bold: true,
            shadow: true,
        };
        let tokens = tokenize(&[Inline::Text(card.number_label.clone())]);
        canvas.text_box(&mut root, &tokens, &layout.number, &style, hrefs);
    }

    root.to_string()
}

fn compose_skills(
    root: &mut XMLElement,
    canvas: &Canvas,
    skills: &[String],
    placement: &Placement,
    accent: &str,
) {
    let font_px = placement.font_size * CARD_UNIT_PX;
    let pill_height = font_px * 1.8;
    let max_x = canvas.x(placement.left + placement.width);
    let mut x = canvas.x(placement.left);
    let y = canvas.y(placement.top);

    for skill in skills.iter().filter(|s| !s.trim().is_empty()) {
        let pill_width = text_width(skill, font_px, true) + font_px * 1.5;
        if x + pill_width > max_x {
            tracing::debug!(skill = %skill, "Skill does not fit on the card, dropped");
            break;
        }

        let mut pill = XMLElement::new("rect");
        pill.add_attribute("x", x);
        pill.add_attribute("y", y);
        pill.add_attribute("width", pill_width);
        pill.add_attribute("height", pill_height);
        pill.add_attribute("rx", pill_height / 2.0);
        pill.add_attribute("fill", accent);
        pill.add_attribute("fill-opacity", 0.85);
        root.add_child(pill);

        let mut label = XMLElement::new("text");
        label.add_attribute("x", x + pill_width / 2.0);
        label.add_attribute("y", y + pill_height / 2.0 + font_px * 0.35);
        label.add_attribute("font-family", FONT_FAMILY);
        label.add_attribute("font-size", font_px);
        label.add_attribute("font-weight", "bold");
        label.add_attribute("text-anchor", "middle");
        label.add_attribute("fill", "#ffffff");
        label.add_text(skill);
        root.add_child(label);

        x += pill_width + font_px * 0.5;
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tutorial pages
// ═══════════════════════════════════════════════════════════════════════════

/// Compose one tutorial page. `index` is zero-based; the page number shows `index + 1`.
pub fn compose_page_svg(page: &TutorialPage, index: usize, hrefs: Hrefs) -> String {
    let canvas = Canvas {
        width: PAGE_WIDTH,
        height: PAGE_HEIGHT,
        unit: PAGE_UNIT_PX,
    };
    let mut root = canvas.root();

    let mut base = XMLElement::new("rect");
    base.add_attribute("width", PAGE_WIDTH);
    base.add_attribute("height", PAGE_HEIGHT);
    base.add_attribute("fill", "#202028");
    root.add_child(base);

    if let Some(background) = page.background() {
        root.add_child(full_bleed_image(
            &hrefs.resolve(background.as_src()),
            PAGE_WIDTH,
            PAGE_HEIGHT,
        ));
    }

    let no_icons = HashMap::new();
    for (blocks, bold) in [(&page.titles, true), (&page.descriptions, false)] {
        for block in blocks.iter().filter(|b| !b.text.trim().is_empty()) {
            let tokens = tokenize(&inline::parse(&block.text, &no_icons));
            let style = TextStyle::for_block(block, bold);
            canvas.text_box(&mut root, &tokens, &block_placement(block), &style, hrefs);
        }
    }

    let number = &page.page_number;
    if number.visible {
        let style = TextStyle {
            font_px: number.font_size * PAGE_UNIT_PX,
            line_height: 1.0,
            fill: "#ffffff".to_string(),
            align: number.align,
            bold: true,
            shadow: true,
        };
        let tokens = tokenize(&[Inline::Text((index + 1).to_string())]);
        let placement = Placement::new(number.top, number.left, 0.0).with_font(number.font_size);
        canvas.text_box(&mut root, &tokens, &placement, &style, hrefs);
    }

    root.to_string()
}

fn block_placement(block: &TextBlock) -> Placement {
    Placement {
        top: block.top,
        left: block.left,
        width: block.width.unwrap_or(0.0),
        height: None,
        font_size: block.font_size,
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Text layout
// ═══════════════════════════════════════════════════════════════════════════

struct TextStyle {
    font_px: f32,
    line_height: f32,
    fill: String,
    align: TextAlign,
    bold: bool,
    shadow: bool,
}

impl TextStyle {
    fn for_block(block: &TextBlock, bold: bool) -> Self {
        Self {
            font_px: block.font_size * PAGE_UNIT_PX,
            line_height: block.line_height.unwrap_or(DEFAULT_LINE_HEIGHT),
            fill: block
                .color
                .clone()
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| "#ffffff".to_string()),
            align: block.align,
            bold,
            shadow: block.shadow,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Word { text: String, bold: bool },
    Icon { src: String },
    Break,
}

fn tokenize(segments: &[Inline]) -> Vec<Token> {
    let mut tokens = Vec::new();
    for segment in segments {
        match segment {
            Inline::Text(text) | Inline::Bold(text) => {
                let bold = matches!(segment, Inline::Bold(_));
                for (i, line) in text.split('\n').enumerate() {
                    if i > 0 {
                        tokens.push(Token::Break);
                    }
                    tokens.extend(line.split_whitespace().map(|word| Token::Word {
                        text: word.to_string(),
                        bold,
                    }));
                }
            }
            Inline::Icon { src, .. } => tokens.push(Token::Icon { src: src.clone() }),
        }
    }
    tokens
}

fn text_width(text: &str, font_px: f32, bold: bool) -> f32 {
    let advance = if bold { BOLD_ADVANCE } else { CHAR_ADVANCE };
    text.chars().count() as f32 * font_px * advance
}

fn token_width(token: &Token, font_px: f32, style_bold: bool) -> f32 {
    match token {
        Token::Word { text, bold } => text_width(text, font_px, *bold || style_bold),
        Token::Icon { .. } => font_px * ICON_SCALE,
        Token::Break => 0.0,
    }
}

struct Line<'a> {
    items: Vec<(&'a Token, f32)>,
    width: f32,
}

/// Greedy word wrap. `max_width` of zero disables wrapping.
fn wrap<'a>(tokens: &'a [Token], max_width: f32, font_px: f32, style_bold: bool) -> Vec<Line<'a>> {
    let space = font_px * SPACE_ADVANCE;
    let mut lines = vec![Line {
        items: Vec::new(),
        width: 0.0,
    }];

    for token in tokens {
        if *token == Token::Break {
            lines.push(Line {
                items: Vec::new(),
                width: 0.0,
            });
            continue;
        }

        let width = token_width(token, font_px, style_bold);
        let needs_wrap = {
            let Some(line) = lines.last() else { continue };
            !line.items.is_empty() && max_width > 0.0 && line.width + space + width > max_width
        };
        if needs_wrap {
            lines.push(Line {
                items: Vec::new(),
                width: 0.0,
            });
        }

        if let Some(line) = lines.last_mut() {
            let offset = if line.items.is_empty() {
                0.0
            } else {
                line.width + space
            };
            line.items.push((token, offset));
            line.width = offset + width;
        }
    }
    lines
}

struct Canvas {
    width: f32,
    height: f32,
    unit: f32,
}

impl Canvas {
    fn x(&self, percent: f32) -> f32 {
        percent / 100.0 * self.width
    }

    fn y(&self, percent: f32) -> f32 {
        percent / 100.0 * self.height
    }

    fn root(&self) -> XMLElement {
        let mut root = XMLElement::new("svg");
        root.add_attribute("xmlns", "http://www.w3.org/2000/svg");
        root.add_attribute("width", self.width);
        root.add_attribute("height", self.height);
        root.add_attribute("viewBox", format!("0 0 {} {}", self.width, self.height));

        let mut shadow = XMLElement::new("feDropShadow");
        shadow.add_attribute("dx", self.unit * 0.1);
        shadow.add_attribute("dy", self.unit * 0.1);
        shadow.add_attribute("stdDeviation", self.unit * 0.12);
        shadow.add_attribute("flood-color", "#000000");
        shadow.add_attribute("flood-opacity", 0.8);
        let mut filter = XMLElement::new("filter");
        filter.add_attribute("id", SHADOW_FILTER_ID);
        filter.add_child(shadow);
        let mut defs = XMLElement::new("defs");
        defs.add_child(filter);
        root.add_child(defs);

        root
    }

    fn image_at(&self, href: &str, placement: &Placement, aspect: &str) -> XMLElement {
        let mut image = XMLElement::new("image");
        image.add_attribute("href", href);
        image.add_attribute("x", self.x(placement.left));
        image.add_attribute("y", self.y(placement.top));
        image.add_attribute("width", self.x(placement.width));
        image.add_attribute(
            "height",
            self.y(placement.height.unwrap_or(placement.width * self.width / self.height)),
        );
        image.add_attribute("preserveAspectRatio", aspect);
        image
    }

    /// Lay out `tokens` inside `placement` and append the lines to `root`.
    fn text_box(
        &self,
        root: &mut XMLElement,
        tokens: &[Token],
        placement: &Placement,
        style: &TextStyle,
        hrefs: Hrefs,
    ) {
        let font_px = style.font_px;
        let line_px = font_px * style.line_height;
        let box_left = self.x(placement.left);
        let box_width = self.x(placement.width);
        let top = self.y(placement.top);

        let mut lines = wrap(tokens, box_width, font_px, style.bold);
        if let Some(height) = placement.height {
            let max_lines = ((self.y(height) / line_px).floor() as usize).max(1);
            if lines.len() > max_lines {
                tracing::debug!(lines = lines.len(), max_lines, "Text overflows its box, truncated");
                lines.truncate(max_lines);
            }
        }

        let mut group = XMLElement::new("g");
        if style.shadow {
            group.add_attribute("filter", format!("url(#{})", SHADOW_FILTER_ID));
        }

        for (i, line) in lines.iter().enumerate() {
            let baseline = top + i as f32 * line_px + font_px * 0.9;
            let start = match style.align {
                TextAlign::Left => box_left,
                TextAlign::Center if box_width > 0.0 => box_left + (box_width - line.width) / 2.0,
                TextAlign::Center => box_left - line.width / 2.0,
            };

            let mut text = XMLElement::new("text");
            text.add_attribute("y", baseline);
            text.add_attribute("font-family", FONT_FAMILY);
            text.add_attribute("font-size", font_px);
            text.add_attribute("fill", &style.fill);
            if style.bold {
                text.add_attribute("font-weight", "bold");
            }

            let mut has_words = false;
            for (token, offset) in &line.items {
                match token {
                    Token::Word { text: word, bold } => {
                        let mut span = XMLElement::new("tspan");
                        span.add_attribute("x", start + offset);
                        if *bold && !style.bold {
                            span.add_attribute("font-weight", "bold");
                        }
                        span.add_text(word);
                        text.add_child(span);
                        has_words = true;
                    }
                    Token::Icon { src } => {
                        let size = font_px * ICON_SCALE;
                        let mut icon = XMLElement::new("image");
                        icon.add_attribute("href", hrefs.resolve(src));
                        icon.add_attribute("x", start + offset);
                        icon.add_attribute("y", baseline - font_px * 0.9);
                        icon.add_attribute("width", size);
                        icon.add_attribute("height", size);
                        group.add_child(icon);
                    }
                    Token::Break => {}
                }
            }
            if has_words {
                group.add_child(text);
            }
        }

        root.add_child(group);
    }
}

fn full_bleed_image(href: &str, width: f32, height: f32) -> XMLElement {
    let mut image = XMLElement::new("image");
    image.add_attribute("href", href);
    image.add_attribute("width", width);
    image.add_attribute("height", height);
    image.add_attribute("preserveAspectRatio", "xMidYMid slice");
    image
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates;
    use crate::types::SecondaryIcon;

    fn card() -> CardDesign {
        let mut card = CardDesign::new(templates::default_template());
        card.title = "Ember".to_string();
        card
    }

    #[test]
    fn test_hrefs() {
        assert_eq!(Hrefs::Preview.resolve("/models/a.png"), "/models/a.png");
        assert_eq!(Hrefs::Raster.resolve("/models/a.png"), "models/a.png");
        assert_eq!(Hrefs::Raster.resolve("data:image/webp;base64,AA"), "data:image/webp;base64,AA");
    }

    #[test]
    fn test_card_svg_has_canvas_and_background() {
        let card = card();
        let svg = compose_card_svg(&card, None, card.bound_template(), &HashMap::new(), Hrefs::Preview);
        assert!(svg.contains("<svg"));
        assert!(svg.contains("viewBox=\"0 0 750 1050\""));
        assert!(svg.contains("/models/cards/fire.png"));
        assert!(svg.contains("Ember"));
        assert!(svg.contains(&card.accent_color));
    }

    #[test]
    fn test_card_svg_overlay_and_icons() {
        let mut card = card();
        card.icon = "/models/icons/elements/fire.png".to_string();
        card.secondary_icon = Some(SecondaryIcon {
            src: "/models/icons/elements/air.png".to_string(),
            catalog_id: "air".to_string(),
        });
        card.description = "Deal **2** [burn]".to_string();
        let icons = HashMap::from([("burn".to_string(), "/models/icons/status/burn.png".to_string())]);

        let svg = compose_card_svg(
            &card,
            Some("data:image/webp;base64,AAAA"),
            card.bound_template(),
            &icons,
            Hrefs::Raster,
        );
        assert!(svg.contains("data:image/webp;base64,AAAA"));
        assert!(svg.contains("models/icons/elements/air.png"));
        assert!(svg.contains("models/icons/status/burn.png"));
        assert!(!svg.contains("\"/models/"));
    }

    #[test]
    fn test_skills_rendered() {
        let mut card = card();
        card.skills = vec!["burn".to_string(), "haste".to_string()];
        let svg = compose_card_svg(&card, None, card.bound_template(), &HashMap::new(), Hrefs::Preview);
        assert!(svg.contains("burn"));
        assert!(svg.contains("haste"));
    }

    #[test]
    fn test_wrap_breaks_long_text() {
        let tokens = tokenize(&[Inline::Text("one two three four five six".to_string())]);
        let lines = wrap(&tokens, 60.0, 16.0, false);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(line.width <= 60.0 || line.items.len() == 1);
        }
        assert_eq!(wrap(&tokens, 0.0, 16.0, false).len(), 1);
    }

    #[test]
    fn test_explicit_newline_breaks() {
        let tokens = tokenize(&[Inline::Text("a\nb".to_string())]);
        assert_eq!(wrap(&tokens, 0.0, 16.0, false).len(), 2);
    }

    #[test]
    fn test_page_number_visibility() {
        let mut page = TutorialPage::blank();
        page.titles[0].text = "Setup".to_string();
        let svg = compose_page_svg(&page, 2, Hrefs::Preview);
        assert!(svg.contains("Setup"));
        assert!(svg.contains(">3<"));

        page.page_number.visible = false;
        let svg = compose_page_svg(&page, 2, Hrefs::Preview);
        assert!(!svg.contains(">3<"));
    }

    #[test]
    fn test_page_background_blob_wins() {
        let page = TutorialPage {
            background_path: Some("/models/tutorial/a.png".to_string()),
            background_blob: Some("data:image/webp;base64,BBBB".to_string()),
            ..TutorialPage::blank()
        };
        let svg = compose_page_svg(&page, 0, Hrefs::Preview);
        assert!(svg.contains("data:image/webp;base64,BBBB"));
        assert!(!svg.contains("/models/tutorial/a.png"));
    }
}
