//! Color constants shared by the stylesheet and inline styles.
//!
//! Warm workshop palette: dark slate surfaces, parchment text, ember accents.

#![allow(dead_code)]

// === SURFACES ===
pub const SLATE: &str = "#15161a";
pub const SLATE_RAISED: &str = "#1f2127";
pub const SLATE_BORDER: &str = "#2e313a";

// === TEXT ===
pub const PARCHMENT: &str = "#f4f1ea";
pub const PARCHMENT_DIM: &str = "rgba(244, 241, 234, 0.7)";
pub const PARCHMENT_MUTED: &str = "rgba(244, 241, 234, 0.45)";

// === ACCENTS ===
pub const EMBER: &str = "#e25822";
pub const EMBER_GLOW: &str = "rgba(226, 88, 34, 0.35)";
pub const BRASS: &str = "#c9a54a";

// === SEMANTIC ===
pub const DANGER: &str = "#ff4d5e";
pub const WARNING: &str = "#ffb020";
pub const SUCCESS: &str = "#5fbf7a";
