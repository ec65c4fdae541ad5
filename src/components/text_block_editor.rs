//! Text Block Editor Component
//!
//! Field-by-field editing of one tutorial title or description. Each change
//! is reported as a single [`BlockEdit`].

use cardforge_core::{BlockEdit, PageNumberStyle, TextAlign, TextBlock};
use dioxus::prelude::*;

fn parse_number(value: &str) -> Option<f32> {
    value.trim().parse::<f32>().ok().filter(|v| v.is_finite())
}

/// Empty input clears an optional number.
fn parse_optional(value: &str) -> Option<Option<f32>> {
    if value.trim().is_empty() {
        Some(None)
    } else {
        parse_number(value).map(Some)
    }
}

fn align_from(value: &str) -> TextAlign {
    match value {
        "center" => TextAlign::Center,
        _ => TextAlign::Left,
    }
}

fn optional_text(value: Option<f32>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

#[component]
pub fn TextBlockEditor(
    label: String,
    block: TextBlock,
    /// Whether the remove button is enabled (the last block stays)
    removable: bool,
    multiline: bool,
    on_edit: EventHandler<BlockEdit>,
    on_remove: EventHandler<()>,
) -> Element {
    let width = optional_text(block.width);
    let line_height = optional_text(block.line_height);
    let color = block.color.clone().unwrap_or_else(|| "#ffffff".to_string());
    let centered = block.align == TextAlign::Center;

    rsx! {
        div { class: "block-editor",
            div { class: "block-editor__header",
                span { "{label}" }
                button {
                    class: "btn btn--small btn--danger",
                    disabled: !removable,
                    onclick: move |_| on_remove.call(()),
                    "Remove"
                }
            }

            if multiline {
                textarea {
                    value: "{block.text}",
                    oninput: move |evt: FormEvent| on_edit.call(BlockEdit::Text(evt.value())),
                }
            } else {
                input {
                    r#type: "text",
                    value: "{block.text}",
                    oninput: move |evt: FormEvent| on_edit.call(BlockEdit::Text(evt.value())),
                }
            }

            div { class: "form-row",
                div { class: "form-field",
                    label { "Top %" }
                    input {
                        r#type: "number",
                        step: "0.5",
                        value: "{block.top}",
                        onchange: move |evt: FormEvent| {
                            if let Some(v) = parse_number(&evt.value()) {
                                on_edit.call(BlockEdit::Top(v));
                            }
                        },
                    }
                }
                div { class: "form-field",
                    label { "Left %" }
                    input {
                        r#type: "number",
                        step: "0.5",
                        value: "{block.left}",
                        onchange: move |evt: FormEvent| {
                            if let Some(v) = parse_number(&evt.value()) {
                                on_edit.call(BlockEdit::Left(v));
                            }
                        },
                    }
                }
                div { class: "form-field",
                    label { "Size" }
                    input {
                        r#type: "number",
                        step: "0.1",
                        min: "0.1",
                        value: "{block.font_size}",
                        onchange: move |evt: FormEvent| {
                            if let Some(v) = parse_number(&evt.value()).filter(|v| *v > 0.0) {
                                on_edit.call(BlockEdit::FontSize(v));
                            }
                        },
                    }
                }
            }

            div { class: "form-row",
                div { class: "form-field",
                    label { "Width %" }
                    input {
                        r#type: "number",
                        placeholder: "auto",
                        value: "{width}",
                        onchange: move |evt: FormEvent| {
                            if let Some(v) = parse_optional(&evt.value()) {
                                on_edit.call(BlockEdit::Width(v));
                            }
                        },
                    }
                }
                div { class: "form-field",
                    label { "Line height" }
                    input {
                        r#type: "number",
                        step: "0.1",
                        placeholder: "auto",
                        value: "{line_height}",
                        onchange: move |evt: FormEvent| {
                            if let Some(v) = parse_optional(&evt.value()) {
                                on_edit.call(BlockEdit::LineHeight(v));
                            }
                        },
                    }
                }
                div { class: "form-field",
                    label { "Color" }
                    input {
                        r#type: "color",
                        value: "{color}",
                        oninput: move |evt: FormEvent| on_edit.call(BlockEdit::Color(Some(evt.value()))),
                    }
                }
            }

            div { class: "form-row",
                div { class: "form-field",
                    label { "Align" }
                    select {
                        onchange: move |evt: FormEvent| on_edit.call(BlockEdit::Align(align_from(&evt.value()))),
                        option { value: "left", selected: !centered, "Left" }
                        option { value: "center", selected: centered, "Center" }
                    }
                }
                div { class: "form-field",
                    label { "Shadow" }
                    input {
                        r#type: "checkbox",
                        checked: block.shadow,
                        onchange: move |evt: FormEvent| on_edit.call(BlockEdit::Shadow(evt.checked())),
                    }
                }
            }
        }
    }
}

/// Editor for the page-number style shared by every page of a profile.
#[component]
pub fn PageNumberEditor(style: PageNumberStyle, on_change: EventHandler<PageNumberStyle>) -> Element {
    let centered = style.align == TextAlign::Center;

    rsx! {
        div { class: "block-editor",
            div { class: "block-editor__header",
                span { "Page number (all pages)" }
                input {
                    r#type: "checkbox",
                    checked: style.visible,
                    onchange: move |evt: FormEvent| on_change.call(PageNumberStyle { visible: evt.checked(), ..style }),
                }
            }
            div { class: "form-row",
                div { class: "form-field",
                    label { "Top %" }
                    input {
                        r#type: "number",
                        step: "0.5",
                        value: "{style.top}",
                        onchange: move |evt: FormEvent| {
                            if let Some(top) = parse_number(&evt.value()) {
                                on_change.call(PageNumberStyle { top, ..style });
                            }
                        },
                    }
                }
                div { class: "form-field",
                    label { "Left %" }
                    input {
                        r#type: "number",
                        step: "0.5",
                        value: "{style.left}",
                        onchange: move |evt: FormEvent| {
                            if let Some(left) = parse_number(&evt.value()) {
                                on_change.call(PageNumberStyle { left, ..style });
                            }
                        },
                    }
                }
                div { class: "form-field",
                    label { "Size" }
                    input {
                        r#type: "number",
                        step: "0.1",
                        value: "{style.font_size}",
                        onchange: move |evt: FormEvent| {
                            if let Some(font_size) = parse_number(&evt.value()).filter(|v| *v > 0.0) {
                                on_change.call(PageNumberStyle { font_size, ..style });
                            }
                        },
                    }
                }
                div { class: "form-field",
                    label { "Align" }
                    select {
                        onchange: move |evt: FormEvent| {
                            on_change.call(PageNumberStyle { align: align_from(&evt.value()), ..style });
                        },
                        option { value: "left", selected: !centered, "Left" }
                        option { value: "center", selected: centered, "Center" }
                    }
                }
            }
        }
    }
}
