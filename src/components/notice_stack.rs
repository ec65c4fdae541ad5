//! Dismissable notices for storage warnings and export results.

use dioxus::prelude::*;

use crate::context::use_notices;
use crate::theme::colors;

#[component]
pub fn NoticeStack() -> Element {
    let mut notices = use_notices();

    rsx! {
        div { class: "notice-stack",
            for notice in notices() {
                div {
                    key: "{notice.id}",
                    class: if notice.is_error { "notice notice--error" } else { "notice" },
                    span {
                        class: "notice__text",
                        style: if notice.is_error { format!("color: {}", colors::WARNING) } else { String::new() },
                        "{notice.text}"
                    }
                    button {
                        class: "notice__dismiss",
                        title: "Dismiss",
                        onclick: move |_| notices.write().retain(|n| n.id != notice.id),
                        "×"
                    }
                }
            }
        }
    }
}
