use crate::i18n::{Locale, t_with};
use crate::ui::use_locale;
use dioxus::prelude::*;

/// Rendered edge length of an attachment thumbnail, in pixels.
pub const ATTACHMENT_SIZE: u32 = 100;

#[component]
pub fn Avatar(initials: &'static str) -> Element {
    rsx! {
        div { class: "avatar", "{initials}" }
    }
}

/// Three bouncing dots shown in place of the pending reply.
#[component]
pub fn TypingIndicator() -> Element {
    rsx! {
        div { class: "message-row remote",
            div { class: "bubble remote",
                div { class: "typing", aria_label: "typing",
                    div { class: "typing-dot" }
                    div { class: "typing-dot" }
                    div { class: "typing-dot" }
                }
            }
        }
    }
}

#[component]
pub fn AttachmentStrip(urls: Vec<String>) -> Element {
    let locale = use_locale();
    if urls.is_empty() {
        return rsx! {};
    }

    rsx! {
        div { class: "attachments",
            for (index, url) in urls.iter().enumerate() {
                img {
                    key: "{index}",
                    class: "attachment",
                    src: "{url}",
                    alt: attachment_alt(locale, index),
                    width: "{ATTACHMENT_SIZE}",
                    height: "{ATTACHMENT_SIZE}",
                }
            }
        }
    }
}

fn attachment_alt(locale: Locale, index: usize) -> String {
    let position = (index + 1).to_string();
    t_with(locale, "chat.attachment_alt", &[("index", position.as_str())])
}

#[component]
pub fn SendIcon() -> Element {
    rsx! {
        svg {
            width: "20",
            height: "20",
            fill: "none",
            stroke: "currentColor",
            view_box: "0 0 24 24",
            path {
                stroke_linecap: "round",
                stroke_linejoin: "round",
                stroke_width: "2",
                d: "M12 19l9 2-9-18-9 18 9-2zm0 0v-8",
            }
        }
    }
}
