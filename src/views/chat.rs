use crate::i18n::{format_clock, t};
use crate::session::ChatSession;
use crate::theme::{ThemeBus, ThemeEvent};
use crate::types::{Message, Origin};
use crate::ui::use_locale;
use crate::views::shared::{AttachmentStrip, Avatar, SendIcon, TypingIndicator};
use crate::webhook::{WebhookClient, exchange};
use dioxus::events::Key;
use dioxus::prelude::*;

const SCROLL_TO_END: &str =
    "document.getElementById('chat-end')?.scrollIntoView({ behavior: 'smooth' });";

fn origin_class(origin: Origin) -> &'static str {
    match origin {
        Origin::User => "user",
        Origin::Remote => "remote",
    }
}

/// Posts `history` in the background and folds the reply into `session`.
fn start_exchange(mut session: Signal<ChatSession>, client: WebhookClient, history: Vec<Message>) {
    spawn(async move {
        let outcome = exchange(&client, &history).await;
        session.with_mut(|s| s.complete_exchange(outcome));
    });
}

#[component]
pub fn ChatView() -> Element {
    let locale = use_locale();
    let mut session = use_signal(ChatSession::new);
    let client = use_hook(WebhookClient::new);

    use_effect(move || {
        let state = session.read();
        let _ = (state.messages().len(), state.is_awaiting_reply());
        let _ = document::eval(SCROLL_TO_END);
    });

    let key_client = client.clone();
    let click_client = client;
    let state = session();
    let input = state.input().to_string();

    rsx! {
        div { class: "messenger",
            ChatHeader {}

            div { id: "chat-list", class: "chat-list",
                for (i, msg) in state.messages().iter().enumerate() {
                    MessageBubble { key: "{i}-{msg.id}", message: msg.clone() }
                }
                if state.is_awaiting_reply() {
                    TypingIndicator {}
                }
                div { id: "chat-end" }
            }

            div { class: "composer",
                div { class: "composer-inner",
                    textarea {
                        rows: "1",
                        placeholder: t(locale, "chat.placeholder"),
                        value: "{input}",
                        oninput: move |ev| session.with_mut(|s| s.set_input(ev.value())),
                        onkeydown: move |ev| {
                            if ev.key() != Key::Enter {
                                return;
                            }
                            let shift = ev.modifiers().shift();
                            if !shift {
                                ev.prevent_default();
                            }
                            let (_, pending) = session.with_mut(|s| s.press_enter(shift));
                            if let Some(history) = pending {
                                start_exchange(session, key_client.clone(), history);
                            }
                        },
                    }
                    button {
                        class: "btn-send",
                        r#type: "button",
                        title: t(locale, "chat.send"),
                        disabled: !state.can_send(),
                        onclick: move |_| {
                            let pending = session.with_mut(|s| s.begin_submit_input());
                            if let Some(history) = pending {
                                start_exchange(session, click_client.clone(), history);
                            }
                        },
                        SendIcon {}
                    }
                }
            }
        }
    }
}

#[component]
fn ChatHeader() -> Element {
    let locale = use_locale();
    let bus = use_context::<ThemeBus>();
    let title = t(locale, "chat.title");
    let online = t(locale, "chat.online");

    rsx! {
        div { class: "header",
            div { class: "header-content",
                Avatar { initials: "AZ" }
                div { class: "header-text",
                    h1 { class: "header-title", "{title}" }
                    p { class: "header-status", "● {online}" }
                }
                button {
                    class: "theme-toggle",
                    r#type: "button",
                    title: t(locale, "theme.toggle"),
                    onclick: move |_| {
                        bus.dispatch(ThemeEvent::Toggle);
                    },
                    "◐"
                }
            }
        }
    }
}

#[component]
fn MessageBubble(message: Message) -> Element {
    let locale = use_locale();
    let class = origin_class(message.origin);
    let timestamp = format_clock(message.created_at, locale);

    rsx! {
        div { class: "message-row {class}",
            div { class: "bubble {class}",
                AttachmentStrip { urls: message.attachments.clone() }
                div { class: "bubble-text", "{message.text}" }
                p { class: "message-timestamp", "{timestamp}" }
            }
        }
    }
}
