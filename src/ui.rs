use crate::config::AppConfig;
use crate::i18n::Locale;
use crate::theme::{DARK_CLASS, Palette, ThemeBus, ThemeEvent};
use crate::toast::Toaster;
use crate::views::ChatView;
use dioxus::html::point_interaction::InteractionLocation;
use dioxus::prelude::*;
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

const MAIN_CSS: Asset = asset!("/assets/main.css");
const TOAST_TICK: Duration = Duration::from_millis(100);

#[component]
pub fn App() -> Element {
    let config = use_context::<AppConfig>();
    use_context_provider(|| ThemeBus::new(config.theme));
    let locale = use_context_provider(|| config.locale);
    use_context_provider(|| Signal::new(Toaster::default()));

    use_effect(move || {
        let script = format!("document.documentElement.lang = '{}';", locale.tag());
        let _ = document::eval(&script);
    });

    rsx! {
        ThemeStyles {}
        ChatView {}
        ToastContainer {}
    }
}

/// Emits the palette for the current mode and re-resolves it whenever the
/// theme bus fires. The subscription is released with the component.
#[component]
fn ThemeStyles() -> Element {
    let bus = use_context::<ThemeBus>();
    let mode = use_signal(|| bus.mode());
    let _subscription = use_hook(|| {
        Rc::new(bus.subscribe(move |next| {
            let mut mode = mode;
            if *mode.peek() != next {
                mode.set(next);
            }
        }))
    });

    // Class edits made outside the app (devtools, host page) reach the bus.
    use_future(move || {
        let bus = bus.clone();
        async move {
            let mut observer = document::eval(ROOT_CLASS_OBSERVER);
            while let Ok(classes) = observer.recv::<String>().await {
                bus.dispatch(ThemeEvent::RootAttributeChanged {
                    name: "class".to_string(),
                    value: Some(classes),
                });
            }
        }
    });

    use_effect(move || {
        let script = format!(
            "document.documentElement.classList.toggle('{DARK_CLASS}', {});",
            mode().is_dark()
        );
        let _ = document::eval(&script);
    });

    let css = Palette::for_mode(mode()).to_css();
    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        style { dangerous_inner_html: "{css}" }
    }
}

const ROOT_CLASS_OBSERVER: &str = r#"
const root = document.documentElement;
new MutationObserver((mutations) => {
    if (mutations.some((m) => m.attributeName === "class")) {
        dioxus.send(root.className);
    }
}).observe(root, { attributes: true, attributeFilter: ["class"] });
"#;

const WINDOW_FOCUS_WATCHER: &str = r#"
window.addEventListener("blur", () => dioxus.send(false));
window.addEventListener("focus", () => dioxus.send(true));
"#;

#[component]
fn ToastContainer() -> Element {
    let mut toaster = use_context::<Signal<Toaster>>();
    let ticking = use_hook(|| Rc::new(Cell::new(false)));

    // The clock only runs while a timed toast is on screen.
    use_effect(move || {
        if !toaster.read().needs_clock() || ticking.get() {
            return;
        }
        ticking.set(true);
        let ticking = ticking.clone();
        spawn(async move {
            while toaster.peek().needs_clock() {
                sleep(TOAST_TICK).await;
                toaster.with_mut(|t| t.tick(TOAST_TICK));
            }
            ticking.set(false);
        });
    });

    use_future(move || async move {
        let mut watcher = document::eval(WINDOW_FOCUS_WATCHER);
        while let Ok(focused) = watcher.recv::<bool>().await {
            toaster.with_mut(|t| t.set_focused(focused));
        }
    });

    let snapshot = toaster();
    let position = snapshot.options().position.class();

    rsx! {
        div { class: "toast-container {position}",
            for toast in snapshot.visible() {
                div {
                    key: "{toast.id}",
                    class: format_args!("toast {}", toast.kind.class()),
                    role: "alert",
                    style: format_args!("transform: translateX({:.0}px);", toast.drag_offset()),
                    onclick: {
                        let id = toast.id;
                        move |_| {
                            toaster.with_mut(|t| t.click(id));
                        }
                    },
                    onmouseenter: {
                        let id = toast.id;
                        move |_| toaster.with_mut(|t| t.hover(id, true))
                    },
                    onmouseleave: {
                        let id = toast.id;
                        move |_| toaster.with_mut(|t| t.hover(id, false))
                    },
                    onpointerdown: {
                        let id = toast.id;
                        move |ev: PointerEvent| {
                            let x = ev.client_coordinates().x;
                            toaster.with_mut(|t| t.drag_start(id, x));
                        }
                    },
                    onpointermove: {
                        let id = toast.id;
                        move |ev: PointerEvent| {
                            let x = ev.client_coordinates().x;
                            toaster.with_mut(|t| t.drag_move(id, x));
                        }
                    },
                    onpointerup: {
                        let id = toast.id;
                        move |_| {
                            toaster.with_mut(|t| t.drag_end(id));
                        }
                    },
                    onpointerleave: {
                        let id = toast.id;
                        move |_| {
                            toaster.with_mut(|t| t.drag_end(id));
                        }
                    },
                    "{toast.text}"
                    if let Some(remaining) = snapshot.progress(toast.id) {
                        div {
                            class: "toast-progress",
                            style: format_args!("width: {:.1}%;", remaining * 100.0),
                        }
                    }
                }
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
async fn sleep(duration: Duration) {
    tokio::time::sleep(duration).await;
}

// No tokio timer driver in the browser; borrow the page's.
#[cfg(target_arch = "wasm32")]
async fn sleep(duration: Duration) {
    let script = format!(
        "await new Promise(resolve => setTimeout(resolve, {})); return null;",
        duration.as_millis()
    );
    let _ = document::eval(&script).await;
}

/// Locale supplied to the tree by [`App`].
pub fn use_locale() -> Locale {
    use_context::<Locale>()
}
