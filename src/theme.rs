//! Theme provider.
//!
//! Each mode publishes a table of CSS custom properties holding bare HSL
//! triples. [`Palette::resolve`] turns those into concrete colours, falling
//! back to the stock palette for anything missing. [`ThemeBus`] lets
//! components re-resolve when the mode flips or the root `class` changes.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};
use std::str::FromStr;

/// Root class that switches the page to dark mode.
pub const DARK_CLASS: &str = "dark";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        matches!(self, ThemeMode::Dark)
    }

    /// Mode implied by the document root's class list. Other classes are
    /// ignored.
    pub fn from_root_classes(classes: &str) -> Self {
        if classes.split_whitespace().any(|class| class == DARK_CLASS) {
            ThemeMode::Dark
        } else {
            ThemeMode::Light
        }
    }

    pub fn variables(self) -> &'static [(&'static str, &'static str)] {
        match self {
            ThemeMode::Light => LIGHT_VARIABLES,
            ThemeMode::Dark => DARK_VARIABLES,
        }
    }

    pub fn variable(self, name: &str) -> Option<&'static str> {
        self.variables()
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| *value)
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThemeMode::Light => write!(f, "light"),
            ThemeMode::Dark => write!(f, "dark"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown theme '{0}' (expected 'light' or 'dark')")]
pub struct UnknownTheme(pub String);

impl FromStr for ThemeMode {
    type Err = UnknownTheme;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            _ => Err(UnknownTheme(raw.to_string())),
        }
    }
}

const LIGHT_VARIABLES: &[(&str, &str)] = &[
    ("--background", "0 0% 100%"),
    ("--foreground", "20 14.3% 4.1%"),
    ("--card", "0 0% 100%"),
    ("--primary", "24.6 95% 53.1%"),
    ("--primary-foreground", "60 9.1% 97.8%"),
    ("--secondary", "60 4.8% 95.9%"),
    ("--secondary-foreground", "24 9.8% 10%"),
    ("--muted-foreground", "25 5.3% 44.7%"),
    ("--border", "20 5.9% 90%"),
];

const DARK_VARIABLES: &[(&str, &str)] = &[
    ("--background", "20 14.3% 4.1%"),
    ("--foreground", "60 9.1% 97.8%"),
    ("--card", "20 14.3% 7%"),
    ("--primary", "20.5 90.2% 48.2%"),
    ("--primary-foreground", "60 9.1% 97.8%"),
    ("--secondary", "12 6.5% 15.1%"),
    ("--secondary-foreground", "60 9.1% 97.8%"),
    ("--muted-foreground", "24 5.4% 63.9%"),
    ("--border", "12 6.5% 15.1%"),
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    pub primary: String,
    pub primary_contrast: String,
    pub secondary: String,
    pub secondary_contrast: String,
    pub background: String,
    pub paper: String,
    pub text_primary: String,
    pub text_secondary: String,
    pub divider: String,
}

impl Palette {
    /// Resolves every token through `lookup`, wrapping found values in
    /// `hsl(...)`. Blank or missing variables take the stock colour.
    pub fn resolve<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str, fallback: &str| match lookup(name) {
            Some(value) if !value.trim().is_empty() => format!("hsl({})", value.trim()),
            _ => fallback.to_string(),
        };

        Self {
            primary: var("--primary", "hsl(24.6 95% 53.1%)"),
            primary_contrast: var("--primary-foreground", "hsl(60 9.1% 97.8%)"),
            secondary: var("--secondary", "hsl(60 4.8% 95.9%)"),
            secondary_contrast: var("--secondary-foreground", "hsl(24 9.8% 10%)"),
            background: var("--background", "hsl(0 0% 100%)"),
            paper: var("--card", "hsl(0 0% 100%)"),
            text_primary: var("--foreground", "hsl(20 14.3% 4.1%)"),
            text_secondary: var("--muted-foreground", "hsl(25 5.3% 44.7%)"),
            divider: var("--border", "hsl(20 5.9% 90%)"),
        }
    }

    pub fn for_mode(mode: ThemeMode) -> Self {
        Self::resolve(|name| mode.variable(name).map(str::to_string))
    }

    /// Root stylesheet consumed by the chat view.
    pub fn to_css(&self) -> String {
        format!(
            ":root {{\n    --color-primary: {};\n    --color-primary-contrast: {};\n    --color-secondary: {};\n    --color-secondary-contrast: {};\n    --color-bg: {};\n    --color-paper: {};\n    --color-text: {};\n    --color-text-muted: {};\n    --color-divider: {};\n}}\n",
            self.primary,
            self.primary_contrast,
            self.secondary,
            self.secondary_contrast,
            self.background,
            self.paper,
            self.text_primary,
            self.text_secondary,
            self.divider,
        )
    }
}

// ============================================
// Theme change notifications
// ============================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ThemeEvent {
    Toggle,
    SetMode(ThemeMode),
    /// An attribute on the document root changed. `value` is its new
    /// content, when known.
    RootAttributeChanged { name: String, value: Option<String> },
}

type Listener = Rc<dyn Fn(ThemeMode)>;

struct BusInner {
    mode: Cell<ThemeMode>,
    next_id: Cell<u64>,
    listeners: RefCell<Vec<(u64, Listener)>>,
}

/// Single-threaded observer for theme changes. Cloning shares the bus.
#[derive(Clone)]
pub struct ThemeBus {
    inner: Rc<BusInner>,
}

impl ThemeBus {
    pub fn new(mode: ThemeMode) -> Self {
        Self {
            inner: Rc::new(BusInner {
                mode: Cell::new(mode),
                next_id: Cell::new(1),
                listeners: RefCell::new(Vec::new()),
            }),
        }
    }

    pub fn mode(&self) -> ThemeMode {
        self.inner.mode.get()
    }

    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    /// Registers `callback`. It stays registered until the returned guard
    /// is dropped.
    pub fn subscribe<F>(&self, callback: F) -> ThemeSubscription
    where
        F: Fn(ThemeMode) + 'static,
    {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        self.inner
            .listeners
            .borrow_mut()
            .push((id, Rc::new(callback)));
        ThemeSubscription {
            bus: Rc::downgrade(&self.inner),
            id,
        }
    }

    /// Applies `event` and notifies listeners when it is relevant.
    /// Returns whether anyone was notified.
    pub fn dispatch(&self, event: ThemeEvent) -> bool {
        match event {
            ThemeEvent::Toggle => {
                self.inner.mode.set(self.mode().toggled());
            }
            ThemeEvent::SetMode(mode) => {
                self.inner.mode.set(mode);
            }
            ThemeEvent::RootAttributeChanged { name, value } => {
                if name != "class" {
                    return false;
                }
                if let Some(classes) = value {
                    self.inner.mode.set(ThemeMode::from_root_classes(&classes));
                }
            }
        }

        // Snapshot so callbacks may subscribe or drop guards re-entrantly.
        let listeners: Vec<Listener> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        let mode = self.mode();
        tracing::debug!(%mode, listeners = listeners.len(), "theme changed");
        for listener in &listeners {
            listener(mode);
        }
        !listeners.is_empty()
    }
}

/// Keeps a [`ThemeBus`] listener registered for as long as it lives.
pub struct ThemeSubscription {
    bus: Weak<BusInner>,
    id: u64,
}

impl Drop for ThemeSubscription {
    fn drop(&mut self) {
        if let Some(inner) = self.bus.upgrade() {
            inner
                .listeners
                .borrow_mut()
                .retain(|(id, _)| *id != self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_variables_and_falls_back() {
        let palette = Palette::resolve(|name| match name {
            "--primary" => Some(" 200 50% 40% ".to_string()),
            "--border" => Some("   ".to_string()),
            _ => None,
        });
        assert_eq!(palette.primary, "hsl(200 50% 40%)");
        assert_eq!(palette.divider, "hsl(20 5.9% 90%)");
        assert_eq!(palette.background, "hsl(0 0% 100%)");
        assert_eq!(palette.secondary_contrast, "hsl(24 9.8% 10%)");
    }

    #[test]
    fn dark_palette_differs_from_light() {
        let light = Palette::for_mode(ThemeMode::Light);
        let dark = Palette::for_mode(ThemeMode::Dark);
        assert_ne!(light.background, dark.background);
        assert!(dark.to_css().contains("--color-bg: hsl(20 14.3% 4.1%);"));
    }

    #[test]
    fn parses_modes() {
        assert_eq!("Dark".parse::<ThemeMode>(), Ok(ThemeMode::Dark));
        assert!("octane".parse::<ThemeMode>().is_err());
    }

    #[test]
    fn toggle_notifies_until_guard_dropped() {
        let bus = ThemeBus::new(ThemeMode::Light);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let guard = bus.subscribe(move |mode| sink.borrow_mut().push(mode));

        assert!(bus.dispatch(ThemeEvent::Toggle));
        assert_eq!(bus.mode(), ThemeMode::Dark);
        assert_eq!(*seen.borrow(), vec![ThemeMode::Dark]);

        drop(guard);
        assert_eq!(bus.listener_count(), 0);
        assert!(!bus.dispatch(ThemeEvent::Toggle));
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn only_class_mutations_refresh() {
        let bus = ThemeBus::new(ThemeMode::Dark);
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        let _guard = bus.subscribe(move |_| counter.set(counter.get() + 1));

        assert!(!bus.dispatch(ThemeEvent::RootAttributeChanged {
            name: "style".to_string(),
            value: Some("color: red".to_string()),
        }));
        assert!(bus.dispatch(ThemeEvent::RootAttributeChanged {
            name: "class".to_string(),
            value: None,
        }));
        assert_eq!(hits.get(), 1);
        assert_eq!(bus.mode(), ThemeMode::Dark);
    }

    #[test]
    fn external_class_change_drives_mode() {
        let bus = ThemeBus::new(ThemeMode::Light);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let _guard = bus.subscribe(move |mode| sink.borrow_mut().push(mode));

        bus.dispatch(ThemeEvent::RootAttributeChanged {
            name: "class".to_string(),
            value: Some("no-scroll dark".to_string()),
        });
        bus.dispatch(ThemeEvent::RootAttributeChanged {
            name: "class".to_string(),
            value: Some("no-scroll darker".to_string()),
        });

        assert_eq!(*seen.borrow(), vec![ThemeMode::Dark, ThemeMode::Light]);
        assert_eq!(bus.mode(), ThemeMode::Light);
    }

    #[test]
    fn guard_outliving_bus_is_harmless() {
        let bus = ThemeBus::new(ThemeMode::Light);
        let guard = bus.subscribe(|_| {});
        drop(bus);
        drop(guard);
    }
}
