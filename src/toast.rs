//! App-wide transient notifications.
//!
//! [`Toaster`] is a plain queue driven by explicit [`Toaster::tick`] calls;
//! the UI advances it from a timer and renders [`Toaster::visible`].

use std::fmt;
use std::time::Duration;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ToastPosition {
    #[default]
    TopRight,
    TopLeft,
    BottomRight,
    BottomLeft,
}

impl ToastPosition {
    pub fn class(self) -> &'static str {
        match self {
            ToastPosition::TopRight => "toast-top-right",
            ToastPosition::TopLeft => "toast-top-left",
            ToastPosition::BottomRight => "toast-bottom-right",
            ToastPosition::BottomLeft => "toast-bottom-left",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Success,
    Warning,
    Error,
}

impl ToastKind {
    pub fn class(self) -> &'static str {
        match self {
            ToastKind::Info => "toast-info",
            ToastKind::Success => "toast-success",
            ToastKind::Warning => "toast-warning",
            ToastKind::Error => "toast-error",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToastOptions {
    pub position: ToastPosition,
    /// `None` keeps toasts until dismissed.
    pub auto_close: Option<Duration>,
    pub hide_progress_bar: bool,
    pub newest_on_top: bool,
    pub close_on_click: bool,
    pub pause_on_focus_loss: bool,
    pub draggable: bool,
    /// Horizontal swipe, in pixels, that dismisses a dragged toast.
    pub drag_dismiss_px: u32,
    pub pause_on_hover: bool,
}

impl Default for ToastOptions {
    fn default() -> Self {
        Self {
            position: ToastPosition::TopRight,
            auto_close: Some(Duration::from_millis(3000)),
            hide_progress_bar: false,
            newest_on_top: true,
            close_on_click: true,
            pause_on_focus_loss: true,
            draggable: true,
            // 80% of the 320px container
            drag_dismiss_px: 256,
            pause_on_hover: true,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToastId(u64);

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "toast-{}", self.0)
    }
}

/// Pointer movement below this is still a click, not a drag.
const CLICK_SLOP_PX: f64 = 5.0;

#[derive(Clone, Copy, Debug, PartialEq)]
struct Drag {
    origin_x: f64,
    offset: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: ToastId,
    pub kind: ToastKind,
    pub text: String,
    elapsed: Duration,
    paused: bool,
    drag: Option<Drag>,
    swallow_click: bool,
}

impl Toast {
    pub fn is_paused(&self) -> bool {
        self.paused || self.drag.is_some()
    }

    /// Current horizontal drag offset in pixels.
    pub fn drag_offset(&self) -> f64 {
        self.drag.map_or(0.0, |drag| drag.offset)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toaster {
    options: ToastOptions,
    toasts: Vec<Toast>,
    next_id: u64,
    focused: bool,
}

impl Default for Toaster {
    fn default() -> Self {
        Self::new(ToastOptions::default())
    }
}

impl Toaster {
    pub fn new(options: ToastOptions) -> Self {
        Self {
            options,
            toasts: Vec::new(),
            next_id: 1,
            focused: true,
        }
    }

    pub fn options(&self) -> &ToastOptions {
        &self.options
    }

    pub fn push(&mut self, kind: ToastKind, text: impl Into<String>) -> ToastId {
        let id = ToastId(self.next_id);
        self.next_id += 1;
        self.toasts.push(Toast {
            id,
            kind,
            text: text.into(),
            elapsed: Duration::ZERO,
            paused: false,
            drag: None,
            swallow_click: false,
        });
        id
    }

    pub fn dismiss(&mut self, id: ToastId) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|toast| toast.id != id);
        self.toasts.len() != before
    }

    /// A click closes the toast when `close_on_click` is set. The click
    /// that ends a drag is ignored.
    pub fn click(&mut self, id: ToastId) -> bool {
        if let Some(toast) = self.find_mut(id) {
            if std::mem::take(&mut toast.swallow_click) {
                return false;
            }
        }
        self.options.close_on_click && self.dismiss(id)
    }

    /// Starts a swipe at pointer position `x`. The toast's timer holds
    /// while it is being dragged.
    pub fn drag_start(&mut self, id: ToastId, x: f64) {
        if !self.options.draggable {
            return;
        }
        if let Some(toast) = self.find_mut(id) {
            toast.drag = Some(Drag {
                origin_x: x,
                offset: 0.0,
            });
            toast.swallow_click = false;
        }
    }

    pub fn drag_move(&mut self, id: ToastId, x: f64) {
        if let Some(drag) = self.find_mut(id).and_then(|toast| toast.drag.as_mut()) {
            drag.offset = x - drag.origin_x;
        }
    }

    /// Ends a swipe. Returns whether it went far enough to dismiss.
    pub fn drag_end(&mut self, id: ToastId) -> bool {
        let threshold = f64::from(self.options.drag_dismiss_px);
        let Some(toast) = self.find_mut(id) else {
            return false;
        };
        let Some(drag) = toast.drag.take() else {
            return false;
        };
        toast.swallow_click = drag.offset.abs() > CLICK_SLOP_PX;
        if drag.offset.abs() >= threshold {
            tracing::debug!(%id, offset = drag.offset, "toast swiped away");
            return self.dismiss(id);
        }
        false
    }

    pub fn hover(&mut self, id: ToastId, hovering: bool) {
        if !self.options.pause_on_hover {
            return;
        }
        if let Some(toast) = self.find_mut(id) {
            toast.paused = hovering;
        }
    }

    /// Window focus changes; timers freeze while unfocused when
    /// `pause_on_focus_loss` is set.
    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    /// Whether anything on screen is waiting on [`Toaster::tick`].
    pub fn needs_clock(&self) -> bool {
        self.options.auto_close.is_some() && !self.toasts.is_empty()
    }

    fn find_mut(&mut self, id: ToastId) -> Option<&mut Toast> {
        self.toasts.iter_mut().find(|toast| toast.id == id)
    }

    fn timers_frozen(&self) -> bool {
        self.options.pause_on_focus_loss && !self.focused
    }

    /// Advances running timers by `elapsed` and drops expired toasts.
    pub fn tick(&mut self, elapsed: Duration) {
        let Some(limit) = self.options.auto_close else {
            return;
        };
        if self.timers_frozen() {
            return;
        }
        for toast in self.toasts.iter_mut().filter(|toast| !toast.is_paused()) {
            toast.elapsed += elapsed;
        }
        self.toasts.retain(|toast| toast.elapsed < limit);
    }

    /// Toasts in display order.
    pub fn visible(&self) -> Vec<&Toast> {
        let mut out: Vec<&Toast> = self.toasts.iter().collect();
        if self.options.newest_on_top {
            out.reverse();
        }
        out
    }

    /// Remaining share of the auto-close window, `None` without a bar.
    pub fn progress(&self, id: ToastId) -> Option<f32> {
        if self.options.hide_progress_bar {
            return None;
        }
        let limit = self.options.auto_close?;
        let toast = self.toasts.iter().find(|toast| toast.id == id)?;
        let remaining = limit.saturating_sub(toast.elapsed);
        Some(remaining.as_secs_f32() / limit.as_secs_f32())
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toaster() -> Toaster {
        Toaster::new(ToastOptions::default())
    }

    #[test]
    fn newest_shows_first() {
        let mut t = toaster();
        t.push(ToastKind::Info, "first");
        t.push(ToastKind::Success, "second");
        let texts: Vec<_> = t.visible().iter().map(|toast| toast.text.as_str()).collect();
        assert_eq!(texts, vec!["second", "first"]);
    }

    #[test]
    fn expires_after_three_seconds() {
        let mut t = toaster();
        let id = t.push(ToastKind::Info, "bye");
        t.tick(Duration::from_millis(1500));
        assert_eq!(t.progress(id), Some(0.5));
        t.tick(Duration::from_millis(1499));
        assert!(!t.is_empty());
        t.tick(Duration::from_millis(1));
        assert!(t.is_empty());
    }

    #[test]
    fn hover_pauses_only_that_toast() {
        let mut t = toaster();
        let held = t.push(ToastKind::Warning, "held");
        t.push(ToastKind::Info, "free");
        t.hover(held, true);
        t.tick(Duration::from_secs(5));
        let left: Vec<_> = t.visible().iter().map(|toast| toast.id).collect();
        assert_eq!(left, vec![held]);
        t.hover(held, false);
        t.tick(Duration::from_secs(3));
        assert!(t.is_empty());
    }

    #[test]
    fn focus_loss_freezes_timers() {
        let mut t = toaster();
        t.push(ToastKind::Error, "stuck");
        t.set_focused(false);
        t.tick(Duration::from_secs(10));
        assert!(!t.is_empty());
        t.set_focused(true);
        t.tick(Duration::from_secs(3));
        assert!(t.is_empty());
    }

    #[test]
    fn focus_loss_ignored_when_option_off() {
        let mut t = Toaster::new(ToastOptions {
            pause_on_focus_loss: false,
            ..ToastOptions::default()
        });
        t.push(ToastKind::Info, "gone");
        t.set_focused(false);
        t.tick(Duration::from_secs(3));
        assert!(t.is_empty());
    }

    #[test]
    fn long_swipe_dismisses() {
        let mut t = toaster();
        let id = t.push(ToastKind::Info, "swipe");
        t.drag_start(id, 100.0);
        t.drag_move(id, 300.0);
        assert_eq!(t.visible()[0].drag_offset(), 200.0);
        assert!(!t.drag_end(id));
        assert!(!t.click(id), "click ending a drag must not close");

        t.drag_start(id, 400.0);
        t.drag_move(id, 120.0);
        assert!(t.drag_end(id));
        assert!(t.is_empty());
    }

    #[test]
    fn dragging_holds_the_timer() {
        let mut t = toaster();
        let id = t.push(ToastKind::Info, "held");
        t.drag_start(id, 0.0);
        t.tick(Duration::from_secs(5));
        assert!(!t.is_empty());
        t.drag_end(id);
        assert!(t.click(id));
    }

    #[test]
    fn drag_disabled_is_inert() {
        let mut t = Toaster::new(ToastOptions {
            draggable: false,
            ..ToastOptions::default()
        });
        let id = t.push(ToastKind::Info, "fixed");
        t.drag_start(id, 0.0);
        t.drag_move(id, 1000.0);
        assert!(!t.drag_end(id));
        assert!(!t.is_empty());
    }

    #[test]
    fn clock_only_needed_for_timed_toasts() {
        let mut t = toaster();
        assert!(!t.needs_clock());
        let id = t.push(ToastKind::Info, "tick");
        assert!(t.needs_clock());
        t.dismiss(id);
        assert!(!t.needs_clock());

        let mut sticky = Toaster::new(ToastOptions {
            auto_close: None,
            ..ToastOptions::default()
        });
        sticky.push(ToastKind::Info, "stay");
        assert!(!sticky.needs_clock());
    }

    #[test]
    fn click_dismisses() {
        let mut t = toaster();
        let id = t.push(ToastKind::Info, "x");
        assert!(t.click(id));
        assert!(!t.click(id));

        let mut sticky = Toaster::new(ToastOptions {
            close_on_click: false,
            auto_close: None,
            ..ToastOptions::default()
        });
        let id = sticky.push(ToastKind::Info, "stay");
        assert!(!sticky.click(id));
        sticky.tick(Duration::from_secs(60));
        assert_eq!(sticky.progress(id), None);
        assert!(!sticky.is_empty());
    }
}
