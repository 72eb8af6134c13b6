#![forbid(unsafe_code)]

//! Canonical input/event types.
//!
//! Hosts translate their native pointer, touch, and keyboard signals into
//! these types before handing them to the slider engine. All events derive
//! `Clone` and `PartialEq` for use in tests and pattern matching.
//!
//! # Design Notes
//!
//! - Pointer coordinates are in the host's client space (the same space as
//!   the track bounds reported with [`TrackBounds`](crate::geometry::TrackBounds)).
//! - Mouse, touch, and pen share one [`PointerEvent`]; the engine follows a
//!   single-active-pointer model. Only the horizontal coordinate is carried.
//! - Touch contacts carry no button; mouse and pen must press `Primary`.
//! - Key targets are thumb indices; hosts resolve focus before dispatch.

use bitflags::bitflags;

/// Canonical slider input event.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Pointer pressed. `thumb` is the thumb element under the pointer, or
    /// `None` when the press landed on the track or elsewhere.
    PointerDown {
        thumb: Option<usize>,
        pointer: PointerEvent,
    },

    /// Pointer moved (delivered globally while a drag is captured).
    PointerMove(PointerEvent),

    /// Pointer released (delivered globally while a drag is captured).
    PointerUp(PointerEvent),

    /// The host aborted the pointer stream (touch cancel, lost capture).
    PointerCancel {
        /// `None` cancels whatever pointer is active.
        pointer_id: Option<u32>,
    },

    /// Key pressed while `thumb` has focus.
    Key { thumb: usize, key: KeyEvent },

    /// The widget or window lost focus.
    Blur,
}

/// Kind of device that produced a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PointerKind {
    #[default]
    Mouse,
    Touch,
    Pen,
}

/// Pointer button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PointerButton {
    /// Left mouse button, touch contact, or pen tip.
    #[default]
    Primary,
    /// Right mouse button or pen barrel button.
    Secondary,
    /// Middle mouse button.
    Auxiliary,
}

/// A pointer (mouse, touch, or pen) event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// Host-assigned pointer identity; stable for one press-move-release.
    pub pointer_id: u32,

    /// Device kind.
    pub kind: PointerKind,

    /// Button for press/release events.
    pub button: PointerButton,

    /// Horizontal client coordinate.
    pub client_x: f64,
}

impl PointerEvent {
    /// Create a primary-button mouse event at `client_x`.
    #[must_use]
    pub const fn new(pointer_id: u32, client_x: f64) -> Self {
        Self {
            pointer_id,
            kind: PointerKind::Mouse,
            button: PointerButton::Primary,
            client_x,
        }
    }

    /// Create a touch contact event.
    #[must_use]
    pub const fn touch(pointer_id: u32, client_x: f64) -> Self {
        Self {
            kind: PointerKind::Touch,
            ..Self::new(pointer_id, client_x)
        }
    }

    /// Create a pen contact event.
    #[must_use]
    pub const fn pen(pointer_id: u32, client_x: f64) -> Self {
        Self {
            kind: PointerKind::Pen,
            ..Self::new(pointer_id, client_x)
        }
    }

    /// Set the button.
    #[must_use]
    pub const fn with_button(mut self, button: PointerButton) -> Self {
        self.button = button;
        self
    }

    /// Whether this press may start a drag. Touch contacts always may;
    /// mouse and pen need the primary button.
    #[must_use]
    pub const fn starts_drag(&self) -> bool {
        matches!(self.kind, PointerKind::Touch)
            || matches!(self.button, PointerButton::Primary)
    }
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key code that was pressed.
    pub code: KeyCode,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,

    /// The type of key event (press, repeat, or release).
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// Create a new key event with default modifiers and Press kind.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
            kind: KeyEventKind::Press,
        }
    }

    /// Create a key event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Create a key event with a specific kind.
    #[must_use]
    pub const fn with_kind(mut self, kind: KeyEventKind) -> Self {
        self.kind = kind;
        self
    }

    /// True for press and auto-repeat, false for release.
    #[must_use]
    pub const fn is_press(&self) -> bool {
        matches!(self.kind, KeyEventKind::Press | KeyEventKind::Repeat)
    }

    /// Whether a host shortcut modifier (Ctrl, Alt, Super) is held.
    #[must_use]
    pub const fn has_shortcut_modifier(&self) -> bool {
        self.modifiers
            .intersects(Modifiers::CTRL.union(Modifiers::ALT).union(Modifiers::SUPER))
    }

    /// Whether Shift is held.
    #[must_use]
    pub const fn is_shifted(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT)
    }
}

/// Key codes the slider distinguishes. Everything else is `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
    Char(char),
    Other,
}

impl KeyCode {
    /// Map a DOM `KeyboardEvent.key` name.
    #[must_use]
    pub fn from_dom_key(key: &str) -> Self {
        match key {
            "ArrowLeft" => Self::Left,
            "ArrowRight" => Self::Right,
            "ArrowUp" => Self::Up,
            "ArrowDown" => Self::Down,
            "Home" => Self::Home,
            "End" => Self::End,
            "PageUp" => Self::PageUp,
            "PageDown" => Self::PageDown,
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::Char(c),
                    _ => Self::Other,
                }
            }
        }
    }
}

/// The type of key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyEventKind {
    /// Key was pressed (default when not distinguishable).
    #[default]
    Press,

    /// Key is being held (repeat event).
    Repeat,

    /// Key was released.
    Release,
}

bitflags! {
    /// Modifier keys held during an event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b0000;
        /// Shift key.
        const SHIFT = 0b0001;
        /// Alt/Option key.
        const ALT   = 0b0010;
        /// Control key.
        const CTRL  = 0b0100;
        /// Super/Meta/Command key.
        const SUPER = 0b1000;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}
