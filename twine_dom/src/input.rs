// Copyright 2025 the Twine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input vocabulary: keys, modifiers, and routed input events.

use kurbo::Point;

use crate::node::NodeId;

/// Keys the widgets react to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// `Escape`
    Escape,
    /// `Enter`
    Enter,
    /// The space bar (`" "`).
    Space,
    /// `Tab`
    Tab,
    /// `ArrowUp`
    ArrowUp,
    /// `ArrowDown`
    ArrowDown,
    /// `ArrowLeft`
    ArrowLeft,
    /// `ArrowRight`
    ArrowRight,
    /// `Home`
    Home,
    /// `End`
    End,
    /// Any other printable key.
    Character(char),
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value to a [`Key`].
    ///
    /// Returns `None` for named keys the widgets never react to (`Shift`, `F1`, ...).
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "Escape" | "Esc" => Self::Escape,
            "Enter" => Self::Enter,
            " " | "Spacebar" => Self::Space,
            "Tab" => Self::Tab,
            "ArrowUp" => Self::ArrowUp,
            "ArrowDown" => Self::ArrowDown,
            "ArrowLeft" => Self::ArrowLeft,
            "ArrowRight" => Self::ArrowRight,
            "Home" => Self::Home,
            "End" => Self::End,
            other => {
                let mut chars = other.chars();
                let c = chars.next()?;
                if chars.next().is_some() {
                    return None;
                }
                Self::Character(c)
            }
        })
    }
}

bitflags::bitflags! {
    /// Keyboard modifiers held during a key press.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Shift
        const SHIFT   = 0b0000_0001;
        /// Control
        const CONTROL = 0b0000_0010;
        /// Alt / Option
        const ALT     = 0b0000_0100;
        /// Meta / Command
        const META    = 0b0000_1000;
    }
}

/// What happened.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputKind {
    /// Pointer pressed (`pointerdown` + `mousedown`).
    PointerDown,
    /// Pointer released (`pointerup` + `mouseup`).
    PointerUp,
    /// Pointer moved over the target.
    PointerMove,
    /// Pointer left the target. Does not bubble.
    PointerLeave,
    /// Activation (`click`).
    Click,
    /// Key pressed while the target had focus.
    KeyDown {
        /// The key.
        key: Key,
        /// Held modifiers.
        modifiers: Modifiers,
    },
    /// The target gained focus. Does not bubble.
    Focus,
    /// The target lost focus. Does not bubble.
    Blur,
    /// The target gained focus (bubbling form).
    FocusIn,
}

impl InputKind {
    /// Whether events of this kind bubble to ancestors.
    pub fn bubbles(self) -> bool {
        !matches!(self, Self::PointerLeave | Self::Focus | Self::Blur)
    }
}

/// A routed input event.
///
/// Handlers flag cancelation on the event itself; the runtime checks
/// [`InputEvent::is_default_prevented`] before running the default action and
/// [`InputEvent::is_propagation_stopped`] between handlers.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct InputEvent {
    /// What happened.
    pub kind: InputKind,
    /// Innermost element the event is aimed at.
    pub target: NodeId,
    /// Pointer position in viewport coordinates, for pointer events.
    pub position: Option<Point>,
    /// Element on the other side of a focus change.
    pub related_target: Option<NodeId>,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl InputEvent {
    /// Create an event aimed at `target`.
    pub fn new(kind: InputKind, target: NodeId) -> Self {
        Self {
            kind,
            target,
            position: None,
            related_target: None,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    /// Key press without modifiers.
    pub fn key(key: Key, target: NodeId) -> Self {
        Self::new(
            InputKind::KeyDown {
                key,
                modifiers: Modifiers::empty(),
            },
            target,
        )
    }

    /// Attach a pointer position.
    #[must_use]
    pub fn with_position(mut self, position: Point) -> Self {
        self.position = Some(position);
        self
    }

    /// Attach the related target of a focus change.
    #[must_use]
    pub fn with_related_target(mut self, related: Option<NodeId>) -> Self {
        self.related_target = related;
        self
    }

    /// The pressed key, for key events.
    pub fn pressed_key(&self) -> Option<Key> {
        match self.kind {
            InputKind::KeyDown { key, .. } => Some(key),
            _ => None,
        }
    }

    /// Held modifiers, empty for non-key events.
    pub fn modifiers(&self) -> Modifiers {
        match self.kind {
            InputKind::KeyDown { modifiers, .. } => modifiers,
            _ => Modifiers::empty(),
        }
    }

    /// Suppress the default action.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Whether a handler suppressed the default action.
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Stop the event from reaching outer handlers.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Whether a handler stopped propagation.
    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}
