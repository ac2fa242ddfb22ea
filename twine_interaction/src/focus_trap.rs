// Copyright 2025 the Twine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Focus traps: keep sequential navigation inside a container while it is open.
//!
//! Traps form a stack. Each one remembers the element that was focused when it was
//! acquired; [`FocusTraps::release`] hands focus back to it, while
//! [`FocusTraps::dismiss`] lets focus stay wherever the user put it.

use alloc::vec::Vec;
use core::iter;

use twine_dom::focusable::{is_focusable, tabbable_descendants};
use twine_dom::{Document, InputEvent, Key, Modifiers, NodeId};

/// Handle to an acquired trap.
///
/// Handles are plain values. Releasing a handle twice, or releasing a handle whose
/// trap was already dismissed, is a no-op.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct FocusTrapHandle(u64);

#[derive(Clone, Debug)]
struct Trap {
    handle: FocusTrapHandle,
    container: NodeId,
    restore: Option<NodeId>,
}

/// Stack of active focus traps.
#[derive(Clone, Debug, Default)]
pub struct FocusTraps {
    traps: Vec<Trap>,
    next: u64,
}

/// Where focus lands when a trap is acquired on `container`.
///
/// The first element carrying `autofocus` (the container included), then the first
/// tabbable descendant, then the container itself.
pub fn initial_focus(doc: &Document, container: NodeId) -> Option<NodeId> {
    iter::once(container)
        .chain(doc.descendants(container))
        .find(|&n| doc.has_attribute(n, "autofocus") && is_focusable(doc, n))
        .or_else(|| tabbable_descendants(doc, container).first().copied())
        .or_else(|| is_focusable(doc, container).then_some(container))
}

impl FocusTraps {
    /// Create an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Trap focus inside `container` and move focus to its [`initial_focus`].
    pub fn acquire(&mut self, doc: &mut Document, container: NodeId) -> FocusTrapHandle {
        self.next += 1;
        let handle = FocusTrapHandle(self.next);
        let restore = doc.active_element();
        self.traps.push(Trap {
            handle,
            container,
            restore,
        });
        if let Some(target) = initial_focus(doc, container) {
            doc.focus(target);
        }
        log::debug!("focus trap {handle:?} acquired on {container:?}, restore {restore:?}");
        handle
    }

    fn take(&mut self, handle: FocusTrapHandle) -> Option<Trap> {
        let at = self.traps.iter().position(|t| t.handle == handle)?;
        Some(self.traps.remove(at))
    }

    /// Drop the trap and return focus to the element focused before it was acquired.
    ///
    /// When that element is gone, or nothing was focused, focus is left where it is.
    /// Returns `false` for stale handles.
    pub fn release(&mut self, doc: &mut Document, handle: FocusTrapHandle) -> bool {
        let Some(trap) = self.take(handle) else {
            return false;
        };
        log::debug!("focus trap {handle:?} released");
        if let Some(restore) = trap.restore.filter(|&r| doc.is_connected(r)) {
            doc.focus(restore);
        }
        true
    }

    /// Drop the trap without moving focus. Returns `false` for stale handles.
    pub fn dismiss(&mut self, handle: FocusTrapHandle) -> bool {
        let dismissed = self.take(handle).is_some();
        if dismissed {
            log::debug!("focus trap {handle:?} dismissed");
        }
        dismissed
    }

    /// Whether the handle still refers to an active trap.
    pub fn is_active(&self, handle: FocusTrapHandle) -> bool {
        self.traps.iter().any(|t| t.handle == handle)
    }

    /// Container of an active trap.
    pub fn container(&self, handle: FocusTrapHandle) -> Option<NodeId> {
        self.traps
            .iter()
            .find(|t| t.handle == handle)
            .map(|t| t.container)
    }

    /// Number of active traps.
    pub fn len(&self) -> usize {
        self.traps.len()
    }

    /// Whether no trap is active.
    pub fn is_empty(&self) -> bool {
        self.traps.is_empty()
    }

    /// Cycle Tab/Shift+Tab within the innermost trap that holds focus.
    ///
    /// Returns `true` (and prevents the default action) when the key was handled.
    pub fn handle_key(&self, doc: &mut Document, event: &mut InputEvent) -> bool {
        if event.pressed_key() != Some(Key::Tab) {
            return false;
        }
        let Some(active) = doc.active_element() else {
            return false;
        };
        let Some(trap) = self
            .traps
            .iter()
            .rev()
            .find(|t| doc.contains(t.container, active))
        else {
            return false;
        };
        event.prevent_default();

        let order = tabbable_descendants(doc, trap.container);
        if order.is_empty() {
            return true;
        }
        let backwards = event.modifiers().contains(Modifiers::SHIFT);
        let next = match order.iter().position(|&n| n == active) {
            Some(i) if backwards => order[(i + order.len() - 1) % order.len()],
            Some(i) => order[(i + 1) % order.len()],
            None if backwards => order[order.len() - 1],
            None => order[0],
        };
        doc.focus(next);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (Document, NodeId, NodeId, NodeId, NodeId) {
        let mut doc = Document::new();
        let opener = doc.create_element("button");
        let panel = doc.create_element("div");
        let first = doc.create_element("button");
        let last = doc.create_element("input");
        doc.append_child(doc.body(), opener);
        doc.append_child(doc.body(), panel);
        doc.append_child(panel, first);
        doc.append_child(panel, last);
        (doc, opener, panel, first, last)
    }

    #[test]
    fn acquire_focuses_first_tabbable_and_release_restores() {
        let (mut doc, opener, panel, first, _) = setup();
        doc.focus(opener);
        let mut traps = FocusTraps::new();
        let h = traps.acquire(&mut doc, panel);
        assert_eq!(doc.active_element(), Some(first));
        assert!(traps.release(&mut doc, h));
        assert_eq!(doc.active_element(), Some(opener));
        assert!(!traps.release(&mut doc, h), "second release is a no-op");
    }

    #[test]
    fn autofocus_wins_over_document_order() {
        let (mut doc, _, panel, _, last) = setup();
        doc.set_attribute(last, "autofocus", "");
        let mut traps = FocusTraps::new();
        let _h = traps.acquire(&mut doc, panel);
        assert_eq!(doc.active_element(), Some(last));
    }

    #[test]
    fn tab_wraps_in_both_directions() {
        let (mut doc, _, panel, first, last) = setup();
        let mut traps = FocusTraps::new();
        let _h = traps.acquire(&mut doc, panel);
        doc.focus(last);

        let mut tab = InputEvent::key(Key::Tab, last);
        assert!(traps.handle_key(&mut doc, &mut tab));
        assert!(tab.is_default_prevented());
        assert_eq!(doc.active_element(), Some(first));

        let mut back = InputEvent::new(
            twine_dom::InputKind::KeyDown {
                key: Key::Tab,
                modifiers: Modifiers::SHIFT,
            },
            first,
        );
        traps.handle_key(&mut doc, &mut back);
        assert_eq!(doc.active_element(), Some(last));
    }

    #[test]
    fn dismiss_leaves_focus_alone() {
        let (mut doc, opener, panel, _, _) = setup();
        doc.focus(opener);
        let mut traps = FocusTraps::new();
        let h = traps.acquire(&mut doc, panel);
        let outside = doc.create_element("a");
        doc.set_attribute(outside, "href", "#");
        doc.append_child(doc.body(), outside);
        doc.focus(outside);
        assert!(traps.dismiss(h));
        assert_eq!(doc.active_element(), Some(outside));
        assert!(traps.is_empty());
    }

    #[test]
    fn removed_restore_target_leaves_focus_in_place() {
        let (mut doc, opener, panel, first, _) = setup();
        doc.focus(opener);
        let mut traps = FocusTraps::new();
        let h = traps.acquire(&mut doc, panel);
        assert_eq!(doc.active_element(), Some(first));
        doc.remove(opener);
        assert!(traps.release(&mut doc, h));
        assert_eq!(doc.active_element(), Some(first));
    }

    #[test]
    fn release_without_restore_target_leaves_focus_in_place() {
        let (mut doc, _, panel, first, _) = setup();
        let mut traps = FocusTraps::new();
        let h = traps.acquire(&mut doc, panel);
        assert_eq!(doc.active_element(), Some(first));
        assert!(traps.release(&mut doc, h));
        assert_eq!(doc.active_element(), Some(first));
    }
}
