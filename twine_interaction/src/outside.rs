// Copyright 2025 the Twine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Outside-interaction detection.
//!
//! An owner registers the elements that count as "inside" it (its boundaries). When
//! a pointer press or a focus change lands outside every boundary, the registration
//! is *violated* and its owner gets a chance to react, typically by closing.
//!
//! Violations are reported innermost owner first, so that a nested popup reacts
//! before the popup containing it. An owner that calls
//! [`InputEvent::prevent_default`] suppresses the callbacks of the remaining owners;
//! [`run`] implements that contract.

use alloc::vec::Vec;

use smallvec::SmallVec;
use twine_dom::focusable::is_loosely_focusable;
use twine_dom::{Document, InputEvent, InputKind, NodeId};

bitflags::bitflags! {
    /// Which interactions a registration listens for.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Interest: u8 {
        /// Pointer presses outside the boundaries.
        const POINTER_DOWN = 0b01;
        /// Focus landing outside the boundaries.
        const FOCUS_IN     = 0b10;
    }
}

/// Handle to a registration.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct OutsideHandle(u64);

#[derive(Clone, Debug)]
struct Registration {
    handle: OutsideHandle,
    owner: NodeId,
    boundaries: SmallVec<[NodeId; 2]>,
    interest: Interest,
    /// Tie-break between owners at equal depth; higher is newer.
    raised: u64,
}

/// A registration whose boundaries did not contain the event target.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Violation {
    /// The registration.
    pub handle: OutsideHandle,
    /// Element that registered.
    pub owner: NodeId,
    /// Target of the interaction.
    pub target: NodeId,
    /// Whether the target will take focus by itself.
    pub loosely_focusable: bool,
}

/// Registry of outside-interaction listeners.
#[derive(Clone, Debug, Default)]
pub struct OutsideClicks {
    registrations: Vec<Registration>,
    next: u64,
}

impl OutsideClicks {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Listen for interactions outside `boundaries` on behalf of `owner`.
    pub fn register(
        &mut self,
        owner: NodeId,
        boundaries: &[NodeId],
        interest: Interest,
    ) -> OutsideHandle {
        self.next += 1;
        let handle = OutsideHandle(self.next);
        self.registrations.push(Registration {
            handle,
            owner,
            boundaries: boundaries.iter().copied().collect(),
            interest,
            raised: self.next,
        });
        handle
    }

    /// Move a registration ahead of every other owner at the same depth, as when
    /// its owner opens on top of its siblings.
    pub fn raise(&mut self, handle: OutsideHandle) {
        self.next += 1;
        let next = self.next;
        if let Some(r) = self.registrations.iter_mut().find(|r| r.handle == handle) {
            r.raised = next;
        }
    }

    /// Replace the boundaries of a registration.
    pub fn set_boundaries(&mut self, handle: OutsideHandle, boundaries: &[NodeId]) {
        if let Some(r) = self.registrations.iter_mut().find(|r| r.handle == handle) {
            r.boundaries = boundaries.iter().copied().collect();
        }
    }

    /// Stop listening. Returns `false` for stale handles.
    pub fn unregister(&mut self, handle: OutsideHandle) -> bool {
        let before = self.registrations.len();
        self.registrations.retain(|r| r.handle != handle);
        before != self.registrations.len()
    }

    /// Number of live registrations.
    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    /// Registrations violated by `event`, innermost owner first.
    ///
    /// Only `PointerDown` and `FocusIn` events are considered. Owners that are no
    /// longer connected are skipped. Owners at equal depth are ordered most recently
    /// registered or [raised](Self::raise) first.
    pub fn violations(&self, doc: &Document, event: &InputEvent) -> SmallVec<[Violation; 4]> {
        let wanted = match event.kind {
            InputKind::PointerDown => Interest::POINTER_DOWN,
            InputKind::FocusIn => Interest::FOCUS_IN,
            _ => return SmallVec::new(),
        };
        let target = event.target;
        let mut hits: SmallVec<[(usize, u64, Violation); 4]> = SmallVec::new();
        for r in &self.registrations {
            if !r.interest.contains(wanted) || !doc.is_connected(r.owner) {
                continue;
            }
            if r.boundaries.iter().any(|&b| doc.contains(b, target)) {
                continue;
            }
            hits.push((
                doc.depth(r.owner),
                r.raised,
                Violation {
                    handle: r.handle,
                    owner: r.owner,
                    target,
                    loosely_focusable: is_loosely_focusable(doc, target),
                },
            ));
        }
        hits.sort_by(|a, b| b.0.cmp(&a.0).then(b.1.cmp(&a.1)));
        hits.into_iter().map(|(_, _, v)| v).collect()
    }
}

/// Run `handler` for each violation until one prevents the default action.
pub fn run(
    violations: &[Violation],
    event: &mut InputEvent,
    mut handler: impl FnMut(&Violation, &mut InputEvent),
) {
    for v in violations {
        if event.is_default_prevented() {
            log::trace!("outside callbacks suppressed after {:?}", v.owner);
            break;
        }
        handler(v, event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn inner_owner_is_reported_first() {
        let mut doc = Document::new();
        let outer = doc.create_element("div");
        let inner = doc.create_element("div");
        let elsewhere = doc.create_element("p");
        doc.append_child(doc.body(), outer);
        doc.append_child(outer, inner);
        doc.append_child(doc.body(), elsewhere);

        let mut reg = OutsideClicks::new();
        let o = reg.register(outer, &[outer], Interest::all());
        let i = reg.register(inner, &[inner], Interest::all());

        let ev = InputEvent::new(InputKind::PointerDown, elsewhere);
        let order: Vec<_> = reg.violations(&doc, &ev).iter().map(|v| v.handle).collect();
        assert_eq!(order, vec![i, o]);

        // Inside `outer` but outside `inner`.
        let ev = InputEvent::new(InputKind::PointerDown, outer);
        let order: Vec<_> = reg.violations(&doc, &ev).iter().map(|v| v.handle).collect();
        assert_eq!(order, vec![i]);
    }

    #[test]
    fn prevent_default_suppresses_remaining_owners() {
        let mut doc = Document::new();
        let a = doc.create_element("div");
        let b = doc.create_element("div");
        doc.append_child(doc.body(), a);
        doc.append_child(doc.body(), b);
        let mut reg = OutsideClicks::new();
        reg.register(a, &[a], Interest::POINTER_DOWN);
        reg.register(b, &[b], Interest::POINTER_DOWN);

        let mut ev = InputEvent::new(InputKind::PointerDown, doc.body());
        let violations = reg.violations(&doc, &ev);
        assert_eq!(violations.len(), 2);
        let mut calls = 0;
        run(&violations, &mut ev, |_, ev| {
            calls += 1;
            ev.prevent_default();
        });
        assert_eq!(calls, 1);
    }

    #[test]
    fn raised_siblings_are_reported_first() {
        let mut doc = Document::new();
        let a = doc.create_element("div");
        let b = doc.create_element("div");
        doc.append_child(doc.body(), a);
        doc.append_child(doc.body(), b);
        let mut reg = OutsideClicks::new();
        let ha = reg.register(a, &[a], Interest::POINTER_DOWN);
        let hb = reg.register(b, &[b], Interest::POINTER_DOWN);

        let ev = InputEvent::new(InputKind::PointerDown, doc.body());
        let order: Vec<_> = reg.violations(&doc, &ev).iter().map(|v| v.handle).collect();
        assert_eq!(order, vec![hb, ha]);

        reg.raise(ha);
        let order: Vec<_> = reg.violations(&doc, &ev).iter().map(|v| v.handle).collect();
        assert_eq!(order, vec![ha, hb]);
    }

    #[test]
    fn interest_filters_event_kinds() {
        let mut doc = Document::new();
        let a = doc.create_element("div");
        doc.append_child(doc.body(), a);
        let mut reg = OutsideClicks::new();
        let h = reg.register(a, &[a], Interest::POINTER_DOWN);
        let ev = InputEvent::new(InputKind::FocusIn, doc.body());
        assert!(reg.violations(&doc, &ev).is_empty());
        assert!(reg.unregister(h));
        assert!(!reg.unregister(h));
    }
}
