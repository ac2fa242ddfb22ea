// Copyright 2025 the Twine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The open/closed state machine shared by accordion, dialog, dropdown, popover,
//! and tooltip.
//!
//! Each widget describes itself with a static [`Capabilities`] record (which side
//! resources it holds while open, how it reacts to outside interactions, how it
//! mirrors state into attributes) and registers a [`Disclosure`] per host. The
//! transitions below are the only code that flips `open`.
//!
//! Show, in order:
//!
//! 1. No-op when already open.
//! 2. Cancelable `show` event, for user-driven transitions.
//! 3. Close unrelated open instances (stacking widgets only).
//! 4. Flip to open, reflect the host `open` attribute, sync attributes.
//! 5. Acquire the focus trap and scroll lock, join the stacking registry.
//! 6. Activate the nested floating panel.
//! 7. `shown` event, for user-driven transitions.
//!
//! Hide mirrors it, closing nested stacked instances first and restoring focus.
//! Cascaded closes drop their trap without restoring focus.

use core::fmt;

use twine_dom::{Document, InputEvent, InputKind, NodeId};
use twine_interaction::{
    FocusTrapHandle, Interest, OutsideHandle, ScrollLockToken, Violation,
};

use crate::context::Context;
use crate::event::{CustomEvent, EventKind};
use crate::widgets::floating_panel;

/// When a focus trap is held.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum TrapPolicy {
    Never,
    /// Only when a user interaction opened the instance.
    UserDriven,
    Always,
}

/// Reaction to pointer presses and focus landing outside the instance.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum OutsidePolicy {
    Ignore,
    /// Close; presses on non-focusable targets also refocus the trigger.
    Dismissable,
    /// Close on presses and swallow them so outer instances stay open.
    Modal,
}

/// Static description of a disclosure widget.
pub(crate) struct Capabilities {
    pub(crate) element: &'static str,
    pub(crate) trap: TrapPolicy,
    pub(crate) scroll_lock: bool,
    pub(crate) stacking: bool,
    pub(crate) outside: OutsidePolicy,
    pub(crate) refocus_trigger: bool,
    pub(crate) bubbles: bool,
    /// Mirror `open` into attributes on the host, trigger, and panel.
    pub(crate) sync: fn(&mut Document, &Disclosure),
    pub(crate) on_hide: Option<fn(&mut Document, &Disclosure)>,
}

impl fmt::Debug for Capabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Capabilities")
            .field("element", &self.element)
            .field("trap", &self.trap)
            .field("scroll_lock", &self.scroll_lock)
            .field("stacking", &self.stacking)
            .field("outside", &self.outside)
            .field("refocus_trigger", &self.refocus_trigger)
            .field("bubbles", &self.bubbles)
            .finish_non_exhaustive()
    }
}

/// Per-host disclosure state.
#[derive(Copy, Clone, Debug)]
pub(crate) struct Disclosure {
    pub(crate) caps: &'static Capabilities,
    pub(crate) host: NodeId,
    pub(crate) trigger: Option<NodeId>,
    /// Trap container and outside boundary.
    pub(crate) panel: NodeId,
    pub(crate) open: bool,
    trap: Option<FocusTrapHandle>,
    lock: Option<ScrollLockToken>,
    outside: Option<OutsideHandle>,
}

/// What caused a transition.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Origin {
    /// A user interaction. Emits events, traps focus, refocuses the trigger.
    User,
    /// Focus or a press moved elsewhere. Emits events, leaves focus alone.
    Dismiss,
    /// A property or method call. Silent.
    Programmatic,
    /// A related instance opened or closed. Silent.
    Cascade,
}

impl Origin {
    fn emits(self) -> bool {
        matches!(self, Self::User | Self::Dismiss)
    }
}

/// Register a disclosure for `host`. Opens it silently when the host carries `open`.
pub(crate) fn register(
    cx: &mut Context,
    caps: &'static Capabilities,
    host: NodeId,
    trigger: Option<NodeId>,
    panel: NodeId,
) {
    let outside = match caps.outside {
        OutsidePolicy::Ignore => None,
        OutsidePolicy::Modal => Some(cx.outside.register(host, &[panel], Interest::POINTER_DOWN)),
        OutsidePolicy::Dismissable => {
            let mut boundaries = smallvec::SmallVec::<[NodeId; 2]>::new();
            boundaries.extend(trigger);
            boundaries.push(panel);
            Some(cx.outside.register(host, &boundaries, Interest::all()))
        }
    };
    let disclosure = Disclosure {
        caps,
        host,
        trigger,
        panel,
        open: false,
        trap: None,
        lock: None,
        outside,
    };
    cx.disclosures.insert(host, disclosure);
    (caps.sync)(&mut cx.doc, &disclosure);
    if cx.doc.has_attribute(host, "open") {
        show(cx, host, Origin::Programmatic);
    }
}

/// Close silently and drop the registration.
pub(crate) fn unregister(cx: &mut Context, host: NodeId) {
    hide(cx, host, Origin::Programmatic);
    if let Some(d) = cx.disclosures.remove(&host) {
        if let Some(handle) = d.outside {
            cx.outside.unregister(handle);
        }
        cx.stacking.remove(host);
    }
}

pub(crate) fn is_open(cx: &Context, host: NodeId) -> bool {
    cx.disclosures.get(&host).is_some_and(|d| d.open)
}

fn nested_floating_panel(cx: &Context, host: NodeId) -> Option<NodeId> {
    cx.doc
        .elements_by_tag(host, floating_panel::TAG)
        .find(|n| cx.floating.contains_key(n))
}

/// Open `host`. Returns `true` when it transitioned.
pub(crate) fn show(cx: &mut Context, host: NodeId, origin: Origin) -> bool {
    let Some(&d) = cx.disclosures.get(&host) else {
        return false;
    };
    if d.open {
        return false;
    }
    let caps = d.caps;
    if origin.emits()
        && cx
            .emit(CustomEvent::new(caps.element, EventKind::Show, host, caps.bubbles))
            .is_default_prevented()
    {
        log::debug!("{} {host:?}: show canceled", caps.element);
        return false;
    }
    if caps.stacking {
        for other in cx.stacking.unrelated(&cx.doc, host) {
            hide(cx, other, Origin::Cascade);
        }
    }

    let trap = match caps.trap {
        TrapPolicy::Always => true,
        TrapPolicy::UserDriven => origin == Origin::User,
        TrapPolicy::Never => false,
    };
    let mut d = d;
    d.open = true;
    cx.doc.set_attribute(host, "open", "");
    (caps.sync)(&mut cx.doc, &d);
    if trap {
        d.trap = Some(cx.traps.acquire(&mut cx.doc, d.panel));
    }
    if caps.scroll_lock {
        d.lock = Some(cx.scroll_lock.acquire(&mut cx.doc));
    }
    if let Some(handle) = d.outside {
        cx.outside.raise(handle);
    }
    cx.disclosures.insert(host, d);
    if caps.stacking {
        cx.stacking.insert(host);
    }
    log::debug!("{} {host:?} opened ({origin:?})", caps.element);

    if let Some(panel) = nested_floating_panel(cx, host) {
        floating_panel::set_active(cx, panel, true);
    }
    if origin.emits() {
        cx.emit(CustomEvent::new(caps.element, EventKind::Shown, host, caps.bubbles));
    }
    true
}

/// Close `host`. Returns `true` when it transitioned.
pub(crate) fn hide(cx: &mut Context, host: NodeId, origin: Origin) -> bool {
    let Some(&d) = cx.disclosures.get(&host) else {
        return false;
    };
    if !d.open {
        return false;
    }
    let caps = d.caps;
    if origin.emits()
        && cx
            .emit(CustomEvent::new(caps.element, EventKind::Hide, host, caps.bubbles))
            .is_default_prevented()
    {
        log::debug!("{} {host:?}: hide canceled", caps.element);
        return false;
    }
    if caps.stacking {
        for nested in cx.stacking.nested_in(&cx.doc, host) {
            hide(cx, nested, Origin::Cascade);
        }
    }

    let mut d = d;
    d.open = false;
    let trap = d.trap.take();
    let lock = d.lock.take();
    cx.disclosures.insert(host, d);
    cx.doc.remove_attribute(host, "open");
    (caps.sync)(&mut cx.doc, &d);
    if let Some(on_hide) = caps.on_hide {
        on_hide(&mut cx.doc, &d);
    }
    if let Some(trap) = trap {
        match origin {
            Origin::Dismiss => {
                cx.traps.dismiss(trap);
            }
            // The instance that caused the cascade owns focus now.
            Origin::Cascade => {
                cx.traps.dismiss(trap);
                if cx
                    .doc
                    .active_element()
                    .is_some_and(|a| cx.doc.contains(d.panel, a))
                {
                    cx.doc.blur();
                }
            }
            Origin::User | Origin::Programmatic => {
                cx.traps.release(&mut cx.doc, trap);
            }
        }
    }
    if origin == Origin::User && caps.refocus_trigger {
        if let Some(trigger) = d.trigger {
            cx.doc.focus(trigger);
        }
    }
    if let Some(lock) = lock {
        cx.scroll_lock.release(&mut cx.doc, lock);
    }
    cx.stacking.remove(host);
    log::debug!("{} {host:?} closed ({origin:?})", caps.element);

    if let Some(panel) = nested_floating_panel(cx, host) {
        floating_panel::set_active(cx, panel, false);
    }
    if origin.emits() {
        cx.emit(CustomEvent::new(caps.element, EventKind::Hidden, host, caps.bubbles));
    }
    true
}

/// Flip `host`.
pub(crate) fn toggle(cx: &mut Context, host: NodeId, origin: Origin) -> bool {
    if is_open(cx, host) {
        hide(cx, host, origin)
    } else {
        show(cx, host, origin)
    }
}

/// React to an outside interaction reported for `violation.owner`.
pub(crate) fn on_outside(cx: &mut Context, violation: &Violation, event: &mut InputEvent) {
    let host = violation.owner;
    let Some(d) = cx.disclosures.get(&host) else {
        return;
    };
    if !d.open {
        return;
    }
    match (d.caps.outside, event.kind) {
        (OutsidePolicy::Modal, InputKind::PointerDown) => {
            event.prevent_default();
            hide(cx, host, Origin::User);
        }
        (OutsidePolicy::Dismissable, InputKind::FocusIn) => {
            hide(cx, host, Origin::Dismiss);
        }
        (OutsidePolicy::Dismissable, InputKind::PointerDown) => {
            if violation.loosely_focusable {
                // The press moves focus by itself.
                hide(cx, host, Origin::Dismiss);
            } else if hide(cx, host, Origin::User) {
                event.prevent_default();
            }
        }
        _ => {}
    }
}
