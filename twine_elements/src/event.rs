// Copyright 2025 the Twine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Namespaced custom events.
//!
//! Every element announces its transitions as `<tag>:<kind>` events. The pre-events
//! ([`EventKind::Show`], [`EventKind::Hide`], [`EventKind::Change`]) are cancelable: a
//! listener that calls [`CustomEvent::prevent_default`] vetoes the transition. The
//! post-events are plain notifications.
//!
//! Listeners are attached to nodes. Emission visits the host first and then, for
//! bubbling events, each ancestor up to the root.

use alloc::boxed::Box;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use twine_dom::{Document, NodeId};

/// What a custom event announces.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// About to open. Cancelable.
    Show,
    /// Opened.
    Shown,
    /// About to close. Cancelable.
    Hide,
    /// Closed.
    Hidden,
    /// About to change value or selection. Cancelable.
    Change,
    /// Value, selection, or position changed.
    Changed,
}

impl EventKind {
    /// Event name suffix.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Show => "show",
            Self::Shown => "shown",
            Self::Hide => "hide",
            Self::Hidden => "hidden",
            Self::Change => "change",
            Self::Changed => "changed",
        }
    }

    /// Whether listeners may veto the transition.
    pub fn is_cancelable(self) -> bool {
        matches!(self, Self::Show | Self::Hide | Self::Change)
    }
}

/// A dispatched custom event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CustomEvent {
    /// Tag of the emitting element, such as `twc-dropdown`.
    pub element: &'static str,
    /// What happened.
    pub kind: EventKind,
    /// The emitting host.
    pub host: NodeId,
    /// `detail.relatedTarget`: the selected menu item, the visible tab panel, ...
    pub related_target: Option<NodeId>,
    /// Whether [`CustomEvent::prevent_default`] has any effect.
    pub cancelable: bool,
    /// Whether ancestors of the host see the event.
    pub bubbles: bool,
    default_prevented: bool,
}

impl CustomEvent {
    /// A fresh event; cancelability follows the kind.
    pub fn new(element: &'static str, kind: EventKind, host: NodeId, bubbles: bool) -> Self {
        Self {
            element,
            kind,
            host,
            related_target: None,
            cancelable: kind.is_cancelable(),
            bubbles,
            default_prevented: false,
        }
    }

    /// Attach `detail.relatedTarget`.
    #[must_use]
    pub fn with_related_target(mut self, related: Option<NodeId>) -> Self {
        self.related_target = related;
        self
    }

    /// Namespaced name, such as `twc-dropdown:changed`.
    pub fn name(&self) -> String {
        format!("{}:{}", self.element, self.kind.as_str())
    }

    /// Whether this event is called `name`.
    pub fn is_named(&self, name: &str) -> bool {
        name.split_once(':')
            .is_some_and(|(e, k)| e == self.element && k == self.kind.as_str())
    }

    /// Veto the transition. Ignored for notifications.
    pub fn prevent_default(&mut self) {
        if self.cancelable {
            self.default_prevented = true;
        }
    }

    /// Whether a listener vetoed the transition.
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Handle to a listener.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Listener callback.
pub type Listener = Box<dyn FnMut(&mut CustomEvent)>;

struct Entry {
    id: ListenerId,
    node: NodeId,
    name: String,
    callback: Listener,
}

/// Listener registry plus a log of every emitted event.
#[derive(Default)]
pub struct EventBus {
    listeners: Vec<Entry>,
    log: Vec<CustomEvent>,
    next: u64,
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .field("log", &self.log)
            .finish_non_exhaustive()
    }
}

impl EventBus {
    /// Create an empty bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Call `callback` for events named `name` reaching `node`.
    pub fn listen(&mut self, node: NodeId, name: &str, callback: Listener) -> ListenerId {
        self.next += 1;
        let id = ListenerId(self.next);
        self.listeners.push(Entry {
            id,
            node,
            name: name.into(),
            callback,
        });
        id
    }

    /// Remove a listener. Returns `false` for unknown ids.
    pub fn unlisten(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|e| e.id != id);
        before != self.listeners.len()
    }

    /// Dispatch `event` and return it with any veto applied.
    pub fn emit(&mut self, doc: &Document, mut event: CustomEvent) -> CustomEvent {
        log::trace!("emit {} on {:?}", event.name(), event.host);
        let path: Vec<NodeId> = if event.bubbles {
            doc.ancestors(event.host).collect()
        } else {
            alloc::vec![event.host]
        };
        for node in path {
            for entry in self.listeners.iter_mut().filter(|e| e.node == node) {
                if event.is_named(&entry.name) {
                    (entry.callback)(&mut event);
                }
            }
        }
        self.log.push(event.clone());
        event
    }

    /// Events emitted so far, in order.
    pub fn events(&self) -> &[CustomEvent] {
        &self.log
    }

    /// Drain the event log.
    pub fn take_events(&mut self) -> Vec<CustomEvent> {
        core::mem::take(&mut self.log)
    }
}
