// Copyright 2025 the Twine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! State shared by every mounted element.

use alloc::boxed::Box;
use alloc::collections::VecDeque;
use alloc::string::{String, ToString};
use core::fmt;

use hashbrown::HashMap;
use twine_dom::{Document, InputEvent, InputKind, NodeId};
use twine_floating::{Positioner, Solver};
use twine_interaction::{FocusTraps, IdGenerator, OutsideClicks, ScrollLock, StackingRegistry};

use crate::config::UiConfig;
use crate::disclosure::Disclosure;
use crate::event::{CustomEvent, EventBus};
use crate::widgets::floating_panel::FloatingState;

/// The document plus the services widgets share.
///
/// Widgets never own each other: a popover closing a nested one goes through the
/// disclosure table here, not through the nested widget.
pub(crate) struct Context {
    pub(crate) doc: Document,
    pub(crate) config: UiConfig,
    pub(crate) ids: IdGenerator,
    pub(crate) traps: FocusTraps,
    pub(crate) outside: OutsideClicks,
    pub(crate) scroll_lock: ScrollLock,
    pub(crate) stacking: StackingRegistry,
    pub(crate) events: EventBus,
    pub(crate) disclosures: HashMap<NodeId, Disclosure>,
    pub(crate) floating: HashMap<NodeId, FloatingState>,
    pub(crate) positioner: Box<dyn Positioner>,
    pub(crate) pending: VecDeque<InputEvent>,
    pub(crate) frame: u64,
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("doc", &self.doc)
            .field("config", &self.config)
            .field("traps", &self.traps)
            .field("outside", &self.outside)
            .field("scroll_lock", &self.scroll_lock)
            .field("stacking", &self.stacking)
            .field("disclosures", &self.disclosures.len())
            .field("floating", &self.floating.len())
            .field("pending", &self.pending)
            .field("frame", &self.frame)
            .finish_non_exhaustive()
    }
}

impl Context {
    pub(crate) fn new(doc: Document, config: UiConfig) -> Self {
        Self {
            ids: IdGenerator::new(&config.id_prefix),
            doc,
            config,
            traps: FocusTraps::new(),
            outside: OutsideClicks::new(),
            scroll_lock: ScrollLock::new(),
            stacking: StackingRegistry::new(),
            events: EventBus::new(),
            disclosures: HashMap::new(),
            floating: HashMap::new(),
            positioner: Box::new(Solver),
            pending: VecDeque::new(),
            frame: 0,
        }
    }

    pub(crate) fn emit(&mut self, event: CustomEvent) -> CustomEvent {
        self.events.emit(&self.doc, event)
    }

    /// Queue a synthetic click, processed after the current event.
    pub(crate) fn queue_click(&mut self, target: NodeId) {
        self.pending
            .push_back(InputEvent::new(InputKind::Click, target));
    }

    /// The element's id, generating one if it has none.
    pub(crate) fn ensure_id(&mut self, node: NodeId) -> String {
        match self.doc.attribute(node, "id") {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => {
                let id = self.ids.next_id();
                self.doc.set_attribute(node, "id", &id);
                id
            }
        }
    }

    /// Point `attribute` on `from` at the id of `to`.
    pub(crate) fn link(&mut self, from: NodeId, attribute: &str, to: NodeId) {
        let id = self.ensure_id(to);
        self.doc.set_attribute(from, attribute, &id);
    }
}
