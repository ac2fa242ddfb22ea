// Copyright 2025 the Twine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `twc-dropdown`: a menu button.
//!
//! Targets: `trigger`, `menu`, and any number of `menuItems`. Items are looked up
//! again on every interaction, so items added or removed while the menu exists
//! are picked up.

use twine_dom::focusable::is_disabled;
use twine_dom::{Document, InputEvent, InputKind, Key, NodeId};
use twine_interaction::roving::STATE_ATTRIBUTE;
use twine_interaction::{Direction, Marker, RovingList};

use crate::binding;
use crate::context::Context;
use crate::disclosure::{self, Capabilities, Disclosure, Origin, OutsidePolicy, TrapPolicy};
use crate::error::ElementError;
use crate::event::{CustomEvent, EventKind};

pub(crate) const TAG: &str = "twc-dropdown";

fn sync(doc: &mut Document, d: &Disclosure) {
    let state = if d.open { "open" } else { "" };
    if let Some(trigger) = d.trigger {
        doc.set_attribute(trigger, "aria-expanded", if d.open { "true" } else { "false" });
        doc.set_attribute(trigger, STATE_ATTRIBUTE, state);
    }
    doc.set_attribute(d.panel, STATE_ATTRIBUTE, state);
}

fn on_hide(doc: &mut Document, d: &Disclosure) {
    menu_items(doc, d.host, d.panel).deactivate_all(doc);
}

static CAPABILITIES: Capabilities = Capabilities {
    element: TAG,
    trap: TrapPolicy::UserDriven,
    scroll_lock: false,
    stacking: false,
    outside: OutsidePolicy::Dismissable,
    refocus_trigger: true,
    bubbles: true,
    sync,
    on_hide: Some(on_hide),
};

fn menu_items(doc: &Document, host: NodeId, menu: NodeId) -> RovingList {
    let mut list = RovingList::new(menu, Marker::Active)
        .with_reference("aria-activedescendant")
        .with_scroll(true);
    list.set_items(binding::targets(doc, host, TAG, "menuItems"));
    list
}

#[derive(Debug)]
pub(crate) struct Dropdown {
    host: NodeId,
    trigger: NodeId,
    menu: NodeId,
}

impl Dropdown {
    pub(crate) fn connect(cx: &mut Context, host: NodeId) -> Result<Self, ElementError> {
        let trigger = binding::require_target(&cx.doc, host, TAG, "trigger")?;
        let menu = binding::require_target(&cx.doc, host, TAG, "menu")?;

        cx.doc.set_attribute(trigger, "aria-haspopup", "menu");
        cx.doc.set_attribute(trigger, "aria-expanded", "false");
        cx.doc.set_attribute(trigger, STATE_ATTRIBUTE, "");
        cx.ensure_id(trigger);

        cx.doc.set_attribute(menu, "autofocus", "");
        cx.doc.set_attribute(menu, "role", "menu");
        cx.doc.set_attribute(menu, "tabindex", "-1");
        cx.doc.set_attribute(menu, STATE_ATTRIBUTE, "");
        cx.ensure_id(menu);

        for item in binding::targets(&cx.doc, host, TAG, "menuItems") {
            cx.doc.set_attribute(item, "role", "menuitem");
            cx.doc.set_attribute(item, "tabindex", "-1");
            cx.doc.set_attribute(item, STATE_ATTRIBUTE, "");
            cx.ensure_id(item);
        }
        cx.link(trigger, "aria-controls", menu);
        cx.link(menu, "aria-labelledby", trigger);

        disclosure::register(cx, &CAPABILITIES, host, Some(trigger), menu);
        Ok(Self {
            host,
            trigger,
            menu,
        })
    }

    fn items(&self, doc: &Document) -> RovingList {
        menu_items(doc, self.host, self.menu)
    }

    pub(crate) fn active_item(&self, doc: &Document) -> Option<NodeId> {
        self.items(doc).marked(doc)
    }

    pub(crate) fn is_item_active(&self, doc: &Document, item: NodeId) -> bool {
        let items = self.items(doc);
        items.contains(item) && items.is_marked(doc, item)
    }

    /// Mark `item` active. Items that are not part of this menu are ignored.
    pub(crate) fn activate_item(&self, doc: &mut Document, item: NodeId) {
        let items = self.items(doc);
        if items.contains(item) {
            items.activate(doc, item);
        }
    }

    pub(crate) fn deactivate_all(&self, doc: &mut Document) {
        self.items(doc).deactivate_all(doc);
    }

    /// Open from the keyboard and activate the first or last enabled item.
    fn open_at(&self, cx: &mut Context, direction: Direction) {
        if !disclosure::show(cx, self.host, Origin::User) {
            return;
        }
        let items = self.items(&cx.doc);
        let item = match direction {
            Direction::Next => items.first(&cx.doc),
            Direction::Previous => items.last(&cx.doc),
        };
        if let Some(item) = item {
            items.activate(&mut cx.doc, item);
        }
    }

    pub(crate) fn handle_input(&mut self, cx: &mut Context, event: &mut InputEvent) {
        match event.kind {
            InputKind::Click => {
                if cx.doc.contains(self.trigger, event.target) {
                    disclosure::toggle(cx, self.host, Origin::User);
                } else if cx.doc.contains(self.menu, event.target) {
                    self.menu_click(cx, event);
                }
            }
            InputKind::KeyDown { key, .. } => self.key_down(cx, event, key),
            InputKind::PointerMove => {
                let items = self.items(&cx.doc);
                let Some(item) = cx.doc.closest(event.target, |n| items.contains(n)) else {
                    return;
                };
                if items.is_marked(&cx.doc, item) {
                    return;
                }
                if is_disabled(&cx.doc, item) {
                    items.deactivate_all(&mut cx.doc);
                } else {
                    items.activate(&mut cx.doc, item);
                }
            }
            InputKind::PointerLeave => {
                let items = self.items(&cx.doc);
                if items.contains(event.target) {
                    items.deactivate(&mut cx.doc, event.target);
                }
            }
            _ => {}
        }
    }

    fn menu_click(&mut self, cx: &mut Context, event: &mut InputEvent) {
        cx.doc.focus(self.menu);
        let items = self.items(&cx.doc);
        let Some(item) = cx.doc.closest(event.target, |n| items.contains(n)) else {
            return;
        };
        if is_disabled(&cx.doc, item) {
            event.prevent_default();
            return;
        }
        let change = CustomEvent::new(TAG, EventKind::Change, self.host, true)
            .with_related_target(Some(item));
        if cx.emit(change).is_default_prevented() {
            return;
        }
        items.activate(&mut cx.doc, item);
        disclosure::hide(cx, self.host, Origin::User);
        cx.emit(
            CustomEvent::new(TAG, EventKind::Changed, self.host, true)
                .with_related_target(Some(item)),
        );
    }

    fn key_down(&mut self, cx: &mut Context, event: &mut InputEvent, key: Key) {
        let on_trigger = cx.doc.active_element() == Some(self.trigger);
        let open = disclosure::is_open(cx, self.host);
        match key {
            Key::Escape if open => {
                event.prevent_default();
                event.stop_propagation();
                disclosure::hide(cx, self.host, Origin::User);
            }
            Key::Enter | Key::Space => {
                if on_trigger && !open {
                    event.prevent_default();
                    self.open_at(cx, Direction::Next);
                } else if let Some(active) = self.active_item(&cx.doc) {
                    event.prevent_default();
                    cx.queue_click(active);
                }
            }
            Key::ArrowDown | Key::ArrowUp => {
                let direction = if key == Key::ArrowDown {
                    Direction::Next
                } else {
                    Direction::Previous
                };
                if on_trigger && !open {
                    event.prevent_default();
                    self.open_at(cx, direction);
                } else if open {
                    event.prevent_default();
                    let items = self.items(&cx.doc);
                    let current = items.marked(&cx.doc);
                    if let Some(next) = items.cycle(&cx.doc, current, direction) {
                        items.activate(&mut cx.doc, next);
                    }
                }
            }
            _ => {}
        }
    }
}
