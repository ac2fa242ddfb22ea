// Copyright 2025 the Twine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `twc-popover`: a non-modal panel opened from a trigger.
//!
//! Opening one popover closes every open popover that does not contain it.
//! Closing one closes the popovers nested in it first. Popover events do not
//! bubble.

use twine_dom::{Document, InputEvent, InputKind, Key, NodeId};
use twine_interaction::roving::STATE_ATTRIBUTE;

use crate::binding;
use crate::context::Context;
use crate::disclosure::{self, Capabilities, Disclosure, Origin, OutsidePolicy, TrapPolicy};
use crate::error::ElementError;

pub(crate) const TAG: &str = "twc-popover";

fn sync(doc: &mut Document, d: &Disclosure) {
    let state = if d.open { "open" } else { "" };
    if let Some(trigger) = d.trigger {
        doc.set_attribute(trigger, "aria-expanded", if d.open { "true" } else { "false" });
        doc.set_attribute(trigger, STATE_ATTRIBUTE, state);
    }
    doc.set_attribute(d.panel, STATE_ATTRIBUTE, state);
}

static CAPABILITIES: Capabilities = Capabilities {
    element: TAG,
    trap: TrapPolicy::UserDriven,
    scroll_lock: false,
    stacking: true,
    outside: OutsidePolicy::Dismissable,
    refocus_trigger: true,
    bubbles: false,
    sync,
    on_hide: None,
};

#[derive(Debug)]
pub(crate) struct Popover {
    host: NodeId,
    trigger: NodeId,
}

impl Popover {
    pub(crate) fn connect(cx: &mut Context, host: NodeId) -> Result<Self, ElementError> {
        let trigger = binding::require_target(&cx.doc, host, TAG, "trigger")?;
        let panel = binding::require_target(&cx.doc, host, TAG, "panel")?;

        cx.doc.set_attribute(trigger, "aria-haspopup", "dialog");
        cx.doc.set_attribute(trigger, "aria-expanded", "false");
        cx.doc.set_attribute(trigger, STATE_ATTRIBUTE, "");
        cx.ensure_id(panel);
        cx.doc.set_attribute(panel, "role", "dialog");
        cx.doc.set_attribute(panel, "tabindex", "-1");
        cx.doc.set_attribute(panel, STATE_ATTRIBUTE, "");
        cx.link(trigger, "aria-controls", panel);

        disclosure::register(cx, &CAPABILITIES, host, Some(trigger), panel);
        Ok(Self { host, trigger })
    }

    pub(crate) fn handle_input(&mut self, cx: &mut Context, event: &mut InputEvent) {
        match event.kind {
            InputKind::Click if cx.doc.contains(self.trigger, event.target) => {
                disclosure::toggle(cx, self.host, Origin::User);
            }
            InputKind::KeyDown {
                key: Key::Escape, ..
            } if disclosure::is_open(cx, self.host) => {
                event.prevent_default();
                event.stop_propagation();
                disclosure::hide(cx, self.host, Origin::User);
            }
            _ => {}
        }
    }
}
