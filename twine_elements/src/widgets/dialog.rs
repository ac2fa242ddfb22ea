// Copyright 2025 the Twine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `twc-dialog`: a modal `dialog` target.
//!
//! While open the dialog traps focus and locks body scrolling. A press outside
//! closes the innermost open dialog only; Escape closes it without reaching
//! enclosing popovers.

use twine_dom::{Document, InputEvent, InputKind, Key, NodeId};
use twine_interaction::roving::STATE_ATTRIBUTE;

use crate::binding;
use crate::context::Context;
use crate::disclosure::{self, Capabilities, Disclosure, Origin, OutsidePolicy, TrapPolicy};
use crate::error::ElementError;

pub(crate) const TAG: &str = "twc-dialog";

fn sync(doc: &mut Document, d: &Disclosure) {
    doc.toggle_attribute(d.panel, "open", d.open);
    doc.set_attribute(d.panel, STATE_ATTRIBUTE, if d.open { "open" } else { "" });
}

static CAPABILITIES: Capabilities = Capabilities {
    element: TAG,
    trap: TrapPolicy::Always,
    scroll_lock: true,
    stacking: false,
    outside: OutsidePolicy::Modal,
    refocus_trigger: false,
    bubbles: true,
    sync,
    on_hide: None,
};

#[derive(Debug)]
pub(crate) struct Dialog {
    host: NodeId,
    dialog: NodeId,
}

impl Dialog {
    pub(crate) fn connect(cx: &mut Context, host: NodeId) -> Result<Self, ElementError> {
        let dialog = binding::require_target(&cx.doc, host, TAG, "dialog")?;
        cx.doc.set_attribute(dialog, STATE_ATTRIBUTE, "");
        // A dialog with nothing tabbable inside still takes focus itself.
        cx.doc.set_attribute_if_absent(dialog, "tabindex", "-1");
        disclosure::register(cx, &CAPABILITIES, host, None, dialog);
        Ok(Self { host, dialog })
    }

    pub(crate) fn handle_input(&mut self, cx: &mut Context, event: &mut InputEvent) {
        if !disclosure::is_open(cx, self.host) {
            return;
        }
        match event.kind {
            // Presses on the backdrop land on the dialog element itself.
            InputKind::Click if event.target == self.dialog && !event.is_default_prevented() => {
                let inside = match (cx.doc.bounds(self.dialog), event.position) {
                    (Some(bounds), Some(p)) => {
                        bounds.x0 <= p.x && p.x <= bounds.x1 && bounds.y0 <= p.y && p.y <= bounds.y1
                    }
                    _ => true,
                };
                if !inside {
                    disclosure::hide(cx, self.host, Origin::User);
                }
            }
            InputKind::KeyDown {
                key: Key::Escape, ..
            } if cx.doc.contains(self.dialog, event.target) => {
                event.stop_propagation();
                disclosure::hide(cx, self.host, Origin::User);
            }
            _ => {}
        }
    }
}
