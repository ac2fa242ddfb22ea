// Copyright 2025 the Twine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `twc-accordion`: a trigger that shows and hides a region.

use twine_dom::{Document, InputEvent, InputKind, NodeId};
use twine_interaction::roving::STATE_ATTRIBUTE;

use crate::binding;
use crate::context::Context;
use crate::disclosure::{self, Capabilities, Disclosure, Origin, OutsidePolicy, TrapPolicy};
use crate::error::ElementError;

pub(crate) const TAG: &str = "twc-accordion";

fn sync(doc: &mut Document, d: &Disclosure) {
    let state = if d.open { "open" } else { "" };
    doc.set_attribute(d.host, STATE_ATTRIBUTE, state);
    doc.set_attribute(d.panel, STATE_ATTRIBUTE, state);
    if let Some(trigger) = d.trigger {
        doc.set_attribute(trigger, STATE_ATTRIBUTE, state);
        doc.set_attribute(trigger, "aria-expanded", if d.open { "true" } else { "false" });
    }
}

static CAPABILITIES: Capabilities = Capabilities {
    element: TAG,
    trap: TrapPolicy::Never,
    scroll_lock: false,
    stacking: false,
    outside: OutsidePolicy::Ignore,
    refocus_trigger: false,
    bubbles: true,
    sync,
    on_hide: None,
};

#[derive(Debug)]
pub(crate) struct Accordion {
    host: NodeId,
    trigger: NodeId,
}

impl Accordion {
    pub(crate) fn connect(cx: &mut Context, host: NodeId) -> Result<Self, ElementError> {
        let trigger = binding::require_target(&cx.doc, host, TAG, "trigger")?;
        let panel = binding::require_target(&cx.doc, host, TAG, "panel")?;

        cx.ensure_id(trigger);
        cx.doc.set_attribute(trigger, "aria-expanded", "false");
        cx.doc.set_attribute_if_absent(trigger, STATE_ATTRIBUTE, "");
        cx.doc.set_attribute(panel, "role", "region");
        cx.ensure_id(panel);
        cx.doc.set_attribute_if_absent(panel, STATE_ATTRIBUTE, "");
        cx.doc.set_attribute_if_absent(host, STATE_ATTRIBUTE, "");
        cx.link(trigger, "aria-controls", panel);
        cx.link(panel, "aria-labelledby", trigger);

        disclosure::register(cx, &CAPABILITIES, host, Some(trigger), panel);
        Ok(Self { host, trigger })
    }

    pub(crate) fn handle_input(&mut self, cx: &mut Context, event: &mut InputEvent) {
        if event.kind == InputKind::Click && cx.doc.contains(self.trigger, event.target) {
            disclosure::toggle(cx, self.host, Origin::User);
        }
    }
}
