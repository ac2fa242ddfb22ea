// Copyright 2025 the Twine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `twc-tooltip`: a description panel shown on hover or focus of its trigger.
//!
//! Hover and focus open it independently; leaving or blurring closes it. A press
//! on the trigger closes it and keeps the focus that follows the press from
//! reopening it until the pointer is released anywhere in the document.

use twine_dom::{Document, InputEvent, InputKind, NodeId};
use twine_interaction::roving::STATE_ATTRIBUTE;

use crate::binding;
use crate::context::Context;
use crate::disclosure::{self, Capabilities, Disclosure, Origin, OutsidePolicy, TrapPolicy};
use crate::error::ElementError;

pub(crate) const TAG: &str = "twc-tooltip";

fn sync(doc: &mut Document, d: &Disclosure) {
    let state = if d.open { "open" } else { "" };
    doc.set_attribute(d.panel, STATE_ATTRIBUTE, state);
    if let Some(trigger) = d.trigger {
        doc.set_attribute(trigger, STATE_ATTRIBUTE, state);
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
pub(crate) struct Tooltip {
    host: NodeId,
    trigger: NodeId,
    pressed: bool,
    hovering: bool,
}

impl Tooltip {
    pub(crate) fn connect(cx: &mut Context, host: NodeId) -> Result<Self, ElementError> {
        let trigger = binding::require_target(&cx.doc, host, TAG, "trigger")?;
        let panel = binding::require_target(&cx.doc, host, TAG, "panel")?;

        cx.doc.set_attribute(trigger, STATE_ATTRIBUTE, "");
        cx.doc.set_attribute(panel, "popover", "auto");
        cx.doc.set_attribute(panel, "role", "tooltip");
        cx.ensure_id(panel);
        cx.doc.set_attribute(panel, STATE_ATTRIBUTE, "");
        cx.link(trigger, "aria-describedby", panel);

        disclosure::register(cx, &CAPABILITIES, host, Some(trigger), panel);
        Ok(Self {
            host,
            trigger,
            pressed: false,
            hovering: false,
        })
    }

    pub(crate) fn disconnect(&mut self, cx: &mut Context) {
        self.pressed = false;
        self.hovering = false;
        disclosure::unregister(cx, self.host);
    }

    /// A pointer release anywhere ends the press.
    pub(crate) fn pointer_released(&mut self) {
        self.pressed = false;
    }

    pub(crate) fn handle_input(&mut self, cx: &mut Context, event: &mut InputEvent) {
        let on_trigger = event.target == self.trigger;
        let in_trigger = cx.doc.contains(self.trigger, event.target);
        match event.kind {
            InputKind::PointerMove if in_trigger && !self.hovering => {
                self.hovering = true;
                disclosure::show(cx, self.host, Origin::User);
            }
            InputKind::PointerLeave if on_trigger => {
                self.hovering = false;
                disclosure::hide(cx, self.host, Origin::User);
            }
            InputKind::PointerDown if in_trigger => {
                self.pressed = true;
                disclosure::hide(cx, self.host, Origin::User);
            }
            InputKind::Focus if on_trigger && !self.pressed => {
                disclosure::show(cx, self.host, Origin::User);
            }
            InputKind::Blur if on_trigger => {
                disclosure::hide(cx, self.host, Origin::User);
            }
            _ => {}
        }
    }
}
