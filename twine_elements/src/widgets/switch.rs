// Copyright 2025 the Twine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `twc-switch`: an on/off toggle backed by the host's `checked` attribute.

use twine_dom::{InputEvent, InputKind, NodeId};
use twine_interaction::roving::STATE_ATTRIBUTE;

use crate::binding;
use crate::context::Context;
use crate::error::ElementError;
use crate::event::{CustomEvent, EventKind};

pub(crate) const TAG: &str = "twc-switch";

#[derive(Debug)]
pub(crate) struct Switch {
    host: NodeId,
    trigger: NodeId,
}

impl Switch {
    pub(crate) fn connect(cx: &mut Context, host: NodeId) -> Result<Self, ElementError> {
        let trigger = binding::require_target(&cx.doc, host, TAG, "trigger")?;
        cx.doc.set_attribute(trigger, "role", "switch");
        cx.doc.set_attribute_if_absent(trigger, "tabindex", "0");
        let this = Self { host, trigger };
        this.sync(cx);
        Ok(this)
    }

    pub(crate) fn is_checked(&self, cx: &Context) -> bool {
        cx.doc.has_attribute(self.host, "checked")
    }

    /// Mirror `checked` into ARIA and state attributes.
    pub(crate) fn sync(&self, cx: &mut Context) {
        let checked = self.is_checked(cx);
        cx.doc
            .set_attribute(self.trigger, "aria-checked", if checked { "true" } else { "false" });
        cx.doc
            .set_attribute(self.host, STATE_ATTRIBUTE, if checked { "checked" } else { "" });
    }

    pub(crate) fn handle_input(&mut self, cx: &mut Context, event: &mut InputEvent) {
        if event.kind != InputKind::Click || !cx.doc.contains(self.trigger, event.target) {
            return;
        }
        if cx
            .emit(CustomEvent::new(TAG, EventKind::Change, self.host, false))
            .is_default_prevented()
        {
            return;
        }
        let checked = !self.is_checked(cx);
        cx.doc.toggle_attribute(self.host, "checked", checked);
        self.sync(cx);
        log::debug!("{TAG} {:?} checked={checked}", self.host);
        cx.emit(CustomEvent::new(TAG, EventKind::Changed, self.host, false));
    }
}
