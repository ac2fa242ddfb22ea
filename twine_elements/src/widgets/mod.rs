// Copyright 2025 the Twine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The mounted elements.

pub(crate) mod accordion;
pub(crate) mod dialog;
pub(crate) mod dropdown;
pub(crate) mod floating_panel;
pub(crate) mod popover;
pub(crate) mod switch;
pub(crate) mod tabs;
pub(crate) mod tooltip;

use alloc::string::ToString;

use twine_dom::{InputEvent, NodeId};

use crate::context::Context;
use crate::disclosure::{self, Origin};
use crate::error::ElementError;

use accordion::Accordion;
use dialog::Dialog;
use dropdown::Dropdown;
use floating_panel::FloatingPanel;
use popover::Popover;
use switch::Switch;
use tabs::{Tabs, TabsList};
use tooltip::Tooltip;

/// Every tag [`Widget::connect`] understands.
pub(crate) const TAGS: [&str; 9] = [
    accordion::TAG,
    dialog::TAG,
    dropdown::TAG,
    floating_panel::TAG,
    popover::TAG,
    switch::TAG,
    tabs::TAG,
    tabs::LIST_TAG,
    tooltip::TAG,
];

#[derive(Debug)]
pub(crate) enum Widget {
    Accordion(Accordion),
    Dialog(Dialog),
    Dropdown(Dropdown),
    FloatingPanel(FloatingPanel),
    Popover(Popover),
    Switch(Switch),
    Tabs(Tabs),
    TabsList(TabsList),
    Tooltip(Tooltip),
}

impl Widget {
    /// Connect the element matching the host's tag.
    pub(crate) fn connect(cx: &mut Context, host: NodeId) -> Result<Self, ElementError> {
        if !cx.doc.is_alive(host) {
            return Err(ElementError::StaleNode(host));
        }
        let unknown = |cx: &Context| {
            ElementError::UnknownElement(cx.doc.tag(host).unwrap_or_default().to_string())
        };
        let Some(tag) = TAGS.into_iter().find(|&t| cx.doc.is_tag(host, t)) else {
            return Err(unknown(cx));
        };
        let widget = match tag {
            accordion::TAG => Self::Accordion(Accordion::connect(cx, host)?),
            dialog::TAG => Self::Dialog(Dialog::connect(cx, host)?),
            dropdown::TAG => Self::Dropdown(Dropdown::connect(cx, host)?),
            floating_panel::TAG => Self::FloatingPanel(FloatingPanel::connect(cx, host)?),
            popover::TAG => Self::Popover(Popover::connect(cx, host)?),
            switch::TAG => Self::Switch(Switch::connect(cx, host)?),
            tabs::TAG => Self::Tabs(Tabs::connect(cx, host)?),
            tabs::LIST_TAG => Self::TabsList(TabsList::connect(cx, host)),
            tooltip::TAG => Self::Tooltip(Tooltip::connect(cx, host)?),
            _ => return Err(unknown(cx)),
        };
        log::debug!("mounted {} on {host:?}", widget.element());
        Ok(widget)
    }

    pub(crate) fn element(&self) -> &'static str {
        match self {
            Self::Accordion(_) => accordion::TAG,
            Self::Dialog(_) => dialog::TAG,
            Self::Dropdown(_) => dropdown::TAG,
            Self::FloatingPanel(_) => floating_panel::TAG,
            Self::Popover(_) => popover::TAG,
            Self::Switch(_) => switch::TAG,
            Self::Tabs(_) => tabs::TAG,
            Self::TabsList(_) => tabs::LIST_TAG,
            Self::Tooltip(_) => tooltip::TAG,
        }
    }

    /// Whether the element has an open/closed state.
    pub(crate) fn is_disclosure(&self) -> bool {
        matches!(
            self,
            Self::Accordion(_) | Self::Dialog(_) | Self::Dropdown(_) | Self::Popover(_) | Self::Tooltip(_)
        )
    }

    pub(crate) fn disconnect(&mut self, cx: &mut Context, host: NodeId) {
        match self {
            Self::Tooltip(t) => t.disconnect(cx),
            Self::FloatingPanel(f) => f.disconnect(cx),
            _ if self.is_disclosure() => disclosure::unregister(cx, host),
            _ => {}
        }
        log::debug!("unmounted {} from {host:?}", self.element());
    }

    pub(crate) fn handle_input(&mut self, cx: &mut Context, event: &mut InputEvent) {
        match self {
            Self::Accordion(w) => w.handle_input(cx, event),
            Self::Dialog(w) => w.handle_input(cx, event),
            Self::Dropdown(w) => w.handle_input(cx, event),
            Self::Popover(w) => w.handle_input(cx, event),
            Self::Switch(w) => w.handle_input(cx, event),
            Self::Tabs(w) => w.handle_input(cx, event),
            Self::Tooltip(w) => w.handle_input(cx, event),
            Self::FloatingPanel(_) | Self::TabsList(_) => {}
        }
    }

    /// React to a host attribute written through the [`Ui`](crate::Ui).
    pub(crate) fn attribute_changed(&mut self, cx: &mut Context, host: NodeId, name: &str) {
        match self {
            Self::Switch(w) if name == "checked" => w.sync(cx),
            Self::Tabs(w) if name == "orientation" => w.sync_orientation(cx),
            Self::FloatingPanel(w) => w.attribute_changed(cx, name),
            _ if name == "open" && self.is_disclosure() => {
                let want = cx.doc.has_attribute(host, "open");
                if want != disclosure::is_open(cx, host) {
                    if want {
                        disclosure::show(cx, host, Origin::Programmatic);
                    } else {
                        disclosure::hide(cx, host, Origin::Programmatic);
                    }
                }
            }
            _ => {}
        }
    }

    /// Run a declarative action method.
    pub(crate) fn invoke(
        &mut self,
        cx: &mut Context,
        host: NodeId,
        method: &str,
        origin: Origin,
    ) -> Result<bool, ElementError> {
        if !self.is_disclosure() {
            return Err(ElementError::Unsupported {
                element: self.element(),
                operation: "action",
            });
        }
        match method {
            "show" => Ok(disclosure::show(cx, host, origin)),
            "hide" => Ok(disclosure::hide(cx, host, origin)),
            "toggle" => Ok(disclosure::toggle(cx, host, origin)),
            _ => Err(ElementError::Unsupported {
                element: self.element(),
                operation: "action",
            }),
        }
    }
}
