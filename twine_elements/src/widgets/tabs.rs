// Copyright 2025 the Twine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `twc-tabs` and `twc-tabs-list`.
//!
//! Tabs are the host's `triggers` targets; each selects the panel (among the
//! `panels` targets) whose id its `aria-controls` names. Exactly one tab carries
//! `data-headlessui-state="selected"`, `aria-selected="true"` and `tabindex="0"`.

use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

use twine_dom::{Document, InputEvent, InputKind, Key, NodeId};
use twine_floating::ParseError;
use twine_interaction::roving::STATE_ATTRIBUTE;
use twine_interaction::{Direction, Marker, RovingList};

use crate::binding;
use crate::context::Context;
use crate::error::ElementError;
use crate::event::{CustomEvent, EventKind};

pub(crate) const TAG: &str = "twc-tabs";
pub(crate) const LIST_TAG: &str = "twc-tabs-list";

/// Axis the arrow keys move along.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Left and right arrows.
    #[default]
    Horizontal,
    /// Up and down arrows.
    Vertical,
}

impl Orientation {
    /// Attribute value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
        }
    }

    fn keys(self) -> (Key, Key) {
        match self {
            Self::Horizontal => (Key::ArrowRight, Key::ArrowLeft),
            Self::Vertical => (Key::ArrowDown, Key::ArrowUp),
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Orientation {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "horizontal" => Ok(Self::Horizontal),
            "vertical" => Ok(Self::Vertical),
            _ => Err(ParseError::new("orientation", s)),
        }
    }
}

/// Tab/panel pairs, resolved from the document.
struct Pairs {
    tabs: RovingList,
    panels: Vec<(NodeId, Option<NodeId>)>,
}

impl Pairs {
    fn resolve(doc: &Document, host: NodeId) -> Self {
        let triggers = binding::targets(doc, host, TAG, "triggers");
        let panels = binding::targets(doc, host, TAG, "panels");
        let pairs = triggers
            .iter()
            .map(|&tab| {
                let controls = doc.attribute(tab, "aria-controls");
                let panel = panels
                    .iter()
                    .copied()
                    .find(|&p| controls.is_some() && doc.attribute(p, "id") == controls);
                (tab, panel)
            })
            .collect();
        let mut tabs = RovingList::new(host, Marker::Selected);
        tabs.set_items(triggers);
        Self {
            tabs,
            panels: pairs,
        }
    }

    fn panel(&self, tab: NodeId) -> Option<NodeId> {
        self.panels
            .iter()
            .find(|(t, _)| *t == tab)
            .and_then(|(_, p)| *p)
    }

    fn select(&self, doc: &mut Document, tab: NodeId) {
        self.tabs.activate_with(doc, tab, |doc, t, selected| {
            doc.set_attribute(t, "tabindex", if selected { "0" } else { "-1" });
            doc.set_attribute(t, "aria-selected", if selected { "true" } else { "false" });
            if let Some(panel) = self.panel(t) {
                doc.set_attribute(panel, STATE_ATTRIBUTE, if selected { "selected" } else { "" });
            }
        });
    }
}

#[derive(Debug)]
pub(crate) struct Tabs {
    host: NodeId,
}

impl Tabs {
    pub(crate) fn connect(cx: &mut Context, host: NodeId) -> Result<Self, ElementError> {
        let this = Self { host };
        this.sync_orientation(cx);

        for tab in binding::targets(&cx.doc, host, TAG, "triggers") {
            cx.doc.set_attribute(tab, "role", "tab");
            cx.doc.set_attribute(tab, "tabindex", "-1");
            cx.doc.set_attribute(tab, "aria-selected", "false");
            cx.doc.set_attribute_if_absent(tab, STATE_ATTRIBUTE, "");
            cx.ensure_id(tab);
        }
        for panel in binding::targets(&cx.doc, host, TAG, "panels") {
            cx.doc.set_attribute(panel, "role", "tabpanel");
            cx.doc.set_attribute(panel, "tabindex", "0");
            cx.doc.set_attribute_if_absent(panel, STATE_ATTRIBUTE, "");
            cx.ensure_id(panel);
        }

        let pairs = Pairs::resolve(&cx.doc, host);
        for &(tab, panel) in &pairs.panels {
            if let Some(panel) = panel {
                cx.link(panel, "aria-labelledby", tab);
            }
        }
        if let Some(tab) = pairs
            .tabs
            .marked(&cx.doc)
            .or_else(|| pairs.tabs.first(&cx.doc))
        {
            pairs.select(&mut cx.doc, tab);
        }
        Ok(this)
    }

    pub(crate) fn orientation(&self, doc: &Document) -> Orientation {
        doc.attribute(self.host, "orientation")
            .and_then(|v| match v.parse() {
                Ok(o) => Some(o),
                Err(e) => {
                    log::debug!("{TAG} {:?}: {e}", self.host);
                    None
                }
            })
            .unwrap_or_default()
    }

    /// Mirror the orientation to the tabs list.
    pub(crate) fn sync_orientation(&self, cx: &mut Context) {
        let orientation = self.orientation(&cx.doc);
        let list = cx.doc.elements_by_tag(self.host, LIST_TAG).next();
        if let Some(list) = list {
            cx.doc
                .set_attribute(list, "aria-orientation", orientation.as_str());
        }
    }

    pub(crate) fn selected_tab(&self, doc: &Document) -> Option<NodeId> {
        Pairs::resolve(doc, self.host).tabs.marked(doc)
    }

    /// Select `tab` without emitting events. Tabs of other hosts are ignored.
    pub(crate) fn select_tab(&self, doc: &mut Document, tab: NodeId) -> bool {
        let pairs = Pairs::resolve(doc, self.host);
        if !pairs.tabs.contains(tab) {
            return false;
        }
        pairs.select(doc, tab);
        true
    }

    fn select_with_events(&self, cx: &mut Context, pairs: &Pairs, tab: NodeId, focus: bool) {
        let panel = pairs.panel(tab);
        let change =
            CustomEvent::new(TAG, EventKind::Change, self.host, true).with_related_target(panel);
        if cx.emit(change).is_default_prevented() {
            return;
        }
        pairs.select(&mut cx.doc, tab);
        if focus {
            cx.doc.focus(tab);
        }
        log::debug!("{TAG} {:?} selected {tab:?}", self.host);
        cx.emit(CustomEvent::new(TAG, EventKind::Changed, self.host, true).with_related_target(panel));
    }

    pub(crate) fn handle_input(&mut self, cx: &mut Context, event: &mut InputEvent) {
        match event.kind {
            InputKind::Click => {
                let pairs = Pairs::resolve(&cx.doc, self.host);
                let Some(tab) = cx.doc.closest(event.target, |n| pairs.tabs.contains(n)) else {
                    return;
                };
                if RovingList::is_interactable(&cx.doc, tab) {
                    self.select_with_events(cx, &pairs, tab, false);
                }
            }
            InputKind::KeyDown { key, .. } => {
                let pairs = Pairs::resolve(&cx.doc, self.host);
                let Some(active) = cx.doc.active_element().filter(|&a| pairs.tabs.contains(a))
                else {
                    return;
                };
                let (next, previous) = self.orientation(&cx.doc).keys();
                let tab = if key == next {
                    pairs.tabs.cycle(&cx.doc, Some(active), Direction::Next)
                } else if key == previous {
                    pairs.tabs.cycle(&cx.doc, Some(active), Direction::Previous)
                } else if key == Key::Home {
                    pairs.tabs.first(&cx.doc)
                } else if key == Key::End {
                    pairs.tabs.last(&cx.doc)
                } else {
                    return;
                };
                if let Some(tab) = tab {
                    event.prevent_default();
                    self.select_with_events(cx, &pairs, tab, true);
                }
            }
            _ => {}
        }
    }
}

/// `twc-tabs-list`: only announces the tablist role.
#[derive(Debug)]
pub(crate) struct TabsList;

impl TabsList {
    pub(crate) fn connect(cx: &mut Context, host: NodeId) -> Self {
        cx.doc.set_attribute(host, "role", "tablist");
        Self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn orientation_parses_and_rejects() {
        assert_eq!("vertical".parse(), Ok(Orientation::Vertical));
        let err = "diagonal".parse::<Orientation>().unwrap_err();
        assert_eq!(err.kind, "orientation");
        assert_eq!(Orientation::default().to_string(), "horizontal");
    }
}
