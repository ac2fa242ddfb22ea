// Copyright 2025 the Twine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `twc-floating-panel`: keeps its `panel` target anchored to a trigger.
//!
//! While subscribed and `active`, every animation frame recomputes the panel's
//! position with the configured [`Positioner`](twine_floating::Positioner) and
//! writes it to the panel's inline style. Options come from host attributes:
//! `placement`, `strategy`, `offset`, `flip`, `shift` and `sync`.

use alloc::format;
use alloc::string::ToString;

use kurbo::{Rect, Size, Vec2};
use twine_dom::{Document, NodeId};
use twine_floating::{Offset, Placement, PositionOptions, Rects, SizeSync, Strategy};

use crate::binding;
use crate::context::Context;
use crate::error::ElementError;
use crate::event::{CustomEvent, EventKind};

pub(crate) const TAG: &str = "twc-floating-panel";

/// Completes on the animation frame after a floating panel stopped.
///
/// Query it with [`Ui::is_complete`](crate::Ui::is_complete).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct FrameSignal {
    frame: u64,
}

impl FrameSignal {
    pub(crate) fn at(frame: u64) -> Self {
        Self { frame }
    }

    /// Whether the signal has completed once the frame clock reads `now`.
    pub fn is_complete_at(self, now: u64) -> bool {
        now >= self.frame
    }
}

/// Positioning bookkeeping for one mounted floating panel.
#[derive(Copy, Clone, Debug, Default)]
pub(crate) struct FloatingState {
    subscribed: bool,
    restart_after: Option<FrameSignal>,
}

/// The mounted element. All state lives in the context so disclosures can toggle it.
#[derive(Debug)]
pub(crate) struct FloatingPanel {
    host: NodeId,
}

impl FloatingPanel {
    pub(crate) fn connect(cx: &mut Context, host: NodeId) -> Result<Self, ElementError> {
        binding::require_target(&cx.doc, host, TAG, "panel")?;
        cx.floating.insert(host, FloatingState::default());
        start(cx, host);
        Ok(Self { host })
    }

    pub(crate) fn disconnect(&mut self, cx: &mut Context) {
        stop(cx, self.host);
        cx.floating.remove(&self.host);
    }

    pub(crate) fn attribute_changed(&mut self, cx: &mut Context, name: &str) {
        match name {
            "active" => {
                if cx.doc.has_attribute(self.host, "active") {
                    start(cx, self.host);
                } else {
                    stop(cx, self.host);
                }
            }
            "trigger-id" => {
                let signal = stop(cx, self.host);
                if signal.is_complete_at(cx.frame) {
                    start(cx, self.host);
                } else if let Some(state) = cx.floating.get_mut(&self.host) {
                    state.restart_after = Some(signal);
                }
            }
            "placement" | "strategy" | "offset" | "flip" | "shift" | "sync" => {
                reposition(cx, self.host);
            }
            _ => {}
        }
    }
}

/// Trigger element: the `trigger` target, else the element named by `trigger-id`.
fn trigger(doc: &Document, host: NodeId) -> Option<NodeId> {
    binding::target(doc, host, TAG, "trigger").or_else(|| {
        doc.attribute(host, "trigger-id")
            .and_then(|id| doc.element_by_id(id))
    })
}

fn padding(doc: &Document, host: NodeId, name: &str) -> Option<f64> {
    match doc.attribute(host, name).map(str::trim) {
        Some("false") => None,
        Some(v) => Some(v.parse().unwrap_or(0.0)),
        None => Some(0.0),
    }
}

/// Positioning options read from the host's attributes. Unparsable values fall
/// back to the defaults.
pub(crate) fn options(doc: &Document, host: NodeId) -> PositionOptions {
    fn parsed<T: core::str::FromStr + Default>(doc: &Document, host: NodeId, name: &str) -> T {
        doc.attribute(host, name)
            .and_then(|v| match v.parse() {
                Ok(v) => Some(v),
                Err(_) => {
                    log::debug!("{TAG} {host:?}: ignoring {name}={v:?}");
                    None
                }
            })
            .unwrap_or_default()
    }
    PositionOptions {
        placement: parsed::<Placement>(doc, host, "placement"),
        strategy: parsed::<Strategy>(doc, host, "strategy"),
        offset: parsed::<Offset>(doc, host, "offset"),
        flip: padding(doc, host, "flip"),
        shift: padding(doc, host, "shift"),
        sync: doc
            .attribute(host, "sync")
            .and_then(|v| v.parse::<SizeSync>().ok()),
    }
}

/// Origin of the nearest positioned ancestor of `panel`, for absolute positioning.
fn containing_origin(doc: &Document, panel: NodeId) -> Vec2 {
    doc.ancestors(panel)
        .skip(1)
        .find(|&n| doc.style(n, "position").is_some_and(|p| p != "static"))
        .and_then(|n| doc.bounds(n))
        .map(|b| b.origin().to_vec2())
        .unwrap_or(Vec2::ZERO)
}

fn set_current_placement(cx: &mut Context, host: NodeId, placement: Option<&str>) {
    let panel = binding::target(&cx.doc, host, TAG, "panel");
    for node in core::iter::once(host).chain(panel) {
        match placement {
            Some(p) => cx.doc.set_attribute(node, "data-current-placement", p),
            None => cx.doc.remove_attribute(node, "data-current-placement"),
        }
    }
}

/// Subscribe to repositioning. Does nothing without a trigger.
pub(crate) fn start(cx: &mut Context, host: NodeId) {
    let (Some(_), Some(panel)) = (
        trigger(&cx.doc, host),
        binding::target(&cx.doc, host, TAG, "panel"),
    ) else {
        log::debug!("{TAG} {host:?}: no trigger, not positioning");
        return;
    };
    let strategy = options(&cx.doc, host).strategy;
    cx.doc.set_style(panel, "position", strategy.as_str());
    cx.doc.set_style(panel, "top", "0px");
    cx.doc.set_style(panel, "left", "0px");
    if let Some(state) = cx.floating.get_mut(&host) {
        state.subscribed = true;
        state.restart_after = None;
    }
    reposition(cx, host);
}

/// Unsubscribe and clear the current placement.
///
/// The returned signal completes on the next animation frame, or immediately when
/// nothing was subscribed.
pub(crate) fn stop(cx: &mut Context, host: NodeId) -> FrameSignal {
    let was_subscribed = cx
        .floating
        .get_mut(&host)
        .is_some_and(|s| core::mem::take(&mut s.subscribed));
    if !was_subscribed {
        return FrameSignal::at(cx.frame);
    }
    set_current_placement(cx, host, None);
    log::debug!("{TAG} {host:?} stopped");
    FrameSignal::at(cx.frame + 1)
}

/// Toggle the `active` flag and start or stop accordingly.
pub(crate) fn set_active(cx: &mut Context, host: NodeId, active: bool) {
    if cx.doc.has_attribute(host, "active") == active {
        return;
    }
    cx.doc.toggle_attribute(host, "active", active);
    if active {
        start(cx, host);
    } else {
        stop(cx, host);
    }
}

/// Recompute and write the panel position. Only active, subscribed panels move.
pub(crate) fn reposition(cx: &mut Context, host: NodeId) {
    if !cx.floating.get(&host).is_some_and(|s| s.subscribed)
        || !cx.doc.has_attribute(host, "active")
    {
        return;
    }
    let (Some(reference), Some(panel)) = (
        trigger(&cx.doc, host),
        binding::target(&cx.doc, host, TAG, "panel"),
    ) else {
        return;
    };
    let arrow = binding::target(&cx.doc, host, TAG, "arrow");
    let options = options(&cx.doc, host);
    let rects = Rects {
        reference: cx.doc.bounds(reference).unwrap_or(Rect::ZERO),
        floating: cx.doc.bounds(panel).map_or(Size::ZERO, |b| b.size()),
        arrow: arrow.and_then(|a| cx.doc.bounds(a)).map(|b| b.size()),
    };
    let position = cx
        .positioner
        .position(&rects, cx.config.viewport, &options);

    let origin = match position.strategy {
        Strategy::Absolute => containing_origin(&cx.doc, panel),
        Strategy::Fixed => Vec2::ZERO,
    };
    let doc = &mut cx.doc;
    doc.set_style(panel, "left", &format!("{}px", position.x - origin.x));
    doc.set_style(panel, "top", &format!("{}px", position.y - origin.y));
    doc.set_style(panel, "position", position.strategy.as_str());
    match options.sync {
        Some(sync) => {
            for (enabled, property, value) in [
                (sync.width(), "width", position.size.width),
                (sync.height(), "height", position.size.height),
            ] {
                if enabled {
                    doc.set_style(panel, property, &format!("{value}px"));
                } else {
                    doc.remove_style(panel, property);
                }
            }
        }
        None => {
            doc.remove_style(panel, "width");
            doc.remove_style(panel, "height");
        }
    }
    if let (Some(arrow), Some(offset)) = (arrow, position.arrow) {
        for (property, value) in [("left", offset.x), ("top", offset.y)] {
            match value {
                Some(v) => doc.set_style(arrow, property, &format!("{v}px")),
                None => doc.remove_style(arrow, property),
            }
        }
    }

    let placement = position.placement.to_string();
    set_current_placement(cx, host, Some(&placement));
    log::trace!("{TAG} {host:?} at ({}, {}) {placement}", position.x, position.y);
    cx.emit(CustomEvent::new(TAG, EventKind::Changed, host, true));
}

/// Advance the frame clock: run deferred restarts, then reposition active panels.
pub(crate) fn animation_frame(cx: &mut Context) {
    cx.frame += 1;
    let hosts: alloc::vec::Vec<NodeId> = cx.floating.keys().copied().collect();
    let now = cx.frame;
    for &host in &hosts {
        let restart = cx
            .floating
            .get(&host)
            .and_then(|s| s.restart_after)
            .is_some_and(|signal| signal.is_complete_at(now));
        if restart {
            start(cx, host);
        }
    }
    for host in hosts {
        reposition(cx, host);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UiConfig;

    fn panel_host() -> (Context, NodeId, NodeId, NodeId) {
        let mut doc = Document::new();
        let host = doc.create_element(TAG);
        let trigger = doc.create_element("button");
        let panel = doc.create_element("div");
        doc.append_child(doc.body(), host);
        doc.append_child(host, trigger);
        doc.append_child(host, panel);
        doc.set_attribute(trigger, "data-target", "twc-floating-panel.trigger");
        doc.set_attribute(panel, "data-target", "twc-floating-panel.panel");
        doc.set_bounds(trigger, Rect::new(100.0, 100.0, 180.0, 124.0));
        doc.set_bounds(panel, Rect::new(0.0, 0.0, 120.0, 60.0));
        (Context::new(doc, UiConfig::default()), host, trigger, panel)
    }

    #[test]
    fn flip_and_shift_accept_false_and_padding() {
        let (mut cx, host, _, _) = panel_host();
        cx.doc.set_attribute(host, "flip", "false");
        cx.doc.set_attribute(host, "shift", "8");
        cx.doc.set_attribute(host, "placement", "nowhere");
        let o = options(&cx.doc, host);
        assert_eq!(o.flip, None);
        assert_eq!(o.shift, Some(8.0));
        assert_eq!(o.placement, Placement::default());
    }

    #[test]
    fn inactive_panels_are_not_positioned() {
        let (mut cx, host, _, panel) = panel_host();
        let _ = FloatingPanel::connect(&mut cx, host).unwrap();
        assert_eq!(cx.doc.style(panel, "top"), Some("0px"));
        assert!(!cx.doc.has_attribute(host, "data-current-placement"));
        set_active(&mut cx, host, true);
        assert_eq!(cx.doc.style(panel, "top"), Some("124px"));
        assert_eq!(cx.doc.style(panel, "left"), Some("100px"));
        assert_eq!(
            cx.doc.attribute(panel, "data-current-placement"),
            Some("bottom-start")
        );
    }

    #[test]
    fn absolute_positions_are_relative_to_the_positioned_ancestor() {
        let (mut cx, host, _, panel) = panel_host();
        cx.doc.set_style(host, "position", "relative");
        cx.doc.set_bounds(host, Rect::new(50.0, 40.0, 400.0, 400.0));
        cx.doc.set_attribute(host, "strategy", "absolute");
        cx.doc.set_attribute(host, "active", "");
        let _ = FloatingPanel::connect(&mut cx, host).unwrap();
        assert_eq!(cx.doc.style(panel, "position"), Some("absolute"));
        assert_eq!(cx.doc.style(panel, "left"), Some("50px"));
        assert_eq!(cx.doc.style(panel, "top"), Some("84px"));
    }

    #[test]
    fn stop_completes_on_the_next_frame() {
        let (mut cx, host, _, _) = panel_host();
        let _ = FloatingPanel::connect(&mut cx, host).unwrap();
        let signal = stop(&mut cx, host);
        assert!(!signal.is_complete_at(cx.frame));
        animation_frame(&mut cx);
        assert!(signal.is_complete_at(cx.frame));
        assert!(stop(&mut cx, host).is_complete_at(cx.frame), "already stopped");
    }
}
