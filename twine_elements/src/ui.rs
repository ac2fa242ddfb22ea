// Copyright 2025 the Twine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The runtime: mounted elements, input routing, and programmatic properties.
//!
//! ## Routing
//!
//! [`Ui::dispatch`] walks the event's [`dispatch::sequence`]:
//!
//! - On the way up, `data-action` click bindings run and each mounted host on the
//!   path gets the event. Focus, blur and pointer-leave do not bubble; widgets on
//!   the path still see them and match on the exact target.
//! - At the document: outside-interaction detection, focus-trap Tab cycling, and
//!   the pointer release that ends tooltip presses.
//! - Unless a handler prevented it, the default action: pointer presses focus the
//!   nearest focusable ancestor (or blur), Tab moves sequential focus, Enter and
//!   Space on buttons click them.
//!
//! Follow-up events (synthetic clicks, blur/focus from focus moves, pointer leave)
//! are queued and routed in order until the queue is empty.

use alloc::boxed::Box;
use alloc::vec::Vec;

use hashbrown::HashMap;
use kurbo::Point;
use twine_dom::focusable::{is_focusable, tabbable_descendants};
use twine_dom::path::{PathChange, PathState};
use twine_dom::{Document, InputEvent, InputKind, Key, Modifiers, NodeId};
use twine_floating::Positioner;
use twine_interaction::outside;

use crate::binding;
use crate::config::UiConfig;
use crate::context::Context;
use crate::disclosure::{self, Origin};
use crate::dispatch::{self, Outcome, Phase};
use crate::error::ElementError;
use crate::event::{CustomEvent, Listener, ListenerId};
use crate::widgets::floating_panel::{self, FrameSignal};
use crate::widgets::tabs::Orientation;
use crate::widgets::{TAGS, Widget};

/// Mounted elements over a [`Document`].
///
/// ```
/// use twine_dom::Document;
/// use twine_elements::{EventKind, Ui};
///
/// let mut doc = Document::new();
/// let host = doc.create_element("twc-switch");
/// let button = doc.create_element("button");
/// doc.append_child(doc.body(), host);
/// doc.append_child(host, button);
/// doc.set_attribute(button, "data-target", "twc-switch.trigger");
///
/// let mut ui = Ui::with_document(doc);
/// ui.mount_all().unwrap();
/// ui.click(button);
/// assert!(ui.is_checked(host));
/// assert_eq!(ui.document().attribute(button, "aria-checked"), Some("true"));
/// let kinds: Vec<_> = ui.take_events().into_iter().map(|e| e.kind).collect();
/// assert_eq!(kinds, [EventKind::Change, EventKind::Changed]);
/// ```
#[derive(Debug)]
pub struct Ui {
    cx: Context,
    widgets: HashMap<NodeId, Widget>,
    hover: PathState<NodeId>,
}

impl Default for Ui {
    fn default() -> Self {
        Self::new()
    }
}

impl Ui {
    /// An empty document with the default configuration.
    pub fn new() -> Self {
        Self::with_config(Document::new(), UiConfig::default())
    }

    /// Run over an existing document with the default configuration.
    pub fn with_document(doc: Document) -> Self {
        Self::with_config(doc, UiConfig::default())
    }

    /// Run over an existing document.
    pub fn with_config(doc: Document, config: UiConfig) -> Self {
        Self {
            cx: Context::new(doc, config),
            widgets: HashMap::new(),
            hover: PathState::new(),
        }
    }

    /// Replace the floating-panel positioner.
    pub fn set_positioner(&mut self, positioner: Box<dyn Positioner>) {
        self.cx.positioner = positioner;
    }

    /// The configuration.
    pub fn config(&self) -> &UiConfig {
        &self.cx.config
    }

    /// The document.
    pub fn document(&self) -> &Document {
        &self.cx.doc
    }

    /// The document, for building trees and setting bounds.
    ///
    /// Attribute writes made here bypass the elements; use [`Ui::set_attribute`] for
    /// attributes elements observe.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.cx.doc
    }

    // --- lifecycle ---

    /// Connect the element matching `host`'s tag. Mounting twice is a no-op.
    pub fn mount(&mut self, host: NodeId) -> Result<(), ElementError> {
        if self.widgets.contains_key(&host) {
            return Ok(());
        }
        let widget = Widget::connect(&mut self.cx, host)?;
        self.widgets.insert(host, widget);
        self.settle();
        Ok(())
    }

    /// Mount every known element in the document, floating panels first, then the
    /// rest in document order. Returns how many were mounted.
    pub fn mount_all(&mut self) -> Result<usize, ElementError> {
        let doc = &self.cx.doc;
        let (mut hosts, rest): (Vec<NodeId>, Vec<NodeId>) = doc
            .descendants(doc.root())
            .filter(|&n| TAGS.iter().any(|t| doc.is_tag(n, t)))
            .filter(|n| !self.widgets.contains_key(n))
            .partition(|&n| doc.is_tag(n, floating_panel::TAG));
        hosts.extend(rest);
        let count = hosts.len();
        for host in hosts {
            self.mount(host)?;
        }
        Ok(count)
    }

    /// Disconnect the element on `host`, closing it silently.
    pub fn unmount(&mut self, host: NodeId) -> Result<(), ElementError> {
        let mut widget = self
            .widgets
            .remove(&host)
            .ok_or(ElementError::NotMounted(host))?;
        widget.disconnect(&mut self.cx, host);
        self.settle();
        Ok(())
    }

    /// Whether an element is mounted on `host`.
    pub fn is_mounted(&self, host: NodeId) -> bool {
        self.widgets.contains_key(&host)
    }

    /// Tag of the element mounted on `host`.
    pub fn element(&self, host: NodeId) -> Option<&'static str> {
        self.widgets.get(&host).map(Widget::element)
    }

    fn widget(&self, host: NodeId) -> Result<&Widget, ElementError> {
        if !self.cx.doc.is_alive(host) {
            return Err(ElementError::StaleNode(host));
        }
        self.widgets.get(&host).ok_or(ElementError::NotMounted(host))
    }

    fn unsupported(&self, host: NodeId, operation: &'static str) -> ElementError {
        match self.widgets.get(&host) {
            Some(w) => ElementError::Unsupported {
                element: w.element(),
                operation,
            },
            None => ElementError::NotMounted(host),
        }
    }

    // --- attributes ---

    /// Set an attribute and let the element on `node` react.
    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        self.cx.doc.set_attribute(node, name, value);
        self.attribute_changed(node, name);
    }

    /// Remove an attribute and let the element on `node` react.
    pub fn remove_attribute(&mut self, node: NodeId, name: &str) {
        self.cx.doc.remove_attribute(node, name);
        self.attribute_changed(node, name);
    }

    fn attribute_changed(&mut self, node: NodeId, name: &str) {
        if let Some(widget) = self.widgets.get_mut(&node) {
            widget.attribute_changed(&mut self.cx, node, name);
            self.settle();
        }
    }

    // --- disclosures ---

    fn disclosure(&self, host: NodeId, operation: &'static str) -> Result<(), ElementError> {
        if self.widget(host)?.is_disclosure() {
            Ok(())
        } else {
            Err(self.unsupported(host, operation))
        }
    }

    /// Whether the disclosure on `host` is open.
    pub fn is_open(&self, host: NodeId) -> bool {
        disclosure::is_open(&self.cx, host)
    }

    /// Set the `open` property: a silent transition that still syncs attributes.
    pub fn set_open(&mut self, host: NodeId, open: bool) -> Result<(), ElementError> {
        self.disclosure(host, "set_open")?;
        if open {
            self.set_attribute(host, "open", "");
        } else {
            self.remove_attribute(host, "open");
        }
        Ok(())
    }

    fn transition(
        &mut self,
        host: NodeId,
        operation: &'static str,
        origin: Origin,
        f: fn(&mut Context, NodeId, Origin) -> bool,
    ) -> Result<bool, ElementError> {
        self.disclosure(host, operation)?;
        let changed = f(&mut self.cx, host, origin);
        self.settle();
        Ok(changed)
    }

    /// Open without events. Returns whether it transitioned.
    pub fn show(&mut self, host: NodeId) -> Result<bool, ElementError> {
        self.transition(host, "show", Origin::Programmatic, disclosure::show)
    }

    /// Close without events. Returns whether it transitioned.
    pub fn hide(&mut self, host: NodeId) -> Result<bool, ElementError> {
        self.transition(host, "hide", Origin::Programmatic, disclosure::hide)
    }

    /// Open as a user would: cancelable `show`, then `shown`.
    pub fn show_with_event(&mut self, host: NodeId) -> Result<bool, ElementError> {
        self.transition(host, "show_with_event", Origin::User, disclosure::show)
    }

    /// Close as a user would: cancelable `hide`, then `hidden`.
    pub fn hide_with_event(&mut self, host: NodeId) -> Result<bool, ElementError> {
        self.transition(host, "hide_with_event", Origin::User, disclosure::hide)
    }

    // --- switch ---

    /// Whether the switch on `host` is checked.
    pub fn is_checked(&self, host: NodeId) -> bool {
        matches!(self.widgets.get(&host), Some(Widget::Switch(_)))
            && self.cx.doc.has_attribute(host, "checked")
    }

    /// Set the `checked` property without events.
    pub fn set_checked(&mut self, host: NodeId, checked: bool) -> Result<(), ElementError> {
        if !matches!(self.widget(host)?, Widget::Switch(_)) {
            return Err(self.unsupported(host, "set_checked"));
        }
        if checked {
            self.set_attribute(host, "checked", "");
        } else {
            self.remove_attribute(host, "checked");
        }
        Ok(())
    }

    // --- tabs ---

    /// Select `tab` without events. Returns `false` when `tab` is not one of the host's tabs.
    pub fn select_tab(&mut self, host: NodeId, tab: NodeId) -> Result<bool, ElementError> {
        self.widget(host)?;
        match self.widgets.get(&host) {
            Some(Widget::Tabs(tabs)) => Ok(tabs.select_tab(&mut self.cx.doc, tab)),
            _ => Err(self.unsupported(host, "select_tab")),
        }
    }

    /// The selected tab.
    pub fn selected_tab(&self, host: NodeId) -> Option<NodeId> {
        match self.widgets.get(&host)? {
            Widget::Tabs(tabs) => tabs.selected_tab(&self.cx.doc),
            _ => None,
        }
    }

    /// Current orientation of the tabs on `host`.
    pub fn orientation(&self, host: NodeId) -> Option<Orientation> {
        match self.widgets.get(&host)? {
            Widget::Tabs(tabs) => Some(tabs.orientation(&self.cx.doc)),
            _ => None,
        }
    }

    /// Set the `orientation` property.
    pub fn set_orientation(
        &mut self,
        host: NodeId,
        orientation: Orientation,
    ) -> Result<(), ElementError> {
        if !matches!(self.widget(host)?, Widget::Tabs(_)) {
            return Err(self.unsupported(host, "set_orientation"));
        }
        self.set_attribute(host, "orientation", orientation.as_str());
        Ok(())
    }

    // --- dropdown ---

    /// Mark `item` active in the dropdown on `host`.
    pub fn activate_menu_item(&mut self, host: NodeId, item: NodeId) -> Result<(), ElementError> {
        self.widget(host)?;
        match self.widgets.get(&host) {
            Some(Widget::Dropdown(d)) => {
                d.activate_item(&mut self.cx.doc, item);
                Ok(())
            }
            _ => Err(self.unsupported(host, "activate_menu_item")),
        }
    }

    /// Clear the active item of the dropdown on `host`.
    pub fn deactivate_all_menu_items(&mut self, host: NodeId) -> Result<(), ElementError> {
        self.widget(host)?;
        match self.widgets.get(&host) {
            Some(Widget::Dropdown(d)) => {
                d.deactivate_all(&mut self.cx.doc);
                Ok(())
            }
            _ => Err(self.unsupported(host, "deactivate_all_menu_items")),
        }
    }

    /// The active item of the dropdown on `host`.
    pub fn active_menu_item(&self, host: NodeId) -> Option<NodeId> {
        match self.widgets.get(&host)? {
            Widget::Dropdown(d) => d.active_item(&self.cx.doc),
            _ => None,
        }
    }

    /// Whether `item` is the active item of the dropdown on `host`.
    pub fn menu_item_active(&self, host: NodeId, item: NodeId) -> bool {
        match self.widgets.get(&host) {
            Some(Widget::Dropdown(d)) => d.is_item_active(&self.cx.doc, item),
            _ => false,
        }
    }

    // --- floating panels ---

    /// Set the `active` property of the floating panel on `host`.
    pub fn set_floating_active(&mut self, host: NodeId, active: bool) -> Result<(), ElementError> {
        if !matches!(self.widget(host)?, Widget::FloatingPanel(_)) {
            return Err(self.unsupported(host, "set_floating_active"));
        }
        if active {
            self.set_attribute(host, "active", "");
        } else {
            self.remove_attribute(host, "active");
        }
        Ok(())
    }

    /// Advance one animation frame: deferred restarts run and active floating
    /// panels are repositioned.
    pub fn animation_frame(&mut self) {
        floating_panel::animation_frame(&mut self.cx);
    }

    /// Frames elapsed.
    pub fn frame(&self) -> u64 {
        self.cx.frame
    }

    /// Whether `signal` has completed.
    pub fn is_complete(&self, signal: FrameSignal) -> bool {
        signal.is_complete_at(self.cx.frame)
    }

    // --- events ---

    /// Call `callback` for custom events named `name` (such as `twc-popover:show`)
    /// reaching `node`.
    pub fn listen(&mut self, node: NodeId, name: &str, callback: Listener) -> ListenerId {
        self.cx.events.listen(node, name, callback)
    }

    /// Remove a listener.
    pub fn unlisten(&mut self, id: ListenerId) -> bool {
        self.cx.events.unlisten(id)
    }

    /// Custom events emitted since the log was last drained.
    pub fn events(&self) -> &[CustomEvent] {
        self.cx.events.events()
    }

    /// Drain the custom event log.
    pub fn take_events(&mut self) -> Vec<CustomEvent> {
        self.cx.events.take_events()
    }

    // --- gestures ---

    fn center(&self, node: NodeId) -> Option<Point> {
        self.cx.doc.bounds(node).map(|b| b.center())
    }

    /// `HTMLElement.click()`: a click without pointer movement or focus.
    pub fn click(&mut self, node: NodeId) -> InputEvent {
        self.dispatch(InputEvent::new(InputKind::Click, node))
    }

    /// Press, release, and click at the center of `node`.
    pub fn mouse_click(&mut self, node: NodeId) -> InputEvent {
        let at = self.center(node).unwrap_or(Point::ZERO);
        self.mouse_click_at(node, at)
    }

    /// Press, release, and click `node` at a viewport position.
    pub fn mouse_click_at(&mut self, node: NodeId, position: Point) -> InputEvent {
        for kind in [InputKind::PointerDown, InputKind::PointerUp] {
            self.dispatch(InputEvent::new(kind, node).with_position(position));
        }
        self.dispatch(InputEvent::new(InputKind::Click, node).with_position(position))
    }

    /// Key press on the focused element, or the body.
    pub fn press_key(&mut self, key: Key) -> InputEvent {
        self.press_key_with(key, Modifiers::empty())
    }

    /// Key press with modifiers.
    pub fn press_key_with(&mut self, key: Key, modifiers: Modifiers) -> InputEvent {
        let target = self.cx.doc.active_element().unwrap_or(self.cx.doc.body());
        self.dispatch(InputEvent::new(InputKind::KeyDown { key, modifiers }, target))
    }

    /// Move the pointer over `node`.
    pub fn hover(&mut self, node: NodeId) -> InputEvent {
        let mut event = InputEvent::new(InputKind::PointerMove, node);
        event.position = self.center(node);
        self.dispatch(event)
    }

    /// Move the pointer out of the document.
    pub fn unhover(&mut self) {
        for change in self.hover.clear() {
            if let PathChange::Leave(node) = change {
                self.route(InputEvent::new(InputKind::PointerLeave, node));
            }
        }
        self.drain();
    }

    /// Focus `node` as a script would. Returns whether it holds focus afterwards.
    pub fn focus(&mut self, node: NodeId) -> bool {
        let focused = self.cx.doc.focus(node);
        self.settle();
        focused
    }

    /// Drop focus to the body.
    pub fn blur(&mut self) {
        self.cx.doc.blur();
        self.settle();
    }

    // --- routing ---

    /// Route `event` and every follow-up it causes. Returns `event` as the handlers
    /// left it.
    pub fn dispatch(&mut self, event: InputEvent) -> InputEvent {
        let event = self.route(event);
        self.drain();
        event
    }

    fn drain(&mut self) {
        while let Some(next) = self.cx.pending.pop_front() {
            self.route(next);
        }
    }

    /// Turn focus moves made outside of routing into events.
    fn settle(&mut self) {
        self.queue_focus_moves();
        self.drain();
    }

    fn queue_focus_moves(&mut self) {
        let moves = self.cx.doc.take_focus_moves();
        let doc = &self.cx.doc;
        let mut queued = Vec::new();
        for m in moves {
            if let Some(from) = m.from.filter(|&n| doc.is_connected(n)) {
                queued.push(InputEvent::new(InputKind::Blur, from).with_related_target(m.to));
            }
            if let Some(to) = m.to {
                queued.push(InputEvent::new(InputKind::Focus, to).with_related_target(m.from));
                queued.push(InputEvent::new(InputKind::FocusIn, to).with_related_target(m.from));
            }
        }
        self.cx.pending.extend(queued);
    }

    fn route(&mut self, mut event: InputEvent) -> InputEvent {
        if !self.cx.doc.is_connected(event.target) {
            log::trace!("dropping {:?}: target not connected", event.kind);
            return event;
        }
        if event.kind == InputKind::Click && is_disabled_control(&self.cx.doc, event.target) {
            log::trace!("dropping click on disabled {:?}", event.target);
            return event;
        }
        if event.kind == InputKind::PointerMove {
            let path = self.cx.doc.path(event.target);
            for change in self.hover.update_path(&path) {
                if let PathChange::Leave(node) = change {
                    self.route(InputEvent::new(InputKind::PointerLeave, node));
                }
            }
        }

        let Self { cx, widgets, .. } = self;
        let bubbles = event.kind.bubbles();
        let root = cx.doc.root();
        let seq = dispatch::sequence(&cx.doc, event.target, true);
        dispatch::run(&seq, &mut event, |d, event| {
            if d.phase == Phase::Capture {
                return Outcome::Continue;
            }
            if event.kind == InputKind::Click {
                run_actions(cx, widgets, d.node);
            }
            if let Some(widget) = widgets.get_mut(&d.node) {
                widget.handle_input(cx, event);
            }
            if bubbles && d.node == root {
                document_listeners(cx, widgets, event);
            }
            if event.is_propagation_stopped() {
                Outcome::Stop
            } else {
                Outcome::Continue
            }
        });

        if !event.is_default_prevented() {
            default_action(cx, &event);
        }
        self.queue_focus_moves();
        event
    }
}

fn is_disabled_control(doc: &Document, node: NodeId) -> bool {
    matches!(
        doc.tag(node),
        Some("button" | "input" | "select" | "textarea")
    ) && doc.has_attribute(node, "disabled")
}

/// Invoke `click->tag#method` bindings declared on `node`.
fn run_actions(cx: &mut Context, widgets: &mut HashMap<NodeId, Widget>, node: NodeId) {
    for action in binding::actions(&cx.doc, node) {
        if action.event != "click" {
            continue;
        }
        let Some(host) = binding::closest_host(&cx.doc, node, &action.element) else {
            continue;
        };
        let Some(widget) = widgets.get_mut(&host) else {
            continue;
        };
        if let Err(e) = widget.invoke(cx, host, &action.method, Origin::User) {
            log::debug!("action {}#{} on {host:?}: {e}", action.element, action.method);
        }
    }
}

fn document_listeners(
    cx: &mut Context,
    widgets: &mut HashMap<NodeId, Widget>,
    event: &mut InputEvent,
) {
    match event.kind {
        InputKind::PointerDown | InputKind::FocusIn => {
            let violations = cx.outside.violations(&cx.doc, event);
            outside::run(&violations, event, |v, event| {
                disclosure::on_outside(cx, v, event);
            });
        }
        InputKind::KeyDown { key: Key::Tab, .. } => {
            cx.traps.handle_key(&mut cx.doc, event);
        }
        InputKind::PointerUp => {
            for widget in widgets.values_mut() {
                if let Widget::Tooltip(t) = widget {
                    t.pointer_released();
                }
            }
        }
        _ => {}
    }
}

fn default_action(cx: &mut Context, event: &InputEvent) {
    let doc = &mut cx.doc;
    match event.kind {
        InputKind::PointerDown => {
            match doc.closest(event.target, |n| is_focusable(doc, n)) {
                Some(node) => {
                    doc.focus(node);
                }
                None => doc.blur(),
            }
        }
        InputKind::KeyDown {
            key: Key::Tab,
            modifiers,
        } => {
            let order = tabbable_descendants(doc, doc.root());
            if order.is_empty() {
                return;
            }
            let len = order.len();
            let backwards = modifiers.contains(Modifiers::SHIFT);
            let current = doc
                .active_element()
                .and_then(|a| order.iter().position(|&n| n == a));
            let next = match current {
                Some(i) if backwards => (i + len - 1) % len,
                Some(i) => (i + 1) % len,
                None if backwards => len - 1,
                None => 0,
            };
            doc.focus(order[next]);
        }
        InputKind::KeyDown { key: Key::Enter, .. }
            if doc.is_tag(event.target, "button")
                || (doc.is_tag(event.target, "a") && doc.has_attribute(event.target, "href")) =>
        {
            cx.queue_click(event.target);
        }
        InputKind::KeyDown { key: Key::Space, .. } if doc.is_tag(event.target, "button") => {
            cx.queue_click(event.target);
        }
        _ => {}
    }
}
