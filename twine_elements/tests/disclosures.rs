// Copyright 2025 the Twine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the open/closed elements: dialog, popover, accordion, tooltip.
//!
//! Each test builds a small document, mounts it, and drives it with gestures the
//! way a user (or a script setting properties) would.

use kurbo::{Point, Rect};
use twine_dom::{Document, InputEvent, InputKind, Key, NodeId};
use twine_elements::{CustomEvent, ElementError, EventKind, Ui};

fn el(doc: &mut Document, parent: NodeId, tag: &str) -> NodeId {
    let node = doc.create_element(tag);
    doc.append_child(parent, node);
    node
}

fn part(doc: &mut Document, parent: NodeId, tag: &str, target: &str) -> NodeId {
    let node = el(doc, parent, tag);
    doc.set_attribute(node, "data-target", target);
    node
}

fn kinds(ui: &mut Ui, host: NodeId) -> Vec<EventKind> {
    ui.take_events()
        .into_iter()
        .filter(|e| e.host == host)
        .map(|e| e.kind)
        .collect()
}

struct Popover {
    host: NodeId,
    trigger: NodeId,
    panel: NodeId,
}

fn popover(doc: &mut Document, parent: NodeId) -> Popover {
    let host = el(doc, parent, "twc-popover");
    let trigger = part(doc, host, "button", "twc-popover.trigger");
    let panel = part(doc, host, "div", "twc-popover.panel");
    Popover {
        host,
        trigger,
        panel,
    }
}

struct Dialog {
    host: NodeId,
    dialog: NodeId,
}

fn dialog(doc: &mut Document, parent: NodeId) -> Dialog {
    let host = el(doc, parent, "twc-dialog");
    let dialog = part(doc, host, "div", "twc-dialog.dialog");
    Dialog { host, dialog }
}

#[test]
fn dialog_property_is_silent_and_traps_focus() {
    let mut doc = Document::new();
    let body = doc.body();
    let opener = el(&mut doc, body, "button");
    let d = dialog(&mut doc, body);
    let close = el(&mut doc, d.dialog, "button");
    doc.set_attribute(close, "data-action", "click->twc-dialog#hide");

    let mut ui = Ui::with_document(doc);
    ui.mount_all().unwrap();
    ui.focus(opener);

    assert_eq!(ui.show(d.host), Ok(true));
    assert!(ui.is_open(d.host));
    let doc = ui.document();
    assert!(doc.has_attribute(d.dialog, "open"));
    assert_eq!(doc.attribute(d.dialog, "data-headlessui-state"), Some("open"));
    assert_eq!(doc.active_element(), Some(close), "first tabbable is focused");
    assert_eq!(doc.style(body, "overflow"), Some("hidden"));
    assert!(ui.events().is_empty(), "property writes do not emit");

    // Tab cycles inside the dialog.
    ui.press_key(Key::Tab);
    assert_eq!(ui.document().active_element(), Some(close));

    // The declarative hide action is a user transition.
    ui.click(close);
    assert!(!ui.is_open(d.host));
    assert_eq!(kinds(&mut ui, d.host), [EventKind::Hide, EventKind::Hidden]);
    assert_eq!(ui.document().active_element(), Some(opener));
    assert_eq!(ui.document().style(body, "overflow"), None);
}

#[test]
fn open_attribute_at_mount_opens_without_events() {
    let mut doc = Document::new();
    let body = doc.body();
    let d = dialog(&mut doc, body);
    doc.set_attribute(d.host, "open", "");

    let mut ui = Ui::with_document(doc);
    ui.mount_all().unwrap();
    assert!(ui.is_open(d.host));
    assert_eq!(ui.document().active_element(), Some(d.dialog));
    assert!(ui.events().is_empty());

    ui.set_open(d.host, false).unwrap();
    assert!(!ui.is_open(d.host));
    assert!(!ui.document().has_attribute(d.dialog, "open"));
    assert!(ui.events().is_empty());
}

#[test]
fn outside_press_closes_only_the_innermost_dialog() {
    let mut doc = Document::new();
    let body = doc.body();
    let outside = el(&mut doc, body, "p");
    let outer = dialog(&mut doc, body);
    let inner = dialog(&mut doc, outer.dialog);

    let mut ui = Ui::with_document(doc);
    ui.mount_all().unwrap();
    ui.show(outer.host).unwrap();
    ui.show(inner.host).unwrap();
    assert_eq!(ui.document().active_element(), Some(inner.dialog));

    ui.mouse_click(outside);
    assert!(!ui.is_open(inner.host));
    assert!(ui.is_open(outer.host), "the press is swallowed by the inner dialog");
    assert_eq!(ui.document().style(body, "overflow"), Some("hidden"));
    assert_eq!(ui.document().active_element(), Some(outer.dialog));

    ui.mouse_click(outside);
    assert!(!ui.is_open(outer.host));
    assert_eq!(ui.document().style(body, "overflow"), None, "lock released last");
}

#[test]
fn outside_press_closes_the_sibling_dialog_opened_last() {
    let mut doc = Document::new();
    let body = doc.body();
    let outside = el(&mut doc, body, "p");
    let first = dialog(&mut doc, body);
    let second = dialog(&mut doc, body);

    let mut ui = Ui::with_document(doc);
    ui.mount_all().unwrap();
    ui.show(second.host).unwrap();
    ui.show(first.host).unwrap();
    assert_eq!(ui.document().active_element(), Some(first.dialog));

    ui.mouse_click(outside);
    assert!(!ui.is_open(first.host));
    assert!(ui.is_open(second.host));
    assert_eq!(ui.document().active_element(), Some(second.dialog));
    assert_eq!(ui.document().style(body, "overflow"), Some("hidden"));
}

#[test]
fn backdrop_click_closes_dialog() {
    let mut doc = Document::new();
    let body = doc.body();
    let d = dialog(&mut doc, body);
    doc.set_bounds(d.dialog, Rect::new(100.0, 100.0, 300.0, 300.0));

    let mut ui = Ui::with_document(doc);
    ui.mount_all().unwrap();
    ui.show(d.host).unwrap();

    ui.mouse_click_at(d.dialog, Point::new(150.0, 150.0));
    assert!(ui.is_open(d.host), "clicks inside the dialog box keep it open");

    ui.mouse_click_at(d.dialog, Point::new(10.0, 10.0));
    assert!(!ui.is_open(d.host));
    assert_eq!(kinds(&mut ui, d.host), [EventKind::Hide, EventKind::Hidden]);
}

#[test]
fn escape_in_dialog_leaves_enclosing_popover_open() {
    let mut doc = Document::new();
    let body = doc.body();
    let p = popover(&mut doc, body);
    let d = dialog(&mut doc, p.panel);
    let field = el(&mut doc, d.dialog, "input");

    let mut ui = Ui::with_document(doc);
    ui.mount_all().unwrap();
    ui.mouse_click(p.trigger);
    assert!(ui.is_open(p.host));
    ui.show(d.host).unwrap();
    assert_eq!(ui.document().active_element(), Some(field));

    ui.press_key(Key::Escape);
    assert!(!ui.is_open(d.host));
    assert!(ui.is_open(p.host));

    ui.press_key(Key::Escape);
    assert!(!ui.is_open(p.host));
    assert_eq!(ui.document().active_element(), Some(p.trigger));
}

#[test]
fn opening_a_popover_closes_unrelated_ones() {
    let mut doc = Document::new();
    let body = doc.body();
    let a = popover(&mut doc, body);
    let b = popover(&mut doc, body);

    let mut ui = Ui::with_document(doc);
    ui.mount_all().unwrap();
    ui.mouse_click(a.trigger);
    assert!(ui.is_open(a.host));
    assert_eq!(ui.document().attribute(a.trigger, "aria-expanded"), Some("true"));
    assert_eq!(ui.document().active_element(), Some(a.panel));
    ui.take_events();

    ui.mouse_click(b.trigger);
    assert!(!ui.is_open(a.host));
    assert!(ui.is_open(b.host));
    assert_eq!(ui.document().attribute(a.trigger, "aria-expanded"), Some("false"));
    let names: Vec<String> = ui.take_events().iter().map(CustomEvent::name).collect();
    assert_eq!(
        names,
        [
            "twc-popover:hide",
            "twc-popover:hidden",
            "twc-popover:show",
            "twc-popover:shown"
        ]
    );

    // Programmatic opens cascade silently.
    ui.show(a.host).unwrap();
    assert!(ui.is_open(a.host));
    assert!(!ui.is_open(b.host));
    assert!(ui.events().is_empty());
}

#[test]
fn nested_popovers_close_inside_out() {
    let mut doc = Document::new();
    let body = doc.body();
    let parent = popover(&mut doc, body);
    let child = popover(&mut doc, parent.panel);

    let mut ui = Ui::with_document(doc);
    ui.mount_all().unwrap();
    ui.mouse_click(parent.trigger);
    ui.mouse_click(child.trigger);
    assert!(ui.is_open(parent.host), "a nested popover keeps its parent open");
    assert!(ui.is_open(child.host));

    // Pressing the parent trigger dismisses the child, then toggles the parent.
    ui.mouse_click(parent.trigger);
    assert!(!ui.is_open(child.host));
    assert!(!ui.is_open(parent.host));

    ui.show(parent.host).unwrap();
    ui.show(child.host).unwrap();
    ui.take_events();
    ui.hide(parent.host).unwrap();
    assert!(!ui.is_open(child.host));
    assert!(!ui.is_open(parent.host));
    assert!(ui.events().is_empty());
}

#[test]
fn popover_activates_its_floating_panel() {
    let mut doc = Document::new();
    let body = doc.body();
    let p = popover(&mut doc, body);
    doc.set_attribute(p.trigger, "id", "menu-button");
    doc.set_bounds(p.trigger, Rect::new(100.0, 100.0, 180.0, 124.0));
    let floating = el(&mut doc, p.panel, "twc-floating-panel");
    doc.set_attribute(floating, "trigger-id", "menu-button");
    let content = part(&mut doc, floating, "div", "twc-floating-panel.panel");
    doc.set_bounds(content, Rect::new(0.0, 0.0, 120.0, 60.0));

    let mut ui = Ui::with_document(doc);
    assert_eq!(ui.mount_all(), Ok(2));
    assert!(!ui.document().has_attribute(floating, "active"));

    ui.mouse_click(p.trigger);
    let doc = ui.document();
    assert!(doc.has_attribute(floating, "active"));
    assert_eq!(doc.style(content, "top"), Some("124px"));
    assert_eq!(doc.style(content, "left"), Some("100px"));
    assert_eq!(
        doc.attribute(floating, "data-current-placement"),
        Some("bottom-start")
    );

    ui.press_key(Key::Escape);
    let doc = ui.document();
    assert!(!doc.has_attribute(floating, "active"));
    assert!(!doc.has_attribute(floating, "data-current-placement"));
}

#[test]
fn accordion_transitions_can_be_canceled() {
    let mut doc = Document::new();
    let body = doc.body();
    let host = el(&mut doc, body, "twc-accordion");
    let trigger = part(&mut doc, host, "button", "twc-accordion.trigger");
    let panel = part(&mut doc, host, "div", "twc-accordion.panel");

    let mut ui = Ui::with_document(doc);
    ui.mount_all().unwrap();
    let doc = ui.document();
    assert_eq!(doc.attribute(panel, "role"), Some("region"));
    assert_eq!(doc.attribute(trigger, "aria-controls"), doc.attribute(panel, "id"));
    assert_eq!(doc.attribute(panel, "aria-labelledby"), doc.attribute(trigger, "id"));

    let veto = ui.listen(
        host,
        "twc-accordion:show",
        Box::new(|e: &mut CustomEvent| e.prevent_default()),
    );
    ui.click(trigger);
    assert!(!ui.is_open(host));
    assert_eq!(ui.document().attribute(trigger, "aria-expanded"), Some("false"));
    assert_eq!(kinds(&mut ui, host), [EventKind::Show]);

    assert!(ui.unlisten(veto));
    ui.click(trigger);
    assert!(ui.is_open(host));
    assert_eq!(ui.document().attribute(host, "data-headlessui-state"), Some("open"));
    assert_eq!(kinds(&mut ui, host), [EventKind::Show, EventKind::Shown]);

    ui.listen(
        host,
        "twc-accordion:hide",
        Box::new(|e: &mut CustomEvent| e.prevent_default()),
    );
    ui.click(trigger);
    assert!(ui.is_open(host));
    assert_eq!(kinds(&mut ui, host), [EventKind::Hide]);
}

#[test]
fn canceled_popover_show_leaves_focus_on_the_trigger() {
    let mut doc = Document::new();
    let body = doc.body();
    let p = popover(&mut doc, body);
    let inside = el(&mut doc, p.panel, "button");
    let after = el(&mut doc, body, "button");

    let mut ui = Ui::with_document(doc);
    ui.mount_all().unwrap();
    ui.listen(
        p.host,
        "twc-popover:show",
        Box::new(|e: &mut CustomEvent| e.prevent_default()),
    );
    ui.mouse_click(p.trigger);
    assert!(!ui.is_open(p.host));
    assert_eq!(kinds(&mut ui, p.host), [EventKind::Show]);
    let doc = ui.document();
    assert_eq!(doc.active_element(), Some(p.trigger));
    assert_eq!(doc.attribute(p.trigger, "aria-expanded"), Some("false"));
    assert_ne!(doc.attribute(p.panel, "data-headlessui-state"), Some("open"));

    // No trap was acquired: Tab leaves the panel.
    ui.focus(inside);
    ui.press_key(Key::Tab);
    assert_eq!(ui.document().active_element(), Some(after));
}

#[test]
fn canceled_dialog_hide_keeps_lock_and_focus() {
    let mut doc = Document::new();
    let body = doc.body();
    let opener = el(&mut doc, body, "button");
    let outside = el(&mut doc, body, "p");
    let d = dialog(&mut doc, body);
    let field = el(&mut doc, d.dialog, "input");

    let mut ui = Ui::with_document(doc);
    ui.mount_all().unwrap();
    ui.focus(opener);
    ui.show(d.host).unwrap();
    assert_eq!(ui.document().active_element(), Some(field));
    let veto = ui.listen(
        d.host,
        "twc-dialog:hide",
        Box::new(|e: &mut CustomEvent| e.prevent_default()),
    );

    ui.press_key(Key::Escape);
    let press = ui.dispatch(InputEvent::new(InputKind::PointerDown, outside));
    assert!(press.is_default_prevented(), "modal dialogs swallow outside presses");
    ui.mouse_click(outside);
    assert_eq!(kinds(&mut ui, d.host), [EventKind::Hide; 3]);

    let doc = ui.document();
    assert!(ui.is_open(d.host));
    assert!(doc.has_attribute(d.host, "open"));
    assert!(doc.has_attribute(d.dialog, "open"));
    assert_eq!(doc.style(body, "overflow"), Some("hidden"));
    assert_eq!(doc.active_element(), Some(field));

    // The trap still holds.
    ui.press_key(Key::Tab);
    assert_eq!(ui.document().active_element(), Some(field));

    assert!(ui.unlisten(veto));
    ui.press_key(Key::Escape);
    assert!(!ui.is_open(d.host));
    assert_eq!(ui.document().active_element(), Some(opener));
    assert_eq!(ui.document().style(body, "overflow"), None);
}

#[test]
fn only_the_last_of_three_sibling_popovers_stays_open() {
    let mut doc = Document::new();
    let body = doc.body();
    let [a, b, c] = [(); 3].map(|_| popover(&mut doc, body));

    let mut ui = Ui::with_document(doc);
    ui.mount_all().unwrap();
    ui.mouse_click(a.trigger);
    ui.mouse_click(b.trigger);
    assert!(!ui.is_open(a.host));
    assert!(ui.is_open(b.host));
    assert!(!ui.is_open(c.host));
    assert!(kinds(&mut ui, c.host).is_empty());

    ui.mouse_click(c.trigger);
    assert!(!ui.is_open(a.host));
    assert!(!ui.is_open(b.host));
    assert!(ui.is_open(c.host));
    for p in [&a, &b] {
        assert_eq!(ui.document().attribute(p.trigger, "aria-expanded"), Some("false"));
    }
}

#[test]
fn tooltip_follows_focus_and_hover() {
    let mut doc = Document::new();
    let body = doc.body();
    let host = el(&mut doc, body, "twc-tooltip");
    let trigger = part(&mut doc, host, "button", "twc-tooltip.trigger");
    let panel = part(&mut doc, host, "div", "twc-tooltip.panel");

    let mut ui = Ui::with_document(doc);
    ui.mount_all().unwrap();
    let doc = ui.document();
    assert_eq!(doc.attribute(panel, "role"), Some("tooltip"));
    assert_eq!(doc.attribute(trigger, "aria-describedby"), doc.attribute(panel, "id"));

    ui.focus(trigger);
    assert!(ui.is_open(host));
    ui.blur();
    assert!(!ui.is_open(host));

    ui.hover(trigger);
    assert!(ui.is_open(host));
    assert_eq!(ui.document().attribute(panel, "data-headlessui-state"), Some("open"));
    ui.unhover();
    assert!(!ui.is_open(host));
}

#[test]
fn pressing_the_tooltip_trigger_keeps_it_closed_until_release() {
    let mut doc = Document::new();
    let body = doc.body();
    let host = el(&mut doc, body, "twc-tooltip");
    let trigger = part(&mut doc, host, "button", "twc-tooltip.trigger");
    part(&mut doc, host, "div", "twc-tooltip.panel");

    let mut ui = Ui::with_document(doc);
    ui.mount_all().unwrap();
    ui.hover(trigger);
    assert!(ui.is_open(host));

    // The press hides it and the focus it causes does not reopen it.
    ui.mouse_click(trigger);
    assert!(!ui.is_open(host));
    assert_eq!(ui.document().active_element(), Some(trigger));

    ui.blur();
    ui.focus(trigger);
    assert!(ui.is_open(host), "keyboard focus after release shows it again");
}

#[test]
fn unmount_closes_silently_and_errors_are_reported() {
    let mut doc = Document::new();
    let body = doc.body();
    let p = popover(&mut doc, body);
    let broken = el(&mut doc, body, "twc-popover");
    let unknown = el(&mut doc, body, "twc-carousel");
    let switch = el(&mut doc, body, "twc-switch");
    part(&mut doc, switch, "button", "twc-switch.trigger");

    let mut ui = Ui::with_document(doc);
    ui.mount(p.host).unwrap();
    ui.mount(switch).unwrap();
    assert_eq!(
        ui.mount(broken),
        Err(ElementError::MissingTarget {
            element: "twc-popover",
            target: "trigger",
        })
    );
    assert_eq!(
        ui.mount(unknown),
        Err(ElementError::UnknownElement("twc-carousel".into()))
    );
    assert_eq!(
        ui.show(switch),
        Err(ElementError::Unsupported {
            element: "twc-switch",
            operation: "show",
        })
    );
    assert_eq!(ui.show(broken), Err(ElementError::NotMounted(broken)));

    ui.mouse_click(p.trigger);
    assert!(ui.is_open(p.host));
    ui.take_events();
    ui.unmount(p.host).unwrap();
    assert!(!ui.is_mounted(p.host));
    assert!(!ui.is_open(p.host));
    assert!(ui.events().is_empty());
    assert_eq!(ui.document().active_element(), Some(p.trigger));

    // Detached hosts no longer react.
    ui.click(p.trigger);
    assert!(!ui.is_open(p.host));
}
