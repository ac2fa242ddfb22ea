// Copyright 2025 the Twine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for `twc-floating-panel` driven through the [`Ui`] frame clock.

use kurbo::Rect;
use twine_dom::{Document, NodeId};
use twine_elements::{ElementError, EventKind, Ui, UiConfig};

struct Panel {
    ui: Ui,
    host: NodeId,
    panel: NodeId,
    first: NodeId,
}

/// A floating panel anchored through `trigger-id` to one of two buttons.
fn floating(active: bool) -> Panel {
    let mut doc = Document::new();
    let body = doc.body();
    let first = doc.create_element("button");
    let second = doc.create_element("button");
    let host = doc.create_element("twc-floating-panel");
    let panel = doc.create_element("div");
    for node in [first, second, host] {
        doc.append_child(body, node);
    }
    doc.append_child(host, panel);
    doc.set_attribute(first, "id", "first");
    doc.set_attribute(second, "id", "second");
    doc.set_attribute(panel, "data-target", "twc-floating-panel.panel");
    doc.set_attribute(host, "trigger-id", "first");
    if active {
        doc.set_attribute(host, "active", "");
    }
    doc.set_bounds(first, Rect::new(100.0, 100.0, 180.0, 124.0));
    doc.set_bounds(second, Rect::new(400.0, 300.0, 480.0, 324.0));
    doc.set_bounds(panel, Rect::new(0.0, 0.0, 120.0, 60.0));

    let mut ui = Ui::with_config(
        doc,
        UiConfig::default().with_viewport(Rect::new(0.0, 0.0, 1024.0, 768.0)),
    );
    ui.mount_all().unwrap();
    Panel {
        ui,
        host,
        panel,
        first,
    }
}

fn at(p: &Panel) -> (Option<&str>, Option<&str>) {
    let doc = p.ui.document();
    (doc.style(p.panel, "left"), doc.style(p.panel, "top"))
}

#[test]
fn active_panel_follows_placement_attributes() {
    let mut p = floating(true);
    assert_eq!(p.ui.document().style(p.panel, "position"), Some("fixed"));
    assert_eq!(at(&p), (Some("100px"), Some("124px")));
    assert_eq!(
        p.ui.document().attribute(p.host, "data-current-placement"),
        Some("bottom-start")
    );

    p.ui.set_attribute(p.host, "placement", "right-start");
    assert_eq!(at(&p), (Some("180px"), Some("100px")));
    assert_eq!(
        p.ui.document().attribute(p.panel, "data-current-placement"),
        Some("right-start")
    );

    p.ui.set_attribute(p.host, "offset", "8");
    assert_eq!(at(&p), (Some("188px"), Some("100px")));
}

#[test]
fn frames_reposition_and_emit_changed() {
    let mut p = floating(true);
    p.ui.take_events();
    p.ui
        .document_mut()
        .set_bounds(p.first, Rect::new(200.0, 100.0, 280.0, 124.0));
    assert_eq!(at(&p), (Some("100px"), Some("124px")), "waits for a frame");

    p.ui.animation_frame();
    assert_eq!(p.ui.frame(), 1);
    assert_eq!(at(&p), (Some("200px"), Some("124px")));
    let names: Vec<String> = p.ui.take_events().iter().map(|e| e.name()).collect();
    assert_eq!(names, ["twc-floating-panel:changed"]);
}

#[test]
fn inactive_panels_stay_put() {
    let mut p = floating(false);
    assert_eq!(at(&p), (Some("0px"), Some("0px")));
    p.ui.animation_frame();
    assert_eq!(at(&p), (Some("0px"), Some("0px")));
    assert!(p.ui.events().is_empty());

    p.ui.set_floating_active(p.host, true).unwrap();
    assert_eq!(at(&p), (Some("100px"), Some("124px")));

    p.ui.set_floating_active(p.host, false).unwrap();
    assert!(!p.ui.document().has_attribute(p.host, "data-current-placement"));
    p.ui.take_events();
    p.ui
        .document_mut()
        .set_bounds(p.first, Rect::new(300.0, 100.0, 380.0, 124.0));
    p.ui.animation_frame();
    assert_eq!(at(&p), (Some("100px"), Some("124px")));
    assert!(p.ui.events().iter().all(|e| e.kind != EventKind::Changed));
}

#[test]
fn changing_the_trigger_restarts_after_a_frame() {
    let mut p = floating(true);
    p.ui.set_attribute(p.host, "trigger-id", "second");
    assert!(
        !p.ui.document().has_attribute(p.host, "data-current-placement"),
        "stopped until the next frame"
    );
    assert_eq!(at(&p), (Some("100px"), Some("124px")));

    p.ui.animation_frame();
    assert_eq!(at(&p), (Some("400px"), Some("324px")));
    assert_eq!(
        p.ui.document().attribute(p.host, "data-current-placement"),
        Some("bottom-start")
    );
}

#[test]
fn absolute_strategy_is_relative_to_the_positioned_ancestor() {
    let mut p = floating(true);
    let body = p.ui.document().body();
    let doc = p.ui.document_mut();
    doc.set_style(body, "position", "relative");
    doc.set_bounds(body, Rect::new(20.0, 10.0, 1024.0, 768.0));
    p.ui.set_attribute(p.host, "strategy", "absolute");
    assert_eq!(p.ui.document().style(p.panel, "position"), Some("absolute"));
    assert_eq!(at(&p), (Some("80px"), Some("114px")));
}

#[test]
fn floating_operations_check_the_element() {
    let mut p = floating(true);
    assert_eq!(
        p.ui.set_floating_active(p.first, true),
        Err(ElementError::NotMounted(p.first))
    );
    assert_eq!(
        p.ui.show(p.host),
        Err(ElementError::Unsupported {
            element: "twc-floating-panel",
            operation: "show",
        })
    );

    p.ui.unmount(p.host).unwrap();
    p.ui.animation_frame();
    assert!(!p.ui.document().has_attribute(p.host, "data-current-placement"));
}
