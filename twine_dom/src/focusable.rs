// Copyright 2025 the Twine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Focusability predicates and sequential (tab) order.
//!
//! Three notions of "focusable" are used by the widgets:
//!
//! - [`is_focusable`]: the element accepts programmatic focus (native interactive
//!   elements that are not disabled, or anything with a `tabindex`).
//! - [`is_tabbable`]: focusable and reachable with the Tab key (`tabindex` not negative).
//! - [`is_loosely_focusable`]: the element, or one of its ancestors, matches the native
//!   interactive set used to decide whether an outside click will move focus by itself.

use alloc::vec::Vec;

use crate::document::Document;
use crate::node::NodeId;

/// Whether the element is disabled, either natively or through `aria-disabled="true"`.
pub fn is_disabled(doc: &Document, id: NodeId) -> bool {
    doc.has_attribute(id, "disabled") || doc.attribute(id, "aria-disabled") == Some("true")
}

/// Parsed `tabindex` attribute.
pub fn tab_index(doc: &Document, id: NodeId) -> Option<i32> {
    doc.attribute(id, "tabindex")?.trim().parse().ok()
}

fn is_form_control(doc: &Document, id: NodeId) -> bool {
    matches!(
        doc.tag(id),
        Some("button" | "input" | "select" | "textarea")
    )
}

fn is_natively_focusable(doc: &Document, id: NodeId) -> bool {
    match doc.tag(id) {
        Some("button" | "select" | "textarea" | "iframe" | "summary") => true,
        Some("input") => doc.attribute(id, "type") != Some("hidden"),
        Some("a" | "area") => doc.has_attribute(id, "href"),
        _ => false,
    }
}

fn is_content_editable(doc: &Document, id: NodeId) -> bool {
    doc.attribute(id, "contenteditable")
        .is_some_and(|v| v.is_empty() || v.eq_ignore_ascii_case("true"))
}

/// Whether the element accepts focus.
pub fn is_focusable(doc: &Document, id: NodeId) -> bool {
    if !doc.is_alive(id) {
        return false;
    }
    if is_form_control(doc, id) && doc.has_attribute(id, "disabled") {
        return false;
    }
    tab_index(doc, id).is_some() || is_natively_focusable(doc, id) || is_content_editable(doc, id)
}

/// Whether the element takes part in sequential (Tab) navigation.
pub fn is_tabbable(doc: &Document, id: NodeId) -> bool {
    is_focusable(doc, id) && tab_index(doc, id).is_none_or(|i| i >= 0)
}

fn matches_loose_selector(doc: &Document, id: NodeId) -> bool {
    if doc.attribute(id, "tabindex").map(str::trim) == Some("-1") {
        return false;
    }
    if doc.has_attribute(id, "tabindex") || is_content_editable(doc, id) {
        return true;
    }
    match doc.tag(id) {
        Some("a" | "area") => doc.has_attribute(id, "href"),
        Some("iframe") => true,
        Some("button" | "input" | "select" | "textarea") => !doc.has_attribute(id, "disabled"),
        _ => false,
    }
}

/// Whether a pointer interaction on `id` will naturally move focus.
///
/// The element or one of its ancestors must be a native interactive element
/// (`a[href]`, `area[href]`, `iframe`, and non-disabled `button`, `input`, `select`,
/// `textarea`), carry a `tabindex` other than `-1`, or be content-editable.
/// Custom elements only count through an explicit `tabindex`.
pub fn is_loosely_focusable(doc: &Document, id: NodeId) -> bool {
    doc.ancestors(id).any(|n| matches_loose_selector(doc, n))
}

/// Tabbable strict descendants of `container`, in sequential navigation order.
///
/// Positive `tabindex` values come first in ascending order, followed by the rest in
/// document order.
pub fn tabbable_descendants(doc: &Document, container: NodeId) -> Vec<NodeId> {
    let mut out: Vec<NodeId> = doc
        .descendants(container)
        .filter(|&n| is_tabbable(doc, n))
        .collect();
    // Stable sort keeps document order among equal keys.
    out.sort_by_key(|&n| match tab_index(doc, n) {
        Some(i) if i > 0 => i,
        _ => i32::MAX,
    });
    out
}
