// Copyright 2025 the Twine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Declarative bindings between hosts and their children.
//!
//! Targets: a child is bound to host `H` with tag `T` as `name` when its
//! `data-target` token list contains `T.name` and the closest `T` above it is `H`.
//! Nested hosts of the same tag therefore never steal each other's targets.
//!
//! Actions: a `data-action` token `click->T#method` invokes `method` on the closest
//! `T` at or above the element when a click passes through it.
//!
//! ```
//! use twine_dom::Document;
//! use twine_elements::binding;
//!
//! let mut doc = Document::new();
//! let host = doc.create_element("twc-popover");
//! let close = doc.create_element("button");
//! doc.append_child(doc.body(), host);
//! doc.append_child(host, close);
//! doc.set_attribute(close, "data-target", "twc-popover.close");
//! doc.set_attribute(close, "data-action", "click->twc-popover#hide");
//!
//! assert_eq!(binding::target(&doc, host, "twc-popover", "close"), Some(close));
//! let actions = binding::actions(&doc, close);
//! assert_eq!(actions[0].method, "hide");
//! ```

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use smallvec::SmallVec;
use twine_dom::{Document, NodeId};

use crate::error::ElementError;

fn is_bound(doc: &Document, host: NodeId, tag: &str, name: &str, node: NodeId) -> bool {
    let matches_token = doc
        .attribute(node, "data-target")
        .is_some_and(|v| {
            v.split_ascii_whitespace()
                .any(|t| t.split_once('.') == Some((tag, name)))
        });
    matches_token && doc.ancestors(node).skip(1).find(|&a| doc.is_tag(a, tag)) == Some(host)
}

/// First child of `host` bound as `name`, in document order.
pub fn target(doc: &Document, host: NodeId, tag: &str, name: &str) -> Option<NodeId> {
    doc.descendants(host)
        .find(|&n| is_bound(doc, host, tag, name, n))
}

/// Every child of `host` bound as `name`, in document order.
pub fn targets(doc: &Document, host: NodeId, tag: &str, name: &str) -> Vec<NodeId> {
    doc.descendants(host)
        .filter(|&n| is_bound(doc, host, tag, name, n))
        .collect()
}

/// Like [`target`], failing with [`ElementError::MissingTarget`].
pub fn require_target(
    doc: &Document,
    host: NodeId,
    tag: &'static str,
    name: &'static str,
) -> Result<NodeId, ElementError> {
    target(doc, host, tag, name).ok_or(ElementError::MissingTarget {
        element: tag,
        target: name,
    })
}

/// A parsed `data-action` token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Action {
    /// DOM event name, such as `click`.
    pub event: String,
    /// Host tag.
    pub element: String,
    /// Method to invoke on the host.
    pub method: String,
}

impl Action {
    /// Parse `event->element#method`.
    pub fn parse(token: &str) -> Option<Self> {
        let (event, rest) = token.split_once("->")?;
        let (element, method) = rest.split_once('#')?;
        if event.is_empty() || element.is_empty() || method.is_empty() {
            return None;
        }
        Some(Self {
            event: event.to_string(),
            element: element.to_ascii_lowercase(),
            method: method.to_string(),
        })
    }
}

/// Actions declared on `node`. Malformed tokens are skipped.
pub fn actions(doc: &Document, node: NodeId) -> SmallVec<[Action; 1]> {
    doc.attribute(node, "data-action")
        .map(|v| v.split_ascii_whitespace().filter_map(Action::parse).collect())
        .unwrap_or_default()
}

/// Closest element at or above `node` with the given tag.
pub fn closest_host(doc: &Document, node: NodeId, tag: &str) -> Option<NodeId> {
    doc.closest_tag(node, tag)
}
