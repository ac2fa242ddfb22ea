// Copyright 2025 the Twine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by the element runtime.

use alloc::string::String;
use core::fmt;

use twine_dom::NodeId;

/// Why an element operation failed.
#[derive(Clone, PartialEq, Eq)]
pub enum ElementError {
    /// A required `data-target` child is missing.
    MissingTarget {
        /// Host tag, such as `twc-popover`.
        element: &'static str,
        /// Target name, such as `panel`.
        target: &'static str,
    },
    /// The host tag does not name a known element.
    UnknownElement(String),
    /// No element is mounted on this host.
    NotMounted(NodeId),
    /// The handle no longer refers to a live node.
    StaleNode(NodeId),
    /// The mounted element does not support the operation.
    Unsupported {
        /// Host tag.
        element: &'static str,
        /// Operation name.
        operation: &'static str,
    },
}

impl fmt::Debug for ElementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingTarget { element, target } => {
                write!(f, "MissingTarget {{ element: {element:?}, target: {target:?} }}")
            }
            Self::UnknownElement(tag) => write!(f, "UnknownElement({tag:?})"),
            Self::NotMounted(id) => write!(f, "NotMounted({id:?})"),
            Self::StaleNode(id) => write!(f, "StaleNode({id:?})"),
            Self::Unsupported { element, operation } => {
                write!(f, "Unsupported {{ element: {element:?}, operation: {operation:?} }}")
            }
        }
    }
}

impl fmt::Display for ElementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingTarget { element, target } => {
                write!(f, "`{element}` requires a `{element}.{target}` target")
            }
            Self::UnknownElement(tag) => write!(f, "`{tag}` is not a known element"),
            Self::NotMounted(id) => write!(f, "no element is mounted on {id:?}"),
            Self::StaleNode(id) => write!(f, "{id:?} does not refer to a live node"),
            Self::Unsupported { element, operation } => {
                write!(f, "`{element}` does not support `{operation}`")
            }
        }
    }
}

impl core::error::Error for ElementError {}
