// Copyright 2025 the Twine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dispatch sequences: walk capture → target → bubble and honor stop outcomes.
//!
//! [`sequence`] builds the propagation path of an input event through the document:
//!
//! - Capture entries from the root down to the target's parent.
//! - One target entry.
//! - Bubble entries from the target's parent back up to the root, for bubbling kinds.
//!
//! [`run`] walks a sequence and applies simple propagation rules:
//!
//! - [`Outcome::Stop`] aborts propagation immediately.
//! - [`Outcome::StopAndConsume`] aborts propagation and returns `true`.
//! - Returns `true` if consumed; otherwise `false` (for both `Continue` and `Stop`).
//!
//! Default prevention is not an outcome: handlers flag it on the event and the
//! caller checks it after `run`.
//!
//! ## Minimal example
//!
//! ```
//! use twine_dom::Document;
//! use twine_elements::dispatch::{self, Outcome, Phase};
//!
//! let mut doc = Document::new();
//! let button = doc.create_element("button");
//! doc.append_child(doc.body(), button);
//!
//! let seq = dispatch::sequence(&doc, button, true);
//! let mut seen = Vec::new();
//! let consumed = dispatch::run(&seq, &mut (), |d, _| {
//!     seen.push(d.phase);
//!     Outcome::Continue
//! });
//! assert!(!consumed);
//! assert_eq!(
//!     seen,
//!     [Phase::Capture, Phase::Capture, Phase::Target, Phase::Bubble, Phase::Bubble]
//! );
//! ```

use smallvec::SmallVec;
use twine_dom::{Document, NodeId};

/// Propagation phase.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Root towards the target.
    Capture,
    /// At the target.
    Target,
    /// Target towards the root.
    Bubble,
}

/// What a handler wants to happen next.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Outcome {
    /// Keep propagating.
    #[default]
    Continue,
    /// Stop propagating.
    Stop,
    /// Stop propagating and report the event as consumed.
    StopAndConsume,
}

/// One step of a dispatch sequence.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Dispatch {
    /// Phase of this step.
    pub phase: Phase,
    /// Node whose handlers run.
    pub node: NodeId,
}

impl Dispatch {
    /// Capture step at `node`.
    pub fn capture(node: NodeId) -> Self {
        Self {
            phase: Phase::Capture,
            node,
        }
    }

    /// Target step at `node`.
    pub fn target(node: NodeId) -> Self {
        Self {
            phase: Phase::Target,
            node,
        }
    }

    /// Bubble step at `node`.
    pub fn bubble(node: NodeId) -> Self {
        Self {
            phase: Phase::Bubble,
            node,
        }
    }
}

/// Propagation sequence for an event aimed at `target`.
pub fn sequence(doc: &Document, target: NodeId, bubbles: bool) -> SmallVec<[Dispatch; 16]> {
    let ancestors: SmallVec<[NodeId; 16]> = doc.ancestors(target).skip(1).collect();
    let mut seq: SmallVec<[Dispatch; 16]> =
        ancestors.iter().rev().map(|&n| Dispatch::capture(n)).collect();
    seq.push(Dispatch::target(target));
    if bubbles {
        seq.extend(ancestors.iter().map(|&n| Dispatch::bubble(n)));
    }
    seq
}

/// Run a handler over a dispatch sequence and honor stop/consume outcomes.
pub fn run<E>(
    seq: &[Dispatch],
    event: &mut E,
    mut handler: impl FnMut(&Dispatch, &mut E) -> Outcome,
) -> bool {
    for d in seq {
        match handler(d, event) {
            Outcome::Continue => {}
            Outcome::Stop => return false,
            Outcome::StopAndConsume => return true,
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    fn tree() -> (Document, NodeId, NodeId) {
        let mut doc = Document::new();
        let outer = doc.create_element("div");
        let inner = doc.create_element("button");
        doc.append_child(doc.body(), outer);
        doc.append_child(outer, inner);
        (doc, outer, inner)
    }

    #[test]
    fn non_bubbling_sequences_end_at_the_target() {
        let (doc, outer, inner) = tree();
        let seq = sequence(&doc, inner, false);
        assert_eq!(seq.last(), Some(&Dispatch::target(inner)));
        assert_eq!(seq[seq.len() - 2], Dispatch::capture(outer));
    }

    #[test]
    fn stop_in_target_aborts_bubble_phase() {
        let (doc, outer, inner) = tree();
        let seq = sequence(&doc, inner, true);
        let mut seen: Vec<Dispatch> = Vec::new();
        let consumed = run(&seq, &mut (), |d, _| {
            seen.push(*d);
            if d.phase == Phase::Target {
                Outcome::Stop
            } else {
                Outcome::Continue
            }
        });
        assert!(!consumed);
        assert_eq!(
            seen,
            vec![
                Dispatch::capture(doc.root()),
                Dispatch::capture(doc.body()),
                Dispatch::capture(outer),
                Dispatch::target(inner),
            ]
        );
    }

    #[test]
    fn consume_reports_true() {
        let (doc, outer, inner) = tree();
        let seq = sequence(&doc, inner, true);
        let consumed = run(&seq, &mut (), |d, _| {
            if d.phase == Phase::Bubble && d.node == outer {
                Outcome::StopAndConsume
            } else {
                Outcome::Continue
            }
        });
        assert!(consumed);
    }
}
