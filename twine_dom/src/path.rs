// Copyright 2025 the Twine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Enter/leave transitions from root→target path changes.
//!
//! Used for pointer hover (to synthesize `PointerLeave` for elements the pointer
//! left) and for focus (to know which subtrees focus entered or left).
//!
//! ## Minimal example
//! ```
//! use twine_dom::path::{PathChange, PathState};
//! let mut hover: PathState<u32> = PathState::new();
//! assert_eq!(hover.update_path(&[1, 2]), vec![PathChange::Enter(1), PathChange::Enter(2)]);
//! assert_eq!(hover.update_path(&[1, 3]), vec![PathChange::Leave(2), PathChange::Enter(3)]);
//! ```

use alloc::vec::Vec;

/// Tracks the current root→target path and computes the minimal transitions to a new one.
///
/// Ordering semantics:
/// - Leave transitions are emitted from inner-most to outer-most.
/// - Enter transitions are emitted from outer-most to inner-most.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PathState<K: Copy + Eq> {
    current: Vec<K>,
}

/// A single path transition.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PathChange<K> {
    /// The path now includes the node (outer→inner).
    Enter(K),
    /// The path no longer includes the node (inner→outer).
    Leave(K),
}

impl<K: Copy + Eq> PathState<K> {
    /// Create an empty state.
    pub fn new() -> Self {
        Self {
            current: Vec::new(),
        }
    }

    /// The current root→target path.
    pub fn current_path(&self) -> &[K] {
        &self.current
    }

    /// The innermost node of the current path.
    pub fn target(&self) -> Option<K> {
        self.current.last().copied()
    }

    /// Clear the path, returning leave transitions (inner→outer).
    pub fn clear(&mut self) -> Vec<PathChange<K>> {
        let out = self.current.iter().rev().map(|&k| PathChange::Leave(k)).collect();
        self.current.clear();
        out
    }

    /// Move to a new path and return the leave/enter transitions.
    pub fn update_path(&mut self, new_path: &[K]) -> Vec<PathChange<K>> {
        // Shared prefix length (LCA depth).
        let lca = self
            .current
            .iter()
            .zip(new_path)
            .take_while(|(a, b)| a == b)
            .count();

        let mut out = Vec::new();
        for &k in self.current[lca..].iter().rev() {
            out.push(PathChange::Leave(k));
        }
        for &k in &new_path[lca..] {
            out.push(PathChange::Enter(k));
        }
        self.current.clear();
        self.current.extend_from_slice(new_path);
        out
    }
}
