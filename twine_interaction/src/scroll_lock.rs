// Copyright 2025 the Twine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reference-counted document scroll lock.

use hashbrown::HashSet;
use twine_dom::Document;

use alloc::string::{String, ToString};

/// Token for one acquisition of the lock. Releasing it twice is a no-op.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ScrollLockToken(u64);

/// Prevents the document body from scrolling while any holder is active.
///
/// The first acquisition records the body's inline `overflow` and sets it to
/// `hidden`; releasing the last token puts the recorded value back.
///
/// ```
/// use twine_dom::Document;
/// use twine_interaction::ScrollLock;
///
/// let mut doc = Document::new();
/// let mut lock = ScrollLock::new();
/// let a = lock.acquire(&mut doc);
/// let b = lock.acquire(&mut doc);
/// lock.release(&mut doc, a);
/// assert_eq!(doc.style(doc.body(), "overflow"), Some("hidden"));
/// lock.release(&mut doc, b);
/// assert_eq!(doc.style(doc.body(), "overflow"), None);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ScrollLock {
    holders: HashSet<u64>,
    next: u64,
    saved: Option<Option<String>>,
}

impl ScrollLock {
    /// Create an unlocked lock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the lock.
    pub fn acquire(&mut self, doc: &mut Document) -> ScrollLockToken {
        let body = doc.body();
        if self.holders.is_empty() {
            self.saved = Some(doc.style(body, "overflow").map(ToString::to_string));
            doc.set_style(body, "overflow", "hidden");
            log::debug!("scroll locked");
        }
        self.next += 1;
        self.holders.insert(self.next);
        ScrollLockToken(self.next)
    }

    /// Give the lock back. Returns `false` for tokens already released.
    pub fn release(&mut self, doc: &mut Document, token: ScrollLockToken) -> bool {
        if !self.holders.remove(&token.0) {
            return false;
        }
        if self.holders.is_empty() {
            let body = doc.body();
            match self.saved.take().flatten() {
                Some(prev) => doc.set_style(body, "overflow", &prev),
                None => doc.remove_style(body, "overflow"),
            }
            log::debug!("scroll unlocked");
        }
        true
    }

    /// Whether any holder is active.
    pub fn is_locked(&self) -> bool {
        !self.holders.is_empty()
    }

    /// Number of active holders.
    pub fn holders(&self) -> usize {
        self.holders.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restores_author_overflow() {
        let mut doc = Document::new();
        let body = doc.body();
        doc.set_style(body, "overflow", "scroll");
        let mut lock = ScrollLock::new();
        let t = lock.acquire(&mut doc);
        assert_eq!(doc.style(body, "overflow"), Some("hidden"));
        assert!(lock.release(&mut doc, t));
        assert_eq!(doc.style(body, "overflow"), Some("scroll"));
    }

    #[test]
    fn double_release_keeps_other_holders() {
        let mut doc = Document::new();
        let mut lock = ScrollLock::new();
        let a = lock.acquire(&mut doc);
        let _b = lock.acquire(&mut doc);
        assert!(lock.release(&mut doc, a));
        assert!(!lock.release(&mut doc, a));
        assert!(lock.is_locked());
        assert_eq!(lock.holders(), 1);
    }
}
