// Copyright 2025 the Twine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Unique element ids for ARIA cross-references.

use alloc::format;
use alloc::string::String;

/// Produces ids that are unique among all ids this generator hands out.
///
/// Ids are a fixed prefix plus a monotonic counter and are never recycled.
///
/// ```
/// use twine_interaction::IdGenerator;
///
/// let mut ids = IdGenerator::new("twine");
/// assert_eq!(ids.next_id(), "twine-1");
/// assert_eq!(ids.next_id(), "twine-2");
/// ```
#[derive(Clone, Debug)]
pub struct IdGenerator {
    prefix: String,
    counter: u64,
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new("twine")
    }
}

impl IdGenerator {
    /// Create a generator. Whitespace in `prefix` is replaced with `-` so the
    /// result is always a valid `id` attribute value.
    pub fn new(prefix: &str) -> Self {
        let prefix: String = prefix
            .chars()
            .map(|c| if c.is_whitespace() { '-' } else { c })
            .collect();
        Self {
            prefix: if prefix.is_empty() {
                String::from("twine")
            } else {
                prefix
            },
            counter: 0,
        }
    }

    /// The next id.
    pub fn next_id(&mut self) -> String {
        self.counter += 1;
        format!("{}-{}", self.prefix, self.counter)
    }

    /// How many ids have been handed out.
    pub fn issued(&self) -> u64 {
        self.counter
    }
}
