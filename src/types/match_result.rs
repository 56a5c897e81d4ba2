use std::fmt;

use crate::types::prefix::Ipv4Prefix;

//------------ Match ---------------------------------------------------------

/// The result of a longest-prefix-match query.
///
/// Either nothing was found, or it carries the longest stored prefix that
/// contains the queried address together with a reference to its value.
/// A `Match` borrows the trie it came from, so the trie cannot be modified
/// while a match is alive.
#[derive(Debug, PartialEq, Eq)]
pub struct Match<'a, V> {
    inner: Option<(Ipv4Prefix, &'a V)>,
}

impl<'a, V> Match<'a, V> {
    pub(crate) fn found_with(prefix: Ipv4Prefix, value: &'a V) -> Self {
        Self {
            inner: Some((prefix, value)),
        }
    }

    pub fn not_found() -> Self {
        Self { inner: None }
    }

    pub fn found(&self) -> bool {
        self.inner.is_some()
    }

    /// The matching prefix, `None` if nothing matched.
    pub fn prefix(&self) -> Option<Ipv4Prefix> {
        self.inner.map(|(pfx, _)| pfx)
    }

    /// The value stored for the matching prefix, `None` if nothing matched.
    pub fn value(&self) -> Option<&'a V> {
        self.inner.map(|(_, v)| v)
    }

    pub fn into_parts(self) -> Option<(Ipv4Prefix, &'a V)> {
        self.inner
    }
}

impl<V: Clone> Match<'_, V> {
    /// Detaches the match from the trie by cloning the value.
    pub fn cloned(&self) -> Option<(Ipv4Prefix, V)> {
        self.inner.map(|(pfx, v)| (pfx, v.clone()))
    }
}

// Derived Clone and Copy would require V: Clone.
impl<V> Clone for Match<'_, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V> Copy for Match<'_, V> {}

impl<V> Default for Match<'_, V> {
    fn default() -> Self {
        Self::not_found()
    }
}

impl<V: fmt::Display> fmt::Display for Match<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.inner {
            Some((pfx, value)) => write!(f, "{}: {}", pfx, value),
            None => write!(f, "no match"),
        }
    }
}
