#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::indexing_slicing
)]

//! The routing table core of a BGP simulator: a compressed binary trie over
//! IPv4 prefixes, with insertion, removal and longest-prefix-match lookup.
//!
//! Every node in the trie stores a multi-bit segment of the address space
//! rather than one bit per level (a radix, or Patricia, trie). Operations
//! therefore touch at most one node per address bit, independent of the
//! number of stored prefixes. Nodes are split when an insert diverges
//! inside a segment, and merged back when a removal leaves a node without a
//! value and with a single child, so the trie never carries pass-through
//! nodes.
//!
//! The values stored in the trie are opaque to it. Route selection, session
//! state and the simulation itself live in the layers that consume the
//! trie through [RadixTrie::insert], [RadixTrie::query],
//! [RadixTrie::delete] and [RadixTrie::len].
//!
//! ```
//! use bgpsim_store::RadixTrie;
//!
//! let mut fib = RadixTrie::new();
//! fib.insert("0.0.0.0/0".parse()?, "default");
//! fib.insert("10.0.0.0/8".parse()?, "A");
//! fib.insert("10.10.10.0/24".parse()?, "C");
//!
//! assert_eq!(fib.query("10.10.10.5".parse()?).value(), Some(&"C"));
//! assert_eq!(fib.query("11.11.11.11".parse()?).value(), Some(&"default"));
//!
//! assert!(fib.delete("10.10.10.0/24".parse()?));
//! assert_eq!(fib.query("10.10.10.5".parse()?).value(), Some(&"A"));
//! assert_eq!(fib.len(), 2);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
mod trie;
mod types;

// re-exports
pub use inetnum::addr;

// Public Interfaces on the root of the crate

/// The prefix trie and the helpers used to walk it
pub use trie::{Iter, PrefixBuilder, RadixTrie, TraversalStack};

/// The validated IPv4 prefix used as key
pub use types::Ipv4Prefix;

/// The result of a longest-prefix-match query
pub use types::Match;

/// Error types returned at the boundary of the trie
pub use types::errors;

/// Statistics about the shape of a trie
pub use types::stats;

/// Loading routing tables from configuration files
pub mod config;

// Used in tests
#[doc(hidden)]
pub use types::test_types;
