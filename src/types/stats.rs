//------------ Types for Statistics -----------------------------------------

use std::fmt::Display;

/// A snapshot of the shape of a prefix trie, as returned by
/// [RadixTrie::stats](crate::RadixTrie::stats).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TrieStats {
    /// Number of stored prefixes, i.e. nodes carrying a value.
    pub prefixes: usize,
    /// Total number of allocated nodes.
    pub nodes: usize,
    /// Nodes without a value. Apart from an empty root these always have
    /// two children.
    pub branch_nodes: usize,
    /// The length of the longest stored prefix.
    pub max_prefix_len: u8,
    /// The number of nodes on the longest root-to-leaf path.
    pub max_node_depth: usize,
}

impl Display for TrieStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "prefixes:       {}", self.prefixes)?;
        writeln!(f, "nodes:          {}", self.nodes)?;
        writeln!(f, "branch nodes:   {}", self.branch_nodes)?;
        writeln!(f, "max prefix len: {}", self.max_prefix_len)?;
        write!(f, "max node depth: {}", self.max_node_depth)
    }
}
