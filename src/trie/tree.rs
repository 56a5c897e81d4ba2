use std::net::{IpAddr, Ipv4Addr};

use log::trace;

use crate::trie::iterators::{Iter, NodeWalk};
use crate::trie::node::TrieNode;
use crate::types::bits::{bit_index, lcpl, prefix_mask, shl_or_zero};
use crate::types::errors::PrefixTrieError;
use crate::types::stats::TrieStats;
use crate::types::{Ipv4Prefix, Match};

//------------ RadixTrie -----------------------------------------------------

/// A compressed binary trie over IPv4 prefixes, mapping each stored prefix
/// to a value of type `V`.
///
/// Every node holds a multi-bit segment instead of a single bit, so no
/// operation ever visits more than 33 nodes, however many prefixes are
/// stored. Chains of single-child nodes are never kept: insertion avoids
/// creating them and removal merges them away.
///
/// The trie is a plain single-threaded structure. Callers that share it
/// between threads wrap it in a lock.
///
/// ```
/// use bgpsim_store::RadixTrie;
///
/// let mut rib = RadixTrie::new();
/// rib.insert("10.0.0.0/8".parse()?, "A");
/// rib.insert("10.10.0.0/16".parse()?, "B");
///
/// let m = rib.query("10.10.20.5".parse()?);
/// assert_eq!(m.value(), Some(&"B"));
/// assert_eq!(m.prefix(), Some("10.10.0.0/16".parse()?));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct RadixTrie<V> {
    root: Option<Box<TrieNode<V>>>,
    len: usize,
}

impl<V> Default for RadixTrie<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> RadixTrie<V> {
    /// Creates an empty trie. The root node is allocated on the first
    /// insert.
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// The number of stored prefixes.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn clear(&mut self) {
        self.root = None;
        self.len = 0;
    }

    pub(crate) fn root(&self) -> Option<&TrieNode<V>> {
        self.root.as_deref()
    }

    //-------- Insert -------------------------------------------------------

    /// Stores `value` for `prefix`. If the exact prefix was already
    /// present its value is replaced and the old value returned; the number
    /// of stored prefixes only changes when `None` is returned.
    pub fn insert(&mut self, prefix: Ipv4Prefix, value: V) -> Option<V> {
        let mut bits = prefix.bits();
        let mut len = prefix.len();

        let mut node = match self.root.as_deref_mut() {
            // An emptied root is replaced outright, forking around it
            // would leave a value-less leaf behind.
            Some(root) if !root.is_vacant() => root,
            _ => {
                trace!("new root for {}", prefix);
                self.root = Some(Box::new(TrieNode::leaf(bits, len, value)));
                self.len = 1;
                return None;
            }
        };

        loop {
            let common = lcpl(bits, node.bits).min(len).min(node.len);

            // The prefix ends exactly at this node.
            if common == node.len && len == node.len {
                let old = node.value.replace(value);
                if old.is_none() {
                    self.len += 1;
                }
                return old;
            }

            // The prefix runs past this node: descend, or hang a new leaf
            // off the free slot.
            if common == node.len {
                let slot = bit_index(bits, node.len);
                bits = shl_or_zero(bits, node.len);
                len -= node.len;

                if node.child(slot).is_none() {
                    trace!("new leaf {:032b}/{} for {}", bits, len, prefix);
                    node.attach(TrieNode::leaf(bits, len, value));
                    self.len += 1;
                    return None;
                }
                node = match node.children.get_mut(slot) {
                    Some(Some(child)) => &mut **child,
                    _ => return None,
                };
                continue;
            }

            // The prefix ends inside this node's segment: cut the segment
            // there, the new value goes on the upper half.
            if common == len {
                trace!("split for {}", prefix);
                let tail = node.split_off(len);
                node.attach(tail);
                node.value = Some(value);
                self.len += 1;
                return None;
            }

            // The prefix diverges inside this node's segment: the node
            // becomes a value-less branch point with the old tail and the
            // new leaf as its two children.
            trace!("fork at {} for {}", common, prefix);
            let tail = node.split_off(common);
            node.attach(tail);
            node.attach(TrieNode::leaf(
                shl_or_zero(bits, common),
                len - common,
                value,
            ));
            self.len += 1;
            return None;
        }
    }

    //-------- Query --------------------------------------------------------

    /// Longest-prefix match: returns the most specific stored prefix that
    /// contains `addr`, together with its value.
    pub fn query(&self, addr: Ipv4Addr) -> Match<'_, V> {
        let addr = u32::from(addr);
        let mut best = Match::not_found();

        let mut bits = addr;
        let mut len: u8 = 32;
        let mut node = match self.root.as_deref() {
            Some(root) => root,
            None => return best,
        };

        loop {
            // Only reachable with node.len <= len: all prefixes on a path
            // add up to at most 32 bits.
            if !node.matches(bits) {
                return best;
            }

            let depth = 32 - len + node.len;
            if let Some(value) = node.value.as_ref() {
                best = Match::found_with(
                    Ipv4Prefix::new_masked(addr, depth),
                    value,
                );
            }

            if len == node.len {
                return best;
            }

            let slot = bit_index(bits, node.len);
            bits = shl_or_zero(bits, node.len);
            len -= node.len;

            match node.child(slot) {
                Some(child) => node = child,
                None => return best,
            }
        }
    }

    /// Exact match: the value stored for exactly `prefix`, if any.
    pub fn get(&self, prefix: Ipv4Prefix) -> Option<&V> {
        let mut bits = prefix.bits();
        let mut len = prefix.len();
        let mut node = self.root.as_deref()?;

        loop {
            if node.len > len || !node.matches(bits) {
                return None;
            }
            if node.len == len {
                return node.value.as_ref();
            }
            let slot = bit_index(bits, node.len);
            bits = shl_or_zero(bits, node.len);
            len -= node.len;
            node = node.child(slot)?;
        }
    }

    pub fn contains_prefix(&self, prefix: Ipv4Prefix) -> bool {
        self.get(prefix).is_some()
    }

    //-------- Delete -------------------------------------------------------

    /// Removes exactly `prefix` from the trie and returns whether a value
    /// was removed. Less and more specific prefixes are untouched.
    pub fn delete(&mut self, prefix: Ipv4Prefix) -> bool {
        self.remove(prefix).is_some()
    }

    /// Like [RadixTrie::delete], but hands back the removed value.
    pub fn remove(&mut self, prefix: Ipv4Prefix) -> Option<V> {
        let root = self.root.as_deref_mut()?;
        let removed = Self::remove_from(root, prefix);
        if removed.is_some() {
            trace!("removed {}", prefix);
            self.len -= 1;
        }
        removed
    }

    fn remove_from(root: &mut TrieNode<V>, prefix: Ipv4Prefix) -> Option<V> {
        let mut bits = prefix.bits();
        let mut len = prefix.len();

        if root.len > len || !root.matches(bits) {
            return None;
        }
        if root.len == len {
            return Self::clear_node(root, true);
        }

        // `parent` matches the leading bits of the prefix and is strictly
        // shorter than what is left of it. Look one level ahead, so the
        // parent is still at hand once the target is found.
        let mut parent = root;
        loop {
            let slot = bit_index(bits, parent.len);
            bits = shl_or_zero(bits, parent.len);
            len -= parent.len;

            let child = parent.child(slot)?;
            if child.len > len || !child.matches(bits) {
                return None;
            }
            if child.len == len {
                return Self::remove_child(parent, slot);
            }
            parent = parent.children.get_mut(slot)?.as_deref_mut()?;
        }
    }

    // Removes the value of the child in `slot` of `parent`, restructuring
    // as needed.
    fn remove_child(parent: &mut TrieNode<V>, slot: usize) -> Option<V> {
        let child = parent.children.get_mut(slot)?.as_deref_mut()?;
        if child.child_count() > 0 {
            return Self::clear_node(child, false);
        }

        // A childless node always carries a value, unless it is an emptied
        // root, which has no parent.
        if child.value.is_none() {
            return None;
        }
        let detached = parent.children.get_mut(slot)?.take()?;
        trace!("detach {:032b}/{}", detached.bits, detached.len);

        if parent.value.is_none() && parent.child_count() == 1 {
            parent.absorb_only_child();
        }
        debug_assert!(parent.value.is_some() || parent.child_count() != 1);
        detached.value
    }

    // Clears the value of a node that stays in the trie. A node with one
    // child cannot stay without a value, so it merges with that child. The
    // root is kept in place when it has no children at all.
    fn clear_node(node: &mut TrieNode<V>, is_root: bool) -> Option<V> {
        debug_assert!(is_root || node.child_count() > 0);
        let value = node.value.take()?;
        if node.child_count() == 1 {
            node.absorb_only_child();
        }
        Some(value)
    }

    //-------- Walks --------------------------------------------------------

    /// Iterates over all stored prefixes and their values in pre-order,
    /// i.e. every prefix comes before its more-specifics, and the zero
    /// branch is visited before the one branch.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter::new(self.root())
    }

    /// Walks the whole trie and reports its shape.
    pub fn stats(&self) -> TrieStats {
        let mut stats = TrieStats::default();
        for step in NodeWalk::new(self.root()) {
            stats.nodes += 1;
            stats.max_node_depth = stats.max_node_depth.max(step.depth);
            if step.node.value.is_some() {
                stats.prefixes += 1;
                stats.max_prefix_len =
                    stats.max_prefix_len.max(step.prefix.len());
            } else {
                stats.branch_nodes += 1;
            }
        }
        stats
    }

    /// Checks the structural invariants of the trie: the compaction rule,
    /// zeroed bits beyond each segment, child slots agreeing with the first
    /// bit of the child, and the stored count. Returns a description of the
    /// first violation found.
    #[doc(hidden)]
    pub fn validate(&self) -> Result<(), String> {
        let mut count = 0;
        for step in NodeWalk::new(self.root()) {
            let node = step.node;
            let children = node.child_count();
            if node.value.is_none() && children == 1 {
                return Err(format!(
                    "value-less node with one child at {}",
                    step.prefix
                ));
            }
            if node.value.is_none() && children == 0 && step.depth > 1 {
                return Err(format!("value-less leaf at {}", step.prefix));
            }
            if node.bits & !prefix_mask(node.len) != 0 {
                return Err(format!(
                    "stray bits beyond segment at {}",
                    step.prefix
                ));
            }
            if step.depth > 33 {
                return Err(format!("path too deep at {}", step.prefix));
            }
            if step.depth > 1 && node.len == 0 {
                return Err(format!("empty segment at {}", step.prefix));
            }
            for (slot, child) in node.children.iter().enumerate() {
                if let Some(child) = child {
                    if bit_index(child.bits, 0) != slot {
                        return Err(format!(
                            "child in wrong slot below {}",
                            step.prefix
                        ));
                    }
                }
            }
            if node.value.is_some() {
                count += 1;
            }
        }
        if count != self.len {
            return Err(format!(
                "counted {} prefixes, but len is {}",
                count, self.len
            ));
        }
        Ok(())
    }

    //-------- inetnum bridges ----------------------------------------------

    /// [RadixTrie::insert] for an `inetnum` prefix. Fails for IPv6.
    pub fn insert_prefix(
        &mut self,
        prefix: &inetnum::addr::Prefix,
        value: V,
    ) -> Result<Option<V>, PrefixTrieError> {
        let prefix = Ipv4Prefix::try_from(*prefix)?;
        Ok(self.insert(prefix, value))
    }

    /// [RadixTrie::delete] for an `inetnum` prefix. Fails for IPv6.
    pub fn delete_prefix(
        &mut self,
        prefix: &inetnum::addr::Prefix,
    ) -> Result<bool, PrefixTrieError> {
        let prefix = Ipv4Prefix::try_from(*prefix)?;
        Ok(self.delete(prefix))
    }

    /// [RadixTrie::query] for any IP address. Fails for IPv6.
    pub fn query_addr(
        &self,
        addr: IpAddr,
    ) -> Result<Match<'_, V>, PrefixTrieError> {
        match addr {
            IpAddr::V4(addr) => Ok(self.query(addr)),
            IpAddr::V6(_) => Err(PrefixTrieError::AddressFamilyNotSupported),
        }
    }
}

impl<V: std::fmt::Display> RadixTrie<V> {
    /// Renders all stored prefixes as `prefix: value` lines, in the order
    /// of [RadixTrie::iter]. Meant for inspection and logging only.
    pub fn dump(&self) -> String {
        self.iter()
            .map(|(pfx, value)| format!("{}: {}", pfx, value))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl<V: std::fmt::Display> std::fmt::Display for RadixTrie<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (pfx, value) in self.iter() {
            writeln!(f, "{}: {}", pfx, value)?;
        }
        Ok(())
    }
}

impl<V> Extend<(Ipv4Prefix, V)> for RadixTrie<V> {
    fn extend<T: IntoIterator<Item = (Ipv4Prefix, V)>>(&mut self, iter: T) {
        for (prefix, value) in iter {
            self.insert(prefix, value);
        }
    }
}

impl<V> FromIterator<(Ipv4Prefix, V)> for RadixTrie<V> {
    fn from_iter<T: IntoIterator<Item = (Ipv4Prefix, V)>>(iter: T) -> Self {
        let mut trie = Self::new();
        trie.extend(iter);
        trie
    }
}

impl<'a, V> IntoIterator for &'a RadixTrie<V> {
    type Item = (Ipv4Prefix, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
