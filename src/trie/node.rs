use log::trace;

use crate::types::bits::{bit_index, prefix_mask, shl_or_zero, shr_or_zero};

//------------ TrieNode ------------------------------------------------------

// A node contributes `len` bits to the path from the root, stored
// left-justified in `bits` (everything beyond `len` is zero). The first bit
// of a child's segment is the bit that selected it, so a child in slot 1
// always starts with a one bit.
//
// Compaction invariant: a node without a value has zero or two children,
// never exactly one. The only value-less node with zero children is an
// emptied root.
#[derive(Debug)]
pub(crate) struct TrieNode<V> {
    pub(crate) bits: u32,
    pub(crate) len: u8,
    pub(crate) children: [Option<Box<TrieNode<V>>>; 2],
    pub(crate) value: Option<V>,
}

impl<V> TrieNode<V> {
    pub(crate) fn leaf(bits: u32, len: u8, value: V) -> Self {
        Self {
            bits: bits & prefix_mask(len),
            len,
            children: [None, None],
            value: Some(value),
        }
    }

    pub(crate) fn child_count(&self) -> usize {
        self.children.iter().filter(|c| c.is_some()).count()
    }

    // A root that lost its last value and has nothing hanging off it.
    pub(crate) fn is_vacant(&self) -> bool {
        self.value.is_none() && self.child_count() == 0
    }

    // Whether the leading `self.len` bits of `bits` equal this segment.
    pub(crate) fn matches(&self, bits: u32) -> bool {
        (bits ^ self.bits) & prefix_mask(self.len) == 0
    }

    pub(crate) fn child(&self, slot: usize) -> Option<&TrieNode<V>> {
        self.children.get(slot).and_then(|c| c.as_deref())
    }

    // Hangs `child` in the slot chosen by its own first bit.
    pub(crate) fn attach(&mut self, child: TrieNode<V>) {
        let slot = bit_index(child.bits, 0);
        if let Some(c) = self.children.get_mut(slot) {
            *c = Some(Box::new(child));
        }
    }

    /// Cuts this node's segment after `at` bits. Everything beyond the cut
    /// (the segment tail, the children and the value) moves into the
    /// returned node; `self` keeps the first `at` bits and nothing else.
    pub(crate) fn split_off(&mut self, at: u8) -> TrieNode<V> {
        debug_assert!(at < self.len);
        trace!(
            "split {:032b}/{} at {}",
            self.bits,
            self.len,
            at
        );
        let tail = TrieNode {
            bits: shl_or_zero(self.bits, at),
            len: self.len - at,
            children: std::mem::take(&mut self.children),
            value: self.value.take(),
        };
        self.bits &= prefix_mask(at);
        self.len = at;
        tail
    }

    /// Splices the only child of this value-less node into it: the child's
    /// segment is appended to ours and its children and value move up.
    /// Restores the compaction invariant after a removal.
    pub(crate) fn absorb_only_child(&mut self) {
        debug_assert!(self.value.is_none());
        debug_assert_eq!(self.child_count(), 1);
        let [zero, one] = std::mem::take(&mut self.children);
        let Some(child) = zero.or(one) else {
            return;
        };
        trace!(
            "merge {:032b}/{} with {:032b}/{}",
            self.bits,
            self.len,
            child.bits,
            child.len
        );
        let child = *child;
        self.bits |= shr_or_zero(child.bits, self.len);
        self.len += child.len;
        self.children = child.children;
        self.value = child.value;
    }
}
