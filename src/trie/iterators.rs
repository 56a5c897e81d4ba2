use crate::trie::node::TrieNode;
use crate::trie::prefix_builder::PrefixBuilder;
use crate::trie::stack::TraversalStack;
use crate::types::Ipv4Prefix;

// A path holds at most 33 nodes: a zero-length root plus one node per bit.
const MAX_DEPTH: usize = 33;

//------------ NodeWalk ------------------------------------------------------

// Where a frame on the stack is in visiting its node.
#[derive(Clone, Copy, Debug)]
enum Phase {
    Enter,
    ZeroDone,
    OneDone,
}

pub(crate) struct WalkStep<'a, V> {
    pub(crate) node: &'a TrieNode<V>,
    // The full prefix the node represents.
    pub(crate) prefix: Ipv4Prefix,
    // Number of nodes from the root up to and including this one.
    pub(crate) depth: usize,
}

// Pre-order walk over every node, value-less ones included. Runs on an
// explicit stack of (node, phase) frames instead of recursing.
pub(crate) struct NodeWalk<'a, V> {
    stack: TraversalStack<(&'a TrieNode<V>, Phase)>,
    builder: PrefixBuilder,
}

impl<'a, V> NodeWalk<'a, V> {
    pub(crate) fn new(root: Option<&'a TrieNode<V>>) -> Self {
        let mut stack = TraversalStack::with_capacity(MAX_DEPTH);
        if let Some(root) = root {
            stack.push((root, Phase::Enter));
        }
        Self {
            stack,
            builder: PrefixBuilder::new(),
        }
    }
}

impl<'a, V> Iterator for NodeWalk<'a, V> {
    type Item = WalkStep<'a, V>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((node, phase)) = self.stack.pop() {
            match phase {
                Phase::Enter => {
                    self.builder.push(node.bits, node.len);
                    self.stack.push((node, Phase::ZeroDone));
                    let depth = self.stack.len();
                    if let Some(zero) = node.child(0) {
                        self.stack.push((zero, Phase::Enter));
                    }
                    return Some(WalkStep {
                        node,
                        prefix: self.builder.build(),
                        depth,
                    });
                }
                Phase::ZeroDone => {
                    self.stack.push((node, Phase::OneDone));
                    if let Some(one) = node.child(1) {
                        self.stack.push((one, Phase::Enter));
                    }
                }
                Phase::OneDone => {
                    self.builder.pop(node.len);
                }
            }
        }
        None
    }
}

//------------ Iter ----------------------------------------------------------

/// Iterator over the stored prefixes of a [RadixTrie](crate::RadixTrie)
/// and their values, in pre-order.
pub struct Iter<'a, V> {
    walk: NodeWalk<'a, V>,
}

impl<'a, V> Iter<'a, V> {
    pub(crate) fn new(root: Option<&'a TrieNode<V>>) -> Self {
        Self {
            walk: NodeWalk::new(root),
        }
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (Ipv4Prefix, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let step = self.walk.next()?;
            if let Some(value) = step.node.value.as_ref() {
                return Some((step.prefix, value));
            }
        }
    }
}
