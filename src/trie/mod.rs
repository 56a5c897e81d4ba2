mod iterators;
mod node;
mod prefix_builder;
mod stack;
mod tree;

pub use iterators::Iter;
pub use prefix_builder::PrefixBuilder;
pub use stack::TraversalStack;
pub use tree::RadixTrie;
