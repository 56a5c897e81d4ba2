//------------ TraversalStack ------------------------------------------------

/// A heap-backed LIFO stack, used to walk a trie without recursion.
#[derive(Debug, Clone)]
pub struct TraversalStack<T> {
    elements: Vec<T>,
}

impl<T> TraversalStack<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            elements: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, element: T) {
        self.elements.push(element);
    }

    pub fn pop(&mut self) -> Option<T> {
        self.elements.pop()
    }

    pub fn peek(&self) -> Option<&T> {
        self.elements.last()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl<T> Default for TraversalStack<T> {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}
