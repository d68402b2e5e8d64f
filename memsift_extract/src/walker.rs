//! Bounded-depth structural walker.
//!
//! [`Walker`] is a lazy pre-order iterator over every object reachable from
//! a root value. Depth counts from the walker's own root (level 0); arrays
//! take up a level just like objects. Containers below `max_depth` are
//! skipped without error.

use memsift_core::WalkerConfig;
use serde_json::{Map, Value};

/// One object reached by the walk.
#[derive(Debug, Clone, Copy)]
pub struct Visit<'a> {
    pub node: &'a Map<String, Value>,
    pub depth: usize,
}

/// Extractor invoked on each visited object.
pub trait NodeVisitor {
    fn visit(&mut self, node: &Map<String, Value>, depth: usize);
}

pub struct Walker<'a> {
    stack: Vec<(&'a Value, usize)>,
    max_depth: usize,
    truncated: usize,
}

impl<'a> Walker<'a> {
    #[must_use]
    pub fn new(root: &'a Value, config: WalkerConfig) -> Self {
        Self {
            stack: vec![(root, 0)],
            max_depth: config.max_depth,
            truncated: 0,
        }
    }

    /// Number of containers skipped so far for lying below the depth ceiling.
    #[must_use]
    pub const fn truncated(&self) -> usize {
        self.truncated
    }

    /// Drive every visitor over the whole walk, returning the truncation count.
    pub fn drive(mut self, visitors: &mut [&mut dyn NodeVisitor]) -> usize {
        for visit in self.by_ref() {
            for visitor in visitors.iter_mut() {
                visitor.visit(visit.node, visit.depth);
            }
        }
        self.truncated
    }

    fn push_children<I>(&mut self, children: I, depth: usize)
    where
        I: DoubleEndedIterator<Item = &'a Value>,
    {
        // Reversed so the first child is popped first.
        for child in children.rev() {
            if child.is_object() || child.is_array() {
                self.stack.push((child, depth + 1));
            }
        }
    }
}

impl<'a> Iterator for Walker<'a> {
    type Item = Visit<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((value, depth)) = self.stack.pop() {
            if depth > self.max_depth {
                self.truncated += 1;
                continue;
            }
            match value {
                Value::Object(map) => {
                    self.push_children(map.values(), depth);
                    return Some(Visit { node: map, depth });
                }
                Value::Array(items) => self.push_children(items.iter(), depth),
                _ => {}
            }
        }
        None
    }
}
