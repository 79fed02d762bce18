// Copyright 2020 Xavier Gillard
//
// Permission is hereby granted, free of charge, to any person obtaining a copy of
// this software and associated documentation files (the "Software"), to deal in
// the Software without restriction, including without limitation the rights to
// use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of
// the Software, and to permit persons to whom the Software is furnished to do so,
// subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS
// FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR
// COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER
// IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN
// CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! This module provides the solver fringe: the priority queue holding the
//! open nodes of the search tree, ordered best-bound-first.

use std::cmp::Ordering;

use binary_heap_plus::BinaryHeap;
use compare::Compare;

use crate::SearchNode;

/// The best-bound-first strategy: the node having the smallest lower bound
/// in the fringe is always selected next. Ties are broken on the depth of
/// the nodes, preferring the deepest one (which tends to keep the frontier
/// small). No secondary tie-break is needed for correctness.
#[derive(Debug, Clone, Copy)]
pub struct MinLowerBound;
impl MinLowerBound {
    /// Compares two nodes in priority order: `Greater` means the left node
    /// must be popped before the right one.
    pub fn compare(&self, l: &SearchNode, r: &SearchNode) -> Ordering {
        r.lower_bound
            .total_cmp(&l.lower_bound)
            .then_with(|| l.depth.cmp(&r.depth))
    }
}

/// This is a thin wrapper to turn [`MinLowerBound`] into a `Compare` object
/// as required to configure the order of a binary heap. It has no behavior
/// of its own.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompareNodes;
impl Compare<SearchNode> for CompareNodes {
    fn compare(&self, l: &SearchNode, r: &SearchNode) -> Ordering {
        MinLowerBound.compare(l, r)
    }
}

/// The simplest fringe implementation you can think of: a binary heap that
/// pushes and pops search nodes in best-bound-first order. The fringe owns
/// its nodes until they are popped.
pub struct Fringe {
    heap: BinaryHeap<SearchNode, CompareNodes>,
}

impl Fringe {
    /// This creates a new empty fringe.
    pub fn new() -> Self {
        Fringe { heap: BinaryHeap::from_vec_cmp(vec![], CompareNodes) }
    }

    /// This is how you push a node onto the fringe.
    pub fn push(&mut self, node: SearchNode) {
        self.heap.push(node)
    }

    /// This method yields the node with the smallest lower bound off the
    /// fringe, if any.
    pub fn pop(&mut self) -> Option<SearchNode> {
        self.heap.pop()
    }

    /// The smallest lower bound over all open nodes; `+inf` when the fringe
    /// is empty. This is the sharpest bound the remaining search can still
    /// prove.
    pub fn peek_lower_bound(&self) -> f64 {
        self.heap.peek().map(|n| n.lower_bound).unwrap_or(f64::INFINITY)
    }

    /// This method clears the fringe: it removes all nodes from the queue.
    pub fn clear(&mut self) {
        self.heap.clear()
    }

    /// Yields the length of the queue.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Returns true iff the fringe is empty (len == 0)
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for Fringe {
    fn default() -> Self {
        Self::new()
    }
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################
