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

//! This module provides the representation of one vertex of the
//! branch-and-bound tree: the branching decisions accumulated on the path
//! from the root, and the outcome of the lp relaxation at that vertex.

use fxhash::FxHashMap;

use crate::{Decision, Source};

/// Activation values within this distance of an integer are considered
/// integral. The lp routinely returns values like `0.9999999` and treating
/// them as integer lets the engine terminate one node earlier.
const INTEGRALITY: f64 = 1e-6;

/// One vertex of the branch-and-bound tree. A node is created either as the
/// root (no branching decision made yet) or as the child of another node,
/// extending the parent's decisions with exactly one more. After creation it
/// is handed to the lp relaxation which fills `lp_value`, `lower_bound` and
/// `feasible`; from that point on the node is either discarded (pruned),
/// expanded (children enqueued) or used as a solution candidate. It is never
/// mutated once it leaves the frontier.
///
/// Children share no state with their parent: the decision map is copied by
/// value and there are no parent back-pointers.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchNode {
    /// the number of branching decisions made on the path from the root
    pub depth: usize,
    /// the activation value taken by each source in the lp relaxation of
    /// this node (empty until the node has been evaluated)
    pub lp_value: Vec<f64>,
    /// the objective of the lp relaxation: a valid lower bound on any
    /// integer solution in this subtree (+inf when the lp is infeasible)
    pub lower_bound: f64,
    /// false iff the lp relaxation of this node was proved infeasible
    pub feasible: bool,
    /// the branching decisions accumulated above this node; a source fixed
    /// here is never branched on again below
    fixed: FxHashMap<Source, bool>,
}

impl SearchNode {
    /// Creates the root of the search tree: no decision made, nothing
    /// evaluated yet.
    pub fn root() -> Self {
        SearchNode {
            depth: 0,
            lp_value: vec![],
            lower_bound: 0.0,
            feasible: true,
            fixed: FxHashMap::default(),
        }
    }

    /// Creates the child of this node obtained by additionally pinning the
    /// activation of one source. The source must not already be fixed in
    /// this node.
    pub fn child(&self, decision: Decision) -> Self {
        debug_assert!(
            !self.fixed.contains_key(&decision.source),
            "a source fixed in an ancestor is never rebranched"
        );
        let mut fixed = self.fixed.clone();
        fixed.insert(decision.source, decision.open);
        SearchNode {
            depth: self.depth + 1,
            lp_value: vec![],
            lower_bound: 0.0,
            feasible: true,
            fixed,
        }
    }

    /// The branching decisions accumulated above this node.
    pub fn fixed(&self) -> &FxHashMap<Source, bool> {
        &self.fixed
    }

    /// The value this node pins the given source to, if any.
    pub fn fixed_value(&self, source: Source) -> Option<bool> {
        self.fixed.get(&source).copied()
    }

    /// True iff every activation value of the lp relaxation is within the
    /// integrality tolerance of 0 or 1.
    pub fn is_integer_solution(&self) -> bool {
        self.lp_value
            .iter()
            .all(|v| (v - v.round()).abs() <= INTEGRALITY)
    }

    /// The unfixed source whose activation value is the farthest from an
    /// integer, if any. Ties break to the lowest index. Returns `None` when
    /// every unfixed activation is exactly integral.
    pub fn most_fractional(&self) -> Option<Source> {
        let mut best = None;
        let mut best_frac = 0.0;
        for (j, v) in self.lp_value.iter().enumerate() {
            if self.fixed.contains_key(&Source(j)) {
                continue;
            }
            let frac = (v - v.round()).abs();
            if frac > best_frac {
                best_frac = frac;
                best = Some(Source(j));
            }
        }
        best
    }

    /// Rounds the activation values of the lp relaxation to a binary
    /// opening vector.
    pub fn rounded_activations(&self) -> Vec<bool> {
        self.lp_value.iter().map(|v| v.round() > 0.5).collect()
    }
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################

#[cfg(test)]
mod test_search_node {
    use crate::{Decision, SearchNode, Source};

    #[test]
    fn the_root_carries_no_decision() {
        let root = SearchNode::root();
        assert_eq!(0, root.depth);
        assert!(root.fixed().is_empty());
        assert!(root.feasible);
    }

    #[test]
    fn a_child_extends_the_parent_by_exactly_one_decision() {
        let root = SearchNode::root();
        let child = root.child(Decision { source: Source(1), open: true });
        let grandchild = child.child(Decision { source: Source(0), open: false });

        assert_eq!(1, child.depth);
        assert_eq!(1, child.fixed().len());
        assert_eq!(Some(true), child.fixed_value(Source(1)));

        assert_eq!(2, grandchild.depth);
        assert_eq!(2, grandchild.fixed().len());
        assert_eq!(Some(true), grandchild.fixed_value(Source(1)));
        assert_eq!(Some(false), grandchild.fixed_value(Source(0)));
        // the parent is untouched
        assert_eq!(1, child.fixed().len());
    }

    #[test]
    fn branching_both_ways_yields_complementary_children() {
        let root = SearchNode::root();
        let closed = root.child(Decision { source: Source(0), open: false });
        let opened = root.child(Decision { source: Source(0), open: true });
        assert_eq!(Some(false), closed.fixed_value(Source(0)));
        assert_eq!(Some(true), opened.fixed_value(Source(0)));
    }

    #[test]
    fn nearly_integral_values_count_as_integer() {
        let mut node = SearchNode::root();
        node.lp_value = vec![0.9999999, 0.0000001, 1.0];
        assert!(node.is_integer_solution());
    }

    #[test]
    fn a_fractional_value_is_not_integer() {
        let mut node = SearchNode::root();
        node.lp_value = vec![1.0, 0.5];
        assert!(!node.is_integer_solution());
    }

    #[test]
    fn most_fractional_picks_the_farthest_from_integrality() {
        let mut node = SearchNode::root();
        node.lp_value = vec![0.9, 0.5, 0.2];
        assert_eq!(Some(Source(1)), node.most_fractional());
    }

    #[test]
    fn most_fractional_breaks_ties_on_the_lowest_index() {
        let mut node = SearchNode::root();
        node.lp_value = vec![1.0, 0.5, 0.5];
        assert_eq!(Some(Source(1)), node.most_fractional());
    }

    #[test]
    fn most_fractional_skips_fixed_sources() {
        let root = SearchNode::root();
        let mut node = root.child(Decision { source: Source(1), open: true });
        node.lp_value = vec![0.9, 0.5, 1.0];
        assert_eq!(Some(Source(0)), node.most_fractional());
    }

    #[test]
    fn most_fractional_is_none_when_everything_is_integral() {
        let mut node = SearchNode::root();
        node.lp_value = vec![1.0, 0.0, 1.0];
        assert_eq!(None, node.most_fractional());
    }

    #[test]
    fn rounding_maps_activations_to_booleans() {
        let mut node = SearchNode::root();
        node.lp_value = vec![0.9999999, 0.0000001, 1.0, 0.0];
        assert_eq!(vec![true, false, true, false], node.rounded_activations());
    }
}
