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

//! This module provides the branch-and-bound engine: the search loop that
//! repeatedly pops the most promising open node, prunes it against the
//! incumbent or branches on its most fractional activation, until the
//! optimality gap closes, the frontier empties or the iteration budget runs
//! out.

use std::time::{Duration, Instant};

use derive_builder::Builder;
use log::{debug, info};

use crate::{
    greedy_activation, routing_cost, Decision, Error, Fringe, Incumbent, Instance, LpRelaxation,
    SearchNode, SolveReport,
};

/// The parameters of one solve. All numerical comparisons against bounds use
/// the single `tolerance`; the integrality test of the nodes uses its own
/// hard-coded threshold.
///
/// # Example
/// ```
/// # use cflbb::SolverConfigBuilder;
/// let config = SolverConfigBuilder::default()
///     .max_iterations(500)
///     .build()
///     .unwrap();
/// assert_eq!(500, config.max_iterations);
/// assert_eq!(1e-6, config.tolerance);
/// ```
#[derive(Debug, Clone, Copy, Builder)]
pub struct SolverConfig {
    /// The maximum number of nodes dequeued before the search returns the
    /// best incumbent found so far
    #[builder(default = "10_000")]
    pub max_iterations: usize,
    /// The numerical tolerance used by every bound comparison
    #[builder(default = "1e-6")]
    pub tolerance: f64,
}
impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig { max_iterations: 10_000, tolerance: 1e-6 }
    }
}

/// This is the structure implementing the single-threaded branch-and-bound
/// search. It owns the frontier, the incumbent and the iteration counter,
/// and it lives for exactly one solve. The instance is only ever read.
pub struct BranchAndBound<'a> {
    /// The problem being solved
    instance: &'a Instance,
    /// The node evaluator (lp relaxation of the restricted subproblem)
    relaxation: LpRelaxation<'a>,
    /// The parameters of this solve
    config: SolverConfig,
    /// The set of open nodes, ordered best-bound-first
    fringe: Fringe,
    /// The best integer solution found so far (upper bound)
    incumbent: Incumbent,
    /// The sharpest lower bound still provable by the remaining search
    best_lower: f64,
    /// The number of nodes dequeued so far
    iterations: usize,
}

impl<'a> BranchAndBound<'a> {
    pub fn new(instance: &'a Instance, config: SolverConfig) -> Self {
        BranchAndBound {
            instance,
            relaxation: LpRelaxation::new(instance),
            config,
            fringe: Fringe::new(),
            incumbent: Incumbent::none(),
            best_lower: f64::INFINITY,
            iterations: 0,
        }
    }

    /// Runs the search to completion and reports the outcome. Fatal lp
    /// backend failures abort the solve; an infeasible instance or an
    /// exhausted budget are ordinary outcomes reported through the
    /// [`SolveReport`].
    pub fn minimize(&mut self) -> Result<SolveReport, Error> {
        let start = Instant::now();
        let tolerance = self.config.tolerance;

        // a global capacity shortfall cannot be repaired by any opening:
        // report it before building a single relaxation
        if self.instance.total_capacity() < self.instance.total_demand() {
            debug!("total capacity falls short of total demand, not searching");
            return Ok(self.report(start.elapsed()));
        }

        // seed the upper bound with the greedy construction
        let seed = greedy_activation(self.instance, tolerance);
        let seed_cost = routing_cost(self.instance, &seed);
        info!("greedy incumbent cost: {seed_cost}");
        if seed_cost.is_finite() {
            self.incumbent = Incumbent { value: seed_cost, activations: seed };
        }

        let mut root = SearchNode::root();
        self.relaxation.evaluate(&mut root)?;
        if !root.feasible {
            debug!("the root relaxation is infeasible");
            return Ok(self.report(start.elapsed()));
        }
        self.best_lower = root.lower_bound;
        self.fringe.push(root);

        while !self.fringe.is_empty() && self.iterations < self.config.max_iterations {
            self.iterations += 1;
            let Some(node) = self.fringe.pop() else { break };

            // pruning by bound: the subtree cannot beat the incumbent
            if node.lower_bound >= self.incumbent.value + tolerance {
                continue;
            }

            if node.is_integer_solution() {
                // a solution candidate: price it exactly and keep the node
                // out of the frontier either way
                let activations = node.rounded_activations();
                let cost = routing_cost(self.instance, &activations);
                if cost.is_finite() && cost <= self.incumbent.value + tolerance && cost >= 0.0 {
                    debug!(
                        "iteration {}: incumbent improved to {cost}",
                        self.iterations
                    );
                    self.incumbent = Incumbent { value: cost, activations };
                }
            } else if let Some(source) = node.most_fractional() {
                for open in [false, true] {
                    let mut child = node.child(Decision { source, open });
                    self.relaxation.evaluate(&mut child)?;
                    if child.feasible && child.lower_bound <= self.incumbent.value + tolerance {
                        self.fringe.push(child);
                    }
                }
            }
            // when the integrality test and the branching rule disagree the
            // lp values are a numerical artifact: the node is simply dropped

            self.best_lower = self.fringe.peek_lower_bound();
            if (self.incumbent.value - self.best_lower).abs() <= tolerance {
                debug!("optimality gap closed after {} iterations", self.iterations);
                break;
            }
        }

        Ok(self.report(start.elapsed()))
    }

    fn report(&self, wall_time: Duration) -> SolveReport {
        SolveReport {
            feasible: self.incumbent.is_feasible(),
            best_value: self.incumbent.value,
            activations: self.incumbent.activations.clone(),
            iterations: self.iterations,
            lower_bound: self.best_lower,
            wall_time,
        }
    }
}

/// Solves the given instance to optimality (within the configured
/// tolerance) and returns the outcome. This is the one-stop entry point of
/// the library.
///
/// # Example
/// ```
/// # use cflbb::{solve, Instance, SolverConfig};
/// let instance = Instance::new(
///     vec![10.0],        // capacity
///     vec![5.0],         // activation cost
///     vec![10.0],        // demand
///     vec![vec![2.0]],   // transport cost
/// ).unwrap();
///
/// let report = solve(&instance, &SolverConfig::default()).unwrap();
/// assert!(report.feasible);
/// assert_eq!(25.0, report.best_value);
/// assert_eq!(vec![true], report.activations);
/// ```
pub fn solve(instance: &Instance, config: &SolverConfig) -> Result<SolveReport, Error> {
    BranchAndBound::new(instance, *config).minimize()
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################

#[cfg(test)]
mod test_solver {
    use crate::{solve, Instance, SolverConfig, SolverConfigBuilder};

    fn config(max_iterations: usize) -> SolverConfig {
        SolverConfigBuilder::default()
            .max_iterations(max_iterations)
            .build()
            .unwrap()
    }

    fn trivial() -> Instance {
        Instance::new(vec![10.0], vec![5.0], vec![10.0], vec![vec![2.0]]).unwrap()
    }

    fn prefer_cheap() -> Instance {
        Instance::new(
            vec![100.0, 100.0],
            vec![10.0, 15.0],
            vec![50.0, 50.0],
            vec![vec![5.0, 8.0], vec![6.0, 7.0]],
        )
        .unwrap()
    }

    fn split_forced() -> Instance {
        Instance::new(
            vec![60.0, 60.0],
            vec![10.0, 15.0],
            vec![50.0, 50.0],
            vec![vec![5.0, 8.0], vec![6.0, 7.0]],
        )
        .unwrap()
    }

    #[test]
    fn a_trivial_instance_solves_in_at_most_two_iterations() {
        let report = solve(&trivial(), &SolverConfig::default()).unwrap();
        assert!(report.feasible);
        assert!((report.best_value - 25.0).abs() < 1e-6);
        assert_eq!(vec![true], report.activations);
        assert!(report.iterations <= 2);
    }

    #[test]
    fn the_cheaper_source_wins_when_capacity_allows() {
        let report = solve(&prefer_cheap(), &SolverConfig::default()).unwrap();
        assert!(report.feasible);
        // 10 + 5*50 + 6*50
        assert!((report.best_value - 560.0).abs() < 1e-6);
        assert_eq!(vec![true, false], report.activations);
    }

    #[test]
    fn tight_capacities_force_both_sources_open() {
        let report = solve(&split_forced(), &SolverConfig::default()).unwrap();
        assert!(report.feasible);
        // 10 + 15 + 5*50 + 7*50, the per-client assignment of the pricing
        assert!((report.best_value - 625.0).abs() < 1e-6);
        assert_eq!(vec![true, true], report.activations);
    }

    #[test]
    fn a_global_capacity_shortfall_is_reported_without_searching() {
        let instance =
            Instance::new(vec![10.0], vec![5.0], vec![20.0], vec![vec![2.0]]).unwrap();
        let report = solve(&instance, &SolverConfig::default()).unwrap();
        assert!(!report.feasible);
        assert_eq!(0, report.iterations);
        assert!(report.activations.is_empty());
    }

    #[test]
    fn an_exhausted_budget_returns_the_greedy_incumbent() {
        let report = solve(&split_forced(), &config(1)).unwrap();
        assert!(report.feasible);
        assert_eq!(1, report.iterations);
        // the greedy seed opens both sources, priced at 625
        assert!((report.best_value - 625.0).abs() < 1e-6);
        // the remaining frontier still bounds the optimum from below
        assert!(report.lower_bound <= report.best_value);
    }

    #[test]
    fn a_loose_tolerance_terminates_by_gap_closure() {
        // with a tolerance of 20 the greedy incumbent (625) is already
        // within reach of the first lower bound (615): the search stops on
        // the gap test while a node is still open
        let config = SolverConfigBuilder::default().tolerance(20.0).build().unwrap();
        let report = solve(&split_forced(), &config).unwrap();
        assert_eq!(1, report.iterations);
        assert!((report.best_value - 625.0).abs() < 1e-6);
        assert!((report.lower_bound - 615.0).abs() < 1e-4);
        assert!((report.best_value - report.lower_bound).abs() <= 20.0);
    }

    #[test]
    fn a_larger_budget_never_worsens_the_outcome() {
        let mut previous = f64::INFINITY;
        for budget in 1..=6 {
            let report = solve(&split_forced(), &config(budget)).unwrap();
            assert!(report.best_value <= previous + 1e-9);
            previous = report.best_value;
        }
    }

    #[test]
    fn solving_twice_is_deterministic() {
        let first = solve(&split_forced(), &SolverConfig::default()).unwrap();
        let second = solve(&split_forced(), &SolverConfig::default()).unwrap();
        assert_eq!(first.best_value, second.best_value);
        assert_eq!(first.activations, second.activations);
        assert_eq!(first.iterations, second.iterations);
    }

    #[test]
    fn the_config_builder_fills_in_the_defaults() {
        let config = SolverConfigBuilder::default().build().unwrap();
        assert_eq!(10_000, config.max_iterations);
        assert_eq!(1e-6, config.tolerance);
    }
}
