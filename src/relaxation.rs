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

//! This module provides the lp relaxation used to bound every node of the
//! search tree: the facility location program with the integrality of the
//! activation variables dropped.

use good_lp::{constraint, default_solver, variable, Expression, ProblemVariables, ResolutionError, Solution, SolverModel};
use log::trace;

use crate::{Error, Instance, SearchNode, Source};

/// This structure evaluates search nodes by building and solving the
/// continuous relaxation of the subproblem they stand for:
///
/// * `x[i][j] >= 0` is the flow from source `j` to client `i`;
/// * `y[j] in [0, 1]` is the activation of source `j`, pinned to 0 or 1 when
///   the node carries a branching decision on that source;
/// * minimize `sum_j activation_cost[j]*y[j] + sum_ij transport_cost[i][j]*x[i][j]`
///   subject to `sum_j x[i][j] = demand[i]` for every client and
///   `sum_i x[i][j] <= capacity[j]*y[j]` for every source.
///
/// The evaluation is pure with respect to the instance and the node's
/// decisions: identical inputs produce identical numbers (the backend is a
/// deterministic simplex). All scratch structures are locals, released on
/// every exit path.
pub struct LpRelaxation<'a> {
    instance: &'a Instance,
}

impl<'a> LpRelaxation<'a> {
    pub fn new(instance: &'a Instance) -> Self {
        LpRelaxation { instance }
    }

    /// Solves the relaxation of the given node and writes the outcome back
    /// into it: on an optimal lp, `lower_bound` receives the objective,
    /// `lp_value` the activation values and `feasible` becomes true. An
    /// infeasible lp is an expected outcome (the branching decisions can
    /// starve the clients of capacity): the node is marked infeasible with
    /// a `+inf` bound so it gets pruned on the next look. Any other backend
    /// status is fatal to the solve.
    pub fn evaluate(&self, node: &mut SearchNode) -> Result<(), Error> {
        let m = self.instance.num_sources();
        let n = self.instance.num_clients();

        let mut vars = ProblemVariables::new();
        let x: Vec<Vec<_>> = (0..n)
            .map(|_| (0..m).map(|_| vars.add(variable().min(0.0))).collect())
            .collect();
        let y: Vec<_> = (0..m)
            .map(|j| match node.fixed_value(Source(j)) {
                Some(open) => {
                    let pinned = if open { 1.0 } else { 0.0 };
                    vars.add(variable().min(pinned).max(pinned))
                }
                None => vars.add(variable().min(0.0).max(1.0)),
            })
            .collect();

        let mut objective = Expression::default();
        for (j, &activation) in y.iter().enumerate() {
            objective += self.instance.activation_cost(j) * activation;
        }
        for (i, row) in x.iter().enumerate() {
            for (j, &flow) in row.iter().enumerate() {
                objective += self.instance.transport_cost(i, j) * flow;
            }
        }

        let mut model = vars.minimise(objective.clone()).using(default_solver);
        for (i, row) in x.iter().enumerate() {
            let served = row
                .iter()
                .fold(Expression::default(), |sum, &flow| sum + flow);
            let demand = self.instance.demand(i);
            model.add_constraint(constraint!(served == demand));
        }
        for (j, &activation) in y.iter().enumerate() {
            let load = x
                .iter()
                .fold(Expression::default(), |sum, row| sum + row[j]);
            let spill = load - self.instance.capacity(j) * activation;
            model.add_constraint(constraint!(spill <= 0.0));
        }

        match model.solve() {
            Ok(solution) => {
                node.lower_bound = solution.eval(&objective);
                node.lp_value = y.iter().map(|&v| solution.value(v)).collect();
                node.feasible = true;
                trace!(
                    "relaxation at depth {}: bound {}",
                    node.depth,
                    node.lower_bound
                );
            }
            Err(ResolutionError::Infeasible) => {
                node.feasible = false;
                node.lower_bound = f64::INFINITY;
                trace!("relaxation at depth {}: infeasible", node.depth);
            }
            Err(ResolutionError::Unbounded) => {
                // demands are finite and every cost is non-negative: an
                // unbounded status means the backend went off the rails
                return Err(Error::LpSolver("the relaxation reported an unbounded objective".into()));
            }
            Err(other) => {
                return Err(Error::LpSolver(other.to_string()));
            }
        }
        Ok(())
    }
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################
