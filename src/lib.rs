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

//! # CFLBB
//! CFLBB is an exact solver for the capacitated facility location problem
//! (CFL): given a set of candidate production sources, each with a fixed
//! activation cost and a finite capacity, and a set of clients each with a
//! demand and a per-source shipping cost, it chooses which sources to open
//! and how to route the demand so that the total (activation + transport)
//! cost is minimal, all demand is satisfied and no open source exceeds its
//! capacity.
//!
//! The solver runs a best-bound-first branch-and-bound over the activation
//! variables. Every node of the search tree is bounded by the lp relaxation
//! of its restricted subproblem (integrality dropped, branching decisions
//! pinned); the upper bound is seeded by a greedy construction and improves
//! each time the relaxation of a node turns out integral. The search stops
//! when the optimality gap closes, the frontier empties, or a configurable
//! iteration budget runs out -- in which case the best incumbent found so
//! far is returned.
//!
//! ## Quick Example
//! The following solves a small instance end to end: two sources of which
//! only the first deserves to be open since it is cheap and large enough to
//! serve both clients.
//!
//! ```
//! use cflbb::{solve, Instance, SolverConfig};
//!
//! let instance = Instance::new(
//!     vec![100.0, 100.0],                    // capacities
//!     vec![10.0, 15.0],                      // activation costs
//!     vec![50.0, 50.0],                      // demands
//!     vec![vec![5.0, 8.0], vec![6.0, 7.0]],  // transport costs
//! ).unwrap();
//!
//! let report = solve(&instance, &SolverConfig::default()).unwrap();
//!
//! assert!(report.feasible);
//! assert_eq!(560.0, report.best_value);
//! assert_eq!(vec![true, false], report.activations);
//! ```
//!
//! Instances can also be read from whitespace-delimited text files with
//! [`read_instance`]; the format is documented there and a sample file can
//! be produced with [`write_sample_instance`].

mod common;
mod errors;
mod instance;
mod node;
mod fringe;
mod relaxation;
mod heuristics;
mod solver;

pub use common::*;
pub use errors::*;
pub use instance::*;
pub use node::*;
pub use fringe::*;
pub use relaxation::*;
pub use heuristics::*;
pub use solver::*;
