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

//! This module defines the most basic data types that are used throughout all
//! the code of the solver. These are also the types a client library is most
//! likely to work with.

use std::time::Duration;

// ----------------------------------------------------------------------------
// --- SOURCE -----------------------------------------------------------------
// ----------------------------------------------------------------------------
/// This type denotes one production source (facility) from the problem at
/// hand. Each source is identified with an integer ranging from 0 until
/// `instance.num_sources()`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Source(pub usize);
impl Source {
    #[inline]
    /// This function returns the id (numeric value) of the source.
    ///
    /// # Examples:
    /// ```
    /// # use cflbb::Source;
    /// assert_eq!(0, Source(0).id());
    /// assert_eq!(1, Source(1).id());
    /// assert_eq!(2, Source(2).id());
    /// ```
    pub fn id(self) -> usize {
        self.0
    }
}

// ----------------------------------------------------------------------------
// --- DECISION ---------------------------------------------------------------
// ----------------------------------------------------------------------------
/// This denotes a branching decision that was made during the search. It pins
/// the activation of the given `source` either closed (`open == false`) or
/// open (`open == true`) in the subtree it creates.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub struct Decision {
    pub source: Source,
    pub open: bool,
}

// ----------------------------------------------------------------------------
// --- INCUMBENT --------------------------------------------------------------
// ----------------------------------------------------------------------------
/// The best integer-feasible solution known so far. Its `value` is the exact
/// cost of serving every client with the `activations` it records, and it is
/// a valid upper bound on the optimum. As long as no integer solution has
/// been found, the `value` is `f64::INFINITY` and `activations` is empty.
///
/// The incumbent only ever improves: the engine never replaces it with a
/// worse one.
#[derive(Debug, Clone, PartialEq)]
pub struct Incumbent {
    /// The exact cost of the recorded activation vector
    pub value: f64,
    /// Which sources are open in the solution (one flag per source)
    pub activations: Vec<bool>,
}
impl Incumbent {
    /// Creates the initial, empty incumbent (no known solution).
    pub fn none() -> Self {
        Incumbent {
            value: f64::INFINITY,
            activations: vec![],
        }
    }
    /// True iff an actual solution has been recorded.
    pub fn is_feasible(&self) -> bool {
        self.value.is_finite()
    }
}
impl Default for Incumbent {
    fn default() -> Self {
        Self::none()
    }
}

// ----------------------------------------------------------------------------
// --- RESULTS ----------------------------------------------------------------
// ----------------------------------------------------------------------------
/// The outcome of one complete solve. Two cases are to be distinguished:
///
/// * When the `feasible` flag is true, `best_value` is the cost of the best
///   integer solution that was found and `activations` tells which sources
///   to open. If additionally `iterations` is less than the configured
///   budget, that solution is optimal within the configured tolerance.
/// * When the `feasible` flag is false, no integer solution is known:
///   `best_value` is `f64::INFINITY` and `activations` is empty.
///
/// Exhausting the iteration budget is not an error: the caller detects a
/// possibly non-optimal outcome by observing that `iterations` reached the
/// budget while `best_value - lower_bound` exceeds the tolerance.
#[derive(Debug, Clone, PartialEq)]
pub struct SolveReport {
    /// Is an integer solution known at all?
    pub feasible: bool,
    /// Cost of the best known integer solution (+inf when none)
    pub best_value: f64,
    /// The activation of each source in the best known solution
    pub activations: Vec<bool>,
    /// How many nodes were dequeued during the search
    pub iterations: usize,
    /// The best lower bound proved over the remaining frontier (+inf once
    /// the frontier has been exhausted)
    pub lower_bound: f64,
    /// Time spent searching
    pub wall_time: Duration,
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################
