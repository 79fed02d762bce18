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

//! This module groups the kinds of errors that might occur when loading an
//! instance from file or while solving it. Note that neither exhausting the
//! iteration budget nor an infeasible root relaxation is an error: both
//! produce an ordinary [`SolveReport`](crate::SolveReport).

/// This enumeration groups the error conditions of the solver. There can be
/// io errors (file unavailable ?), instance errors (the file does not encode
/// a well formed facility location problem), or lp backend failures (which
/// are always fatal to the current solve: an *infeasible* relaxation is an
/// expected outcome and is not reported through this type).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// There was an io related error
    #[error("io error {0}")]
    Io(#[from] std::io::Error),
    /// The file or the supplied vectors do not describe a well formed
    /// instance (malformed field, dimension mismatch, negative value)
    #[error("invalid instance: {0}")]
    InvalidInstance(String),
    /// The lp backend failed or returned a status that cannot occur with a
    /// well posed relaxation (e.g. unbounded)
    #[error("lp solver error: {0}")]
    LpSolver(String),
}
