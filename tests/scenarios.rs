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

//! This module is meant to test the correctness of the solver end to end,
//! on instance files read from disk.

use std::path::PathBuf;

use cflbb::{read_instance, solve, SolveReport, SolverConfig, SolverConfigBuilder};

fn locate(id: &str) -> PathBuf {
    PathBuf::new()
        .join(env!("CARGO_MANIFEST_DIR"))
        .join("resources/")
        .join(id)
}

fn solve_file(id: &str, config: &SolverConfig) -> SolveReport {
    let fname = locate(id);
    let instance = read_instance(fname).unwrap();
    solve(&instance, config).unwrap()
}

#[test]
fn tiny_1x1() {
    let report = solve_file("tiny_1x1.txt", &SolverConfig::default());
    assert!(report.feasible);
    assert!((report.best_value - 25.0).abs() < 1e-6);
    assert_eq!(vec![true], report.activations);
    assert!(report.iterations <= 2);
}

#[test]
fn prefer_cheap_2x2() {
    let report = solve_file("prefer_cheap_2x2.txt", &SolverConfig::default());
    assert!(report.feasible);
    assert!((report.best_value - 560.0).abs() < 1e-6);
    assert_eq!(vec![true, false], report.activations);
}

#[test]
fn split_forced_2x2() {
    let report = solve_file("split_forced_2x2.txt", &SolverConfig::default());
    assert!(report.feasible);
    assert!((report.best_value - 625.0).abs() < 1e-6);
    assert_eq!(vec![true, true], report.activations);
}

#[test]
fn capacity_shortfall_1x1() {
    let report = solve_file("capacity_shortfall_1x1.txt", &SolverConfig::default());
    assert!(!report.feasible);
    assert_eq!(0, report.iterations);
    assert_eq!(f64::INFINITY, report.best_value);
}

#[test]
fn sample_3x4() {
    let report = solve_file("sample_3x4.txt", &SolverConfig::default());
    assert!(report.feasible);
    // opening sources 0 and 1 is the cheapest covering choice
    assert!((report.best_value - 1080.0).abs() < 1e-4);
    assert_eq!(vec![true, true, false], report.activations);
}

#[test]
fn an_integral_root_updates_the_incumbent_on_the_first_iteration() {
    // the relaxation of this instance is integral at the root: a single
    // dequeue suffices to adopt it and the search stops right after
    let report = solve_file("prefer_cheap_2x2.txt", &SolverConfig::default());
    assert!(report.feasible);
    assert!(report.iterations <= 2);
}

#[test]
fn a_budget_of_one_iteration_returns_the_greedy_incumbent() {
    let config = SolverConfigBuilder::default().max_iterations(1).build().unwrap();
    let report = solve_file("split_forced_2x2.txt", &config);
    assert!(report.feasible);
    assert_eq!(1, report.iterations);
    assert!((report.best_value - 625.0).abs() < 1e-6);
    // the optimality gap may still be open
    assert!(report.lower_bound <= report.best_value);
}

#[test]
fn two_runs_on_the_same_file_are_byte_identical() {
    let first = solve_file("sample_3x4.txt", &SolverConfig::default());
    let second = solve_file("sample_3x4.txt", &SolverConfig::default());
    assert_eq!(first.best_value.to_bits(), second.best_value.to_bits());
    assert_eq!(first.activations, second.activations);
    assert_eq!(first.iterations, second.iterations);
}

#[test]
fn growing_budgets_never_worsen_the_objective() {
    let mut previous = f64::INFINITY;
    for budget in 1..=8 {
        let config = SolverConfigBuilder::default().max_iterations(budget).build().unwrap();
        let report = solve_file("sample_3x4.txt", &config);
        assert!(report.best_value <= previous + 1e-9);
        previous = report.best_value;
    }
}
