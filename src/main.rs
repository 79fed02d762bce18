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

//! The command line front end of the solver: load an instance file, solve
//! it, print the outcome. Exits with a non-zero status on io/parse errors
//! or on a fatal lp backend failure; an infeasible instance is a completed
//! solve and exits with 0.

use clap::Parser;

use cflbb::{read_instance, solve, write_sample_instance, Error, SolverConfigBuilder};

/// This structure uses `clap-derive` annotations and defines the arguments
/// that can be passed on to the executable solver.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The path to the instance file
    #[clap(required_unless_present = "write_sample")]
    fname: Option<String>,
    /// The maximum number of nodes dequeued before the search gives up
    #[clap(short, long, default_value = "10000")]
    iterations: usize,
    /// The numerical tolerance used by every bound comparison
    #[clap(short, long, default_value = "1e-6")]
    tolerance: f64,
    /// Print a summary of the instance before solving it
    #[clap(long)]
    show_instance: bool,
    /// Write a small sample instance file to the given path and exit
    #[clap(long)]
    write_sample: Option<String>,
}

fn run(args: Args) -> Result<(), Error> {
    if let Some(path) = &args.write_sample {
        write_sample_instance(path)?;
        println!("Sample instance written to {path}");
        return Ok(());
    }

    // clap guarantees the file name is present when no sample was requested
    let fname = args.fname.as_deref().unwrap_or_default();
    let instance = read_instance(fname)?;
    if args.show_instance {
        println!("{instance}");
    }

    let config = SolverConfigBuilder::default()
        .max_iterations(args.iterations)
        .tolerance(args.tolerance)
        .build()
        .expect("the configuration defaults are complete");
    let report = solve(&instance, &config)?;

    let open = report
        .activations
        .iter()
        .enumerate()
        .filter(|(_, &open)| open)
        .map(|(j, _)| j)
        .collect::<Vec<_>>();

    println!("Duration:   {:.3} seconds", report.wall_time.as_secs_f32());
    if report.feasible {
        println!("Objective:  {:.2}", report.best_value);
    } else {
        println!("Objective:  none (no feasible solution found)");
    }
    println!("Lower Bnd:  {}", report.lower_bound);
    println!("Iterations: {}", report.iterations);
    println!("Feasible:   {}", report.feasible);
    println!("Solution:   {open:?}");
    Ok(())
}

/// This is your executable's entry point. It is the place where all the
/// pieces are put together to create an effective solver for the
/// capacitated facility location problem.
fn main() {
    env_logger::init();
    let args = Args::parse();
    if let Err(error) = run(args) {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}
