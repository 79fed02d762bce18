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

//! This module provides the representation of a capacitated facility
//! location instance, along with the utilities to read one from file and to
//! write a small sample file showing the expected format.

use std::fmt;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

use crate::Error;

/// This structure represents a particular instance of the capacitated
/// facility location problem: a set of candidate production sources, each
/// with a fixed activation cost and a finite capacity, and a set of clients
/// each with a demand and a per-source unit shipping cost.
///
/// The instance is immutable for the duration of a solve; the total demand
/// and total capacity are computed once at construction and cached.
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    /// the number of candidate production sources
    num_sources: usize,
    /// the number of clients to serve
    num_clients: usize,
    /// the maximum amount of demand each source can serve once open
    capacity: Vec<f64>,
    /// the fixed cost of opening each source
    activation_cost: Vec<f64>,
    /// the demand of each client
    demand: Vec<f64>,
    /// `transport_cost[i][j]` is the unit-demand cost of serving client `i`
    /// from source `j`
    transport_cost: Vec<Vec<f64>>,
    /// cached sum of all client demands
    total_demand: f64,
    /// cached sum of all source capacities
    total_capacity: f64,
}

impl Instance {
    /// Creates a new instance from the given data. It fails with
    /// [`Error::InvalidInstance`] whenever the dimensions are inconsistent
    /// or any of the values is negative (or not a number).
    pub fn new(
        capacity: Vec<f64>,
        activation_cost: Vec<f64>,
        demand: Vec<f64>,
        transport_cost: Vec<Vec<f64>>,
    ) -> Result<Self, Error> {
        let num_sources = capacity.len();
        let num_clients = demand.len();

        if num_sources == 0 {
            return Err(Error::InvalidInstance("there must be at least one source".into()));
        }
        if num_clients == 0 {
            return Err(Error::InvalidInstance("there must be at least one client".into()));
        }
        if activation_cost.len() != num_sources {
            return Err(Error::InvalidInstance(format!(
                "expected {} activation costs, got {}",
                num_sources,
                activation_cost.len()
            )));
        }
        if transport_cost.len() != num_clients {
            return Err(Error::InvalidInstance(format!(
                "expected {} transport cost rows, got {}",
                num_clients,
                transport_cost.len()
            )));
        }
        for (i, row) in transport_cost.iter().enumerate() {
            if row.len() != num_sources {
                return Err(Error::InvalidInstance(format!(
                    "transport cost row {} has {} entries, expected {}",
                    i,
                    row.len(),
                    num_sources
                )));
            }
        }
        let all = capacity
            .iter()
            .chain(activation_cost.iter())
            .chain(demand.iter())
            .chain(transport_cost.iter().flatten());
        for &value in all {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidInstance(format!(
                    "all values must be finite and non-negative, got {value}"
                )));
            }
        }

        let total_demand = demand.iter().sum();
        let total_capacity = capacity.iter().sum();

        Ok(Instance {
            num_sources,
            num_clients,
            capacity,
            activation_cost,
            demand,
            transport_cost,
            total_demand,
            total_capacity,
        })
    }

    /// The number of candidate production sources (often called `m`).
    pub fn num_sources(&self) -> usize {
        self.num_sources
    }
    /// The number of clients (often called `n`).
    pub fn num_clients(&self) -> usize {
        self.num_clients
    }
    /// The capacity of the given source.
    pub fn capacity(&self, source: usize) -> f64 {
        self.capacity[source]
    }
    /// The fixed cost of opening the given source.
    pub fn activation_cost(&self, source: usize) -> f64 {
        self.activation_cost[source]
    }
    /// The demand of the given client.
    pub fn demand(&self, client: usize) -> f64 {
        self.demand[client]
    }
    /// The unit-demand cost of serving `client` from `source`.
    pub fn transport_cost(&self, client: usize, source: usize) -> f64 {
        self.transport_cost[client][source]
    }
    /// All source capacities.
    pub fn capacities(&self) -> &[f64] {
        &self.capacity
    }
    /// All client demands.
    pub fn demands(&self) -> &[f64] {
        &self.demand
    }
    /// The cached sum of all client demands.
    pub fn total_demand(&self) -> f64 {
        self.total_demand
    }
    /// The cached sum of all source capacities.
    pub fn total_capacity(&self) -> f64 {
        self.total_capacity
    }
}

impl fmt::Display for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "capacitated facility location instance")?;
        writeln!(f, "sources: {}, clients: {}", self.num_sources, self.num_clients)?;
        writeln!(f, "capacities:       {:?}", self.capacity)?;
        writeln!(f, "activation costs: {:?}", self.activation_cost)?;
        writeln!(f, "demands:          {:?}", self.demand)?;
        writeln!(f, "transport costs:")?;
        for row in self.transport_cost.iter() {
            writeln!(f, "  {row:?}")?;
        }
        writeln!(f, "total demand:   {}", self.total_demand)?;
        writeln!(f, "total capacity: {}", self.total_capacity)?;
        write!(
            f,
            "capacity/demand ratio: {}",
            self.total_capacity / self.total_demand
        )
    }
}

/// Pops the next whitespace-delimited token off the given iterator and
/// parses it, reporting which field was being read when that fails.
fn next_field<'a, T, I>(tokens: &mut I, what: &str) -> Result<T, Error>
where
    T: FromStr,
    I: Iterator<Item = &'a str>,
{
    let token = tokens
        .next()
        .ok_or_else(|| Error::InvalidInstance(format!("missing {what}")))?;
    token
        .parse()
        .map_err(|_| Error::InvalidInstance(format!("malformed {what}: {token:?}")))
}

/// This function is used to read an instance from file. The format is
/// whitespace delimited (tokens may wrap over lines arbitrarily):
///
/// * line 1: `m n` -- the number of sources and clients;
/// * line 2: the `m` capacities;
/// * line 3: the `m` activation costs;
/// * line 4: the `n` demands;
/// * lines 5 to `n + 4`: row `i` holds the `m` transport costs of client `i`.
pub fn read_instance<P: AsRef<Path>>(fname: P) -> Result<Instance, Error> {
    let text = fs::read_to_string(fname)?;
    let mut tokens = text.split_whitespace();

    let num_sources: usize = next_field(&mut tokens, "number of sources")?;
    let num_clients: usize = next_field(&mut tokens, "number of clients")?;

    let mut capacity = Vec::with_capacity(num_sources);
    for j in 0..num_sources {
        capacity.push(next_field(&mut tokens, &format!("capacity of source {j}"))?);
    }
    let mut activation_cost = Vec::with_capacity(num_sources);
    for j in 0..num_sources {
        activation_cost.push(next_field(&mut tokens, &format!("activation cost of source {j}"))?);
    }
    let mut demand = Vec::with_capacity(num_clients);
    for i in 0..num_clients {
        demand.push(next_field(&mut tokens, &format!("demand of client {i}"))?);
    }
    let mut transport_cost = Vec::with_capacity(num_clients);
    for i in 0..num_clients {
        let mut row = Vec::with_capacity(num_sources);
        for j in 0..num_sources {
            row.push(next_field(&mut tokens, &format!("transport cost [{i}][{j}]"))?);
        }
        transport_cost.push(row);
    }

    Instance::new(capacity, activation_cost, demand, transport_cost)
}

/// Writes a small, canonical 3-sources x 4-clients sample instance to the
/// given path. Handy to bootstrap experiments with the expected file format.
pub fn write_sample_instance<P: AsRef<Path>>(fname: P) -> Result<(), Error> {
    let mut file = fs::File::create(fname)?;
    writeln!(file, "3 4")?;
    writeln!(file, "100 120 80")?;
    writeln!(file, "50 60 40")?;
    writeln!(file, "25 30 20 35")?;
    writeln!(file, "10 15 12")?;
    writeln!(file, "8 20 18")?;
    writeln!(file, "12 10 25")?;
    writeln!(file, "15 8 14")?;
    Ok(())
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################
