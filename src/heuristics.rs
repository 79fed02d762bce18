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

//! This module provides the primal side of the search: a greedy
//! construction that seeds the upper bound with a feasible opening vector,
//! and the evaluator that prices such a vector by routing every client to
//! one open source.

use ordered_float::OrderedFloat;

use crate::Instance;

/// Remaining capacity below this threshold counts as exhausted.
const CAPACITY_EPSILON: f64 = 1e-6;

/// Builds an initial opening vector greedily. Each source is scored by the
/// per-unit cost of the capacity it offers: its activation cost plus the
/// transport cost of the best clients it could serve on its own (filled in
/// ascending `transport_cost / demand` order while they fit), divided by
/// its capacity. Sources are then opened in ascending score order until the
/// opened capacity covers the total demand.
///
/// The result always offers enough capacity when the instance globally has
/// enough; its exact cost comes from [`routing_cost`].
pub fn greedy_activation(instance: &Instance, tolerance: f64) -> Vec<bool> {
    let m = instance.num_sources();
    let n = instance.num_clients();

    let mut scored: Vec<(OrderedFloat<f64>, usize)> = Vec::with_capacity(m);
    for j in 0..m {
        let mut by_density: Vec<usize> = (0..n).collect();
        by_density.sort_unstable_by_key(|&i| {
            OrderedFloat(instance.transport_cost(i, j) / instance.demand(i))
        });

        let mut available = instance.capacity(j);
        let mut transport = 0.0;
        for &i in &by_density {
            let demand = instance.demand(i);
            if demand <= available {
                transport += demand * instance.transport_cost(i, j);
                available -= demand;
            }
        }

        let score = (instance.activation_cost(j) + transport) / instance.capacity(j);
        scored.push((OrderedFloat(score), j));
    }
    scored.sort_unstable();

    let mut open = vec![false; m];
    let mut opened_capacity = 0.0;
    for &(_, j) in &scored {
        if opened_capacity >= instance.total_demand() - tolerance {
            break;
        }
        open[j] = true;
        opened_capacity += instance.capacity(j);
    }
    open
}

/// Prices a binary opening vector: returns the activation cost of the open
/// sources plus the transport cost of routing every client, or `+inf` when
/// the routing fails. Clients are served in ascending order of their density
/// (cheapest open transport cost over demand); each one sends its **entire**
/// demand to the open source minimizing `transport_cost / remaining_capacity`
/// among those with positive remaining capacity.
///
/// This is a one-sided evaluator, not a subproblem solver: because it never
/// splits a client across two sources it may report `+inf` for an opening
/// that a split routing would satisfy, and the last client routed to a
/// source may overshoot its remaining capacity. The result is therefore
/// only ever used as an upper bound, never as an infeasibility certificate.
pub fn routing_cost(instance: &Instance, open: &[bool]) -> f64 {
    let m = instance.num_sources();
    let n = instance.num_clients();

    let opened_capacity: f64 = (0..m).filter(|&j| open[j]).map(|j| instance.capacity(j)).sum();
    if opened_capacity < instance.total_demand() {
        return f64::INFINITY;
    }

    let mut total: f64 = (0..m)
        .filter(|&j| open[j])
        .map(|j| instance.activation_cost(j))
        .sum();
    let mut remaining = instance.capacities().to_vec();

    let mut by_density: Vec<(OrderedFloat<f64>, usize)> = Vec::with_capacity(n);
    for i in 0..n {
        let cheapest = (0..m)
            .filter(|&j| open[j])
            .map(|j| instance.transport_cost(i, j))
            .fold(f64::INFINITY, f64::min);
        if cheapest.is_finite() {
            by_density.push((OrderedFloat(cheapest / instance.demand(i)), i));
        }
    }
    by_density.sort_unstable();

    for &(_, i) in &by_density {
        let best = (0..m)
            .filter(|&j| open[j] && remaining[j] > CAPACITY_EPSILON)
            .min_by_key(|&j| OrderedFloat(instance.transport_cost(i, j) / remaining[j]));
        let Some(j) = best else {
            return f64::INFINITY;
        };
        total += instance.transport_cost(i, j) * instance.demand(i);
        remaining[j] -= instance.demand(i);
    }
    total
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################


#[cfg(test)]
mod test_routing_cost {
    use crate::{routing_cost, Instance};

    fn two_by_two(capacity: Vec<f64>) -> Instance {
        Instance::new(
            capacity,
            vec![10.0, 15.0],
            vec![50.0, 50.0],
            vec![vec![5.0, 8.0], vec![6.0, 7.0]],
        )
        .unwrap()
    }

    #[test]
    fn a_single_open_source_serves_everyone() {
        let instance = two_by_two(vec![100.0, 100.0]);
        // 10 + 5*50 + 6*50
        assert_eq!(560.0, routing_cost(&instance, &[true, false]));
    }

    #[test]
    fn tight_capacities_spread_the_clients() {
        let instance = two_by_two(vec![60.0, 60.0]);
        // client 0 goes to source 0 (250), client 1 to source 1 (350)
        assert_eq!(625.0, routing_cost(&instance, &[true, true]));
    }

    #[test]
    fn insufficient_opened_capacity_is_unpriceable() {
        let instance = two_by_two(vec![60.0, 60.0]);
        assert_eq!(f64::INFINITY, routing_cost(&instance, &[true, false]));
    }

    #[test]
    fn nothing_open_is_unpriceable() {
        let instance = two_by_two(vec![100.0, 100.0]);
        assert_eq!(f64::INFINITY, routing_cost(&instance, &[false, false]));
    }

    #[test]
    fn whole_demands_consume_sources_one_client_at_a_time() {
        // the first client exhausts source 0 entirely and the second one
        // must fall back on the dearer source; demands are never split
        let instance = Instance::new(
            vec![50.0, 50.0],
            vec![0.0, 0.0],
            vec![50.0, 50.0],
            vec![vec![1.0, 2.0], vec![1.0, 2.0]],
        )
        .unwrap();
        // client 0 takes all of source 0, client 1 falls back on source 1
        assert_eq!(1.0 * 50.0 + 2.0 * 50.0, routing_cost(&instance, &[true, true]));
    }

    #[test]
    fn a_dry_pool_is_unpriceable() {
        // zero-capacity sources pass the aggregate check (no demand at all)
        // yet cannot receive a single client
        let instance = Instance::new(
            vec![0.0, 0.0],
            vec![0.0, 0.0],
            vec![0.0],
            vec![vec![1.0, 2.0]],
        )
        .unwrap();
        assert_eq!(f64::INFINITY, routing_cost(&instance, &[true, true]));
    }
}
