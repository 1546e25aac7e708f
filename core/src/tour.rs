//! Minimum-hop closed tour through every city that can both be reached
//! from the start and fly back to it.
//!
//! The planner restricts the graph to that qualifying set `Q`, replaces
//! flights with shortest hop distances between members of `Q` (the metric
//! closure), and runs a Held–Karp style bitmask DP over `Q` with the start
//! fixed at index 0. Time is `O(2^k · k^2)` and memory `O(2^k · k)` for
//! `k = |Q|`, so `k` is capped by [`TourLimits`] and planning reports
//! [`RouteError::TooManyCities`] rather than attempting a huge table.

use std::time::{Duration, Instant};

use crate::error::RouteError;
use crate::graph::{CityId, Graph, Hops, TraversalDirection};
use crate::route::Route;
use crate::traversal::{bfs_distances, explore};
use crate::waypoint::route_via;

/// Bounds on the work the tour planner will attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TourLimits {
    max_cities: usize,
    time_limit: Option<Duration>,
}

impl TourLimits {
    pub const DEFAULT_MAX_CITIES: usize = 16;
    /// 2^20 · 20 table entries is the most the planner will allocate.
    pub const HARD_MAX_CITIES: usize = 20;

    /// Limits with `max_cities` clamped to `1..=HARD_MAX_CITIES`.
    pub fn new(max_cities: usize, time_limit: Option<Duration>) -> Self {
        Self {
            max_cities: max_cities.clamp(1, Self::HARD_MAX_CITIES),
            time_limit,
        }
    }

    /// Largest qualifying set (start included) the DP will run on.
    pub fn max_cities(&self) -> usize {
        self.max_cities.min(Self::HARD_MAX_CITIES)
    }

    /// Wall-clock budget for the DP, unbounded when `None`.
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit
    }
}

impl Default for TourLimits {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_CITIES, None)
    }
}

/// A closed walk from the start through every qualifying city.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tour {
    /// Full hop-by-hop walk, starting and ending at the start city.
    pub route: Route,
    /// Order in which qualifying cities are first targeted, start first.
    pub order: Vec<CityId>,
    pub hops: Hops,
}

/// Plan the minimum-hop closed tour from `start`.
///
/// Returns `Ok(None)` when no other city can be both reached and left to
/// return to `start`. Fails with [`RouteError::TooManyCities`] or
/// [`RouteError::TimeLimitExceeded`] when the DP is out of budget, which is
/// distinct from "no tour exists".
pub fn plan_tour(graph: &Graph, start: CityId, limits: &TourLimits) -> Result<Option<Tour>, RouteError> {
    graph.check_city(start)?;

    let cities = qualifying_cities(graph, start);
    tracing::debug!(start, qualifying = cities.len(), "tour candidates collected");

    if cities.len() == 1 {
        return Ok(None);
    }
    // the DP table has 2^k · k entries and parents are stored as u8
    let limit = limits.max_cities();
    if cities.len() > limit {
        return Err(RouteError::TooManyCities {
            count: cities.len(),
            limit,
        });
    }

    let closure = MetricClosure::build(graph, &cities);
    let table = TourTable::solve(&closure, limits)?;

    let Some((last, cost)) = table.best_closing(&closure) else {
        return Ok(None);
    };

    let order: Vec<CityId> = table.visiting_order(last).into_iter().map(|i| cities[i]).collect();

    let mut stops = order.clone();
    stops.push(start);
    let Some(route) = route_via(graph, &stops) else {
        return Ok(None);
    };
    debug_assert_eq!(route.hops(), cost);

    tracing::debug!(start, hops = cost, "tour planned");
    Ok(Some(Tour {
        hops: route.hops(),
        route,
        order,
    }))
}

/// `start` followed by every other city that is reachable from `start` and
/// can reach it back, ascending by id.
fn qualifying_cities(graph: &Graph, start: CityId) -> Vec<CityId> {
    let forward = explore(graph, start, TraversalDirection::Outgoing);
    let backward = explore(graph, start, TraversalDirection::Incoming);

    let mut cities = vec![start];
    cities.extend(
        (0..graph.city_count()).filter(|&c| c != start && forward[c] && backward[c]),
    );
    cities
}

/// Shortest hop distances between every ordered pair of qualifying cities.
struct MetricClosure {
    size: usize,
    hops: Vec<Option<Hops>>,
}

impl MetricClosure {
    fn build(graph: &Graph, cities: &[CityId]) -> Self {
        let size = cities.len();
        let mut hops = Vec::with_capacity(size * size);
        for &from in cities {
            let dist = bfs_distances(graph, from, TraversalDirection::Outgoing);
            hops.extend(cities.iter().map(|&to| dist.get(to)));
        }
        Self { size, hops }
    }

    fn get(&self, from: usize, to: usize) -> Option<Hops> {
        self.hops[from * self.size + to]
    }
}

/// Flat `(mask, last)` DP arena.
struct TourTable {
    size: usize,
    cost: Vec<Option<Hops>>,
    parent: Vec<Option<u8>>,
}

impl TourTable {
    /// Check the clock every 16,384 relaxations.
    const CLOCK_CHECK_MASK: u64 = 0x3FFF;

    fn index(&self, mask: usize, last: usize) -> usize {
        mask * self.size + last
    }

    fn full_mask(&self) -> usize {
        (1 << self.size) - 1
    }

    fn solve(closure: &MetricClosure, limits: &TourLimits) -> Result<Self, RouteError> {
        let size = closure.size;
        let states = (1usize << size) * size;
        tracing::trace!(size, states, "allocating tour table");

        let mut table = Self {
            size,
            cost: vec![None; states],
            parent: vec![None; states],
        };
        let started = Instant::now();
        let mut steps: u64 = 0;

        let base = table.index(1, 0);
        table.cost[base] = Some(0);

        for mask in 1..=table.full_mask() {
            // every partial tour contains the start
            if mask & 1 == 0 {
                continue;
            }
            for last in 0..size {
                if mask & (1 << last) == 0 {
                    continue;
                }
                let Some(so_far) = table.cost[table.index(mask, last)] else {
                    continue;
                };

                for next in 0..size {
                    if mask & (1 << next) != 0 {
                        continue;
                    }

                    steps += 1;
                    if steps & Self::CLOCK_CHECK_MASK == 0 {
                        if let Some(limit) = limits.time_limit() {
                            if started.elapsed() >= limit {
                                tracing::debug!(?limit, steps, "tour planning over time budget");
                                return Err(RouteError::TimeLimitExceeded { limit });
                            }
                        }
                    }

                    let Some(step) = closure.get(last, next) else {
                        continue;
                    };
                    let candidate = so_far + step;
                    let slot = table.index(mask | (1 << next), next);
                    if table.cost[slot].map_or(true, |current| candidate < current) {
                        table.cost[slot] = Some(candidate);
                        table.parent[slot] = Some(last as u8);
                    }
                }
            }
        }

        Ok(table)
    }

    /// Cheapest `(last, total)` over complete tables closed back to the
    /// start. Ties keep the lowest `last`.
    fn best_closing(&self, closure: &MetricClosure) -> Option<(usize, Hops)> {
        let full = self.full_mask();
        let mut best: Option<(usize, Hops)> = None;

        for last in 0..self.size {
            let (Some(so_far), Some(back)) = (self.cost[self.index(full, last)], closure.get(last, 0))
            else {
                continue;
            };
            let total = so_far + back;
            if best.map_or(true, |(_, t)| total < t) {
                best = Some((last, total));
            }
        }

        best
    }

    /// Indices from the start to `last`, following parent pointers.
    fn visiting_order(&self, last: usize) -> Vec<usize> {
        let mut order = Vec::with_capacity(self.size);
        let mut mask = self.full_mask();
        let mut current = last;

        loop {
            order.push(current);
            let prev = self.parent[self.index(mask, current)];
            mask ^= 1 << current;
            match prev {
                Some(p) => current = p as usize,
                None => break,
            }
        }

        order.reverse();
        order
    }
}
