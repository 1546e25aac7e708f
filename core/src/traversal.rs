use std::collections::VecDeque;

use crate::error::RouteError;
use crate::graph::{CityId, Graph, Hops, TraversalDirection};
use crate::route::Route;

/// Hop distance from one source to every city.
///
/// Unreachable cities are `None`; there is no numeric sentinel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceMap {
    source: CityId,
    hops: Vec<Option<Hops>>,
}

impl DistanceMap {
    pub fn source(&self) -> CityId {
        self.source
    }

    pub fn get(&self, city: CityId) -> Option<Hops> {
        self.hops.get(city).copied().flatten()
    }

    pub fn is_reachable(&self, city: CityId) -> bool {
        self.get(city).is_some()
    }

    /// `(city, hops)` for every reachable city, ascending by id.
    pub fn iter(&self) -> impl Iterator<Item = (CityId, Hops)> + '_ {
        self.hops
            .iter()
            .enumerate()
            .filter_map(|(city, h)| h.map(|h| (city, h)))
    }

    /// Number of reachable cities, the source included.
    pub fn reachable_count(&self) -> usize {
        self.hops.iter().filter(|h| h.is_some()).count()
    }
}

/// Shortest route from `src` to `dest` by BFS (minimum hops).
///
/// Neighbours are expanded in stored insertion order and each city keeps the
/// first predecessor that discovered it, so the route returned for a given
/// graph is always the same one. Returns `Ok(None)` when `dest` is not
/// reachable. `src == dest` yields the single-city route.
pub fn shortest_path(graph: &Graph, src: CityId, dest: CityId) -> Result<Option<Route>, RouteError> {
    graph.check_city(src)?;
    graph.check_city(dest)?;
    Ok(bfs_route(graph, src, dest, Hops::MAX))
}

/// Like [`shortest_path`], but only returns a route of at most `max_hops`.
///
/// The search stops expanding at depth `max_hops`; any route it returns is
/// identical to the unbounded result.
pub fn shortest_path_within(
    graph: &Graph,
    src: CityId,
    dest: CityId,
    max_hops: Hops,
) -> Result<Option<Route>, RouteError> {
    graph.check_city(src)?;
    graph.check_city(dest)?;
    Ok(bfs_route(graph, src, dest, max_hops))
}

/// BFS distance labelling from `src` to all cities along outgoing flights.
pub fn distances_from(graph: &Graph, src: CityId) -> Result<DistanceMap, RouteError> {
    graph.check_city(src)?;
    Ok(bfs_distances(graph, src, TraversalDirection::Outgoing))
}

/// Every city reachable from `start` by following flights forward,
/// `start` included, ascending by id.
pub fn reachable_from(graph: &Graph, start: CityId) -> Result<Vec<CityId>, RouteError> {
    graph.check_city(start)?;
    Ok(collect_marked(&explore(graph, start, TraversalDirection::Outgoing)))
}

/// Every city that can reach `target` by following flights forward,
/// `target` included, ascending by id.
pub fn reaching_to(graph: &Graph, target: CityId) -> Result<Vec<CityId>, RouteError> {
    graph.check_city(target)?;
    Ok(collect_marked(&explore(graph, target, TraversalDirection::Incoming)))
}

/// Unchecked BFS route search. Callers validate `src` and `dest`.
pub(crate) fn bfs_route(graph: &Graph, src: CityId, dest: CityId, max_hops: Hops) -> Option<Route> {
    if src == dest {
        return Some(Route::single(src));
    }

    if max_hops == 0 {
        return None;
    }

    // Sentinel: start city's parent is itself
    let mut parent: Vec<Option<CityId>> = vec![None; graph.city_count()];
    let mut queue: VecDeque<(CityId, Hops)> = VecDeque::new();

    parent[src] = Some(src);
    queue.push_back((src, 0));

    while let Some((current, depth)) = queue.pop_front() {
        if depth >= max_hops {
            continue;
        }

        for &next in graph.neighbors_out(current) {
            if parent[next].is_none() {
                parent[next] = Some(current);

                if next == dest {
                    return Some(reconstruct_route(&parent, src, dest));
                }

                queue.push_back((next, depth + 1));
            }
        }
    }

    None
}

/// Walk parent pointers from `dest` back to `src`.
fn reconstruct_route(parent: &[Option<CityId>], src: CityId, dest: CityId) -> Route {
    let mut cities = vec![dest];
    let mut current = dest;

    while current != src {
        match parent[current] {
            Some(p) => {
                cities.push(p);
                current = p;
            }
            None => break,
        }
    }

    cities.reverse();
    Route::from_cities(cities)
}

/// Unchecked full BFS labelling in the given direction.
pub(crate) fn bfs_distances(graph: &Graph, src: CityId, direction: TraversalDirection) -> DistanceMap {
    let mut hops: Vec<Option<Hops>> = vec![None; graph.city_count()];
    let mut queue: VecDeque<CityId> = VecDeque::new();

    hops[src] = Some(0);
    queue.push_back(src);

    while let Some(current) = queue.pop_front() {
        let depth = hops[current].unwrap_or_default();
        for &next in graph.neighbors(current, direction) {
            if hops[next].is_none() {
                hops[next] = Some(depth + 1);
                queue.push_back(next);
            }
        }
    }

    DistanceMap { source: src, hops }
}

/// Iterative DFS with an explicit stack; each city is marked once.
pub(crate) fn explore(graph: &Graph, start: CityId, direction: TraversalDirection) -> Vec<bool> {
    let mut visited = vec![false; graph.city_count()];
    let mut stack = vec![start];
    visited[start] = true;

    while let Some(current) = stack.pop() {
        for &next in graph.neighbors(current, direction) {
            if !visited[next] {
                visited[next] = true;
                stack.push(next);
            }
        }
    }

    visited
}

fn collect_marked(marks: &[bool]) -> Vec<CityId> {
    marks
        .iter()
        .enumerate()
        .filter(|(_, &m)| m)
        .map(|(city, _)| city)
        .collect()
}
