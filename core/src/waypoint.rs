use crate::error::RouteError;
use crate::graph::{CityId, Graph, Hops};
use crate::route::Route;
use crate::traversal::bfs_route;

/// Shortest route from `src` to `dest` passing through both `via_a` and
/// `via_b`, in whichever of the two orders is cheaper.
///
/// Each order is made of three shortest-path legs; an order with any
/// unreachable leg is dropped. On equal hop counts `src → via_a → via_b →
/// dest` wins.
pub fn route_through(
    graph: &Graph,
    src: CityId,
    via_a: CityId,
    via_b: CityId,
    dest: CityId,
) -> Result<Option<Route>, RouteError> {
    for city in [src, via_a, via_b, dest] {
        graph.check_city(city)?;
    }

    let forward = route_via(graph, &[src, via_a, via_b, dest]);
    let swapped = route_via(graph, &[src, via_b, via_a, dest]);

    let best = match (forward, swapped) {
        (Some(f), Some(s)) => {
            if s.hops() < f.hops() {
                Some(s)
            } else {
                Some(f)
            }
        }
        (f, s) => f.or(s),
    };

    if let Some(route) = &best {
        tracing::debug!(src, via_a, via_b, dest, hops = route.hops(), "waypoint route found");
    }
    Ok(best)
}

/// Chain shortest-path legs through `stops` in order. `None` if any leg is
/// unreachable.
pub(crate) fn route_via(graph: &Graph, stops: &[CityId]) -> Option<Route> {
    let legs = stops
        .windows(2)
        .map(|w| bfs_route(graph, w[0], w[1], Hops::MAX))
        .collect::<Option<Vec<_>>>()?;
    Route::stitch(legs)
}
