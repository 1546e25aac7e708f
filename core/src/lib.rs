//! route-search-core: route queries over a directed flight graph.
//!
//! A pure Rust library over an immutable adjacency list of densely numbered
//! cities. It answers four kinds of query, all by minimum hop count:
//! shortest route between two cities, shortest route through two unordered
//! waypoints, closed tour through every city reachable from (and able to
//! return to) a start, and the best meeting city for three travellers.
//!
//! File loading, name lookup and output formatting live in the CLI crate;
//! this crate only sees integer city ids.

mod error;
mod graph;
mod rendezvous;
mod route;
mod tour;
mod traversal;
mod waypoint;

#[cfg(test)]
mod test_support;

pub use error::RouteError;
pub use graph::{CityId, Graph, Hops, TraversalDirection};
pub use rendezvous::{find_meeting_point, Rendezvous};
pub use route::Route;
pub use tour::{plan_tour, Tour, TourLimits};
pub use traversal::{
    distances_from, reachable_from, reaching_to, shortest_path, shortest_path_within, DistanceMap,
};
pub use waypoint::route_through;
