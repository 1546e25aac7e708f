use std::io::Write;

use anyhow::{anyhow, bail};
use route_search_core::{
    find_meeting_point, plan_tour, route_through, shortest_path, CityId, Hops, Route, TourLimits,
};
use tracing::{debug, info};

use crate::load::{CityDirectory, Network};

/// Resolve a city name, failing with the name in the message.
fn resolve(cities: &CityDirectory, name: &str) -> anyhow::Result<CityId> {
    cities
        .resolve(name)
        .ok_or_else(|| anyhow!("city '{name}' not found"))
}

fn format_route(cities: &CityDirectory, route: &Route) -> String {
    route
        .cities()
        .iter()
        .map(|&c| cities.name(c))
        .collect::<Vec<_>>()
        .join(" to ")
}

/// Shortest route, optionally rejected when it needs more than
/// `max_connections` hops.
pub fn path(
    network: &Network,
    from: &str,
    to: &str,
    max_connections: Option<Hops>,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let src = resolve(&network.cities, from)?;
    let dest = resolve(&network.cities, to)?;

    let Some(route) = shortest_path(&network.graph, src, dest)? else {
        writeln!(out, "No route found from {from} to {to}")?;
        return Ok(());
    };

    if let Some(limit) = max_connections {
        if route.hops() > limit {
            writeln!(
                out,
                "No route found with at most {limit} connections (shortest route has {} connections)",
                route.hops()
            )?;
            return Ok(());
        }
    }

    writeln!(out, "{}", format_route(&network.cities, &route))?;
    writeln!(out, "total connection: {}", route.hops())?;
    Ok(())
}

/// Shortest route through two waypoints in either order.
pub fn through(
    network: &Network,
    from: &str,
    via_a: &str,
    via_b: &str,
    to: &str,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let ids = [from, via_a, via_b, to]
        .iter()
        .map(|name| resolve(&network.cities, name))
        .collect::<anyhow::Result<Vec<_>>>()?;

    match route_through(&network.graph, ids[0], ids[1], ids[2], ids[3])? {
        Some(route) => {
            writeln!(out, "{}", format_route(&network.cities, &route))?;
            writeln!(out, "smallest number of connection: {}", route.hops())?;
        }
        None => writeln!(out, "No route found from {from} through {via_a} and {via_b} to {to}")?,
    }
    Ok(())
}

/// Closed tour from `start` through every city that can be reached and
/// left again. Planner limits surface as errors.
pub fn tour(network: &Network, start: &str, limits: &TourLimits, out: &mut impl Write) -> anyhow::Result<()> {
    let src = resolve(&network.cities, start)?;
    debug!(?limits, "planning tour");

    match plan_tour(&network.graph, src, limits)? {
        Some(tour) => {
            info!(cities = tour.order.len(), hops = tour.hops, "tour found");
            writeln!(out, "{}", format_route(&network.cities, &tour.route))?;
            writeln!(out, "smallest number of connection: {}", tour.hops)?;
        }
        None => writeln!(out, "No tour found from {start} visiting all reachable cities")?,
    }
    Ok(())
}

/// Best meeting city for three travellers in distinct cities.
pub fn meet(network: &Network, names: [&str; 3], out: &mut impl Write) -> anyhow::Result<()> {
    let [a, b, c] = names;
    if a == b || b == c || a == c {
        bail!("all three people must be in different cities");
    }
    let ids = names
        .iter()
        .map(|name| resolve(&network.cities, name))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let Some(meeting) = find_meeting_point(&network.graph, ids[0], ids[1], ids[2])? else {
        writeln!(out, "No meeting city found that all three can reach")?;
        return Ok(());
    };

    writeln!(out, "You three should meet at {}", network.cities.name(meeting.city))?;
    for (label, route) in ["first", "second", "third"].iter().zip(&meeting.routes) {
        writeln!(
            out,
            "Route for {label} person: {} ({} connections)",
            format_route(&network.cities, route),
            route.hops()
        )?;
    }
    writeln!(out, "Total number of connection: {}", meeting.total_hops)?;
    Ok(())
}

/// Size of the loaded network.
pub fn status(network: &Network, out: &mut impl Write) -> anyhow::Result<()> {
    writeln!(out, "cities:  {}", network.graph.city_count())?;
    writeln!(out, "flights: {}", network.graph.edge_count())?;
    writeln!(out, "memory:  ~{} bytes", network.graph.memory_usage())?;
    Ok(())
}
