use crate::error::RouteError;
use crate::graph::{CityId, Graph, Hops, TraversalDirection};
use crate::route::Route;
use crate::traversal::{bfs_distances, bfs_route};

/// Where three travellers should meet and how each gets there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendezvous {
    pub city: CityId,
    /// Route of each traveller, in argument order.
    pub routes: [Route; 3],
    pub total_hops: Hops,
}

/// Meeting city minimising the summed hop count of three travellers.
///
/// The travellers' own cities are never chosen. A candidate must be
/// reachable by all three; ties go to the lowest city id. Returns
/// `Ok(None)` if no city qualifies.
pub fn find_meeting_point(
    graph: &Graph,
    p1: CityId,
    p2: CityId,
    p3: CityId,
) -> Result<Option<Rendezvous>, RouteError> {
    let travellers = [p1, p2, p3];
    for city in travellers {
        graph.check_city(city)?;
    }

    let dist = travellers.map(|p| bfs_distances(graph, p, TraversalDirection::Outgoing));

    let mut best: Option<(CityId, Hops)> = None;
    for city in 0..graph.city_count() {
        if travellers.contains(&city) {
            continue;
        }
        let (Some(a), Some(b), Some(c)) = (dist[0].get(city), dist[1].get(city), dist[2].get(city))
        else {
            continue;
        };
        let total = a + b + c;
        if best.map_or(true, |(_, t)| total < t) {
            best = Some((city, total));
        }
    }

    let Some((city, total_hops)) = best else {
        tracing::debug!(p1, p2, p3, "no common meeting city");
        return Ok(None);
    };

    let route_to = |p: CityId| bfs_route(graph, p, city, Hops::MAX);
    let (Some(r1), Some(r2), Some(r3)) = (route_to(p1), route_to(p2), route_to(p3)) else {
        return Ok(None);
    };

    tracing::debug!(city, total_hops, "meeting city chosen");
    Ok(Some(Rendezvous {
        city,
        routes: [r1, r2, r3],
        total_hops,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{floyd_warshall, graph, make_star, random_graph, seeded_rng};

    #[test]
    fn test_star_meets_at_center() {
        let g = make_star(3, 4);
        let r = find_meeting_point(&g, 0, 1, 2).unwrap().unwrap();
        assert_eq!(r.city, 3);
        assert_eq!(r.total_hops, 3);
        for (route, p) in r.routes.iter().zip([0, 1, 2]) {
            assert_eq!(route.cities(), &[p, 3]);
        }
    }

    #[test]
    fn test_never_picks_a_traveller_city() {
        // 1 and 2 fly to 0 directly, but 0 is a traveller
        let g = graph(4, &[(1, 0), (2, 0), (0, 3), (1, 3), (2, 3)]);
        let r = find_meeting_point(&g, 0, 1, 2).unwrap().unwrap();
        assert_eq!(r.city, 3);
        assert_eq!(r.total_hops, 3);
    }

    #[test]
    fn test_tie_breaks_lowest_id() {
        let g = graph(5, &[(0, 3), (1, 3), (2, 3), (0, 4), (1, 4), (2, 4)]);
        let r = find_meeting_point(&g, 0, 1, 2).unwrap().unwrap();
        assert_eq!(r.city, 3);
    }

    #[test]
    fn test_none_when_unreachable() {
        let g = graph(4, &[(0, 3), (1, 3)]);
        assert_eq!(find_meeting_point(&g, 0, 1, 2).unwrap(), None);
    }

    #[test]
    fn test_none_when_only_traveller_cities() {
        let g = graph(3, &[(0, 1), (1, 2), (2, 0)]);
        assert_eq!(find_meeting_point(&g, 0, 1, 2).unwrap(), None);
    }

    #[test]
    fn test_invalid_city() {
        let g = make_star(0, 3);
        assert!(find_meeting_point(&g, 0, 1, 9).is_err());
    }

    #[test]
    fn test_total_is_minimal() {
        let mut rng = seeded_rng(5);
        for _ in 0..20 {
            let g = random_graph(&mut rng, 10, 3);
            let d = floyd_warshall(&g);
            let (a, b, c) = (0, 1, 2);
            let best = (3..10)
                .filter_map(|m| Some(d[a][m]? + d[b][m]? + d[c][m]?))
                .min();
            let r = find_meeting_point(&g, a, b, c).unwrap();
            assert_eq!(r.as_ref().map(|r| r.total_hops), best);
            if let Some(r) = r {
                assert!(![a, b, c].contains(&r.city));
                let sum: Hops = r.routes.iter().map(|x| x.hops()).sum();
                assert_eq!(sum, r.total_hops);
                assert!(r.routes.iter().all(|x| x.is_valid_in(&g) && x.end() == r.city));
            }
        }
    }
}
