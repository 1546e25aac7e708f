use crate::error::RouteError;

/// Dense city identifier in `[0, city_count)`.
pub type CityId = usize;

/// Hop count along a route.
pub type Hops = u32;

/// Which adjacency list a traversal follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalDirection {
    /// Follow flights in their direction (`from → to`).
    Outgoing,
    /// Follow flights backwards (`to → from`).
    Incoming,
}

/// Directed flight graph over densely numbered cities.
///
/// Edges are stored twice: `outgoing[a]` holds the destinations of `a` in
/// insertion order, `incoming[b]` holds the origins flying into `b`.
/// Insertion order of `outgoing` drives BFS discovery order, so the loader's
/// edge order decides which of several equal-length routes is returned.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    outgoing: Vec<Vec<CityId>>,
    incoming: Vec<Vec<CityId>>,
    edge_count: usize,
}

impl Graph {
    /// Graph with `city_count` cities and no flights.
    pub fn new(city_count: usize) -> Self {
        Self {
            outgoing: vec![Vec::new(); city_count],
            incoming: vec![Vec::new(); city_count],
            edge_count: 0,
        }
    }

    /// Build a graph from `(from, to)` pairs, keeping their order.
    pub fn from_edges<I>(city_count: usize, edges: I) -> Result<Self, RouteError>
    where
        I: IntoIterator<Item = (CityId, CityId)>,
    {
        let mut graph = Self::new(city_count);
        for (from, to) in edges {
            graph.add_edge(from, to)?;
        }
        Ok(graph)
    }

    /// Add a directed flight `from → to`.
    pub fn add_edge(&mut self, from: CityId, to: CityId) -> Result<(), RouteError> {
        self.check_city(from)?;
        self.check_city(to)?;
        self.outgoing[from].push(to);
        self.incoming[to].push(from);
        self.edge_count += 1;
        Ok(())
    }

    pub fn city_count(&self) -> usize {
        self.outgoing.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn contains(&self, city: CityId) -> bool {
        city < self.city_count()
    }

    /// Reject identifiers outside `[0, city_count)`.
    pub fn check_city(&self, city: CityId) -> Result<(), RouteError> {
        if self.contains(city) {
            Ok(())
        } else {
            Err(RouteError::InvalidCity {
                city,
                city_count: self.city_count(),
            })
        }
    }

    /// Destinations reachable by one flight from `city`, in insertion order.
    pub fn neighbors_out(&self, city: CityId) -> &[CityId] {
        self.outgoing.get(city).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Origins with a direct flight into `city`.
    pub fn neighbors_in(&self, city: CityId) -> &[CityId] {
        self.incoming.get(city).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Neighbours of `city` in the given direction.
    pub fn neighbors(&self, city: CityId, direction: TraversalDirection) -> &[CityId] {
        match direction {
            TraversalDirection::Outgoing => self.neighbors_out(city),
            TraversalDirection::Incoming => self.neighbors_in(city),
        }
    }

    pub fn has_edge(&self, from: CityId, to: CityId) -> bool {
        self.neighbors_out(from).contains(&to)
    }

    /// Approximate memory usage in bytes.
    pub fn memory_usage(&self) -> usize {
        use std::mem::size_of;

        let lists = 2 * self.outgoing.len() * size_of::<Vec<CityId>>();
        let edges = 2 * self.edge_count * size_of::<CityId>();
        lists + edges
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_graph_is_empty() {
        let g = Graph::new(4);
        assert_eq!(g.city_count(), 4);
        assert_eq!(g.edge_count(), 0);
        assert!(g.neighbors_out(0).is_empty());
    }

    #[test]
    fn test_from_edges_keeps_insertion_order() {
        let g = Graph::from_edges(4, vec![(0, 3), (0, 1), (0, 2)]).unwrap();
        assert_eq!(g.neighbors_out(0), &[3, 1, 2]);
        assert_eq!(g.neighbors_in(1), &[0]);
        assert_eq!(g.edge_count(), 3);
    }

    #[test]
    fn test_edges_are_directed() {
        let g = Graph::from_edges(2, vec![(0, 1)]).unwrap();
        assert!(g.has_edge(0, 1));
        assert!(!g.has_edge(1, 0));
        assert_eq!(g.neighbors(1, TraversalDirection::Incoming), &[0]);
        assert!(g.neighbors(1, TraversalDirection::Outgoing).is_empty());
    }

    #[test]
    fn test_add_edge_rejects_out_of_range() {
        let mut g = Graph::new(2);
        assert_eq!(
            g.add_edge(0, 2),
            Err(RouteError::InvalidCity {
                city: 2,
                city_count: 2
            })
        );
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn test_neighbors_of_unknown_city_empty() {
        let g = Graph::new(1);
        assert!(g.neighbors_out(7).is_empty());
        assert!(g.neighbors_in(7).is_empty());
    }

    #[test]
    fn test_memory_usage_nonzero() {
        let g = Graph::from_edges(3, vec![(0, 1), (1, 2)]).unwrap();
        assert!(g.memory_usage() > 0);
    }
}
