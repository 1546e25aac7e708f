use crate::graph::{CityId, Graph, Hops};

/// Ordered sequence of cities joined by flights.
///
/// A single-city route has zero hops. Every query that returns a `Route`
/// guarantees consecutive cities are joined by an edge of the graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    cities: Vec<CityId>,
}

impl Route {
    pub(crate) fn from_cities(cities: Vec<CityId>) -> Self {
        debug_assert!(!cities.is_empty());
        Self { cities }
    }

    /// Zero-hop route standing at `city`.
    pub fn single(city: CityId) -> Self {
        Self { cities: vec![city] }
    }

    /// Join segments end to end, dropping the junction city repeated at
    /// the start of each segment after the first.
    ///
    /// Returns `None` for an empty input or if a segment does not start
    /// where the previous one ended.
    pub fn stitch<I>(segments: I) -> Option<Self>
    where
        I: IntoIterator<Item = Route>,
    {
        let mut segments = segments.into_iter();
        let mut route = segments.next()?;
        for segment in segments {
            if segment.start() != route.end() {
                return None;
            }
            route.cities.extend_from_slice(&segment.cities[1..]);
        }
        Some(route)
    }

    pub fn cities(&self) -> &[CityId] {
        &self.cities
    }

    pub fn into_cities(self) -> Vec<CityId> {
        self.cities
    }

    pub fn hops(&self) -> Hops {
        (self.cities.len() - 1) as Hops
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    pub fn start(&self) -> CityId {
        self.cities[0]
    }

    pub fn end(&self) -> CityId {
        self.cities[self.cities.len() - 1]
    }

    pub fn contains(&self, city: CityId) -> bool {
        self.cities.contains(&city)
    }

    /// True when every consecutive pair is a flight in `graph`.
    pub fn is_valid_in(&self, graph: &Graph) -> bool {
        self.cities.iter().all(|&c| graph.contains(c))
            && self.cities.windows(2).all(|w| graph.has_edge(w[0], w[1]))
    }
}
