use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Instant;

use route_search_core::{CityId, Graph, RouteError};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: duplicate city name {name:?}")]
    DuplicateCity { name: String, line: usize },

    #[error("line {line}: `From:` line without a city name")]
    EmptyOrigin { line: usize },

    #[error("line {line}: destination listed before any `From:` line")]
    MissingOrigin { line: usize },

    #[error(transparent)]
    Graph(#[from] RouteError),
}

/// Two-way mapping between city names and dense ids.
///
/// Line order in the city file defines the id.
#[derive(Debug, Default)]
pub struct CityDirectory {
    names: Vec<String>,
    index: HashMap<String, CityId>,
}

impl CityDirectory {
    pub fn resolve(&self, name: &str) -> Option<CityId> {
        self.index.get(name).copied()
    }

    pub fn name(&self, id: CityId) -> &str {
        self.names.get(id).map(String::as_str).unwrap_or("?")
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }
}

/// The loaded city directory together with its flight graph.
pub struct Network {
    pub cities: CityDirectory,
    pub graph: Graph,
}

/// Read `city.name` and `flight.txt` style files into a [`Network`].
pub fn load_network(cities_path: &Path, flights_path: &Path) -> Result<Network, LoadError> {
    let start = Instant::now();

    let cities = parse_cities(&read(cities_path)?)?;
    let graph = parse_flights(&read(flights_path)?, &cities)?;

    info!(
        cities = graph.city_count(),
        flights = graph.edge_count(),
        load_time_ms = start.elapsed().as_secs_f64() * 1000.0,
        "network loaded"
    );
    Ok(Network { cities, graph })
}

fn read(path: &Path) -> Result<String, LoadError> {
    std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// One city name per line; blank lines are skipped.
pub fn parse_cities(text: &str) -> Result<CityDirectory, LoadError> {
    let mut directory = CityDirectory::default();

    for (i, line) in text.lines().enumerate() {
        let name = line.trim();
        if name.is_empty() {
            continue;
        }
        if directory.index.contains_key(name) {
            return Err(LoadError::DuplicateCity {
                name: name.to_string(),
                line: i + 1,
            });
        }
        directory.index.insert(name.to_string(), directory.names.len());
        directory.names.push(name.to_string());
    }

    debug!(count = directory.len(), "city names parsed");
    Ok(directory)
}

const ORIGIN_PREFIX: &str = "From:";
const FIRST_DESTINATION_PREFIX: &str = "To  :";
const NEXT_DESTINATION_PREFIX: &str = "       ";

enum Origin {
    NotSeen,
    Known(CityId),
    Unknown,
}

/// Parse flight blocks:
///
/// ```text
/// From:  Origin
/// To  :  First destination
///        Next destination
/// ```
///
/// Edges keep file order, which fixes tie-breaking between equal-length
/// routes. Unknown city names are logged and skipped.
pub fn parse_flights(text: &str, cities: &CityDirectory) -> Result<Graph, LoadError> {
    let mut graph = Graph::new(cities.len());
    let mut origin = Origin::NotSeen;
    let mut skipped = 0usize;

    for (i, line) in text.lines().enumerate() {
        let line_no = i + 1;

        if let Some(rest) = line.strip_prefix(ORIGIN_PREFIX) {
            let name = rest.trim();
            if name.is_empty() {
                return Err(LoadError::EmptyOrigin { line: line_no });
            }
            origin = match cities.resolve(name) {
                Some(id) => Origin::Known(id),
                None => {
                    warn!(line = line_no, city = name, "unknown origin city, skipping its flights");
                    Origin::Unknown
                }
            };
            continue;
        }

        let destination = line
            .strip_prefix(FIRST_DESTINATION_PREFIX)
            .or_else(|| line.strip_prefix(NEXT_DESTINATION_PREFIX))
            .map(str::trim)
            .filter(|name| !name.is_empty());
        let Some(name) = destination else {
            continue;
        };

        match origin {
            Origin::NotSeen => return Err(LoadError::MissingOrigin { line: line_no }),
            Origin::Unknown => skipped += 1,
            Origin::Known(from) => match cities.resolve(name) {
                Some(to) => graph.add_edge(from, to)?,
                None => {
                    warn!(line = line_no, city = name, "unknown destination city, skipping");
                    skipped += 1;
                }
            },
        }
    }

    debug!(flights = graph.edge_count(), skipped, "flights parsed");
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CITIES: &str = "Albuquerque\nBoston\n\nChicago\nDenver\n";

    #[test]
    fn test_parse_cities_skips_blank_lines() {
        let dir = parse_cities(CITIES).unwrap();
        assert_eq!(dir.len(), 4);
        assert_eq!(dir.resolve("Chicago"), Some(2));
        assert_eq!(dir.name(3), "Denver");
        assert_eq!(dir.resolve("Nowhere"), None);
    }

    #[test]
    fn test_parse_cities_rejects_duplicates() {
        let err = parse_cities("Boston\nChicago\nBoston\n").unwrap_err();
        assert!(matches!(err, LoadError::DuplicateCity { line: 3, .. }));
    }

    #[test]
    fn test_parse_flights_blocks() {
        let dir = parse_cities(CITIES).unwrap();
        let text = "From:  Albuquerque\nTo  :  Chicago\n       Boston\nFrom:  Boston\nTo  :  Denver\n";
        let g = parse_flights(text, &dir).unwrap();
        assert_eq!(g.edge_count(), 3);
        assert_eq!(g.neighbors_out(0), &[2, 1]);
        assert_eq!(g.neighbors_out(1), &[3]);
        assert!(g.neighbors_out(3).is_empty());
    }

    #[test]
    fn test_parse_flights_skips_unknown_cities() {
        let dir = parse_cities(CITIES).unwrap();
        let text = "From:  Atlantis\nTo  :  Boston\nFrom:  Boston\nTo  :  Atlantis\n       Chicago\n";
        let g = parse_flights(text, &dir).unwrap();
        assert_eq!(g.edge_count(), 1);
        assert!(g.has_edge(1, 2));
    }

    #[test]
    fn test_parse_flights_requires_origin() {
        let dir = parse_cities(CITIES).unwrap();
        let err = parse_flights("To  :  Boston\n", &dir).unwrap_err();
        assert!(matches!(err, LoadError::MissingOrigin { line: 1 }));
    }

    #[test]
    fn test_parse_flights_empty_origin() {
        let dir = parse_cities(CITIES).unwrap();
        let err = parse_flights("From:   \n", &dir).unwrap_err();
        assert!(matches!(err, LoadError::EmptyOrigin { line: 1 }));
    }

    #[test]
    fn test_load_network_missing_file() {
        let err = load_network(Path::new("/nonexistent/city.name"), Path::new("/nonexistent/flight.txt"))
            .err()
            .unwrap();
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(err.to_string().contains("city.name"));
    }
}
