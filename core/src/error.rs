use std::time::Duration;

use thiserror::Error;

use crate::graph::CityId;

/// Failures surfaced by the route search engine.
///
/// "No route" is never an error: queries return `Ok(None)` for that.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("city {city} is out of range (graph has {city_count} cities)")]
    InvalidCity { city: CityId, city_count: usize },

    #[error("tour needs {count} cities, more than the limit of {limit}")]
    TooManyCities { count: usize, limit: usize },

    #[error("tour planning exceeded its time limit of {limit:?}")]
    TimeLimitExceeded { limit: Duration },
}
