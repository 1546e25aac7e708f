use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use route_search_core::TourLimits;

use crate::parsers;

/// Optional dotenv file read before argument parsing; its variables feed
/// the `env` fallbacks below.
pub const ENV_FILE: &str = "./.env.local";

pub const DEFAULT_CITIES_FILE: &str = "city.name";
pub const DEFAULT_FLIGHTS_FILE: &str = "flight.txt";
pub const DEFAULT_TOUR_TIME_LIMIT: &str = "30s";

/// Where the network is loaded from.
#[derive(Args, Debug, Clone)]
pub struct DataArgs {
    /// City list, one name per line
    #[arg(long, global = true, env = "ROUTE_SEARCH_CITIES", default_value = DEFAULT_CITIES_FILE)]
    pub cities: PathBuf,

    /// Flight list in `From:` / `To  :` blocks
    #[arg(long, global = true, env = "ROUTE_SEARCH_FLIGHTS", default_value = DEFAULT_FLIGHTS_FILE)]
    pub flights: PathBuf,
}

/// Budget for the exact tour planner.
#[derive(Args, Debug, Clone)]
pub struct TourArgs {
    /// Largest set of cities (start included) the tour planner will accept
    #[arg(
        long,
        env = "ROUTE_SEARCH_MAX_TOUR_CITIES",
        default_value_t = TourLimits::DEFAULT_MAX_CITIES,
        value_parser = parsers::parse_max_cities
    )]
    pub max_cities: usize,

    /// Wall-clock limit for tour planning (e.g. "30s", "2m"); 0 disables it
    #[arg(
        long,
        env = "ROUTE_SEARCH_TOUR_TIME_LIMIT",
        default_value = DEFAULT_TOUR_TIME_LIMIT,
        value_parser = parsers::parse_duration
    )]
    pub time_limit: jiff::SignedDuration,
}

impl TourArgs {
    pub fn limits(&self) -> TourLimits {
        let time_limit = if self.time_limit.is_zero() {
            None
        } else {
            Duration::try_from(self.time_limit.abs()).ok()
        };
        TourLimits::new(self.max_cities, time_limit)
    }
}
