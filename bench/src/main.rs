use std::fmt::Write as _;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use route_search_core::{CityId, Graph, TourLimits};
use tracing::info;

#[derive(Parser)]
#[command(author, version, about = "Flight graph generator and benchmark for route-search-core", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Time every query kind against generated graphs
    Run {
        #[arg(value_enum, default_value_t = Mode::All)]
        mode: Mode,

        /// Number of cities in each generated graph
        #[arg(short, long, default_value_t = 100_000)]
        cities: usize,

        /// Number of cities in the graph used for tour planning
        #[arg(long, default_value_t = 14)]
        tour_cities: usize,

        #[arg(short, long, default_value_t = 42)]
        seed: u64,
    },
    /// Write a random `city.name` / `flight.txt` pair
    Generate {
        #[arg(short, long)]
        cities: usize,

        /// Upper bound on flight attempts per city
        #[arg(long, default_value_t = 10)]
        max_out: usize,

        #[arg(short, long, default_value_t = 42)]
        seed: u64,

        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    All,
    Random,
    Ring,
    Hub,
    Barbell,
}

type Generator = fn(usize, &mut Xoshiro256PlusPlus) -> anyhow::Result<Graph>;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    match Cli::parse().command {
        Commands::Run {
            mode,
            cities,
            tour_cities,
            seed,
        } => {
            let generators: Vec<(&str, Generator)> = match mode {
                Mode::Random => vec![("Random flights", gen_random_flights as Generator)],
                Mode::Ring => vec![("Ring with shortcuts", gen_ring as Generator)],
                Mode::Hub => vec![("Hub-and-spoke", gen_hub_and_spoke as Generator)],
                Mode::Barbell => vec![("Barbell (one-way bridge)", gen_barbell as Generator)],
                Mode::All => vec![
                    ("Random flights", gen_random_flights as Generator),
                    ("Ring with shortcuts", gen_ring),
                    ("Hub-and-spoke", gen_hub_and_spoke),
                    ("Barbell (one-way bridge)", gen_barbell),
                ],
            };

            println!("route-search-bench");
            println!("==================");
            println!();

            for (name, generator) in generators {
                run_benchmark(name, generator, cities.max(4), tour_cities.max(2), seed)?;
            }
        }
        Commands::Generate {
            cities,
            max_out,
            seed,
            out_dir,
        } => {
            let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
            let graph = random_flights(cities, max_out, &mut rng)?;
            let names: Vec<String> = (0..cities).map(|i| format!("City{i}")).collect();

            std::fs::create_dir_all(&out_dir)
                .with_context(|| format!("creating {}", out_dir.display()))?;
            let city_path = out_dir.join("city.name");
            let flight_path = out_dir.join("flight.txt");
            std::fs::write(&city_path, names.join("\n") + "\n")
                .with_context(|| format!("writing {}", city_path.display()))?;
            std::fs::write(&flight_path, render_flights(&graph, &names))
                .with_context(|| format!("writing {}", flight_path.display()))?;

            info!(
                cities = graph.city_count(),
                flights = graph.edge_count(),
                dir = %out_dir.display(),
                "network written"
            );
        }
    }

    Ok(())
}

fn ms(elapsed: Duration) -> f64 {
    elapsed.as_secs_f64() * 1000.0
}

fn run_benchmark(
    name: &str,
    generator: Generator,
    city_count: usize,
    tour_cities: usize,
    seed: u64,
) -> anyhow::Result<()> {
    println!("--- {} ---", name);
    println!("Target: {} cities", city_count);

    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    let t = Instant::now();
    let graph = generator(city_count, &mut rng)?;
    println!(
        "Generated in {:.2}s: {} cities, {} flights, ~{:.0}MB",
        t.elapsed().as_secs_f64(),
        graph.city_count(),
        graph.edge_count(),
        graph.memory_usage() as f64 / 1_048_576.0
    );

    let far = city_count - 1;
    println!();
    println!("{:>22} {:>24} {:>10}", "query", "result", "time");
    println!("{:->22} {:->24} {:->10}", "", "", "");

    let t = Instant::now();
    let path = route_search_core::shortest_path(&graph, 0, far)?;
    let result = match path {
        Some(p) => format!("{} hops", p.hops()),
        None => "no route".to_string(),
    };
    println!("{:>22} {:>24} {:>8.1}ms", format!("path 0 → {far}"), result, ms(t.elapsed()));

    let t = Instant::now();
    let reachable = route_search_core::reachable_from(&graph, 0)?;
    println!("{:>22} {:>24} {:>8.1}ms", "reachable from 0", format!("{} cities", reachable.len()), ms(t.elapsed()));

    let t = Instant::now();
    let dist = route_search_core::distances_from(&graph, 0)?;
    let deepest = dist.iter().map(|(_, h)| h).max().unwrap_or(0);
    println!("{:>22} {:>24} {:>8.1}ms", "distances from 0", format!("max {deepest} hops"), ms(t.elapsed()));

    let (a, b) = (city_count / 3, 2 * city_count / 3);
    let t = Instant::now();
    let through = route_search_core::route_through(&graph, 0, a, b, far)?;
    let result = match through {
        Some(r) => format!("{} hops", r.hops()),
        None => "no route".to_string(),
    };
    println!("{:>22} {:>24} {:>8.1}ms", "through two waypoints", result, ms(t.elapsed()));

    let t = Instant::now();
    let meeting = route_search_core::find_meeting_point(&graph, 0, a, b)?;
    let result = match meeting {
        Some(m) => format!("city {} ({} hops)", m.city, m.total_hops),
        None => "no meeting city".to_string(),
    };
    println!("{:>22} {:>24} {:>8.1}ms", "meeting point", result, ms(t.elapsed()));

    // The tour DP is exponential, so it runs on a separate small graph.
    let small = generator(tour_cities, &mut rng)?;
    let limits = TourLimits::new(TourLimits::HARD_MAX_CITIES, Some(Duration::from_secs(60)));
    let t = Instant::now();
    let result = match route_search_core::plan_tour(&small, 0, &limits) {
        Ok(Some(tour)) => format!("{} hops / {} cities", tour.hops, tour.order.len()),
        Ok(None) => "no tour".to_string(),
        Err(e) => e.to_string(),
    };
    println!("{:>22} {:>24} {:>8.1}ms", format!("tour ({tour_cities} cities)"), result, ms(t.elapsed()));
    println!();

    Ok(())
}

/// `flight.txt` blocks for every city with at least one flight.
fn render_flights(graph: &Graph, names: &[String]) -> String {
    let mut out = String::new();
    for from in 0..graph.city_count() {
        let destinations = graph.neighbors_out(from);
        if destinations.is_empty() {
            continue;
        }
        let _ = writeln!(out, "From:  {}", names[from]);
        for (i, &to) in destinations.iter().enumerate() {
            let prefix = if i == 0 { "To  :  " } else { "       " };
            let _ = writeln!(out, "{prefix}{}", names[to]);
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Generators: all O(cities + flights), single-threaded, seeded
// ---------------------------------------------------------------------------

/// Each city makes `0..=max_out` attempts at a uniformly random
/// destination; self-loops and repeats are dropped.
fn random_flights(city_count: usize, max_out: usize, rng: &mut Xoshiro256PlusPlus) -> anyhow::Result<Graph> {
    let mut graph = Graph::new(city_count);
    let mut seen: Vec<CityId> = Vec::with_capacity(max_out);

    for from in 0..city_count {
        seen.clear();
        let attempts = rng.random_range(0..=max_out);
        for _ in 0..attempts {
            let to = rng.random_range(0..city_count);
            if to != from && !seen.contains(&to) {
                seen.push(to);
            }
        }
        for &to in &seen {
            graph.add_edge(from, to)?;
        }
    }

    Ok(graph)
}

fn gen_random_flights(city_count: usize, rng: &mut Xoshiro256PlusPlus) -> anyhow::Result<Graph> {
    random_flights(city_count, 10, rng)
}

/// Directed ring lattice: each city flies to its next `K` cities, and each
/// flight is rewired to a random city with probability `P`.
fn gen_ring(city_count: usize, rng: &mut Xoshiro256PlusPlus) -> anyhow::Result<Graph> {
    const K: usize = 4;
    const P: f64 = 0.05;
    let mut graph = Graph::new(city_count);

    for from in 0..city_count {
        // the first hop is never rewired so the ring stays strongly connected
        graph.add_edge(from, (from + 1) % city_count)?;
        for j in 2..=K {
            let to = if rng.random_bool(P) {
                rng.random_range(0..city_count)
            } else {
                (from + j) % city_count
            };
            if to != from {
                graph.add_edge(from, to)?;
            }
        }
    }

    Ok(graph)
}

/// Preferential attachment: new cities fly to and from existing cities
/// picked in proportion to their flight count.
fn gen_hub_and_spoke(city_count: usize, rng: &mut Xoshiro256PlusPlus) -> anyhow::Result<Graph> {
    const LINKS: usize = 3;
    let mut graph = Graph::new(city_count);
    let mut endpoints: Vec<CityId> = Vec::with_capacity(city_count * LINKS * 2);

    // seed: two cities with a return flight
    graph.add_edge(0, 1)?;
    graph.add_edge(1, 0)?;
    endpoints.extend([0, 1]);

    for city in 2..city_count {
        for _ in 0..LINKS {
            let hub = endpoints[rng.random_range(0..endpoints.len())];
            if graph.has_edge(city, hub) {
                continue;
            }
            graph.add_edge(city, hub)?;
            graph.add_edge(hub, city)?;
            endpoints.push(hub);
            endpoints.push(city);
        }
    }

    Ok(graph)
}

/// Two dense clusters joined by a single one-way bridge; nothing in the
/// second half can fly back to the first.
fn gen_barbell(city_count: usize, rng: &mut Xoshiro256PlusPlus) -> anyhow::Result<Graph> {
    const DEGREE: usize = 6;
    let half = city_count / 2;
    let mut graph = Graph::new(city_count);

    for (lo, hi) in [(0, half), (half, city_count)] {
        let size = hi - lo;
        for from in lo..hi {
            graph.add_edge(from, lo + (from - lo + 1) % size)?;
            for _ in 1..DEGREE {
                let to = lo + rng.random_range(0..size);
                if to != from {
                    graph.add_edge(from, to)?;
                }
            }
        }
    }
    graph.add_edge(half - 1, half)?;

    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rng() -> Xoshiro256PlusPlus {
        Xoshiro256PlusPlus::seed_from_u64(7)
    }

    #[test]
    fn test_random_flights_no_self_loops_or_repeats() {
        let g = random_flights(200, 10, &mut rng()).unwrap();
        for from in 0..200 {
            let out = g.neighbors_out(from);
            assert!(out.len() <= 10);
            assert!(!out.contains(&from));
            let mut sorted = out.to_vec();
            sorted.sort_unstable();
            sorted.dedup();
            assert_eq!(sorted.len(), out.len());
        }
    }

    #[test]
    fn test_random_flights_seeded() {
        let a = random_flights(50, 10, &mut rng()).unwrap();
        let b = random_flights(50, 10, &mut rng()).unwrap();
        for c in 0..50 {
            assert_eq!(a.neighbors_out(c), b.neighbors_out(c));
        }
    }

    #[test]
    fn test_ring_is_strongly_connected() {
        let g = gen_ring(30, &mut rng()).unwrap();
        assert_eq!(route_search_core::reachable_from(&g, 0).unwrap().len(), 30);
        assert_eq!(route_search_core::reaching_to(&g, 0).unwrap().len(), 30);
    }

    #[test]
    fn test_barbell_bridge_is_one_way() {
        let g = gen_barbell(20, &mut rng()).unwrap();
        assert!(route_search_core::shortest_path(&g, 0, 19).unwrap().is_some());
        assert!(route_search_core::shortest_path(&g, 19, 0).unwrap().is_none());
    }

    #[test]
    fn test_hub_and_spoke_has_return_flights() {
        let g = gen_hub_and_spoke(100, &mut rng()).unwrap();
        for from in 0..100 {
            for &to in g.neighbors_out(from) {
                assert!(g.has_edge(to, from));
            }
        }
    }

    #[test]
    fn test_hub_and_spoke_needs_seed_pair() {
        assert!(gen_hub_and_spoke(1, &mut rng()).is_err());
        assert_eq!(gen_hub_and_spoke(2, &mut rng()).unwrap().edge_count(), 2);
    }

    #[test]
    fn test_render_flights_format() {
        let g = Graph::from_edges(3, [(0, 2), (0, 1), (2, 0)]).unwrap();
        let names: Vec<String> = ["Austin", "Boise", "Chicago"].map(String::from).to_vec();
        assert_eq!(
            render_flights(&g, &names),
            "From:  Austin\nTo  :  Chicago\n       Boise\nFrom:  Chicago\nTo  :  Austin\n"
        );
    }
}
