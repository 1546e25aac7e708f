//! route-search: flight route queries over `city.name` / `flight.txt`.

use anyhow::Context;
use clap::{Parser, Subcommand};
use route_search_core::Hops;

use crate::config::{DataArgs, TourArgs};

mod config;
mod load;
mod parsers;
mod query;

#[derive(Parser)]
#[command(author, version, about = "Route search over a directed flight network", long_about = None)]
struct Cli {
    #[command(flatten)]
    data: DataArgs,

    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Route with the fewest connections between two cities
    Path {
        from: String,
        to: String,

        /// Reject routes needing more connections than this
        #[arg(short, long)]
        max_connections: Option<Hops>,
    },
    /// Route through two cities, in whichever order is shorter
    Through {
        from: String,
        via_a: String,
        via_b: String,
        to: String,
    },
    /// Visit every reachable city and return to the start
    Tour {
        start: String,

        #[command(flatten)]
        limits: TourArgs,
    },
    /// City where three people should meet
    Meet {
        first: String,
        second: String,
        third: String,
    },
    /// Size of the loaded network
    Status,
}

fn main() -> anyhow::Result<()> {
    dotenvy::from_filename(config::ENV_FILE).ok();

    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    let network = load::load_network(&cli.data.cities, &cli.data.flights)
        .context("loading flight network")?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Path {
            from,
            to,
            max_connections,
        } => query::path(&network, &from, &to, max_connections, &mut out)?,
        Commands::Through {
            from,
            via_a,
            via_b,
            to,
        } => query::through(&network, &from, &via_a, &via_b, &to, &mut out)?,
        Commands::Tour { start, limits } => query::tour(&network, &start, &limits.limits(), &mut out)?,
        Commands::Meet {
            first,
            second,
            third,
        } => query::meet(&network, [first.as_str(), second.as_str(), third.as_str()], &mut out)?,
        Commands::Status => query::status(&network, &mut out)?,
    }

    Ok(())
}
