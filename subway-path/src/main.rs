use std::path::PathBuf;
use std::process::ExitCode;

use tracing::error;
use tracing_subscriber::EnvFilter;

use subway_path::domain::StationId;
use subway_path::network::Network;
use subway_path::planner::{PathResult, PlannerConfig};
use subway_path::snapshot::PathService;

/// Environment variable naming the network file when none is given.
const NETWORK_ENV: &str = "SUBWAY_NETWORK";

const USAGE: &str = "usage: subway-path [NETWORK.json] <FROM_ID> <TO_ID> [--alternatives N]";

/// Exit status for bad command-line input.
const USAGE_EXIT: u8 = 2;

/// Exit status when both stations exist but are not connected.
const NO_ROUTE_EXIT: u8 = 3;

/// Parsed command line.
struct Args {
    network: PathBuf,
    from: StationId,
    to: StationId,
    alternatives: Option<usize>,
}

fn parse_args(raw: Vec<String>) -> Result<Args, String> {
    let mut positional = Vec::new();
    let mut alternatives = None;

    let mut iter = raw.into_iter();
    while let Some(arg) = iter.next() {
        if arg == "--alternatives" {
            let value = iter.next().ok_or("--alternatives needs a count")?;
            let count: usize = value
                .parse()
                .map_err(|_| format!("invalid alternatives count: {value}"))?;
            if count == 0 {
                return Err("alternatives count must be at least 1".to_string());
            }
            alternatives = Some(count);
        } else {
            positional.push(arg);
        }
    }

    let (network, from, to) = match positional.as_slice() {
        [from, to] => {
            let network = std::env::var(NETWORK_ENV)
                .map_err(|_| format!("no network file given and {NETWORK_ENV} not set"))?;
            (PathBuf::from(network), from, to)
        }
        [network, from, to] => (PathBuf::from(network), from, to),
        _ => return Err(USAGE.to_string()),
    };

    Ok(Args {
        network,
        from: parse_station(from)?,
        to: parse_station(to)?,
        alternatives,
    })
}

fn parse_station(raw: &str) -> Result<StationId, String> {
    raw.parse::<u64>()
        .map(StationId::new)
        .map_err(|_| format!("invalid station id: {raw}"))
}

/// How a query ended. Each outcome has its own exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    /// At least one route was printed
    Found,
    /// Both stations exist but nothing connects them
    NoRoute,
    /// Unknown station or an unusable network
    Failed,
}

impl Outcome {
    fn exit_code(self) -> ExitCode {
        match self {
            Outcome::Found => ExitCode::SUCCESS,
            Outcome::NoRoute => ExitCode::from(NO_ROUTE_EXIT),
            Outcome::Failed => ExitCode::FAILURE,
        }
    }
}

fn config_for(args: &Args) -> PlannerConfig {
    let config = PlannerConfig::default();
    match args.alternatives {
        Some(count) => config.with_max_alternatives(count),
        None => config,
    }
}

fn render_route(service: &PathService, route: &PathResult) -> [String; 2] {
    let snapshot = service.snapshot();
    let names: Vec<String> = route
        .stations()
        .iter()
        .map(|id| match snapshot.graph().station(*id) {
            Some(station) => station.name().to_string(),
            None => id.to_string(),
        })
        .collect();
    [names.join(" -> "), format!("distance: {}", route.distance())]
}

/// Run the query `args` asks for and render the lines to print.
fn answer(service: &PathService, args: &Args) -> (Vec<String>, Outcome) {
    let routes = match args.alternatives {
        Some(_) => service.alternatives(args.from, args.to),
        None => service.shortest_path(args.from, args.to).map(|r| vec![r]),
    };

    match routes {
        Ok(routes) => {
            let mut lines = Vec::new();
            for (i, route) in routes.iter().enumerate() {
                if routes.len() > 1 {
                    lines.push(format!("#{}", i + 1));
                }
                lines.extend(render_route(service, route));
            }
            (lines, Outcome::Found)
        }
        Err(e) if e.is_topological() => {
            (vec![format!("no route available: {e}")], Outcome::NoRoute)
        }
        Err(e) => (vec![e.to_string()], Outcome::Failed),
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = match parse_args(std::env::args().skip(1).collect()) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::from(USAGE_EXIT);
        }
    };

    let network = match Network::load(&args.network) {
        Ok(network) => network,
        Err(e) => {
            error!(error = %e, "failed to load network");
            return ExitCode::FAILURE;
        }
    };

    let service = match PathService::from_network(&network, config_for(&args)) {
        Ok(service) => service,
        Err(e) => {
            error!(error = %e, "failed to build network graph");
            return ExitCode::FAILURE;
        }
    };

    let (lines, outcome) = answer(&service, &args);
    for line in &lines {
        match outcome {
            Outcome::Failed => eprintln!("{line}"),
            Outcome::Found | Outcome::NoRoute => println!("{line}"),
        }
    }
    outcome.exit_code()
}
