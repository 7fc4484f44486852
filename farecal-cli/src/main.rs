use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::Parser;
use farecal_client::{ApiConfig, FareApi, HttpFareApi};
use farecal_engine::{CalendarOrchestrator, ColorTier, GridCell, Phase};
use farecal_shared::{Airport, AirportCatalog, CabinClass, RouteQuery, YearMonth};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

static DEFAULT_CATALOG: &str = include_str!("../data/airports.json");

/// Fare-calendar lookup: prices one month of round trips for a route and
/// cabin, and renders the result as a text month grid.
#[derive(Debug, Parser)]
#[command(name = "farecal", version)]
struct Cli {
    /// Origin airport IATA code
    #[arg(long)]
    from: String,

    /// Destination airport IATA code
    #[arg(long)]
    to: String,

    /// Travel month, YYYY-MM
    #[arg(long)]
    month: YearMonth,

    /// Cabin class: eco, ecoPremium, business or first
    #[arg(long, default_value = "eco")]
    cabin: CabinClass,

    /// Airport catalog JSON; the bundled catalog is used when omitted
    #[arg(long)]
    airports: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "farecal=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let catalog = match &cli.airports {
        Some(path) => AirportCatalog::load(path)
            .with_context(|| format!("loading airport catalog from {}", path.display()))?,
        None => AirportCatalog::from_json_str(DEFAULT_CATALOG)
            .context("decoding the bundled airport catalog")?,
    };

    let from = lookup(&catalog, &cli.from)?;
    let to = lookup(&catalog, &cli.to)?;
    tracing::info!(month = %cli.month, cabin = %cli.cabin, from = %from.code, to = %to.code, "querying fare calendar");

    let config = ApiConfig::load().context("loading endpoint configuration")?;
    let api = Arc::new(HttpFareApi::new(config)) as Arc<dyn FareApi>;
    let orchestrator = CalendarOrchestrator::new(api);

    let query = RouteQuery {
        departure: cli.month,
        cabin: cli.cabin,
        from,
        to,
    };
    let state = orchestrator.start(query).await;

    match state.phase {
        Phase::Ready => {
            render(&state.weekday_labels, &state.grid);
            Ok(())
        }
        Phase::Error => {
            let message = state.alert_message.unwrap_or_else(|| "unknown failure".into());
            bail!("fare lookup failed: {message}");
        }
        Phase::Idle | Phase::Loading => bail!("orchestration ended without a terminal state"),
    }
}

fn lookup(catalog: &AirportCatalog, code: &str) -> anyhow::Result<Airport> {
    match catalog.find(code) {
        Some(airport) if !airport.disabled => Ok(airport.clone()),
        Some(_) => bail!("airport {code} is not currently bookable"),
        None => bail!("unknown airport code: {code}"),
    }
}

fn render(weekday_labels: &[chrono::Weekday; 7], cells: &[GridCell]) {
    for weekday in weekday_labels {
        print!("{weekday:>10}");
    }
    println!();

    for row in cells.chunks(7) {
        for cell in row {
            print!("{:>10}", describe(cell));
        }
        println!();
    }
}

fn describe(cell: &GridCell) -> String {
    if cell.day_label.is_empty() {
        return String::new();
    }

    let mark = if cell.is_holiday { "*" } else { "" };
    match (&cell.price, cell.color_tier) {
        (Some(price), ColorTier::Max) => format!("{}{} {}^", mark, cell.day_label, price.amount),
        (Some(price), ColorTier::Min) => format!("{}{} {}v", mark, cell.day_label, price.amount),
        (Some(price), _) => format!("{}{} {}", mark, cell.day_label, price.amount),
        (None, _) => format!("{}{} -", mark, cell.day_label),
    }
}
