//! fiscal-panel: compute the municipal fiscal indicator panel for one year.
//!
//! Fetches the RREO (6th bimester) and DCA statements of each selected
//! municipality from SICONFI, combines them with GDP per capita and
//! population reference data, and prints the comparative panel.
//!
//! Usage:
//!   fiscal-panel --reference reference.json                      # whole roster, 2021
//!   fiscal-panel --reference reference.json --year 2019 --entities 3304557 3304904
//!   fiscal-panel --reference reference.json --all --json

mod render;

use anyhow::{bail, Context};
use fiscal_core::{EntityId, ReferenceTable, Roster, AVAILABLE_YEARS};
use indicator_panel::FiscalPanel;
use siconfi_client::{SiconfiClient, SiconfiConfig};

const DEFAULT_YEAR: i32 = 2021;

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  fiscal-panel --reference PATH [--year N] [--all | --entities ID ...] [--json]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --reference PATH   JSON file with gdp_per_capita and population entries");
    eprintln!("  --year N           Exercise year, {}-{} (default: {})", AVAILABLE_YEARS.start(), AVAILABLE_YEARS.end(), DEFAULT_YEAR);
    eprintln!("  --all              Every municipality in the roster (default)");
    eprintln!("  --entities ID ...  IBGE codes of the municipalities to compare");
    eprintln!("  --json             Print the panel as JSON instead of a table");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  SICONFI_BASE_URL, SICONFI_TIMEOUT_SECS, SICONFI_MIN_INTERVAL_MS,");
    eprintln!("  SICONFI_ACCEPT_INVALID_CERTS (default false)");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fiscal_panel=info,indicator_panel=info,siconfi_client=warn".into()),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage();
        return Ok(());
    }

    let as_json = args.iter().any(|a| a == "--json");

    let year: i32 = match args.iter().position(|a| a == "--year").and_then(|i| args.get(i + 1)) {
        Some(v) => v.parse().with_context(|| format!("--year expects a number, got {}", v))?,
        None => DEFAULT_YEAR,
    };
    if !AVAILABLE_YEARS.contains(&year) {
        bail!(
            "year {} is outside the reference base ({}-{})",
            year,
            AVAILABLE_YEARS.start(),
            AVAILABLE_YEARS.end()
        );
    }

    let Some(reference_path) = args
        .iter()
        .position(|a| a == "--reference")
        .and_then(|i| args.get(i + 1))
    else {
        print_usage();
        std::process::exit(1);
    };

    let roster = Roster::default();
    let entities: Vec<EntityId> = if let Some(idx) = args.iter().position(|a| a == "--entities") {
        args[idx + 1..]
            .iter()
            .take_while(|a| !a.starts_with("--"))
            .map(|a| a.parse::<EntityId>().with_context(|| format!("invalid IBGE code: {}", a)))
            .collect::<anyhow::Result<_>>()?
    } else {
        roster.ids()
    };
    if entities.is_empty() {
        bail!("select at least one municipality");
    }
    for entity in entities.iter().filter(|e| !roster.contains(**e)) {
        tracing::warn!("{} is not in the roster; it will be shown by its code", entity);
    }

    let reference = ReferenceTable::from_path(reference_path)
        .with_context(|| format!("loading reference data from {}", reference_path))?;
    if reference.is_empty() {
        tracing::warn!("Reference file {} has no entries; every municipality will be skipped", reference_path);
    }

    let client = SiconfiClient::new(SiconfiConfig::from_env()?)?;
    let panel = FiscalPanel::new(client, reference, roster);

    tracing::info!("fiscal-panel: year={}, {} municipalities", year, entities.len());
    let run = panel.run(year, &entities).await;

    for skipped in &run.skipped {
        eprintln!("warning: {}", skipped);
    }

    if as_json {
        println!("{}", serde_json::to_string_pretty(&run)?);
    } else if run.matrix.is_empty() {
        eprintln!("No municipality could be computed for {}.", year);
    } else {
        println!("Indicators for {}\n", year);
        println!("{}", render::matrix_table(&run.matrix));
        println!();
        println!("Variação (%): deviation of the municipality from the mean of the selection.");
        println!("Classificação: 1 = |variação| <= 10%, 2 = 10% < |variação| <= 30%, 3 = |variação| > 30%.");
    }

    Ok(())
}
