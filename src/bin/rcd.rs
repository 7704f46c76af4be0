use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use num_format::{Locale, ToFormattedString};
use rcd_rs::models::CountryRecord;
use rcd_rs::{Client, FilterState, distinct_regions};
use rcd_rs::{rank, storage, viz};
use std::collections::BTreeSet;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "rcd",
    version,
    about = "Fetch, filter, chart & export country data from the REST Countries API"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch data and apply filters (optionally print, save, and plot).
    Get(GetArgs),
    /// List the distinct regions present in the dataset.
    Regions,
}

#[derive(ValueEnum, Clone, Debug)]
enum OutFormat {
    Csv,
    Json,
}

#[derive(Args, Debug)]
struct GetArgs {
    /// Regions separated by comma or semicolon (e.g., Europe,Asia).
    /// Defaults to every region present in the dataset.
    #[arg(short, long)]
    regions: Option<String>,
    /// Case-insensitive search over name, official name, and capital.
    #[arg(short, long)]
    search: Option<String>,
    /// Number of countries kept for the population chart.
    #[arg(long, default_value_t = rank::TOP_N)]
    top: usize,
    /// Print the filtered records as a table.
    #[arg(long, default_value_t = false)]
    table: bool,
    /// Save the filtered records to file (format inferred by --format or extension).
    #[arg(long)]
    out: Option<PathBuf>,
    /// Output format (csv or json). If omitted, inferred from --out extension.
    #[arg(long, value_enum)]
    format: Option<OutFormat>,
    /// Create a population bar chart at the given path (.svg or .png).
    #[arg(long)]
    plot: Option<PathBuf>,
    /// Width of the plot (default 1000).
    #[arg(long, default_value_t = 1000)]
    width: u32,
    /// Height of the plot (default 600).
    #[arg(long, default_value_t = 600)]
    height: u32,
    /// Locale for chart tick labels (e.g., en or de).
    #[arg(long, default_value = "en")]
    locale: String,
}

fn parse_list(s: &str) -> Vec<String> {
    s.split([',', ';'])
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

/// Load the dataset, degrading to an empty set with a warning on failure.
/// Per-record skips are warnings too; neither terminates the run.
fn load_or_empty(client: &Client) -> Vec<CountryRecord> {
    match client.load() {
        Ok(report) => {
            for skip in &report.skipped {
                eprintln!("Warning: {}", skip);
            }
            report.records.clone()
        }
        Err(err) => {
            eprintln!("Warning: could not load country data: {}", err);
            Vec::new()
        }
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max - 1).collect();
        format!("{}…", head)
    }
}

fn print_table(records: &[CountryRecord]) {
    println!(
        "{:<28} {:<20} {:<12} {:<20} {:>14} {:>12}",
        "Name", "Capital", "Region", "Subregion", "Population", "Area (km²)"
    );
    for r in records {
        println!(
            "{:<28} {:<20} {:<12} {:<20} {:>14} {:>12.1}",
            truncate(&r.name, 28),
            truncate(&r.capital, 20),
            truncate(&r.region, 12),
            truncate(&r.subregion, 20),
            r.population.to_formatted_string(&Locale::en),
            r.area_km2
        );
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Get(args) => cmd_get(args),
        Command::Regions => cmd_regions(),
    }
}

fn cmd_get(args: GetArgs) -> Result<()> {
    let client = Client::default();
    let records = load_or_empty(&client);

    let state = match args.regions.as_deref() {
        Some(list) => FilterState {
            regions: parse_list(list).into_iter().collect::<BTreeSet<_>>(),
            query: args.search.clone().unwrap_or_default(),
        },
        None => {
            let mut state = FilterState::all_regions(&records);
            state.query = args.search.clone().unwrap_or_default();
            state
        }
    };
    let view = state.apply(&records);

    if view.is_empty() {
        println!("No countries match your current filters.");
    } else if args.table {
        print_table(&view);
    }

    if let Some(path) = args.out.as_ref() {
        let fmt = match args.format {
            Some(OutFormat::Csv) => "csv",
            Some(OutFormat::Json) => "json",
            None => path.extension().and_then(|e| e.to_str()).unwrap_or("csv"),
        }
        .to_ascii_lowercase();
        match fmt.as_str() {
            "csv" => storage::save_csv(&view, path)?,
            "json" => storage::save_json(&view, path)?,
            other => anyhow::bail!("unsupported format: {}", other),
        }
        eprintln!("Saved {} rows to {}", view.len(), path.display());
    }

    if let Some(plot_path) = args.plot.as_ref() {
        let top = rank::top_by_population(&view, args.top);
        if top.is_empty() {
            println!("No data to display for population chart with current filters.");
        } else {
            viz::plot_population_bars_locale(
                &rank::bar_rows(&top),
                plot_path,
                args.width,
                args.height,
                &args.locale,
            )?;
            eprintln!("Wrote chart to {}", plot_path.display());
        }
    }

    Ok(())
}

fn cmd_regions() -> Result<()> {
    let client = Client::default();
    let records = load_or_empty(&client);
    for region in distinct_regions(&records) {
        println!("{}", region);
    }
    Ok(())
}
