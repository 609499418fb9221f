//! Headless host: CSV in, chart description (JSON) out.

use std::collections::BTreeSet;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use bubblescope::config::ChartConfig;
use bubblescope::data::filter::{FilterSelection, PriceRange};
use bubblescope::data::loader::load_file;
use clap::Parser;

/// Print the quality-vs-price chart description for a CSV file.
///
/// Filters left unset take the viewer's defaults: every category and the
/// full observed price span.
#[derive(Parser, Debug)]
#[command(name = "bubblescope-render", version, about)]
struct Args {
    /// CSV file; the last row is the reference title.
    input: PathBuf,

    /// Keep only this position category (repeatable).
    #[arg(long = "category", value_name = "NAME")]
    categories: Vec<String>,

    /// Lower list-price bound (inclusive).
    #[arg(long)]
    min_price: Option<f64>,

    /// Upper list-price bound (inclusive).
    #[arg(long)]
    max_price: Option<f64>,

    /// Chart settings (TOML).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Single-line JSON instead of pretty-printed.
    #[arg(long)]
    compact: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = ChartConfig::load(args.config.as_deref())?;
    let table = load_file(&args.input)
        .with_context(|| format!("loading {}", args.input.display()))?;

    let selection = selection_from_args(&args, &table)?;
    log::debug!("selection {selection:?}");

    let chart = bubblescope::render(&table, &selection, &config);
    let json = if args.compact {
        serde_json::to_string(&chart)
    } else {
        serde_json::to_string_pretty(&chart)
    }
    .context("serializing chart")?;
    println!("{json}");
    Ok(())
}

fn selection_from_args(args: &Args, table: &bubblescope::Table) -> Result<FilterSelection> {
    let mut selection = FilterSelection::defaults(table);

    if !args.categories.is_empty() {
        if !table.schema.capabilities.has_category {
            log::warn!("--category ignored: the file has no category column");
        }
        selection.categories = Some(args.categories.iter().cloned().collect::<BTreeSet<_>>());
        selection.price = selection.price_bounds(table);
    }

    if args.min_price.is_some() || args.max_price.is_some() {
        let bounds = selection.price;
        let min = args
            .min_price
            .or(bounds.map(|b| b.min))
            .unwrap_or(f64::NEG_INFINITY);
        let max = args
            .max_price
            .or(bounds.map(|b| b.max))
            .unwrap_or(f64::INFINITY);
        if min > max {
            bail!("--min-price {min} is greater than --max-price {max}");
        }
        selection.price = Some(PriceRange::new(min, max));
    }

    Ok(selection)
}
