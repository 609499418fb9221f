use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

const CATEGORIES: [&str; 4] = ["Core Backlist", "Growth", "Niche", "Frontlist"];
const PRICE_POINTS: [f64; 6] = [9.99, 14.99, 17.99, 24.99, 29.99, 39.99];

const HEADER: [&str; 12] = [
    "hover_label",
    "On_Sale_Date",
    "List_Price",
    "qual_score",
    "avg_annual_units",
    "Page_Count",
    "Title_Age",
    "amazonaveragerating",
    "amazontotalreviews",
    "2024_units",
    "2025_units",
    "Suggested Position Category",
];

/// Write a deterministic sample CSV for the viewer.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Number of titles before the reference row.
    #[arg(long, default_value_t = 120)]
    rows: usize,

    #[arg(long, default_value_t = 42)]
    seed: u64,

    #[arg(long, default_value = "sample_titles.csv")]
    output: PathBuf,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

fn title_row(i: usize, rng: &mut SimpleRng) -> Vec<String> {
    let category = *rng.pick(&CATEGORIES);
    let price = *rng.pick(&PRICE_POINTS);
    let age = rng.range(0.0, 15.0).floor();
    let year = 2025 - age as i32;
    let month = 1 + (rng.next_u64() % 12) as u32;
    let day = 1 + (rng.next_u64() % 28) as u32;

    let quality = rng.range(2.0, 9.5);
    // Log-uniform sales so a few titles dominate.
    let units = 10f64.powf(rng.range(2.5, 4.8));
    let units_2024 = units * rng.range(0.6, 1.4);
    let units_2025 = units * rng.range(0.2, 0.9);

    // Every 17th title carries unparseable cells.
    let (date, rating) = if i % 17 == 16 {
        ("TBD".to_string(), "n/a".to_string())
    } else {
        (
            format!("{year:04}-{month:02}-{day:02}"),
            format!("{:.1}", rng.range(3.2, 4.9)),
        )
    };

    vec![
        format!("Title {:03} ({category})", i + 1),
        date,
        format!("{price:.2}"),
        format!("{quality:.2}"),
        format!("{units:.0}"),
        format!("{:.0}", rng.range(96.0, 640.0)),
        format!("{age:.0}"),
        rating,
        format!("{:.0}", units * rng.range(0.01, 0.2)),
        format!("{units_2024:.0}"),
        format!("{units_2025:.0}"),
        category.to_string(),
    ]
}

fn reference_row() -> Vec<String> {
    [
        "Reference Title (15k units)",
        "2020-01-01",
        "50",
        "8",
        "15000",
        "",
        "",
        "",
        "",
        "",
        "",
        "",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut rng = SimpleRng::new(args.seed);

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    writer.write_record(HEADER)?;
    for i in 0..args.rows {
        writer.write_record(title_row(i, &mut rng))?;
    }
    writer.write_record(reference_row())?;
    writer.flush()?;

    println!(
        "Wrote {} titles plus the reference row to {}",
        args.rows,
        args.output.display()
    );
    Ok(())
}
