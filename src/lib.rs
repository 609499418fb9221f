//! Quality-vs-price bubble chart for title sales data.
//!
//! ```text
//!  CSV ─▶ loader ─▶ normalize ─▶ Table ─▶ filter ─▶ chart::build_chart ─▶ ChartSpec
//! ```
//!
//! The last row of every file is the reference record: it is never filtered
//! and is drawn as a fixed-style marker sized on the bubbles' scale.

pub mod chart;
pub mod color;
pub mod config;
pub mod data;
pub mod pipeline;

pub use chart::ChartSpec;
pub use config::ChartConfig;
pub use data::filter::{FilterSelection, PriceRange};
pub use data::model::{DataError, Table};
pub use pipeline::render;
