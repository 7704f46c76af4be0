//! rcd-rs
//!
//! A lightweight Rust library for retrieving, filtering, ranking, and
//! charting country data from the REST Countries API. Pairs with the `rcd`
//! CLI and the `rcd-gui` desktop dashboard.
//!
//! ### Features
//! - Fetch the full country list once per session (memoized, refreshable)
//! - Filter by region membership and case-insensitive name/capital search
//! - Rank the filtered view by population and keep the top 20 for charting
//! - Save as CSV or JSON; render SVG/PNG bar charts
//!
//! ### Example
//! ```no_run
//! use rcd_rs::{Client, FilterState, rank, storage, viz};
//!
//! let client = Client::default();
//! let report = client.load()?;
//! let state = FilterState::all_regions(&report.records);
//! let view = state.apply(&report.records);
//! storage::save_csv(&view, "countries.csv")?;
//! let top = rank::top_by_population(&view, rank::TOP_N);
//! viz::plot_population_bars(&rank::bar_rows(&top), "population.svg", 1000, 600)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod api;
pub mod filter;
pub mod models;
pub mod rank;
pub mod storage;
pub mod viz;

pub use api::Client;
pub use filter::{FilterState, distinct_regions, filter};
pub use models::{CountryRecord, FetchError, LoadReport, RecordMappingError};
pub use rank::{BarRow, TOP_N, bar_rows, top_by_population};
