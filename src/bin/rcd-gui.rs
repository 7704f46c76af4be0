/*!
 * GUI application for rcd-rs - country data dashboard
 *
 * A cross-platform desktop dashboard providing an intuitive interface for:
 * - Searching countries by name, official name, or capital
 * - Filtering by region
 * - Browsing the filtered records and exporting a population chart
 *
 * Platform support: Windows, macOS, Linux
 */

use eframe::egui;
use num_format::{Locale, ToFormattedString};
use rcd_rs::models::{CountryRecord, LoadReport};
use rcd_rs::filter::distinct_regions;
use rcd_rs::{Client, filter, rank, viz};
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

fn main() -> Result<(), eframe::Error> {
    // Enable logging for better debugging
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 700.0])
            .with_min_inner_size([800.0, 500.0])
            .with_title("Country Data Dashboard"),
        ..Default::default()
    };

    eframe::run_native(
        "Country Data Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(DashApp::new()))),
    )
}

/// Main application state
struct DashApp {
    client: Client,

    // Filter controls
    search: String,
    regions: Vec<(String, bool)>,

    // Loaded data
    records: Vec<CountryRecord>,
    skipped: Vec<String>,

    // Chart export options
    output_path: String,
    chart_format: ChartFormat,
    chart_width: u32,
    chart_height: u32,

    // UI state
    is_loading: bool,
    status_message: String,
    error_message: String,

    // Background operation
    load_receiver: Option<mpsc::Receiver<LoadOutcome>>,
}

#[derive(Debug, Clone, PartialEq)]
enum ChartFormat {
    Png,
    Svg,
}

#[derive(Debug)]
enum LoadOutcome {
    Loaded(LoadReport),
    Failed(String),
}

impl DashApp {
    fn new() -> Self {
        // Default to user's home directory for chart output
        let home_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .to_string_lossy()
            .to_string();

        let mut app = Self {
            client: Client::default(),

            search: String::new(),
            regions: Vec::new(),

            records: Vec::new(),
            skipped: Vec::new(),

            output_path: home_dir,
            chart_format: ChartFormat::Png,
            chart_width: 1000,
            chart_height: 600,

            is_loading: false,
            status_message: String::new(),
            error_message: String::new(),

            load_receiver: None,
        };
        app.start_load(false);
        app
    }

    /// Kick off a dataset load on a background thread. `refresh` drops the
    /// session cache first so the network request is re-issued.
    fn start_load(&mut self, refresh: bool) {
        self.is_loading = true;
        self.error_message.clear();
        self.status_message = "Fetching data from the REST Countries API...".to_string();

        let (sender, receiver) = mpsc::channel();
        self.load_receiver = Some(receiver);

        let client = self.client.clone();
        thread::spawn(move || {
            let result = if refresh { client.refresh() } else { client.load() };
            let outcome = match result {
                Ok(report) => LoadOutcome::Loaded((*report).clone()),
                Err(err) => LoadOutcome::Failed(format!(
                    "Could not load country data. Please check your internet connection or try again later. ({err})"
                )),
            };
            let _ = sender.send(outcome);
        });
    }

    fn check_load_result(&mut self) {
        if let Some(receiver) = &self.load_receiver
            && let Ok(outcome) = receiver.try_recv()
        {
            self.is_loading = false;
            self.load_receiver = None;

            match outcome {
                LoadOutcome::Loaded(report) => {
                    self.skipped = report.skipped.iter().map(|s| s.to_string()).collect();
                    self.records = report.records;
                    self.regions = distinct_regions(&self.records)
                        .into_iter()
                        .map(|r| (r, true))
                        .collect();
                    self.status_message = format!(
                        "Loaded {} countries ({} skipped).",
                        self.records.len(),
                        self.skipped.len()
                    );
                    self.error_message.clear();
                }
                LoadOutcome::Failed(err) => {
                    // Proceed with an empty dataset rather than crashing.
                    self.records.clear();
                    self.regions.clear();
                    self.skipped.clear();
                    self.error_message = err;
                    self.status_message.clear();
                }
            }
        }
    }

    fn export_chart(&mut self, view: &[CountryRecord]) {
        let top = rank::top_by_population(view, rank::TOP_N);
        if top.is_empty() {
            self.status_message =
                "No data to display for population chart with current filters.".to_string();
            return;
        }

        let ext = match self.chart_format {
            ChartFormat::Png => "png",
            ChartFormat::Svg => "svg",
        };
        let path = PathBuf::from(&self.output_path).join(format!("country_population.{ext}"));

        match viz::plot_population_bars(
            &rank::bar_rows(&top),
            &path,
            self.chart_width,
            self.chart_height,
        ) {
            Ok(()) => {
                self.status_message = format!("Wrote chart to {}", path.display());
                self.error_message.clear();
            }
            Err(err) => {
                self.error_message = format!("Failed to create chart: {}", err);
                self.status_message.clear();
            }
        }
    }
}

impl eframe::App for DashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for completed background loads
        self.check_load_result();

        // Request repaint while loading (for spinner animation)
        if self.is_loading {
            ctx.request_repaint();
        }

        // The filtered view is a pure function of (loaded data, filter state)
        // and is recomputed on every frame.
        let selected: BTreeSet<String> = self
            .regions
            .iter()
            .filter(|(_, on)| *on)
            .map(|(name, _)| name.clone())
            .collect();
        let view = filter::filter(&self.records, &selected, &self.search);

        egui::SidePanel::left("filters").show(ctx, |ui| {
            ui.heading("Filter Countries");
            ui.add_space(10.0);

            ui.label("Search by country name:");
            ui.text_edit_singleline(&mut self.search)
                .on_hover_text("Matches name, official name, or capital (case-insensitive)");

            ui.add_space(10.0);

            ui.label("Filter by Region:");
            ui.horizontal(|ui| {
                if ui.button("Select all").clicked() {
                    for (_, on) in &mut self.regions {
                        *on = true;
                    }
                }
                if ui.button("Clear").clicked() {
                    for (_, on) in &mut self.regions {
                        *on = false;
                    }
                }
            });
            for (name, on) in &mut self.regions {
                ui.checkbox(on, name.as_str());
            }

            ui.add_space(15.0);

            if ui
                .add_enabled(!self.is_loading, egui::Button::new("Reload data"))
                .clicked()
            {
                self.start_load(true);
            }

            ui.add_space(15.0);
            ui.separator();

            ui.group(|ui| {
                ui.label("Population Chart (Top 20)");
                ui.add_space(5.0);

                ui.horizontal(|ui| {
                    ui.label("Format:");
                    ui.radio_value(&mut self.chart_format, ChartFormat::Png, "PNG");
                    ui.radio_value(&mut self.chart_format, ChartFormat::Svg, "SVG");
                });

                ui.horizontal(|ui| {
                    ui.label("Dimensions:");
                    ui.add(egui::DragValue::new(&mut self.chart_width).range(200..=3000));
                    ui.label("×");
                    ui.add(egui::DragValue::new(&mut self.chart_height).range(200..=3000));
                    ui.label("pixels");
                });

                ui.horizontal(|ui| {
                    ui.label("Output folder:");
                    ui.text_edit_singleline(&mut self.output_path);
                    if ui.button("Browse").clicked()
                        && let Some(path) = rfd::FileDialog::new().pick_folder()
                    {
                        self.output_path = path.to_string_lossy().to_string();
                    }
                });

                if ui
                    .add_enabled(!self.is_loading, egui::Button::new("Export Chart"))
                    .clicked()
                {
                    self.export_chart(&view);
                }
            });

            ui.add_space(10.0);
            ui.separator();
            ui.label("Data from restcountries.com");
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("🌍 Global Country Data Dashboard");
            ui.label("Explore information about countries worldwide using data from the REST Countries API.");
            ui.add_space(10.0);

            if self.is_loading {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Loading country data...");
                });
            }

            if !self.status_message.is_empty() {
                ui.colored_label(egui::Color32::DARK_GREEN, &self.status_message);
            }
            if !self.error_message.is_empty() {
                ui.colored_label(egui::Color32::RED, &self.error_message);
            }
            if !self.skipped.is_empty() {
                ui.collapsing(format!("{} records skipped", self.skipped.len()), |ui| {
                    for warning in &self.skipped {
                        ui.label(warning);
                    }
                });
            }

            ui.add_space(10.0);
            ui.label(format!("Filtered Country Data ({} countries)", view.len()));

            if view.is_empty() {
                if !self.is_loading && !self.records.is_empty() {
                    ui.label("No countries match your current filters.");
                }
                return;
            }

            egui::ScrollArea::both().show(ui, |ui| {
                egui::Grid::new("countries")
                    .striped(true)
                    .min_col_width(60.0)
                    .show(ui, |ui| {
                        ui.strong("Flag");
                        ui.strong("Name");
                        ui.strong("Official Name");
                        ui.strong("Capital");
                        ui.strong("Region");
                        ui.strong("Subregion");
                        ui.strong("Population");
                        ui.strong("Area (km²)");
                        ui.strong("Flag URL");
                        ui.end_row();

                        for r in &view {
                            ui.label(&r.flag_emoji);
                            ui.label(&r.name);
                            ui.label(&r.official_name);
                            ui.label(&r.capital);
                            ui.label(&r.region);
                            ui.label(&r.subregion);
                            ui.label(r.population.to_formatted_string(&Locale::en));
                            ui.label(format!("{:.1}", r.area_km2));
                            ui.hyperlink(&r.flag_url);
                            ui.end_row();
                        }
                    });
            });
        });
    }
}
