//! Render the top-N population view as a horizontal bar chart (SVG or PNG).
//!
//! One bar per record, bar length = population, y-axis label = country name,
//! largest population at the top. Bars are colored per region and the region
//! legend doubles as the chart key.

use crate::rank::BarRow;
use anyhow::{Result, anyhow};
use num_format::{Locale, ToFormattedString};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters_bitmap::BitMapBackend;
use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Once;

/// One-time registration for a fallback "sans-serif" font when using the
/// `ab_glyph` text path, which does not discover OS fonts on its own.
static INIT_FONTS: Once = Once::new();

fn ensure_fonts_registered() {
    INIT_FONTS.call_once(|| {
        const CANDIDATES: [&str; 5] = [
            "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/TTF/DejaVuSans.ttf",
            "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
            "/System/Library/Fonts/Supplemental/Arial.ttf",
            "C:\\Windows\\Fonts\\arial.ttf",
        ];
        for path in CANDIDATES {
            if let Ok(bytes) = std::fs::read(path) {
                let _ = plotters::style::register_font(
                    "sans-serif",
                    plotters::style::FontStyle::Normal,
                    Box::leak(bytes.into_boxed_slice()),
                );
                break;
            }
        }
    });
}

/// Map a user-provided locale tag to a num-format Locale and decimal separator.
/// Supported tags (case-insensitive): "en", "us", "en_US", "de", "de_DE", "german", "fr", "es", "it", "pt", "nl"
fn map_locale(tag: &str) -> (&'static Locale, char) {
    match tag.to_lowercase().as_str() {
        "de" | "de_de" | "german" => (&Locale::de, ','),
        "fr" | "fr_fr" => (&Locale::fr, ','),
        "es" | "es_es" => (&Locale::es, ','),
        "it" | "it_it" => (&Locale::it, ','),
        "pt" | "pt_pt" | "pt_br" => (&Locale::pt, ','),
        "nl" | "nl_nl" => (&Locale::nl, ','),
        _ => (&Locale::en, '.'),
    }
}

/// Generate the population bar chart from ranked rows (default locale = "en").
pub fn plot_population_bars<P: AsRef<Path>>(
    rows: &[BarRow],
    out_path: P,
    width: u32,
    height: u32,
) -> Result<()> {
    plot_population_bars_locale(rows, out_path, width, height, "en")
}

/// Same as `plot_population_bars` but with a locale tag for tick label
/// formatting (e.g., "en" or "de").
///
/// `rows` are drawn in the order given; pass them already ranked. Empty
/// input is an error at this layer — callers gate on emptiness and show an
/// informational message instead.
pub fn plot_population_bars_locale<P: AsRef<Path>>(
    rows: &[BarRow],
    out_path: P,
    width: u32,
    height: u32,
    locale_tag: &str,
) -> Result<()> {
    if rows.is_empty() {
        return Err(anyhow!("no data to plot"));
    }
    ensure_fonts_registered();

    let out_path = out_path.as_ref();
    let path_string = out_path.to_string_lossy().into_owned();

    let max_pop = rows.iter().map(|r| r.population).max().unwrap_or(1).max(1);
    let (num_locale, _dec_sep) = map_locale(locale_tag);

    if out_path.extension().and_then(|s| s.to_str()) == Some("svg") {
        let root = SVGBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
        draw_chart(root, rows, max_pop, num_locale)?;
    } else {
        let root = BitMapBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
        draw_chart(root, rows, max_pop, num_locale)?;
    }

    Ok(())
}

/// Helper that draws to any Plotters backend.
fn draw_chart<DB>(
    root: DrawingArea<DB, Shift>,
    rows: &[BarRow],
    max_pop: u64,
    num_locale: &Locale,
) -> Result<()>
where
    DB: DrawingBackend,
{
    root.fill(&WHITE).map_err(|e| anyhow!("{:?}", e))?;

    let n = rows.len() as i32;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption("Population of Filtered Countries", ("sans-serif", 24))
        .set_label_area_size(LabelAreaPosition::Left, 140)
        .set_label_area_size(LabelAreaPosition::Bottom, 44)
        .build_cartesian_2d(0f64..max_pop as f64 * 1.05, 0i32..n)
        .map_err(|e| anyhow!("{:?}", e))?;

    // X uses locale thousands separators; integers only.
    let x_label_fmt = |v: &f64| {
        let p = (*v).round() as i64;
        p.to_formatted_string(num_locale)
    };
    // Band [k, k+1) belongs to rows[n-1-k], so the first row lands on top.
    let y_label_fmt = |band: &i32| {
        let idx = n - 1 - *band;
        if idx < 0 {
            String::new()
        } else {
            rows.get(idx as usize)
                .map(|r| r.name.clone())
                .unwrap_or_default()
        }
    };

    chart
        .configure_mesh()
        .x_desc("Population")
        .y_desc("Country")
        .x_labels(8)
        .y_labels(n as usize + 1)
        .x_label_formatter(&x_label_fmt)
        .y_label_formatter(&y_label_fmt)
        .label_style(("sans-serif", 14))
        .axis_desc_style(("sans-serif", 16))
        .draw()
        .map_err(|e| anyhow!("{:?}", e))?;

    // Distinct color per region; the legend lists regions.
    let regions: Vec<String> = rows
        .iter()
        .map(|r| r.region.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    for (idx, region) in regions.iter().enumerate() {
        let color = Palette99::pick(idx).to_rgba();
        let legend_color = color.clone();

        let bars = rows
            .iter()
            .enumerate()
            .filter(|(_, r)| r.region == *region)
            .map(|(i, r)| {
                let band = n - 1 - i as i32;
                let mut rect = Rectangle::new(
                    [(0.0, band), (r.population as f64, band + 1)],
                    color.clone().filled(),
                );
                rect.set_margin(2, 2, 0, 0);
                rect
            });

        chart
            .draw_series(bars)
            .map_err(|e| anyhow!("{:?}", e))?
            .label(region.as_str())
            .legend(move |(x, y)| {
                Rectangle::new([(x, y - 5), (x + 18, y + 5)], legend_color.clone().filled())
            });
    }

    chart
        .configure_series_labels()
        .border_style(&BLACK)
        .position(SeriesLabelPosition::LowerRight)
        .background_style(&WHITE.mix(0.85))
        .label_font(("sans-serif", 14))
        .draw()
        .map_err(|e| anyhow!("{:?}", e))?;

    root.present().map_err(|e| anyhow!("{:?}", e))?;
    Ok(())
}
