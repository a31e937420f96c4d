use eframe::egui::{Align2, Color32, RichText, Stroke, Ui};
use egui_plot::{Bar, BarChart, Line, Plot, PlotPoint, PlotPoints, Points, Polygon, Text};

use crate::color::{self, Ramp};
use crate::data::model::{DeltaMode, FilteredView, Metric};
use crate::data::stats::{self, Delta, YearStat};

// ---------------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------------

/// Headline value on a metric card, unit included.
pub fn format_metric_value(metric: Metric, v: f64) -> String {
    match metric {
        Metric::Co2Emissions => format!("{v:.2} tons/capita"),
        Metric::RenewableEnergy | Metric::ForestArea => format!("{v:.1}%"),
        Metric::AvgTemperature => format!("{v:.2}°C"),
        Metric::SeaLevelRise | Metric::Rainfall => format!("{v:.1} mm"),
        Metric::ExtremeWeather | Metric::Population => format!("{}", v.round() as i64),
    }
}

/// Signed delta text for a metric card.
pub fn format_delta(metric: Metric, delta: Delta) -> String {
    match delta {
        Delta::Percent(p) => format!("{p:+.1}%"),
        Delta::Absolute(d) => match metric.delta_mode() {
            DeltaMode::Absolute if metric == Metric::AvgTemperature => format!("{d:+.2}°C"),
            _ => format!("{d:+.2} {}", metric.unit()),
        },
        Delta::Count(c) => format!("{c:+}"),
    }
}

// ---------------------------------------------------------------------------
// Metric card
// ---------------------------------------------------------------------------

/// Small framed card: label, headline value, optional coloured delta.
/// Renders "unavailable" when the statistic is undefined for the view.
pub fn metric_card(ui: &mut Ui, metric: Metric, value: Option<f64>, delta: Option<Delta>) {
    ui.group(|ui| {
        ui.set_min_width(150.0);
        ui.vertical(|ui| {
            ui.label(RichText::new(metric.label()).small());
            match value {
                Some(v) => {
                    ui.label(RichText::new(format_metric_value(metric, v)).heading());
                }
                None => {
                    ui.label(RichText::new("unavailable").weak());
                }
            }
            if let Some(d) = delta {
                let color = color::delta_color(metric, d.signum());
                ui.label(RichText::new(format_delta(metric, d)).color(color));
            }
        });
    });
}

/// Placeholder shown when a chart's inputs are unavailable.
pub fn unavailable(ui: &mut Ui, what: &str) {
    ui.label(RichText::new(format!("{what}: unavailable for the current selection")).weak());
}

// ---------------------------------------------------------------------------
// Yearly trend line with an optional band
// ---------------------------------------------------------------------------

/// What to shade around a yearly trend line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    None,
    /// mean ± sample std (years with a single row contribute no band)
    Std,
    /// min-max envelope
    MinMax,
}

/// Line chart of per-year means, optionally shaded with a std or min-max band.
pub fn trend_plot(
    ui: &mut Ui,
    id: &str,
    y_label: &str,
    series: &[YearStat],
    line_color: Color32,
    band: Band,
) {
    Plot::new(id)
        .height(280.0)
        .x_axis_label("Year")
        .y_axis_label(y_label)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            if band != Band::None {
                let envelope: Vec<(f64, f64, f64)> = series
                    .iter()
                    .filter_map(|s| match band {
                        Band::Std => s.std.map(|sd| (s.year as f64, s.mean - sd, s.mean + sd)),
                        Band::MinMax => Some((s.year as f64, s.min, s.max)),
                        Band::None => None,
                    })
                    .collect();
                if envelope.len() >= 2 {
                    let mut ring: Vec<[f64; 2]> =
                        envelope.iter().map(|&(x, _, hi)| [x, hi]).collect();
                    ring.extend(envelope.iter().rev().map(|&(x, lo, _)| [x, lo]));
                    plot_ui.polygon(
                        Polygon::new(PlotPoints::from(ring))
                            .fill_color(line_color.gamma_multiply(0.15))
                            .stroke(Stroke::NONE),
                    );
                }
            }

            let points: PlotPoints = series.iter().map(|s| [s.year as f64, s.mean]).collect();
            plot_ui.line(Line::new(points).name(y_label).color(line_color).width(2.5));
        });
}

/// Two-series yearly line chart (e.g. total vs mean extreme events).
pub fn dual_trend_plot(
    ui: &mut Ui,
    id: &str,
    series: &[(String, Vec<[f64; 2]>, Color32)],
) {
    Plot::new(id)
        .height(280.0)
        .x_axis_label("Year")
        .legend(egui_plot::Legend::default())
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for (name, points, color) in series {
                plot_ui.line(
                    Line::new(PlotPoints::from(points.clone()))
                        .name(name)
                        .color(*color)
                        .width(2.0),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Ranked horizontal bars (per-country averages)
// ---------------------------------------------------------------------------

/// Horizontal bar chart of a descending country ranking. Bar colour tracks
/// the value along the metric's ramp; country names are drawn on the bars.
pub fn ranked_bars(ui: &mut Ui, id: &str, ranked: &[(String, f64)], ramp: Ramp, height: f32) {
    if ranked.is_empty() {
        unavailable(ui, "Ranking");
        return;
    }
    let max = ranked
        .iter()
        .map(|(_, v)| *v)
        .fold(f64::NEG_INFINITY, f64::max)
        .max(f64::MIN_POSITIVE);

    Plot::new(id)
        .height(height)
        .show_axes([true, false])
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            let bars: Vec<Bar> = ranked
                .iter()
                .enumerate()
                .map(|(i, (country, v))| {
                    // rank 0 on top
                    let y = (ranked.len() - 1 - i) as f64;
                    Bar::new(y, *v)
                        .name(country)
                        .fill(ramp.at(v / max))
                        .width(0.7)
                })
                .collect();
            plot_ui.bar_chart(BarChart::new(bars).horizontal());

            for (i, (country, v)) in ranked.iter().enumerate() {
                let y = (ranked.len() - 1 - i) as f64;
                plot_ui.text(
                    Text::new(
                        PlotPoint::new(max * 0.02, y),
                        RichText::new(format!("{country}  ({v:.2})")).small(),
                    )
                    .anchor(Align2::LEFT_CENTER),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Scatter with least-squares trendline
// ---------------------------------------------------------------------------

/// Scatter of two metrics over pairwise-complete rows, with the fitted
/// regression line when one exists.
pub fn scatter_with_trendline(ui: &mut Ui, id: &str, view: FilteredView<'_>, x: Metric, y: Metric) {
    let pairs: Vec<[f64; 2]> = view
        .records()
        .filter_map(|r| Some([r.value(x)?, r.value(y)?]))
        .collect();
    if pairs.is_empty() {
        unavailable(ui, "Scatter");
        return;
    }

    let fit = stats::linear_fit(view, x, y);
    let (x_min, x_max) = pairs
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
            (lo.min(p[0]), hi.max(p[0]))
        });

    Plot::new(id)
        .height(280.0)
        .x_axis_label(x.label())
        .y_axis_label(y.label())
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.points(
                Points::new(PlotPoints::from(pairs))
                    .name(format!("{x} vs {y}"))
                    .color(color::ramp_for(y).at(0.8))
                    .radius(2.0),
            );
            if let Some((slope, intercept)) = fit {
                let line: PlotPoints = vec![
                    [x_min, slope * x_min + intercept],
                    [x_max, slope * x_max + intercept],
                ]
                .into();
                plot_ui.line(Line::new(line).name("trend").color(Color32::DARK_GRAY).width(1.5));
            }
        });
}

// ---------------------------------------------------------------------------
// Year-over-year growth bars
// ---------------------------------------------------------------------------

/// Bar chart of a percent-change series; positive bars green, negative red.
/// Years without a defined change (first year, zero baseline) are skipped.
pub fn growth_bars(ui: &mut Ui, id: &str, changes: &[(i32, Option<f64>)]) {
    let bars: Vec<Bar> = changes
        .iter()
        .filter_map(|&(year, change)| {
            let c = change?;
            let fill = if c >= 0.0 {
                Color32::from_rgb(40, 140, 70)
            } else {
                Color32::from_rgb(200, 60, 50)
            };
            Some(Bar::new(year as f64, c).fill(fill).width(0.7))
        })
        .collect();
    if bars.is_empty() {
        unavailable(ui, "Growth rate");
        return;
    }

    Plot::new(id)
        .height(220.0)
        .x_axis_label("Year")
        .y_axis_label("Growth Rate (%)")
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("YoY change"));
        });
}

// ---------------------------------------------------------------------------
// Correlation heatmap
// ---------------------------------------------------------------------------

/// Grid of coloured cells for a correlation matrix; diverging scale, values
/// printed per cell, dashes for unavailable pairs.
pub fn correlation_heatmap(ui: &mut Ui, matrix: &stats::CorrelationMatrix) {
    if matrix.is_empty() {
        unavailable(ui, "Correlation matrix");
        return;
    }

    eframe::egui::Grid::new("correlation_heatmap")
        .spacing([2.0, 2.0])
        .show(ui, |ui| {
            ui.label("");
            for m in &matrix.metrics {
                ui.label(RichText::new(m.label()).small().strong());
            }
            ui.end_row();

            for (i, row_metric) in matrix.metrics.iter().enumerate() {
                ui.label(RichText::new(row_metric.label()).small().strong());
                for j in 0..matrix.metrics.len() {
                    match matrix.get(i, j) {
                        Some(r) => {
                            let bg = color::diverging(r);
                            ui.scope(|ui| {
                                eframe::egui::Frame::default().fill(bg).show(ui, |ui| {
                                    ui.set_min_size([52.0, 26.0].into());
                                    ui.centered_and_justified(|ui| {
                                        ui.label(
                                            RichText::new(format!("{r:.2}"))
                                                .small()
                                                .color(Color32::BLACK),
                                        );
                                    });
                                });
                            });
                        }
                        None => {
                            ui.label(RichText::new("--").weak());
                        }
                    }
                }
                ui.end_row();
            }
        });
}

/// Correlation figure card with a strength caption, for the scatter columns.
pub fn correlation_card(ui: &mut Ui, title: &str, r: Option<f64>, caption: &str) {
    ui.group(|ui| {
        ui.vertical(|ui| {
            ui.label(RichText::new(title).strong());
            match r {
                Some(r) => {
                    ui.label(RichText::new(format!("{r:.3}")).heading().color(color::diverging(r)));
                    let strength = match r.abs() {
                        a if a >= 0.7 => "strong",
                        a if a >= 0.4 => "moderate",
                        _ => "weak",
                    };
                    let direction = if r >= 0.0 { "positive" } else { "negative" };
                    ui.label(RichText::new(format!("{strength} {direction} correlation")).small());
                    ui.label(RichText::new(caption).small().weak());
                }
                None => {
                    ui.label(RichText::new("unavailable").weak());
                    ui.label(
                        RichText::new("needs at least 2 complete pairs with variance")
                            .small()
                            .weak(),
                    );
                }
            }
        });
    });
}
