use eframe::egui::{Color32, RichText, Ui};

use crate::data::model::{FilteredView, Metric};
use crate::data::stats;
use crate::ui::charts;

/// Environmental Factors tab: forest/rainfall vs extreme weather, event
/// trends, and the environmental correlation matrix.
pub fn show(ui: &mut Ui, view: FilteredView<'_>) {
    let columns = &view.dataset.columns;
    let has_events = columns.has(Metric::ExtremeWeather);

    ui.heading("Environmental Factors Analysis");
    ui.add_space(6.0);

    ui.columns(2, |cols| {
        if columns.has_all(&[Metric::ForestArea, Metric::ExtremeWeather]) {
            cols[0].label(RichText::new("Forest Area vs Extreme Weather").strong());
            charts::scatter_with_trendline(
                &mut cols[0],
                "forest_events_scatter",
                view,
                Metric::ForestArea,
                Metric::ExtremeWeather,
            );
        }
        if columns.has(Metric::Rainfall) && has_events {
            cols[1].label(RichText::new("Rainfall vs Extreme Weather").strong());
            charts::scatter_with_trendline(
                &mut cols[1],
                "rain_events_scatter",
                view,
                Metric::Rainfall,
                Metric::ExtremeWeather,
            );
        }
    });

    ui.separator();

    // ---- Extreme weather trends ----
    if columns.has_year && has_events {
        ui.label(RichText::new("Extreme Weather Events Trends").strong());
        let series = stats::year_series(view, Metric::ExtremeWeather);
        if series.is_empty() {
            charts::unavailable(ui, "Extreme weather trend");
        } else {
            let total: Vec<[f64; 2]> =
                series.iter().map(|s| [s.year as f64, s.sum]).collect();
            let mean: Vec<[f64; 2]> =
                series.iter().map(|s| [s.year as f64, s.mean]).collect();
            charts::dual_trend_plot(
                ui,
                "events_trend",
                &[
                    ("Total events".to_string(), total, Color32::from_rgb(200, 60, 50)),
                    (
                        "Average per country".to_string(),
                        mean,
                        Color32::from_rgb(230, 140, 30),
                    ),
                ],
            );
        }
        ui.separator();
    }

    // ---- Correlation matrix ----
    ui.label(RichText::new("Environmental Factors Correlation Matrix").strong());
    let matrix = stats::correlation_matrix(view, &Metric::ENVIRONMENTAL);
    charts::correlation_heatmap(ui, &matrix);
}
