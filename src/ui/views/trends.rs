use eframe::egui::{Color32, RichText, Ui};

use crate::color;
use crate::data::model::{FilteredView, Metric};
use crate::data::stats;
use crate::ui::charts::{self, Band};

/// Temperature & Emissions tab: yearly trends, temperature vs sea level,
/// top emitters.
pub fn show(ui: &mut Ui, view: FilteredView<'_>) {
    let columns = &view.dataset.columns;

    ui.heading("Temperature & CO2 Emissions Analysis");
    ui.add_space(6.0);

    ui.columns(2, |cols| {
        if columns.has_year && columns.has(Metric::Co2Emissions) {
            cols[0].label(RichText::new("CO2 Emissions Trend Over Time").strong());
            let series = stats::year_series(view, Metric::Co2Emissions);
            charts::trend_plot(
                &mut cols[0],
                "co2_trend",
                "CO2 Emissions (Tons/Capita)",
                &series,
                Color32::from_rgb(200, 60, 50),
                Band::Std,
            );
        }
        if columns.has_year && columns.has(Metric::AvgTemperature) {
            cols[1].label(RichText::new("Temperature Trend Over Time").strong());
            let series = stats::year_series(view, Metric::AvgTemperature);
            charts::trend_plot(
                &mut cols[1],
                "temp_trend",
                "Temperature (°C)",
                &series,
                Color32::from_rgb(230, 140, 30),
                Band::MinMax,
            );
        }
    });

    ui.separator();

    // ---- Temperature vs sea level ----
    if columns.has(Metric::AvgTemperature) && columns.has(Metric::SeaLevelRise) {
        ui.label(RichText::new("Temperature vs Sea Level Rise").strong());
        ui.columns(2, |cols| {
            charts::scatter_with_trendline(
                &mut cols[0],
                "temp_sea_scatter",
                view,
                Metric::AvgTemperature,
                Metric::SeaLevelRise,
            );
            charts::correlation_card(
                &mut cols[1],
                "Correlation Coefficient",
                stats::pearson(view, Metric::AvgTemperature, Metric::SeaLevelRise),
                "Rising temperatures associated with increased sea level rise.",
            );
        });
        ui.separator();
    }

    // ---- Top emitters ----
    if columns.has_country && columns.has(Metric::Co2Emissions) {
        ui.label(RichText::new("Top 15 CO2 Emitting Countries").strong());
        let top = stats::top_k(view, Metric::Co2Emissions, 15);
        charts::ranked_bars(
            ui,
            "top_emitters",
            &top,
            color::ramp_for(Metric::Co2Emissions),
            420.0,
        );
    }
}
