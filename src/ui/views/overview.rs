use eframe::egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::color;
use crate::data::model::{FilteredView, Metric};
use crate::data::stats;
use crate::ui::charts;

/// Overview tab: key metric cards, per-country rankings, summary statistics.
pub fn show(ui: &mut Ui, view: FilteredView<'_>) {
    let columns = &view.dataset.columns;

    ui.heading("Key Climate Metrics Overview");
    ui.add_space(6.0);

    // ---- Metric cards ----
    ui.horizontal_wrapped(|ui| {
        if columns.has(Metric::Co2Emissions) {
            charts::metric_card(
                ui,
                Metric::Co2Emissions,
                stats::mean(view, Metric::Co2Emissions),
                stats::trailing_delta(view, Metric::Co2Emissions),
            );
        }
        if columns.has(Metric::RenewableEnergy) {
            charts::metric_card(
                ui,
                Metric::RenewableEnergy,
                stats::mean(view, Metric::RenewableEnergy),
                stats::trailing_delta(view, Metric::RenewableEnergy),
            );
        }
        if columns.has(Metric::AvgTemperature) {
            charts::metric_card(
                ui,
                Metric::AvgTemperature,
                stats::mean(view, Metric::AvgTemperature),
                stats::trailing_delta(view, Metric::AvgTemperature),
            );
        }
        if columns.has(Metric::ExtremeWeather) {
            charts::metric_card(
                ui,
                Metric::ExtremeWeather,
                stats::total(view, Metric::ExtremeWeather),
                stats::trailing_delta(view, Metric::ExtremeWeather),
            );
        }
    });

    ui.separator();

    // ---- Per-country rankings (in place of the choropleth maps) ----
    if columns.has_country {
        ui.columns(2, |cols| {
            if columns.has(Metric::Co2Emissions) {
                cols[0].label(RichText::new("Average CO2 Emissions by Country").strong());
                let ranked = stats::country_means(view, Metric::Co2Emissions);
                charts::ranked_bars(
                    &mut cols[0],
                    "overview_co2_map",
                    &ranked,
                    color::ramp_for(Metric::Co2Emissions),
                    360.0,
                );
            }
            if columns.has(Metric::RenewableEnergy) {
                cols[1].label(RichText::new("Average Renewable Energy by Country").strong());
                let ranked = stats::country_means(view, Metric::RenewableEnergy);
                charts::ranked_bars(
                    &mut cols[1],
                    "overview_renewable_map",
                    &ranked,
                    color::ramp_for(Metric::RenewableEnergy),
                    360.0,
                );
            }
        });
        ui.separator();
    }

    // ---- Summary statistics table ----
    ui.label(RichText::new("Summary Statistics").strong());
    summary_table(ui, view);
}

const SUMMARY_METRICS: [Metric; 5] = [
    Metric::Co2Emissions,
    Metric::RenewableEnergy,
    Metric::AvgTemperature,
    Metric::ForestArea,
    Metric::ExtremeWeather,
];

fn summary_table(ui: &mut Ui, view: FilteredView<'_>) {
    let rows: Vec<(Metric, stats::Describe)> = SUMMARY_METRICS
        .into_iter()
        .filter(|m| view.dataset.columns.has(*m))
        .filter_map(|m| stats::describe(view, m).map(|d| (m, d)))
        .collect();
    if rows.is_empty() {
        charts::unavailable(ui, "Summary statistics");
        return;
    }

    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().at_least(160.0))
        .columns(Column::auto().at_least(70.0), 6)
        .header(20.0, |mut header| {
            for title in ["Metric", "Count", "Mean", "Std", "Min", "Max", "Range"] {
                header.col(|ui| {
                    ui.label(RichText::new(title).strong());
                });
            }
        })
        .body(|mut body| {
            for (metric, d) in rows {
                body.row(18.0, |mut row| {
                    row.col(|ui| {
                        ui.label(metric.label());
                    });
                    row.col(|ui| {
                        ui.label(d.count.to_string());
                    });
                    row.col(|ui| {
                        ui.label(format!("{:.2}", d.mean));
                    });
                    row.col(|ui| {
                        ui.label(
                            d.std
                                .map(|s| format!("{s:.2}"))
                                .unwrap_or_else(|| "--".to_string()),
                        );
                    });
                    row.col(|ui| {
                        ui.label(format!("{:.2}", d.min));
                    });
                    row.col(|ui| {
                        ui.label(format!("{:.2}", d.max));
                    });
                    row.col(|ui| {
                        ui.label(format!("{:.2}", d.range));
                    });
                });
            }
        });
}
