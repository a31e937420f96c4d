use eframe::egui::{Color32, RichText, Ui};

use crate::color;
use crate::data::model::{FilteredView, Metric};
use crate::data::stats;
use crate::ui::charts::{self, Band};

/// Renewable Energy tab: adoption trend, top adopters, renewable vs CO2,
/// year-over-year growth rate.
pub fn show(ui: &mut Ui, view: FilteredView<'_>) {
    let columns = &view.dataset.columns;
    let has_renewable = columns.has(Metric::RenewableEnergy);

    ui.heading("Renewable Energy Adoption Analysis");
    ui.add_space(6.0);

    ui.columns(2, |cols| {
        if columns.has_year && has_renewable {
            cols[0].label(RichText::new("Renewable Energy Trends").strong());
            let series = stats::year_series(view, Metric::RenewableEnergy);
            charts::trend_plot(
                &mut cols[0],
                "renewable_trend",
                "Renewable Energy (%)",
                &series,
                Color32::from_rgb(40, 140, 70),
                Band::None,
            );
        }
        if columns.has_country && has_renewable {
            cols[1].label(RichText::new("Top Renewable Energy Adopters").strong());
            let top = stats::top_k(view, Metric::RenewableEnergy, 10);
            charts::ranked_bars(
                &mut cols[1],
                "top_renewable",
                &top,
                color::ramp_for(Metric::RenewableEnergy),
                280.0,
            );
        }
    });

    ui.separator();

    // ---- Renewable vs CO2 ----
    if has_renewable && columns.has(Metric::Co2Emissions) {
        ui.label(RichText::new("Renewable Energy vs CO2 Emissions").strong());
        ui.columns(2, |cols| {
            charts::scatter_with_trendline(
                &mut cols[0],
                "renewable_co2_scatter",
                view,
                Metric::RenewableEnergy,
                Metric::Co2Emissions,
            );
            charts::correlation_card(
                &mut cols[1],
                "Correlation",
                stats::pearson(view, Metric::RenewableEnergy, Metric::Co2Emissions),
                "Countries with higher renewable adoption show lower CO2 emissions; \
                 accelerating the transition should be a priority.",
            );
        });
        ui.separator();
    }

    // ---- Growth rate ----
    if columns.has_year && has_renewable {
        ui.label(RichText::new("Renewable Energy Growth Rate").strong());
        let series: Vec<(i32, f64)> = stats::year_series(view, Metric::RenewableEnergy)
            .into_iter()
            .map(|s| (s.year, s.mean))
            .collect();
        let changes = stats::percent_change(&series);
        charts::growth_bars(ui, "renewable_growth", &changes);
    }
}
