use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::filter::ALL_COUNTRIES;
use crate::export;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the filter sidebar: year-range sliders and the country multiselect.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Dashboard Controls");
    ui.separator();

    let dataset = match &state.dataset {
        Some(ds) => ds,
        None => {
            ui.label("No dataset loaded.");
            return;
        }
    };

    let year_range = dataset.year_range;
    let has_country = dataset.columns.has_country;
    let countries = dataset.sorted_countries();

    // ---- Year range ----
    if let Some((lo, hi)) = year_range {
        ui.strong("Year Range");
        let mut min = state.selection.year_min;
        let mut max = state.selection.year_max;
        let from = ui.add(egui::Slider::new(&mut min, lo..=hi).text("from"));
        let to = ui.add(egui::Slider::new(&mut max, lo..=hi).text("to"));
        if from.changed() || to.changed() {
            // keep the bounds ordered while dragging
            if min > max {
                if from.changed() {
                    max = min;
                } else {
                    min = max;
                }
            }
            state.set_year_range(min, max);
        }
        ui.separator();
    }

    // ---- Country multiselect ----
    if has_country {
        ui.strong("Countries");
        ui.horizontal(|ui| {
            if ui.small_button("All").clicked() {
                state.select_all_countries();
            }
            let n_selected = if state.selection.country_filter_active() {
                state.selection.countries.len()
            } else {
                countries.len()
            };
            ui.label(format!("{n_selected}/{} selected", countries.len()));
        });

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui: &mut Ui| {
                let all_selected = !state.selection.country_filter_active();
                let mut all_checked = all_selected;
                if ui.checkbox(&mut all_checked, RichText::new(ALL_COUNTRIES).strong()).changed()
                    && all_checked
                {
                    state.select_all_countries();
                }

                let mut toggled: Option<String> = None;
                for country in &countries {
                    let is_selected =
                        all_selected || state.selection.countries.contains(country);
                    let mut checked = is_selected;
                    if ui.checkbox(&mut checked, country).changed() {
                        toggled = Some(country.clone());
                    }
                }
                if let Some(country) = toggled {
                    if !state.selection.country_filter_active() {
                        // Switching away from "All": start from this country alone.
                        state.selection.countries.clear();
                        state.selection.countries.insert(country);
                        state.refilter();
                    } else {
                        state.toggle_country(&country);
                    }
                }
            });
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar: file actions, exports, row counts, status.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.menu_button("Export", |ui: &mut Ui| {
            let enabled = state.dataset.is_some();
            if ui
                .add_enabled(enabled, egui::Button::new("Data summary (CSV)…"))
                .clicked()
            {
                export_dialog(state, ExportKind::Summary);
                ui.close_menu();
            }
            if ui
                .add_enabled(enabled, egui::Button::new("Analysis report (JSON)…"))
                .clicked()
            {
                export_dialog(state, ExportKind::Report);
                ui.close_menu();
            }
            if ui
                .add_enabled(enabled, egui::Button::new("Policy brief (Markdown)…"))
                .clicked()
            {
                export_dialog(state, ExportKind::Brief);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} rows loaded, {} selected",
                ds.len(),
                state.visible_indices.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// No-data panel
// ---------------------------------------------------------------------------

/// Degraded view when the source table is missing or unreadable: describe
/// the failure and offer the upload fallback instead of crashing.
pub fn no_data_panel(ui: &mut Ui, state: &mut AppState) {
    ui.vertical_centered(|ui| {
        ui.add_space(60.0);
        ui.heading("Data file not found");
        ui.add_space(8.0);

        if let Some(err) = &state.load_error {
            ui.label(RichText::new(err.to_string()).color(Color32::RED));
            ui.add_space(8.0);
            if err.is_unavailable() {
                ui.label("To generate the data:");
                ui.label("1. Run the upstream cleaning step to produce climate_data_cleaned.csv");
                ui.label("2. Place it next to the dashboard, or pass its path as an argument");
            }
        } else {
            ui.label("No dataset has been loaded yet.");
        }

        ui.add_space(12.0);
        ui.label("Alternative: upload a climate data file (.csv or .json).");
        if ui.button("Open a data file…").clicked() {
            open_file_dialog(state);
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open climate data")
        .add_filter("Supported files", &["csv", "json"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} rows, columns {:?}",
                    dataset.len(),
                    dataset.columns.metrics
                );
                state.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load file: {e}");
                state.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}

pub(crate) enum ExportKind {
    Summary,
    Report,
    Brief,
}

pub(crate) fn export_dialog(state: &mut AppState, kind: ExportKind) {
    let (title, name, ext) = match &kind {
        ExportKind::Summary => ("Save data summary", "data_summary.csv", "csv"),
        ExportKind::Report => ("Save analysis report", "analysis_report.json", "json"),
        ExportKind::Brief => ("Save policy brief", "policy_brief.md", "md"),
    };
    let Some(path) = rfd::FileDialog::new()
        .set_title(title)
        .set_file_name(name)
        .add_filter(ext, &[ext])
        .save_file()
    else {
        return;
    };

    let selection = state.selection.clone();
    let result = match (&state.view(), kind) {
        (Some(view), ExportKind::Summary) => export::write_data_summary(*view, &path),
        (Some(view), ExportKind::Report) => export::write_analysis_report(*view, &selection, &path),
        (Some(view), ExportKind::Brief) => export::write_policy_brief(*view, &path),
        (None, _) => return,
    };

    match result {
        Ok(()) => {
            log::info!("Exported {}", path.display());
            state.status_message = Some(format!("Saved {}", path.display()));
        }
        Err(e) => {
            log::error!("Export failed: {e:#}");
            state.status_message = Some(format!("Export failed: {e:#}"));
        }
    }
}
