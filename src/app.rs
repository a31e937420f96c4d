use eframe::egui;

use crate::state::{AppState, Tab};
use crate::ui::{panels, views};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct ClimascopeApp {
    pub state: AppState,
}

impl ClimascopeApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for ClimascopeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(230.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: tab strip + active view ----
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.state.dataset.is_none() {
                panels::no_data_panel(ui, &mut self.state);
                return;
            }

            ui.horizontal(|ui| {
                for tab in Tab::ALL {
                    ui.selectable_value(&mut self.state.active_tab, tab, tab.title());
                }
            });
            ui.separator();

            let tab = self.state.active_tab;
            if tab == Tab::PolicyInsights {
                views::insights::show(ui, &mut self.state);
            } else if let Some(view) = self.state.view() {
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| match tab {
                        Tab::Overview => views::overview::show(ui, view),
                        Tab::TemperatureEmissions => views::trends::show(ui, view),
                        Tab::RenewableEnergy => views::renewables::show(ui, view),
                        Tab::EnvironmentalFactors => views::environment::show(ui, view),
                        Tab::PolicyInsights => {}
                    });
            }
        });
    }
}
