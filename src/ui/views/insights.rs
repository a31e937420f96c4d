use eframe::egui::{RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::export::{FINDINGS, POLICY_ACTIONS};
use crate::state::AppState;
use crate::ui::panels::{export_dialog, ExportKind};

const RECOMMENDATIONS: [(&str, [&str; 3]); 3] = [
    (
        "1. Accelerate Renewable Energy Transition",
        [
            "Implement feed-in tariffs",
            "Provide tax credits for clean energy",
            "Target: 50% renewable by 2030",
        ],
    ),
    (
        "2. Forest Conservation Programs",
        [
            "Create protected forest areas",
            "Carbon credit programs for reforestation",
            "Penalize illegal deforestation",
        ],
    ),
    (
        "3. Climate Finance Mechanisms",
        [
            "Green Climate Fund contributions",
            "Technology transfer to developing nations",
            "Support adaptation infrastructure",
        ],
    ),
];

const IMPACT_TARGETS: [(&str, &str, &str); 5] = [
    ("CO2 Reduction", "30-40% by 2035", "Critical"),
    ("Renewable Energy", "50% by 2030", "Critical"),
    ("Forest Coverage", "15% increase", "High"),
    ("Climate Resilience", "50% improvement", "High"),
    ("Economic Growth", "2-3% annual", "Medium"),
];

const TIMELINE: [(&str, [&str; 3]); 4] = [
    (
        "Immediate (2025-2026)",
        [
            "Policy framework development",
            "Stakeholder engagement",
            "Pilot programs",
        ],
    ),
    (
        "Short-term (2027-2028)",
        [
            "Renewable energy subsidies",
            "Carbon pricing implementation",
            "Forest protection laws",
        ],
    ),
    (
        "Mid-term (2029-2032)",
        [
            "Scale up renewable projects",
            "Technology transfer",
            "Infrastructure development",
        ],
    ),
    (
        "Long-term (2033-2035)",
        [
            "Achieve 50% renewable target",
            "30-40% emission reduction",
            "Climate resilience built",
        ],
    ),
];

/// Policy Insights tab: static narrative content plus the export actions.
pub fn show(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Policy Insights & Recommendations");
    ui.add_space(6.0);

    ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
        ui.label(RichText::new("Key Findings").strong());
        findings_table(ui);
        ui.separator();

        ui.columns(2, |cols| {
            cols[0].label(RichText::new("Priority Policy Recommendations").strong());
            for (title, items) in RECOMMENDATIONS {
                cols[0].group(|ui| {
                    ui.label(RichText::new(title).strong());
                    for item in items {
                        ui.label(format!("• {item}"));
                    }
                });
            }

            cols[1].label(RichText::new("Expected Impact Metrics").strong());
            impact_table(&mut cols[1]);
            cols[1].group(|ui| {
                ui.label(RichText::new("Investment Required").strong());
                ui.label(RichText::new("$2-3 Trillion").heading());
                ui.label(
                    RichText::new("Global investment needed annually for climate action").small(),
                );
            });
        });

        ui.separator();
        ui.label(RichText::new("Implementation Timeline").strong());
        for (phase, actions) in TIMELINE {
            ui.group(|ui| {
                ui.label(RichText::new(phase).strong());
                for action in actions {
                    ui.label(format!("• {action}"));
                }
            });
        }

        ui.separator();
        ui.label(RichText::new("Download Reports").strong());
        ui.horizontal(|ui| {
            if ui.button("Data Summary (CSV)").clicked() {
                export_dialog(state, ExportKind::Summary);
            }
            if ui.button("Analysis Report (JSON)").clicked() {
                export_dialog(state, ExportKind::Report);
            }
            if ui.button("Policy Brief (Markdown)").clicked() {
                export_dialog(state, ExportKind::Brief);
            }
        });
    });
}

fn findings_table(ui: &mut Ui) {
    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().at_least(180.0))
        .column(Column::remainder().at_least(240.0))
        .column(Column::remainder().at_least(240.0))
        .header(20.0, |mut header| {
            for title in ["Insight", "Finding", "Policy Action"] {
                header.col(|ui| {
                    ui.label(RichText::new(title).strong());
                });
            }
        })
        .body(|mut body| {
            for (i, (title, finding)) in FINDINGS.iter().enumerate() {
                body.row(22.0, |mut row| {
                    row.col(|ui| {
                        ui.label(format!("{}. {title}", i + 1));
                    });
                    row.col(|ui| {
                        ui.label(*finding);
                    });
                    row.col(|ui| {
                        ui.label(POLICY_ACTIONS[i]);
                    });
                });
            }
        });
}

fn impact_table(ui: &mut Ui) {
    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().at_least(130.0))
        .column(Column::auto().at_least(110.0))
        .column(Column::auto().at_least(70.0))
        .header(20.0, |mut header| {
            for title in ["Metric", "Target", "Priority"] {
                header.col(|ui| {
                    ui.label(RichText::new(title).strong());
                });
            }
        })
        .body(|mut body| {
            for (metric, target, priority) in IMPACT_TARGETS {
                body.row(18.0, |mut row| {
                    row.col(|ui| {
                        ui.label(metric);
                    });
                    row.col(|ui| {
                        ui.label(target);
                    });
                    row.col(|ui| {
                        ui.label(priority);
                    });
                });
            }
        });
}
