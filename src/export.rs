//! Report exports. Unlike the dashboard widgets these write real artifacts:
//! a per-metric summary table (CSV), a full analysis report (JSON) and a
//! policy brief (Markdown), each computed from the current filtered view.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::data::filter::FilterSelection;
use crate::data::model::{FilteredView, Metric};
use crate::data::stats::{self, CorrelationMatrix, Describe, YearStat};

// ---------------------------------------------------------------------------
// Data summary (CSV)
// ---------------------------------------------------------------------------

/// One row per metric available in the view: count/mean/std/min/max/range.
pub fn write_data_summary(view: FilteredView<'_>, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    writer.write_record(["metric", "unit", "count", "mean", "std", "min", "max", "range"])?;

    for metric in Metric::ALL {
        if !view.dataset.columns.has(metric) {
            continue;
        }
        let Some(d) = stats::describe(view, metric) else {
            continue;
        };
        writer.write_record([
            metric.label().to_string(),
            metric.unit().to_string(),
            d.count.to_string(),
            format!("{:.4}", d.mean),
            d.std.map(|s| format!("{s:.4}")).unwrap_or_default(),
            format!("{:.4}", d.min),
            format!("{:.4}", d.max),
            format!("{:.4}", d.range),
        ])?;
    }
    writer.flush().context("flushing summary CSV")?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Analysis report (JSON)
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct MetricSummary {
    metric: Metric,
    label: &'static str,
    unit: &'static str,
    #[serde(flatten)]
    describe: Describe,
}

#[derive(Serialize)]
struct SelectionEcho {
    year_min: i32,
    year_max: i32,
    countries: Vec<String>,
}

#[derive(Serialize)]
struct AnalysisReport {
    selection: SelectionEcho,
    rows: usize,
    summaries: Vec<MetricSummary>,
    co2_by_year: Vec<YearStat>,
    temperature_by_year: Vec<YearStat>,
    renewable_by_year: Vec<YearStat>,
    top_emitters: Vec<(String, f64)>,
    top_renewable: Vec<(String, f64)>,
    environmental_correlations: CorrelationMatrix,
}

/// Serialize the full per-view analysis to pretty-printed JSON.
pub fn write_analysis_report(
    view: FilteredView<'_>,
    selection: &FilterSelection,
    path: &Path,
) -> Result<()> {
    let summaries = Metric::ALL
        .into_iter()
        .filter(|m| view.dataset.columns.has(*m))
        .filter_map(|m| {
            stats::describe(view, m).map(|describe| MetricSummary {
                metric: m,
                label: m.label(),
                unit: m.unit(),
                describe,
            })
        })
        .collect();

    let report = AnalysisReport {
        selection: SelectionEcho {
            year_min: selection.year_min,
            year_max: selection.year_max,
            countries: selection.countries.iter().cloned().collect(),
        },
        rows: view.len(),
        summaries,
        co2_by_year: stats::year_series(view, Metric::Co2Emissions),
        temperature_by_year: stats::year_series(view, Metric::AvgTemperature),
        renewable_by_year: stats::year_series(view, Metric::RenewableEnergy),
        top_emitters: stats::top_k(view, Metric::Co2Emissions, 15),
        top_renewable: stats::top_k(view, Metric::RenewableEnergy, 10),
        environmental_correlations: stats::correlation_matrix(view, &Metric::ENVIRONMENTAL),
    };

    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    serde_json::to_writer_pretty(file, &report).context("writing analysis report")?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Policy brief (Markdown)
// ---------------------------------------------------------------------------

/// Key findings carried by the insights view and the policy brief.
pub const FINDINGS: [(&str, &str); 7] = [
    (
        "Renewable energy impact",
        "Strong negative correlation between renewable energy adoption and CO2 emissions.",
    ),
    (
        "Temperature and sea level",
        "Rising temperatures correlate directly with sea level increases.",
    ),
    (
        "Forest protection",
        "Forest coverage is inversely related to extreme weather events.",
    ),
    (
        "Development disparity",
        "Significant emission gaps persist between developed and developing nations.",
    ),
    (
        "Extreme weather increase",
        "Extreme weather events are increasing in frequency over time.",
    ),
    (
        "Renewable growth rate",
        "Renewable adoption is growing but requires acceleration.",
    ),
    (
        "Population vs emissions",
        "Development model matters more than population size.",
    ),
];

/// Policy actions paired one-to-one with [`FINDINGS`].
pub const POLICY_ACTIONS: [&str; 7] = [
    "Implement renewable energy incentives and subsidies.",
    "Establish coastal protection and adaptation programs.",
    "Launch aggressive reforestation initiatives.",
    "Create climate finance mechanisms for developing countries.",
    "Strengthen disaster preparedness systems.",
    "Set mandatory renewable energy targets.",
    "Promote sustainable development pathways.",
];

/// Markdown brief: live headline numbers for the current view, then the
/// static findings and policy actions.
pub fn write_policy_brief(view: FilteredView<'_>, path: &Path) -> Result<()> {
    let mut out = String::new();
    out.push_str("# Climate Policy Brief\n\n## Headline figures\n\n");

    match stats::mean(view, Metric::Co2Emissions) {
        Some(v) => {
            let _ = writeln!(out, "- Average CO2 emissions: {v:.2} tons/capita");
        }
        None => out.push_str("- Average CO2 emissions: unavailable\n"),
    }
    match stats::mean(view, Metric::RenewableEnergy) {
        Some(v) => {
            let _ = writeln!(out, "- Average renewable energy share: {v:.1}%");
        }
        None => out.push_str("- Average renewable energy share: unavailable\n"),
    }
    match stats::pearson(view, Metric::RenewableEnergy, Metric::Co2Emissions) {
        Some(r) => {
            let _ = writeln!(out, "- Renewable vs CO2 correlation: {r:.3}");
        }
        None => out.push_str("- Renewable vs CO2 correlation: unavailable\n"),
    }

    out.push_str("\n## Key findings\n\n");
    for (i, (title, finding)) in FINDINGS.iter().enumerate() {
        let _ = writeln!(out, "{}. **{title}** — {finding}", i + 1);
        let _ = writeln!(out, "   *Action:* {}", POLICY_ACTIONS[i]);
    }

    std::fs::write(path, out).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{ClimateDataset, Record};
    use std::collections::BTreeMap;

    fn sample_dataset() -> ClimateDataset {
        let mut records = Vec::new();
        for (year, co2, renew) in [(2000, 8.0, 20.0), (2001, 7.5, 24.0), (2002, 7.0, 28.0)] {
            let mut values = BTreeMap::new();
            values.insert(Metric::Co2Emissions, co2);
            values.insert(Metric::RenewableEnergy, renew);
            records.push(Record {
                country: Some("Chile".to_string()),
                year: Some(year),
                values,
            });
        }
        ClimateDataset::from_records(records)
    }

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("climascope-export-{}-{name}", std::process::id()))
    }

    #[test]
    fn summary_has_one_row_per_available_metric() {
        let ds = sample_dataset();
        let rows: Vec<usize> = (0..ds.len()).collect();
        let view = FilteredView::new(&ds, &rows);

        let path = temp_path("summary.csv");
        write_data_summary(view, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        // header + CO2 + renewable
        assert_eq!(text.lines().count(), 3);
        assert!(text.contains("CO2 Emissions"));
        assert!(text.contains("Renewable Energy"));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn analysis_report_is_valid_json() {
        let ds = sample_dataset();
        let rows: Vec<usize> = (0..ds.len()).collect();
        let view = FilteredView::new(&ds, &rows);
        let selection = FilterSelection::full(&ds);

        let path = temp_path("report.json");
        write_analysis_report(view, &selection, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed["rows"], 3);
        assert_eq!(parsed["co2_by_year"].as_array().unwrap().len(), 3);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn policy_brief_carries_headline_numbers() {
        let ds = sample_dataset();
        let rows: Vec<usize> = (0..ds.len()).collect();
        let view = FilteredView::new(&ds, &rows);

        let path = temp_path("brief.md");
        write_policy_brief(view, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("Average CO2 emissions: 7.50"));
        assert!(text.contains("Key findings"));
        std::fs::remove_file(&path).ok();
    }
}
