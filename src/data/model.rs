use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Metric – the numeric indicator columns we know about
// ---------------------------------------------------------------------------

/// Direction of a metric for colouring: does a higher value mean things are
/// getting worse (emissions) or better (renewable share)?
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    HigherIsWorse,
    HigherIsBetter,
    Neutral,
}

/// How the trailing-window delta for a metric is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeltaMode {
    /// Percent change between window means (ratio-like metrics).
    Percent,
    /// Absolute difference between window means (temperature, sea level).
    Absolute,
    /// Integer difference between window sums (event counts).
    Count,
}

/// A climate indicator column. The set is closed: unknown columns in a source
/// file are ignored at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Metric {
    Co2Emissions,
    RenewableEnergy,
    AvgTemperature,
    ForestArea,
    ExtremeWeather,
    SeaLevelRise,
    Rainfall,
    Population,
}

impl Metric {
    /// Every metric, in display order.
    pub const ALL: [Metric; 8] = [
        Metric::Co2Emissions,
        Metric::RenewableEnergy,
        Metric::AvgTemperature,
        Metric::ForestArea,
        Metric::ExtremeWeather,
        Metric::SeaLevelRise,
        Metric::Rainfall,
        Metric::Population,
    ];

    /// Whitelist for the environmental-factors correlation matrix.
    pub const ENVIRONMENTAL: [Metric; 5] = [
        Metric::ForestArea,
        Metric::Rainfall,
        Metric::ExtremeWeather,
        Metric::SeaLevelRise,
        Metric::AvgTemperature,
    ];

    /// Exact column header in the source table.
    pub fn column_name(self) -> &'static str {
        match self {
            Metric::Co2Emissions => "CO2 Emissions (Tons/Capita)",
            Metric::RenewableEnergy => "Renewable Energy (%)",
            Metric::AvgTemperature => "Average Temperature (°C)",
            Metric::ForestArea => "Forest Area (%)",
            Metric::ExtremeWeather => "Extreme Weather Events",
            Metric::SeaLevelRise => "Sea Level Rise (mm)",
            Metric::Rainfall => "Rainfall (mm)",
            Metric::Population => "Population",
        }
    }

    /// Short label for axes and metric cards.
    pub fn label(self) -> &'static str {
        match self {
            Metric::Co2Emissions => "CO2 Emissions",
            Metric::RenewableEnergy => "Renewable Energy",
            Metric::AvgTemperature => "Avg Temperature",
            Metric::ForestArea => "Forest Area",
            Metric::ExtremeWeather => "Extreme Weather Events",
            Metric::SeaLevelRise => "Sea Level Rise",
            Metric::Rainfall => "Rainfall",
            Metric::Population => "Population",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Metric::Co2Emissions => "tons/capita",
            Metric::RenewableEnergy => "%",
            Metric::AvgTemperature => "°C",
            Metric::ForestArea => "%",
            Metric::ExtremeWeather => "events",
            Metric::SeaLevelRise => "mm",
            Metric::Rainfall => "mm",
            Metric::Population => "people",
        }
    }

    pub fn intent(self) -> Intent {
        match self {
            Metric::Co2Emissions
            | Metric::ExtremeWeather
            | Metric::SeaLevelRise
            | Metric::AvgTemperature => Intent::HigherIsWorse,
            Metric::RenewableEnergy | Metric::ForestArea => Intent::HigherIsBetter,
            Metric::Rainfall | Metric::Population => Intent::Neutral,
        }
    }

    pub fn delta_mode(self) -> DeltaMode {
        match self {
            Metric::AvgTemperature | Metric::SeaLevelRise => DeltaMode::Absolute,
            Metric::ExtremeWeather => DeltaMode::Count,
            _ => DeltaMode::Percent,
        }
    }

    /// Reverse lookup from a source column header.
    pub fn from_column(name: &str) -> Option<Metric> {
        Metric::ALL.into_iter().find(|m| m.column_name() == name)
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Record – one (Country, Year) observation row
// ---------------------------------------------------------------------------

/// A single observation row of the source table.
#[derive(Debug, Clone)]
pub struct Record {
    pub country: Option<String>,
    pub year: Option<i32>,
    /// Metric values present on this row. Missing cells are simply absent.
    pub values: BTreeMap<Metric, f64>,
}

impl Record {
    pub fn value(&self, metric: Metric) -> Option<f64> {
        self.values.get(&metric).copied()
    }
}

// ---------------------------------------------------------------------------
// ColumnSet – which optional columns the loaded table actually has
// ---------------------------------------------------------------------------

/// Capability set computed once at load time. Widgets and aggregates consult
/// this instead of re-probing rows.
#[derive(Debug, Clone, Default)]
pub struct ColumnSet {
    pub has_year: bool,
    pub has_country: bool,
    /// Metrics with at least one value anywhere in the dataset.
    pub metrics: BTreeSet<Metric>,
}

impl ColumnSet {
    pub fn has(&self, metric: Metric) -> bool {
        self.metrics.contains(&metric)
    }

    pub fn has_all(&self, metrics: &[Metric]) -> bool {
        metrics.iter().all(|m| self.has(*m))
    }
}

// ---------------------------------------------------------------------------
// ClimateDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset, immutable after load.
#[derive(Debug, Clone)]
pub struct ClimateDataset {
    /// All rows in source order.
    pub records: Vec<Record>,
    /// Which optional columns are present.
    pub columns: ColumnSet,
    /// Observed (min, max) year, when a year column exists.
    pub year_range: Option<(i32, i32)>,
    /// Countries in order of first appearance (ranking tie-break order).
    pub countries: Vec<String>,
}

impl ClimateDataset {
    /// Build the column index and country order from loaded rows.
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut columns = ColumnSet::default();
        let mut year_range: Option<(i32, i32)> = None;
        let mut countries: Vec<String> = Vec::new();
        let mut seen: BTreeSet<String> = BTreeSet::new();

        for rec in &records {
            if let Some(year) = rec.year {
                columns.has_year = true;
                year_range = Some(match year_range {
                    Some((lo, hi)) => (lo.min(year), hi.max(year)),
                    None => (year, year),
                });
            }
            if let Some(country) = &rec.country {
                columns.has_country = true;
                if seen.insert(country.clone()) {
                    countries.push(country.clone());
                }
            }
            for metric in rec.values.keys() {
                columns.metrics.insert(*metric);
            }
        }

        ClimateDataset {
            records,
            columns,
            year_range,
            countries,
        }
    }

    /// Country names sorted alphabetically, for the multiselect widget.
    pub fn sorted_countries(&self) -> Vec<String> {
        let mut out = self.countries.clone();
        out.sort();
        out
    }

    /// First-appearance rank of a country, used as a stable tie-break.
    pub fn country_rank(&self, country: &str) -> usize {
        self.countries
            .iter()
            .position(|c| c == country)
            .unwrap_or(usize::MAX)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ---------------------------------------------------------------------------
// FilteredView – a borrowed subsequence of dataset rows
// ---------------------------------------------------------------------------

/// View over the rows passing the current filter selection. Cheap to copy;
/// the indices live in `AppState` and are rebuilt on every selection change.
#[derive(Debug, Clone, Copy)]
pub struct FilteredView<'a> {
    pub dataset: &'a ClimateDataset,
    pub rows: &'a [usize],
}

impl<'a> FilteredView<'a> {
    pub fn new(dataset: &'a ClimateDataset, rows: &'a [usize]) -> Self {
        FilteredView { dataset, rows }
    }

    pub fn records(self) -> impl Iterator<Item = &'a Record> {
        self.rows.iter().map(move |&i| &self.dataset.records[i])
    }

    /// Values of one metric, in row order, skipping missing cells.
    pub fn metric_values(self, metric: Metric) -> impl Iterator<Item = f64> + 'a {
        self.records().filter_map(move |r| r.value(metric))
    }

    pub fn len(self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(country: &str, year: i32, co2: f64) -> Record {
        let mut values = BTreeMap::new();
        values.insert(Metric::Co2Emissions, co2);
        Record {
            country: Some(country.to_string()),
            year: Some(year),
            values,
        }
    }

    #[test]
    fn column_set_tracks_presence() {
        let ds = ClimateDataset::from_records(vec![row("Chile", 2001, 4.2)]);
        assert!(ds.columns.has_year);
        assert!(ds.columns.has_country);
        assert!(ds.columns.has(Metric::Co2Emissions));
        assert!(!ds.columns.has(Metric::Rainfall));
    }

    #[test]
    fn countries_keep_first_appearance_order() {
        let ds = ClimateDataset::from_records(vec![
            row("Norway", 2000, 8.0),
            row("Chile", 2000, 4.0),
            row("Norway", 2001, 7.0),
        ]);
        assert_eq!(ds.countries, vec!["Norway", "Chile"]);
        assert_eq!(ds.country_rank("Chile"), 1);
        assert_eq!(ds.sorted_countries(), vec!["Chile", "Norway"]);
    }

    #[test]
    fn year_range_spans_observed_years() {
        let ds = ClimateDataset::from_records(vec![
            row("A", 2010, 1.0),
            row("B", 1995, 1.0),
            row("C", 2003, 1.0),
        ]);
        assert_eq!(ds.year_range, Some((1995, 2010)));
    }

    #[test]
    fn metric_column_round_trip() {
        for m in Metric::ALL {
            assert_eq!(Metric::from_column(m.column_name()), Some(m));
        }
        assert_eq!(Metric::from_column("Country"), None);
    }
}
