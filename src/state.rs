use std::collections::BTreeSet;

use crate::data::filter::{filtered_indices, FilterSelection, ALL_COUNTRIES};
use crate::data::loader::LoadError;
use crate::data::model::{ClimateDataset, FilteredView};

// ---------------------------------------------------------------------------
// Tabs
// ---------------------------------------------------------------------------

/// The five dashboard views. Only the active one computes its aggregates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Overview,
    TemperatureEmissions,
    RenewableEnergy,
    EnvironmentalFactors,
    PolicyInsights,
}

impl Tab {
    pub const ALL: [Tab; 5] = [
        Tab::Overview,
        Tab::TemperatureEmissions,
        Tab::RenewableEnergy,
        Tab::EnvironmentalFactors,
        Tab::PolicyInsights,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Overview => "Overview",
            Tab::TemperatureEmissions => "Temperature & Emissions",
            Tab::RenewableEnergy => "Renewable Energy",
            Tab::EnvironmentalFactors => "Environmental Factors",
            Tab::PolicyInsights => "Policy Insights",
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until a file loads successfully).
    pub dataset: Option<ClimateDataset>,

    /// Why the initial load failed, for the remediation panel.
    pub load_error: Option<LoadError>,

    /// Current year-range and country selection.
    pub selection: FilterSelection,

    /// Indices of rows passing the current selection (cached).
    pub visible_indices: Vec<usize>,

    /// Active dashboard tab.
    pub active_tab: Tab,

    /// Status / error message shown in the top bar.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        let mut countries = BTreeSet::new();
        countries.insert(ALL_COUNTRIES.to_string());
        Self {
            dataset: None,
            load_error: None,
            selection: FilterSelection {
                year_min: 0,
                year_max: 0,
                countries,
            },
            visible_indices: Vec::new(),
            active_tab: Tab::default(),
            status_message: None,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded dataset; reset the selection to cover it.
    pub fn set_dataset(&mut self, dataset: ClimateDataset) {
        self.selection = FilterSelection::full(&dataset);
        self.visible_indices = (0..dataset.len()).collect();
        self.dataset = Some(dataset);
        self.load_error = None;
        self.status_message = None;
    }

    /// Record a failed load; the UI degrades to the no-data panel.
    pub fn set_load_error(&mut self, error: LoadError) {
        self.load_error = Some(error);
    }

    /// Recompute `visible_indices` after a selection change.
    pub fn refilter(&mut self) {
        if let Some(ds) = &self.dataset {
            self.selection.clamp_years(ds);
            self.visible_indices = filtered_indices(ds, &self.selection);
        }
    }

    /// Borrow the current filtered view, when a dataset is loaded.
    pub fn view(&self) -> Option<FilteredView<'_>> {
        self.dataset
            .as_ref()
            .map(|ds| FilteredView::new(ds, &self.visible_indices))
    }

    /// Toggle one country in the multiselect. Selecting a concrete country
    /// drops the "All" marker; an empty result restores it.
    pub fn toggle_country(&mut self, country: &str) {
        if country == ALL_COUNTRIES {
            self.select_all_countries();
            return;
        }
        if self.selection.countries.contains(country) {
            self.selection.countries.remove(country);
        } else {
            self.selection.countries.remove(ALL_COUNTRIES);
            self.selection.countries.insert(country.to_string());
        }
        if self.selection.countries.is_empty() {
            self.selection.countries.insert(ALL_COUNTRIES.to_string());
        }
        self.refilter();
    }

    /// Reset the multiselect to the "All" marker.
    pub fn select_all_countries(&mut self) {
        self.selection.countries.clear();
        self.selection.countries.insert(ALL_COUNTRIES.to_string());
        self.refilter();
    }

    pub fn set_year_range(&mut self, min: i32, max: i32) {
        self.selection.year_min = min;
        self.selection.year_max = max;
        self.refilter();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Metric, Record};
    use std::collections::BTreeMap;

    fn dataset() -> ClimateDataset {
        let mut records = Vec::new();
        for (country, year) in [("Chile", 2000), ("Kenya", 2000), ("Chile", 2001)] {
            let mut values = BTreeMap::new();
            values.insert(Metric::Co2Emissions, 1.0);
            records.push(Record {
                country: Some(country.to_string()),
                year: Some(year),
                values,
            });
        }
        ClimateDataset::from_records(records)
    }

    #[test]
    fn set_dataset_selects_everything() {
        let mut state = AppState::default();
        state.set_dataset(dataset());
        assert_eq!(state.visible_indices, vec![0, 1, 2]);
        assert!(state.selection.countries.contains(ALL_COUNTRIES));
    }

    #[test]
    fn toggling_a_country_drops_the_all_marker() {
        let mut state = AppState::default();
        state.set_dataset(dataset());
        state.toggle_country("Chile");
        assert!(!state.selection.countries.contains(ALL_COUNTRIES));
        assert_eq!(state.visible_indices, vec![0, 2]);
    }

    #[test]
    fn deselecting_the_last_country_restores_all() {
        let mut state = AppState::default();
        state.set_dataset(dataset());
        state.toggle_country("Chile");
        state.toggle_country("Chile");
        assert!(state.selection.countries.contains(ALL_COUNTRIES));
        assert_eq!(state.visible_indices.len(), 3);
    }

    #[test]
    fn year_range_narrowing_refilters() {
        let mut state = AppState::default();
        state.set_dataset(dataset());
        state.set_year_range(2001, 2001);
        assert_eq!(state.visible_indices, vec![2]);
    }
}
