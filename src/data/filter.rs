use std::collections::BTreeSet;

use super::model::ClimateDataset;

/// Reserved multiselect entry that disables country filtering.
pub const ALL_COUNTRIES: &str = "All";

// ---------------------------------------------------------------------------
// FilterSelection – the user-chosen predicates
// ---------------------------------------------------------------------------

/// The transient filter state driven by the sidebar widgets.
///
/// Country semantics follow the multiselect: the set holds country names plus
/// the reserved [`ALL_COUNTRIES`] marker. If the marker is present (the
/// default) or the set is empty, no country filtering is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSelection {
    /// Inclusive year bounds. Ignored when the dataset has no year column.
    pub year_min: i32,
    pub year_max: i32,
    pub countries: BTreeSet<String>,
}

impl FilterSelection {
    /// Selection covering the whole dataset: full year range, all countries.
    pub fn full(dataset: &ClimateDataset) -> Self {
        let (year_min, year_max) = dataset.year_range.unwrap_or((0, 0));
        let mut countries = BTreeSet::new();
        countries.insert(ALL_COUNTRIES.to_string());
        FilterSelection {
            year_min,
            year_max,
            countries,
        }
    }

    /// Whether the country predicate actually filters anything.
    pub fn country_filter_active(&self) -> bool {
        !self.countries.is_empty() && !self.countries.contains(ALL_COUNTRIES)
    }

    /// Clamp the year bounds to the dataset's observed range and keep
    /// `year_min <= year_max` after a slider edit.
    pub fn clamp_years(&mut self, dataset: &ClimateDataset) {
        if let Some((lo, hi)) = dataset.year_range {
            self.year_min = self.year_min.clamp(lo, hi);
            self.year_max = self.year_max.clamp(lo, hi);
        }
        if self.year_min > self.year_max {
            std::mem::swap(&mut self.year_min, &mut self.year_max);
        }
    }
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Return indices of rows that pass the current selection, in source order.
///
/// A row passes when:
/// * the dataset has no year column, or `year_min <= Year <= year_max`
///   (rows with a missing year are dropped while the year filter is active)
/// * the country filter is inactive, or the row's Country is a selected name
///   (exact membership, no prefix or fuzzy matching)
pub fn filtered_indices(dataset: &ClimateDataset, selection: &FilterSelection) -> Vec<usize> {
    let year_active = dataset.columns.has_year;
    let country_active = dataset.columns.has_country && selection.country_filter_active();

    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| {
            if year_active {
                match rec.year {
                    Some(y) if selection.year_min <= y && y <= selection.year_max => {}
                    _ => return false,
                }
            }
            if country_active {
                match &rec.country {
                    Some(c) if selection.countries.contains(c) => {}
                    _ => return false,
                }
            }
            true
        })
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Metric, Record};
    use std::collections::BTreeMap;

    fn row(country: &str, year: i32) -> Record {
        let mut values = BTreeMap::new();
        values.insert(Metric::Co2Emissions, 1.0);
        Record {
            country: Some(country.to_string()),
            year: Some(year),
            values,
        }
    }

    fn dataset() -> ClimateDataset {
        ClimateDataset::from_records(vec![
            row("Brazil", 2000),
            row("Kenya", 2001),
            row("Brazil", 2002),
            row("Japan", 2001),
        ])
    }

    #[test]
    fn full_selection_is_identity() {
        let ds = dataset();
        let sel = FilterSelection::full(&ds);
        assert_eq!(filtered_indices(&ds, &sel), vec![0, 1, 2, 3]);
    }

    #[test]
    fn year_bounds_are_inclusive_and_order_preserving() {
        let ds = dataset();
        let mut sel = FilterSelection::full(&ds);
        sel.year_min = 2001;
        sel.year_max = 2002;
        assert_eq!(filtered_indices(&ds, &sel), vec![1, 2, 3]);
    }

    #[test]
    fn country_membership_is_exact() {
        let ds = dataset();
        let mut sel = FilterSelection::full(&ds);
        sel.countries = ["Brazil".to_string()].into_iter().collect();
        assert_eq!(filtered_indices(&ds, &sel), vec![0, 2]);
    }

    #[test]
    fn all_marker_disables_country_filter() {
        let ds = dataset();
        let mut sel = FilterSelection::full(&ds);
        sel.countries = [ALL_COUNTRIES.to_string(), "Brazil".to_string()]
            .into_iter()
            .collect();
        assert_eq!(filtered_indices(&ds, &sel).len(), 4);
    }

    #[test]
    fn empty_country_set_disables_country_filter() {
        let ds = dataset();
        let mut sel = FilterSelection::full(&ds);
        sel.countries.clear();
        assert_eq!(filtered_indices(&ds, &sel).len(), 4);
    }

    #[test]
    fn filters_compose_as_and() {
        let ds = dataset();
        let mut sel = FilterSelection::full(&ds);
        sel.year_min = 2001;
        sel.year_max = 2001;
        sel.countries = ["Kenya".to_string()].into_iter().collect();
        assert_eq!(filtered_indices(&ds, &sel), vec![1]);
    }

    #[test]
    fn empty_result_is_not_an_error() {
        let ds = dataset();
        let mut sel = FilterSelection::full(&ds);
        sel.countries = ["Atlantis".to_string()].into_iter().collect();
        assert!(filtered_indices(&ds, &sel).is_empty());
    }

    #[test]
    fn missing_year_column_passes_everything_through() {
        let ds = ClimateDataset::from_records(vec![
            Record {
                country: Some("Brazil".to_string()),
                year: None,
                values: BTreeMap::new(),
            },
            Record {
                country: Some("Kenya".to_string()),
                year: None,
                values: BTreeMap::new(),
            },
        ]);
        let sel = FilterSelection::full(&ds);
        assert_eq!(filtered_indices(&ds, &sel).len(), 2);
    }

    #[test]
    fn clamp_years_repairs_inverted_bounds() {
        let ds = dataset();
        let mut sel = FilterSelection::full(&ds);
        sel.year_min = 2002;
        sel.year_max = 2000;
        sel.clamp_years(&ds);
        assert!(sel.year_min <= sel.year_max);
    }
}
