//! Aggregation engine: pure descriptive statistics over a [`FilteredView`].
//!
//! Every function returns `Option`/`None` instead of panicking or emitting
//! NaN when a statistic is undefined (empty view, missing column, too few
//! observations, zero variance). Callers render `None` as "unavailable".

use serde::Serialize;

use super::model::{DeltaMode, FilteredView, Metric};

/// Window size for the trailing-window delta on the overview cards.
const DELTA_WINDOW: usize = 100;

// ---------------------------------------------------------------------------
// Scalar summaries
// ---------------------------------------------------------------------------

/// Mean of a metric over the whole view. `None` on an empty view or when the
/// column has no values among the selected rows.
pub fn mean(view: FilteredView<'_>, metric: Metric) -> Option<f64> {
    let mut sum = 0.0;
    let mut n = 0usize;
    for v in view.metric_values(metric) {
        sum += v;
        n += 1;
    }
    if n == 0 {
        None
    } else {
        Some(sum / n as f64)
    }
}

/// Sum of a metric over the whole view. `None` when no values are present.
pub fn total(view: FilteredView<'_>, metric: Metric) -> Option<f64> {
    let mut sum = 0.0;
    let mut n = 0usize;
    for v in view.metric_values(metric) {
        sum += v;
        n += 1;
    }
    if n == 0 {
        None
    } else {
        Some(sum)
    }
}

// ---------------------------------------------------------------------------
// Trailing-window delta
// ---------------------------------------------------------------------------

/// Trend indicator on the overview cards, expressed per the metric's
/// [`DeltaMode`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Delta {
    /// Percent change between the first- and last-window means.
    Percent(f64),
    /// Absolute difference between the window means.
    Absolute(f64),
    /// Difference between the window sums, for event counts.
    Count(i64),
}

impl Delta {
    /// Signed magnitude, for colouring.
    pub fn signum(self) -> f64 {
        match self {
            Delta::Percent(v) | Delta::Absolute(v) => v.signum(),
            Delta::Count(v) => v.signum() as f64,
        }
    }
}

/// Change between the first W and last W rows of the view, W = min(100, rows).
///
/// The windows are taken by row position, not by year, and overlap when the
/// view holds fewer than 2W rows; both are deliberate, matching the source
/// dashboard's metric cards. Percent mode is `None` when the first-window
/// mean is zero.
pub fn trailing_delta(view: FilteredView<'_>, metric: Metric) -> Option<Delta> {
    if view.is_empty() {
        return None;
    }
    let w = view.len().min(DELTA_WINDOW);
    let first = FilteredView::new(view.dataset, &view.rows[..w]);
    let last = FilteredView::new(view.dataset, &view.rows[view.len() - w..]);

    match metric.delta_mode() {
        DeltaMode::Percent => {
            let first_mean = mean(first, metric)?;
            let last_mean = mean(last, metric)?;
            if first_mean == 0.0 {
                None
            } else {
                Some(Delta::Percent((last_mean - first_mean) / first_mean * 100.0))
            }
        }
        DeltaMode::Absolute => {
            let first_mean = mean(first, metric)?;
            let last_mean = mean(last, metric)?;
            Some(Delta::Absolute(last_mean - first_mean))
        }
        DeltaMode::Count => {
            let first_sum = total(first, metric)?;
            let last_sum = total(last, metric)?;
            Some(Delta::Count((last_sum - first_sum).round() as i64))
        }
    }
}

// ---------------------------------------------------------------------------
// Group-by-Year
// ---------------------------------------------------------------------------

/// Per-year statistic bundle for one metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearStat {
    pub year: i32,
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation; `None` when fewer than 2 observations.
    pub std: Option<f64>,
    pub min: f64,
    pub max: f64,
    pub sum: f64,
}

/// Mean/std/min/max/sum of a metric per distinct year, ordered by year.
/// Years with no contributing rows are absent from the output.
pub fn year_series(view: FilteredView<'_>, metric: Metric) -> Vec<YearStat> {
    use std::collections::BTreeMap;

    let mut groups: BTreeMap<i32, Vec<f64>> = BTreeMap::new();
    for rec in view.records() {
        if let (Some(year), Some(v)) = (rec.year, rec.value(metric)) {
            groups.entry(year).or_default().push(v);
        }
    }

    groups
        .into_iter()
        .map(|(year, vals)| {
            let count = vals.len();
            let sum: f64 = vals.iter().sum();
            let mean = sum / count as f64;
            let std = if count < 2 {
                None
            } else {
                let ss: f64 = vals.iter().map(|v| (v - mean).powi(2)).sum();
                Some((ss / (count - 1) as f64).sqrt())
            };
            let min = vals.iter().copied().fold(f64::INFINITY, f64::min);
            let max = vals.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            YearStat {
                year,
                count,
                mean,
                std,
                min,
                max,
                sum,
            }
        })
        .collect()
}

/// Year-over-year percent change over a year-ordered mean series. The first
/// entry has no prior value; entries following a zero are `None`.
pub fn percent_change(series: &[(i32, f64)]) -> Vec<(i32, Option<f64>)> {
    series
        .iter()
        .enumerate()
        .map(|(i, &(year, v))| {
            if i == 0 {
                (year, None)
            } else {
                let prev = series[i - 1].1;
                if prev == 0.0 {
                    (year, None)
                } else {
                    (year, Some((v - prev) / prev * 100.0))
                }
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Group-by-Country
// ---------------------------------------------------------------------------

/// Mean of a metric per country, ranked descending. Ties keep the countries'
/// first-appearance order in the dataset (stable sort).
pub fn country_means(view: FilteredView<'_>, metric: Metric) -> Vec<(String, f64)> {
    use std::collections::BTreeMap;

    let mut groups: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for rec in view.records() {
        if let (Some(country), Some(v)) = (rec.country.as_deref(), rec.value(metric)) {
            let entry = groups.entry(country).or_insert((0.0, 0));
            entry.0 += v;
            entry.1 += 1;
        }
    }

    let mut ranked: Vec<(String, f64)> = groups
        .into_iter()
        .map(|(country, (sum, n))| (country.to_string(), sum / n as f64))
        .collect();
    let dataset = view.dataset;
    ranked.sort_by(|a, b| {
        b.1.total_cmp(&a.1)
            .then_with(|| dataset.country_rank(&a.0).cmp(&dataset.country_rank(&b.0)))
    });
    ranked
}

/// The top K entries of [`country_means`]; length = min(k, distinct countries).
pub fn top_k(view: FilteredView<'_>, metric: Metric, k: usize) -> Vec<(String, f64)> {
    let mut ranked = country_means(view, metric);
    ranked.truncate(k);
    ranked
}

// ---------------------------------------------------------------------------
// Correlation
// ---------------------------------------------------------------------------

/// Pearson correlation between two metrics over pairwise-complete rows.
/// `None` when fewer than 2 complete pairs exist or either side has zero
/// variance.
pub fn pearson(view: FilteredView<'_>, a: Metric, b: Metric) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = view
        .records()
        .filter_map(|r| Some((r.value(a)?, r.value(b)?)))
        .collect();
    if pairs.len() < 2 {
        return None;
    }

    let n = pairs.len() as f64;
    let mean_a = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_b = pairs.iter().map(|p| p.1).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_a = 0.0;
    let mut var_b = 0.0;
    for (x, y) in &pairs {
        let dx = x - mean_a;
        let dy = y - mean_b;
        cov += dx * dy;
        var_a += dx * dx;
        var_b += dy * dy;
    }
    if var_a == 0.0 || var_b == 0.0 {
        return None;
    }
    Some(cov / (var_a.sqrt() * var_b.sqrt()))
}

/// Least-squares fit `y = slope * x + intercept` over pairwise-complete rows,
/// backing the scatter-plot trendlines. `None` when fewer than 2 pairs or the
/// x values have zero variance.
pub fn linear_fit(view: FilteredView<'_>, x: Metric, y: Metric) -> Option<(f64, f64)> {
    let pairs: Vec<(f64, f64)> = view
        .records()
        .filter_map(|r| Some((r.value(x)?, r.value(y)?)))
        .collect();
    if pairs.len() < 2 {
        return None;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / n;
    let mut sxx = 0.0;
    let mut sxy = 0.0;
    for (px, py) in &pairs {
        sxx += (px - mean_x) * (px - mean_x);
        sxy += (px - mean_x) * (py - mean_y);
    }
    if sxx == 0.0 {
        return None;
    }
    let slope = sxy / sxx;
    Some((slope, mean_y - slope * mean_x))
}

/// Symmetric correlation matrix over a metric whitelist, restricted to the
/// columns actually present in the view's dataset.
#[derive(Debug, Clone, Serialize)]
pub struct CorrelationMatrix {
    pub metrics: Vec<Metric>,
    /// Row-major cells; `cells[i][j]` is the correlation of metrics i and j.
    pub cells: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        self.cells[i][j]
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.len() < 2
    }
}

/// Pairwise correlations for every unordered pair among `whitelist ∩ present
/// columns`. The diagonal is assigned 1.0 by definition.
pub fn correlation_matrix(view: FilteredView<'_>, whitelist: &[Metric]) -> CorrelationMatrix {
    let metrics: Vec<Metric> = whitelist
        .iter()
        .copied()
        .filter(|m| view.dataset.columns.has(*m))
        .collect();

    let n = metrics.len();
    let mut cells = vec![vec![None; n]; n];
    for i in 0..n {
        cells[i][i] = Some(1.0);
        for j in (i + 1)..n {
            let r = pearson(view, metrics[i], metrics[j]);
            cells[i][j] = r;
            cells[j][i] = r;
        }
    }
    CorrelationMatrix { metrics, cells }
}

// ---------------------------------------------------------------------------
// Describe (summary-statistics table, exports)
// ---------------------------------------------------------------------------

/// Count/mean/std/min/max/range bundle for the summary table and exports.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Describe {
    pub count: usize,
    pub mean: f64,
    pub std: Option<f64>,
    pub min: f64,
    pub max: f64,
    pub range: f64,
}

/// Describe one metric over the view. `None` when no values are present.
pub fn describe(view: FilteredView<'_>, metric: Metric) -> Option<Describe> {
    let vals: Vec<f64> = view.metric_values(metric).collect();
    if vals.is_empty() {
        return None;
    }
    let count = vals.len();
    let mean = vals.iter().sum::<f64>() / count as f64;
    let std = if count < 2 {
        None
    } else {
        let ss: f64 = vals.iter().map(|v| (v - mean).powi(2)).sum();
        Some((ss / (count - 1) as f64).sqrt())
    };
    let min = vals.iter().copied().fold(f64::INFINITY, f64::min);
    let max = vals.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    Some(Describe {
        count,
        mean,
        std,
        min,
        max,
        range: max - min,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{ClimateDataset, Record};
    use std::collections::BTreeMap;

    const TOL: f64 = 1e-9;

    fn row(country: &str, year: i32, values: &[(Metric, f64)]) -> Record {
        Record {
            country: Some(country.to_string()),
            year: Some(year),
            values: values.iter().copied().collect::<BTreeMap<_, _>>(),
        }
    }

    fn view_of(dataset: &ClimateDataset) -> (Vec<usize>, &ClimateDataset) {
        ((0..dataset.len()).collect(), dataset)
    }

    #[test]
    fn mean_groups_by_year() {
        let ds = ClimateDataset::from_records(vec![
            row("A", 2000, &[(Metric::Co2Emissions, 10.0)]),
            row("B", 2000, &[(Metric::Co2Emissions, 20.0)]),
            row("A", 2001, &[(Metric::Co2Emissions, 12.0)]),
        ]);
        let (rows, ds_ref) = view_of(&ds);
        let series = year_series(FilteredView::new(ds_ref, &rows), Metric::Co2Emissions);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].year, 2000);
        assert!((series[0].mean - 15.0).abs() < TOL);
        assert_eq!(series[1].year, 2001);
        assert!((series[1].mean - 12.0).abs() < TOL);
    }

    #[test]
    fn year_series_on_empty_view_is_empty() {
        let ds = ClimateDataset::from_records(vec![]);
        let rows: Vec<usize> = vec![];
        assert!(year_series(FilteredView::new(&ds, &rows), Metric::Rainfall).is_empty());
    }

    #[test]
    fn scalar_summary_unavailable_on_empty_view() {
        let ds = ClimateDataset::from_records(vec![]);
        let rows: Vec<usize> = vec![];
        let view = FilteredView::new(&ds, &rows);
        assert_eq!(mean(view, Metric::Co2Emissions), None);
        assert_eq!(total(view, Metric::Co2Emissions), None);
        assert_eq!(trailing_delta(view, Metric::Co2Emissions), None);
        assert_eq!(describe(view, Metric::Co2Emissions), None);
    }

    #[test]
    fn exact_negative_linear_relationship() {
        let ds = ClimateDataset::from_records(vec![
            row("A", 2000, &[(Metric::RenewableEnergy, 10.0), (Metric::Co2Emissions, 8.0)]),
            row("A", 2001, &[(Metric::RenewableEnergy, 20.0), (Metric::Co2Emissions, 6.0)]),
            row("A", 2002, &[(Metric::RenewableEnergy, 30.0), (Metric::Co2Emissions, 4.0)]),
        ]);
        let (rows, ds_ref) = view_of(&ds);
        let view = FilteredView::new(ds_ref, &rows);
        let r = pearson(view, Metric::RenewableEnergy, Metric::Co2Emissions).unwrap();
        assert!((r + 1.0).abs() < TOL);
    }

    #[test]
    fn correlation_is_symmetric_and_self_is_one() {
        let ds = ClimateDataset::from_records(vec![
            row("A", 2000, &[(Metric::Rainfall, 100.0), (Metric::ForestArea, 30.0)]),
            row("A", 2001, &[(Metric::Rainfall, 120.0), (Metric::ForestArea, 28.0)]),
            row("A", 2002, &[(Metric::Rainfall, 90.0), (Metric::ForestArea, 33.0)]),
        ]);
        let (rows, ds_ref) = view_of(&ds);
        let view = FilteredView::new(ds_ref, &rows);
        let ab = pearson(view, Metric::Rainfall, Metric::ForestArea).unwrap();
        let ba = pearson(view, Metric::ForestArea, Metric::Rainfall).unwrap();
        assert!((ab - ba).abs() < TOL);
        let self_r = pearson(view, Metric::Rainfall, Metric::Rainfall).unwrap();
        assert!((self_r - 1.0).abs() < TOL);
    }

    #[test]
    fn correlation_rejects_zero_variance_and_short_views() {
        let ds = ClimateDataset::from_records(vec![
            row("A", 2000, &[(Metric::Rainfall, 5.0), (Metric::ForestArea, 30.0)]),
            row("A", 2001, &[(Metric::Rainfall, 5.0), (Metric::ForestArea, 28.0)]),
        ]);
        let (rows, ds_ref) = view_of(&ds);
        let view = FilteredView::new(ds_ref, &rows);
        assert_eq!(pearson(view, Metric::Rainfall, Metric::ForestArea), None);

        let one = &rows[..1];
        assert_eq!(
            pearson(FilteredView::new(ds_ref, one), Metric::Rainfall, Metric::ForestArea),
            None
        );
    }

    #[test]
    fn correlation_uses_pairwise_complete_rows_only() {
        let ds = ClimateDataset::from_records(vec![
            row("A", 2000, &[(Metric::Rainfall, 1.0), (Metric::ForestArea, 2.0)]),
            row("A", 2001, &[(Metric::Rainfall, 50.0)]), // forest missing, excluded
            row("A", 2002, &[(Metric::Rainfall, 2.0), (Metric::ForestArea, 4.0)]),
            row("A", 2003, &[(Metric::Rainfall, 3.0), (Metric::ForestArea, 6.0)]),
        ]);
        let (rows, ds_ref) = view_of(&ds);
        let r = pearson(
            FilteredView::new(ds_ref, &rows),
            Metric::Rainfall,
            Metric::ForestArea,
        )
        .unwrap();
        assert!((r - 1.0).abs() < TOL);
    }

    #[test]
    fn matrix_skips_absent_metrics_and_stays_symmetric() {
        // No Forest Area column at all.
        let ds = ClimateDataset::from_records(vec![
            row("A", 2000, &[(Metric::Rainfall, 1.0), (Metric::AvgTemperature, 14.0)]),
            row("A", 2001, &[(Metric::Rainfall, 2.0), (Metric::AvgTemperature, 14.5)]),
            row("A", 2002, &[(Metric::Rainfall, 3.0), (Metric::AvgTemperature, 15.1)]),
        ]);
        let (rows, ds_ref) = view_of(&ds);
        let m = correlation_matrix(FilteredView::new(ds_ref, &rows), &Metric::ENVIRONMENTAL);
        assert!(!m.metrics.contains(&Metric::ForestArea));
        let n = m.metrics.len();
        for i in 0..n {
            assert_eq!(m.get(i, i), Some(1.0));
            for j in 0..n {
                assert_eq!(m.get(i, j), m.get(j, i));
            }
        }
    }

    #[test]
    fn percent_change_series_semantics() {
        let series = vec![(2000, 10.0), (2001, 12.0), (2002, 0.0), (2003, 5.0)];
        let changes = percent_change(&series);
        assert_eq!(changes[0], (2000, None));
        assert!((changes[1].1.unwrap() - 20.0).abs() < TOL);
        assert!((changes[2].1.unwrap() + 100.0).abs() < TOL);
        // prior value zero → unavailable
        assert_eq!(changes[3], (2003, None));
    }

    #[test]
    fn top_k_is_descending_with_stable_ties() {
        let ds = ClimateDataset::from_records(vec![
            row("Norway", 2000, &[(Metric::RenewableEnergy, 60.0)]),
            row("Chile", 2000, &[(Metric::RenewableEnergy, 60.0)]),
            row("Kenya", 2000, &[(Metric::RenewableEnergy, 80.0)]),
        ]);
        let (rows, ds_ref) = view_of(&ds);
        let view = FilteredView::new(ds_ref, &rows);
        let top = top_k(view, Metric::RenewableEnergy, 10);
        assert_eq!(top.len(), 3);
        assert_eq!(top[0].0, "Kenya");
        // tie: Norway appeared before Chile in the dataset
        assert_eq!(top[1].0, "Norway");
        assert_eq!(top[2].0, "Chile");

        assert_eq!(top_k(view, Metric::RenewableEnergy, 2).len(), 2);
    }

    #[test]
    fn trailing_delta_modes() {
        let ds = ClimateDataset::from_records(vec![
            row("A", 2000, &[(Metric::Co2Emissions, 10.0), (Metric::AvgTemperature, 14.0), (Metric::ExtremeWeather, 3.0)]),
            row("A", 2023, &[(Metric::Co2Emissions, 15.0), (Metric::AvgTemperature, 15.5), (Metric::ExtremeWeather, 7.0)]),
        ]);
        let (rows, ds_ref) = view_of(&ds);
        let view = FilteredView::new(ds_ref, &rows);

        // len < 2W: both windows cover both rows → delta 0 in every mode
        match trailing_delta(view, Metric::Co2Emissions).unwrap() {
            Delta::Percent(p) => assert!(p.abs() < TOL),
            other => panic!("expected percent delta, got {other:?}"),
        }
        match trailing_delta(view, Metric::AvgTemperature).unwrap() {
            Delta::Absolute(d) => assert!(d.abs() < TOL),
            other => panic!("expected absolute delta, got {other:?}"),
        }
        match trailing_delta(view, Metric::ExtremeWeather).unwrap() {
            Delta::Count(c) => assert_eq!(c, 0),
            other => panic!("expected count delta, got {other:?}"),
        }

    }

    #[test]
    fn percent_delta_unavailable_on_zero_baseline() {
        let ds = ClimateDataset::from_records(vec![row(
            "A",
            2000,
            &[(Metric::Co2Emissions, 0.0)],
        )]);
        let rows: Vec<usize> = vec![0];
        assert_eq!(
            trailing_delta(FilteredView::new(&ds, &rows), Metric::Co2Emissions),
            None
        );
    }

    #[test]
    fn linear_fit_recovers_exact_line() {
        let ds = ClimateDataset::from_records(vec![
            row("A", 2000, &[(Metric::AvgTemperature, 1.0), (Metric::SeaLevelRise, 5.0)]),
            row("A", 2001, &[(Metric::AvgTemperature, 2.0), (Metric::SeaLevelRise, 7.0)]),
            row("A", 2002, &[(Metric::AvgTemperature, 3.0), (Metric::SeaLevelRise, 9.0)]),
        ]);
        let (rows, ds_ref) = view_of(&ds);
        let (slope, intercept) = linear_fit(
            FilteredView::new(ds_ref, &rows),
            Metric::AvgTemperature,
            Metric::SeaLevelRise,
        )
        .unwrap();
        assert!((slope - 2.0).abs() < TOL);
        assert!((intercept - 3.0).abs() < TOL);
    }

    #[test]
    fn describe_matches_hand_computation() {
        let ds = ClimateDataset::from_records(vec![
            row("A", 2000, &[(Metric::Rainfall, 1.0)]),
            row("A", 2001, &[(Metric::Rainfall, 2.0)]),
            row("A", 2002, &[(Metric::Rainfall, 3.0)]),
            row("A", 2003, &[(Metric::Rainfall, 4.0)]),
        ]);
        let (rows, ds_ref) = view_of(&ds);
        let d = describe(FilteredView::new(ds_ref, &rows), Metric::Rainfall).unwrap();
        assert_eq!(d.count, 4);
        assert!((d.mean - 2.5).abs() < TOL);
        // sample std of 1..4
        assert!((d.std.unwrap() - 1.2909944487358056).abs() < TOL);
        assert!((d.range - 3.0).abs() < TOL);
    }

    #[test]
    fn year_series_std_none_for_single_observation() {
        let ds = ClimateDataset::from_records(vec![
            row("A", 2000, &[(Metric::Co2Emissions, 10.0)]),
            row("A", 2001, &[(Metric::Co2Emissions, 12.0)]),
            row("B", 2001, &[(Metric::Co2Emissions, 14.0)]),
        ]);
        let (rows, ds_ref) = view_of(&ds);
        let series = year_series(FilteredView::new(ds_ref, &rows), Metric::Co2Emissions);
        assert_eq!(series[0].std, None);
        assert!(series[1].std.is_some());
    }
}
