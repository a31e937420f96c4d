use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde_json::Value as JsonValue;
use thiserror::Error;

use super::model::{ClimateDataset, Metric, Record};

/// Default source table, produced by the upstream cleaning step.
pub const DEFAULT_DATA_PATH: &str = "climate_data_cleaned.csv";

const YEAR_COLUMN: &str = "Year";
const COUNTRY_COLUMN: &str = "Country";

// ---------------------------------------------------------------------------
// Error taxonomy
// ---------------------------------------------------------------------------

/// Load failures. `Unavailable` is the recoverable "no data yet" case the UI
/// answers with remediation guidance; everything else is a malformed source.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("data file not found: {0}")]
    Unavailable(PathBuf),
    #[error("unsupported file extension: .{0}")]
    Unsupported(String),
    #[error("reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("parsing JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("row {row}: {reason}")]
    Malformed { row: usize, reason: String },
    #[error("no recognised columns in {0}")]
    NoColumns(PathBuf),
}

impl LoadError {
    /// True for the missing-source case the UI treats as "upload instead".
    pub fn is_unavailable(&self) -> bool {
        matches!(self, LoadError::Unavailable(_))
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a climate dataset from a file. Dispatch by extension.
///
/// Supported formats:
/// * `.csv`  – header row with the canonical column names
/// * `.json` – records-oriented array: `[{ "Year": 2000, "Country": "...", ... }]`
pub fn load_file(path: &Path) -> Result<ClimateDataset, LoadError> {
    if !path.exists() {
        return Err(LoadError::Unavailable(path.to_path_buf()));
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        other => Err(LoadError::Unsupported(other.to_string())),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Column headers are matched exactly against the canonical names; unknown
/// columns are ignored. Blank or unparseable numeric cells become missing
/// values rather than errors, so a sparse table still loads.
fn load_csv(path: &Path) -> Result<ClimateDataset, LoadError> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let year_idx = headers.iter().position(|h| h == YEAR_COLUMN);
    let country_idx = headers.iter().position(|h| h == COUNTRY_COLUMN);
    let metric_cols: Vec<(usize, Metric)> = headers
        .iter()
        .enumerate()
        .filter_map(|(i, h)| Metric::from_column(h).map(|m| (i, m)))
        .collect();

    if year_idx.is_none() && country_idx.is_none() && metric_cols.is_empty() {
        return Err(LoadError::NoColumns(path.to_path_buf()));
    }

    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let row = result?;

        let year = year_idx
            .and_then(|i| row.get(i))
            .and_then(parse_year);
        let country = country_idx
            .and_then(|i| row.get(i))
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        let mut values = BTreeMap::new();
        for &(col, metric) in &metric_cols {
            if let Some(v) = row.get(col).and_then(parse_value) {
                values.insert(metric, v);
            }
        }

        // A row with nothing we recognise carries no information.
        if year.is_none() && country.is_none() && values.is_empty() {
            log::debug!("skipping empty row {row_no}");
            continue;
        }

        records.push(Record {
            country,
            year,
            values,
        });
    }

    Ok(ClimateDataset::from_records(records))
}

fn parse_year(s: &str) -> Option<i32> {
    let t = s.trim();
    if t.is_empty() {
        return None;
    }
    // Accept "2001" and "2001.0" (pandas float-formatted integers).
    t.parse::<i32>()
        .ok()
        .or_else(|| t.parse::<f64>().ok().map(|f| f as i32))
}

fn parse_value(s: &str) -> Option<f64> {
    let t = s.trim();
    if t.is_empty() {
        return None;
    }
    t.parse::<f64>().ok().filter(|v| v.is_finite())
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON (the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Year": 2000, "Country": "Chile", "CO2 Emissions (Tons/Capita)": 4.2 },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<ClimateDataset, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let root: JsonValue = serde_json::from_str(&text)?;

    let rows = root.as_array().ok_or_else(|| LoadError::Malformed {
        row: 0,
        reason: "expected a top-level JSON array".to_string(),
    })?;

    let mut records = Vec::with_capacity(rows.len());
    for (i, rec) in rows.iter().enumerate() {
        let obj = rec.as_object().ok_or_else(|| LoadError::Malformed {
            row: i,
            reason: "expected a JSON object".to_string(),
        })?;

        let year = obj.get(YEAR_COLUMN).and_then(|v| {
            v.as_i64()
                .map(|y| y as i32)
                .or_else(|| v.as_f64().map(|f| f as i32))
        });
        let country = obj
            .get(COUNTRY_COLUMN)
            .and_then(|v| v.as_str())
            .map(str::to_string);

        let mut values = BTreeMap::new();
        for (key, val) in obj {
            if let (Some(metric), Some(v)) = (Metric::from_column(key), val.as_f64()) {
                if v.is_finite() {
                    values.insert(metric, v);
                }
            }
        }

        records.push(Record {
            country,
            year,
            values,
        });
    }

    Ok(ClimateDataset::from_records(records))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_fixture(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("climascope-{}-{name}", std::process::id()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn missing_file_is_unavailable() {
        let err = load_file(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(err.is_unavailable());
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let path = write_fixture("bad.parquet", "not a table");
        let err = load_file(&path).unwrap_err();
        assert!(matches!(err, LoadError::Unsupported(_)));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn csv_blank_cells_become_missing_values() {
        let path = write_fixture(
            "sparse.csv",
            "Year,Country,CO2 Emissions (Tons/Capita),Rainfall (mm)\n\
             2000,Chile,4.5,\n\
             2001,Chile,,900.0\n",
        );
        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].value(Metric::Co2Emissions), Some(4.5));
        assert_eq!(ds.records[0].value(Metric::Rainfall), None);
        assert_eq!(ds.records[1].value(Metric::Co2Emissions), None);
        assert_eq!(ds.records[1].value(Metric::Rainfall), Some(900.0));
        assert!(ds.columns.has(Metric::Rainfall));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn csv_unknown_columns_are_ignored() {
        let path = write_fixture(
            "extra.csv",
            "Year,Country,Mystery,CO2 Emissions (Tons/Capita)\n2000,Kenya,zzz,1.1\n",
        );
        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.records[0].value(Metric::Co2Emissions), Some(1.1));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn csv_without_any_known_columns_fails() {
        let path = write_fixture("none.csv", "a,b\n1,2\n");
        let err = load_file(&path).unwrap_err();
        assert!(matches!(err, LoadError::NoColumns(_)));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn float_formatted_years_parse() {
        assert_eq!(parse_year("2001"), Some(2001));
        assert_eq!(parse_year("2001.0"), Some(2001));
        assert_eq!(parse_year(""), None);
        assert_eq!(parse_year("n/a"), None);
    }

    #[test]
    fn json_records_load() {
        let path = write_fixture(
            "rows.json",
            r#"[{"Year": 2000, "Country": "Chile", "Renewable Energy (%)": 41.5},
                {"Year": 2001, "Country": "Chile", "Renewable Energy (%)": 43.0}]"#,
        );
        let ds = load_file(&path).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.year_range, Some((2000, 2001)));
        assert_eq!(ds.records[1].value(Metric::RenewableEnergy), Some(43.0));
        std::fs::remove_file(&path).ok();
    }
}
