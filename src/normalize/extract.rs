//! Wide-format World Bank indicator parsing
//!
//! A World Bank "API_*.csv" export looks like:
//!
//! ```text
//! "Data Source","World Development Indicators",
//!
//! "Last Updated Date","2024-06-28",
//!
//! "Country Name","Country Code","Indicator Name","Indicator Code","1960","1961",...,
//! "India","IND","Official exchange rate (LCU per US$, period average)","PA.NUS.FCRF","7.50",...
//! ```
//!
//! The four leading lines are metadata (blank lines count). The extractor keeps
//! only rows for the tracked countries and the requested indicator.

use crate::currency::Country;
use crate::error::{GlobefinError, Result};
use csv::{ReaderBuilder, StringRecord};
use hashbrown::HashMap;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

/// Physical lines preceding the header row
pub const METADATA_LINES: usize = 4;

const COUNTRY_CODE_COLUMN: usize = 1;
const INDICATOR_CODE_COLUMN: usize = 3;
const FIRST_YEAR_COLUMN: usize = 4;

/// Per-country yearly values for one indicator.
///
/// A year that appears in the header but has no usable cell for a country is
/// stored as `None`, never as zero.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorTable {
    indicator: String,
    /// Year columns in header order
    years: Vec<i32>,
    series: HashMap<Country, BTreeMap<i32, Option<f64>>>,
}

impl IndicatorTable {
    /// Read and parse a raw export from disk
    pub fn from_path(path: &Path, indicator: &str) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => GlobefinError::MissingSource {
                path: path.to_path_buf(),
            },
            _ => GlobefinError::IoError(e),
        })?;

        let table = Self::parse(&text, indicator)?;
        log::debug!(
            "Extracted {} of {} tracked countries for {} from {}",
            table.series.len(),
            Country::ALL.len(),
            indicator,
            path.display()
        );
        Ok(table)
    }

    /// Parse the text of a raw export
    pub fn parse(text: &str, indicator: &str) -> Result<Self> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let body = skip_lines(text, METADATA_LINES);

        let mut rdr = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(body.as_bytes());

        let mut records = rdr.records();
        let header = match records.next() {
            Some(record) => record?,
            None => {
                return Err(GlobefinError::MalformedSource(format!(
                    "no header row after {} metadata lines",
                    METADATA_LINES
                )))
            }
        };

        let year_columns = year_columns(&header);
        let mut series = HashMap::new();

        for result in records {
            let record = result?;

            if record.len() < FIRST_YEAR_COLUMN {
                log::debug!("Skipping short row with {} columns", record.len());
                continue;
            }

            if &record[INDICATOR_CODE_COLUMN] != indicator {
                continue;
            }

            let Some(country) = Country::from_code(&record[COUNTRY_CODE_COLUMN]) else {
                continue;
            };

            let values: BTreeMap<i32, Option<f64>> = year_columns
                .iter()
                .map(|&(year, idx)| (year, parse_value(record.get(idx))))
                .collect();

            // Later rows for the same country replace earlier ones
            series.insert(country, values);
        }

        Ok(Self {
            indicator: indicator.to_string(),
            years: year_columns.into_iter().map(|(year, _)| year).collect(),
            series,
        })
    }

    /// Indicator code the table was filtered on
    pub fn indicator(&self) -> &str {
        &self.indicator
    }

    /// Year columns found in the header, in header order
    pub fn years(&self) -> &[i32] {
        &self.years
    }

    /// Year to value mapping for a country, if a row was found for it
    pub fn series(&self, country: Country) -> Option<&BTreeMap<i32, Option<f64>>> {
        self.series.get(&country)
    }

    /// Value for a country and year; `None` when absent or unparseable
    pub fn value(&self, country: Country, year: i32) -> Option<f64> {
        self.series(country)?.get(&year).copied().flatten()
    }

    /// Whether a row for the country was present
    pub fn has_country(&self, country: Country) -> bool {
        self.series.contains_key(&country)
    }
}

/// Drop the first `n` physical lines, blank ones included
fn skip_lines(text: &str, n: usize) -> &str {
    let mut rest = text;
    for _ in 0..n {
        match rest.find('\n') {
            Some(pos) => rest = &rest[pos + 1..],
            None => return "",
        }
    }
    rest
}

/// Header cells from the fifth column on that are plain integers, with their column index
fn year_columns(header: &StringRecord) -> Vec<(i32, usize)> {
    header
        .iter()
        .enumerate()
        .skip(FIRST_YEAR_COLUMN)
        .filter_map(|(idx, cell)| {
            let cell = cell.trim();
            if cell.is_empty() || !cell.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            cell.parse::<i32>().ok().map(|year| (year, idx))
        })
        .collect()
}

/// Best-effort numeric parse; anything unusable is missing
fn parse_value(cell: Option<&str>) -> Option<f64> {
    cell?
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\u{feff}\"Data Source\",\"World Development Indicators\",\n\
\n\
\"Last Updated Date\",\"2024-06-28\",\n\
\n\
\"Country Name\",\"Country Code\",\"Indicator Name\",\"Indicator Code\",\"1990\",\"1991\",\"1992\",\n\
\"Singapore\",\"SGP\",\"Official exchange rate\",\"PA.NUS.FCRF\",\"\",\"1.7276\",\"1.6290\",\n\
\"India\",\"IND\",\"Official exchange rate\",\"PA.NUS.FCRF\",\"17.504\",\"22.742\",\"25.918\",\n\
\"United States\",\"USA\",\"Official exchange rate\",\"PA.NUS.FCRF\",\"1\",\"1\",\"n/a\",\n\
\"Germany\",\"DEU\",\"Official exchange rate\",\"PA.NUS.FCRF\",\"1.6\",\"1.6\",\"1.5\",\n";

    #[test]
    fn test_parse_sample() {
        let table = IndicatorTable::parse(SAMPLE, "PA.NUS.FCRF").unwrap();

        assert_eq!(table.indicator(), "PA.NUS.FCRF");
        assert_eq!(table.years(), &[1990, 1991, 1992]);
        assert_eq!(table.value(Country::SGP, 1991), Some(1.7276));
        assert_eq!(table.value(Country::IND, 1990), Some(17.504));
        assert_eq!(table.value(Country::USA, 1991), Some(1.0));
    }

    #[test]
    fn test_unparseable_cells_are_missing_not_zero() {
        let table = IndicatorTable::parse(SAMPLE, "PA.NUS.FCRF").unwrap();

        let sgp = table.series(Country::SGP).unwrap();
        assert_eq!(sgp.get(&1990), Some(&None));

        let usa = table.series(Country::USA).unwrap();
        assert_eq!(usa.get(&1992), Some(&None));
    }

    #[test]
    fn test_trailing_empty_header_cell_is_not_a_year() {
        // Rows end with a trailing comma, giving one extra empty cell that is not a year
        let table = IndicatorTable::parse(SAMPLE, "PA.NUS.FCRF").unwrap();
        assert_eq!(table.years().len(), 3);
    }

    #[test]
    fn test_untracked_country_ignored() {
        let table = IndicatorTable::parse(SAMPLE, "PA.NUS.FCRF").unwrap();
        assert!(table.has_country(Country::SGP));
        assert!(table.has_country(Country::IND));
        assert!(table.has_country(Country::USA));
        assert_eq!(table.series.len(), 3);
    }

    #[test]
    fn test_indicator_must_match_exactly() {
        let table = IndicatorTable::parse(SAMPLE, "PA.NUS.FCR").unwrap();
        assert!(!table.has_country(Country::SGP));
        assert_eq!(table.years(), &[1990, 1991, 1992]);
    }

    #[test]
    fn test_last_duplicate_wins() {
        let text = format!(
            "{}\"Singapore\",\"SGP\",\"Official exchange rate\",\"PA.NUS.FCRF\",\"9\",\"9\",\"9\",\n",
            SAMPLE
        );
        let table = IndicatorTable::parse(&text, "PA.NUS.FCRF").unwrap();
        assert_eq!(table.value(Country::SGP, 1990), Some(9.0));
    }

    #[test]
    fn test_short_row_skipped() {
        let text = format!("{}\"SGP\",\"only\"\n", SAMPLE);
        let table = IndicatorTable::parse(&text, "PA.NUS.FCRF").unwrap();
        assert_eq!(table.value(Country::SGP, 1991), Some(1.7276));
    }

    #[test]
    fn test_row_shorter_than_header_marks_missing() {
        let text = "a\nb\nc\nd\n\
Country Name,Country Code,Indicator Name,Indicator Code,2000,2001\n\
India,IND,x,FP.CPI.TOTL.ZG,4.0\n";
        let table = IndicatorTable::parse(text, "FP.CPI.TOTL.ZG").unwrap();
        assert_eq!(table.value(Country::IND, 2000), Some(4.0));
        assert_eq!(table.series(Country::IND).unwrap().get(&2001), Some(&None));
    }

    #[test]
    fn test_non_year_header_cells_ignored() {
        let text = "a\nb\nc\nd\n\
Country Name,Country Code,Indicator Name,Indicator Code,2000,Notes,2001\n\
India,IND,x,FP.CPI.TOTL.ZG,4.0,see footnote,5.5\n";
        let table = IndicatorTable::parse(text, "FP.CPI.TOTL.ZG").unwrap();
        assert_eq!(table.years(), &[2000, 2001]);
        assert_eq!(table.value(Country::IND, 2001), Some(5.5));
    }

    #[test]
    fn test_non_finite_values_are_missing() {
        assert_eq!(parse_value(Some("NaN")), None);
        assert_eq!(parse_value(Some("inf")), None);
        assert_eq!(parse_value(Some(" 2.5 ")), Some(2.5));
        assert_eq!(parse_value(None), None);
    }

    #[test]
    fn test_missing_header_is_malformed() {
        let err = IndicatorTable::parse("one\ntwo\n", "PA.NUS.FCRF").unwrap_err();
        assert!(matches!(err, GlobefinError::MalformedSource(_)));
    }

    #[test]
    fn test_missing_file_is_missing_source() {
        let err = IndicatorTable::from_path(Path::new("/nonexistent/API.csv"), "PA.NUS.FCRF")
            .unwrap_err();
        assert!(matches!(err, GlobefinError::MissingSource { .. }));
    }
}
