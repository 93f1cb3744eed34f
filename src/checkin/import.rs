//! CSV Import
//!
//! Loads check-in history from a CSV export. Expected header:
//!
//! ```text
//! date,mood,energy,libido,sleep,stress,body_temperature[,source][,symptom_time]
//! ```
//!
//! Rows are sorted by date and upserted: a later row for the same date
//! replaces an earlier one.

use super::types::{BodyTemperature, CheckIn, CheckInSource, SymptomTime};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::path::Path;

/// Errors that can occur while importing check-ins
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result of a CSV import operation
#[derive(Debug)]
pub struct ImportResult {
    /// Check-ins ordered oldest first, one per date
    pub check_ins: Vec<CheckIn>,
    pub rows_processed: usize,
    pub rows_failed: usize,
    pub errors: Vec<String>,
}

/// Column positions resolved from the header row
#[derive(Debug, Clone, Copy)]
struct Columns {
    date: usize,
    mood: usize,
    energy: usize,
    libido: usize,
    sleep: usize,
    stress: usize,
    body_temperature: usize,
    source: Option<usize>,
    symptom_time: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self, ImportError> {
        let find = |name: &str| {
            headers.iter().position(|h| {
                let h = h.trim().to_lowercase().replace([' ', '-'], "_");
                h == name || h.replace('_', "") == name.replace('_', "")
            })
        };
        let require =
            |name: &str| find(name).ok_or_else(|| ImportError::MissingColumn(name.to_string()));

        Ok(Self {
            date: require("date")?,
            mood: require("mood")?,
            energy: require("energy")?,
            libido: require("libido")?,
            sleep: require("sleep")?,
            stress: require("stress")?,
            body_temperature: require("body_temperature")?,
            source: find("source"),
            symptom_time: find("symptom_time"),
        })
    }
}

/// CSV importer for check-in history
pub struct CheckInImporter {
    /// Format string for parsing dates
    date_format: String,
}

impl Default for CheckInImporter {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckInImporter {
    /// Create a new importer with ISO dates
    pub fn new() -> Self {
        Self {
            date_format: "%Y-%m-%d".to_string(),
        }
    }

    /// Set the date format string
    pub fn with_date_format(mut self, format: &str) -> Self {
        self.date_format = format.to_string();
        self
    }

    /// Import check-ins from a CSV file
    pub fn import(&self, path: &Path) -> Result<ImportResult, ImportError> {
        let reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_path(path)?;
        self.read(reader)
    }

    /// Import from a CSV string (useful for testing)
    pub fn import_str(&self, csv_data: &str) -> Result<ImportResult, ImportError> {
        let reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(csv_data.as_bytes());
        self.read(reader)
    }

    fn read<R: std::io::Read>(
        &self,
        mut reader: csv::Reader<R>,
    ) -> Result<ImportResult, ImportError> {
        let columns = Columns::from_headers(reader.headers()?)?;

        let mut by_date: BTreeMap<NaiveDate, CheckIn> = BTreeMap::new();
        let mut rows_processed = 0;
        let mut rows_failed = 0;
        let mut errors = Vec::new();

        for (line_num, result) in reader.records().enumerate() {
            let actual_line = line_num + 2;

            let parsed = result
                .map_err(ImportError::from)
                .and_then(|record| self.parse_record(&record, &columns));

            match parsed {
                Ok(check_in) => {
                    if by_date.insert(check_in.date, check_in).is_some() {
                        tracing::debug!(
                            line = actual_line,
                            "Replaced earlier check-in for same date"
                        );
                    }
                    rows_processed += 1;
                }
                Err(e) => {
                    errors.push(format!("Line {}: {}", actual_line, e));
                    rows_failed += 1;
                }
            }
        }

        // Truncate errors if too many
        if errors.len() > 100 {
            let total = errors.len();
            errors.truncate(100);
            errors.push(format!("... and {} more errors", total - 100));
        }

        tracing::info!(
            rows_processed,
            rows_failed,
            check_ins = by_date.len(),
            "Imported check-ins"
        );

        Ok(ImportResult {
            check_ins: by_date.into_values().collect(),
            rows_processed,
            rows_failed,
            errors,
        })
    }

    fn parse_record(
        &self,
        record: &csv::StringRecord,
        columns: &Columns,
    ) -> Result<CheckIn, ImportError> {
        let field = |idx: usize, name: &str| {
            record
                .get(idx)
                .filter(|s| !s.is_empty())
                .ok_or_else(|| ImportError::ParseError(format!("missing {}", name)))
        };
        let rating = |idx: usize, name: &str| -> Result<u8, ImportError> {
            let raw = field(idx, name)?;
            raw.parse::<u8>()
                .map_err(|_| ImportError::ParseError(format!("invalid {} rating: {}", name, raw)))
        };

        let date_str = field(columns.date, "date")?;
        let date = NaiveDate::parse_from_str(date_str, &self.date_format)
            .map_err(|e| ImportError::ParseError(format!("invalid date {}: {}", date_str, e)))?;

        let body_temperature = field(columns.body_temperature, "body_temperature")?
            .parse::<BodyTemperature>()
            .map_err(ImportError::ParseError)?;

        let source = optional(record, columns.source)
            .map(|s| s.parse::<CheckInSource>().map_err(ImportError::ParseError))
            .transpose()?;

        let symptom_time = optional(record, columns.symptom_time)
            .map(|s| s.parse::<SymptomTime>().map_err(ImportError::ParseError))
            .transpose()?;

        Ok(CheckIn {
            date,
            mood: rating(columns.mood, "mood")?,
            energy: rating(columns.energy, "energy")?,
            libido: rating(columns.libido, "libido")?,
            sleep: rating(columns.sleep, "sleep")?,
            stress: rating(columns.stress, "stress")?,
            body_temperature,
            source,
            device_data: None,
            symptom_time,
        })
    }
}

fn optional(record: &csv::StringRecord, idx: Option<usize>) -> Option<&str> {
    idx.and_then(|i| record.get(i)).filter(|s| !s.is_empty())
}
