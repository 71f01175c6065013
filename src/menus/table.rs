//! Menu table ingestion
//!
//! Reads the source table (`restaurant_id, price, item_1, item_2, ...`, no header) and
//! hands well-formed [`MenuRow`]s to the repository. Malformed rows are logged and skipped.

use std::{fs, io, path::Path, str::FromStr};

use csv::{ReaderBuilder, StringRecord, Trim};
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, warn};

use crate::{items::ItemSet, menus::MenuRow};

/// Errors reading the menu table.
#[derive(Debug, Error)]
pub enum TableError {
    /// The path does not name a readable, non-empty `.csv` file.
    #[error("invalid input file: {0}")]
    InvalidInput(String),

    /// IO error while reading the table.
    #[error("failed to read menu table: {0}")]
    Io(#[from] io::Error),

    /// CSV reader error.
    #[error("failed to parse menu table: {0}")]
    Csv(#[from] csv::Error),

    /// The table contained no usable rows.
    #[error("menu table {0} contains no usable rows")]
    Empty(String),
}

/// Reasons a single record is skipped.
#[derive(Debug, Error, PartialEq)]
enum RowError {
    #[error("expected at least 3 fields, found {0}")]
    TooFewFields(usize),

    #[error("invalid restaurant id {0:?}")]
    InvalidId(String),

    #[error("invalid price {0:?}")]
    InvalidPrice(String),

    #[error("no item names")]
    NoItems,
}

/// Read and parse the menu table at `path`.
///
/// # Errors
///
/// - [`TableError::InvalidInput`]: the file is missing, empty or not a `.csv` file.
/// - [`TableError::Io`] / [`TableError::Csv`]: the file could not be read.
/// - [`TableError::Empty`]: no row in the file could be parsed.
pub fn read_table(path: impl AsRef<Path>) -> Result<Vec<MenuRow>, TableError> {
    let path = path.as_ref();

    check_file(path)?;

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_path(path)?;

    let mut rows = Vec::new();

    for record in reader.records() {
        let record = match record {
            Ok(record) => record,
            Err(error) if error.is_io_error() => return Err(error.into()),
            Err(error) => {
                warn!(%error, "skipping unreadable record");
                continue;
            }
        };

        let line = record.position().map_or(0, csv::Position::line);

        match parse_record(&record) {
            Ok(row) => rows.push(row),
            Err(error) => warn!(line, %error, "skipping malformed row"),
        }
    }

    if rows.is_empty() {
        return Err(TableError::Empty(path.display().to_string()));
    }

    debug!(path = %path.display(), rows = rows.len(), "menu table read");

    Ok(rows)
}

fn check_file(path: &Path) -> Result<(), TableError> {
    let invalid = || TableError::InvalidInput(path.display().to_string());

    let is_csv = path
        .extension()
        .is_some_and(|extension| extension.eq_ignore_ascii_case("csv"));

    if !is_csv {
        return Err(invalid());
    }

    match fs::metadata(path) {
        Ok(metadata) if metadata.is_file() && metadata.len() > 0 => Ok(()),
        Ok(_) => Err(invalid()),
        Err(error) if error.kind() == io::ErrorKind::NotFound => Err(invalid()),
        Err(error) => Err(error.into()),
    }
}

fn parse_record(record: &StringRecord) -> Result<MenuRow, RowError> {
    let (Some(id), Some(price)) = (record.get(0), record.get(1)) else {
        return Err(RowError::TooFewFields(record.len()));
    };

    if record.len() < 3 {
        return Err(RowError::TooFewFields(record.len()));
    }

    let restaurant_id = id
        .parse::<i64>()
        .map_err(|_parse| RowError::InvalidId(id.to_string()))?;

    let price = Decimal::from_str(price)
        .or_else(|_parse| Decimal::from_scientific(price))
        .map_err(|_parse| RowError::InvalidPrice(price.to_string()))?;

    let items = ItemSet::new(record.iter().skip(2));

    if items.is_empty() {
        return Err(RowError::NoItems);
    }

    Ok(MenuRow::new(restaurant_id, price, items))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::{Builder, NamedTempFile};
    use testresult::TestResult;

    use super::*;

    fn table(contents: &str) -> Result<NamedTempFile, io::Error> {
        let mut file = Builder::new().suffix(".csv").tempfile()?;
        file.write_all(contents.as_bytes())?;
        file.flush()?;

        Ok(file)
    }

    #[test]
    fn reads_singles_and_bundles() -> TestResult {
        let file = table("1, 4.00, burger\n6, 6.00, extreme_fajita, jalapeno_poppers, extra_salsa\n")?;

        let rows = read_table(file.path())?;

        assert_eq!(
            rows,
            vec![
                MenuRow::new(1, Decimal::new(400, 2), ItemSet::from_strs(&["burger"])),
                MenuRow::new(
                    6,
                    Decimal::new(600, 2),
                    ItemSet::from_strs(&["extra_salsa", "extreme_fajita", "jalapeno_poppers"])
                ),
            ]
        );

        Ok(())
    }

    #[test]
    fn normalises_item_names() -> TestResult {
        let file = table("2, 6.50,  Tofu_Log \n")?;

        let rows = read_table(file.path())?;

        assert_eq!(rows.first().map(|row| row.items.to_string()), Some("tofu_log".to_string()));

        Ok(())
    }

    #[test]
    fn skips_malformed_rows() -> TestResult {
        let file = table("1, 4.00\nx, 4.00, burger\n1, cheap, burger\n1, 2.00, ,\n3, 1.50, tea\n")?;

        let rows = read_table(file.path())?;

        assert_eq!(
            rows,
            vec![MenuRow::new(3, Decimal::new(150, 2), ItemSet::from_strs(&["tea"]))]
        );

        Ok(())
    }

    #[test]
    fn keeps_non_positive_rows_for_the_repository() -> TestResult {
        let file = table("0, 4.00, burger\n1, -2.00, burger\n")?;

        let rows = read_table(file.path())?;

        assert_eq!(rows.len(), 2);

        Ok(())
    }

    #[test]
    fn missing_file_is_invalid_input() {
        let result = read_table("/definitely/not/here.csv");

        assert!(matches!(result, Err(TableError::InvalidInput(_))));
    }

    #[test]
    fn wrong_extension_is_invalid_input() -> TestResult {
        let mut file = Builder::new().suffix(".txt").tempfile()?;
        file.write_all(b"1, 4.00, burger\n")?;

        let result = read_table(file.path());

        assert!(matches!(result, Err(TableError::InvalidInput(_))));

        Ok(())
    }

    #[test]
    fn empty_file_is_invalid_input() -> TestResult {
        let file = table("")?;

        let result = read_table(file.path());

        assert!(matches!(result, Err(TableError::InvalidInput(_))));

        Ok(())
    }

    #[test]
    fn table_without_usable_rows_is_empty() -> TestResult {
        let file = table("restaurant, price, item\n")?;

        let result = read_table(file.path());

        assert!(matches!(result, Err(TableError::Empty(_))));

        Ok(())
    }

    #[test]
    fn parse_record_reports_reason() {
        let record = StringRecord::from(vec!["1"]);

        assert_eq!(parse_record(&record), Err(RowError::TooFewFields(1)));
    }
}
