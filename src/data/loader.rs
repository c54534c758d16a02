use crate::data::price::{PricePoint, PriceSeries};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use csv::ReaderBuilder;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct CsvRecord {
    #[serde(alias = "Date")]
    date: String,
    #[serde(alias = "Close")]
    close: f64,
}

//loads a daily close series from a csv file with date,close columns
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<PriceSeries> {
    let path = path.as_ref();
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .context(format!("Failed to open CSV file: {:?}", path))?;

    let mut points = Vec::new();

    for (index, result) in reader.deserialize().enumerate() {
        let record: CsvRecord =
            result.context(format!("Failed to parse CSV record at line {}", index + 2))?;

        //parse date
        let date = NaiveDate::parse_from_str(&record.date, "%Y-%m-%d").context(format!(
            "Failed to parse date '{}' at line {}",
            record.date,
            index + 2
        ))?;

        points.push(PricePoint::new(date, record.close));
    }

    //sort by date to ensure chronological order before validation
    points.sort_by(|a, b| a.date.cmp(&b.date));

    let series = PriceSeries::new(points)
        .context(format!("Invalid price series in CSV file: {:?}", path))?;

    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_and_sorts_csv() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "date,close").unwrap();
        writeln!(file, "2024-01-03,102.5").unwrap();
        writeln!(file, "2024-01-01,100.0").unwrap();
        writeln!(file, "2024-01-02,101.0").unwrap();

        let series = load_csv(file.path()).unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.closes(), vec![100.0, 101.0, 102.5]);
    }

    #[test]
    fn accepts_capitalized_headers() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Date,Close").unwrap();
        writeln!(file, "2024-01-01,100.0").unwrap();
        writeln!(file, "2024-01-02,101.0").unwrap();

        let series = load_csv(file.path()).unwrap();
        assert_eq!(series.len(), 2);
    }

    #[test]
    fn rejects_bad_date() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "date,close").unwrap();
        writeln!(file, "01/02/2024,100.0").unwrap();

        assert!(load_csv(file.path()).is_err());
    }

    #[test]
    fn rejects_empty_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "date,close").unwrap();

        assert!(load_csv(file.path()).is_err());
    }
}
