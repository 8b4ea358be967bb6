//! CSV loaders for the neighbourhood datasets.
//!
//! Every loader skips the header row and maps columns by position, so the
//! header text itself is never inspected.

use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord, Trim};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::path::Path;
use tracing::debug;

use crate::records::{HypertensionRecord, LowIncomeRecord};
use crate::sequence::Point;

/// Loads the hypertension dataset at `path`, preserving row order.
///
/// Columns: name, then the eight counts in [`HypertensionRecord`] field order.
///
/// # Errors
///
/// Fails if the file cannot be opened or any row fails to parse. The error
/// names the file and the offending line.
#[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn load_hypertension_data(path: impl AsRef<Path>) -> Result<Vec<HypertensionRecord>> {
    load_rows(path.as_ref(), "hypertension")
}

/// Loads the low income dataset at `path`, preserving row order.
///
/// Columns: name, population total, low income count.
#[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn load_low_income_data(path: impl AsRef<Path>) -> Result<Vec<LowIncomeRecord>> {
    let rows: Vec<(String, u32, u32)> = load_rows(path.as_ref(), "low income")?;

    Ok(rows
        .into_iter()
        .map(|(name, population_total, num_low_income)| LowIncomeRecord {
            name,
            num_low_income,
            population_total,
        })
        .collect())
}

/// Loads a point sequence saved as `x,y` rows, preserving row order.
#[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn load_points(path: impl AsRef<Path>) -> Result<Vec<Point>> {
    let rows: Vec<(i32, i32)> = load_rows(path.as_ref(), "points")?;
    Ok(rows.into_iter().map(Point::from).collect())
}

fn load_rows<T: DeserializeOwned>(path: &Path, kind: &str) -> Result<Vec<T>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open {kind} CSV file: {}", path.display()))?;

    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(file);

    let mut rows = Vec::new();
    let mut record = StringRecord::new();

    loop {
        let more = rdr
            .read_record(&mut record)
            .with_context(|| format!("Failed to read {kind} CSV file: {}", path.display()))?;
        if !more {
            break;
        }

        let line = record.position().map(|p| p.line()).unwrap_or_default();
        let row: T = record.deserialize(None).with_context(|| {
            format!(
                "Malformed {kind} row at line {line} of {}: {:?}",
                path.display(),
                record.iter().collect::<Vec<_>>()
            )
        })?;
        rows.push(row);
    }

    debug!(kind, rows = rows.len(), "Loaded CSV rows");
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    fn temp_csv(name: &str, content: &str) -> String {
        let path = format!("{}/{}", env::temp_dir().display(), name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_hypertension_preserves_order() {
        let path = temp_csv(
            "neighbourhood_patterns_loader_order.csv",
            "Name,H20+,P20+,H20-44,P20-44,H45-64,P45-64,H65+,P65+\n\
             Beta,10,100,1,40,4,40,5,20\n\
             Alpha,20,200,2,80,8,80,10,40\n",
        );

        let data = load_hypertension_data(&path).unwrap();

        assert_eq!(data.len(), 2);
        assert_eq!(data[0].name, "Beta");
        assert_eq!(data[1].name, "Alpha");
        assert_eq!(data[1].num_hypertension_all, 20);
        assert_eq!(data[1].num_65_plus, 40);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_low_income_maps_columns_by_position() {
        let path = temp_csv(
            "neighbourhood_patterns_loader_low_income.csv",
            "Neighbourhood,Total,Low income\nAlpha, 1000 , 250\n",
        );

        let data = load_low_income_data(&path).unwrap();

        assert_eq!(
            data,
            vec![LowIncomeRecord {
                name: "Alpha".into(),
                num_low_income: 250,
                population_total: 1000,
            }]
        );

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_malformed_row_names_line() {
        let path = temp_csv(
            "neighbourhood_patterns_loader_bad.csv",
            "Neighbourhood,Total,Low income\nAlpha,1000,250\nBeta,lots,3\n",
        );

        let err = load_low_income_data(&path).unwrap_err();
        assert!(format!("{err:#}").contains("line 3"));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_malformed_hypertension_row_names_line() {
        let path = temp_csv(
            "neighbourhood_patterns_loader_bad_hypertension.csv",
            "Name,H20+,P20+,H20-44,P20-44,H45-64,P45-64,H65+,P65+\n\
             Beta,10,100,1,40,4,40,5,20\n\
             Gamma,10,100,1,forty,4,40,5,20\n",
        );

        let err = load_hypertension_data(&path).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("hypertension row at line 3"));
        assert!(message.contains("Gamma"));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_points_trims_fields() {
        let path = temp_csv(
            "neighbourhood_patterns_loader_points.csv",
            "x, y\n200, 200\n 105,205 \n-3,7\n",
        );

        let points = load_points(&path).unwrap();

        assert_eq!(
            points,
            vec![
                Point::new(200, 200),
                Point::new(105, 205),
                Point::new(-3, 7),
            ]
        );

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_malformed_point_names_line() {
        let path = temp_csv(
            "neighbourhood_patterns_loader_bad_points.csv",
            "x,y\n200,200\n105,high\n",
        );

        let err = load_points(&path).unwrap_err();
        assert!(format!("{err:#}").contains("points row at line 3"));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_points_file_names_path() {
        let err = load_points("/definitely/not/points.csv").unwrap_err();
        assert!(format!("{err:#}").contains("/definitely/not/points.csv"));
    }

    #[test]
    fn test_negative_count_is_rejected() {
        let path = temp_csv(
            "neighbourhood_patterns_loader_negative.csv",
            "Neighbourhood,Total,Low income\nAlpha,-5,0\n",
        );

        assert!(load_low_income_data(&path).is_err());

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = load_hypertension_data("/definitely/not/here.csv");
        assert!(result.is_err());
    }

    #[test]
    fn test_header_only_file_is_empty() {
        let path = temp_csv(
            "neighbourhood_patterns_loader_header_only.csv",
            "Neighbourhood,Total,Low income\n",
        );

        assert!(load_low_income_data(&path).unwrap().is_empty());

        fs::remove_file(&path).unwrap();
    }
}
