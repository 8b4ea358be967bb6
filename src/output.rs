//! Output formatting and persistence for analysis results.
//!
//! Supports pretty-printing, JSON logging, CSV export and the scatter plot
//! description of combined rates.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use csv::WriterBuilder;
use serde::Serialize;
use std::fs::File;
use std::path::Path;
use tracing::{debug, info};

use crate::records::{AgeGroup, CombinedRateRecord};

/// Logs a value using Rust's debug pretty-print format.
pub fn print_pretty(value: &impl std::fmt::Debug) {
    debug!("{:#?}", value);
}

/// Logs a value as pretty-printed JSON.
pub fn print_json(value: &impl Serialize) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Writes combined rate records to a CSV file with a header row.
///
/// Any existing file at `path` is replaced.
pub fn write_combined_csv(path: &Path, records: &[CombinedRateRecord]) -> Result<()> {
    debug!(path = %path.display(), rows = records.len(), "Writing combined rates CSV");

    let file = File::create(path)
        .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;
    let mut writer = WriterBuilder::new().has_headers(true).from_writer(file);

    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    Ok(())
}

/// A scatter plot of low income rate (x) against hypertension rate (y), one
/// labelled point per neighbourhood.
#[derive(Debug, Serialize)]
pub struct ScatterPlot<'a> {
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: String,
    pub generated_at: DateTime<Utc>,
    pub points: Vec<ScatterPoint<'a>>,
}

#[derive(Debug, Serialize)]
pub struct ScatterPoint<'a> {
    pub name: &'a str,
    pub x: f64,
    pub y: f64,
}

impl<'a> ScatterPlot<'a> {
    pub fn new(records: &'a [CombinedRateRecord], age_group: AgeGroup) -> Self {
        ScatterPlot {
            title: "Low Income vs. Hypertension Rates by Toronto Neighbourhood",
            x_label: "Proportion of Residents with Low Income Status",
            y_label: format!("Proportion of Residents (aged {age_group}) with Hypertension"),
            generated_at: Utc::now(),
            points: records
                .iter()
                .map(|r| ScatterPoint {
                    name: &r.name,
                    x: r.low_income_rate,
                    y: r.hypertension_rate,
                })
                .collect(),
        }
    }
}

/// Writes the scatter plot description for `records` as JSON.
pub fn write_scatter_json(
    path: &Path,
    records: &[CombinedRateRecord],
    age_group: AgeGroup,
) -> Result<()> {
    let plot = ScatterPlot::new(records, age_group);
    let file = File::create(path)
        .with_context(|| format!("Failed to create JSON file: {}", path.display()))?;
    serde_json::to_writer_pretty(file, &plot)?;

    info!(path = %path.display(), points = plot.points.len(), "Scatter plot written");
    Ok(())
}
