//! Chart and report export
//!
//! A chart is written as `<slug>.csv` (one timestamp column plus one column
//! per series, empty cells where a value is undefined) next to
//! `<slug>.json` describing how to draw it.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::charts::{ChartKind, ChartSpec};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Drawing metadata stored beside the data file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartManifest {
    pub version: String,
    pub slug: String,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub kind: ChartKind,
    pub series: Vec<String>,
    pub points: usize,
    pub data_file: String,
}

impl ChartManifest {
    pub fn for_chart(spec: &ChartSpec) -> Self {
        Self {
            version: crate::VERSION.to_string(),
            slug: spec.slug.clone(),
            title: spec.title.clone(),
            x_label: spec.x_label.clone(),
            y_label: spec.y_label.clone(),
            kind: spec.kind,
            series: spec.series.iter().map(|s| s.label.clone()).collect(),
            points: spec.point_count(),
            data_file: format!("{}.csv", spec.slug),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedChart {
    pub data: PathBuf,
    pub manifest: PathBuf,
}

/// Render a chart's series as CSV text.
pub fn chart_csv(spec: &ChartSpec) -> Result<String, ExportError> {
    let mut wtr = csv::Writer::from_writer(Vec::new());

    let mut header = vec!["timestamp".to_string()];
    header.extend(spec.series.iter().map(|s| s.label.clone()));
    wtr.write_record(&header)?;

    for (i, ts) in spec.timestamps.iter().enumerate() {
        let mut record = Vec::with_capacity(spec.series.len() + 1);
        record.push(ts.format(TIMESTAMP_FORMAT).to_string());
        for s in &spec.series {
            record.push(
                s.values
                    .get(i)
                    .copied()
                    .flatten()
                    .map(|v| v.to_string())
                    .unwrap_or_default(),
            );
        }
        wtr.write_record(&record)?;
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| ExportError::Io(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

pub fn export_chart(spec: &ChartSpec, out_dir: &Path) -> Result<ExportedChart, ExportError> {
    fs::create_dir_all(out_dir)?;

    let manifest = ChartManifest::for_chart(spec);
    let data = out_dir.join(&manifest.data_file);
    let manifest_path = out_dir.join(format!("{}.json", spec.slug));

    fs::write(&data, chart_csv(spec)?)?;
    fs::write(&manifest_path, serde_json::to_string_pretty(&manifest)?)?;

    info!(chart = %spec.slug, points = manifest.points, path = %data.display(), "Chart exported");
    Ok(ExportedChart {
        data,
        manifest: manifest_path,
    })
}

pub fn export_all(specs: &[ChartSpec], out_dir: &Path) -> Result<Vec<ExportedChart>, ExportError> {
    specs.iter().map(|s| export_chart(s, out_dir)).collect()
}

/// Write any serializable report as pretty JSON.
pub fn write_json<T: Serialize>(value: &T, path: &Path) -> Result<(), ExportError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_string_pretty(value)?)?;
    Ok(())
}
