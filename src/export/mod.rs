//! Tabular export of generated datasets
//!
//! Records are converted to a single Arrow `RecordBatch` with a fixed column order and
//! written as CSV or Parquet. Absent labs become nulls (an empty CSV cell), never zero.

use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use arrow::array::{ArrayRef, BooleanArray, StringArray, UInt8Array, UInt16Array};
use arrow::csv::WriterBuilder;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

use crate::error::util::safe_create_file;
use crate::error::{Result, SynthError};
use crate::models::{PatientProfile, PatientRecord};
use crate::utils::logging::{log_operation_complete, log_operation_start};

/// Column order of every exported dataset
pub const COLUMNS: [&str; 22] = [
    "age_years",
    "sex",
    "height_cm",
    "weight_kg",
    "smoking_status",
    "activity_level",
    "family_history_heart_disease",
    "hypertension",
    "diabetes",
    "on_statin",
    "on_bp_meds",
    "clinical_ascvd_history",
    "heart_attack_history",
    "stroke_tia_history",
    "peripheral_artery_disease_history",
    "recent_cardio_event_12mo",
    "multi_plaque_dev",
    "blood_pressure_mmHg",
    "ldl_mg_dL",
    "risk_score",
    "plaque_stage",
    "health_label",
];

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Comma-separated values with a header row
    Csv,
    /// Apache Parquet
    Parquet,
}

impl ExportFormat {
    /// Pick the format from a file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("csv") => Ok(Self::Csv),
            Some("parquet") => Ok(Self::Parquet),
            _ => Err(SynthError::invalid_argument(format!(
                "cannot infer export format from {} (expected .csv or .parquet)",
                path.display()
            ))),
        }
    }
}

/// Arrow schema of an exported dataset
#[must_use]
pub fn schema() -> Schema {
    let fields = COLUMNS
        .iter()
        .map(|name| {
            let (data_type, nullable) = match *name {
                "age_years" | "risk_score" | "plaque_stage" => (DataType::UInt8, false),
                "height_cm" | "weight_kg" => (DataType::UInt16, false),
                "blood_pressure_mmHg" | "ldl_mg_dL" => (DataType::UInt16, true),
                "sex" | "smoking_status" | "activity_level" | "health_label" => {
                    (DataType::Utf8, false)
                }
                _ => (DataType::Boolean, false),
            };
            Field::new(*name, data_type, nullable)
        })
        .collect::<Vec<_>>();
    Schema::new(fields)
}

/// Convert records into one Arrow record batch
pub fn records_to_batch(records: &[PatientRecord]) -> Result<RecordBatch> {
    let flag = |get: fn(&PatientProfile) -> bool| -> ArrayRef {
        Arc::new(BooleanArray::from(
            records.iter().map(|r| get(&r.profile)).collect::<Vec<_>>(),
        ))
    };

    let columns: Vec<ArrayRef> = vec![
        Arc::new(UInt8Array::from_iter_values(
            records.iter().map(|r| r.profile.age_years),
        )),
        Arc::new(StringArray::from_iter_values(
            records.iter().map(|r| r.profile.sex.code()),
        )),
        Arc::new(UInt16Array::from_iter_values(
            records.iter().map(|r| r.profile.height_cm),
        )),
        Arc::new(UInt16Array::from_iter_values(
            records.iter().map(|r| r.profile.weight_kg),
        )),
        Arc::new(StringArray::from_iter_values(
            records.iter().map(|r| r.profile.smoking_status.as_str()),
        )),
        Arc::new(StringArray::from_iter_values(
            records.iter().map(|r| r.profile.activity_level.as_str()),
        )),
        flag(|p| p.family_history_heart_disease),
        flag(|p| p.hypertension),
        flag(|p| p.diabetes),
        flag(|p| p.on_statin),
        flag(|p| p.on_bp_meds),
        flag(|p| p.clinical_ascvd_history),
        flag(|p| p.heart_attack_history),
        flag(|p| p.stroke_tia_history),
        flag(|p| p.peripheral_artery_disease_history),
        flag(|p| p.recent_cardio_event_12mo),
        flag(|p| p.multi_plaque_dev),
        Arc::new(
            records
                .iter()
                .map(|r| r.profile.blood_pressure_mmhg)
                .collect::<UInt16Array>(),
        ),
        Arc::new(
            records
                .iter()
                .map(|r| r.profile.ldl_mg_dl)
                .collect::<UInt16Array>(),
        ),
        Arc::new(UInt8Array::from_iter_values(
            records.iter().map(PatientRecord::risk_score),
        )),
        Arc::new(UInt8Array::from_iter_values(
            records.iter().map(|r| r.plaque_stage().as_u8()),
        )),
        Arc::new(StringArray::from_iter_values(
            records.iter().map(|r| r.health_label().as_str()),
        )),
    ];

    Ok(RecordBatch::try_new(Arc::new(schema()), columns)?)
}

/// Write records as CSV with a header row
pub fn write_csv<W: Write>(records: &[PatientRecord], writer: W) -> Result<()> {
    let batch = records_to_batch(records)?;
    let mut csv_writer = WriterBuilder::new().with_header(true).build(writer);
    csv_writer.write(&batch)?;
    Ok(())
}

/// Write records as Parquet
pub fn write_parquet<W: Write + Send>(records: &[PatientRecord], writer: W) -> Result<()> {
    let batch = records_to_batch(records)?;
    let mut parquet_writer = ArrowWriter::try_new(writer, batch.schema(), None)?;
    parquet_writer.write(&batch)?;
    parquet_writer.close()?;
    Ok(())
}

/// Write records to a file, choosing the format from its extension
pub fn write_dataset(records: &[PatientRecord], path: &Path) -> Result<()> {
    let format = ExportFormat::from_path(path)?;
    let target = path.display().to_string();
    log_operation_start("Writing dataset to", &target);
    let start = Instant::now();

    let file = safe_create_file(path, "dataset export")?;
    match format {
        ExportFormat::Csv => write_csv(records, std::io::BufWriter::new(file))?,
        ExportFormat::Parquet => write_parquet(records, file)?,
    }

    log_operation_complete("wrote", &target, records.len(), Some(start.elapsed()));
    Ok(())
}
