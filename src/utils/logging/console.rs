//! Console output utilities
//!
//! This module provides utilities for formatted console output.

use crate::export::COLUMNS;
use crate::models::PatientRecord;

fn lab(value: Option<u16>) -> String {
    value.map_or_else(|| "NULL".to_string(), |v| v.to_string())
}

/// Print the first `num_rows` records, one line per record in export column order
pub fn print_sample_records(records: &[PatientRecord], num_rows: usize) {
    println!("First {} of {} records:", num_rows.min(records.len()), records.len());
    println!("  {}", COLUMNS.join(" | "));
    for record in records.iter().take(num_rows) {
        let p = &record.profile;
        let cells = [
            p.age_years.to_string(),
            p.sex.to_string(),
            p.height_cm.to_string(),
            p.weight_kg.to_string(),
            p.smoking_status.to_string(),
            p.activity_level.to_string(),
            p.family_history_heart_disease.to_string(),
            p.hypertension.to_string(),
            p.diabetes.to_string(),
            p.on_statin.to_string(),
            p.on_bp_meds.to_string(),
            p.clinical_ascvd_history.to_string(),
            p.heart_attack_history.to_string(),
            p.stroke_tia_history.to_string(),
            p.peripheral_artery_disease_history.to_string(),
            p.recent_cardio_event_12mo.to_string(),
            p.multi_plaque_dev.to_string(),
            lab(p.blood_pressure_mmhg),
            lab(p.ldl_mg_dl),
            record.risk_score().to_string(),
            record.plaque_stage().to_string(),
            record.health_label().to_string(),
        ];
        println!("  {}", cells.join(" | "));
    }
}
