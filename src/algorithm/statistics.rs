//! Dataset statistics and summaries
//!
//! Prevalence and distribution figures for a generated dataset, used to sanity-check a
//! cohort profile against the intended population before it is exported.

use std::fmt;

use itertools::{Itertools, MinMaxResult};
use rustc_hash::FxHashMap;

use crate::models::{HealthLabel, PatientRecord, PlaqueStage, SmokingStatus};

/// Summary statistics of a generated dataset
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetSummary {
    /// Number of records
    pub record_count: usize,
    /// Records per plaque stage, indexed by stage number
    pub stage_counts: [usize; 5],
    /// Records labelled Healthy
    pub healthy_count: usize,
    /// Records labelled Risk
    pub risk_count: usize,
    /// Mean risk score
    pub mean_score: f64,
    /// Lowest risk score
    pub min_score: u8,
    /// Highest risk score
    pub max_score: u8,
    /// Records per smoking status
    pub smoking_counts: FxHashMap<SmokingStatus, usize>,
    /// Records with hypertension
    pub hypertension_count: usize,
    /// Records with diabetes
    pub diabetes_count: usize,
    /// Records with clinical ASCVD history
    pub ascvd_count: usize,
    /// Records with a recent cardiovascular event
    pub recent_event_count: usize,
    /// Records with multi-site plaque
    pub multi_plaque_count: usize,
    /// Records with a blood-pressure measurement
    pub blood_pressure_measured: usize,
    /// Records with an LDL measurement
    pub ldl_measured: usize,
}

impl DatasetSummary {
    /// Calculate summary statistics for a set of records
    #[must_use]
    pub fn from_records(records: &[PatientRecord]) -> Self {
        let mut stage_counts = [0usize; 5];
        let mut smoking_counts = FxHashMap::default();
        let mut healthy_count = 0;

        for record in records {
            stage_counts[record.plaque_stage().as_u8() as usize] += 1;
            *smoking_counts.entry(record.profile.smoking_status).or_insert(0) += 1;
            if record.health_label() == HealthLabel::Healthy {
                healthy_count += 1;
            }
        }

        let count = |predicate: fn(&PatientRecord) -> bool| {
            records.iter().filter(|r| predicate(r)).count()
        };

        let (min_score, max_score) = match records.iter().map(PatientRecord::risk_score).minmax() {
            MinMaxResult::NoElements => (0, 0),
            MinMaxResult::OneElement(score) => (score, score),
            MinMaxResult::MinMax(min, max) => (min, max),
        };

        let mean_score = if records.is_empty() {
            0.0
        } else {
            records
                .iter()
                .map(|r| f64::from(r.risk_score()))
                .sum::<f64>()
                / records.len() as f64
        };

        Self {
            record_count: records.len(),
            stage_counts,
            healthy_count,
            risk_count: records.len() - healthy_count,
            mean_score,
            min_score,
            max_score,
            smoking_counts,
            hypertension_count: count(|r| r.profile.hypertension),
            diabetes_count: count(|r| r.profile.diabetes),
            ascvd_count: count(|r| r.profile.clinical_ascvd_history),
            recent_event_count: count(|r| r.profile.recent_cardio_event_12mo),
            multi_plaque_count: count(|r| r.profile.multi_plaque_dev),
            blood_pressure_measured: count(|r| r.profile.blood_pressure_mmhg.is_some()),
            ldl_measured: count(|r| r.profile.ldl_mg_dl.is_some()),
        }
    }

    /// Number of records in a stage
    #[must_use]
    pub const fn stage_count(&self, stage: PlaqueStage) -> usize {
        self.stage_counts[stage.as_u8() as usize]
    }

    /// Share of records matching a count, in percent
    #[must_use]
    pub fn percent(&self, count: usize) -> f64 {
        if self.record_count == 0 {
            0.0
        } else {
            count as f64 * 100.0 / self.record_count as f64
        }
    }
}

impl fmt::Display for DatasetSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Synthetic Cohort Summary:")?;
        writeln!(f, "  Records: {}", self.record_count)?;
        writeln!(
            f,
            "  Risk Score: mean {:.1}, min {}, max {}",
            self.mean_score, self.min_score, self.max_score
        )?;
        for stage in PlaqueStage::ALL {
            let n = self.stage_count(stage);
            writeln!(f, "  Stage {stage}: {n} ({:.1}%)", self.percent(n))?;
        }
        writeln!(
            f,
            "  Healthy: {} ({:.1}%), Risk: {} ({:.1}%)",
            self.healthy_count,
            self.percent(self.healthy_count),
            self.risk_count,
            self.percent(self.risk_count)
        )?;
        for status in SmokingStatus::ALL {
            let n = self.smoking_counts.get(&status).copied().unwrap_or(0);
            writeln!(f, "  Smoking {status}: {n} ({:.1}%)", self.percent(n))?;
        }
        for (name, n) in [
            ("Hypertension", self.hypertension_count),
            ("Diabetes", self.diabetes_count),
            ("Clinical ASCVD", self.ascvd_count),
            ("Recent Event (12mo)", self.recent_event_count),
            ("Multi-site Plaque", self.multi_plaque_count),
            ("Blood Pressure Measured", self.blood_pressure_measured),
            ("LDL Measured", self.ldl_measured),
        ] {
            writeln!(f, "  {name}: {n} ({:.1}%)", self.percent(n))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::dataset::generate_dataset;

    #[test]
    fn test_empty_summary() {
        let summary = DatasetSummary::from_records(&[]);
        assert_eq!(summary.record_count, 0);
        assert_eq!(summary.mean_score, 0.0);
        assert_eq!(summary.percent(0), 0.0);
    }

    #[test]
    fn test_counts_are_consistent() {
        let records = generate_dataset(1000, 19).unwrap();
        let summary = DatasetSummary::from_records(&records);

        assert_eq!(summary.record_count, 1000);
        assert_eq!(summary.stage_counts.iter().sum::<usize>(), 1000);
        assert_eq!(summary.healthy_count, summary.stage_count(PlaqueStage::Stage0));
        assert_eq!(summary.healthy_count + summary.risk_count, 1000);
        assert_eq!(summary.smoking_counts.values().sum::<usize>(), 1000);
        assert!(summary.multi_plaque_count <= summary.ascvd_count);
        assert!(summary.recent_event_count <= summary.ascvd_count);
        assert!(f64::from(summary.min_score) <= summary.mean_score);
        assert!(summary.mean_score <= f64::from(summary.max_score));
    }

    #[test]
    fn test_display_lists_every_stage() {
        let records = generate_dataset(50, 1).unwrap();
        let rendered = DatasetSummary::from_records(&records).to_string();
        for stage in 0..=4 {
            assert!(rendered.contains(&format!("Stage {stage}:")));
        }
        assert!(rendered.contains("Records: 50"));
    }
}
