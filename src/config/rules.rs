//! Scoring and staging rule tables
//!
//! The risk score and plaque stage are driven entirely by a `RuleSet`, so a new rule
//! revision is a new table (built in code or loaded from JSON) rather than new branches.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::util::safe_read_to_string;
use crate::error::{Result, SynthError};

/// Age contribution: `floor(max(0, age - onset_years) / step_years) * points_per_step`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgeTerm {
    /// Age at which the contribution starts
    pub onset_years: u8,
    /// Width of one age step in years
    pub step_years: u8,
    /// Points added per completed step
    pub points_per_step: f64,
}

impl AgeTerm {
    /// Points contributed by a given age
    #[must_use]
    pub fn points(&self, age_years: u8) -> f64 {
        let years = age_years.saturating_sub(self.onset_years);
        f64::from(years / self.step_years.max(1)) * self.points_per_step
    }
}

/// One threshold tier of a continuous variable
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tier {
    /// Value at or above which the tier applies
    pub threshold: f64,
    /// Points added when this is the highest tier reached
    pub points: f64,
}

impl Tier {
    /// Create a new tier
    #[must_use]
    pub const fn new(threshold: f64, points: f64) -> Self {
        Self { threshold, points }
    }
}

/// Points from the highest tier whose threshold `value` reaches; tiers never accumulate
#[must_use]
pub fn tier_points(tiers: &[Tier], value: f64) -> f64 {
    tiers
        .iter()
        .filter(|tier| value >= tier.threshold)
        .max_by(|a, b| a.threshold.total_cmp(&b.threshold))
        .map_or(0.0, |tier| tier.points)
}

/// Additive weights of the risk score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringRules {
    /// Age contribution
    pub age: AgeTerm,
    /// Added for male sex
    pub male: f64,
    /// BMI tiers
    pub bmi_tiers: Vec<Tier>,
    /// Added for current smokers
    pub smoking_current: f64,
    /// Added for former smokers
    pub smoking_former: f64,
    /// Added for low activity
    pub activity_low: f64,
    /// Added for moderate activity
    pub activity_moderate: f64,
    /// Added for family history of heart disease
    pub family_history: f64,
    /// Added for hypertension
    pub hypertension: f64,
    /// Added for diabetes
    pub diabetes: f64,
    /// Systolic blood-pressure tiers, applied only when measured
    pub blood_pressure_tiers: Vec<Tier>,
    /// LDL tiers, applied only when measured
    pub ldl_tiers: Vec<Tier>,
    /// Added for blood-pressure medication
    pub on_bp_meds: f64,
    /// Added for statin use
    pub on_statin: f64,
    /// Added for clinical ASCVD history
    pub clinical_ascvd_history: f64,
    /// Added for heart-attack history
    pub heart_attack_history: f64,
    /// Added for stroke/TIA history
    pub stroke_tia_history: f64,
    /// Added for PAD history
    pub peripheral_artery_disease_history: f64,
    /// Added for a cardiovascular event in the last 12 months
    pub recent_cardio_event: f64,
    /// Added for multi-site plaque
    pub multi_plaque: f64,
}

impl ScoringRules {
    /// Current rule revision
    #[must_use]
    pub fn current() -> Self {
        Self {
            age: AgeTerm {
                onset_years: 20,
                step_years: 1,
                points_per_step: 0.8,
            },
            male: 4.0,
            bmi_tiers: vec![Tier::new(35.0, 14.0), Tier::new(30.0, 10.0), Tier::new(25.0, 5.0)],
            smoking_current: 14.0,
            smoking_former: 7.0,
            activity_low: 7.0,
            activity_moderate: 3.0,
            family_history: 7.0,
            hypertension: 10.0,
            diabetes: 12.0,
            blood_pressure_tiers: vec![
                Tier::new(160.0, 10.0),
                Tier::new(140.0, 7.0),
                Tier::new(130.0, 4.0),
            ],
            ldl_tiers: vec![
                Tier::new(190.0, 10.0),
                Tier::new(160.0, 7.0),
                Tier::new(130.0, 4.0),
            ],
            on_bp_meds: 2.0,
            on_statin: 2.0,
            clinical_ascvd_history: 18.0,
            heart_attack_history: 12.0,
            stroke_tia_history: 12.0,
            peripheral_artery_disease_history: 10.0,
            recent_cardio_event: 10.0,
            multi_plaque: 8.0,
        }
    }

    /// Earlier rule revision: five-year age bands and no lab tiers
    #[must_use]
    pub fn legacy() -> Self {
        Self {
            age: AgeTerm {
                onset_years: 20,
                step_years: 5,
                points_per_step: 4.0,
            },
            male: 5.0,
            bmi_tiers: vec![Tier::new(30.0, 10.0), Tier::new(25.0, 5.0)],
            smoking_current: 15.0,
            smoking_former: 7.0,
            activity_low: 8.0,
            activity_moderate: 3.0,
            family_history: 8.0,
            hypertension: 12.0,
            diabetes: 12.0,
            blood_pressure_tiers: Vec::new(),
            ldl_tiers: Vec::new(),
            on_bp_meds: 2.0,
            on_statin: 2.0,
            clinical_ascvd_history: 25.0,
            heart_attack_history: 15.0,
            stroke_tia_history: 15.0,
            peripheral_artery_disease_history: 12.0,
            recent_cardio_event: 12.0,
            multi_plaque: 10.0,
        }
    }

    /// Check that every weight is finite and every tier list is monotone
    pub fn validate(&self) -> Result<()> {
        if self.age.step_years == 0 {
            return Err(SynthError::invalid_config("age.step_years must be at least 1"));
        }
        if !self.age.points_per_step.is_finite() || self.age.points_per_step < 0.0 {
            return Err(SynthError::invalid_config(
                "age.points_per_step must be finite and non-negative",
            ));
        }

        for (name, weight) in [
            ("male", self.male),
            ("smoking_current", self.smoking_current),
            ("smoking_former", self.smoking_former),
            ("activity_low", self.activity_low),
            ("activity_moderate", self.activity_moderate),
            ("family_history", self.family_history),
            ("hypertension", self.hypertension),
            ("diabetes", self.diabetes),
            ("on_bp_meds", self.on_bp_meds),
            ("on_statin", self.on_statin),
            ("clinical_ascvd_history", self.clinical_ascvd_history),
            ("heart_attack_history", self.heart_attack_history),
            ("stroke_tia_history", self.stroke_tia_history),
            (
                "peripheral_artery_disease_history",
                self.peripheral_artery_disease_history,
            ),
            ("recent_cardio_event", self.recent_cardio_event),
            ("multi_plaque", self.multi_plaque),
        ] {
            if !weight.is_finite() {
                return Err(SynthError::invalid_config(format!(
                    "{name}: weight {weight} is not finite"
                )));
            }
        }

        validate_tiers("bmi_tiers", &self.bmi_tiers)?;
        validate_tiers("blood_pressure_tiers", &self.blood_pressure_tiers)?;
        validate_tiers("ldl_tiers", &self.ldl_tiers)
    }
}

/// Tier points must not decrease as the threshold rises, so a higher value never scores lower
fn validate_tiers(name: &str, tiers: &[Tier]) -> Result<()> {
    if tiers
        .iter()
        .any(|t| !t.threshold.is_finite() || !t.points.is_finite() || t.points < 0.0)
    {
        return Err(SynthError::invalid_config(format!(
            "{name}: thresholds and points must be finite, points non-negative"
        )));
    }

    let mut sorted = tiers.to_vec();
    sorted.sort_by(|a, b| a.threshold.total_cmp(&b.threshold));
    for pair in sorted.windows(2) {
        if pair[0].threshold == pair[1].threshold {
            return Err(SynthError::invalid_config(format!(
                "{name}: duplicate threshold {}",
                pair[0].threshold
            )));
        }
        if pair[1].points < pair[0].points {
            return Err(SynthError::invalid_config(format!(
                "{name}: tier at {} awards fewer points than tier at {}",
                pair[1].threshold, pair[0].threshold
            )));
        }
    }
    Ok(())
}

/// Score thresholds of the plaque stage classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StagingRules {
    /// Score at or above which stage 4 applies
    pub stage4_score: u8,
    /// Score at or above which stage 3 applies
    pub stage3_score: u8,
    /// Score at or above which stage 2 applies
    pub stage2_score: u8,
    /// Score at or above which stage 1 applies
    pub stage1_score: u8,
    /// Number of vascular-bed histories that forces stage 4
    pub multi_event_count: u8,
}

impl StagingRules {
    /// Current rule revision
    #[must_use]
    pub const fn current() -> Self {
        Self {
            stage4_score: 85,
            stage3_score: 65,
            stage2_score: 45,
            stage1_score: 20,
            multi_event_count: 2,
        }
    }

    /// Earlier rule revision
    #[must_use]
    pub const fn legacy() -> Self {
        Self {
            stage4_score: 80,
            stage3_score: 60,
            stage2_score: 40,
            stage1_score: 15,
            multi_event_count: 2,
        }
    }

    /// Thresholds must strictly descend with severity
    pub fn validate(&self) -> Result<()> {
        if !(self.stage4_score > self.stage3_score
            && self.stage3_score > self.stage2_score
            && self.stage2_score > self.stage1_score)
        {
            return Err(SynthError::invalid_config(format!(
                "stage thresholds must strictly descend: {} > {} > {} > {}",
                self.stage4_score, self.stage3_score, self.stage2_score, self.stage1_score
            )));
        }
        if self.stage4_score > 100 {
            return Err(SynthError::invalid_config(
                "stage4_score cannot exceed the maximum score of 100",
            ));
        }
        if self.multi_event_count == 0 {
            return Err(SynthError::invalid_config("multi_event_count must be at least 1"));
        }
        Ok(())
    }
}

/// A complete scoring and staging rule revision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSet {
    /// Revision name, used in logs
    pub name: String,
    /// Risk score weights
    pub scoring: ScoringRules,
    /// Stage thresholds
    pub staging: StagingRules,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::current()
    }
}

impl RuleSet {
    /// Create a validated rule set
    pub fn new(name: impl Into<String>, scoring: ScoringRules, staging: StagingRules) -> Result<Self> {
        let rules = Self {
            name: name.into(),
            scoring,
            staging,
        };
        rules.validate()?;
        Ok(rules)
    }

    /// Current rule revision
    #[must_use]
    pub fn current() -> Self {
        Self {
            name: "current".to_string(),
            scoring: ScoringRules::current(),
            staging: StagingRules::current(),
        }
    }

    /// Earlier rule revision
    #[must_use]
    pub fn legacy() -> Self {
        Self {
            name: "legacy".to_string(),
            scoring: ScoringRules::legacy(),
            staging: StagingRules::legacy(),
        }
    }

    /// Validate both tables
    pub fn validate(&self) -> Result<()> {
        self.scoring.validate()?;
        self.staging.validate()
    }

    /// Parse and validate a rule set from JSON text
    pub fn from_json_str(json: &str) -> Result<Self> {
        let rules: Self = serde_json::from_str(json)?;
        rules.validate()?;
        Ok(rules)
    }

    /// Load and validate a rule set from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = safe_read_to_string(path, "scoring rule table")?;
        let rules = Self::from_json_str(&content)?;
        log::info!("Loaded rule set '{}' from {}", rules.name, path.display());
        Ok(rules)
    }

    /// Serialize the rule set as pretty-printed JSON
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        assert!(RuleSet::current().validate().is_ok());
        assert!(RuleSet::legacy().validate().is_ok());
    }

    #[test]
    fn test_age_term() {
        let current = ScoringRules::current().age;
        assert!((current.points(50) - 24.0).abs() < 1e-9);
        assert_eq!(current.points(18), 0.0);

        let legacy = ScoringRules::legacy().age;
        // (44 - 20) / 5 = 4 bands
        assert!((legacy.points(44) - 16.0).abs() < 1e-9);
        assert!((legacy.points(45) - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_tier_points_are_exclusive() {
        let tiers = ScoringRules::current().bmi_tiers;
        assert_eq!(tier_points(&tiers, 24.9), 0.0);
        assert_eq!(tier_points(&tiers, 25.0), 5.0);
        assert_eq!(tier_points(&tiers, 31.0), 10.0);
        assert_eq!(tier_points(&tiers, 40.0), 14.0);
    }

    #[test]
    fn test_tier_order_does_not_matter() {
        let tiers = vec![Tier::new(130.0, 4.0), Tier::new(160.0, 10.0), Tier::new(140.0, 7.0)];
        assert_eq!(tier_points(&tiers, 150.0), 7.0);
        assert_eq!(tier_points(&tiers, 170.0), 10.0);
    }

    #[test]
    fn test_non_monotone_tiers_rejected() {
        let mut scoring = ScoringRules::current();
        scoring.ldl_tiers = vec![Tier::new(190.0, 2.0), Tier::new(130.0, 4.0)];
        let result = RuleSet::new("broken", scoring, StagingRules::current());
        assert!(matches!(result, Err(SynthError::InvalidConfig(_))));
    }

    #[test]
    fn test_unordered_stage_thresholds_rejected() {
        let staging = StagingRules {
            stage3_score: 90,
            ..StagingRules::current()
        };
        assert!(staging.validate().is_err());
    }

    #[test]
    fn test_json_round_trip_preserves_rules() {
        let rules = RuleSet::legacy();
        let json = rules.to_json_string().unwrap();
        let parsed = RuleSet::from_json_str(&json).unwrap();
        assert_eq!(parsed, rules);
    }

    #[test]
    fn test_invalid_json_is_reported() {
        assert!(matches!(
            RuleSet::from_json_str("{ not json"),
            Err(SynthError::Json(_))
        ));
    }
}
