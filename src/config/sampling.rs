//! Sampling configuration for the attribute sampler
//!
//! Every probability, range and coefficient the sampler uses lives here so a cohort
//! profile can be tuned (or loaded from JSON) without touching the sampling code.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::algorithm::numeric::clamp;
use crate::error::util::safe_read_to_string;
use crate::error::{Result, SynthError};

/// Closed numeric interval
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    /// Lower bound (inclusive)
    pub min: f64,
    /// Upper bound (inclusive)
    pub max: f64,
}

impl Interval {
    /// Create a new interval
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    fn validate(&self, name: &str) -> Result<()> {
        if !self.min.is_finite() || !self.max.is_finite() || self.min > self.max {
            return Err(SynthError::invalid_config(format!(
                "{name}: interval [{}, {}] is empty or not finite",
                self.min, self.max
            )));
        }
        Ok(())
    }
}

/// Comorbidity probability rising with age and excess BMI:
/// `clamp(base + age / age_divisor + max(0, (bmi - bmi_pivot) * bmi_slope), 0, cap)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComorbidityModel {
    /// Baseline probability
    pub base: f64,
    /// Age (years) that adds one unit of probability
    pub age_divisor: f64,
    /// BMI above which excess weight adds risk
    pub bmi_pivot: f64,
    /// Probability added per BMI unit above the pivot
    pub bmi_slope: f64,
    /// Upper bound of the probability
    pub cap: f64,
}

impl ComorbidityModel {
    /// Probability for a given age and BMI
    #[must_use]
    pub fn probability(&self, age_years: u8, bmi: f64) -> f64 {
        let p = self.base
            + f64::from(age_years) / self.age_divisor
            + ((bmi - self.bmi_pivot) * self.bmi_slope).max(0.0);
        clamp(p, 0.0, self.cap)
    }

    fn validate(&self, name: &str) -> Result<()> {
        if !self.age_divisor.is_finite() || self.age_divisor <= 0.0 {
            return Err(SynthError::invalid_config(format!(
                "{name}: age_divisor must be positive"
            )));
        }
        check_probability(&format!("{name}.cap"), self.cap)?;
        check_finite(&format!("{name}.base"), self.base)?;
        check_finite(&format!("{name}.bmi_pivot"), self.bmi_pivot)?;
        check_finite(&format!("{name}.bmi_slope"), self.bmi_slope)
    }
}

/// Additive log-odds index for a clinical ASCVD history
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AscvdIndex {
    /// Intercept of the index
    pub intercept: f64,
    /// Added per year of age
    pub age_coefficient: f64,
    /// Added for hypertension
    pub hypertension: f64,
    /// Added for diabetes
    pub diabetes: f64,
    /// Added for current smokers
    pub current_smoker: f64,
    /// Added for former smokers
    pub former_smoker: f64,
    /// BMI at or above which `obesity` is added
    pub obesity_bmi: f64,
    /// Added for obesity
    pub obesity: f64,
    /// Upper bound of the sampled probability
    pub cap: f64,
}

/// Blood-pressure lab model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BloodPressureModel {
    /// Probability the lab is measured at all
    pub probability: f64,
    /// Baseline systolic pressure
    pub base: f64,
    /// Age after which pressure rises
    pub age_pivot: f64,
    /// mmHg per year past the pivot
    pub age_slope: f64,
    /// Added for hypertensive patients
    pub hypertension_offset: f64,
    /// Symmetric uniform noise half-width
    pub noise: f64,
    /// Clamp applied to the sampled value
    pub bounds: Interval,
}

/// LDL cholesterol lab model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LdlModel {
    /// Probability the lab is measured at all
    pub probability: f64,
    /// Baseline LDL
    pub base: f64,
    /// Age after which LDL rises
    pub age_pivot: f64,
    /// mg/dL per year past the pivot
    pub age_slope: f64,
    /// Symmetric uniform noise half-width
    pub noise: f64,
    /// Uniform reduction drawn for statin users
    pub statin_reduction: Interval,
    /// Clamp applied to the sampled value
    pub bounds: Interval,
}

/// Configuration for the attribute sampler
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// Minimum age in years
    pub age_min: u8,
    /// Maximum age in years
    pub age_max: u8,
    /// Height range for men (cm)
    pub male_height_cm: (u16, u16),
    /// Height range for women (cm)
    pub female_height_cm: (u16, u16),
    /// BMI target centre for the low, moderate, high and very-high bands
    pub bmi_band_centers: [f64; 4],
    /// Band weights for men
    pub male_bmi_weights: [u32; 4],
    /// Band weights for women
    pub female_bmi_weights: [u32; 4],
    /// Uniform jitter half-width around the band centre
    pub bmi_jitter: f64,
    /// Clamp applied to the derived weight (kg)
    pub weight_kg: Interval,
    /// Hypertension model
    pub hypertension: ComorbidityModel,
    /// Diabetes model
    pub diabetes: ComorbidityModel,
    /// Probability of a family history of heart disease
    pub family_history_probability: f64,
    /// Weights for never, former and current smoking
    pub smoking_weights: [u32; 3],
    /// Weights for low, moderate and high activity
    pub activity_weights: [u32; 3],
    /// Probability a hypertensive patient is on BP medication
    pub bp_meds_probability: f64,
    /// Minimum age for statin eligibility
    pub statin_min_age: u8,
    /// Probability an eligible patient is on a statin
    pub statin_probability: f64,
    /// Clinical ASCVD history index
    pub ascvd: AscvdIndex,
    /// Probability of heart-attack history given ASCVD
    pub heart_attack_probability: f64,
    /// Probability of stroke/TIA history given ASCVD
    pub stroke_tia_probability: f64,
    /// Probability of PAD history given ASCVD
    pub pad_probability: f64,
    /// Probability of a recent event given ASCVD
    pub recent_event_probability: f64,
    /// Blood-pressure lab model
    pub blood_pressure: BloodPressureModel,
    /// LDL lab model
    pub ldl: LdlModel,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            age_min: 18,
            age_max: 90,
            male_height_cm: (160, 195),
            female_height_cm: (150, 182),
            bmi_band_centers: [21.5, 27.0, 32.0, 38.0],
            male_bmi_weights: [30, 42, 20, 8],
            female_bmi_weights: [40, 34, 18, 8],
            bmi_jitter: 2.5,
            weight_kg: Interval::new(40.0, 180.0),
            hypertension: ComorbidityModel {
                base: 0.05,
                age_divisor: 140.0,
                bmi_pivot: 25.0,
                bmi_slope: 0.02,
                cap: 0.85,
            },
            diabetes: ComorbidityModel {
                base: 0.03,
                age_divisor: 220.0,
                bmi_pivot: 27.0,
                bmi_slope: 0.025,
                cap: 0.75,
            },
            family_history_probability: 0.28,
            smoking_weights: [60, 25, 15],
            activity_weights: [25, 50, 25],
            bp_meds_probability: 0.75,
            statin_min_age: 45,
            statin_probability: 0.50,
            ascvd: AscvdIndex {
                intercept: -6.0,
                age_coefficient: 0.055,
                hypertension: 0.9,
                diabetes: 1.0,
                current_smoker: 0.7,
                former_smoker: 0.3,
                obesity_bmi: 30.0,
                obesity: 0.3,
                cap: 0.55,
            },
            heart_attack_probability: 0.42,
            stroke_tia_probability: 0.28,
            pad_probability: 0.22,
            recent_event_probability: 0.16,
            blood_pressure: BloodPressureModel {
                probability: 0.65,
                base: 112.0,
                age_pivot: 25.0,
                age_slope: 0.35,
                hypertension_offset: 18.0,
                noise: 10.0,
                bounds: Interval::new(90.0, 210.0),
            },
            ldl: LdlModel {
                probability: 0.55,
                base: 115.0,
                age_pivot: 25.0,
                age_slope: 0.25,
                noise: 25.0,
                statin_reduction: Interval::new(25.0, 55.0),
                bounds: Interval::new(40.0, 260.0),
            },
        }
    }
}

impl SamplingConfig {
    /// Load and validate a sampling configuration from a JSON file
    ///
    /// Fields missing from the file keep their default values.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = safe_read_to_string(path, "sampling configuration")?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        log::info!("Loaded sampling configuration from {}", path.display());
        Ok(config)
    }

    /// Check every probability, range and weight table
    pub fn validate(&self) -> Result<()> {
        if self.age_min > self.age_max {
            return Err(SynthError::invalid_config(format!(
                "age range [{}, {}] is empty",
                self.age_min, self.age_max
            )));
        }
        for (name, (low, high)) in [
            ("male_height_cm", self.male_height_cm),
            ("female_height_cm", self.female_height_cm),
        ] {
            if low == 0 || low > high {
                return Err(SynthError::invalid_config(format!(
                    "{name}: range [{low}, {high}] is empty or not positive"
                )));
            }
        }
        if self.bmi_band_centers.iter().any(|c| !c.is_finite() || *c <= 0.0) {
            return Err(SynthError::invalid_config(
                "bmi_band_centers must be positive and finite",
            ));
        }
        check_weights("male_bmi_weights", &self.male_bmi_weights)?;
        check_weights("female_bmi_weights", &self.female_bmi_weights)?;
        check_weights("smoking_weights", &self.smoking_weights)?;
        check_weights("activity_weights", &self.activity_weights)?;
        check_non_negative("bmi_jitter", self.bmi_jitter)?;
        self.weight_kg.validate("weight_kg")?;
        if self.weight_kg.min < 1.0 {
            return Err(SynthError::invalid_config("weight_kg.min must be at least 1"));
        }

        self.hypertension.validate("hypertension")?;
        self.diabetes.validate("diabetes")?;

        for (name, p) in [
            ("family_history_probability", self.family_history_probability),
            ("bp_meds_probability", self.bp_meds_probability),
            ("statin_probability", self.statin_probability),
            ("ascvd.cap", self.ascvd.cap),
            ("heart_attack_probability", self.heart_attack_probability),
            ("stroke_tia_probability", self.stroke_tia_probability),
            ("pad_probability", self.pad_probability),
            ("recent_event_probability", self.recent_event_probability),
            ("blood_pressure.probability", self.blood_pressure.probability),
            ("ldl.probability", self.ldl.probability),
        ] {
            check_probability(name, p)?;
        }

        for (name, value) in [
            ("ascvd.intercept", self.ascvd.intercept),
            ("ascvd.age_coefficient", self.ascvd.age_coefficient),
            ("ascvd.hypertension", self.ascvd.hypertension),
            ("ascvd.diabetes", self.ascvd.diabetes),
            ("ascvd.current_smoker", self.ascvd.current_smoker),
            ("ascvd.former_smoker", self.ascvd.former_smoker),
            ("ascvd.obesity_bmi", self.ascvd.obesity_bmi),
            ("ascvd.obesity", self.ascvd.obesity),
            ("blood_pressure.base", self.blood_pressure.base),
            ("blood_pressure.age_pivot", self.blood_pressure.age_pivot),
            ("blood_pressure.age_slope", self.blood_pressure.age_slope),
            ("blood_pressure.hypertension_offset", self.blood_pressure.hypertension_offset),
            ("ldl.base", self.ldl.base),
            ("ldl.age_pivot", self.ldl.age_pivot),
            ("ldl.age_slope", self.ldl.age_slope),
        ] {
            check_finite(name, value)?;
        }

        check_non_negative("blood_pressure.noise", self.blood_pressure.noise)?;
        check_non_negative("ldl.noise", self.ldl.noise)?;
        self.blood_pressure.bounds.validate("blood_pressure.bounds")?;
        self.ldl.bounds.validate("ldl.bounds")?;
        self.ldl.statin_reduction.validate("ldl.statin_reduction")?;
        if self.blood_pressure.bounds.min < 0.0 || self.ldl.bounds.min < 0.0 {
            return Err(SynthError::invalid_config("lab bounds must be non-negative"));
        }
        if self.blood_pressure.bounds.max > f64::from(u16::MAX)
            || self.ldl.bounds.max > f64::from(u16::MAX)
        {
            return Err(SynthError::invalid_config("lab bounds exceed the storable range"));
        }
        if self.weight_kg.max > f64::from(u16::MAX) {
            return Err(SynthError::invalid_config("weight_kg.max exceeds the storable range"));
        }

        Ok(())
    }
}

fn check_probability(name: &str, p: f64) -> Result<()> {
    if (0.0..=1.0).contains(&p) {
        Ok(())
    } else {
        Err(SynthError::invalid_config(format!(
            "{name}: probability {p} outside [0, 1]"
        )))
    }
}

fn check_finite(name: &str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(SynthError::invalid_config(format!("{name}: {value} is not finite")))
    }
}

fn check_non_negative(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SynthError::invalid_config(format!(
            "{name}: {value} must be non-negative"
        )))
    }
}

fn check_weights(name: &str, weights: &[u32]) -> Result<()> {
    if weights.iter().map(|w| u64::from(*w)).sum::<u64>() == 0 {
        return Err(SynthError::invalid_config(format!(
            "{name}: at least one weight must be positive"
        )));
    }
    Ok(())
}
