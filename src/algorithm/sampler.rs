//! Correlated attribute sampler
//!
//! Draws one patient's demographics, behaviors, comorbidities, clinical history and
//! optional labs from an injected pseudo-random stream. Each step reads only fields
//! sampled before it, and the draw order is fixed, so the same stream state always
//! yields the same profile:
//!
//! 1. sex, age, height, BMI band + jitter (weight)
//! 2. hypertension, diabetes, family history, smoking, activity
//! 3. BP medication (hypertensives only), statin (eligible patients only)
//! 4. clinical ASCVD history, then per-bed history and recent event (ASCVD only)
//! 5. consistency pass (no draws)
//! 6. blood pressure, LDL

use rand::Rng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;

use crate::algorithm::numeric::{bmi, clamp, logistic};
use crate::config::SamplingConfig;
use crate::error::{Result, SynthError};
use crate::models::{ActivityLevel, BmiBand, PatientProfile, Sex, SmokingStatus};

/// Samples internally consistent patient profiles
#[derive(Debug, Clone)]
pub struct AttributeSampler {
    config: SamplingConfig,
    male_bmi_bands: WeightedIndex<u32>,
    female_bmi_bands: WeightedIndex<u32>,
    smoking: WeightedIndex<u32>,
    activity: WeightedIndex<u32>,
}

impl AttributeSampler {
    /// Create a sampler from a validated configuration
    pub fn new(config: SamplingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            male_bmi_bands: weighted("male_bmi_weights", &config.male_bmi_weights)?,
            female_bmi_bands: weighted("female_bmi_weights", &config.female_bmi_weights)?,
            smoking: weighted("smoking_weights", &config.smoking_weights)?,
            activity: weighted("activity_weights", &config.activity_weights)?,
            config,
        })
    }

    /// The configuration this sampler draws from
    #[must_use]
    pub const fn config(&self) -> &SamplingConfig {
        &self.config
    }

    /// Draw one complete, consistent patient profile
    pub fn sample_record<R: Rng + ?Sized>(&self, rng: &mut R) -> PatientProfile {
        let c = &self.config;

        let sex = if rng.random_bool(0.5) {
            Sex::Male
        } else {
            Sex::Female
        };
        let age_years = rng.random_range(c.age_min..=c.age_max);

        let (height_min, height_max) = match sex {
            Sex::Male => c.male_height_cm,
            Sex::Female => c.female_height_cm,
        };
        let height_cm = rng.random_range(height_min..=height_max);
        let band = self.sample_bmi_band(sex, rng);
        let weight_kg = self.weight_for_band(band, height_cm, rng);
        let bmi = bmi(height_cm, weight_kg);

        let hypertension = rng.random_bool(c.hypertension.probability(age_years, bmi));
        let diabetes = rng.random_bool(c.diabetes.probability(age_years, bmi));
        let family_history_heart_disease = rng.random_bool(c.family_history_probability);
        let smoking_status = SmokingStatus::ALL[self.smoking.sample(rng)];
        let activity_level = ActivityLevel::ALL[self.activity.sample(rng)];

        let on_bp_meds = hypertension && rng.random_bool(c.bp_meds_probability);
        let statin_eligible = age_years >= c.statin_min_age
            && (hypertension || diabetes || family_history_heart_disease);
        let on_statin = statin_eligible && rng.random_bool(c.statin_probability);

        let clinical_ascvd_history = rng.random_bool(self.ascvd_probability(
            age_years,
            bmi,
            hypertension,
            diabetes,
            smoking_status,
        ));

        let (heart_attack_history, stroke_tia_history, peripheral_artery_disease_history) =
            if clinical_ascvd_history {
                (
                    rng.random_bool(c.heart_attack_probability),
                    rng.random_bool(c.stroke_tia_probability),
                    rng.random_bool(c.pad_probability),
                )
            } else {
                (false, false, false)
            };
        let recent_cardio_event_12mo =
            clinical_ascvd_history && rng.random_bool(c.recent_event_probability);

        let mut profile = PatientProfile {
            age_years,
            sex,
            height_cm,
            weight_kg,
            smoking_status,
            activity_level,
            family_history_heart_disease,
            hypertension,
            diabetes,
            on_statin,
            on_bp_meds,
            clinical_ascvd_history,
            heart_attack_history,
            stroke_tia_history,
            peripheral_artery_disease_history,
            recent_cardio_event_12mo,
            multi_plaque_dev: false,
            blood_pressure_mmhg: None,
            ldl_mg_dl: None,
        };
        enforce_consistency(&mut profile);

        profile.blood_pressure_mmhg = self.sample_blood_pressure(age_years, hypertension, rng);
        profile.ldl_mg_dl = self.sample_ldl(age_years, on_statin, rng);

        profile
    }

    fn sample_bmi_band<R: Rng + ?Sized>(&self, sex: Sex, rng: &mut R) -> BmiBand {
        let index = match sex {
            Sex::Male => self.male_bmi_bands.sample(rng),
            Sex::Female => self.female_bmi_bands.sample(rng),
        };
        BmiBand::ALL[index]
    }

    /// Weight that puts the patient near a jittered BMI target for the band
    fn weight_for_band<R: Rng + ?Sized>(
        &self,
        band: BmiBand,
        height_cm: u16,
        rng: &mut R,
    ) -> u16 {
        let c = &self.config;
        let center = c.bmi_band_centers[band as usize];
        let target_bmi = center + rng.random_range(-c.bmi_jitter..=c.bmi_jitter);
        let height_m = f64::from(height_cm) / 100.0;
        let raw = target_bmi * height_m * height_m;
        clamp(raw, c.weight_kg.min, c.weight_kg.max).round() as u16
    }

    /// Probability of a clinical ASCVD history: logistic of the index, capped
    fn ascvd_probability(
        &self,
        age_years: u8,
        bmi: f64,
        hypertension: bool,
        diabetes: bool,
        smoking: SmokingStatus,
    ) -> f64 {
        let index = self.ascvd_index(age_years, bmi, hypertension, diabetes, smoking);
        clamp(logistic(index), 0.0, self.config.ascvd.cap)
    }

    fn ascvd_index(
        &self,
        age_years: u8,
        bmi: f64,
        hypertension: bool,
        diabetes: bool,
        smoking: SmokingStatus,
    ) -> f64 {
        let a = &self.config.ascvd;
        let mut index = a.intercept + a.age_coefficient * f64::from(age_years);
        if hypertension {
            index += a.hypertension;
        }
        if diabetes {
            index += a.diabetes;
        }
        index += match smoking {
            SmokingStatus::Current => a.current_smoker,
            SmokingStatus::Former => a.former_smoker,
            SmokingStatus::Never => 0.0,
        };
        if bmi >= a.obesity_bmi {
            index += a.obesity;
        }
        index
    }

    fn sample_blood_pressure<R: Rng + ?Sized>(
        &self,
        age_years: u8,
        hypertension: bool,
        rng: &mut R,
    ) -> Option<u16> {
        let bp = &self.config.blood_pressure;
        if !rng.random_bool(bp.probability) {
            return None;
        }
        let mut value = bp.base + bp.age_slope * (f64::from(age_years) - bp.age_pivot).max(0.0);
        if hypertension {
            value += bp.hypertension_offset;
        }
        value += rng.random_range(-bp.noise..=bp.noise);
        Some(clamp(value, bp.bounds.min, bp.bounds.max).round() as u16)
    }

    fn sample_ldl<R: Rng + ?Sized>(
        &self,
        age_years: u8,
        on_statin: bool,
        rng: &mut R,
    ) -> Option<u16> {
        let ldl = &self.config.ldl;
        if !rng.random_bool(ldl.probability) {
            return None;
        }
        let mut value =
            ldl.base + ldl.age_slope * (f64::from(age_years) - ldl.age_pivot).max(0.0);
        value += rng.random_range(-ldl.noise..=ldl.noise);
        if on_statin {
            value -= rng.random_range(ldl.statin_reduction.min..=ldl.statin_reduction.max);
        }
        Some(clamp(value, ldl.bounds.min, ldl.bounds.max).round() as u16)
    }
}

fn weighted(name: &str, weights: &[u32]) -> Result<WeightedIndex<u32>> {
    WeightedIndex::new(weights.iter().copied())
        .map_err(|e| SynthError::invalid_config(format!("{name}: {e}")))
}

/// Enforce the cross-field history invariants on a profile
///
/// - a recent event with no vascular-bed history implies a heart attack
/// - any vascular-bed history implies clinical ASCVD history
/// - multi-site plaque is set iff two or more beds have history
///
/// Pure and idempotent; draws nothing from the random stream.
pub fn enforce_consistency(profile: &mut PatientProfile) {
    if profile.recent_cardio_event_12mo && !profile.has_event_history() {
        profile.heart_attack_history = true;
    }
    if profile.has_event_history() {
        profile.clinical_ascvd_history = true;
    }
    profile.multi_plaque_dev = profile.history_event_count() >= 2;
}
