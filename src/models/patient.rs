//! Patient entity model
//!
//! A `PatientProfile` holds every sampled attribute of one synthetic patient. Scoring and
//! staging attach a `RiskAssessment`, producing an immutable `PatientRecord`.

use crate::algorithm::numeric::bmi;
use crate::error::{Result, SynthError};
use crate::models::types::{ActivityLevel, HealthLabel, PlaqueStage, Sex, SmokingStatus};

/// All sampled attributes of a synthetic patient
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientProfile {
    /// Age in whole years
    pub age_years: u8,
    /// Sex
    pub sex: Sex,
    /// Height in centimetres
    pub height_cm: u16,
    /// Weight in kilograms
    pub weight_kg: u16,
    /// Smoking status
    pub smoking_status: SmokingStatus,
    /// Physical activity level
    pub activity_level: ActivityLevel,
    /// First-degree family history of heart disease
    pub family_history_heart_disease: bool,
    /// Diagnosed hypertension
    pub hypertension: bool,
    /// Diagnosed diabetes
    pub diabetes: bool,
    /// Currently on a statin
    pub on_statin: bool,
    /// Currently on blood-pressure medication
    pub on_bp_meds: bool,
    /// Clinical ASCVD history
    pub clinical_ascvd_history: bool,
    /// Prior myocardial infarction
    pub heart_attack_history: bool,
    /// Prior stroke or transient ischaemic attack
    pub stroke_tia_history: bool,
    /// Peripheral artery disease
    pub peripheral_artery_disease_history: bool,
    /// Acute cardiovascular event within the last 12 months
    pub recent_cardio_event_12mo: bool,
    /// Disease present in two or more vascular beds
    pub multi_plaque_dev: bool,
    /// Systolic blood pressure, when measured
    pub blood_pressure_mmhg: Option<u16>,
    /// LDL cholesterol, when measured
    pub ldl_mg_dl: Option<u16>,
}

impl PatientProfile {
    /// Create a new builder for a patient profile
    #[must_use]
    pub fn builder() -> PatientProfileBuilder {
        PatientProfileBuilder::new()
    }

    /// Body-mass index derived from height and weight
    #[must_use]
    pub fn bmi(&self) -> f64 {
        bmi(self.height_cm, self.weight_kg)
    }

    /// Number of vascular beds with a recorded event (heart attack, stroke/TIA, PAD)
    #[must_use]
    pub fn history_event_count(&self) -> u8 {
        u8::from(self.heart_attack_history)
            + u8::from(self.stroke_tia_history)
            + u8::from(self.peripheral_artery_disease_history)
    }

    /// Whether any vascular-bed history flag is set
    #[must_use]
    pub fn has_event_history(&self) -> bool {
        self.history_event_count() > 0
    }
}

/// Builder for assembling a patient profile field by field
///
/// Demographic and behavioral fields are required; clinical flags default to `false`
/// and labs default to absent.
#[derive(Debug, Clone, Default)]
pub struct PatientProfileBuilder {
    age_years: Option<u8>,
    sex: Option<Sex>,
    height_cm: Option<u16>,
    weight_kg: Option<u16>,
    smoking_status: Option<SmokingStatus>,
    activity_level: Option<ActivityLevel>,
    family_history_heart_disease: bool,
    hypertension: bool,
    diabetes: bool,
    on_statin: bool,
    on_bp_meds: bool,
    clinical_ascvd_history: bool,
    heart_attack_history: bool,
    stroke_tia_history: bool,
    peripheral_artery_disease_history: bool,
    recent_cardio_event_12mo: bool,
    multi_plaque_dev: bool,
    blood_pressure_mmhg: Option<u16>,
    ldl_mg_dl: Option<u16>,
}

impl PatientProfileBuilder {
    /// Create an empty builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the age in years
    #[must_use]
    pub const fn age_years(mut self, age: u8) -> Self {
        self.age_years = Some(age);
        self
    }

    /// Set the sex
    #[must_use]
    pub const fn sex(mut self, sex: Sex) -> Self {
        self.sex = Some(sex);
        self
    }

    /// Set the height in centimetres
    #[must_use]
    pub const fn height_cm(mut self, height: u16) -> Self {
        self.height_cm = Some(height);
        self
    }

    /// Set the weight in kilograms
    #[must_use]
    pub const fn weight_kg(mut self, weight: u16) -> Self {
        self.weight_kg = Some(weight);
        self
    }

    /// Set the smoking status
    #[must_use]
    pub const fn smoking_status(mut self, status: SmokingStatus) -> Self {
        self.smoking_status = Some(status);
        self
    }

    /// Set the activity level
    #[must_use]
    pub const fn activity_level(mut self, level: ActivityLevel) -> Self {
        self.activity_level = Some(level);
        self
    }

    /// Set family history of heart disease
    #[must_use]
    pub const fn family_history_heart_disease(mut self, value: bool) -> Self {
        self.family_history_heart_disease = value;
        self
    }

    /// Set hypertension
    #[must_use]
    pub const fn hypertension(mut self, value: bool) -> Self {
        self.hypertension = value;
        self
    }

    /// Set diabetes
    #[must_use]
    pub const fn diabetes(mut self, value: bool) -> Self {
        self.diabetes = value;
        self
    }

    /// Set statin use
    #[must_use]
    pub const fn on_statin(mut self, value: bool) -> Self {
        self.on_statin = value;
        self
    }

    /// Set blood-pressure medication use
    #[must_use]
    pub const fn on_bp_meds(mut self, value: bool) -> Self {
        self.on_bp_meds = value;
        self
    }

    /// Set clinical ASCVD history
    #[must_use]
    pub const fn clinical_ascvd_history(mut self, value: bool) -> Self {
        self.clinical_ascvd_history = value;
        self
    }

    /// Set heart-attack history
    #[must_use]
    pub const fn heart_attack_history(mut self, value: bool) -> Self {
        self.heart_attack_history = value;
        self
    }

    /// Set stroke/TIA history
    #[must_use]
    pub const fn stroke_tia_history(mut self, value: bool) -> Self {
        self.stroke_tia_history = value;
        self
    }

    /// Set peripheral artery disease history
    #[must_use]
    pub const fn peripheral_artery_disease_history(mut self, value: bool) -> Self {
        self.peripheral_artery_disease_history = value;
        self
    }

    /// Set the recent (12 month) cardiovascular event flag
    #[must_use]
    pub const fn recent_cardio_event_12mo(mut self, value: bool) -> Self {
        self.recent_cardio_event_12mo = value;
        self
    }

    /// Set the multi-site plaque flag
    #[must_use]
    pub const fn multi_plaque_dev(mut self, value: bool) -> Self {
        self.multi_plaque_dev = value;
        self
    }

    /// Set the measured systolic blood pressure
    #[must_use]
    pub const fn blood_pressure_mmhg(mut self, value: Option<u16>) -> Self {
        self.blood_pressure_mmhg = value;
        self
    }

    /// Set the measured LDL cholesterol
    #[must_use]
    pub const fn ldl_mg_dl(mut self, value: Option<u16>) -> Self {
        self.ldl_mg_dl = value;
        self
    }

    /// Build the patient profile
    ///
    /// Fails with `MissingField` when a required field was never set and with
    /// `InvalidArgument` when height or weight is zero.
    pub fn build(self) -> Result<PatientProfile> {
        let height_cm = self.height_cm.ok_or(SynthError::MissingField("height_cm"))?;
        let weight_kg = self.weight_kg.ok_or(SynthError::MissingField("weight_kg"))?;
        if height_cm == 0 || weight_kg == 0 {
            return Err(SynthError::invalid_argument(
                "height_cm and weight_kg must be positive",
            ));
        }

        Ok(PatientProfile {
            age_years: self.age_years.ok_or(SynthError::MissingField("age_years"))?,
            sex: self.sex.ok_or(SynthError::MissingField("sex"))?,
            height_cm,
            weight_kg,
            smoking_status: self
                .smoking_status
                .ok_or(SynthError::MissingField("smoking_status"))?,
            activity_level: self
                .activity_level
                .ok_or(SynthError::MissingField("activity_level"))?,
            family_history_heart_disease: self.family_history_heart_disease,
            hypertension: self.hypertension,
            diabetes: self.diabetes,
            on_statin: self.on_statin,
            on_bp_meds: self.on_bp_meds,
            clinical_ascvd_history: self.clinical_ascvd_history,
            heart_attack_history: self.heart_attack_history,
            stroke_tia_history: self.stroke_tia_history,
            peripheral_artery_disease_history: self.peripheral_artery_disease_history,
            recent_cardio_event_12mo: self.recent_cardio_event_12mo,
            multi_plaque_dev: self.multi_plaque_dev,
            blood_pressure_mmhg: self.blood_pressure_mmhg,
            ldl_mg_dl: self.ldl_mg_dl,
        })
    }
}

/// Derived risk fields attached to a profile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiskAssessment {
    /// Bounded risk score (0-100)
    pub risk_score: u8,
    /// Ordinal plaque stage
    pub plaque_stage: PlaqueStage,
    /// Healthy iff stage 0
    pub health_label: HealthLabel,
}

impl RiskAssessment {
    /// Create an assessment, deriving the health label from the stage
    #[must_use]
    pub fn new(risk_score: u8, plaque_stage: PlaqueStage) -> Self {
        Self {
            risk_score,
            plaque_stage,
            health_label: HealthLabel::from(plaque_stage),
        }
    }
}

/// A completed synthetic patient record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientRecord {
    /// Sampled attributes
    pub profile: PatientProfile,
    /// Derived score, stage and label
    pub assessment: RiskAssessment,
}

impl PatientRecord {
    /// Attach an assessment to a profile
    #[must_use]
    pub const fn new(profile: PatientProfile, assessment: RiskAssessment) -> Self {
        Self {
            profile,
            assessment,
        }
    }

    /// Risk score (0-100)
    #[must_use]
    pub const fn risk_score(&self) -> u8 {
        self.assessment.risk_score
    }

    /// Plaque stage
    #[must_use]
    pub const fn plaque_stage(&self) -> PlaqueStage {
        self.assessment.plaque_stage
    }

    /// Health label
    #[must_use]
    pub const fn health_label(&self) -> HealthLabel {
        self.assessment.health_label
    }
}
