//! Deterministic risk scoring
//!
//! The score is the sum of the additive terms of a `ScoringRules` table, clamped to
//! [0, 100] once at the end and truncated to an integer. Individual terms are not capped.

use std::sync::LazyLock;

use crate::algorithm::numeric::clamp;
use crate::config::ScoringRules;
use crate::config::rules::tier_points;
use crate::models::{ActivityLevel, PatientProfile, Sex, SmokingStatus};

/// Lowest possible risk score
pub const MIN_SCORE: u8 = 0;
/// Highest possible risk score
pub const MAX_SCORE: u8 = 100;

static CURRENT_RULES: LazyLock<ScoringRules> = LazyLock::new(ScoringRules::current);

/// Score a profile with the current rule revision
#[must_use]
pub fn score(profile: &PatientProfile) -> u8 {
    score_with(profile, &CURRENT_RULES)
}

/// Score a profile with an explicit rule table
#[must_use]
pub fn score_with(profile: &PatientProfile, rules: &ScoringRules) -> u8 {
    let raw = raw_score(profile, rules);
    clamp(raw, f64::from(MIN_SCORE), f64::from(MAX_SCORE)) as u8
}

/// Unclamped sum of every applicable term
#[must_use]
pub fn raw_score(profile: &PatientProfile, rules: &ScoringRules) -> f64 {
    let mut total = rules.age.points(profile.age_years);

    if profile.sex == Sex::Male {
        total += rules.male;
    }

    total += tier_points(&rules.bmi_tiers, profile.bmi());

    total += match profile.smoking_status {
        SmokingStatus::Current => rules.smoking_current,
        SmokingStatus::Former => rules.smoking_former,
        SmokingStatus::Never => 0.0,
    };

    total += match profile.activity_level {
        ActivityLevel::Low => rules.activity_low,
        ActivityLevel::Moderate => rules.activity_moderate,
        ActivityLevel::High => 0.0,
    };

    // Absent labs contribute nothing
    if let Some(bp) = profile.blood_pressure_mmhg {
        total += tier_points(&rules.blood_pressure_tiers, f64::from(bp));
    }
    if let Some(ldl) = profile.ldl_mg_dl {
        total += tier_points(&rules.ldl_tiers, f64::from(ldl));
    }

    for (flag, weight) in [
        (profile.family_history_heart_disease, rules.family_history),
        (profile.hypertension, rules.hypertension),
        (profile.diabetes, rules.diabetes),
        (profile.on_bp_meds, rules.on_bp_meds),
        (profile.on_statin, rules.on_statin),
        (profile.clinical_ascvd_history, rules.clinical_ascvd_history),
        (profile.heart_attack_history, rules.heart_attack_history),
        (profile.stroke_tia_history, rules.stroke_tia_history),
        (
            profile.peripheral_artery_disease_history,
            rules.peripheral_artery_disease_history,
        ),
        (profile.recent_cardio_event_12mo, rules.recent_cardio_event),
        (profile.multi_plaque_dev, rules.multi_plaque),
    ] {
        if flag {
            total += weight;
        }
    }

    total
}
