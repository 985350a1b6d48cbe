//! Plaque stage classification
//!
//! Rules are evaluated from the most severe stage down; the first match wins.

use crate::config::StagingRules;
use crate::models::{PatientProfile, PlaqueStage};

/// Classify with the current rule revision
#[must_use]
pub fn stage(score: u8, profile: &PatientProfile) -> PlaqueStage {
    stage_with(score, profile, &StagingRules::current())
}

/// Classify with explicit stage thresholds
#[must_use]
pub fn stage_with(score: u8, profile: &PatientProfile, rules: &StagingRules) -> PlaqueStage {
    if profile.recent_cardio_event_12mo
        || profile.multi_plaque_dev
        || profile.history_event_count() >= rules.multi_event_count
        || score >= rules.stage4_score
    {
        PlaqueStage::Stage4
    } else if profile.clinical_ascvd_history
        || profile.has_event_history()
        || score >= rules.stage3_score
    {
        PlaqueStage::Stage3
    } else if score >= rules.stage2_score {
        PlaqueStage::Stage2
    } else if score >= rules.stage1_score {
        PlaqueStage::Stage1
    } else {
        PlaqueStage::Stage0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActivityLevel, Sex, SmokingStatus};

    fn plain_profile() -> PatientProfile {
        PatientProfile::builder()
            .age_years(40)
            .sex(Sex::Female)
            .height_cm(165)
            .weight_kg(60)
            .smoking_status(SmokingStatus::Never)
            .activity_level(ActivityLevel::Moderate)
            .build()
            .unwrap()
    }

    #[test]
    fn test_score_thresholds() {
        let p = plain_profile();
        assert_eq!(stage(0, &p), PlaqueStage::Stage0);
        assert_eq!(stage(19, &p), PlaqueStage::Stage0);
        assert_eq!(stage(20, &p), PlaqueStage::Stage1);
        assert_eq!(stage(44, &p), PlaqueStage::Stage1);
        assert_eq!(stage(45, &p), PlaqueStage::Stage2);
        assert_eq!(stage(65, &p), PlaqueStage::Stage3);
        assert_eq!(stage(84, &p), PlaqueStage::Stage3);
        assert_eq!(stage(85, &p), PlaqueStage::Stage4);
        assert_eq!(stage(100, &p), PlaqueStage::Stage4);
    }

    #[test]
    fn test_stage_non_decreasing_in_score() {
        let p = plain_profile();
        let mut previous = PlaqueStage::Stage0;
        for score in 0..=100 {
            let current = stage(score, &p);
            assert!(current >= previous);
            previous = current;
        }
    }

    #[test]
    fn test_recent_event_forces_stage4() {
        let mut p = plain_profile();
        p.recent_cardio_event_12mo = true;
        assert_eq!(stage(0, &p), PlaqueStage::Stage4);
    }

    #[test]
    fn test_two_histories_force_stage4() {
        let mut p = plain_profile();
        p.heart_attack_history = true;
        p.stroke_tia_history = true;
        assert_eq!(stage(5, &p), PlaqueStage::Stage4);
    }

    #[test]
    fn test_single_history_or_ascvd_is_stage3() {
        let mut p = plain_profile();
        p.peripheral_artery_disease_history = true;
        assert_eq!(stage(5, &p), PlaqueStage::Stage3);

        let mut q = plain_profile();
        q.clinical_ascvd_history = true;
        assert_eq!(stage(5, &q), PlaqueStage::Stage3);
        assert_eq!(stage(90, &q), PlaqueStage::Stage4);
    }

    #[test]
    fn test_legacy_thresholds() {
        let p = plain_profile();
        let legacy = StagingRules::legacy();
        assert_eq!(stage_with(15, &p, &legacy), PlaqueStage::Stage1);
        assert_eq!(stage_with(40, &p, &legacy), PlaqueStage::Stage2);
        assert_eq!(stage_with(60, &p, &legacy), PlaqueStage::Stage3);
        assert_eq!(stage_with(80, &p, &legacy), PlaqueStage::Stage4);
    }
}
