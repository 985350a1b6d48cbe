//! Tests for risk scoring and stage classification

use plaque_synth::algorithm::scoring::score_with;
use plaque_synth::algorithm::staging::stage_with;
use plaque_synth::models::PatientProfileBuilder;
use plaque_synth::{
    ActivityLevel, HealthLabel, PatientProfile, PlaqueStage, RuleSet, Sex, SmokingStatus,
    assess, generate_dataset, score, stage,
};

fn example_builder() -> PatientProfileBuilder {
    PatientProfile::builder()
        .age_years(50)
        .sex(Sex::Male)
        .height_cm(175)
        .weight_kg(85)
        .smoking_status(SmokingStatus::Former)
        .activity_level(ActivityLevel::Moderate)
        .hypertension(true)
        .on_bp_meds(true)
}

#[test]
fn test_reference_example() {
    let profile = example_builder().build().unwrap();
    let bmi = profile.bmi();
    assert!((25.0..30.0).contains(&bmi));

    let risk_score = score(&profile);
    assert_eq!(risk_score, 55);
    assert_eq!(stage(risk_score, &profile), PlaqueStage::Stage2);

    let assessment = assess(&profile, &RuleSet::current());
    assert_eq!(assessment.risk_score, 55);
    assert_eq!(assessment.plaque_stage, PlaqueStage::Stage2);
    assert_eq!(assessment.health_label, HealthLabel::Risk);
}

#[test]
fn test_recent_event_overrides_score() {
    let profile = PatientProfile::builder()
        .age_years(25)
        .sex(Sex::Female)
        .height_cm(165)
        .weight_kg(58)
        .smoking_status(SmokingStatus::Never)
        .activity_level(ActivityLevel::High)
        .recent_cardio_event_12mo(true)
        .build()
        .unwrap();
    for s in [0, 10, 50, 100] {
        assert_eq!(stage(s, &profile), PlaqueStage::Stage4);
    }
}

#[test]
fn test_score_monotone_in_age() {
    let mut previous = 0;
    for age in 18..=90 {
        let current = score(&example_builder().age_years(age).build().unwrap());
        assert!(current >= previous, "age {age}: {current} < {previous}");
        previous = current;
    }
}

#[test]
fn test_score_monotone_in_bmi() {
    let mut previous = 0;
    for weight in 40..=180 {
        let current = score(&example_builder().weight_kg(weight).build().unwrap());
        assert!(current >= previous, "weight {weight}: {current} < {previous}");
        previous = current;
    }
}

#[test]
fn test_score_monotone_in_labs() {
    let without = score(&example_builder().build().unwrap());
    let mut previous_bp = without;
    let mut previous_ldl = without;
    for value in 40..=260 {
        let bp = score(&example_builder().blood_pressure_mmhg(Some(value)).build().unwrap());
        let ldl = score(&example_builder().ldl_mg_dl(Some(value)).build().unwrap());
        assert!(bp >= previous_bp);
        assert!(ldl >= previous_ldl);
        previous_bp = bp;
        previous_ldl = ldl;
    }
}

#[test]
fn test_generated_profiles_monotone_in_age() {
    for record in generate_dataset(1000, 31).unwrap() {
        let mut older = record.profile.clone();
        if older.age_years < 90 {
            older.age_years += 1;
            assert!(score(&older) >= record.risk_score());
        }
    }
}

#[test]
fn test_stage_non_decreasing_for_generated_profiles() {
    let rules = RuleSet::current();
    for record in generate_dataset(300, 32).unwrap() {
        let mut previous = PlaqueStage::Stage0;
        for s in 0..=100 {
            let current = stage_with(s, &record.profile, &rules.staging);
            assert!(current >= previous);
            previous = current;
        }
    }
}

#[test]
fn test_rule_sets_are_swappable() {
    let profile = example_builder().build().unwrap();
    let current = RuleSet::current();
    let legacy = RuleSet::legacy();
    assert_eq!(score_with(&profile, &current.scoring), 55);
    assert_eq!(score_with(&profile, &legacy.scoring), 58);
    assert_eq!(assess(&profile, &legacy).plaque_stage, PlaqueStage::Stage2);
}
