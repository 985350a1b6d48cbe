//! Tests for rule table and sampling configuration loading

use std::fs;
use std::path::PathBuf;

use plaque_synth::config::{ScoringRules, StagingRules, Tier};
use plaque_synth::{
    DatasetGenerator, GeneratorConfig, RuleSet, SamplingConfig, SynthError, generate_dataset,
};

fn temp_file(name: &str, content: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("plaque_synth_{}_{name}", std::process::id()));
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_rule_table_loaded_from_json_file() {
    let mut scoring = ScoringRules::current();
    scoring.ldl_tiers = vec![Tier::new(130.0, 5.0), Tier::new(190.0, 15.0)];
    let rules = RuleSet::new("stricter-ldl", scoring, StagingRules::current()).unwrap();

    let path = temp_file("rules.json", &rules.to_json_string().unwrap());
    let loaded = RuleSet::from_json_file(&path).unwrap();
    fs::remove_file(&path).ok();

    assert_eq!(loaded, rules);
    assert_eq!(loaded.name, "stricter-ldl");
}

#[test]
fn test_invalid_rule_file_rejected() {
    let mut rules = RuleSet::current();
    rules.staging.stage1_score = 70;
    let path = temp_file("bad_rules.json", &rules.to_json_string().unwrap());
    let result = RuleSet::from_json_file(&path);
    fs::remove_file(&path).ok();

    assert!(matches!(result, Err(SynthError::InvalidConfig(_))));
}

#[test]
fn test_missing_rule_file_is_io_error() {
    let result = RuleSet::from_json_file(&PathBuf::from("/no/such/rules.json"));
    assert!(matches!(result, Err(SynthError::Io { .. })));
}

#[test]
fn test_sampling_overrides_change_cohort() {
    let path = temp_file(
        "sampling.json",
        r#"{ "smoking_weights": [0, 0, 1], "family_history_probability": 1.0 }"#,
    );
    let sampling = SamplingConfig::from_json_file(&path).unwrap();
    fs::remove_file(&path).ok();

    let config = GeneratorConfig::builder().n(200).seed(1).sampling(sampling).build();
    let records = DatasetGenerator::new(config).unwrap().generate().unwrap();
    for record in &records {
        assert_eq!(record.profile.smoking_status, plaque_synth::SmokingStatus::Current);
        assert!(record.profile.family_history_heart_disease);
    }
}

#[test]
fn test_legacy_rules_change_scores_not_profiles() {
    let current = generate_dataset(200, 12).unwrap();
    let config = GeneratorConfig::builder()
        .n(200)
        .seed(12)
        .rules(RuleSet::legacy())
        .build();
    let legacy = DatasetGenerator::new(config).unwrap().generate().unwrap();

    for (a, b) in current.iter().zip(&legacy) {
        assert_eq!(a.profile, b.profile);
    }
    assert!(current.iter().zip(&legacy).any(|(a, b)| a.risk_score() != b.risk_score()));
}
