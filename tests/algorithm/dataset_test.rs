//! Tests for dataset generation properties

use plaque_synth::config::StreamMode;
use plaque_synth::{
    DatasetGenerator, GeneratorConfig, HealthLabel, PlaqueStage, SynthError, generate_dataset,
    write_csv,
};

#[test]
fn test_scores_and_stages_are_bounded() {
    let records = generate_dataset(3000, 101).unwrap();
    assert_eq!(records.len(), 3000);
    for record in &records {
        assert!(record.risk_score() <= 100);
        assert!(record.plaque_stage().as_u8() <= 4);
    }
}

#[test]
fn test_history_flags_imply_ascvd() {
    for record in generate_dataset(3000, 202).unwrap() {
        let p = &record.profile;
        if p.heart_attack_history || p.stroke_tia_history || p.peripheral_artery_disease_history {
            assert!(p.clinical_ascvd_history);
        }
        if p.recent_cardio_event_12mo {
            assert!(p.clinical_ascvd_history);
            assert!(p.history_event_count() >= 1);
        }
    }
}

#[test]
fn test_multi_plaque_iff_two_histories() {
    let records = generate_dataset(5000, 303).unwrap();
    for record in &records {
        let p = &record.profile;
        assert_eq!(p.multi_plaque_dev, p.history_event_count() >= 2);
    }
}

#[test]
fn test_health_label_matches_stage() {
    for record in generate_dataset(2000, 404).unwrap() {
        assert_eq!(
            record.health_label() == HealthLabel::Healthy,
            record.plaque_stage() == PlaqueStage::Stage0
        );
    }
}

#[test]
fn test_recent_event_always_stage4() {
    let records = generate_dataset(5000, 505).unwrap();
    let with_event: Vec<_> = records
        .iter()
        .filter(|r| r.profile.recent_cardio_event_12mo)
        .collect();
    assert!(!with_event.is_empty());
    for record in with_event {
        assert_eq!(record.plaque_stage(), PlaqueStage::Stage4);
    }
}

#[test]
fn test_identical_arguments_give_identical_bytes() {
    let mut first = Vec::new();
    let mut second = Vec::new();
    write_csv(&generate_dataset(500, 606).unwrap(), &mut first).unwrap();
    write_csv(&generate_dataset(500, 606).unwrap(), &mut second).unwrap();
    assert_eq!(first, second);

    let mut other = Vec::new();
    write_csv(&generate_dataset(500, 607).unwrap(), &mut other).unwrap();
    assert_ne!(first, other);
}

#[test]
fn test_per_record_streams_independent_of_count() {
    let small = GeneratorConfig::builder()
        .n(10)
        .seed(9)
        .stream_mode(StreamMode::PerRecord)
        .build();
    let large = GeneratorConfig::builder()
        .n(100)
        .seed(9)
        .stream_mode(StreamMode::PerRecord)
        .build();
    let a = DatasetGenerator::new(small).unwrap().generate().unwrap();
    let b = DatasetGenerator::new(large)
        .unwrap()
        .generate_parallel()
        .unwrap();
    assert_eq!(a[..], b[..10]);
}

#[test]
fn test_zero_records_is_invalid_argument() {
    let config = GeneratorConfig::builder().n(0).build();
    assert!(matches!(
        DatasetGenerator::new(config),
        Err(SynthError::InvalidArgument(_))
    ));
}

#[test]
fn test_every_stage_occurs_in_a_large_cohort() {
    let records = generate_dataset(5000, 808).unwrap();
    for stage in PlaqueStage::ALL {
        assert!(
            records.iter().any(|r| r.plaque_stage() == stage),
            "no record in stage {stage}"
        );
    }
}
