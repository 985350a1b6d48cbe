//! End-to-end tests: generate a cohort and write it to disk

use std::fs;

use plaque_synth::export::COLUMNS;
use plaque_synth::{SynthError, generate_dataset, write_dataset};

#[test]
fn test_csv_file_round_trip_of_shape() {
    let records = generate_dataset(120, 2).unwrap();
    let dir = std::env::temp_dir().join(format!("plaque_synth_export_{}", std::process::id()));
    let path = dir.join("cohort.csv");

    write_dataset(&records, &path).unwrap();
    let text = fs::read_to_string(&path).unwrap();
    fs::remove_dir_all(&dir).ok();

    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 121);
    assert_eq!(lines[0], COLUMNS.join(","));

    let ldl_index = COLUMNS.iter().position(|c| *c == "ldl_mg_dL").unwrap();
    let empty_ldl = lines[1..]
        .iter()
        .filter(|line| line.split(',').nth(ldl_index) == Some(""))
        .count();
    let missing_ldl = records.iter().filter(|r| r.profile.ldl_mg_dl.is_none()).count();
    assert_eq!(empty_ldl, missing_ldl);
    assert!(!lines[1..].iter().any(|line| line.split(',').nth(ldl_index) == Some("0")));
}

#[test]
fn test_parquet_file_written() {
    let records = generate_dataset(60, 3).unwrap();
    let path = std::env::temp_dir().join(format!("plaque_synth_{}.parquet", std::process::id()));

    write_dataset(&records, &path).unwrap();
    let bytes = fs::read(&path).unwrap();
    fs::remove_file(&path).ok();

    assert!(bytes.starts_with(b"PAR1"));
    assert!(bytes.ends_with(b"PAR1"));
}

#[test]
fn test_unknown_extension_rejected() {
    let records = generate_dataset(5, 4).unwrap();
    let path = std::env::temp_dir().join("plaque_synth_cohort.xlsx");
    assert!(matches!(
        write_dataset(&records, &path),
        Err(SynthError::InvalidArgument(_))
    ));
    assert!(!path.exists());
}
