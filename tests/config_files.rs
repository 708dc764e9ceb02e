//! Config file loading and saving

use card_number_field::config::CardFieldConfig;
use card_number_field::error::ConfigError;
use card_number_field::{CardNumberController, Layout, RecordingHost};

#[test]
fn test_save_and_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.json");

    let config = CardFieldConfig {
        three_capacities: vec![4, 6, 4],
        transition_ms: 50,
        ..CardFieldConfig::default()
    };
    config.save_to(&path).expect("save should create parent dirs");

    let loaded = CardFieldConfig::load_from(&path).expect("load should succeed");
    assert_eq!(loaded, config);
}

#[test]
fn test_missing_file_is_file_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = CardFieldConfig::load_from(&dir.path().join("absent.json"));
    assert!(matches!(result, Err(ConfigError::FileError { .. })));
}

#[test]
fn test_invalid_file_contents_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{ "four_capacities": [8, 8] }"#).unwrap();

    let result = CardFieldConfig::load_from(&path);
    assert!(matches!(result, Err(ConfigError::InvalidParameter { .. })));
}

#[test]
fn test_loaded_capacities_drive_segments() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    // Diners Club numbers are 14 digits: 4-6-4
    std::fs::write(&path, r#"{ "three_capacities": [4, 6, 4] }"#).unwrap();

    let config = CardFieldConfig::load_from(&path).unwrap();
    let mut controller: CardNumberController<RecordingHost> =
        CardNumberController::new(config).unwrap();
    assert!(controller.set_card_number("30569309025904"));
    assert_eq!(controller.active_layout(), Layout::Three);
    assert_eq!(controller.formatted_card_number(), "3056 930902 5904");
}

#[test]
fn test_invalid_config_refused_by_controller() {
    let config = CardFieldConfig {
        single_capacity: 1,
        ..CardFieldConfig::default()
    };
    let result: Result<CardNumberController<RecordingHost>, _> = CardNumberController::new(config);
    assert!(result.is_err());
}
