//! End-to-end tests for loading artifacts from disk and predicting.

use std::path::{Path, PathBuf};

use anipv_core::{FeatureInput, FeatureRow};
use anipv_model::{load_model, LoadError, ModelState};

fn fixture_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("fixtures")
        .join("random_forest_model.json")
}

/// Write `contents` to a per-test file under the system temp dir.
fn temp_artifact(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("anipv-{}-{name}.json", std::process::id()));
    std::fs::write(&path, contents).expect("write temp artifact");
    path
}

fn scenario_row() -> FeatureRow {
    FeatureRow::try_from(FeatureInput {
        anime_type: 2,
        is_adapted: 1,
        air_time: 1,
        is_exclusive: 0,
        origin: 1,
        episode_count: 12,
        likes: 50_000,
        coins: 20_000,
        collects: 10_000,
        shares: 5_000,
        topic_0: 0.1,
        topic_1: 0.1,
        topic_2: 0.1,
        topic_3: 0.1,
        topic_4: 0.1,
    })
    .expect("scenario row is in domain")
}

#[test]
fn scenario_prediction_is_finite_and_non_negative() {
    let model = load_model(&fixture_path()).expect("fixture loads");
    let value = model.predict(&scenario_row()).expect("predict");
    assert!(value.is_finite());
    assert!(value >= 0.0, "got {value}");
}

#[test]
fn fixture_forest_averages_expected_leaves() {
    // likes > 40k and coins > 15k -> 560; topic_0 <= 0.3, episodes <= 24 -> 410;
    // not exclusive -> 300.
    let model = load_model(&fixture_path()).expect("fixture loads");
    let value = model.predict(&scenario_row()).expect("predict");
    assert!((value - (560.0 + 410.0 + 300.0) / 3.0).abs() < 1e-9, "got {value}");

    let summary = model.summary();
    assert_eq!(summary.kind, "random_forest");
    assert_eq!(summary.estimators, 3);
    assert_eq!(summary.nodes, 13);
}

#[test]
fn loading_twice_gives_identical_predictions() {
    let first = load_model(&fixture_path()).expect("first load");
    let second = load_model(&fixture_path()).expect("second load");
    let row = scenario_row();
    assert_eq!(
        first.predict(&row).expect("predict").to_bits(),
        second.predict(&row).expect("predict").to_bits()
    );
    assert_eq!(first.fingerprint(), second.fingerprint());
}

#[test]
fn boundary_rows_predict() {
    let model = load_model(&fixture_path()).expect("fixture loads");
    for (episodes, topic) in [(1, 0.0), (500, 1.0)] {
        let mut input = FeatureInput {
            episode_count: episodes,
            ..FeatureInput::default()
        };
        input.set_topics([topic; 5]);
        let row = FeatureRow::try_from(&input).expect("boundary row is in domain");
        let value = model.predict(&row).expect("predict");
        assert!(value.is_finite());
    }
}

#[test]
fn every_categorical_combination_predicts() {
    let model = load_model(&fixture_path()).expect("fixture loads");
    for anime_type in 1..=5 {
        for flag in 0..=1 {
            for origin in 1..=3 {
                let input = FeatureInput {
                    anime_type,
                    is_adapted: flag,
                    air_time: flag,
                    is_exclusive: 1 - flag,
                    origin,
                    ..FeatureInput::default()
                };
                let row = FeatureRow::try_from(&input).expect("row");
                assert!(model.predict(&row).is_ok());
            }
        }
    }
}

#[test]
fn nonexistent_path_is_not_found() {
    let err = load_model(Path::new("/no/such/dir/random_forest_model.json")).unwrap_err();
    assert!(
        matches!(err, LoadError::NotFound { ref path } if path.ends_with("random_forest_model.json")),
        "got {err:?}"
    );
}

#[test]
fn truncated_file_is_corrupt() {
    let full = std::fs::read_to_string(fixture_path()).expect("read fixture");
    let path = temp_artifact("truncated", &full[..full.len() / 2]);
    let err = load_model(&path).unwrap_err();
    std::fs::remove_file(&path).ok();
    assert!(matches!(err, LoadError::Corrupt(_)), "got {err:?}");
}

#[test]
fn directory_path_is_corrupt_not_missing() {
    let err = load_model(&std::env::temp_dir()).unwrap_err();
    assert!(matches!(err, LoadError::Corrupt(_)), "got {err:?}");
}

#[test]
fn model_state_load_records_outcome() {
    let loaded = ModelState::load(&fixture_path());
    assert!(loaded.is_loaded());
    assert!(loaded.failure().is_none());

    let path = temp_artifact("bad-kind", r#"{"format_version":1,"kind":"svm","n_features":15}"#);
    let failed = ModelState::load(&path);
    std::fs::remove_file(&path).ok();
    assert!(matches!(failed.failure(), Some(LoadError::Corrupt(_))));
}
