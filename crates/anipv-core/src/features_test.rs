use super::*;

fn scenario_input() -> FeatureInput {
    FeatureInput {
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
    }
}

#[test]
fn to_vector_follows_schema_order() {
    // Every position gets a distinct value so a swapped column is caught.
    let input = FeatureInput {
        anime_type: 3,
        is_adapted: 1,
        air_time: 0,
        is_exclusive: 1,
        origin: 2,
        episode_count: 24,
        likes: 700,
        coins: 800,
        collects: 900,
        shares: 1_000,
        topic_0: 0.11,
        topic_1: 0.22,
        topic_2: 0.33,
        topic_3: 0.44,
        topic_4: 0.55,
    };
    let row = FeatureRow::try_from(&input).expect("valid input");

    assert_eq!(
        row.to_vector(),
        [
            3.0, 1.0, 0.0, 1.0, 2.0, 24.0, 700.0, 800.0, 900.0, 1_000.0, 0.11, 0.22, 0.33, 0.44,
            0.55
        ]
    );
}

#[test]
fn feature_names_match_row_layout() {
    assert_eq!(FEATURE_NAMES.len(), FEATURE_COUNT);
    assert_eq!(FEATURE_NAMES[0], "type");
    assert_eq!(FEATURE_NAMES[5], "episode_count");
    assert_eq!(FEATURE_NAMES[6], "likes");
    assert_eq!(FEATURE_NAMES[9], "shares");
    assert_eq!(FEATURE_NAMES[10], "topic_0");
    assert_eq!(FEATURE_NAMES[14], "topic_4");
}

#[test]
fn identical_inputs_produce_identical_vectors() {
    let a = FeatureRow::try_from(scenario_input()).expect("valid");
    let b = FeatureRow::try_from(scenario_input()).expect("valid");
    assert_eq!(a, b);
    assert_eq!(a.to_vector(), b.to_vector());
}

#[test]
fn scenario_input_converts() {
    let row = FeatureRow::try_from(scenario_input()).expect("valid");
    assert_eq!(row.anime_type, AnimeType::FantasyAdventure);
    assert!(row.is_adapted);
    assert_eq!(row.air_time, AirTime::Holiday);
    assert!(!row.is_exclusive);
    assert_eq!(row.origin, Origin::Japan);
    assert_eq!(row.episode_count.get(), 12);
    assert_eq!(row.likes, 50_000);
}

#[test]
fn episode_count_accepts_bounds() {
    assert_eq!(EpisodeCount::new(1).expect("min").get(), 1);
    assert_eq!(EpisodeCount::new(500).expect("max").get(), 500);
}

#[test]
fn episode_count_rejects_out_of_range() {
    for bad in [0, 501, -3, i64::from(u16::MAX) + 1] {
        let err = EpisodeCount::new(bad).unwrap_err();
        assert_eq!(err.field(), "episode_count", "value {bad}");
    }
}

#[test]
fn topic_weight_accepts_bounds() {
    assert!(TopicWeight::new("topic_0", 0.0).is_ok());
    assert!(TopicWeight::new("topic_0", 1.0).is_ok());
}

#[test]
fn topic_weight_rejects_nan_and_out_of_range() {
    for bad in [f64::NAN, -0.01, 1.01, f64::INFINITY] {
        assert!(
            TopicWeight::new("topic_3", bad).is_err(),
            "expected {bad} to be rejected"
        );
    }
}

#[test]
fn boundary_row_converts() {
    let mut input = scenario_input();
    input.episode_count = 500;
    input.set_topics([0.0, 1.0, 0.0, 1.0, 0.5]);
    let row = FeatureRow::try_from(&input).expect("boundary values are in domain");
    let v = row.to_vector();
    assert!((v[5] - 500.0).abs() < f64::EPSILON);
    assert_eq!(&v[10..], &[0.0, 1.0, 0.0, 1.0, 0.5]);
}

#[test]
fn invalid_type_code_names_field() {
    let mut input = scenario_input();
    input.anime_type = 6;
    let err = FeatureRow::try_from(&input).unwrap_err();
    assert!(
        matches!(err, FeatureError::InvalidChoice { field: "type", value: 6, .. }),
        "got {err:?}"
    );
}

#[test]
fn invalid_flag_code_names_field() {
    let mut input = scenario_input();
    input.is_exclusive = 2;
    let err = FeatureRow::try_from(&input).unwrap_err();
    assert_eq!(err.field(), "is_exclusive");
}

#[test]
fn invalid_origin_code_names_field() {
    let mut input = scenario_input();
    input.origin = 0;
    assert_eq!(FeatureRow::try_from(&input).unwrap_err().field(), "origin");
}

#[test]
fn negative_engagement_count_rejected() {
    let mut input = scenario_input();
    input.collects = -1;
    let err = FeatureRow::try_from(&input).unwrap_err();
    assert_eq!(
        err,
        FeatureError::Negative {
            field: "collects",
            value: -1
        }
    );
}

#[test]
fn default_input_is_valid() {
    let row = FeatureRow::try_from(FeatureInput::default()).expect("defaults must be in domain");
    assert_eq!(row.episode_count.get(), 12);
    assert_eq!(row.shares, 5_000);
}

#[test]
fn feature_input_deserializes_type_key_and_fills_defaults() {
    let input: FeatureInput =
        serde_json::from_str(r#"{"type": 4, "likes": 7}"#).expect("parse input");
    assert_eq!(input.anime_type, 4);
    assert_eq!(input.likes, 7);
    assert_eq!(input.coins, 20_000);
    assert!((input.topic_2 - 0.1).abs() < f64::EPSILON);
}

#[test]
fn categorical_codes_round_trip_through_from_code() {
    for t in AnimeType::ALL {
        assert_eq!(AnimeType::from_code(i64::from(t.code())).unwrap(), t);
    }
    for a in AirTime::ALL {
        assert_eq!(AirTime::from_code(i64::from(a.code())).unwrap(), a);
    }
    for o in Origin::ALL {
        assert_eq!(Origin::from_code(i64::from(o.code())).unwrap(), o);
    }
}
