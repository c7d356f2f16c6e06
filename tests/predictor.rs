//! End-to-end tests for the prediction pipeline.
//!
//! These tests exercise the full path a host process takes: write artifacts
//! to a directory, load them through `GradePredictor::from_dir`, and serve
//! predictions and recommendations from the result.

use gradecast::persist::{ArtifactBundle, MODEL_FILE, SCALER_FILE};
use gradecast::testing::{
    demo_bundle, demo_encoders, demo_feature_columns, identity_scaler, sample_record, split_tree,
};
use gradecast::{recommend, GradePredictor, PredictError, RegressionForest, StudentRecord};

fn at_risk_record() -> StudentRecord {
    StudentRecord {
        gender: Some("Male".to_owned()),
        race_ethnicity: Some("group B".to_owned()),
        parental_level_of_education: Some("high school".to_owned()),
        lunch: Some("free/reduced".to_owned()),
        test_preparation_course: Some("none".to_owned()),
        study_hours_per_week: 10.0,
        attendance_rate: 80.0,
        previous_grade: 60.0,
    }
}

/// Bundle whose single tree splits on scaled study hours at 15.
fn study_hours_bundle() -> ArtifactBundle {
    let forest = RegressionForest::from_trees(vec![split_tree(5, 15.0, 55.0, 78.0)], 8);
    ArtifactBundle::new(
        forest,
        identity_scaler(8),
        demo_encoders(),
        demo_feature_columns(),
    )
    .expect("bundle is valid")
}

// =============================================================================
// Disk round trip
// =============================================================================

#[test]
fn saved_bundle_serves_identical_predictions() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let bundle = demo_bundle(&[58.0, 64.0, 70.0]);
    bundle.save_dir(dir.path()).expect("save artifacts");

    let in_memory = GradePredictor::new(bundle);
    let from_disk = GradePredictor::from_dir(dir.path());
    assert!(from_disk.is_loaded());

    let record = sample_record();
    let a = in_memory.predict_grade(&record).expect("in-memory prediction");
    let b = from_disk.predict_grade(&record).expect("from-disk prediction");

    assert_eq!(a.grade, b.grade);
    assert_eq!(a.confidence, b.confidence);
}

#[test]
fn missing_directory_degrades_to_unloaded() {
    let predictor = GradePredictor::from_dir("/no/such/artifact/dir");

    assert!(!predictor.is_loaded());
    assert!(predictor.bundle().is_none());

    let reason = predictor.load_failure().expect("load failure recorded");
    assert!(!reason.is_empty());

    // Every input gets the same structured refusal.
    for record in [sample_record(), at_risk_record(), StudentRecord::default()] {
        match predictor.predict_grade(&record) {
            Err(PredictError::NotLoaded { reason }) => assert!(!reason.is_empty()),
            other => panic!("expected NotLoaded, got {other:?}"),
        }
    }
}

#[test]
fn corrupt_model_file_degrades_to_unloaded() {
    let dir = tempfile::tempdir().expect("create temp dir");
    demo_bundle(&[60.0]).save_dir(dir.path()).expect("save artifacts");
    std::fs::write(dir.path().join(MODEL_FILE), b"{ not json").expect("corrupt model file");

    let predictor = GradePredictor::from_dir(dir.path());

    assert!(!predictor.is_loaded());
    let reason = predictor.load_failure().expect("load failure recorded");
    assert!(reason.contains(MODEL_FILE));
}

#[test]
fn missing_single_artifact_degrades_to_unloaded() {
    let dir = tempfile::tempdir().expect("create temp dir");
    demo_bundle(&[60.0]).save_dir(dir.path()).expect("save artifacts");
    std::fs::remove_file(dir.path().join(SCALER_FILE)).expect("remove scaler file");

    let predictor = GradePredictor::from_dir(dir.path());

    assert!(!predictor.is_loaded());
    let reason = predictor.load_failure().expect("load failure recorded");
    assert!(reason.contains(SCALER_FILE));
}

// =============================================================================
// Feature routing
// =============================================================================

#[test]
fn numeric_features_route_tree_splits() {
    let predictor = GradePredictor::new(study_hours_bundle());

    let mut record = sample_record();
    record.study_hours_per_week = 10.0;
    let low = predictor.predict_grade(&record).expect("prediction");
    assert_eq!(low.grade, 55.0);

    record.study_hours_per_week = 30.0;
    let high = predictor.predict_grade(&record).expect("prediction");
    assert_eq!(high.grade, 78.0);

    // single tree, no spread
    assert_eq!(low.confidence, 100.0);
    assert_eq!(high.confidence, 100.0);
}

#[test]
fn unseen_category_encodes_as_zero_end_to_end() {
    // Tree splits on gender_encoded at 0.5: code 0 goes left, code 1 right.
    let forest = RegressionForest::from_trees(vec![split_tree(0, 0.5, 40.0, 90.0)], 8);
    let bundle = ArtifactBundle::new(
        forest,
        identity_scaler(8),
        demo_encoders(),
        demo_feature_columns(),
    )
    .expect("bundle is valid");
    let predictor = GradePredictor::new(bundle);

    let mut record = sample_record();
    record.gender = Some("Male".to_owned());
    assert_eq!(predictor.predict_grade(&record).expect("prediction").grade, 90.0);

    // Unknown label falls back to code 0, same as the first fitted class.
    record.gender = Some("unspecified".to_owned());
    assert_eq!(predictor.predict_grade(&record).expect("prediction").grade, 40.0);

    record.gender = None;
    assert_eq!(predictor.predict_grade(&record).expect("prediction").grade, 40.0);
}

// =============================================================================
// Prediction + recommendation chain
// =============================================================================

#[test]
fn at_risk_student_full_chain() {
    let predictor = GradePredictor::new(demo_bundle(&[55.0, 55.0]));
    let record = at_risk_record();

    let prediction = predictor.predict_grade(&record).expect("prediction");
    assert_eq!(prediction.grade, 55.0);

    let suggestions = recommend(&record, prediction.grade);
    assert!(suggestions.len() >= 5);
    assert!(suggestions[..4].iter().all(|r| r.priority == 1));

    let categories: Vec<_> = suggestions.iter().map(|r| r.category.as_str()).collect();
    assert_eq!(
        categories,
        vec![
            "Study Time",
            "Attendance",
            "Test Preparation",
            "Mathematics",
            "Study Strategy",
        ]
    );
}

#[test]
fn strong_student_full_chain() {
    let predictor = GradePredictor::new(demo_bundle(&[82.0, 82.0]));
    let record = StudentRecord {
        study_hours_per_week: 30.0,
        attendance_rate: 97.0,
        test_preparation_course: Some("completed".to_owned()),
        ..sample_record()
    };

    let prediction = predictor.predict_grade(&record).expect("prediction");
    assert_eq!(prediction.grade, 82.0);

    let suggestions = recommend(&record, prediction.grade);
    assert!(suggestions.is_empty());
}
