//! Shared fixtures for unit and integration tests.

use std::collections::BTreeMap;

use crate::encoding::{CategoryEncoder, CategoryEncoders};
use crate::persist::ArtifactBundle;
use crate::record::StudentRecord;
use crate::repr::{RegressionForest, Tree};
use crate::scaling::StandardScaler;

/// Single-leaf tree that predicts `value` for every sample.
pub fn leaf_tree(value: f64) -> Tree {
    Tree::new(vec![0], vec![0.0], vec![0], vec![0], vec![true], vec![value])
}

/// Three-node tree: `feature <= threshold` yields `left_value`, otherwise
/// `right_value`.
pub fn split_tree(feature: u32, threshold: f64, left_value: f64, right_value: f64) -> Tree {
    Tree::new(
        vec![feature, 0, 0],
        vec![threshold, 0.0, 0.0],
        vec![1, 0, 0],
        vec![2, 0, 0],
        vec![false, true, true],
        vec![0.0, left_value, right_value],
    )
}

/// Forest of single-leaf trees, one per value in `leaf_values`.
pub fn leaf_forest(n_features: usize, leaf_values: &[f64]) -> RegressionForest {
    let trees = leaf_values.iter().map(|&v| leaf_tree(v)).collect();
    RegressionForest::from_trees(trees, n_features)
}

/// Encoders over the demo training vocabulary, classes in fitted order.
pub fn demo_encoders() -> CategoryEncoders {
    let vocabulary: [(&str, &[&str]); 5] = [
        ("gender", &["Female", "Male"]),
        (
            "race_ethnicity",
            &["group A", "group B", "group C", "group D", "group E"],
        ),
        (
            "parental_level_of_education",
            &[
                "associate's degree",
                "bachelor's degree",
                "high school",
                "master's degree",
                "some college",
                "some high school",
            ],
        ),
        ("lunch", &["free/reduced", "standard"]),
        ("test_preparation_course", &["completed", "none"]),
    ];

    let columns = vocabulary
        .into_iter()
        .map(|(column, classes)| {
            let classes = classes.iter().map(|c| (*c).to_owned()).collect();
            (column.to_owned(), CategoryEncoder::new(classes))
        })
        .collect::<BTreeMap<_, _>>();

    CategoryEncoders::new(columns)
}

/// Identity scaler over `n` features (mean 0, scale 1).
pub fn identity_scaler(n: usize) -> StandardScaler {
    StandardScaler::new(vec![0.0; n], vec![1.0; n]).expect("identity scaler is valid")
}

/// The eight feature columns in model input order.
pub fn demo_feature_columns() -> Vec<String> {
    [
        "gender_encoded",
        "race_ethnicity_encoded",
        "parental_level_of_education_encoded",
        "lunch_encoded",
        "test_preparation_course_encoded",
        "study_hours_per_week",
        "attendance_rate",
        "previous_grade",
    ]
    .into_iter()
    .map(str::to_owned)
    .collect()
}

/// A servable bundle of single-leaf trees over the demo feature layout.
pub fn demo_bundle(leaf_values: &[f64]) -> ArtifactBundle {
    ArtifactBundle::new(
        leaf_forest(8, leaf_values),
        identity_scaler(8),
        demo_encoders(),
        demo_feature_columns(),
    )
    .expect("demo bundle is valid")
}

/// A fully populated record for a well-performing student.
pub fn sample_record() -> StudentRecord {
    StudentRecord {
        gender: Some("Female".to_owned()),
        race_ethnicity: Some("group C".to_owned()),
        parental_level_of_education: Some("bachelor's degree".to_owned()),
        lunch: Some("standard".to_owned()),
        test_preparation_course: Some("completed".to_owned()),
        study_hours_per_week: 18.0,
        attendance_rate: 92.5,
        previous_grade: 74.0,
    }
}
