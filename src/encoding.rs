//! Categorical encoding and feature vector assembly.
//!
//! Each categorical column carries a [`CategoryEncoder`] fitted at training
//! time: a label's code is its position in the fitted class list. Serving
//! never extends an encoder; labels outside the fitted vocabulary (and
//! missing fields, and columns with no encoder at all) encode to
//! [`UNSEEN_CATEGORY_CODE`]. That fallback is a policy, not an error.
//!
//! [`encode_features`] assembles the final vector strictly in the order
//! given by the feature-column artifact. Encoded categorical columns appear
//! there under `<column>_encoded` names; numeric columns under their record
//! field names. A column the record cannot produce is the one hard error at
//! this stage.

use std::collections::{BTreeMap, HashMap};

use thiserror::Error;

use crate::record::StudentRecord;

/// Code substituted for unseen or missing categorical values.
pub const UNSEEN_CATEGORY_CODE: f64 = 0.0;

/// Suffix marking encoded categorical columns in the feature-column list.
pub const ENCODED_SUFFIX: &str = "_encoded";

/// Errors produced while assembling a feature vector.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// The feature-column list references a column record encoding cannot
    /// produce.
    #[error("missing feature column: {0}")]
    MissingColumn(String),
}

/// Label-to-code mapping for one categorical column.
///
/// Immutable once built; the class list is the artifact, codes are derived
/// positions.
#[derive(Debug, Clone)]
pub struct CategoryEncoder {
    classes: Vec<String>,
    codes: HashMap<String, u32>,
}

impl CategoryEncoder {
    /// Build an encoder from its fitted class list.
    ///
    /// Class labels must be unique; artifact reading enforces this before
    /// construction.
    pub fn new(classes: Vec<String>) -> Self {
        let codes: HashMap<String, u32> = classes
            .iter()
            .enumerate()
            .map(|(code, label)| (label.clone(), code as u32))
            .collect();
        debug_assert_eq!(codes.len(), classes.len(), "duplicate class labels");

        Self { classes, codes }
    }

    /// The fitted class list, in code order.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Number of known classes.
    pub fn n_classes(&self) -> usize {
        self.classes.len()
    }

    /// The integer code for `label`, or `None` if it is out of vocabulary.
    pub fn code(&self, label: &str) -> Option<u32> {
        self.codes.get(label).copied()
    }

    /// Whether `label` is in the fitted vocabulary.
    pub fn is_known(&self, label: &str) -> bool {
        self.codes.contains_key(label)
    }
}

/// The per-column category encoders loaded from the artifact bundle.
#[derive(Debug, Clone, Default)]
pub struct CategoryEncoders {
    columns: BTreeMap<String, CategoryEncoder>,
}

impl CategoryEncoders {
    /// Wrap a column-name-to-encoder mapping.
    pub fn new(columns: BTreeMap<String, CategoryEncoder>) -> Self {
        Self { columns }
    }

    /// The encoder for `column`, if one was fitted.
    pub fn get(&self, column: &str) -> Option<&CategoryEncoder> {
        self.columns.get(column)
    }

    /// Number of columns with a fitted encoder.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether no encoders are present.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Iterate over `(column, encoder)` pairs in column-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CategoryEncoder)> {
        self.columns.iter().map(|(name, enc)| (name.as_str(), enc))
    }
}

/// Assemble the model input vector for `record` in `feature_columns` order.
///
/// Categorical positions carry the encoder's integer code (or
/// [`UNSEEN_CATEGORY_CODE`] per the module policy); numeric positions pass
/// the record value through unchanged. Fails only when a listed column is
/// neither an encoded categorical nor a numeric record field.
pub fn encode_features(
    record: &StudentRecord,
    encoders: &CategoryEncoders,
    feature_columns: &[String],
) -> Result<Vec<f64>, EncodeError> {
    feature_columns
        .iter()
        .map(|column| feature_value(record, encoders, column))
        .collect()
}

fn feature_value(
    record: &StudentRecord,
    encoders: &CategoryEncoders,
    column: &str,
) -> Result<f64, EncodeError> {
    if let Some(base) = column.strip_suffix(ENCODED_SUFFIX) {
        if StudentRecord::is_categorical_column(base) {
            return Ok(encoded_category(record, encoders, base));
        }
    }
    if let Some(value) = record.numeric_value(column) {
        return Ok(value);
    }
    Err(EncodeError::MissingColumn(column.to_string()))
}

fn encoded_category(record: &StudentRecord, encoders: &CategoryEncoders, column: &str) -> f64 {
    let Some(encoder) = encoders.get(column) else {
        return UNSEEN_CATEGORY_CODE;
    };
    let Some(label) = record.categorical_value(column) else {
        return UNSEEN_CATEGORY_CODE;
    };
    match encoder.code(label) {
        Some(code) => f64::from(code),
        None => UNSEEN_CATEGORY_CODE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{demo_encoders, demo_feature_columns, sample_record};
    use rstest::rstest;

    #[rstest]
    #[case("gender", "Female", 0)]
    #[case("gender", "Male", 1)]
    #[case("race_ethnicity", "group A", 0)]
    #[case("race_ethnicity", "group E", 4)]
    #[case("parental_level_of_education", "associate's degree", 0)]
    #[case("parental_level_of_education", "some high school", 5)]
    #[case("lunch", "standard", 1)]
    #[case("test_preparation_course", "completed", 0)]
    #[case("test_preparation_course", "none", 1)]
    fn codes_are_positions_in_class_list(
        #[case] column: &str,
        #[case] label: &str,
        #[case] expected: u32,
    ) {
        let encoders = demo_encoders();
        let encoder = encoders.get(column).unwrap();
        assert_eq!(encoder.code(label), Some(expected));
        assert!(encoder.is_known(label));
    }

    #[test]
    fn out_of_vocabulary_label_has_no_code() {
        let encoders = demo_encoders();
        let encoder = encoders.get("gender").unwrap();
        assert_eq!(encoder.code("Nonbinary"), None);
        assert!(!encoder.is_known("Nonbinary"));
    }

    #[test]
    fn vector_follows_feature_column_order() {
        let record = sample_record();
        let encoded =
            encode_features(&record, &demo_encoders(), &demo_feature_columns()).unwrap();

        // Female, group C, bachelor's degree, standard, completed,
        // then the three numerics.
        assert_eq!(encoded, vec![0.0, 2.0, 1.0, 1.0, 0.0, 18.0, 92.5, 74.0]);
    }

    #[test]
    fn unseen_category_encodes_to_zero() {
        let record = StudentRecord {
            race_ethnicity: Some("group Z".into()),
            ..sample_record()
        };
        let encoded =
            encode_features(&record, &demo_encoders(), &demo_feature_columns()).unwrap();

        assert_eq!(encoded[1], UNSEEN_CATEGORY_CODE);
    }

    #[test]
    fn missing_field_encodes_to_zero() {
        let record = StudentRecord {
            lunch: None,
            ..sample_record()
        };
        let encoded =
            encode_features(&record, &demo_encoders(), &demo_feature_columns()).unwrap();

        assert_eq!(encoded[3], UNSEEN_CATEGORY_CODE);
    }

    #[test]
    fn missing_encoder_encodes_to_zero() {
        let record = sample_record();
        let encoded = encode_features(
            &record,
            &CategoryEncoders::default(),
            &demo_feature_columns(),
        )
        .unwrap();

        assert_eq!(&encoded[..5], &[0.0; 5]);
        assert_eq!(&encoded[5..], &[18.0, 92.5, 74.0]);
    }

    #[rstest]
    #[case("final_exam_score")]
    #[case("gender")] // raw categorical name, not an encoded column
    #[case("study_hours_per_week_encoded")]
    fn unresolvable_column_fails(#[case] column: &str) {
        let mut columns = demo_feature_columns();
        columns[7] = column.to_string();

        let err = encode_features(&sample_record(), &demo_encoders(), &columns).unwrap_err();
        assert_eq!(err, EncodeError::MissingColumn(column.to_string()));
    }

    #[test]
    fn encoding_is_deterministic() {
        let record = sample_record();
        let encoders = demo_encoders();
        let columns = demo_feature_columns();

        let first = encode_features(&record, &encoders, &columns).unwrap();
        let second = encode_features(&record, &encoders, &columns).unwrap();
        assert_eq!(first, second);
    }
}
