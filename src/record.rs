//! Raw student attribute records supplied by the host application.
//!
//! The host collects these as loose key-value payloads; [`StudentRecord`]
//! gives them a typed landing point. All categorical fields are optional and
//! numeric fields default to zero, so a partially filled payload
//! deserializes instead of erroring. Downstream policies (unseen-category
//! fallback, missing-status handling) are documented in
//! [`encoding`](crate::encoding) and [`recommend`](crate::recommend).

use serde::{Deserialize, Serialize};

/// Column name for the gender field.
pub const GENDER: &str = "gender";
/// Column name for the race/ethnicity group field.
pub const RACE_ETHNICITY: &str = "race_ethnicity";
/// Column name for the parental education level field.
pub const PARENTAL_LEVEL_OF_EDUCATION: &str = "parental_level_of_education";
/// Column name for the lunch type field.
pub const LUNCH: &str = "lunch";
/// Column name for the test preparation status field.
pub const TEST_PREPARATION_COURSE: &str = "test_preparation_course";
/// Column name for the weekly study hours field.
pub const STUDY_HOURS_PER_WEEK: &str = "study_hours_per_week";
/// Column name for the attendance rate field.
pub const ATTENDANCE_RATE: &str = "attendance_rate";
/// Column name for the previous grade field.
pub const PREVIOUS_GRADE: &str = "previous_grade";

/// Categorical column names, in the order the training pipeline fits them.
pub const CATEGORICAL_COLUMNS: [&str; 5] = [
    GENDER,
    RACE_ETHNICITY,
    PARENTAL_LEVEL_OF_EDUCATION,
    LUNCH,
    TEST_PREPARATION_COURSE,
];

/// Numeric column names.
pub const NUMERIC_COLUMNS: [&str; 3] = [STUDY_HOURS_PER_WEEK, ATTENDANCE_RATE, PREVIOUS_GRADE];

/// A raw student attribute record.
///
/// Field names double as the wire keys of the inbound payload. Missing keys
/// deserialize to the field defaults (`None` for categoricals, `0.0` for
/// numerics), mirroring the defaults the host form layer applies.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StudentRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub race_ethnicity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parental_level_of_education: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lunch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_preparation_course: Option<String>,
    pub study_hours_per_week: f64,
    pub attendance_rate: f64,
    pub previous_grade: f64,
}

impl StudentRecord {
    /// Whether `column` names one of the five categorical fields.
    pub fn is_categorical_column(column: &str) -> bool {
        CATEGORICAL_COLUMNS.contains(&column)
    }

    /// The value of a categorical field, by column name.
    ///
    /// Returns `None` both for unknown column names and for fields the
    /// record does not carry; callers that need the distinction check
    /// [`is_categorical_column`](Self::is_categorical_column) first.
    pub fn categorical_value(&self, column: &str) -> Option<&str> {
        let field = match column {
            GENDER => &self.gender,
            RACE_ETHNICITY => &self.race_ethnicity,
            PARENTAL_LEVEL_OF_EDUCATION => &self.parental_level_of_education,
            LUNCH => &self.lunch,
            TEST_PREPARATION_COURSE => &self.test_preparation_course,
            _ => return None,
        };
        field.as_deref()
    }

    /// The value of a numeric field, by column name.
    ///
    /// Returns `None` for column names that are not numeric fields.
    pub fn numeric_value(&self, column: &str) -> Option<f64> {
        match column {
            STUDY_HOURS_PER_WEEK => Some(self.study_hours_per_week),
            ATTENDANCE_RATE => Some(self.attendance_rate),
            PREVIOUS_GRADE => Some(self.previous_grade),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_full_payload() {
        let record: StudentRecord = serde_json::from_str(
            r#"{
                "gender": "Female",
                "race_ethnicity": "group C",
                "parental_level_of_education": "some college",
                "lunch": "standard",
                "test_preparation_course": "none",
                "study_hours_per_week": 12,
                "attendance_rate": 88.5,
                "previous_grade": 71.0
            }"#,
        )
        .unwrap();

        assert_eq!(record.gender.as_deref(), Some("Female"));
        assert_eq!(record.study_hours_per_week, 12.0);
        assert_eq!(record.attendance_rate, 88.5);
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let record: StudentRecord =
            serde_json::from_str(r#"{"gender": "Male", "previous_grade": 64.0}"#).unwrap();

        assert_eq!(record.gender.as_deref(), Some("Male"));
        assert_eq!(record.race_ethnicity, None);
        assert_eq!(record.test_preparation_course, None);
        assert_eq!(record.study_hours_per_week, 0.0);
        assert_eq!(record.previous_grade, 64.0);
    }

    #[test]
    fn categorical_lookup_by_column_name() {
        let record = StudentRecord {
            lunch: Some("standard".into()),
            ..StudentRecord::default()
        };

        assert_eq!(record.categorical_value(LUNCH), Some("standard"));
        assert_eq!(record.categorical_value(GENDER), None);
        assert_eq!(record.categorical_value("favorite_color"), None);
    }

    #[test]
    fn numeric_lookup_by_column_name() {
        let record = StudentRecord {
            attendance_rate: 92.0,
            ..StudentRecord::default()
        };

        assert_eq!(record.numeric_value(ATTENDANCE_RATE), Some(92.0));
        assert_eq!(record.numeric_value(STUDY_HOURS_PER_WEEK), Some(0.0));
        assert_eq!(record.numeric_value(GENDER), None);
    }

    #[test]
    fn column_classification() {
        for column in CATEGORICAL_COLUMNS {
            assert!(StudentRecord::is_categorical_column(column));
        }
        for column in NUMERIC_COLUMNS {
            assert!(!StudentRecord::is_categorical_column(column));
        }
    }
}
