//! Loading and saving trained artifact bundles.
//!
//! A bundle is four JSON files in one directory: the forest, the scaler,
//! the per-column category vocabularies, and the ordered feature-column
//! list. Fields and shapes are re-validated on every load; a bundle that
//! assembles successfully is sound to serve from.

pub mod convert;
pub mod error;
pub mod schema;

pub use error::{ReadError, WriteError};
pub use schema::{
    EncodersSchema, FeatureColumnsSchema, ModelSchema, ScalerSchema, TreeSchema, FORMAT_VERSION,
};

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::encoding::{CategoryEncoders, ENCODED_SUFFIX};
use crate::record::{StudentRecord, NUMERIC_COLUMNS};
use crate::repr::RegressionForest;
use crate::scaling::StandardScaler;

/// File name of the ensemble model artifact.
pub const MODEL_FILE: &str = "model.json";
/// File name of the scaler artifact.
pub const SCALER_FILE: &str = "scaler.json";
/// File name of the per-column encoder artifact.
pub const ENCODERS_FILE: &str = "label_encoders.json";
/// File name of the ordered feature-column artifact.
pub const FEATURE_COLUMNS_FILE: &str = "feature_columns.json";

/// The four trained artifacts a predictor serves from, validated as a set.
///
/// Construction checks structural soundness of the forest and agreement
/// between artifacts (feature counts, encoder coverage), so a bundle in
/// hand is always servable.
#[derive(Clone)]
pub struct ArtifactBundle {
    forest: RegressionForest,
    scaler: StandardScaler,
    encoders: CategoryEncoders,
    feature_columns: Vec<String>,
}

impl ArtifactBundle {
    /// Assemble and validate a bundle from its parts.
    pub fn new(
        forest: RegressionForest,
        scaler: StandardScaler,
        encoders: CategoryEncoders,
        feature_columns: Vec<String>,
    ) -> Result<Self, ReadError> {
        forest
            .validate()
            .map_err(|e| ReadError::Validation(format!("model: {e:?}")))?;

        let n_columns = feature_columns.len();
        if forest.n_features() != n_columns {
            return Err(ReadError::Validation(format!(
                "model expects {} features but {} feature columns are declared",
                forest.n_features(),
                n_columns
            )));
        }
        if scaler.n_features() != n_columns {
            return Err(ReadError::Validation(format!(
                "scaler covers {} features but {} feature columns are declared",
                scaler.n_features(),
                n_columns
            )));
        }

        // Every declared column must be servable before the first request:
        // either an encoded categorical with a vocabulary on file, or a
        // known numeric field.
        for column in &feature_columns {
            match column.strip_suffix(ENCODED_SUFFIX) {
                Some(base) if StudentRecord::is_categorical_column(base) => {
                    if encoders.get(base).is_none() {
                        return Err(ReadError::Validation(format!(
                            "no encoder for feature column {column:?}"
                        )));
                    }
                }
                _ => {
                    if !NUMERIC_COLUMNS.contains(&column.as_str()) {
                        return Err(ReadError::Validation(format!(
                            "unknown feature column {column:?}"
                        )));
                    }
                }
            }
        }

        Ok(Self {
            forest,
            scaler,
            encoders,
            feature_columns,
        })
    }

    /// Load and validate a bundle from an artifact directory.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self, ReadError> {
        let dir = dir.as_ref();

        let model: ModelSchema = read_artifact(&dir.join(MODEL_FILE))?;
        let scaler: ScalerSchema = read_artifact(&dir.join(SCALER_FILE))?;
        let encoders: EncodersSchema = read_artifact(&dir.join(ENCODERS_FILE))?;
        let columns: FeatureColumnsSchema = read_artifact(&dir.join(FEATURE_COLUMNS_FILE))?;
        convert::check_version(columns.version)?;

        Self::new(
            RegressionForest::try_from(model)?,
            StandardScaler::try_from(scaler)?,
            CategoryEncoders::try_from(encoders)?,
            columns.into_columns(),
        )
    }

    /// Write the bundle into a directory, creating it if needed.
    pub fn save_dir(&self, dir: impl AsRef<Path>) -> Result<(), WriteError> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir).map_err(|source| WriteError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        write_artifact(&dir.join(MODEL_FILE), "model", &ModelSchema::from(&self.forest))?;
        write_artifact(
            &dir.join(SCALER_FILE),
            "scaler",
            &ScalerSchema::from(&self.scaler),
        )?;
        write_artifact(
            &dir.join(ENCODERS_FILE),
            "label_encoders",
            &EncodersSchema::from(&self.encoders),
        )?;
        write_artifact(
            &dir.join(FEATURE_COLUMNS_FILE),
            "feature_columns",
            &FeatureColumnsSchema {
                version: FORMAT_VERSION,
                columns: self.feature_columns.clone(),
            },
        )?;

        Ok(())
    }

    /// The validated ensemble.
    pub fn forest(&self) -> &RegressionForest {
        &self.forest
    }

    /// The fitted feature scaler.
    pub fn scaler(&self) -> &StandardScaler {
        &self.scaler
    }

    /// Category vocabularies keyed by raw column name.
    pub fn encoders(&self) -> &CategoryEncoders {
        &self.encoders
    }

    /// Feature column names in model input order.
    pub fn feature_columns(&self) -> &[String] {
        &self.feature_columns
    }

    /// Number of features the bundle serves.
    pub fn n_features(&self) -> usize {
        self.feature_columns.len()
    }
}

impl std::fmt::Debug for ArtifactBundle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArtifactBundle")
            .field("n_trees", &self.forest.n_trees())
            .field("n_features", &self.feature_columns.len())
            .field("n_encoders", &self.encoders.len())
            .finish()
    }
}

fn read_artifact<T: DeserializeOwned>(path: &Path) -> Result<T, ReadError> {
    let bytes = fs::read(path).map_err(|source| ReadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_slice(&bytes).map_err(|source| ReadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn write_artifact<T: Serialize>(
    path: &Path,
    artifact: &'static str,
    value: &T,
) -> Result<(), WriteError> {
    let bytes = serde_json::to_vec_pretty(value)
        .map_err(|source| WriteError::Serialize { artifact, source })?;

    fs::write(path, bytes).map_err(|source| WriteError::Io {
        path: path.to_path_buf(),
        source,
    })
}
