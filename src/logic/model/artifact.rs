//! Trained Model Artifact - bundle loading and verification
//!
//! One JSON file holds everything the decision engine needs: the ONNX bytes
//! of the classifier (hex-encoded, SHA-256 checksummed), the decision
//! threshold chosen at training time, and the feature schema the model was
//! trained on. The schema check runs here, at load time, so an
//! encoder/model version skew surfaces at startup instead of mid-request.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::logic::features::{validate_feature_names, SchemaMismatchError, FEATURE_COUNT};
use super::inference::{OnnxClassifier, ProbabilityModel};
use super::threshold::DecisionThreshold;

/// Supported bundle format
pub const ARTIFACT_FORMAT_VERSION: u32 = 1;

// ============================================================================
// ERROR HANDLING
// ============================================================================

#[derive(Debug)]
pub enum ArtifactError {
    /// No file at the configured path (deployment/config problem)
    NotFound { path: PathBuf },
    /// The bundle exists but cannot be used: unreadable, unparsable,
    /// missing fields, failed checksum, invalid threshold, bad model bytes
    Corrupt { reason: String },
    /// The bundle's declared feature schema does not match the encoder's
    SchemaMismatch(SchemaMismatchError),
    /// Engine already holds an artifact; swap by constructing a fresh engine
    AlreadyLoaded,
}

impl std::fmt::Display for ArtifactError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArtifactError::NotFound { path } => {
                write!(f, "Model artifact not found: {}", path.display())
            }
            ArtifactError::Corrupt { reason } => {
                write!(f, "Model artifact corrupt: {}", reason)
            }
            ArtifactError::SchemaMismatch(e) => {
                write!(f, "Model artifact schema mismatch: {}", e)
            }
            ArtifactError::AlreadyLoaded => {
                write!(f, "Engine already holds a loaded artifact; build a new engine to swap models")
            }
        }
    }
}

impl std::error::Error for ArtifactError {}

// ============================================================================
// ON-DISK BUNDLE
// ============================================================================

/// Raw bundle as serialized on disk. Every field is required; a bundle
/// missing the classifier bytes or the threshold fails deserialization.
#[derive(Debug, Deserialize)]
struct ArtifactBundle {
    format_version: u32,
    model_type: String,
    feature_schema: Vec<String>,
    decision_threshold: f32,
    /// Hex-encoded ONNX bytes of the classifier
    model_onnx: String,
    /// Hex SHA-256 of the decoded ONNX bytes
    model_sha256: String,
}

// ============================================================================
// LOADED ARTIFACT
// ============================================================================

/// Artifact metadata kept after load, for status reports and logging
#[derive(Debug, Clone, Serialize)]
pub struct ArtifactMetadata {
    pub path: String,
    pub model_type: String,
    pub decision_threshold: f32,
    pub feature_count: usize,
    pub loaded_at: DateTime<Utc>,
}

/// A verified, ready-to-serve model artifact: classifier + threshold.
/// Immutable for the process lifetime once loaded.
pub struct ModelArtifact {
    pub classifier: Box<dyn ProbabilityModel>,
    pub threshold: DecisionThreshold,
    pub metadata: ArtifactMetadata,
}

impl std::fmt::Debug for ModelArtifact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelArtifact")
            .field("classifier", &"<dyn ProbabilityModel>")
            .field("threshold", &self.threshold)
            .field("metadata", &self.metadata)
            .finish()
    }
}

impl ModelArtifact {
    /// Load and verify a bundle from disk.
    ///
    /// Failure ladder: missing path → `NotFound`; unreadable/unparsable
    /// bundle, checksum or threshold failure, bad model bytes → `Corrupt`;
    /// declared schema differing from the encoder layout → `SchemaMismatch`
    /// (checked before the session is built).
    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        log::info!("Loading model artifact from: {}", path.display());

        if !path.exists() {
            return Err(ArtifactError::NotFound { path: path.to_path_buf() });
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| ArtifactError::Corrupt { reason: format!("Failed to read bundle: {}", e) })?;

        let bundle: ArtifactBundle = serde_json::from_str(&content)
            .map_err(|e| ArtifactError::Corrupt { reason: format!("Failed to parse bundle: {}", e) })?;

        if bundle.format_version != ARTIFACT_FORMAT_VERSION {
            return Err(ArtifactError::Corrupt {
                reason: format!(
                    "Unsupported bundle format v{} (expected v{})",
                    bundle.format_version, ARTIFACT_FORMAT_VERSION
                ),
            });
        }

        let model_bytes = hex::decode(&bundle.model_onnx)
            .map_err(|e| ArtifactError::Corrupt { reason: format!("Invalid model encoding: {}", e) })?;

        let digest = hex::encode(Sha256::digest(&model_bytes));
        if !digest.eq_ignore_ascii_case(&bundle.model_sha256) {
            return Err(ArtifactError::Corrupt {
                reason: format!(
                    "Model checksum mismatch: bundle declares {}, computed {}",
                    bundle.model_sha256, digest
                ),
            });
        }

        let threshold = DecisionThreshold::new(bundle.decision_threshold)
            .map_err(|e| ArtifactError::Corrupt { reason: e.to_string() })?;

        // Eager schema check: the declared training columns must match the
        // encoder layout exactly, before any session is built.
        validate_feature_names(&bundle.feature_schema).map_err(ArtifactError::SchemaMismatch)?;

        let classifier = OnnxClassifier::from_bytes(&model_bytes)
            .map_err(|e| ArtifactError::Corrupt { reason: e.to_string() })?;

        log::info!(
            "Model artifact loaded: type={} threshold={} features={}",
            bundle.model_type,
            threshold.value(),
            FEATURE_COUNT
        );

        Ok(Self {
            classifier: Box::new(classifier),
            threshold,
            metadata: ArtifactMetadata {
                path: path.display().to_string(),
                model_type: bundle.model_type,
                decision_threshold: threshold.value(),
                feature_count: FEATURE_COUNT,
                loaded_at: Utc::now(),
            },
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::features::layout::FEATURE_LAYOUT;
    use std::io::Write;

    fn schema_json() -> serde_json::Value {
        serde_json::json!(FEATURE_LAYOUT)
    }

    fn write_bundle(dir: &tempfile::TempDir, value: &serde_json::Value) -> PathBuf {
        let path = dir.path().join("severity_model.json");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(value.to_string().as_bytes()).unwrap();
        path
    }

    fn dummy_model_fields() -> (String, String) {
        let bytes = b"not a real onnx graph";
        (hex::encode(bytes), hex::encode(Sha256::digest(bytes)))
    }

    #[test]
    fn test_load_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.json");

        let err = ModelArtifact::load(&path).unwrap_err();
        assert!(matches!(err, ArtifactError::NotFound { .. }));
    }

    #[test]
    fn test_load_unparsable_bundle_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("severity_model.json");
        std::fs::write(&path, "{ this is not json").unwrap();

        let err = ModelArtifact::load(&path).unwrap_err();
        assert!(matches!(err, ArtifactError::Corrupt { .. }));
    }

    #[test]
    fn test_load_missing_threshold_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let (model_onnx, model_sha256) = dummy_model_fields();
        let path = write_bundle(
            &dir,
            &serde_json::json!({
                "format_version": 1,
                "model_type": "xgboost",
                "feature_schema": schema_json(),
                "model_onnx": model_onnx,
                "model_sha256": model_sha256,
            }),
        );

        let err = ModelArtifact::load(&path).unwrap_err();
        assert!(matches!(err, ArtifactError::Corrupt { .. }));
    }

    #[test]
    fn test_load_wrong_format_version_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let (model_onnx, model_sha256) = dummy_model_fields();
        let path = write_bundle(
            &dir,
            &serde_json::json!({
                "format_version": 2,
                "model_type": "xgboost",
                "feature_schema": schema_json(),
                "decision_threshold": 0.5,
                "model_onnx": model_onnx,
                "model_sha256": model_sha256,
            }),
        );

        let err = ModelArtifact::load(&path).unwrap_err();
        assert!(matches!(err, ArtifactError::Corrupt { .. }));
    }

    #[test]
    fn test_load_checksum_mismatch_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let (model_onnx, _) = dummy_model_fields();
        let path = write_bundle(
            &dir,
            &serde_json::json!({
                "format_version": 1,
                "model_type": "xgboost",
                "feature_schema": schema_json(),
                "decision_threshold": 0.5,
                "model_onnx": model_onnx,
                "model_sha256": hex::encode(Sha256::digest(b"something else")),
            }),
        );

        let err = ModelArtifact::load(&path).unwrap_err();
        match err {
            ArtifactError::Corrupt { reason } => assert!(reason.contains("checksum")),
            other => panic!("expected Corrupt, got {:?}", other),
        }
    }

    #[test]
    fn test_load_invalid_threshold_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let (model_onnx, model_sha256) = dummy_model_fields();
        let path = write_bundle(
            &dir,
            &serde_json::json!({
                "format_version": 1,
                "model_type": "xgboost",
                "feature_schema": schema_json(),
                "decision_threshold": 1.5,
                "model_onnx": model_onnx,
                "model_sha256": model_sha256,
            }),
        );

        let err = ModelArtifact::load(&path).unwrap_err();
        assert!(matches!(err, ArtifactError::Corrupt { .. }));
    }

    #[test]
    fn test_load_wrong_schema_is_schema_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let (model_onnx, model_sha256) = dummy_model_fields();

        let mut schema: Vec<String> = FEATURE_LAYOUT.iter().map(|s| s.to_string()).collect();
        schema.swap(9, 10); // reorder the speed limit columns

        let path = write_bundle(
            &dir,
            &serde_json::json!({
                "format_version": 1,
                "model_type": "xgboost",
                "feature_schema": schema,
                "decision_threshold": 0.5,
                "model_onnx": model_onnx,
                "model_sha256": model_sha256,
            }),
        );

        let err = ModelArtifact::load(&path).unwrap_err();
        assert!(matches!(err, ArtifactError::SchemaMismatch(_)));
    }

    #[test]
    fn test_load_garbage_model_bytes_is_corrupt() {
        // Valid bundle shape, valid checksum, valid schema; only the model
        // bytes themselves are junk, so failure must come from session build.
        let dir = tempfile::tempdir().unwrap();
        let (model_onnx, model_sha256) = dummy_model_fields();
        let path = write_bundle(
            &dir,
            &serde_json::json!({
                "format_version": 1,
                "model_type": "xgboost",
                "feature_schema": schema_json(),
                "decision_threshold": 0.5,
                "model_onnx": model_onnx,
                "model_sha256": model_sha256,
            }),
        );

        let err = ModelArtifact::load(&path).unwrap_err();
        assert!(matches!(err, ArtifactError::Corrupt { .. }));
    }
}
