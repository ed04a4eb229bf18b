//! Decision Engine
//!
//! Owns one loaded model artifact and turns feature vectors into severity
//! verdicts. Two states only: Unloaded → Ready. There is no way back;
//! swapping models means constructing a fresh engine, never mutating one
//! that may have predictions in flight.
//!
//! The engine is an explicitly constructed, explicitly passed value.
//! Tests build as many independent engines as they need via `with_model`.

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

use crate::logic::features::{FeatureVector, SchemaMismatchError, FEATURE_COUNT, FEATURE_VERSION};
use super::artifact::{ArtifactError, ArtifactMetadata, ModelArtifact};
use super::inference::ProbabilityModel;
use super::threshold::DecisionThreshold;

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// Prediction output for one request
#[derive(Debug, Clone, Serialize)]
pub struct PredictionResult {
    /// Estimated probability of the severe class, in [0, 1]
    pub probability: f32,
    /// probability >= threshold (inclusive)
    pub severe: bool,
    pub threshold: f32,
    pub inference_time_us: u64,
}

/// Engine status report for presentation/logging
#[derive(Debug, Clone, Serialize)]
pub struct EngineStatus {
    pub model_loaded: bool,
    pub model_type: String,
    pub decision_threshold: Option<f32>,
    pub feature_version: u8,
    pub feature_count: usize,
    pub avg_latency_ms: f32,
    pub prediction_count: u64,
}

// ============================================================================
// ERROR HANDLING
// ============================================================================

#[derive(Debug)]
pub enum PredictError {
    /// predict called before load completed (programming error)
    NotReady,
    /// The vector was built against a different feature layout
    SchemaMismatch(SchemaMismatchError),
    /// Backend computation failure, or a probability outside [0, 1]
    Inference { message: String },
}

impl std::fmt::Display for PredictError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PredictError::NotReady => {
                write!(f, "Decision engine not ready: no model artifact loaded")
            }
            PredictError::SchemaMismatch(e) => {
                write!(f, "Feature vector schema mismatch: {}", e)
            }
            PredictError::Inference { message } => {
                write!(f, "Inference failed: {}", message)
            }
        }
    }
}

impl std::error::Error for PredictError {}

// ============================================================================
// DECISION ENGINE
// ============================================================================

pub struct DecisionEngine {
    artifact: Option<ModelArtifact>,

    // Latency stats
    latency_sum_us: AtomicU64,
    prediction_count: AtomicU64,
}

impl DecisionEngine {
    /// New engine in the Unloaded state
    pub fn new() -> Self {
        Self {
            artifact: None,
            latency_sum_us: AtomicU64::new(0),
            prediction_count: AtomicU64::new(0),
        }
    }

    /// Ready engine around an injected classifier (tests, embedding)
    pub fn with_model(classifier: Box<dyn ProbabilityModel>, threshold: DecisionThreshold) -> Self {
        Self {
            artifact: Some(ModelArtifact {
                classifier,
                threshold,
                metadata: ArtifactMetadata {
                    path: "<memory>".to_string(),
                    model_type: "injected".to_string(),
                    decision_threshold: threshold.value(),
                    feature_count: FEATURE_COUNT,
                    loaded_at: chrono::Utc::now(),
                },
            }),
            latency_sum_us: AtomicU64::new(0),
            prediction_count: AtomicU64::new(0),
        }
    }

    /// Unloaded → Ready. Fails without changing state; a Ready engine
    /// refuses to reload (build a new engine instead).
    pub fn load(&mut self, path: &Path) -> Result<(), ArtifactError> {
        if self.artifact.is_some() {
            return Err(ArtifactError::AlreadyLoaded);
        }

        self.artifact = Some(ModelArtifact::load(path)?);
        Ok(())
    }

    /// Check if the engine holds a loaded artifact
    pub fn is_ready(&self) -> bool {
        self.artifact.is_some()
    }

    /// Metadata of the loaded artifact, if any
    pub fn metadata(&self) -> Option<&ArtifactMetadata> {
        self.artifact.as_ref().map(|a| &a.metadata)
    }

    /// Evaluate one feature vector against the loaded artifact.
    ///
    /// Read-only: any number of predictions may run concurrently against
    /// one engine. A failure is fatal to this request only and never
    /// defaults to a verdict.
    pub fn predict(&self, vector: &FeatureVector) -> Result<PredictionResult, PredictError> {
        let artifact = self.artifact.as_ref().ok_or(PredictError::NotReady)?;

        // Defensive re-check of the load-time schema validation
        vector.validate().map_err(PredictError::SchemaMismatch)?;

        let start_time = std::time::Instant::now();

        let probability = artifact
            .classifier
            .predict_proba(vector.as_array())
            .map_err(|e| PredictError::Inference { message: e.to_string() })?;

        if !probability.is_finite() || !(0.0..=1.0).contains(&probability) {
            return Err(PredictError::Inference {
                message: format!("Classifier produced probability {} outside [0, 1]", probability),
            });
        }

        let severe = artifact.threshold.is_severe(probability);
        let inference_time = start_time.elapsed().as_micros() as u64;

        // Track metrics
        self.latency_sum_us.fetch_add(inference_time, Ordering::Relaxed);
        self.prediction_count.fetch_add(1, Ordering::Relaxed);

        Ok(PredictionResult {
            probability,
            severe,
            threshold: artifact.threshold.value(),
            inference_time_us: inference_time,
        })
    }

    pub fn status(&self) -> EngineStatus {
        let sum = self.latency_sum_us.load(Ordering::Relaxed);
        let count = self.prediction_count.load(Ordering::Relaxed);
        let avg = if count > 0 { (sum as f32 / count as f32) / 1000.0 } else { 0.0 };

        EngineStatus {
            model_loaded: self.is_ready(),
            model_type: self
                .metadata()
                .map(|m| m.model_type.clone())
                .unwrap_or_else(|| "none".to_string()),
            decision_threshold: self.artifact.as_ref().map(|a| a.threshold.value()),
            feature_version: FEATURE_VERSION,
            feature_count: FEATURE_COUNT,
            avg_latency_ms: avg,
            prediction_count: count,
        }
    }
}

impl Default for DecisionEngine {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================
