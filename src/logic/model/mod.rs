//! Model Module - Decision Engine
//!
//! Artifact loading, classifier inference, and the threshold decision rule.
//! The engine owns the artifact; presentation only sees PredictionResult.

pub mod artifact;
pub mod engine;
pub mod inference;
pub mod threshold;

// Re-export common types
pub use artifact::{ArtifactError, ArtifactMetadata, ModelArtifact};
pub use engine::{DecisionEngine, EngineStatus, PredictError, PredictionResult};
pub use inference::{InferenceError, OnnxClassifier, ProbabilityModel};
pub use threshold::DecisionThreshold;
