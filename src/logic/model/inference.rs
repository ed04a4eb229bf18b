//! Inference - ONNX Runtime Integration
//!
//! The `ProbabilityModel` seam keeps the decision engine independent of the
//! backend, so tests can inject stubs and the ONNX runtime stays swappable.

use ndarray::Array2;
use parking_lot::Mutex;
use ort::session::{Session, builder::GraphOptimizationLevel};
use ort::value::Value;

use crate::logic::features::FEATURE_COUNT;

// ============================================================================
// ERROR HANDLING
// ============================================================================

#[derive(Debug)]
pub struct InferenceError(pub String);

impl std::fmt::Display for InferenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "InferenceError: {}", self.0)
    }
}

impl std::error::Error for InferenceError {}

// ============================================================================
// PROBABILITY MODEL TRAIT
// ============================================================================

/// A classifier that yields the positive-class ("severe") probability for
/// one feature row. Implementations must be safe to call concurrently.
pub trait ProbabilityModel: Send + Sync {
    fn predict_proba(&self, features: &[f32; FEATURE_COUNT]) -> Result<f32, InferenceError>;
}

// ============================================================================
// ONNX IMPLEMENTATION
// ============================================================================

/// ONNX-backed binary classifier.
///
/// The session sits behind a mutex because `ort` needs `&mut` to run; the
/// public surface stays `&self` so one loaded classifier can serve any
/// number of concurrent predictions.
pub struct OnnxClassifier {
    session: Mutex<Session>,
    output_names: Vec<String>,
}

impl OnnxClassifier {
    /// Build a session from raw ONNX bytes (decoded from the artifact bundle)
    pub fn from_bytes(model_bytes: &[u8]) -> Result<Self, InferenceError> {
        log::info!("Building ONNX session from {} bytes", model_bytes.len());

        let session = Session::builder()
            .map_err(|e| InferenceError(format!("Failed to create session builder: {}", e)))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| InferenceError(format!("Failed to set optimization: {}", e)))?
            .commit_from_memory(model_bytes)
            .map_err(|e| InferenceError(format!("Failed to load model: {}", e)))?;

        let output_names: Vec<String> = session.outputs().iter().map(|o| o.name().to_string()).collect();
        if output_names.is_empty() {
            return Err(InferenceError("Model declares no outputs".to_string()));
        }

        Ok(Self {
            session: Mutex::new(session),
            output_names,
        })
    }
}

impl ProbabilityModel for OnnxClassifier {
    fn predict_proba(&self, features: &[f32; FEATURE_COUNT]) -> Result<f32, InferenceError> {
        // Input tensor: one row, shape (1, features)
        let input_array = Array2::<f32>::from_shape_vec((1, FEATURE_COUNT), features.to_vec())
            .map_err(|e| InferenceError(format!("Failed to create array: {}", e)))?;

        let input_tensor = Value::from_array(input_array)
            .map_err(|e| InferenceError(format!("Failed to create tensor: {}", e)))?;

        let mut session = self.session.lock();
        let outputs = session
            .run(ort::inputs![input_tensor])
            .map_err(|e| InferenceError(format!("Inference failed: {}", e)))?;

        // Classifier exports typically order outputs [label, probabilities];
        // take the last output that extracts as an f32 tensor.
        for name in self.output_names.iter().rev() {
            let Some(output) = outputs.get(name.as_str()) else {
                continue;
            };
            let Ok(output_tensor) = output.try_extract_tensor::<f32>() else {
                continue;
            };

            let data = output_tensor.1;
            return match data.len() {
                // Single probability output
                1 => Ok(data[0]),
                // Two-class probability row [p_not_severe, p_severe]
                2 => Ok(data[1]),
                n => Err(InferenceError(format!(
                    "Unexpected probability output length {} from '{}'",
                    n, name
                ))),
            };
        }

        Err(InferenceError(
            "Model produced no f32 probability output".to_string(),
        ))
    }
}
