//! API Module - presentation boundary
//!
//! The questionnaire collects and validates answers; the advice module
//! renders verdicts. Nothing in here touches the engine's internals beyond
//! PredictionResult.

pub mod advice;
pub mod form;

pub use advice::{banner, render_verdict};
pub use form::collect_selection;
