//! Logic Module - Business Logic & Engines
//!
//! - `features/` - Feature encoding (selection domains, layout, encoder)
//! - `model/` - Decision engine (artifact, inference, threshold)

pub mod features;
pub mod model;
