//! Features Module - Feature Encoding Engine
//!
//! Maps typed user selections onto the fixed feature layout the classifier
//! was trained on. The layout is versioned; the decision engine re-checks
//! it on every prediction.

pub mod layout;
pub mod selection;
pub mod encode;
pub mod vector;


// Re-export common types
pub use encode::encode;
pub use layout::{
    feature_index, feature_name, layout_hash, validate_feature_names, validate_layout,
    LayoutInfo, SchemaMismatchError, FEATURE_COUNT, FEATURE_VERSION,
};
pub use selection::{
    parse_yes_no, AreaType, InvalidDomainValue, RawSelection, RoadSurface, SpeedLimitBand,
    WeatherCondition,
};
pub use vector::{FeatureVector, FeatureVectorBuilder};
