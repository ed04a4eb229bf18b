//! Feature Layout - Centralized Feature Definition
//!
//! **CRITICAL: This file controls the feature schema**
//!
//! ## Rules (NEVER break these):
//! 1. Add feature → increment FEATURE_VERSION
//! 2. Change order → increment FEATURE_VERSION
//! 3. Remove feature → increment FEATURE_VERSION
//!
//! ## Why versioning matters:
//! - Model artifact compatibility
//! - Retraining with a different column set must fail loudly, not drift

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};

// ============================================================================
// FEATURE VERSION
// ============================================================================

/// Current feature layout version
/// MUST be incremented when layout changes
pub const FEATURE_VERSION: u8 = 1;

// ============================================================================
// FEATURE LAYOUT (Authoritative source)
// ============================================================================

/// Feature column names in the exact order the classifier was trained on.
/// This is the SINGLE SOURCE OF TRUTH for feature layout.
///
/// The grouped one-hot columns keep their training-frame spellings,
/// including the space in `light_condition_grouped_Poor Visibility` and the
/// `weather_condition_grouped_Other` column, which no input path sets but
/// which the trained model still expects in its input row.
pub const FEATURE_LAYOUT: &[&str] = &[
    "urban_or_rural_area",                       // 0: Urban=1, Rural=2
    "is_weekend",                                // 1: 0|1
    "is_peak_hour",                              // 2: 0|1
    "road_surface_binary",                       // 3: Dry=0, Wet=1
    "weather_condition_grouped_Foggy",           // 4: one-hot
    "weather_condition_grouped_Other",           // 5: one-hot (always 0)
    "weather_condition_grouped_Rainy",           // 6: one-hot
    "weather_condition_grouped_Snowy",           // 7: one-hot (Clear = all four 0)
    "light_condition_grouped_Poor Visibility",   // 8: 0|1
    "group_speed_limit_Low",                     // 9: one-hot
    "group_speed_limit_Medium",                  // 10: one-hot (High = both 0)
];

/// Total number of features
/// IMPORTANT: Must match FEATURE_LAYOUT.len()!
pub const FEATURE_COUNT: usize = 11;

// ============================================================================
// LAYOUT HASH
// ============================================================================

/// Compute CRC32 hash of the feature layout
/// Used to detect layout mismatches at runtime
pub fn compute_layout_hash() -> u32 {
    let mut hasher = Hasher::new();

    // Include version in hash
    hasher.update(&[FEATURE_VERSION]);

    // Hash all feature names in order
    for name in FEATURE_LAYOUT {
        hasher.update(name.as_bytes());
        hasher.update(&[0]); // Separator
    }

    hasher.finalize()
}

/// Get layout hash (cheap, inputs are const)
pub fn layout_hash() -> u32 {
    compute_layout_hash()
}

// ============================================================================
// LAYOUT INFO
// ============================================================================

/// Complete layout information for serialization/logging
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutInfo {
    pub version: u8,
    pub hash: u32,
    pub feature_count: usize,
    pub feature_names: Vec<String>,
}

impl LayoutInfo {
    pub fn current() -> Self {
        Self {
            version: FEATURE_VERSION,
            hash: layout_hash(),
            feature_count: FEATURE_COUNT,
            feature_names: FEATURE_LAYOUT.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Default for LayoutInfo {
    fn default() -> Self {
        Self::current()
    }
}

// ============================================================================
// SCHEMA VALIDATION
// ============================================================================

/// Error when a feature schema doesn't match the current layout.
///
/// Raised eagerly at artifact load (declared column names vs FEATURE_LAYOUT)
/// and defensively at predict time (vector version/hash vs current layout).
#[derive(Debug, Clone)]
pub enum SchemaMismatchError {
    /// Layout version differs
    Version { expected: u8, actual: u8 },
    /// Layout hash differs (same version byte, different columns)
    LayoutHash { expected: u32, actual: u32 },
    /// Declared schema has the wrong number of columns
    FeatureCount { expected: usize, actual: usize },
    /// Declared schema names a different column at this position
    FeatureName {
        index: usize,
        expected: String,
        actual: String,
    },
}

impl std::fmt::Display for SchemaMismatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchemaMismatchError::Version { expected, actual } => {
                write!(f, "Feature layout version mismatch: expected v{}, got v{}", expected, actual)
            }
            SchemaMismatchError::LayoutHash { expected, actual } => {
                write!(
                    f,
                    "Feature layout hash mismatch: expected {:08x}, got {:08x}",
                    expected, actual
                )
            }
            SchemaMismatchError::FeatureCount { expected, actual } => {
                write!(f, "Feature count mismatch: expected {} columns, got {}", expected, actual)
            }
            SchemaMismatchError::FeatureName { index, expected, actual } => {
                write!(
                    f,
                    "Feature column {} mismatch: expected '{}', got '{}'",
                    index, expected, actual
                )
            }
        }
    }
}

impl std::error::Error for SchemaMismatchError {}

/// Validate that incoming vector metadata matches the current layout
pub fn validate_layout(incoming_version: u8, incoming_hash: u32) -> Result<(), SchemaMismatchError> {
    if incoming_version != FEATURE_VERSION {
        return Err(SchemaMismatchError::Version {
            expected: FEATURE_VERSION,
            actual: incoming_version,
        });
    }

    let current_hash = layout_hash();
    if incoming_hash != current_hash {
        return Err(SchemaMismatchError::LayoutHash {
            expected: current_hash,
            actual: incoming_hash,
        });
    }

    Ok(())
}

/// Validate a declared column list (e.g. from a model artifact) against the
/// current layout: same count, same names, same order.
pub fn validate_feature_names(names: &[String]) -> Result<(), SchemaMismatchError> {
    if names.len() != FEATURE_COUNT {
        return Err(SchemaMismatchError::FeatureCount {
            expected: FEATURE_COUNT,
            actual: names.len(),
        });
    }

    for (i, name) in names.iter().enumerate() {
        if name != FEATURE_LAYOUT[i] {
            return Err(SchemaMismatchError::FeatureName {
                index: i,
                expected: FEATURE_LAYOUT[i].to_string(),
                actual: name.clone(),
            });
        }
    }

    Ok(())
}

/// Check if layout is compatible (same version, same hash)
pub fn is_layout_compatible(version: u8, hash: u32) -> bool {
    version == FEATURE_VERSION && hash == layout_hash()
}

// ============================================================================
// FEATURE INDEX LOOKUP
// ============================================================================

/// Get feature index by name (O(n) but features are few)
pub fn feature_index(name: &str) -> Option<usize> {
    FEATURE_LAYOUT.iter().position(|&n| n == name)
}

/// Get feature name by index
pub fn feature_name(index: usize) -> Option<&'static str> {
    FEATURE_LAYOUT.get(index).copied()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_count() {
        assert_eq!(FEATURE_COUNT, 11);
        assert_eq!(FEATURE_LAYOUT.len(), FEATURE_COUNT);
    }

    #[test]
    fn test_layout_hash_consistency() {
        // Hash should be consistent across calls
        let hash1 = compute_layout_hash();
        let hash2 = compute_layout_hash();
        assert_eq!(hash1, hash2);
    }

    #[test]
    fn test_layout_hash_non_zero() {
        let hash = layout_hash();
        assert_ne!(hash, 0);
    }

    #[test]
    fn test_validate_layout_success() {
        let result = validate_layout(FEATURE_VERSION, layout_hash());
        assert!(result.is_ok());
    }

    #[test]
    fn test_validate_layout_version_mismatch() {
        let result = validate_layout(FEATURE_VERSION + 1, layout_hash());
        assert!(matches!(result, Err(SchemaMismatchError::Version { .. })));
    }

    #[test]
    fn test_validate_layout_hash_mismatch() {
        let result = validate_layout(FEATURE_VERSION, layout_hash() + 1);
        assert!(matches!(result, Err(SchemaMismatchError::LayoutHash { .. })));
    }

    #[test]
    fn test_validate_feature_names_success() {
        let names: Vec<String> = FEATURE_LAYOUT.iter().map(|s| s.to_string()).collect();
        assert!(validate_feature_names(&names).is_ok());
    }

    #[test]
    fn test_validate_feature_names_wrong_count() {
        let names: Vec<String> = FEATURE_LAYOUT[..10].iter().map(|s| s.to_string()).collect();
        assert!(matches!(
            validate_feature_names(&names),
            Err(SchemaMismatchError::FeatureCount { expected: 11, actual: 10 })
        ));
    }

    #[test]
    fn test_validate_feature_names_wrong_column() {
        let mut names: Vec<String> = FEATURE_LAYOUT.iter().map(|s| s.to_string()).collect();
        names[5] = "weather_condition_grouped_Hail".to_string();
        assert!(matches!(
            validate_feature_names(&names),
            Err(SchemaMismatchError::FeatureName { index: 5, .. })
        ));
    }

    #[test]
    fn test_feature_index() {
        assert_eq!(feature_index("urban_or_rural_area"), Some(0));
        assert_eq!(feature_index("weather_condition_grouped_Other"), Some(5));
        assert_eq!(feature_index("group_speed_limit_Medium"), Some(10));
        assert_eq!(feature_index("nonexistent"), None);
    }

    #[test]
    fn test_feature_name() {
        assert_eq!(feature_name(0), Some("urban_or_rural_area"));
        assert_eq!(feature_name(8), Some("light_condition_grouped_Poor Visibility"));
        assert_eq!(feature_name(100), None);
    }

    #[test]
    fn test_layout_info() {
        let info = LayoutInfo::current();
        assert_eq!(info.version, FEATURE_VERSION);
        assert_eq!(info.feature_count, FEATURE_COUNT);
        assert_eq!(info.feature_names.len(), FEATURE_COUNT);
    }
}
