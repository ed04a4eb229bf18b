//! Raw Selection - Typed user answers for one prediction
//!
//! One field per question, each a small enum or bool. A selection is built
//! fresh per prediction, is immutable once constructed, and is discarded
//! after encoding.
//!
//! Domain validation lives here: string answers become typed values through
//! `parse`, the single point where `InvalidDomainValue` can arise. Once a
//! `RawSelection` exists, its fields cannot leave their domains.

use serde::{Deserialize, Serialize};

// ============================================================================
// ERROR HANDLING
// ============================================================================

/// A raw answer that is outside its declared enumerated domain.
///
/// Caller/input-collaborator bug, recoverable by re-prompting. Never
/// defaulted silently: a wrong value here would corrupt the feature vector
/// without signal.
#[derive(Debug, Clone)]
pub struct InvalidDomainValue {
    pub field: &'static str,
    pub value: String,
    pub expected: &'static [&'static str],
}

impl std::fmt::Display for InvalidDomainValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Invalid value '{}' for {} (expected one of: {})",
            self.value,
            self.field,
            self.expected.join(", ")
        )
    }
}

impl std::error::Error for InvalidDomainValue {}

// ============================================================================
// DOMAIN ENUMS
// ============================================================================

/// Area type: Urban or Rural
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AreaType {
    Urban,
    Rural,
}

impl AreaType {
    pub const FIELD: &'static str = "area_type";
    pub const LABELS: &'static [&'static str] = &["Urban", "Rural"];

    pub fn parse(value: &str) -> Result<Self, InvalidDomainValue> {
        match value.trim().to_ascii_lowercase().as_str() {
            "urban" => Ok(AreaType::Urban),
            "rural" => Ok(AreaType::Rural),
            _ => Err(InvalidDomainValue {
                field: Self::FIELD,
                value: value.to_string(),
                expected: Self::LABELS,
            }),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AreaType::Urban => "Urban",
            AreaType::Rural => "Rural",
        }
    }
}

/// Road surface condition: Dry or Wet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoadSurface {
    Dry,
    Wet,
}

impl RoadSurface {
    pub const FIELD: &'static str = "road_surface";
    pub const LABELS: &'static [&'static str] = &["Dry", "Wet"];

    pub fn parse(value: &str) -> Result<Self, InvalidDomainValue> {
        match value.trim().to_ascii_lowercase().as_str() {
            "dry" => Ok(RoadSurface::Dry),
            "wet" => Ok(RoadSurface::Wet),
            _ => Err(InvalidDomainValue {
                field: Self::FIELD,
                value: value.to_string(),
                expected: Self::LABELS,
            }),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RoadSurface::Dry => "Dry",
            RoadSurface::Wet => "Wet",
        }
    }
}

/// Weather condition. Clear is the reference category: it encodes as
/// all-zero across the grouped one-hot columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeatherCondition {
    Clear,
    Foggy,
    Rainy,
    Snowy,
}

impl WeatherCondition {
    pub const FIELD: &'static str = "weather_condition";
    pub const LABELS: &'static [&'static str] = &["Clear", "Foggy", "Rainy", "Snowy"];

    pub fn parse(value: &str) -> Result<Self, InvalidDomainValue> {
        match value.trim().to_ascii_lowercase().as_str() {
            "clear" => Ok(WeatherCondition::Clear),
            "foggy" => Ok(WeatherCondition::Foggy),
            "rainy" => Ok(WeatherCondition::Rainy),
            "snowy" => Ok(WeatherCondition::Snowy),
            _ => Err(InvalidDomainValue {
                field: Self::FIELD,
                value: value.to_string(),
                expected: Self::LABELS,
            }),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WeatherCondition::Clear => "Clear",
            WeatherCondition::Foggy => "Foggy",
            WeatherCondition::Rainy => "Rainy",
            WeatherCondition::Snowy => "Snowy",
        }
    }
}

/// Speed limit group. High is the reference category: it encodes as both
/// one-hot columns 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpeedLimitBand {
    Low,
    Medium,
    High,
}

impl SpeedLimitBand {
    pub const FIELD: &'static str = "speed_limit_band";
    pub const LABELS: &'static [&'static str] = &["Low", "Medium", "High"];

    pub fn parse(value: &str) -> Result<Self, InvalidDomainValue> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(SpeedLimitBand::Low),
            "medium" => Ok(SpeedLimitBand::Medium),
            "high" => Ok(SpeedLimitBand::High),
            _ => Err(InvalidDomainValue {
                field: Self::FIELD,
                value: value.to_string(),
                expected: Self::LABELS,
            }),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SpeedLimitBand::Low => "Low",
            SpeedLimitBand::Medium => "Medium",
            SpeedLimitBand::High => "High",
        }
    }
}

/// Parse a yes/no answer for the checkbox-style questions
pub fn parse_yes_no(field: &'static str, value: &str) -> Result<bool, InvalidDomainValue> {
    match value.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" | "true" | "1" => Ok(true),
        "n" | "no" | "false" | "0" => Ok(false),
        _ => Err(InvalidDomainValue {
            field,
            value: value.to_string(),
            expected: &["yes", "no"],
        }),
    }
}

// ============================================================================
// RAW SELECTION
// ============================================================================

/// One fully-populated set of answers for a single prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSelection {
    pub area_type: AreaType,
    pub is_weekend: bool,
    pub is_peak_hour: bool,
    pub road_surface: RoadSurface,
    pub weather: WeatherCondition,
    pub poor_visibility: bool,
    pub speed_limit_band: SpeedLimitBand,
}

// ============================================================================
// TESTS
// ============================================================================
