//! Feature Encoder - RawSelection → FeatureVector
//!
//! Pure, total, deterministic mapping from typed answers to the fixed
//! 11-column row the classifier was trained on. No side effects, fully
//! reentrant.

use super::selection::{AreaType, RawSelection, RoadSurface, SpeedLimitBand, WeatherCondition};
use super::vector::{FeatureVector, FeatureVectorBuilder};

/// Encode a selection into the trained feature layout.
///
/// Mapping rules:
/// - area type: Urban → 1, Rural → 2
/// - weekend / peak hour / poor visibility: bool → 1/0
/// - road surface: Wet → 1, Dry → 0
/// - weather: one-hot over Foggy/Rainy/Snowy; Clear leaves all four
///   grouped columns (including the always-zero Other) at 0
/// - speed limit: Low → (1,0), Medium → (0,1), High → (0,0)
pub fn encode(selection: &RawSelection) -> FeatureVector {
    let area = match selection.area_type {
        AreaType::Urban => 1.0,
        AreaType::Rural => 2.0,
    };

    let surface = match selection.road_surface {
        RoadSurface::Dry => 0.0,
        RoadSurface::Wet => 1.0,
    };

    let (foggy, rainy, snowy) = match selection.weather {
        WeatherCondition::Clear => (0.0, 0.0, 0.0),
        WeatherCondition::Foggy => (1.0, 0.0, 0.0),
        WeatherCondition::Rainy => (0.0, 1.0, 0.0),
        WeatherCondition::Snowy => (0.0, 0.0, 1.0),
    };

    let (speed_low, speed_medium) = match selection.speed_limit_band {
        SpeedLimitBand::Low => (1.0, 0.0),
        SpeedLimitBand::Medium => (0.0, 1.0),
        SpeedLimitBand::High => (0.0, 0.0),
    };

    FeatureVectorBuilder::new()
        .urban_or_rural_area(area)
        .is_weekend(bool01(selection.is_weekend))
        .is_peak_hour(bool01(selection.is_peak_hour))
        .road_surface_binary(surface)
        .weather_foggy(foggy)
        .weather_other(0.0) // no input path sets Other; the model still expects the column
        .weather_rainy(rainy)
        .weather_snowy(snowy)
        .poor_visibility(bool01(selection.poor_visibility))
        .speed_limit_low(speed_low)
        .speed_limit_medium(speed_medium)
        .build()
}

fn bool01(value: bool) -> f32 {
    if value { 1.0 } else { 0.0 }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn base_selection() -> RawSelection {
        RawSelection {
            area_type: AreaType::Urban,
            is_weekend: false,
            is_peak_hour: false,
            road_surface: RoadSurface::Dry,
            weather: WeatherCondition::Clear,
            poor_visibility: false,
            speed_limit_band: SpeedLimitBand::Low,
        }
    }

    #[test]
    fn test_area_type_mapping() {
        let mut selection = base_selection();
        assert_eq!(encode(&selection).get_by_name("urban_or_rural_area"), Some(1.0));

        selection.area_type = AreaType::Rural;
        assert_eq!(encode(&selection).get_by_name("urban_or_rural_area"), Some(2.0));
    }

    #[test]
    fn test_boolean_mapping() {
        let mut selection = base_selection();
        selection.is_weekend = true;
        selection.is_peak_hour = true;
        selection.poor_visibility = true;

        let vector = encode(&selection);
        assert_eq!(vector.get_by_name("is_weekend"), Some(1.0));
        assert_eq!(vector.get_by_name("is_peak_hour"), Some(1.0));
        assert_eq!(
            vector.get_by_name("light_condition_grouped_Poor Visibility"),
            Some(1.0)
        );
    }

    #[test]
    fn test_road_surface_mapping() {
        let mut selection = base_selection();
        assert_eq!(encode(&selection).get_by_name("road_surface_binary"), Some(0.0));

        selection.road_surface = RoadSurface::Wet;
        assert_eq!(encode(&selection).get_by_name("road_surface_binary"), Some(1.0));
    }

    #[test]
    fn test_clear_weather_is_all_zero() {
        let vector = encode(&base_selection());
        assert_eq!(vector.get_by_name("weather_condition_grouped_Foggy"), Some(0.0));
        assert_eq!(vector.get_by_name("weather_condition_grouped_Other"), Some(0.0));
        assert_eq!(vector.get_by_name("weather_condition_grouped_Rainy"), Some(0.0));
        assert_eq!(vector.get_by_name("weather_condition_grouped_Snowy"), Some(0.0));
    }

    #[test]
    fn test_other_slot_never_set() {
        for weather in [
            WeatherCondition::Clear,
            WeatherCondition::Foggy,
            WeatherCondition::Rainy,
            WeatherCondition::Snowy,
        ] {
            let mut selection = base_selection();
            selection.weather = weather;
            let vector = encode(&selection);
            assert_eq!(vector.get_by_name("weather_condition_grouped_Other"), Some(0.0));
        }
    }

    #[test]
    fn test_encode_is_deterministic() {
        let selection = RawSelection {
            area_type: AreaType::Rural,
            is_weekend: true,
            is_peak_hour: false,
            road_surface: RoadSurface::Wet,
            weather: WeatherCondition::Foggy,
            poor_visibility: true,
            speed_limit_band: SpeedLimitBand::Medium,
        };

        let first = encode(&selection);
        for _ in 0..10 {
            assert_eq!(encode(&selection), first);
        }
    }
}
