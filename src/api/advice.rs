//! Verdict rendering - banner, result and advice copy

use crate::logic::model::PredictionResult;

/// Startup banner: what the tool does and the caveats that go with it
pub fn banner() -> String {
    format!(
        "{}\n\
         {}\n\n\
         This tool predicts the likelihood of a severe accident based on\n\
         factors such as the time of day, road conditions, weather, and\n\
         others. Answer the questions below to get a prediction.\n\n\
         Disclaimer:\n\
         - The model was trained on 2023 accident data from the UK. It may\n\
           not be fully applicable to other regions or more recent data.\n\
         - Caution is advised in making decisions based solely on the\n\
           model's prediction. Always exercise care and use judgment when\n\
           planning your commute.\n\
         - The tool provides predictions about the likelihood of an\n\
           accident severity based on historical data and should not be\n\
           relied upon for real-time risk assessment.\n",
        "Accident Severity Prediction",
        "=============================",
    )
}

/// Render one prediction as the verdict plus advice copy
pub fn render_verdict(result: &PredictionResult) -> String {
    let mut text = String::new();

    text.push_str("Prediction Result:\n");
    if result.severe {
        text.push_str("There is a HIGH chance for a severe accident.\n\n");
        text.push_str(
            "Advice: Given the high chance of a severe accident, it is\n\
             strongly advised to consider alternative routes or delay your\n\
             commute until conditions improve. Stay updated on real-time\n\
             traffic and weather reports before making any decisions.\n",
        );
    } else {
        text.push_str("There is a LOW chance for a severe accident.\n\n");
        text.push_str(
            "Advice: While the risk of a severe accident is low, remain\n\
             cautious and continue to follow all safety guidelines when\n\
             commuting. It's still a good practice to stay aware of current\n\
             road and weather conditions.\n",
        );
    }

    text.push_str(&format!(
        "\n(probability {:.3}, decision threshold {:.3})\n",
        result.probability, result.threshold
    ));

    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(probability: f32, severe: bool) -> PredictionResult {
        PredictionResult {
            probability,
            severe,
            threshold: 0.5,
            inference_time_us: 42,
        }
    }

    #[test]
    fn test_banner_mentions_disclaimer() {
        let text = banner();
        assert!(text.contains("Accident Severity Prediction"));
        assert!(text.contains("Disclaimer"));
        assert!(text.contains("2023 accident data from the UK"));
    }

    #[test]
    fn test_severe_verdict_copy() {
        let text = render_verdict(&result(0.9, true));
        assert!(text.contains("HIGH chance"));
        assert!(text.contains("alternative routes"));
        assert!(text.contains("probability 0.900"));
    }

    #[test]
    fn test_not_severe_verdict_copy() {
        let text = render_verdict(&result(0.1, false));
        assert!(text.contains("LOW chance"));
        assert!(text.contains("remain\ncautious") || text.contains("remain cautious"));
    }
}
