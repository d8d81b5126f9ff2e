//! Stress score classification.
//!
//! Pure mapping from a clamped 0-100 score to a severity band plus the
//! fixed guidance copy shown to the user. Upper bounds are inclusive, so a
//! boundary score belongs to the lower band.

use crate::models::ScoreResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StressBand {
    VeryLow,
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl StressBand {
    pub fn from_score(score: i32) -> StressBand {
        match score {
            0..=20 => StressBand::VeryLow,
            21..=40 => StressBand::Low,
            41..=60 => StressBand::Moderate,
            61..=80 => StressBand::High,
            _ => StressBand::VeryHigh,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StressBand::VeryLow => "Very Low Stress",
            StressBand::Low => "Low Stress",
            StressBand::Moderate => "Moderate Stress",
            StressBand::High => "High Stress",
            StressBand::VeryHigh => "Very High Stress",
        }
    }

    /// Guidance copy is product text, fixed per band.
    pub fn recommendations(self) -> [&'static str; 4] {
        match self {
            StressBand::VeryLow => [
                "You're managing stress really well.",
                "Maintain good sleep and exercise habits.",
                "Keep doing relaxing activities you enjoy.",
                "Continue balancing study and personal life.",
            ],
            StressBand::Low => [
                "Try light meditation (5-10 minutes daily).",
                "Engage in hobbies or physical activities.",
                "Reduce unnecessary screen time.",
                "Stay socially connected with friends.",
            ],
            StressBand::Moderate => [
                "Take short study breaks every 45-60 minutes.",
                "Increase physical exercise (20-30 minutes/day).",
                "Practice deep-breathing relaxation techniques.",
                "Create a realistic study schedule to avoid pressure.",
            ],
            StressBand::High => [
                "Reduce academic workload if possible.",
                "Avoid excessive screen time before bed.",
                "Talk to a close friend or mentor about what's stressing you.",
                "Try guided meditation or mindfulness apps.",
            ],
            StressBand::VeryHigh => [
                "Seek professional counseling or therapist help.",
                "Avoid isolation - talk to family/friends regularly.",
                "Reduce caffeine, social media, and late-night screen time.",
                "Maintain a strict sleep routine (7-9 hours).",
            ],
        }
    }
}

pub fn classify(score: i32) -> ScoreResult {
    let band = StressBand::from_score(score);
    ScoreResult {
        score,
        category: band.label(),
        recommendations: band.recommendations(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LABELS: [&str; 5] = [
        "Very Low Stress",
        "Low Stress",
        "Moderate Stress",
        "High Stress",
        "Very High Stress",
    ];

    #[test]
    fn boundaries_belong_to_the_lower_band() {
        assert_eq!(classify(0).category, "Very Low Stress");
        assert_eq!(classify(20).category, "Very Low Stress");
        assert_eq!(classify(21).category, "Low Stress");
        assert_eq!(classify(40).category, "Low Stress");
        assert_eq!(classify(41).category, "Moderate Stress");
        assert_eq!(classify(60).category, "Moderate Stress");
        assert_eq!(classify(61).category, "High Stress");
        assert_eq!(classify(80).category, "High Stress");
        assert_eq!(classify(81).category, "Very High Stress");
        assert_eq!(classify(100).category, "Very High Stress");
    }

    #[test]
    fn bands_are_total_and_monotonic_over_the_score_range() {
        let mut previous = StressBand::VeryLow;
        for score in 0..=100 {
            let band = StressBand::from_score(score);
            assert!(band >= previous, "band regressed at score {score}");
            previous = band;

            let result = classify(score);
            assert!(LABELS.contains(&result.category));
            assert_eq!(result.recommendations.len(), 4);
            assert_eq!(result.score, score);
        }
    }

    #[test]
    fn every_band_carries_distinct_guidance() {
        let bands = [
            StressBand::VeryLow,
            StressBand::Low,
            StressBand::Moderate,
            StressBand::High,
            StressBand::VeryHigh,
        ];
        for window in bands.windows(2) {
            assert_ne!(window[0].recommendations(), window[1].recommendations());
        }
    }
}
