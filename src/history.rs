//! History aggregation.
//!
//! Operates on the snapshot returned by `db::fetch_history`, never on live
//! storage, so concurrent appends cannot leak into a half-computed summary.

use crate::models::{Assessment, HistorySummary, StressPoint};

/// Aggregate a user's assessment history. `None` means no history yet;
/// callers must not confuse it with a failure.
pub fn summarize(assessments: &[Assessment]) -> Option<HistorySummary> {
    let last = assessments.last()?;

    let mut minimum = i32::MAX;
    let mut maximum = i32::MIN;
    let mut total: i64 = 0;
    let mut series = Vec::with_capacity(assessments.len());

    for assessment in assessments {
        let level = assessment.stress_level;
        minimum = minimum.min(level);
        maximum = maximum.max(level);
        total += i64::from(level);
        series.push(StressPoint {
            recorded_at: assessment.created_at,
            stress_level: level,
        });
    }

    // Mean rounded half-up; levels are non-negative so `round` does that.
    let average = (total as f64 / assessments.len() as f64).round() as i32;

    Some(HistorySummary {
        series,
        latest: last.stress_level,
        average,
        minimum,
        maximum,
        count: assessments.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FeatureVector, Gender};
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    fn sample_assessment(minutes_ago: i64, stress_level: i32) -> Assessment {
        Assessment {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            features: FeatureVector {
                age: 21,
                gender: Gender::Female,
                sleep_hours: 7.0,
                exercise_frequency: 3.0,
                academic_pressure: 6.0,
                financial_pressure: 4.0,
                study_hours: 5.0,
                screen_time: 6.0,
            },
            facial_image: None,
            voice_sample: None,
            stress_level,
            created_at: Utc::now() - Duration::minutes(minutes_ago),
        }
    }

    #[test]
    fn empty_history_is_a_value_not_an_error() {
        assert!(summarize(&[]).is_none());
    }

    #[test]
    fn statistics_follow_input_order() {
        let assessments = vec![
            sample_assessment(30, 40),
            sample_assessment(20, 60),
            sample_assessment(10, 20),
        ];
        let summary = summarize(&assessments).unwrap();

        assert_eq!(summary.latest, 20);
        assert_eq!(summary.average, 40);
        assert_eq!(summary.minimum, 20);
        assert_eq!(summary.maximum, 60);
        assert_eq!(summary.count, 3);

        let levels: Vec<i32> = summary.series.iter().map(|p| p.stress_level).collect();
        assert_eq!(levels, vec![40, 60, 20]);
        assert_eq!(summary.series[0].recorded_at, assessments[0].created_at);
    }

    #[test]
    fn average_rounds_half_up() {
        let summary = summarize(&[sample_assessment(2, 50), sample_assessment(1, 55)]).unwrap();
        assert_eq!(summary.average, 53);
    }

    #[test]
    fn single_assessment_is_its_own_summary() {
        let summary = summarize(&[sample_assessment(1, 72)]).unwrap();
        assert_eq!(summary.latest, 72);
        assert_eq!(summary.average, 72);
        assert_eq!(summary.minimum, 72);
        assert_eq!(summary.maximum, 72);
        assert_eq!(summary.count, 1);
    }

    #[test]
    fn input_is_left_untouched() {
        let assessments = vec![sample_assessment(2, 55), sample_assessment(1, 45)];
        let before: Vec<i32> = assessments.iter().map(|a| a.stress_level).collect();
        let _ = summarize(&assessments);
        let _ = summarize(&assessments);
        let after: Vec<i32> = assessments.iter().map(|a| a.stress_level).collect();
        assert_eq!(before, after);
    }
}
