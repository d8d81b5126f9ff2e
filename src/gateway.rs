//! Gateway to the external stress scoring service.
//!
//! The service's response shape is not guaranteed: the numeric score may sit
//! under any of [`SCORE_KEYS`], probed in priority order. A successful call
//! whose body carries none of them scores zero rather than failing; transport
//! failures, timeouts, and non-2xx statuses are real errors and produce no
//! fallback score.

use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

use crate::error::GatewayError;
use crate::models::FeatureVector;

/// Response keys probed for the numeric score, first match wins.
pub const SCORE_KEYS: [&str; 3] = ["predicted_score", "prediction", "score"];

const REQUEST_TIMEOUT_SECS: u64 = 8;

/// Exactly the eight behavioral fields go over the wire; media payloads are
/// never forwarded to the scorer.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ScoreRequest<'a> {
    age: i32,
    gender: &'a str,
    sleep_hours: f64,
    exercise_frequency: f64,
    academic_pressure: f64,
    financial_pressure: f64,
    study_hours: f64,
    screen_time: f64,
}

impl<'a> ScoreRequest<'a> {
    fn from_features(features: &'a FeatureVector) -> ScoreRequest<'a> {
        ScoreRequest {
            age: features.age,
            gender: features.gender.as_str(),
            sleep_hours: features.sleep_hours,
            exercise_frequency: features.exercise_frequency,
            academic_pressure: features.academic_pressure,
            financial_pressure: features.financial_pressure,
            study_hours: features.study_hours,
            screen_time: features.screen_time,
        }
    }
}

pub struct ScoringGateway {
    client: reqwest::Client,
    endpoint: String,
}

impl ScoringGateway {
    pub fn new(endpoint: String) -> Result<ScoringGateway, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(GatewayError::Network)?;
        Ok(ScoringGateway { client, endpoint })
    }

    /// Ask the external model for a stress score, clamped to 0-100.
    ///
    /// The returned future holds no state outside the pending request, so
    /// dropping it cancels the upstream call; nothing has been persisted
    /// at that point.
    pub async fn request_score(&self, features: &FeatureVector) -> Result<i32, GatewayError> {
        tracing::debug!(endpoint = %self.endpoint, "requesting stress score");
        let response = self
            .client
            .post(&self.endpoint)
            .json(&ScoreRequest::from_features(features))
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    GatewayError::Timeout(REQUEST_TIMEOUT_SECS)
                } else {
                    GatewayError::Network(err)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::UpstreamStatus(status.as_u16()));
        }

        // A 2xx reply with an unreadable body scores the same as a body
        // missing every known key.
        let body: Value = response.json().await.unwrap_or(Value::Null);
        let raw = match extract_score(&body) {
            Some(value) => value,
            None => {
                tracing::warn!(
                    endpoint = %self.endpoint,
                    "scoring service replied without a score field, using 0"
                );
                0.0
            }
        };
        Ok(clamp_score(raw))
    }
}

/// Probe the response body for a numeric score under the known keys.
/// Numeric strings count; anything else does not.
pub fn extract_score(body: &Value) -> Option<f64> {
    SCORE_KEYS
        .iter()
        .find_map(|key| body.get(key).and_then(numeric_value))
}

fn numeric_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}

/// Round to the nearest integer, then clamp into the score range.
pub fn clamp_score(raw: f64) -> i32 {
    raw.round().clamp(0.0, 100.0) as i32
}
