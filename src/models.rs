use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A registered account. `credential_hash` holds the salted digest produced
/// by `account::hash_credential`; the raw password is never stored.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub credential_hash: String,
    pub profile_image: Option<Vec<u8>>,
    pub created_at: DateTime<Utc>,
}

/// Self-reported gender. The wire and storage form is the lower-case name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Female,
    Male,
    Other,
}

impl Gender {
    pub fn parse(value: &str) -> Option<Gender> {
        match value.trim().to_ascii_lowercase().as_str() {
            "female" => Some(Gender::Female),
            "male" => Some(Gender::Male),
            "other" => Some(Gender::Other),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Female => "female",
            Gender::Male => "male",
            Gender::Other => "other",
        }
    }
}

/// Validated behavioral inputs for one scoring request.
#[derive(Debug, Clone)]
pub struct FeatureVector {
    pub age: i32,
    pub gender: Gender,
    pub sleep_hours: f64,
    pub exercise_frequency: f64,
    pub academic_pressure: f64,
    pub financial_pressure: f64,
    pub study_hours: f64,
    pub screen_time: f64,
}

/// One scored submission. Records are append-only: nothing mutates an
/// assessment after `db::insert_assessment` returns it.
#[derive(Debug, Clone)]
pub struct Assessment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub features: FeatureVector,
    pub facial_image: Option<Vec<u8>>,
    pub voice_sample: Option<Vec<u8>>,
    pub stress_level: i32,
    pub created_at: DateTime<Utc>,
}

/// Band classification of a single score, with the fixed guidance copy.
#[derive(Debug, Clone)]
pub struct ScoreResult {
    pub score: i32,
    pub category: &'static str,
    pub recommendations: [&'static str; 4],
}

#[derive(Debug, Clone)]
pub struct StressPoint {
    pub recorded_at: DateTime<Utc>,
    pub stress_level: i32,
}

/// Aggregate view over one user's assessments, computed fresh per request.
#[derive(Debug, Clone)]
pub struct HistorySummary {
    pub series: Vec<StressPoint>,
    pub latest: i32,
    pub average: i32,
    pub minimum: i32,
    pub maximum: i32,
    pub count: usize,
}
