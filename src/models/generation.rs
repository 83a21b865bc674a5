use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct GenerationEvent {
    pub id: String,

    #[sqlx(rename = "username")]
    pub user: String,

    #[serde(rename = "rng")]
    pub value: f64,

    pub timestamp: DateTime<Utc>,
}

impl GenerationEvent {
    pub fn new(user: impl Into<String>, value: f64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user: user.into(),
            value,
            timestamp: Utc::now().trunc_subsecs(6),
        }
    }

    /// Fixed-width RFC 3339 form used for storage, so that text order in the
    /// store matches chronological order. Creation already truncates to the
    /// stored microsecond precision, so reads return the same instant.
    pub fn stored_timestamp(&self) -> String {
        self.timestamp.to_rfc3339_opts(SecondsFormat::Micros, true)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationList {
    pub rngs: Vec<GenerationEvent>,
}

#[derive(Debug, Deserialize)]
pub struct GenerationDetailsQuery {
    pub page: Option<String>,
    pub count: Option<String>,
}
