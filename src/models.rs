use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One completed day in the rolling visit series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub date: String,
    pub visits: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub email: String,
    pub created_at: String,
}

/// Everything the state file holds: counters, the rolling series,
/// and the signup registry.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppData {
    pub total_visits: u64,
    pub today_visits: u64,
    /// `YYYY-MM-DD` of the day the counters were last touched.
    /// Empty until the first visit is recorded.
    pub day_stamp: String,
    pub series: Vec<SeriesPoint>,
    pub users: Vec<User>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VisitResponse {
    pub date: String,
    pub total_visits: u64,
    pub today_visits: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub date: String,
    pub total_visits: u64,
    pub today_visits: u64,
    pub registered_users: u64,
}

#[derive(Debug, Serialize)]
pub struct SeriesResponse {
    pub points: Vec<SeriesPoint>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm: String,
}

/// Field name -> inline error message.
pub type FieldErrors = BTreeMap<String, String>;

#[derive(Debug, Serialize)]
pub struct SignupRejection {
    pub errors: FieldErrors,
}

#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub name: String,
    pub email: String,
    pub created_at: String,
}
