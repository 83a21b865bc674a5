use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Label of the synthetic row aggregating every event.
pub const ALL_USERS: &str = "All";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Average {
    #[sqlx(rename = "username")]
    pub user: String,
    pub count: i64,
    pub average: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AverageList {
    pub averages: Vec<Average>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserList {
    pub users: Vec<String>,
}
