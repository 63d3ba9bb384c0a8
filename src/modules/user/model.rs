use serde::{Deserialize, Serialize};

/// Public profile returned by the user service for `GET /users/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDetails {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub status: String,
}
