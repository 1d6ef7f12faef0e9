//! Contact lead types.
//!
//! `ContactInfo` is what the extractor pulls out of a user message;
//! `ContactLead` is the persisted record handed to the follow-up team.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Contact fields extracted from free text. Absent fields stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl ContactInfo {
    /// True when no field was extracted.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.phone.is_none()
    }
}

/// A captured lead awaiting human follow-up.
///
/// Every capture inserts a new record; leads are never merged or updated
/// by the chat pipeline. `followed_up` is owned by downstream tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactLead {
    pub id: Uuid,
    pub session_id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub interest: String,
    pub followed_up: bool,
    pub created_at: DateTime<Utc>,
}

impl ContactLead {
    /// Build a fresh, not-yet-followed-up lead from extracted contact info.
    pub fn new(session_id: impl Into<String>, info: ContactInfo, interest: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            session_id: session_id.into(),
            name: info.name,
            email: info.email,
            phone: info.phone,
            interest: interest.into(),
            followed_up: false,
            created_at: Utc::now(),
        }
    }
}
