//! Wire DTOs for the funding API.
//!
//! DESIGN
//! ======
//! Payloads other than the session user are displayed as-is, so most fields
//! are optional and statuses stay plain strings. The API serves both wrapped
//! (`{"applications": [...]}`) and bare list bodies; `ListEnvelope` accepts
//! either and settles the record id before each item is decoded.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::state::role::Role;
use crate::state::session::SessionUser;

/// `POST /api/auth/login` and `POST /api/admin/login` body.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

/// `POST /api/auth/register` body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub role: Role,
}

/// Login / register success body.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: SessionUser,
}

/// Admin login body: `{status, data: {token, admin}}`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct AdminLoginResponse {
    #[serde(default)]
    pub status: String,
    pub data: Option<AdminLoginData>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct AdminLoginData {
    pub token: String,
    pub admin: SessionUser,
}

/// Error body shape shared by all endpoints.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ErrorBody {
    pub message: Option<String>,
}

/// Patient headline numbers from `/api/patient/dashboard`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientStats {
    #[serde(default)]
    pub applications: u64,
    #[serde(default)]
    pub donations_received: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct PatientDashboard {
    #[serde(default)]
    pub stats: PatientStats,
    /// Profile as the API currently sees it; display only.
    #[serde(default)]
    pub user: Option<serde_json::Value>,
}

/// A funding application.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub urgency: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub documents: Vec<String>,
    #[serde(default)]
    pub patient: Option<serde_json::Value>,
}

/// A patient or donor account in the admin lists.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub phone: Option<String>,
}

impl Member {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_owned()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Hospital {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub verified: bool,
}

/// Summary of the patient behind a case or verification request.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PatientSummary {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub email: Option<String>,
}

/// A fundable case shown to donors.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientCase {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub patient: PatientSummary,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub raised: f64,
    #[serde(default)]
    pub urgency: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl PatientCase {
    /// Percentage of the goal raised, clamped to `0..=100`.
    pub fn progress_percent(&self) -> u8 {
        if self.amount <= 0.0 {
            return 0;
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let pct = (self.raised / self.amount * 100.0).clamp(0.0, 100.0).round() as u8;
        pct
    }
}

/// A hospital's pending verification of a patient application.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verification {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub patient: PatientSummary,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub urgency: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub documents: Vec<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Everything the admin dashboard loads on mount.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AdminOverview {
    pub applications: Vec<Application>,
    pub patients: Vec<Member>,
    pub donors: Vec<Member>,
    pub hospitals: Vec<Hospital>,
}

/// A list body that may be bare or wrapped under a single named field.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ListEnvelope {
    Bare(Vec<serde_json::Value>),
    Wrapped(serde_json::Map<String, serde_json::Value>),
}

impl ListEnvelope {
    /// Items of a bare list, or of the field named `field` in a wrapped one.
    pub(crate) fn into_items<T: DeserializeOwned>(self, field: &str) -> Result<Vec<T>, String> {
        let items = match self {
            Self::Bare(items) => items,
            Self::Wrapped(mut map) => match map.remove(field) {
                Some(serde_json::Value::Array(items)) => items,
                Some(_) => return Err(format!("field `{field}` is not a list")),
                None => return Err(format!("missing field `{field}`")),
            },
        };
        items
            .into_iter()
            .map(|mut item| {
                merge_record_id(&mut item);
                serde_json::from_value(item).map_err(|e| e.to_string())
            })
            .collect()
    }
}

/// Collapse `id` and `_id` into the single `_id` key the list DTOs read.
/// Records serialized with virtuals carry both; `id` wins.
pub(crate) fn merge_record_id(record: &mut serde_json::Value) {
    if let Some(fields) = record.as_object_mut() {
        if let Some(id) = fields.remove("id") {
            fields.insert("_id".to_owned(), id);
        }
    }
}

/// Urgency levels accepted by the application form.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl Urgency {
    pub const ALL: [Urgency; 4] = [Urgency::Low, Urgency::Medium, Urgency::High, Urgency::Critical];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|u| u.as_str() == raw.trim())
    }
}

/// Admin decision on a funding application.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReviewDecision {
    Approve,
    Decline,
}

impl ReviewDecision {
    /// Path segment under `/api/admin/applications/{id}/`.
    pub fn action(self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Decline => "decline",
        }
    }

    /// Status the application shows once the decision is accepted.
    pub fn resulting_status(self) -> &'static str {
        match self {
            Self::Approve => "approved",
            Self::Decline => "rejected",
        }
    }
}

/// Hospital decision on a patient verification request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VerificationDecision {
    Verify,
    Reject,
}

impl VerificationDecision {
    pub fn action(self) -> &'static str {
        match self {
            Self::Verify => "verify",
            Self::Reject => "reject",
        }
    }

    pub fn resulting_status(self) -> &'static str {
        match self {
            Self::Verify => "verified",
            Self::Reject => "rejected",
        }
    }
}
