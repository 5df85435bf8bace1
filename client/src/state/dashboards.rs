//! View-model helpers shared by the role dashboards.
//!
//! Pages keep their loaded lists in signals and run these pure functions over
//! them for filtering and optimistic row updates after a decision succeeds.

#[cfg(test)]
#[path = "dashboards_test.rs"]
mod dashboards_test;

use crate::net::types::{
    AdminOverview, Application, PatientCase, ReviewDecision, Urgency, Verification, VerificationDecision,
};

/// Search text plus optional urgency used by the donor case list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CaseFilter {
    pub search: String,
    pub urgency: Option<Urgency>,
}

impl CaseFilter {
    pub fn matches(&self, case: &PatientCase) -> bool {
        if let Some(urgency) = self.urgency {
            if Urgency::parse(&case.urgency) != Some(urgency) {
                return false;
            }
        }
        let needle = self.search.trim().to_lowercase();
        needle.is_empty()
            || [case.patient.name.as_str(), case.title.as_str(), case.description.as_str(), case.location.as_str()]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
    }
}

pub fn filter_cases(cases: &[PatientCase], filter: &CaseFilter) -> Vec<PatientCase> {
    cases.iter().filter(|c| filter.matches(c)).cloned().collect()
}

/// Verifications whose patient name or title contains `search`
/// (case-insensitive).
pub fn filter_verifications(items: &[Verification], search: &str) -> Vec<Verification> {
    let needle = search.trim().to_lowercase();
    items
        .iter()
        .filter(|v| {
            needle.is_empty()
                || v.patient.name.to_lowercase().contains(&needle)
                || v.title.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

/// Apply an accepted admin decision to the loaded list. Returns whether a row
/// with `id` was found.
pub fn mark_application_status(items: &mut [Application], id: &str, decision: ReviewDecision) -> bool {
    match items.iter_mut().find(|a| a.id == id) {
        Some(app) => {
            decision.resulting_status().clone_into(&mut app.status);
            true
        }
        None => false,
    }
}

pub fn mark_verification_status(items: &mut [Verification], id: &str, decision: VerificationDecision) -> bool {
    match items.iter_mut().find(|v| v.id == id) {
        Some(item) => {
            decision.resulting_status().clone_into(&mut item.status);
            true
        }
        None => false,
    }
}

/// Number of entries still awaiting a decision.
pub fn pending_count<'a>(statuses: impl IntoIterator<Item = &'a str>) -> usize {
    statuses
        .into_iter()
        .filter(|s| s.is_empty() || s.to_ascii_lowercase().starts_with("pending"))
        .count()
}

/// Tabs of the admin dashboard.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AdminTab {
    #[default]
    Applications,
    Patients,
    Donors,
    Hospitals,
}

impl AdminTab {
    pub const ALL: [AdminTab; 4] = [AdminTab::Applications, AdminTab::Patients, AdminTab::Donors, AdminTab::Hospitals];

    pub fn label(self) -> &'static str {
        match self {
            Self::Applications => "Applications",
            Self::Patients => "Patients",
            Self::Donors => "Donors",
            Self::Hospitals => "Hospitals",
        }
    }

    pub fn count(self, overview: &AdminOverview) -> usize {
        match self {
            Self::Applications => overview.applications.len(),
            Self::Patients => overview.patients.len(),
            Self::Donors => overview.donors.len(),
            Self::Hospitals => overview.hospitals.len(),
        }
    }
}
