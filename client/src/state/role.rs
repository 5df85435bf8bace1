//! User roles and the client routes they land on.
//!
//! DESIGN
//! ======
//! Roles arrive from the API as strings. They are parsed once into a closed
//! enum so every redirect decision is an exhaustive `match` rather than a
//! string comparison repeated per page.

#[cfg(test)]
#[path = "role_test.rs"]
mod role_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Marketplace role attached to every authenticated user.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Patient,
    Donor,
    Hospital,
    Admin,
    SuperAdmin,
}

/// Roles offered by the sign-in / sign-up role picker.
pub const SELECTABLE_ROLES: [Role; 4] = [Role::Patient, Role::Donor, Role::Hospital, Role::Admin];

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Patient => "patient",
            Self::Donor => "donor",
            Self::Hospital => "hospital",
            Self::Admin => "admin",
            Self::SuperAdmin => "super_admin",
        }
    }

    /// Human label for pickers and badges.
    pub fn label(self) -> &'static str {
        match self {
            Self::Patient => "Patient",
            Self::Donor => "Donor",
            Self::Hospital => "Hospital",
            Self::Admin => "Administrator",
            Self::SuperAdmin => "Super Admin",
        }
    }

    pub fn tagline(self) -> &'static str {
        match self {
            Self::Patient => "Apply for medical funding",
            Self::Donor => "Support patients in need",
            Self::Hospital => "Verify and treat patients",
            Self::Admin | Self::SuperAdmin => "Manage platform operations",
        }
    }

    /// Dashboard a freshly authenticated user of this role is sent to.
    pub fn dashboard(self) -> Route {
        match self {
            Self::Patient => Route::PatientDashboard,
            Self::Donor => Route::DonorDashboard,
            Self::Hospital => Route::HospitalDashboard,
            Self::Admin | Self::SuperAdmin => Route::AdminDashboard,
        }
    }

    /// Whether a user holding `self` may open a page that requires `required`.
    ///
    /// Matching is exact, except that super admins also pass admin gates.
    pub fn grants(self, required: Role) -> bool {
        self == required || (required == Role::Admin && self == Role::SuperAdmin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a role string does not name a known role.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "patient" => Ok(Self::Patient),
            "donor" => Ok(Self::Donor),
            "hospital" => Ok(Self::Hospital),
            "admin" => Ok(Self::Admin),
            "super_admin" => Ok(Self::SuperAdmin),
            other => Err(UnknownRole(other.to_owned())),
        }
    }
}

/// Client-side routes the session core navigates between.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    /// Public landing page.
    Landing,
    /// Authentication entry page.
    Auth,
    PatientDashboard,
    PatientApply,
    DonorDashboard,
    HospitalDashboard,
    AdminDashboard,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Self::Landing => "/",
            Self::Auth => "/auth",
            Self::PatientDashboard => "/dashboard/patient",
            Self::PatientApply => "/dashboard/patient/apply",
            Self::DonorDashboard => "/dashboard/donor",
            Self::HospitalDashboard => "/dashboard/hospital",
            Self::AdminDashboard => "/dashboard/admin",
        }
    }
}

/// Auth page link with the role picker pre-selected.
pub fn auth_path_for(role: Role) -> String {
    format!("{}?role={}", Route::Auth.path(), role.as_str())
}
