//! REST client for the funding API.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages hold a `BrowserApi` from context and call one method per endpoint.
//! Authenticated methods take the caller's `Session` so the bearer token
//! always comes from the session store.
//!
//! ERROR HANDLING
//! ==============
//! Every method returns `Result<_, ApiError>`. A 401 on an authenticated call
//! becomes `ApiError::Unauthorized`; on the login endpoints it is an ordinary
//! rejection (bad credentials), so the caller shows the server's message.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::error::ApiError;
use super::transport::{ApiRequest, ApiResponse, FetchTransport, Method, RequestBody, Transport};
use super::types::{
    AdminLoginData, AdminLoginResponse, AdminOverview, Application, AuthResponse, Credentials, ErrorBody, Hospital,
    ListEnvelope, Member, PatientCase, PatientDashboard, Registration, ReviewDecision, Verification,
    VerificationDecision,
};
use crate::config::ClientConfig;
use crate::state::application::ApplicationDraft;
use crate::state::session::Session;

/// Client used by the hydrated app.
pub type BrowserApi = ApiClient<FetchTransport>;

#[derive(Clone, Debug)]
pub struct ApiClient<T> {
    base_url: String,
    transport: T,
}

impl BrowserApi {
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(&config.api_base_url, FetchTransport::new(config.request_timeout_ms))
    }
}

fn review_endpoint(id: &str, decision: ReviewDecision) -> String {
    format!("/api/admin/applications/{id}/{}", decision.action())
}

fn verification_endpoint(id: &str, decision: VerificationDecision) -> String {
    format!("/api/hospital/verifications/{id}/{}", decision.action())
}

impl<T: Transport> ApiClient<T> {
    pub fn new(base_url: &str, transport: T) -> Self {
        Self { base_url: base_url.trim_end_matches('/').to_owned(), transport }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// `POST /api/auth/login`.
    ///
    /// # Errors
    ///
    /// Network failures, rejected credentials, or a body without `{token, user}`.
    pub async fn login(&self, credentials: &Credentials) -> Result<AuthResponse, ApiError> {
        let resp = self.post_json("/api/auth/login", credentials).await?;
        decode(&check(resp, false)?)
    }

    /// `POST /api/auth/register`.
    ///
    /// # Errors
    ///
    /// Network failures, a rejected registration, or a body without `{token, user}`.
    pub async fn register(&self, registration: &Registration) -> Result<AuthResponse, ApiError> {
        let resp = self.post_json("/api/auth/register", registration).await?;
        decode(&check(resp, false)?)
    }

    /// `POST /api/admin/login`. Success requires `status == "success"` and a
    /// `data` payload, even on a 2xx response.
    ///
    /// # Errors
    ///
    /// Network failures, rejected credentials, or a non-success envelope.
    pub async fn admin_login(&self, credentials: &Credentials) -> Result<AdminLoginData, ApiError> {
        let resp = self.post_json("/api/admin/login", credentials).await?;
        let resp = check(resp, false)?;
        let status = resp.status;
        let envelope: AdminLoginResponse = decode(&resp)?;
        match envelope.data {
            Some(data) if envelope.status == "success" => Ok(data),
            _ => Err(ApiError::Rejected { status, message: envelope.message }),
        }
    }

    /// `GET /api/patient/dashboard`.
    ///
    /// # Errors
    ///
    /// Network failures, an expired session, or an unexpected body.
    pub async fn patient_dashboard(&self, session: &Session) -> Result<PatientDashboard, ApiError> {
        let resp = self.get("/api/patient/dashboard", session).await?;
        decode(&check(resp, true)?)
    }

    /// `GET /api/patient/applications`.
    ///
    /// # Errors
    ///
    /// Network failures, an expired session, or an unexpected body.
    pub async fn patient_applications(&self, session: &Session) -> Result<Vec<Application>, ApiError> {
        self.get_list("/api/patient/applications", "applications", session).await
    }

    /// `POST /api/patient/applications` as multipart form data.
    ///
    /// # Errors
    ///
    /// Network failures, an expired session, or a rejected application.
    pub async fn submit_application(&self, session: &Session, draft: &ApplicationDraft) -> Result<(), ApiError> {
        let request = self.request(
            Method::Post,
            "/api/patient/applications",
            Some(session),
            RequestBody::Multipart(draft.form_parts()),
        );
        check(self.transport.send(request).await?, true).map(drop)
    }

    /// Load the four admin lists in parallel.
    ///
    /// # Errors
    ///
    /// Fails if any list fails; an expired session wins over other errors.
    pub async fn admin_overview(&self, session: &Session) -> Result<AdminOverview, ApiError> {
        let (applications, patients, donors, hospitals) = futures::join!(
            self.get_list::<Application>("/api/admin/applications", "applications", session),
            self.get_list::<Member>("/api/admin/patients", "patients", session),
            self.get_list::<Member>("/api/admin/donors", "donors", session),
            self.get_list::<Hospital>("/api/admin/hospitals", "hospitals", session),
        );
        let errors = [
            applications.as_ref().err(),
            patients.as_ref().err(),
            donors.as_ref().err(),
            hospitals.as_ref().err(),
        ];
        if errors.iter().flatten().any(|e| e.is_unauthorized()) {
            return Err(ApiError::Unauthorized);
        }
        Ok(AdminOverview {
            applications: applications?,
            patients: patients?,
            donors: donors?,
            hospitals: hospitals?,
        })
    }

    /// `POST /api/admin/applications/{id}/{approve|decline}`.
    ///
    /// # Errors
    ///
    /// Network failures, an expired session, or a rejected decision.
    pub async fn review_application(
        &self,
        session: &Session,
        id: &str,
        decision: ReviewDecision,
    ) -> Result<(), ApiError> {
        let request = self.request(Method::Post, &review_endpoint(id, decision), Some(session), RequestBody::Empty);
        check(self.transport.send(request).await?, true).map(drop)
    }

    /// `GET /api/donor/cases`.
    ///
    /// # Errors
    ///
    /// Network failures, an expired session, or an unexpected body.
    pub async fn donor_cases(&self, session: &Session) -> Result<Vec<PatientCase>, ApiError> {
        self.get_list("/api/donor/cases", "cases", session).await
    }

    /// `GET /api/hospital/verifications`.
    ///
    /// # Errors
    ///
    /// Network failures, an expired session, or an unexpected body.
    pub async fn hospital_verifications(&self, session: &Session) -> Result<Vec<Verification>, ApiError> {
        self.get_list("/api/hospital/verifications", "verifications", session).await
    }

    /// `POST /api/hospital/verifications/{id}/{verify|reject}`.
    ///
    /// # Errors
    ///
    /// Network failures, an expired session, or a rejected decision.
    pub async fn decide_verification(
        &self,
        session: &Session,
        id: &str,
        decision: VerificationDecision,
    ) -> Result<(), ApiError> {
        let request =
            self.request(Method::Post, &verification_endpoint(id, decision), Some(session), RequestBody::Empty);
        check(self.transport.send(request).await?, true).map(drop)
    }

    fn request(&self, method: Method, path: &str, session: Option<&Session>, body: RequestBody) -> ApiRequest {
        ApiRequest {
            method,
            url: format!("{}{path}", self.base_url),
            bearer: session.map(|s| s.token.clone()),
            body,
        }
    }

    async fn get(&self, path: &str, session: &Session) -> Result<ApiResponse, ApiError> {
        self.transport
            .send(self.request(Method::Get, path, Some(session), RequestBody::Empty))
            .await
    }

    async fn get_list<D: DeserializeOwned>(
        &self,
        path: &str,
        field: &str,
        session: &Session,
    ) -> Result<Vec<D>, ApiError> {
        let resp = check(self.get(path, session).await?, true)?;
        decode::<ListEnvelope>(&resp)?
            .into_items(field)
            .map_err(ApiError::Decode)
    }

    async fn post_json<B: Serialize>(&self, path: &str, body: &B) -> Result<ApiResponse, ApiError> {
        let json = serde_json::to_value(body).map_err(|e| ApiError::Decode(e.to_string()))?;
        self.transport
            .send(self.request(Method::Post, path, None, RequestBody::Json(json)))
            .await
    }
}

/// Map non-success statuses to errors. `authenticated` marks calls that sent
/// a bearer token, where 401 means the session is no longer valid.
fn check(resp: ApiResponse, authenticated: bool) -> Result<ApiResponse, ApiError> {
    if resp.is_success() {
        return Ok(resp);
    }
    if authenticated && resp.status == 401 {
        return Err(ApiError::Unauthorized);
    }
    let message = serde_json::from_str::<ErrorBody>(&resp.body)
        .ok()
        .and_then(|body| body.message);
    Err(ApiError::Rejected { status: resp.status, message })
}

fn decode<D: DeserializeOwned>(resp: &ApiResponse) -> Result<D, ApiError> {
    serde_json::from_str(&resp.body).map_err(|e| ApiError::Decode(e.to_string()))
}
