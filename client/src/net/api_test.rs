use futures::executor::block_on;
use serde_json::json;

use super::*;
use crate::net::testing::{BASE_URL, MockTransport, mock_client};
use crate::net::transport::FormValue;
use crate::state::application::validate_application;
use crate::state::role::Role;
use crate::state::session::SessionUser;

fn patient_session() -> Session {
    Session::new("P-TOKEN", SessionUser::new("p1", Role::Patient)).unwrap()
}

fn admin_session() -> Session {
    Session::new("A-TOKEN", SessionUser::new("a1", Role::Admin)).unwrap()
}

fn creds() -> Credentials {
    Credentials { email: "a@b.com".into(), password: "x".into(), role: None }
}

#[test]
fn endpoints_format_expected_paths() {
    assert_eq!(review_endpoint("a1", ReviewDecision::Approve), "/api/admin/applications/a1/approve");
    assert_eq!(review_endpoint("a1", ReviewDecision::Decline), "/api/admin/applications/a1/decline");
    assert_eq!(verification_endpoint("v1", VerificationDecision::Reject), "/api/hospital/verifications/v1/reject");
}

#[test]
fn new_trims_trailing_slash() {
    let client = ApiClient::new("http://api.test/", MockTransport::new());
    assert_eq!(client.base_url(), "http://api.test");
}

#[test]
fn browser_api_uses_config() {
    let cfg = ClientConfig::resolve(Some("https://example.test/"), Some("1500"));
    let api = BrowserApi::from_config(&cfg);
    assert_eq!(api.base_url(), "https://example.test");
    assert_eq!(api.transport().timeout_ms, 1500);
}

// =============================================================
// Auth endpoints
// =============================================================

#[test]
fn login_posts_json_without_bearer() {
    let client = mock_client(MockTransport::new().respond(
        Method::Post,
        "/api/auth/login",
        200,
        json!({"token":"T1","user":{"id":"1","role":"donor"}}),
    ));
    let resp = block_on(client.login(&creds())).unwrap();
    assert_eq!(resp.token, "T1");
    assert_eq!(resp.user.role, Role::Donor);

    let sent = client.transport().requests();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].url, format!("{BASE_URL}/api/auth/login"));
    assert!(sent[0].bearer.is_none());
    match &sent[0].body {
        RequestBody::Json(value) => assert_eq!(value, &json!({"email":"a@b.com","password":"x"})),
        other => panic!("unexpected body: {other:?}"),
    }
}

#[test]
fn login_401_is_a_rejection_with_server_message() {
    let client = mock_client(MockTransport::new().respond(
        Method::Post,
        "/api/auth/login",
        401,
        json!({"message":"Invalid credentials"}),
    ));
    let err = block_on(client.login(&creds())).unwrap_err();
    assert_eq!(err, ApiError::Rejected { status: 401, message: Some("Invalid credentials".into()) });
}

#[test]
fn login_success_without_user_is_decode_error() {
    let client = mock_client(MockTransport::new().respond(Method::Post, "/api/auth/login", 200, json!({"token":"T1"})));
    assert!(matches!(block_on(client.login(&creds())), Err(ApiError::Decode(_))));
}

#[test]
fn login_network_failure_passes_through() {
    let client = mock_client(MockTransport::new().fail(
        Method::Post,
        "/api/auth/login",
        ApiError::Network("offline".into()),
    ));
    assert_eq!(block_on(client.login(&creds())).unwrap_err(), ApiError::Network("offline".into()));
}

#[test]
fn register_sends_registration_body() {
    let client = mock_client(MockTransport::new().respond(
        Method::Post,
        "/api/auth/register",
        201,
        json!({"token":"T2","user":{"_id":"2","role":"patient","email":"p@x.io"}}),
    ));
    let registration = Registration {
        email: "p@x.io".into(),
        password: "pw".into(),
        first_name: "Sarah".into(),
        last_name: "M".into(),
        phone: "555".into(),
        role: Role::Patient,
    };
    let resp = block_on(client.register(&registration)).unwrap();
    assert_eq!(resp.user.id, "2");
    match &client.transport().requests()[0].body {
        RequestBody::Json(value) => assert_eq!(value["firstName"], "Sarah"),
        other => panic!("unexpected body: {other:?}"),
    }
}

#[test]
fn admin_login_unwraps_envelope() {
    let client = mock_client(MockTransport::new().respond(
        Method::Post,
        "/api/admin/login",
        200,
        json!({"status":"success","data":{"token":"A1","admin":{"id":"9","role":"super_admin"}}}),
    ));
    let data = block_on(client.admin_login(&creds())).unwrap();
    assert_eq!(data.token, "A1");
    assert_eq!(data.admin.role, Role::SuperAdmin);
}

#[test]
fn admin_login_non_success_envelope_is_rejected() {
    let client = mock_client(MockTransport::new().respond(
        Method::Post,
        "/api/admin/login",
        200,
        json!({"status":"error","message":"Not an admin"}),
    ));
    let err = block_on(client.admin_login(&creds())).unwrap_err();
    assert_eq!(err, ApiError::Rejected { status: 200, message: Some("Not an admin".into()) });
}

// =============================================================
// Authenticated endpoints
// =============================================================

#[test]
fn patient_dashboard_sends_bearer_token() {
    let client = mock_client(MockTransport::new().respond(
        Method::Get,
        "/api/patient/dashboard",
        200,
        json!({"stats":{"applications":3,"donationsReceived":1200.5}}),
    ));
    let dash = block_on(client.patient_dashboard(&patient_session())).unwrap();
    assert_eq!(dash.stats.applications, 3);
    assert_eq!(client.transport().requests()[0].bearer.as_deref(), Some("P-TOKEN"));
}

#[test]
fn authenticated_401_is_unauthorized() {
    let client = mock_client(MockTransport::new().respond(
        Method::Get,
        "/api/patient/applications",
        401,
        json!({"message":"jwt expired"}),
    ));
    assert_eq!(block_on(client.patient_applications(&patient_session())).unwrap_err(), ApiError::Unauthorized);
}

#[test]
fn authenticated_403_stays_a_rejection() {
    let client = mock_client(MockTransport::new().respond(Method::Get, "/api/donor/cases", 403, json!({})));
    assert_eq!(
        block_on(client.donor_cases(&patient_session())).unwrap_err(),
        ApiError::Rejected { status: 403, message: None }
    );
}

#[test]
fn patient_applications_unwraps_list() {
    let client = mock_client(MockTransport::new().respond(
        Method::Get,
        "/api/patient/applications",
        200,
        json!({"applications":[{"_id":"a1","title":"Surgery","status":"pending"}]}),
    ));
    let apps = block_on(client.patient_applications(&patient_session())).unwrap();
    assert_eq!(apps.len(), 1);
    assert_eq!(apps[0].title, "Surgery");
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn submit_application_sends_multipart_with_bearer() {
    use crate::net::transport::Attachment;

    let client = mock_client(MockTransport::new().respond(
        Method::Post,
        "/api/patient/applications",
        201,
        json!({"ok":true}),
    ));
    let draft = validate_application("Surgery", "4500", "high", vec![Attachment { name: "r.pdf".into() }]).unwrap();
    block_on(client.submit_application(&patient_session(), &draft)).unwrap();

    let sent = &client.transport().requests()[0];
    assert_eq!(sent.method, Method::Post);
    assert_eq!(sent.bearer.as_deref(), Some("P-TOKEN"));
    let RequestBody::Multipart(parts) = &sent.body else {
        panic!("expected multipart body");
    };
    assert_eq!(parts.len(), 4);
    assert!(matches!(&parts[1].value, FormValue::Text(amount) if amount == "4500"));
}

#[test]
fn submit_application_surfaces_server_message() {
    let client = mock_client(MockTransport::new().respond(
        Method::Post,
        "/api/patient/applications",
        400,
        json!({"message":"Documents required"}),
    ));
    let draft = validate_application("Surgery", "4500", "high", Vec::new()).unwrap();
    let err = block_on(client.submit_application(&patient_session(), &draft)).unwrap_err();
    assert_eq!(err.user_message("Failed"), "Documents required");
}

#[test]
fn admin_overview_loads_all_four_lists() {
    let client = mock_client(
        MockTransport::new()
            .respond(Method::Get, "/api/admin/applications", 200, json!({"applications":[{"_id":"a1"}]}))
            .respond(Method::Get, "/api/admin/patients", 200, json!([{"_id":"p1"},{"_id":"p2"}]))
            .respond(Method::Get, "/api/admin/donors", 200, json!({"donors":[]}))
            .respond(Method::Get, "/api/admin/hospitals", 200, json!({"hospitals":[{"_id":"h1","verified":true}]})),
    );
    let overview = block_on(client.admin_overview(&admin_session())).unwrap();
    assert_eq!(overview.applications.len(), 1);
    assert_eq!(overview.patients.len(), 2);
    assert!(overview.donors.is_empty());
    assert!(overview.hospitals[0].verified);
    assert_eq!(client.transport().request_count(), 4);
    assert!(client.transport().requests().iter().all(|r| r.bearer.as_deref() == Some("A-TOKEN")));
}

#[test]
fn admin_overview_fails_when_any_list_fails() {
    let client = mock_client(
        MockTransport::new()
            .respond(Method::Get, "/api/admin/applications", 200, json!([]))
            .respond(Method::Get, "/api/admin/patients", 200, json!([]))
            .respond(Method::Get, "/api/admin/donors", 500, json!({}))
            .respond(Method::Get, "/api/admin/hospitals", 200, json!([])),
    );
    let err = block_on(client.admin_overview(&admin_session())).unwrap_err();
    assert_eq!(err, ApiError::Rejected { status: 500, message: None });
}

#[test]
fn admin_overview_prefers_unauthorized() {
    let client = mock_client(
        MockTransport::new()
            .respond(Method::Get, "/api/admin/applications", 500, json!({}))
            .respond(Method::Get, "/api/admin/patients", 200, json!([]))
            .respond(Method::Get, "/api/admin/donors", 200, json!([]))
            .respond(Method::Get, "/api/admin/hospitals", 401, json!({})),
    );
    assert_eq!(block_on(client.admin_overview(&admin_session())).unwrap_err(), ApiError::Unauthorized);
}

#[test]
fn review_application_posts_decision() {
    let client = mock_client(MockTransport::new().respond(
        Method::Post,
        "/api/admin/applications/a1/decline",
        200,
        json!({}),
    ));
    block_on(client.review_application(&admin_session(), "a1", ReviewDecision::Decline)).unwrap();
    let sent = &client.transport().requests()[0];
    assert!(matches!(sent.body, RequestBody::Empty));
    assert_eq!(sent.bearer.as_deref(), Some("A-TOKEN"));
}

#[test]
fn hospital_endpoints_round_trip() {
    let hospital = Session::new("H-TOKEN", SessionUser::new("h1", Role::Hospital)).unwrap();
    let client = mock_client(
        MockTransport::new()
            .respond(
                Method::Get,
                "/api/hospital/verifications",
                200,
                json!({"verifications":[{"_id":"v1","status":"pending_verification","patient":{"name":"Sarah","age":7}}]}),
            )
            .respond(Method::Post, "/api/hospital/verifications/v1/verify", 204, json!(null)),
    );
    let queue = block_on(client.hospital_verifications(&hospital)).unwrap();
    assert_eq!(queue[0].patient.age, Some(7));
    block_on(client.decide_verification(&hospital, "v1", VerificationDecision::Verify)).unwrap();
    assert_eq!(client.transport().request_count(), 2);
}

#[test]
fn donor_cases_accept_bare_list() {
    let donor = Session::new("D-TOKEN", SessionUser::new("d1", Role::Donor)).unwrap();
    let client = mock_client(MockTransport::new().respond(
        Method::Get,
        "/api/donor/cases",
        200,
        json!([{"id":"c1","title":"Heart surgery","amount":5000,"raised":1250,"urgency":"critical"}]),
    ));
    let cases = block_on(client.donor_cases(&donor)).unwrap();
    assert_eq!(cases.len(), 1);
    assert_eq!(cases[0].progress_percent(), 25);
    assert_eq!(client.transport().requests()[0].bearer.as_deref(), Some("D-TOKEN"));
}

#[test]
fn login_accepts_user_with_both_id_keys() {
    let client = mock_client(MockTransport::new().respond(
        Method::Post,
        "/api/auth/login",
        200,
        json!({"token":"T1","user":{"_id":"a1","id":"a1","role":"donor"}}),
    ));
    let resp = block_on(client.login(&creds())).unwrap();
    assert_eq!(resp.user.id, "a1");
    assert_eq!(resp.user.role, Role::Donor);
}

#[test]
fn admin_lists_accept_records_with_both_id_keys() {
    let client = mock_client(
        MockTransport::new()
            .respond(Method::Get, "/api/admin/applications", 200, json!({"applications":[{"_id":"a1","id":"a1"}]}))
            .respond(Method::Get, "/api/admin/patients", 200, json!([{"_id":"p1","id":"p1","firstName":"Ada"}]))
            .respond(Method::Get, "/api/admin/donors", 200, json!({"donors":[]}))
            .respond(Method::Get, "/api/admin/hospitals", 200, json!({"hospitals":[{"_id":"h1","id":"h1"}]})),
    );
    let overview = block_on(client.admin_overview(&admin_session())).unwrap();
    assert_eq!(overview.applications[0].id, "a1");
    assert_eq!(overview.patients[0].full_name(), "Ada");
    assert_eq!(overview.hospitals[0].id, "h1");
}
