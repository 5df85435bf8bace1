use super::*;

#[test]
fn credentials_omit_missing_role() {
    let creds = Credentials { email: "a@b.com".into(), password: "x".into(), role: None };
    assert_eq!(serde_json::to_value(&creds).unwrap(), serde_json::json!({"email":"a@b.com","password":"x"}));
}

#[test]
fn credentials_send_role_name() {
    let creds = Credentials { email: "a@b.com".into(), password: "x".into(), role: Some(Role::Donor) };
    assert_eq!(serde_json::to_value(&creds).unwrap()["role"], "donor");
}

#[test]
fn registration_uses_camel_case_fields() {
    let reg = Registration {
        email: "p@x.io".into(),
        password: "pw".into(),
        first_name: "Sarah".into(),
        last_name: "M".into(),
        phone: "555".into(),
        role: Role::Patient,
    };
    let value = serde_json::to_value(&reg).unwrap();
    assert_eq!(value["firstName"], "Sarah");
    assert_eq!(value["lastName"], "M");
    assert_eq!(value["role"], "patient");
}

#[test]
fn admin_login_response_parses_nested_admin() {
    let raw = r#"{"status":"success","data":{"token":"A1","admin":{"_id":"9","email":"root@x.io","role":"super_admin"}}}"#;
    let resp: AdminLoginResponse = serde_json::from_str(raw).unwrap();
    let data = resp.data.unwrap();
    assert_eq!(data.token, "A1");
    assert_eq!(data.admin.role, Role::SuperAdmin);
}

#[test]
fn patient_dashboard_tolerates_missing_fields() {
    let dash: PatientDashboard = serde_json::from_str(r#"{"stats":{"applications":2}}"#).unwrap();
    assert_eq!(dash.stats.applications, 2);
    assert!(dash.stats.donations_received.abs() < f64::EPSILON);
    assert!(dash.user.is_none());
}

#[test]
fn application_reads_mongo_id() {
    let raw = r#"{"_id":"a1","title":"Surgery","amount":4500,"urgency":"high","status":"pending","createdAt":"2025-01-01"}"#;
    let app: Application = serde_json::from_str(raw).unwrap();
    assert_eq!(app.id, "a1");
    assert_eq!(app.created_at.as_deref(), Some("2025-01-01"));
    assert!(app.documents.is_empty());
}

#[test]
fn list_envelope_accepts_bare_and_wrapped() {
    let bare: ListEnvelope = serde_json::from_str(r#"[{"_id":"h1","name":"City"}]"#).unwrap();
    assert_eq!(bare.into_items::<Hospital>("hospitals").unwrap().len(), 1);

    let wrapped: ListEnvelope =
        serde_json::from_str(r#"{"hospitals":[{"_id":"h1"},{"_id":"h2"}],"total":2}"#).unwrap();
    assert_eq!(wrapped.into_items::<Hospital>("hospitals").unwrap().len(), 2);
}

#[test]
fn list_envelope_reports_missing_field() {
    let wrapped: ListEnvelope = serde_json::from_str(r#"{"items":[]}"#).unwrap();
    assert_eq!(wrapped.into_items::<Hospital>("hospitals").unwrap_err(), "missing field `hospitals`");
}

#[test]
fn member_full_name_trims() {
    let member: Member = serde_json::from_str(r#"{"_id":"m1","firstName":"Ada"}"#).unwrap();
    assert_eq!(member.full_name(), "Ada");
}

#[test]
fn case_progress_is_clamped() {
    let mut case: PatientCase = serde_json::from_str(r#"{"_id":"c1","amount":45000,"raised":32000}"#).unwrap();
    assert_eq!(case.progress_percent(), 71);
    case.raised = 90_000.0;
    assert_eq!(case.progress_percent(), 100);
    case.amount = 0.0;
    assert_eq!(case.progress_percent(), 0);
}

#[test]
fn urgency_parse_and_default() {
    assert_eq!(Urgency::default(), Urgency::Medium);
    assert_eq!(Urgency::parse("critical"), Some(Urgency::Critical));
    assert_eq!(Urgency::parse("urgent"), None);
}

#[test]
fn auth_response_accepts_user_with_both_id_keys() {
    let raw = r#"{"token":"T","user":{"_id":"a1","id":"a1","role":"donor","email":"d@x.io"}}"#;
    let resp: AuthResponse = serde_json::from_str(raw).unwrap();
    assert_eq!(resp.user.id, "a1");
    assert_eq!(resp.user.role, Role::Donor);
}

#[test]
fn list_items_with_both_id_keys_decode() {
    let raw = r#"{"applications":[
        {"_id":"a1","id":"a1","title":"Surgery","amount":4500},
        {"_id":"stale","id":"a2","title":"Dialysis"},
        {"id":"a3"}
    ]}"#;
    let envelope: ListEnvelope = serde_json::from_str(raw).unwrap();
    let apps = envelope.into_items::<Application>("applications").unwrap();
    let ids: Vec<&str> = apps.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, ["a1", "a2", "a3"]);
    assert_eq!(apps[0].amount, 4500.0);
}

#[test]
fn list_envelope_rejects_non_list_field() {
    let wrapped: ListEnvelope = serde_json::from_str(r#"{"hospitals":{"_id":"h1"}}"#).unwrap();
    assert_eq!(wrapped.into_items::<Hospital>("hospitals").unwrap_err(), "field `hospitals` is not a list");
}
