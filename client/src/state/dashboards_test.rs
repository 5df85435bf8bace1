use serde_json::json;

use super::*;

fn case(id: &str, name: &str, title: &str, urgency: &str) -> PatientCase {
    serde_json::from_value(json!({
        "id": id,
        "patient": {"name": name},
        "title": title,
        "amount": 1000.0,
        "urgency": urgency,
        "location": "Lagos",
    }))
    .unwrap()
}

fn application(id: &str, status: &str) -> Application {
    serde_json::from_value(json!({"_id": id, "title": "Surgery", "amount": 500, "status": status})).unwrap()
}

fn verification(id: &str, name: &str, title: &str) -> Verification {
    serde_json::from_value(json!({"id": id, "patient": {"name": name}, "title": title, "status": "pending"})).unwrap()
}

#[test]
fn empty_filter_keeps_everything() {
    let cases = vec![case("1", "Ada", "Heart surgery", "high"), case("2", "Bo", "Dialysis", "low")];
    assert_eq!(filter_cases(&cases, &CaseFilter::default()).len(), 2);
}

#[test]
fn search_matches_name_title_or_location_case_insensitively() {
    let cases = vec![case("1", "Ada", "Heart surgery", "high"), case("2", "Bo", "Dialysis", "low")];
    let by_name = CaseFilter { search: " ada ".into(), urgency: None };
    assert_eq!(filter_cases(&cases, &by_name)[0].id, "1");
    let by_title = CaseFilter { search: "DIALY".into(), urgency: None };
    assert_eq!(filter_cases(&cases, &by_title)[0].id, "2");
    let by_location = CaseFilter { search: "lagos".into(), urgency: None };
    assert_eq!(filter_cases(&cases, &by_location).len(), 2);
}

#[test]
fn urgency_filter_combines_with_search() {
    let cases = vec![case("1", "Ada", "Heart surgery", "high"), case("2", "Ada", "Checkup", "low")];
    let filter = CaseFilter { search: "ada".into(), urgency: Some(Urgency::High) };
    let hits = filter_cases(&cases, &filter);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, "1");
}

#[test]
fn verification_search() {
    let items = vec![verification("v1", "Ada", "Knee"), verification("v2", "Bo", "Hip")];
    assert_eq!(filter_verifications(&items, "").len(), 2);
    assert_eq!(filter_verifications(&items, "hip")[0].id, "v2");
    assert!(filter_verifications(&items, "zzz").is_empty());
}

#[test]
fn decisions_update_matching_row_only() {
    let mut apps = vec![application("a1", "pending"), application("a2", "pending")];
    assert!(mark_application_status(&mut apps, "a2", ReviewDecision::Decline));
    assert_eq!(apps[0].status, "pending");
    assert_eq!(apps[1].status, "rejected");
    assert!(!mark_application_status(&mut apps, "missing", ReviewDecision::Approve));

    let mut items = vec![verification("v1", "Ada", "Knee")];
    assert!(mark_verification_status(&mut items, "v1", VerificationDecision::Verify));
    assert_eq!(items[0].status, "verified");
}

#[test]
fn pending_count_treats_blank_as_pending() {
    assert_eq!(pending_count(["pending", "", "approved", "Pending", "pending_verification"]), 4);
}

#[test]
fn admin_tab_counts() {
    let overview = AdminOverview { applications: vec![application("a1", "pending")], ..AdminOverview::default() };
    assert_eq!(AdminTab::Applications.count(&overview), 1);
    assert_eq!(AdminTab::Hospitals.count(&overview), 0);
    assert_eq!(AdminTab::default(), AdminTab::Applications);
}
