use super::*;

#[test]
fn currency_groups_thousands() {
    assert_eq!(currency(0.0), "$0");
    assert_eq!(currency(950.0), "$950");
    assert_eq!(currency(12_500.0), "$12,500");
    assert_eq!(currency(1_234_567.4), "$1,234,567");
}

#[test]
fn currency_rounds_and_handles_odd_values() {
    assert_eq!(currency(999.6), "$1,000");
    assert_eq!(currency(-2500.0), "-$2,500");
    assert_eq!(currency(f64::NAN), "$0");
}

#[test]
fn short_date_strips_time() {
    assert_eq!(short_date("2024-03-01T10:20:30.000Z"), "2024-03-01");
    assert_eq!(short_date("yesterday"), "yesterday");
}

#[test]
fn status_classes() {
    assert_eq!(status_class("approved"), "badge badge--success");
    assert_eq!(status_class("Verified"), "badge badge--success");
    assert_eq!(status_class("rejected"), "badge badge--danger");
    assert_eq!(status_class("pending"), "badge badge--pending");
    assert_eq!(status_class(""), "badge badge--pending");
}

#[test]
fn status_labels_are_title_cased() {
    assert_eq!(status_label("under_review"), "Under Review");
    assert_eq!(status_label("APPROVED"), "Approved");
    assert_eq!(status_label(""), "Pending");
}

#[test]
fn urgency_classes_are_distinct() {
    let classes: std::collections::HashSet<_> = Urgency::ALL.into_iter().map(urgency_class).collect();
    assert_eq!(classes.len(), Urgency::ALL.len());
}
