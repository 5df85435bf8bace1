use super::*;

fn text_of(part: &FormPart) -> Option<&str> {
    match &part.value {
        FormValue::Text(text) => Some(text),
        FormValue::File(_) => None,
    }
}

#[test]
fn validate_trims_and_accepts_valid_input() {
    let draft = validate_application("  Heart surgery ", " 4500.50 ", "critical", Vec::new()).unwrap();
    assert_eq!(draft.title, "Heart surgery");
    assert_eq!(draft.amount, "4500.50");
    assert_eq!(draft.urgency, Urgency::Critical);
}

#[test]
fn validate_requires_title() {
    assert_eq!(
        validate_application("   ", "100", "low", Vec::new()).unwrap_err(),
        "Enter a title for your application."
    );
}

#[test]
fn validate_rejects_non_positive_or_garbage_amounts() {
    for amount in ["", "0", "-5", "abc", "NaN", "inf"] {
        assert_eq!(
            validate_application("t", amount, "low", Vec::new()).unwrap_err(),
            "Enter a funding amount greater than zero.",
            "amount {amount:?}"
        );
    }
}

#[test]
fn validate_rejects_unknown_urgency() {
    assert_eq!(
        validate_application("t", "10", "whenever", Vec::new()).unwrap_err(),
        "Choose an urgency level."
    );
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn form_parts_list_fields_then_documents() {
    let docs = vec![
        Attachment { name: "report.pdf".to_owned() },
        Attachment { name: "scan.pdf".to_owned() },
    ];
    let draft = validate_application("Surgery", "4500", "high", docs).unwrap();
    let parts = draft.form_parts();
    let names: Vec<_> = parts.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["title", "amount", "urgency", "documents", "documents"]);
    assert_eq!(text_of(&parts[2]), Some("high"));
    assert!(text_of(&parts[3]).is_none());
}
