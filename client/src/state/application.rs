//! Funding-application form model shared by the apply modal and apply page.

#[cfg(test)]
#[path = "application_test.rs"]
mod application_test;

use crate::net::transport::{Attachment, FormPart, FormValue};
use crate::net::types::Urgency;

pub const APPLICATION_FAILED_MESSAGE: &str = "Failed to create application.";

/// A validated application ready to submit.
#[derive(Clone, Debug)]
pub struct ApplicationDraft {
    pub title: String,
    /// Amount exactly as typed, after trimming; it is known to parse as a positive number.
    pub amount: String,
    pub urgency: Urgency,
    pub documents: Vec<Attachment>,
}

impl ApplicationDraft {
    /// Multipart fields in the order the API expects them.
    pub fn form_parts(&self) -> Vec<FormPart> {
        let mut parts = vec![
            FormPart::text("title", self.title.clone()),
            FormPart::text("amount", self.amount.clone()),
            FormPart::text("urgency", self.urgency.as_str()),
        ];
        parts.extend(
            self.documents
                .iter()
                .cloned()
                .map(|doc| FormPart { name: "documents".to_owned(), value: FormValue::File(doc) }),
        );
        parts
    }
}

/// Validate raw form input into a draft.
///
/// # Errors
///
/// Returns the message to show next to the form.
pub fn validate_application(
    title: &str,
    amount: &str,
    urgency: &str,
    documents: Vec<Attachment>,
) -> Result<ApplicationDraft, &'static str> {
    let title = title.trim();
    if title.is_empty() {
        return Err("Enter a title for your application.");
    }
    let amount = amount.trim();
    match amount.parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => {}
        _ => return Err("Enter a funding amount greater than zero."),
    }
    let urgency = Urgency::parse(urgency).ok_or("Choose an urgency level.")?;
    Ok(ApplicationDraft { title: title.to_owned(), amount: amount.to_owned(), urgency, documents })
}
