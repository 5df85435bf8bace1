//! Status and urgency badges.

use leptos::prelude::*;

use crate::net::types::Urgency;
use crate::util::format::{status_class, status_label, urgency_class};

#[component]
pub fn StatusBadge(#[prop(into)] status: String) -> impl IntoView {
    view! { <span class=status_class(&status)>{status_label(&status)}</span> }
}

/// Badge for a raw urgency value; unknown values render as plain text.
#[component]
pub fn UrgencyBadge(#[prop(into)] urgency: String) -> impl IntoView {
    let class = Urgency::parse(&urgency).map_or("badge", urgency_class);
    view! { <span class=class>{status_label(&urgency)}</span> }
}
