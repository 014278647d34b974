//! State kept by the portfolio page itself, independent of any UI toolkit.

mod contact_form;
mod section_tracker;

pub use contact_form::{ContactApiClient, ContactForm, ContactTransport, SubmitStatus};
pub use section_tracker::{SectionTracker, PORTFOLIO_SECTIONS};
