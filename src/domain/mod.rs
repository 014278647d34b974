mod contact_email;
mod contact_message;
mod contact_submission;
mod validation_error;

pub use contact_email::ContactEmail;
pub use contact_message::ContactMessage;
pub use contact_submission::{ContactFormData, ContactSubmission};
pub use validation_error::ValidationError;
