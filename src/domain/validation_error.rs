/// Everything that can be wrong with a submission the user can fix on their own.
///
/// The `Display` output is sent back verbatim to the browser, keep it human friendly.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Email and message are required")]
    MissingField,
    #[error("Please provide a valid email address")]
    InvalidEmail,
    #[error("Message must be at least 10 characters long")]
    MessageTooShort,
    #[error("Message is too long (max 5000 characters)")]
    MessageTooLong,
}
