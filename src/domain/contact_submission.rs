use super::{ContactEmail, ContactMessage, ValidationError};

/// The JSON body posted by the contact form, exactly as the browser sent it.
///
/// Every field is optional at this stage: a missing or `null` field must surface as a
/// [`ValidationError::MissingField`], not as a deserialization failure.
#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, Default)]
pub struct ContactFormData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// A submission that passed every check and is ready to be turned into a notification.
///
/// It only lives for the duration of one request.
#[derive(Debug, Clone)]
pub struct ContactSubmission {
    pub email: ContactEmail,
    pub message: ContactMessage,
    /// Free text, never validated beyond trimming.
    pub name: Option<String>,
}

impl TryFrom<ContactFormData> for ContactSubmission {
    type Error = ValidationError;

    /// Checks run in a fixed order and the first failure wins: presence, email shape, then the
    /// message's lower and upper length bounds.
    fn try_from(value: ContactFormData) -> Result<Self, Self::Error> {
        let (email, message) = match (value.email, value.message) {
            (Some(email), Some(message)) if !email.is_empty() && !message.is_empty() => {
                (email, message)
            }
            _ => return Err(ValidationError::MissingField),
        };
        let email = ContactEmail::parse(email)?;
        let message = ContactMessage::parse(message)?;
        let name = value
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());

        Ok(Self {
            email,
            message,
            name,
        })
    }
}
