use super::ValidationError;

const MIN_LENGTH: usize = 10;
const MAX_LENGTH: usize = 5000;

#[derive(Debug, Clone)]
pub struct ContactMessage(String);

impl ContactMessage {
    /// Returns an instance of `ContactMessage` if the input is between 10 and 5000 characters long,
    /// both bounds included.
    ///
    /// Length is counted in UTF-16 code units, the unit the browser's form validation reports:
    /// an emoji outside the Basic Multilingual Plane counts as two, `\r\n` counts as two.
    pub fn parse(s: String) -> Result<ContactMessage, ValidationError> {
        let length = s.encode_utf16().count();
        if length < MIN_LENGTH {
            Err(ValidationError::MessageTooShort)
        } else if length > MAX_LENGTH {
            Err(ValidationError::MessageTooLong)
        } else {
            Ok(Self(s))
        }
    }
}

impl AsRef<str> for ContactMessage {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
