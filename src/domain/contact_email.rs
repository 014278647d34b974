use super::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;

/// Anything but whitespace or `@`. Whitespace is the ECMAScript `\s` set the browser-side check
/// uses, which differs from Rust's Unicode `\s` on U+FEFF (included) and U+0085 (excluded).
const ADDRESS_PART: &str = r"[^\t\n\x0B\x0C\r \x{A0}\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}@]+";

/// `local@domain.tld`, where no part may contain whitespace or another `@`.
///
/// It lets through some addresses no mail server would accept and rejects a few exotic valid
/// ones (quoted local parts, dotless domains). The contact form has always behaved this way.
static EMAIL_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"^{ADDRESS_PART}@{ADDRESS_PART}\.{ADDRESS_PART}$"
    ))
    .expect("email shape regex")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactEmail(String);

impl ContactEmail {
    pub fn parse(s: String) -> Result<ContactEmail, ValidationError> {
        if EMAIL_SHAPE.is_match(&s) {
            Ok(Self(s))
        } else {
            Err(ValidationError::InvalidEmail)
        }
    }
}

impl AsRef<str> for ContactEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ContactEmail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
