use crate::domain::ContactEmail;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};

/// A fully rendered email, ready to be handed over to a provider.
#[derive(Debug, Clone)]
pub struct OutgoingEmail {
    pub recipient: ContactEmail,
    pub reply_to: ContactEmail,
    pub subject: String,
    pub html_content: String,
    pub text_content: String,
}

/// What the provider gives back for an accepted email.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmailReceipt {
    pub id: Option<String>,
}

#[derive(thiserror::Error, Debug)]
pub enum EmailError {
    #[error("The email provider rejected the request with status {status}")]
    Rejected { status: u16, body: String },
    #[error("Failed to reach the email provider")]
    Transport(#[from] reqwest::Error),
}

/// The one capability the contact relay needs from the outside world: hand an email over for
/// delivery, at most once.
#[async_trait::async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, email: &OutgoingEmail) -> Result<EmailReceipt, EmailError>;
}

/// Talks to Resend's REST API.
pub struct EmailClient {
    http_client: Client,
    base_url: String,
    /// `Display Name <address>`, as the provider expects it in `from`.
    sender: String,
    authorization_token: Secret<String>,
}

impl EmailClient {
    pub fn new(
        base_url: String,
        sender: ContactEmail,
        sender_name: &str,
        authorization_token: Secret<String>,
        timeout: std::time::Duration,
    ) -> Result<Self, reqwest::Error> {
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            base_url,
            sender: format!("{sender_name} <{sender}>"),
            authorization_token,
        })
    }
}

#[async_trait::async_trait]
impl EmailSender for EmailClient {
    #[tracing::instrument(
        name = "Sending an email through the provider",
        skip(self, email),
        fields(recipient = %email.recipient, reply_to = %email.reply_to)
    )]
    async fn send(&self, email: &OutgoingEmail) -> Result<EmailReceipt, EmailError> {
        let url = format!("{}/emails", self.base_url);
        let request_body = SendEmailRequest {
            from: &self.sender,
            to: [email.recipient.as_ref()],
            subject: &email.subject,
            html: &email.html_content,
            text: &email.text_content,
            reply_to: email.reply_to.as_ref(),
        };

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(self.authorization_token.expose_secret())
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            // Best effort: the body only ends up in our logs.
            let body = response.text().await.unwrap_or_default();
            return Err(EmailError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        // The email is already on its way at this point, a body we can't read only costs us the id.
        let id = match response.json::<SendEmailResponse>().await {
            Ok(response) => response.id,
            Err(e) => {
                tracing::warn!(error.cause_chain = ?e, "The provider accepted the email but its response could not be parsed");
                None
            }
        };

        Ok(EmailReceipt { id })
    }
}

#[derive(serde::Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
    text: &'a str,
    reply_to: &'a str,
}

#[derive(serde::Deserialize)]
struct SendEmailResponse {
    id: Option<String>,
}
