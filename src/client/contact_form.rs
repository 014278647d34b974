use crate::domain::ContactFormData;
use anyhow::Context;
use reqwest::StatusCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitStatus {
    Success,
    Error,
}

/// How the form reaches the relay endpoint.
#[async_trait::async_trait]
pub trait ContactTransport: Send + Sync {
    /// Resolves to the HTTP status of the response, or fails if no response came back at all.
    async fn post_submission(&self, form: &ContactFormData) -> Result<StatusCode, anyhow::Error>;
}

/// Posts submissions as JSON to `<base_url>/api/send-email`.
pub struct ContactApiClient {
    http_client: reqwest::Client,
    endpoint: String,
}

impl ContactApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            endpoint: format!("{}/api/send-email", base_url.trim_end_matches('/')),
        }
    }
}

#[async_trait::async_trait]
impl ContactTransport for ContactApiClient {
    async fn post_submission(&self, form: &ContactFormData) -> Result<StatusCode, anyhow::Error> {
        let response = self
            .http_client
            .post(&self.endpoint)
            .json(form)
            .send()
            .await
            .context("Failed to reach the contact endpoint")?;
        Ok(response.status())
    }
}

/// The contact form as the page holds it.
///
/// A submission goes `idle -> submitting -> (success | error) -> idle`. Nothing cancels or
/// times out a submission in flight, that is left to the transport.
#[derive(Debug, Default, Clone)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
    is_submitting: bool,
    status: Option<SubmitStatus>,
}

impl ContactForm {
    /// A form filled in with the given values, with nothing submitted yet.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
            ..Default::default()
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    /// Outcome of the last submission, `None` until one completes.
    pub fn status(&self) -> Option<SubmitStatus> {
        self.status
    }

    /// Whether the send button is enabled.
    pub fn can_submit(&self) -> bool {
        !self.is_submitting && !self.email.is_empty() && !self.message.is_empty()
    }

    /// Enters the submitting state and hands back the payload to post, unless the form can't be
    /// submitted right now.
    pub fn begin_submit(&mut self) -> Option<ContactFormData> {
        if !self.can_submit() {
            return None;
        }
        self.is_submitting = true;
        self.status = None;

        Some(ContactFormData {
            email: Some(self.email.clone()),
            message: Some(self.message.clone()),
            name: Some(self.name.clone()).filter(|name| !name.is_empty()),
        })
    }

    /// Leaves the submitting state, whatever the outcome. The fields are only cleared on success
    /// so that the user can retry after a failure without retyping anything.
    pub fn finish_submit(&mut self, outcome: Result<StatusCode, anyhow::Error>) -> SubmitStatus {
        let status = match outcome {
            Ok(code) if code.is_success() => {
                self.name.clear();
                self.email.clear();
                self.message.clear();
                SubmitStatus::Success
            }
            Ok(code) => {
                tracing::warn!(status = code.as_u16(), "The contact endpoint refused the submission");
                SubmitStatus::Error
            }
            Err(e) => {
                tracing::warn!(error.cause_chain = ?e, "The contact submission did not go through");
                SubmitStatus::Error
            }
        };
        self.is_submitting = false;
        self.status = Some(status);
        status
    }

    /// Runs a whole submission through `transport`. Returns `None` if the form could not be
    /// submitted in the first place.
    #[tracing::instrument(name = "Submitting the contact form", skip(self, transport))]
    pub async fn submit<T>(&mut self, transport: &T) -> Option<SubmitStatus>
    where
        T: ContactTransport + ?Sized,
    {
        let payload = self.begin_submit()?;
        let outcome = transport.post_submission(&payload).await;
        Some(self.finish_submit(outcome))
    }
}
