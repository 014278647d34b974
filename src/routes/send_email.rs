use crate::domain::{ContactEmail, ContactFormData, ContactSubmission, ValidationError};
use crate::email_client::{EmailError, EmailSender, OutgoingEmail};
use crate::notification::{ContactNotification, NOTIFICATION_SUBJECT};
use crate::utils::error_chain_fmt;
use actix_web::error::JsonPayloadError;
use actix_web::http::{header, StatusCode};
use actix_web::{web, HttpRequest, HttpResponse, ResponseError};
use anyhow::Context;

/// The inbox every contact notification is delivered to.
#[derive(Debug, Clone)]
pub struct NotificationRecipient(pub ContactEmail);

#[derive(serde::Serialize)]
struct SendEmailResponse {
    message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
}

#[derive(serde::Serialize)]
struct ErrorResponse {
    error: String,
}

/// Only validation failures are specific. Everything else reaches the caller as a generic message,
/// the details stay in our logs.
#[derive(thiserror::Error)]
pub enum SendEmailError {
    #[error(transparent)]
    ValidationError(#[from] ValidationError),
    #[error("Failed to send email. Please try again later.")]
    ProviderError(#[source] EmailError),
    #[error("An unexpected error occurred. Please try again later.")]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for SendEmailError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for SendEmailError {
    fn status_code(&self) -> StatusCode {
        match self {
            SendEmailError::ValidationError(_) => StatusCode::BAD_REQUEST,
            SendEmailError::ProviderError(_) | SendEmailError::UnexpectedError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
        })
    }
}

/// Validates a contact form submission and relays it to the site owner's inbox.
///
/// Every call results in at most one email: there are no retries, a failed send has to be
/// resubmitted by the user.
#[tracing::instrument(
    name = "Relaying a contact form submission",
    skip(form, email_sender, recipient),
    fields(sender_email = tracing::field::Empty)
)]
pub async fn send_email(
    form: web::Json<ContactFormData>,
    email_sender: web::Data<dyn EmailSender>,
    recipient: web::Data<NotificationRecipient>,
) -> Result<HttpResponse, SendEmailError> {
    let submission: ContactSubmission = form.into_inner().try_into()?;
    tracing::Span::current().record(
        "sender_email",
        &tracing::field::display(&submission.email),
    );

    let notification = ContactNotification::render(&submission, chrono::Utc::now())
        .context("Failed to render the contact notification")?;
    let email = OutgoingEmail {
        recipient: recipient.0.clone(),
        reply_to: submission.email,
        subject: NOTIFICATION_SUBJECT.into(),
        html_content: notification.html_content,
        text_content: notification.text_content,
    };

    let receipt = email_sender.send(&email).await.map_err(|e| {
        tracing::error!(error.cause_chain = ?e, error.message = %e, "Failed to send the contact notification");
        SendEmailError::ProviderError(e)
    })?;
    tracing::info!(email_id = ?receipt.id, "Email sent successfully");

    Ok(HttpResponse::Ok().json(SendEmailResponse {
        message: "Email sent successfully",
        id: receipt.id,
    }))
}

/// Any verb other than `POST` on the relay endpoint.
pub async fn method_not_allowed() -> HttpResponse {
    HttpResponse::MethodNotAllowed()
        .insert_header((header::ALLOW, "POST"))
        .json(ErrorResponse {
            error: "Method not allowed".into(),
        })
}

/// A body that isn't the JSON object we expect is not something the user can fix from the form,
/// so it is reported like any other unexpected failure.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    SendEmailError::UnexpectedError(
        anyhow::Error::msg(err.to_string()).context("Failed to parse the request body"),
    )
    .into()
}
