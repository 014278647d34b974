use crate::domain::ContactSubmission;
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use tera::{Context, Tera};

pub const NOTIFICATION_SUBJECT: &str = "New Contact Form Message";

const HTML_TEMPLATE: &str = "contact_notification.html";
const TEXT_TEMPLATE: &str = "contact_notification.txt";

/// The templates ship inside the binary, so a deployment can't lose them.
static TEMPLATES: Lazy<Tera> = Lazy::new(|| {
    let mut tera = Tera::default();
    tera.add_raw_templates(vec![
        (
            HTML_TEMPLATE,
            include_str!("../templates/contact_notification.html"),
        ),
        (
            TEXT_TEMPLATE,
            include_str!("../templates/contact_notification.txt"),
        ),
    ])
    .expect("Failed to parse the notification templates");
    tera
});

/// The email the site owner receives for every accepted submission.
#[derive(Debug)]
pub struct ContactNotification {
    pub html_content: String,
    pub text_content: String,
}

impl ContactNotification {
    /// `sent_at` is taken as a parameter so the output is reproducible.
    pub fn render(
        submission: &ContactSubmission,
        sent_at: DateTime<Utc>,
    ) -> Result<Self, tera::Error> {
        let mut context = Context::new();
        context.insert("subject", NOTIFICATION_SUBJECT);
        context.insert("sender_email", submission.email.as_ref());
        context.insert("sender_name", &submission.name);
        context.insert("message", submission.message.as_ref());
        context.insert("message_html", &message_to_html(submission.message.as_ref()));
        context.insert(
            "sent_at",
            &sent_at.format("%A, %B %-d, %Y at %H:%M UTC").to_string(),
        );
        context.insert("sent_on", &sent_at.format("%Y-%m-%d").to_string());

        Ok(Self {
            html_content: TEMPLATES.render(HTML_TEMPLATE, &context)?,
            text_content: TEMPLATES.render(TEXT_TEMPLATE, &context)?,
        })
    }
}

/// Escapes the message and turns its line breaks into `<br>` so it keeps its shape in a mail
/// client. The result is inserted unescaped in the HTML template.
fn message_to_html(message: &str) -> String {
    htmlescape::encode_minimal(message)
        .replace("\r\n", "<br>")
        .replace('\n', "<br>")
}
