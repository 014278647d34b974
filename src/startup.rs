use crate::configuration::Settings;
use crate::domain::ContactEmail;
use crate::email_client::{EmailClient, EmailSender};
use crate::routes::{self, NotificationRecipient};
use actix_web::{dev::Server, web, App, HttpServer};
use anyhow::Context;
use std::net::TcpListener;
use std::sync::Arc;
use tracing_actix_web::TracingLogger;

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    pub async fn build(configuration: Settings) -> Result<Self, anyhow::Error> {
        let sender_email = configuration
            .email_client
            .sender()
            .context("Invalid sender email address")?;
        let recipient = configuration
            .email_client
            .recipient()
            .context("Invalid recipient email address")?;

        let timeout = configuration.email_client.timeout();
        let email_client = EmailClient::new(
            configuration.email_client.base_url,
            sender_email,
            &configuration.email_client.sender_name,
            configuration.email_client.authorization_token,
            timeout,
        )
        .context("Unable to build email client")?;

        let address = format!(
            "{}:{}",
            configuration.application.host, configuration.application.port
        );
        let listener = TcpListener::bind(&address)?;
        // Retrieve the port assigned to us by the OS
        let port = listener.local_addr()?.port();
        let server = run(listener, Arc::new(email_client), recipient)?;

        // We "save" the bound port in one of `Application`'s fields.
        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// A more expressive name that makes it clear that this function only returns when the application
    /// is stopped.
    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

/// Wires the routes onto an `HttpServer` bound to `listener`.
///
/// The email sender is taken as a trait object so that any provider, or a stub, can stand behind
/// the relay endpoint.
pub fn run(
    listener: TcpListener,
    email_sender: Arc<dyn EmailSender>,
    recipient: ContactEmail,
) -> Result<Server, std::io::Error> {
    let email_sender: web::Data<dyn EmailSender> = web::Data::from(email_sender);
    let recipient = web::Data::new(NotificationRecipient(recipient));
    let server = HttpServer::new(move || {
        App::new()
            // Instead of `Logger::default`
            .wrap(TracingLogger::default())
            .route("/health_check", web::get().to(routes::health_check))
            .service(
                web::resource("/api/send-email")
                    .app_data(
                        web::JsonConfig::default()
                            .content_type_required(false)
                            .error_handler(routes::json_error_handler),
                    )
                    .route(web::post().to(routes::send_email))
                    .default_service(web::to(routes::method_not_allowed)),
            )
            .app_data(email_sender.clone())
            .app_data(recipient.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
