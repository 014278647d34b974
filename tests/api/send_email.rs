use crate::helpers::{error_message, spawn_app, valid_submission, PROVIDER_TOKEN};
use wiremock::matchers::{any, header, method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn send_email_returns_a_200_and_the_provider_id_for_a_valid_submission() {
    // Arrange
    let app = spawn_app().await;

    Mock::given(path("/emails"))
        .and(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "id": "re_123456" })),
        )
        .expect(1)
        .mount(&app.email_server)
        .await;

    // Act
    let response = app.post_contact(&valid_submission()).await;

    // Assert
    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Email sent successfully");
    assert_eq!(body["id"], "re_123456");
}

#[tokio::test]
async fn send_email_relays_the_submission_to_the_configured_recipient() {
    // Arrange
    let app = spawn_app().await;

    Mock::given(path("/emails"))
        .and(method("POST"))
        .and(header(
            "Authorization",
            format!("Bearer {PROVIDER_TOKEN}").as_str(),
        ))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.email_server)
        .await;

    // Act
    let submission = serde_json::json!({
        "email": "user@example.com",
        "message": "First line\nSecond line",
        "name": "Ursula"
    });
    app.post_contact(&submission).await;

    // Assert
    let email_request = &app.email_server.received_requests().await.unwrap()[0];
    let body: serde_json::Value = serde_json::from_slice(&email_request.body).unwrap();

    assert_eq!(body["from"], "Contact Form <onboarding@resend.dev>");
    assert_eq!(body["to"], serde_json::json!([app.recipient]));
    assert_eq!(body["subject"], "New Contact Form Message");
    assert_eq!(body["reply_to"], "user@example.com");

    let html = body["html"].as_str().unwrap();
    assert!(html.contains("First line<br>Second line"));
    assert!(html.contains("Ursula"));
    let text = body["text"].as_str().unwrap();
    assert!(text.contains("First line\nSecond line"));
    assert!(text.contains("From: user@example.com"));
}

#[tokio::test]
async fn send_email_omits_the_id_when_the_provider_does_not_return_one() {
    let app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let response = app.post_contact(&valid_submission()).await;

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Email sent successfully");
    assert!(body.get("id").is_none());
}

#[tokio::test]
async fn send_email_returns_a_400_when_a_field_is_missing() {
    // Arrange
    let app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        // Nothing may reach the provider.
        .expect(0)
        .mount(&app.email_server)
        .await;

    let test_cases = vec![
        (
            serde_json::json!({ "message": "Hello, this is a test message." }),
            "missing the email",
        ),
        (
            serde_json::json!({ "email": "user@example.com" }),
            "missing the message",
        ),
        (serde_json::json!({}), "missing both email and message"),
        (
            serde_json::json!({ "email": "", "message": "Hello, this is a test message." }),
            "an empty email",
        ),
        (
            serde_json::json!({ "email": "user@example.com", "message": null }),
            "a null message",
        ),
    ];

    for (invalid_body, description) in test_cases {
        // Act
        let response = app.post_contact(&invalid_body).await;

        // Assert
        assert_eq!(
            400,
            response.status().as_u16(),
            // Additional customised error message on test failure
            "The API did not fail with 400 Bad Request when the payload was {}.",
            description
        );
        assert_eq!(
            error_message(response).await,
            "Email and message are required"
        );
    }
}

#[tokio::test]
async fn send_email_returns_a_400_for_an_invalid_email() {
    let app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    for email in ["not-an-email", "a@b", "user @example.com", "user@@example.com"] {
        let body = serde_json::json!({
            "email": email,
            "message": "Hello, this is a test message."
        });

        let response = app.post_contact(&body).await;

        assert_eq!(
            400,
            response.status().as_u16(),
            "The API accepted {} as an email address.",
            email
        );
        assert_eq!(
            error_message(response).await,
            "Please provide a valid email address"
        );
    }
}

#[tokio::test]
async fn send_email_enforces_the_message_length_bounds() {
    let app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        // Only the two in-bounds messages are relayed.
        .expect(2)
        .mount(&app.email_server)
        .await;

    let test_cases = vec![
        (9, 400, Some("Message must be at least 10 characters long")),
        (10, 200, None),
        (5000, 200, None),
        (5001, 400, Some("Message is too long (max 5000 characters)")),
    ];

    for (length, expected_status, expected_error) in test_cases {
        let body = serde_json::json!({
            "email": "user@example.com",
            "message": "a".repeat(length)
        });

        let response = app.post_contact(&body).await;

        assert_eq!(
            expected_status,
            response.status().as_u16(),
            "Unexpected status for a message of {} characters.",
            length
        );
        if let Some(expected_error) = expected_error {
            assert_eq!(error_message(response).await, expected_error);
        }
    }
}

#[tokio::test]
async fn send_email_returns_a_generic_500_if_the_provider_fails() {
    // Arrange
    let app = spawn_app().await;

    Mock::given(path("/emails"))
        .and(method("POST"))
        .respond_with(
            ResponseTemplate::new(422)
                .set_body_json(serde_json::json!({ "message": "The `to` field is invalid." })),
        )
        .expect(1)
        .mount(&app.email_server)
        .await;

    // Act
    let response = app.post_contact(&valid_submission()).await;

    // Assert
    assert_eq!(response.status().as_u16(), 500);
    let body = response.text().await.unwrap();
    let body: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(
        body,
        serde_json::json!({ "error": "Failed to send email. Please try again later." })
    );
}

#[tokio::test]
async fn send_email_returns_a_500_if_the_provider_is_too_slow() {
    let app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_delay(std::time::Duration::from_secs(30)))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let response = app.post_contact(&valid_submission()).await;

    assert_eq!(response.status().as_u16(), 500);
    assert_eq!(
        error_message(response).await,
        "Failed to send email. Please try again later."
    );
}

#[tokio::test]
async fn send_email_returns_a_500_for_a_malformed_body() {
    let app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    let response = app.post_contact_raw("{\"email\": \"user@example.com\", ").await;

    assert_eq!(response.status().as_u16(), 500);
    assert_eq!(
        error_message(response).await,
        "An unexpected error occurred. Please try again later."
    );
}

#[tokio::test]
async fn send_email_rejects_other_methods_with_a_405() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();
    let url = format!("{}/api/send-email", &app.address);

    for request in [client.get(&url), client.put(&url), client.delete(&url)] {
        let response = request.send().await.expect("Failed to execute request.");

        assert_eq!(response.status().as_u16(), 405);
        assert_eq!(
            response
                .headers()
                .get("Allow")
                .and_then(|v| v.to_str().ok()),
            Some("POST")
        );
        assert_eq!(error_message(response).await, "Method not allowed");
    }
}
