//! Integration tests for webhook delivery
//!
//! These tests run the full submit handler against a mock webhook and check
//! both what goes over the wire and what the user ends up seeing.

use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use contact_form_service::{
    controller::{FAILURE_ALERT_PREFIX, SUCCESS_ALERT},
    AlertKind, ContactFormConfig, FormController, MemoryForm, SubmitOutcome, Submitter,
    SubmissionRecord, UiState,
};

const WEBHOOK_PATH: &str = "/webhook/contact-form";

fn config_for(server: &MockServer) -> ContactFormConfig {
    let mut config = ContactFormConfig::default();
    config.webhook.url = Some(format!("{}{}", server.uri(), WEBHOOK_PATH));
    config.client.context = "integration-test/1.0".to_string();
    config.client.source_url = "https://example.com/contact".to_string();
    config
}

fn filled_form() -> MemoryForm {
    let mut form = MemoryForm::contact();
    form.set_value("name", "  Ada Lovelace ");
    form.set_value("email", "ada@example.com");
    form.set_value("subject", "Analytical Engine");
    form.set_value("message", "I would like to order a difference engine.");
    form.set_value("company", "ACME");
    form
}

fn valid_record() -> SubmissionRecord {
    SubmissionRecord::new(vec![
        ("name", "Ada"),
        ("email", "ada@example.com"),
        ("subject", "Hi"),
        ("message", "long enough message"),
    ])
}

#[tokio::test]
async fn test_json_success_sends_envelope_and_clears_form() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(WEBHOOK_PATH))
        .and(header("content-type", "application/json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"success": true, "message": "Queued"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let controller = FormController::from_config(filled_form(), &config_for(&server)).unwrap();
    let outcome = controller.submit().await;

    assert_eq!(
        outcome,
        SubmitOutcome::Sent {
            message: "Queued".to_string()
        }
    );

    let requests = server.received_requests().await.unwrap();
    let body: Value = requests[0].body_json().unwrap();
    assert_eq!(body["formType"], "contact");
    assert_eq!(body["source"], "ai-n8nmail-form");
    assert_eq!(body["data"]["name"], "Ada Lovelace");
    assert_eq!(body["data"]["company"], "ACME");
    assert_eq!(body["data"]["clientContext"], "integration-test/1.0");
    assert_eq!(body["data"]["sourceUrl"], "https://example.com/contact");
    assert!(body["data"]["timestamp"].as_str().unwrap().ends_with('Z'));
    assert!(requests[0].headers.get("authorization").is_none());

    let view = controller.presenter().view();
    let view = view.lock();
    assert_eq!(view.alert().kind, Some(AlertKind::Success));
    assert_eq!(view.alert().text, SUCCESS_ALERT);
    assert_eq!(view.value("name"), Some(""));
    assert_eq!(view.value("message"), Some(""));
    assert!(!view.inputs_disabled());
    assert!(!view.submit_control().disabled);
}

#[tokio::test]
async fn test_api_key_sent_as_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(WEBHOOK_PATH))
        .and(header("authorization", "Bearer s3cret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = config_for(&server);
    config.webhook.api_key = Some("s3cret".to_string());

    let controller = FormController::from_config(filled_form(), &config).unwrap();
    assert!(controller.submit().await.is_sent());
}

#[tokio::test]
async fn test_server_error_keeps_form() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(WEBHOOK_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("stack trace"))
        .expect(1)
        .mount(&server)
        .await;

    let controller = FormController::from_config(filled_form(), &config_for(&server)).unwrap();
    let outcome = controller.submit().await;

    assert_eq!(
        outcome,
        SubmitOutcome::Failed {
            message: "HTTP 500: Internal Server Error".to_string()
        }
    );

    let view = controller.presenter().view();
    let view = view.lock();
    assert_eq!(view.alert().kind, Some(AlertKind::Error));
    assert_eq!(
        view.alert().text,
        format!("{}HTTP 500: Internal Server Error", FAILURE_ALERT_PREFIX)
    );
    assert_eq!(view.value("name"), Some("  Ada Lovelace "));
    assert!(!view.inputs_disabled());
    assert_eq!(controller.presenter().ui_state(), UiState::Idle);
}

#[tokio::test]
async fn test_status_without_reason_phrase() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(WEBHOOK_PATH))
        .respond_with(ResponseTemplate::new(599))
        .mount(&server)
        .await;

    let submitter = Submitter::from_config(&config_for(&server)).unwrap();
    let result = submitter.submit(&valid_record()).await;

    assert!(!result.is_success());
    assert_eq!(result.message(), "HTTP 599");
}

#[tokio::test]
async fn test_plain_text_reply_is_wrapped() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(WEBHOOK_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .mount(&server)
        .await;

    let submitter = Submitter::from_config(&config_for(&server)).unwrap();
    let reply = submitter.send(&valid_record()).await.unwrap();

    assert_eq!(reply.into_value(), json!({"success": true, "message": "ok"}));
}

#[tokio::test]
async fn test_json_reply_passed_through() {
    let server = MockServer::start().await;
    let payload = json!({"success": true, "message": "Queued", "ticket": 42});
    Mock::given(method("POST"))
        .and(path(WEBHOOK_PATH))
        .respond_with(ResponseTemplate::new(201).set_body_json(payload.clone()))
        .mount(&server)
        .await;

    let submitter = Submitter::from_config(&config_for(&server)).unwrap();
    let reply = submitter.send(&valid_record()).await.unwrap();

    assert_eq!(reply.into_value(), payload);
}

#[tokio::test]
async fn test_application_failure_keeps_form() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(WEBHOOK_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": false, "message": "Mailbox full"})),
        )
        .mount(&server)
        .await;

    let controller = FormController::from_config(filled_form(), &config_for(&server)).unwrap();
    let outcome = controller.submit().await;

    assert_eq!(
        outcome,
        SubmitOutcome::Failed {
            message: "Mailbox full".to_string()
        }
    );
    let view = controller.presenter().view();
    assert_eq!(view.lock().value("subject"), Some("Analytical Engine"));
}

#[tokio::test]
async fn test_application_failure_without_message_uses_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(WEBHOOK_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": false})))
        .mount(&server)
        .await;

    let submitter = Submitter::from_config(&config_for(&server)).unwrap();
    let result = submitter.submit(&valid_record()).await;

    assert!(!result.is_success());
    assert_eq!(result.message(), "Failed to send message");
}

#[tokio::test]
async fn test_malformed_json_reply_is_a_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(WEBHOOK_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_raw("{not json", "application/json"))
        .mount(&server)
        .await;

    let submitter = Submitter::from_config(&config_for(&server)).unwrap();
    let result = submitter.submit(&valid_record()).await;

    assert!(!result.is_success());
    assert!(result.message().starts_with("Serialization error"));
}

#[tokio::test]
async fn test_invalid_form_never_reaches_webhook() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut form = filled_form();
    form.set_value("message", "too short");

    let controller = FormController::from_config(form, &config_for(&server)).unwrap();
    let outcome = controller.submit().await;

    assert_eq!(
        outcome,
        SubmitOutcome::Rejected {
            reason: "Please enter a message with at least 10 characters.".to_string()
        }
    );
}

#[tokio::test]
async fn test_unreachable_webhook_is_a_failure() {
    // bind then drop to get a port nothing listens on
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();

    let mut config = ContactFormConfig::default();
    config.webhook.url = Some(format!("http://127.0.0.1:{}{}", port, WEBHOOK_PATH));

    let controller = FormController::from_config(filled_form(), &config).unwrap();
    let outcome = controller.submit().await;

    assert!(matches!(outcome, SubmitOutcome::Failed { .. }));
    let view = controller.presenter().view();
    let view = view.lock();
    assert!(view.alert().text.starts_with(FAILURE_ALERT_PREFIX));
    assert_eq!(view.value("email"), Some("ada@example.com"));
}

#[tokio::test]
async fn test_resubmit_after_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(WEBHOOK_PATH))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(WEBHOOK_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .mount(&server)
        .await;

    let controller = FormController::from_config(filled_form(), &config_for(&server)).unwrap();

    assert!(matches!(
        controller.submit().await,
        SubmitOutcome::Failed { .. }
    ));
    assert!(controller.submit().await.is_sent());
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}
