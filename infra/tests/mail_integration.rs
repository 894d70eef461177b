//! Integration tests for verification code delivery by email

use std::sync::Arc;

use mv_core::errors::DomainError;
use mv_core::services::verification::{VerificationService, VerificationServiceConfig, VerifyOutcome};
use mv_infra::mail::{MailService, MailServiceAdapter, MockMailService};
use mv_infra::{initialize, InfrastructureError};
use mv_shared::{AppConfig, ConfigError};

fn quiet_config() -> AppConfig {
    AppConfig::from_vars(|key| match key {
        "APP_NAME" => Some("Integration".to_string()),
        "VERIFICATION_SWEEP_INTERVAL_SECONDS" => Some("0".to_string()),
        _ => None,
    })
    .unwrap()
}

/// Pull the code out of a rendered text body
fn code_from_body(body: &str) -> String {
    body.lines()
        .find_map(|line| line.strip_prefix("Verification Code: "))
        .expect("body carries a code")
        .to_string()
}

#[tokio::test]
async fn test_complete_email_verification_workflow() {
    let mock = MockMailService::with_options("Integration", false, false);
    let mailer = MailServiceAdapter::new(Box::new(mock.clone()));
    let service = VerificationService::new(VerificationServiceConfig::default()).unwrap();

    let sent = service
        .send_verification_code(&mailer, "alice@example.com", Some("Welcome!"))
        .await
        .unwrap();
    assert!(sent.message_id.starts_with("mock_"));

    let (recipient, message) = mock.last_message().unwrap();
    assert_eq!(recipient, "alice@example.com");
    assert!(message.text_body.starts_with("Welcome!"));

    let delivered = code_from_body(&message.text_body);
    assert_eq!(delivered, sent.issued.code);

    assert_eq!(service.verify("alice@example.com", "000000x"), VerifyOutcome::Mismatch);
    assert_eq!(service.verify("alice@example.com", &delivered), VerifyOutcome::Success);
    assert_eq!(service.verify("alice@example.com", &delivered), VerifyOutcome::NotFound);
}

#[tokio::test]
async fn test_failed_delivery_leaves_code_valid() {
    let mock = MockMailService::with_options("Integration", false, true);
    let mailer = MailServiceAdapter::new(Box::new(mock));
    let service = VerificationService::new(VerificationServiceConfig::default()).unwrap();

    let err = service
        .send_verification_code(&mailer, "bob@example.com", None)
        .await
        .unwrap_err();
    assert!(err.is_dispatch());
    assert!(service.has_pending("bob@example.com"));
}

#[tokio::test]
async fn test_initialize_wires_services() {
    let mut services = initialize(quiet_config()).await.unwrap();
    assert_eq!(services.mailer.provider_name(), "Mock");
    assert!(!services.is_sweeping());

    let sent = services
        .send_verification_code("carol@example.com", None)
        .await
        .unwrap();
    assert_eq!(sent.issued.code.len(), 6);
    assert_eq!(services.pending_count(), 1);

    assert_eq!(services.verify("carol@example.com", &sent.issued.code), VerifyOutcome::Success);
    assert_eq!(services.pending_count(), 0);
    assert_eq!(services.sweep(), 0);

    services.shutdown();
}

#[tokio::test]
async fn test_initialize_applies_verification_settings() {
    let config = AppConfig::from_vars(|key| match key {
        "VERIFICATION_CODE_LENGTH" => Some("8".to_string()),
        "VERIFICATION_CODE_TTL_MINUTES" => Some("3".to_string()),
        _ => None,
    })
    .unwrap();

    let mut services = initialize(config).await.unwrap();
    assert!(services.is_sweeping());

    let sent = services.send_verification_code("dave@example.com", None).await.unwrap();
    assert_eq!(sent.issued.code.len(), 8);
    let ttl = sent.issued.expires_at - chrono::Utc::now();
    assert!(ttl <= chrono::Duration::minutes(3));
    assert!(ttl > chrono::Duration::minutes(2));

    services.shutdown();
    assert!(!services.is_sweeping());
}

#[tokio::test]
async fn test_initialize_rejects_invalid_settings() {
    let mut config = quiet_config();
    config.verification.code_length = 0;

    let err = initialize(config).await.err().unwrap();
    assert!(matches!(
        err,
        InfrastructureError::InvalidConfig(ConfigError::OutOfRange { .. })
    ));
}

#[tokio::test]
async fn test_invalid_recipient_is_rejected_before_issue() {
    let services = initialize(quiet_config()).await.unwrap();

    let err = services
        .send_verification_code("not an email", None)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation { .. }));
    assert_eq!(services.pending_count(), 0);
}

#[tokio::test]
async fn test_shared_mock_across_tasks() {
    let mock = MockMailService::with_options("Integration", false, false);
    let mailer = Arc::new(MailServiceAdapter::new(Box::new(mock.clone())));
    let service = Arc::new(VerificationService::new(VerificationServiceConfig::default()).unwrap());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let mailer = mailer.clone();
            let service = service.clone();
            tokio::spawn(async move {
                service
                    .send_verification_code(mailer.as_ref(), &format!("user{}@example.com", i), None)
                    .await
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.await.unwrap().is_ok());
    }

    assert_eq!(mock.get_message_count(), 8);
    assert_eq!(service.pending_count(), 8);
    assert!(mock.is_available().await);
}
