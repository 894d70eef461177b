//! Unit tests for mail service factory

use mv_shared::MailConfig;

use crate::mail::create_mail_service;

#[tokio::test]
async fn test_create_mock_service() {
    let config = MailConfig {
        app_name: "Acme".to_string(),
        ..MailConfig::default()
    };
    let service = create_mail_service(&config).await;
    assert_eq!(service.provider_name(), "Mock");
    assert_eq!(service.app_name(), "Acme");
}

#[tokio::test]
async fn test_unknown_provider_falls_back_to_mock() {
    let config = MailConfig {
        provider: "carrier-pigeon".to_string(),
        ..MailConfig::default()
    };
    let service = create_mail_service(&config).await;
    assert_eq!(service.provider_name(), "Mock");
}

#[tokio::test]
async fn test_ses_without_sender_falls_back_to_mock() {
    let config = MailConfig {
        provider: "ses".to_string(),
        sender_email: None,
        ..MailConfig::default()
    };
    let service = create_mail_service(&config).await;
    assert_eq!(service.provider_name(), "Mock");
}

#[cfg(feature = "ses-email")]
#[test]
fn test_ses_config_requires_sender() {
    use crate::mail::SesConfig;

    assert!(SesConfig::from_mail_config(&MailConfig::default()).is_err());

    let config = MailConfig {
        provider: "ses".to_string(),
        sender_email: Some("noreply@example.com".to_string()),
        region: "eu-west-1".to_string(),
        ..MailConfig::default()
    };
    let ses = SesConfig::from_mail_config(&config).unwrap();
    assert_eq!(ses.sender_email, "noreply@example.com");
    assert_eq!(ses.region, "eu-west-1");
    assert_eq!(ses.app_name, config.app_name);
}
