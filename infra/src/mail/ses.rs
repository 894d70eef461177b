//! AWS SES Mail Service Implementation
//!
//! Sends verification emails through the AWS SES v2 API. Credentials are
//! resolved by the standard AWS provider chain.

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_sesv2::error::DisplayErrorContext;
use aws_sdk_sesv2::types::{Body, Content, Destination, EmailContent, Message};
use aws_sdk_sesv2::Client as SesClient;
use mv_shared::email::mask_email;
use mv_shared::MailConfig;
use tracing::{error, info};

use super::mail_service::{EmailMessage, MailService};
use crate::InfrastructureError;

/// AWS SES mail service configuration
#[derive(Debug, Clone)]
pub struct SesConfig {
    /// AWS region (e.g., "us-east-1")
    pub region: String,
    /// Verified sender address
    pub sender_email: String,
    /// Application name used in the template
    pub app_name: String,
}

impl SesConfig {
    /// Build from the mail configuration; a sender address is required
    pub fn from_mail_config(config: &MailConfig) -> Result<Self, InfrastructureError> {
        let sender_email = config.sender_email.clone().ok_or_else(|| {
            InfrastructureError::Config("SENDER_EMAIL must be set for the ses provider".to_string())
        })?;

        Ok(Self {
            region: config.region.clone(),
            sender_email,
            app_name: config.app_name.clone(),
        })
    }

    /// Load from `SENDER_EMAIL`, `APP_NAME` and `AWS_REGION`
    pub fn from_env() -> Result<Self, InfrastructureError> {
        let mail = MailConfig::from_vars(|key| std::env::var(key).ok())?;
        Self::from_mail_config(&mail)
    }
}

/// AWS SES mail service implementation
pub struct SesMailService {
    client: SesClient,
    config: SesConfig,
}

impl SesMailService {
    /// Create a new AWS SES mail service
    pub async fn new(config: SesConfig) -> Result<Self, InfrastructureError> {
        let aws_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .load()
            .await;

        let client = SesClient::new(&aws_config);

        info!("AWS SES mail service initialized for region: {}", config.region);

        Ok(Self { client, config })
    }
}

fn utf8_content(data: &str) -> Result<Content, InfrastructureError> {
    Content::builder()
        .data(data)
        .charset("UTF-8")
        .build()
        .map_err(|e| InfrastructureError::Mail(format!("Failed to build message content: {}", e)))
}

#[async_trait]
impl MailService for SesMailService {
    async fn send_email(
        &self,
        recipient: &str,
        message: &EmailMessage,
    ) -> Result<String, InfrastructureError> {
        let destination = Destination::builder().to_addresses(recipient).build();

        let body = Body::builder()
            .text(utf8_content(&message.text_body)?)
            .html(utf8_content(&message.html_body)?)
            .build();

        let simple = Message::builder()
            .subject(utf8_content(&message.subject)?)
            .body(body)
            .build();

        let content = EmailContent::builder().simple(simple).build();

        let output = self
            .client
            .send_email()
            .from_email_address(&self.config.sender_email)
            .destination(destination)
            .content(content)
            .send()
            .await
            .map_err(|e| {
                error!(
                    recipient = %mask_email(recipient),
                    error = %DisplayErrorContext(&e),
                    "Failed to send email via AWS SES"
                );
                InfrastructureError::Mail(format!("AWS SES send failed: {}", DisplayErrorContext(&e)))
            })?;

        let message_id = output.message_id().unwrap_or_default().to_string();

        info!(
            target: "mail_service",
            provider = "aws-ses",
            recipient = %mask_email(recipient),
            message_id = %message_id,
            "Email sent successfully"
        );

        Ok(message_id)
    }

    fn app_name(&self) -> &str {
        &self.config.app_name
    }

    fn provider_name(&self) -> &str {
        "AWS SES"
    }
}
