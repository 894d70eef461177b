//! Mock Mail Service Implementation
//!
//! A mock implementation of the mail service for development and testing.
//! Messages are printed to the console and logged instead of being sent.

use async_trait::async_trait;
use mv_shared::email::{is_valid_email, mask_email};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{info, warn};
use uuid::Uuid;

use super::mail_service::{EmailMessage, MailService};
use crate::InfrastructureError;

/// Mock mail service for development and testing
///
/// This implementation:
/// - Prints messages to the console
/// - Validates recipient addresses
/// - Generates mock message IDs
/// - Records the last message and a counter for tests
#[derive(Clone)]
pub struct MockMailService {
    /// Application name used in the template
    app_name: String,
    /// Counter for tracking number of messages sent
    message_count: Arc<AtomicU64>,
    /// Last recipient and message delivered
    last_message: Arc<Mutex<Option<(String, EmailMessage)>>>,
    /// Whether to simulate failures (for testing)
    simulate_failure: bool,
    /// Whether to print messages to console
    console_output: bool,
}

impl MockMailService {
    /// Create a new mock mail service with console output
    pub fn new(app_name: impl Into<String>) -> Self {
        Self::with_options(app_name, true, false)
    }

    /// Create a mock service with configurable options
    pub fn with_options(app_name: impl Into<String>, console_output: bool, simulate_failure: bool) -> Self {
        Self {
            app_name: app_name.into(),
            message_count: Arc::new(AtomicU64::new(0)),
            last_message: Arc::new(Mutex::new(None)),
            simulate_failure,
            console_output,
        }
    }

    /// Get the total number of messages sent
    pub fn get_message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }

    /// Reset the message counter
    pub fn reset_counter(&self) {
        self.message_count.store(0, Ordering::SeqCst);
    }

    /// Get the last recipient and message sent
    pub fn last_message(&self) -> Option<(String, EmailMessage)> {
        self.last_message
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Enable or disable failure simulation
    pub fn set_simulate_failure(&mut self, simulate: bool) {
        self.simulate_failure = simulate;
    }
}

#[async_trait]
impl MailService for MockMailService {
    async fn send_email(
        &self,
        recipient: &str,
        message: &EmailMessage,
    ) -> Result<String, InfrastructureError> {
        let masked = mask_email(recipient);

        if !is_valid_email(recipient) {
            return Err(InfrastructureError::Mail(format!(
                "Invalid email address: {}",
                masked
            )));
        }

        if self.simulate_failure {
            warn!("Mock mail service simulating failure for recipient: {}", masked);
            return Err(InfrastructureError::Mail(
                "Simulated mail sending failure".to_string(),
            ));
        }

        let message_id = format!("mock_{}", Uuid::new_v4());
        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;

        if self.console_output {
            println!("\n{}", "=".repeat(60));
            println!("MOCK MAIL SERVICE - MESSAGE #{}", count);
            println!("{}", "=".repeat(60));
            println!("To: {}", recipient);
            println!("Subject: {}", message.subject);
            println!("Message ID: {}", message_id);
            println!("{}", "-".repeat(60));
            println!("{}", message.text_body);
            println!("{}\n", "=".repeat(60));
        }

        *self
            .last_message
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some((recipient.to_string(), message.clone()));

        info!(
            target: "mail_service",
            provider = "mock",
            recipient = %masked,
            message_id = %message_id,
            subject = %message.subject,
            "Email sent successfully (mock)"
        );

        Ok(message_id)
    }

    fn app_name(&self) -> &str {
        &self.app_name
    }

    fn provider_name(&self) -> &str {
        "Mock"
    }

    async fn is_available(&self) -> bool {
        !self.simulate_failure
    }
}
