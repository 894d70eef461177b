//! Business services containing domain logic and use cases.

pub mod verification;

// Re-export commonly used types
pub use verification::{
    EmailServiceTrait, IssuedCode, SendCodeResult, SweepResult, SweepService,
    VerificationService, VerificationServiceConfig, VerificationStore, VerifyOutcome,
};
