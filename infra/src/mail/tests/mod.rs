//! Unit tests for mail module

#[cfg(test)]
pub mod create_service_tests;
