//! Unit tests for the verification module

mod cleanup_tests;
