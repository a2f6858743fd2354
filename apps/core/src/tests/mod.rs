//! Test Module
//!
//! Integration-level test suite for the MailTriage core.
//!
//! ## Test Categories
//! - `engine_tests`: End-to-end reply generation, rendering guarantees, degrade paths
//! - `service_tests`: Triage service with mock classifiers (validation, timeout, errors)
//! - `config_tests`: Environment-driven configuration

pub mod config_tests;
