//! Test Module
//!
//! Cross-module tests for the Shifa backend.
//!
//! ## Test Categories
//! - `scorer_tests`: recommendation properties over the builtin tables
//! - `scenario_tests`: end-to-end flows from free text to assembled response
//! - `server_tests`: HTTP routes driven in-process
//! - `cli_tests`: demo shell driven from in-memory input


pub mod scorer_tests;
