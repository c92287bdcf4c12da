//! Common test utilities and helpers
//!
//! - In-memory `Connector` / `Connection` doubles for the lifecycle manager
//! - Delay doubles that record instead of sleeping
//! - Builders for managers and routers wired to the doubles

#![allow(dead_code)]

pub mod fake_database;

pub use fake_database::*;
