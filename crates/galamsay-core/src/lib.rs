//! # galamsay-core
//!
//! Core types, validation, and aggregation for galamsay site analysis.
//!
//! This crate provides the foundational pieces shared across the workspace:
//! - Entity structs for site records, rejected rows, and analysis log rows
//! - The closed `Region` and `RejectionReason` enums
//! - The row validator and the statistics aggregator
//! - Batch identity minting
//! - A CSV source that yields typed raw rows
//! - CLI response types

pub mod aggregator;
pub mod batch;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod responses;
pub mod source;
pub mod validator;

pub use errors::CoreError;
