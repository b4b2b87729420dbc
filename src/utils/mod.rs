//! Shared utilities.
//!
//! - [`errors`]: Service and login error types

pub mod errors;
