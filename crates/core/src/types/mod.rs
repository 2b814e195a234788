//! Core types for roster.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;

pub use id::{UserId, UserIdError};
