//! # Spy Support
//!
//! Shared text helpers for the Spy service locator.
//!
//! This crate provides:
//! - Type-name shortening for error messages
//! - "Did you mean?" suggestions for unknown identifiers

pub mod rendering;
