//! Shared utilities and common types for the Academy backend.
//!
//! This crate provides common functionality used across all other crates:
//! - Cryptographic utilities (API key hashing and generation)
//! - Common validation logic and input normalization

pub mod crypto;
pub mod validation;
