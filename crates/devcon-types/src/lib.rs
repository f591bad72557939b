//! Foundation types for devcon.
//!
//! This crate contains the types shared by every devcon crate: the error
//! enum and the TOML-backed console configuration.

pub mod config;
pub mod error;
