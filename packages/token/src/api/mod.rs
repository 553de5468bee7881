//! Fluent token API
//!
//! The builder collects the same options as the free functions and runs the
//! same codec, so both surfaces behave identically.

pub mod builder;
pub mod keys;

pub use builder::TokenBuilder;
pub use keys::recommended_key_len;
