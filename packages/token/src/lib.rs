//! HMAC-signed token codec
//!
//! This crate turns any serializable value into a compact, URL-safe token and
//! back:
//! - three raw-base64url segments: header, payload, signature
//! - HS256 and HS512 signing
//! - optional expiration, relative (ttl) or absolute
//! - injectable clock for simulated time
//!
//! ```
//! use cryypt_token::{SigningMethod, decode, encode, with_key, with_signing_method};
//!
//! let options = [with_signing_method(SigningMethod::Hs256), with_key("secret")];
//! let token = encode(&vec![1, 2, 3], &options)?;
//!
//! let mut data: Vec<u8> = Vec::new();
//! decode(&token, &mut data, &options)?;
//! assert_eq!(data, [1, 2, 3]);
//! # Ok::<(), cryypt_token::TokenError>(())
//! ```

pub mod api;
pub mod clock;
pub mod codec;
pub mod config;
pub mod crypto;
mod error;
mod types;

pub use api::{TokenBuilder, recommended_key_len};
pub use clock::{Clock, ManualClock, SystemClock};
pub use codec::{decode, decode_value, encode};
pub use config::{
    Config, ConfigDraft, Expiration, TokenOption, with_clock, with_expires_at, with_key,
    with_signing_method, with_ttl,
};
pub use crypto::sign;
pub use error::*;
pub use types::{SigningMethod, Token, TokenHeader};

/// Main entry point
pub struct Cryypt;

impl Cryypt {
    /// Token builder
    #[must_use]
    pub fn token() -> TokenBuilder {
        TokenBuilder::new()
    }
}
