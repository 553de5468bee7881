//! Token builder

use crate::{
    clock::Clock,
    codec::{decode_with, encode_with},
    config::{
        ConfigDraft, TokenOption, with_clock, with_expires_at, with_key, with_signing_method,
        with_ttl,
    },
    error::TokenResult,
    types::{SigningMethod, Token},
};
use chrono::{DateTime, Duration, Utc};
use serde::{Serialize, de::DeserializeOwned};

/// Fluent front end over [`encode`](crate::encode) and [`decode`](crate::decode).
///
/// ```
/// use cryypt_token::{Cryypt, SigningMethod};
/// use chrono::Duration;
///
/// let codec = Cryypt::token()
///     .with_signing_method(SigningMethod::Hs256)
///     .with_key(b"secret")
///     .with_ttl(Duration::minutes(5));
///
/// let token = codec.encode(&serde_json::json!({"uid": 7}))?;
/// let data: serde_json::Value = codec.decode_value(&token)?;
/// assert_eq!(data["uid"], 7);
/// # Ok::<(), cryypt_token::TokenError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct TokenBuilder {
    draft: ConfigDraft,
}

impl TokenBuilder {
    /// Create new token builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a prepared option
    #[must_use]
    pub fn with_option(mut self, option: TokenOption) -> Self {
        self.draft.apply(option);
        self
    }

    /// Set signing method
    #[inline]
    #[must_use]
    pub fn with_signing_method(self, method: SigningMethod) -> Self {
        self.with_option(with_signing_method(method))
    }

    /// Set HMAC secret
    #[inline]
    #[must_use]
    pub fn with_key(self, key: impl AsRef<[u8]>) -> Self {
        self.with_option(with_key(key))
    }

    /// Expire tokens `ttl` after encoding
    #[inline]
    #[must_use]
    pub fn with_ttl(self, ttl: Duration) -> Self {
        self.with_option(with_ttl(ttl))
    }

    /// Expire tokens at an absolute instant
    #[inline]
    #[must_use]
    pub fn with_expires_at(self, instant: DateTime<Utc>) -> Self {
        self.with_option(with_expires_at(instant))
    }

    /// Use `clock` for "now"
    #[inline]
    #[must_use]
    pub fn with_clock(self, clock: impl Clock + 'static) -> Self {
        self.with_option(with_clock(clock))
    }

    /// Encode `data` into a signed token.
    ///
    /// # Errors
    /// See [`encode`](crate::encode).
    pub fn encode<T: Serialize + ?Sized>(&self, data: &T) -> TokenResult<Token> {
        let config = self.draft.clone().resolve_for_encode()?;
        encode_with(data, &config)
    }

    /// Verify `token` and write its data into `out`.
    ///
    /// # Errors
    /// See [`decode`](crate::decode).
    pub fn decode<T: DeserializeOwned>(
        &self,
        token: impl AsRef<[u8]>,
        out: &mut T,
    ) -> TokenResult<()> {
        *out = self.decode_value(token)?;
        Ok(())
    }

    /// Verify `token` and return its data.
    ///
    /// # Errors
    /// See [`decode`](crate::decode).
    pub fn decode_value<T: DeserializeOwned>(&self, token: impl AsRef<[u8]>) -> TokenResult<T> {
        let config = self.draft.clone().resolve_for_decode()?;
        decode_with(token.as_ref(), &config)
    }
}
