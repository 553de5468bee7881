//! Token error types

use thiserror::Error;

/// Token operation result type
pub type TokenResult<T> = Result<T, TokenError>;

/// Everything that can go wrong while encoding or decoding a token.
///
/// Each variant is a distinct, matchable kind. Nothing here is logged or
/// retried by the codec; the error is handed straight back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Signing method missing or outside the supported set
    #[error("invalid sign method")]
    InvalidSignMethod,

    /// Conflicting or unusable expiration options
    #[error("configuration malformed: {0}")]
    ConfigurationMalformed(&'static str),

    /// Token is not three well-formed segments
    #[error("invalid token: {0}")]
    InvalidToken(&'static str),

    /// Supplied signature has a different length than the configured method produces
    #[error("sign method mismatched")]
    SignMethodMismatched,

    /// Signature does not match the signing input
    #[error("signature invalid")]
    SignatureInvalid,

    /// Signature is valid but the expiration instant has passed
    #[error("token expired")]
    TokenExpired,

    /// Application data could not be serialized
    #[error("serialization error: {0}")]
    Serialization(String),

    /// HMAC key rejected during initialisation
    #[error("invalid key: {0}")]
    InvalidKey(String),
}

impl TokenError {
    /// Create a serialization error
    #[inline]
    #[must_use]
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    /// Create an invalid key error
    #[inline]
    #[must_use]
    pub fn invalid_key(msg: impl Into<String>) -> Self {
        Self::InvalidKey(msg.into())
    }

    /// True for [`TokenError::TokenExpired`]
    #[must_use]
    pub fn is_expired(&self) -> bool {
        matches!(self, Self::TokenExpired)
    }

    /// True when the token failed authenticity checks (forged, tampered or
    /// signed with another method).
    #[must_use]
    pub fn is_signature_failure(&self) -> bool {
        matches!(self, Self::SignatureInvalid | Self::SignMethodMismatched)
    }
}
