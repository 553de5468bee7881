//! Token type definitions

use crate::{api::TokenBuilder, error::TokenError};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Keyed-hash function used to sign a token.
///
/// The set is closed: any value built through this type is signable. Tags
/// arriving from outside (strings, deserialized headers) go through
/// [`FromStr`] (serde deserialization routes through it) and are rejected
/// with [`TokenError::InvalidSignMethod`] when unrecognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum SigningMethod {
    /// HMAC-SHA256
    #[serde(rename = "HS256")]
    Hs256,
    /// HMAC-SHA512
    #[serde(rename = "HS512")]
    Hs512,
}

impl SigningMethod {
    /// Header `alg` value
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hs256 => "HS256",
            Self::Hs512 => "HS512",
        }
    }

    /// Raw digest size in bytes
    #[must_use]
    pub const fn digest_len(self) -> usize {
        match self {
            Self::Hs256 => 32,
            Self::Hs512 => 64,
        }
    }
}

impl FromStr for SigningMethod {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HS256" => Ok(Self::Hs256),
            "HS512" => Ok(Self::Hs512),
            _ => Err(TokenError::InvalidSignMethod),
        }
    }
}

impl TryFrom<String> for SigningMethod {
    type Error = TokenError;

    fn try_from(tag: String) -> Result<Self, Self::Error> {
        tag.parse()
    }
}

impl fmt::Display for SigningMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Token header: `{"alg": ..., "typ": "JWT"}`.
///
/// `alg` is kept as a plain string on the way in. Verification always uses
/// the caller's configured method, never this field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenHeader {
    /// Algorithm tag
    pub alg: String,
    /// Token type
    pub typ: String,
}

impl TokenHeader {
    /// Constant `typ` value
    pub const TYPE: &'static str = "JWT";

    /// Header for tokens signed with `method`
    #[must_use]
    pub fn new(method: SigningMethod) -> Self {
        Self {
            alg: method.as_str().to_string(),
            typ: Self::TYPE.to_string(),
        }
    }
}

/// Payload as written on encode. Borrows the application data.
#[derive(Serialize)]
pub(crate) struct PayloadRef<'a, T: ?Sized> {
    #[serde(rename = "d")]
    pub(crate) data: &'a T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) exp: Option<i64>,
}

/// Payload as read on decode. `data` is typed by the caller's destination.
#[derive(Deserialize)]
pub(crate) struct Payload<T> {
    #[serde(rename = "d")]
    pub(crate) data: T,
    #[serde(default)]
    pub(crate) exp: Option<i64>,
}

/// Encoded token: `base64url(header).base64url(payload).base64url(signature)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token(String);

impl Token {
    /// Token builder, same as [`Cryypt::token`](crate::Cryypt::token)
    #[must_use]
    pub fn builder() -> TokenBuilder {
        TokenBuilder::new()
    }

    pub(crate) fn new(encoded: String) -> Self {
        Self(encoded)
    }

    /// Token text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Token bytes (always ASCII)
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Consume into the owned byte buffer
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.0.into_bytes()
    }
}

impl From<Token> for String {
    fn from(token: Token) -> Self {
        token.0
    }
}

impl From<Token> for Vec<u8> {
    fn from(token: Token) -> Self {
        token.into_bytes()
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl AsRef<[u8]> for Token {
    fn as_ref(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
