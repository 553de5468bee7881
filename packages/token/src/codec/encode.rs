//! Encode path: header and payload segments, then the signature over both.

use crate::{
    config::{Config, ConfigDraft, TokenOption},
    crypto::{base64_url_encode_into, sign},
    error::{TokenError, TokenResult},
    types::{PayloadRef, Token, TokenHeader},
};
use serde::Serialize;

/// Encode `data` into a signed token.
///
/// `exp` is fixed here: an absolute expiry is copied as is, a ttl is added to
/// the configured clock's current time.
///
/// # Errors
/// - `ConfigurationMalformed` for conflicting or already-past expiry options
/// - `InvalidSignMethod` if no signing method was configured
/// - `Serialization` if `data` cannot be serialized
pub fn encode<T>(data: &T, options: &[TokenOption]) -> TokenResult<Token>
where
    T: Serialize + ?Sized,
{
    let config = ConfigDraft::from_options(options).resolve_for_encode()?;
    encode_with(data, &config)
}

pub(crate) fn encode_with<T>(data: &T, config: &Config) -> TokenResult<Token>
where
    T: Serialize + ?Sized,
{
    let method = config.signing_method()?;

    let header_json = serde_json::to_vec(&TokenHeader::new(method))
        .map_err(|e| TokenError::serialization(e.to_string()))?;

    let exp = config.expiration().exp_claim(config.now())?;
    let payload_json = serde_json::to_vec(&PayloadRef { data, exp })
        .map_err(|e| TokenError::serialization(e.to_string()))?;

    let mut token = String::new();
    base64_url_encode_into(&header_json, &mut token);
    token.push('.');
    base64_url_encode_into(&payload_json, &mut token);

    let signature = sign(token.as_bytes(), method, config.key())?;
    token.push('.');
    base64_url_encode_into(&signature, &mut token);

    tracing::trace!(
        alg = method.as_str(),
        has_exp = exp.is_some(),
        token_len = token.len(),
        "token encoded"
    );

    Ok(Token::new(token))
}
