//! Decode path: split, parse, verify, then check expiry.
//!
//! Every stage is a hard gate and the stages run in a fixed order. In
//! particular `exp` is only looked at after the signature has been verified,
//! so an expired token and a forged one are indistinguishable to anyone
//! without the key.

use crate::{
    config::{Config, ConfigDraft, TokenOption},
    crypto::{base64_url_decode, base64_url_encode, constant_time_eq, sign},
    error::{TokenError, TokenResult},
    types::{Payload, TokenHeader},
};
use chrono::DateTime;
use serde::de::DeserializeOwned;

/// Verify `token` and write its data into `out`.
///
/// `out` is only written when every check passes; on error it is untouched.
///
/// # Errors
/// - `ConfigurationMalformed` for conflicting expiry options
/// - `InvalidToken` if the token is not three decodable segments
/// - `InvalidSignMethod` if no signing method was configured
/// - `SignMethodMismatched` if the signature length does not fit the method
/// - `SignatureInvalid` if the signature does not match
/// - `TokenExpired` if the signature is valid but `exp` has passed
pub fn decode<T>(token: impl AsRef<[u8]>, out: &mut T, options: &[TokenOption]) -> TokenResult<()>
where
    T: DeserializeOwned,
{
    *out = decode_value(token, options)?;
    Ok(())
}

/// Verify `token` and return its data.
///
/// # Errors
/// Same as [`decode`].
pub fn decode_value<T>(token: impl AsRef<[u8]>, options: &[TokenOption]) -> TokenResult<T>
where
    T: DeserializeOwned,
{
    let config = ConfigDraft::from_options(options).resolve_for_decode()?;
    decode_with(token.as_ref(), &config)
}

pub(crate) fn decode_with<T>(token: &[u8], config: &Config) -> TokenResult<T>
where
    T: DeserializeOwned,
{
    let mut segments = token.split(|&b| b == b'.');
    let (Some(header_b64), Some(payload_b64), Some(signature_b64), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(TokenError::InvalidToken("expected three segments"));
    };

    // Parsed for well-formedness only; the configured method is authoritative.
    let _header: TokenHeader = decode_segment(
        header_b64,
        "header is not base64url",
        "header is not a valid header object",
    )?;
    let payload: Payload<T> = decode_segment(
        payload_b64,
        "payload is not base64url",
        "payload does not match the expected shape",
    )?;

    // Raw bytes before the last '.', never a re-serialization.
    let signing_input = &token[..header_b64.len() + 1 + payload_b64.len()];
    let method = config.signing_method()?;
    let expected = base64_url_encode(sign(signing_input, method, config.key())?);

    if expected.len() != signature_b64.len() {
        return Err(TokenError::SignMethodMismatched);
    }
    if !constant_time_eq(expected.as_bytes(), signature_b64) {
        return Err(TokenError::SignatureInvalid);
    }

    if let Some(exp) = payload.exp {
        let expired = match DateTime::from_timestamp(exp, 0) {
            Some(expires_at) => config.now() > expires_at,
            // Outside chrono's range: far past or far future.
            None => exp < 0,
        };
        if expired {
            return Err(TokenError::TokenExpired);
        }
    }

    tracing::trace!(
        alg = method.as_str(),
        has_exp = payload.exp.is_some(),
        "token verified"
    );

    Ok(payload.data)
}

fn decode_segment<S: DeserializeOwned>(
    segment: &[u8],
    bad_encoding: &'static str,
    bad_structure: &'static str,
) -> TokenResult<S> {
    let raw = base64_url_decode(segment).map_err(|_| TokenError::InvalidToken(bad_encoding))?;
    serde_json::from_slice(&raw).map_err(|_| TokenError::InvalidToken(bad_structure))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        codec::encode,
        config::{with_key, with_signing_method},
        types::SigningMethod,
    };
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Deserialize)]
    struct Session {
        uid: u64,
    }

    fn hs256() -> [TokenOption; 2] {
        [with_signing_method(SigningMethod::Hs256), with_key("secret")]
    }

    #[test]
    fn segment_count_is_checked_first() {
        for bad in ["", "abc", "a.b", "a.b.c.d", "...."] {
            assert_eq!(
                decode_value::<Session>(bad, &hs256()),
                Err(TokenError::InvalidToken("expected three segments")),
                "{bad:?}"
            );
        }
    }

    #[test]
    fn header_failures_are_invalid_token() {
        let token = encode(&serde_json::json!({"uid": 1}), &hs256()).expect("encodes");
        let (_, rest) = token.as_str().split_once('.').expect("has segments");

        let not_base64 = format!("!!!.{rest}");
        assert_eq!(
            decode_value::<Session>(&not_base64, &hs256()),
            Err(TokenError::InvalidToken("header is not base64url"))
        );

        let not_json = format!("{}.{rest}", base64_url_encode("not json"));
        assert_eq!(
            decode_value::<Session>(&not_json, &hs256()),
            Err(TokenError::InvalidToken("header is not a valid header object"))
        );
    }

    #[test]
    fn payload_shape_must_match_destination() {
        let token = encode(&serde_json::json!({"name": "x"}), &hs256()).expect("encodes");
        assert_eq!(
            decode_value::<Session>(&token, &hs256()),
            Err(TokenError::InvalidToken(
                "payload does not match the expected shape"
            ))
        );
    }

    #[test]
    fn header_alg_is_not_consulted() {
        let token = encode(&serde_json::json!({"uid": 3}), &hs256()).expect("encodes");
        let (_, rest) = token.as_str().split_once('.').expect("has segments");
        let forged_header = base64_url_encode(r#"{"alg":"none","typ":"JWT"}"#);
        let header_swapped = format!("{forged_header}.{rest}");

        // The header is part of the signing input, so swapping it breaks the
        // signature under the configured method.
        assert_eq!(
            decode_value::<Session>(&header_swapped, &hs256()),
            Err(TokenError::SignatureInvalid)
        );
    }

    #[test]
    fn unknown_alg_decodes_under_configured_method() {
        let header = base64_url_encode(r#"{"alg":"XYZ","typ":"JWT"}"#);
        let payload = base64_url_encode(r#"{"d":5}"#);
        let signing_input = format!("{header}.{payload}");
        let signature = sign(signing_input.as_bytes(), SigningMethod::Hs256, b"secret")
            .expect("signs");
        let token = format!("{signing_input}.{}", base64_url_encode(signature));

        assert_eq!(decode_value::<u32>(&token, &hs256()), Ok(5));
    }

    #[test]
    fn out_untouched_on_failure() {
        let mut out = Session { uid: 99 };
        let result = decode("a.b", &mut out, &hs256());
        assert!(result.is_err());
        assert_eq!(out, Session { uid: 99 });
    }
}
