//! HMAC signing for HS256 and HS512

use crate::{
    error::{TokenError, TokenResult},
    types::SigningMethod,
};
use hmac::{Hmac, Mac, digest::KeyInit};
use sha2::{Sha256, Sha512};

type HmacSha256 = Hmac<Sha256>;
type HmacSha512 = Hmac<Sha512>;

/// Raw HMAC digest of `input` under `key`.
///
/// Deterministic: the same input, method and key always give the same bytes.
/// Transport framing (base64url) is left to the caller.
///
/// # Errors
/// `InvalidKey` if the HMAC implementation rejects the key.
pub fn sign(input: &[u8], method: SigningMethod, key: &[u8]) -> TokenResult<Vec<u8>> {
    match method {
        SigningMethod::Hs256 => mac::<HmacSha256>(input, key),
        SigningMethod::Hs512 => mac::<HmacSha512>(input, key),
    }
}

fn mac<M: Mac + KeyInit>(input: &[u8], key: &[u8]) -> TokenResult<Vec<u8>> {
    let mut mac = <M as Mac>::new_from_slice(key)
        .map_err(|e| TokenError::invalid_key(format!("HMAC key rejected: {e}")))?;
    mac.update(input);
    Ok(mac.finalize().into_bytes().to_vec())
}
