//! Segment encoding helpers - raw base64url and constant-time comparison

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use subtle::ConstantTimeEq;

/// Base64 URL-safe encoding without padding
#[inline]
pub(crate) fn base64_url_encode(input: impl AsRef<[u8]>) -> String {
    URL_SAFE_NO_PAD.encode(input)
}

/// Append the base64url (unpadded) form of `input` to `output`. The engine
/// sizes the output from its own length rules.
#[inline]
pub(crate) fn base64_url_encode_into(input: impl AsRef<[u8]>, output: &mut String) {
    URL_SAFE_NO_PAD.encode_string(input, output);
}

/// Base64 URL-safe decoding without padding. Rejects padded input and
/// non-canonical trailing bits.
#[inline]
pub(crate) fn base64_url_decode(input: &[u8]) -> Result<Vec<u8>, base64::DecodeError> {
    URL_SAFE_NO_PAD.decode(input)
}

/// Byte comparison whose timing does not depend on where inputs differ.
/// Inputs of different length compare unequal.
#[inline]
pub(crate) fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}
