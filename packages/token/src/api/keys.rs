//! Key sizing guidance

use crate::types::SigningMethod;

/// Recommended secret length for `method`: the digest size, 32 bytes for
/// HS256 and 64 for HS512.
///
/// Advisory only. The codec signs with keys of any length, including empty.
#[must_use]
pub fn recommended_key_len(method: SigningMethod) -> usize {
    method.digest_len()
}
