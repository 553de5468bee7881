//! Token codec: encode and verify-decode pipelines

mod decode;
mod encode;

pub use decode::{decode, decode_value};
pub use encode::encode;

pub(crate) use decode::decode_with;
pub(crate) use encode::encode_with;
