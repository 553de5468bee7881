//! Signing primitive and segment encoding

mod encoding;
mod signing;

pub(crate) use encoding::{
    base64_url_decode, base64_url_encode, base64_url_encode_into, constant_time_eq,
};
pub use signing::sign;
