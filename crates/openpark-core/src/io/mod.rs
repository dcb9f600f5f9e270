//! Binary and text I/O shared by every file format in the crate.

mod bytes;
pub mod sawyer;
mod text;

pub use bytes::{ByteBuffer, ByteWriter, NULL_STRING_LEN};
pub use text::{decode_legacy, encode_legacy};
