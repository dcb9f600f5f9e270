//! Sawyer chunk codec.
//!
//! Park, scenario and track design files are stored as a sequence of chunks,
//! each with a one-byte encoding and a `u32` length header, followed by a
//! `u32` additive checksum of every preceding byte. The legacy formats (`.sv4`,
//! `.sc4`, `.td4`, `.td6`) skip the chunk header and store one RLE stream.

use strum::{FromRepr, IntoStaticStr};
use tracing::warn;

use super::bytes::{ByteBuffer, ByteWriter};
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRepr, IntoStaticStr)]
#[repr(u8)]
pub enum ChunkEncoding {
    None = 0,
    Rle = 1,
    RleCompressed = 2,
    Rotate = 3,
}

impl ChunkEncoding {
    pub fn from_u8(value: u8) -> Option<Self> {
        Self::from_repr(value)
    }
}

/// Decodes a run-length encoded block.
///
/// A negative code byte `n` repeats the following byte `1 - n` times; a
/// non-negative code copies the next `n + 1` bytes verbatim.
pub fn decode_rle(src: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(src.len() * 2);
    let mut i = 0;
    while i < src.len() {
        let code = src[i] as i8;
        i += 1;
        if code < 0 {
            let value = *src.get(i).ok_or_else(|| truncated(i))?;
            i += 1;
            let count = (1 - code as i32) as usize;
            out.resize(out.len() + count, value);
        } else {
            let count = code as usize + 1;
            let run = src.get(i..i + count).ok_or_else(|| truncated(i))?;
            out.extend_from_slice(run);
            i += count;
        }
    }
    Ok(out)
}

/// Run-length encodes `src` in the form read by [`decode_rle`].
pub fn encode_rle(src: &[u8]) -> Vec<u8> {
    const MAX_RUN: usize = 128;

    let mut out = Vec::with_capacity(src.len() + src.len() / 64 + 2);
    let mut i = 0;
    while i < src.len() {
        let mut run = 1;
        while i + run < src.len() && src[i + run] == src[i] && run < MAX_RUN {
            run += 1;
        }
        if run >= 2 {
            out.push((257 - run) as u8);
            out.push(src[i]);
            i += run;
            continue;
        }

        let start = i;
        let mut len = 0;
        while i < src.len() && len < MAX_RUN {
            if i + 1 < src.len() && src[i] == src[i + 1] {
                break;
            }
            i += 1;
            len += 1;
        }
        out.push((len - 1) as u8);
        out.extend_from_slice(&src[start..start + len]);
    }
    out
}

/// Expands the back-reference stage of `RleCompressed` chunks.
pub fn decode_repeat(src: &[u8]) -> Result<Vec<u8>> {
    let mut out: Vec<u8> = Vec::with_capacity(src.len() * 2);
    let mut i = 0;
    while i < src.len() {
        let code = src[i];
        i += 1;
        if code == 0xFF {
            out.push(*src.get(i).ok_or_else(|| truncated(i))?);
            i += 1;
            continue;
        }
        let count = (code & 7) as usize + 1;
        let from = (out.len() + (code >> 3) as usize)
            .checked_sub(32)
            .ok_or_else(|| Error::InvalidFormat(format!("Back-reference before start at {}", i)))?;
        for k in 0..count {
            let byte = *out
                .get(from + k)
                .ok_or_else(|| Error::InvalidFormat(format!("Back-reference past end at {}", i)))?;
            out.push(byte);
        }
    }
    Ok(out)
}

/// Writes every byte as a literal, which [`decode_repeat`] accepts.
pub fn encode_repeat(src: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(src.len() * 2);
    for &b in src {
        out.push(0xFF);
        out.push(b);
    }
    out
}

pub fn decode_rotate(src: &[u8]) -> Vec<u8> {
    let mut code = 1u32;
    src.iter()
        .map(|&b| {
            let out = b.rotate_right(code);
            code = (code + 2) & 7;
            out
        })
        .collect()
}

pub fn encode_rotate(src: &[u8]) -> Vec<u8> {
    let mut code = 1u32;
    src.iter()
        .map(|&b| {
            let out = b.rotate_left(code);
            code = (code + 2) & 7;
            out
        })
        .collect()
}

fn truncated(pos: usize) -> Error {
    Error::ReadFailed {
        offset: pos as u64,
        message: "Encoded chunk ends mid-run".to_string(),
    }
}

pub fn decode_chunk(encoding: ChunkEncoding, data: &[u8]) -> Result<Vec<u8>> {
    match encoding {
        ChunkEncoding::None => Ok(data.to_vec()),
        ChunkEncoding::Rle => decode_rle(data),
        ChunkEncoding::RleCompressed => decode_repeat(&decode_rle(data)?),
        ChunkEncoding::Rotate => Ok(decode_rotate(data)),
    }
}

pub fn encode_chunk(encoding: ChunkEncoding, data: &[u8]) -> Vec<u8> {
    match encoding {
        ChunkEncoding::None => data.to_vec(),
        ChunkEncoding::Rle => encode_rle(data),
        ChunkEncoding::RleCompressed => encode_rle(&encode_repeat(data)),
        ChunkEncoding::Rotate => encode_rotate(data),
    }
}

/// Wrapping byte sum used as the file trailer.
pub fn additive_checksum(data: &[u8]) -> u32 {
    data.iter().fold(0u32, |acc, &b| acc.wrapping_add(b as u32))
}

/// Sequential reader over a chunked file.
pub struct SawyerReader<'a> {
    buf: ByteBuffer<'a>,
}

impl<'a> SawyerReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            buf: ByteBuffer::new(data),
        }
    }

    /// Reads and decodes the next chunk.
    pub fn read_chunk(&mut self) -> Result<Vec<u8>> {
        let raw = self.buf.read_u8()?;
        let encoding = ChunkEncoding::from_u8(raw)
            .ok_or_else(|| Error::InvalidFormat(format!("Unknown chunk encoding {}", raw)))?;
        let len = self.buf.read_u32()? as usize;
        let data = self.buf.read_bytes(len)?;
        decode_chunk(encoding, data)
    }

    /// Reads the next chunk and requires it to decode to exactly `size` bytes.
    pub fn read_chunk_sized(&mut self, size: usize) -> Result<Vec<u8>> {
        let data = self.read_chunk()?;
        if data.len() != size {
            return Err(Error::InvalidFormat(format!(
                "Chunk decoded to {} bytes, expected {}",
                data.len(),
                size
            )));
        }
        Ok(data)
    }
}

/// Builds a chunked file, appending the checksum trailer on `finish`.
#[derive(Default)]
pub struct SawyerWriter {
    out: ByteWriter,
}

impl SawyerWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write_chunk(&mut self, encoding: ChunkEncoding, data: &[u8]) -> &mut Self {
        let encoded = encode_chunk(encoding, data);
        self.out
            .write_u8(encoding as u8)
            .write_u32(encoded.len() as u32)
            .write_bytes(&encoded);
        self
    }

    pub fn finish(self) -> Vec<u8> {
        let checksum = additive_checksum(self.out.as_bytes());
        let mut out = self.out;
        out.write_u32(checksum);
        out.into_bytes()
    }
}

/// Decodes a legacy single-stream file (RLE body plus checksum trailer).
///
/// A checksum mismatch is logged but does not fail the decode; many shipped
/// files carry stale trailers.
pub fn decode_legacy_stream(data: &[u8]) -> Result<Vec<u8>> {
    if data.len() < 4 {
        return Err(Error::InvalidFormat(
            "File too small to contain a checksum".to_string(),
        ));
    }
    let (body, trailer) = data.split_at(data.len() - 4);
    let stored = u32::from_le_bytes([trailer[0], trailer[1], trailer[2], trailer[3]]);
    let actual = additive_checksum(body);
    if stored != actual {
        warn!(
            "Checksum mismatch: stored {:#010x}, computed {:#010x}",
            stored, actual
        );
    }
    decode_rle(body)
}

pub fn encode_legacy_stream(data: &[u8]) -> Vec<u8> {
    let mut out = encode_rle(data);
    let checksum = additive_checksum(&out);
    out.extend_from_slice(&checksum.to_le_bytes());
    out
}
