//! Byte buffer utilities for binary park, index, and score files.
//!
//! `ByteBuffer` is a position-tracking little-endian reader over a byte slice.
//! `ByteWriter` is its counterpart for the persisted caches. Both share the
//! length-prefixed string encoding used by the highscore and track index files:
//! a `u32` byte length followed by UTF-8 bytes, with `0xFFFF_FFFF` marking a
//! null string.

use crate::error::{Error, Result};

/// Length prefix that encodes an absent string.
pub const NULL_STRING_LEN: u32 = u32::MAX;

/// A position-tracking byte reader for parsing binary data structures.
///
/// # Example
///
/// ```
/// use openpark_core::io::ByteBuffer;
///
/// let data = [0x78, 0x56, 0x34, 0x12, 0x00, 0x00, 0x00, 0x00];
/// let mut buf = ByteBuffer::new(&data);
///
/// let value = buf.read_i32().unwrap();
/// assert_eq!(value, 0x12345678);
/// assert_eq!(buf.position(), 4);
/// ```
pub struct ByteBuffer<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteBuffer<'a> {
    /// Creates a new `ByteBuffer` wrapping the given byte slice.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Returns the current read position.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns the total length of the underlying buffer.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns a slice of bytes at the specified offset without advancing position.
    ///
    /// # Errors
    ///
    /// Returns an error if the range is out of bounds.
    pub fn slice_at(&self, offset: usize, len: usize) -> Result<&'a [u8]> {
        let end = offset.checked_add(len).ok_or_else(|| Error::ReadFailed {
            offset: offset as u64,
            message: "Offset overflow".to_string(),
        })?;

        if end > self.data.len() {
            return Err(Error::ReadFailed {
                offset: offset as u64,
                message: format!(
                    "Slice range {}..{} exceeds buffer length {}",
                    offset,
                    end,
                    self.data.len()
                ),
            });
        }

        Ok(&self.data[offset..end])
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        let bytes = self.read_bytes(1)?;
        Ok(bytes[0])
    }

    /// Reads an unsigned 16-bit integer (little-endian) and advances the position.
    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    /// Reads a signed 32-bit integer (little-endian) and advances the position.
    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(i32::from_le_bytes(self.read_array()?))
    }

    /// Reads an unsigned 32-bit integer (little-endian) and advances the position.
    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    /// Reads a signed 64-bit integer (little-endian) and advances the position.
    pub fn read_i64(&mut self) -> Result<i64> {
        Ok(i64::from_le_bytes(self.read_array()?))
    }

    /// Reads an unsigned 64-bit integer (little-endian) and advances the position.
    pub fn read_u64(&mut self) -> Result<u64> {
        Ok(u64::from_le_bytes(self.read_array()?))
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let bytes = self.read_bytes(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    /// Reads the specified number of bytes and advances the position.
    ///
    /// # Errors
    ///
    /// Returns an error if there are not enough bytes remaining.
    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        let slice = self.slice_at(self.pos, count).map_err(|_| Error::ReadFailed {
            offset: self.pos as u64,
            message: format!(
                "Read of {} bytes at position {} exceeds buffer length {}",
                count,
                self.pos,
                self.data.len()
            ),
        })?;
        self.pos += count;
        Ok(slice)
    }

    /// Reads a length-prefixed string that must be present.
    pub fn read_string(&mut self) -> Result<String> {
        let offset = self.pos as u64;
        self.read_opt_string()?.ok_or_else(|| Error::ReadFailed {
            offset,
            message: "Unexpected null string".to_string(),
        })
    }

    /// Reads a length-prefixed string, returning `None` for the null marker.
    pub fn read_opt_string(&mut self) -> Result<Option<String>> {
        let len = self.read_u32()?;
        if len == NULL_STRING_LEN {
            return Ok(None);
        }
        let offset = self.pos as u64;
        let bytes = self.read_bytes(len as usize)?;
        String::from_utf8(bytes.to_vec())
            .map(Some)
            .map_err(|e| Error::ReadFailed {
                offset,
                message: format!("Invalid UTF-8 string: {}", e),
            })
    }

    pub fn read_u8_at(&self, offset: usize) -> Result<u8> {
        Ok(self.slice_at(offset, 1)?[0])
    }

    pub fn read_i8_at(&self, offset: usize) -> Result<i8> {
        Ok(self.read_u8_at(offset)? as i8)
    }

    /// Reads an unsigned 16-bit integer at the specified offset without advancing position.
    pub fn read_u16_at(&self, offset: usize) -> Result<u16> {
        let bytes = self.slice_at(offset, 2)?;
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    pub fn read_i16_at(&self, offset: usize) -> Result<i16> {
        Ok(self.read_u16_at(offset)? as i16)
    }

    /// Reads a signed 32-bit integer at the specified offset without advancing position.
    pub fn read_i32_at(&self, offset: usize) -> Result<i32> {
        let bytes = self.slice_at(offset, 4)?;
        Ok(i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Reads an unsigned 32-bit integer at the specified offset without advancing position.
    pub fn read_u32_at(&self, offset: usize) -> Result<u32> {
        let bytes = self.slice_at(offset, 4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }
}

/// A growable little-endian writer producing the same encodings `ByteBuffer` reads.
#[derive(Debug, Default, Clone)]
pub struct ByteWriter {
    data: Vec<u8>,
}

impl ByteWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write_u8(&mut self, value: u8) -> &mut Self {
        self.data.push(value);
        self
    }

    pub fn write_u16(&mut self, value: u16) -> &mut Self {
        self.write_bytes(&value.to_le_bytes())
    }

    pub fn write_u32(&mut self, value: u32) -> &mut Self {
        self.write_bytes(&value.to_le_bytes())
    }

    pub fn write_i32(&mut self, value: i32) -> &mut Self {
        self.write_bytes(&value.to_le_bytes())
    }

    pub fn write_u64(&mut self, value: u64) -> &mut Self {
        self.write_bytes(&value.to_le_bytes())
    }

    pub fn write_i64(&mut self, value: i64) -> &mut Self {
        self.write_bytes(&value.to_le_bytes())
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.data.extend_from_slice(bytes);
        self
    }

    /// Writes a length-prefixed UTF-8 string.
    pub fn write_string(&mut self, value: &str) -> &mut Self {
        self.write_u32(value.len() as u32);
        self.write_bytes(value.as_bytes())
    }

    /// Writes a length-prefixed string, or the null marker for `None`.
    pub fn write_opt_string(&mut self, value: Option<&str>) -> &mut Self {
        match value {
            Some(s) => self.write_string(s),
            None => self.write_u32(NULL_STRING_LEN),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_buffer_read_i32() {
        let data = [0x78, 0x56, 0x34, 0x12];
        let mut buf = ByteBuffer::new(&data);

        let value = buf.read_i32().unwrap();
        assert_eq!(value, 0x12345678);
        assert_eq!(buf.position(), 4);
    }

    #[test]
    fn test_byte_buffer_sequential_reads() {
        let data = [
            0x01, 0x00, // u16: 1
            0x02, 0x00, 0x00, 0x00, // u32: 2
            0x03, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // u64: 3
        ];
        let mut buf = ByteBuffer::new(&data);

        assert_eq!(buf.read_u16().unwrap(), 1);
        assert_eq!(buf.read_u32().unwrap(), 2);
        assert_eq!(buf.read_u64().unwrap(), 3);
        assert_eq!(buf.position(), data.len());
    }

    #[test]
    fn test_byte_buffer_read_at() {
        let data = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08];
        let buf = ByteBuffer::new(&data);

        assert_eq!(buf.read_u32_at(4).unwrap(), 0x08070605);
        assert_eq!(buf.read_u16_at(0).unwrap(), 0x0201);
        assert_eq!(buf.position(), 0);
    }

    #[test]
    fn test_byte_buffer_overflow_error() {
        let data = [0x01, 0x02];
        let mut buf = ByteBuffer::new(&data);

        assert!(buf.read_i32().is_err());
        assert_eq!(buf.position(), 0);
        assert!(buf.read_bytes(3).is_err());
    }

    #[test]
    fn test_string_encoding_matches_reader() {
        let mut writer = ByteWriter::new();
        writer
            .write_string("Forest Frontiers")
            .write_opt_string(None)
            .write_opt_string(Some(""));

        let bytes = writer.into_bytes();
        let mut buf = ByteBuffer::new(&bytes);
        assert_eq!(buf.read_string().unwrap(), "Forest Frontiers");
        assert_eq!(buf.read_opt_string().unwrap(), None);
        assert_eq!(buf.read_opt_string().unwrap(), Some(String::new()));
    }

    #[test]
    fn test_null_string_rejected_where_required() {
        let bytes = NULL_STRING_LEN.to_le_bytes();
        let mut buf = ByteBuffer::new(&bytes);
        assert!(buf.read_string().is_err());
    }

    #[test]
    fn test_truncated_string_is_error() {
        let mut writer = ByteWriter::new();
        writer.write_u32(10).write_bytes(b"abc");
        let bytes = writer.into_bytes();
        let mut buf = ByteBuffer::new(&bytes);
        assert!(buf.read_opt_string().is_err());
    }
}
