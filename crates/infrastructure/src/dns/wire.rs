//! Wire-format primitives: domain-name encoding and bounded byte cursors.
//!
//! Names are sequences of length-prefixed labels closed by a zero-length
//! label. Compression pointers are never produced and are rejected when
//! decoding.

use emdns_domain::WireError;

pub const MAX_LABEL_LEN: usize = 63;
pub const MAX_NAME_LEN: usize = 255;

/// Encodes a dotted domain name into wire format.
///
/// A single trailing dot is the root label, so `domain.com` and
/// `domain.com.` encode to the same bytes. `""` and `"."` encode to the
/// root name.
pub fn encode_name(text: &str) -> Result<Vec<u8>, WireError> {
    let relative = text.strip_suffix('.').unwrap_or(text);
    let mut wire = Vec::with_capacity(relative.len() + 2);

    if !relative.is_empty() {
        for label in relative.split('.') {
            if label.is_empty() {
                return Err(WireError::EmptyLabel(text.to_string()));
            }
            if label.len() > MAX_LABEL_LEN {
                return Err(WireError::NameTooLong(text.to_string()));
            }
            wire.push(label.len() as u8);
            wire.extend_from_slice(label.as_bytes());
        }
    }
    wire.push(0);

    if wire.len() > MAX_NAME_LEN {
        return Err(WireError::NameTooLong(text.to_string()));
    }
    Ok(wire)
}

/// Decodes the uncompressed name starting at `offset`.
///
/// Returns the dotted text without a trailing dot (the root name decodes to
/// `""`) and the number of bytes consumed, terminator included. Each label
/// byte becomes the char with the same code point, so only ASCII names come
/// back as they were encoded.
pub fn decode_name(buf: &[u8], offset: usize) -> Result<(String, usize), WireError> {
    let mut reader = WireReader::at(buf, offset);
    let wire = reader.read_name_bytes()?;

    let mut text = String::with_capacity(wire.len());
    let mut pos = 0;
    while wire[pos] != 0 {
        let len = wire[pos] as usize;
        if !text.is_empty() {
            text.push('.');
        }
        text.extend(wire[pos + 1..pos + 1 + len].iter().map(|&b| b as char));
        pos += 1 + len;
    }

    Ok((text, wire.len()))
}

/// Read cursor over a received message.
#[derive(Debug, Clone)]
pub struct WireReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> WireReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self::at(buf, 0)
    }

    pub fn at(buf: &'a [u8], pos: usize) -> Self {
        Self { buf, pos }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.pos)
    }

    pub fn read_slice(&mut self, len: usize) -> Result<&'a [u8], WireError> {
        if self.remaining() < len {
            return Err(WireError::Truncated(self.pos));
        }
        let slice = &self.buf[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    pub fn read_u8(&mut self) -> Result<u8, WireError> {
        Ok(self.read_slice(1)?[0])
    }

    pub fn read_u16(&mut self) -> Result<u16, WireError> {
        let b = self.read_slice(2)?;
        Ok(u16::from_be_bytes([b[0], b[1]]))
    }

    pub fn read_u32(&mut self) -> Result<u32, WireError> {
        let b = self.read_slice(4)?;
        Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }

    /// Consumes one uncompressed name and returns its raw wire bytes,
    /// terminator included.
    pub fn read_name_bytes(&mut self) -> Result<&'a [u8], WireError> {
        let start = self.pos;
        loop {
            let label_pos = self.pos;
            let len = self.read_u8()? as usize;
            if len == 0 {
                break;
            }
            if len & 0xC0 != 0 {
                return Err(WireError::CompressionUnsupported(label_pos));
            }
            self.read_slice(len)?;
            if self.pos - start > MAX_NAME_LEN {
                return Err(WireError::NameTooLong(format!("name at offset {}", start)));
            }
        }
        if self.pos - start > MAX_NAME_LEN {
            return Err(WireError::NameTooLong(format!("name at offset {}", start)));
        }
        Ok(&self.buf[start..self.pos])
    }
}

/// Write cursor that never writes past `capacity`.
///
/// Every put either writes all of its bytes or fails with
/// [`WireError::BufferOverflow`] leaving the buffer untouched.
#[derive(Debug)]
pub struct WireWriter<'a> {
    buf: &'a mut [u8],
    capacity: usize,
    pos: usize,
}

impl<'a> WireWriter<'a> {
    /// `capacity` is clamped to the length of `buf`.
    pub fn new(buf: &'a mut [u8], capacity: usize) -> Self {
        let capacity = capacity.min(buf.len());
        Self {
            buf,
            capacity,
            pos: 0,
        }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn remaining(&self) -> usize {
        self.capacity - self.pos
    }

    pub fn ensure(&self, needed: usize) -> Result<(), WireError> {
        if needed > self.remaining() {
            return Err(WireError::BufferOverflow {
                needed,
                remaining: self.remaining(),
            });
        }
        Ok(())
    }

    pub fn put_slice(&mut self, bytes: &[u8]) -> Result<(), WireError> {
        self.ensure(bytes.len())?;
        self.buf[self.pos..self.pos + bytes.len()].copy_from_slice(bytes);
        self.pos += bytes.len();
        Ok(())
    }

    pub fn put_u8(&mut self, value: u8) -> Result<(), WireError> {
        self.put_slice(&[value])
    }

    pub fn put_u16(&mut self, value: u16) -> Result<(), WireError> {
        self.put_slice(&value.to_be_bytes())
    }

    pub fn put_u32(&mut self, value: u32) -> Result<(), WireError> {
        self.put_slice(&value.to_be_bytes())
    }

    /// Replaces already-written bytes starting at `offset`.
    pub fn overwrite(&mut self, offset: usize, bytes: &[u8]) -> Result<(), WireError> {
        let end = offset + bytes.len();
        if end > self.pos {
            return Err(WireError::BufferOverflow {
                needed: end,
                remaining: self.pos,
            });
        }
        self.buf[offset..end].copy_from_slice(bytes);
        Ok(())
    }

    pub fn set_u16_at(&mut self, offset: usize, value: u16) -> Result<(), WireError> {
        self.overwrite(offset, &value.to_be_bytes())
    }

    /// Drops everything written after `len`.
    pub fn truncate(&mut self, len: usize) {
        self.pos = self.pos.min(len);
    }

    pub fn written(&self) -> &[u8] {
        &self.buf[..self.pos]
    }
}
