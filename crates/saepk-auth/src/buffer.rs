//! Bounded output buffer for element construction.
//!
//! Confirm messages have a hard size limit imposed by the caller, so the
//! writer appends through a growable buffer with an explicit capacity
//! check. Running out of room surfaces as `CapacityExceeded` rather than
//! silent truncation.

use saepk_types::SaePkError;

/// A growable byte buffer with an explicit capacity limit.
#[derive(Debug, Clone)]
pub struct ElementBuffer {
    data: Vec<u8>,
    limit: usize,
}

impl ElementBuffer {
    /// Create an empty buffer that can hold at most `limit` bytes.
    pub fn new(limit: usize) -> Self {
        ElementBuffer {
            data: Vec::new(),
            limit,
        }
    }

    /// Append a single byte.
    pub fn put_u8(&mut self, value: u8) -> Result<(), SaePkError> {
        self.check_room(1)?;
        self.data.push(value);
        Ok(())
    }

    /// Append a big-endian 32-bit value.
    pub fn put_be32(&mut self, value: u32) -> Result<(), SaePkError> {
        self.put_bytes(&value.to_be_bytes())
    }

    /// Append a byte slice.
    pub fn put_bytes(&mut self, bytes: &[u8]) -> Result<(), SaePkError> {
        self.check_room(bytes.len())?;
        self.data.extend_from_slice(bytes);
        Ok(())
    }

    /// Remaining room before the limit.
    pub fn tailroom(&self) -> usize {
        self.limit - self.data.len()
    }

    /// Bytes written so far.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether nothing has been written yet.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The assembled bytes.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Consume the buffer, returning the assembled bytes.
    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    fn check_room(&self, extra: usize) -> Result<(), SaePkError> {
        let need = self.data.len() + extra;
        if need > self.limit {
            return Err(SaePkError::CapacityExceeded {
                need,
                got: self.limit,
            });
        }
        Ok(())
    }
}
