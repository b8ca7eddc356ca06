//! Tag-length-value decoding for RDB payloads.
//!
//! Each value starts with a one-byte tag; lengths and integers that follow
//! are big-endian. The tag space is MessagePack's minus floats and
//! extensions.

use crate::error::RdbError;

/// Maximum nesting of maps and arrays accepted by the decoder.
pub const MAX_DEPTH: usize = 64;

/// Tag bytes.
pub mod tag {
    pub const FIX_MAP: u8 = 0x80;
    pub const FIX_ARRAY: u8 = 0x90;
    pub const FIX_STR: u8 = 0xa0;
    pub const NIL: u8 = 0xc0;
    pub const FALSE: u8 = 0xc2;
    pub const TRUE: u8 = 0xc3;
    pub const BIN_8: u8 = 0xc4;
    pub const BIN_16: u8 = 0xc5;
    pub const BIN_32: u8 = 0xc6;
    pub const UINT_8: u8 = 0xcc;
    pub const UINT_16: u8 = 0xcd;
    pub const UINT_32: u8 = 0xce;
    pub const UINT_64: u8 = 0xcf;
    pub const INT_8: u8 = 0xd0;
    pub const INT_16: u8 = 0xd1;
    pub const INT_32: u8 = 0xd2;
    pub const INT_64: u8 = 0xd3;
    pub const STR_8: u8 = 0xd9;
    pub const STR_16: u8 = 0xda;
    pub const STR_32: u8 = 0xdb;
    pub const ARRAY_16: u8 = 0xdc;
    pub const ARRAY_32: u8 = 0xdd;
    pub const MAP_16: u8 = 0xde;
    pub const MAP_32: u8 = 0xdf;
}

/// A decoded value. Only lives until its record is assembled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Key/value pairs in stream order
    Map(Vec<(String, Value)>),
    Array(Vec<Value>),
    String(String),
    Binary(Vec<u8>),
    Boolean(bool),
    /// Signed integers, including both fixint ranges
    Signed(i64),
    Unsigned(u64),
    Nil,
}

impl Value {
    /// Look up a map entry by key (first occurrence).
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Map(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Interpret the raw payload as a big-endian unsigned integer.
    ///
    /// Binary payloads of up to 8 bytes are folded; negative integers and
    /// non-scalar values have no unsigned reading.
    pub fn as_be_uint(&self) -> Option<u64> {
        match self {
            Value::Unsigned(v) => Some(*v),
            Value::Signed(v) => u64::try_from(*v).ok(),
            Value::Binary(bytes) if bytes.len() <= 8 => {
                Some(bytes.iter().fold(0u64, |acc, &b| (acc << 8) | b as u64))
            }
            _ => None,
        }
    }
}

/// Cursor over an RDB buffer.
pub struct ValueReader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> ValueReader<'a> {
    pub fn new(data: &'a [u8], offset: usize) -> Self {
        Self { data, offset }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn is_at_end(&self) -> bool {
        self.offset >= self.data.len()
    }

    /// Decode one value at the cursor and advance past it.
    pub fn read_value(&mut self) -> Result<Value, RdbError> {
        self.read_nested(0)
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], RdbError> {
        let end = self
            .offset
            .checked_add(len)
            .filter(|&end| end <= self.data.len())
            .ok_or_else(|| {
                RdbError::format(format!(
                    "unexpected end of data at offset {:#x} (wanted {} bytes)",
                    self.offset, len
                ))
            })?;
        let bytes = &self.data[self.offset..end];
        self.offset = end;
        Ok(bytes)
    }

    fn read_uint(&mut self, width: usize) -> Result<u64, RdbError> {
        let bytes = self.take(width)?;
        Ok(bytes.iter().fold(0u64, |acc, &b| (acc << 8) | b as u64))
    }

    fn read_int(&mut self, width: usize) -> Result<i64, RdbError> {
        let raw = self.read_uint(width)?;
        // Sign-extend from the payload width
        let shift = 64 - (width as u32 * 8);
        Ok(((raw << shift) as i64) >> shift)
    }

    fn read_len(&mut self, width: usize) -> Result<usize, RdbError> {
        let len = self.read_uint(width)?;
        usize::try_from(len).map_err(|_| RdbError::format(format!("length {len} too large")))
    }

    fn read_string(&mut self, len: usize) -> Result<Value, RdbError> {
        let bytes = self.take(len)?;
        Ok(Value::String(String::from_utf8_lossy(bytes).into_owned()))
    }

    fn read_binary(&mut self, len: usize) -> Result<Value, RdbError> {
        Ok(Value::Binary(self.take(len)?.to_vec()))
    }

    fn read_array(&mut self, count: usize, depth: usize) -> Result<Value, RdbError> {
        // Every element is at least one byte, so the remaining length bounds the count
        let mut items = Vec::with_capacity(count.min(self.data.len() - self.offset));
        for _ in 0..count {
            items.push(self.read_nested(depth + 1)?);
        }
        Ok(Value::Array(items))
    }

    fn read_map(&mut self, count: usize, depth: usize) -> Result<Value, RdbError> {
        let mut entries = Vec::with_capacity(count.min(self.data.len() - self.offset));
        for _ in 0..count {
            let key_offset = self.offset;
            let key = match self.read_nested(depth + 1)? {
                Value::String(s) => s,
                _ => {
                    return Err(RdbError::format(format!(
                        "non-string key at offset {key_offset:#x}"
                    )));
                }
            };
            let value = self.read_nested(depth + 1)?;
            entries.push((key, value));
        }
        Ok(Value::Map(entries))
    }

    fn read_nested(&mut self, depth: usize) -> Result<Value, RdbError> {
        if depth > MAX_DEPTH {
            return Err(RdbError::format(format!(
                "nesting too deep at offset {:#x}",
                self.offset
            )));
        }

        let tag_offset = self.offset;
        let t = self.take(1)?[0];

        match t {
            0x00..=0x7f => Ok(Value::Signed(t as i64)),
            0x80..=0x8f => self.read_map((t - tag::FIX_MAP) as usize, depth),
            0x90..=0x9f => self.read_array((t - tag::FIX_ARRAY) as usize, depth),
            0xa0..=0xbf => self.read_string((t - tag::FIX_STR) as usize),
            tag::NIL => Ok(Value::Nil),
            tag::FALSE => Ok(Value::Boolean(false)),
            tag::TRUE => Ok(Value::Boolean(true)),
            tag::BIN_8 => {
                let len = self.read_len(1)?;
                self.read_binary(len)
            }
            tag::BIN_16 => {
                let len = self.read_len(2)?;
                self.read_binary(len)
            }
            tag::BIN_32 => {
                let len = self.read_len(4)?;
                self.read_binary(len)
            }
            tag::UINT_8 => Ok(Value::Unsigned(self.read_uint(1)?)),
            tag::UINT_16 => Ok(Value::Unsigned(self.read_uint(2)?)),
            tag::UINT_32 => Ok(Value::Unsigned(self.read_uint(4)?)),
            tag::UINT_64 => Ok(Value::Unsigned(self.read_uint(8)?)),
            tag::INT_8 => Ok(Value::Signed(self.read_int(1)?)),
            tag::INT_16 => Ok(Value::Signed(self.read_int(2)?)),
            tag::INT_32 => Ok(Value::Signed(self.read_int(4)?)),
            tag::INT_64 => Ok(Value::Signed(self.read_int(8)?)),
            tag::STR_8 => {
                let len = self.read_len(1)?;
                self.read_string(len)
            }
            tag::STR_16 => {
                let len = self.read_len(2)?;
                self.read_string(len)
            }
            tag::STR_32 => {
                let len = self.read_len(4)?;
                self.read_string(len)
            }
            tag::ARRAY_16 => {
                let count = self.read_len(2)?;
                self.read_array(count, depth)
            }
            tag::ARRAY_32 => {
                let count = self.read_len(4)?;
                self.read_array(count, depth)
            }
            tag::MAP_16 => {
                let count = self.read_len(2)?;
                self.read_map(count, depth)
            }
            tag::MAP_32 => {
                let count = self.read_len(4)?;
                self.read_map(count, depth)
            }
            0xe0..=0xff => Ok(Value::Signed(t as i64 - 0x100)),
            _ => Err(RdbError::format(format!(
                "unknown tag {t:#04x} at offset {tag_offset:#x}"
            ))),
        }
    }
}

#[cfg(test)]
#[path = "tests/value_tests.rs"]
mod tests;
