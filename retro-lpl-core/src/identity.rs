//! Identity values as they appear in playlist `crc32` fields.
//!
//! A declared value is either the `DETECT` sentinel or `<value>|<kind>`,
//! where kind is `crc` or `serial`.

use std::fmt;

use crate::error::IdentityError;

/// Sentinel meaning "let the frontend work it out".
pub const DETECT: &str = "DETECT";

/// Which fingerprint an identity value carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentityKind {
    /// CRC-32 of the ROM data, 8 uppercase hex digits
    Crc,
    /// Disc or cartridge serial
    Serial,
}

impl IdentityKind {
    /// Suffix used after the `|` separator.
    pub fn suffix(&self) -> &'static str {
        match self {
            Self::Crc => "crc",
            Self::Serial => "serial",
        }
    }

    fn from_suffix(s: &str) -> Option<Self> {
        match s {
            "crc" => Some(Self::Crc),
            "serial" => Some(Self::Serial),
            _ => None,
        }
    }
}

impl fmt::Display for IdentityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

/// A computed or declared identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityValue {
    pub kind: IdentityKind,
    pub value: String,
}

impl IdentityValue {
    pub fn crc(value: impl Into<String>) -> Self {
        Self {
            kind: IdentityKind::Crc,
            value: value.into(),
        }
    }

    pub fn serial(value: impl Into<String>) -> Self {
        Self {
            kind: IdentityKind::Serial,
            value: value.into(),
        }
    }

    /// Render as a playlist field value, e.g. `ABCD1234|crc`.
    pub fn encode(&self) -> String {
        format!("{}|{}", self.value, self.kind.suffix())
    }
}

/// The parsed contents of an entry's `crc32` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclaredIdentity {
    Detect,
    Value(IdentityValue),
}

impl DeclaredIdentity {
    /// Parse a raw `crc32` field.
    ///
    /// Anything other than the sentinel must end in `|crc` or `|serial`.
    /// The identity is the text before the first `|`.
    pub fn parse(raw: &str) -> Result<Self, IdentityError> {
        if raw == DETECT {
            return Ok(Self::Detect);
        }

        let kind = raw
            .rsplit_once('|')
            .and_then(|(_, suffix)| IdentityKind::from_suffix(suffix))
            .ok_or_else(|| IdentityError::format(format!("invalid identity value '{raw}'")))?;
        let value = raw.split('|').next().unwrap_or_default();

        Ok(Self::Value(IdentityValue {
            kind,
            value: value.to_string(),
        }))
    }

    pub fn is_detect(&self) -> bool {
        matches!(self, Self::Detect)
    }

    /// The identity text, or `DETECT` for the sentinel.
    pub fn value(&self) -> &str {
        match self {
            Self::Detect => DETECT,
            Self::Value(v) => &v.value,
        }
    }

    pub fn kind(&self) -> Option<IdentityKind> {
        match self {
            Self::Detect => None,
            Self::Value(v) => Some(v.kind),
        }
    }
}
