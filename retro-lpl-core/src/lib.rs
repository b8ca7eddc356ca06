//! Core identity types and extraction for retro-lpl.
//!
//! An entry's identity is either a CRC-32 of the ROM data or a disc serial.
//! This crate computes both from files on disk; matching against reference
//! catalogs lives in `retro-lpl-rdb`.

use std::io::{Read, Seek};

pub mod disc;
pub mod error;
pub mod hasher;
pub mod identity;
pub mod region;
pub mod serial;
pub mod util;

pub use error::IdentityError;
pub use hasher::{CrcComparison, CrcIdentity};
pub use identity::{DETECT, DeclaredIdentity, IdentityKind, IdentityValue};
pub use region::Region;
pub use serial::SerialFamily;

/// A reader that implements both Read and Seek.
pub trait ReadSeek: Read + Seek {}
impl<T: Read + Seek> ReadSeek for T {}
