//! Resolution of named character encodings for string reads.
//!
//! Encoding names arrive from generated parser code as opaque identifiers
//! ("UTF-8", "ascii", "utf-16le", ...). Matching is case-insensitive and
//! ignores `-` and `_`, so "UTF-8", "utf8" and "UTF_8" all resolve to the
//! same decoder.

use zerocopy::byteorder::{BE, LE, U16};
use zerocopy::FromBytes;

use crate::error::{Error, Result};

/// Decodes `bytes` under the encoding named by `name`.
///
/// Unknown names fail with [`Error::UnknownEncoding`]; byte runs that are
/// not valid in the named encoding fail with [`Error::InvalidStringData`].
pub(crate) fn decode(bytes: &[u8], name: &str) -> Result<String> {
    let normalized: String = name
        .chars()
        .filter(|c| *c != '-' && *c != '_')
        .collect::<String>()
        .to_ascii_uppercase();

    match normalized.as_str() {
        "UTF8" => String::from_utf8(bytes.to_vec()).map_err(|_| invalid(name)),
        "ASCII" | "USASCII" => {
            if bytes.is_ascii() {
                Ok(bytes.iter().map(|&b| b as char).collect())
            } else {
                Err(invalid(name))
            }
        }
        // Latin-1 maps bytes to the first 256 code points directly.
        "ISO88591" | "LATIN1" => Ok(bytes.iter().map(|&b| b as char).collect()),
        "UTF16LE" => {
            let wchars = <[U16<LE>]>::ref_from_bytes(bytes).map_err(|_| invalid(name))?;
            from_utf16(wchars.iter().map(|c| c.get()), name)
        }
        "UTF16BE" => {
            let wchars = <[U16<BE>]>::ref_from_bytes(bytes).map_err(|_| invalid(name))?;
            from_utf16(wchars.iter().map(|c| c.get()), name)
        }
        _ => Err(Error::UnknownEncoding(name.to_string())),
    }
}

fn from_utf16(units: impl Iterator<Item = u16>, name: &str) -> Result<String> {
    let units: Vec<u16> = units.collect();
    String::from_utf16(&units).map_err(|_| invalid(name))
}

fn invalid(name: &str) -> Error {
    Error::InvalidStringData {
        encoding: name.to_string(),
    }
}
