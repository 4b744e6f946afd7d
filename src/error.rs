//! Library-wide error and result types.

use std::io;

use thiserror::Error;

/// Result alias used throughout binstream.
pub type Result<T> = std::result::Result<T, Error>;

/// All errors the stream layer can produce.
///
/// These are deterministic structural failures, not transient conditions;
/// callers propagate them as parse failures rather than retrying.
#[derive(Debug, Error)]
pub enum Error {
    /// A fixed-width read requested more bytes than the source could
    /// deliver before ending.
    #[error("requested {requested} bytes, got only {actual}")]
    ShortRead {
        /// Number of bytes the read asked for.
        requested: usize,
        /// Number of bytes actually obtained before the source ended.
        actual: usize,
    },

    /// A fixed-content check read bytes that differ from the expected
    /// sequence.
    #[error(
        "unexpected fixed contents: got [{}], expected [{}]",
        hex_pairs(.actual),
        hex_pairs(.expected)
    )]
    UnexpectedContent {
        /// The bytes actually present in the stream.
        actual: Vec<u8>,
        /// The bytes the caller required.
        expected: Vec<u8>,
    },

    /// A terminated read reached the end of the source without finding its
    /// terminator byte.
    #[error("end of stream reached, no terminator byte {terminator:#04x} found")]
    UnterminatedRead {
        /// The terminator byte that was being scanned for.
        terminator: u8,
    },

    /// A group rotation was requested for a group size this layer does not
    /// implement.
    #[error("group rotation is only supported for 1-byte groups, got {group_size}")]
    UnsupportedOperation {
        /// The rejected group size in bytes.
        group_size: usize,
    },

    /// Construction was attempted over a handle that is not usable as a
    /// seekable byte source.
    #[error("source is not usable as a seekable byte stream: {0}")]
    InvalidSource(#[source] io::Error),

    /// A caller-supplied argument is outside the operation's domain.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// A string read named an encoding this layer cannot resolve.
    #[error("unknown encoding: {0}")]
    UnknownEncoding(String),

    /// A byte run could not be decoded under the named encoding.
    #[error("byte sequence is not valid {encoding}")]
    InvalidStringData {
        /// The encoding name the decode was attempted under.
        encoding: String,
    },

    /// An underlying I/O operation failed mid-read.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Formats a byte run as space-separated uppercase hex pairs.
pub(crate) fn hex_pairs(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02X}"))
        .collect::<Vec<_>>()
        .join(" ")
}
