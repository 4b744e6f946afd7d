use std::fs::File;
use std::io::{self, BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use crate::encoding;
use crate::error::{Error, Result};

/// Reads typed primitive values from a seekable byte source.
///
/// A `Stream` owns its source for its lifetime and maintains the read
/// cursor against it. Callers (typically code generated from a binary
/// format description) issue a sequence of typed reads; each read either
/// fully succeeds, advancing the cursor by exactly the requested byte
/// count, or fails without producing a partial value.
///
/// Multi-byte reads name their byte order explicitly (`read_u32_be`,
/// `read_u32_le`, ...) and decode identically on every platform; there is
/// no stream-wide endianness mode.
///
/// A `Stream` is driven by exactly one logical reader at a time. Reads
/// mutate the shared cursor, so concurrent use requires external
/// synchronization; nested parsers should work on independent sub-streams
/// (see [`Stream::substream`]) instead of sharing a cursor.
#[derive(Debug)]
pub struct Stream<S> {
    /// The underlying byte source. Exclusively owned; dropped with the
    /// stream.
    src: S,
    /// Total source length in bytes, determined once at construction.
    len: u64,
    /// Mirror of the source's cursor, kept in lockstep with every
    /// successful source operation so `pos` and `eof` never touch the
    /// source.
    pos: u64,
}

/// A stream over an in-memory byte buffer.
pub type MemStream = Stream<io::Cursor<Vec<u8>>>;

/// A stream over a buffered file handle.
pub type FileStream = Stream<BufReader<File>>;

impl MemStream {
    /// Creates a stream over an in-memory byte buffer.
    pub fn from_bytes(data: Vec<u8>) -> Self {
        let len = data.len() as u64;
        Self {
            src: io::Cursor::new(data),
            len,
            pos: 0,
        }
    }
}

impl FileStream {
    /// Opens the file at `path` in binary mode and wraps it in a buffered
    /// stream.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path).map_err(Error::InvalidSource)?;
        Stream::new(BufReader::new(file))
    }
}

impl<S: Read + Seek> Stream<S> {
    /// Wraps an already-open, seekable byte source.
    ///
    /// The source's length is determined once by seeking to its end, and
    /// the prior position is restored afterwards. A handle that cannot
    /// seek (a pipe, for example) fails with [`Error::InvalidSource`].
    pub fn new(mut src: S) -> Result<Self> {
        let pos = src.stream_position().map_err(Error::InvalidSource)?;
        let len = src.seek(SeekFrom::End(0)).map_err(Error::InvalidSource)?;
        src.seek(SeekFrom::Start(pos)).map_err(Error::InvalidSource)?;
        Ok(Self { src, len, pos })
    }

    /// True iff the cursor is at the end of the source.
    #[inline(always)]
    pub fn eof(&self) -> bool {
        self.pos >= self.len
    }

    /// Current cursor position, in bytes from the start of the source.
    #[inline(always)]
    pub fn pos(&self) -> u64 {
        self.pos
    }

    /// Total length of the source in bytes.
    #[inline(always)]
    pub fn len(&self) -> u64 {
        self.len
    }

    /// True iff the source holds no bytes at all.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Bytes remaining between the cursor and the end of the source.
    #[inline(always)]
    pub fn remaining(&self) -> u64 {
        self.len.saturating_sub(self.pos)
    }

    /// Moves the cursor to an absolute byte offset.
    ///
    /// No bounds check is applied here; a seek past the end of the source
    /// is reported only when a subsequent read fails.
    pub fn seek(&mut self, offset: u64) -> Result<()> {
        self.src.seek(SeekFrom::Start(offset))?;
        self.pos = offset;
        Ok(())
    }

    /// Fills `buf` from the source, stopping early only at end of source.
    ///
    /// Returns the number of bytes obtained. The cursor advances by
    /// exactly that count, including on the error path, so a failed read
    /// leaves the cursor wherever the source stopped delivering.
    fn fill(&mut self, buf: &mut [u8]) -> Result<usize> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.src.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.pos += filled as u64;
                    return Err(Error::Io(e));
                }
            }
        }
        self.pos += filled as u64;
        Ok(filled)
    }

    /// Reads exactly `N` bytes into a fixed-size array.
    #[inline(always)]
    fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut buf = [0u8; N];
        let got = self.fill(&mut buf)?;
        if got < N {
            return Err(Error::ShortRead {
                requested: N,
                actual: got,
            });
        }
        Ok(buf)
    }

    /// Reads a single `u8` value.
    #[inline(always)]
    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_array::<1>()?[0])
    }

    /// Reads a single `i8` value.
    #[inline(always)]
    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(self.read_u8()? as i8)
    }

    /// Reads a `u16` in big-endian byte order.
    #[inline(always)]
    pub fn read_u16_be(&mut self) -> Result<u16> {
        Ok(u16::from_be_bytes(self.read_array()?))
    }

    /// Reads a `u16` in little-endian byte order.
    #[inline(always)]
    pub fn read_u16_le(&mut self) -> Result<u16> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    /// Reads an `i16` in big-endian byte order.
    #[inline(always)]
    pub fn read_i16_be(&mut self) -> Result<i16> {
        Ok(i16::from_be_bytes(self.read_array()?))
    }

    /// Reads an `i16` in little-endian byte order.
    #[inline(always)]
    pub fn read_i16_le(&mut self) -> Result<i16> {
        Ok(i16::from_le_bytes(self.read_array()?))
    }

    /// Reads a `u32` in big-endian byte order.
    #[inline(always)]
    pub fn read_u32_be(&mut self) -> Result<u32> {
        Ok(u32::from_be_bytes(self.read_array()?))
    }

    /// Reads a `u32` in little-endian byte order.
    #[inline(always)]
    pub fn read_u32_le(&mut self) -> Result<u32> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    /// Reads an `i32` in big-endian byte order.
    #[inline(always)]
    pub fn read_i32_be(&mut self) -> Result<i32> {
        Ok(i32::from_be_bytes(self.read_array()?))
    }

    /// Reads an `i32` in little-endian byte order.
    #[inline(always)]
    pub fn read_i32_le(&mut self) -> Result<i32> {
        Ok(i32::from_le_bytes(self.read_array()?))
    }

    /// Reads a `u64` in big-endian byte order.
    #[inline(always)]
    pub fn read_u64_be(&mut self) -> Result<u64> {
        Ok(u64::from_be_bytes(self.read_array()?))
    }

    /// Reads a `u64` in little-endian byte order.
    #[inline(always)]
    pub fn read_u64_le(&mut self) -> Result<u64> {
        Ok(u64::from_le_bytes(self.read_array()?))
    }

    /// Reads an `i64` in big-endian byte order.
    #[inline(always)]
    pub fn read_i64_be(&mut self) -> Result<i64> {
        Ok(i64::from_be_bytes(self.read_array()?))
    }

    /// Reads an `i64` in little-endian byte order.
    #[inline(always)]
    pub fn read_i64_le(&mut self) -> Result<i64> {
        Ok(i64::from_le_bytes(self.read_array()?))
    }

    /// Reads an IEEE-754 single-precision float in big-endian byte order.
    ///
    /// The bit pattern is reinterpreted exactly; NaNs and infinities pass
    /// through untouched.
    #[inline(always)]
    pub fn read_f32_be(&mut self) -> Result<f32> {
        Ok(f32::from_be_bytes(self.read_array()?))
    }

    /// Reads an IEEE-754 single-precision float in little-endian byte order.
    #[inline(always)]
    pub fn read_f32_le(&mut self) -> Result<f32> {
        Ok(f32::from_le_bytes(self.read_array()?))
    }

    /// Reads an IEEE-754 double-precision float in big-endian byte order.
    #[inline(always)]
    pub fn read_f64_be(&mut self) -> Result<f64> {
        Ok(f64::from_be_bytes(self.read_array()?))
    }

    /// Reads an IEEE-754 double-precision float in little-endian byte order.
    #[inline(always)]
    pub fn read_f64_le(&mut self) -> Result<f64> {
        Ok(f64::from_le_bytes(self.read_array()?))
    }

    /// Reads exactly `n` bytes into a freshly allocated buffer.
    ///
    /// Every fixed-width read in this layer is built on the same fill
    /// primitive and fails the same way: if fewer than `n` bytes remain,
    /// the error reports both the requested and the obtained count.
    pub fn read_bytes(&mut self, n: usize) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; n];
        let got = self.fill(&mut buf)?;
        if got < n {
            return Err(Error::ShortRead {
                requested: n,
                actual: got,
            });
        }
        Ok(buf)
    }

    /// Reads all bytes remaining between the cursor and the end of the
    /// source.
    ///
    /// Cannot short-read; at end of source this returns an empty buffer.
    pub fn read_bytes_full(&mut self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        let got = self.src.read_to_end(&mut buf)?;
        self.pos += got as u64;
        if self.pos > self.len {
            self.len = self.pos;
        }
        Ok(buf)
    }

    /// Reads `expected.len()` bytes and verifies them byte-for-byte.
    ///
    /// Returns the bytes on a match so the caller can keep the verified
    /// header. On a mismatch the error carries both sequences.
    pub fn ensure_fixed_contents(&mut self, expected: &[u8]) -> Result<Vec<u8>> {
        let actual = self.read_bytes(expected.len())?;
        if actual != expected {
            return Err(Error::UnexpectedContent {
                actual,
                expected: expected.to_vec(),
            });
        }
        Ok(actual)
    }

    /// Scans forward one byte at a time until `term` is found or the
    /// source ends, accumulating the bytes before the terminator.
    ///
    /// On a match the terminator is appended to the result iff
    /// `include_term`; with `consume_term == false` the cursor is moved
    /// back onto the terminator so the next read starts there, while all
    /// prior bytes stay consumed. Reaching end of source first fails with
    /// [`Error::UnterminatedRead`] when `eos_is_error`, and otherwise
    /// returns the accumulated (possibly empty) run.
    pub fn read_bytes_term(
        &mut self,
        term: u8,
        include_term: bool,
        consume_term: bool,
        eos_is_error: bool,
    ) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        loop {
            let mut byte = [0u8; 1];
            if self.fill(&mut byte)? == 0 {
                if eos_is_error {
                    return Err(Error::UnterminatedRead { terminator: term });
                }
                return Ok(out);
            }
            if byte[0] == term {
                if include_term {
                    out.push(term);
                }
                if !consume_term {
                    self.src.seek(SeekFrom::Current(-1))?;
                    self.pos -= 1;
                }
                return Ok(out);
            }
            out.push(byte[0]);
        }
    }

    /// Decodes all remaining bytes under the named encoding.
    pub fn read_str_eos(&mut self, enc: &str) -> Result<String> {
        let bytes = self.read_bytes_full()?;
        encoding::decode(&bytes, enc)
    }

    /// Decodes exactly `n` bytes under the named encoding.
    ///
    /// Short reads fail exactly as [`Stream::read_bytes`] does.
    pub fn read_str_byte_limit(&mut self, n: usize, enc: &str) -> Result<String> {
        let bytes = self.read_bytes(n)?;
        encoding::decode(&bytes, enc)
    }

    /// Reads a `term`-delimited string and decodes it under the named
    /// encoding.
    ///
    /// Terminator and end-of-source handling are those of
    /// [`Stream::read_bytes_term`]; decoding is applied once, to the final
    /// accumulated run, never per byte.
    pub fn read_strz(
        &mut self,
        enc: &str,
        term: u8,
        include_term: bool,
        consume_term: bool,
        eos_is_error: bool,
    ) -> Result<String> {
        let bytes = self.read_bytes_term(term, include_term, consume_term, eos_is_error)?;
        encoding::decode(&bytes, enc)
    }

    /// Reads `n` bytes and wraps the copied range in an independent
    /// in-memory stream.
    ///
    /// The child stream has its own cursor starting at zero; reads against
    /// it never move this stream's cursor.
    pub fn substream(&mut self, n: usize) -> Result<MemStream> {
        Ok(MemStream::from_bytes(self.read_bytes(n)?))
    }
}
