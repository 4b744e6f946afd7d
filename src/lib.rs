//! Reads typed primitive values from seekable binary streams.
//!
//! This crate is the runtime layer underneath generated binary-format
//! readers: the generated code drives one [`Stream`] field-by-field while
//! this layer supplies positioning, fixed-width integer and float reads in
//! both byte orders, raw and terminator-delimited byte runs, fixed-content
//! verification, and reversible byte transforms. It never interprets bytes
//! beyond the requested primitive type; field layout, branching and
//! repetition all live in the caller.

#![forbid(unsafe_code)]
#![forbid(unused_must_use)]
#![warn(missing_docs)]

mod encoding;
mod error;
mod stream;
mod transform;


pub use error::{Error, Result};
pub use stream::{FileStream, MemStream, Stream};
pub use transform::{rotate_left, xor_many, xor_one};
