//! # portfmt-core
//!
//! Portable, bounded `snprintf`-style formatting.
//!
//! The engine renders a format string and a slice of typed arguments into a
//! caller-supplied byte buffer. Output is byte-identical on every target:
//! `%p` always carries `0x`, `%f`/`%g` never defer to the platform libc, and a
//! null `%s` prints `(null)`. A handful of extension conversions (`%sQ`,
//! `%sB`, `%sT`, `%uE`) cover identifier quoting, raw byte buffers,
//! ellipsis truncation and errno messages.
//!
//! No `unsafe` code is permitted at the crate level.

#![deny(unsafe_code)]

pub mod config;
pub mod errno;
pub mod error;
pub mod printf;

pub use error::{FormatError, MalformedReason};
pub use printf::{
    ArgumentCursor, FormatArg, FormatDirective, format_into, format_into_with_cursor,
    format_lossy, format_to_vec,
};
