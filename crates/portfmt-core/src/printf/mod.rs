//! Bounded printf engine.
//!
//! The pipeline is scanner ([`directive`]) → argument binding ([`args`]) →
//! renderer ([`render`]) → bounded sink ([`sink`]), driven by [`driver`].

pub mod args;
pub mod directive;
pub mod driver;
pub mod float;
pub mod render;
pub mod sink;

pub use args::{ArgumentCursor, FormatArg};
pub use directive::{
    DirectiveFlags, Extension, FormatDirective, FormatSegment, LengthMod, Precision, Width,
    parse_format_string, scan_directive,
};
pub use driver::{
    format_into, format_into_with_cursor, format_lossy, format_lossy_with_policy, format_to_vec,
};
pub use sink::{FieldSink, OutputSink};

/// Variadic form of [`format_into`](crate::printf::format_into).
///
/// Each argument goes through `FormatArg::from`, so plain integers, floats,
/// `&str` and byte slices can be passed directly:
///
/// ```
/// let mut buf = [0u8; 32];
/// let len = portfmt_core::format_into!(&mut buf, "%s=%05d", "id", -42).unwrap();
/// assert_eq!(&buf[..len], b"id=-0042");
/// ```
#[macro_export]
macro_rules! format_into {
    ($buf:expr, $fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::printf::format_into_with_cursor(
            $buf,
            $fmt,
            $crate::printf::ArgumentCursor::new(&[$($crate::printf::FormatArg::from($arg)),*]),
        )
    };
}
