//! Shared inputs for the portfmt benchmarks.

use portfmt_core::FormatArg;

/// Bytes with embedded NULs for `%sB`.
pub const BINARY_PAYLOAD: [u8; 16] = *b"page\0\0\0\x01hdr\0tail";

/// A format mixing every integer width class, and matching arguments.
pub const INT_MIX_FORMAT: &str = "%d %5u %08x %lld %zu %o %p";

#[must_use]
pub fn int_mix_args() -> [FormatArg<'static>; 7] {
    [
        FormatArg::Int(-12345),
        FormatArg::UInt(42),
        FormatArg::UInt(0xBEEF),
        FormatArg::LongLong(i64::MIN),
        FormatArg::Size(4096),
        FormatArg::UInt(0o755),
        FormatArg::Pointer(0x7fff_1234),
    ]
}

/// The extension conversions with arguments.
pub const EXTENSION_FORMAT: &str = "%sQ %.16sB %.8sT %uE %uUKB";

#[must_use]
pub fn extension_args() -> [FormatArg<'static>; 5] {
    [
        FormatArg::text("ident`with`ticks"),
        FormatArg::Bytes(&BINARY_PAYLOAD),
        FormatArg::text("a rather long relation name"),
        FormatArg::UInt(2),
        FormatArg::UInt(64),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use portfmt_core::format_to_vec;

    #[test]
    fn bench_inputs_format_cleanly() {
        assert!(format_to_vec(INT_MIX_FORMAT, &int_mix_args()).is_ok());
        let out = format_to_vec(EXTENSION_FORMAT, &extension_args()).unwrap();
        assert!(out.starts_with(b"`ident``with``ticks` page\0"));
        assert!(out.ends_with(b"a rather... 2 \"No such file or directory\" 64KB"));
    }
}
