//! End-to-end properties of the bounded formatting entry points.

use portfmt_core::errno::ENOENT;
use portfmt_core::printf::format_lossy_with_policy;
use portfmt_core::config::FallbackPolicy;
use portfmt_core::{ArgumentCursor, FormatArg, FormatError, format_into, format_to_vec};

fn sample_args() -> Vec<FormatArg<'static>> {
    vec![
        FormatArg::text("relation"),
        FormatArg::Int(-17),
        FormatArg::UInt(0xCAFE),
        FormatArg::Double(2.5),
        FormatArg::Pointer(0x7f00),
        FormatArg::LongLong(i64::MIN),
    ]
}

const SAMPLE_FORMAT: &str = "%sQ: %05d %X %8.3f %p %lld";

#[test]
fn logical_length_is_independent_of_capacity() {
    let args = sample_args();
    let full = format_to_vec(SAMPLE_FORMAT, &args).unwrap();
    for capacity in 0..=full.len() + 4 {
        let mut buf = vec![0xEEu8; capacity];
        let len = format_into(&mut buf, SAMPLE_FORMAT, &args).unwrap();
        assert_eq!(len, full.len(), "capacity {capacity}");
        if capacity > 0 {
            let written = len.min(capacity - 1);
            assert_eq!(&buf[..written], &full[..written], "capacity {capacity}");
            assert_eq!(buf[written], 0, "terminator at capacity {capacity}");
        }
    }
}

#[test]
fn full_render_matches_expected_text() {
    let out = format_to_vec(SAMPLE_FORMAT, &sample_args()).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "`relation`: -0017 CAFE    2.500 0x7f00 -9223372036854775808"
    );
}

#[test]
fn zero_capacity_never_writes() {
    let mut buf: [u8; 0] = [];
    let len = format_into(&mut buf, "%s and %s", &[FormatArg::text("a"), FormatArg::text("b")]);
    assert_eq!(len, Ok(7));
}

#[test]
fn macro_form_matches_slice_form() {
    let mut via_macro = [0u8; 64];
    let mut via_slice = [0u8; 64];
    let a = portfmt_core::format_into!(&mut via_macro, "%s %d %u %.2f", "x", -3, 4u32, 0.125)
        .unwrap();
    let b = format_into(
        &mut via_slice,
        "%s %d %u %.2f",
        &[
            FormatArg::text("x"),
            FormatArg::Int(-3),
            FormatArg::UInt(4),
            FormatArg::Double(0.125),
        ],
    )
    .unwrap();
    assert_eq!(a, b);
    assert_eq!(via_macro, via_slice);
    assert_eq!(&via_macro[..a], b"x -3 4 0.12");
}

#[test]
fn macro_without_arguments() {
    let mut buf = [0u8; 8];
    let len = portfmt_core::format_into!(&mut buf, "50%%").unwrap();
    assert_eq!(&buf[..=len], b"50%\0");
}

#[test]
fn cursor_form_starts_from_first_argument() {
    let args = [FormatArg::Int(1), FormatArg::Int(2)];
    let mut buf = [0u8; 8];
    let len = portfmt_core::format_into_with_cursor(&mut buf, "%d%d", ArgumentCursor::new(&args))
        .unwrap();
    assert_eq!(&buf[..len], b"12");
}

#[test]
fn repeated_calls_are_identical() {
    let args = sample_args();
    let first = format_to_vec(SAMPLE_FORMAT, &args).unwrap();
    for _ in 0..4 {
        assert_eq!(format_to_vec(SAMPLE_FORMAT, &args).unwrap(), first);
    }
}

#[test]
fn errno_message_is_deterministic() {
    let code = u32::try_from(ENOENT).unwrap();
    let out = format_to_vec("%uE", &[FormatArg::UInt(code)]).unwrap();
    assert_eq!(out, b"2 \"No such file or directory\"");
    let out = format_to_vec("%luE", &[FormatArg::ULong(4096)]).unwrap();
    assert_eq!(out, b"4096 \"Unknown error 4096\"");
    let out = format_to_vec("%uE", &[FormatArg::Int(-1)]).unwrap();
    assert_eq!(out, b"-1 \"Unknown error -1\"");
}

#[test]
fn float_precision_beyond_exact_digits_is_bounded() {
    for fmt in ["%.70000f", "%.99999999999999999999f", "%.*f"] {
        let args = [FormatArg::Int(70_000), FormatArg::Double(1.5)];
        let args = if fmt.contains('*') { &args[..] } else { &args[1..] };
        let mut buf = [0u8; 32];
        let len = format_into(&mut buf, fmt, args).unwrap();
        assert!(len >= 70_002, "{fmt}");
        assert!(buf[..31].starts_with(b"1.5"));
        assert!(buf[3..31].iter().all(|&b| b == b'0'), "{fmt}");
        assert_eq!(buf[31], 0);
    }
    let out = format_to_vec("%.70000f", &[FormatArg::Double(0.1)]).unwrap();
    assert_eq!(out.len(), 70_002);
    assert!(out.starts_with(b"0.1000000000000000055511151231257827"));
    assert!(out[60..].iter().all(|&b| b == b'0'));
}

#[test]
fn general_float_formats() {
    let cases: &[(&str, f64, &str)] = &[
        ("%g", 100000.0, "100000"),
        ("%g", 1000000.0, "1e+06"),
        ("%g", 0.0001, "0.0001"),
        ("%g", 0.00001, "1e-05"),
        ("%.3g", 3.14159, "3.14"),
        ("%.0g", 0.5, "0.5"),
        ("%f", -0.0, "-0.000000"),
        ("%.0f", 0.5, "0"),
        ("%.1f", 0.25, "0.2"),
    ];
    for &(fmt, value, expected) in cases {
        let out = format_to_vec(fmt, &[FormatArg::Double(value)]).unwrap();
        assert_eq!(String::from_utf8_lossy(&out), expected, "{fmt} {value}");
    }
}

#[test]
fn errors_carry_directive_offset() {
    let err = format_to_vec("abc %d %s", &[FormatArg::Int(1), FormatArg::Int(2)]).unwrap_err();
    assert_eq!(err.kind(), "ArgumentTypeMismatch");
    assert_eq!(err.offset(), 7);
    assert!(matches!(err, FormatError::ArgumentTypeMismatch { expected: "string", .. }));
}

#[test]
fn lossy_policies_differ_only_on_error() {
    let mut buf = [0u8; 16];
    assert_eq!(
        format_lossy_with_policy(&mut buf, "%d!", &[FormatArg::Int(3)], FallbackPolicy::Fail),
        2
    );
    assert_eq!(&buf[..3], b"3!\0");
    assert_eq!(format_lossy_with_policy(&mut buf, "%k", &[], FallbackPolicy::Fail), 0);
    assert_eq!(buf[0], 0);
    assert_eq!(format_lossy_with_policy(&mut buf, "%k", &[], FallbackPolicy::Raw), 2);
    assert_eq!(&buf[..3], b"%k\0");
}
