//! Specifier renderers.
//!
//! Each renderer writes one field through a [`FieldSink`]. Width and
//! precision must already be resolved (`Width::FromArg` and
//! `Precision::FromArg` are treated as absent). Fields are always
//! right-aligned; the `-` flag is ignored.
//!
//! Zero padding applies to numeric conversions only and goes between the
//! sign or `0x` prefix and the digits.

use crate::errno::strerror_message;
use crate::printf::directive::{FormatDirective, Precision, Width};
use crate::printf::float::{DEFAULT_PRECISION, MAX_EXACT_DIGITS, format_f, format_g};
use crate::printf::sink::FieldSink;

/// Text printed for a null `%s` argument.
pub const NULL_TEXT: &[u8] = b"(null)";

/// Marker appended by `%sT` when it cuts a string.
pub const ELLIPSIS: &[u8] = b"...";

const IDENT_QUOTE: u8 = b'`';

// ---------------------------------------------------------------------------
// Numeric renderers
// ---------------------------------------------------------------------------

/// Render a signed integer (`d`, `i`).
pub fn format_signed<S: FieldSink + ?Sized>(value: i64, spec: &FormatDirective, sink: &mut S) {
    let mut digits = [0u8; 64];
    let count = render_digits(value.unsigned_abs(), 10, false, &mut digits);
    let sign: &[u8] = if value < 0 { b"-" } else { b"" };
    emit_numeric(sink, spec, sign, &digits[64 - count..]);
}

/// Render an unsigned integer (`u`, `x`, `X`, `o`).
pub fn format_unsigned<S: FieldSink + ?Sized>(value: u64, spec: &FormatDirective, sink: &mut S) {
    let (base, uppercase) = int_base(spec.conversion);
    let mut digits = [0u8; 64];
    let count = render_digits(value, base, uppercase, &mut digits);
    emit_numeric(sink, spec, b"", &digits[64 - count..]);
}

/// Render a pointer as `0x` + lowercase hex, on every target.
pub fn format_pointer<S: FieldSink + ?Sized>(addr: u64, spec: &FormatDirective, sink: &mut S) {
    let mut digits = [0u8; 64];
    let count = render_digits(addr, 16, false, &mut digits);
    emit_numeric(sink, spec, b"0x", &digits[64 - count..]);
}

/// Render a `double` (`f`, `g`).
pub fn format_float<S: FieldSink + ?Sized>(value: f64, spec: &FormatDirective, sink: &mut S) {
    if value.is_nan() {
        return emit_text(sink, spec, b"nan");
    }
    if value.is_infinite() {
        let text: &[u8] = if value > 0.0 { b"inf" } else { b"-inf" };
        return emit_text(sink, spec, text);
    }

    let precision = match spec.precision {
        Precision::Fixed(p) => p,
        _ => DEFAULT_PRECISION,
    };
    let abs = value.abs();
    let (body, trailing_zeros) = match spec.conversion {
        b'g' => (format_g(abs, precision), 0),
        _ => (
            format_f(abs, precision),
            precision.saturating_sub(MAX_EXACT_DIGITS),
        ),
    };
    let sign: &[u8] = if value.is_sign_negative() { b"-" } else { b"" };
    emit_numeric_with_zeros(sink, spec, sign, body.as_bytes(), trailing_zeros);
}

/// Render `%uE`: `<value> "<message>"`, the value printed as with `%d`.
///
/// Width and zero padding apply to the number only.
pub fn format_errno<S: FieldSink + ?Sized>(value: i64, spec: &FormatDirective, sink: &mut S) {
    format_signed(value, spec, sink);
    let message = strerror_message(value);
    sink.put(b" \"");
    sink.put(message.as_bytes());
    sink.put_byte(b'"');
}

// ---------------------------------------------------------------------------
// Text renderers
// ---------------------------------------------------------------------------

/// Render a string (`s`, `sS`).
///
/// Stops at the first NUL byte, then at `precision` bytes if given. A null
/// argument prints `(null)`.
pub fn format_str<S: FieldSink + ?Sized>(s: Option<&[u8]>, spec: &FormatDirective, sink: &mut S) {
    let text = limit_to_precision(c_string(s), spec);
    emit_text(sink, spec, text);
}

/// Render `%sT`: like `%s`, but a cut string ends with `...`.
///
/// The result is at most `precision + 3` bytes.
pub fn format_truncated<S: FieldSink + ?Sized>(
    s: Option<&[u8]>,
    spec: &FormatDirective,
    sink: &mut S,
) {
    let full = c_string(s);
    let text = limit_to_precision(full, spec);
    let marker: &[u8] = if text.len() < full.len() { ELLIPSIS } else { b"" };
    pad(sink, b' ', resolve_width(spec).saturating_sub(text.len() + marker.len()));
    sink.put(text);
    sink.put(marker);
}

/// Render `%sQ`: the string in backticks, each backtick doubled.
///
/// `precision` limits the source bytes before quoting.
pub fn format_quoted<S: FieldSink + ?Sized>(
    s: Option<&[u8]>,
    spec: &FormatDirective,
    sink: &mut S,
) {
    let text = limit_to_precision(c_string(s), spec);
    let quotes = text.iter().filter(|&&b| b == IDENT_QUOTE).count();
    let content_len = text.len() + quotes + 2;
    pad(sink, b' ', resolve_width(spec).saturating_sub(content_len));

    sink.put_byte(IDENT_QUOTE);
    for chunk in text.split_inclusive(|&b| b == IDENT_QUOTE) {
        sink.put(chunk);
        if chunk.last() == Some(&IDENT_QUOTE) {
            sink.put_byte(IDENT_QUOTE);
        }
    }
    sink.put_byte(IDENT_QUOTE);
}

/// Render `%sB`: exactly `bytes`, embedded NULs included.
///
/// The caller has already cut `bytes` to the directive's precision.
pub fn format_binary<S: FieldSink + ?Sized>(bytes: &[u8], spec: &FormatDirective, sink: &mut S) {
    emit_text(sink, spec, bytes);
}

/// Render a character (`c`).
pub fn format_char<S: FieldSink + ?Sized>(c: u8, spec: &FormatDirective, sink: &mut S) {
    emit_text(sink, spec, &[c]);
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn resolve_width(spec: &FormatDirective) -> usize {
    match spec.width {
        Width::Fixed(w) => w,
        _ => 0,
    }
}

/// Right-align `text` with spaces.
fn emit_text<S: FieldSink + ?Sized>(sink: &mut S, spec: &FormatDirective, text: &[u8]) {
    pad(sink, b' ', resolve_width(spec).saturating_sub(text.len()));
    sink.put(text);
}

/// Right-align `prefix` + `body`; zero padding goes between them.
fn emit_numeric<S: FieldSink + ?Sized>(
    sink: &mut S,
    spec: &FormatDirective,
    prefix: &[u8],
    body: &[u8],
) {
    emit_numeric_with_zeros(sink, spec, prefix, body, 0);
}

/// Like [`emit_numeric`], with `trailing_zeros` zeros after `body`.
fn emit_numeric_with_zeros<S: FieldSink + ?Sized>(
    sink: &mut S,
    spec: &FormatDirective,
    prefix: &[u8],
    body: &[u8],
    trailing_zeros: usize,
) {
    let len = (prefix.len() + body.len()).saturating_add(trailing_zeros);
    let pad_total = resolve_width(spec).saturating_sub(len);
    if spec.flags.zero_pad && spec.is_numeric() {
        sink.put(prefix);
        pad(sink, b'0', pad_total);
    } else {
        pad(sink, b' ', pad_total);
        sink.put(prefix);
    }
    sink.put(body);
    pad(sink, b'0', trailing_zeros);
}

fn pad<S: FieldSink + ?Sized>(sink: &mut S, byte: u8, count: usize) {
    if count > 0 {
        sink.fill(byte, count);
    }
}

fn c_string(s: Option<&[u8]>) -> &[u8] {
    match s {
        Some(bytes) => {
            let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
            &bytes[..end]
        }
        None => NULL_TEXT,
    }
}

fn limit_to_precision<'s>(text: &'s [u8], spec: &FormatDirective) -> &'s [u8] {
    match spec.precision {
        Precision::Fixed(p) => &text[..text.len().min(p)],
        _ => text,
    }
}

fn int_base(conversion: u8) -> (u64, bool) {
    match conversion {
        b'o' => (8, false),
        b'x' => (16, false),
        b'X' => (16, true),
        _ => (10, false),
    }
}

/// Render `value` in the given `base` into the END of `buf`.
/// Returns the number of digits written. Digits are placed right-aligned.
fn render_digits(mut value: u64, base: u64, uppercase: bool, buf: &mut [u8; 64]) -> usize {
    if value == 0 {
        buf[63] = b'0';
        return 1;
    }
    let alpha = if uppercase { b'A' } else { b'a' };
    let mut pos = 64;
    while value > 0 && pos > 0 {
        pos -= 1;
        let digit = (value % base) as u8;
        buf[pos] = if digit < 10 {
            b'0' + digit
        } else {
            alpha + (digit - 10)
        };
        value /= base;
    }
    64 - pos
}
