//! Format driver.
//!
//! Walks the format string, copying literal runs and dispatching each
//! directive through the binder and renderer into a bounded sink.

use crate::config::{FallbackPolicy, fallback_policy};
use crate::error::FormatError;
use crate::printf::args::{
    ArgumentCursor, FormatArg, bind_double, bind_int, bind_pointer, bind_signed, bind_text,
    bind_unsigned,
};
use crate::printf::directive::{
    Extension, FormatDirective, FormatSegment, Precision, Width, parse_format_string,
};
use crate::printf::render;
use crate::printf::sink::{FieldSink, OutputSink};

/// Render `fmt` with `args` into `buf`.
///
/// `buf.len()` is the capacity. At most `capacity - 1` bytes are stored,
/// followed by a 0 terminator whenever `buf` is non-empty. Returns the
/// logical length: the number of bytes the untruncated output occupies,
/// which is also what a zero-length buffer measures.
///
/// On error the buffer is still terminated after whatever was already
/// written, but that content is not meaningful.
pub fn format_into(
    buf: &mut [u8],
    fmt: impl AsRef<[u8]>,
    args: &[FormatArg<'_>],
) -> Result<usize, FormatError> {
    format_into_with_cursor(buf, fmt, ArgumentCursor::new(args))
}

/// [`format_into`] over an already built [`ArgumentCursor`].
pub fn format_into_with_cursor(
    buf: &mut [u8],
    fmt: impl AsRef<[u8]>,
    mut cursor: ArgumentCursor<'_>,
) -> Result<usize, FormatError> {
    let mut sink = OutputSink::new(buf);
    let outcome = drive(fmt.as_ref(), &mut cursor, &mut sink);
    let len = sink.finish();
    outcome.map(|()| len)
}

/// Render into a freshly allocated vector (no terminator).
///
/// Measures with a zero-capacity pass, then renders into an exactly sized
/// buffer.
///
/// The allocation is the full logical length, so a saturated width or
/// precision fails here as any oversized allocation does. Use
/// [`format_into`] when the directives are not trusted.
pub fn format_to_vec(
    fmt: impl AsRef<[u8]>,
    args: &[FormatArg<'_>],
) -> Result<Vec<u8>, FormatError> {
    let fmt = fmt.as_ref();
    let len = format_into(&mut [], fmt, args)?;
    let mut out = vec![0u8; len.saturating_add(1)];
    format_into(&mut out, fmt, args)?;
    out.truncate(len);
    Ok(out)
}

/// Infallible variant of [`format_into`] governed by the process-wide
/// [`FallbackPolicy`] (`PORTFMT_ON_ERROR`).
pub fn format_lossy(buf: &mut [u8], fmt: impl AsRef<[u8]>, args: &[FormatArg<'_>]) -> usize {
    format_lossy_with_policy(buf, fmt, args, fallback_policy())
}

/// [`format_lossy`] with an explicit policy.
///
/// On a formatting error, `Fail` leaves an empty terminated buffer and
/// returns 0; `Raw` stores the format text itself (up to its first NUL) and
/// returns its length.
pub fn format_lossy_with_policy(
    buf: &mut [u8],
    fmt: impl AsRef<[u8]>,
    args: &[FormatArg<'_>],
    policy: FallbackPolicy,
) -> usize {
    let fmt = fmt.as_ref();
    match format_into(buf, fmt, args) {
        Ok(len) => len,
        Err(_) => {
            let mut sink = OutputSink::new(buf);
            if policy.emits_raw_format() {
                let end = fmt.iter().position(|&b| b == 0).unwrap_or(fmt.len());
                sink.put(&fmt[..end]);
            }
            sink.finish()
        }
    }
}

/// Walk `fmt`, rendering into any sink.
pub fn drive<S: FieldSink + ?Sized>(
    fmt: &[u8],
    cursor: &mut ArgumentCursor<'_>,
    sink: &mut S,
) -> Result<(), FormatError> {
    for segment in parse_format_string(fmt) {
        match segment? {
            FormatSegment::Literal(lit) => sink.put(lit),
            FormatSegment::Percent => sink.put_byte(b'%'),
            FormatSegment::Directive { offset, directive } => {
                render_directive(&directive, offset, cursor, sink)?;
            }
        }
    }
    Ok(())
}

/// Bind and render one directive.
///
/// `*` width and precision are read from the implicit order first, then
/// the operand. `offset` is the position of the directive's `%`, used in
/// errors.
pub fn render_directive<S: FieldSink + ?Sized>(
    directive: &FormatDirective,
    offset: usize,
    cursor: &mut ArgumentCursor<'_>,
    sink: &mut S,
) -> Result<(), FormatError> {
    directive.validate(offset)?;
    let spec = resolve_star_args(directive, offset, cursor)?;
    let arg = cursor.operand(spec.positional_index, offset)?;

    match (spec.conversion, spec.extension) {
        (b'd' | b'i', _) => {
            let value = bind_signed(arg, spec.length, offset)?;
            render::format_signed(value, &spec, sink);
        }
        (b'u', Some(Extension::Errno)) => {
            let value = bind_signed(arg, spec.length, offset)?;
            render::format_errno(value, &spec, sink);
        }
        (b'u' | b'x' | b'X' | b'o', _) => {
            let value = bind_unsigned(arg, spec.length, offset)?;
            render::format_unsigned(value, &spec, sink);
        }
        (b'p', _) => {
            let addr = bind_pointer(arg, offset)?;
            render::format_pointer(addr, &spec, sink);
        }
        (b'f' | b'g', _) => {
            let value = bind_double(arg, offset)?;
            render::format_float(value, &spec, sink);
        }
        (b'c', _) => {
            let value = bind_int(arg, offset)?;
            render::format_char(value as u8, &spec, sink);
        }
        (b's', Some(Extension::Binary)) => {
            let bytes = bind_binary(arg, &spec, offset)?;
            render::format_binary(bytes, &spec, sink);
        }
        (b's', Some(Extension::Quoted)) => {
            render::format_quoted(bind_text(arg, offset)?, &spec, sink);
        }
        (b's', Some(Extension::TruncatedString)) => {
            render::format_truncated(bind_text(arg, offset)?, &spec, sink);
        }
        _ => {
            render::format_str(bind_text(arg, offset)?, &spec, sink);
        }
    }
    Ok(())
}

/// Replace `*` width/precision with values read from the implicit order.
///
/// A negative width counts by magnitude; a negative precision is treated
/// as absent.
fn resolve_star_args(
    directive: &FormatDirective,
    offset: usize,
    cursor: &mut ArgumentCursor<'_>,
) -> Result<FormatDirective, FormatError> {
    let mut spec = directive.clone();
    if spec.width == Width::FromArg {
        let w = bind_int(cursor.next_implicit(offset)?, offset)?;
        spec.width = Width::Fixed(w.unsigned_abs() as usize);
    }
    if spec.precision == Precision::FromArg {
        let p = bind_int(cursor.next_implicit(offset)?, offset)?;
        spec.precision = match usize::try_from(p) {
            Ok(p) => Precision::Fixed(p),
            Err(_) => Precision::None,
        };
    }
    Ok(spec)
}

/// The first `precision` bytes of a `%sB` operand.
fn bind_binary<'a>(
    arg: &FormatArg<'a>,
    spec: &FormatDirective,
    offset: usize,
) -> Result<&'a [u8], FormatError> {
    let Precision::Fixed(needed) = spec.precision else {
        return Err(FormatError::MissingPrecisionForBinary { offset });
    };
    let bytes = bind_text(arg, offset)?.unwrap_or_default();
    bytes
        .get(..needed)
        .ok_or(FormatError::BinaryBufferTooShort {
            offset,
            needed,
            available: bytes.len(),
        })
}
