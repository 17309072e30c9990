//! Directive scanner.
//!
//! Grammar of one directive, after the introducing `%`:
//!
//! ```text
//! [n$] [flags] [width] [.precision] [length] conversion [ext]
//! ```
//!
//! Flags are `0` (zero padding) and `-`, which is accepted but has no
//! effect: output is always right-aligned. Width and precision are decimal
//! literals or `*`. Length modifiers are `l`, `ll` and `z`. Extension
//! suffixes are consumed only after `s` (`Q B T S`) and `u` (`E U`); any
//! other byte following a conversion is literal text.

use crate::error::{FormatError, MalformedReason};

// ---------------------------------------------------------------------------
// Directive types
// ---------------------------------------------------------------------------

/// Flags parsed from a directive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectiveFlags {
    pub zero_pad: bool, // '0'
    /// `-` was present. Recorded for diagnostics only; never left-justifies.
    pub left_justify_ignored: bool,
}

/// Width specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Width {
    None,
    Fixed(usize),
    FromArg, // '*'
}

/// Precision specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precision {
    None,
    Fixed(usize),
    FromArg, // '.*'
}

/// Length modifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LengthMod {
    #[default]
    None,
    L,  // 'l'
    Ll, // 'll'
    Z,  // 'z'
}

/// Two-character conversion extensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extension {
    /// `sQ`: backtick-quoted identifier.
    Quoted,
    /// `sB`: exactly `precision` raw bytes.
    Binary,
    /// `uE`: errno value plus quoted message.
    Errno,
    /// `sT`: cut at `precision` and mark with `...`.
    TruncatedString,
    /// `sS`: plain `s`, stops suffix scanning.
    EscapedString,
    /// `uU`: plain `u`, stops suffix scanning.
    EscapedUnsigned,
}

impl Extension {
    /// Extension selected by `suffix` after `conversion`, if any.
    #[must_use]
    pub const fn from_suffix(conversion: u8, suffix: u8) -> Option<Self> {
        match (conversion, suffix) {
            (b's', b'Q') => Some(Self::Quoted),
            (b's', b'B') => Some(Self::Binary),
            (b's', b'T') => Some(Self::TruncatedString),
            (b's', b'S') => Some(Self::EscapedString),
            (b'u', b'E') => Some(Self::Errno),
            (b'u', b'U') => Some(Self::EscapedUnsigned),
            _ => None,
        }
    }

    /// The conversion this extension belongs to.
    #[must_use]
    pub const fn conversion(self) -> u8 {
        match self {
            Self::Quoted | Self::Binary | Self::TruncatedString | Self::EscapedString => b's',
            Self::Errno | Self::EscapedUnsigned => b'u',
        }
    }

    /// The suffix character that selects this extension.
    #[must_use]
    pub const fn suffix(self) -> u8 {
        match self {
            Self::Quoted => b'Q',
            Self::Binary => b'B',
            Self::Errno => b'E',
            Self::TruncatedString => b'T',
            Self::EscapedString => b'S',
            Self::EscapedUnsigned => b'U',
        }
    }
}

/// A scanned directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatDirective {
    /// 1-based argument index from `n$`.
    pub positional_index: Option<usize>,
    pub flags: DirectiveFlags,
    pub width: Width,
    pub precision: Precision,
    pub length: LengthMod,
    pub conversion: u8,
    pub extension: Option<Extension>,
}

impl FormatDirective {
    /// A bare directive for `conversion` with every optional field absent.
    #[must_use]
    pub const fn new(conversion: u8) -> Self {
        Self {
            positional_index: None,
            flags: DirectiveFlags {
                zero_pad: false,
                left_justify_ignored: false,
            },
            width: Width::None,
            precision: Precision::None,
            length: LengthMod::None,
            conversion,
            extension: None,
        }
    }

    /// Check the conversion and extension pairing.
    ///
    /// The scanner only produces valid directives; this guards directives
    /// assembled by hand before they reach the renderer.
    pub fn validate(&self, offset: usize) -> Result<(), FormatError> {
        if !is_conversion(self.conversion) {
            return Err(FormatError::MalformedDirective {
                offset,
                reason: MalformedReason::UnknownConversion(self.conversion),
            });
        }
        if self.positional_index == Some(0) {
            return Err(FormatError::MalformedDirective {
                offset,
                reason: MalformedReason::ZeroPositionalIndex,
            });
        }
        match self.extension {
            Some(ext) if ext.conversion() != self.conversion => {
                Err(FormatError::MalformedDirective {
                    offset,
                    reason: MalformedReason::ExtensionMismatch {
                        conversion: self.conversion,
                        suffix: ext.suffix(),
                    },
                })
            }
            _ => Ok(()),
        }
    }

    /// True for conversions that honor zero padding.
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(
            self.conversion,
            b'd' | b'i' | b'u' | b'x' | b'X' | b'o' | b'p' | b'f' | b'g'
        )
    }
}

/// Conversion characters in the dialect.
#[must_use]
pub const fn is_conversion(c: u8) -> bool {
    matches!(
        c,
        b's' | b'c' | b'd' | b'i' | b'u' | b'x' | b'X' | b'o' | b'p' | b'f' | b'g'
    )
}

// ---------------------------------------------------------------------------
// Segment: parsed pieces of a format string
// ---------------------------------------------------------------------------

/// A segment of a format string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatSegment<'a> {
    /// Literal bytes to emit verbatim.
    Literal(&'a [u8]),
    /// A `%%` escape (emit a single '%').
    Percent,
    /// A directive; `offset` is the position of its `%`.
    Directive {
        offset: usize,
        directive: FormatDirective,
    },
}

/// Iterator over the segments of a format string.
///
/// Yields at most one error, then stops.
#[derive(Debug, Clone)]
pub struct FormatSegments<'a> {
    fmt: &'a [u8],
    pos: usize,
    failed: bool,
}

impl<'a> Iterator for FormatSegments<'a> {
    type Item = Result<FormatSegment<'a>, FormatError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.pos >= self.fmt.len() {
            return None;
        }
        let rest = &self.fmt[self.pos..];
        let literal_len = rest.iter().position(|&b| b == b'%').unwrap_or(rest.len());
        if literal_len > 0 {
            self.pos += literal_len;
            return Some(Ok(FormatSegment::Literal(&rest[..literal_len])));
        }

        let offset = self.pos;
        if rest.get(1) == Some(&b'%') {
            self.pos += 2;
            return Some(Ok(FormatSegment::Percent));
        }
        match scan_directive(&rest[1..], offset) {
            Ok((directive, consumed)) => {
                self.pos += 1 + consumed;
                Some(Ok(FormatSegment::Directive { offset, directive }))
            }
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}

impl core::iter::FusedIterator for FormatSegments<'_> {}

/// Split a format string into literal runs, `%%` escapes and directives.
///
/// The format ends at the slice end or at the first NUL byte, whichever
/// comes first.
#[must_use]
pub fn parse_format_string(fmt: &[u8]) -> FormatSegments<'_> {
    let end = fmt.iter().position(|&b| b == 0).unwrap_or(fmt.len());
    FormatSegments {
        fmt: &fmt[..end],
        pos: 0,
        failed: false,
    }
}

// ---------------------------------------------------------------------------
// Scanner
// ---------------------------------------------------------------------------

/// Scan a single directive starting after the '%' character.
///
/// `fmt` begins at the first byte AFTER '%' and `offset` is the position of
/// that '%' in the whole format (used for error reporting). Returns
/// `(directive, bytes_consumed)` where `bytes_consumed` counts from `fmt[0]`.
pub fn scan_directive(fmt: &[u8], offset: usize) -> Result<(FormatDirective, usize), FormatError> {
    let malformed = |reason| FormatError::MalformedDirective { offset, reason };
    let mut pos = 0;

    // --- positional index ---
    let digits = count_digits(fmt);
    let positional_index = if digits > 0 && fmt.get(digits) == Some(&b'$') {
        let index = parse_decimal(&fmt[..digits]);
        if index == 0 {
            return Err(malformed(MalformedReason::ZeroPositionalIndex));
        }
        pos = digits + 1;
        Some(index)
    } else {
        None
    };

    // --- flags ---
    let mut flags = DirectiveFlags::default();
    while let Some(&b) = fmt.get(pos) {
        match b {
            b'0' => flags.zero_pad = true,
            b'-' => flags.left_justify_ignored = true,
            _ => break,
        }
        pos += 1;
    }

    // --- width ---
    let width = if fmt.get(pos) == Some(&b'*') {
        pos += 1;
        Width::FromArg
    } else {
        let n = count_digits(&fmt[pos..]);
        if n > 0 {
            let w = parse_decimal(&fmt[pos..pos + n]);
            pos += n;
            Width::Fixed(w)
        } else {
            Width::None
        }
    };

    // --- precision ---
    let precision = if fmt.get(pos) == Some(&b'.') {
        pos += 1;
        if fmt.get(pos) == Some(&b'*') {
            pos += 1;
            Precision::FromArg
        } else {
            let n = count_digits(&fmt[pos..]);
            let p = parse_decimal(&fmt[pos..pos + n]);
            pos += n;
            Precision::Fixed(p)
        }
    } else {
        Precision::None
    };

    // --- length modifier ---
    let length = match fmt.get(pos) {
        Some(b'l') => {
            pos += 1;
            if fmt.get(pos) == Some(&b'l') {
                pos += 1;
                LengthMod::Ll
            } else {
                LengthMod::L
            }
        }
        Some(b'z') => {
            pos += 1;
            LengthMod::Z
        }
        _ => LengthMod::None,
    };

    // --- conversion ---
    let Some(&conversion) = fmt.get(pos) else {
        return Err(malformed(MalformedReason::UnexpectedEnd));
    };
    if !is_conversion(conversion) {
        return Err(malformed(MalformedReason::UnknownConversion(conversion)));
    }
    pos += 1;

    // --- extension suffix ---
    let extension = fmt
        .get(pos)
        .and_then(|&suffix| Extension::from_suffix(conversion, suffix));
    if extension.is_some() {
        pos += 1;
    }

    Ok((
        FormatDirective {
            positional_index,
            flags,
            width,
            precision,
            length,
            conversion,
            extension,
        },
        pos,
    ))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

fn parse_decimal(digits: &[u8]) -> usize {
    let mut result = 0_usize;
    for &d in digits {
        result = result
            .saturating_mul(10)
            .saturating_add(usize::from(d - b'0'));
    }
    result
}
