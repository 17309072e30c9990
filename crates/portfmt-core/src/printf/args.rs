//! Typed arguments and the argument cursor.
//!
//! Callers materialize their arguments as [`FormatArg`] values before the
//! call. The cursor hands them out either in call order or by explicit
//! 1-based position; the two addressing modes keep separate state, so a
//! `%2$s` never moves the implicit counter and a `*` width always reads the
//! next implicit argument.

use crate::error::FormatError;
use crate::printf::directive::LengthMod;

// ---------------------------------------------------------------------------
// Format argument types
// ---------------------------------------------------------------------------

/// Typed argument value.
///
/// `Long` and `LongLong` are both 64 bits on every target; `Size` and
/// `SSize` follow the target's pointer width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormatArg<'a> {
    Int(i32),
    UInt(u32),
    Long(i64),
    ULong(u64),
    LongLong(i64),
    ULongLong(u64),
    Size(usize),
    SSize(isize),
    Double(f64),
    Pointer(usize),
    /// A string; `None` is a null pointer and prints `(null)`.
    Str(Option<&'a [u8]>),
    /// A byte buffer, for `%sB` or as a non-terminated `%s` argument.
    Bytes(&'a [u8]),
}

impl<'a> FormatArg<'a> {
    /// A pointer argument carrying the address of `ptr`.
    #[must_use]
    pub fn pointer<T: ?Sized>(ptr: *const T) -> Self {
        Self::Pointer(ptr.cast::<u8>() as usize)
    }

    /// A string argument.
    #[must_use]
    pub const fn text(s: &'a str) -> Self {
        Self::Str(Some(s.as_bytes()))
    }

    /// The null string.
    #[must_use]
    pub const fn null_str() -> Self {
        Self::Str(None)
    }

    /// Human-readable name of the variant, used in mismatch errors.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Int(_) => "int",
            Self::UInt(_) => "unsigned int",
            Self::Long(_) => "long",
            Self::ULong(_) => "unsigned long",
            Self::LongLong(_) => "long long",
            Self::ULongLong(_) => "unsigned long long",
            Self::Size(_) => "size_t",
            Self::SSize(_) => "ssize_t",
            Self::Double(_) => "double",
            Self::Pointer(_) => "pointer",
            Self::Str(_) => "string",
            Self::Bytes(_) => "byte buffer",
        }
    }
}

macro_rules! impl_from {
    ($($ty:ty => $variant:ident as $target:ty),* $(,)?) => {
        $(
            impl From<$ty> for FormatArg<'_> {
                fn from(v: $ty) -> Self {
                    Self::$variant(<$target>::from(v))
                }
            }
        )*
    };
}

impl_from! {
    i8 => Int as i32,
    i16 => Int as i32,
    i32 => Int as i32,
    u8 => UInt as u32,
    u16 => UInt as u32,
    u32 => UInt as u32,
    i64 => LongLong as i64,
    u64 => ULongLong as u64,
    usize => Size as usize,
    isize => SSize as isize,
    f32 => Double as f64,
    f64 => Double as f64,
}

impl<'a> From<&'a str> for FormatArg<'a> {
    fn from(s: &'a str) -> Self {
        Self::Str(Some(s.as_bytes()))
    }
}

impl<'a> From<Option<&'a str>> for FormatArg<'a> {
    fn from(s: Option<&'a str>) -> Self {
        Self::Str(s.map(str::as_bytes))
    }
}

impl<'a> From<&'a String> for FormatArg<'a> {
    fn from(s: &'a String) -> Self {
        Self::Str(Some(s.as_bytes()))
    }
}

impl<'a> From<&'a [u8]> for FormatArg<'a> {
    fn from(b: &'a [u8]) -> Self {
        Self::Bytes(b)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for FormatArg<'a> {
    fn from(b: &'a [u8; N]) -> Self {
        Self::Bytes(b)
    }
}

// ---------------------------------------------------------------------------
// Cursor
// ---------------------------------------------------------------------------

/// Read-only cursor over a call's arguments.
#[derive(Debug, Clone)]
pub struct ArgumentCursor<'a> {
    args: &'a [FormatArg<'a>],
    next: usize,
}

impl<'a> ArgumentCursor<'a> {
    #[must_use]
    pub const fn new(args: &'a [FormatArg<'a>]) -> Self {
        Self { args, next: 0 }
    }

    /// The next argument in call order, advancing the implicit counter.
    pub fn next_default_order(&mut self) -> Option<&'a FormatArg<'a>> {
        let arg = self.args.get(self.next)?;
        self.next += 1;
        Some(arg)
    }

    /// The argument at a 1-based position. Does not move the implicit counter.
    #[must_use]
    pub fn at(&self, positional_index: usize) -> Option<&'a FormatArg<'a>> {
        positional_index
            .checked_sub(1)
            .and_then(|i| self.args.get(i))
    }

    /// Number of supplied arguments.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.args.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// How many arguments the implicit counter has consumed.
    #[must_use]
    pub const fn consumed(&self) -> usize {
        self.next
    }

    /// Operand for a directive: positional when `positional_index` is set,
    /// otherwise the next implicit argument.
    pub fn operand(
        &mut self,
        positional_index: Option<usize>,
        offset: usize,
    ) -> Result<&'a FormatArg<'a>, FormatError> {
        match positional_index {
            Some(index) => self
                .at(index)
                .ok_or(FormatError::PositionalIndexOutOfRange {
                    offset,
                    index,
                    available: self.len(),
                }),
            None => self.next_implicit(offset),
        }
    }

    /// Next implicit argument, or `ArgumentsExhausted`.
    pub fn next_implicit(&mut self, offset: usize) -> Result<&'a FormatArg<'a>, FormatError> {
        let available = self.len();
        self.next_default_order()
            .ok_or(FormatError::ArgumentsExhausted { offset, available })
    }
}

// ---------------------------------------------------------------------------
// Binding
// ---------------------------------------------------------------------------
//
// Each binder checks the argument against the width class selected by the
// length modifier. Signed and unsigned variants of the same class are
// reinterpreted bitwise, like a C `va_arg` of the other signedness would.

fn mismatch(offset: usize, expected: &'static str, arg: &FormatArg<'_>) -> FormatError {
    FormatError::ArgumentTypeMismatch {
        offset,
        expected,
        found: arg.type_name(),
    }
}

const fn class_name(length: LengthMod) -> &'static str {
    match length {
        LengthMod::None => "int",
        LengthMod::L => "long",
        LengthMod::Ll => "long long",
        LengthMod::Z => "size_t",
    }
}

/// Bind a signed integer operand (`d`, `i`).
pub fn bind_signed(
    arg: &FormatArg<'_>,
    length: LengthMod,
    offset: usize,
) -> Result<i64, FormatError> {
    match (length, *arg) {
        (LengthMod::None, FormatArg::Int(v)) => Ok(i64::from(v)),
        (LengthMod::None, FormatArg::UInt(v)) => Ok(i64::from(v as i32)),
        (
            LengthMod::L | LengthMod::Ll,
            FormatArg::Long(v) | FormatArg::LongLong(v),
        ) => Ok(v),
        (
            LengthMod::L | LengthMod::Ll,
            FormatArg::ULong(v) | FormatArg::ULongLong(v),
        ) => Ok(v as i64),
        (LengthMod::Z, FormatArg::SSize(v)) => Ok(v as i64),
        (LengthMod::Z, FormatArg::Size(v)) => Ok(v as isize as i64),
        _ => Err(mismatch(offset, class_name(length), arg)),
    }
}

/// Bind an unsigned integer operand (`u`, `x`, `X`, `o`).
pub fn bind_unsigned(
    arg: &FormatArg<'_>,
    length: LengthMod,
    offset: usize,
) -> Result<u64, FormatError> {
    match (length, *arg) {
        (LengthMod::None, FormatArg::UInt(v)) => Ok(u64::from(v)),
        (LengthMod::None, FormatArg::Int(v)) => Ok(u64::from(v as u32)),
        (
            LengthMod::L | LengthMod::Ll,
            FormatArg::ULong(v) | FormatArg::ULongLong(v),
        ) => Ok(v),
        (
            LengthMod::L | LengthMod::Ll,
            FormatArg::Long(v) | FormatArg::LongLong(v),
        ) => Ok(v as u64),
        (LengthMod::Z, FormatArg::Size(v)) => Ok(v as u64),
        (LengthMod::Z, FormatArg::SSize(v)) => Ok(v as usize as u64),
        _ => Err(mismatch(offset, class_name(length), arg)),
    }
}

/// Bind a native `int` (for `c` and `*`).
pub fn bind_int(arg: &FormatArg<'_>, offset: usize) -> Result<i32, FormatError> {
    match *arg {
        FormatArg::Int(v) => Ok(v),
        FormatArg::UInt(v) => Ok(v as i32),
        _ => Err(mismatch(offset, "int", arg)),
    }
}

/// Bind a `double` (`f`, `g`).
pub fn bind_double(arg: &FormatArg<'_>, offset: usize) -> Result<f64, FormatError> {
    match *arg {
        FormatArg::Double(v) => Ok(v),
        _ => Err(mismatch(offset, "double", arg)),
    }
}

/// Bind a pointer-sized address (`p`).
pub fn bind_pointer(arg: &FormatArg<'_>, offset: usize) -> Result<u64, FormatError> {
    match *arg {
        FormatArg::Pointer(v) | FormatArg::Size(v) => Ok(v as u64),
        _ => Err(mismatch(offset, "pointer", arg)),
    }
}

/// Bind a string (`s`, `sQ`, `sT`, `sS`). `None` is the null string.
pub fn bind_text<'a>(
    arg: &FormatArg<'a>,
    offset: usize,
) -> Result<Option<&'a [u8]>, FormatError> {
    match *arg {
        FormatArg::Str(s) => Ok(s),
        FormatArg::Bytes(b) => Ok(Some(b)),
        _ => Err(mismatch(offset, "string", arg)),
    }
}
