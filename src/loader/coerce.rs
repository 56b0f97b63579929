//! Type coercion table.
//!
//! Maps every supported scalar [`Kind`] to a parser that turns a raw
//! environment string into a [`Parsed`] value of that kind's canonical width.
//! Declared field types then take the parsed value through [`Scalar`].

use std::num::{ParseFloatError, ParseIntError};
use std::str::FromStr;

/// Scalar kinds with a registered parser.
///
/// `Isize` and `Usize` are range checked against 32 bits, whatever the
/// platform's pointer width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Bool,
    Str,
    Isize,
    I8,
    I16,
    I32,
    I64,
    Usize,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
}

/// A successfully parsed raw value, tagged with its kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Parsed {
    Bool(bool),
    Str(String),
    Isize(isize),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    Usize(usize),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
}

/// Failure of a single parser in the table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoercionError {
    #[error("`{0}` is not a boolean")]
    Bool(String),

    #[error("`{input}` is not a valid integer: {source}")]
    Int {
        input: String,
        #[source]
        source: ParseIntError,
    },

    #[error("`{input}` is not a valid float: {source}")]
    Float {
        input: String,
        #[source]
        source: ParseFloatError,
    },

    #[error("`{0}` is not a valid unsigned integer: sign not allowed")]
    Sign(String),

    #[error("`{0}` is out of float range")]
    FloatRange(String),
}

impl Kind {
    /// Parse `raw` with this kind's parser.
    ///
    /// # Errors
    ///
    /// Returns a [`CoercionError`] when `raw` is not valid for the kind, for
    /// example a non-numeric or out-of-range integer.
    pub fn parse(self, raw: &str) -> Result<Parsed, CoercionError> {
        Ok(match self {
            Kind::Bool => Parsed::Bool(parse_bool(raw)?),
            Kind::Str => Parsed::Str(raw.to_owned()),
            Kind::Isize => Parsed::Isize(parse_int::<i32>(raw)? as isize),
            Kind::I8 => Parsed::I8(parse_int(raw)?),
            Kind::I16 => Parsed::I16(parse_int(raw)?),
            Kind::I32 => Parsed::I32(parse_int(raw)?),
            Kind::I64 => Parsed::I64(parse_int(raw)?),
            Kind::Usize => Parsed::Usize(parse_uint::<u32>(raw)? as usize),
            Kind::U8 => Parsed::U8(parse_uint(raw)?),
            Kind::U16 => Parsed::U16(parse_uint(raw)?),
            Kind::U32 => Parsed::U32(parse_uint(raw)?),
            Kind::U64 => Parsed::U64(parse_uint(raw)?),
            Kind::F32 => Parsed::F32(parse_float(raw)?),
            Kind::F64 => Parsed::F64(parse_float(raw)?),
        })
    }
}

/// Accepts the conventional boolean tokens: `1 t T TRUE true True` and
/// `0 f F FALSE false False`.
fn parse_bool(raw: &str) -> Result<bool, CoercionError> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(CoercionError::Bool(raw.to_owned())),
    }
}

fn parse_int<T>(raw: &str) -> Result<T, CoercionError>
where
    T: FromStr<Err = ParseIntError>,
{
    raw.parse().map_err(|source| CoercionError::Int {
        input: raw.to_owned(),
        source,
    })
}

/// Unsigned values take no sign at all, not even `+`.
fn parse_uint<T>(raw: &str) -> Result<T, CoercionError>
where
    T: FromStr<Err = ParseIntError>,
{
    if raw.starts_with('+') {
        return Err(CoercionError::Sign(raw.to_owned()));
    }
    parse_int(raw)
}

/// Overflow to infinity is a range error; only spelled-out infinities parse
/// as infinite.
fn parse_float<T>(raw: &str) -> Result<T, CoercionError>
where
    T: FromStr<Err = ParseFloatError> + Copy + Into<f64>,
{
    let value: T = raw.parse().map_err(|source| CoercionError::Float {
        input: raw.to_owned(),
        source,
    })?;

    if value.into().is_infinite() && !is_infinity(raw) {
        return Err(CoercionError::FloatRange(raw.to_owned()));
    }
    Ok(value)
}

fn is_infinity(raw: &str) -> bool {
    let unsigned = raw.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(raw);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

/// A type that can be assigned from a value of the coercion table.
///
/// Implemented for every primitive in [`Kind`]. Newtypes over a primitive
/// get an implementation from [`crate::scalar_newtype!`].
pub trait Scalar: Sized {
    /// The parser used for this type.
    const KIND: Kind;

    /// Convert a parsed value to this exact type.
    ///
    /// Returns `None` when `value` was produced by a different kind.
    fn from_parsed(value: Parsed) -> Option<Self>;
}

macro_rules! scalar {
    ($($ty:ty => $kind:ident),* $(,)?) => {$(
        impl Scalar for $ty {
            const KIND: Kind = Kind::$kind;

            fn from_parsed(value: Parsed) -> Option<Self> {
                match value {
                    Parsed::$kind(v) => Some(v),
                    _ => None,
                }
            }
        }
    )*};
}

scalar! {
    bool => Bool,
    String => Str,
    isize => Isize,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    usize => Usize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    f32 => F32,
    f64 => F64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bool_accepts_conventional_tokens() {
        for raw in ["1", "t", "T", "TRUE", "true", "True"] {
            assert_eq!(Kind::Bool.parse(raw), Ok(Parsed::Bool(true)), "{raw}");
        }
        for raw in ["0", "f", "F", "FALSE", "false", "False"] {
            assert_eq!(Kind::Bool.parse(raw), Ok(Parsed::Bool(false)), "{raw}");
        }
    }

    #[test]
    fn bool_rejects_other_tokens() {
        for raw in ["", "yes", "no", "tRuE", "2"] {
            assert_eq!(
                Kind::Bool.parse(raw),
                Err(CoercionError::Bool(raw.to_owned()))
            );
        }
    }

    #[test]
    fn string_is_identity() {
        assert_eq!(
            Kind::Str.parse(" a=b "),
            Ok(Parsed::Str(" a=b ".to_owned()))
        );
        assert_eq!(Kind::Str.parse(""), Ok(Parsed::Str(String::new())));
    }

    #[test]
    fn integers_are_range_checked() {
        assert_eq!(Kind::I8.parse("-128"), Ok(Parsed::I8(-128)));
        assert!(Kind::I8.parse("128").is_err());
        assert!(Kind::U8.parse("256").is_err());
        assert!(Kind::U16.parse("-1").is_err());
        assert_eq!(
            Kind::I64.parse("9223372036854775807"),
            Ok(Parsed::I64(i64::MAX))
        );
        assert_eq!(Kind::I64.parse("+42"), Ok(Parsed::I64(42)));
    }

    #[test]
    fn pointer_sized_integers_use_32_bit_range() {
        assert_eq!(
            Kind::Isize.parse("-2147483648"),
            Ok(Parsed::Isize(-2147483648))
        );
        assert!(Kind::Isize.parse("2147483648").is_err());
        assert_eq!(
            Kind::Usize.parse("4294967295"),
            Ok(Parsed::Usize(4294967295))
        );
        assert!(Kind::Usize.parse("4294967296").is_err());
    }

    #[test]
    fn integers_reject_non_numeric_input() {
        let err = Kind::I32.parse("12a").unwrap_err();
        assert!(matches!(err, CoercionError::Int { ref input, .. } if input == "12a"));
        assert!(Kind::I32.parse("").is_err());
        assert!(Kind::I32.parse(" 1").is_err());
    }

    #[test]
    fn floats_accept_decimal_and_exponent_notation() {
        assert_eq!(Kind::F64.parse("1.5"), Ok(Parsed::F64(1.5)));
        assert_eq!(Kind::F64.parse("-2.5e3"), Ok(Parsed::F64(-2500.0)));
        assert_eq!(Kind::F32.parse("0.25"), Ok(Parsed::F32(0.25)));
        assert!(matches!(
            Kind::F64.parse("1.2.3"),
            Err(CoercionError::Float { .. })
        ));
    }

    #[test]
    fn unsigned_integers_reject_any_sign() {
        for kind in [Kind::U8, Kind::U16, Kind::U32, Kind::U64, Kind::Usize] {
            assert_eq!(
                kind.parse("+42"),
                Err(CoercionError::Sign("+42".to_owned()))
            );
            assert!(kind.parse("-1").is_err());
        }
    }

    #[test]
    fn floats_reject_overflow() {
        assert_eq!(
            Kind::F32.parse("1e40"),
            Err(CoercionError::FloatRange("1e40".to_owned()))
        );
        assert_eq!(
            Kind::F64.parse("-1e400"),
            Err(CoercionError::FloatRange("-1e400".to_owned()))
        );
        assert!(matches!(Kind::F32.parse("3e38"), Ok(Parsed::F32(_))));
    }

    #[test]
    fn floats_accept_spelled_out_infinity() {
        assert_eq!(Kind::F64.parse("inf"), Ok(Parsed::F64(f64::INFINITY)));
        assert_eq!(
            Kind::F64.parse("-Infinity"),
            Ok(Parsed::F64(f64::NEG_INFINITY))
        );
        assert_eq!(Kind::F32.parse("+INF"), Ok(Parsed::F32(f32::INFINITY)));
    }

    #[test]
    fn from_parsed_rejects_other_kinds() {
        assert_eq!(u8::from_parsed(Parsed::U8(7)), Some(7));
        assert_eq!(u8::from_parsed(Parsed::U16(7)), None);
        assert_eq!(String::from_parsed(Parsed::Bool(true)), None);
    }
}
