//! Values accepted by [`Document::set`](crate::Document::set).
//!
//! A [`Scalar`] is anything that can be written as the text of a value token:
//! a string, an integer, a float or a boolean. Numbers are written as decimal
//! text; no quoting or escaping is applied.
//!
//! ## Examples
//!
//! ```rust
//! use kvedit::Scalar;
//!
//! assert_eq!(Scalar::from("hello").to_string(), "hello");
//! assert_eq!(Scalar::from(42).to_string(), "42");
//! assert_eq!(Scalar::from(-1.5).to_string(), "-1.5");
//! assert_eq!(Scalar::from(true).to_string(), "true");
//! ```

use std::fmt;

/// A value that can be stored in a document.
#[derive(Clone, Debug, PartialEq)]
pub enum Scalar {
    String(String),
    Number(Number),
    Bool(bool),
}

/// A numeric scalar.
///
/// # Examples
///
/// ```rust
/// use kvedit::Number;
///
/// assert_eq!(Number::Integer(7).to_string(), "7");
/// assert_eq!(Number::Unsigned(u64::MAX).to_string(), "18446744073709551615");
/// assert_eq!(Number::Float(2.0).to_string(), "2");
/// assert_eq!(Number::Float32(0.1).to_string(), "0.1");
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Number {
    Integer(i64),
    Unsigned(u64),
    Float(f64),
    /// Printed with `f32` precision.
    Float32(f32),
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{}", i),
            Number::Unsigned(u) => write!(f, "{}", u),
            Number::Float(x) => write!(f, "{}", x),
            Number::Float32(x) => write!(f, "{}", x),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::String(s) => f.write_str(s),
            Scalar::Number(n) => fmt::Display::fmt(n, f),
            Scalar::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::String(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::String(s)
    }
}

impl From<&String> for Scalar {
    fn from(s: &String) -> Self {
        Scalar::String(s.clone())
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Scalar::Bool(b)
    }
}

impl From<Number> for Scalar {
    fn from(n: Number) -> Self {
        Scalar::Number(n)
    }
}

macro_rules! impl_from_signed {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Scalar {
                fn from(n: $t) -> Self {
                    Scalar::Number(Number::Integer(n as i64))
                }
            }
        )*
    };
}

macro_rules! impl_from_unsigned {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Scalar {
                fn from(n: $t) -> Self {
                    Scalar::Number(Number::Unsigned(n as u64))
                }
            }
        )*
    };
}

impl_from_signed!(i8, i16, i32, i64, isize);
impl_from_unsigned!(u8, u16, u32, u64, usize);

impl From<f32> for Scalar {
    fn from(n: f32) -> Self {
        Scalar::Number(Number::Float32(n))
    }
}

impl From<f64> for Scalar {
    fn from(n: f64) -> Self {
        Scalar::Number(Number::Float(n))
    }
}
