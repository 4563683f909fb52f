//! Dynamic values exchanged between config tree items, editors and inspectors.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// An RGB color, displayed and parsed as `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Creates a color from its red, green and blue components.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::TypeCoercion {
            value: format!("{s:?}"),
            expected: "color",
        };
        let hex = s.trim().strip_prefix('#').ok_or_else(invalid)?;
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(invalid());
        }
        let component = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| invalid())
        };
        Ok(Self::new(component(0..2)?, component(2..4)?, component(4..6)?))
    }
}

/// A dynamically typed config value.
///
/// Each config tree item stores a concrete type; `CtiValue` is what crosses
/// the boundary to editors, inspectors and persisted settings.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CtiValue {
    /// No value (group nodes).
    #[default]
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Color(Color),
}

impl CtiValue {
    /// Returns the boolean if this is a `Bool` value.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the integer if this is an `Int` value.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the value as a float for `Float` and `Int` values.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Returns the text if this is a `Text` value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the color if this is a `Color` value.
    #[must_use]
    pub fn as_color(&self) -> Option<Color> {
        match self {
            Self::Color(c) => Some(*c),
            _ => None,
        }
    }

    pub(crate) fn coercion_error(&self, expected: &'static str) -> Error {
        Error::TypeCoercion {
            value: format!("{self:?}"),
            expected,
        }
    }

    /// Coerces to a float: numbers, bools and numeric text are accepted.
    pub(crate) fn coerce_float(&self) -> Result<f64> {
        match self {
            Self::Float(f) => Ok(*f),
            Self::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
            Self::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| self.coercion_error("float")),
            _ => self.as_float().ok_or_else(|| self.coercion_error("float")),
        }
    }

    /// Coerces to an integer. Floats are truncated toward zero.
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub(crate) fn coerce_int(&self) -> Result<i64> {
        match self {
            Self::Int(i) => Ok(*i),
            Self::Bool(b) => Ok(i64::from(*b)),
            Self::Float(f) => {
                let truncated = f.trunc();
                if truncated.is_finite()
                    && truncated >= i64::MIN as f64
                    && truncated <= i64::MAX as f64
                {
                    Ok(truncated as i64)
                } else {
                    Err(self.coercion_error("integer"))
                }
            }
            Self::Text(s) => s
                .trim()
                .parse::<i64>()
                .map_err(|_| self.coercion_error("integer")),
            _ => Err(self.coercion_error("integer")),
        }
    }

    pub(crate) fn coerce_bool(&self) -> Result<bool> {
        match self {
            Self::Bool(b) => Ok(*b),
            Self::Int(i) => Ok(*i != 0),
            Self::Float(f) => Ok(*f != 0.0),
            Self::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" => Ok(true),
                "false" | "0" | "no" => Ok(false),
                _ => Err(self.coercion_error("bool")),
            },
            _ => Err(self.coercion_error("bool")),
        }
    }

    pub(crate) fn coerce_color(&self) -> Result<Color> {
        match self {
            Self::Color(c) => Ok(*c),
            Self::Text(s) => s.parse(),
            _ => Err(self.coercion_error("color")),
        }
    }
}

impl fmt::Display for CtiValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => Ok(()),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Text(s) => f.write_str(s),
            Self::Color(c) => write!(f, "{c}"),
        }
    }
}

impl From<bool> for CtiValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for CtiValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for CtiValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<usize> for CtiValue {
    fn from(value: usize) -> Self {
        Self::Int(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<f64> for CtiValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for CtiValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for CtiValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Color> for CtiValue {
    fn from(value: Color) -> Self {
        Self::Color(value)
    }
}
