//! Conversion between raw environment strings and typed values.
//!
//! Statically typed callers go through [`PropertyValue`]; callers that only
//! know the target type at runtime (e.g. declarations loaded from JSON) go
//! through [`convert_value`].

use crate::error::ConversionError;
use std::fmt;
use std::str::FromStr;
use url::Url;

/// A type that can be stored in the environment as a string.
pub trait PropertyValue: Clone + PartialEq + fmt::Debug {
    /// Human-readable type name used in conversion errors.
    const TYPE_NAME: &'static str;

    /// Parse a raw environment value.
    ///
    /// `Ok(None)` means the text names no value of this type (only
    /// enumerations produce it); `Err` means the text is malformed.
    fn parse_value(raw: &str) -> Result<Option<Self>, ConversionError>;

    /// Canonical string form written back to the environment.
    fn to_property_string(&self) -> String;
}

fn invalid(type_name: &'static str, raw: &str, reason: impl fmt::Display) -> ConversionError {
    ConversionError::InvalidValue {
        type_name,
        value: raw.to_string(),
        reason: reason.to_string(),
    }
}

impl PropertyValue for String {
    const TYPE_NAME: &'static str = "string";

    fn parse_value(raw: &str) -> Result<Option<Self>, ConversionError> {
        Ok(Some(raw.to_string()))
    }

    fn to_property_string(&self) -> String {
        self.clone()
    }
}

impl PropertyValue for bool {
    const TYPE_NAME: &'static str = "bool";

    fn parse_value(raw: &str) -> Result<Option<Self>, ConversionError> {
        if raw.eq_ignore_ascii_case("true") {
            Ok(Some(true))
        } else if raw.eq_ignore_ascii_case("false") {
            Ok(Some(false))
        } else {
            Err(invalid(Self::TYPE_NAME, raw, "expected 'true' or 'false'"))
        }
    }

    fn to_property_string(&self) -> String {
        self.to_string()
    }
}

macro_rules! numeric_property_value {
    ($($ty:ty => $name:literal),* $(,)?) => {
        $(
            impl PropertyValue for $ty {
                const TYPE_NAME: &'static str = $name;

                fn parse_value(raw: &str) -> Result<Option<Self>, ConversionError> {
                    raw.parse::<$ty>()
                        .map(Some)
                        .map_err(|e| invalid(Self::TYPE_NAME, raw, e))
                }

                fn to_property_string(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

numeric_property_value! {
    i8 => "byte",
    i16 => "short",
    i32 => "integer",
    i64 => "long",
    f32 => "float",
    f64 => "double",
}

impl PropertyValue for Url {
    const TYPE_NAME: &'static str = "url";

    fn parse_value(raw: &str) -> Result<Option<Self>, ConversionError> {
        Url::parse(raw)
            .map(Some)
            .map_err(|e| ConversionError::InvalidUrl {
                value: raw.to_string(),
                reason: e.to_string(),
            })
    }

    fn to_property_string(&self) -> String {
        self.to_string()
    }
}

/// Implement [`PropertyValue`] for an enumeration.
///
/// The type must implement `FromStr` (matching exact constant names) and
/// `Display` (producing them), which is what `strum::EnumString` and
/// `strum::Display` derive. Unknown names resolve to `None`.
///
/// ```rust
/// use prop_core::{property_enum, PropertyValue};
/// use std::fmt;
/// use std::str::FromStr;
///
/// #[derive(Debug, Clone, Copy, PartialEq)]
/// enum Browser { Chrome, Opera }
///
/// impl FromStr for Browser {
///     type Err = ();
///     fn from_str(s: &str) -> Result<Self, ()> {
///         match s {
///             "Chrome" => Ok(Self::Chrome),
///             "Opera" => Ok(Self::Opera),
///             _ => Err(()),
///         }
///     }
/// }
///
/// impl fmt::Display for Browser {
///     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
///         write!(f, "{:?}", self)
///     }
/// }
///
/// property_enum!(Browser);
///
/// assert_eq!(Browser::parse_value("Opera").ok().flatten(), Some(Browser::Opera));
/// assert_eq!(Browser::parse_value("Safari").ok().flatten(), None);
/// ```
#[macro_export]
macro_rules! property_enum {
    ($ty:ty) => {
        impl $crate::PropertyValue for $ty {
            const TYPE_NAME: &'static str = stringify!($ty);

            fn parse_value(raw: &str) -> Result<Option<Self>, $crate::ConversionError> {
                Ok(<$ty as ::std::str::FromStr>::from_str(raw).ok())
            }

            fn to_property_string(&self) -> String {
                self.to_string()
            }
        }
    };
}

/// Value types known to the dynamic conversion path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    String,
    Bool,
    Byte,
    Short,
    Integer,
    Long,
    Float,
    Double,
    Url,
}

impl FromStr for ValueType {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "string" | "str" => Ok(Self::String),
            "bool" | "boolean" => Ok(Self::Bool),
            "byte" | "i8" => Ok(Self::Byte),
            "short" | "i16" => Ok(Self::Short),
            "int" | "integer" | "i32" => Ok(Self::Integer),
            "long" | "i64" => Ok(Self::Long),
            "float" | "f32" => Ok(Self::Float),
            "double" | "f64" => Ok(Self::Double),
            "url" => Ok(Self::Url),
            _ => Err(ConversionError::UnsupportedType(s.to_string())),
        }
    }
}

/// A value produced by [`convert_value`].
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    String(String),
    Bool(bool),
    Byte(i8),
    Short(i16),
    Integer(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Url(Url),
}

impl TypedValue {
    /// The type this value belongs to.
    #[must_use]
    pub fn value_type(&self) -> ValueType {
        match self {
            Self::String(_) => ValueType::String,
            Self::Bool(_) => ValueType::Bool,
            Self::Byte(_) => ValueType::Byte,
            Self::Short(_) => ValueType::Short,
            Self::Integer(_) => ValueType::Integer,
            Self::Long(_) => ValueType::Long,
            Self::Float(_) => ValueType::Float,
            Self::Double(_) => ValueType::Double,
            Self::Url(_) => ValueType::Url,
        }
    }
}

impl fmt::Display for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Byte(v) => write!(f, "{v}"),
            Self::Short(v) => write!(f, "{v}"),
            Self::Integer(v) => write!(f, "{v}"),
            Self::Long(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Double(v) => write!(f, "{v}"),
            Self::Url(v) => write!(f, "{v}"),
        }
    }
}

fn required<T: PropertyValue>(raw: &str) -> Result<T, ConversionError> {
    T::parse_value(raw)?.ok_or_else(|| invalid(T::TYPE_NAME, raw, "no such value"))
}

/// Convert `raw` to the type named by `type_name`.
///
/// Unknown type names fail with [`ConversionError::UnsupportedType`].
pub fn convert_value(type_name: &str, raw: &str) -> Result<TypedValue, ConversionError> {
    let value = match type_name.parse::<ValueType>()? {
        ValueType::String => TypedValue::String(raw.to_string()),
        ValueType::Bool => TypedValue::Bool(required(raw)?),
        ValueType::Byte => TypedValue::Byte(required(raw)?),
        ValueType::Short => TypedValue::Short(required(raw)?),
        ValueType::Integer => TypedValue::Integer(required(raw)?),
        ValueType::Long => TypedValue::Long(required(raw)?),
        ValueType::Float => TypedValue::Float(required(raw)?),
        ValueType::Double => TypedValue::Double(required(raw)?),
        ValueType::Url => TypedValue::Url(required(raw)?),
    };
    Ok(value)
}
