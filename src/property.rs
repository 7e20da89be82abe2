use crate::statics;
use serde::Deserialize;
use std::fmt;

/// Declared value type of a schema property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    String,
    Bool,
    Int,
    Float,
}

impl PropertyType {
    pub const ALL: [PropertyType; 4] = [
        PropertyType::String,
        PropertyType::Bool,
        PropertyType::Int,
        PropertyType::Float,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            PropertyType::String => statics::TYPE_STRING,
            PropertyType::Bool => statics::TYPE_BOOL,
            PropertyType::Int => statics::TYPE_INT,
            PropertyType::Float => statics::TYPE_FLOAT,
        }
    }

    /// The value a tile holds for this type before anyone edits it.
    pub fn zero_value(self) -> PropertyValue {
        match self {
            PropertyType::String => PropertyValue::String(String::new()),
            PropertyType::Bool => PropertyValue::Bool(false),
            PropertyType::Int => PropertyValue::Int(0),
            PropertyType::Float => PropertyValue::Float(0.0),
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A typed property value stored on a tile. The variant is the value's type.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    String(String),
    Bool(bool),
    Int(i64),
    Float(f64),
}

impl PropertyValue {
    pub fn property_type(&self) -> PropertyType {
        match self {
            PropertyValue::String(_) => PropertyType::String,
            PropertyValue::Bool(_) => PropertyType::Bool,
            PropertyValue::Int(_) => PropertyType::Int,
            PropertyValue::Float(_) => PropertyType::Float,
        }
    }

    pub fn is_default(&self) -> bool {
        match self {
            PropertyValue::String(s) => s.is_empty(),
            PropertyValue::Bool(b) => !*b,
            PropertyValue::Int(v) => *v == 0,
            PropertyValue::Float(v) => *v == 0.0,
        }
    }

    /// Convert to `ty`, keeping as much of the value as the target can hold.
    /// A value already of type `ty` comes back unchanged.
    pub fn coerce_to(&self, ty: PropertyType) -> PropertyValue {
        if self.property_type() == ty {
            return self.clone();
        }
        match ty {
            PropertyType::String => PropertyValue::String(self.to_string()),
            PropertyType::Bool => PropertyValue::Bool(self.coerce_to_bool()),
            PropertyType::Int => PropertyValue::Int(self.coerce_to_int()),
            PropertyType::Float => PropertyValue::Float(self.coerce_to_float()),
        }
    }

    fn coerce_to_bool(&self) -> bool {
        match self {
            PropertyValue::Bool(b) => *b,
            PropertyValue::Int(v) => *v != 0,
            PropertyValue::Float(v) => *v != 0.0,
            PropertyValue::String(s) => {
                let t = s.trim().to_ascii_lowercase();
                matches!(t.as_str(), "true" | "1" | "yes" | "y")
            }
        }
    }

    fn coerce_to_int(&self) -> i64 {
        match self {
            PropertyValue::Int(v) => *v,
            PropertyValue::Float(v) => {
                if v.is_finite() {
                    *v as i64
                } else {
                    0
                }
            }
            PropertyValue::Bool(b) => i64::from(*b),
            PropertyValue::String(s) => s.trim().parse::<i64>().unwrap_or(0),
        }
    }

    fn coerce_to_float(&self) -> f64 {
        match self {
            PropertyValue::Float(v) => *v,
            PropertyValue::Int(v) => *v as f64,
            PropertyValue::Bool(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            PropertyValue::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::String(s) => f.write_str(s),
            PropertyValue::Bool(b) => write!(f, "{b}"),
            PropertyValue::Int(v) => write!(f, "{v}"),
            PropertyValue::Float(v) if v.is_finite() => {
                let mut buf = ryu::Buffer::new();
                f.write_str(buf.format_finite(*v))
            }
            PropertyValue::Float(v) => write!(f, "{v}"),
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(v: &str) -> Self {
        PropertyValue::String(v.to_owned())
    }
}

impl From<String> for PropertyValue {
    fn from(v: String) -> Self {
        PropertyValue::String(v)
    }
}

impl From<bool> for PropertyValue {
    fn from(v: bool) -> Self {
        PropertyValue::Bool(v)
    }
}

impl From<i64> for PropertyValue {
    fn from(v: i64) -> Self {
        PropertyValue::Int(v)
    }
}

impl From<f64> for PropertyValue {
    fn from(v: f64) -> Self {
        PropertyValue::Float(v)
    }
}

#[cfg(test)]
mod tests {
    use super::{PropertyType, PropertyValue};

    #[test]
    fn type_tags_read_from_json() {
        for ty in PropertyType::ALL {
            let json = format!("\"{}\"", ty.tag());
            assert_eq!(serde_json::from_str::<PropertyType>(&json).unwrap(), ty);
            assert_eq!(ty.to_string(), ty.tag());
        }
        assert!(serde_json::from_str::<PropertyType>("\"vector2\"").is_err());
        assert!(serde_json::from_str::<PropertyType>("\"Int\"").is_err());
    }

    #[test]
    fn zero_values_are_default() {
        for ty in PropertyType::ALL {
            let zero = ty.zero_value();
            assert!(zero.is_default());
            assert_eq!(zero.property_type(), ty);
        }
        assert!(!PropertyValue::from("x").is_default());
        assert!(!PropertyValue::from(true).is_default());
        assert!(!PropertyValue::from(-1_i64).is_default());
        assert!(!PropertyValue::from(0.5).is_default());
    }

    #[test]
    fn coercion_between_types() {
        let five = PropertyValue::Int(5);
        assert_eq!(five.coerce_to(PropertyType::Float), PropertyValue::Float(5.0));
        assert_eq!(five.coerce_to(PropertyType::Bool), PropertyValue::Bool(true));
        assert_eq!(
            five.coerce_to(PropertyType::String),
            PropertyValue::String("5".to_string())
        );

        assert_eq!(
            PropertyValue::Float(2.75).coerce_to(PropertyType::Int),
            PropertyValue::Int(2)
        );
        assert_eq!(
            PropertyValue::Float(f64::NAN).coerce_to(PropertyType::Int),
            PropertyValue::Int(0)
        );
        assert_eq!(
            PropertyValue::Float(4.0).coerce_to(PropertyType::String),
            PropertyValue::String("4.0".to_string())
        );
        assert_eq!(
            PropertyValue::from(" Yes ").coerce_to(PropertyType::Bool),
            PropertyValue::Bool(true)
        );
        assert_eq!(
            PropertyValue::from("12").coerce_to(PropertyType::Int),
            PropertyValue::Int(12)
        );
        assert_eq!(
            PropertyValue::from("abc").coerce_to(PropertyType::Float),
            PropertyValue::Float(0.0)
        );
    }

    #[test]
    fn coercion_to_same_type_is_identity() {
        let v = PropertyValue::from("keep me");
        assert_eq!(v.coerce_to(PropertyType::String), v);
    }
}
