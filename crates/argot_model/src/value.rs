//! Typed values.
//!
//! Converted argument values. The default conversion yields `Str` for a
//! single token, `List` of `Str` for multi-value arities and `None` when an
//! arity permits zero tokens and none arrived; declared value kinds drive
//! the built-in string-to-type conversions.

/// Declared value type of an argument.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueKind {
    String,
    Bool,
    Int,
    Float,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// No value (zero tokens under a zero-permitting arity).
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    /// Convert one token string according to a declared kind.
    pub fn parse_as(kind: ValueKind, s: &str) -> Result<Value, String> {
        match kind {
            ValueKind::String => Ok(Value::Str(s.to_string())),
            ValueKind::Bool => {
                if s.eq_ignore_ascii_case("true") {
                    Ok(Value::Bool(true))
                } else if s.eq_ignore_ascii_case("false") {
                    Ok(Value::Bool(false))
                } else {
                    Err(format!("'{s}' is not a boolean"))
                }
            }
            ValueKind::Int => s
                .parse::<i64>()
                .map(Value::Int)
                .map_err(|_| format!("'{s}' is not an integer")),
            ValueKind::Float => s
                .parse::<f64>()
                .map(Value::Float)
                .map_err(|_| format!("'{s}' is not a number")),
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::None => Ok(()),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Str(s) => f.write_str(s),
            Value::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
        }
    }
}
