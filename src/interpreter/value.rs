//! Runtime values.

use std::fmt;

use crate::ast::VarType;

/// A value held by a Mini-PL variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Int(i64),
    Bool(bool),
    Str(String),
}

impl Value {
    /// The value a declaration without initializer starts with.
    pub fn zero(var_type: VarType) -> Self {
        match var_type {
            VarType::Int => Value::Int(0),
            VarType::Bool => Value::Bool(false),
            VarType::Str => Value::Str(String::new()),
        }
    }

    /// The type of this value.
    pub fn var_type(&self) -> VarType {
        match self {
            Value::Int(_) => VarType::Int,
            Value::Bool(_) => VarType::Bool,
            Value::Str(_) => VarType::Str,
        }
    }
}

/// Renders the value the way `print` writes it.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(value) => write!(f, "{value}"),
            Value::Bool(value) => write!(f, "{value}"),
            Value::Str(value) => f.write_str(value),
        }
    }
}
