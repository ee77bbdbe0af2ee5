use std::fmt::{Debug, Display, Formatter};

use super::object::JsObject;
use super::string::JsPrimitiveString;
use super::symbols::JsSymbol;
use crate::debugging::{DebugRepresentation, Renderer};
use crate::result::{ExecutionError, JsResult};

#[derive(Clone, Default)]
pub enum RuntimeValue {
    #[default]
    Undefined,
    Null,
    Boolean(bool),
    Float(f64),
    String(JsPrimitiveString),
    Symbol(JsSymbol),
    Object(JsObject),
}

impl From<Option<RuntimeValue>> for RuntimeValue {
    fn from(value: Option<RuntimeValue>) -> Self {
        match value {
            Some(value) => value,
            None => RuntimeValue::Undefined,
        }
    }
}

impl RuntimeValue {
    pub fn strict_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (RuntimeValue::Undefined, RuntimeValue::Undefined) => true,
            (RuntimeValue::Null, RuntimeValue::Null) => true,
            (RuntimeValue::Boolean(b1), RuntimeValue::Boolean(b2)) => b1 == b2,
            (RuntimeValue::String(b1), RuntimeValue::String(b2)) => b1 == b2,
            (RuntimeValue::Float(b1), RuntimeValue::Float(b2)) => b1 == b2,
            (RuntimeValue::Symbol(b1), RuntimeValue::Symbol(b2)) => b1 == b2,
            (RuntimeValue::Object(b1), RuntimeValue::Object(b2)) => b1 == b2,
            _ => false,
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, RuntimeValue::Undefined)
    }

    pub fn as_object(&self) -> JsResult<&JsObject> {
        match self {
            RuntimeValue::Object(obj) => Ok(obj),
            other => Err(ExecutionError::type_error(format!(
                "{} is not an object",
                other.type_of()
            ))),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            RuntimeValue::String(str) => Some(str.as_str()),
            _ => None,
        }
    }

    pub fn type_of(&self) -> &'static str {
        match self {
            RuntimeValue::Undefined => "undefined",
            RuntimeValue::Null => "object",
            RuntimeValue::Boolean(_) => "boolean",
            RuntimeValue::Float(_) => "number",
            RuntimeValue::String(_) => "string",
            RuntimeValue::Symbol(_) => "symbol",
            RuntimeValue::Object(obj) if obj.is_function() => "function",
            RuntimeValue::Object(_) => "object",
        }
    }

    /// String conversion that never calls back into user code.
    pub fn to_primitive_string(&self) -> JsPrimitiveString {
        match self {
            RuntimeValue::Float(v) => number_to_string(*v).into(),
            RuntimeValue::Boolean(bool) => bool.to_string().into(),
            RuntimeValue::String(str) => str.clone(),
            RuntimeValue::Undefined => "undefined".into(),
            RuntimeValue::Null => "null".into(),
            RuntimeValue::Symbol(symbol) => format!(
                "Symbol({})",
                symbol.description().map(JsPrimitiveString::as_str).unwrap_or_default()
            )
            .into(),
            RuntimeValue::Object(obj) if obj.is_function() => obj.to_source_string(),
            RuntimeValue::Object(_) => "[object Object]".into(),
        }
    }
}

impl PartialEq for RuntimeValue {
    fn eq(&self, other: &Self) -> bool {
        self.strict_eq(other)
    }
}

impl Debug for RuntimeValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Renderer::debug(f, 3).render(self)
    }
}

impl Display for RuntimeValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Renderer::compact(f).render(self)
    }
}

impl From<&RuntimeValue> for f64 {
    fn from(value: &RuntimeValue) -> Self {
        match value {
            RuntimeValue::Undefined => f64::NAN,
            RuntimeValue::Null => 0.0,
            RuntimeValue::Boolean(true) => 1.0,
            RuntimeValue::Boolean(false) => 0.0,
            RuntimeValue::Float(v) => *v,
            RuntimeValue::Object(..) | RuntimeValue::Symbol(..) => f64::NAN,
            RuntimeValue::String(value) => string_to_number(value.as_str()),
        }
    }
}

/// Decimal form for magnitudes in `[1e-6, 1e21)`, exponent form (`1e+21`) outside.
fn number_to_string(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_owned();
    }

    if value == 0.0 {
        return "0".to_owned();
    }

    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_owned();
    }

    if (1e-6..1e21).contains(&value.abs()) {
        return value.to_string();
    }

    let exponential = format!("{:e}", value);
    match exponential.split_once('e') {
        Some((mantissa, exponent)) => match exponent.parse::<i32>() {
            Ok(exponent) => format!("{}e{:+}", mantissa, exponent),
            Err(_) => exponential.clone(),
        },
        None => exponential.clone(),
    }
}

/// Only the string numeric literal forms: decimal with optional sign and
/// exponent, `Infinity`, and unsigned `0x`/`0o`/`0b` integers.
fn string_to_number(value: &str) -> f64 {
    let trimmed = value.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}');

    if trimmed.is_empty() {
        return 0.0;
    }

    let radix = match trimmed.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };

    if let Some(radix) = radix {
        let digits = &trimmed[2..];
        if digits.is_empty() {
            return f64::NAN;
        }

        return digits
            .chars()
            .try_fold(0.0, |total, c| {
                c.to_digit(radix)
                    .map(|digit| total * f64::from(radix) + f64::from(digit))
            })
            .unwrap_or(f64::NAN);
    }

    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    if !trimmed.chars().all(|c| c.is_ascii_digit() || ".eE+-".contains(c)) {
        return f64::NAN;
    }

    trimmed.parse().unwrap_or(f64::NAN)
}

impl From<RuntimeValue> for f64 {
    fn from(value: RuntimeValue) -> Self {
        (&value).into()
    }
}

impl From<&RuntimeValue> for bool {
    fn from(value: &RuntimeValue) -> Self {
        match value {
            RuntimeValue::Float(v) => *v != 0.0 && !v.is_nan(),
            RuntimeValue::Boolean(bool) => *bool,
            RuntimeValue::String(str) => !str.as_str().is_empty(),
            RuntimeValue::Undefined | RuntimeValue::Null => false,
            RuntimeValue::Symbol(..) | RuntimeValue::Object(..) => true,
        }
    }
}

impl From<RuntimeValue> for bool {
    fn from(value: RuntimeValue) -> Self {
        (&value).into()
    }
}

impl From<f64> for RuntimeValue {
    fn from(value: f64) -> Self {
        RuntimeValue::Float(value)
    }
}

impl From<i32> for RuntimeValue {
    fn from(value: i32) -> Self {
        RuntimeValue::Float(f64::from(value))
    }
}

impl From<bool> for RuntimeValue {
    fn from(value: bool) -> Self {
        RuntimeValue::Boolean(value)
    }
}

impl From<String> for RuntimeValue {
    fn from(value: String) -> Self {
        RuntimeValue::String(value.into())
    }
}

impl From<&str> for RuntimeValue {
    fn from(value: &str) -> Self {
        RuntimeValue::String(value.into())
    }
}

impl From<JsSymbol> for RuntimeValue {
    fn from(value: JsSymbol) -> Self {
        RuntimeValue::Symbol(value)
    }
}

impl DebugRepresentation for RuntimeValue {
    fn render(&self, render: &mut Renderer) -> std::fmt::Result {
        match self {
            RuntimeValue::Boolean(true) => render.literal("true"),
            RuntimeValue::Boolean(false) => render.literal("false"),
            RuntimeValue::Undefined => render.literal("undefined"),
            RuntimeValue::Null => render.literal("null"),
            RuntimeValue::Object(obj) => render.render(obj),
            RuntimeValue::String(str) => render.string_literal(str.as_str()),
            RuntimeValue::Symbol(symbol) => render.render(symbol),
            RuntimeValue::Float(_) => render.literal(self.to_primitive_string().as_str()),
        }
    }
}

#[cfg(test)]
mod test {
    use crate::RuntimeValue;

    #[test]
    fn test_number_to_string() {
        assert_eq!(RuntimeValue::from(47).to_primitive_string().as_str(), "47");
        assert_eq!(RuntimeValue::from(1.5).to_primitive_string().as_str(), "1.5");
        assert_eq!(RuntimeValue::from(3.0).to_primitive_string().as_str(), "3");
        assert_eq!(RuntimeValue::from(-0.0).to_primitive_string().as_str(), "0");
        assert_eq!(
            RuntimeValue::from(f64::NEG_INFINITY).to_primitive_string().as_str(),
            "-Infinity"
        );
        assert_eq!(RuntimeValue::from(f64::NAN).to_primitive_string().as_str(), "NaN");
    }

    #[test]
    fn test_large_and_small_number_to_string() {
        assert_eq!(
            RuntimeValue::from(1e19).to_primitive_string().as_str(),
            "10000000000000000000"
        );
        assert_eq!(
            RuntimeValue::from(-1e20).to_primitive_string().as_str(),
            "-100000000000000000000"
        );
        assert_eq!(RuntimeValue::from(1e21).to_primitive_string().as_str(), "1e+21");
        assert_eq!(RuntimeValue::from(2.5e-7).to_primitive_string().as_str(), "2.5e-7");
        assert_eq!(
            RuntimeValue::from(0.000001).to_primitive_string().as_str(),
            "0.000001"
        );
    }

    #[test]
    fn test_string_to_number() {
        let number = |value: &str| f64::from(RuntimeValue::from(value));

        assert_eq!(number(" 12 "), 12.0);
        assert_eq!(number(""), 0.0);
        assert_eq!(number("0x10"), 16.0);
        assert_eq!(number("0B101"), 5.0);
        assert_eq!(number("-2.5e3"), -2500.0);
        assert_eq!(number("-Infinity"), f64::NEG_INFINITY);
        assert!(number("inf").is_nan());
        assert!(number("infinity").is_nan());
        assert!(number("nan").is_nan());
        assert!(number("NaN").is_nan());
        assert!(number("0x").is_nan());
        assert!(number("0x1g").is_nan());
        assert!(number("12px").is_nan());
    }

    #[test]
    fn test_truthiness() {
        assert!(!bool::from(RuntimeValue::from("")));
        assert!(!bool::from(RuntimeValue::Float(f64::NAN)));
        assert!(bool::from(RuntimeValue::from("Michael")));
        assert!(!bool::from(RuntimeValue::Null));
    }

    #[test]
    fn test_to_number() {
        assert_eq!(f64::from(RuntimeValue::from(" 46 ")), 46.0);
        assert!(f64::from(RuntimeValue::from("age")).is_nan());
        assert_eq!(f64::from(RuntimeValue::from(true)), 1.0);
    }
}
