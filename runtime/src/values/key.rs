use crate::debugging::{DebugRepresentation, Renderer};
use crate::{JsPrimitiveString, JsSymbol};
use std::fmt::{Debug, Display, Formatter};

/// The key of an own property: either a string or a symbol.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum PropertyKey {
    String(JsPrimitiveString),
    Symbol(JsSymbol),
}

impl PropertyKey {
    pub fn as_string(&self) -> Option<&JsPrimitiveString> {
        match self {
            PropertyKey::String(str) => Some(str),
            PropertyKey::Symbol(_) => None,
        }
    }

    pub fn is_symbol(&self) -> bool {
        matches!(self, PropertyKey::Symbol(_))
    }
}

impl From<&str> for PropertyKey {
    fn from(value: &str) -> Self {
        PropertyKey::String(value.into())
    }
}

impl From<String> for PropertyKey {
    fn from(value: String) -> Self {
        PropertyKey::String(value.into())
    }
}

impl From<&String> for PropertyKey {
    fn from(value: &String) -> Self {
        PropertyKey::String(value.as_str().into())
    }
}

impl From<JsPrimitiveString> for PropertyKey {
    fn from(value: JsPrimitiveString) -> Self {
        PropertyKey::String(value)
    }
}

impl From<&JsPrimitiveString> for PropertyKey {
    fn from(value: &JsPrimitiveString) -> Self {
        PropertyKey::String(value.clone())
    }
}

impl From<JsSymbol> for PropertyKey {
    fn from(value: JsSymbol) -> Self {
        PropertyKey::Symbol(value)
    }
}

impl From<&JsSymbol> for PropertyKey {
    fn from(value: &JsSymbol) -> Self {
        PropertyKey::Symbol(value.clone())
    }
}

impl Debug for PropertyKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Renderer::debug(f, 0).render(self)
    }
}

impl Display for PropertyKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PropertyKey::String(str) => Display::fmt(str, f),
            PropertyKey::Symbol(symbol) => f.write_fmt(format_args!(
                "Symbol({})",
                symbol.description().map(JsPrimitiveString::as_str).unwrap_or_default()
            )),
        }
    }
}

impl DebugRepresentation for PropertyKey {
    fn render(&self, renderer: &mut Renderer) -> std::fmt::Result {
        match self {
            PropertyKey::String(str) => renderer.key(str.as_str()),
            PropertyKey::Symbol(symbol) => symbol.render(renderer),
        }
    }
}
