use crate::debugging::{DebugRepresentation, Renderer};
use crate::RuntimeValue;
use ahash::AHasher;
use std::fmt::{Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::rc::Rc;

#[derive(Clone, Eq)]
pub struct JsPrimitiveString {
    inner: Rc<String>,
    hash: u64,
}

impl Debug for JsPrimitiveString {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Renderer::debug(f, 0).render(self)
    }
}

impl Display for JsPrimitiveString {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.inner.as_ref())
    }
}

impl Hash for JsPrimitiveString {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash);
    }
}

impl PartialEq for JsPrimitiveString {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash && self.inner.as_ref() == other.inner.as_ref()
    }
}

impl<T: Into<String>> From<T> for JsPrimitiveString {
    fn from(value: T) -> Self {
        let str = value.into();
        let mut hash = AHasher::default();
        hash.write(str.as_bytes());

        JsPrimitiveString {
            inner: Rc::new(str),
            hash: hash.finish(),
        }
    }
}

impl From<JsPrimitiveString> for RuntimeValue {
    fn from(string: JsPrimitiveString) -> Self {
        RuntimeValue::String(string)
    }
}

impl AsRef<str> for JsPrimitiveString {
    fn as_ref(&self) -> &str {
        self.inner.as_ref()
    }
}

impl JsPrimitiveString {
    pub fn as_str(&self) -> &str {
        self.inner.as_str()
    }

    /// Integer-like keys (`"0"`, `"42"`) sort ahead of other string keys in
    /// own-key order.
    pub(crate) fn as_array_index(&self) -> Option<u32> {
        let str = self.as_str();

        if str.is_empty() || (str.len() > 1 && str.starts_with('0')) {
            return None;
        }

        str.parse::<u32>().ok().filter(|index| *index != u32::MAX)
    }
}

impl DebugRepresentation for JsPrimitiveString {
    fn render(&self, renderer: &mut Renderer) -> std::fmt::Result {
        renderer.string_literal(self.as_str())
    }
}
