use crate::debugging::{DebugRepresentation, Renderer};
use crate::JsPrimitiveString;
use std::fmt::{Debug, Formatter};
use std::hash::{Hash, Hasher};
use std::rc::Rc;

struct JsSymbolInner {
    description: Option<JsPrimitiveString>,
}

/// A unique symbol. Two symbols are equal only if they are the same
/// allocation, regardless of their description.
#[derive(Clone)]
pub struct JsSymbol {
    inner: Rc<JsSymbolInner>,
}

impl JsSymbol {
    pub fn new(description: Option<JsPrimitiveString>) -> Self {
        JsSymbol {
            inner: Rc::new(JsSymbolInner { description }),
        }
    }

    pub fn description(&self) -> Option<&JsPrimitiveString> {
        self.inner.description.as_ref()
    }
}

impl PartialEq for JsSymbol {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for JsSymbol {}

impl Hash for JsSymbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(Rc::as_ptr(&self.inner) as usize);
    }
}

impl Debug for JsSymbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Renderer::debug(f, 0).render(self)
    }
}

impl DebugRepresentation for JsSymbol {
    fn render(&self, renderer: &mut Renderer) -> std::fmt::Result {
        let description = self.description().map(JsPrimitiveString::as_str).unwrap_or_default();

        renderer.literal(&format!("Symbol({})", description))
    }
}

#[cfg(test)]
mod test {
    use crate::JsSymbol;

    #[test]
    fn test_symbols_are_unique() {
        let first = JsSymbol::new(Some("tag".into()));
        let second = JsSymbol::new(Some("tag".into()));

        assert_eq!(first, first.clone());
        assert_ne!(first, second);
    }
}
