use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt::{Debug, Formatter, Write};
use std::rc::{Rc, Weak};

use ahash::RandomState;
use log::trace;

use crate::debugging::{DebugRepresentation, Renderer, Representation};
use crate::result::{ExecutionError, JsResult};
use crate::values::function::BuiltIn;
use crate::values::key::PropertyKey;
use crate::values::string::JsPrimitiveString;
use crate::values::value::RuntimeValue;

/// Shared handle to a heap object. Cloning the handle aliases the object.
#[derive(Clone)]
pub struct JsObject {
    inner: Rc<RefCell<JsObjectInner>>,
}

/// Non-owning handle, used by the realm to find its objects again on drop.
pub(crate) struct WeakJsObject(Weak<RefCell<JsObjectInner>>);

impl WeakJsObject {
    pub(crate) fn upgrade(&self) -> Option<JsObject> {
        self.0.upgrade().map(|inner| JsObject { inner })
    }

    pub(crate) fn is_alive(&self) -> bool {
        self.0.strong_count() > 0
    }
}

struct JsObjectInner {
    properties: HashMap<PropertyKey, Property, RandomState>,
    order: Vec<PropertyKey>,
    prototype: Option<JsObject>,
    extensible: bool,
    name: Option<JsPrimitiveString>,
    source: Option<JsPrimitiveString>,
    callable: Option<BuiltIn>,
    construct: Option<BuiltIn>,
}

impl Default for JsObjectInner {
    fn default() -> Self {
        JsObjectInner {
            properties: HashMap::with_hasher(RandomState::new()),
            order: Vec::new(),
            prototype: None,
            extensible: true,
            name: None,
            source: None,
            callable: None,
            construct: None,
        }
    }
}

/// The raw attribute record of an own property.
#[derive(Clone, PartialEq)]
pub enum Property {
    DataDescriptor {
        value: RuntimeValue,
        configurable: bool,
        enumerable: bool,
        writable: bool,
    },
    AccessorDescriptor {
        getter: Option<JsObject>,
        setter: Option<JsObject>,
        enumerable: bool,
        configurable: bool,
    },
}

impl Property {
    /// A plain assignment: writable, enumerable and configurable.
    pub fn value(value: impl Into<RuntimeValue>) -> Property {
        Property::DataDescriptor {
            value: value.into(),
            configurable: true,
            enumerable: true,
            writable: true,
        }
    }

    pub fn enumerable(&self) -> bool {
        match self {
            Property::DataDescriptor { enumerable, .. }
            | Property::AccessorDescriptor { enumerable, .. } => *enumerable,
        }
    }

    pub fn configurable(&self) -> bool {
        match self {
            Property::DataDescriptor { configurable, .. }
            | Property::AccessorDescriptor { configurable, .. } => *configurable,
        }
    }
}

impl Debug for Property {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Renderer::debug(f, 2).render(self)
    }
}

impl DebugRepresentation for Property {
    fn render(&self, renderer: &mut Renderer) -> std::fmt::Result {
        match self {
            Property::DataDescriptor {
                value,
                configurable,
                enumerable,
                writable,
            } => {
                renderer.start_internal("DATA")?;
                renderer.internal_key("value")?;
                renderer.render(value)?;
                renderer.formatter.write_str(", ")?;
                renderer.flags(*writable, *enumerable, *configurable)?;
            }
            Property::AccessorDescriptor {
                getter,
                setter,
                enumerable,
                configurable,
            } => {
                renderer.start_internal("ACCESSOR")?;
                renderer.internal_key("get")?;
                renderer.render(getter)?;
                renderer.formatter.write_str(", ")?;
                renderer.internal_key("set")?;
                renderer.render(setter)?;
                renderer.formatter.write_str(", ")?;
                renderer.flags(false, *enumerable, *configurable)?;
            }
        }

        renderer.end_internal()
    }
}

pub struct JsObjectBuilder {
    inner: JsObjectInner,
}

impl JsObjectBuilder {
    pub fn with_callable(mut self, function: impl Into<BuiltIn>) -> Self {
        self.inner.callable = Some(function.into());
        self
    }

    pub fn with_construct(mut self, function: impl Into<BuiltIn>) -> Self {
        self.inner.construct = Some(function.into());
        self
    }

    pub fn with_prototype(mut self, prototype: JsObject) -> Self {
        self.inner.prototype = Some(prototype);
        self
    }

    pub fn with_name(mut self, name: impl Into<JsPrimitiveString>) -> Self {
        self.inner.name = Some(name.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<JsPrimitiveString>) -> Self {
        self.inner.source = Some(source.into());
        self
    }

    pub fn with_property(mut self, key: impl Into<PropertyKey>, property: Property) -> Self {
        let key = key.into();

        if self.inner.properties.insert(key.clone(), property).is_none() {
            self.inner.order.push(key);
        }
        self
    }

    pub fn build(self) -> JsObject {
        JsObject {
            inner: Rc::new(RefCell::new(self.inner)),
        }
    }
}

impl JsObject {
    pub fn builder() -> JsObjectBuilder {
        JsObjectBuilder {
            inner: JsObjectInner::default(),
        }
    }

    /// An ordinary object with a null prototype.
    pub fn new() -> Self {
        JsObject {
            inner: Rc::new(RefCell::new(JsObjectInner::default())),
        }
    }

    pub fn name(&self) -> Option<JsPrimitiveString> {
        self.inner.borrow().name.clone()
    }

    pub(crate) fn downgrade(&self) -> WeakJsObject {
        WeakJsObject(Rc::downgrade(&self.inner))
    }

    /// Empties the object, dropping every handle it holds. Breaks the
    /// `prototype` / `constructor` cycles once the owning realm goes away.
    pub(crate) fn release(&self) {
        let released = match self.inner.try_borrow_mut() {
            Ok(mut inner) => std::mem::take(&mut *inner),
            Err(_) => return,
        };

        drop(released);
    }

    /// `Function.prototype.toString`: the recorded source text, or a native
    /// stub for functions that have none.
    pub fn to_source_string(&self) -> JsPrimitiveString {
        let inner = self.inner.borrow();

        match &inner.source {
            Some(source) => source.clone(),
            None => format!(
                "function {}() {{ [native code] }}",
                inner.name.as_ref().map(JsPrimitiveString::as_str).unwrap_or_default()
            )
            .into(),
        }
    }

    pub fn is_function(&self) -> bool {
        let inner = self.inner.borrow();

        inner.callable.is_some() || inner.construct.is_some()
    }

    pub fn is_constructor(&self) -> bool {
        self.inner.borrow().construct.is_some()
    }

    pub fn is_class_constructor(&self) -> bool {
        let inner = self.inner.borrow();

        inner.construct.is_some() && inner.callable.is_none()
    }

    pub fn callable(&self) -> Option<BuiltIn> {
        self.inner.borrow().callable.clone()
    }

    pub fn construct_behavior(&self) -> Option<BuiltIn> {
        self.inner.borrow().construct.clone()
    }

    pub fn prototype(&self) -> Option<JsObject> {
        self.inner.borrow().prototype.clone()
    }

    /// Replaces the prototype link without any extensibility or cycle checks.
    pub fn set_prototype(&self, prototype: Option<JsObject>) {
        self.inner.borrow_mut().prototype = prototype;
    }

    pub fn is_extensible(&self) -> bool {
        self.inner.borrow().extensible
    }

    pub fn prevent_extensions(&self) {
        self.inner.borrow_mut().extensible = false;
    }

    pub fn get_own_property(&self, key: &PropertyKey) -> Option<Property> {
        self.inner.borrow().properties.get(key).cloned()
    }

    /// Looks the key up on this object, then along the prototype chain.
    pub fn get_property(&self, key: &PropertyKey) -> Option<Property> {
        let prototype = {
            let inner = self.inner.borrow();

            if let Some(property) = inner.properties.get(key) {
                return Some(property.clone());
            }

            inner.prototype.clone()
        };

        prototype.and_then(|prototype| prototype.get_property(key))
    }

    pub fn has_own(&self, key: &PropertyKey) -> bool {
        self.inner.borrow().properties.contains_key(key)
    }

    pub fn has(&self, key: &PropertyKey) -> bool {
        self.get_property(key).is_some()
    }

    /// Own keys in ordinary object order: array indices ascending, then
    /// strings in insertion order, then symbols in insertion order.
    pub fn own_keys(&self) -> Vec<PropertyKey> {
        let inner = self.inner.borrow();

        let mut indices: Vec<(u32, &PropertyKey)> = inner
            .order
            .iter()
            .filter_map(|key| {
                key.as_string()
                    .and_then(JsPrimitiveString::as_array_index)
                    .map(|index| (index, key))
            })
            .collect();
        indices.sort_by_key(|(index, _)| *index);

        let strings = inner.order.iter().filter(|key| {
            key.as_string()
                .map_or(false, |str| str.as_array_index().is_none())
        });
        let symbols = inner.order.iter().filter(|key| key.is_symbol());

        indices
            .into_iter()
            .map(|(_, key)| key)
            .chain(strings)
            .chain(symbols)
            .cloned()
            .collect()
    }

    /// Creates or redefines an own property. Returns `false` when the object
    /// is not extensible or the existing property cannot be changed.
    pub fn define_own_property(&self, key: impl Into<PropertyKey>, property: Property) -> bool {
        let key = key.into();

        trace!("define {} = {:?}", key, property);

        let mut guard = self.inner.borrow_mut();
        let inner = &mut *guard;

        match inner.properties.get(&key) {
            None if !inner.extensible => return false,
            None => inner.order.push(key.clone()),
            Some(existing) if !can_redefine(existing, &property) => return false,
            Some(_) => {}
        }

        inner.properties.insert(key, property);
        true
    }

    pub fn define_value(&self, key: impl Into<PropertyKey>, value: impl Into<RuntimeValue>) {
        self.define_own_property(key, Property::value(value));
    }

    pub fn define_value_property(
        &self,
        key: impl Into<PropertyKey>,
        value: impl Into<RuntimeValue>,
        writable: bool,
        enumerable: bool,
        configurable: bool,
    ) -> bool {
        self.define_own_property(
            key,
            Property::DataDescriptor {
                value: value.into(),
                writable,
                enumerable,
                configurable,
            },
        )
    }

    pub fn define_accessor_property(
        &self,
        key: impl Into<PropertyKey>,
        getter: Option<JsObject>,
        setter: Option<JsObject>,
        enumerable: bool,
        configurable: bool,
    ) -> bool {
        self.define_own_property(
            key,
            Property::AccessorDescriptor {
                getter,
                setter,
                enumerable,
                configurable,
            },
        )
    }

    pub fn delete(&self, key: &PropertyKey) -> bool {
        let mut guard = self.inner.borrow_mut();
        let inner = &mut *guard;

        let configurable = match inner.properties.get(key) {
            None => return true,
            Some(property) => property.configurable(),
        };

        if configurable {
            inner.properties.remove(key);
            inner.order.retain(|existing| existing != key);
        }

        configurable
    }

    /// `[[Get]]`: getters are invoked with `receiver` as `this`.
    pub fn get(&self, key: &PropertyKey, receiver: &RuntimeValue) -> JsResult {
        match self.get_property(key) {
            Some(Property::DataDescriptor { value, .. }) => Ok(value),
            Some(Property::AccessorDescriptor {
                getter: Some(getter),
                ..
            }) => getter.call(receiver, &[]),
            _ => Ok(RuntimeValue::Undefined),
        }
    }

    /// `[[Set]]`: honors inherited setters, read-only data and extensibility.
    pub fn set(
        &self,
        key: &PropertyKey,
        value: RuntimeValue,
        receiver: &RuntimeValue,
    ) -> JsResult<bool> {
        match self.get_property(key) {
            Some(Property::AccessorDescriptor {
                setter: Some(setter),
                ..
            }) => {
                setter.call(receiver, &[value])?;
                return Ok(true);
            }
            Some(Property::AccessorDescriptor { setter: None, .. })
            | Some(Property::DataDescriptor {
                writable: false, ..
            }) => return Ok(false),
            _ => {}
        }

        let receiver = match receiver {
            RuntimeValue::Object(receiver) => receiver,
            _ => return Ok(false),
        };

        let result = match receiver.get_own_property(key) {
            Some(Property::DataDescriptor {
                writable: true,
                enumerable,
                configurable,
                ..
            }) => receiver.define_value_property(
                key.clone(),
                value,
                true,
                enumerable,
                configurable,
            ),
            Some(_) => false,
            None => receiver.define_own_property(key.clone(), Property::value(value)),
        };

        Ok(result)
    }

    /// Calls the object as a function with the given `this`.
    pub fn call(&self, this: &RuntimeValue, arguments: &[RuntimeValue]) -> JsResult {
        let callable = self.callable().ok_or_else(|| {
            let name = self.name();
            let name = name.as_ref().map(JsPrimitiveString::as_str).unwrap_or("value");

            if self.is_class_constructor() {
                ExecutionError::type_error(format!(
                    "Class constructor {} cannot be invoked without 'new'",
                    name
                ))
            } else {
                ExecutionError::type_error(format!("{} is not a function", name))
            }
        })?;

        callable.apply(this, arguments)
    }
}

fn can_redefine(existing: &Property, property: &Property) -> bool {
    if existing.configurable() {
        return true;
    }

    match (existing, property) {
        (
            Property::DataDescriptor {
                writable: true,
                enumerable,
                ..
            },
            Property::DataDescriptor {
                enumerable: new_enumerable,
                configurable: false,
                ..
            },
        ) => enumerable == new_enumerable,
        (existing, property) => existing == property,
    }
}

impl Default for JsObject {
    fn default() -> Self {
        JsObject::new()
    }
}

impl From<JsObject> for RuntimeValue {
    fn from(obj: JsObject) -> Self {
        RuntimeValue::Object(obj)
    }
}

impl From<&JsObject> for RuntimeValue {
    fn from(obj: &JsObject) -> Self {
        RuntimeValue::Object(obj.clone())
    }
}

impl PartialEq for JsObject {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Debug for JsObject {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Renderer::debug(f, 2).render(self)
    }
}

impl DebugRepresentation for JsObject {
    fn render(&self, renderer: &mut Renderer) -> std::fmt::Result {
        if self.is_function() {
            let name = self.name();
            let kind = if self.is_class_constructor() {
                "class "
            } else {
                ""
            };

            return renderer.function(&format!(
                "{}{}",
                kind,
                name.as_ref().map(JsPrimitiveString::as_str).unwrap_or("(anonymous)")
            ));
        }

        let value = self.inner.borrow();

        if let Some(name) = &value.name {
            renderer.formatter.write_fmt(format_args!("{} ", name))?;
        }

        if renderer.representation == Representation::Compact {
            return renderer.formatter.write_str("{...}");
        }

        renderer.formatter.write_char('{')?;

        for key in &value.order {
            renderer.render(key)?;
            renderer.formatter.write_str(": ")?;
            match value.properties.get(key) {
                Some(Property::DataDescriptor { value, .. }) => renderer.render(value)?,
                Some(Property::AccessorDescriptor { .. }) => renderer.literal("[Getter/Setter]")?,
                None => renderer.literal("undefined")?,
            };
            renderer.formatter.write_str(", ")?;
        }

        renderer.formatter.write_char('}')
    }
}
