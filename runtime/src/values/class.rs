use log::debug;

use crate::primordials::Realm;
use crate::result::JsResult;
use crate::values::function::{BuiltIn, BuiltinFn};
use crate::values::key::PropertyKey;
use crate::values::object::{JsObject, Property};
use crate::values::string::JsPrimitiveString;
use crate::values::value::RuntimeValue;

enum ClassMember {
    Method {
        name: JsPrimitiveString,
        source: JsPrimitiveString,
        function: BuiltIn,
    },
    Getter {
        name: JsPrimitiveString,
        source: JsPrimitiveString,
        function: BuiltIn,
    },
    Setter {
        name: JsPrimitiveString,
        source: JsPrimitiveString,
        function: BuiltIn,
    },
}

/// Describes a class the way its declaration would: a source text, a
/// constructor body and the members that live on its prototype.
///
/// `load` turns the description into a constructor object whose `prototype`
/// holds `constructor` followed by the members in declaration order.
pub struct JsClass {
    name: JsPrimitiveString,
    source: JsPrimitiveString,
    construct: Option<BuiltIn>,
    members: Vec<ClassMember>,
    statics: Vec<(PropertyKey, RuntimeValue)>,
}

impl JsClass {
    pub fn new(name: impl Into<JsPrimitiveString>, source: impl Into<JsPrimitiveString>) -> Self {
        JsClass {
            name: name.into(),
            source: source.into(),
            construct: None,
            members: Vec::new(),
            statics: Vec::new(),
        }
    }

    pub fn with_constructor(self, op: BuiltinFn) -> Self {
        self.with_constructor_builtin(BuiltIn::new(op))
    }

    pub fn with_constructor_builtin(mut self, function: BuiltIn) -> Self {
        self.construct = Some(function);
        self
    }

    pub fn with_method(
        mut self,
        name: impl Into<JsPrimitiveString>,
        source: impl Into<JsPrimitiveString>,
        op: BuiltinFn,
    ) -> Self {
        self.members.push(ClassMember::Method {
            name: name.into(),
            source: source.into(),
            function: BuiltIn::new(op),
        });
        self
    }

    pub fn with_getter(
        mut self,
        name: impl Into<JsPrimitiveString>,
        source: impl Into<JsPrimitiveString>,
        op: BuiltinFn,
    ) -> Self {
        self.members.push(ClassMember::Getter {
            name: name.into(),
            source: source.into(),
            function: BuiltIn::new(op),
        });
        self
    }

    pub fn with_setter(
        mut self,
        name: impl Into<JsPrimitiveString>,
        source: impl Into<JsPrimitiveString>,
        op: BuiltinFn,
    ) -> Self {
        self.members.push(ClassMember::Setter {
            name: name.into(),
            source: source.into(),
            function: BuiltIn::new(op),
        });
        self
    }

    pub fn with_static(
        mut self,
        key: impl Into<PropertyKey>,
        value: impl Into<RuntimeValue>,
    ) -> Self {
        self.statics.push((key.into(), value.into()));
        self
    }

    /// Builds the constructor and its prototype inside `realm`, which keeps
    /// ownership of both.
    pub fn load(&self, realm: &Realm) -> JsObject {
        let construct = self
            .construct
            .clone()
            .unwrap_or_else(|| BuiltIn::new(base_constructor));

        let prototype = JsObject::builder()
            .with_prototype(realm.object_prototype().clone())
            .build();
        let constructor = JsObject::builder()
            .with_prototype(realm.function_prototype().clone())
            .with_name(self.name.clone())
            .with_source(self.source.clone())
            .with_construct(construct)
            .build();

        realm.track(&prototype);
        realm.track(&constructor);

        constructor.define_value_property("prototype", &prototype, false, false, false);
        prototype.define_value_property("constructor", &constructor, true, false, true);

        for member in &self.members {
            match member {
                ClassMember::Method {
                    name,
                    source,
                    function,
                } => {
                    let method =
                        realm.new_function(name.clone(), Some(source.clone()), function.clone());

                    prototype.define_value_property(name, method, true, false, true);
                }
                ClassMember::Getter {
                    name,
                    source,
                    function,
                } => {
                    let getter = realm.new_function(
                        format!("get {}", name),
                        Some(source.clone()),
                        function.clone(),
                    );
                    let setter = existing_accessor(&prototype, name).1;

                    prototype.define_accessor_property(name, Some(getter), setter, false, true);
                }
                ClassMember::Setter {
                    name,
                    source,
                    function,
                } => {
                    let setter = realm.new_function(
                        format!("set {}", name),
                        Some(source.clone()),
                        function.clone(),
                    );
                    let getter = existing_accessor(&prototype, name).0;

                    prototype.define_accessor_property(name, getter, Some(setter), false, true);
                }
            }
        }

        for (key, value) in &self.statics {
            constructor.define_value(key.clone(), value.clone());
        }

        debug!(
            "loaded class {} with {} prototype members",
            self.name,
            self.members.len()
        );

        constructor
    }
}

/// Getter and setter already declared under `name`, so that a `get x` and a
/// `set x` pair share one accessor property.
fn existing_accessor(
    prototype: &JsObject,
    name: &JsPrimitiveString,
) -> (Option<JsObject>, Option<JsObject>) {
    match prototype.get_own_property(&name.into()) {
        Some(Property::AccessorDescriptor { getter, setter, .. }) => (getter, setter),
        _ => (None, None),
    }
}

fn base_constructor(
    _: &[RuntimeValue],
    _: &RuntimeValue,
    _: Option<&RuntimeValue>,
) -> JsResult<Option<RuntimeValue>> {
    Ok(None)
}

#[cfg(test)]
mod test {
    use assert_matches::assert_matches;

    use crate::{reflect, JsClass, JsObject, JsResult, Property, Realm, RuntimeValue};

    fn noop(
        _: &[RuntimeValue],
        _: &RuntimeValue,
        _: Option<&RuntimeValue>,
    ) -> JsResult<Option<RuntimeValue>> {
        Ok(None)
    }

    fn accessor_halves(class: &JsObject, name: &str) -> (Option<String>, Option<String>) {
        let prototype = reflect::get(class, "prototype").unwrap();
        let property = reflect::get_own_property_descriptor(prototype.as_object().unwrap(), name);

        match property {
            Some(Property::AccessorDescriptor { getter, setter, .. }) => (
                getter.and_then(|getter| getter.name()).map(|name| name.to_string()),
                setter.and_then(|setter| setter.name()).map(|name| name.to_string()),
            ),
            _ => (None, None),
        }
    }

    #[test]
    fn test_getter_and_setter_merge_in_either_order() {
        let realm = Realm::new();
        let getter_first = JsClass::new("A", "class A {}")
            .with_getter("value", "get value() {}", noop)
            .with_setter("value", "set value(v) {}", noop)
            .load(&realm);
        let setter_first = JsClass::new("B", "class B {}")
            .with_setter("value", "set value(v) {}", noop)
            .with_getter("value", "get value() {}", noop)
            .load(&realm);

        let merged = (Some("get value".to_owned()), Some("set value".to_owned()));
        assert_eq!(accessor_halves(&getter_first, "value"), merged);
        assert_eq!(accessor_halves(&setter_first, "value"), merged);
    }

    #[test]
    fn test_static_members_live_on_the_constructor() {
        let realm = Realm::new();
        let class = JsClass::new("Counter", "class Counter { static count = 3; }")
            .with_static("count", 3)
            .load(&realm);

        assert_matches!(
            reflect::get_own_property_descriptor(&class, "count"),
            Some(Property::DataDescriptor { enumerable: true, writable: true, .. })
        );
        assert_eq!(reflect::get(&class, "count").ok(), Some(RuntimeValue::from(3)));

        let instance = reflect::construct(&class, &[]).unwrap();
        assert_eq!(
            reflect::get(&instance, "count").ok(),
            Some(RuntimeValue::Undefined)
        );
    }
}
