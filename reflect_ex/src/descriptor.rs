use std::fmt::{Debug, Display, Formatter, Write};

use reflect_runtime::debugging::{DebugRepresentation, Renderer};
use reflect_runtime::{reflect, JsObject, JsResult, Property, RuntimeValue};

use crate::parameters::parse_parameters;

/// Which of the three member shapes a descriptor describes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DescriptorKind {
    Field,
    Property,
    Method,
}

/// The attributes every descriptor carries, copied out of the raw record.
#[derive(Clone)]
pub struct DescriptorBase {
    name: String,
    enumerable: bool,
    configurable: bool,
    writable: bool,
    value: RuntimeValue,
}

impl DescriptorBase {
    fn from_record(name: impl Into<String>, record: &Property) -> Self {
        match record {
            Property::DataDescriptor {
                value,
                configurable,
                enumerable,
                writable,
            } => DescriptorBase {
                name: name.into(),
                enumerable: *enumerable,
                configurable: *configurable,
                writable: *writable,
                value: value.clone(),
            },
            Property::AccessorDescriptor {
                enumerable,
                configurable,
                ..
            } => DescriptorBase {
                name: name.into(),
                enumerable: *enumerable,
                configurable: *configurable,
                writable: false,
                value: RuntimeValue::Undefined,
            },
        }
    }
}

/// Read access to the attributes shared by all descriptor kinds.
pub trait MemberDescriptor {
    fn base(&self) -> &DescriptorBase;

    fn name(&self) -> &str {
        &self.base().name
    }

    fn enumerable(&self) -> bool {
        self.base().enumerable
    }

    fn configurable(&self) -> bool {
        self.base().configurable
    }

    fn writable(&self) -> bool {
        self.base().writable
    }

    /// The stored value of a field, the function of a method, `undefined`
    /// for an accessor property.
    fn value(&self) -> &RuntimeValue {
        &self.base().value
    }
}

/// A plain data slot.
#[derive(Clone)]
pub struct FieldDescriptor {
    base: DescriptorBase,
}

/// A callable member: a method, the constructor, or one half of an accessor
/// pair.
#[derive(Clone)]
pub struct MethodDescriptor {
    base: DescriptorBase,
    function: JsObject,
    arguments: Vec<String>,
}

/// An accessor pair. Owns the descriptors of its getter and setter.
#[derive(Clone)]
pub struct PropertyDescriptor {
    base: DescriptorBase,
    readable: bool,
    getter: Option<Box<MethodDescriptor>>,
    setter: Option<Box<MethodDescriptor>>,
}

/// A classified snapshot of one member.
#[derive(Clone)]
pub enum Descriptor {
    Field(FieldDescriptor),
    Property(PropertyDescriptor),
    Method(MethodDescriptor),
}

impl FieldDescriptor {
    pub(crate) fn new(name: &str, record: &Property) -> Self {
        FieldDescriptor {
            base: DescriptorBase::from_record(name, record),
        }
    }
}

impl MethodDescriptor {
    pub(crate) fn new(name: &str, record: &Property, function: JsObject) -> Self {
        Self::with_base(DescriptorBase::from_record(name, record), function)
    }

    fn accessor(prefix: &str, name: &str, record: &Property, function: JsObject) -> Self {
        let mut base = DescriptorBase::from_record(format!("{} {}", prefix, name), record);
        base.value = RuntimeValue::Object(function.clone());

        Self::with_base(base, function)
    }

    fn with_base(base: DescriptorBase, function: JsObject) -> Self {
        let arguments = parse_parameters(function.to_source_string().as_str(), &base.name);

        MethodDescriptor {
            base,
            function,
            arguments,
        }
    }

    pub fn function(&self) -> &JsObject {
        &self.function
    }

    /// Parameter names parsed from the function's source text.
    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    /// Calls the function with `this` bound to `target`.
    pub fn invoke(&self, target: &JsObject, arguments: &[RuntimeValue]) -> JsResult {
        reflect::apply(&self.function, &target.into(), arguments)
    }
}

impl PropertyDescriptor {
    pub(crate) fn new(name: &str, record: &Property) -> Self {
        let mut base = DescriptorBase::from_record(name, record);

        let (getter, setter) = match record {
            Property::AccessorDescriptor { getter, setter, .. } => (getter.clone(), setter.clone()),
            Property::DataDescriptor { .. } => (None, None),
        };

        let getter =
            getter.map(|getter| Box::new(MethodDescriptor::accessor("get", name, record, getter)));
        let setter =
            setter.map(|setter| Box::new(MethodDescriptor::accessor("set", name, record, setter)));

        if setter.is_some() {
            base.writable = true;
        }

        PropertyDescriptor {
            base,
            readable: getter.is_some(),
            getter,
            setter,
        }
    }

    pub fn readable(&self) -> bool {
        self.readable
    }

    pub fn getter(&self) -> Option<&MethodDescriptor> {
        self.getter.as_deref()
    }

    pub fn setter(&self) -> Option<&MethodDescriptor> {
        self.setter.as_deref()
    }
}

impl Descriptor {
    /// Picks the descriptor kind for a raw record: a callable value is a
    /// method, an accessor record is a property, anything else is a field.
    pub fn classify(name: &str, record: &Property) -> Descriptor {
        match record {
            Property::DataDescriptor {
                value: RuntimeValue::Object(function),
                ..
            } if function.is_function() => {
                Descriptor::Method(MethodDescriptor::new(name, record, function.clone()))
            }
            Property::AccessorDescriptor { .. } => {
                Descriptor::Property(PropertyDescriptor::new(name, record))
            }
            Property::DataDescriptor { .. } => Descriptor::Field(FieldDescriptor::new(name, record)),
        }
    }

    pub fn kind(&self) -> DescriptorKind {
        match self {
            Descriptor::Field(_) => DescriptorKind::Field,
            Descriptor::Property(_) => DescriptorKind::Property,
            Descriptor::Method(_) => DescriptorKind::Method,
        }
    }

    pub fn as_field(&self) -> Option<&FieldDescriptor> {
        match self {
            Descriptor::Field(field) => Some(field),
            _ => None,
        }
    }

    pub fn as_property(&self) -> Option<&PropertyDescriptor> {
        match self {
            Descriptor::Property(property) => Some(property),
            _ => None,
        }
    }

    pub fn as_method(&self) -> Option<&MethodDescriptor> {
        match self {
            Descriptor::Method(method) => Some(method),
            _ => None,
        }
    }

    pub fn into_field(self) -> Option<FieldDescriptor> {
        match self {
            Descriptor::Field(field) => Some(field),
            _ => None,
        }
    }

    pub fn into_property(self) -> Option<PropertyDescriptor> {
        match self {
            Descriptor::Property(property) => Some(property),
            _ => None,
        }
    }

    pub fn into_method(self) -> Option<MethodDescriptor> {
        match self {
            Descriptor::Method(method) => Some(method),
            _ => None,
        }
    }
}

impl MemberDescriptor for FieldDescriptor {
    fn base(&self) -> &DescriptorBase {
        &self.base
    }
}

impl MemberDescriptor for MethodDescriptor {
    fn base(&self) -> &DescriptorBase {
        &self.base
    }
}

impl MemberDescriptor for PropertyDescriptor {
    fn base(&self) -> &DescriptorBase {
        &self.base
    }
}

impl MemberDescriptor for Descriptor {
    fn base(&self) -> &DescriptorBase {
        match self {
            Descriptor::Field(field) => &field.base,
            Descriptor::Property(property) => &property.base,
            Descriptor::Method(method) => &method.base,
        }
    }
}

/// Debug renderings end with the attribute flags of the member.
fn render_flags(renderer: &mut Renderer, base: &DescriptorBase) -> std::fmt::Result {
    if renderer.is_debug() {
        renderer.formatter.write_char(' ')?;
        renderer.start_internal("FLAGS")?;
        renderer.flags(base.writable, base.enumerable, base.configurable)?;
        renderer.end_internal()?;
    }

    Ok(())
}

impl DebugRepresentation for FieldDescriptor {
    fn render(&self, renderer: &mut Renderer) -> std::fmt::Result {
        renderer.kind("field")?;
        renderer.key(&self.base.name)?;
        renderer.formatter.write_str(" = ")?;
        renderer.render(&self.base.value)?;
        render_flags(renderer, &self.base)
    }
}

impl DebugRepresentation for MethodDescriptor {
    fn render(&self, renderer: &mut Renderer) -> std::fmt::Result {
        renderer.kind("method")?;
        renderer.key(&self.base.name)?;
        renderer.formatter.write_char('(')?;
        renderer.key(&self.arguments.join(", "))?;
        renderer.formatter.write_char(')')?;
        render_flags(renderer, &self.base)
    }
}

impl DebugRepresentation for PropertyDescriptor {
    fn render(&self, renderer: &mut Renderer) -> std::fmt::Result {
        renderer.kind("property")?;
        renderer.key(&self.base.name)?;

        if renderer.is_debug() {
            renderer.formatter.write_str(" { ")?;
            renderer.internal_key("get")?;
            renderer.render(&self.getter.as_deref().cloned())?;
            renderer.formatter.write_str(", ")?;
            renderer.internal_key("set")?;
            renderer.render(&self.setter.as_deref().cloned())?;
            renderer.formatter.write_str(" }")?;
        }

        render_flags(renderer, &self.base)
    }
}

impl DebugRepresentation for Descriptor {
    fn render(&self, renderer: &mut Renderer) -> std::fmt::Result {
        match self {
            Descriptor::Field(field) => field.render(renderer),
            Descriptor::Property(property) => property.render(renderer),
            Descriptor::Method(method) => method.render(renderer),
        }
    }
}

macro_rules! fmt_via_renderer {
    ($($ty:ty),*) => {
        $(
            impl Debug for $ty {
                fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                    Renderer::debug(f, 3).render(self)
                }
            }

            impl Display for $ty {
                fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                    Renderer::compact(f).render(self)
                }
            }
        )*
    };
}

fmt_via_renderer!(
    Descriptor,
    FieldDescriptor,
    MethodDescriptor,
    PropertyDescriptor
);

#[cfg(test)]
mod test {
    use super::{Descriptor, DescriptorKind, MemberDescriptor};
    use assert_matches::assert_matches;
    use reflect_runtime::{JsObject, Property, Realm, RuntimeValue};

    #[test]
    fn test_classify_field() {
        let descriptor = Descriptor::classify("age", &Property::value(46));

        assert_eq!(descriptor.kind(), DescriptorKind::Field);
        assert_eq!(descriptor.value(), &RuntimeValue::from(46));
        assert!(descriptor.writable());
    }

    #[test]
    fn test_classify_undefined_data_is_a_field() {
        let descriptor = Descriptor::classify("later", &Property::value(RuntimeValue::Undefined));

        assert_matches!(descriptor, Descriptor::Field(_));
    }

    #[test]
    fn test_classify_method() {
        let realm = Realm::new();
        let function = realm.new_native_function("run", |_, _, _| Ok(None));

        let descriptor = Descriptor::classify("run", &Property::value(function.clone()));

        assert_matches!(&descriptor, Descriptor::Method(method) if method.function() == &function);
        assert!(descriptor.as_method().map_or(false, |method| method.arguments().is_empty()));
    }

    #[test]
    fn test_classify_plain_object_value_is_a_field() {
        let descriptor = Descriptor::classify("nested", &Property::value(JsObject::new()));

        assert_eq!(descriptor.kind(), DescriptorKind::Field);
    }

    #[test]
    fn test_accessor_pair() {
        let realm = Realm::new();
        let getter = realm.new_function(
            "get size",
            Some("get size() { return this._size; }".into()),
            reflect_runtime::BuiltIn::new(|_, _, _| Ok(Some(3.into()))),
        );
        let setter = realm.new_function(
            "set size",
            Some("set size(value) { this._size = value; }".into()),
            reflect_runtime::BuiltIn::new(|_, _, _| Ok(None)),
        );

        let record = Property::AccessorDescriptor {
            getter: Some(getter),
            setter: Some(setter),
            enumerable: false,
            configurable: true,
        };

        let descriptor = Descriptor::classify("size", &record);
        let property = descriptor.as_property().cloned();

        assert_matches!(property, Some(ref property) if property.readable() && property.writable());
        let property = property.unwrap();

        assert!(property.value().is_undefined());
        assert_eq!(property.getter().map(|getter| getter.name()), Some("get size"));
        assert_eq!(property.setter().map(|setter| setter.name()), Some("set size"));
        assert_eq!(
            property.setter().map(|setter| setter.arguments().to_vec()),
            Some(vec!["value".to_owned()])
        );
        assert!(property.getter().map_or(false, |getter| !getter.writable()));
    }

    #[test]
    fn test_getter_only_property_is_not_writable() {
        let realm = Realm::new();
        let getter = realm.new_native_function("get id", |_, _, _| Ok(Some(1.into())));
        let record = Property::AccessorDescriptor {
            getter: Some(getter),
            setter: None,
            enumerable: true,
            configurable: false,
        };

        let descriptor = Descriptor::classify("id", &record);

        assert_eq!(descriptor.kind(), DescriptorKind::Property);
        assert!(!descriptor.writable());
        assert!(descriptor.enumerable());
        assert!(!descriptor.configurable());
        assert!(descriptor.as_property().map_or(false, |p| p.setter().is_none()));
    }
}
