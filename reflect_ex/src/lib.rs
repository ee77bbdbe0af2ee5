//! Classified descriptors for the members of live objects.
//!
//! Every member of a target, own or declared on its constructor's prototype,
//! comes back as a [`Descriptor`]: a field, an accessor property or a method.
//! The host reflection primitives are re-exported alongside so callers need
//! only one import.

#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]

mod descriptor;
mod introspect;
mod parameters;

pub use descriptor::{
    Descriptor, DescriptorBase, DescriptorKind, FieldDescriptor, MemberDescriptor,
    MethodDescriptor, PropertyDescriptor,
};
pub use introspect::{
    get_own_constructor_descriptor, get_own_descriptor, get_own_descriptors,
    get_own_field_descriptors, get_own_keys, get_own_method_descriptors,
    get_own_property_descriptors,
};
pub use parameters::parse_parameters;

pub use reflect_runtime::reflect::{
    apply, construct, construct_with_new_target, define_property, delete_property, get,
    get_own_property_descriptor, get_prototype_of, get_with_receiver, has, is_extensible,
    own_keys, prevent_extensions, set, set_prototype_of, set_with_receiver,
};
pub use reflect_runtime::{
    argument, BuiltIn, BuiltinFn, ExecutionError, JsClass, JsObject, JsResult, Property,
    PropertyKey, Realm, RuntimeValue,
};
