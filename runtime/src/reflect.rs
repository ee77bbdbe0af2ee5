//! The low-level reflection primitives of the object model, one function per
//! operation of the ECMAScript `Reflect` namespace.

use crate::result::{ExecutionError, JsResult};
use crate::values::key::PropertyKey;
use crate::values::object::{JsObject, Property};
use crate::values::value::RuntimeValue;

/// `Reflect.apply`
pub fn apply(target: &JsObject, this: &RuntimeValue, arguments: &[RuntimeValue]) -> JsResult {
    target.call(this, arguments)
}

/// `Reflect.construct` with `newTarget` defaulted to `target`.
pub fn construct(target: &JsObject, arguments: &[RuntimeValue]) -> JsResult<JsObject> {
    construct_with_new_target(target, arguments, target)
}

/// `Reflect.construct`: allocates an object whose prototype is
/// `new_target.prototype` and runs the construct behavior of `target` with it
/// as `this`. A constructor that returns an object replaces the allocated one.
pub fn construct_with_new_target(
    target: &JsObject,
    arguments: &[RuntimeValue],
    new_target: &JsObject,
) -> JsResult<JsObject> {
    let construct = target.construct_behavior().ok_or_else(|| {
        ExecutionError::type_error(format!(
            "{} is not a constructor",
            RuntimeValue::from(target)
        ))
    })?;

    if !new_target.is_constructor() {
        return Err(ExecutionError::type_error(format!(
            "{} is not a constructor",
            RuntimeValue::from(new_target)
        )));
    }

    let prototype = match new_target.get(&"prototype".into(), &new_target.into())? {
        RuntimeValue::Object(prototype) => prototype,
        other => {
            return Err(ExecutionError::type_error(format!(
                "constructor prototype {} is not an object",
                other
            )))
        }
    };

    let this = JsObject::builder().with_prototype(prototype).build();

    match construct.apply(&this.clone().into(), arguments)? {
        RuntimeValue::Object(result) => Ok(result),
        _ => Ok(this),
    }
}

/// `Reflect.defineProperty`
pub fn define_property(target: &JsObject, key: impl Into<PropertyKey>, property: Property) -> bool {
    target.define_own_property(key, property)
}

/// `Reflect.deleteProperty`
pub fn delete_property(target: &JsObject, key: impl Into<PropertyKey>) -> bool {
    target.delete(&key.into())
}

/// `Reflect.get` with the receiver defaulted to `target`.
pub fn get(target: &JsObject, key: impl Into<PropertyKey>) -> JsResult {
    target.get(&key.into(), &target.into())
}

/// `Reflect.get`: getters found anywhere on the chain run with `receiver` as
/// `this`.
pub fn get_with_receiver(
    target: &JsObject,
    key: impl Into<PropertyKey>,
    receiver: &RuntimeValue,
) -> JsResult {
    target.get(&key.into(), receiver)
}

/// `Reflect.getOwnPropertyDescriptor`: the raw record, not inherited ones.
pub fn get_own_property_descriptor(
    target: &JsObject,
    key: impl Into<PropertyKey>,
) -> Option<Property> {
    target.get_own_property(&key.into())
}

/// `Reflect.getPrototypeOf`
pub fn get_prototype_of(target: &JsObject) -> Option<JsObject> {
    target.prototype()
}

/// `Reflect.has`: considers the whole prototype chain.
pub fn has(target: &JsObject, key: impl Into<PropertyKey>) -> bool {
    target.has(&key.into())
}

/// `Reflect.isExtensible`
pub fn is_extensible(target: &JsObject) -> bool {
    target.is_extensible()
}

/// `Reflect.ownKeys`: string and symbol keys, own properties only.
pub fn own_keys(target: &JsObject) -> Vec<PropertyKey> {
    target.own_keys()
}

/// `Reflect.preventExtensions`
pub fn prevent_extensions(target: &JsObject) -> bool {
    target.prevent_extensions();
    true
}

/// `Reflect.set` with the receiver defaulted to `target`.
pub fn set(
    target: &JsObject,
    key: impl Into<PropertyKey>,
    value: impl Into<RuntimeValue>,
) -> JsResult<bool> {
    target.set(&key.into(), value.into(), &target.into())
}

/// `Reflect.set`: setters run with `receiver` as `this`, and a plain data
/// write lands on `receiver` rather than on `target`.
pub fn set_with_receiver(
    target: &JsObject,
    key: impl Into<PropertyKey>,
    value: impl Into<RuntimeValue>,
    receiver: &RuntimeValue,
) -> JsResult<bool> {
    target.set(&key.into(), value.into(), receiver)
}

/// `Reflect.setPrototypeOf`: fails on non-extensible targets and on links
/// that would close a cycle.
pub fn set_prototype_of(target: &JsObject, prototype: Option<JsObject>) -> bool {
    if target.prototype() == prototype {
        return true;
    }

    if !target.is_extensible() {
        return false;
    }

    let mut next = prototype.clone();
    while let Some(current) = next {
        if &current == target {
            return false;
        }
        next = current.prototype();
    }

    target.set_prototype(prototype);
    true
}
