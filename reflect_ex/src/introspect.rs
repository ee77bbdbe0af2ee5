//! Queries over the shape of a live object: its own members plus the members
//! declared on its constructor's prototype.

use log::{debug, trace};
use reflect_runtime::{reflect, ExecutionError, JsObject, JsResult, PropertyKey, RuntimeValue};

use crate::descriptor::{
    Descriptor, FieldDescriptor, MemberDescriptor, MethodDescriptor, PropertyDescriptor,
};

const CONSTRUCTOR: &str = "constructor";

/// Classifies the member `name` of `target`.
///
/// Own properties of the target win over members of
/// `target.constructor.prototype` with the same name. A name found on
/// neither gives `Ok(None)`, as does a name the prototype only inherits.
pub fn get_own_descriptor(target: &JsObject, name: &str) -> JsResult<Option<Descriptor>> {
    let record = if target.has_own(&name.into()) {
        reflect::get_own_property_descriptor(target, name)
    } else {
        let prototype = constructor_prototype(target)?;

        if reflect::has(&prototype, name) {
            reflect::get_own_property_descriptor(&prototype, name)
        } else {
            None
        }
    };

    let descriptor = record.map(|record| Descriptor::classify(name, &record));

    trace!(
        "{} classified as {:?}",
        name,
        descriptor.as_ref().map(Descriptor::kind)
    );

    Ok(descriptor)
}

/// Own string keys of `target`, followed by the own string keys of its
/// constructor's prototype when `include_methods` is set.
///
/// Names are not de-duplicated: an instance field that shadows a prototype
/// member of the same name is listed twice.
pub fn get_own_keys(target: &JsObject, include_methods: bool) -> JsResult<Vec<String>> {
    let mut keys = string_keys(target);

    if include_methods {
        let prototype = constructor_prototype(target)?;
        keys.extend(string_keys(&prototype));
    }

    Ok(keys)
}

/// Every member named by `get_own_keys`, classified.
pub fn get_own_descriptors(target: &JsObject, include_methods: bool) -> JsResult<Vec<Descriptor>> {
    let keys = get_own_keys(target, include_methods)?;
    let mut descriptors = Vec::with_capacity(keys.len());

    for key in &keys {
        if let Some(descriptor) = get_own_descriptor(target, key)? {
            descriptors.push(descriptor);
        }
    }

    debug!(
        "{} descriptors from {} keys of {}",
        descriptors.len(),
        keys.len(),
        RuntimeValue::from(target)
    );

    Ok(descriptors)
}

/// Methods, without the constructor.
pub fn get_own_method_descriptors(target: &JsObject) -> JsResult<Vec<MethodDescriptor>> {
    Ok(get_own_descriptors(target, true)?
        .into_iter()
        .filter_map(Descriptor::into_method)
        .filter(|method| method.name() != CONSTRUCTOR)
        .collect())
}

pub fn get_own_property_descriptors(target: &JsObject) -> JsResult<Vec<PropertyDescriptor>> {
    Ok(get_own_descriptors(target, true)?
        .into_iter()
        .filter_map(Descriptor::into_property)
        .collect())
}

pub fn get_own_field_descriptors(target: &JsObject) -> JsResult<Vec<FieldDescriptor>> {
    Ok(get_own_descriptors(target, true)?
        .into_iter()
        .filter_map(Descriptor::into_field)
        .collect())
}

/// The method named `constructor`, usually the class itself.
pub fn get_own_constructor_descriptor(target: &JsObject) -> JsResult<Option<MethodDescriptor>> {
    Ok(get_own_descriptors(target, true)?
        .into_iter()
        .filter_map(Descriptor::into_method)
        .find(|method| method.name() == CONSTRUCTOR))
}

fn string_keys(target: &JsObject) -> Vec<String> {
    reflect::own_keys(target)
        .iter()
        .filter_map(PropertyKey::as_string)
        .map(|key| key.as_str().to_owned())
        .collect()
}

/// `target.constructor.prototype`, read through ordinary property access.
fn constructor_prototype(target: &JsObject) -> JsResult<JsObject> {
    let constructor = match reflect::get(target, CONSTRUCTOR)? {
        RuntimeValue::Object(constructor) => constructor,
        other => {
            return Err(ExecutionError::type_error(format!(
                "cannot introspect {}: constructor is {}",
                RuntimeValue::from(target),
                other
            )))
        }
    };

    match reflect::get(&constructor, "prototype")? {
        RuntimeValue::Object(prototype) => Ok(prototype),
        other => Err(ExecutionError::type_error(format!(
            "cannot introspect {}: constructor prototype is {}",
            RuntimeValue::from(target),
            other
        ))),
    }
}
