use crate::primordials::Realm;
use crate::result::JsResult;
use crate::values::function::argument;
use crate::values::key::PropertyKey;
use crate::values::object::JsObject;
use crate::values::value::RuntimeValue;

pub(crate) fn bind(realm: &Realm) {
    let prototype = realm.object_prototype();

    realm.define_native_method(prototype, "hasOwnProperty", has_own_property);
    realm.define_native_method(prototype, "toString", to_string);
    realm.define_native_method(prototype, "valueOf", value_of);
}

pub(crate) fn to_property_key(value: &RuntimeValue) -> PropertyKey {
    match value {
        RuntimeValue::Symbol(symbol) => PropertyKey::Symbol(symbol.clone()),
        other => PropertyKey::String(other.to_primitive_string()),
    }
}

fn has_own_property(
    arguments: &[RuntimeValue],
    target: &RuntimeValue,
    _: Option<&RuntimeValue>,
) -> JsResult<Option<RuntimeValue>> {
    let key = to_property_key(&argument(arguments, 0));

    let result = match target {
        RuntimeValue::Object(object) => object.has_own(&key),
        _ => false,
    };

    Ok(Some(result.into()))
}

fn to_string(
    _: &[RuntimeValue],
    target: &RuntimeValue,
    _: Option<&RuntimeValue>,
) -> JsResult<Option<RuntimeValue>> {
    let tag = match target {
        RuntimeValue::Undefined => "Undefined",
        RuntimeValue::Null => "Null",
        RuntimeValue::Object(object) if object.is_function() => "Function",
        _ => "Object",
    };

    Ok(Some(format!("[object {}]", tag).into()))
}

fn value_of(
    _: &[RuntimeValue],
    target: &RuntimeValue,
    _: Option<&RuntimeValue>,
) -> JsResult<Option<RuntimeValue>> {
    Ok(Some(target.clone()))
}

/// `Object(value)`: objects pass through, anything else becomes a fresh
/// object. There is no realm at call time, so the fresh object gets no
/// prototype; `new Object()` goes through `construct_object` instead.
pub(crate) fn call_object(
    arguments: &[RuntimeValue],
    _: &RuntimeValue,
    _: Option<&RuntimeValue>,
) -> JsResult<Option<RuntimeValue>> {
    match argument(arguments, 0) {
        RuntimeValue::Object(object) => Ok(Some(object.into())),
        _ => Ok(Some(JsObject::new().into())),
    }
}

pub(crate) fn construct_object(
    arguments: &[RuntimeValue],
    _: &RuntimeValue,
    _: Option<&RuntimeValue>,
) -> JsResult<Option<RuntimeValue>> {
    match argument(arguments, 0) {
        RuntimeValue::Object(object) => Ok(Some(object.into())),
        _ => Ok(None),
    }
}
