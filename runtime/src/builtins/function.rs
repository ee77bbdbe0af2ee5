use crate::primordials::Realm;
use crate::result::{ExecutionError, JsResult};
use crate::values::function::argument;
use crate::values::value::RuntimeValue;

pub(crate) fn bind(realm: &Realm) {
    let prototype = realm.function_prototype();

    realm.define_native_method(prototype, "toString", to_string);
    realm.define_native_method(prototype, "call", call);
}

/// `Function.prototype` is itself callable and returns `undefined`.
pub(crate) fn empty(
    _: &[RuntimeValue],
    _: &RuntimeValue,
    _: Option<&RuntimeValue>,
) -> JsResult<Option<RuntimeValue>> {
    Ok(None)
}

/// There is no compiler behind this runtime, so functions can only be
/// created natively.
pub(crate) fn construct_function(
    _: &[RuntimeValue],
    _: &RuntimeValue,
    _: Option<&RuntimeValue>,
) -> JsResult<Option<RuntimeValue>> {
    Err(ExecutionError::type_error(
        "Function constructor cannot compile source text",
    ))
}

fn to_string(
    _: &[RuntimeValue],
    target: &RuntimeValue,
    _: Option<&RuntimeValue>,
) -> JsResult<Option<RuntimeValue>> {
    match target {
        RuntimeValue::Object(function) if function.is_function() => {
            Ok(Some(function.to_source_string().into()))
        }
        _ => Err(ExecutionError::type_error(
            "Function.prototype.toString requires that 'this' be a Function",
        )),
    }
}

fn call(
    arguments: &[RuntimeValue],
    target: &RuntimeValue,
    _: Option<&RuntimeValue>,
) -> JsResult<Option<RuntimeValue>> {
    let this = argument(arguments, 0);
    let rest = arguments.get(1..).unwrap_or_default();

    target.as_object()?.call(&this, rest).map(Some)
}
