use crate::result::JsResult;
use crate::values::value::RuntimeValue;
use core::fmt::{Debug, Formatter};

/// A native function: `op` receives the arguments, the `this` value and the
/// context captured when the function was created.
#[derive(Clone)]
pub struct BuiltIn {
    pub op: BuiltinFn,
    pub context: Option<Box<RuntimeValue>>,
}

pub type BuiltinFn = fn(
    arguments: &[RuntimeValue],
    target: &RuntimeValue,
    context: Option<&RuntimeValue>,
) -> JsResult<Option<RuntimeValue>>;

impl PartialEq for BuiltIn {
    fn eq(&self, other: &Self) -> bool {
        self.op as usize == other.op as usize && self.context == other.context
    }
}

impl From<BuiltinFn> for BuiltIn {
    fn from(op: BuiltinFn) -> Self {
        BuiltIn { op, context: None }
    }
}

impl BuiltIn {
    pub fn new(op: BuiltinFn) -> Self {
        BuiltIn { op, context: None }
    }

    pub fn with_context(op: BuiltinFn, context: impl Into<RuntimeValue>) -> Self {
        BuiltIn {
            op,
            context: Some(Box::new(context.into())),
        }
    }

    pub fn apply(&self, target: &RuntimeValue, arguments: &[RuntimeValue]) -> JsResult {
        let context = self.context.as_deref();

        let result = (self.op)(arguments, target, context)?;

        Ok(result.unwrap_or_default())
    }
}

impl Debug for BuiltIn {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("[native code]")
    }
}

/// Reads the nth argument, `undefined` when it was not supplied.
pub fn argument(arguments: &[RuntimeValue], index: usize) -> RuntimeValue {
    arguments.get(index).cloned().unwrap_or_default()
}
