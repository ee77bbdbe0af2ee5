#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_docs_in_private_items,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::new_without_default,
    clippy::fn_params_excessive_bools
)]

mod builtins;
pub mod debugging;
mod primordials;
pub mod reflect;
mod result;
mod values;

extern crate ahash;
extern crate anyhow;
extern crate colored;

pub use primordials::Realm;
pub use result::{ExecutionError, InternalError, JsResult};
pub use values::class::JsClass;
pub use values::function::{argument, BuiltIn, BuiltinFn};
pub use values::key::PropertyKey;
pub use values::object::{JsObject, JsObjectBuilder, Property};
pub use values::string::JsPrimitiveString;
pub use values::symbols::JsSymbol;
pub use values::value::RuntimeValue;
