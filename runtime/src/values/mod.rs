pub(crate) mod class;
pub(crate) mod function;
pub(crate) mod key;
pub(crate) mod object;
pub(crate) mod string;
pub(crate) mod symbols;
pub(crate) mod value;
