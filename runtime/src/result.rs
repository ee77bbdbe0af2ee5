use crate::debugging::rendered;
use crate::values::value::RuntimeValue;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone)]
pub enum ExecutionError {
    Thrown(RuntimeValue),
    TypeError(String),
    InternalError(InternalError),
}

#[derive(Debug, Clone)]
pub struct InternalError {
    message: String,
}

impl InternalError {
    pub fn new(message: impl Into<String>) -> Self {
        InternalError {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl ExecutionError {
    pub fn type_error(message: impl Into<String>) -> Self {
        ExecutionError::TypeError(message.into())
    }

    pub fn render(self) -> anyhow::Error {
        match self {
            ExecutionError::TypeError(message) => {
                anyhow::Error::msg(format!("TypeError: {}", message))
            }
            ExecutionError::InternalError(err) => {
                anyhow::Error::msg(format!("InternalError: {}", err.message))
            }
            ExecutionError::Thrown(value) => {
                anyhow::Error::msg(format!("Uncaught {}", rendered(&value, 0)))
            }
        }
    }
}

impl Display for ExecutionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ExecutionError::TypeError(message) => write!(f, "TypeError: {}", message),
            ExecutionError::InternalError(err) => write!(f, "InternalError: {}", err.message),
            ExecutionError::Thrown(value) => write!(f, "Uncaught {}", rendered(value, 0)),
        }
    }
}

impl<T> From<InternalError> for JsResult<T> {
    fn from(err: InternalError) -> Self {
        Err(ExecutionError::InternalError(err))
    }
}

impl From<InternalError> for ExecutionError {
    fn from(err: InternalError) -> Self {
        ExecutionError::InternalError(err)
    }
}

impl From<RuntimeValue> for ExecutionError {
    fn from(err: RuntimeValue) -> Self {
        ExecutionError::Thrown(err)
    }
}

impl From<ExecutionError> for anyhow::Error {
    fn from(err: ExecutionError) -> Self {
        err.render()
    }
}

pub type JsResult<T = RuntimeValue> = std::result::Result<T, ExecutionError>;
