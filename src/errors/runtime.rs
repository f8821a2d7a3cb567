// Generic runtime failures that carry nothing but a message

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct RuntimeError {
    pub message: String,
    pub stack: Option<String>,
}

impl RuntimeError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            stack: None,
        }
    }

    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    /// Keeps the top-level message and records the whole source chain as the stack.
    fn from_error(err: &(dyn std::error::Error + 'static)) -> Self {
        let mut stack: String = format!("Error: {err}");
        let mut source: Option<&(dyn std::error::Error + 'static)> = err.source();

        while let Some(cause) = source {
            stack.push_str(&format!("\n    caused by: {cause}"));
            source = cause.source();
        }

        Self::new(err.to_string()).with_stack(stack)
    }
}

impl From<anyhow::Error> for RuntimeError {
    fn from(err: anyhow::Error) -> Self {
        Self::new(err.to_string()).with_stack(format!("{err:?}"))
    }
}

impl From<std::io::Error> for RuntimeError {
    fn from(err: std::io::Error) -> Self {
        Self::from_error(&err)
    }
}

impl From<serde_json::Error> for RuntimeError {
    fn from(err: serde_json::Error) -> Self {
        Self::from_error(&err)
    }
}
