//! Wire types for the notebook backend.
//!
//! The backend takes `{"question": ...}` and answers either with
//! `{"error": ...}` or with an array whose first element carries
//! `notebook_output.result`.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

pub mod backend;

pub use backend::{Backend, HttpBackend};

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct AskRequest<'a> {
    pub question: &'a str,
}

/// What the backend said, before classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendReply {
    /// The backend reported a problem with the question.
    Error(String),
    /// Raw payload from `notebook_output.result`; empty when absent.
    Result(String),
}

#[derive(Debug)]
pub enum BackendError {
    /// The request could not be sent or the body could not be read.
    Transport(reqwest::Error),
    /// The body was not JSON.
    Decode(serde_json::Error),
    /// The body was JSON of a shape the client does not understand.
    UnexpectedShape(String),
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::Transport(err) => write!(f, "request failed: {err}"),
            BackendError::Decode(err) => write!(f, "response was not valid JSON: {err}"),
            BackendError::UnexpectedShape(reason) => {
                write!(f, "unexpected response shape: {reason}")
            }
        }
    }
}

impl std::error::Error for BackendError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BackendError::Transport(err) => Some(err),
            BackendError::Decode(err) => Some(err),
            BackendError::UnexpectedShape(_) => None,
        }
    }
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        BackendError::Transport(err)
    }
}

impl From<serde_json::Error> for BackendError {
    fn from(err: serde_json::Error) -> Self {
        BackendError::Decode(err)
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl BackendReply {
    pub fn parse(body: &str) -> Result<Self, BackendError> {
        let value: Value = serde_json::from_str(body)?;
        Self::from_value(&value)
    }

    pub fn from_value(value: &Value) -> Result<Self, BackendError> {
        if let Some(error) = value.as_object().and_then(|map| map.get("error")) {
            let message = match error {
                Value::String(message) => message.clone(),
                other => other.to_string(),
            };
            return Ok(BackendReply::Error(message));
        }

        let first = match value {
            Value::Array(items) => items.first().ok_or_else(|| {
                BackendError::UnexpectedShape("response array is empty".to_string())
            })?,
            other => {
                return Err(BackendError::UnexpectedShape(format!(
                    "expected an array, got {}",
                    describe(other)
                )))
            }
        };

        let entry = first.as_object().ok_or_else(|| {
            BackendError::UnexpectedShape(format!(
                "first element is {}, not an object",
                describe(first)
            ))
        })?;

        let output = match entry.get("notebook_output") {
            None => return Ok(BackendReply::Result(String::new())),
            Some(Value::Object(output)) => output,
            Some(other) => {
                return Err(BackendError::UnexpectedShape(format!(
                    "notebook_output is {}",
                    describe(other)
                )))
            }
        };

        match output.get("result") {
            None => Ok(BackendReply::Result(String::new())),
            Some(Value::String(result)) => Ok(BackendReply::Result(result.clone())),
            Some(other) => Err(BackendError::UnexpectedShape(format!(
                "notebook_output.result is {}",
                describe(other)
            ))),
        }
    }
}
