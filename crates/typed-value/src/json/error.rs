use std::fmt;

use thiserror::Error;

/// Location of a nested value inside a JSON document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Path(Vec<PathStep>);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathStep {
    Attr(String),
    Index(usize),
}

impl Path {
    pub fn steps(&self) -> &[PathStep] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn push(&mut self, step: PathStep) {
        self.0.push(step);
    }

    pub(crate) fn pop(&mut self) {
        self.0.pop();
    }

    pub(crate) fn type_error(&self, message: impl Into<String>) -> JsonError {
        JsonError::Type { path: self.clone(), message: message.into() }
    }

    pub(crate) fn unsupported(&self, message: impl Into<String>) -> JsonError {
        JsonError::Unsupported { path: self.clone(), message: message.into() }
    }

    fn prefix(&self) -> String {
        if self.0.is_empty() {
            String::new()
        } else {
            format!("{self}: ")
        }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for step in &self.0 {
            match step {
                PathStep::Attr(name) => write!(f, ".{name}")?,
                PathStep::Index(i) => write!(f, "[{i}]")?,
            }
        }
        Ok(())
    }
}

#[derive(Error, Debug)]
pub enum JsonError {
    #[error("invalid JSON: {0}")]
    Syntax(#[from] serde_json::Error),

    #[error("{}{}", .path.prefix(), .message)]
    Type { path: Path, message: String },

    #[error("{}{}", .path.prefix(), .message)]
    Unsupported { path: Path, message: String },

    #[error("invalid type specification: {0}")]
    InvalidType(String),
}

impl JsonError {
    /// The document path the error refers to, when there is one.
    pub fn path(&self) -> Option<&Path> {
        match self {
            JsonError::Type { path, .. } | JsonError::Unsupported { path, .. } => Some(path),
            JsonError::Syntax(_) | JsonError::InvalidType(_) => None,
        }
    }
}
