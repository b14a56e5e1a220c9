//! `typed-js`: evaluate a script against a typed input value.
//!
//! Provides the logic behind the `typed-js` binary: the input value is
//! decoded from JSON, converted into a fresh QuickJS context as a global,
//! the script runs, and its completion value is converted back and printed
//! as JSON.

use rquickjs::{Context, Runtime, Value as JsValue};
use thiserror::Error;
use tracing::debug;
use typed_value::json::{self, JsonError};
use typed_value::{Type, Value};

use crate::decode::exception_message;
use crate::{from_js, to_js, ConvertError};

/// Default heap limit of the script runtime (64 MiB).
pub const DEFAULT_MEMORY_LIMIT: usize = 64 * 1024 * 1024;

// ── Errors ────────────────────────────────────────────────────────────────

#[derive(Error, Debug)]
pub enum CliError {
    #[error("invalid type: {0}")]
    Type(String),

    #[error("invalid input value: {0}")]
    Input(#[source] JsonError),

    #[error("cannot print result: {0}")]
    Output(#[source] JsonError),

    #[error("script error: {0}")]
    Script(String),

    #[error(transparent)]
    Convert(#[from] ConvertError),

    #[error("script engine error: {0}")]
    Engine(#[from] rquickjs::Error),
}

// ── Options ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct EvalOptions {
    /// JavaScript source; its completion value is the result.
    pub script: String,
    /// Input value as JSON text.
    pub value: Option<String>,
    /// Type of the input value in JSON form. Defaults to the implied type.
    pub type_spec: Option<String>,
    /// Name of the global the input is bound to.
    pub name: String,
    pub memory_limit: usize,
    /// Print the result wrapped with its type.
    pub typed: bool,
}

impl EvalOptions {
    pub fn new(script: impl Into<String>) -> Self {
        EvalOptions {
            script: script.into(),
            value: None,
            type_spec: None,
            name: "v".to_owned(),
            memory_limit: DEFAULT_MEMORY_LIMIT,
            typed: false,
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_type(mut self, type_spec: impl Into<String>) -> Self {
        self.type_spec = Some(type_spec.into());
        self
    }
}

// ── Evaluation ────────────────────────────────────────────────────────────

/// Decodes the input value under the given type, or its implied type.
pub fn parse_input(value: &str, type_spec: Option<&str>) -> Result<Value, CliError> {
    let ty = match type_spec {
        Some(spec) => serde_json::from_str::<Type>(spec).map_err(|e| CliError::Type(e.to_string()))?,
        None => json::implied_type(value).map_err(CliError::Input)?,
    };
    json::unmarshal(value, &ty).map_err(CliError::Input)
}

/// Runs the script and returns its result as a typed value.
pub fn eval(opts: &EvalOptions) -> Result<Value, CliError> {
    let input = match (&opts.value, &opts.type_spec) {
        (Some(text), type_spec) => Some(parse_input(text, type_spec.as_deref())?),
        (None, Some(_)) => return Err(CliError::Type("a type requires an input value".to_owned())),
        (None, None) => None,
    };

    let rt = Runtime::new()?;
    rt.set_memory_limit(opts.memory_limit);
    let context = Context::full(&rt)?;

    context.with(|ctx| -> Result<Value, CliError> {
        // Decoded JSON is always wholly known and capsule-free.
        if let Some(input) = &input {
            debug!(name = %opts.name, ty = %input.ty(), "binding input value");
            ctx.globals().set(opts.name.as_str(), to_js(&ctx, input)?)?;
        }

        debug!(len = opts.script.len(), "evaluating script");
        let result: JsValue = match ctx.eval(opts.script.as_str()) {
            Ok(v) => v,
            Err(rquickjs::Error::Exception) => {
                return Err(CliError::Script(exception_message(&ctx)));
            }
            Err(e) => return Err(e.into()),
        };
        Ok(from_js(&ctx, result)?)
    })
}

/// Runs the script and renders its result as JSON text.
pub fn run(opts: &EvalOptions) -> Result<String, CliError> {
    let result = eval(opts)?;
    let ty = if opts.typed { Type::Dynamic } else { result.ty().clone() };
    json::marshal(&result, &ty).map_err(CliError::Output)
}
