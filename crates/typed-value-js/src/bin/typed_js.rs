//! `typed-js`: evaluate JavaScript against a typed JSON value.
//!
//! Usage:
//!   typed-js [--value JSON|-] [--type TYPE] [--name v] [--typed] SCRIPT
//!
//! The input is bound to a global (default `v`) and the script's completion
//! value is printed as JSON.

use std::io::{self, Read};

use clap::Parser;
use tracing_subscriber::EnvFilter;
use typed_value_js::cli::{run, EvalOptions, DEFAULT_MEMORY_LIMIT};

#[derive(Parser, Debug)]
#[command(name = "typed-js", version, about = "Evaluate JavaScript against a typed JSON value")]
struct Cli {
    /// Script to evaluate
    script: String,

    /// Input value as JSON, or `-` to read it from stdin
    #[arg(long)]
    value: Option<String>,

    /// Type of the input in JSON form, e.g. '["set","string"]'
    #[arg(long = "type", requires = "value")]
    type_spec: Option<String>,

    /// Global variable the input is bound to
    #[arg(long, default_value = "v")]
    name: String,

    /// Heap limit of the script runtime in bytes
    #[arg(long, default_value_t = DEFAULT_MEMORY_LIMIT)]
    memory_limit: usize,

    /// Print the result as {"value": ..., "type": ...}
    #[arg(long)]
    typed: bool,
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let value = match cli.value.as_deref() {
        Some("-") => {
            let mut buf = String::new();
            if let Err(e) = io::stdin().read_to_string(&mut buf) {
                eprintln!("{e}");
                std::process::exit(1);
            }
            Some(buf)
        }
        other => other.map(str::to_owned),
    };

    let opts = EvalOptions {
        script: cli.script,
        value,
        type_spec: cli.type_spec,
        name: cli.name,
        memory_limit: cli.memory_limit,
        typed: cli.typed,
    };

    match run(&opts) {
        Ok(out) => println!("{out}"),
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
