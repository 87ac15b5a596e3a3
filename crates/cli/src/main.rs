use anyhow::{Context, Result};
use argsieve::{Schema, load_schema, parse};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, fmt};

/// Exit code for tokens the schema rejects.
const EXIT_PARSE_ERROR: u8 = 2;

#[derive(Parser)]
#[command(name = "argsieve")]
#[command(version, about = "Parse argument tokens against a schema and print the result as JSON", long_about = None)]
struct Cli {
    /// JSON schema file (default: implicit mode, every option accepted)
    #[arg(short, long, value_name = "FILE")]
    schema: Option<PathBuf>,

    /// Accept options the schema does not declare
    #[arg(long)]
    implicit: bool,

    /// Reject positional tokens
    #[arg(long)]
    no_bare_inputs: bool,

    /// Print JSON on a single line
    #[arg(long)]
    compact: bool,

    /// Tokens to parse
    #[arg(last = true, value_name = "TOKENS")]
    tokens: Vec<String>,
}

fn main() -> Result<ExitCode> {
    init_tracing();
    let cli = Cli::parse();
    run(cli)
}

fn run(cli: Cli) -> Result<ExitCode> {
    let mut schema = match &cli.schema {
        Some(path) => load_schema(path)?,
        None => Schema::new().implicit(true),
    };
    if cli.implicit {
        schema = schema.implicit(true);
    }
    if cli.no_bare_inputs {
        schema = schema.allow_bare_inputs(false);
    }

    tracing::debug!(tokens = cli.tokens.len(), "parsing");
    let result = match parse(&cli.tokens, &schema) {
        Ok(result) => result,
        Err(err) => {
            tracing::debug!(kind = err.kind(), "parse failed");
            eprintln!("error: {err}");
            return Ok(ExitCode::from(EXIT_PARSE_ERROR));
        }
    };

    let json = if cli.compact {
        serde_json::to_string(&result)
    } else {
        serde_json::to_string_pretty(&result)
    }
    .context("failed to serialize parse result")?;
    println!("{json}");

    Ok(ExitCode::SUCCESS)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}
