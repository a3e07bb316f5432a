//! Greeter Demo
//!
//! One set of controllers served three ways: a single command, an
//! interactive session, and simulated HTTP requests.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p greeter -- run say Hello
//! cargo run -p greeter -- run say --words Hi
//! cargo run -p greeter -- run help say
//! cargo run -p greeter -- http GET /users/1
//! cargo run -p greeter -- http POST /users/linus
//! printf 'say Hello\ngreet Ada --greeting Howdy\n' | cargo run -p greeter -- repl
//! ```

mod controllers;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use switchyard::prelude::*;
use switchyard::runtime::RuntimeResult;
use tokio::io::BufReader;
use tracing::error;

use crate::controllers::{UserStore, manifest};

#[derive(Debug, Parser)]
#[command(name = "greeter", version, about = "Switchyard demo: one action model, two surfaces")]
struct Args {
    /// Configuration file (defaults to searching for switchyard.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Configuration profile, e.g. `production`.
    #[arg(long, global = true)]
    profile: Option<String>,

    /// List candidate overloads in failure messages.
    #[arg(long, global = true)]
    explain: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run one action: `run <name> [segments...] [--key value...]`.
    Run {
        #[arg(
            required = true,
            num_args = 1..,
            trailing_var_arg = true,
            allow_hyphen_values = true
        )]
        args: Vec<String>,
    },
    /// Read one command per line from stdin.
    Repl,
    /// Dispatch a simulated HTTP request.
    Http {
        method: String,
        path: String,
        /// Query parameters as `key=value`.
        #[arg(value_parser = parse_pair)]
        query: Vec<(String, String)>,
    },
}

fn parse_pair(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got '{raw}'"))
}

fn build_app(args: &Args) -> RuntimeResult<Application> {
    let mut builder = Application::builder()
        .manifest(manifest())
        .state(UserStore::seeded())
        .with_logging();
    if let Some(path) = &args.config {
        builder = builder.config_file(path);
    }
    if let Some(profile) = &args.profile {
        builder = builder.profile(profile);
    }
    if args.explain {
        builder = builder.set("dispatch.explain_failures", true);
    }
    builder.build()
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let app = match build_app(&args) {
        Ok(app) => app,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };
    if let Err(err) = app.start() {
        eprintln!("error: {err}");
        return ExitCode::FAILURE;
    }

    let code = match args.command {
        Command::Run { args } => cli::run(app.dispatcher(), args).await,
        Command::Repl => {
            let input = BufReader::new(tokio::io::stdin());
            match cli::repl(app.dispatcher(), input, tokio::io::stdout()).await {
                Ok(()) => ExitCode::SUCCESS,
                Err(err) => {
                    error!(error = %err, "Interactive session failed");
                    ExitCode::FAILURE
                }
            }
        }
        Command::Http {
            method,
            path,
            query,
        } => {
            let response = http::handle(app.dispatcher(), &method, &path, query).await;
            println!("{} {}", response.status, response.content_type);
            println!("{}", String::from_utf8_lossy(&response.body));
            if response.status < 400 {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
    };

    if let Err(err) = app.stop() {
        error!(error = %err, "Failed to stop application");
    }
    code
}
