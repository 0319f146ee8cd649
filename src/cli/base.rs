//! Base functionality for the catalog CLI
//!
//! This module provides core utilities and traits used across the CLI including:
//! - Response handling and printing
//! - Runtime and logging setup
//! - Common traits for command processing

use std::future::Future;

use atty::Stream;
use colored::Colorize;
use colored_json::prelude::*;
use serde::Serialize;
use tokio::runtime::Runtime;
use tracing_subscriber::EnvFilter;

use crate::client::BaseClient;
use crate::error::CatalogError;

/// Evaluates a catalog response, prints the result or error and exits
///
/// Successful results are printed as pretty JSON. Fetch errors exit with
/// `UNAVAILABLE`, application errors with `DATAERR`.
///
/// # Type Parameters
/// * `T` - The type of data contained in a successful response
pub fn evaluate_and_print_response<T: Serialize>(response: Result<T, CatalogError>) {
    match response {
        Ok(data) => match serde_json::to_string_pretty(&data) {
            Ok(json) => {
                redirect_stream(&json);
                std::process::exit(exitcode::OK);
            }
            Err(err) => {
                print_error(err.to_string());
                std::process::exit(exitcode::SOFTWARE);
            }
        },
        Err(err) => {
            print_error(err.to_string());
            std::process::exit(exit_code(&err));
        }
    }
}

/// Maps an error to the process exit code
pub(crate) fn exit_code(err: &CatalogError) -> exitcode::ExitCode {
    match err {
        CatalogError::Fetch { .. } => exitcode::UNAVAILABLE,
        CatalogError::App { .. } => exitcode::DATAERR,
    }
}

/// Redirects output to appropriate stream based on context
///
/// If users are redirecting the output to a file, we don't want to print
/// the success message but only the JSON response to ensure that the output
/// is clean and can be used in other scripts
fn redirect_stream(json_str: &str) {
    if atty::is(Stream::Stdout) {
        println!("{}", success_message());
        match json_str.to_colored_json_auto() {
            Ok(colored) => println!("{}\n", colored),
            Err(_) => println!("{}\n", json_str),
        }
    } else {
        println!("{}", json_str);
    }
}

fn success_message() -> String {
    format!(
        "{} {} - Received the following response: \n",
        "└── ".bold(),
        "Success!".green().bold()
    )
}

pub fn print_error(error: String) {
    eprintln!("\n{} {}\n", "Error:".red().bold(), error);
}

/// Runs a future to completion on a fresh tokio runtime
///
/// Exits the process if the runtime cannot be created.
pub fn block_on<F: Future>(future: F) -> F::Output {
    match Runtime::new() {
        Ok(runtime) => runtime.block_on(future),
        Err(err) => {
            print_error(format!("Failed to start async runtime: {err}"));
            std::process::exit(exitcode::OSERR);
        }
    }
}

/// Installs the stderr log subscriber
///
/// `RUST_LOG` takes precedence. Otherwise only warnings are shown, or debug
/// output of this crate when `verbose` is set.
pub fn init_logging(verbose: bool) {
    let default_directive = if verbose { "nada=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Trait for processing CLI subcommands
///
/// Implementors define how to handle their specific subcommand variant
/// using the provided API client.
pub trait Matcher {
    /// Process this subcommand using the given client
    ///
    /// # Arguments
    /// * `client` - The BaseClient for making API requests
    fn process(self, client: &BaseClient);
}
