#![deny(missing_docs)]

//! # Check Command
//!
//! Loads and builds a spec without serving it: a load-time lint for spec
//! authors. Prints the operation table on success.

use crate::error::CliResult;
use crate::fetch;

/// Arguments for the check command.
#[derive(clap::Args, Debug, Clone)]
pub struct CheckArgs {
    /// Path or URL of the OpenAPI document.
    pub spec: String,
}

/// Executes the check: acquire, parse, build, print.
pub fn execute(args: &CheckArgs) -> CliResult<()> {
    let content = fetch::fetch(&args.spec)?;
    let api = cannery_core::parse(&content)?;

    for operation in &api.operations {
        let codes: Vec<String> = operation
            .responses
            .iter()
            .map(|response| response.status_code.to_string())
            .collect();

        println!(
            "{:<6} {}  [{}]",
            operation.method,
            operation.path,
            codes.join(", ")
        );
    }

    println!("{} operations OK", api.operations.len());

    Ok(())
}
