/* Copyright (C) 2025 Pedro Henrique / phkaiser13
* File: k8s/providers/tigera_provider/src/main.rs
*
* Entry point of the `tigera_provider` binary. It parses the command line,
* installs the logging subscriber and runs the requested command on a tokio
* runtime. Command output goes to stdout; logs and diagnostics go to stderr,
* and any failure ends the process with a non-zero exit code.
*
* SPDX-License-Identifier: Apache-2.0 */

use clap::Parser;
use std::process::ExitCode;

mod cli;
mod commands;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::Cli::parse();

    if let Err(e) = tracing_layer::init(cli.global.log_format) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    match commands::run(cli).await {
        Ok(Some(output)) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Ok(None) => ExitCode::SUCCESS,
        Err(failure) => {
            eprintln!("{}", failure);
            ExitCode::FAILURE
        }
    }
}
