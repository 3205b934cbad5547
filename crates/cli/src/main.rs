// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! shapeshot binary entry point.

use std::io::Write;

use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use shapeshot::cli::{Cli, DEFAULT_LOG_LEVEL};
use shapeshot::output::{print_error, print_warning};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| {
        print_warning(format_args!(
            "invalid log filter '{}', using '{}'",
            cli.log_level, DEFAULT_LOG_LEVEL
        ));
        EnvFilter::new(DEFAULT_LOG_LEVEL)
    });
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let mut stdout = std::io::stdout().lock();
    let result = cli.run(&mut stdout);
    stdout.flush()?;

    match result {
        Ok(true) => Ok(()),
        Ok(false) => std::process::exit(1),
        Err(e) => {
            print_error(&e);
            std::process::exit(2);
        }
    }
}
