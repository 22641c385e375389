//! ctypegen Command Line Interface
//!
//! Parses C++ header declarations and generates Python ctypes bindings.
//!
//! # Commands
//!
//! - `ctypegen generate` - Generate a Python ctypes module from headers
//! - `ctypegen inspect` - Dump the parsed declaration surface

mod generate;
mod inspect;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

/// ctypegen - C++ header to Python ctypes binding generator
#[derive(Parser)]
#[command(name = "ctypegen")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a Python ctypes module from C++ headers
    ///
    /// Examples:
    ///   ctypegen generate -f lib.h -o lib_bindings.py
    ///   ctypegen generate -f a.h b.h -o bindings.py -s main.cpp
    Generate(generate::GenerateArgs),

    /// Print the declarations parsed from C++ headers
    ///
    /// Examples:
    ///   ctypegen inspect -f lib.h
    ///   ctypegen inspect -f lib.h --format json
    Inspect(inspect::InspectArgs),
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    match cli.command {
        Commands::Generate(args) => generate::run(args),
        Commands::Inspect(args) => inspect::run(args),
    }
}
