//! Inspect command
//!
//! Parses headers and prints the declaration surface without generating
//! any bindings. Useful for checking what a generate run would bind.

use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use ctypegen::error::BindError;
use ctypegen::parser::parse_header;

use crate::output::{format_decls, OutputFormat};

#[derive(Args)]
pub struct InspectArgs {
    /// C++ header file paths to parse
    #[arg(short = 'f', long = "filenames", num_args = 1.., required = true)]
    pub filenames: Vec<PathBuf>,

    /// Output format (text or json)
    #[arg(long, default_value = "text")]
    pub format: OutputFormat,
}

pub fn run(args: InspectArgs) -> Result<()> {
    let mut decls = Vec::new();
    for path in &args.filenames {
        let text = fs::read_to_string(path)
            .map_err(|source| BindError::io(path.clone(), source))?;
        decls.extend(parse_header(&path.display().to_string(), &text)?);
    }

    println!("{}", format_decls(&decls, args.format));
    Ok(())
}
