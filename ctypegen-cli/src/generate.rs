//! Generate command
//!
//! Validates the input headers, parses them, filters the declarations by
//! the identifiers appearing in the source files (the headers themselves
//! by default) and writes the generated Python module.

use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use ctypegen::emit::{generate_module, EmitOptions};
use ctypegen::error::BindError;
use ctypegen::parser::parse_header;
use ctypegen::words::{filter_by_words, identifiers_in_file};

#[derive(Args)]
pub struct GenerateArgs {
    /// C++ header file paths to parse
    #[arg(short = 'f', long = "filenames", num_args = 1.., required = true)]
    pub filenames: Vec<PathBuf>,

    /// Output Python file path for the generated ctypes code
    #[arg(short, long)]
    pub output: PathBuf,

    /// Additional source files whose identifiers select what gets bound
    #[arg(short = 's', long = "source-files", num_args = 1..)]
    pub source_files: Vec<PathBuf>,

    /// Omit the C++ signature comments from the generated code
    #[arg(long)]
    pub no_comments: bool,
}

pub fn run(args: GenerateArgs) -> Result<()> {
    let existing = validate_inputs(&args.filenames)?;

    // Parse every header, keeping source order across files
    let mut decls = Vec::new();
    for path in &existing {
        let text = fs::read_to_string(path)
            .map_err(|source| BindError::io(path.clone(), source))?;
        let parsed = parse_header(&path.display().to_string(), &text)?;
        tracing::debug!(path = %path.display(), count = parsed.len(), "parsed header");
        decls.extend(parsed);
    }

    // Bind only names mentioned in the headers and any extra source files
    let mut words: HashSet<String> = HashSet::new();
    for path in existing.iter().chain(args.source_files.iter()) {
        words.extend(identifiers_in_file(path)?);
    }
    let decls = filter_by_words(decls, &words);

    let options = EmitOptions {
        comments: !args.no_comments,
    };
    let module = generate_module(&decls, &options)?;

    fs::write(&args.output, module)
        .with_context(|| format!("Failed to write output file {:?}", args.output))?;
    tracing::info!(
        output = %args.output.display(),
        declarations = decls.len(),
        "generated ctypes bindings"
    );

    Ok(())
}

/// Check the input paths, warn about missing ones, error when nothing
/// usable remains
fn validate_inputs(filenames: &[PathBuf]) -> Result<Vec<PathBuf>, BindError> {
    if filenames.is_empty() {
        return Err(BindError::NoInputs);
    }

    let mut existing = Vec::new();
    let mut missing = Vec::new();
    for path in filenames {
        if path.exists() {
            existing.push(path.clone());
        } else {
            missing.push(path.display().to_string());
        }
    }

    if existing.is_empty() {
        return Err(BindError::AllInputsMissing(join_with_and(&missing)));
    }
    if !missing.is_empty() {
        tracing::warn!(
            "the following files do not exist and have been disregarded: {}",
            join_with_and(&missing)
        );
    }

    Ok(existing)
}

/// Join items as "a, b and c"
fn join_with_and(items: &[String]) -> String {
    match items.len() {
        0 => String::new(),
        1 => items[0].clone(),
        n => format!("{} and {}", items[..n - 1].join(", "), items[n - 1]),
    }
}
