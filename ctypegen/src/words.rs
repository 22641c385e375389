//! Identifier extraction from source files
//!
//! Declarations are only bound when their name appears in one of the
//! supplied source files. Extracting every identifier-shaped word from
//! those files gives the filter set.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::{BindError, BindResult};

/// Split a chunk at non-identifier characters and keep the identifiers
fn identifier_parts(chunk: &str) -> impl Iterator<Item = &str> {
    chunk
        .split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .filter(|part| !part.is_empty())
        .filter(|part| !part.starts_with(|c: char| c.is_ascii_digit()))
}

/// Collect every identifier appearing in `text`
pub fn identifiers_in(text: &str) -> HashSet<String> {
    let mut words = HashSet::new();
    for line in text.lines() {
        for chunk in line.split_whitespace() {
            for part in identifier_parts(chunk) {
                words.insert(part.to_string());
            }
        }
    }
    words
}

/// Collect every identifier appearing in the file at `path`
pub fn identifiers_in_file(path: &Path) -> BindResult<HashSet<String>> {
    let text = fs::read_to_string(path).map_err(|source| BindError::io(path, source))?;
    Ok(identifiers_in(&text))
}

/// Keep only declarations whose name appears in the word set
pub fn filter_by_words(decls: Vec<crate::ast::Decl>, words: &HashSet<String>) -> Vec<crate::ast::Decl> {
    decls
        .into_iter()
        .filter(|decl| words.contains(decl.name()))
        .collect()
}
