//! Output formatters for the inspect command
//!
//! Supports text and JSON output formats.

use ctypegen::ast::Decl;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format '{}'. Use 'text' or 'json'", s)),
        }
    }
}

/// Format the parsed declaration list
pub fn format_decls(decls: &[Decl], format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format_decls_text(decls),
        OutputFormat::Json => {
            serde_json::to_string_pretty(decls).unwrap_or_else(|_| "[]".to_string())
        }
    }
}

fn format_decls_text(decls: &[Decl]) -> String {
    let mut output = String::new();
    output.push_str(&format!("Declarations ({}):\n\n", decls.len()));

    for decl in decls {
        match decl {
            Decl::Enum(e) => {
                output.push_str(&format!(
                    "enum {} ({} enumerators)\n",
                    e.name,
                    e.enumerators.len()
                ));
                for (name, value) in &e.enumerators {
                    output.push_str(&format!("    {} = {}\n", name, value));
                }
            }
            Decl::Function(f) => {
                output.push_str(&format!("function {}\n", f.signature(None)));
            }
            Decl::Class(c) => {
                output.push_str(&format!(
                    "class {} ({} constructors, {} methods, {} fields)\n",
                    c.name,
                    c.constructors.len(),
                    c.methods.len(),
                    c.fields.len()
                ));
                for method in &c.methods {
                    output.push_str(&format!("    {}\n", method.signature(Some(&c.name))));
                }
                for field in &c.fields {
                    output.push_str(&format!("    {} {}::{}\n", field.ty, c.name, field.name));
                }
            }
            Decl::Typedef(t) => {
                output.push_str(&format!("typedef {} = {}\n", t.name, t.ty));
            }
        }
    }

    if decls.is_empty() {
        output.push_str("(no declarations)\n");
    }

    output
}
