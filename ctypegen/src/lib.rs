//! ctypegen - C++ header declaration parser and Python ctypes generator
//!
//! Parses a restricted subset of C++ header declarations (enums, classes,
//! free function prototypes, typedefs) and emits a Python module that
//! mirrors them with `ctypes` constructs.
//!
//! ```no_run
//! use ctypegen::{emit::EmitOptions, parser::parse_header};
//!
//! let decls = parse_header("example.h", "int add(int a, int b);")?;
//! let module = ctypegen::emit::generate_module(&decls, &EmitOptions::default())?;
//! assert!(module.contains("add = ctypes.CFUNCTYPE("));
//! # Ok::<(), ctypegen::error::BindError>(())
//! ```

pub mod ast;
pub mod emit;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod types;
pub mod words;

pub use ast::Decl;
pub use emit::{generate_module, EmitOptions};
pub use error::{BindError, BindResult};
pub use parser::parse_header;
