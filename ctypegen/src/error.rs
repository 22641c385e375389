use std::{fmt, io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BindError {
    #[error("no input files were provided")]
    NoInputs,
    #[error("none of the provided files exist: {0}")]
    AllInputsMissing(String),
    #[error("parse error at {path}:{line}: {message}")]
    Parse {
        path: String,
        line: u32,
        message: String,
    },
    #[error("unsupported C++ type: {0}")]
    UnsupportedType(String),
    #[error("io error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type BindResult<T> = Result<T, BindError>;

impl BindError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn parse(path: impl Into<String>, line: u32, message: impl fmt::Display) -> Self {
        Self::Parse {
            path: path.into(),
            line,
            message: message.to_string(),
        }
    }

    pub fn unsupported(type_name: impl fmt::Display) -> Self {
        Self::UnsupportedType(type_name.to_string())
    }
}
