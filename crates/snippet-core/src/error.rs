//! Error types for conversion, output and the end-to-end pipeline

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// A template document that is not well-formed XML
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("at byte {position}: {message}")]
pub struct ParseError {
    pub position: u64,
    pub message: String,
}

impl ParseError {
    pub fn new(position: u64, message: impl fmt::Display) -> Self {
        Self {
            position,
            message: message.to_string(),
        }
    }
}

/// Failures while turning a template document into snippets
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed template document {path} {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    /// A `<template>` element without a usable `name` attribute
    #[error("template #{index} has no name attribute")]
    MissingName { index: usize },
}

/// Failures while writing the snippets file
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to encode snippets: {0}")]
    Json(#[from] serde_json::Error),
}

/// Fatal outcomes of a conversion run, each with its own process exit code
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("input file not found: {path}")]
    MissingInput { path: PathBuf },

    #[error("conversion failed: {0}")]
    Convert(#[from] ConvertError),

    #[error("output write failed: {0}")]
    Write(#[from] WriteError),

    #[error("terminal interaction failed: {0}")]
    Prompt(#[from] io::Error),
}

impl PipelineError {
    pub fn exit_code(&self) -> u8 {
        match self {
            PipelineError::MissingInput { .. } => 1,
            PipelineError::Convert(_) => 2,
            PipelineError::Write(_) => 3,
            PipelineError::Prompt(_) => 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let missing = PipelineError::MissingInput {
            path: PathBuf::from("/x.xml"),
        };
        assert_eq!(missing.exit_code(), 1);
        assert_eq!(
            PipelineError::from(ConvertError::MissingName { index: 1 }).exit_code(),
            2
        );
        let write = WriteError::Io {
            path: PathBuf::from("/out.json"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(PipelineError::from(write).exit_code(), 3);
        assert_eq!(
            PipelineError::from(io::Error::new(io::ErrorKind::BrokenPipe, "gone")).exit_code(),
            4
        );
    }

    #[test]
    fn test_messages_name_the_path() {
        let err = PipelineError::MissingInput {
            path: PathBuf::from("/tmp/CLion2024.1/templates/C_C__.xml"),
        };
        assert!(err.to_string().contains("CLion2024.1"));
    }
}
