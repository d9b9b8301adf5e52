use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum ScreenError {
    #[error(
        "incorrect number of entries in {file} line {line}: should be {expected} but is {actual}"
    )]
    MalformedRow {
        file: String,
        line: usize,
        expected: usize,
        actual: usize,
    },

    #[error(
        "unrecognised result symbol '{code}' for screen {screen} in line {line} (amplicon {amplicon})"
    )]
    UnrecognizedResultCode {
        code: String,
        screen: String,
        amplicon: String,
        line: usize,
    },

    #[error("invalid result code: {0}")]
    InvalidResultCode(String),

    #[error("gene symbol can't be empty")]
    EmptyGeneSymbol,

    #[error("no details found for screens named in the hits file: {}", .0.join(", "))]
    ScreenWithoutDetails(Vec<String>),

    #[error("duplicate screen name in screen details: {0}")]
    DuplicateScreen(String),

    #[error("failed to read {path}: {message}")]
    InputRead { path: String, message: String },

    #[error("invalid gene identifier table row at line {line}: {message}")]
    IdentifierTable { line: usize, message: String },

    #[error("failed to read config file at {0}")]
    ConfigRead(PathBuf),

    #[error("failed to parse JSON config: {0}")]
    ConfigParse(String),

    #[error("missing input path: {0} (set it in the config file or pass it as a flag)")]
    MissingInput(String),

    #[error("filesystem error: {0}")]
    Filesystem(String),

    #[error("failed to serialize item: {0}")]
    Serialize(String),
}
