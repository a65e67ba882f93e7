use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading a geometry description.
///
/// Line numbers are 1-based and refer to the line that triggered the failure.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("line {line}: '{token}' is not a finite number")]
    InvalidNumber { line: usize, token: String },

    #[error("line {line}: '{record}' record needs 3 components, found {found}")]
    MissingComponent {
        line: usize,
        record: &'static str,
        found: usize,
    },

    #[error("line {line}: face corner '{corner}' is not of the form p/[t]/n")]
    MalformedCorner { line: usize, corner: String },

    #[error("line {line}: {kind} index {index} is out of range (1..={available})")]
    IndexOutOfRange {
        line: usize,
        kind: &'static str,
        index: i64,
        available: usize,
    },

    #[error("line {line}: face has {corners} corners, at least 3 are required")]
    DegenerateFace { line: usize, corners: usize },

    #[error("line {line}: record is not valid UTF-8")]
    InvalidEncoding { line: usize },

    #[error("no face records found")]
    NoFaces,

    #[error("read failure: {0}")]
    Io(#[from] std::io::Error),
}

/// Top-level error type. Every variant is fatal to the session.
#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("malformed geometry: {0}")]
    MalformedGeometry(#[from] GeometryError),

    #[error("failed to read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("unsupported shading model '{0}' (expected phong, blinn-phong or gouraud)")]
    UnsupportedShader(String),

    #[error("window initialization failed: {0}")]
    BackendInit(#[from] minifb::Error),
}

pub type Result<T> = std::result::Result<T, ViewerError>;
