use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building a [`VcfAnnotator`](crate::VcfAnnotator).
///
/// Annotation itself never fails; every variant here is a construction-time error.
#[derive(Error, Debug)]
pub enum VcfAnnoError {
    #[error("Can't read VCF header from {path}: {source}")]
    HeaderRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Not a valid VCF header: {0}")]
    InvalidHeader(String),

    #[error("Malformed INFO line at header line {line}: {reason}")]
    MalformedInfoLine { line: usize, reason: String },

    #[error("Missing required annotator setting: {0}")]
    MissingSetting(&'static str),

    #[error("Invalid annotator config: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type alias for gtars-vcfanno operations.
pub type Result<T> = std::result::Result<T, VcfAnnoError>;
