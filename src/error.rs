//! Error types for mobitext operations.

use thiserror::Error;

/// Errors that can occur while assembling MOBI text markup.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The resolved table of contents did not keep the length measured
    /// by the provisional pass.
    #[error("layout inconsistency: provisional TOC is {provisional} bytes, resolved TOC is {resolved} bytes")]
    LayoutInconsistency { provisional: usize, resolved: usize },

    /// An offset or record index does not fit the 10-digit filepos field.
    #[error("offset {0} does not fit a 10-digit filepos field")]
    OffsetOverflow(u64),

    #[error("Invalid manifest: {0}")]
    Manifest(String),
}

pub type Result<T> = std::result::Result<T, Error>;
