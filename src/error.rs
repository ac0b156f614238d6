use std::path::PathBuf;

use objmerge_files::ParserError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MergeError {
    /// Malformed input. Fatal, since geometry indices would be meaningless afterwards.
    #[error(transparent)]
    Format(#[from] ParserError),

    /// A referenced mesh, material library or element file is missing. Callers log this and skip
    /// the instance; partial scenes are an expected intermediate state.
    #[error("Referenced file {} does not exist", .path.display())]
    MissingFile { path: PathBuf },

    #[error("{} uses material `{name}`, which its own material library does not declare", .file.display())]
    UndeclaredMaterial { file: PathBuf, name: String },

    #[error(transparent)]
    IOError(#[from] std::io::Error),
}

impl MergeError {
    pub fn missing(path: impl Into<PathBuf>) -> Self {
        MergeError::MissingFile { path: path.into() }
    }
}
