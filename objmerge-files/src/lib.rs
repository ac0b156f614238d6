use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParserError {
    #[error("The file is violating the expected format, because: {reason}")]
    FormatError { reason: String },

    /// A line kind that has to occur exactly once (e.g. `mtllib <name>`) is missing, duplicated
    /// or lacks its argument.
    #[error("Expected exactly one `{prefix}` line with a named token, found {found}")]
    MissingToken { prefix: &'static str, found: usize },

    /// A face references a vertex component that has not been declared in the file.
    #[error("Face references {kind} #{index}, but only {len} are declared")]
    IndexOutOfRange {
        kind: &'static str,
        index: usize,
        len: usize,
    },

    /// Represents all other cases of `std::io::Error`.
    #[error(transparent)]
    IOError(#[from] std::io::Error),
}

impl ParserError {
    pub fn format(reason: impl Into<String>) -> Self {
        ParserError::FormatError { reason: reason.into() }
    }
}

pub mod common;
pub mod mtl;
pub mod obj;
pub mod placement;
