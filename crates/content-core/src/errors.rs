pub type ContentResult<T> = Result<T, ContentError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContentError {
    /// A required argument was missing or refers to nothing usable.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    /// An offset or line index fell outside the buffer.
    #[error("index {index} out of range (limit={limit})")]
    OutOfRange { index: usize, limit: usize },
    /// The edit would leave one half of a `\r\n` pair behind.
    #[error("edit boundary at offset {offset} splits a \\r\\n delimiter")]
    InvalidEdit { offset: usize },
}

impl ContentError {
    #[inline]
    pub(crate) fn out_of_range(index: usize, limit: usize) -> Self {
        ContentError::OutOfRange { index, limit }
    }
}
