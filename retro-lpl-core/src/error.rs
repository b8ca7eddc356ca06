use thiserror::Error;

/// Errors that can occur while computing the identity of a file.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// I/O error while reading the file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file ended before a fixed-size field could be read
    #[error(
        "Could not read enough data at offset {offset:#x}: expected {expected} bytes, got {actual}"
    )]
    ShortRead {
        offset: u64,
        expected: usize,
        actual: usize,
    },

    /// Bytes or text that do not follow the expected layout
    #[error("Invalid format: {0}")]
    Format(String),

    /// No extraction rule exists for this system or file kind
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The external serial helper exited unsuccessfully
    #[error("{tool} failed ({status}): {output}")]
    ExternalTool {
        tool: String,
        status: String,
        output: String,
    },
}

impl IdentityError {
    pub fn format(msg: impl Into<String>) -> Self {
        Self::Format(msg.into())
    }

    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::UnsupportedFormat(msg.into())
    }
}
