/// Result alias that carries the custom [`SpatialError`] type.
pub type Result<T> = std::result::Result<T, SpatialError>;

/// Common error type for the core crate.
#[derive(Debug, thiserror::Error)]
pub enum SpatialError {
    /// The supplied audio or parameters cannot be processed: an empty buffer,
    /// a zero sample rate, ragged interleaved data or a non-finite speed.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Only mono and stereo sources can be brought into the engine.
    #[error("unsupported channel count {0}, expected 1 or 2")]
    UnsupportedChannelCount(u16),
    /// Free-form failure surfaced by collaborators such as codecs.
    #[error("{0}")]
    Message(String),
    /// Wrapper around standard IO errors.
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

impl SpatialError {
    /// Creates a new error that simply wraps the provided message.
    pub fn msg<T: Into<String>>(msg: T) -> Self {
        Self::Message(msg.into())
    }

    pub(crate) fn invalid<T: Into<String>>(reason: T) -> Self {
        Self::InvalidInput(reason.into())
    }

    /// Returns `true` when the error describes rejected input rather than a
    /// failure of the surrounding I/O.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput(_) | Self::UnsupportedChannelCount(_)
        )
    }
}

impl From<&str> for SpatialError {
    fn from(value: &str) -> Self {
        Self::msg(value)
    }
}

impl From<String> for SpatialError {
    fn from(value: String) -> Self {
        Self::Message(value)
    }
}
