/// Crate-wide result alias.
pub type ArwahResult<T> = Result<T, ArwahError>;

/// Error taxonomy for card compositing.
///
/// Every failure is terminal for a single invocation only; callers re-issue a render by changing
/// a control again.
#[derive(thiserror::Error, Debug)]
pub enum ArwahError {
    /// The input bytes could not be interpreted as an image.
    #[error("decode error: {0}")]
    Decode(String),

    /// Serializing the canvas produced no usable output.
    #[error("encode error: {0}")]
    Encode(String),

    /// Parameters or configuration were out of range.
    #[error("validation error: {0}")]
    Validation(String),

    /// A final render is already in flight.
    #[error("render busy: {0}")]
    Busy(String),

    /// File system access failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ArwahError {
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn busy(msg: impl Into<String>) -> Self {
        Self::Busy(msg.into())
    }

    /// Whether this error came from an unreadable input image.
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
