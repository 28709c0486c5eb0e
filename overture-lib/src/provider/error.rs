use std::fmt::{Display, Formatter};

/// Error type for constructing file-backed providers.
#[derive(Debug)]
pub enum ProviderError {
    Io(std::io::Error),
    Decode(String),
    UnsupportedFormat(String),
}

impl Display for ProviderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "io error: {}", err),
            Self::Decode(err) => write!(f, "decode error: {}", err),
            Self::UnsupportedFormat(err) => write!(f, "unsupported format: {}", err),
        }
    }
}

impl std::error::Error for ProviderError {}

impl From<std::io::Error> for ProviderError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}
