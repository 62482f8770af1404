use thiserror::Error;

/// Failures reported by netblock construction, stepping and parsing.
///
/// Arithmetic over- and underflow is not an error: it saturates at the
/// all-zeros/all-ones address of the family.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("supplied IP version or mask length unsupported")]
    UnsupportedFamily,
    #[error("illegal mask length provided")]
    InvalidMaskLength,
    #[error("the given IP address is not a part of this netblock")]
    AddressOutOfRange,
    #[error("proposed operation would cause address to exit block")]
    AddressAtEndOfRange,
    #[error("no netblock can be found between the supplied values")]
    NoValidRange,
    #[error("network byte count must be between 1 and 16, got {0}")]
    InvalidNetworkBytes(u8),
    #[error("malformed input {input:?}: {reason}")]
    MalformedText { input: String, reason: String },
}

impl Error {
    pub(crate) fn malformed(input: &str, reason: impl Into<String>) -> Self {
        Error::MalformedText {
            input: input.to_owned(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
