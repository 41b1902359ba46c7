use std::io;
use thiserror::Error;

/// The primary error type for the `brother-lib` library.
#[derive(Error, Debug)]
pub enum BrotherError {
    /// The printer could not be reached or the transport failed underneath us.
    #[error("Connection error: {0}")]
    Connection(String),

    /// The printer answered, but with an error status or without any data.
    #[error("SNMP error: {status}{}", .index.map(|i| format!(", {i}")).unwrap_or_default())]
    Snmp { status: String, index: Option<u32> },

    #[error("Unsupported printer model: {0}")]
    UnsupportedModel(String),

    /// BER decoding failed. Counts as a transport-level fault.
    #[error("Malformed SNMP response: {0}")]
    MalformedResponse(String),

    #[error("Invalid OID: {0}")]
    InvalidOid(String),

    #[error("Invalid record {record:?}: {reason}")]
    InvalidRecord { record: String, reason: String },

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Unknown sensor: {0}")]
    UnknownSensor(String),
}

impl BrotherError {
    pub(crate) fn snmp(status: impl Into<String>) -> Self {
        BrotherError::Snmp {
            status: status.into(),
            index: None,
        }
    }

    pub(crate) fn unsupported_model() -> Self {
        BrotherError::UnsupportedModel("It seems that this printer model is not supported".to_string())
    }

    /// Whether the error originates below the SNMP layer.
    pub fn is_connection_error(&self) -> bool {
        matches!(self, BrotherError::Connection(_) | BrotherError::MalformedResponse(_))
    }
}

impl From<io::Error> for BrotherError {
    fn from(err: io::Error) -> Self {
        BrotherError::Connection(err.to_string())
    }
}
