//! Error types for the archive XML codec.

use thiserror::Error;

/// The primary error type for codec operations.
///
/// Errors are surfaced to the caller unmodified; the codec never retries
/// or recovers. An entity that was half-populated when a decode error
/// occurred must be discarded, as there is no resumption guarantee.
#[derive(Error, Debug)]
pub enum CodecError {
    /// An attribute or text node failed to parse as the expected type.
    #[error("malformed {field}: {value:?} is not a valid {expected}")]
    Format {
        field: &'static str,
        value: String,
        expected: &'static str,
    },

    /// The token stream does not match the expected element structure:
    /// missing required child, premature end of input, incomplete paging.
    #[error("protocol violation: {message}")]
    Protocol { message: String },

    /// An entity was handed to the encoder without a required field.
    #[error("cannot encode {entity}: missing required field '{field}'")]
    Precondition {
        entity: &'static str,
        field: &'static str,
    },

    /// Error reported by the underlying XML parser.
    #[error("xml error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// I/O failure while writing XML.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl CodecError {
    pub(crate) fn protocol(message: impl Into<String>) -> Self {
        CodecError::Protocol {
            message: message.into(),
        }
    }
}

/// Result type alias for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_display() {
        let err = CodecError::Format {
            field: "secs",
            value: "soon".to_string(),
            expected: "non-negative integer",
        };
        assert_eq!(
            err.to_string(),
            "malformed secs: \"soon\" is not a valid non-negative integer"
        );
    }

    #[test]
    fn test_protocol_display() {
        let err = CodecError::protocol("missing <body> child");
        assert_eq!(err.to_string(), "protocol violation: missing <body> child");
    }

    #[test]
    fn test_precondition_display() {
        let err = CodecError::Precondition {
            entity: "Transcript",
            field: "with",
        };
        assert_eq!(
            err.to_string(),
            "cannot encode Transcript: missing required field 'with'"
        );
    }
}
