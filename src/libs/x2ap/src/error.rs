//! X2AP Error Types

use thiserror::Error;
use x2ap_asn1c::PerError;

/// Errors that can occur during X2AP message processing
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum X2apError {
    /// ASN.1 encoding/decoding error
    #[error("ASN.1 codec error: {0}")]
    Asn1(#[from] PerError),

    /// Missing mandatory IE
    #[error("Missing mandatory IE: {ie_name} (id={ie_id})")]
    MissingMandatoryIe { ie_name: &'static str, ie_id: u16 },

    /// Procedure code that does not match the message being built or parsed
    #[error("Unexpected procedure code: expected {expected}, got {got}")]
    UnexpectedProcedureCode { expected: u8, got: u8 },

    /// Procedure this library has no typed message for
    #[error("Unsupported message: procedure {procedure_code} ({message_type})")]
    UnsupportedMessage {
        procedure_code: u8,
        message_type: &'static str,
    },
}

pub type X2apResult<T> = Result<T, X2apError>;
