//! NextGCore X2AP Protocol Library
//!
//! This crate provides high-level X2AP (X2 Application Protocol) message
//! building and parsing for eNB to eNB signalling, as defined in 3GPP TS 36.423.
//!
//! # Architecture
//!
//! The library is layered on top of `x2ap-asn1c` which provides raw ASN.1 APER
//! encoding/decoding. This crate adds:
//!
//! - **Strongly-typed message types** (`types`) for each X2AP procedure
//! - **Builder functions** (`builder`) to construct X2AP PDUs
//! - **Parser functions** (`parser`) to map decoded PDUs onto typed messages
//! - **IE helpers** (`ie`) for encoding/decoding individual Information Elements
//!
//! # Supported Procedures
//!
//! - **Handover Preparation**: Request, Request Acknowledge, Preparation Failure
//! - **Handover Cancel**, **SN Status Transfer**, **UE Context Release**
//! - **Error Indication**
//! - **X2 Setup**: Request, Response, Failure
//! - **Reset**: Request, Response
//! - **Private Message**
//!
//! # Example
//!
//! ```no_run
//! use x2ap::{ResetRequest, X2apMessage};
//! use x2ap_asn1c::x2ap::{Cause, CauseMisc};
//!
//! let msg = X2apMessage::ResetRequest(ResetRequest {
//!     cause: Cause::Misc(CauseMisc::OmIntervention),
//! });
//! let bytes = x2ap::encode(&msg).unwrap();
//!
//! let decoded = x2ap::decode(&bytes).unwrap();
//! assert_eq!(decoded, msg);
//! ```

pub mod error;
pub mod types;
pub mod ie;
pub mod builder;
pub mod parser;

#[cfg(test)]
mod property_tests;

use x2ap_asn1c::x2ap::X2apPdu;
use x2ap_asn1c::{AperDecode, AperDecoder, AperEncode, AperEncoder};

// Re-export key types for convenience
pub use error::{X2apError, X2apResult};
pub use parser::X2apMessage;
pub use types::*;
pub use x2ap_asn1c::CodecConfig;

/// Encode a message into a complete X2AP PDU with the default limits
pub fn encode(msg: &X2apMessage) -> X2apResult<Vec<u8>> {
    encode_with_config(msg, &CodecConfig::default())
}

/// Encode a message into a complete X2AP PDU
pub fn encode_with_config(msg: &X2apMessage, config: &CodecConfig) -> X2apResult<Vec<u8>> {
    let pdu = builder::build_message(msg, config)?;
    let mut encoder = AperEncoder::with_config(*config);
    pdu.encode_aper(&mut encoder)?;
    let bytes = encoder.into_bytes();

    log::trace!(
        "encoded X2AP procedure {} into {} octets",
        msg.procedure_code().0,
        bytes.len()
    );
    Ok(bytes.to_vec())
}

/// Encode a message into a caller-provided buffer, returning the octet count.
///
/// Fails with `BufferOverflow` when the PDU does not fit.
pub fn encode_into(msg: &X2apMessage, buf: &mut [u8]) -> X2apResult<usize> {
    let config = CodecConfig::default().with_max_message_len(buf.len());
    let bytes = encode_with_config(msg, &config)?;
    buf[..bytes.len()].copy_from_slice(&bytes);
    Ok(bytes.len())
}

/// Decode a complete X2AP PDU with the default limits
pub fn decode(data: &[u8]) -> X2apResult<X2apMessage> {
    decode_with_config(data, &CodecConfig::default())
}

/// Decode a complete X2AP PDU. Octets left over after the PDU are an error.
pub fn decode_with_config(data: &[u8], config: &CodecConfig) -> X2apResult<X2apMessage> {
    let mut decoder = AperDecoder::with_config(data, *config);
    let pdu = X2apPdu::decode_aper(&mut decoder)?;
    decoder.ensure_consumed()?;

    log::trace!(
        "decoded X2AP procedure {} from {} octets",
        pdu.procedure_code().0,
        data.len()
    );
    parser::decode_x2ap_pdu_raw(pdu, config)
}
