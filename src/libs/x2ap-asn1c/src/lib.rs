//! NextGCore X2AP ASN.1 Codec Library
//!
//! This crate provides ASN.1 Aligned PER encoding/decoding for X2AP
//! (3GPP TS 36.423), the eNB to eNB control plane protocol.
//!
//! # Modules
//!
//! - `per` - Packed Encoding Rules (APER) encoder/decoder
//! - `config` - Codec limits
//! - `x2ap` - X2AP protocol types and codec

#[macro_use]
mod macros;

pub mod config; // Codec limits
pub mod per; // Packed Encoding Rules
pub mod x2ap; // X2AP codec (directory module)


// Re-export commonly used types
pub use config::CodecConfig;
pub use per::{AperDecode, AperDecoder, AperEncode, AperEncoder, PerError, PerResult};
