//! X2AP (X2 Application Protocol) ASN.1 types and codec
//!
//! 3GPP TS 36.423 - X2 interface between eNBs

pub mod cause;
pub mod cell;
pub mod context;
pub mod ies;
pub mod pdu;
pub mod types;

pub use cause::*;
pub use cell::*;
pub use context::*;
pub use ies::*;
pub use pdu::*;
pub use types::*;
