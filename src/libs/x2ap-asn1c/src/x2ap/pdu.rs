//! X2AP PDU Types
//!
//! Top-level PDU structures from X2AP-PDU-Descriptions (3GPP TS 36.423)

use crate::per::{AperDecode, AperDecoder, AperEncode, AperEncoder, PerError, PerResult};

use super::ies::{PrivateIeContainer, ProtocolIeContainer};
use super::types::{Criticality, ProcedureCode};

/// X2AP-PDU - Top-level PDU for all X2AP messages
/// ASN.1: X2AP-PDU ::= CHOICE { initiatingMessage, successfulOutcome, unsuccessfulOutcome, ... }
#[derive(Debug, Clone, PartialEq)]
pub enum X2apPdu {
    InitiatingMessage(InitiatingMessage),
    SuccessfulOutcome(SuccessfulOutcome),
    UnsuccessfulOutcome(UnsuccessfulOutcome),
}

impl X2apPdu {
    pub const NUM_ALTERNATIVES: usize = 3;
    pub const EXTENSIBLE: bool = true;

    pub fn procedure_code(&self) -> ProcedureCode {
        match self {
            X2apPdu::InitiatingMessage(msg) => msg.procedure_code,
            X2apPdu::SuccessfulOutcome(msg) => msg.procedure_code,
            X2apPdu::UnsuccessfulOutcome(msg) => msg.procedure_code,
        }
    }
}

impl AperEncode for X2apPdu {
    fn encode_aper(&self, encoder: &mut AperEncoder) -> PerResult<()> {
        match self {
            X2apPdu::InitiatingMessage(msg) => {
                encoder.encode_choice_index(0, Self::NUM_ALTERNATIVES, Self::EXTENSIBLE, "X2AP-PDU")?;
                msg.encode_aper(encoder)
            }
            X2apPdu::SuccessfulOutcome(msg) => {
                encoder.encode_choice_index(1, Self::NUM_ALTERNATIVES, Self::EXTENSIBLE, "X2AP-PDU")?;
                msg.encode_aper(encoder)
            }
            X2apPdu::UnsuccessfulOutcome(msg) => {
                encoder.encode_choice_index(2, Self::NUM_ALTERNATIVES, Self::EXTENSIBLE, "X2AP-PDU")?;
                msg.encode_aper(encoder)
            }
        }
    }
}

impl AperDecode for X2apPdu {
    fn decode_aper(decoder: &mut AperDecoder) -> PerResult<Self> {
        let index = decoder.decode_choice_index(Self::NUM_ALTERNATIVES, Self::EXTENSIBLE, "X2AP-PDU")?;
        match index {
            0 => Ok(X2apPdu::InitiatingMessage(InitiatingMessage::decode_aper(decoder)?)),
            1 => Ok(X2apPdu::SuccessfulOutcome(SuccessfulOutcome::decode_aper(decoder)?)),
            2 => Ok(X2apPdu::UnsuccessfulOutcome(UnsuccessfulOutcome::decode_aper(decoder)?)),
            _ => Err(PerError::InvalidChoiceIndex {
                index,
                max: Self::NUM_ALTERNATIVES - 1,
            }),
        }
    }
}

// ============================================================================
// Message bodies
// ============================================================================

/// Encode `SEQUENCE { protocolIEs ProtocolIE-Container, ... }`, the body
/// shared by every X2AP message except PrivateMessage.
pub fn encode_message_body(encoder: &mut AperEncoder, ies: &ProtocolIeContainer) -> PerResult<()> {
    encoder.encode_extension_bit(false, "X2AP message")?;
    ies.encode_aper(encoder)
}

pub fn decode_message_body(decoder: &mut AperDecoder) -> PerResult<ProtocolIeContainer> {
    decoder.decode_extension_bit("X2AP message")?;
    ProtocolIeContainer::decode_aper(decoder)
}

fn encode_private_message(encoder: &mut AperEncoder, ies: &PrivateIeContainer) -> PerResult<()> {
    encoder.encode_extension_bit(false, "PrivateMessage")?;
    ies.encode_aper(encoder)
}

fn decode_private_message(decoder: &mut AperDecoder) -> PerResult<PrivateIeContainer> {
    decoder.decode_extension_bit("PrivateMessage")?;
    PrivateIeContainer::decode_aper(decoder)
}

/// Procedure code and value of an outcome must agree; `Other` is reserved
/// for procedures without a typed value.
fn check_procedure_code(
    procedure_code: ProcedureCode,
    expected: Option<ProcedureCode>,
    typed: &[ProcedureCode],
    type_name: &str,
) -> PerResult<()> {
    match expected {
        Some(expected) if expected != procedure_code => Err(PerError::EncodeFailure(format!(
            "{type_name}: value belongs to procedure {}, not {}",
            expected.0, procedure_code.0
        ))),
        None if typed.contains(&procedure_code) => Err(PerError::EncodeFailure(format!(
            "{type_name}: procedure {} needs a typed value",
            procedure_code.0
        ))),
        _ => Ok(()),
    }
}

// ============================================================================
// InitiatingMessage
// ============================================================================

/// InitiatingMessage - Request/indication messages
/// ASN.1: InitiatingMessage ::= SEQUENCE { procedureCode, criticality, value }
#[derive(Debug, Clone, PartialEq)]
pub struct InitiatingMessage {
    pub procedure_code: ProcedureCode,
    pub criticality: Criticality,
    pub value: InitiatingMessageValue,
}

impl InitiatingMessage {
    /// Message for `procedure_code` with the procedure's own criticality.
    pub fn new(procedure_code: ProcedureCode, value: InitiatingMessageValue) -> Self {
        Self {
            procedure_code,
            criticality: procedure_code.criticality(),
            value,
        }
    }
}

/// Value types for InitiatingMessage
#[derive(Debug, Clone, PartialEq)]
pub enum InitiatingMessageValue {
    HandoverRequest(ProtocolIeContainer),
    HandoverCancel(ProtocolIeContainer),
    ErrorIndication(ProtocolIeContainer),
    SnStatusTransfer(ProtocolIeContainer),
    UeContextRelease(ProtocolIeContainer),
    X2SetupRequest(ProtocolIeContainer),
    ResetRequest(ProtocolIeContainer),
    PrivateMessage(PrivateIeContainer),
    // Procedures without a typed value
    Other(ProtocolIeContainer),
}

impl InitiatingMessageValue {
    const TYPED: &'static [ProcedureCode] = &[
        ProcedureCode::HANDOVER_PREPARATION,
        ProcedureCode::HANDOVER_CANCEL,
        ProcedureCode::ERROR_INDICATION,
        ProcedureCode::SN_STATUS_TRANSFER,
        ProcedureCode::UE_CONTEXT_RELEASE,
        ProcedureCode::X2_SETUP,
        ProcedureCode::RESET,
        ProcedureCode::PRIVATE_MESSAGE,
    ];

    pub fn procedure_code(&self) -> Option<ProcedureCode> {
        match self {
            Self::HandoverRequest(_) => Some(ProcedureCode::HANDOVER_PREPARATION),
            Self::HandoverCancel(_) => Some(ProcedureCode::HANDOVER_CANCEL),
            Self::ErrorIndication(_) => Some(ProcedureCode::ERROR_INDICATION),
            Self::SnStatusTransfer(_) => Some(ProcedureCode::SN_STATUS_TRANSFER),
            Self::UeContextRelease(_) => Some(ProcedureCode::UE_CONTEXT_RELEASE),
            Self::X2SetupRequest(_) => Some(ProcedureCode::X2_SETUP),
            Self::ResetRequest(_) => Some(ProcedureCode::RESET),
            Self::PrivateMessage(_) => Some(ProcedureCode::PRIVATE_MESSAGE),
            Self::Other(_) => None,
        }
    }

    fn decode_for(procedure_code: ProcedureCode, decoder: &mut AperDecoder) -> PerResult<Self> {
        let value = match procedure_code {
            ProcedureCode::HANDOVER_PREPARATION => Self::HandoverRequest(decode_message_body(decoder)?),
            ProcedureCode::HANDOVER_CANCEL => Self::HandoverCancel(decode_message_body(decoder)?),
            ProcedureCode::ERROR_INDICATION => Self::ErrorIndication(decode_message_body(decoder)?),
            ProcedureCode::SN_STATUS_TRANSFER => Self::SnStatusTransfer(decode_message_body(decoder)?),
            ProcedureCode::UE_CONTEXT_RELEASE => Self::UeContextRelease(decode_message_body(decoder)?),
            ProcedureCode::X2_SETUP => Self::X2SetupRequest(decode_message_body(decoder)?),
            ProcedureCode::RESET => Self::ResetRequest(decode_message_body(decoder)?),
            ProcedureCode::PRIVATE_MESSAGE => Self::PrivateMessage(decode_private_message(decoder)?),
            _ => Self::Other(decode_message_body(decoder)?),
        };
        Ok(value)
    }
}

impl AperEncode for InitiatingMessageValue {
    fn encode_aper(&self, encoder: &mut AperEncoder) -> PerResult<()> {
        match self {
            Self::HandoverRequest(ies)
            | Self::HandoverCancel(ies)
            | Self::ErrorIndication(ies)
            | Self::SnStatusTransfer(ies)
            | Self::UeContextRelease(ies)
            | Self::X2SetupRequest(ies)
            | Self::ResetRequest(ies)
            | Self::Other(ies) => encode_message_body(encoder, ies),
            Self::PrivateMessage(ies) => encode_private_message(encoder, ies),
        }
    }
}

impl AperEncode for InitiatingMessage {
    fn encode_aper(&self, encoder: &mut AperEncoder) -> PerResult<()> {
        check_procedure_code(
            self.procedure_code,
            self.value.procedure_code(),
            InitiatingMessageValue::TYPED,
            "InitiatingMessage",
        )?;
        self.procedure_code.encode_aper(encoder)?;
        self.criticality.encode_aper(encoder)?;
        encoder.encode_open_type(|scratch| self.value.encode_aper(scratch))
    }
}

impl AperDecode for InitiatingMessage {
    fn decode_aper(decoder: &mut AperDecoder) -> PerResult<Self> {
        let procedure_code = ProcedureCode::decode_aper(decoder)?;
        let criticality = Criticality::decode_aper(decoder)?;
        let value = decoder.decode_open_type(|scratch| InitiatingMessageValue::decode_for(procedure_code, scratch))?;
        Ok(InitiatingMessage {
            procedure_code,
            criticality,
            value,
        })
    }
}

// ============================================================================
// SuccessfulOutcome
// ============================================================================

/// SuccessfulOutcome - Response messages for successful procedures
/// ASN.1: SuccessfulOutcome ::= SEQUENCE { procedureCode, criticality, value }
#[derive(Debug, Clone, PartialEq)]
pub struct SuccessfulOutcome {
    pub procedure_code: ProcedureCode,
    pub criticality: Criticality,
    pub value: SuccessfulOutcomeValue,
}

impl SuccessfulOutcome {
    pub fn new(procedure_code: ProcedureCode, value: SuccessfulOutcomeValue) -> Self {
        Self {
            procedure_code,
            criticality: procedure_code.criticality(),
            value,
        }
    }
}

/// Value types for SuccessfulOutcome
#[derive(Debug, Clone, PartialEq)]
pub enum SuccessfulOutcomeValue {
    HandoverRequestAcknowledge(ProtocolIeContainer),
    X2SetupResponse(ProtocolIeContainer),
    ResetResponse(ProtocolIeContainer),
    Other(ProtocolIeContainer),
}

impl SuccessfulOutcomeValue {
    const TYPED: &'static [ProcedureCode] = &[
        ProcedureCode::HANDOVER_PREPARATION,
        ProcedureCode::X2_SETUP,
        ProcedureCode::RESET,
    ];

    pub fn procedure_code(&self) -> Option<ProcedureCode> {
        match self {
            Self::HandoverRequestAcknowledge(_) => Some(ProcedureCode::HANDOVER_PREPARATION),
            Self::X2SetupResponse(_) => Some(ProcedureCode::X2_SETUP),
            Self::ResetResponse(_) => Some(ProcedureCode::RESET),
            Self::Other(_) => None,
        }
    }

    pub fn ies(&self) -> &ProtocolIeContainer {
        match self {
            Self::HandoverRequestAcknowledge(ies)
            | Self::X2SetupResponse(ies)
            | Self::ResetResponse(ies)
            | Self::Other(ies) => ies,
        }
    }

    fn decode_for(procedure_code: ProcedureCode, decoder: &mut AperDecoder) -> PerResult<Self> {
        let ies = decode_message_body(decoder)?;
        Ok(match procedure_code {
            ProcedureCode::HANDOVER_PREPARATION => Self::HandoverRequestAcknowledge(ies),
            ProcedureCode::X2_SETUP => Self::X2SetupResponse(ies),
            ProcedureCode::RESET => Self::ResetResponse(ies),
            _ => Self::Other(ies),
        })
    }
}

impl AperEncode for SuccessfulOutcomeValue {
    fn encode_aper(&self, encoder: &mut AperEncoder) -> PerResult<()> {
        encode_message_body(encoder, self.ies())
    }
}

impl AperEncode for SuccessfulOutcome {
    fn encode_aper(&self, encoder: &mut AperEncoder) -> PerResult<()> {
        check_procedure_code(
            self.procedure_code,
            self.value.procedure_code(),
            SuccessfulOutcomeValue::TYPED,
            "SuccessfulOutcome",
        )?;
        self.procedure_code.encode_aper(encoder)?;
        self.criticality.encode_aper(encoder)?;
        encoder.encode_open_type(|scratch| self.value.encode_aper(scratch))
    }
}

impl AperDecode for SuccessfulOutcome {
    fn decode_aper(decoder: &mut AperDecoder) -> PerResult<Self> {
        let procedure_code = ProcedureCode::decode_aper(decoder)?;
        let criticality = Criticality::decode_aper(decoder)?;
        let value = decoder.decode_open_type(|scratch| SuccessfulOutcomeValue::decode_for(procedure_code, scratch))?;
        Ok(SuccessfulOutcome {
            procedure_code,
            criticality,
            value,
        })
    }
}

// ============================================================================
// UnsuccessfulOutcome
// ============================================================================

/// UnsuccessfulOutcome - Failure responses
/// ASN.1: UnsuccessfulOutcome ::= SEQUENCE { procedureCode, criticality, value }
#[derive(Debug, Clone, PartialEq)]
pub struct UnsuccessfulOutcome {
    pub procedure_code: ProcedureCode,
    pub criticality: Criticality,
    pub value: UnsuccessfulOutcomeValue,
}

impl UnsuccessfulOutcome {
    pub fn new(procedure_code: ProcedureCode, value: UnsuccessfulOutcomeValue) -> Self {
        Self {
            procedure_code,
            criticality: procedure_code.criticality(),
            value,
        }
    }
}

/// Value types for UnsuccessfulOutcome
#[derive(Debug, Clone, PartialEq)]
pub enum UnsuccessfulOutcomeValue {
    HandoverPreparationFailure(ProtocolIeContainer),
    X2SetupFailure(ProtocolIeContainer),
    Other(ProtocolIeContainer),
}

impl UnsuccessfulOutcomeValue {
    const TYPED: &'static [ProcedureCode] = &[ProcedureCode::HANDOVER_PREPARATION, ProcedureCode::X2_SETUP];

    pub fn procedure_code(&self) -> Option<ProcedureCode> {
        match self {
            Self::HandoverPreparationFailure(_) => Some(ProcedureCode::HANDOVER_PREPARATION),
            Self::X2SetupFailure(_) => Some(ProcedureCode::X2_SETUP),
            Self::Other(_) => None,
        }
    }

    pub fn ies(&self) -> &ProtocolIeContainer {
        match self {
            Self::HandoverPreparationFailure(ies) | Self::X2SetupFailure(ies) | Self::Other(ies) => ies,
        }
    }

    fn decode_for(procedure_code: ProcedureCode, decoder: &mut AperDecoder) -> PerResult<Self> {
        let ies = decode_message_body(decoder)?;
        Ok(match procedure_code {
            ProcedureCode::HANDOVER_PREPARATION => Self::HandoverPreparationFailure(ies),
            ProcedureCode::X2_SETUP => Self::X2SetupFailure(ies),
            _ => Self::Other(ies),
        })
    }
}

impl AperEncode for UnsuccessfulOutcomeValue {
    fn encode_aper(&self, encoder: &mut AperEncoder) -> PerResult<()> {
        encode_message_body(encoder, self.ies())
    }
}

impl AperEncode for UnsuccessfulOutcome {
    fn encode_aper(&self, encoder: &mut AperEncoder) -> PerResult<()> {
        check_procedure_code(
            self.procedure_code,
            self.value.procedure_code(),
            UnsuccessfulOutcomeValue::TYPED,
            "UnsuccessfulOutcome",
        )?;
        self.procedure_code.encode_aper(encoder)?;
        self.criticality.encode_aper(encoder)?;
        encoder.encode_open_type(|scratch| self.value.encode_aper(scratch))
    }
}

impl AperDecode for UnsuccessfulOutcome {
    fn decode_aper(decoder: &mut AperDecoder) -> PerResult<Self> {
        let procedure_code = ProcedureCode::decode_aper(decoder)?;
        let criticality = Criticality::decode_aper(decoder)?;
        let value =
            decoder.decode_open_type(|scratch| UnsuccessfulOutcomeValue::decode_for(procedure_code, scratch))?;
        Ok(UnsuccessfulOutcome {
            procedure_code,
            criticality,
            value,
        })
    }
}
