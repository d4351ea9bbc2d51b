//! X2AP Basic Types
//!
//! Basic types from X2AP-CommonDataTypes and X2AP-IEs (3GPP TS 36.423)

use crate::per::{
    AperDecode, AperDecoder, AperEncode, AperEncoder, Constraint, PerError, PerResult,
    SizeConstraint,
};

aper_enumerated! {
    /// Criticality - indicates how to handle unrecognized IEs
    /// ASN.1: Criticality ::= ENUMERATED { reject, ignore, notify }
    pub enum Criticality (fixed) {
        Reject = 0,
        Ignore = 1,
        Notify = 2,
    }
}

/// ProcedureCode - identifies the X2AP elementary procedure
/// ASN.1: ProcedureCode ::= INTEGER (0..255)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProcedureCode(pub u8);

impl ProcedureCode {
    pub const CONSTRAINT: Constraint = Constraint::new(0, 255);

    // Procedure code constants from 3GPP TS 36.423
    pub const HANDOVER_PREPARATION: Self = Self(0);
    pub const HANDOVER_CANCEL: Self = Self(1);
    pub const LOAD_INDICATION: Self = Self(2);
    pub const ERROR_INDICATION: Self = Self(3);
    pub const SN_STATUS_TRANSFER: Self = Self(4);
    pub const UE_CONTEXT_RELEASE: Self = Self(5);
    pub const X2_SETUP: Self = Self(6);
    pub const RESET: Self = Self(7);
    pub const ENB_CONFIGURATION_UPDATE: Self = Self(8);
    pub const RESOURCE_STATUS_REPORTING_INITIATION: Self = Self(9);
    pub const RESOURCE_STATUS_REPORTING: Self = Self(10);
    pub const PRIVATE_MESSAGE: Self = Self(11);
    pub const MOBILITY_SETTINGS_CHANGE: Self = Self(12);
    pub const RLF_INDICATION: Self = Self(13);
    pub const HANDOVER_REPORT: Self = Self(14);
    pub const CELL_ACTIVATION: Self = Self(15);
    pub const X2_RELEASE: Self = Self(16);

    /// Criticality of the procedure in the elementary procedure tables.
    pub fn criticality(&self) -> Criticality {
        match *self {
            Self::HANDOVER_PREPARATION | Self::X2_SETUP | Self::RESET => Criticality::Reject,
            _ => Criticality::Ignore,
        }
    }
}

impl AperEncode for ProcedureCode {
    fn encode_aper(&self, encoder: &mut AperEncoder) -> PerResult<()> {
        encoder.encode_constrained_whole_number(self.0 as i64, &Self::CONSTRAINT)
    }
}

impl AperDecode for ProcedureCode {
    fn decode_aper(decoder: &mut AperDecoder) -> PerResult<Self> {
        let value = decoder.decode_constrained_whole_number(&Self::CONSTRAINT)?;
        Ok(ProcedureCode(value as u8))
    }
}

/// ProtocolIE-ID - identifies the Information Element
/// ASN.1: ProtocolIE-ID ::= INTEGER (0..65535)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProtocolIeId(pub u16);

impl ProtocolIeId {
    pub const CONSTRAINT: Constraint = Constraint::new(0, 65535);

    // IE IDs from 3GPP TS 36.423
    pub const E_RABS_ADMITTED_ITEM: Self = Self(0);
    pub const E_RABS_ADMITTED_LIST: Self = Self(1);
    pub const E_RAB_ITEM: Self = Self(2);
    pub const E_RABS_NOT_ADMITTED_LIST: Self = Self(3);
    pub const E_RABS_TO_BE_SETUP_ITEM: Self = Self(4);
    pub const CAUSE: Self = Self(5);
    pub const CELL_INFORMATION: Self = Self(6);
    pub const CELL_INFORMATION_ITEM: Self = Self(7);
    pub const NEW_ENB_UE_X2AP_ID: Self = Self(9);
    pub const OLD_ENB_UE_X2AP_ID: Self = Self(10);
    pub const TARGET_CELL_ID: Self = Self(11);
    pub const TARGET_ENB_TO_SOURCE_ENB_TRANSPARENT_CONTAINER: Self = Self(12);
    pub const TRACE_ACTIVATION: Self = Self(13);
    pub const UE_CONTEXT_INFORMATION: Self = Self(14);
    pub const UE_HISTORY_INFORMATION: Self = Self(15);
    pub const UE_X2AP_ID: Self = Self(16);
    pub const CRITICALITY_DIAGNOSTICS: Self = Self(17);
    pub const E_RABS_SUBJECT_TO_STATUS_TRANSFER_LIST: Self = Self(18);
    pub const E_RABS_SUBJECT_TO_STATUS_TRANSFER_ITEM: Self = Self(19);
    pub const SERVED_CELLS: Self = Self(20);
    pub const GLOBAL_ENB_ID: Self = Self(21);
    pub const TIME_TO_WAIT: Self = Self(22);
    pub const GUMMEI_ID: Self = Self(23);
    pub const GU_GROUP_ID_LIST: Self = Self(24);
    pub const SRVCC_OPERATION_POSSIBLE: Self = Self(36);
    pub const CSG_MEMBERSHIP_STATUS: Self = Self(71);
}

impl AperEncode for ProtocolIeId {
    fn encode_aper(&self, encoder: &mut AperEncoder) -> PerResult<()> {
        encoder.encode_constrained_whole_number(self.0 as i64, &Self::CONSTRAINT)
    }
}

impl AperDecode for ProtocolIeId {
    fn decode_aper(decoder: &mut AperDecoder) -> PerResult<Self> {
        let value = decoder.decode_constrained_whole_number(&Self::CONSTRAINT)?;
        Ok(ProtocolIeId(value as u16))
    }
}

/// PrivateIE-ID
/// ASN.1: PrivateIE-ID ::= CHOICE { local INTEGER (0..65535), global OBJECT IDENTIFIER }
///
/// Only the discriminator of the global alternative is carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrivateIeId {
    Local(u16),
    Global,
}

impl AperEncode for PrivateIeId {
    fn encode_aper(&self, encoder: &mut AperEncoder) -> PerResult<()> {
        match self {
            PrivateIeId::Local(id) => {
                encoder.encode_choice_index(0, 2, false, "PrivateIE-ID")?;
                encoder.encode_constrained_whole_number(*id as i64, &ProtocolIeId::CONSTRAINT)
            }
            PrivateIeId::Global => encoder.encode_choice_index(1, 2, false, "PrivateIE-ID"),
        }
    }
}

impl AperDecode for PrivateIeId {
    fn decode_aper(decoder: &mut AperDecoder) -> PerResult<Self> {
        match decoder.decode_choice_index(2, false, "PrivateIE-ID")? {
            0 => {
                let id = decoder.decode_constrained_whole_number(&ProtocolIeId::CONSTRAINT)?;
                Ok(PrivateIeId::Local(id as u16))
            }
            _ => Ok(PrivateIeId::Global),
        }
    }
}

aper_enumerated! {
    /// TriggeringMessage - indicates which message triggered the error
    /// ASN.1: TriggeringMessage ::= ENUMERATED { initiating-message, successful-outcome, unsuccessful-outcome }
    pub enum TriggeringMessage (fixed) {
        InitiatingMessage = 0,
        SuccessfulOutcome = 1,
        UnsuccessfulOutcome = 2,
    }
}

aper_enumerated! {
    /// ASN.1: TypeOfError ::= ENUMERATED { not-understood, missing, ... }
    pub enum TypeOfError (extensible) {
        NotUnderstood = 0,
        Missing = 1,
    }
}

aper_enumerated! {
    /// ASN.1: TimeToWait ::= ENUMERATED { v1s, v2s, v5s, v10s, v20s, v60s, ... }
    pub enum TimeToWait (extensible) {
        V1s = 0,
        V2s = 1,
        V5s = 2,
        V10s = 3,
        V20s = 4,
        V60s = 5,
    }
}

/// One entry of CriticalityDiagnostics-IE-List
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CriticalityDiagnosticsIeItem {
    pub ie_criticality: Criticality,
    pub ie_id: ProtocolIeId,
    pub type_of_error: TypeOfError,
}

impl AperEncode for CriticalityDiagnosticsIeItem {
    fn encode_aper(&self, encoder: &mut AperEncoder) -> PerResult<()> {
        encoder.encode_sequence_preamble(true, &[false])?;
        self.ie_criticality.encode_aper(encoder)?;
        self.ie_id.encode_aper(encoder)?;
        self.type_of_error.encode_aper(encoder)
    }
}

impl AperDecode for CriticalityDiagnosticsIeItem {
    fn decode_aper(decoder: &mut AperDecoder) -> PerResult<Self> {
        let [ext] = decoder.decode_sequence_preamble(true, "CriticalityDiagnostics-IE-Item")?;
        reject_ie_extensions(ext, "CriticalityDiagnostics-IE-Item")?;
        Ok(Self {
            ie_criticality: Criticality::decode_aper(decoder)?,
            ie_id: ProtocolIeId::decode_aper(decoder)?,
            type_of_error: TypeOfError::decode_aper(decoder)?,
        })
    }
}

/// CriticalityDiagnostics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CriticalityDiagnostics {
    pub procedure_code: Option<ProcedureCode>,
    pub triggering_message: Option<TriggeringMessage>,
    pub procedure_criticality: Option<Criticality>,
    pub ies_criticality_diagnostics: Option<Vec<CriticalityDiagnosticsIeItem>>,
}

impl CriticalityDiagnostics {
    /// ASN.1: SIZE (1..maxNrOfErrors)
    pub const IE_LIST_SIZE: SizeConstraint = SizeConstraint::range(1, 256);
}

impl AperEncode for CriticalityDiagnostics {
    fn encode_aper(&self, encoder: &mut AperEncoder) -> PerResult<()> {
        encoder.encode_sequence_preamble(
            true,
            &[
                self.procedure_code.is_some(),
                self.triggering_message.is_some(),
                self.procedure_criticality.is_some(),
                self.ies_criticality_diagnostics.is_some(),
                false,
            ],
        )?;
        if let Some(code) = &self.procedure_code {
            code.encode_aper(encoder)?;
        }
        if let Some(trigger) = &self.triggering_message {
            trigger.encode_aper(encoder)?;
        }
        if let Some(criticality) = &self.procedure_criticality {
            criticality.encode_aper(encoder)?;
        }
        if let Some(items) = &self.ies_criticality_diagnostics {
            encoder.encode_sequence_of(items, &Self::IE_LIST_SIZE, "CriticalityDiagnostics-IE-List")?;
        }
        Ok(())
    }
}

impl AperDecode for CriticalityDiagnostics {
    fn decode_aper(decoder: &mut AperDecoder) -> PerResult<Self> {
        let [code, trigger, criticality, items, ext] =
            decoder.decode_sequence_preamble(true, "CriticalityDiagnostics")?;
        reject_ie_extensions(ext, "CriticalityDiagnostics")?;

        let procedure_code = code.then(|| ProcedureCode::decode_aper(decoder)).transpose()?;
        let triggering_message = trigger
            .then(|| TriggeringMessage::decode_aper(decoder))
            .transpose()?;
        let procedure_criticality = criticality
            .then(|| Criticality::decode_aper(decoder))
            .transpose()?;
        let ies_criticality_diagnostics = items
            .then(|| decoder.decode_sequence_of(&Self::IE_LIST_SIZE, "CriticalityDiagnostics-IE-List"))
            .transpose()?;

        Ok(Self {
            procedure_code,
            triggering_message,
            procedure_criticality,
            ies_criticality_diagnostics,
        })
    }
}

/// A set `iE-Extensions` presence bit announces content this codec cannot
/// represent.
pub fn reject_ie_extensions(present: bool, type_name: &'static str) -> PerResult<()> {
    if present {
        log::warn!("{type_name}: iE-Extensions are not supported");
        return Err(PerError::UnsupportedExtension { type_name });
    }
    Ok(())
}
