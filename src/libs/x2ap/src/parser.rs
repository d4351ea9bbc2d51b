//! X2AP Message Parsers
//!
//! Functions for mapping decoded X2AP PDUs onto high-level types. Each
//! function walks the IE container of one message, decodes the IEs it knows
//! and skips the rest by their envelope length.

use x2ap_asn1c::config::CodecConfig;
use x2ap_asn1c::x2ap::{
    InitiatingMessage, InitiatingMessageValue, ProcedureCode, ProtocolIeContainer, ProtocolIeField,
    ProtocolIeId, SuccessfulOutcome, SuccessfulOutcomeValue, UeX2apId, UnsuccessfulOutcome,
    UnsuccessfulOutcomeValue, X2apPdu,
};

use crate::error::{X2apError, X2apResult};
use crate::ie::{self, required};
use crate::types::*;

/// Decoded X2AP message - one variant per supported message type
#[derive(Debug, Clone, PartialEq)]
pub enum X2apMessage {
    HandoverRequest(HandoverRequest),
    HandoverRequestAcknowledge(HandoverRequestAcknowledge),
    HandoverPreparationFailure(HandoverPreparationFailure),
    HandoverCancel(HandoverCancel),
    ErrorIndication(ErrorIndication),
    SnStatusTransfer(SnStatusTransfer),
    UeContextRelease(UeContextRelease),
    X2SetupRequest(X2SetupRequest),
    X2SetupResponse(X2SetupResponse),
    X2SetupFailure(X2SetupFailure),
    ResetRequest(ResetRequest),
    ResetResponse(ResetResponse),
    PrivateMessage(PrivateMessage),
}

impl X2apMessage {
    /// Elementary procedure this message belongs to
    pub fn procedure_code(&self) -> ProcedureCode {
        match self {
            Self::HandoverRequest(_)
            | Self::HandoverRequestAcknowledge(_)
            | Self::HandoverPreparationFailure(_) => ProcedureCode::HANDOVER_PREPARATION,
            Self::HandoverCancel(_) => ProcedureCode::HANDOVER_CANCEL,
            Self::ErrorIndication(_) => ProcedureCode::ERROR_INDICATION,
            Self::SnStatusTransfer(_) => ProcedureCode::SN_STATUS_TRANSFER,
            Self::UeContextRelease(_) => ProcedureCode::UE_CONTEXT_RELEASE,
            Self::X2SetupRequest(_) | Self::X2SetupResponse(_) | Self::X2SetupFailure(_) => {
                ProcedureCode::X2_SETUP
            }
            Self::ResetRequest(_) | Self::ResetResponse(_) => ProcedureCode::RESET,
            Self::PrivateMessage(_) => ProcedureCode::PRIVATE_MESSAGE,
        }
    }
}

/// Map a decoded X2apPdu onto a high-level X2apMessage
pub fn decode_x2ap_pdu_raw(pdu: X2apPdu, config: &CodecConfig) -> X2apResult<X2apMessage> {
    match pdu {
        X2apPdu::InitiatingMessage(msg) => decode_initiating_message(msg, config),
        X2apPdu::SuccessfulOutcome(msg) => decode_successful_outcome(msg, config),
        X2apPdu::UnsuccessfulOutcome(msg) => decode_unsuccessful_outcome(msg, config),
    }
}

/// The value alternative has to belong to the procedure code it travels with
fn check_procedure_code(
    value_code: Option<ProcedureCode>,
    procedure_code: ProcedureCode,
    message_type: &'static str,
) -> X2apResult<()> {
    match value_code {
        None => Err(X2apError::UnsupportedMessage {
            procedure_code: procedure_code.0,
            message_type,
        }),
        Some(expected) if expected != procedure_code => Err(X2apError::UnexpectedProcedureCode {
            expected: expected.0,
            got: procedure_code.0,
        }),
        Some(_) => Ok(()),
    }
}

// ============================================================================
// Initiating Message dispatch
// ============================================================================

fn decode_initiating_message(msg: InitiatingMessage, config: &CodecConfig) -> X2apResult<X2apMessage> {
    check_procedure_code(msg.value.procedure_code(), msg.procedure_code, "InitiatingMessage")?;

    match msg.value {
        InitiatingMessageValue::HandoverRequest(ies) => {
            Ok(X2apMessage::HandoverRequest(parse_handover_request(ies, config)?))
        }
        InitiatingMessageValue::HandoverCancel(ies) => {
            Ok(X2apMessage::HandoverCancel(parse_handover_cancel(ies, config)?))
        }
        InitiatingMessageValue::ErrorIndication(ies) => {
            Ok(X2apMessage::ErrorIndication(parse_error_indication(ies, config)?))
        }
        InitiatingMessageValue::SnStatusTransfer(ies) => {
            Ok(X2apMessage::SnStatusTransfer(parse_sn_status_transfer(ies, config)?))
        }
        InitiatingMessageValue::UeContextRelease(ies) => {
            Ok(X2apMessage::UeContextRelease(parse_ue_context_release(ies, config)?))
        }
        InitiatingMessageValue::X2SetupRequest(ies) => {
            Ok(X2apMessage::X2SetupRequest(parse_x2_setup_request(ies, config)?))
        }
        InitiatingMessageValue::ResetRequest(ies) => {
            Ok(X2apMessage::ResetRequest(parse_reset_request(ies, config)?))
        }
        InitiatingMessageValue::PrivateMessage(container) => {
            Ok(X2apMessage::PrivateMessage(PrivateMessage {
                private_ies: container.ies,
            }))
        }
        InitiatingMessageValue::Other(_) => Err(X2apError::UnsupportedMessage {
            procedure_code: msg.procedure_code.0,
            message_type: "InitiatingMessage",
        }),
    }
}

// ============================================================================
// Successful Outcome dispatch
// ============================================================================

fn decode_successful_outcome(msg: SuccessfulOutcome, config: &CodecConfig) -> X2apResult<X2apMessage> {
    check_procedure_code(msg.value.procedure_code(), msg.procedure_code, "SuccessfulOutcome")?;

    match msg.value {
        SuccessfulOutcomeValue::HandoverRequestAcknowledge(ies) => Ok(
            X2apMessage::HandoverRequestAcknowledge(parse_handover_request_acknowledge(ies, config)?),
        ),
        SuccessfulOutcomeValue::X2SetupResponse(ies) => {
            Ok(X2apMessage::X2SetupResponse(parse_x2_setup_response(ies, config)?))
        }
        SuccessfulOutcomeValue::ResetResponse(ies) => {
            Ok(X2apMessage::ResetResponse(parse_reset_response(ies, config)?))
        }
        SuccessfulOutcomeValue::Other(_) => Err(X2apError::UnsupportedMessage {
            procedure_code: msg.procedure_code.0,
            message_type: "SuccessfulOutcome",
        }),
    }
}

// ============================================================================
// Unsuccessful Outcome dispatch
// ============================================================================

fn decode_unsuccessful_outcome(
    msg: UnsuccessfulOutcome,
    config: &CodecConfig,
) -> X2apResult<X2apMessage> {
    check_procedure_code(msg.value.procedure_code(), msg.procedure_code, "UnsuccessfulOutcome")?;

    match msg.value {
        UnsuccessfulOutcomeValue::HandoverPreparationFailure(ies) => Ok(
            X2apMessage::HandoverPreparationFailure(parse_handover_preparation_failure(ies, config)?),
        ),
        UnsuccessfulOutcomeValue::X2SetupFailure(ies) => {
            Ok(X2apMessage::X2SetupFailure(parse_x2_setup_failure(ies, config)?))
        }
        UnsuccessfulOutcomeValue::Other(_) => Err(X2apError::UnsupportedMessage {
            procedure_code: msg.procedure_code.0,
            message_type: "UnsuccessfulOutcome",
        }),
    }
}

// ============================================================================
// Shared UE-X2AP-ID slots
// ============================================================================

/// Assignment state for messages that carry both eNB UE X2AP IDs under
/// `id-UE-X2AP-ID`. The first occurrence fills the old eNB's slot, the
/// second the new eNB's; any further occurrence is skipped.
#[derive(Debug, Default)]
struct UeX2apIdSlots {
    old: Option<UeX2apId>,
    new: Option<UeX2apId>,
}

impl UeX2apIdSlots {
    fn assign(&mut self, field: &ProtocolIeField, config: &CodecConfig, message: &'static str) -> X2apResult<()> {
        if self.old.is_none() {
            self.old = Some(ie::decode_ue_x2ap_id(field, config)?);
        } else if self.new.is_none() {
            self.new = Some(ie::decode_ue_x2ap_id(field, config)?);
        } else {
            ie::skip_unknown(field, message);
        }
        Ok(())
    }

    fn into_ids(self) -> X2apResult<(UeX2apId, UeX2apId)> {
        Ok((
            required(self.old, "Old-eNB-UE-X2AP-ID", ProtocolIeId::UE_X2AP_ID)?,
            required(self.new, "New-eNB-UE-X2AP-ID", ProtocolIeId::UE_X2AP_ID)?,
        ))
    }
}

// ============================================================================
// Handover Preparation / Cancel parsers
// ============================================================================

fn parse_handover_request(container: ProtocolIeContainer, config: &CodecConfig) -> X2apResult<HandoverRequest> {
    let mut old_enb_ue_x2ap_id = None;
    let mut cause = None;
    let mut target_cell_id = None;
    let mut gummei = None;
    let mut ue_context_information = None;
    let mut ue_history_information = None;
    let mut srvcc_operation_possible = None;
    let mut csg_membership_status = None;

    for field in &container.ies {
        match field.id {
            ProtocolIeId::OLD_ENB_UE_X2AP_ID => {
                old_enb_ue_x2ap_id = Some(ie::decode_ue_x2ap_id(field, config)?);
            }
            ProtocolIeId::CAUSE => {
                cause = Some(ie::decode_cause(field, config)?);
            }
            ProtocolIeId::TARGET_CELL_ID => {
                target_cell_id = Some(ie::decode_target_cell_id(field, config)?);
            }
            ProtocolIeId::GUMMEI_ID => {
                gummei = Some(ie::decode_gummei(field, config)?);
            }
            ProtocolIeId::UE_CONTEXT_INFORMATION => {
                ue_context_information = Some(ie::decode_ue_context_information(field, config)?);
            }
            ProtocolIeId::UE_HISTORY_INFORMATION => {
                ue_history_information = Some(ie::decode_ue_history_information_ie(field, config)?);
            }
            ProtocolIeId::SRVCC_OPERATION_POSSIBLE => {
                srvcc_operation_possible = Some(ie::decode_srvcc_operation_possible(field, config)?);
            }
            ProtocolIeId::CSG_MEMBERSHIP_STATUS => {
                csg_membership_status = Some(ie::decode_csg_membership_status(field, config)?);
            }
            _ => ie::skip_unknown(field, "HandoverRequest"),
        }
    }

    Ok(HandoverRequest {
        old_enb_ue_x2ap_id: required(old_enb_ue_x2ap_id, "Old-eNB-UE-X2AP-ID", ProtocolIeId::OLD_ENB_UE_X2AP_ID)?,
        cause: required(cause, "Cause", ProtocolIeId::CAUSE)?,
        target_cell_id: required(target_cell_id, "TargetCell-ID", ProtocolIeId::TARGET_CELL_ID)?,
        gummei: required(gummei, "GUMMEI", ProtocolIeId::GUMMEI_ID)?,
        ue_context_information: required(
            ue_context_information,
            "UE-ContextInformation",
            ProtocolIeId::UE_CONTEXT_INFORMATION,
        )?,
        ue_history_information: required(
            ue_history_information,
            "UE-HistoryInformation",
            ProtocolIeId::UE_HISTORY_INFORMATION,
        )?,
        srvcc_operation_possible,
        csg_membership_status,
    })
}

fn parse_handover_request_acknowledge(
    container: ProtocolIeContainer,
    config: &CodecConfig,
) -> X2apResult<HandoverRequestAcknowledge> {
    let mut old_enb_ue_x2ap_id = None;
    let mut new_enb_ue_x2ap_id = None;
    let mut e_rabs_admitted_list = None;
    let mut e_rabs_not_admitted_list = None;
    let mut transparent_container = None;
    let mut criticality_diagnostics = None;

    for field in &container.ies {
        match field.id {
            ProtocolIeId::OLD_ENB_UE_X2AP_ID => {
                old_enb_ue_x2ap_id = Some(ie::decode_ue_x2ap_id(field, config)?);
            }
            ProtocolIeId::NEW_ENB_UE_X2AP_ID => {
                new_enb_ue_x2ap_id = Some(ie::decode_ue_x2ap_id(field, config)?);
            }
            ProtocolIeId::E_RABS_ADMITTED_LIST => {
                e_rabs_admitted_list = Some(ie::decode_e_rabs_admitted_list(field, config)?);
            }
            ProtocolIeId::E_RABS_NOT_ADMITTED_LIST => {
                e_rabs_not_admitted_list = Some(ie::decode_e_rabs_not_admitted_list(field, config)?);
            }
            ProtocolIeId::TARGET_ENB_TO_SOURCE_ENB_TRANSPARENT_CONTAINER => {
                transparent_container =
                    Some(ie::decode_target_to_source_transparent_container(field, config)?);
            }
            ProtocolIeId::CRITICALITY_DIAGNOSTICS => {
                criticality_diagnostics = Some(ie::decode_criticality_diagnostics(field, config)?);
            }
            _ => ie::skip_unknown(field, "HandoverRequestAcknowledge"),
        }
    }

    Ok(HandoverRequestAcknowledge {
        old_enb_ue_x2ap_id: required(old_enb_ue_x2ap_id, "Old-eNB-UE-X2AP-ID", ProtocolIeId::OLD_ENB_UE_X2AP_ID)?,
        new_enb_ue_x2ap_id: required(new_enb_ue_x2ap_id, "New-eNB-UE-X2AP-ID", ProtocolIeId::NEW_ENB_UE_X2AP_ID)?,
        e_rabs_admitted_list: required(
            e_rabs_admitted_list,
            "E-RABs-Admitted-List",
            ProtocolIeId::E_RABS_ADMITTED_LIST,
        )?,
        e_rabs_not_admitted_list,
        target_to_source_transparent_container: required(
            transparent_container,
            "TargeteNBtoSource-eNBTransparentContainer",
            ProtocolIeId::TARGET_ENB_TO_SOURCE_ENB_TRANSPARENT_CONTAINER,
        )?,
        criticality_diagnostics,
    })
}

fn parse_handover_preparation_failure(
    container: ProtocolIeContainer,
    config: &CodecConfig,
) -> X2apResult<HandoverPreparationFailure> {
    let mut old_enb_ue_x2ap_id = None;
    let mut cause = None;
    let mut criticality_diagnostics = None;

    for field in &container.ies {
        match field.id {
            ProtocolIeId::OLD_ENB_UE_X2AP_ID => {
                old_enb_ue_x2ap_id = Some(ie::decode_ue_x2ap_id(field, config)?);
            }
            ProtocolIeId::CAUSE => {
                cause = Some(ie::decode_cause(field, config)?);
            }
            ProtocolIeId::CRITICALITY_DIAGNOSTICS => {
                criticality_diagnostics = Some(ie::decode_criticality_diagnostics(field, config)?);
            }
            _ => ie::skip_unknown(field, "HandoverPreparationFailure"),
        }
    }

    Ok(HandoverPreparationFailure {
        old_enb_ue_x2ap_id: required(old_enb_ue_x2ap_id, "Old-eNB-UE-X2AP-ID", ProtocolIeId::OLD_ENB_UE_X2AP_ID)?,
        cause: required(cause, "Cause", ProtocolIeId::CAUSE)?,
        criticality_diagnostics,
    })
}

fn parse_handover_cancel(container: ProtocolIeContainer, config: &CodecConfig) -> X2apResult<HandoverCancel> {
    let mut old_enb_ue_x2ap_id = None;
    let mut new_enb_ue_x2ap_id = None;
    let mut cause = None;

    for field in &container.ies {
        match field.id {
            ProtocolIeId::OLD_ENB_UE_X2AP_ID => {
                old_enb_ue_x2ap_id = Some(ie::decode_ue_x2ap_id(field, config)?);
            }
            ProtocolIeId::NEW_ENB_UE_X2AP_ID => {
                new_enb_ue_x2ap_id = Some(ie::decode_ue_x2ap_id(field, config)?);
            }
            ProtocolIeId::CAUSE => {
                cause = Some(ie::decode_cause(field, config)?);
            }
            _ => ie::skip_unknown(field, "HandoverCancel"),
        }
    }

    Ok(HandoverCancel {
        old_enb_ue_x2ap_id: required(old_enb_ue_x2ap_id, "Old-eNB-UE-X2AP-ID", ProtocolIeId::OLD_ENB_UE_X2AP_ID)?,
        new_enb_ue_x2ap_id,
        cause: required(cause, "Cause", ProtocolIeId::CAUSE)?,
    })
}

// ============================================================================
// SN Status Transfer / UE Context Release parsers
// ============================================================================

fn parse_sn_status_transfer(container: ProtocolIeContainer, config: &CodecConfig) -> X2apResult<SnStatusTransfer> {
    let mut ids = UeX2apIdSlots::default();
    let mut status_transfer_list = None;

    for field in &container.ies {
        match field.id {
            ProtocolIeId::UE_X2AP_ID => ids.assign(field, config, "SNStatusTransfer")?,
            ProtocolIeId::E_RABS_SUBJECT_TO_STATUS_TRANSFER_LIST => {
                status_transfer_list =
                    Some(ie::decode_e_rabs_subject_to_status_transfer_list(field, config)?);
            }
            _ => ie::skip_unknown(field, "SNStatusTransfer"),
        }
    }

    let (old_enb_ue_x2ap_id, new_enb_ue_x2ap_id) = ids.into_ids()?;
    Ok(SnStatusTransfer {
        old_enb_ue_x2ap_id,
        new_enb_ue_x2ap_id,
        e_rabs_subject_to_status_transfer_list: required(
            status_transfer_list,
            "E-RABs-SubjectToStatusTransfer-List",
            ProtocolIeId::E_RABS_SUBJECT_TO_STATUS_TRANSFER_LIST,
        )?,
    })
}

fn parse_ue_context_release(container: ProtocolIeContainer, config: &CodecConfig) -> X2apResult<UeContextRelease> {
    let mut ids = UeX2apIdSlots::default();

    for field in &container.ies {
        match field.id {
            ProtocolIeId::UE_X2AP_ID => ids.assign(field, config, "UEContextRelease")?,
            _ => ie::skip_unknown(field, "UEContextRelease"),
        }
    }

    let (old_enb_ue_x2ap_id, new_enb_ue_x2ap_id) = ids.into_ids()?;
    Ok(UeContextRelease {
        old_enb_ue_x2ap_id,
        new_enb_ue_x2ap_id,
    })
}

// ============================================================================
// Global procedure parsers
// ============================================================================

fn parse_error_indication(container: ProtocolIeContainer, config: &CodecConfig) -> X2apResult<ErrorIndication> {
    let mut msg = ErrorIndication::default();

    for field in &container.ies {
        match field.id {
            ProtocolIeId::OLD_ENB_UE_X2AP_ID => {
                msg.old_enb_ue_x2ap_id = Some(ie::decode_ue_x2ap_id(field, config)?);
            }
            ProtocolIeId::NEW_ENB_UE_X2AP_ID => {
                msg.new_enb_ue_x2ap_id = Some(ie::decode_ue_x2ap_id(field, config)?);
            }
            ProtocolIeId::CAUSE => {
                msg.cause = Some(ie::decode_cause(field, config)?);
            }
            ProtocolIeId::CRITICALITY_DIAGNOSTICS => {
                msg.criticality_diagnostics = Some(ie::decode_criticality_diagnostics(field, config)?);
            }
            _ => ie::skip_unknown(field, "ErrorIndication"),
        }
    }

    Ok(msg)
}

fn parse_x2_setup_request(container: ProtocolIeContainer, config: &CodecConfig) -> X2apResult<X2SetupRequest> {
    let mut global_enb_id = None;
    let mut served_cells = None;
    let mut gu_group_id_list = None;

    for field in &container.ies {
        match field.id {
            ProtocolIeId::GLOBAL_ENB_ID => {
                global_enb_id = Some(ie::decode_global_enb_id(field, config)?);
            }
            ProtocolIeId::SERVED_CELLS => {
                served_cells = Some(ie::decode_served_cells_ie(field, config)?);
            }
            ProtocolIeId::GU_GROUP_ID_LIST => {
                gu_group_id_list = Some(ie::decode_gu_group_id_list_ie(field, config)?);
            }
            _ => ie::skip_unknown(field, "X2SetupRequest"),
        }
    }

    Ok(X2SetupRequest {
        global_enb_id: required(global_enb_id, "GlobalENB-ID", ProtocolIeId::GLOBAL_ENB_ID)?,
        served_cells: required(served_cells, "ServedCells", ProtocolIeId::SERVED_CELLS)?,
        gu_group_id_list,
    })
}

fn parse_x2_setup_response(container: ProtocolIeContainer, config: &CodecConfig) -> X2apResult<X2SetupResponse> {
    let mut global_enb_id = None;
    let mut served_cells = None;
    let mut gu_group_id_list = None;
    let mut criticality_diagnostics = None;

    for field in &container.ies {
        match field.id {
            ProtocolIeId::GLOBAL_ENB_ID => {
                global_enb_id = Some(ie::decode_global_enb_id(field, config)?);
            }
            ProtocolIeId::SERVED_CELLS => {
                served_cells = Some(ie::decode_served_cells_ie(field, config)?);
            }
            ProtocolIeId::GU_GROUP_ID_LIST => {
                gu_group_id_list = Some(ie::decode_gu_group_id_list_ie(field, config)?);
            }
            ProtocolIeId::CRITICALITY_DIAGNOSTICS => {
                criticality_diagnostics = Some(ie::decode_criticality_diagnostics(field, config)?);
            }
            _ => ie::skip_unknown(field, "X2SetupResponse"),
        }
    }

    Ok(X2SetupResponse {
        global_enb_id: required(global_enb_id, "GlobalENB-ID", ProtocolIeId::GLOBAL_ENB_ID)?,
        served_cells: required(served_cells, "ServedCells", ProtocolIeId::SERVED_CELLS)?,
        gu_group_id_list,
        criticality_diagnostics,
    })
}

fn parse_x2_setup_failure(container: ProtocolIeContainer, config: &CodecConfig) -> X2apResult<X2SetupFailure> {
    let mut cause = None;
    let mut time_to_wait = None;
    let mut criticality_diagnostics = None;

    for field in &container.ies {
        match field.id {
            ProtocolIeId::CAUSE => {
                cause = Some(ie::decode_cause(field, config)?);
            }
            ProtocolIeId::TIME_TO_WAIT => {
                time_to_wait = Some(ie::decode_time_to_wait(field, config)?);
            }
            ProtocolIeId::CRITICALITY_DIAGNOSTICS => {
                criticality_diagnostics = Some(ie::decode_criticality_diagnostics(field, config)?);
            }
            _ => ie::skip_unknown(field, "X2SetupFailure"),
        }
    }

    Ok(X2SetupFailure {
        cause: required(cause, "Cause", ProtocolIeId::CAUSE)?,
        time_to_wait,
        criticality_diagnostics,
    })
}

fn parse_reset_request(container: ProtocolIeContainer, config: &CodecConfig) -> X2apResult<ResetRequest> {
    let mut cause = None;

    for field in &container.ies {
        match field.id {
            ProtocolIeId::CAUSE => {
                cause = Some(ie::decode_cause(field, config)?);
            }
            _ => ie::skip_unknown(field, "ResetRequest"),
        }
    }

    Ok(ResetRequest {
        cause: required(cause, "Cause", ProtocolIeId::CAUSE)?,
    })
}

fn parse_reset_response(container: ProtocolIeContainer, config: &CodecConfig) -> X2apResult<ResetResponse> {
    let mut criticality_diagnostics = None;

    for field in &container.ies {
        match field.id {
            ProtocolIeId::CRITICALITY_DIAGNOSTICS => {
                criticality_diagnostics = Some(ie::decode_criticality_diagnostics(field, config)?);
            }
            _ => ie::skip_unknown(field, "ResetResponse"),
        }
    }

    Ok(ResetResponse {
        criticality_diagnostics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use x2ap_asn1c::x2ap::{Cause, CauseMisc, Criticality};

    fn ue_x2ap_id_field(id: u16) -> ProtocolIeField {
        ProtocolIeField::from_value(
            ProtocolIeId::UE_X2AP_ID,
            Criticality::Reject,
            &UeX2apId(id),
            &CodecConfig::default(),
        )
        .unwrap()
    }

    fn ue_context_release_pdu(ids: &[u16]) -> X2apPdu {
        let mut container = ProtocolIeContainer::new();
        for &id in ids {
            container.push(ue_x2ap_id_field(id));
        }
        X2apPdu::InitiatingMessage(InitiatingMessage::new(
            ProcedureCode::UE_CONTEXT_RELEASE,
            InitiatingMessageValue::UeContextRelease(container),
        ))
    }

    #[test]
    fn test_ue_x2ap_id_slots_follow_arrival_order() {
        let config = CodecConfig::default();
        let decoded = decode_x2ap_pdu_raw(ue_context_release_pdu(&[4095, 1]), &config).unwrap();
        match decoded {
            X2apMessage::UeContextRelease(msg) => {
                assert_eq!(msg.old_enb_ue_x2ap_id, UeX2apId(4095));
                assert_eq!(msg.new_enb_ue_x2ap_id, UeX2apId(1));
            }
            other => panic!("Expected UeContextRelease, got {other:?}"),
        }
    }

    #[test]
    fn test_ue_x2ap_id_third_occurrence_skipped() {
        let config = CodecConfig::default();
        let decoded = decode_x2ap_pdu_raw(ue_context_release_pdu(&[10, 20, 30]), &config).unwrap();
        assert_eq!(
            decoded,
            X2apMessage::UeContextRelease(UeContextRelease {
                old_enb_ue_x2ap_id: UeX2apId(10),
                new_enb_ue_x2ap_id: UeX2apId(20),
            })
        );
    }

    #[test]
    fn test_ue_x2ap_id_single_occurrence_missing_new() {
        let config = CodecConfig::default();
        let err = decode_x2ap_pdu_raw(ue_context_release_pdu(&[10]), &config).unwrap_err();
        assert_eq!(
            err,
            X2apError::MissingMandatoryIe {
                ie_name: "New-eNB-UE-X2AP-ID",
                ie_id: 16,
            }
        );
    }

    #[test]
    fn test_missing_cause_in_reset_request() {
        let pdu = X2apPdu::InitiatingMessage(InitiatingMessage::new(
            ProcedureCode::RESET,
            InitiatingMessageValue::ResetRequest(ProtocolIeContainer::new()),
        ));
        let err = decode_x2ap_pdu_raw(pdu, &CodecConfig::default()).unwrap_err();
        assert_eq!(
            err,
            X2apError::MissingMandatoryIe {
                ie_name: "Cause",
                ie_id: 5,
            }
        );
    }

    #[test]
    fn test_unknown_ie_ignored() {
        let config = CodecConfig::default();
        let mut container = ProtocolIeContainer::new();
        container.push(ProtocolIeField {
            id: ProtocolIeId(999),
            criticality: Criticality::Ignore,
            value: vec![0xAB; 40].into(),
        });
        container.push(
            ProtocolIeField::from_value(
                ProtocolIeId::CAUSE,
                Criticality::Ignore,
                &Cause::Misc(CauseMisc::OmIntervention),
                &config,
            )
            .unwrap(),
        );
        let pdu = X2apPdu::InitiatingMessage(InitiatingMessage::new(
            ProcedureCode::RESET,
            InitiatingMessageValue::ResetRequest(container),
        ));

        match decode_x2ap_pdu_raw(pdu, &config).unwrap() {
            X2apMessage::ResetRequest(msg) => {
                assert_eq!(msg.cause, Cause::Misc(CauseMisc::OmIntervention));
            }
            other => panic!("Expected ResetRequest, got {other:?}"),
        }
    }

    #[test]
    fn test_procedure_code_mismatch() {
        let pdu = X2apPdu::InitiatingMessage(InitiatingMessage {
            procedure_code: ProcedureCode::RESET,
            criticality: Criticality::Reject,
            value: InitiatingMessageValue::UeContextRelease(ProtocolIeContainer::new()),
        });
        let err = decode_x2ap_pdu_raw(pdu, &CodecConfig::default()).unwrap_err();
        assert_eq!(err, X2apError::UnexpectedProcedureCode { expected: 5, got: 7 });
    }

    #[test]
    fn test_untyped_procedure_unsupported() {
        let pdu = X2apPdu::SuccessfulOutcome(SuccessfulOutcome::new(
            ProcedureCode::ENB_CONFIGURATION_UPDATE,
            SuccessfulOutcomeValue::Other(ProtocolIeContainer::new()),
        ));
        let err = decode_x2ap_pdu_raw(pdu, &CodecConfig::default()).unwrap_err();
        assert_eq!(
            err,
            X2apError::UnsupportedMessage {
                procedure_code: 8,
                message_type: "SuccessfulOutcome",
            }
        );
    }
}
