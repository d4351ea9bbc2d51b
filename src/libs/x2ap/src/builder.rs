//! X2AP Message Builders
//!
//! Functions for building X2AP PDUs from high-level types. Each function
//! fills the IE container in the order the procedure's message lists its
//! IEs, skipping absent optional ones, and wraps it in the matching PDU
//! alternative.

use x2ap_asn1c::config::CodecConfig;
use x2ap_asn1c::x2ap::{
    Criticality, InitiatingMessage, InitiatingMessageValue, PrivateIeContainer, ProcedureCode,
    ProtocolIeContainer, SuccessfulOutcome, SuccessfulOutcomeValue, UnsuccessfulOutcome,
    UnsuccessfulOutcomeValue, X2apPdu,
};

use crate::error::X2apResult;
use crate::ie;
use crate::parser::X2apMessage;
use crate::types::*;

/// Build the PDU for any typed message
pub fn build_message(msg: &X2apMessage, config: &CodecConfig) -> X2apResult<X2apPdu> {
    match msg {
        X2apMessage::HandoverRequest(m) => build_handover_request(m, config),
        X2apMessage::HandoverRequestAcknowledge(m) => build_handover_request_acknowledge(m, config),
        X2apMessage::HandoverPreparationFailure(m) => build_handover_preparation_failure(m, config),
        X2apMessage::HandoverCancel(m) => build_handover_cancel(m, config),
        X2apMessage::ErrorIndication(m) => build_error_indication(m, config),
        X2apMessage::SnStatusTransfer(m) => build_sn_status_transfer(m, config),
        X2apMessage::UeContextRelease(m) => build_ue_context_release(m, config),
        X2apMessage::X2SetupRequest(m) => build_x2_setup_request(m, config),
        X2apMessage::X2SetupResponse(m) => build_x2_setup_response(m, config),
        X2apMessage::X2SetupFailure(m) => build_x2_setup_failure(m, config),
        X2apMessage::ResetRequest(m) => build_reset_request(m, config),
        X2apMessage::ResetResponse(m) => build_reset_response(m, config),
        X2apMessage::PrivateMessage(m) => Ok(build_private_message(m)),
    }
}

fn initiating(procedure_code: ProcedureCode, value: InitiatingMessageValue) -> X2apPdu {
    X2apPdu::InitiatingMessage(InitiatingMessage::new(procedure_code, value))
}

fn successful(procedure_code: ProcedureCode, value: SuccessfulOutcomeValue) -> X2apPdu {
    X2apPdu::SuccessfulOutcome(SuccessfulOutcome::new(procedure_code, value))
}

fn unsuccessful(procedure_code: ProcedureCode, value: UnsuccessfulOutcomeValue) -> X2apPdu {
    X2apPdu::UnsuccessfulOutcome(UnsuccessfulOutcome::new(procedure_code, value))
}

// ============================================================================
// Handover Preparation
// ============================================================================

/// Build a Handover Request PDU
pub fn build_handover_request(msg: &HandoverRequest, config: &CodecConfig) -> X2apResult<X2apPdu> {
    let mut container = ProtocolIeContainer::new();

    ie::encode_old_enb_ue_x2ap_id(&mut container, msg.old_enb_ue_x2ap_id, Criticality::Reject, config)?;
    ie::encode_cause(&mut container, &msg.cause, config)?;
    ie::encode_target_cell_id(&mut container, &msg.target_cell_id, config)?;
    ie::encode_gummei(&mut container, &msg.gummei, config)?;
    ie::encode_ue_context_information(&mut container, &msg.ue_context_information, config)?;
    ie::encode_ue_history_information_ie(&mut container, &msg.ue_history_information, config)?;

    if let Some(srvcc) = msg.srvcc_operation_possible {
        ie::encode_srvcc_operation_possible(&mut container, srvcc, config)?;
    }
    if let Some(status) = msg.csg_membership_status {
        ie::encode_csg_membership_status(&mut container, status, config)?;
    }

    Ok(initiating(
        ProcedureCode::HANDOVER_PREPARATION,
        InitiatingMessageValue::HandoverRequest(container),
    ))
}

/// Build a Handover Request Acknowledge PDU
pub fn build_handover_request_acknowledge(
    msg: &HandoverRequestAcknowledge,
    config: &CodecConfig,
) -> X2apResult<X2apPdu> {
    let mut container = ProtocolIeContainer::new();

    ie::encode_old_enb_ue_x2ap_id(&mut container, msg.old_enb_ue_x2ap_id, Criticality::Ignore, config)?;
    ie::encode_new_enb_ue_x2ap_id(&mut container, msg.new_enb_ue_x2ap_id, config)?;
    ie::encode_e_rabs_admitted_list(&mut container, &msg.e_rabs_admitted_list, config)?;
    if let Some(ref items) = msg.e_rabs_not_admitted_list {
        ie::encode_e_rabs_not_admitted_list(&mut container, items, config)?;
    }
    ie::encode_target_to_source_transparent_container(
        &mut container,
        &msg.target_to_source_transparent_container,
        config,
    )?;
    if let Some(ref diagnostics) = msg.criticality_diagnostics {
        ie::encode_criticality_diagnostics(&mut container, diagnostics, config)?;
    }

    Ok(successful(
        ProcedureCode::HANDOVER_PREPARATION,
        SuccessfulOutcomeValue::HandoverRequestAcknowledge(container),
    ))
}

/// Build a Handover Preparation Failure PDU
pub fn build_handover_preparation_failure(
    msg: &HandoverPreparationFailure,
    config: &CodecConfig,
) -> X2apResult<X2apPdu> {
    let mut container = ProtocolIeContainer::new();

    ie::encode_old_enb_ue_x2ap_id(&mut container, msg.old_enb_ue_x2ap_id, Criticality::Ignore, config)?;
    ie::encode_cause(&mut container, &msg.cause, config)?;
    if let Some(ref diagnostics) = msg.criticality_diagnostics {
        ie::encode_criticality_diagnostics(&mut container, diagnostics, config)?;
    }

    Ok(unsuccessful(
        ProcedureCode::HANDOVER_PREPARATION,
        UnsuccessfulOutcomeValue::HandoverPreparationFailure(container),
    ))
}

/// Build a Handover Cancel PDU
pub fn build_handover_cancel(msg: &HandoverCancel, config: &CodecConfig) -> X2apResult<X2apPdu> {
    let mut container = ProtocolIeContainer::new();

    ie::encode_old_enb_ue_x2ap_id(&mut container, msg.old_enb_ue_x2ap_id, Criticality::Reject, config)?;
    if let Some(id) = msg.new_enb_ue_x2ap_id {
        ie::encode_new_enb_ue_x2ap_id(&mut container, id, config)?;
    }
    ie::encode_cause(&mut container, &msg.cause, config)?;

    Ok(initiating(
        ProcedureCode::HANDOVER_CANCEL,
        InitiatingMessageValue::HandoverCancel(container),
    ))
}

// ============================================================================
// SN Status Transfer / UE Context Release
// ============================================================================

/// Build an SN Status Transfer PDU. The old eNB's ID goes first.
pub fn build_sn_status_transfer(msg: &SnStatusTransfer, config: &CodecConfig) -> X2apResult<X2apPdu> {
    let mut container = ProtocolIeContainer::new();

    ie::encode_ue_x2ap_id(&mut container, msg.old_enb_ue_x2ap_id, config)?;
    ie::encode_ue_x2ap_id(&mut container, msg.new_enb_ue_x2ap_id, config)?;
    ie::encode_e_rabs_subject_to_status_transfer_list(
        &mut container,
        &msg.e_rabs_subject_to_status_transfer_list,
        config,
    )?;

    Ok(initiating(
        ProcedureCode::SN_STATUS_TRANSFER,
        InitiatingMessageValue::SnStatusTransfer(container),
    ))
}

/// Build a UE Context Release PDU. The old eNB's ID goes first.
pub fn build_ue_context_release(msg: &UeContextRelease, config: &CodecConfig) -> X2apResult<X2apPdu> {
    let mut container = ProtocolIeContainer::new();

    ie::encode_ue_x2ap_id(&mut container, msg.old_enb_ue_x2ap_id, config)?;
    ie::encode_ue_x2ap_id(&mut container, msg.new_enb_ue_x2ap_id, config)?;

    Ok(initiating(
        ProcedureCode::UE_CONTEXT_RELEASE,
        InitiatingMessageValue::UeContextRelease(container),
    ))
}

// ============================================================================
// Global procedures
// ============================================================================

/// Build an Error Indication PDU
pub fn build_error_indication(msg: &ErrorIndication, config: &CodecConfig) -> X2apResult<X2apPdu> {
    let mut container = ProtocolIeContainer::new();

    if let Some(id) = msg.old_enb_ue_x2ap_id {
        ie::encode_old_enb_ue_x2ap_id(&mut container, id, Criticality::Ignore, config)?;
    }
    if let Some(id) = msg.new_enb_ue_x2ap_id {
        ie::encode_new_enb_ue_x2ap_id(&mut container, id, config)?;
    }
    if let Some(ref cause) = msg.cause {
        ie::encode_cause(&mut container, cause, config)?;
    }
    if let Some(ref diagnostics) = msg.criticality_diagnostics {
        ie::encode_criticality_diagnostics(&mut container, diagnostics, config)?;
    }

    Ok(initiating(
        ProcedureCode::ERROR_INDICATION,
        InitiatingMessageValue::ErrorIndication(container),
    ))
}

/// Build an X2 Setup Request PDU
pub fn build_x2_setup_request(msg: &X2SetupRequest, config: &CodecConfig) -> X2apResult<X2apPdu> {
    let mut container = ProtocolIeContainer::new();

    ie::encode_global_enb_id(&mut container, &msg.global_enb_id, config)?;
    ie::encode_served_cells_ie(&mut container, &msg.served_cells, config)?;
    if let Some(ref groups) = msg.gu_group_id_list {
        ie::encode_gu_group_id_list_ie(&mut container, groups, config)?;
    }

    Ok(initiating(
        ProcedureCode::X2_SETUP,
        InitiatingMessageValue::X2SetupRequest(container),
    ))
}

/// Build an X2 Setup Response PDU
pub fn build_x2_setup_response(msg: &X2SetupResponse, config: &CodecConfig) -> X2apResult<X2apPdu> {
    let mut container = ProtocolIeContainer::new();

    ie::encode_global_enb_id(&mut container, &msg.global_enb_id, config)?;
    ie::encode_served_cells_ie(&mut container, &msg.served_cells, config)?;
    if let Some(ref groups) = msg.gu_group_id_list {
        ie::encode_gu_group_id_list_ie(&mut container, groups, config)?;
    }
    if let Some(ref diagnostics) = msg.criticality_diagnostics {
        ie::encode_criticality_diagnostics(&mut container, diagnostics, config)?;
    }

    Ok(successful(
        ProcedureCode::X2_SETUP,
        SuccessfulOutcomeValue::X2SetupResponse(container),
    ))
}

/// Build an X2 Setup Failure PDU
pub fn build_x2_setup_failure(msg: &X2SetupFailure, config: &CodecConfig) -> X2apResult<X2apPdu> {
    let mut container = ProtocolIeContainer::new();

    ie::encode_cause(&mut container, &msg.cause, config)?;
    if let Some(time_to_wait) = msg.time_to_wait {
        ie::encode_time_to_wait(&mut container, time_to_wait, config)?;
    }
    if let Some(ref diagnostics) = msg.criticality_diagnostics {
        ie::encode_criticality_diagnostics(&mut container, diagnostics, config)?;
    }

    Ok(unsuccessful(
        ProcedureCode::X2_SETUP,
        UnsuccessfulOutcomeValue::X2SetupFailure(container),
    ))
}

/// Build a Reset Request PDU
pub fn build_reset_request(msg: &ResetRequest, config: &CodecConfig) -> X2apResult<X2apPdu> {
    let mut container = ProtocolIeContainer::new();
    ie::encode_cause(&mut container, &msg.cause, config)?;

    Ok(initiating(ProcedureCode::RESET, InitiatingMessageValue::ResetRequest(container)))
}

/// Build a Reset Response PDU
pub fn build_reset_response(msg: &ResetResponse, config: &CodecConfig) -> X2apResult<X2apPdu> {
    let mut container = ProtocolIeContainer::new();
    if let Some(ref diagnostics) = msg.criticality_diagnostics {
        ie::encode_criticality_diagnostics(&mut container, diagnostics, config)?;
    }

    Ok(successful(ProcedureCode::RESET, SuccessfulOutcomeValue::ResetResponse(container)))
}

/// Build a Private Message PDU. Private IE values are already encoded.
pub fn build_private_message(msg: &PrivateMessage) -> X2apPdu {
    initiating(
        ProcedureCode::PRIVATE_MESSAGE,
        InitiatingMessageValue::PrivateMessage(PrivateIeContainer {
            ies: msg.private_ies.clone(),
        }),
    )
}
