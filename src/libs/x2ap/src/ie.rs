//! X2AP IE Encoding/Decoding Helpers
//!
//! Functions for encoding individual Information Elements into
//! ProtocolIeField envelopes, and decoding them back. Every value is encoded
//! into its own scratch encoder sharing the caller's `CodecConfig`.

use x2ap_asn1c::config::CodecConfig;
use x2ap_asn1c::per::{AperDecode, AperDecoder, AperEncode, AperEncoder, SizeConstraint};
use x2ap_asn1c::x2ap::{
    decode_erab_list, decode_erabs_admitted_list, decode_erabs_subject_to_status_transfer_list,
    decode_gu_group_id_list, decode_served_cells, decode_ue_history_information, encode_erab_list,
    encode_erabs_admitted_list, encode_erabs_subject_to_status_transfer_list,
    encode_gu_group_id_list, encode_served_cells, encode_ue_history_information, Cause,
    Criticality, CriticalityDiagnostics, CsgMembershipStatus, ERabItem, ERabsAdmittedItem,
    ERabsSubjectToStatusTransferItem, Ecgi, GlobalEnbId, GuGroupId, Gummei, LastVisitedCell,
    ProtocolIeContainer, ProtocolIeField, ProtocolIeId, ServedCellsItem, SrvccOperationPossible,
    TimeToWait, UeContextInformation, UeX2apId,
};

use crate::error::{X2apError, X2apResult};

// ============================================================================
// Generic helpers
// ============================================================================

/// Encode `value` and append it to `container` under `id`
fn push_ie<T: AperEncode>(
    container: &mut ProtocolIeContainer,
    id: ProtocolIeId,
    criticality: Criticality,
    value: &T,
    config: &CodecConfig,
) -> X2apResult<()> {
    container.push(ProtocolIeField::from_value(id, criticality, value, config)?);
    Ok(())
}

fn push_ie_with<F>(
    container: &mut ProtocolIeContainer,
    id: ProtocolIeId,
    criticality: Criticality,
    config: &CodecConfig,
    encode: F,
) -> X2apResult<()>
where
    F: FnOnce(&mut AperEncoder) -> x2ap_asn1c::PerResult<()>,
{
    container.push(ProtocolIeField::encode_with(id, criticality, config, encode)?);
    Ok(())
}

fn decode_ie<T: AperDecode>(field: &ProtocolIeField, config: &CodecConfig) -> X2apResult<T> {
    Ok(field.decode_value(config)?)
}

fn decode_ie_with<T, F>(field: &ProtocolIeField, config: &CodecConfig, decode: F) -> X2apResult<T>
where
    F: FnOnce(&mut AperDecoder<'_>) -> x2ap_asn1c::PerResult<T>,
{
    Ok(field.decode_with(config, decode)?)
}

/// Unwrap a mandatory IE collected while walking a container
pub fn required<T>(value: Option<T>, ie_name: &'static str, id: ProtocolIeId) -> X2apResult<T> {
    value.ok_or(X2apError::MissingMandatoryIe { ie_name, ie_id: id.0 })
}

/// Log an IE the message has no slot for. The envelope already carries its
/// length, so nothing else needs consuming.
pub fn skip_unknown(field: &ProtocolIeField, message: &'static str) {
    log::debug!(
        "{message}: skipping unrecognised IE id={} ({} octets)",
        field.id.0,
        field.value.len()
    );
}

// ============================================================================
// eNB UE X2AP IDs
// ============================================================================

pub fn encode_old_enb_ue_x2ap_id(
    container: &mut ProtocolIeContainer,
    id: UeX2apId,
    criticality: Criticality,
    config: &CodecConfig,
) -> X2apResult<()> {
    push_ie(container, ProtocolIeId::OLD_ENB_UE_X2AP_ID, criticality, &id, config)
}

pub fn encode_new_enb_ue_x2ap_id(
    container: &mut ProtocolIeContainer,
    id: UeX2apId,
    config: &CodecConfig,
) -> X2apResult<()> {
    push_ie(container, ProtocolIeId::NEW_ENB_UE_X2AP_ID, Criticality::Ignore, &id, config)
}

/// `id-UE-X2AP-ID`, the identifier shared by both IDs of one message
pub fn encode_ue_x2ap_id(
    container: &mut ProtocolIeContainer,
    id: UeX2apId,
    config: &CodecConfig,
) -> X2apResult<()> {
    push_ie(container, ProtocolIeId::UE_X2AP_ID, Criticality::Reject, &id, config)
}

pub fn decode_ue_x2ap_id(field: &ProtocolIeField, config: &CodecConfig) -> X2apResult<UeX2apId> {
    decode_ie(field, config)
}

// ============================================================================
// Cause, TimeToWait, CriticalityDiagnostics
// ============================================================================

pub fn encode_cause(container: &mut ProtocolIeContainer, cause: &Cause, config: &CodecConfig) -> X2apResult<()> {
    push_ie(container, ProtocolIeId::CAUSE, Criticality::Ignore, cause, config)
}

pub fn decode_cause(field: &ProtocolIeField, config: &CodecConfig) -> X2apResult<Cause> {
    decode_ie(field, config)
}

pub fn encode_time_to_wait(
    container: &mut ProtocolIeContainer,
    time_to_wait: TimeToWait,
    config: &CodecConfig,
) -> X2apResult<()> {
    push_ie(container, ProtocolIeId::TIME_TO_WAIT, Criticality::Ignore, &time_to_wait, config)
}

pub fn decode_time_to_wait(field: &ProtocolIeField, config: &CodecConfig) -> X2apResult<TimeToWait> {
    decode_ie(field, config)
}

pub fn encode_criticality_diagnostics(
    container: &mut ProtocolIeContainer,
    diagnostics: &CriticalityDiagnostics,
    config: &CodecConfig,
) -> X2apResult<()> {
    push_ie(container, ProtocolIeId::CRITICALITY_DIAGNOSTICS, Criticality::Ignore, diagnostics, config)
}

pub fn decode_criticality_diagnostics(
    field: &ProtocolIeField,
    config: &CodecConfig,
) -> X2apResult<CriticalityDiagnostics> {
    decode_ie(field, config)
}

// ============================================================================
// X2 Setup IEs
// ============================================================================

pub fn encode_global_enb_id(
    container: &mut ProtocolIeContainer,
    id: &GlobalEnbId,
    config: &CodecConfig,
) -> X2apResult<()> {
    push_ie(container, ProtocolIeId::GLOBAL_ENB_ID, Criticality::Reject, id, config)
}

pub fn decode_global_enb_id(field: &ProtocolIeField, config: &CodecConfig) -> X2apResult<GlobalEnbId> {
    decode_ie(field, config)
}

pub fn encode_served_cells_ie(
    container: &mut ProtocolIeContainer,
    cells: &[ServedCellsItem],
    config: &CodecConfig,
) -> X2apResult<()> {
    push_ie_with(container, ProtocolIeId::SERVED_CELLS, Criticality::Reject, config, |encoder| {
        encode_served_cells(encoder, cells)
    })
}

pub fn decode_served_cells_ie(field: &ProtocolIeField, config: &CodecConfig) -> X2apResult<Vec<ServedCellsItem>> {
    decode_ie_with(field, config, decode_served_cells)
}

pub fn encode_gu_group_id_list_ie(
    container: &mut ProtocolIeContainer,
    groups: &[GuGroupId],
    config: &CodecConfig,
) -> X2apResult<()> {
    push_ie_with(container, ProtocolIeId::GU_GROUP_ID_LIST, Criticality::Reject, config, |encoder| {
        encode_gu_group_id_list(encoder, groups)
    })
}

pub fn decode_gu_group_id_list_ie(field: &ProtocolIeField, config: &CodecConfig) -> X2apResult<Vec<GuGroupId>> {
    decode_ie_with(field, config, decode_gu_group_id_list)
}

// ============================================================================
// Handover IEs
// ============================================================================

pub fn encode_target_cell_id(container: &mut ProtocolIeContainer, ecgi: &Ecgi, config: &CodecConfig) -> X2apResult<()> {
    push_ie(container, ProtocolIeId::TARGET_CELL_ID, Criticality::Reject, ecgi, config)
}

pub fn decode_target_cell_id(field: &ProtocolIeField, config: &CodecConfig) -> X2apResult<Ecgi> {
    decode_ie(field, config)
}

pub fn encode_gummei(container: &mut ProtocolIeContainer, gummei: &Gummei, config: &CodecConfig) -> X2apResult<()> {
    push_ie(container, ProtocolIeId::GUMMEI_ID, Criticality::Reject, gummei, config)
}

pub fn decode_gummei(field: &ProtocolIeField, config: &CodecConfig) -> X2apResult<Gummei> {
    decode_ie(field, config)
}

pub fn encode_ue_context_information(
    container: &mut ProtocolIeContainer,
    info: &UeContextInformation,
    config: &CodecConfig,
) -> X2apResult<()> {
    push_ie(container, ProtocolIeId::UE_CONTEXT_INFORMATION, Criticality::Reject, info, config)
}

pub fn decode_ue_context_information(
    field: &ProtocolIeField,
    config: &CodecConfig,
) -> X2apResult<UeContextInformation> {
    decode_ie(field, config)
}

pub fn encode_ue_history_information_ie(
    container: &mut ProtocolIeContainer,
    history: &[LastVisitedCell],
    config: &CodecConfig,
) -> X2apResult<()> {
    push_ie_with(container, ProtocolIeId::UE_HISTORY_INFORMATION, Criticality::Ignore, config, |encoder| {
        encode_ue_history_information(encoder, history)
    })
}

pub fn decode_ue_history_information_ie(
    field: &ProtocolIeField,
    config: &CodecConfig,
) -> X2apResult<Vec<LastVisitedCell>> {
    decode_ie_with(field, config, decode_ue_history_information)
}

pub fn encode_srvcc_operation_possible(
    container: &mut ProtocolIeContainer,
    value: SrvccOperationPossible,
    config: &CodecConfig,
) -> X2apResult<()> {
    push_ie(container, ProtocolIeId::SRVCC_OPERATION_POSSIBLE, Criticality::Ignore, &value, config)
}

pub fn decode_srvcc_operation_possible(
    field: &ProtocolIeField,
    config: &CodecConfig,
) -> X2apResult<SrvccOperationPossible> {
    decode_ie(field, config)
}

pub fn encode_csg_membership_status(
    container: &mut ProtocolIeContainer,
    value: CsgMembershipStatus,
    config: &CodecConfig,
) -> X2apResult<()> {
    push_ie(container, ProtocolIeId::CSG_MEMBERSHIP_STATUS, Criticality::Reject, &value, config)
}

pub fn decode_csg_membership_status(field: &ProtocolIeField, config: &CodecConfig) -> X2apResult<CsgMembershipStatus> {
    decode_ie(field, config)
}

pub fn encode_e_rabs_admitted_list(
    container: &mut ProtocolIeContainer,
    items: &[ERabsAdmittedItem],
    config: &CodecConfig,
) -> X2apResult<()> {
    push_ie_with(container, ProtocolIeId::E_RABS_ADMITTED_LIST, Criticality::Ignore, config, |encoder| {
        encode_erabs_admitted_list(encoder, items)
    })
}

pub fn decode_e_rabs_admitted_list(
    field: &ProtocolIeField,
    config: &CodecConfig,
) -> X2apResult<Vec<ERabsAdmittedItem>> {
    decode_ie_with(field, config, decode_erabs_admitted_list)
}

pub fn encode_e_rabs_not_admitted_list(
    container: &mut ProtocolIeContainer,
    items: &[ERabItem],
    config: &CodecConfig,
) -> X2apResult<()> {
    push_ie_with(container, ProtocolIeId::E_RABS_NOT_ADMITTED_LIST, Criticality::Ignore, config, |encoder| {
        encode_erab_list(encoder, items)
    })
}

pub fn decode_e_rabs_not_admitted_list(field: &ProtocolIeField, config: &CodecConfig) -> X2apResult<Vec<ERabItem>> {
    decode_ie_with(field, config, decode_erab_list)
}

/// ASN.1: TargeteNBtoSource-eNBTransparentContainer ::= OCTET STRING
pub fn encode_target_to_source_transparent_container(
    container: &mut ProtocolIeContainer,
    data: &[u8],
    config: &CodecConfig,
) -> X2apResult<()> {
    push_ie_with(
        container,
        ProtocolIeId::TARGET_ENB_TO_SOURCE_ENB_TRANSPARENT_CONTAINER,
        Criticality::Ignore,
        config,
        |encoder| {
            encoder.encode_octet_string(
                data,
                &SizeConstraint::unbounded(),
                "TargeteNBtoSource-eNBTransparentContainer",
            )
        },
    )
}

pub fn decode_target_to_source_transparent_container(
    field: &ProtocolIeField,
    config: &CodecConfig,
) -> X2apResult<Vec<u8>> {
    decode_ie_with(field, config, |decoder| {
        decoder.decode_octet_string(&SizeConstraint::unbounded(), "TargeteNBtoSource-eNBTransparentContainer")
    })
}

pub fn encode_e_rabs_subject_to_status_transfer_list(
    container: &mut ProtocolIeContainer,
    items: &[ERabsSubjectToStatusTransferItem],
    config: &CodecConfig,
) -> X2apResult<()> {
    push_ie_with(
        container,
        ProtocolIeId::E_RABS_SUBJECT_TO_STATUS_TRANSFER_LIST,
        Criticality::Ignore,
        config,
        |encoder| encode_erabs_subject_to_status_transfer_list(encoder, items),
    )
}

pub fn decode_e_rabs_subject_to_status_transfer_list(
    field: &ProtocolIeField,
    config: &CodecConfig,
) -> X2apResult<Vec<ERabsSubjectToStatusTransferItem>> {
    decode_ie_with(field, config, decode_erabs_subject_to_status_transfer_list)
}

#[cfg(test)]
mod tests {
    use super::*;
    use x2ap_asn1c::x2ap::{CauseMisc, CauseRadioNetwork};
    use x2ap_asn1c::PerError;

    #[test]
    fn test_old_enb_ue_x2ap_id_envelope() {
        let config = CodecConfig::default();
        let mut container = ProtocolIeContainer::new();
        encode_old_enb_ue_x2ap_id(&mut container, UeX2apId(4095), Criticality::Reject, &config).unwrap();

        let field = &container.ies[0];
        assert_eq!(field.id, ProtocolIeId::OLD_ENB_UE_X2AP_ID);
        assert_eq!(field.criticality, Criticality::Reject);
        // 12-bit range, two aligned octets
        assert_eq!(&field.value[..], &[0x0F, 0xFF]);
        assert_eq!(decode_ue_x2ap_id(field, &config).unwrap(), UeX2apId(4095));
    }

    #[test]
    fn test_cause_ie() {
        let config = CodecConfig::default();
        let mut container = ProtocolIeContainer::new();
        let cause = Cause::Misc(CauseMisc::OmIntervention);
        encode_cause(&mut container, &cause, &config).unwrap();
        assert_eq!(container.ies[0].criticality, Criticality::Ignore);
        assert_eq!(decode_cause(&container.ies[0], &config).unwrap(), cause);
    }

    #[test]
    fn test_transparent_container_roundtrip() {
        let config = CodecConfig::default();
        let mut container = ProtocolIeContainer::new();
        let rrc = vec![0x5A; 300];
        encode_target_to_source_transparent_container(&mut container, &rrc, &config).unwrap();

        let field = &container.ies[0];
        // long-form length determinant, then the octets
        assert_eq!(&field.value[..2], &[0x81, 0x2C]);
        assert_eq!(decode_target_to_source_transparent_container(field, &config).unwrap(), rrc);
    }

    #[test]
    fn test_decode_ie_rejects_trailing_octets() {
        let config = CodecConfig::default();
        let mut container = ProtocolIeContainer::new();
        encode_cause(&mut container, &Cause::RadioNetwork(CauseRadioNetwork::Unspecified), &config).unwrap();

        let mut field = container.ies[0].clone();
        let mut value = field.value.to_vec();
        value.push(0x00);
        field.value = value.into();
        assert!(matches!(
            decode_cause(&field, &config),
            Err(X2apError::Asn1(PerError::DecodeFailure(_)))
        ));
    }

    #[test]
    fn test_required() {
        assert_eq!(required(Some(1), "Cause", ProtocolIeId::CAUSE).unwrap(), 1);
        assert_eq!(
            required::<u8>(None, "Cause", ProtocolIeId::CAUSE),
            Err(X2apError::MissingMandatoryIe { ie_name: "Cause", ie_id: 5 })
        );
    }
}
