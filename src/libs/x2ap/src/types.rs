//! X2AP Higher-Level Message Types
//!
//! Strongly-typed representations of X2AP procedure messages per 3GPP TS 36.423.
//! Optional IEs are `Option` fields: `Some` means the IE is present on the wire.

use x2ap_asn1c::x2ap::{
    Cause, CriticalityDiagnostics, CsgMembershipStatus, ERabItem, ERabsAdmittedItem,
    ERabsSubjectToStatusTransferItem, Ecgi, GlobalEnbId, GuGroupId, Gummei, LastVisitedCell,
    PrivateIeField, ServedCellsItem, SrvccOperationPossible, TimeToWait, UeContextInformation,
    UeX2apId,
};

// ============================================================================
// Handover Preparation (Section 8.2.1)
// ============================================================================

/// Handover Request - source eNB to target eNB (TS 36.423 Section 9.1.1.1)
#[derive(Debug, Clone, PartialEq)]
pub struct HandoverRequest {
    pub old_enb_ue_x2ap_id: UeX2apId,
    pub cause: Cause,
    pub target_cell_id: Ecgi,
    pub gummei: Gummei,
    pub ue_context_information: UeContextInformation,
    pub ue_history_information: Vec<LastVisitedCell>,
    pub srvcc_operation_possible: Option<SrvccOperationPossible>,
    pub csg_membership_status: Option<CsgMembershipStatus>,
}

/// Handover Request Acknowledge - target eNB to source eNB (TS 36.423 Section 9.1.1.2)
#[derive(Debug, Clone, PartialEq)]
pub struct HandoverRequestAcknowledge {
    pub old_enb_ue_x2ap_id: UeX2apId,
    pub new_enb_ue_x2ap_id: UeX2apId,
    pub e_rabs_admitted_list: Vec<ERabsAdmittedItem>,
    pub e_rabs_not_admitted_list: Option<Vec<ERabItem>>,
    /// RRC handover command, opaque to X2AP
    pub target_to_source_transparent_container: Vec<u8>,
    pub criticality_diagnostics: Option<CriticalityDiagnostics>,
}

/// Handover Preparation Failure (TS 36.423 Section 9.1.1.3)
#[derive(Debug, Clone, PartialEq)]
pub struct HandoverPreparationFailure {
    pub old_enb_ue_x2ap_id: UeX2apId,
    pub cause: Cause,
    pub criticality_diagnostics: Option<CriticalityDiagnostics>,
}

/// Handover Cancel (TS 36.423 Section 9.1.1.6)
#[derive(Debug, Clone, PartialEq)]
pub struct HandoverCancel {
    pub old_enb_ue_x2ap_id: UeX2apId,
    pub new_enb_ue_x2ap_id: Option<UeX2apId>,
    pub cause: Cause,
}

// ============================================================================
// UE mobility (Sections 8.2.3 - 8.2.4)
// ============================================================================

/// SN Status Transfer (TS 36.423 Section 9.1.1.4)
///
/// Both eNB UE X2AP IDs travel under `id-UE-X2AP-ID`; the first is the old
/// eNB's, the second the new eNB's.
#[derive(Debug, Clone, PartialEq)]
pub struct SnStatusTransfer {
    pub old_enb_ue_x2ap_id: UeX2apId,
    pub new_enb_ue_x2ap_id: UeX2apId,
    pub e_rabs_subject_to_status_transfer_list: Vec<ERabsSubjectToStatusTransferItem>,
}

/// UE Context Release (TS 36.423 Section 9.1.1.5)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UeContextRelease {
    pub old_enb_ue_x2ap_id: UeX2apId,
    pub new_enb_ue_x2ap_id: UeX2apId,
}

// ============================================================================
// Global procedures (Section 8.3)
// ============================================================================

/// Error Indication (TS 36.423 Section 9.1.2.2)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorIndication {
    pub old_enb_ue_x2ap_id: Option<UeX2apId>,
    pub new_enb_ue_x2ap_id: Option<UeX2apId>,
    pub cause: Option<Cause>,
    pub criticality_diagnostics: Option<CriticalityDiagnostics>,
}

/// X2 Setup Request (TS 36.423 Section 9.1.2.3)
#[derive(Debug, Clone, PartialEq)]
pub struct X2SetupRequest {
    pub global_enb_id: GlobalEnbId,
    pub served_cells: Vec<ServedCellsItem>,
    pub gu_group_id_list: Option<Vec<GuGroupId>>,
}

/// X2 Setup Response (TS 36.423 Section 9.1.2.4)
#[derive(Debug, Clone, PartialEq)]
pub struct X2SetupResponse {
    pub global_enb_id: GlobalEnbId,
    pub served_cells: Vec<ServedCellsItem>,
    pub gu_group_id_list: Option<Vec<GuGroupId>>,
    pub criticality_diagnostics: Option<CriticalityDiagnostics>,
}

/// X2 Setup Failure (TS 36.423 Section 9.1.2.5)
#[derive(Debug, Clone, PartialEq)]
pub struct X2SetupFailure {
    pub cause: Cause,
    pub time_to_wait: Option<TimeToWait>,
    pub criticality_diagnostics: Option<CriticalityDiagnostics>,
}

/// Reset Request (TS 36.423 Section 9.1.2.6)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResetRequest {
    pub cause: Cause,
}

/// Reset Response (TS 36.423 Section 9.1.2.7)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResetResponse {
    pub criticality_diagnostics: Option<CriticalityDiagnostics>,
}

/// Private Message
#[derive(Debug, Clone, PartialEq)]
pub struct PrivateMessage {
    pub private_ies: Vec<PrivateIeField>,
}
