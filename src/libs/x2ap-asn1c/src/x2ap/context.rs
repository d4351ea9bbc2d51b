//! X2AP UE context and E-RAB types
//!
//! UE context, history and E-RAB types from X2AP-IEs (3GPP TS 36.423)

use bitvec::prelude::*;

use crate::per::{
    bits_to_octets, AperDecode, AperDecoder, AperEncode, AperEncoder, Constraint, PerError,
    PerResult, SizeConstraint,
};

use super::cause::Cause;
use super::cell::{Ecgi, PlmnIdentity, Tac};
use super::ies::{decode_single_container_list, encode_single_container_list};
use super::types::{reject_ie_extensions, Criticality, ProtocolIeId};

/// UE-X2AP-ID
/// ASN.1: UE-X2AP-ID ::= INTEGER (0..4095)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UeX2apId(pub u16);

impl UeX2apId {
    pub const CONSTRAINT: Constraint = Constraint::new(0, 4095);
}

impl AperEncode for UeX2apId {
    fn encode_aper(&self, encoder: &mut AperEncoder) -> PerResult<()> {
        encoder.encode_constrained_whole_number(self.0 as i64, &Self::CONSTRAINT)
    }
}

impl AperDecode for UeX2apId {
    fn decode_aper(decoder: &mut AperDecoder) -> PerResult<Self> {
        let value = decoder.decode_constrained_whole_number(&Self::CONSTRAINT)?;
        Ok(UeX2apId(value as u16))
    }
}

/// UE-S1AP-ID
/// ASN.1: UE-S1AP-ID ::= INTEGER (0.. 4294967295)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MmeUeS1apId(pub u32);

impl MmeUeS1apId {
    pub const CONSTRAINT: Constraint = Constraint::new(0, 4_294_967_295);
}

impl AperEncode for MmeUeS1apId {
    fn encode_aper(&self, encoder: &mut AperEncoder) -> PerResult<()> {
        encoder.encode_constrained_whole_number(self.0 as i64, &Self::CONSTRAINT)
    }
}

impl AperDecode for MmeUeS1apId {
    fn decode_aper(decoder: &mut AperDecoder) -> PerResult<Self> {
        let value = decoder.decode_constrained_whole_number(&Self::CONSTRAINT)?;
        Ok(MmeUeS1apId(value as u32))
    }
}

/// BitRate
/// ASN.1: BitRate ::= INTEGER (0..10000000000)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BitRate(pub u64);

impl BitRate {
    pub const CONSTRAINT: Constraint = Constraint::new(0, 10_000_000_000);
}

impl AperEncode for BitRate {
    fn encode_aper(&self, encoder: &mut AperEncoder) -> PerResult<()> {
        let value = i64::try_from(self.0).map_err(|_| PerError::ConstraintViolation {
            value: i64::MAX,
            min: Self::CONSTRAINT.min,
            max: Self::CONSTRAINT.max,
        })?;
        encoder.encode_constrained_whole_number(value, &Self::CONSTRAINT)
    }
}

impl AperDecode for BitRate {
    fn decode_aper(decoder: &mut AperDecoder) -> PerResult<Self> {
        let value = decoder.decode_constrained_whole_number(&Self::CONSTRAINT)?;
        Ok(BitRate(value as u64))
    }
}

/// UESecurityCapabilities
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UeSecurityCapabilities {
    /// ASN.1: EncryptionAlgorithms ::= BIT STRING (SIZE (16, ...))
    pub encryption_algorithms: u16,
    /// ASN.1: IntegrityProtectionAlgorithms ::= BIT STRING (SIZE (16, ...))
    pub integrity_protection_algorithms: u16,
}

impl UeSecurityCapabilities {
    pub const ALGORITHMS_SIZE: SizeConstraint = SizeConstraint::fixed(16).with_extension();
}

fn encode_algorithms(encoder: &mut AperEncoder, algorithms: u16, type_name: &'static str) -> PerResult<()> {
    let octets = algorithms.to_be_bytes();
    encoder.encode_bit_string(octets.view_bits::<Msb0>(), &UeSecurityCapabilities::ALGORITHMS_SIZE, type_name)
}

fn decode_algorithms(decoder: &mut AperDecoder, type_name: &'static str) -> PerResult<u16> {
    let bits = decoder.decode_bit_string(&UeSecurityCapabilities::ALGORITHMS_SIZE, type_name)?;
    Ok(bits.load_be::<u16>())
}

impl AperEncode for UeSecurityCapabilities {
    fn encode_aper(&self, encoder: &mut AperEncoder) -> PerResult<()> {
        encoder.encode_sequence_preamble(true, &[false])?;
        encode_algorithms(encoder, self.encryption_algorithms, "EncryptionAlgorithms")?;
        encode_algorithms(encoder, self.integrity_protection_algorithms, "IntegrityProtectionAlgorithms")
    }
}

impl AperDecode for UeSecurityCapabilities {
    fn decode_aper(decoder: &mut AperDecoder) -> PerResult<Self> {
        let [ext] = decoder.decode_sequence_preamble(true, "UESecurityCapabilities")?;
        reject_ie_extensions(ext, "UESecurityCapabilities")?;
        Ok(Self {
            encryption_algorithms: decode_algorithms(decoder, "EncryptionAlgorithms")?,
            integrity_protection_algorithms: decode_algorithms(decoder, "IntegrityProtectionAlgorithms")?,
        })
    }
}

/// AS-SecurityInformation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AsSecurityInformation {
    /// ASN.1: Key-eNodeB-Star ::= BIT STRING (SIZE(256))
    pub key_enodeb_star: [u8; 32],
    /// ASN.1: NextHopChainingCount ::= INTEGER (0..7)
    pub next_hop_chaining_count: u8,
}

impl AsSecurityInformation {
    pub const KEY_SIZE: SizeConstraint = SizeConstraint::fixed(256);
    pub const NCC_CONSTRAINT: Constraint = Constraint::new(0, 7);
}

impl AperEncode for AsSecurityInformation {
    fn encode_aper(&self, encoder: &mut AperEncoder) -> PerResult<()> {
        encoder.encode_sequence_preamble(true, &[false])?;
        encoder.encode_bit_string(self.key_enodeb_star.view_bits::<Msb0>(), &Self::KEY_SIZE, "Key-eNodeB-Star")?;
        encoder.encode_constrained_whole_number(self.next_hop_chaining_count as i64, &Self::NCC_CONSTRAINT)
    }
}

impl AperDecode for AsSecurityInformation {
    fn decode_aper(decoder: &mut AperDecoder) -> PerResult<Self> {
        let [ext] = decoder.decode_sequence_preamble(true, "AS-SecurityInformation")?;
        reject_ie_extensions(ext, "AS-SecurityInformation")?;
        let key = decoder.decode_bit_string(&Self::KEY_SIZE, "Key-eNodeB-Star")?;
        let key_enodeb_star = bits_to_octets(&key)
            .try_into()
            .map_err(|_| PerError::DecodeFailure("Key-eNodeB-Star is not 256 bits".to_string()))?;
        let ncc = decoder.decode_constrained_whole_number(&Self::NCC_CONSTRAINT)?;
        Ok(Self {
            key_enodeb_star,
            next_hop_chaining_count: ncc as u8,
        })
    }
}

/// UEAggregateMaximumBitRate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UeAggregateMaximumBitRate {
    pub downlink: BitRate,
    pub uplink: BitRate,
}

impl AperEncode for UeAggregateMaximumBitRate {
    fn encode_aper(&self, encoder: &mut AperEncoder) -> PerResult<()> {
        encoder.encode_sequence_preamble(true, &[false])?;
        self.downlink.encode_aper(encoder)?;
        self.uplink.encode_aper(encoder)
    }
}

impl AperDecode for UeAggregateMaximumBitRate {
    fn decode_aper(decoder: &mut AperDecoder) -> PerResult<Self> {
        let [ext] = decoder.decode_sequence_preamble(true, "UEAggregateMaximumBitRate")?;
        reject_ie_extensions(ext, "UEAggregateMaximumBitRate")?;
        Ok(Self {
            downlink: BitRate::decode_aper(decoder)?,
            uplink: BitRate::decode_aper(decoder)?,
        })
    }
}

/// SubscriberProfileIDforRFP
/// ASN.1: SubscriberProfileIDforRFP ::= INTEGER (1..256)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberProfileIdForRfp(pub u16);

impl SubscriberProfileIdForRfp {
    pub const CONSTRAINT: Constraint = Constraint::new(1, 256);
}

impl AperEncode for SubscriberProfileIdForRfp {
    fn encode_aper(&self, encoder: &mut AperEncoder) -> PerResult<()> {
        encoder.encode_constrained_whole_number(self.0 as i64, &Self::CONSTRAINT)
    }
}

impl AperDecode for SubscriberProfileIdForRfp {
    fn decode_aper(decoder: &mut AperDecoder) -> PerResult<Self> {
        let value = decoder.decode_constrained_whole_number(&Self::CONSTRAINT)?;
        Ok(SubscriberProfileIdForRfp(value as u16))
    }
}

/// E-RAB-ID
/// ASN.1: E-RAB-ID ::= INTEGER (0..15, ...)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ERabId(pub u8);

impl ERabId {
    pub const CONSTRAINT: Constraint = Constraint::extensible(0, 15);
}

impl AperEncode for ERabId {
    fn encode_aper(&self, encoder: &mut AperEncoder) -> PerResult<()> {
        encoder.encode_integer(self.0 as i64, &Self::CONSTRAINT, "E-RAB-ID")
    }
}

impl AperDecode for ERabId {
    fn decode_aper(decoder: &mut AperDecoder) -> PerResult<Self> {
        Ok(ERabId(decoder.decode_integer(&Self::CONSTRAINT, "E-RAB-ID")? as u8))
    }
}

/// QCI
/// ASN.1: QCI ::= INTEGER (0..255)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Qci(pub u8);

impl Qci {
    pub const CONSTRAINT: Constraint = Constraint::new(0, 255);
}

impl AperEncode for Qci {
    fn encode_aper(&self, encoder: &mut AperEncoder) -> PerResult<()> {
        encoder.encode_constrained_whole_number(self.0 as i64, &Self::CONSTRAINT)
    }
}

impl AperDecode for Qci {
    fn decode_aper(decoder: &mut AperDecoder) -> PerResult<Self> {
        Ok(Qci(decoder.decode_constrained_whole_number(&Self::CONSTRAINT)? as u8))
    }
}

aper_enumerated! {
    pub enum PreEmptionCapability (fixed) {
        ShallNotTriggerPreEmption = 0,
        MayTriggerPreEmption = 1,
    }
}

aper_enumerated! {
    pub enum PreEmptionVulnerability (fixed) {
        NotPreEmptable = 0,
        PreEmptable = 1,
    }
}

/// AllocationAndRetentionPriority
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocationAndRetentionPriority {
    /// ASN.1: PriorityLevel ::= INTEGER { spare (0), highest (1), lowest (14), no-priority (15) } (0..15)
    pub priority_level: u8,
    pub pre_emption_capability: PreEmptionCapability,
    pub pre_emption_vulnerability: PreEmptionVulnerability,
}

impl AllocationAndRetentionPriority {
    pub const PRIORITY_CONSTRAINT: Constraint = Constraint::new(0, 15);
}

impl AperEncode for AllocationAndRetentionPriority {
    fn encode_aper(&self, encoder: &mut AperEncoder) -> PerResult<()> {
        encoder.encode_sequence_preamble(true, &[false])?;
        encoder.encode_constrained_whole_number(self.priority_level as i64, &Self::PRIORITY_CONSTRAINT)?;
        self.pre_emption_capability.encode_aper(encoder)?;
        self.pre_emption_vulnerability.encode_aper(encoder)
    }
}

impl AperDecode for AllocationAndRetentionPriority {
    fn decode_aper(decoder: &mut AperDecoder) -> PerResult<Self> {
        let [ext] = decoder.decode_sequence_preamble(true, "AllocationAndRetentionPriority")?;
        reject_ie_extensions(ext, "AllocationAndRetentionPriority")?;
        Ok(Self {
            priority_level: decoder.decode_constrained_whole_number(&Self::PRIORITY_CONSTRAINT)? as u8,
            pre_emption_capability: PreEmptionCapability::decode_aper(decoder)?,
            pre_emption_vulnerability: PreEmptionVulnerability::decode_aper(decoder)?,
        })
    }
}

/// GBR-QosInformation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GbrQosInformation {
    pub e_rab_maximum_bitrate_dl: BitRate,
    pub e_rab_maximum_bitrate_ul: BitRate,
    pub e_rab_guaranteed_bitrate_dl: BitRate,
    pub e_rab_guaranteed_bitrate_ul: BitRate,
}

impl AperEncode for GbrQosInformation {
    fn encode_aper(&self, encoder: &mut AperEncoder) -> PerResult<()> {
        encoder.encode_sequence_preamble(true, &[false])?;
        self.e_rab_maximum_bitrate_dl.encode_aper(encoder)?;
        self.e_rab_maximum_bitrate_ul.encode_aper(encoder)?;
        self.e_rab_guaranteed_bitrate_dl.encode_aper(encoder)?;
        self.e_rab_guaranteed_bitrate_ul.encode_aper(encoder)
    }
}

impl AperDecode for GbrQosInformation {
    fn decode_aper(decoder: &mut AperDecoder) -> PerResult<Self> {
        let [ext] = decoder.decode_sequence_preamble(true, "GBR-QosInformation")?;
        reject_ie_extensions(ext, "GBR-QosInformation")?;
        Ok(Self {
            e_rab_maximum_bitrate_dl: BitRate::decode_aper(decoder)?,
            e_rab_maximum_bitrate_ul: BitRate::decode_aper(decoder)?,
            e_rab_guaranteed_bitrate_dl: BitRate::decode_aper(decoder)?,
            e_rab_guaranteed_bitrate_ul: BitRate::decode_aper(decoder)?,
        })
    }
}

/// E-RAB-Level-QoS-Parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ERabLevelQosParameters {
    pub qci: Qci,
    pub allocation_and_retention_priority: AllocationAndRetentionPriority,
    pub gbr_qos_information: Option<GbrQosInformation>,
}

impl AperEncode for ERabLevelQosParameters {
    fn encode_aper(&self, encoder: &mut AperEncoder) -> PerResult<()> {
        encoder.encode_sequence_preamble(true, &[self.gbr_qos_information.is_some(), false])?;
        self.qci.encode_aper(encoder)?;
        self.allocation_and_retention_priority.encode_aper(encoder)?;
        if let Some(gbr) = &self.gbr_qos_information {
            gbr.encode_aper(encoder)?;
        }
        Ok(())
    }
}

impl AperDecode for ERabLevelQosParameters {
    fn decode_aper(decoder: &mut AperDecoder) -> PerResult<Self> {
        let [gbr, ext] = decoder.decode_sequence_preamble(true, "E-RAB-Level-QoS-Parameters")?;
        reject_ie_extensions(ext, "E-RAB-Level-QoS-Parameters")?;
        let qci = Qci::decode_aper(decoder)?;
        let allocation_and_retention_priority = AllocationAndRetentionPriority::decode_aper(decoder)?;
        let gbr_qos_information = gbr.then(|| GbrQosInformation::decode_aper(decoder)).transpose()?;
        Ok(Self {
            qci,
            allocation_and_retention_priority,
            gbr_qos_information,
        })
    }
}

aper_enumerated! {
    /// ASN.1: DL-Forwarding ::= ENUMERATED { dL-forwardingProposed, ... }
    pub enum DlForwarding (extensible) {
        DlForwardingProposed = 0,
    }
}

/// TransportLayerAddress
/// ASN.1: TransportLayerAddress ::= BIT STRING (SIZE(1..160, ...))
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportLayerAddress(pub BitVec<u8, Msb0>);

impl TransportLayerAddress {
    pub const SIZE: SizeConstraint = SizeConstraint::range(1, 160).with_extension();

    /// Address made of whole octets, e.g. an IPv4 or IPv6 address.
    pub fn from_octets(octets: &[u8]) -> Self {
        Self(BitVec::from_slice(octets))
    }

    pub fn to_octets(&self) -> Vec<u8> {
        bits_to_octets(&self.0)
    }
}

impl AperEncode for TransportLayerAddress {
    fn encode_aper(&self, encoder: &mut AperEncoder) -> PerResult<()> {
        encoder.encode_bit_string(&self.0, &Self::SIZE, "TransportLayerAddress")
    }
}

impl AperDecode for TransportLayerAddress {
    fn decode_aper(decoder: &mut AperDecoder) -> PerResult<Self> {
        Ok(Self(decoder.decode_bit_string(&Self::SIZE, "TransportLayerAddress")?))
    }
}

/// GTPtunnelEndpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GtpTunnelEndpoint {
    pub transport_layer_address: TransportLayerAddress,
    /// ASN.1: GTP-TEI ::= OCTET STRING (SIZE (4))
    pub gtp_teid: [u8; 4],
}

impl AperEncode for GtpTunnelEndpoint {
    fn encode_aper(&self, encoder: &mut AperEncoder) -> PerResult<()> {
        encoder.encode_sequence_preamble(true, &[false])?;
        self.transport_layer_address.encode_aper(encoder)?;
        encoder.encode_octet_string(&self.gtp_teid, &SizeConstraint::fixed(4), "GTP-TEI")
    }
}

impl AperDecode for GtpTunnelEndpoint {
    fn decode_aper(decoder: &mut AperDecoder) -> PerResult<Self> {
        let [ext] = decoder.decode_sequence_preamble(true, "GTPtunnelEndpoint")?;
        reject_ie_extensions(ext, "GTPtunnelEndpoint")?;
        Ok(Self {
            transport_layer_address: TransportLayerAddress::decode_aper(decoder)?,
            gtp_teid: decoder.decode_octet_array("GTP-TEI")?,
        })
    }
}

/// E-RABs-ToBeSetup-Item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ERabsToBeSetupItem {
    pub e_rab_id: ERabId,
    pub e_rab_level_qos_parameters: ERabLevelQosParameters,
    pub dl_forwarding: Option<DlForwarding>,
    pub ul_gtp_tunnel_endpoint: GtpTunnelEndpoint,
}

impl AperEncode for ERabsToBeSetupItem {
    fn encode_aper(&self, encoder: &mut AperEncoder) -> PerResult<()> {
        encoder.encode_sequence_preamble(true, &[self.dl_forwarding.is_some(), false])?;
        self.e_rab_id.encode_aper(encoder)?;
        self.e_rab_level_qos_parameters.encode_aper(encoder)?;
        if let Some(forwarding) = &self.dl_forwarding {
            forwarding.encode_aper(encoder)?;
        }
        self.ul_gtp_tunnel_endpoint.encode_aper(encoder)
    }
}

impl AperDecode for ERabsToBeSetupItem {
    fn decode_aper(decoder: &mut AperDecoder) -> PerResult<Self> {
        let [forwarding, ext] = decoder.decode_sequence_preamble(true, "E-RABs-ToBeSetup-Item")?;
        reject_ie_extensions(ext, "E-RABs-ToBeSetup-Item")?;
        let e_rab_id = ERabId::decode_aper(decoder)?;
        let e_rab_level_qos_parameters = ERabLevelQosParameters::decode_aper(decoder)?;
        let dl_forwarding = forwarding.then(|| DlForwarding::decode_aper(decoder)).transpose()?;
        Ok(Self {
            e_rab_id,
            e_rab_level_qos_parameters,
            dl_forwarding,
            ul_gtp_tunnel_endpoint: GtpTunnelEndpoint::decode_aper(decoder)?,
        })
    }
}

/// LAC
/// ASN.1: LAC ::= OCTET STRING (SIZE (2))
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Lac(pub [u8; 2]);

impl AperEncode for Lac {
    fn encode_aper(&self, encoder: &mut AperEncoder) -> PerResult<()> {
        encoder.encode_octet_string(&self.0, &SizeConstraint::fixed(2), "LAC")
    }
}

impl AperDecode for Lac {
    fn decode_aper(decoder: &mut AperDecoder) -> PerResult<Self> {
        Ok(Lac(decoder.decode_octet_array("LAC")?))
    }
}

/// ForbiddenTAs-Item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForbiddenTasItem {
    pub plmn_identity: PlmnIdentity,
    pub forbidden_tacs: Vec<Tac>,
}

/// ForbiddenLAs-Item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForbiddenLasItem {
    pub plmn_identity: PlmnIdentity,
    pub forbidden_lacs: Vec<Lac>,
}

/// ASN.1: SEQUENCE (SIZE(1..maxnoofForbTACs)) and SEQUENCE (SIZE(1..maxnoofForbLACs))
const FORBIDDEN_CODES_SIZE: SizeConstraint = SizeConstraint::range(1, 4096);

impl AperEncode for ForbiddenTasItem {
    fn encode_aper(&self, encoder: &mut AperEncoder) -> PerResult<()> {
        encoder.encode_sequence_preamble(true, &[false])?;
        self.plmn_identity.encode_aper(encoder)?;
        encoder.encode_sequence_of(&self.forbidden_tacs, &FORBIDDEN_CODES_SIZE, "ForbiddenTACs")
    }
}

impl AperDecode for ForbiddenTasItem {
    fn decode_aper(decoder: &mut AperDecoder) -> PerResult<Self> {
        let [ext] = decoder.decode_sequence_preamble(true, "ForbiddenTAs-Item")?;
        reject_ie_extensions(ext, "ForbiddenTAs-Item")?;
        Ok(Self {
            plmn_identity: PlmnIdentity::decode_aper(decoder)?,
            forbidden_tacs: decoder.decode_sequence_of(&FORBIDDEN_CODES_SIZE, "ForbiddenTACs")?,
        })
    }
}

impl AperEncode for ForbiddenLasItem {
    fn encode_aper(&self, encoder: &mut AperEncoder) -> PerResult<()> {
        encoder.encode_sequence_preamble(true, &[false])?;
        self.plmn_identity.encode_aper(encoder)?;
        encoder.encode_sequence_of(&self.forbidden_lacs, &FORBIDDEN_CODES_SIZE, "ForbiddenLACs")
    }
}

impl AperDecode for ForbiddenLasItem {
    fn decode_aper(decoder: &mut AperDecoder) -> PerResult<Self> {
        let [ext] = decoder.decode_sequence_preamble(true, "ForbiddenLAs-Item")?;
        reject_ie_extensions(ext, "ForbiddenLAs-Item")?;
        Ok(Self {
            plmn_identity: PlmnIdentity::decode_aper(decoder)?,
            forbidden_lacs: decoder.decode_sequence_of(&FORBIDDEN_CODES_SIZE, "ForbiddenLACs")?,
        })
    }
}

aper_enumerated! {
    /// ASN.1: ForbiddenInterRATs ::= ENUMERATED { all, geran, utran, cdma2000, ... }
    pub enum ForbiddenInterRats (extensible) {
        All = 0,
        Geran = 1,
        Utran = 2,
        Cdma2000 = 3,
    }
}

/// HandoverRestrictionList
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandoverRestrictionList {
    pub serving_plmn: PlmnIdentity,
    pub equivalent_plmns: Option<Vec<PlmnIdentity>>,
    pub forbidden_tas: Option<Vec<ForbiddenTasItem>>,
    pub forbidden_las: Option<Vec<ForbiddenLasItem>>,
    pub forbidden_inter_rats: Option<ForbiddenInterRats>,
}

impl HandoverRestrictionList {
    /// ASN.1: EPLMNs ::= SEQUENCE (SIZE(1..maxnoofEPLMNs)) OF PLMN-Identity
    pub const EQUIVALENT_PLMNS_SIZE: SizeConstraint = SizeConstraint::range(1, 15);
    /// ASN.1: SEQUENCE (SIZE(1..maxnoofEPLMNsPlusOne))
    pub const FORBIDDEN_AREAS_SIZE: SizeConstraint = SizeConstraint::range(1, 16);
}

impl AperEncode for HandoverRestrictionList {
    fn encode_aper(&self, encoder: &mut AperEncoder) -> PerResult<()> {
        encoder.encode_sequence_preamble(
            true,
            &[
                self.equivalent_plmns.is_some(),
                self.forbidden_tas.is_some(),
                self.forbidden_las.is_some(),
                self.forbidden_inter_rats.is_some(),
                false,
            ],
        )?;
        self.serving_plmn.encode_aper(encoder)?;
        if let Some(plmns) = &self.equivalent_plmns {
            encoder.encode_sequence_of(plmns, &Self::EQUIVALENT_PLMNS_SIZE, "EPLMNs")?;
        }
        if let Some(tas) = &self.forbidden_tas {
            encoder.encode_sequence_of(tas, &Self::FORBIDDEN_AREAS_SIZE, "ForbiddenTAs")?;
        }
        if let Some(las) = &self.forbidden_las {
            encoder.encode_sequence_of(las, &Self::FORBIDDEN_AREAS_SIZE, "ForbiddenLAs")?;
        }
        if let Some(rats) = &self.forbidden_inter_rats {
            rats.encode_aper(encoder)?;
        }
        Ok(())
    }
}

impl AperDecode for HandoverRestrictionList {
    fn decode_aper(decoder: &mut AperDecoder) -> PerResult<Self> {
        let [eplmns, tas, las, rats, ext] =
            decoder.decode_sequence_preamble(true, "HandoverRestrictionList")?;
        reject_ie_extensions(ext, "HandoverRestrictionList")?;

        let serving_plmn = PlmnIdentity::decode_aper(decoder)?;
        let equivalent_plmns = eplmns
            .then(|| decoder.decode_sequence_of(&Self::EQUIVALENT_PLMNS_SIZE, "EPLMNs"))
            .transpose()?;
        let forbidden_tas = tas
            .then(|| decoder.decode_sequence_of(&Self::FORBIDDEN_AREAS_SIZE, "ForbiddenTAs"))
            .transpose()?;
        let forbidden_las = las
            .then(|| decoder.decode_sequence_of(&Self::FORBIDDEN_AREAS_SIZE, "ForbiddenLAs"))
            .transpose()?;
        let forbidden_inter_rats = rats.then(|| ForbiddenInterRats::decode_aper(decoder)).transpose()?;

        Ok(Self {
            serving_plmn,
            equivalent_plmns,
            forbidden_tas,
            forbidden_las,
            forbidden_inter_rats,
        })
    }
}

aper_enumerated! {
    /// ASN.1: EventType ::= ENUMERATED { change-of-serving-cell, ... }
    pub enum EventType (extensible) {
        ChangeOfServingCell = 0,
    }
}

aper_enumerated! {
    /// ASN.1: ReportArea ::= ENUMERATED { ecgi, ... }
    pub enum ReportArea (extensible) {
        Ecgi = 0,
    }
}

/// LocationReportingInformation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocationReportingInformation {
    pub event_type: EventType,
    pub report_area: ReportArea,
}

impl AperEncode for LocationReportingInformation {
    fn encode_aper(&self, encoder: &mut AperEncoder) -> PerResult<()> {
        encoder.encode_sequence_preamble(true, &[false])?;
        self.event_type.encode_aper(encoder)?;
        self.report_area.encode_aper(encoder)
    }
}

impl AperDecode for LocationReportingInformation {
    fn decode_aper(decoder: &mut AperDecoder) -> PerResult<Self> {
        let [ext] = decoder.decode_sequence_preamble(true, "LocationReportingInformation")?;
        reject_ie_extensions(ext, "LocationReportingInformation")?;
        Ok(Self {
            event_type: EventType::decode_aper(decoder)?,
            report_area: ReportArea::decode_aper(decoder)?,
        })
    }
}

/// UE-ContextInformation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UeContextInformation {
    pub mme_ue_s1ap_id: MmeUeS1apId,
    pub ue_security_capabilities: UeSecurityCapabilities,
    pub as_security_information: AsSecurityInformation,
    pub ue_aggregate_maximum_bit_rate: UeAggregateMaximumBitRate,
    pub subscriber_profile_id_for_rfp: Option<SubscriberProfileIdForRfp>,
    pub e_rabs_to_be_setup_list: Vec<ERabsToBeSetupItem>,
    /// ASN.1: RRC-Context ::= OCTET STRING
    pub rrc_context: Vec<u8>,
    pub handover_restriction_list: Option<HandoverRestrictionList>,
    pub location_reporting_information: Option<LocationReportingInformation>,
}

impl UeContextInformation {
    /// ASN.1: E-RABs-ToBeSetup-List ::= SEQUENCE (SIZE(1..maxnoofBearers)) OF ProtocolIE-Single-Container
    pub const E_RABS_SIZE: SizeConstraint = SizeConstraint::range(1, 256);
}

impl AperEncode for UeContextInformation {
    fn encode_aper(&self, encoder: &mut AperEncoder) -> PerResult<()> {
        encoder.encode_sequence_preamble(
            true,
            &[
                self.subscriber_profile_id_for_rfp.is_some(),
                self.handover_restriction_list.is_some(),
                self.location_reporting_information.is_some(),
                false,
            ],
        )?;
        self.mme_ue_s1ap_id.encode_aper(encoder)?;
        self.ue_security_capabilities.encode_aper(encoder)?;
        self.as_security_information.encode_aper(encoder)?;
        self.ue_aggregate_maximum_bit_rate.encode_aper(encoder)?;
        if let Some(spid) = &self.subscriber_profile_id_for_rfp {
            spid.encode_aper(encoder)?;
        }
        encode_single_container_list(
            encoder,
            &self.e_rabs_to_be_setup_list,
            ProtocolIeId::E_RABS_TO_BE_SETUP_ITEM,
            Criticality::Ignore,
            &Self::E_RABS_SIZE,
            "E-RABs-ToBeSetup-List",
        )?;
        encoder.encode_octet_string(&self.rrc_context, &SizeConstraint::unbounded(), "RRC-Context")?;
        if let Some(restrictions) = &self.handover_restriction_list {
            restrictions.encode_aper(encoder)?;
        }
        if let Some(reporting) = &self.location_reporting_information {
            reporting.encode_aper(encoder)?;
        }
        Ok(())
    }
}

impl AperDecode for UeContextInformation {
    fn decode_aper(decoder: &mut AperDecoder) -> PerResult<Self> {
        let [spid, restrictions, reporting, ext] =
            decoder.decode_sequence_preamble(true, "UE-ContextInformation")?;
        reject_ie_extensions(ext, "UE-ContextInformation")?;

        let mme_ue_s1ap_id = MmeUeS1apId::decode_aper(decoder)?;
        let ue_security_capabilities = UeSecurityCapabilities::decode_aper(decoder)?;
        let as_security_information = AsSecurityInformation::decode_aper(decoder)?;
        let ue_aggregate_maximum_bit_rate = UeAggregateMaximumBitRate::decode_aper(decoder)?;
        let subscriber_profile_id_for_rfp = spid
            .then(|| SubscriberProfileIdForRfp::decode_aper(decoder))
            .transpose()?;
        let e_rabs_to_be_setup_list = decode_single_container_list(
            decoder,
            ProtocolIeId::E_RABS_TO_BE_SETUP_ITEM,
            &Self::E_RABS_SIZE,
            "E-RABs-ToBeSetup-List",
        )?;
        let rrc_context = decoder.decode_octet_string(&SizeConstraint::unbounded(), "RRC-Context")?;
        let handover_restriction_list = restrictions
            .then(|| HandoverRestrictionList::decode_aper(decoder))
            .transpose()?;
        let location_reporting_information = reporting
            .then(|| LocationReportingInformation::decode_aper(decoder))
            .transpose()?;

        Ok(Self {
            mme_ue_s1ap_id,
            ue_security_capabilities,
            as_security_information,
            ue_aggregate_maximum_bit_rate,
            subscriber_profile_id_for_rfp,
            e_rabs_to_be_setup_list,
            rrc_context,
            handover_restriction_list,
            location_reporting_information,
        })
    }
}

// ============================================================================
// UE History Information
// ============================================================================

aper_enumerated! {
    /// ASN.1: Cell-Size ::= ENUMERATED { verysmall, small, medium, large, ... }
    pub enum CellSize (extensible) {
        VerySmall = 0,
        Small = 1,
        Medium = 2,
        Large = 3,
    }
}

/// LastVisitedEUTRANCellInformation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LastVisitedEutranCellInformation {
    pub global_cell_id: Ecgi,
    /// CellType is a SEQUENCE around a single Cell-Size
    pub cell_size: CellSize,
    /// ASN.1: Time-UE-StayedInCell ::= INTEGER (0..4095)
    pub time_ue_stayed_in_cell: u16,
}

impl LastVisitedEutranCellInformation {
    pub const TIME_CONSTRAINT: Constraint = Constraint::new(0, 4095);
}

impl AperEncode for LastVisitedEutranCellInformation {
    fn encode_aper(&self, encoder: &mut AperEncoder) -> PerResult<()> {
        encoder.encode_sequence_preamble(true, &[false])?;
        self.global_cell_id.encode_aper(encoder)?;
        // CellType
        encoder.encode_sequence_preamble(true, &[false])?;
        self.cell_size.encode_aper(encoder)?;
        encoder.encode_constrained_whole_number(self.time_ue_stayed_in_cell as i64, &Self::TIME_CONSTRAINT)
    }
}

impl AperDecode for LastVisitedEutranCellInformation {
    fn decode_aper(decoder: &mut AperDecoder) -> PerResult<Self> {
        let [ext] = decoder.decode_sequence_preamble(true, "LastVisitedEUTRANCellInformation")?;
        reject_ie_extensions(ext, "LastVisitedEUTRANCellInformation")?;
        let global_cell_id = Ecgi::decode_aper(decoder)?;
        let [ext] = decoder.decode_sequence_preamble(true, "CellType")?;
        reject_ie_extensions(ext, "CellType")?;
        let cell_size = CellSize::decode_aper(decoder)?;
        let time = decoder.decode_constrained_whole_number(&Self::TIME_CONSTRAINT)?;
        Ok(Self {
            global_cell_id,
            cell_size,
            time_ue_stayed_in_cell: time as u16,
        })
    }
}

/// LastVisitedCell-Item
/// ASN.1: LastVisitedCell-Item ::= CHOICE { e-UTRAN-Cell, uTRAN-Cell, gERAN-Cell, ... }
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LastVisitedCell {
    EUtran(LastVisitedEutranCellInformation),
    /// ASN.1: LastVisitedUTRANCellInformation ::= OCTET STRING
    Utran(Vec<u8>),
    /// ASN.1: LastVisitedGERANCellInformation ::= CHOICE { undefined NULL, ... }
    GeranUndefined,
}

impl LastVisitedCell {
    pub const NUM_ALTERNATIVES: usize = 3;
    pub const EXTENSIBLE: bool = true;
    /// ASN.1: UE-HistoryInformation ::= SEQUENCE (SIZE(1..maxnoofCells)) OF LastVisitedCell-Item
    pub const HISTORY_SIZE: SizeConstraint = SizeConstraint::range(1, 16);
}

impl AperEncode for LastVisitedCell {
    fn encode_aper(&self, encoder: &mut AperEncoder) -> PerResult<()> {
        match self {
            LastVisitedCell::EUtran(info) => {
                encoder.encode_choice_index(0, Self::NUM_ALTERNATIVES, Self::EXTENSIBLE, "LastVisitedCell-Item")?;
                info.encode_aper(encoder)
            }
            LastVisitedCell::Utran(info) => {
                encoder.encode_choice_index(1, Self::NUM_ALTERNATIVES, Self::EXTENSIBLE, "LastVisitedCell-Item")?;
                encoder.encode_octet_string(info, &SizeConstraint::unbounded(), "LastVisitedUTRANCellInformation")
            }
            LastVisitedCell::GeranUndefined => {
                encoder.encode_choice_index(2, Self::NUM_ALTERNATIVES, Self::EXTENSIBLE, "LastVisitedCell-Item")?;
                encoder.encode_choice_index(0, 1, true, "LastVisitedGERANCellInformation")
            }
        }
    }
}

impl AperDecode for LastVisitedCell {
    fn decode_aper(decoder: &mut AperDecoder) -> PerResult<Self> {
        let index = decoder.decode_choice_index(Self::NUM_ALTERNATIVES, Self::EXTENSIBLE, "LastVisitedCell-Item")?;
        match index {
            0 => Ok(LastVisitedCell::EUtran(LastVisitedEutranCellInformation::decode_aper(decoder)?)),
            1 => Ok(LastVisitedCell::Utran(decoder.decode_octet_string(
                &SizeConstraint::unbounded(),
                "LastVisitedUTRANCellInformation",
            )?)),
            2 => {
                decoder.decode_choice_index(1, true, "LastVisitedGERANCellInformation")?;
                Ok(LastVisitedCell::GeranUndefined)
            }
            _ => Err(PerError::InvalidChoiceIndex {
                index,
                max: Self::NUM_ALTERNATIVES - 1,
            }),
        }
    }
}

pub fn encode_ue_history_information(encoder: &mut AperEncoder, cells: &[LastVisitedCell]) -> PerResult<()> {
    encoder.encode_sequence_of(cells, &LastVisitedCell::HISTORY_SIZE, "UE-HistoryInformation")
}

pub fn decode_ue_history_information(decoder: &mut AperDecoder) -> PerResult<Vec<LastVisitedCell>> {
    decoder.decode_sequence_of(&LastVisitedCell::HISTORY_SIZE, "UE-HistoryInformation")
}

aper_enumerated! {
    /// ASN.1: SRVCCOperationPossible ::= ENUMERATED { possible, ... }
    pub enum SrvccOperationPossible (extensible) {
        Possible = 0,
    }
}

aper_enumerated! {
    /// ASN.1: CSGMembershipStatus ::= ENUMERATED { member, not-member }
    pub enum CsgMembershipStatus (fixed) {
        Member = 0,
        NotMember = 1,
    }
}

// ============================================================================
// E-RAB lists
// ============================================================================

/// ASN.1: SEQUENCE (SIZE(1..maxnoofBearers)) OF ProtocolIE-Single-Container
pub const E_RAB_LIST_SIZE: SizeConstraint = SizeConstraint::range(1, 256);

/// E-RABs-Admitted-Item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ERabsAdmittedItem {
    pub e_rab_id: ERabId,
    pub ul_gtp_tunnel_endpoint: Option<GtpTunnelEndpoint>,
    pub dl_gtp_tunnel_endpoint: Option<GtpTunnelEndpoint>,
}

impl AperEncode for ERabsAdmittedItem {
    fn encode_aper(&self, encoder: &mut AperEncoder) -> PerResult<()> {
        encoder.encode_sequence_preamble(
            true,
            &[self.ul_gtp_tunnel_endpoint.is_some(), self.dl_gtp_tunnel_endpoint.is_some(), false],
        )?;
        self.e_rab_id.encode_aper(encoder)?;
        if let Some(endpoint) = &self.ul_gtp_tunnel_endpoint {
            endpoint.encode_aper(encoder)?;
        }
        if let Some(endpoint) = &self.dl_gtp_tunnel_endpoint {
            endpoint.encode_aper(encoder)?;
        }
        Ok(())
    }
}

impl AperDecode for ERabsAdmittedItem {
    fn decode_aper(decoder: &mut AperDecoder) -> PerResult<Self> {
        let [ul, dl, ext] = decoder.decode_sequence_preamble(true, "E-RABs-Admitted-Item")?;
        reject_ie_extensions(ext, "E-RABs-Admitted-Item")?;
        let e_rab_id = ERabId::decode_aper(decoder)?;
        let ul_gtp_tunnel_endpoint = ul.then(|| GtpTunnelEndpoint::decode_aper(decoder)).transpose()?;
        let dl_gtp_tunnel_endpoint = dl.then(|| GtpTunnelEndpoint::decode_aper(decoder)).transpose()?;
        Ok(Self {
            e_rab_id,
            ul_gtp_tunnel_endpoint,
            dl_gtp_tunnel_endpoint,
        })
    }
}

pub fn encode_erabs_admitted_list(encoder: &mut AperEncoder, items: &[ERabsAdmittedItem]) -> PerResult<()> {
    encode_single_container_list(
        encoder,
        items,
        ProtocolIeId::E_RABS_ADMITTED_ITEM,
        Criticality::Ignore,
        &E_RAB_LIST_SIZE,
        "E-RABs-Admitted-List",
    )
}

pub fn decode_erabs_admitted_list(decoder: &mut AperDecoder) -> PerResult<Vec<ERabsAdmittedItem>> {
    decode_single_container_list(decoder, ProtocolIeId::E_RABS_ADMITTED_ITEM, &E_RAB_LIST_SIZE, "E-RABs-Admitted-List")
}

/// E-RAB-Item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ERabItem {
    pub e_rab_id: ERabId,
    pub cause: Cause,
}

impl AperEncode for ERabItem {
    fn encode_aper(&self, encoder: &mut AperEncoder) -> PerResult<()> {
        encoder.encode_sequence_preamble(true, &[false])?;
        self.e_rab_id.encode_aper(encoder)?;
        self.cause.encode_aper(encoder)
    }
}

impl AperDecode for ERabItem {
    fn decode_aper(decoder: &mut AperDecoder) -> PerResult<Self> {
        let [ext] = decoder.decode_sequence_preamble(true, "E-RAB-Item")?;
        reject_ie_extensions(ext, "E-RAB-Item")?;
        Ok(Self {
            e_rab_id: ERabId::decode_aper(decoder)?,
            cause: Cause::decode_aper(decoder)?,
        })
    }
}

pub fn encode_erab_list(encoder: &mut AperEncoder, items: &[ERabItem]) -> PerResult<()> {
    encode_single_container_list(
        encoder,
        items,
        ProtocolIeId::E_RAB_ITEM,
        Criticality::Ignore,
        &E_RAB_LIST_SIZE,
        "E-RAB-List",
    )
}

pub fn decode_erab_list(decoder: &mut AperDecoder) -> PerResult<Vec<ERabItem>> {
    decode_single_container_list(decoder, ProtocolIeId::E_RAB_ITEM, &E_RAB_LIST_SIZE, "E-RAB-List")
}

/// COUNTvalue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountValue {
    /// ASN.1: PDCP-SN ::= INTEGER (0..4095)
    pub pdcp_sn: u16,
    /// ASN.1: HFN ::= INTEGER (0..1048575)
    pub hfn: u32,
}

impl CountValue {
    pub const PDCP_SN_CONSTRAINT: Constraint = Constraint::new(0, 4095);
    pub const HFN_CONSTRAINT: Constraint = Constraint::new(0, 1_048_575);
}

impl AperEncode for CountValue {
    fn encode_aper(&self, encoder: &mut AperEncoder) -> PerResult<()> {
        encoder.encode_sequence_preamble(true, &[false])?;
        encoder.encode_constrained_whole_number(self.pdcp_sn as i64, &Self::PDCP_SN_CONSTRAINT)?;
        encoder.encode_constrained_whole_number(self.hfn as i64, &Self::HFN_CONSTRAINT)
    }
}

impl AperDecode for CountValue {
    fn decode_aper(decoder: &mut AperDecoder) -> PerResult<Self> {
        let [ext] = decoder.decode_sequence_preamble(true, "COUNTvalue")?;
        reject_ie_extensions(ext, "COUNTvalue")?;
        let pdcp_sn = decoder.decode_constrained_whole_number(&Self::PDCP_SN_CONSTRAINT)?;
        let hfn = decoder.decode_constrained_whole_number(&Self::HFN_CONSTRAINT)?;
        Ok(Self {
            pdcp_sn: pdcp_sn as u16,
            hfn: hfn as u32,
        })
    }
}

/// E-RABs-SubjectToStatusTransfer-Item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ERabsSubjectToStatusTransferItem {
    pub e_rab_id: ERabId,
    /// ASN.1: ReceiveStatusofULPDCPSDUs ::= BIT STRING (SIZE(4096))
    pub receive_status_of_ul_pdcp_sdus: Option<BitVec<u8, Msb0>>,
    pub ul_count_value: CountValue,
    pub dl_count_value: CountValue,
}

impl ERabsSubjectToStatusTransferItem {
    pub const RECEIVE_STATUS_SIZE: SizeConstraint = SizeConstraint::fixed(4096);
}

impl AperEncode for ERabsSubjectToStatusTransferItem {
    fn encode_aper(&self, encoder: &mut AperEncoder) -> PerResult<()> {
        encoder.encode_sequence_preamble(true, &[self.receive_status_of_ul_pdcp_sdus.is_some(), false])?;
        self.e_rab_id.encode_aper(encoder)?;
        if let Some(status) = &self.receive_status_of_ul_pdcp_sdus {
            encoder.encode_bit_string(status, &Self::RECEIVE_STATUS_SIZE, "ReceiveStatusofULPDCPSDUs")?;
        }
        self.ul_count_value.encode_aper(encoder)?;
        self.dl_count_value.encode_aper(encoder)
    }
}

impl AperDecode for ERabsSubjectToStatusTransferItem {
    fn decode_aper(decoder: &mut AperDecoder) -> PerResult<Self> {
        let [status, ext] = decoder.decode_sequence_preamble(true, "E-RABs-SubjectToStatusTransfer-Item")?;
        reject_ie_extensions(ext, "E-RABs-SubjectToStatusTransfer-Item")?;
        let e_rab_id = ERabId::decode_aper(decoder)?;
        let receive_status_of_ul_pdcp_sdus = status
            .then(|| decoder.decode_bit_string(&Self::RECEIVE_STATUS_SIZE, "ReceiveStatusofULPDCPSDUs"))
            .transpose()?;
        Ok(Self {
            e_rab_id,
            receive_status_of_ul_pdcp_sdus,
            ul_count_value: CountValue::decode_aper(decoder)?,
            dl_count_value: CountValue::decode_aper(decoder)?,
        })
    }
}

pub fn encode_erabs_subject_to_status_transfer_list(
    encoder: &mut AperEncoder,
    items: &[ERabsSubjectToStatusTransferItem],
) -> PerResult<()> {
    encode_single_container_list(
        encoder,
        items,
        ProtocolIeId::E_RABS_SUBJECT_TO_STATUS_TRANSFER_ITEM,
        Criticality::Ignore,
        &E_RAB_LIST_SIZE,
        "E-RABs-SubjectToStatusTransfer-List",
    )
}

pub fn decode_erabs_subject_to_status_transfer_list(
    decoder: &mut AperDecoder,
) -> PerResult<Vec<ERabsSubjectToStatusTransferItem>> {
    decode_single_container_list(
        decoder,
        ProtocolIeId::E_RABS_SUBJECT_TO_STATUS_TRANSFER_ITEM,
        &E_RAB_LIST_SIZE,
        "E-RABs-SubjectToStatusTransfer-List",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLMN: PlmnIdentity = PlmnIdentity([0x21, 0xF3, 0x54]);

    fn roundtrip<T: AperEncode + AperDecode + PartialEq + std::fmt::Debug>(value: &T) -> Vec<u8> {
        let mut encoder = AperEncoder::new();
        value.encode_aper(&mut encoder).unwrap();
        let bytes = encoder.into_bytes().to_vec();
        let mut decoder = AperDecoder::new(&bytes);
        assert_eq!(&T::decode_aper(&mut decoder).unwrap(), value);
        bytes
    }

    fn tunnel(teid: u8) -> GtpTunnelEndpoint {
        GtpTunnelEndpoint {
            transport_layer_address: TransportLayerAddress::from_octets(&[10, 0, 0, 1]),
            gtp_teid: [0, 0, 0, teid],
        }
    }

    fn context() -> UeContextInformation {
        UeContextInformation {
            mme_ue_s1ap_id: MmeUeS1apId(0xDEAD_BEEF),
            ue_security_capabilities: UeSecurityCapabilities {
                encryption_algorithms: 0xE000,
                integrity_protection_algorithms: 0xC000,
            },
            as_security_information: AsSecurityInformation {
                key_enodeb_star: [0x5A; 32],
                next_hop_chaining_count: 3,
            },
            ue_aggregate_maximum_bit_rate: UeAggregateMaximumBitRate {
                downlink: BitRate(10_000_000_000),
                uplink: BitRate(50_000_000),
            },
            subscriber_profile_id_for_rfp: Some(SubscriberProfileIdForRfp(256)),
            e_rabs_to_be_setup_list: vec![ERabsToBeSetupItem {
                e_rab_id: ERabId(5),
                e_rab_level_qos_parameters: ERabLevelQosParameters {
                    qci: Qci(9),
                    allocation_and_retention_priority: AllocationAndRetentionPriority {
                        priority_level: 15,
                        pre_emption_capability: PreEmptionCapability::ShallNotTriggerPreEmption,
                        pre_emption_vulnerability: PreEmptionVulnerability::PreEmptable,
                    },
                    gbr_qos_information: None,
                },
                dl_forwarding: Some(DlForwarding::DlForwardingProposed),
                ul_gtp_tunnel_endpoint: tunnel(1),
            }],
            rrc_context: vec![0x0A, 0x0B, 0x0C],
            handover_restriction_list: Some(HandoverRestrictionList {
                serving_plmn: PLMN,
                equivalent_plmns: Some(vec![PlmnIdentity([0x00, 0xF1, 0x10])]),
                forbidden_tas: Some(vec![ForbiddenTasItem {
                    plmn_identity: PLMN,
                    forbidden_tacs: vec![Tac([0x00, 0x07]), Tac([0x00, 0x08])],
                }]),
                forbidden_las: None,
                forbidden_inter_rats: Some(ForbiddenInterRats::Geran),
            }),
            location_reporting_information: Some(LocationReportingInformation {
                event_type: EventType::ChangeOfServingCell,
                report_area: ReportArea::Ecgi,
            }),
        }
    }

    #[test]
    fn test_mme_ue_s1ap_id_large_range() {
        assert_eq!(roundtrip(&MmeUeS1apId(0)), vec![0x00, 0x00]);
        assert_eq!(roundtrip(&MmeUeS1apId(u32::MAX)), vec![0xC0, 0xFF, 0xFF, 0xFF, 0xFF]);
    }

    #[test]
    fn test_bit_rate_limits() {
        roundtrip(&BitRate(0));
        roundtrip(&BitRate(10_000_000_000));

        let mut encoder = AperEncoder::new();
        assert!(matches!(
            BitRate(10_000_000_001).encode_aper(&mut encoder),
            Err(PerError::ConstraintViolation { .. })
        ));
    }

    #[test]
    fn test_hfn_minimum_is_one_octet() {
        let bytes = roundtrip(&CountValue { pdcp_sn: 0, hfn: 0 });
        // preamble + pad, PDCP-SN 2 octets, HFN prefix + pad, HFN 1 octet
        assert_eq!(bytes, vec![0x00, 0x00, 0x00, 0x00, 0x00]);

        let bytes = roundtrip(&CountValue { pdcp_sn: 4095, hfn: 1_048_575 });
        assert_eq!(bytes, vec![0x00, 0x0F, 0xFF, 0x80, 0x0F, 0xFF, 0xFF]);
    }

    #[test]
    fn test_security_capabilities_bits() {
        let bytes = roundtrip(&UeSecurityCapabilities {
            encryption_algorithms: 0xE000,
            integrity_protection_algorithms: 0xC000,
        });
        // ext, ie-ext, size ext, 16 bits, size ext, 16 bits
        assert_eq!(bytes, vec![0x1C, 0x00, 0x0C, 0x00, 0x00]);
    }

    #[test]
    fn test_erab_id_extension_rejected() {
        let mut encoder = AperEncoder::new();
        assert_eq!(
            ERabId(16).encode_aper(&mut encoder),
            Err(PerError::UnsupportedExtension { type_name: "E-RAB-ID" })
        );
    }

    #[test]
    fn test_transport_layer_address_octets() {
        let address = TransportLayerAddress::from_octets(&[192, 168, 1, 1]);
        assert_eq!(address.0.len(), 32);
        assert_eq!(address.to_octets(), vec![192, 168, 1, 1]);
        roundtrip(&address);
    }

    #[test]
    fn test_ue_context_information_roundtrip() {
        roundtrip(&context());

        let mut minimal = context();
        minimal.subscriber_profile_id_for_rfp = None;
        minimal.handover_restriction_list = None;
        minimal.location_reporting_information = None;
        minimal.rrc_context.clear();
        roundtrip(&minimal);
    }

    #[test]
    fn test_ue_context_requires_bearer() {
        let mut info = context();
        info.e_rabs_to_be_setup_list.clear();
        let mut encoder = AperEncoder::new();
        assert_eq!(info.encode_aper(&mut encoder), Err(PerError::InvalidLength { length: 0 }));
    }

    #[test]
    fn test_ue_history_roundtrip() {
        let history = vec![
            LastVisitedCell::EUtran(LastVisitedEutranCellInformation {
                global_cell_id: Ecgi {
                    plmn_identity: PLMN,
                    eutran_cell_id: 0x0123_4567,
                },
                cell_size: CellSize::Medium,
                time_ue_stayed_in_cell: 4095,
            }),
            LastVisitedCell::Utran(vec![0x01, 0x02]),
            LastVisitedCell::GeranUndefined,
        ];

        let mut encoder = AperEncoder::new();
        encode_ue_history_information(&mut encoder, &history).unwrap();
        let bytes = encoder.into_bytes();

        let mut decoder = AperDecoder::new(&bytes);
        assert_eq!(decode_ue_history_information(&mut decoder).unwrap(), history);
    }

    #[test]
    fn test_erab_lists_roundtrip() {
        let admitted = vec![
            ERabsAdmittedItem {
                e_rab_id: ERabId(5),
                ul_gtp_tunnel_endpoint: Some(tunnel(2)),
                dl_gtp_tunnel_endpoint: None,
            },
            ERabsAdmittedItem {
                e_rab_id: ERabId(6),
                ul_gtp_tunnel_endpoint: None,
                dl_gtp_tunnel_endpoint: Some(tunnel(3)),
            },
        ];
        let mut encoder = AperEncoder::new();
        encode_erabs_admitted_list(&mut encoder, &admitted).unwrap();
        let bytes = encoder.into_bytes();
        let mut decoder = AperDecoder::new(&bytes);
        assert_eq!(decode_erabs_admitted_list(&mut decoder).unwrap(), admitted);

        let rejected = vec![ERabItem {
            e_rab_id: ERabId(7),
            cause: Cause::RadioNetwork(super::super::cause::CauseRadioNetwork::CellNotAvailable),
        }];
        let mut encoder = AperEncoder::new();
        encode_erab_list(&mut encoder, &rejected).unwrap();
        let bytes = encoder.into_bytes();
        let mut decoder = AperDecoder::new(&bytes);
        assert_eq!(decode_erab_list(&mut decoder).unwrap(), rejected);
    }

    #[test]
    fn test_status_transfer_with_receive_status() {
        let mut status = bitvec![u8, Msb0; 0; 4096];
        status.set(0, true);
        status.set(4095, true);
        let items = vec![ERabsSubjectToStatusTransferItem {
            e_rab_id: ERabId(5),
            receive_status_of_ul_pdcp_sdus: Some(status),
            ul_count_value: CountValue { pdcp_sn: 100, hfn: 2 },
            dl_count_value: CountValue { pdcp_sn: 200, hfn: 70_000 },
        }];

        let mut encoder = AperEncoder::new();
        encode_erabs_subject_to_status_transfer_list(&mut encoder, &items).unwrap();
        let bytes = encoder.into_bytes();
        let mut decoder = AperDecoder::new(&bytes);
        assert_eq!(decode_erabs_subject_to_status_transfer_list(&mut decoder).unwrap(), items);
    }
}
