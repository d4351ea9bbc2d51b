//! X2AP eNB and cell identification types
//!
//! Served cell and GU group types from X2AP-IEs (3GPP TS 36.423)

use crate::per::{
    AperDecode, AperDecoder, AperEncode, AperEncoder, Constraint, PerError, PerResult,
    SizeConstraint,
};

use super::types::reject_ie_extensions;

/// PLMN-Identity
/// ASN.1: PLMN-Identity ::= OCTET STRING (SIZE(3))
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlmnIdentity(pub [u8; 3]);

impl PlmnIdentity {
    pub const SIZE: SizeConstraint = SizeConstraint::fixed(3);
}

impl AperEncode for PlmnIdentity {
    fn encode_aper(&self, encoder: &mut AperEncoder) -> PerResult<()> {
        encoder.encode_octet_string(&self.0, &Self::SIZE, "PLMN-Identity")
    }
}

impl AperDecode for PlmnIdentity {
    fn decode_aper(decoder: &mut AperDecoder) -> PerResult<Self> {
        Ok(PlmnIdentity(decoder.decode_octet_array("PLMN-Identity")?))
    }
}

/// ENB-ID
/// ASN.1: ENB-ID ::= CHOICE { macro-eNB-ID BIT STRING (SIZE (20)), home-eNB-ID BIT STRING (SIZE (28)), ... }
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnbId {
    Macro(u32),
    Home(u32),
}

impl EnbId {
    pub const NUM_ALTERNATIVES: usize = 2;
    pub const EXTENSIBLE: bool = true;
    pub const MACRO_BITS: usize = 20;
    pub const HOME_BITS: usize = 28;
}

impl AperEncode for EnbId {
    fn encode_aper(&self, encoder: &mut AperEncoder) -> PerResult<()> {
        match self {
            EnbId::Macro(id) => {
                encoder.encode_choice_index(0, Self::NUM_ALTERNATIVES, Self::EXTENSIBLE, "ENB-ID")?;
                encoder.encode_fixed_bit_string(*id as u64, Self::MACRO_BITS)
            }
            EnbId::Home(id) => {
                encoder.encode_choice_index(1, Self::NUM_ALTERNATIVES, Self::EXTENSIBLE, "ENB-ID")?;
                encoder.encode_fixed_bit_string(*id as u64, Self::HOME_BITS)
            }
        }
    }
}

impl AperDecode for EnbId {
    fn decode_aper(decoder: &mut AperDecoder) -> PerResult<Self> {
        let index = decoder.decode_choice_index(Self::NUM_ALTERNATIVES, Self::EXTENSIBLE, "ENB-ID")?;
        match index {
            0 => Ok(EnbId::Macro(decoder.decode_fixed_bit_string(Self::MACRO_BITS)? as u32)),
            1 => Ok(EnbId::Home(decoder.decode_fixed_bit_string(Self::HOME_BITS)? as u32)),
            _ => Err(PerError::InvalidChoiceIndex {
                index,
                max: Self::NUM_ALTERNATIVES - 1,
            }),
        }
    }
}

/// GlobalENB-ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GlobalEnbId {
    pub plmn_identity: PlmnIdentity,
    pub enb_id: EnbId,
}

impl AperEncode for GlobalEnbId {
    fn encode_aper(&self, encoder: &mut AperEncoder) -> PerResult<()> {
        encoder.encode_sequence_preamble(true, &[false])?;
        self.plmn_identity.encode_aper(encoder)?;
        self.enb_id.encode_aper(encoder)
    }
}

impl AperDecode for GlobalEnbId {
    fn decode_aper(decoder: &mut AperDecoder) -> PerResult<Self> {
        let [ext] = decoder.decode_sequence_preamble(true, "GlobalENB-ID")?;
        reject_ie_extensions(ext, "GlobalENB-ID")?;
        Ok(Self {
            plmn_identity: PlmnIdentity::decode_aper(decoder)?,
            enb_id: EnbId::decode_aper(decoder)?,
        })
    }
}

/// ECGI - E-UTRAN Cell Global Identifier
/// ASN.1: ECGI ::= SEQUENCE { pLMN-Identity, eUTRANcellIdentifier BIT STRING (SIZE (28)), ... }
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ecgi {
    pub plmn_identity: PlmnIdentity,
    pub eutran_cell_id: u32,
}

impl Ecgi {
    pub const CELL_ID_BITS: usize = 28;
}

impl AperEncode for Ecgi {
    fn encode_aper(&self, encoder: &mut AperEncoder) -> PerResult<()> {
        encoder.encode_sequence_preamble(true, &[false])?;
        self.plmn_identity.encode_aper(encoder)?;
        encoder.encode_fixed_bit_string(self.eutran_cell_id as u64, Self::CELL_ID_BITS)
    }
}

impl AperDecode for Ecgi {
    fn decode_aper(decoder: &mut AperDecoder) -> PerResult<Self> {
        let [ext] = decoder.decode_sequence_preamble(true, "ECGI")?;
        reject_ie_extensions(ext, "ECGI")?;
        Ok(Self {
            plmn_identity: PlmnIdentity::decode_aper(decoder)?,
            eutran_cell_id: decoder.decode_fixed_bit_string(Self::CELL_ID_BITS)? as u32,
        })
    }
}

/// TAC
/// ASN.1: TAC ::= OCTET STRING (SIZE (2))
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tac(pub [u8; 2]);

impl AperEncode for Tac {
    fn encode_aper(&self, encoder: &mut AperEncoder) -> PerResult<()> {
        encoder.encode_octet_string(&self.0, &SizeConstraint::fixed(2), "TAC")
    }
}

impl AperDecode for Tac {
    fn decode_aper(decoder: &mut AperDecoder) -> PerResult<Self> {
        Ok(Tac(decoder.decode_octet_array("TAC")?))
    }
}

/// PCI - Physical Cell ID
/// ASN.1: PCI ::= INTEGER (0..503, ...)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pci(pub u16);

impl Pci {
    pub const CONSTRAINT: Constraint = Constraint::extensible(0, 503);
}

impl AperEncode for Pci {
    fn encode_aper(&self, encoder: &mut AperEncoder) -> PerResult<()> {
        encoder.encode_integer(self.0 as i64, &Self::CONSTRAINT, "PCI")
    }
}

impl AperDecode for Pci {
    fn decode_aper(decoder: &mut AperDecoder) -> PerResult<Self> {
        Ok(Pci(decoder.decode_integer(&Self::CONSTRAINT, "PCI")? as u16))
    }
}

/// EARFCN
/// ASN.1: EARFCN ::= INTEGER (0..maxEARFCN)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Earfcn(pub u16);

impl Earfcn {
    pub const CONSTRAINT: Constraint = Constraint::new(0, 65535);
}

impl AperEncode for Earfcn {
    fn encode_aper(&self, encoder: &mut AperEncoder) -> PerResult<()> {
        encoder.encode_constrained_whole_number(self.0 as i64, &Self::CONSTRAINT)
    }
}

impl AperDecode for Earfcn {
    fn decode_aper(decoder: &mut AperDecoder) -> PerResult<Self> {
        Ok(Earfcn(decoder.decode_constrained_whole_number(&Self::CONSTRAINT)? as u16))
    }
}

aper_enumerated! {
    /// ASN.1: Transmission-Bandwidth ::= ENUMERATED { bw6, bw15, bw25, bw50, bw75, bw100, ... }
    pub enum TransmissionBandwidth (extensible) {
        Bw6 = 0,
        Bw15 = 1,
        Bw25 = 2,
        Bw50 = 3,
        Bw75 = 4,
        Bw100 = 5,
    }
}

/// FDD-Info
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FddInfo {
    pub ul_earfcn: Earfcn,
    pub dl_earfcn: Earfcn,
    pub ul_transmission_bandwidth: TransmissionBandwidth,
    pub dl_transmission_bandwidth: TransmissionBandwidth,
}

impl AperEncode for FddInfo {
    fn encode_aper(&self, encoder: &mut AperEncoder) -> PerResult<()> {
        encoder.encode_sequence_preamble(true, &[false])?;
        self.ul_earfcn.encode_aper(encoder)?;
        self.dl_earfcn.encode_aper(encoder)?;
        self.ul_transmission_bandwidth.encode_aper(encoder)?;
        self.dl_transmission_bandwidth.encode_aper(encoder)
    }
}

impl AperDecode for FddInfo {
    fn decode_aper(decoder: &mut AperDecoder) -> PerResult<Self> {
        let [ext] = decoder.decode_sequence_preamble(true, "FDD-Info")?;
        reject_ie_extensions(ext, "FDD-Info")?;
        Ok(Self {
            ul_earfcn: Earfcn::decode_aper(decoder)?,
            dl_earfcn: Earfcn::decode_aper(decoder)?,
            ul_transmission_bandwidth: TransmissionBandwidth::decode_aper(decoder)?,
            dl_transmission_bandwidth: TransmissionBandwidth::decode_aper(decoder)?,
        })
    }
}

aper_enumerated! {
    /// ASN.1: SubframeAssignment ::= ENUMERATED { sa0, sa1, sa2, sa3, sa4, sa5, sa6, ... }
    pub enum SubframeAssignment (extensible) {
        Sa0 = 0,
        Sa1 = 1,
        Sa2 = 2,
        Sa3 = 3,
        Sa4 = 4,
        Sa5 = 5,
        Sa6 = 6,
    }
}

aper_enumerated! {
    /// ASN.1: SpecialSubframePatterns ::= ENUMERATED { ssp0, ..., ssp8, ... }
    pub enum SpecialSubframePatterns (extensible) {
        Ssp0 = 0,
        Ssp1 = 1,
        Ssp2 = 2,
        Ssp3 = 3,
        Ssp4 = 4,
        Ssp5 = 5,
        Ssp6 = 6,
        Ssp7 = 7,
        Ssp8 = 8,
    }
}

aper_enumerated! {
    pub enum CyclicPrefixDl (extensible) {
        Normal = 0,
        Extended = 1,
    }
}

aper_enumerated! {
    pub enum CyclicPrefixUl (extensible) {
        Normal = 0,
        Extended = 1,
    }
}

/// SpecialSubframe-Info
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecialSubframeInfo {
    pub special_subframe_patterns: SpecialSubframePatterns,
    pub cyclic_prefix_dl: CyclicPrefixDl,
    pub cyclic_prefix_ul: CyclicPrefixUl,
}

impl AperEncode for SpecialSubframeInfo {
    fn encode_aper(&self, encoder: &mut AperEncoder) -> PerResult<()> {
        encoder.encode_sequence_preamble(true, &[false])?;
        self.special_subframe_patterns.encode_aper(encoder)?;
        self.cyclic_prefix_dl.encode_aper(encoder)?;
        self.cyclic_prefix_ul.encode_aper(encoder)
    }
}

impl AperDecode for SpecialSubframeInfo {
    fn decode_aper(decoder: &mut AperDecoder) -> PerResult<Self> {
        let [ext] = decoder.decode_sequence_preamble(true, "SpecialSubframe-Info")?;
        reject_ie_extensions(ext, "SpecialSubframe-Info")?;
        Ok(Self {
            special_subframe_patterns: SpecialSubframePatterns::decode_aper(decoder)?,
            cyclic_prefix_dl: CyclicPrefixDl::decode_aper(decoder)?,
            cyclic_prefix_ul: CyclicPrefixUl::decode_aper(decoder)?,
        })
    }
}

/// TDD-Info
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TddInfo {
    pub earfcn: Earfcn,
    pub transmission_bandwidth: TransmissionBandwidth,
    pub subframe_assignment: SubframeAssignment,
    pub special_subframe_info: SpecialSubframeInfo,
}

impl AperEncode for TddInfo {
    fn encode_aper(&self, encoder: &mut AperEncoder) -> PerResult<()> {
        encoder.encode_sequence_preamble(true, &[false])?;
        self.earfcn.encode_aper(encoder)?;
        self.transmission_bandwidth.encode_aper(encoder)?;
        self.subframe_assignment.encode_aper(encoder)?;
        self.special_subframe_info.encode_aper(encoder)
    }
}

impl AperDecode for TddInfo {
    fn decode_aper(decoder: &mut AperDecoder) -> PerResult<Self> {
        let [ext] = decoder.decode_sequence_preamble(true, "TDD-Info")?;
        reject_ie_extensions(ext, "TDD-Info")?;
        Ok(Self {
            earfcn: Earfcn::decode_aper(decoder)?,
            transmission_bandwidth: TransmissionBandwidth::decode_aper(decoder)?,
            subframe_assignment: SubframeAssignment::decode_aper(decoder)?,
            special_subframe_info: SpecialSubframeInfo::decode_aper(decoder)?,
        })
    }
}

/// EUTRA-Mode-Info
/// ASN.1: EUTRA-Mode-Info ::= CHOICE { fDD FDD-Info, tDD TDD-Info, ... }
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EutraModeInfo {
    Fdd(FddInfo),
    Tdd(TddInfo),
}

impl EutraModeInfo {
    pub const NUM_ALTERNATIVES: usize = 2;
    pub const EXTENSIBLE: bool = true;
}

impl AperEncode for EutraModeInfo {
    fn encode_aper(&self, encoder: &mut AperEncoder) -> PerResult<()> {
        match self {
            EutraModeInfo::Fdd(info) => {
                encoder.encode_choice_index(0, Self::NUM_ALTERNATIVES, Self::EXTENSIBLE, "EUTRA-Mode-Info")?;
                info.encode_aper(encoder)
            }
            EutraModeInfo::Tdd(info) => {
                encoder.encode_choice_index(1, Self::NUM_ALTERNATIVES, Self::EXTENSIBLE, "EUTRA-Mode-Info")?;
                info.encode_aper(encoder)
            }
        }
    }
}

impl AperDecode for EutraModeInfo {
    fn decode_aper(decoder: &mut AperDecoder) -> PerResult<Self> {
        let index = decoder.decode_choice_index(Self::NUM_ALTERNATIVES, Self::EXTENSIBLE, "EUTRA-Mode-Info")?;
        match index {
            0 => Ok(EutraModeInfo::Fdd(FddInfo::decode_aper(decoder)?)),
            1 => Ok(EutraModeInfo::Tdd(TddInfo::decode_aper(decoder)?)),
            _ => Err(PerError::InvalidChoiceIndex {
                index,
                max: Self::NUM_ALTERNATIVES - 1,
            }),
        }
    }
}

/// ServedCell-Information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServedCellInformation {
    pub pci: Pci,
    pub cell_id: Ecgi,
    pub tac: Tac,
    pub broadcast_plmns: Vec<PlmnIdentity>,
    pub eutra_mode_info: EutraModeInfo,
}

impl ServedCellInformation {
    /// ASN.1: BroadcastPLMNs-Item ::= SEQUENCE (SIZE(1..maxnoofBPLMNs)) OF PLMN-Identity
    pub const BROADCAST_PLMNS_SIZE: SizeConstraint = SizeConstraint::range(1, 6);
}

impl AperEncode for ServedCellInformation {
    fn encode_aper(&self, encoder: &mut AperEncoder) -> PerResult<()> {
        encoder.encode_sequence_preamble(true, &[false])?;
        self.pci.encode_aper(encoder)?;
        self.cell_id.encode_aper(encoder)?;
        self.tac.encode_aper(encoder)?;
        encoder.encode_sequence_of(&self.broadcast_plmns, &Self::BROADCAST_PLMNS_SIZE, "BroadcastPLMNs-Item")?;
        self.eutra_mode_info.encode_aper(encoder)
    }
}

impl AperDecode for ServedCellInformation {
    fn decode_aper(decoder: &mut AperDecoder) -> PerResult<Self> {
        let [ext] = decoder.decode_sequence_preamble(true, "ServedCell-Information")?;
        reject_ie_extensions(ext, "ServedCell-Information")?;
        Ok(Self {
            pci: Pci::decode_aper(decoder)?,
            cell_id: Ecgi::decode_aper(decoder)?,
            tac: Tac::decode_aper(decoder)?,
            broadcast_plmns: decoder.decode_sequence_of(&Self::BROADCAST_PLMNS_SIZE, "BroadcastPLMNs-Item")?,
            eutra_mode_info: EutraModeInfo::decode_aper(decoder)?,
        })
    }
}

/// Neighbour-Information item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NeighbourInformationItem {
    pub ecgi: Ecgi,
    pub pci: Pci,
    pub earfcn: Earfcn,
}

impl AperEncode for NeighbourInformationItem {
    fn encode_aper(&self, encoder: &mut AperEncoder) -> PerResult<()> {
        encoder.encode_sequence_preamble(true, &[false])?;
        self.ecgi.encode_aper(encoder)?;
        self.pci.encode_aper(encoder)?;
        self.earfcn.encode_aper(encoder)
    }
}

impl AperDecode for NeighbourInformationItem {
    fn decode_aper(decoder: &mut AperDecoder) -> PerResult<Self> {
        let [ext] = decoder.decode_sequence_preamble(true, "Neighbour-Information")?;
        reject_ie_extensions(ext, "Neighbour-Information")?;
        Ok(Self {
            ecgi: Ecgi::decode_aper(decoder)?,
            pci: Pci::decode_aper(decoder)?,
            earfcn: Earfcn::decode_aper(decoder)?,
        })
    }
}

/// ServedCells item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServedCellsItem {
    pub served_cell_info: ServedCellInformation,
    pub neighbour_info: Option<Vec<NeighbourInformationItem>>,
}

impl ServedCellsItem {
    /// ASN.1: ServedCells ::= SEQUENCE (SIZE (1.. maxCellineNB)) OF ...
    pub const LIST_SIZE: SizeConstraint = SizeConstraint::range(1, 256);
    /// ASN.1: Neighbour-Information ::= SEQUENCE (SIZE (0..maxnoofNeighbours)) OF ...
    pub const NEIGHBOUR_SIZE: SizeConstraint = SizeConstraint::range(0, 512);
}

impl AperEncode for ServedCellsItem {
    fn encode_aper(&self, encoder: &mut AperEncoder) -> PerResult<()> {
        encoder.encode_sequence_preamble(true, &[self.neighbour_info.is_some(), false])?;
        self.served_cell_info.encode_aper(encoder)?;
        if let Some(neighbours) = &self.neighbour_info {
            encoder.encode_sequence_of(neighbours, &Self::NEIGHBOUR_SIZE, "Neighbour-Information")?;
        }
        Ok(())
    }
}

impl AperDecode for ServedCellsItem {
    fn decode_aper(decoder: &mut AperDecoder) -> PerResult<Self> {
        let [neighbours, ext] = decoder.decode_sequence_preamble(true, "ServedCells")?;
        reject_ie_extensions(ext, "ServedCells")?;
        let served_cell_info = ServedCellInformation::decode_aper(decoder)?;
        let neighbour_info = neighbours
            .then(|| decoder.decode_sequence_of(&Self::NEIGHBOUR_SIZE, "Neighbour-Information"))
            .transpose()?;
        Ok(Self {
            served_cell_info,
            neighbour_info,
        })
    }
}

pub fn encode_served_cells(encoder: &mut AperEncoder, cells: &[ServedCellsItem]) -> PerResult<()> {
    encoder.encode_sequence_of(cells, &ServedCellsItem::LIST_SIZE, "ServedCells")
}

pub fn decode_served_cells(decoder: &mut AperDecoder) -> PerResult<Vec<ServedCellsItem>> {
    decoder.decode_sequence_of(&ServedCellsItem::LIST_SIZE, "ServedCells")
}

/// GU-Group-ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GuGroupId {
    pub plmn_identity: PlmnIdentity,
    /// ASN.1: MME-Group-ID ::= OCTET STRING (SIZE (2))
    pub mme_group_id: [u8; 2],
}

impl GuGroupId {
    /// ASN.1: GUGroupIDList ::= SEQUENCE (SIZE (1..maxPools)) OF GU-Group-ID
    pub const LIST_SIZE: SizeConstraint = SizeConstraint::range(1, 16);
}

impl AperEncode for GuGroupId {
    fn encode_aper(&self, encoder: &mut AperEncoder) -> PerResult<()> {
        encoder.encode_sequence_preamble(true, &[false])?;
        self.plmn_identity.encode_aper(encoder)?;
        encoder.encode_octet_string(&self.mme_group_id, &SizeConstraint::fixed(2), "MME-Group-ID")
    }
}

impl AperDecode for GuGroupId {
    fn decode_aper(decoder: &mut AperDecoder) -> PerResult<Self> {
        let [ext] = decoder.decode_sequence_preamble(true, "GU-Group-ID")?;
        reject_ie_extensions(ext, "GU-Group-ID")?;
        Ok(Self {
            plmn_identity: PlmnIdentity::decode_aper(decoder)?,
            mme_group_id: decoder.decode_octet_array("MME-Group-ID")?,
        })
    }
}

pub fn encode_gu_group_id_list(encoder: &mut AperEncoder, groups: &[GuGroupId]) -> PerResult<()> {
    encoder.encode_sequence_of(groups, &GuGroupId::LIST_SIZE, "GUGroupIDList")
}

pub fn decode_gu_group_id_list(decoder: &mut AperDecoder) -> PerResult<Vec<GuGroupId>> {
    decoder.decode_sequence_of(&GuGroupId::LIST_SIZE, "GUGroupIDList")
}

/// GUMMEI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Gummei {
    pub gu_group_id: GuGroupId,
    /// ASN.1: MME-Code ::= OCTET STRING (SIZE (1))
    pub mme_code: u8,
}

impl AperEncode for Gummei {
    fn encode_aper(&self, encoder: &mut AperEncoder) -> PerResult<()> {
        encoder.encode_sequence_preamble(true, &[false])?;
        self.gu_group_id.encode_aper(encoder)?;
        encoder.encode_octet_string(&[self.mme_code], &SizeConstraint::fixed(1), "MME-Code")
    }
}

impl AperDecode for Gummei {
    fn decode_aper(decoder: &mut AperDecoder) -> PerResult<Self> {
        let [ext] = decoder.decode_sequence_preamble(true, "GUMMEI")?;
        reject_ie_extensions(ext, "GUMMEI")?;
        let gu_group_id = GuGroupId::decode_aper(decoder)?;
        let [mme_code] = decoder.decode_octet_array("MME-Code")?;
        Ok(Self { gu_group_id, mme_code })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLMN: PlmnIdentity = PlmnIdentity([0x00, 0xF1, 0x10]);

    fn fdd_cell(pci: u16, cell_id: u32) -> ServedCellsItem {
        ServedCellsItem {
            served_cell_info: ServedCellInformation {
                pci: Pci(pci),
                cell_id: Ecgi {
                    plmn_identity: PLMN,
                    eutran_cell_id: cell_id,
                },
                tac: Tac([0x00, 0x01]),
                broadcast_plmns: vec![PLMN],
                eutra_mode_info: EutraModeInfo::Fdd(FddInfo {
                    ul_earfcn: Earfcn(19850),
                    dl_earfcn: Earfcn(1850),
                    ul_transmission_bandwidth: TransmissionBandwidth::Bw100,
                    dl_transmission_bandwidth: TransmissionBandwidth::Bw100,
                }),
            },
            neighbour_info: None,
        }
    }

    #[test]
    fn test_global_enb_id_macro_bytes() {
        let id = GlobalEnbId {
            plmn_identity: PLMN,
            enb_id: EnbId::Macro(0xABCDE),
        };
        let mut encoder = AperEncoder::new();
        id.encode_aper(&mut encoder).unwrap();
        let bytes = encoder.into_bytes();
        assert_eq!(&bytes[..], &[0x00, 0x00, 0xF1, 0x10, 0x00, 0xAB, 0xCD, 0xE0]);

        let mut decoder = AperDecoder::new(&bytes);
        assert_eq!(GlobalEnbId::decode_aper(&mut decoder).unwrap(), id);
    }

    #[test]
    fn test_home_enb_id_bytes() {
        let mut encoder = AperEncoder::new();
        EnbId::Home(0xABCDEF1).encode_aper(&mut encoder).unwrap();
        let bytes = encoder.into_bytes();
        assert_eq!(&bytes[..], &[0x40, 0xAB, 0xCD, 0xEF, 0x10]);

        let mut decoder = AperDecoder::new(&bytes);
        assert_eq!(EnbId::decode_aper(&mut decoder).unwrap(), EnbId::Home(0xABCDEF1));
    }

    #[test]
    fn test_macro_enb_id_too_wide() {
        let mut encoder = AperEncoder::new();
        assert!(matches!(
            EnbId::Macro(0x10_0000).encode_aper(&mut encoder),
            Err(PerError::EncodeFailure(_))
        ));
    }

    #[test]
    fn test_pci_bounds() {
        let mut encoder = AperEncoder::new();
        Pci(503).encode_aper(&mut encoder).unwrap();
        let bytes = encoder.into_bytes();
        assert_eq!(&bytes[..], &[0x00, 0x01, 0xF7]);

        let mut encoder = AperEncoder::new();
        assert_eq!(
            Pci(504).encode_aper(&mut encoder),
            Err(PerError::UnsupportedExtension { type_name: "PCI" })
        );
    }

    #[test]
    fn test_served_cells_roundtrip() {
        let mut tdd = fdd_cell(7, 0x0000_0A1);
        tdd.served_cell_info.eutra_mode_info = EutraModeInfo::Tdd(TddInfo {
            earfcn: Earfcn(38000),
            transmission_bandwidth: TransmissionBandwidth::Bw50,
            subframe_assignment: SubframeAssignment::Sa2,
            special_subframe_info: SpecialSubframeInfo {
                special_subframe_patterns: SpecialSubframePatterns::Ssp7,
                cyclic_prefix_dl: CyclicPrefixDl::Normal,
                cyclic_prefix_ul: CyclicPrefixUl::Extended,
            },
        });
        tdd.neighbour_info = Some(vec![NeighbourInformationItem {
            ecgi: Ecgi {
                plmn_identity: PLMN,
                eutran_cell_id: 0x0ABC_DEF0,
            },
            pci: Pci(1),
            earfcn: Earfcn(1850),
        }]);
        let cells = vec![fdd_cell(1, 0x0000_0101), tdd];

        let mut encoder = AperEncoder::new();
        encode_served_cells(&mut encoder, &cells).unwrap();
        let bytes = encoder.into_bytes();

        let mut decoder = AperDecoder::new(&bytes);
        assert_eq!(decode_served_cells(&mut decoder).unwrap(), cells);
    }

    #[test]
    fn test_empty_served_cells_rejected() {
        let mut encoder = AperEncoder::new();
        assert_eq!(
            encode_served_cells(&mut encoder, &[]),
            Err(PerError::InvalidLength { length: 0 })
        );
    }

    #[test]
    fn test_gummei_roundtrip() {
        let gummei = Gummei {
            gu_group_id: GuGroupId {
                plmn_identity: PLMN,
                mme_group_id: [0x80, 0x01],
            },
            mme_code: 0x1A,
        };
        let mut encoder = AperEncoder::new();
        gummei.encode_aper(&mut encoder).unwrap();
        let bytes = encoder.into_bytes();

        let mut decoder = AperDecoder::new(&bytes);
        assert_eq!(Gummei::decode_aper(&mut decoder).unwrap(), gummei);
    }

    #[test]
    fn test_gu_group_id_list_limits() {
        let group = GuGroupId {
            plmn_identity: PLMN,
            mme_group_id: [0x00, 0x02],
        };
        let mut encoder = AperEncoder::new();
        encode_gu_group_id_list(&mut encoder, &[group; 16]).unwrap();
        let bytes = encoder.into_bytes();
        let mut decoder = AperDecoder::new(&bytes);
        assert_eq!(decode_gu_group_id_list(&mut decoder).unwrap().len(), 16);

        let mut encoder = AperEncoder::new();
        assert_eq!(
            encode_gu_group_id_list(&mut encoder, &[group; 17]),
            Err(PerError::InvalidLength { length: 17 })
        );
    }
}
