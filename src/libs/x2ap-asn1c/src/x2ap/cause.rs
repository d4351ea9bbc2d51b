//! X2AP Cause Types
//!
//! Cause types from X2AP-IEs (3GPP TS 36.423)

use crate::per::{AperDecode, AperDecoder, AperEncode, AperEncoder, PerError, PerResult};

aper_enumerated! {
    /// CauseRadioNetwork - Radio network layer cause values
    /// ASN.1: CauseRadioNetwork ::= ENUMERATED { ..., unspecified, ... }
    pub enum CauseRadioNetwork (extensible) {
        HandoverDesirableForRadioReasons = 0,
        TimeCriticalHandover = 1,
        ResourceOptimisationHandover = 2,
        ReduceLoadInServingCell = 3,
        PartialHandover = 4,
        UnknownNewEnbUeX2apId = 5,
        UnknownOldEnbUeX2apId = 6,
        UnknownPairOfUeX2apId = 7,
        HoTargetNotAllowed = 8,
        Tx2relocoverallExpiry = 9,
        TrelocprepExpiry = 10,
        CellNotAvailable = 11,
        NoRadioResourcesAvailableInTargetCell = 12,
        InvalidMmeGroupId = 13,
        UnknownMmeCode = 14,
        EncryptionAndOrIntegrityProtectionAlgorithmsNotSupported = 15,
        ReportCharacteristicsEmpty = 16,
        NoReportPeriodicity = 17,
        ExistingMeasurementId = 18,
        UnknownEnbMeasurementId = 19,
        MeasurementTemporarilyNotAvailable = 20,
        Unspecified = 21,
    }
}

aper_enumerated! {
    /// CauseTransport - Transport layer cause values
    pub enum CauseTransport (extensible) {
        TransportResourceUnavailable = 0,
        Unspecified = 1,
    }
}

aper_enumerated! {
    /// CauseProtocol - Protocol cause values
    pub enum CauseProtocol (extensible) {
        TransferSyntaxError = 0,
        AbstractSyntaxErrorReject = 1,
        AbstractSyntaxErrorIgnoreAndNotify = 2,
        MessageNotCompatibleWithReceiverState = 3,
        SemanticError = 4,
        Unspecified = 5,
        AbstractSyntaxErrorFalselyConstructedMessage = 6,
    }
}

aper_enumerated! {
    /// CauseMisc - Miscellaneous cause values
    pub enum CauseMisc (extensible) {
        ControlProcessingOverload = 0,
        HardwareFailure = 1,
        OmIntervention = 2,
        NotEnoughUserPlaneProcessingResources = 3,
        Unspecified = 4,
    }
}

/// Cause - CHOICE of cause categories
/// ASN.1: Cause ::= CHOICE { radioNetwork, transport, protocol, misc, ... }
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cause {
    RadioNetwork(CauseRadioNetwork),
    Transport(CauseTransport),
    Protocol(CauseProtocol),
    Misc(CauseMisc),
}

impl Cause {
    // 4 alternatives in root, extensible
    pub const NUM_ALTERNATIVES: usize = 4;
    pub const EXTENSIBLE: bool = true;

    fn index(&self) -> usize {
        match self {
            Cause::RadioNetwork(_) => 0,
            Cause::Transport(_) => 1,
            Cause::Protocol(_) => 2,
            Cause::Misc(_) => 3,
        }
    }
}

impl AperEncode for Cause {
    fn encode_aper(&self, encoder: &mut AperEncoder) -> PerResult<()> {
        encoder.encode_choice_index(self.index(), Self::NUM_ALTERNATIVES, Self::EXTENSIBLE, "Cause")?;
        match self {
            Cause::RadioNetwork(v) => v.encode_aper(encoder),
            Cause::Transport(v) => v.encode_aper(encoder),
            Cause::Protocol(v) => v.encode_aper(encoder),
            Cause::Misc(v) => v.encode_aper(encoder),
        }
    }
}

impl AperDecode for Cause {
    fn decode_aper(decoder: &mut AperDecoder) -> PerResult<Self> {
        let index = decoder.decode_choice_index(Self::NUM_ALTERNATIVES, Self::EXTENSIBLE, "Cause")?;
        match index {
            0 => Ok(Cause::RadioNetwork(CauseRadioNetwork::decode_aper(decoder)?)),
            1 => Ok(Cause::Transport(CauseTransport::decode_aper(decoder)?)),
            2 => Ok(Cause::Protocol(CauseProtocol::decode_aper(decoder)?)),
            3 => Ok(Cause::Misc(CauseMisc::decode_aper(decoder)?)),
            _ => Err(PerError::InvalidChoiceIndex {
                index,
                max: Self::NUM_ALTERNATIVES - 1,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cause_radio_network_bits() {
        let cause = Cause::RadioNetwork(CauseRadioNetwork::Unspecified);
        let mut encoder = AperEncoder::new();
        cause.encode_aper(&mut encoder).unwrap();
        // choice ext, index 00, enum ext, 21 in 5 bits
        assert_eq!(encoder.bit_position(), 9);
        let bytes = encoder.into_bytes();
        assert_eq!(&bytes[..], &[0x0A, 0x80]);

        let mut decoder = AperDecoder::new(&bytes);
        assert_eq!(Cause::decode_aper(&mut decoder).unwrap(), cause);
    }

    #[test]
    fn test_cause_misc_roundtrip() {
        let cause = Cause::Misc(CauseMisc::HardwareFailure);
        let mut encoder = AperEncoder::new();
        cause.encode_aper(&mut encoder).unwrap();
        let bytes = encoder.into_bytes();
        assert_eq!(&bytes[..], &[0x62]);

        let mut decoder = AperDecoder::new(&bytes);
        assert_eq!(Cause::decode_aper(&mut decoder).unwrap(), cause);
    }

    #[test]
    fn test_cause_extension_rejected() {
        let mut decoder = AperDecoder::new(&[0x80]);
        assert_eq!(
            Cause::decode_aper(&mut decoder),
            Err(PerError::UnsupportedExtension { type_name: "Cause" })
        );

        // radioNetwork with the enumeration's extension bit set
        let mut decoder = AperDecoder::new(&[0x10]);
        assert_eq!(
            Cause::decode_aper(&mut decoder),
            Err(PerError::UnsupportedExtension { type_name: "CauseRadioNetwork" })
        );
    }

    #[test]
    fn test_cause_protocol_out_of_root_value() {
        // protocol, enumeration value 7 in 3 bits is past the 7 root values
        let mut decoder = AperDecoder::new(&[0b0100_1110]);
        assert!(matches!(
            Cause::decode_aper(&mut decoder),
            Err(PerError::ConstraintViolation { value: 7, .. })
        ));
    }
}
