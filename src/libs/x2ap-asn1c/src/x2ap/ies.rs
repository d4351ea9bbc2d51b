//! X2AP Information Element containers
//!
//! Generic IE envelope and containers from X2AP-Containers (3GPP TS 36.423)

use bytes::Bytes;

use crate::config::CodecConfig;
use crate::per::{
    AperDecode, AperDecoder, AperEncode, AperEncoder, PerError, PerResult, SizeConstraint,
};

use super::types::{Criticality, PrivateIeId, ProtocolIeId};

/// ProtocolIE-Field - A single IE with its envelope
/// ASN.1: ProtocolIE-Field ::= SEQUENCE { id, criticality, value OPEN TYPE }
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolIeField {
    pub id: ProtocolIeId,
    pub criticality: Criticality,
    /// Complete APER encoding of the value, as carried in the open type
    pub value: Bytes,
}

impl ProtocolIeField {
    /// Encode a value with `encode` and wrap it in an envelope.
    pub fn encode_with<F>(
        id: ProtocolIeId,
        criticality: Criticality,
        config: &CodecConfig,
        encode: F,
    ) -> PerResult<Self>
    where
        F: FnOnce(&mut AperEncoder) -> PerResult<()>,
    {
        let mut scratch = AperEncoder::with_config(*config);
        encode(&mut scratch)?;
        let mut value = scratch.into_bytes();
        if value.is_empty() {
            // Same octet the open type would carry on the wire
            value = Bytes::from_static(&[0x00]);
        }
        Ok(Self { id, criticality, value })
    }

    pub fn from_value<T: AperEncode>(
        id: ProtocolIeId,
        criticality: Criticality,
        value: &T,
        config: &CodecConfig,
    ) -> PerResult<Self> {
        Self::encode_with(id, criticality, config, |encoder| value.encode_aper(encoder))
    }

    /// Decode the envelope's value with `decode`; the whole value must be consumed.
    pub fn decode_with<T, F>(&self, config: &CodecConfig, decode: F) -> PerResult<T>
    where
        F: FnOnce(&mut AperDecoder<'_>) -> PerResult<T>,
    {
        let mut decoder = AperDecoder::with_config(&self.value, *config);
        let value = decode(&mut decoder)?;
        decoder.ensure_consumed()?;
        Ok(value)
    }

    pub fn decode_value<T: AperDecode>(&self, config: &CodecConfig) -> PerResult<T> {
        self.decode_with(config, T::decode_aper)
    }
}

impl AperEncode for ProtocolIeField {
    fn encode_aper(&self, encoder: &mut AperEncoder) -> PerResult<()> {
        self.id.encode_aper(encoder)?;
        self.criticality.encode_aper(encoder)?;
        encoder.encode_open_type_bytes(&self.value)
    }
}

impl AperDecode for ProtocolIeField {
    fn decode_aper(decoder: &mut AperDecoder) -> PerResult<Self> {
        let id = ProtocolIeId::decode_aper(decoder)?;
        let criticality = Criticality::decode_aper(decoder)?;
        let value = decoder.decode_open_type_bytes()?;

        Ok(ProtocolIeField {
            id,
            criticality,
            value: Bytes::from(value),
        })
    }
}

/// ProtocolIE-Container - Sequence of IEs
/// ASN.1: ProtocolIE-Container ::= SEQUENCE (SIZE (0..maxProtocolIEs)) OF ProtocolIE-Field
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProtocolIeContainer {
    pub ies: Vec<ProtocolIeField>,
}

impl ProtocolIeContainer {
    // maxProtocolIEs = 65535
    pub const SIZE: SizeConstraint = SizeConstraint::range(0, 65535);

    pub fn new() -> Self {
        Self { ies: Vec::new() }
    }

    pub fn push(&mut self, ie: ProtocolIeField) {
        self.ies.push(ie);
    }

    pub fn len(&self) -> usize {
        self.ies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ies.is_empty()
    }

    /// Find the first IE with this ID
    pub fn find(&self, id: ProtocolIeId) -> Option<&ProtocolIeField> {
        self.ies.iter().find(|ie| ie.id == id)
    }
}

impl AperEncode for ProtocolIeContainer {
    fn encode_aper(&self, encoder: &mut AperEncoder) -> PerResult<()> {
        encoder.encode_sequence_of(&self.ies, &Self::SIZE, "ProtocolIE-Container")
    }
}

impl AperDecode for ProtocolIeContainer {
    fn decode_aper(decoder: &mut AperDecoder) -> PerResult<Self> {
        let ies = decoder.decode_sequence_of(&Self::SIZE, "ProtocolIE-Container")?;
        Ok(ProtocolIeContainer { ies })
    }
}

/// PrivateIE-Field
/// ASN.1: PrivateIE-Field ::= SEQUENCE { id PrivateIE-ID, criticality, value OPEN TYPE }
#[derive(Debug, Clone, PartialEq)]
pub struct PrivateIeField {
    pub id: PrivateIeId,
    pub criticality: Criticality,
    pub value: Bytes,
}

impl AperEncode for PrivateIeField {
    fn encode_aper(&self, encoder: &mut AperEncoder) -> PerResult<()> {
        self.id.encode_aper(encoder)?;
        self.criticality.encode_aper(encoder)?;
        encoder.encode_open_type_bytes(&self.value)
    }
}

impl AperDecode for PrivateIeField {
    fn decode_aper(decoder: &mut AperDecoder) -> PerResult<Self> {
        let id = PrivateIeId::decode_aper(decoder)?;
        let criticality = Criticality::decode_aper(decoder)?;
        let value = decoder.decode_open_type_bytes()?;
        Ok(PrivateIeField {
            id,
            criticality,
            value: Bytes::from(value),
        })
    }
}

/// PrivateIE-Container
/// ASN.1: PrivateIE-Container ::= SEQUENCE (SIZE (1..maxPrivateIEs)) OF PrivateIE-Field
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PrivateIeContainer {
    pub ies: Vec<PrivateIeField>,
}

impl PrivateIeContainer {
    pub const SIZE: SizeConstraint = SizeConstraint::range(1, 65535);
}

impl AperEncode for PrivateIeContainer {
    fn encode_aper(&self, encoder: &mut AperEncoder) -> PerResult<()> {
        encoder.encode_sequence_of(&self.ies, &Self::SIZE, "PrivateIE-Container")
    }
}

impl AperDecode for PrivateIeContainer {
    fn decode_aper(decoder: &mut AperDecoder) -> PerResult<Self> {
        let ies = decoder.decode_sequence_of(&Self::SIZE, "PrivateIE-Container")?;
        Ok(PrivateIeContainer { ies })
    }
}

// ============================================================================
// ProtocolIE-Single-Container lists
// ============================================================================

/// Encode `SEQUENCE (SIZE(..)) OF ProtocolIE-Single-Container`: every item
/// travels in its own envelope under the same IE ID.
pub fn encode_single_container_list<T: AperEncode>(
    encoder: &mut AperEncoder,
    items: &[T],
    id: ProtocolIeId,
    criticality: Criticality,
    size: &SizeConstraint,
    type_name: &'static str,
) -> PerResult<()> {
    encoder.encode_sequence_of_length(items.len(), size, type_name)?;
    for item in items {
        id.encode_aper(encoder)?;
        criticality.encode_aper(encoder)?;
        encoder.encode_open_type(|scratch| item.encode_aper(scratch))?;
    }
    Ok(())
}

/// Decode a list written by [`encode_single_container_list`]. Items carrying
/// another IE ID are rejected.
pub fn decode_single_container_list<T: AperDecode>(
    decoder: &mut AperDecoder,
    id: ProtocolIeId,
    size: &SizeConstraint,
    type_name: &'static str,
) -> PerResult<Vec<T>> {
    let count = decoder.decode_sequence_of_length(size, type_name)?;
    let mut items = Vec::with_capacity(count);
    for _ in 0..count {
        let item_id = ProtocolIeId::decode_aper(decoder)?;
        let _criticality = Criticality::decode_aper(decoder)?;
        if item_id != id {
            return Err(PerError::DecodeFailure(format!(
                "{type_name}: item carries IE id {}, expected {}",
                item_id.0, id.0
            )));
        }
        items.push(decoder.decode_open_type(T::decode_aper)?);
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::x2ap::types::TimeToWait;

    #[test]
    fn test_ie_field_envelope() {
        let config = CodecConfig::default();
        let field = ProtocolIeField::from_value(
            ProtocolIeId::TIME_TO_WAIT,
            Criticality::Ignore,
            &TimeToWait::V10s,
            &config,
        )
        .unwrap();
        assert_eq!(&field.value[..], &[0b0011_0000]);

        let mut encoder = AperEncoder::new();
        field.encode_aper(&mut encoder).unwrap();
        let bytes = encoder.into_bytes();
        // id 22, criticality ignore, length 1, value
        assert_eq!(&bytes[..], &[0x00, 0x16, 0x40, 0x01, 0x30]);

        let mut decoder = AperDecoder::new(&bytes);
        let decoded = ProtocolIeField::decode_aper(&mut decoder).unwrap();
        assert_eq!(decoded, field);
        assert_eq!(decoded.decode_value::<TimeToWait>(&config).unwrap(), TimeToWait::V10s);
    }

    #[test]
    fn test_ie_value_with_trailing_octets() {
        let field = ProtocolIeField {
            id: ProtocolIeId::TIME_TO_WAIT,
            criticality: Criticality::Ignore,
            value: Bytes::from_static(&[0x30, 0x00]),
        };
        assert!(matches!(
            field.decode_value::<TimeToWait>(&CodecConfig::default()),
            Err(PerError::DecodeFailure(_))
        ));
    }

    #[test]
    fn test_container_skips_oversized_value_exactly() {
        let config = CodecConfig::default();
        let mut container = ProtocolIeContainer::new();
        container.push(ProtocolIeField {
            id: ProtocolIeId(999),
            criticality: Criticality::Ignore,
            value: Bytes::from(vec![0xEE; 200]),
        });
        container.push(
            ProtocolIeField::from_value(ProtocolIeId::TIME_TO_WAIT, Criticality::Ignore, &TimeToWait::V2s, &config)
                .unwrap(),
        );

        let mut encoder = AperEncoder::new();
        container.encode_aper(&mut encoder).unwrap();
        let bytes = encoder.into_bytes();

        let mut decoder = AperDecoder::new(&bytes);
        let decoded = ProtocolIeContainer::decode_aper(&mut decoder).unwrap();
        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded.ies[0].value.len(), 200);
        let wait = decoded.find(ProtocolIeId::TIME_TO_WAIT).unwrap();
        assert_eq!(wait.decode_value::<TimeToWait>(&config).unwrap(), TimeToWait::V2s);
        assert_eq!(decoder.remaining_bits(), 0);
    }

    #[test]
    fn test_container_over_limit() {
        let field = ProtocolIeField {
            id: ProtocolIeId::CAUSE,
            criticality: Criticality::Ignore,
            value: Bytes::from_static(&[0x00]),
        };
        let container = ProtocolIeContainer { ies: vec![field; 33] };

        let mut encoder = AperEncoder::new();
        assert_eq!(
            container.encode_aper(&mut encoder),
            Err(PerError::ContainerTooLarge { length: 33, limit: 32 })
        );
        assert_eq!(encoder.bit_position(), 0);

        let mut encoder = AperEncoder::with_config(CodecConfig::default().with_max_container_len(33));
        container.encode_aper(&mut encoder).unwrap();
    }

    #[test]
    fn test_single_container_list() {
        let items = vec![TimeToWait::V1s, TimeToWait::V60s];
        let size = SizeConstraint::range(1, 256);

        let mut encoder = AperEncoder::new();
        encode_single_container_list(
            &mut encoder,
            &items,
            ProtocolIeId::TIME_TO_WAIT,
            Criticality::Ignore,
            &size,
            "List",
        )
        .unwrap();
        let bytes = encoder.into_bytes();

        let mut decoder = AperDecoder::new(&bytes);
        let decoded: Vec<TimeToWait> =
            decode_single_container_list(&mut decoder, ProtocolIeId::TIME_TO_WAIT, &size, "List").unwrap();
        assert_eq!(decoded, items);

        let mut decoder = AperDecoder::new(&bytes);
        assert!(matches!(
            decode_single_container_list::<TimeToWait>(&mut decoder, ProtocolIeId::CAUSE, &size, "List"),
            Err(PerError::DecodeFailure(_))
        ));
    }

    #[test]
    fn test_private_container_requires_one_entry() {
        let mut encoder = AperEncoder::new();
        assert_eq!(
            PrivateIeContainer::default().encode_aper(&mut encoder),
            Err(PerError::InvalidLength { length: 0 })
        );
    }
}
