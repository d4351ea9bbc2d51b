//! PER (Packed Encoding Rules) encoding/decoding
//!
//! Implementation of Aligned PER (APER, ITU-T X.691) as used by X2AP.
//! `AperEncoder` and `AperDecoder` are the bit cursor shared by every codec in
//! this crate: fields are written and read most significant bit first, and
//! octet alignment is inserted exactly where the aligned variant mandates it.
//!
//! Extension additions are not supported. A set extension bit on decode, or a
//! value outside its extension root on encode, fails with
//! [`PerError::UnsupportedExtension`].

use bitvec::prelude::*;
use bytes::Bytes;
use thiserror::Error;

use crate::config::CodecConfig;

/// PER codec errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PerError {
    #[error("Invalid input: {0}")]
    InvalidInput(&'static str),
    #[error("Buffer overflow: need {needed} bits, have {available}")]
    BufferOverflow { needed: usize, available: usize },
    #[error("Unsupported extension in {type_name}")]
    UnsupportedExtension { type_name: &'static str },
    #[error("Container too large: {length} elements (limit {limit})")]
    ContainerTooLarge { length: usize, limit: usize },
    #[error("Invalid constraint: value {value} not in range {min}..={max}")]
    ConstraintViolation { value: i64, min: i64, max: i64 },
    #[error("Invalid choice index: {index} (max {max})")]
    InvalidChoiceIndex { index: usize, max: usize },
    #[error("Invalid length: {length}")]
    InvalidLength { length: usize },
    #[error("Encode failure: {0}")]
    EncodeFailure(String),
    #[error("Decode failure: {0}")]
    DecodeFailure(String),
}

pub type PerResult<T> = Result<T, PerError>;

/// Largest length a length determinant carries. Fragmented lengths are not
/// implemented, and 16383 itself is rejected.
pub const MAX_LENGTH_DETERMINANT: usize = 16382;

/// Number of octets needed to hold `value`, never less than one.
pub fn octets_needed(value: u64) -> usize {
    let bits = 64 - value.leading_zeros() as usize;
    bits.div_ceil(8).max(1)
}

/// Pack bits into octets, MSB first, zero-filling the last octet.
pub fn bits_to_octets(bits: &BitSlice<u8, Msb0>) -> Vec<u8> {
    bits.chunks(8)
        .map(|chunk| chunk.load_be::<u8>() << (8 - chunk.len()))
        .collect()
}

fn unsupported_extension(type_name: &'static str) -> PerError {
    log::warn!("{type_name}: extension additions are not supported");
    PerError::UnsupportedExtension { type_name }
}

fn check_container_len(length: usize, config: &CodecConfig, type_name: &'static str) -> PerResult<()> {
    let limit = config.max_container_len;
    if length > limit {
        log::warn!("{type_name}: {length} elements exceeds the container limit of {limit}");
        return Err(PerError::ContainerTooLarge { length, limit });
    }
    Ok(())
}

/// Constraint definition for constrained integers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Constraint {
    pub min: i64,
    pub max: i64,
    pub extensible: bool,
}

impl Constraint {
    pub const fn new(min: i64, max: i64) -> Self {
        Self { min, max, extensible: false }
    }

    pub const fn extensible(min: i64, max: i64) -> Self {
        Self { min, max, extensible: true }
    }

    /// Calculate the range of the constraint
    pub fn range(&self) -> u64 {
        if self.max >= self.min {
            self.max.abs_diff(self.min) + 1
        } else {
            0
        }
    }

    /// Calculate bits needed to encode values in this range
    pub fn bits_needed(&self) -> usize {
        let range = self.range();
        if range <= 1 {
            0
        } else {
            64 - (range - 1).leading_zeros() as usize
        }
    }

    /// Octets the large-range form may need for any value of this range.
    pub fn max_octets(&self) -> usize {
        self.bits_needed().div_ceil(8)
    }

    pub fn contains(&self, value: i64) -> bool {
        value >= self.min && value <= self.max
    }

    fn violation(&self, value: i64) -> PerError {
        PerError::ConstraintViolation { value, min: self.min, max: self.max }
    }
}

/// SIZE constraint for strings and SEQUENCE OF.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeConstraint {
    pub min: usize,
    /// `None` for semi-constrained sizes.
    pub max: Option<usize>,
    pub extensible: bool,
}

impl SizeConstraint {
    pub const fn fixed(size: usize) -> Self {
        Self { min: size, max: Some(size), extensible: false }
    }

    pub const fn range(min: usize, max: usize) -> Self {
        Self { min, max: Some(max), extensible: false }
    }

    pub const fn unbounded() -> Self {
        Self { min: 0, max: None, extensible: false }
    }

    pub const fn with_extension(self) -> Self {
        Self { extensible: true, ..self }
    }

    pub fn contains(&self, length: usize) -> bool {
        length >= self.min && self.max.map_or(true, |max| length <= max)
    }

    fn is_fixed(&self) -> bool {
        self.max == Some(self.min)
    }

    /// Upper bound when the length is a constrained whole number (ub < 64K).
    fn constrained_max(&self) -> Option<usize> {
        self.max.filter(|max| *max < 65536)
    }
}

/// APER (Aligned PER) Encoder
pub struct AperEncoder {
    buffer: BitVec<u8, Msb0>,
    config: CodecConfig,
}

impl AperEncoder {
    pub fn new() -> Self {
        Self::with_config(CodecConfig::default())
    }

    pub fn with_config(config: CodecConfig) -> Self {
        Self {
            buffer: BitVec::new(),
            config,
        }
    }

    /// Scratch encoder for a nested open type, sharing this encoder's limits.
    pub fn nested(&self) -> Self {
        Self::with_config(self.config)
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Get the encoded bytes, zero-padded to a whole octet
    pub fn into_bytes(mut self) -> Bytes {
        self.align();
        Bytes::from(self.buffer.into_vec())
    }

    /// Get current bit position
    pub fn bit_position(&self) -> usize {
        self.buffer.len()
    }

    fn reserve_bits(&self, needed: usize) -> PerResult<()> {
        if let Some(limit) = self.config.max_message_len {
            let available = (limit * 8).saturating_sub(self.buffer.len());
            if needed > available {
                log::warn!("APER output exceeds the {limit}-octet message limit");
                return Err(PerError::BufferOverflow { needed, available });
            }
        }
        Ok(())
    }

    /// Align to octet boundary. The output limit is a whole number of
    /// octets, so padding can never cross it.
    pub fn align(&mut self) {
        let remainder = self.buffer.len() % 8;
        if remainder != 0 {
            let padded = self.buffer.len() + 8 - remainder;
            self.buffer.resize(padded, false);
        }
    }

    /// Write a single bit
    pub fn write_bit(&mut self, bit: bool) -> PerResult<()> {
        self.reserve_bits(1)?;
        self.buffer.push(bit);
        Ok(())
    }

    /// Write the low `num_bits` bits of `value` (MSB first)
    pub fn write_bits(&mut self, value: u64, num_bits: usize) -> PerResult<()> {
        if num_bits > 64 {
            return Err(PerError::InvalidInput("cannot write more than 64 bits at once"));
        }
        self.reserve_bits(num_bits)?;
        self.buffer
            .extend_from_bitslice(&value.view_bits::<Msb0>()[64 - num_bits..]);
        Ok(())
    }

    /// Write raw bytes
    pub fn write_bytes(&mut self, bytes: &[u8]) -> PerResult<()> {
        self.reserve_bits(bytes.len() * 8)?;
        self.buffer.extend_from_bitslice(bytes.view_bits::<Msb0>());
        Ok(())
    }

    /// Extension bit of an extensible type. Extension additions cannot be
    /// produced, so `extended == true` is an error.
    pub fn encode_extension_bit(&mut self, extended: bool, type_name: &'static str) -> PerResult<()> {
        if extended {
            return Err(unsupported_extension(type_name));
        }
        self.write_bit(false)
    }

    /// Extension bit followed by the presence bitmap of a SEQUENCE's
    /// OPTIONAL components, in declaration order.
    pub fn encode_sequence_preamble(&mut self, extensible: bool, optionals: &[bool]) -> PerResult<()> {
        if extensible {
            self.write_bit(false)?;
        }
        for present in optionals {
            self.write_bit(*present)?;
        }
        Ok(())
    }

    /// Encode constrained whole number (X.691 Section 12.2)
    pub fn encode_constrained_whole_number(
        &mut self,
        value: i64,
        constraint: &Constraint,
    ) -> PerResult<()> {
        if !constraint.contains(value) {
            return Err(constraint.violation(value));
        }

        let range = constraint.range();
        let offset = value.abs_diff(constraint.min);

        match range {
            // No encoding needed
            0 | 1 => Ok(()),
            // Non-negative-binary-integer in minimum bits
            2..=255 => self.write_bits(offset, constraint.bits_needed()),
            // One octet, aligned
            256 => {
                self.align();
                self.write_bits(offset, 8)
            }
            // Two octets, aligned
            257..=65536 => {
                self.align();
                self.write_bits(offset, 16)
            }
            _ => self.encode_large_range(offset, constraint),
        }
    }

    /// Ranges above 64K: octet count in `bits(max_octets)` bits, then the
    /// offset in that many aligned octets.
    fn encode_large_range(&mut self, offset: u64, constraint: &Constraint) -> PerResult<()> {
        let octets = octets_needed(offset);
        let length = Constraint::new(1, constraint.max_octets() as i64);
        self.encode_constrained_whole_number(octets as i64, &length)?;
        self.align();
        self.write_bits(offset, octets * 8)
    }

    /// Encode an INTEGER type, including the extension bit of extensible
    /// constraints.
    pub fn encode_integer(
        &mut self,
        value: i64,
        constraint: &Constraint,
        type_name: &'static str,
    ) -> PerResult<()> {
        if constraint.extensible {
            self.encode_extension_bit(!constraint.contains(value), type_name)?;
        }
        self.encode_constrained_whole_number(value, constraint)
    }

    /// Encode semi-constrained whole number (X.691 Section 12.2.4)
    pub fn encode_semi_constrained_whole_number(&mut self, value: i64, min: i64) -> PerResult<()> {
        if value < min {
            return Err(PerError::ConstraintViolation { value, min, max: i64::MAX });
        }
        let offset = value.abs_diff(min);
        let octets = octets_needed(offset);
        self.encode_length_determinant(octets)?;
        self.write_bits(offset, octets * 8)
    }

    /// Encode unconstrained whole number (X.691 Section 12.2.6)
    pub fn encode_unconstrained_whole_number(&mut self, value: i64) -> PerResult<()> {
        let bytes = value.to_be_bytes();
        // Drop leading octets that only repeat the sign
        let mut start = 0;
        while start < bytes.len() - 1 {
            let (octet, next) = (bytes[start], bytes[start + 1]);
            let redundant = (octet == 0x00 && next & 0x80 == 0) || (octet == 0xFF && next & 0x80 != 0);
            if !redundant {
                break;
            }
            start += 1;
        }

        self.encode_length_determinant(bytes.len() - start)?;
        self.write_bytes(&bytes[start..])
    }

    /// Encode length determinant (X.691 Section 11.9)
    pub fn encode_length_determinant(&mut self, length: usize) -> PerResult<()> {
        if length > MAX_LENGTH_DETERMINANT {
            log::warn!("Length {length} needs a fragmented length determinant, which is not supported");
            return Err(PerError::InvalidLength { length });
        }
        self.align();
        if length <= 127 {
            // Short form: 0xxxxxxx
            self.write_bits(length as u64, 8)
        } else {
            // Long form: 10xxxxxx xxxxxxxx
            self.write_bits(0x8000 | length as u64, 16)
        }
    }

    /// Encode constrained length determinant
    pub fn encode_constrained_length(
        &mut self,
        length: usize,
        min: usize,
        max: usize,
    ) -> PerResult<()> {
        let constraint = Constraint::new(min as i64, max as i64);
        self.encode_constrained_whole_number(length as i64, &constraint)
    }

    /// Extension bit and length part of a sized type.
    fn encode_size(&mut self, length: usize, size: &SizeConstraint, type_name: &'static str) -> PerResult<()> {
        if size.extensible {
            self.encode_extension_bit(!size.contains(length), type_name)?;
        } else if !size.contains(length) {
            return Err(PerError::InvalidLength { length });
        }

        if size.is_fixed() {
            return Ok(());
        }
        match size.constrained_max() {
            Some(max) => self.encode_constrained_length(length, size.min, max),
            None => self.encode_length_determinant(length),
        }
    }

    /// Encode ENUMERATED (X.691 Section 14)
    pub fn encode_enumerated(
        &mut self,
        value: i64,
        constraint: &Constraint,
        type_name: &'static str,
    ) -> PerResult<()> {
        self.encode_integer(value, constraint, type_name)
    }

    /// Encode CHOICE index (X.691 Section 23)
    pub fn encode_choice_index(
        &mut self,
        index: usize,
        num_alternatives: usize,
        extensible: bool,
        type_name: &'static str,
    ) -> PerResult<()> {
        if num_alternatives == 0 {
            return Err(PerError::InvalidInput("CHOICE without alternatives"));
        }
        if extensible {
            self.encode_extension_bit(index >= num_alternatives, type_name)?;
        } else if index >= num_alternatives {
            return Err(PerError::InvalidChoiceIndex {
                index,
                max: num_alternatives - 1,
            });
        }
        let constraint = Constraint::new(0, (num_alternatives - 1) as i64);
        self.encode_constrained_whole_number(index as i64, &constraint)
    }

    /// Encode OCTET STRING (X.691 Section 17)
    pub fn encode_octet_string(
        &mut self,
        data: &[u8],
        size: &SizeConstraint,
        type_name: &'static str,
    ) -> PerResult<()> {
        let len = data.len();
        self.encode_size(len, size, type_name)?;
        let aligned = if size.is_fixed() {
            len > 2
        } else {
            size.constrained_max().is_some_and(|max| max > 2)
        };
        if aligned {
            self.align();
        }
        self.write_bytes(data)
    }

    /// Encode BIT STRING (X.691 Section 16)
    pub fn encode_bit_string(
        &mut self,
        bits: &BitSlice<u8, Msb0>,
        size: &SizeConstraint,
        type_name: &'static str,
    ) -> PerResult<()> {
        let len = bits.len();
        self.encode_size(len, size, type_name)?;
        let aligned = if size.is_fixed() {
            len > 16
        } else {
            size.constrained_max().is_some_and(|max| max > 16)
        };
        if aligned {
            self.align();
        }
        self.reserve_bits(len)?;
        self.buffer.extend_from_bitslice(bits);
        Ok(())
    }

    /// Encode a fixed-size BIT STRING of up to 64 bits held as an integer.
    pub fn encode_fixed_bit_string(&mut self, value: u64, num_bits: usize) -> PerResult<()> {
        if num_bits < 64 && value >> num_bits != 0 {
            return Err(PerError::EncodeFailure(format!(
                "value {value:#x} does not fit in a {num_bits}-bit BIT STRING"
            )));
        }
        if num_bits > 16 {
            self.align();
        }
        self.write_bits(value, num_bits)
    }

    /// Length part of a SEQUENCE OF, checked against the container limit
    /// before anything is written.
    pub fn encode_sequence_of_length(
        &mut self,
        length: usize,
        size: &SizeConstraint,
        type_name: &'static str,
    ) -> PerResult<()> {
        check_container_len(length, &self.config, type_name)?;
        self.encode_size(length, size, type_name)
    }

    /// Encode SEQUENCE OF (X.691 Section 20)
    pub fn encode_sequence_of<T: AperEncode>(
        &mut self,
        items: &[T],
        size: &SizeConstraint,
        type_name: &'static str,
    ) -> PerResult<()> {
        self.encode_sequence_of_length(items.len(), size, type_name)?;
        for item in items {
            item.encode_aper(self)?;
        }
        Ok(())
    }

    /// Encode an open type: the value goes to a scratch encoder, is padded to
    /// an octet and copied behind a length determinant.
    pub fn encode_open_type<F>(&mut self, encode: F) -> PerResult<()>
    where
        F: FnOnce(&mut AperEncoder) -> PerResult<()>,
    {
        let mut scratch = self.nested();
        encode(&mut scratch)?;
        let bytes = scratch.into_bytes();
        self.encode_open_type_bytes(&bytes)
    }

    /// Write an already encoded open type value.
    pub fn encode_open_type_bytes(&mut self, bytes: &[u8]) -> PerResult<()> {
        if bytes.is_empty() {
            // An empty encoding is sent as a single zero octet (X.691 10.1.3)
            self.encode_length_determinant(1)?;
            return self.write_bits(0, 8);
        }
        self.encode_length_determinant(bytes.len())?;
        self.write_bytes(bytes)
    }
}

impl Default for AperEncoder {
    fn default() -> Self {
        Self::new()
    }
}

/// APER (Aligned PER) Decoder
pub struct AperDecoder<'a> {
    bytes: &'a [u8],
    data: &'a BitSlice<u8, Msb0>,
    position: usize,
    config: CodecConfig,
}

impl<'a> AperDecoder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_config(data, CodecConfig::default())
    }

    pub fn with_config(data: &'a [u8], config: CodecConfig) -> Self {
        Self {
            bytes: data,
            data: data.view_bits::<Msb0>(),
            position: 0,
            config,
        }
    }

    /// Decoder over an open type's octets, sharing this decoder's limits.
    pub fn nested<'b>(&self, data: &'b [u8]) -> AperDecoder<'b> {
        AperDecoder::with_config(data, self.config)
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Get current bit position
    pub fn bit_position(&self) -> usize {
        self.position
    }

    /// Get remaining bits
    pub fn remaining_bits(&self) -> usize {
        self.data.len().saturating_sub(self.position)
    }

    fn ensure_bits(&self, needed: usize) -> PerResult<()> {
        let available = self.remaining_bits();
        if needed > available {
            return Err(PerError::BufferOverflow { needed, available });
        }
        Ok(())
    }

    /// Align to octet boundary
    pub fn align(&mut self) {
        let remainder = self.position % 8;
        if remainder != 0 {
            self.position += 8 - remainder;
        }
    }

    /// Read a single bit
    pub fn read_bit(&mut self) -> PerResult<bool> {
        self.ensure_bits(1)?;
        let bit = self.data[self.position];
        self.position += 1;
        Ok(bit)
    }

    /// Read multiple bits as a value (MSB first)
    pub fn read_bits(&mut self, num_bits: usize) -> PerResult<u64> {
        if num_bits > 64 {
            return Err(PerError::InvalidInput("cannot read more than 64 bits at once"));
        }
        self.ensure_bits(num_bits)?;
        if num_bits == 0 {
            return Ok(0);
        }
        let value = self.data[self.position..self.position + num_bits].load_be::<u64>();
        self.position += num_bits;
        Ok(value)
    }

    /// Read raw bytes
    pub fn read_bytes(&mut self, num_bytes: usize) -> PerResult<Vec<u8>> {
        self.ensure_bits(num_bytes * 8)?;
        if self.position % 8 == 0 {
            let start = self.position / 8;
            self.position += num_bytes * 8;
            return Ok(self.bytes[start..start + num_bytes].to_vec());
        }
        (0..num_bytes)
            .map(|_| self.read_bits(8).map(|octet| octet as u8))
            .collect()
    }

    /// Read the extension bit of an extensible type.
    pub fn decode_extension_bit(&mut self, type_name: &'static str) -> PerResult<()> {
        if self.read_bit()? {
            return Err(unsupported_extension(type_name));
        }
        Ok(())
    }

    /// Read a SEQUENCE's extension bit and the presence bits of its `N`
    /// OPTIONAL components.
    pub fn decode_sequence_preamble<const N: usize>(
        &mut self,
        extensible: bool,
        type_name: &'static str,
    ) -> PerResult<[bool; N]> {
        if extensible {
            self.decode_extension_bit(type_name)?;
        }
        let mut present = [false; N];
        for bit in present.iter_mut() {
            *bit = self.read_bit()?;
        }
        Ok(present)
    }

    /// Decode constrained whole number (X.691 Section 12.2)
    pub fn decode_constrained_whole_number(&mut self, constraint: &Constraint) -> PerResult<i64> {
        let range = constraint.range();

        let offset = match range {
            0 | 1 => return Ok(constraint.min),
            2..=255 => self.read_bits(constraint.bits_needed())?,
            256 => {
                self.align();
                self.read_bits(8)?
            }
            257..=65536 => {
                self.align();
                self.read_bits(16)?
            }
            _ => self.decode_large_range(constraint)?,
        };

        if offset >= range {
            let value = i64::try_from(offset)
                .map(|offset| constraint.min.saturating_add(offset))
                .unwrap_or(i64::MAX);
            return Err(constraint.violation(value));
        }
        Ok(constraint.min.wrapping_add(offset as i64))
    }

    fn decode_large_range(&mut self, constraint: &Constraint) -> PerResult<u64> {
        let length = Constraint::new(1, constraint.max_octets() as i64);
        let octets = self.decode_constrained_whole_number(&length)? as usize;
        self.align();
        self.read_bits(octets * 8)
    }

    /// Decode an INTEGER type, including the extension bit of extensible
    /// constraints.
    pub fn decode_integer(&mut self, constraint: &Constraint, type_name: &'static str) -> PerResult<i64> {
        if constraint.extensible {
            self.decode_extension_bit(type_name)?;
        }
        self.decode_constrained_whole_number(constraint)
    }

    /// Decode semi-constrained whole number (X.691 Section 12.2.4)
    pub fn decode_semi_constrained_whole_number(&mut self, min: i64) -> PerResult<i64> {
        let len = self.decode_length_determinant()?;
        if len == 0 || len > 8 {
            return Err(PerError::DecodeFailure(format!(
                "semi-constrained integer of {len} octets"
            )));
        }
        let offset = self.read_bits(len * 8)?;
        i64::try_from(offset)
            .ok()
            .and_then(|offset| min.checked_add(offset))
            .ok_or_else(|| PerError::DecodeFailure(format!("semi-constrained integer overflows: {offset}")))
    }

    /// Decode unconstrained whole number (X.691 Section 12.2.6)
    pub fn decode_unconstrained_whole_number(&mut self) -> PerResult<i64> {
        let len = self.decode_length_determinant()?;
        if len == 0 || len > 8 {
            return Err(PerError::DecodeFailure(format!(
                "unconstrained integer of {len} octets"
            )));
        }
        let bytes = self.read_bytes(len)?;

        // Check sign bit
        let negative = bytes[0] & 0x80 != 0;

        let mut value: i64 = if negative { -1 } else { 0 };
        for byte in bytes {
            value = (value << 8) | (byte as i64);
        }

        Ok(value)
    }

    /// Decode length determinant (X.691 Section 11.9)
    pub fn decode_length_determinant(&mut self) -> PerResult<usize> {
        self.align();
        let first_byte = self.read_bits(8)? as u8;

        let length = if first_byte & 0x80 == 0 {
            // Short form
            first_byte as usize
        } else if first_byte & 0x40 == 0 {
            // Long form
            let second_byte = self.read_bits(8)? as u8;
            (((first_byte & 0x3F) as usize) << 8) | (second_byte as usize)
        } else {
            log::warn!("Fragmented length determinant is not supported");
            return Err(PerError::InvalidLength {
                length: ((first_byte & 0x3F) as usize) * 16384,
            });
        };

        if length > MAX_LENGTH_DETERMINANT {
            log::warn!("Length determinant {length} is beyond the supported range");
            return Err(PerError::InvalidLength { length });
        }
        Ok(length)
    }

    /// Decode constrained length determinant
    pub fn decode_constrained_length(&mut self, min: usize, max: usize) -> PerResult<usize> {
        let constraint = Constraint::new(min as i64, max as i64);
        self.decode_constrained_whole_number(&constraint)
            .map(|v| v as usize)
    }

    fn decode_size(&mut self, size: &SizeConstraint, type_name: &'static str) -> PerResult<usize> {
        if size.extensible {
            self.decode_extension_bit(type_name)?;
        }
        if size.is_fixed() {
            return Ok(size.min);
        }
        let length = match size.constrained_max() {
            Some(max) => self.decode_constrained_length(size.min, max)?,
            None => self.decode_length_determinant()?,
        };
        if !size.contains(length) {
            return Err(PerError::InvalidLength { length });
        }
        Ok(length)
    }

    /// Decode ENUMERATED (X.691 Section 14)
    pub fn decode_enumerated(&mut self, constraint: &Constraint, type_name: &'static str) -> PerResult<i64> {
        self.decode_integer(constraint, type_name)
    }

    /// Decode CHOICE index (X.691 Section 23)
    pub fn decode_choice_index(
        &mut self,
        num_alternatives: usize,
        extensible: bool,
        type_name: &'static str,
    ) -> PerResult<usize> {
        if num_alternatives == 0 {
            return Err(PerError::InvalidInput("CHOICE without alternatives"));
        }
        if extensible {
            self.decode_extension_bit(type_name)?;
        }
        let constraint = Constraint::new(0, (num_alternatives - 1) as i64);
        match self.decode_constrained_whole_number(&constraint) {
            Ok(index) => Ok(index as usize),
            Err(PerError::ConstraintViolation { value, .. }) => Err(PerError::InvalidChoiceIndex {
                index: value as usize,
                max: num_alternatives - 1,
            }),
            Err(e) => Err(e),
        }
    }

    /// Decode OCTET STRING (X.691 Section 17)
    pub fn decode_octet_string(
        &mut self,
        size: &SizeConstraint,
        type_name: &'static str,
    ) -> PerResult<Vec<u8>> {
        let len = self.decode_size(size, type_name)?;
        let aligned = if size.is_fixed() {
            len > 2
        } else {
            size.constrained_max().is_some_and(|max| max > 2)
        };
        if aligned {
            self.align();
        }
        self.read_bytes(len)
    }

    /// Decode a fixed-size OCTET STRING into an array.
    pub fn decode_octet_array<const N: usize>(&mut self, type_name: &'static str) -> PerResult<[u8; N]> {
        let bytes = self.decode_octet_string(&SizeConstraint::fixed(N), type_name)?;
        bytes
            .try_into()
            .map_err(|_| PerError::DecodeFailure(format!("{type_name}: expected {N} octets")))
    }

    /// Decode BIT STRING (X.691 Section 16)
    pub fn decode_bit_string(
        &mut self,
        size: &SizeConstraint,
        type_name: &'static str,
    ) -> PerResult<BitVec<u8, Msb0>> {
        let len = self.decode_size(size, type_name)?;
        let aligned = if size.is_fixed() {
            len > 16
        } else {
            size.constrained_max().is_some_and(|max| max > 16)
        };
        if aligned {
            self.align();
        }
        self.ensure_bits(len)?;
        let mut bits = BitVec::with_capacity(len);
        bits.extend_from_bitslice(&self.data[self.position..self.position + len]);
        self.position += len;
        Ok(bits)
    }

    /// Decode a fixed-size BIT STRING of up to 64 bits as an integer.
    pub fn decode_fixed_bit_string(&mut self, num_bits: usize) -> PerResult<u64> {
        if num_bits > 16 {
            self.align();
        }
        self.read_bits(num_bits)
    }

    /// Length part of a SEQUENCE OF, checked against the container limit.
    pub fn decode_sequence_of_length(
        &mut self,
        size: &SizeConstraint,
        type_name: &'static str,
    ) -> PerResult<usize> {
        let length = self.decode_size(size, type_name)?;
        check_container_len(length, &self.config, type_name)?;
        Ok(length)
    }

    /// Decode SEQUENCE OF (X.691 Section 20)
    pub fn decode_sequence_of<T: AperDecode>(
        &mut self,
        size: &SizeConstraint,
        type_name: &'static str,
    ) -> PerResult<Vec<T>> {
        let count = self.decode_sequence_of_length(size, type_name)?;
        let mut items = Vec::with_capacity(count);
        for _ in 0..count {
            items.push(T::decode_aper(self)?);
        }
        Ok(items)
    }

    /// Read an open type's octets without interpreting them.
    pub fn decode_open_type_bytes(&mut self) -> PerResult<Vec<u8>> {
        let len = self.decode_length_determinant()?;
        self.read_bytes(len)
    }

    /// Decode an open type from exactly the octets its length declares.
    pub fn decode_open_type<T, F>(&mut self, decode: F) -> PerResult<T>
    where
        F: FnOnce(&mut AperDecoder<'_>) -> PerResult<T>,
    {
        let bytes = self.decode_open_type_bytes()?;
        let mut scratch = self.nested(&bytes);
        let value = decode(&mut scratch)?;
        scratch.ensure_consumed()?;
        Ok(value)
    }

    /// Fail if whole octets remain after the value decoded from this buffer.
    /// The single zero octet carrying an empty encoding is accepted.
    pub fn ensure_consumed(&mut self) -> PerResult<()> {
        let consumed = self.position;
        self.align();
        let remaining = self.remaining_bits();
        if remaining > 0 && !(consumed == 0 && self.data.len() == 8) {
            return Err(PerError::DecodeFailure(format!(
                "{} unconsumed octets in open type",
                remaining / 8
            )));
        }
        Ok(())
    }
}

/// Trait for types that can be encoded with APER
pub trait AperEncode {
    fn encode_aper(&self, encoder: &mut AperEncoder) -> PerResult<()>;
}

/// Trait for types that can be decoded with APER
pub trait AperDecode: Sized {
    fn decode_aper(decoder: &mut AperDecoder) -> PerResult<Self>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Octet(u8);

    impl AperEncode for Octet {
        fn encode_aper(&self, encoder: &mut AperEncoder) -> PerResult<()> {
            encoder.write_bits(self.0 as u64, 8)
        }
    }

    impl AperDecode for Octet {
        fn decode_aper(decoder: &mut AperDecoder) -> PerResult<Self> {
            Ok(Octet(decoder.read_bits(8)? as u8))
        }
    }

    #[test]
    fn test_constraint_bits_needed() {
        assert_eq!(Constraint::new(0, 0).bits_needed(), 0);
        assert_eq!(Constraint::new(0, 1).bits_needed(), 1);
        assert_eq!(Constraint::new(0, 2).bits_needed(), 2);
        assert_eq!(Constraint::new(0, 3).bits_needed(), 2);
        assert_eq!(Constraint::new(0, 7).bits_needed(), 3);
        assert_eq!(Constraint::new(0, 255).bits_needed(), 8);
        assert_eq!(Constraint::new(0, 4_294_967_295).max_octets(), 4);
        assert_eq!(Constraint::new(0, 10_000_000_000).max_octets(), 5);
    }

    #[test]
    fn test_write_read_bits_msb_first() {
        let mut encoder = AperEncoder::new();
        encoder.write_bits(0b101, 3).unwrap();
        encoder.write_bits(0xFF0, 4).unwrap();
        let bytes = encoder.into_bytes();
        assert_eq!(&bytes[..], &[0b1010_0000]);

        let mut decoder = AperDecoder::new(&bytes);
        assert_eq!(decoder.read_bits(3).unwrap(), 0b101);
        assert_eq!(decoder.read_bits(4).unwrap(), 0);
        assert_eq!(decoder.bit_position(), 7);
    }

    #[test]
    fn test_read_past_end_overflows() {
        let mut decoder = AperDecoder::new(&[0xAA]);
        decoder.read_bits(6).unwrap();
        assert_eq!(
            decoder.read_bits(3),
            Err(PerError::BufferOverflow { needed: 3, available: 2 })
        );
    }

    #[test]
    fn test_write_past_limit_overflows() {
        let config = CodecConfig::default().with_max_message_len(2);
        let mut encoder = AperEncoder::with_config(config);
        encoder.write_bits(0xABC, 12).unwrap();
        assert_eq!(
            encoder.write_bits(0x1F, 5),
            Err(PerError::BufferOverflow { needed: 5, available: 4 })
        );
        assert_eq!(encoder.bit_position(), 12);
    }

    #[test]
    fn test_encode_decode_constrained() {
        let constraint = Constraint::new(0, 2);

        for value in 0..=2 {
            let mut encoder = AperEncoder::new();
            encoder.encode_constrained_whole_number(value, &constraint).unwrap();
            encoder.align();

            let bytes = encoder.into_bytes();
            let mut decoder = AperDecoder::new(&bytes);
            let decoded = decoder.decode_constrained_whole_number(&constraint).unwrap();

            assert_eq!(value, decoded);
        }
    }

    #[test]
    fn test_constrained_bit_width_at_bounds() {
        let constraint = Constraint::new(10, 17);
        for value in [10, 17] {
            let mut encoder = AperEncoder::new();
            encoder.encode_constrained_whole_number(value, &constraint).unwrap();
            assert_eq!(encoder.bit_position(), 3);
        }
        for value in [9, 18] {
            let mut encoder = AperEncoder::new();
            assert_eq!(
                encoder.encode_constrained_whole_number(value, &constraint),
                Err(PerError::ConstraintViolation { value, min: 10, max: 17 })
            );
            assert_eq!(encoder.bit_position(), 0);
        }
    }

    #[test]
    fn test_decode_offset_beyond_range_rejected() {
        // 0..=4 uses 3 bits; 0b111 is outside the range
        let mut decoder = AperDecoder::new(&[0b1110_0000]);
        assert!(matches!(
            decoder.decode_constrained_whole_number(&Constraint::new(0, 4)),
            Err(PerError::ConstraintViolation { value: 7, .. })
        ));
    }

    #[test]
    fn test_two_octet_range_is_aligned() {
        let mut encoder = AperEncoder::new();
        encoder.write_bit(true).unwrap();
        encoder
            .encode_constrained_whole_number(4095, &Constraint::new(0, 4095))
            .unwrap();
        assert_eq!(&encoder.into_bytes()[..], &[0x80, 0x0F, 0xFF]);
    }

    #[test]
    fn test_large_range_octet_count_prefix() {
        let constraint = Constraint::new(0, 4_294_967_295);

        let mut encoder = AperEncoder::new();
        encoder.encode_constrained_whole_number(0, &constraint).unwrap();
        assert_eq!(&encoder.into_bytes()[..], &[0x00, 0x00]);

        let mut encoder = AperEncoder::new();
        encoder.encode_constrained_whole_number(256, &constraint).unwrap();
        assert_eq!(&encoder.into_bytes()[..], &[0x40, 0x01, 0x00]);

        let mut encoder = AperEncoder::new();
        encoder
            .encode_constrained_whole_number(0x0102_0304, &constraint)
            .unwrap();
        let bytes = encoder.into_bytes();
        assert_eq!(&bytes[..], &[0xC0, 0x01, 0x02, 0x03, 0x04]);

        let mut decoder = AperDecoder::new(&bytes);
        assert_eq!(decoder.decode_constrained_whole_number(&constraint).unwrap(), 0x0102_0304);
    }

    #[test]
    fn test_large_range_three_bit_prefix() {
        let bit_rate = Constraint::new(0, 10_000_000_000);
        let mut encoder = AperEncoder::new();
        encoder
            .encode_constrained_whole_number(10_000_000_000, &bit_rate)
            .unwrap();
        let bytes = encoder.into_bytes();
        assert_eq!(&bytes[..], &[0x80, 0x02, 0x54, 0x0B, 0xE4, 0x00]);

        let mut decoder = AperDecoder::new(&bytes);
        assert_eq!(decoder.decode_constrained_whole_number(&bit_rate).unwrap(), 10_000_000_000);
    }

    #[test]
    fn test_large_range_minimum_uses_one_octet() {
        let hfn = Constraint::new(5, 1_048_580);
        let mut encoder = AperEncoder::new();
        encoder.encode_constrained_whole_number(5, &hfn).unwrap();
        assert_eq!(&encoder.into_bytes()[..], &[0x00, 0x00]);
    }

    #[test]
    fn test_encode_decode_length() {
        for len in [0, 1, 127, 128, 255, 1000, MAX_LENGTH_DETERMINANT] {
            let mut encoder = AperEncoder::new();
            encoder.encode_length_determinant(len).unwrap();

            let bytes = encoder.into_bytes();
            let mut decoder = AperDecoder::new(&bytes);
            let decoded = decoder.decode_length_determinant().unwrap();

            assert_eq!(len, decoded);
        }
    }

    #[test]
    fn test_length_determinant_forms() {
        let mut encoder = AperEncoder::new();
        encoder.encode_length_determinant(127).unwrap();
        assert_eq!(&encoder.into_bytes()[..], &[0x7F]);

        let mut encoder = AperEncoder::new();
        encoder.encode_length_determinant(128).unwrap();
        assert_eq!(&encoder.into_bytes()[..], &[0x80, 0x80]);

        let mut encoder = AperEncoder::new();
        assert_eq!(
            encoder.encode_length_determinant(16383),
            Err(PerError::InvalidLength { length: 16383 })
        );
        assert_eq!(encoder.bit_position(), 0);

        let mut decoder = AperDecoder::new(&[0xBF, 0xFF]);
        assert_eq!(
            decoder.decode_length_determinant(),
            Err(PerError::InvalidLength { length: 16383 })
        );
        let mut decoder = AperDecoder::new(&[0xC1, 0x00]);
        assert!(matches!(
            decoder.decode_length_determinant(),
            Err(PerError::InvalidLength { .. })
        ));
    }

    #[test]
    fn test_short_octet_string_is_not_aligned() {
        let mut encoder = AperEncoder::new();
        encoder.write_bit(true).unwrap();
        encoder
            .encode_octet_string(&[0xAB, 0xCD], &SizeConstraint::fixed(2), "TAC")
            .unwrap();
        assert_eq!(encoder.bit_position(), 17);
        assert_eq!(&encoder.into_bytes()[..], &[0xD5, 0xE6, 0x80]);
    }

    #[test]
    fn test_three_octet_string_is_aligned() {
        let mut encoder = AperEncoder::new();
        encoder.write_bit(true).unwrap();
        encoder
            .encode_octet_string(&[0xAB, 0xCD, 0xEF], &SizeConstraint::fixed(3), "PLMN-Identity")
            .unwrap();
        assert_eq!(encoder.bit_position(), 32);
        let bytes = encoder.into_bytes();
        assert_eq!(&bytes[..], &[0x80, 0xAB, 0xCD, 0xEF]);

        let mut decoder = AperDecoder::new(&bytes);
        assert!(decoder.read_bit().unwrap());
        let decoded = decoder
            .decode_octet_string(&SizeConstraint::fixed(3), "PLMN-Identity")
            .unwrap();
        assert_eq!(decoded, vec![0xAB, 0xCD, 0xEF]);
        assert_eq!(decoder.bit_position() % 8, 0);
    }

    #[test]
    fn test_fixed_octet_string_wrong_length() {
        let mut encoder = AperEncoder::new();
        assert_eq!(
            encoder.encode_octet_string(&[1, 2], &SizeConstraint::fixed(3), "PLMN-Identity"),
            Err(PerError::InvalidLength { length: 2 })
        );
    }

    #[test]
    fn test_encode_decode_octet_string() {
        let data = vec![0x01, 0x02, 0x03, 0x04];

        let mut encoder = AperEncoder::new();
        encoder
            .encode_octet_string(&data, &SizeConstraint::unbounded(), "OCTET STRING")
            .unwrap();

        let bytes = encoder.into_bytes();
        assert_eq!(&bytes[..], &[0x04, 0x01, 0x02, 0x03, 0x04]);
        let mut decoder = AperDecoder::new(&bytes);
        let decoded = decoder
            .decode_octet_string(&SizeConstraint::unbounded(), "OCTET STRING")
            .unwrap();

        assert_eq!(data, decoded);
    }

    #[test]
    fn test_bit_string_alignment_threshold() {
        let mut encoder = AperEncoder::new();
        encoder.write_bit(true).unwrap();
        encoder.encode_fixed_bit_string(0xFFFF, 16).unwrap();
        assert_eq!(encoder.bit_position(), 17);

        let mut encoder = AperEncoder::new();
        encoder.write_bit(true).unwrap();
        encoder.encode_fixed_bit_string(0x1FFFF, 17).unwrap();
        assert_eq!(encoder.bit_position(), 8 + 17);

        let mut encoder = AperEncoder::new();
        assert!(matches!(
            encoder.encode_fixed_bit_string(0x10_0000, 20),
            Err(PerError::EncodeFailure(_))
        ));
    }

    #[test]
    fn test_variable_bit_string_roundtrip() {
        let size = SizeConstraint::range(1, 160).with_extension();
        let bits = bitvec![u8, Msb0; 1, 0, 1, 1, 0, 0, 0, 0, 1, 1];

        let mut encoder = AperEncoder::new();
        encoder.encode_bit_string(&bits, &size, "TransportLayerAddress").unwrap();
        // ext bit, 8-bit length (10 - 1), aligned content
        let bytes = encoder.into_bytes();
        assert_eq!(&bytes[..], &[0x04, 0x80, 0xB0, 0xC0]);

        let mut decoder = AperDecoder::new(&bytes);
        let decoded = decoder.decode_bit_string(&size, "TransportLayerAddress").unwrap();
        assert_eq!(decoded, bits);
    }

    #[test]
    fn test_extensible_enumerated_rejects_extension() {
        let constraint = Constraint::extensible(0, 5);

        let mut encoder = AperEncoder::new();
        assert_eq!(
            encoder.encode_enumerated(6, &constraint, "TimeToWait"),
            Err(PerError::UnsupportedExtension { type_name: "TimeToWait" })
        );

        let mut decoder = AperDecoder::new(&[0x80]);
        assert_eq!(
            decoder.decode_enumerated(&constraint, "TimeToWait"),
            Err(PerError::UnsupportedExtension { type_name: "TimeToWait" })
        );

        let mut encoder = AperEncoder::new();
        encoder.encode_enumerated(5, &constraint, "TimeToWait").unwrap();
        assert_eq!(encoder.bit_position(), 4);
    }

    #[test]
    fn test_choice_index() {
        let mut encoder = AperEncoder::new();
        encoder.encode_choice_index(2, 3, true, "X2AP-PDU").unwrap();
        assert_eq!(&encoder.into_bytes()[..], &[0b0100_0000]);

        let mut encoder = AperEncoder::new();
        assert_eq!(
            encoder.encode_choice_index(3, 3, true, "X2AP-PDU"),
            Err(PerError::UnsupportedExtension { type_name: "X2AP-PDU" })
        );

        let mut decoder = AperDecoder::new(&[0b0110_0000]);
        assert_eq!(
            decoder.decode_choice_index(3, true, "X2AP-PDU"),
            Err(PerError::InvalidChoiceIndex { index: 3, max: 2 })
        );
    }

    #[test]
    fn test_sequence_preamble() {
        let mut encoder = AperEncoder::new();
        encoder.encode_sequence_preamble(true, &[true, false, true]).unwrap();
        let bytes = encoder.into_bytes();
        assert_eq!(&bytes[..], &[0b0101_0000]);

        let mut decoder = AperDecoder::new(&bytes);
        let present: [bool; 3] = decoder.decode_sequence_preamble(true, "Seq").unwrap();
        assert_eq!(present, [true, false, true]);
    }

    #[test]
    fn test_container_limit_checked_before_writing() {
        let items: Vec<Octet> = (0..33).map(Octet).collect();
        let mut encoder = AperEncoder::new();
        assert_eq!(
            encoder.encode_sequence_of(&items, &SizeConstraint::range(0, 65535), "List"),
            Err(PerError::ContainerTooLarge { length: 33, limit: 32 })
        );
        assert_eq!(encoder.bit_position(), 0);

        // count 33 in two aligned octets
        let mut decoder = AperDecoder::new(&[0x00, 0x21]);
        assert_eq!(
            decoder.decode_sequence_of::<Octet>(&SizeConstraint::range(0, 65535), "List"),
            Err(PerError::ContainerTooLarge { length: 33, limit: 32 })
        );
    }

    #[test]
    fn test_unbounded_sequence_of_length_forms() {
        let config = CodecConfig::default().with_max_container_len(256);
        for (count, prefix) in [(127usize, vec![0x7F]), (128, vec![0x80, 0x80])] {
            let items: Vec<Octet> = (0..count).map(|i| Octet(i as u8)).collect();
            let mut encoder = AperEncoder::with_config(config);
            encoder
                .encode_sequence_of(&items, &SizeConstraint::unbounded(), "List")
                .unwrap();
            let bytes = encoder.into_bytes();
            assert_eq!(&bytes[..prefix.len()], &prefix[..]);
            assert_eq!(bytes.len(), prefix.len() + count);

            let mut decoder = AperDecoder::with_config(&bytes, config);
            let decoded: Vec<Octet> = decoder
                .decode_sequence_of(&SizeConstraint::unbounded(), "List")
                .unwrap();
            assert_eq!(decoded.len(), count);
        }
    }

    #[test]
    fn test_semi_constrained_and_unconstrained() {
        let mut encoder = AperEncoder::new();
        encoder.encode_semi_constrained_whole_number(300, 44).unwrap();
        encoder.encode_unconstrained_whole_number(-129).unwrap();
        encoder.encode_unconstrained_whole_number(128).unwrap();
        let bytes = encoder.into_bytes();
        assert_eq!(&bytes[..], &[0x02, 0x01, 0x00, 0x02, 0xFF, 0x7F, 0x02, 0x00, 0x80]);

        let mut decoder = AperDecoder::new(&bytes);
        assert_eq!(decoder.decode_semi_constrained_whole_number(44).unwrap(), 300);
        assert_eq!(decoder.decode_unconstrained_whole_number().unwrap(), -129);
        assert_eq!(decoder.decode_unconstrained_whole_number().unwrap(), 128);
    }

    #[test]
    fn test_open_type() {
        let mut encoder = AperEncoder::new();
        encoder.write_bit(true).unwrap();
        encoder
            .encode_open_type(|scratch| scratch.write_bits(0b101, 3))
            .unwrap();
        encoder.encode_open_type(|_| Ok(())).unwrap();
        let bytes = encoder.into_bytes();
        assert_eq!(&bytes[..], &[0x80, 0x01, 0xA0, 0x01, 0x00]);

        let mut decoder = AperDecoder::new(&bytes);
        decoder.read_bit().unwrap();
        assert_eq!(decoder.decode_open_type(|d| d.read_bits(3)).unwrap(), 0b101);
        decoder.decode_open_type(|_| Ok(())).unwrap();
    }

    #[test]
    fn test_open_type_with_trailing_octets() {
        let mut decoder = AperDecoder::new(&[0x02, 0xA0, 0x00]);
        assert!(matches!(
            decoder.decode_open_type(|d| d.read_bits(3)),
            Err(PerError::DecodeFailure(_))
        ));
    }
}
