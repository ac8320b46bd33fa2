//! Primitive field codecs and the declarative field table they hang off.
//!
//! Every mandatory field of every operation is described by a [`FieldSpec`]
//! naming its codec kind; the same spec entry drives both decoding and
//! encoding so the two directions cannot drift apart as operations are
//! added. Typed optional-parameter values go through the same machinery via
//! [`TlvType`].

use std::collections::HashMap;
use std::fmt;
use std::io::Cursor;

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::codec::CodecError;
use crate::datatypes::{
    AddrSubunit, BearerType, DataCoding, DeliveryFailureReason, DestAddress, DisplayTime,
    EsmClass, LanguageIndicator, MessageState, MoreMessagesToSend, MsAvailabilityStatus,
    NetworkType, NumericPlanIndicator, PayloadType, PriorityFlag, PrivacyIndicator,
    RegisteredDelivery, TypeOfNumber, UnsuccessSme,
};

/// One mandatory field of an operation: its wire name and codec kind.
#[derive(Copy, Clone, Debug)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldType,
}

impl FieldSpec {
    pub const fn int1(name: &'static str) -> Self {
        FieldSpec {
            name,
            kind: FieldType::Int { width: 1 },
        }
    }

    pub const fn enumerated(name: &'static str, domain: Domain) -> Self {
        FieldSpec {
            name,
            kind: FieldType::Enum { domain },
        }
    }

    pub const fn cstring(name: &'static str, max: usize) -> Self {
        FieldSpec {
            name,
            kind: FieldType::CString { max },
        }
    }

    pub const fn octets_var(name: &'static str, len_field: &'static str) -> Self {
        FieldSpec {
            name,
            kind: FieldType::OctetsVar { len_field },
        }
    }

    pub const fn esm_class() -> Self {
        FieldSpec {
            name: "esm_class",
            kind: FieldType::EsmClass,
        }
    }

    pub const fn registered_delivery() -> Self {
        FieldSpec {
            name: "registered_delivery",
            kind: FieldType::RegisteredDelivery,
        }
    }

    pub const fn data_coding() -> Self {
        FieldSpec {
            name: "data_coding",
            kind: FieldType::DataCoding,
        }
    }

    pub const fn dest_addresses(name: &'static str, count_field: &'static str) -> Self {
        FieldSpec {
            name,
            kind: FieldType::DestAddresses { count_field },
        }
    }

    pub const fn unsuccess_smes(name: &'static str, count_field: &'static str) -> Self {
        FieldSpec {
            name,
            kind: FieldType::UnsuccessSmes { count_field },
        }
    }
}

/// Codec kind of a mandatory field.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FieldType {
    /// Unsigned big-endian integer, width 1, 2 or 4 octets.
    Int { width: usize },
    /// One octet validated against a closed enumerated domain.
    Enum { domain: Domain },
    /// NUL-terminated ASCII string; `max` includes the terminator.
    CString { max: usize },
    /// Exactly `len` octets.
    OctetsFixed { len: usize },
    /// As many octets as the already-decoded sibling integer field says.
    OctetsVar { len_field: &'static str },
    EsmClass,
    RegisteredDelivery,
    DataCoding,
    /// submit_multi destination list, repeated `count_field` times.
    DestAddresses { count_field: &'static str },
    /// submit_multi_resp unsuccess list, repeated `count_field` times.
    UnsuccessSmes { count_field: &'static str },
}

/// Closed single-octet domains. Decoding a value outside its domain is a
/// corruption error, never silently accepted.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Domain {
    Ton,
    Npi,
    Priority,
    ReplaceIfPresent,
    MessageState,
    DestFlag,
    AddrSubunit,
    NetworkType,
    BearerType,
    PayloadType,
    PrivacyIndicator,
    LanguageIndicator,
    DisplayTime,
    MsAvailabilityStatus,
    DeliveryFailureReason,
    MoreMessagesToSend,
    NumberOfMessages,
}

impl Domain {
    pub fn contains(self, value: u8) -> bool {
        match self {
            Domain::Ton => TypeOfNumber::try_from(value).is_ok(),
            Domain::Npi => NumericPlanIndicator::try_from(value).is_ok(),
            Domain::Priority => PriorityFlag::try_from(value).is_ok(),
            Domain::ReplaceIfPresent => value <= 0x01,
            Domain::MessageState => MessageState::try_from(value).is_ok(),
            Domain::DestFlag => {
                value == DestAddress::FLAG_SME || value == DestAddress::FLAG_DISTRIBUTION_LIST
            }
            Domain::AddrSubunit => AddrSubunit::try_from(value).is_ok(),
            Domain::NetworkType => NetworkType::try_from(value).is_ok(),
            Domain::BearerType => BearerType::try_from(value).is_ok(),
            Domain::PayloadType => PayloadType::try_from(value).is_ok(),
            Domain::PrivacyIndicator => PrivacyIndicator::try_from(value).is_ok(),
            Domain::LanguageIndicator => LanguageIndicator::try_from(value).is_ok(),
            Domain::DisplayTime => DisplayTime::try_from(value).is_ok(),
            Domain::MsAvailabilityStatus => MsAvailabilityStatus::try_from(value).is_ok(),
            Domain::DeliveryFailureReason => DeliveryFailureReason::try_from(value).is_ok(),
            Domain::MoreMessagesToSend => MoreMessagesToSend::try_from(value).is_ok(),
            Domain::NumberOfMessages => value <= 99,
        }
    }
}

/// A decoded (or caller-supplied) field value. Enumerated single-octet
/// domains are carried as validated `Int`s; the typed domain enums convert
/// into `Int` so builders stay strongly typed at the call site.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    Int(u32),
    Str(String),
    Bytes(Bytes),
    EsmClass(EsmClass),
    RegisteredDelivery(RegisteredDelivery),
    DataCoding(DataCoding),
    DestAddresses(Vec<DestAddress>),
    UnsuccessSmes(Vec<UnsuccessSme>),
}

impl FieldValue {
    pub fn as_int(&self) -> Option<u32> {
        match self {
            FieldValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            FieldValue::Bytes(b) => Some(b),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Int(v) => write!(f, "{v}"),
            FieldValue::Str(s) => write!(f, "{s:?}"),
            FieldValue::Bytes(b) => {
                for byte in b.iter() {
                    write!(f, "{byte:02x}")?;
                }
                Ok(())
            }
            FieldValue::EsmClass(v) => write!(f, "{v:?}"),
            FieldValue::RegisteredDelivery(v) => write!(f, "{v:?}"),
            FieldValue::DataCoding(v) => write!(f, "{v:?}"),
            FieldValue::DestAddresses(v) => write!(f, "{v:?}"),
            FieldValue::UnsuccessSmes(v) => write!(f, "{v:?}"),
        }
    }
}

impl From<u32> for FieldValue {
    fn from(v: u32) -> Self {
        FieldValue::Int(v)
    }
}

impl From<u8> for FieldValue {
    fn from(v: u8) -> Self {
        FieldValue::Int(v.into())
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::Str(v.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::Str(v)
    }
}

impl From<Bytes> for FieldValue {
    fn from(v: Bytes) -> Self {
        FieldValue::Bytes(v)
    }
}

impl From<&[u8]> for FieldValue {
    fn from(v: &[u8]) -> Self {
        FieldValue::Bytes(Bytes::copy_from_slice(v))
    }
}

impl From<TypeOfNumber> for FieldValue {
    fn from(v: TypeOfNumber) -> Self {
        FieldValue::Int(u8::from(v).into())
    }
}

impl From<NumericPlanIndicator> for FieldValue {
    fn from(v: NumericPlanIndicator) -> Self {
        FieldValue::Int(u8::from(v).into())
    }
}

impl From<PriorityFlag> for FieldValue {
    fn from(v: PriorityFlag) -> Self {
        FieldValue::Int(u8::from(v).into())
    }
}

impl From<MessageState> for FieldValue {
    fn from(v: MessageState) -> Self {
        FieldValue::Int(u8::from(v).into())
    }
}

impl From<EsmClass> for FieldValue {
    fn from(v: EsmClass) -> Self {
        FieldValue::EsmClass(v)
    }
}

impl From<RegisteredDelivery> for FieldValue {
    fn from(v: RegisteredDelivery) -> Self {
        FieldValue::RegisteredDelivery(v)
    }
}

impl From<DataCoding> for FieldValue {
    fn from(v: DataCoding) -> Self {
        FieldValue::DataCoding(v)
    }
}

impl From<Vec<DestAddress>> for FieldValue {
    fn from(v: Vec<DestAddress>) -> Self {
        FieldValue::DestAddresses(v)
    }
}

impl From<Vec<UnsuccessSme>> for FieldValue {
    fn from(v: Vec<UnsuccessSme>) -> Self {
        FieldValue::UnsuccessSmes(v)
    }
}

/// Typed decode rule for a recognized optional parameter.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TlvType {
    Int1,
    Int2,
    Int4,
    Enum(Domain),
    /// NUL-terminated ASCII value; `max` includes the terminator.
    CString { max: usize },
    /// Raw octets delimited by the TLV length.
    Octets,
    /// Zero-length marker parameter (alert_on_message_delivery).
    Empty,
}

fn read_u8(buf: &mut Cursor<&[u8]>, field: &'static str) -> Result<u8, CodecError> {
    if buf.remaining() < 1 {
        return Err(CodecError::TruncatedField {
            field,
            needed: 1,
            available: 0,
        });
    }
    Ok(buf.get_u8())
}

fn read_int(buf: &mut Cursor<&[u8]>, width: usize, field: &'static str) -> Result<u32, CodecError> {
    if buf.remaining() < width {
        return Err(CodecError::TruncatedField {
            field,
            needed: width,
            available: buf.remaining(),
        });
    }
    Ok(match width {
        1 => buf.get_u8().into(),
        2 => buf.get_u16().into(),
        _ => buf.get_u32(),
    })
}

fn read_octets(buf: &mut Cursor<&[u8]>, len: usize, field: &'static str) -> Result<Bytes, CodecError> {
    if buf.remaining() < len {
        return Err(CodecError::TruncatedField {
            field,
            needed: len,
            available: buf.remaining(),
        });
    }
    Ok(buf.copy_to_bytes(len))
}

/// Decodes a variable-length NUL-terminated ASCII string. An immediate NUL
/// yields the empty string; a missing terminator or one at/beyond `max`
/// (counted including the terminator) is a corruption error.
fn read_cstring(
    buf: &mut Cursor<&[u8]>,
    max: usize,
    field: &'static str,
) -> Result<String, CodecError> {
    let remaining = &buf.get_ref()[buf.position() as usize..];
    let nul = remaining
        .iter()
        .position(|&b| b == 0)
        .ok_or(CodecError::UnterminatedCString { field, max })?;
    if nul + 1 > max {
        return Err(CodecError::CStringTooLong { field, max });
    }
    let content = &remaining[..nul];
    if !content.is_ascii() {
        return Err(CodecError::NonAsciiString { field });
    }
    let value = String::from_utf8(content.to_vec())
        .map_err(|_| CodecError::NonAsciiString { field })?;
    buf.advance(nul + 1);
    Ok(value)
}

fn write_cstring(
    buf: &mut BytesMut,
    value: &str,
    max: usize,
    field: &'static str,
) -> Result<(), CodecError> {
    if !value.is_ascii() {
        return Err(CodecError::NonAsciiString { field });
    }
    if value.len() + 1 > max {
        return Err(CodecError::CStringTooLong { field, max });
    }
    buf.put_slice(value.as_bytes());
    buf.put_u8(0);
    Ok(())
}

fn sibling_count(
    fields: &HashMap<&'static str, FieldValue>,
    len_field: &'static str,
    field: &'static str,
) -> Result<usize, CodecError> {
    fields
        .get(len_field)
        .and_then(FieldValue::as_int)
        .map(|v| v as usize)
        .ok_or(CodecError::FieldValidation {
            field,
            reason: format!("length field '{len_field}' was not decoded first"),
        })
}

fn read_address(
    buf: &mut Cursor<&[u8]>,
    field: &'static str,
) -> Result<(TypeOfNumber, NumericPlanIndicator, String), CodecError> {
    let ton_raw = read_u8(buf, field)?;
    let ton = TypeOfNumber::try_from(ton_raw).map_err(|_| CodecError::OutOfDomain {
        field,
        domain: Domain::Ton,
        value: ton_raw.into(),
    })?;
    let npi_raw = read_u8(buf, field)?;
    let npi = NumericPlanIndicator::try_from(npi_raw).map_err(|_| CodecError::OutOfDomain {
        field,
        domain: Domain::Npi,
        value: npi_raw.into(),
    })?;
    let addr = read_cstring(buf, 21, field)?;
    Ok((ton, npi, addr))
}

/// Decodes one mandatory field. `fields` holds the values decoded so far,
/// consulted for explicit back-references (length and count fields).
pub(crate) fn decode_field(
    spec: &FieldSpec,
    buf: &mut Cursor<&[u8]>,
    fields: &HashMap<&'static str, FieldValue>,
) -> Result<FieldValue, CodecError> {
    let field = spec.name;
    match spec.kind {
        FieldType::Int { width } => Ok(FieldValue::Int(read_int(buf, width, field)?)),
        FieldType::Enum { domain } => {
            let value = read_u8(buf, field)?;
            if !domain.contains(value) {
                return Err(CodecError::OutOfDomain {
                    field,
                    domain,
                    value: value.into(),
                });
            }
            Ok(FieldValue::Int(value.into()))
        }
        FieldType::CString { max } => Ok(FieldValue::Str(read_cstring(buf, max, field)?)),
        FieldType::OctetsFixed { len } => Ok(FieldValue::Bytes(read_octets(buf, len, field)?)),
        FieldType::OctetsVar { len_field } => {
            let len = sibling_count(fields, len_field, field)?;
            Ok(FieldValue::Bytes(read_octets(buf, len, field)?))
        }
        FieldType::EsmClass => {
            let value = read_u8(buf, field)?;
            Ok(FieldValue::EsmClass(EsmClass::from_byte(value, field)?))
        }
        FieldType::RegisteredDelivery => {
            let value = read_u8(buf, field)?;
            Ok(FieldValue::RegisteredDelivery(RegisteredDelivery::from_byte(
                value, field,
            )?))
        }
        FieldType::DataCoding => {
            let value = read_u8(buf, field)?;
            Ok(FieldValue::DataCoding(DataCoding::from_byte(value)))
        }
        FieldType::DestAddresses { count_field } => {
            let count = sibling_count(fields, count_field, field)?;
            let mut dests = Vec::with_capacity(count);
            for _ in 0..count {
                let flag = read_u8(buf, field)?;
                match flag {
                    DestAddress::FLAG_SME => {
                        let (ton, npi, addr) = read_address(buf, field)?;
                        dests.push(DestAddress::Sme { ton, npi, addr });
                    }
                    DestAddress::FLAG_DISTRIBUTION_LIST => {
                        let name = read_cstring(buf, 21, field)?;
                        dests.push(DestAddress::DistributionList { name });
                    }
                    other => {
                        return Err(CodecError::OutOfDomain {
                            field,
                            domain: Domain::DestFlag,
                            value: other.into(),
                        });
                    }
                }
            }
            Ok(FieldValue::DestAddresses(dests))
        }
        FieldType::UnsuccessSmes { count_field } => {
            let count = sibling_count(fields, count_field, field)?;
            let mut smes = Vec::with_capacity(count);
            for _ in 0..count {
                let (ton, npi, addr) = read_address(buf, field)?;
                let error_status_code = read_int(buf, 4, field)?;
                smes.push(UnsuccessSme {
                    ton,
                    npi,
                    addr,
                    error_status_code,
                });
            }
            Ok(FieldValue::UnsuccessSmes(smes))
        }
    }
}

fn type_mismatch(field: &'static str, expected: &str) -> CodecError {
    CodecError::FieldValidation {
        field,
        reason: format!("value does not match declared codec kind ({expected})"),
    }
}

/// Encodes one mandatory field. Construction already validated the value
/// against its table entry, so mismatches here indicate a registry bug and
/// are surfaced as validation errors rather than panics.
pub(crate) fn encode_field(
    spec: &FieldSpec,
    value: &FieldValue,
    buf: &mut BytesMut,
) -> Result<(), CodecError> {
    let field = spec.name;
    match (spec.kind, value) {
        (FieldType::Int { width }, FieldValue::Int(v)) => {
            match width {
                1 if *v <= u8::MAX.into() => buf.put_u8(*v as u8),
                2 if *v <= u16::MAX.into() => buf.put_u16(*v as u16),
                4 => buf.put_u32(*v),
                _ => {
                    return Err(CodecError::FieldValidation {
                        field,
                        reason: format!("value {v} does not fit in {width} octet(s)"),
                    });
                }
            }
            Ok(())
        }
        (FieldType::Enum { domain }, FieldValue::Int(v)) => {
            if *v > u8::MAX.into() || !domain.contains(*v as u8) {
                return Err(CodecError::OutOfDomain {
                    field,
                    domain,
                    value: *v,
                });
            }
            buf.put_u8(*v as u8);
            Ok(())
        }
        (FieldType::CString { max }, FieldValue::Str(s)) => write_cstring(buf, s, max, field),
        (FieldType::OctetsFixed { .. }, FieldValue::Bytes(b))
        | (FieldType::OctetsVar { .. }, FieldValue::Bytes(b)) => {
            buf.put_slice(b);
            Ok(())
        }
        (FieldType::EsmClass, FieldValue::EsmClass(v)) => {
            buf.put_u8(v.to_byte());
            Ok(())
        }
        (FieldType::RegisteredDelivery, FieldValue::RegisteredDelivery(v)) => {
            buf.put_u8(v.to_byte());
            Ok(())
        }
        (FieldType::DataCoding, FieldValue::DataCoding(v)) => {
            buf.put_u8(v.to_byte());
            Ok(())
        }
        (FieldType::DestAddresses { .. }, FieldValue::DestAddresses(dests)) => {
            for dest in dests {
                match dest {
                    DestAddress::Sme { ton, npi, addr } => {
                        buf.put_u8(DestAddress::FLAG_SME);
                        buf.put_u8((*ton).into());
                        buf.put_u8((*npi).into());
                        write_cstring(buf, addr, 21, field)?;
                    }
                    DestAddress::DistributionList { name } => {
                        buf.put_u8(DestAddress::FLAG_DISTRIBUTION_LIST);
                        write_cstring(buf, name, 21, field)?;
                    }
                }
            }
            Ok(())
        }
        (FieldType::UnsuccessSmes { .. }, FieldValue::UnsuccessSmes(smes)) => {
            for sme in smes {
                buf.put_u8(sme.ton.into());
                buf.put_u8(sme.npi.into());
                write_cstring(buf, &sme.addr, 21, field)?;
                buf.put_u32(sme.error_status_code);
            }
            Ok(())
        }
        (FieldType::Int { .. }, _) | (FieldType::Enum { .. }, _) => {
            Err(type_mismatch(field, "integer"))
        }
        (FieldType::CString { .. }, _) => Err(type_mismatch(field, "c-octet string")),
        (FieldType::OctetsFixed { .. }, _) | (FieldType::OctetsVar { .. }, _) => {
            Err(type_mismatch(field, "octet string"))
        }
        (FieldType::EsmClass, _) => Err(type_mismatch(field, "esm_class")),
        (FieldType::RegisteredDelivery, _) => Err(type_mismatch(field, "registered_delivery")),
        (FieldType::DataCoding, _) => Err(type_mismatch(field, "data_coding")),
        (FieldType::DestAddresses { .. }, _) => Err(type_mismatch(field, "destination list")),
        (FieldType::UnsuccessSmes { .. }, _) => Err(type_mismatch(field, "unsuccess list")),
    }
}

/// Decodes a recognized optional parameter's value by its declared type.
/// The declared TLV length must agree with the type.
pub(crate) fn decode_tlv_value(
    tag: u16,
    ty: TlvType,
    value: &Bytes,
) -> Result<FieldValue, CodecError> {
    let expect_len = |len: usize| -> Result<(), CodecError> {
        if value.len() != len {
            return Err(CodecError::TlvValue {
                tag,
                reason: "declared length does not match the parameter's type",
            });
        }
        Ok(())
    };
    match ty {
        TlvType::Int1 => {
            expect_len(1)?;
            Ok(FieldValue::Int(value[0].into()))
        }
        TlvType::Int2 => {
            expect_len(2)?;
            Ok(FieldValue::Int(u16::from_be_bytes([value[0], value[1]]).into()))
        }
        TlvType::Int4 => {
            expect_len(4)?;
            Ok(FieldValue::Int(u32::from_be_bytes([
                value[0], value[1], value[2], value[3],
            ])))
        }
        TlvType::Enum(domain) => {
            expect_len(1)?;
            if !domain.contains(value[0]) {
                return Err(CodecError::TlvValue {
                    tag,
                    reason: "value outside the parameter's enumerated domain",
                });
            }
            Ok(FieldValue::Int(value[0].into()))
        }
        TlvType::CString { max } => {
            let mut cursor = Cursor::new(value.as_ref());
            let s = read_cstring(&mut cursor, max, "tlv")
                .map_err(|_| CodecError::TlvValue {
                    tag,
                    reason: "malformed c-octet string value",
                })?;
            if (cursor.position() as usize) != value.len() {
                return Err(CodecError::TlvValue {
                    tag,
                    reason: "declared length does not match the parameter's type",
                });
            }
            Ok(FieldValue::Str(s))
        }
        TlvType::Octets => Ok(FieldValue::Bytes(value.clone())),
        TlvType::Empty => {
            expect_len(0)?;
            Ok(FieldValue::Bytes(Bytes::new()))
        }
    }
}

/// Encodes a typed optional-parameter value to its canonical wire form.
/// Used at construction time so built and decoded PDUs compare equal.
pub(crate) fn encode_tlv_value(
    tag: u16,
    ty: TlvType,
    value: &FieldValue,
) -> Result<Bytes, CodecError> {
    let bad = |reason: &'static str| CodecError::TlvValue { tag, reason };
    match (ty, value) {
        (TlvType::Int1, FieldValue::Int(v)) => {
            if *v > u8::MAX.into() {
                return Err(bad("value exceeds one octet"));
            }
            Ok(Bytes::copy_from_slice(&[*v as u8]))
        }
        (TlvType::Int2, FieldValue::Int(v)) => {
            if *v > u16::MAX.into() {
                return Err(bad("value exceeds two octets"));
            }
            Ok(Bytes::copy_from_slice(&(*v as u16).to_be_bytes()))
        }
        (TlvType::Int4, FieldValue::Int(v)) => Ok(Bytes::copy_from_slice(&v.to_be_bytes())),
        (TlvType::Enum(domain), FieldValue::Int(v)) => {
            if *v > u8::MAX.into() || !domain.contains(*v as u8) {
                return Err(bad("value outside the parameter's enumerated domain"));
            }
            Ok(Bytes::copy_from_slice(&[*v as u8]))
        }
        (TlvType::CString { max }, FieldValue::Str(s)) => {
            let mut buf = BytesMut::with_capacity(s.len() + 1);
            write_cstring(&mut buf, s, max, "tlv").map_err(|_| bad("over-long or non-ASCII string"))?;
            Ok(buf.freeze())
        }
        (TlvType::Octets, FieldValue::Bytes(b)) => Ok(b.clone()),
        (TlvType::Empty, FieldValue::Bytes(b)) if b.is_empty() => Ok(Bytes::new()),
        _ => Err(bad("value does not match the parameter's declared type")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cursor(bytes: &[u8]) -> Cursor<&[u8]> {
        Cursor::new(bytes)
    }

    #[test]
    fn cstring_empty_and_positioning() {
        let data = [0x00u8, 0x41];
        let mut buf = cursor(&data);
        assert_eq!(read_cstring(&mut buf, 6, "f").unwrap(), "");
        assert_eq!(buf.position(), 1);
    }

    #[test]
    fn cstring_missing_nul() {
        let data = *b"abc";
        let mut buf = cursor(&data);
        assert!(matches!(
            read_cstring(&mut buf, 6, "f"),
            Err(CodecError::UnterminatedCString { .. })
        ));
    }

    #[test]
    fn cstring_nul_beyond_max() {
        let data = *b"toolong\0";
        let mut buf = cursor(&data);
        assert!(matches!(
            read_cstring(&mut buf, 6, "f"),
            Err(CodecError::CStringTooLong { .. })
        ));
    }

    #[test]
    fn octets_var_consults_sibling() {
        let spec = FieldSpec::octets_var("short_message", "sm_length");
        let mut fields = HashMap::new();
        fields.insert("sm_length", FieldValue::Int(3));
        let data = [0x01u8, 0x02, 0x03, 0x04];
        let mut buf = cursor(&data);
        let value = decode_field(&spec, &mut buf, &fields).unwrap();
        assert_eq!(value, FieldValue::Bytes(Bytes::copy_from_slice(&[1, 2, 3])));
        assert_eq!(buf.position(), 3);
    }

    #[test]
    fn octets_fixed_reads_exactly() {
        let spec = FieldSpec {
            name: "f",
            kind: FieldType::OctetsFixed { len: 2 },
        };
        let data = [0xAAu8, 0xBB, 0xCC];
        let mut buf = cursor(&data);
        let value = decode_field(&spec, &mut buf, &HashMap::new()).unwrap();
        assert_eq!(value, FieldValue::Bytes(Bytes::copy_from_slice(&[0xAA, 0xBB])));
    }

    #[test]
    fn enum_field_rejects_out_of_domain() {
        let spec = FieldSpec::enumerated("source_addr_ton", Domain::Ton);
        let data = [0x07u8];
        let mut buf = cursor(&data);
        assert!(matches!(
            decode_field(&spec, &mut buf, &HashMap::new()),
            Err(CodecError::OutOfDomain {
                field: "source_addr_ton",
                ..
            })
        ));
    }

    #[test]
    fn truncated_integer() {
        let spec = FieldSpec {
            name: "error_status_code",
            kind: FieldType::Int { width: 4 },
        };
        let data = [0x00u8, 0x01];
        let mut buf = cursor(&data);
        assert!(matches!(
            decode_field(&spec, &mut buf, &HashMap::new()),
            Err(CodecError::TruncatedField { needed: 4, available: 2, .. })
        ));
    }

    #[test]
    fn tlv_int2_length_cross_check() {
        let value = Bytes::copy_from_slice(&[0x01]);
        assert!(matches!(
            decode_tlv_value(0x0204, TlvType::Int2, &value),
            Err(CodecError::TlvValue { .. })
        ));
        let value = Bytes::copy_from_slice(&[0x01, 0x02]);
        assert_eq!(
            decode_tlv_value(0x0204, TlvType::Int2, &value).unwrap(),
            FieldValue::Int(0x0102)
        );
    }

    #[test]
    fn tlv_cstring_round_trip() {
        let encoded = encode_tlv_value(
            0x001E,
            TlvType::CString { max: 65 },
            &FieldValue::Str("abc123".into()),
        )
        .unwrap();
        assert_eq!(encoded.as_ref(), b"abc123\0");
        let decoded = decode_tlv_value(0x001E, TlvType::CString { max: 65 }, &encoded).unwrap();
        assert_eq!(decoded, FieldValue::Str("abc123".into()));
    }

    #[test]
    fn dest_addresses_mixed_list() {
        let spec = FieldSpec::dest_addresses("dest_addresses", "number_of_dests");
        let mut fields = HashMap::new();
        fields.insert("number_of_dests", FieldValue::Int(2));
        let mut data = vec![0x01u8, 0x01, 0x01];
        data.extend_from_slice(b"123\0");
        data.push(0x02);
        data.extend_from_slice(b"friends\0");
        let mut buf = cursor(&data);
        let value = decode_field(&spec, &mut buf, &fields).unwrap();
        assert_eq!(
            value,
            FieldValue::DestAddresses(vec![
                DestAddress::sme(TypeOfNumber::International, NumericPlanIndicator::Isdn, "123"),
                DestAddress::distribution_list("friends"),
            ])
        );
        assert_eq!(buf.position() as usize, data.len());
    }
}
