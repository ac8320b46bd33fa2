//! Frame-level decode and encode.
//!
//! [`decode`] walks a single complete PDU frame: header, then the mandatory
//! fields of the operation's descriptor in wire order, then the TLV tail.
//! [`encode`] walks the same descriptor in the other direction, so a decoded
//! PDU re-encodes to the exact bytes it came from. Corruption is never
//! papered over: any field outside its domain, any length that disagrees
//! with the data, any truncation is an error naming the offending field.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::io::Cursor;

use bytes::{Buf, BufMut, Bytes, BytesMut};
use thiserror::Error;
use tracing::{debug, warn};

use crate::datatypes::Tlv;
use crate::fields::{decode_field, decode_tlv_value, encode_field, Domain};
use crate::pdu::Pdu;
use crate::registry;

/// Header length of every PDU, in octets.
pub const HEADER_LENGTH: usize = 16;

/// Upper bound on command_length. Anything larger is treated as a framing
/// error rather than an allocation request.
pub const MAX_PDU_SIZE: usize = 65536;

/// What went wrong, at the level of an individual field or frame element.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    #[error("incomplete header: {available} of {HEADER_LENGTH} octets")]
    TruncatedHeader { available: usize },

    #[error("command_length {length} outside [{HEADER_LENGTH}, {MAX_PDU_SIZE}]")]
    InvalidCommandLength { length: usize },

    #[error("body shorter than command_length declares: {available} of {needed} octets")]
    TruncatedBody { needed: usize, available: usize },

    #[error("field '{field}' truncated: {available} of {needed} octets")]
    TruncatedField {
        field: &'static str,
        needed: usize,
        available: usize,
    },

    #[error("field '{field}' has no NUL terminator within {max} octets")]
    UnterminatedCString { field: &'static str, max: usize },

    #[error("field '{field}' exceeds its maximum of {max} octets")]
    CStringTooLong { field: &'static str, max: usize },

    #[error("field '{field}' contains non-ASCII octets")]
    NonAsciiString { field: &'static str },

    #[error("field '{field}': value {value:#04x} outside domain {domain:?}")]
    OutOfDomain {
        field: &'static str,
        domain: Domain,
        value: u32,
    },

    #[error("field '{field}': {subfield} bits of {value:#04x} form a reserved pattern")]
    InvalidBitField {
        field: &'static str,
        subfield: &'static str,
        value: u8,
    },

    #[error("optional parameter tail ends mid-header: {available} of 4 octets")]
    TruncatedTlv { available: usize },

    #[error("tag {tag:#06x} declares {declared} octets but only {available} remain")]
    TlvLengthOverrun {
        tag: u16,
        declared: usize,
        available: usize,
    },

    #[error("tag {tag:#06x}: {reason}")]
    TlvValue { tag: u16, reason: &'static str },

    #[error("{count} octets past the end of the declared body")]
    TrailingBytes { count: usize },

    #[error("mandatory field '{field}' missing")]
    MissingField { field: &'static str },

    #[error("field '{field}': {reason}")]
    FieldValidation { field: &'static str, reason: String },
}

/// A decode failure together with whatever header context was parsed before
/// the failure, so callers can answer the peer (generic_nack needs the
/// sequence number) even when the body is garbage.
#[derive(Debug)]
pub struct DecodeError {
    pub command_id: Option<u32>,
    pub sequence_number: Option<u32>,
    pub kind: CodecError,
}

impl DecodeError {
    fn bare(kind: CodecError) -> Self {
        DecodeError {
            command_id: None,
            sequence_number: None,
            kind,
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.command_id, self.sequence_number) {
            (Some(id), Some(seq)) => write!(
                f,
                "failed to decode {} (command_id={id:#010x}, sequence_number={seq}): {}",
                registry::command_name(id),
                self.kind
            ),
            _ => write!(f, "failed to decode PDU header: {}", self.kind),
        }
    }
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}

/// The four-word header every PDU starts with.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PduHeader {
    pub command_length: u32,
    pub command_id: u32,
    pub command_status: u32,
    pub sequence_number: u32,
}

/// What to do when the TLV tail repeats a tag.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum DuplicateTlvPolicy {
    /// Keep the first occurrence, drop later ones.
    #[default]
    FirstWins,
    /// Each occurrence replaces the previous one.
    LastWins,
}

#[derive(Copy, Clone, Debug, Default)]
pub struct DecodeOptions {
    pub duplicate_tlv: DuplicateTlvPolicy,
}

/// Parses the 16-octet header. Validates command_length against the frame
/// bounds but not against the supplied slice.
pub fn parse_header(bytes: &[u8]) -> Result<PduHeader, CodecError> {
    if bytes.len() < HEADER_LENGTH {
        return Err(CodecError::TruncatedHeader {
            available: bytes.len(),
        });
    }
    let mut buf = Cursor::new(bytes);
    let header = PduHeader {
        command_length: buf.get_u32(),
        command_id: buf.get_u32(),
        command_status: buf.get_u32(),
        sequence_number: buf.get_u32(),
    };
    let length = header.command_length as usize;
    if length < HEADER_LENGTH || length > MAX_PDU_SIZE {
        return Err(CodecError::InvalidCommandLength { length });
    }
    Ok(header)
}

/// Framing probe for stream readers: `Ok(Some(n))` when the buffer starts
/// with a complete n-octet PDU, `Ok(None)` when more bytes are needed, and
/// an error when the length word can never frame a valid PDU.
pub fn check(bytes: &[u8]) -> Result<Option<usize>, CodecError> {
    if bytes.len() < 4 {
        return Ok(None);
    }
    let length = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as usize;
    if length < HEADER_LENGTH || length > MAX_PDU_SIZE {
        return Err(CodecError::InvalidCommandLength { length });
    }
    if bytes.len() < length {
        return Ok(None);
    }
    Ok(Some(length))
}

/// Decodes the next PDU from a positioned buffer, consuming exactly
/// command_length octets and leaving the cursor at the following PDU
/// boundary. The cursor does not move on failure.
pub(crate) fn decode_next(
    buf: &mut Cursor<&[u8]>,
    options: DecodeOptions,
) -> Result<Pdu, DecodeError> {
    let start = buf.position() as usize;
    let data: &[u8] = *buf.get_ref();
    let bytes = &data[start..];
    let length = match check(bytes).map_err(DecodeError::bare)? {
        Some(length) => length,
        None if bytes.len() < HEADER_LENGTH => {
            return Err(DecodeError::bare(CodecError::TruncatedHeader {
                available: bytes.len(),
            }));
        }
        None => {
            let header = parse_header(bytes).map_err(DecodeError::bare)?;
            return Err(DecodeError {
                command_id: Some(header.command_id),
                sequence_number: Some(header.sequence_number),
                kind: CodecError::TruncatedBody {
                    needed: header.command_length as usize - HEADER_LENGTH,
                    available: bytes.len() - HEADER_LENGTH,
                },
            });
        }
    };
    let pdu = decode(&bytes[..length], options)?;
    buf.advance(length);
    Ok(pdu)
}

/// Decodes one complete PDU frame. The slice must contain exactly the
/// octets command_length declares.
pub(crate) fn decode(bytes: &[u8], options: DecodeOptions) -> Result<Pdu, DecodeError> {
    let header = parse_header(bytes).map_err(DecodeError::bare)?;
    let ctx = |kind: CodecError| DecodeError {
        command_id: Some(header.command_id),
        sequence_number: Some(header.sequence_number),
        kind,
    };

    let declared = header.command_length as usize;
    if bytes.len() < declared {
        return Err(ctx(CodecError::TruncatedBody {
            needed: declared - HEADER_LENGTH,
            available: bytes.len() - HEADER_LENGTH,
        }));
    }
    if bytes.len() > declared {
        return Err(ctx(CodecError::TrailingBytes {
            count: bytes.len() - declared,
        }));
    }
    let body = &bytes[HEADER_LENGTH..declared];

    let Some(desc) = registry::lookup(header.command_id) else {
        warn!(
            command_id = format_args!("{:#010x}", header.command_id),
            sequence_number = header.sequence_number,
            "unknown command, retaining body verbatim"
        );
        return Ok(Pdu {
            command_id: header.command_id,
            command_status: header.command_status,
            sequence_number: header.sequence_number,
            fields: HashMap::new(),
            tlvs: BTreeMap::new(),
            opaque_body: Some(Bytes::copy_from_slice(body)),
        });
    };

    let mut buf = Cursor::new(body);
    let mut fields = HashMap::new();

    // An error response carries no mandatory fields; whatever follows the
    // header is an optional-parameter tail.
    let skip_mandatory = desc.no_body_on_error && header.command_status != 0;
    if !skip_mandatory {
        for spec in desc.fields {
            let value = decode_field(spec, &mut buf, &fields).map_err(&ctx)?;
            fields.insert(spec.name, value);
        }
    }

    let mut tlvs: BTreeMap<u16, Tlv> = BTreeMap::new();
    while buf.has_remaining() {
        let available = buf.remaining();
        if available < 4 {
            return Err(ctx(CodecError::TruncatedTlv { available }));
        }
        let tag = buf.get_u16();
        let len = buf.get_u16() as usize;
        if buf.remaining() < len {
            return Err(ctx(CodecError::TlvLengthOverrun {
                tag,
                declared: len,
                available: buf.remaining(),
            }));
        }
        let value = buf.copy_to_bytes(len);
        let decoded = match desc.tlv_type(tag) {
            Some(ty) => Some(decode_tlv_value(tag, ty, &value).map_err(&ctx)?),
            None => {
                debug!(
                    command = desc.name,
                    tag = format_args!("{tag:#06x}"),
                    "unrecognized optional parameter retained verbatim"
                );
                None
            }
        };
        let tlv = Tlv {
            tag,
            value,
            decoded,
        };
        if tlvs.contains_key(&tag) {
            warn!(
                command = desc.name,
                tag = format_args!("{tag:#06x}"),
                policy = ?options.duplicate_tlv,
                "duplicate optional parameter"
            );
            if options.duplicate_tlv == DuplicateTlvPolicy::LastWins {
                tlvs.insert(tag, tlv);
            }
        } else {
            tlvs.insert(tag, tlv);
        }
    }

    Ok(Pdu {
        command_id: header.command_id,
        command_status: header.command_status,
        sequence_number: header.sequence_number,
        fields,
        tlvs,
        opaque_body: None,
    })
}

/// Encodes a PDU to its wire form. Optional parameters go out in ascending
/// tag order; the length word is computed, never taken on trust.
pub(crate) fn encode(pdu: &Pdu) -> Result<Bytes, CodecError> {
    let mut body = BytesMut::new();

    if let Some(opaque) = &pdu.opaque_body {
        body.put_slice(opaque);
    } else if let Some(desc) = registry::lookup(pdu.command_id) {
        let skip_mandatory = desc.no_body_on_error && pdu.command_status != 0;
        if !skip_mandatory {
            for spec in desc.fields {
                let value = pdu
                    .fields
                    .get(spec.name)
                    .ok_or(CodecError::MissingField { field: spec.name })?;
                encode_field(spec, value, &mut body)?;
            }
        }
        for tlv in pdu.tlvs.values() {
            tlv.encode(&mut body);
        }
    } else {
        for tlv in pdu.tlvs.values() {
            tlv.encode(&mut body);
        }
    }

    let length = HEADER_LENGTH + body.len();
    if length > MAX_PDU_SIZE {
        return Err(CodecError::InvalidCommandLength { length });
    }
    let mut out = BytesMut::with_capacity(length);
    out.put_u32(length as u32);
    out.put_u32(pdu.command_id);
    out.put_u32(pdu.command_status);
    out.put_u32(pdu.sequence_number);
    out.unsplit(body);
    Ok(out.freeze())
}
