//! The PDU value type and its builder.
//!
//! A [`Pdu`] is an immutable decoded (or built) protocol data unit: header
//! words, mandatory fields keyed by wire name, and optional parameters
//! keyed by tag. Mutation goes through [`PduBuilder`], which validates
//! everything atomically at [`PduBuilder::build`] so a `Pdu` in hand is
//! always encodable.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::io::Cursor;

use bytes::Bytes;

use crate::codec::{self, CodecError, DecodeError, DecodeOptions};
use crate::datatypes::{CommandId, Tag, Tlv};
use crate::fields::{encode_tlv_value, FieldType, FieldValue};
use crate::registry;

/// One protocol data unit.
#[derive(Clone, Debug, PartialEq)]
pub struct Pdu {
    pub(crate) command_id: u32,
    pub(crate) command_status: u32,
    pub(crate) sequence_number: u32,
    pub(crate) fields: HashMap<&'static str, FieldValue>,
    pub(crate) tlvs: BTreeMap<u16, Tlv>,
    /// Body of a PDU whose command_id no descriptor covers, kept verbatim.
    pub(crate) opaque_body: Option<Bytes>,
}

impl Pdu {
    /// Decodes one complete frame with default options.
    pub fn decode(bytes: &[u8]) -> Result<Pdu, DecodeError> {
        codec::decode(bytes, DecodeOptions::default())
    }

    pub fn decode_with_options(bytes: &[u8], options: DecodeOptions) -> Result<Pdu, DecodeError> {
        codec::decode(bytes, options)
    }

    /// Decodes the next PDU from a positioned buffer, leaving the cursor at
    /// the following PDU boundary so back-to-back frames decode in a loop.
    pub fn decode_next(buf: &mut Cursor<&[u8]>) -> Result<Pdu, DecodeError> {
        codec::decode_next(buf, DecodeOptions::default())
    }

    /// Encodes to wire form. Cannot fail for a PDU produced by `decode` or
    /// `build`; the `Result` covers hand-assembled values.
    pub fn to_bytes(&self) -> Result<Bytes, CodecError> {
        codec::encode(self)
    }

    pub fn command_id(&self) -> u32 {
        self.command_id
    }

    pub fn command_status(&self) -> u32 {
        self.command_status
    }

    pub fn sequence_number(&self) -> u32 {
        self.sequence_number
    }

    /// Wire-format name of the operation, or `"unknown"`.
    pub fn command_name(&self) -> &'static str {
        registry::command_name(self.command_id)
    }

    pub fn is_response(&self) -> bool {
        self.command_id & 0x8000_0000 != 0
    }

    /// A mandatory field by its wire name.
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// An optional parameter by tag.
    pub fn tlv(&self, tag: impl Into<u16>) -> Option<&Tlv> {
        self.tlvs.get(&tag.into())
    }

    pub fn has_tlv(&self, tag: impl Into<u16>) -> bool {
        self.tlvs.contains_key(&tag.into())
    }

    /// All optional parameters in ascending tag order.
    pub fn tlvs(&self) -> impl Iterator<Item = &Tlv> {
        self.tlvs.values()
    }

    /// The verbatim body of an unrecognized command, if this is one.
    pub fn opaque_body(&self) -> Option<&Bytes> {
        self.opaque_body.as_ref()
    }
}

/// Diagnostic rendering: command name on the opening line, one line per
/// header field, mandatory field and optional parameter. Not a wire
/// artifact and carries no round-trip guarantee.
impl fmt::Display for Pdu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.command_name())?;
        writeln!(f, "  command_id: {:#010x}", self.command_id)?;
        writeln!(f, "  command_status: {:#010x}", self.command_status)?;
        writeln!(f, "  sequence_number: {}", self.sequence_number)?;
        if let Some(desc) = registry::lookup(self.command_id) {
            for spec in desc.fields {
                if let Some(value) = self.fields.get(spec.name) {
                    writeln!(f, "  {}: {}", spec.name, value)?;
                }
            }
        }
        if let Some(body) = &self.opaque_body {
            write!(f, "  body:")?;
            for byte in body.iter() {
                write!(f, " {byte:02x}")?;
            }
            writeln!(f)?;
        }
        for tlv in self.tlvs.values() {
            match &tlv.decoded {
                Some(value) => writeln!(f, "  [{:#06x}]: {}", tlv.tag, value)?,
                None => {
                    write!(f, "  [{:#06x}]:", tlv.tag)?;
                    for byte in tlv.value.iter() {
                        write!(f, " {byte:02x}")?;
                    }
                    writeln!(f)?;
                }
            }
        }
        Ok(())
    }
}

enum TlvInput {
    Typed(FieldValue),
    Raw(Bytes),
}

/// Accumulates fields and optional parameters for one operation, then
/// validates and freezes them into a [`Pdu`]. Created through the
/// constructors in [`crate::operations`].
pub struct PduBuilder {
    command_id: CommandId,
    command_status: u32,
    sequence_number: u32,
    /// Neutral defaults seeded by the operation constructors. Kept apart
    /// from caller-set fields so an error response can drop them silently.
    defaults: HashMap<&'static str, FieldValue>,
    fields: HashMap<&'static str, FieldValue>,
    tlvs: Vec<(u16, TlvInput)>,
}

impl PduBuilder {
    pub(crate) fn new(command_id: CommandId) -> Self {
        PduBuilder {
            command_id,
            command_status: 0,
            sequence_number: 0,
            defaults: HashMap::new(),
            fields: HashMap::new(),
            tlvs: Vec::new(),
        }
    }

    pub(crate) fn default_field(mut self, name: &'static str, value: FieldValue) -> Self {
        self.defaults.insert(name, value);
        self
    }

    pub fn sequence_number(mut self, sequence_number: u32) -> Self {
        self.sequence_number = sequence_number;
        self
    }

    /// Raw status word. Vendor-specific codes pass through untouched.
    pub fn command_status(mut self, command_status: impl Into<u32>) -> Self {
        self.command_status = command_status.into();
        self
    }

    /// Sets a mandatory field by its wire name. Unknown names and value
    /// type mismatches surface at `build`.
    pub fn field(mut self, name: &'static str, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(name, value.into());
        self
    }

    /// Appends a recognized optional parameter with a typed value.
    pub fn tlv(mut self, tag: Tag, value: impl Into<FieldValue>) -> Self {
        self.tlvs.push((tag.into(), TlvInput::Typed(value.into())));
        self
    }

    /// Appends an optional parameter verbatim, recognized or not.
    pub fn tlv_raw(mut self, tag: u16, value: impl Into<Bytes>) -> Self {
        self.tlvs.push((tag, TlvInput::Raw(value.into())));
        self
    }

    /// Validates everything against the operation's descriptor and freezes
    /// the PDU. Length and count fields are derived from the data they
    /// govern, never taken from the caller.
    pub fn build(self) -> Result<Pdu, CodecError> {
        let desc = registry::lookup(self.command_id.into()).ok_or(CodecError::FieldValidation {
            field: "command_id",
            reason: "no descriptor for this command".to_owned(),
        })?;

        let suppress_body = desc.no_body_on_error && self.command_status != 0;
        if suppress_body && !self.fields.is_empty() {
            return Err(CodecError::FieldValidation {
                field: desc.fields.first().map_or("body", |s| s.name),
                reason: format!(
                    "{} carries no mandatory fields when command_status is non-zero",
                    desc.name
                ),
            });
        }

        let mut fields = if suppress_body {
            HashMap::new()
        } else {
            let mut merged = self.defaults;
            merged.extend(self.fields);
            merged
        };

        if !suppress_body {
            // Derive governing integers before the presence check.
            for spec in desc.fields {
                let (target, governing) = match spec.kind {
                    FieldType::OctetsVar { len_field } => (spec.name, len_field),
                    FieldType::DestAddresses { count_field } => (spec.name, count_field),
                    FieldType::UnsuccessSmes { count_field } => (spec.name, count_field),
                    _ => continue,
                };
                let derived = match fields.get(target) {
                    Some(FieldValue::Bytes(b)) => b.len(),
                    Some(FieldValue::DestAddresses(v)) => v.len(),
                    Some(FieldValue::UnsuccessSmes(v)) => v.len(),
                    _ => continue,
                };
                if derived > u8::MAX.into() {
                    return Err(CodecError::FieldValidation {
                        field: spec.name,
                        reason: format!("{derived} entries exceed the one-octet count field"),
                    });
                }
                fields.insert(governing, FieldValue::Int(derived as u32));
            }

            for spec in desc.fields {
                if !fields.contains_key(spec.name) {
                    return Err(CodecError::MissingField { field: spec.name });
                }
            }
            for name in fields.keys() {
                if desc.field(name).is_none() {
                    return Err(CodecError::FieldValidation {
                        field: "body",
                        reason: format!("'{name}' is not a field of {}", desc.name),
                    });
                }
            }
        }

        let mut tlvs = BTreeMap::new();
        for (tag, input) in self.tlvs {
            let tlv = match input {
                TlvInput::Typed(value) => {
                    let ty = desc.tlv_type(tag).ok_or(CodecError::TlvValue {
                        tag,
                        reason: "parameter not recognized by this operation",
                    })?;
                    let raw = encode_tlv_value(tag, ty, &value)?;
                    Tlv {
                        tag,
                        value: raw,
                        decoded: Some(value),
                    }
                }
                TlvInput::Raw(value) => Tlv::opaque(tag, value),
            };
            tlvs.insert(tag, tlv);
        }

        let pdu = Pdu {
            command_id: self.command_id.into(),
            command_status: self.command_status,
            sequence_number: self.sequence_number,
            fields,
            tlvs,
            opaque_body: None,
        };
        // Trial encode: every field and parameter passes through the same
        // codec tables the wire path uses, so a built PDU cannot fail later.
        codec::encode(&pdu)?;
        Ok(pdu)
    }
}
