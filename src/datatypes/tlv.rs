use bytes::{BufMut, Bytes, BytesMut};

use crate::fields::FieldValue;

/// One optional parameter. The raw value is the canonical wire form and is
/// what re-encoding emits; `decoded` is the typed view, present only when
/// the operation descriptor recognizes the tag. The length field of the
/// wire form is always derived from the value, never stored.
#[derive(Clone, Debug, PartialEq)]
pub struct Tlv {
    pub tag: u16,
    pub value: Bytes,
    pub decoded: Option<FieldValue>,
}

impl Tlv {
    /// A parameter retained verbatim, with no typed interpretation.
    pub fn opaque(tag: u16, value: impl Into<Bytes>) -> Self {
        Tlv {
            tag,
            value: value.into(),
            decoded: None,
        }
    }

    /// Length of the value in octets, as it appears on the wire.
    pub fn length(&self) -> u16 {
        self.value.len() as u16
    }

    pub(crate) fn encode(&self, buf: &mut BytesMut) {
        buf.put_u16(self.tag);
        buf.put_u16(self.length());
        buf.put_slice(&self.value);
    }
}
