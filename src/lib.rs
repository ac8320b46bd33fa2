//! Encoder and decoder for SMPP v3.4 protocol data units.
//!
//! Every operation is described declaratively: one table of mandatory
//! fields in wire order plus one table of recognized optional parameters
//! per command, consulted by both directions of the codec. Decoding is
//! strict (truncation, out-of-domain values and disagreeing lengths are
//! errors carrying the offending field's name) and round-trip safe: a
//! decoded PDU re-encodes to the exact bytes it came from, unknown
//! optional parameters included.
//!
//! # Examples
//!
//! Building and decoding a submit_sm (Section 4.4.1):
//!
//! ```rust
//! use smpp_pdu::datatypes::{NumericPlanIndicator, Tag, TypeOfNumber};
//! use smpp_pdu::{operations, Pdu};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let pdu = operations::submit_sm()
//!     .sequence_number(1)
//!     .field("source_addr_ton", TypeOfNumber::International)
//!     .field("source_addr_npi", NumericPlanIndicator::Isdn)
//!     .field("source_addr", "1234567890")
//!     .field("destination_addr", "0987654321")
//!     .field("short_message", &b"Hello, World!"[..])
//!     .tlv(Tag::UserMessageReference, 0x0042u32)
//!     .build()?;
//!
//! let bytes = pdu.to_bytes()?;
//! let decoded = Pdu::decode(&bytes)?;
//! assert_eq!(decoded, pdu);
//! assert_eq!(decoded.to_bytes()?, bytes);
//! # Ok(())
//! # }
//! ```

pub mod codec;
pub mod datatypes;
pub mod fields;
pub mod operations;
pub mod pdu;
pub mod registry;

#[cfg(test)]
mod tests;

// Re-export the codec surface for direct access
pub use codec::{
    check, parse_header, CodecError, DecodeError, DecodeOptions, DuplicateTlvPolicy, PduHeader,
    HEADER_LENGTH, MAX_PDU_SIZE,
};

// Re-export the PDU value type and builder
pub use fields::FieldValue;
pub use pdu::{Pdu, PduBuilder};
