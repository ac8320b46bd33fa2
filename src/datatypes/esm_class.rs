use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::codec::CodecError;

/// Bit-packed esm_class field: messaging mode (bits 1-0), message type
/// (bits 5-2) and GSM feature flags (bits 7-6), each validated on its own.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct EsmClass {
    pub mode: EsmMode,
    pub message_type: EsmMessageType,
    pub features: EsmFeatures,
}

/// Messaging mode, bits 1-0 of esm_class. All four patterns are legal.
#[derive(IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum EsmMode {
    #[default]
    Default = 0x00,
    Datagram = 0x01,
    Forward = 0x02,
    StoreAndForward = 0x03,
}

/// Message type, bits 5-2 of esm_class, kept in wire position. Patterns
/// outside this set are a corruption error.
#[derive(IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum EsmMessageType {
    #[default]
    Default = 0x00,
    SmscDeliveryReceipt = 0x04,
    SmeDeliveryAck = 0x08,
    SmeManualAck = 0x10,
    ConversationAbort = 0x18,
    IntermediateDeliveryReceipt = 0x20,
}

/// GSM network feature flags, bits 7-6 of esm_class. A bitset, so every
/// pattern is legal.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct EsmFeatures {
    /// Bit 6: user data header indicator.
    pub udhi: bool,
    /// Bit 7: reply path.
    pub reply_path: bool,
}

impl EsmClass {
    const MODE_MASK: u8 = 0x03;
    const TYPE_MASK: u8 = 0x3C;
    const UDHI_BIT: u8 = 0x40;
    const REPLY_PATH_BIT: u8 = 0x80;

    pub fn new(mode: EsmMode, message_type: EsmMessageType) -> Self {
        EsmClass {
            mode,
            message_type,
            features: EsmFeatures::default(),
        }
    }

    pub fn with_udhi(mut self) -> Self {
        self.features.udhi = true;
        self
    }

    pub fn with_reply_path(mut self) -> Self {
        self.features.reply_path = true;
        self
    }

    pub fn to_byte(self) -> u8 {
        let mut value = u8::from(self.mode) | u8::from(self.message_type);
        if self.features.udhi {
            value |= Self::UDHI_BIT;
        }
        if self.features.reply_path {
            value |= Self::REPLY_PATH_BIT;
        }
        value
    }

    /// Decodes the byte, validating each sub-field against its own domain.
    /// The error names the field and the offending sub-field.
    pub fn from_byte(value: u8, field: &'static str) -> Result<Self, CodecError> {
        let mode = EsmMode::try_from(value & Self::MODE_MASK).map_err(|_| {
            CodecError::InvalidBitField {
                field,
                subfield: "messaging_mode",
                value,
            }
        })?;
        let message_type = EsmMessageType::try_from(value & Self::TYPE_MASK).map_err(|_| {
            CodecError::InvalidBitField {
                field,
                subfield: "message_type",
                value,
            }
        })?;
        Ok(EsmClass {
            mode,
            message_type,
            features: EsmFeatures {
                udhi: value & Self::UDHI_BIT != 0,
                reply_path: value & Self::REPLY_PATH_BIT != 0,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_round_trip() {
        let class = EsmClass::new(EsmMode::Forward, EsmMessageType::SmscDeliveryReceipt)
            .with_udhi();
        assert_eq!(class.to_byte(), 0x46);
        assert_eq!(EsmClass::from_byte(0x46, "esm_class").unwrap(), class);
    }

    #[test]
    fn illegal_message_type_bits() {
        // 0x0C is not a defined message type pattern
        let err = EsmClass::from_byte(0x0C, "esm_class").unwrap_err();
        assert!(matches!(
            err,
            CodecError::InvalidBitField {
                subfield: "message_type",
                ..
            }
        ));
    }
}
